//! Report generation for benchmark results.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::result::BenchmarkResult;

/// CSV exporter for benchmark results.
///
/// One row per run; the strategy column lets several results share a file.
///
/// # Example
///
/// ```
/// use untangle_benchmark::{BenchmarkResult, CsvExporter};
///
/// let result = BenchmarkResult::new("Test", "Greedy", "medium/10");
/// let csv = CsvExporter::to_string(&[result]);
/// assert!(csv.starts_with("strategy,run_index,seed,status"));
/// ```
pub struct CsvExporter;

impl CsvExporter {
    pub const HEADER: &'static str = "strategy,run_index,seed,status,initial_intersections,final_intersections,moves,candidates_evaluated,solve_time_ms,candidates_per_second";

    pub fn to_string(results: &[BenchmarkResult]) -> String {
        let mut output = String::new();
        output.push_str(Self::HEADER);
        output.push('\n');

        for result in results {
            for run in &result.runs {
                output.push_str(&format!(
                    "{},{},{},{},{},{},{},{},{},{:.2}\n",
                    csv_field(&result.solver_name),
                    run.run_index,
                    run.seed,
                    run.status,
                    run.initial_intersections,
                    run.final_intersections,
                    run.moves,
                    run.candidates_evaluated,
                    run.solve_time.as_millis(),
                    run.candidates_per_second(),
                ));
            }
        }

        output
    }

    pub fn to_file(results: &[BenchmarkResult], path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, Self::to_string(results))
    }

    pub fn write<W: Write>(results: &[BenchmarkResult], mut writer: W) -> io::Result<()> {
        writer.write_all(Self::to_string(results).as_bytes())
    }
}

// Strategy names such as "D&C + DP" are safe, but quote anything with a comma.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Markdown report generator.
///
/// # Example
///
/// ```
/// use untangle_benchmark::{BenchmarkResult, MarkdownReport};
///
/// let result = BenchmarkResult::new("Test", "Greedy", "medium/10");
/// let md = MarkdownReport::to_string(&result);
/// assert!(md.contains("# Benchmark: Test"));
/// assert!(md.contains("*No runs completed.*"));
/// ```
pub struct MarkdownReport;

impl MarkdownReport {
    /// Summary and per-run table for one strategy.
    pub fn to_string(result: &BenchmarkResult) -> String {
        let mut output = String::new();

        output.push_str(&format!("# Benchmark: {}\n\n", result.name));
        output.push_str(&format!("- **Strategy**: {}\n", result.solver_name));
        output.push_str(&format!("- **Puzzles**: {}\n", result.problem_name));
        output.push_str(&format!("- **Runs**: {}\n\n", result.run_count()));

        output.push_str("## Summary\n\n");
        if result.runs.is_empty() {
            output.push_str("*No runs completed.*\n");
            return output;
        }

        output.push_str("| Metric | Value |\n");
        output.push_str("|--------|-------|\n");
        output.push_str(&format!(
            "| Solved | {}/{} ({:.0}%) |\n",
            result.solved_count(),
            result.run_count(),
            result.solve_rate() * 100.0
        ));
        if let Some(best) = result.best_final_intersections() {
            output.push_str(&format!("| Best Final Crossings | {} |\n", best));
        }
        if let Some(worst) = result.worst_final_intersections() {
            output.push_str(&format!("| Worst Final Crossings | {} |\n", worst));
        }
        output.push_str(&format!("| Avg Moves | {:.1} |\n", result.avg_moves()));
        output.push_str(&format!(
            "| Avg Time | {:.2} ms |\n",
            result.avg_solve_time().as_secs_f64() * 1000.0
        ));
        output.push_str(&format!(
            "| Min Time | {:.2} ms |\n",
            result.min_solve_time().as_secs_f64() * 1000.0
        ));
        output.push_str(&format!(
            "| Max Time | {:.2} ms |\n",
            result.max_solve_time().as_secs_f64() * 1000.0
        ));
        output.push_str(&format!(
            "| Avg Candidates/sec | {:.0} |\n\n",
            result.avg_candidates_per_second()
        ));

        output.push_str("## Run Details\n\n");
        output.push_str("| Run | Seed | Status | Crossings | Moves | Time (ms) |\n");
        output.push_str("|-----|------|--------|-----------|-------|-----------|\n");
        for run in &result.runs {
            output.push_str(&format!(
                "| {} | {} | {} | {} → {} | {} | {:.2} |\n",
                run.run_index,
                run.seed,
                run.status,
                run.initial_intersections,
                run.final_intersections,
                run.moves,
                run.solve_time.as_secs_f64() * 1000.0,
            ));
        }

        output
    }

    /// Comparison table followed by each strategy's report.
    pub fn full_report(results: &[BenchmarkResult]) -> String {
        let mut output = Self::comparison(results);
        for result in results {
            output.push('\n');
            output.push_str(&Self::to_string(result));
        }
        output
    }

    pub fn to_file(results: &[BenchmarkResult], path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, Self::full_report(results))
    }

    pub fn write<W: Write>(results: &[BenchmarkResult], mut writer: W) -> io::Result<()> {
        writer.write_all(Self::full_report(results).as_bytes())
    }

    /// One row per strategy.
    ///
    /// # Example
    ///
    /// ```
    /// use untangle_benchmark::{BenchmarkResult, MarkdownReport};
    ///
    /// let greedy = BenchmarkResult::new("Test", "Greedy", "medium/10");
    /// let dp = BenchmarkResult::new("Test", "D&C + DP", "medium/10");
    ///
    /// let comparison = MarkdownReport::comparison(&[greedy, dp]);
    /// assert!(comparison.contains("## Comparison"));
    /// assert!(comparison.contains("| D&C + DP | medium/10 | 0/0 |"));
    /// ```
    pub fn comparison(results: &[BenchmarkResult]) -> String {
        let mut output = String::new();

        output.push_str("## Comparison\n\n");
        output.push_str(
            "| Strategy | Puzzles | Solved | Avg Final Crossings | Avg Moves | Avg Time (ms) |\n",
        );
        output.push_str(
            "|----------|---------|--------|---------------------|-----------|---------------|\n",
        );

        for result in results {
            output.push_str(&format!(
                "| {} | {} | {}/{} | {:.2} | {:.1} | {:.2} |\n",
                result.solver_name,
                result.problem_name,
                result.solved_count(),
                result.run_count(),
                result.avg_final_intersections(),
                result.avg_moves(),
                result.avg_solve_time().as_secs_f64() * 1000.0,
            ));
        }

        output
    }
}
