//! Benchmarking for untangle strategies.
//!
//! Runs every configured strategy through a full match session on the same
//! set of seeded puzzles and compares how far each one gets.
//!
//! # Overview
//!
//! The benchmark:
//! - Generates `puzzle_count` puzzles from consecutive seeds
//! - Executes warmup sessions before measurement
//! - Records moves, candidates, time and remaining crossings per session
//! - Exports results to CSV and Markdown
//!
//! # Example
//!
//! ```
//! use untangle_benchmark::BenchmarkConfig;
//! use untangle_config::SolverMode;
//!
//! let config = BenchmarkConfig::new("Medium boards")
//!     .with_strategies(vec![SolverMode::Greedy])
//!     .with_puzzle_count(5)
//!     .with_csv_output("results.csv")
//!     .with_markdown_output("report.md");
//!
//! assert_eq!(config.name(), "Medium boards");
//! assert_eq!(config.puzzle_count(), 5);
//! assert_eq!(config.strategies(), &[SolverMode::Greedy]);
//! ```

mod config;
mod report;
mod result;
mod runner;

pub use config::BenchmarkConfig;
pub use report::{CsvExporter, MarkdownReport};
pub use result::{BenchmarkResult, BenchmarkRun};
pub use runner::Benchmark;
