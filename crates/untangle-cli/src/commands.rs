//! Subcommand bodies. Each returns the text `main` prints or writes.

use std::path::Path;

use serde::Serialize;
use untangle::benchmark::{Benchmark, BenchmarkConfig, MarkdownReport};
use untangle::{
    create_solver, generate_puzzle, CpuMove, Graph, GraphSnapshot, MatchSession, Result,
    SessionSummary, UntangleConfig, UntangleError, XY,
};

/// `solve` output: one move in wire format.
#[derive(Debug, Serialize)]
pub struct MoveOutput {
    pub strategy: &'static str,
    pub status: String,
    pub node_id: i64,
    pub from: XY,
    pub to: XY,
    pub intersections_before: usize,
    pub intersections_after: usize,
    pub intersection_reduction: i64,
    pub computation_time_ms: u64,
    pub candidates_evaluated: usize,
}

impl MoveOutput {
    fn new(strategy: &'static str, mv: &CpuMove, candidates_evaluated: usize) -> Self {
        Self {
            strategy,
            status: mv.status().to_string(),
            node_id: mv.wire_node_id(),
            from: mv.from_position.into(),
            to: mv.to_position.into(),
            intersections_before: mv.intersections_before,
            intersections_after: mv.intersections_after,
            intersection_reduction: mv.intersection_reduction,
            computation_time_ms: mv.computation_time_ms,
            candidates_evaluated,
        }
    }
}

/// Loads `--config`, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<UntangleConfig> {
    let config = match path {
        Some(path) => UntangleConfig::from_file(path)
            .map_err(|e| UntangleError::Config(e.to_string()))?,
        None => UntangleConfig::default(),
    };
    config
        .validate()
        .map_err(|e| UntangleError::Config(e.to_string()))?;
    Ok(config)
}

pub fn read_graph(path: &Path) -> Result<Graph> {
    GraphSnapshot::from_json_file(path)?.into_graph()
}

/// Finds one move for the graph in `path` and renders it as JSON.
pub fn solve(path: &Path, config: &UntangleConfig) -> Result<String> {
    let graph = read_graph(path)?;
    let mut solver = create_solver(config.search.strategy);
    let mv = solver.find_best_move(graph.nodes().to_vec(), graph.edges(), &config.engine())?;

    let output = MoveOutput::new(solver.name(), &mv, solver.last_candidates_evaluated());
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generates a puzzle from `[puzzle]` and renders its snapshot.
pub fn generate(config: &UntangleConfig) -> Result<String> {
    let puzzle = generate_puzzle(config);
    GraphSnapshot::from_graph(&puzzle.graph).to_json_pretty()
}

/// Plays a match on the given graph, or on a generated puzzle.
///
/// Returns the summary and the replay JSON.
pub fn play(graph: Option<&Path>, config: &UntangleConfig) -> Result<(SessionSummary, String)> {
    let graph = match graph {
        Some(path) => read_graph(path)?,
        None => generate_puzzle(config).graph,
    };

    let mut session = MatchSession::new(graph, config)?;
    let summary = session.run()?;
    let replay = session.replay().export_json()?;
    Ok((summary, replay))
}

/// Runs the benchmark and returns the Markdown comparison.
pub fn bench(bench: BenchmarkConfig, config: &UntangleConfig) -> Result<String> {
    let benchmark = Benchmark::new(bench, config.clone());
    let results = benchmark.run_and_export()?;
    Ok(MarkdownReport::comparison(&results))
}

/// One-line outcome of a played match.
pub fn describe(summary: &SessionSummary) -> String {
    format!(
        "{}: {} after {} moves ({} -> {} crossings, {} candidates)",
        summary.strategy,
        summary.status,
        summary.moves,
        summary.initial_intersections,
        summary.final_intersections,
        summary.stats.candidates_evaluated,
    )
}
