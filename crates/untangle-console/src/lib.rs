//! Colored console output for untangle sessions.
//!
//! Provides a `tracing` layer that renders the engine's structured events
//! (`event = "..."` fields) as colored lines.
//!
//! ## Log Levels
//!
//! - **INFO**: Session lifecycle (search start/end, stuck, session end) and benchmark runs
//! - **DEBUG**: Applied moves, fallbacks, generated puzzles
//! - **TRACE**: Individual candidate improvements

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SESSION_START_NANOS: AtomicU64 = AtomicU64::new(0);

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directives used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVES: &str = "untangle_solver=info,untangle_benchmark=info";

/// Targets whose events the console renders.
const TARGETS: [&str; 4] = [
    "untangle_solver",
    "untangle_benchmark",
    "untangle_cli",
    "untangle::",
];

/// Initializes console output with `RUST_LOG` or [`DEFAULT_DIRECTIVES`].
///
/// Safe to call multiple times - only the first call has effect.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    install(filter);
}

/// Initializes console output with explicit filter directives, for example
/// `"untangle_solver=debug"`. Invalid directives are ignored.
///
/// Safe to call multiple times - only the first call has effect.
pub fn init_with_filter(directives: &str) {
    install(EnvFilter::new(directives));
}

fn install(filter: EnvFilter) {
    INIT.get_or_init(|| {
        print_banner();

        // Another global subscriber may already be installed by the host.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(UntangleConsoleLayer)
            .try_init();
    });
}

fn mark_session_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SESSION_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SESSION_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
             _                    _
 _   _ _ __ | |_ __ _ _ __   __ _| | ___
| | | | '_ \| __/ _` | '_ \ / _` | |/ _ \
| |_| | | | | || (_| | | | | (_| | |  __/
 \__,_|_| |_|\__\__,_|_| |_|\__, |_|\___|
                            |___/
"#;

    let version_line = format!("          v{} - Planar Graph Move Search\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats engine events with colors.
pub struct UntangleConsoleLayer;

impl<S: Subscriber> Layer<S> for UntangleConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        if !TARGETS.iter().any(|prefix| target.starts_with(prefix)) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    strategy: Option<String>,
    status: Option<String>,
    difficulty: Option<String>,
    node_id: Option<i64>,
    reduction: Option<i64>,
    candidates: Option<u64>,
    duration_ms: Option<u64>,
    intersections: Option<u64>,
    moves: Option<u64>,
    initial: Option<u64>,
    remaining: Option<u64>,
    step: Option<u64>,
    nodes: Option<u64>,
    edges: Option<u64>,
    puzzle: Option<u64>,
    runs: Option<u64>,
    x: Option<f64>,
    y: Option<f64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_str(field, s.trim_matches('"'));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "candidates" => self.candidates = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "intersections" => self.intersections = Some(value),
            "moves" => self.moves = Some(value),
            "initial" => self.initial = Some(value),
            "remaining" => self.remaining = Some(value),
            "step" => self.step = Some(value),
            "nodes" => self.nodes = Some(value),
            "edges" => self.edges = Some(value),
            "puzzle" => self.puzzle = Some(value),
            "runs" => self.runs = Some(value),
            "node_id" => self.node_id = Some(value as i64),
            "reduction" => self.reduction = Some(value as i64),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        match field.name() {
            "node_id" => self.node_id = Some(value),
            "reduction" => self.reduction = Some(value),
            _ if value >= 0 => self.record_u64(field, value as u64),
            _ => {}
        }
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "x" => self.x = Some(value),
            "y" => self.y = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "strategy" => self.strategy = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            "difficulty" => self.difficulty = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "search_start" => format_search_start(v),
        "search_end" => format_search_end(v),
        "stuck" => format_stuck(v),
        "move_applied" => format_move_applied(v),
        "neutral_fallback" | "greedy_fallback" => format_fallback(v, event),
        "puzzle_generated" => format_puzzle(v),
        "session_end" => format_session_end(v),
        "bench_start" => format_bench_start(v),
        "bench_run" => format_bench_run(v),
        "bench_end" => format_bench_end(v),
        "improving_candidate" => format_candidate(v, level),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn strategy(v: &EventVisitor) -> &str {
    v.strategy.as_deref().unwrap_or("CPU")
}

fn format_search_start(v: &EventVisitor) -> String {
    // Only the first search of a session gets a header line.
    if v.step != Some(1) {
        return String::new();
    }
    mark_session_start();
    let crossings = v.intersections.unwrap_or(0);

    format!(
        "{} {} {} untangling │ {} crossings",
        format_elapsed(),
        "▶".bright_green().bold(),
        strategy(v).white().bold(),
        crossings.to_formatted_string(&Locale::en).bright_yellow()
    )
}

fn format_search_end(v: &EventVisitor) -> String {
    let candidates = v.candidates.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);
    let node = match v.node_id {
        Some(id) if id >= 0 => format!("node {:>4}", id),
        _ => "no move  ".to_string(),
    };

    format!(
        "{} {} {} │ {} │ {} candidates │ {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        node.white(),
        format_reduction(v.reduction.unwrap_or(0)),
        candidates
            .to_formatted_string(&Locale::en)
            .bright_magenta(),
        format_duration_ms(duration).yellow()
    )
}

fn format_stuck(v: &EventVisitor) -> String {
    format!(
        "{} {} {} stuck │ {} crossings remain",
        format_elapsed(),
        "✗".bright_red().bold(),
        strategy(v).white().bold(),
        v.intersections
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_red()
    )
}

fn format_move_applied(v: &EventVisitor) -> String {
    let node = v.node_id.unwrap_or(-1);
    format!(
        "{} {} Move node {} → ({:.1}, {:.1}) │ {} crossings",
        format_elapsed(),
        "✓".bright_green(),
        node.bright_black(),
        v.x.unwrap_or(0.0),
        v.y.unwrap_or(0.0),
        v.intersections.unwrap_or(0).bright_black()
    )
}

fn format_fallback(v: &EventVisitor, event: &str) -> String {
    let kind = if event == "greedy_fallback" {
        "greedy fallback"
    } else {
        "neutral move"
    };
    format!(
        "{} {} {} │ {} │ {} crossings",
        format_elapsed(),
        "↻".yellow(),
        strategy(v).white(),
        kind.yellow(),
        v.intersections.unwrap_or(0)
    )
}

fn format_puzzle(v: &EventVisitor) -> String {
    format!(
        "{} {} Puzzle {} │ {} nodes │ {} edges │ {} crossings",
        format_elapsed(),
        "◆".bright_blue(),
        v.difficulty.as_deref().unwrap_or("custom").white().bold(),
        v.nodes.unwrap_or(0).to_formatted_string(&Locale::en).bright_yellow(),
        v.edges.unwrap_or(0).to_formatted_string(&Locale::en).bright_yellow(),
        v.intersections.unwrap_or(0).to_formatted_string(&Locale::en).bright_yellow()
    )
}

fn format_candidate(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }
    format!(
        "{} {} Candidate node {:>4} │ {}",
        format_elapsed(),
        "·".bright_black(),
        v.node_id.unwrap_or(-1),
        format_reduction(v.reduction.unwrap_or(0)).bright_black()
    )
}

fn format_session_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("unknown");
    let solved = status == "solved";
    let initial = v.initial.unwrap_or(0);
    let remaining = v.remaining.unwrap_or(0);
    let moves = v.moves.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);

    let status_colored = if solved {
        status.to_uppercase().bright_green().bold().to_string()
    } else {
        status.to_uppercase().bright_red().bold().to_string()
    };

    let mut output = format!(
        "{} {} {} finished │ {} │ {} moves │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        strategy(v).white().bold(),
        status_colored,
        moves.to_formatted_string(&Locale::en).white(),
        format_duration_ms(duration).yellow()
    );

    let title = if solved { "PLANAR LAYOUT FOUND" } else { "CROSSINGS REMAIN" };
    let inner_width: usize = 58;
    let total_pad = inner_width.saturating_sub(title.len());
    let left_pad = total_pad / 2;
    let right_pad = total_pad - left_pad;
    let title_colored = if solved {
        title.bright_green().bold().to_string()
    } else {
        title.bright_red().bold().to_string()
    };

    output.push_str("\n\n");
    output.push_str(
        &"╔══════════════════════════════════════════════════════════╗"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        title_colored,
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(
        &"╠══════════════════════════════════════════════════════════╣"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');
    for (label, value) in [
        ("Initial crossings:", initial),
        ("Final crossings:", remaining),
        ("Moves:", moves),
    ] {
        output.push_str(&format!(
            "{}  {:<18}{:>36}  {}",
            "║".bright_cyan(),
            label,
            value.to_formatted_string(&Locale::en),
            "║".bright_cyan()
        ));
        output.push('\n');
    }
    output.push_str(
        &"╚══════════════════════════════════════════════════════════╝"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    output
}

fn format_bench_start(v: &EventVisitor) -> String {
    mark_session_start();
    format!(
        "{} {} Benchmark │ {} puzzles │ {} nodes each",
        format_elapsed(),
        "▶".bright_green().bold(),
        v.puzzle.unwrap_or(0).to_formatted_string(&Locale::en).bright_yellow(),
        v.nodes.unwrap_or(0).to_formatted_string(&Locale::en).bright_yellow()
    )
}

fn format_bench_run(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("unknown");
    let status = if status == "solved" {
        status.bright_green().to_string()
    } else {
        status.bright_red().to_string()
    };
    format!(
        "{} {} {:<12} puzzle {:>3} │ {} │ {} → {} crossings │ {} moves │ {}",
        format_elapsed(),
        "◀".bright_blue(),
        strategy(v).white().bold(),
        v.puzzle.unwrap_or(0),
        status,
        v.initial.unwrap_or(0),
        v.remaining.unwrap_or(0),
        v.moves.unwrap_or(0).to_formatted_string(&Locale::en),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    )
}

fn format_bench_end(v: &EventVisitor) -> String {
    format!(
        "{} {} Benchmark complete │ {} runs │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        v.runs.unwrap_or(0).to_formatted_string(&Locale::en).white(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

fn format_reduction(reduction: i64) -> String {
    if reduction > 0 {
        format!("-{} crossings", reduction).bright_green().to_string()
    } else if reduction < 0 {
        format!("+{} crossings", -reduction).bright_red().to_string()
    } else {
        "±0 crossings".white().to_string()
    }
}

#[cfg(test)]
mod tests;
