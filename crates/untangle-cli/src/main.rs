use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use untangle::benchmark::BenchmarkConfig;
use untangle::{Difficulty, SolverMode, UntangleConfig};

mod commands;

#[derive(Parser)]
#[command(name = "untangle", version, about = "Move search for planar graph puzzles")]
struct Cli {
    /// TOML or YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// No console output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the next move for a graph and print it as JSON
    Solve {
        /// Graph snapshot (JSON)
        graph: PathBuf,
        #[arg(long)]
        strategy: Option<SolverMode>,
    },
    /// Play a full match and write the replay
    Play {
        /// Graph snapshot (JSON); a puzzle is generated when omitted
        #[arg(long)]
        graph: Option<PathBuf>,
        #[arg(long)]
        strategy: Option<SolverMode>,
        #[command(flatten)]
        puzzle: PuzzleArgs,
        #[arg(long)]
        max_moves: Option<usize>,
        /// Replay output path; printed to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate a puzzle snapshot
    Generate {
        #[command(flatten)]
        puzzle: PuzzleArgs,
        /// Output path; printed to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compare strategies on generated puzzles
    Bench {
        /// Comma-separated strategies; all when omitted
        #[arg(long, value_delimiter = ',')]
        strategies: Vec<SolverMode>,
        #[command(flatten)]
        puzzle: PuzzleArgs,
        #[arg(long, default_value_t = 3)]
        puzzles: usize,
        #[arg(long, default_value_t = 1)]
        warmup: usize,
        #[arg(long)]
        max_moves: Option<usize>,
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(long)]
        markdown: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct PuzzleArgs {
    #[arg(long)]
    nodes: Option<usize>,
    #[arg(long)]
    difficulty: Option<Difficulty>,
    #[arg(long)]
    seed: Option<u64>,
}

impl PuzzleArgs {
    fn apply(&self, mut config: UntangleConfig) -> UntangleConfig {
        if let Some(nodes) = self.nodes {
            config.puzzle.node_count = nodes;
        }
        if let Some(difficulty) = self.difficulty {
            config.puzzle.difficulty = difficulty;
        }
        if let Some(seed) = self.seed {
            config.puzzle.random_seed = Some(seed);
        }
        config
    }
}

fn init_console(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }
    match verbose {
        0 => untangle::console::init(),
        1 => untangle::console::init_with_filter("untangle_solver=debug,untangle_benchmark=debug"),
        _ => untangle::console::init_with_filter("untangle_solver=trace,untangle_benchmark=trace"),
    }
}

fn run(cli: Cli) -> untangle::Result<()> {
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Solve { graph, strategy } => {
            let config = match strategy {
                Some(mode) => config.with_strategy(mode),
                None => config,
            };
            println!("{}", commands::solve(&graph, &config)?);
        }
        Commands::Play {
            graph,
            strategy,
            puzzle,
            max_moves,
            output,
        } => {
            let mut config = puzzle.apply(config);
            if let Some(mode) = strategy {
                config = config.with_strategy(mode);
            }
            if let Some(max) = max_moves {
                config = config.with_max_moves(max);
            }
            // Replay JSON on stdout must not be mixed with console lines.
            init_console(cli.verbose, cli.quiet || output.is_none());

            let (summary, replay) = commands::play(graph.as_deref(), &config)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, replay)?;
                    if !cli.quiet {
                        println!("{}", commands::describe(&summary));
                        println!("replay written to {}", path.display());
                    }
                }
                None => println!("{replay}"),
            }
        }
        Commands::Generate { puzzle, output } => {
            let config = puzzle.apply(config);
            let snapshot = commands::generate(&config)?;
            match output {
                Some(path) => std::fs::write(path, snapshot)?,
                None => println!("{snapshot}"),
            }
        }
        Commands::Bench {
            strategies,
            puzzle,
            puzzles,
            warmup,
            max_moves,
            csv,
            markdown,
        } => {
            let mut config = puzzle.apply(config);
            if let Some(max) = max_moves {
                config = config.with_max_moves(max);
            }

            let mut bench = BenchmarkConfig::new("untangle bench")
                .with_puzzle_count(puzzles)
                .with_warmup_count(warmup)
                .with_node_count(config.puzzle.node_count)
                .with_difficulty(config.puzzle.difficulty);
            if !strategies.is_empty() {
                bench = bench.with_strategies(strategies);
            }
            if let Some(seed) = config.puzzle.random_seed {
                bench = bench.with_base_seed(seed);
            }
            if let Some(path) = csv {
                bench = bench.with_csv_output(path.to_string_lossy());
            }
            if let Some(path) = markdown {
                bench = bench.with_markdown_output(path.to_string_lossy());
            }

            init_console(cli.verbose, cli.quiet);
            println!("{}", commands::bench(bench, &config)?);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
