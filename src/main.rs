//! stochgraph - sample and draw random graphs from the command line
//!
//! Without `--model` the program runs an interactive menu; any parameter not
//! given on the command line is prompted for.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dialoguer::{Confirm, Input, Select};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use stochastic_graphs::prelude::*;

/// Largest graph that still draws legibly
const MAX_NODES: usize = 500;

/// Parse and validate an edge probability (must be between 0.0 and 1.0)
fn parse_probability(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("probability must be between 0 and 1, got {}", value));
    }
    Ok(value)
}

/// Parse and validate a vertex count (1 to 500)
fn parse_nodes(s: &str) -> std::result::Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid positive integer", s))?;
    if !(1..=MAX_NODES).contains(&value) {
        return Err(format!(
            "number of nodes must be between 1 and {}, got {}",
            MAX_NODES, value
        ));
    }
    Ok(value)
}

/// Parse and validate a Poisson rate (finite, non-negative)
fn parse_lambda(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("lambda must be non-negative, got {}", value));
    }
    Ok(value)
}

/// Random graph model
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Model {
    /// Erdős–Rényi G(n, p)
    Er,
    /// Galton–Watson branching tree
    Gw,
}

/// Generate and visualize random graphs.
#[derive(Parser)]
#[command(name = "stochgraph")]
#[command(author, version)]
#[command(about = "Generate and visualize random graphs")]
#[command(after_help = "Examples:
  stochgraph                                   Interactive mode
  stochgraph --model er --nodes 100 --prob 0.05
  stochgraph --model gw --lambda 1.2 --generations 8 --output tree.svg")]
struct Cli {
    /// Graph model: 'er' for Erdős–Rényi, 'gw' for Galton–Watson
    #[arg(long, value_enum)]
    model: Option<Model>,

    /// Number of nodes for the Erdős–Rényi model
    #[arg(short = 'n', long, value_parser = parse_nodes)]
    nodes: Option<usize>,

    /// Edge probability for the Erdős–Rényi model (0-1)
    #[arg(short = 'p', long, value_parser = parse_probability)]
    prob: Option<f64>,

    /// Poisson parameter λ for the Galton–Watson model
    #[arg(short = 'l', long = "lambda", value_parser = parse_lambda)]
    lambda: Option<f64>,

    /// Maximum generations for the Galton–Watson model
    #[arg(short = 'g', long)]
    generations: Option<usize>,

    /// Seed for reproducible samples (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write the sample as an SVG image
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with plot colours and canvas size
    #[arg(long)]
    style: Option<PathBuf>,

    /// Enable verbose output (debug logging)
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

/// Options shared by every run in a session
struct Session {
    seed: Option<u64>,
    output: Option<PathBuf>,
    style: PlotStyle,
    quiet: bool,
}

impl Session {
    /// Seeded generator; a fresh seed is drawn and reported when none was given
    fn rng(&self) -> rand::rngs::StdRng {
        let seed = self.seed.unwrap_or_else(rand::random);
        info!(seed, "random source");
        if !self.quiet {
            println!("• Seed: {}", seed);
        }
        seeded(seed)
    }

    fn say(&self, line: &str) {
        if !self.quiet {
            println!("{}", line);
        }
    }
}

fn prompt_nodes() -> Result<usize> {
    let n = Input::<usize>::new()
        .with_prompt(format!("Enter number of nodes (n, max {})", MAX_NODES))
        .validate_with(|n: &usize| -> std::result::Result<(), String> {
            if (1..=MAX_NODES).contains(n) {
                Ok(())
            } else {
                Err(format!("Number of nodes must be between 1 and {}.", MAX_NODES))
            }
        })
        .interact_text()?;
    Ok(n)
}

fn prompt_probability() -> Result<f64> {
    let p = Input::<f64>::new()
        .with_prompt("Enter edge probability (p, 0-1)")
        .validate_with(|p: &f64| -> std::result::Result<(), &'static str> {
            if (0.0..=1.0).contains(p) {
                Ok(())
            } else {
                Err("Probability must be between 0 and 1.")
            }
        })
        .interact_text()?;
    Ok(p)
}

fn prompt_lambda() -> Result<f64> {
    let lambda = Input::<f64>::new()
        .with_prompt("Enter Poisson parameter λ (offspring rate)")
        .validate_with(|l: &f64| -> std::result::Result<(), &'static str> {
            if l.is_finite() && *l >= 0.0 {
                Ok(())
            } else {
                Err("Lambda must be non-negative.")
            }
        })
        .interact_text()?;
    Ok(lambda)
}

fn prompt_generations() -> Result<usize> {
    let generations = Input::<usize>::new()
        .with_prompt("Enter maximum generations")
        .interact_text()?;
    Ok(generations)
}

fn erdos_renyi_mode(session: &Session, n: Option<usize>, p: Option<f64>) -> Result<()> {
    session.say("\n--- Erdős–Rényi Random Graphs G(n,p) ---");
    session.say("Mathematical insight: Watch for phase transition around p ≈ 1/n\n");

    let n = match n {
        Some(n) => n,
        None => prompt_nodes()?,
    };
    let p = match p {
        Some(p) => p,
        None => prompt_probability()?,
    };
    let model = ErdosRenyi::new(n, p)?;

    session.say(&format!("\nGenerating G({}, {:.3})", n, p));
    session.say(&format!(
        "• Critical threshold: around p ≈ 1/n = {:.4}",
        model.critical_probability()
    ));
    session.say(&format!("• Expected degree: {:.2}", model.expected_degree()));
    session.say(&format!("• Connectivity regime: {}", model.regime()));

    let graph = model.generate(&mut session.rng());

    session.say(&format!(
        "• Edges: {} (expected {:.1})",
        graph.edge_count(),
        model.expected_edges()
    ));
    session.say(&format!("• Mean degree: {:.2}", graph.mean_degree()));
    session.say(&format!(
        "• Components: {} (largest {}, isolated vertices {})",
        graph.component_count(),
        graph.largest_component_size(),
        graph.isolated_vertices().len()
    ));

    if let Some(path) = &session.output {
        render_graph(session, &graph, &model, path)?;
    }
    Ok(())
}

fn galton_watson_mode(session: &Session, lambda: Option<f64>, max_gen: Option<usize>) -> Result<()> {
    session.say("\n--- Galton–Watson Branching Process ---");
    session.say("Mathematical insight: Critical parameter λ = 1 separates extinction/explosion\n");

    let lambda = match lambda {
        Some(lambda) => lambda,
        None => prompt_lambda()?,
    };
    let max_gen = match max_gen {
        Some(g) => g,
        None => prompt_generations()?,
    };
    let model = GaltonWatson::new(lambda, max_gen)?;

    session.say(&format!(
        "\nGenerating tree with λ = {:.2}, max {} generations",
        lambda, max_gen
    ));
    session.say(&format!("• Regime: {}", model.regime()));
    session.say(&format!(
        "• Extinction probability: ~{:.3}",
        model.extinction_probability()
    ));
    session.say(&format!("• Expected growth rate: λᵗ = {:.2}ᵗ", lambda));

    let outcome = model.generate(&mut session.rng());

    let status = match outcome.termination() {
        Termination::Extinct { generation } => format!("extinct at generation {}", generation),
        Termination::Truncated => format!("truncated at {} generations", max_gen),
    };
    session.say(&format!("• Outcome: {}", status));
    session.say(&format!("• Final generation: {}", outcome.final_generation()));
    session.say(&format!("• Total population: {}", outcome.total_population()));
    session.say(&format!(
        "• Sizes per generation: {:?}",
        outcome.generation_sizes()
    ));

    if let Some(path) = &session.output {
        render_tree(session, &outcome, &model, path)?;
    }
    Ok(())
}

#[cfg(feature = "viz")]
fn render_graph(session: &Session, graph: &Graph, model: &ErdosRenyi, path: &std::path::Path) -> Result<()> {
    use stochastic_graphs::viz;

    let title = viz::graph_title(model.nodes(), model.probability());
    viz::render_graph(graph, &title, &session.style, path)
        .with_context(|| format!("failed to render {}", path.display()))?;
    session.say(&format!("• Wrote {}", path.display()));
    Ok(())
}

#[cfg(feature = "viz")]
fn render_tree(
    session: &Session,
    outcome: &BranchingOutcome,
    model: &GaltonWatson,
    path: &std::path::Path,
) -> Result<()> {
    use stochastic_graphs::viz;

    let title = viz::tree_title(model.lambda(), model.max_generations(), outcome);
    viz::render_tree(outcome, &title, &session.style, path)
        .with_context(|| format!("failed to render {}", path.display()))?;
    session.say(&format!("• Wrote {}", path.display()));
    Ok(())
}

#[cfg(not(feature = "viz"))]
fn render_graph(_: &Session, _: &Graph, _: &ErdosRenyi, _: &std::path::Path) -> Result<()> {
    anyhow::bail!("SVG output requires the 'viz' feature")
}

#[cfg(not(feature = "viz"))]
fn render_tree(_: &Session, _: &BranchingOutcome, _: &GaltonWatson, _: &std::path::Path) -> Result<()> {
    anyhow::bail!("SVG output requires the 'viz' feature")
}

fn interactive(session: &Session) -> Result<()> {
    let items = [
        "Erdős–Rényi G(n,p) random graphs",
        "Galton–Watson branching trees",
        "Exit",
    ];

    loop {
        let choice = Select::new()
            .with_prompt("Choose a random graph model to explore")
            .items(&items)
            .default(0)
            .interact()?;

        match choice {
            0 => erdos_renyi_mode(session, None, None)?,
            1 => galton_watson_mode(session, None, None)?,
            _ => break,
        }

        let again = Confirm::new()
            .with_prompt("Return to main menu?")
            .default(true)
            .interact()?;
        if !again {
            break;
        }
    }

    session.say("Goodbye!");
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let style = match &cli.style {
        Some(path) => PlotStyle::from_json_file(path)
            .with_context(|| format!("failed to load style from {}", path.display()))?,
        None => PlotStyle::default(),
    };
    debug!(?style, "plot style");

    let session = Session {
        seed: cli.seed,
        output: cli.output,
        style,
        quiet: cli.quiet,
    };

    match cli.model {
        Some(Model::Er) => erdos_renyi_mode(&session, cli.nodes, cli.prob),
        Some(Model::Gw) => galton_watson_mode(&session, cli.lambda, cli.generations),
        None => interactive(&session),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_value_parsers() {
        assert_eq!(parse_probability("0.25"), Ok(0.25));
        assert!(parse_probability("1.5").is_err());
        assert!(parse_probability("abc").is_err());
        assert_eq!(parse_nodes("500"), Ok(500));
        assert!(parse_nodes("0").is_err());
        assert!(parse_nodes("501").is_err());
        assert_eq!(parse_lambda("0"), Ok(0.0));
        assert!(parse_lambda("-1").is_err());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "stochgraph", "--model", "gw", "-l", "1.2", "-g", "8", "--seed", "7",
        ])
        .unwrap();
        assert_eq!(cli.model, Some(Model::Gw));
        assert_eq!(cli.lambda, Some(1.2));
        assert_eq!(cli.generations, Some(8));
        assert_eq!(cli.seed, Some(7));

        assert!(Cli::try_parse_from(["stochgraph", "--model", "er", "-p", "2"]).is_err());
        assert!(Cli::try_parse_from(["stochgraph", "-v", "-q"]).is_err());
    }
}
