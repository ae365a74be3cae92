//! Turtle Trip command-line host
//!
//! Reads one turtle command per line from a script (or stdin), runs them on a
//! headless canvas and prints where the turtle ended up along with every
//! segment it drew.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use turtle_core::{CommandError, MovementPolicy, Session, TurtleCommand, TurtleConfig};

#[derive(Parser, Debug)]
#[command(name = "turtle-trip", version, about = "Run Logo turtle scripts")]
struct Cli {
    /// Script to run, one command per line (reads stdin when omitted)
    #[arg(value_name = "SCRIPT", value_hint = clap::ValueHint::FilePath)]
    script: Option<PathBuf>,

    /// RON configuration file
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Movement policy, overrides the configuration
    #[arg(short, long)]
    policy: Option<PolicyArg>,

    /// Surface width, overrides the configuration
    #[arg(long)]
    width: Option<f64>,

    /// Surface height, overrides the configuration
    #[arg(long)]
    height: Option<f64>,

    /// Log every move and turn
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
enum PolicyArg {
    Strict,
    Clamped,
}

impl From<PolicyArg> for MovementPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Strict => MovementPolicy::Strict,
            PolicyArg::Clamped => MovementPolicy::Clamped,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = resolve_config(&cli)?;
    let source = read_script(cli.script.as_deref())?;

    let mut session = config.build_session();
    let report = run_script(&mut session, &source);

    println!("{}", session.turtle());
    for segment in session.segments() {
        println!("{} -> {}", segment.from, segment.to);
    }

    if report.failed() > 0 {
        anyhow::bail!(
            "{} of {} commands failed",
            report.failed(),
            report.total()
        );
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let default_filter = if verbose {
        "turtle_core=debug,turtle_trip=debug"
    } else {
        "turtle_core=info,turtle_trip=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load the configuration file, if any, then apply command-line overrides
fn resolve_config(cli: &Cli) -> Result<TurtleConfig> {
    let mut config = match &cli.config {
        Some(path) => TurtleConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => TurtleConfig::default(),
    };

    if let Some(policy) = cli.policy {
        config.policy = policy.into();
    }
    if let Some(width) = cli.width {
        config.surface.width = width;
    }
    if let Some(height) = cli.height {
        config.surface.height = height;
    }
    config.validate().context("Invalid surface size")?;

    Ok(config)
}

fn read_script(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {}", path.display())),
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read script from stdin")?;
            Ok(source)
        }
    }
}

/// Outcome of running a script
#[derive(Debug, Default)]
struct RunReport {
    commands: usize,
    parse_errors: Vec<(usize, CommandError)>,
    turtle_errors: usize,
}

impl RunReport {
    fn total(&self) -> usize {
        self.commands + self.parse_errors.len()
    }

    fn failed(&self) -> usize {
        self.parse_errors.len() + self.turtle_errors
    }
}

/// Skip blank lines and `#` comments
fn script_lines(source: &str) -> impl Iterator<Item = (usize, &str)> {
    source
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Queue every parsable line on the session, then drain the queue
fn run_script(session: &mut Session, source: &str) -> RunReport {
    let mut report = RunReport::default();

    for (line_number, line) in script_lines(source) {
        match line.parse::<TurtleCommand>() {
            Ok(command) => {
                session.queue(command);
                report.commands += 1;
            }
            Err(e) => {
                tracing::warn!("Line {}: {}", line_number, e);
                report.parse_errors.push((line_number, e));
            }
        }
    }

    tracing::info!("Running {} commands", session.pending_len());
    report.turtle_errors = session.process_pending().len();
    report
}
