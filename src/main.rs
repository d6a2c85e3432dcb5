//! RustWorkouts - structured workout conversion
//!
//! Command-line entry point.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rustworkouts::storage::config::{load_config, load_config_from, AppConfig};
use rustworkouts::workouts::{
    read_fit, render_intervals, write_fit, write_text, TrainingDay, TrainingPlan, Workout,
};

#[derive(Parser)]
#[command(name = "rustworkouts")]
#[command(about = "Convert structured workouts between FIT, JSON, YAML and interval text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a workout file to another format
    Convert {
        /// Input workout (.fit, .json, .yaml, .yml)
        input: PathBuf,

        /// Output format
        #[arg(long, value_enum)]
        to: OutputFormat,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace an existing output file
        #[arg(long)]
        overwrite: bool,
    },

    /// Print a workout as interval text
    Intervals {
        /// Input workout (.fit, .json, .yaml, .yml)
        input: PathBuf,
    },

    /// Build a training plan from workout files
    Plan {
        /// Plan name
        name: String,

        /// Training day as ORDER:FILE, may be repeated
        #[arg(long = "day", value_parser = parse_day, required = true)]
        days: Vec<(u32, PathBuf)>,

        /// Number of calendar days (defaults to the highest day order)
        #[arg(long)]
        duration: Option<u32>,

        /// Plan description
        #[arg(long, default_value = "")]
        description: String,

        /// Output file, YAML for .yaml/.yml and JSON otherwise (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace an existing output file
        #[arg(long)]
        overwrite: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
    Fit,
    Intervals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputFormat {
    Fit,
    Json,
    Yaml,
}

impl InputFormat {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "fit" => Some(Self::Fit),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
    .context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tracing::debug!("Starting RustWorkouts v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Convert {
            input,
            to,
            output,
            overwrite,
        } => cmd_convert(&input, to, output.as_deref(), overwrite, &config),
        Commands::Intervals { input } => cmd_intervals(&input),
        Commands::Plan {
            name,
            days,
            duration,
            description,
            output,
            overwrite,
        } => cmd_plan(
            name,
            days,
            duration,
            description,
            output.as_deref(),
            overwrite,
            &config,
        ),
    }
}

fn cmd_convert(
    input: &Path,
    to: OutputFormat,
    output: Option<&Path>,
    overwrite: bool,
    config: &AppConfig,
) -> Result<()> {
    let workout = read_workout(input)?;
    let overwrite = overwrite || config.output.overwrite;

    let text = match to {
        OutputFormat::Fit => {
            let Some(path) = output else {
                bail!("FIT output needs a file, pass -o/--output");
            };
            let file = workout.to_fit(&config.fit);
            return write_fit(path, &file, overwrite)
                .with_context(|| format!("Failed to write {}", path.display()));
        }
        OutputFormat::Json if config.output.pretty_json => workout.to_json_pretty()?,
        OutputFormat::Json => workout.to_json()?,
        OutputFormat::Yaml => workout.to_yaml()?,
        OutputFormat::Intervals => workout.to_intervals(),
    };

    emit(&text, output, overwrite)
}

fn cmd_intervals(input: &Path) -> Result<()> {
    let workout = read_workout(input)?;
    let script = render_intervals(&workout);

    for diagnostic in &script.diagnostics {
        eprintln!("warning: {}", diagnostic);
    }

    emit(&script.text, None, false)
}

fn cmd_plan(
    name: String,
    days: Vec<(u32, PathBuf)>,
    duration: Option<u32>,
    description: String,
    output: Option<&Path>,
    overwrite: bool,
    config: &AppConfig,
) -> Result<()> {
    // Files for the same order land on the same day, in argument order.
    let mut grouped: Vec<(u32, Vec<Workout>)> = Vec::new();
    for (order, path) in days {
        let workout = read_workout(&path)?;
        match grouped.iter_mut().find(|(o, _)| *o == order) {
            Some((_, workouts)) => workouts.push(workout),
            None => grouped.push((order, vec![workout])),
        }
    }
    grouped.sort_by_key(|(order, _)| *order);

    let span = grouped.last().map(|(order, _)| *order).unwrap_or(0);
    let training_days = grouped
        .into_iter()
        .map(|(order, workouts)| TrainingDay::new(order, workouts))
        .collect::<Result<Vec<_>, _>>()?;

    let mut plan = TrainingPlan::new(name, training_days, duration.unwrap_or(span), description);
    if let Some(path) = output {
        plan.filename = path.display().to_string();
    }

    let yaml = output
        .and_then(InputFormat::from_path)
        .is_some_and(|format| format == InputFormat::Yaml);
    let text = if yaml {
        plan.to_yaml()?
    } else if config.output.pretty_json {
        plan.to_json_pretty()?
    } else {
        plan.to_json()?
    };

    tracing::info!(
        plan = %plan.name,
        days = plan.training_days.len(),
        workouts = plan.workout_count(),
        "Built training plan"
    );

    emit(&text, output, overwrite || config.output.overwrite)
}

fn read_workout(path: &Path) -> Result<Workout> {
    let format = InputFormat::from_path(path)
        .with_context(|| format!("Unsupported input extension: {}", path.display()))?;

    let mut workout = match format {
        InputFormat::Fit => read_fit(path)?,
        InputFormat::Json | InputFormat::Yaml => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            if format == InputFormat::Json {
                Workout::from_json(&content)?
            } else {
                Workout::from_yaml(&content)?
            }
        }
    };

    if workout.filename.is_empty() {
        workout.filename = path.display().to_string();
    }
    Ok(workout)
}

fn emit(text: &str, output: Option<&Path>, overwrite: bool) -> Result<()> {
    match output {
        Some(path) => write_text(path, text, overwrite)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                writeln!(stdout)?;
            }
            Ok(())
        }
    }
}

fn parse_day(s: &str) -> Result<(u32, PathBuf), String> {
    let (order, file) = s
        .split_once(':')
        .ok_or_else(|| format!("expected ORDER:FILE, got '{}'", s))?;
    let order = order
        .parse::<u32>()
        .map_err(|_| format!("invalid day order '{}'", order))?;
    if file.is_empty() {
        return Err(format!("missing file in '{}'", s));
    }
    Ok((order, PathBuf::from(file)))
}
