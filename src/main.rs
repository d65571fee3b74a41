use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use canvass_scorer::{
    config::Settings,
    loader,
    render::export,
    scoring::ImportanceScorer,
    tui,
};

#[derive(Parser)]
#[clap(name = "canvass-scorer")]
#[clap(about = "Weighted importance index over census areas", long_about = None)]
struct Cli {
    /// Settings file overriding the built-in defaults
    #[clap(short, long)]
    config: Option<String>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the importance index once and export it
    Score {
        /// Override a single weight, e.g. --weight population=0.8 (repeatable)
        #[clap(short, long = "weight", value_parser = parse_weight_override)]
        weights: Vec<(String, f64)>,

        /// Output format
        #[clap(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[clap(short, long)]
        out: Option<PathBuf>,
    },

    /// Load the working set and run startup validation only
    Validate,

    /// Launch the interactive dashboard
    Tui,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

fn parse_weight_override(raw: &str) -> Result<(String, f64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got {:?}", raw))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid weight value in {:?}", raw))?;
    Ok((name.trim().to_string(), value))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("loading settings from {}", path))?,
        None => Settings::new().unwrap_or_else(|_| {
            info!("using default settings");
            Settings::default()
        }),
    };

    if let Err(e) = settings.validate() {
        error!("invalid settings: {}", e);
        anyhow::bail!(e);
    }

    match cli.command {
        Commands::Score { weights, format, out } => run_score(&settings, weights, format, out),
        Commands::Validate => run_validate(&settings),
        Commands::Tui => run_tui(&settings),
    }
}

fn run_validate(settings: &Settings) -> anyhow::Result<()> {
    let set = loader::load_working_set(settings)?;
    loader::validate_working_set(&set)?;
    info!(areas = set.areas.len(), "working set valid");
    Ok(())
}

fn run_score(
    settings: &Settings,
    overrides: Vec<(String, f64)>,
    format: OutputFormat,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let set = loader::load_working_set(settings)?;
    loader::validate_working_set(&set)?;

    let mut weights = settings.scoring.weights.clone();
    for (name, value) in overrides {
        if !weights.set_by_name(&name, value) {
            anyhow::bail!("unknown attribute in --weight: {}", name);
        }
    }

    let scorer = ImportanceScorer::new(settings.scoring.scaling.policy());
    let table = scorer.score(&set.areas, &weights)?;

    let mut sink: Box<dyn Write> = match out {
        Some(path) => Box::new(fs::File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    match format {
        OutputFormat::Table => write!(sink, "{}", export::format_table(&table))?,
        OutputFormat::Csv => export::write_csv(sink, &table)?,
        OutputFormat::Json => export::write_json(sink, &table)?,
    }

    Ok(())
}

fn run_tui(settings: &Settings) -> anyhow::Result<()> {
    let set = loader::load_working_set(settings)?;
    loader::validate_working_set(&set)?;

    let scorer = ImportanceScorer::new(settings.scoring.scaling.policy());
    tui::run(set.areas, settings.scoring.weights.clone(), scorer)
}
