//! Emissions CLI - summarise greenhouse-gas emission datasets.

mod render;

use clap::{Parser, Subcommand, ValueEnum};
use emissions_core::{DashboardConfig, Dataset, FilterSpec, RegionAlias, Summary};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "emissions")]
#[command(about = "Greenhouse-gas emission summaries by state, sector, year and gas")]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter a dataset and print every aggregate
    Summary {
        /// Dataset file (.json, .yaml); defaults to the config's data source
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Dashboard config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// First year to include
        #[arg(long)]
        from: Option<i32>,

        /// Last year to include
        #[arg(long)]
        to: Option<i32>,

        /// Sector to include (repeatable)
        #[arg(long = "sector")]
        sectors: Vec<String>,

        /// Gas to include (repeatable)
        #[arg(long = "gas")]
        gases: Vec<String>,

        /// State code to include (repeatable)
        #[arg(long = "state")]
        states: Vec<String>,

        /// Region alias (Brasil, Sudeste, Sul)
        #[arg(short, long)]
        region: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Validate a dataset and list its distinct values
    Check {
        /// Dataset file (.json, .yaml)
        data: PathBuf,
    },

    /// List region aliases and their states
    Regions,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Filter flags given on the command line.
struct FilterArgs {
    from: Option<i32>,
    to: Option<i32>,
    sectors: Vec<String>,
    gases: Vec<String>,
    states: Vec<String>,
    region: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Summary {
            data,
            config,
            from,
            to,
            sectors,
            gases,
            states,
            region,
            format,
        } => {
            let args = FilterArgs {
                from,
                to,
                sectors,
                gases,
                states,
                region,
            };
            summarize(data.as_deref(), config.as_deref(), args, format);
        }
        Commands::Check { data } => {
            check_dataset(&data);
        }
        Commands::Regions => {
            list_regions();
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    process::exit(1);
}

/// Layer command-line flags over the config's filter selection.
fn merge_filters(base: FilterSpec, args: FilterArgs) -> FilterSpec {
    let years = match (args.from, args.to, base.years) {
        (None, None, years) => years,
        (from, to, Some((lo, hi))) => Some((from.unwrap_or(lo), to.unwrap_or(hi))),
        (from, to, None) => Some((from.unwrap_or(i32::MIN), to.unwrap_or(i32::MAX))),
    };
    let non_empty = |v: Vec<String>| if v.is_empty() { None } else { Some(v) };

    let (states, region) = match (non_empty(args.states), args.region) {
        (Some(states), region) => (Some(states), region),
        (None, Some(region)) => (None, Some(region)),
        (None, None) => (base.states, base.region),
    };

    FilterSpec {
        years,
        sectors: non_empty(args.sectors).or(base.sectors),
        gases: non_empty(args.gases).or(base.gases),
        states,
        region,
    }
}

fn summarize(
    data: Option<&Path>,
    config_path: Option<&Path>,
    args: FilterArgs,
    format: OutputFormat,
) {
    let config = config_path.map(|p| DashboardConfig::load(p).unwrap_or_else(|e| fail(e)));

    let dataset = match (data, &config, config_path) {
        (Some(path), _, _) => Dataset::load(path),
        (None, Some(cfg), Some(cfg_path)) => {
            let dir = cfg_path.parent().unwrap_or_else(|| Path::new("."));
            let path = cfg.data_path(dir);
            match cfg.data.format {
                Some(fmt) => Dataset::load_as(&path, fmt),
                None => Dataset::load(&path),
            }
        }
        _ => fail("no dataset given: pass --data or --config"),
    }
    .unwrap_or_else(|e| fail(e));

    let base = config.as_ref().map(|c| c.filters.clone()).unwrap_or_default();
    let spec = merge_filters(base, args);
    tracing::debug!(filters = ?spec, "effective filter selection");
    let criteria = spec
        .resolve(&dataset.vocabulary())
        .unwrap_or_else(|e| fail(e));

    let summary = Summary::from_store(&dataset, &criteria).unwrap_or_else(|e| fail(e));
    let title = config.as_ref().map(|c| c.name.as_str());

    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(e),
        },
        OutputFormat::Text => print!("{}", render::summary_text(title, &summary)),
    }
}

fn check_dataset(path: &Path) {
    let dataset = Dataset::load(path).unwrap_or_else(|e| fail(e));
    let vocab = dataset.vocabulary();

    println!("✓ {} is valid ({} records)", path.display(), dataset.len());
    if let Some((min, max)) = vocab.years {
        println!("  years:   {min}..={max}");
    }
    println!("  states:  {}", vocab.states.join(", "));
    println!("  sectors: {}", vocab.sectors.join(", "));
    println!("  gases:   {}", vocab.gases.join(", "));
}

fn list_regions() {
    for alias in RegionAlias::ALL {
        match alias.members() {
            Some(states) => println!("{alias}: {}", states.join(", ")),
            None => println!("{alias}: all states"),
        }
    }
}
