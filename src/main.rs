use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use u_allot::allotment::AllotmentStats;
use u_allot::config::AllotConfig;
use u_allot::io;
use u_allot::lookup::find_by_id;
use u_allot::models::ResultRow;
use u_allot::pipeline;

#[derive(Parser)]
#[command(
    name = "u-allot",
    version,
    about = "Rank-priority, quota-constrained college seat allotment",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file (defaults and ALLOT_* variables otherwise)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the allotment and write the result file
    Run {
        /// Students CSV
        #[arg(long)]
        students: Option<PathBuf>,

        /// Seat matrix CSV
        #[arg(long)]
        seats: Option<PathBuf>,

        /// Preferences CSV
        #[arg(long)]
        preferences: Option<PathBuf>,

        /// Result CSV to write
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the allotment of one student
    Lookup {
        /// Student unique id
        uniqueid: String,

        /// Result CSV to read
        #[arg(short, long)]
        results: Option<PathBuf>,

        /// Print the row as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Show aggregate statistics of a result file
    Stats {
        /// Result CSV to read
        #[arg(short, long)]
        results: Option<PathBuf>,

        /// Number of institutions to list
        #[arg(short, long)]
        top: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AllotConfig::from_file(path)?,
        None => AllotConfig::from_env()?,
    };
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }

    setup_tracing(&config.logging.level, &config.logging.format, cli.verbose)?;

    match cli.command {
        Commands::Run {
            students,
            seats,
            preferences,
            output,
        } => {
            if let Some(p) = students {
                config.inputs.students = p;
            }
            if let Some(p) = seats {
                config.inputs.seats = p;
            }
            if let Some(p) = preferences {
                config.inputs.preferences = p;
            }
            if let Some(p) = output {
                config.output.path = p;
            }
            run(&config)
        }
        Commands::Lookup {
            uniqueid,
            results,
            json,
        } => {
            let path = results.unwrap_or_else(|| config.output.path.clone());
            lookup(&path, &uniqueid, json)
        }
        Commands::Stats { results, top } => {
            if let Some(n) = top {
                config.stats.top_institutions = n;
            }
            let path = results.unwrap_or_else(|| config.output.path.clone());
            config.validate()?;
            stats(&path, config.stats.top_institutions)
        }
    }
}

fn setup_tracing(level: &str, format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("u_allot=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
            .with_context(|| format!("Invalid log level: {level}"))?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

fn run(config: &AllotConfig) -> Result<()> {
    config.validate()?;
    tracing::info!(
        students = %config.inputs.students.display(),
        seats = %config.inputs.seats.display(),
        preferences = %config.inputs.preferences.display(),
        "starting allotment"
    );

    let report = pipeline::run_files(config).context("Allotment run failed")?;

    println!("Wrote {}", config.output.path.display());
    println!(
        "  Allocated: {} / {}",
        report.outcome.allocated_count(),
        report.rows.len()
    );
    if !report.findings.is_empty() {
        println!("  Input findings: {} (see log)", report.findings.len());
    }
    Ok(())
}

fn load_results(path: &Path) -> Result<Vec<ResultRow>> {
    io::read_results(path)
        .with_context(|| format!("Failed to load results from {}", path.display()))
}

fn lookup(path: &Path, raw_id: &str, json: bool) -> Result<()> {
    let rows = load_results(path)?;

    let row = match find_by_id(&rows, raw_id) {
        Ok(row) => row,
        Err(message) => {
            println!("{message}");
            return Ok(());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(row)?);
        return Ok(());
    }

    println!("Unique ID:   {}", cell(row.unique_id));
    println!("Name:        {}", cell(row.name.as_deref()));
    println!("Gender:      {}", cell(row.gender.as_deref()));
    println!("Caste:       {}", cell(row.caste.as_deref()));
    println!("Rank:        {}", cell(row.rank));
    println!("College ID:  {}", cell(row.college_id));
    println!("Institution: {}", row.institution);
    println!("Preference:  {}", cell(row.pref_number));
    Ok(())
}

fn cell<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn stats(path: &Path, top_n: usize) -> Result<()> {
    let rows = load_results(path)?;
    let stats = AllotmentStats::calculate(&rows, top_n);

    println!("Students:    {}", stats.total);
    println!(
        "Allocated:   {} ({:.1}%)",
        stats.allocated,
        stats.allocation_rate * 100.0
    );
    println!("Unallocated: {}", stats.unallocated);

    println!("\nAllocated by category:");
    for (category, n) in &stats.by_category {
        let label = if category.is_empty() { "(none)" } else { category.as_str() };
        println!("  {label:<12} {n}");
    }

    println!("\nTop {} institutions:", stats.top_institutions.len());
    for (name, n) in &stats.top_institutions {
        println!("  {n:>5}  {name}");
    }
    Ok(())
}
