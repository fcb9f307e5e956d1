// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use churn_etl::pipeline::{analyze, extract, load, transform, validate};
use churn_etl::utils::logging::{format_error, format_success, format_warning};
use churn_etl::{
    Config, LoadOptions, MemoryStore, PipelineOrchestrator, SupabaseClient, TableStore, Validator,
};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "churn_etl")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "ETL pipeline for the customer churn dataset", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy the source dataset to the raw artifact
    Extract,

    /// Derive features from the raw artifact and write the staged artifact
    Transform {
        #[arg(long, value_name = "PATH")]
        raw: Option<PathBuf>,
    },

    /// Append the staged artifact to the remote table
    Load {
        #[arg(long, value_name = "PATH")]
        staged: Option<PathBuf>,

        #[arg(long)]
        table: Option<String>,
    },

    /// Print data quality checks for the remote table
    Validate {
        #[arg(long)]
        table: Option<String>,
    },

    /// Compute summary statistics and write the summary artifact
    Analyze {
        #[arg(long)]
        table: Option<String>,
    },

    /// Run every stage in order
    Run {
        /// Load into an in-memory table instead of the remote store
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    churn_etl::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Churn ETL pipeline");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::default_config()
    };

    match cli.command {
        Commands::Extract => cmd_extract(&config)?,
        Commands::Transform { raw } => cmd_transform(&config, raw)?,
        Commands::Load { staged, table } => cmd_load(&config, staged, table).await?,
        Commands::Validate { table } => cmd_validate(&config, table).await?,
        Commands::Analyze { table } => cmd_analyze(&config, table).await?,
        Commands::Run { dry_run } => cmd_run(&config, dry_run).await?,
    }

    Ok(())
}

fn table_name(config: &Config, table: Option<String>) -> Result<String> {
    let table = table.unwrap_or_else(|| config.store.table_name.clone());
    Validator::validate_table_name(&table)?;
    Ok(table)
}

fn connect(config: &Config) -> Result<SupabaseClient> {
    SupabaseClient::from_env(&config.store).context("Failed to create table store client")
}

fn cmd_extract(config: &Config) -> Result<()> {
    let raw = extract(&config.paths.source_csv, &config.paths.raw_csv)
        .context("Extraction failed")?;
    println!("{}", format_success(&format!("Raw artifact: {}", raw.display())));
    Ok(())
}

fn cmd_transform(config: &Config, raw: Option<PathBuf>) -> Result<()> {
    let raw = raw.unwrap_or_else(|| config.paths.raw_csv.clone());
    let report = transform(&raw, &config.paths.staged_csv).context("Transformation failed")?;

    println!(
        "{}",
        format_success(&format!(
            "Staged {} rows to {} (filled tenure: {}, monthly charges: {}, total charges: {})",
            report.rows,
            report.staged_path.display(),
            report.filled_tenure,
            report.filled_monthly_charges,
            report.filled_total_charges
        ))
    );
    Ok(())
}

async fn cmd_load(config: &Config, staged: Option<PathBuf>, table: Option<String>) -> Result<()> {
    let table = table_name(config, table)?;
    let staged = staged.unwrap_or_else(|| config.paths.staged_csv.clone());
    let client = connect(config)?;

    let options = LoadOptions {
        batch_size: config.store.batch_size,
        show_progress: true,
    };

    // Load failures past configuration are reported, not propagated.
    match load(&client, &staged, &table, options).await {
        Ok(Some(stats)) if stats.batches_failed > 0 => println!(
            "{}",
            format_warning(&format!(
                "Loaded {} rows into {}; {} of {} batches failed",
                stats.rows_inserted,
                table,
                stats.batches_failed,
                stats.batches()
            ))
        ),
        Ok(Some(stats)) => println!(
            "{}",
            format_success(&format!("Loaded {} rows into {}", stats.rows_inserted, table))
        ),
        Ok(None) => {}
        Err(e) => {
            error!("Error loading data: {}", e);
            println!("{}", format_error(&format!("Error loading data: {}", e)));
        }
    }

    Ok(())
}

async fn cmd_validate(config: &Config, table: Option<String>) -> Result<()> {
    let table = table_name(config, table)?;
    let client = connect(config)?;

    let report = validate(&client, &table).await.context("Validation failed")?;
    println!("{}", report.format());
    Ok(())
}

async fn cmd_analyze(config: &Config, table: Option<String>) -> Result<()> {
    let table = table_name(config, table)?;
    let client = connect(config)?;

    let summary = analyze(&client, &table, &config.paths.summary_csv)
        .await
        .context("Analysis failed")?;
    println!("{}", summary.format());
    println!(
        "{}",
        format_success(&format!(
            "Summary written to {}",
            config.paths.summary_csv.display()
        ))
    );
    Ok(())
}

async fn cmd_run(config: &Config, dry_run: bool) -> Result<()> {
    let memory;
    let client;
    let store: &dyn TableStore = if dry_run {
        info!("Dry run: loading into an in-memory table");
        memory = MemoryStore::new();
        &memory
    } else {
        client = connect(config)?;
        &client
    };

    let run = PipelineOrchestrator::new(config.clone(), store)
        .run()
        .await
        .context("Pipeline run failed")?;

    println!("{}", run.validation.format());
    println!();
    println!("{}", run.analysis.format());
    println!(
        "{}",
        format_success(&format!(
            "Pipeline finished in {}s: {} rows staged, {:.1}% loaded, {} metrics written",
            run.stats.duration_secs,
            run.stats.staged_rows,
            run.stats.load_rate(),
            run.stats.metrics_written
        ))
    );
    Ok(())
}
