//! outbraik CLI - disease-case forecasting from surveillance CSVs.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "outbraik")]
#[command(about = "Forecast disease cases per region from surveillance CSVs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the forecast pipeline over a CSV and publish the artifact
    Generate {
        /// Input CSV path
        input: PathBuf,

        /// Artifact output path. Defaults to the platform data directory.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Future periods to forecast per group
        #[arg(long, default_value = "7")]
        horizon: usize,

        /// Trailing points kept in each group's output
        #[arg(long, default_value = "10")]
        window: usize,

        /// Minimum observations a group needs before fitting
        #[arg(long, default_value = "3")]
        min_observations: usize,

        /// Suffix identifying metric columns
        #[arg(long, default_value = "_cases")]
        metric_suffix: String,

        /// Region column name
        #[arg(long, default_value = "region")]
        region_column: String,

        /// Explicit date column name
        #[arg(long, default_value = "date")]
        date_column: String,

        /// Year column name (used with --month-column when no date column)
        #[arg(long, default_value = "year")]
        year_column: String,

        /// Month column name (used with --year-column when no date column)
        #[arg(long, default_value = "month")]
        month_column: String,

        /// Seasonal period length in observations
        #[arg(long, default_value = "12")]
        season_length: usize,

        /// Credible interval confidence level
        #[arg(long, default_value = "0.95")]
        confidence: f64,

        /// Maximum group forecasts in flight at once
        #[arg(long, default_value = "4")]
        concurrency: usize,

        /// Per-group fit budget in seconds
        #[arg(long, default_value = "30")]
        fit_timeout: u64,
    },

    /// Re-verify the content hash of every forecast in an artifact
    Verify {
        /// Artifact path. Defaults to the platform data directory.
        #[arg(short, long)]
        artifact: Option<PathBuf>,
    },

    /// List the groups in a published artifact
    List {
        /// Artifact path. Defaults to the platform data directory.
        #[arg(short, long)]
        artifact: Option<PathBuf>,
    },

    /// Serve forecasts from a published artifact over HTTP
    Serve {
        /// Artifact path. Defaults to the platform data directory.
        #[arg(short, long)]
        artifact: Option<PathBuf>,

        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default = if quiet {
        "outbraik=error"
    } else {
        match verbose {
            0 => "outbraik=warn",
            1 => "outbraik=info",
            2 => "outbraik=debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Generate {
            input,
            output,
            horizon,
            window,
            min_observations,
            metric_suffix,
            region_column,
            date_column,
            year_column,
            month_column,
            season_length,
            confidence,
            concurrency,
            fit_timeout,
        } => {
            let options = commands::generate::GenerateOptions {
                input,
                output,
                horizon,
                window,
                min_observations,
                metric_suffix,
                region_column,
                date_column,
                year_column,
                month_column,
                season_length,
                confidence,
                concurrency,
                fit_timeout: Duration::from_secs(fit_timeout),
                quiet: cli.quiet,
            };
            commands::generate::generate(options).await
        }
        Commands::Verify { artifact } => commands::verify::verify(artifact.as_deref()),
        Commands::List { artifact } => commands::list::list(artifact.as_deref()),
        Commands::Serve { artifact, port } => {
            commands::serve::serve(artifact.as_deref(), port).await
        }
    }
}
