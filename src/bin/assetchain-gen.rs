//! assetchain-gen CLI - write one `.cmd` launcher per asset chain
//!
//! With no arguments, reads `assetchains.old` from the working directory and
//! writes `<chain>.cmd` files next to it.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use assetchain_gen::config::{DEFAULT_CONFIG_FILE, INPUT_ENV};
use assetchain_gen::{GenConfig, GenError, LineTransformer, ProcessReport};

#[derive(Parser)]
#[command(name = "assetchain-gen")]
#[command(version, about = "Generate per-chain .cmd launchers from an assetchains command list", long_about = None)]
struct Cli {
    /// Command list to read (default: assetchains.old)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory for generated files (default: working directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// YAML configuration file, used only if it exists
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Show what would be written without touching the filesystem
    #[arg(long)]
    dry_run: bool,

    /// Continue past failed writes; still exits non-zero at the end
    #[arg(long)]
    keep_going: bool,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    report_json: bool,
}

fn run(cli: Cli, env_input: Option<String>) -> Result<ProcessReport, GenError> {
    let mut config = GenConfig::load_or_default(&cli.config)?;

    config.resolve_input(cli.input, env_input);
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }

    let transformer = LineTransformer::from_config(&config)?
        .dry_run(cli.dry_run)
        .keep_going(cli.keep_going);

    let report = transformer.process(&config.input)?;

    if cli.report_json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| GenError::Report(e.to_string()))?;
        println!("{}", json);
    }

    Ok(report)
}

/// Exit status for a finished run: 0 only if everything was written
fn exit_code(result: &Result<ProcessReport, GenError>) -> i32 {
    match result {
        Ok(report) if report.has_failures() => {
            eprintln!("Error: {} file(s) could not be written", report.failed.len());
            1
        }
        Ok(_) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = run(cli, std::env::var(INPUT_ENV).ok());

    process::exit(exit_code(&result));
}
