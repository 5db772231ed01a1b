//! apkscan - list the apps installed on an Android device.
//!
//! Drives `adb` to list packages, sorts them by partition, optionally looks
//! up label and version for each, and writes a txt, json or csv report.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use apkscan::config::Config;
use apkscan::style::Style;
use apkscan::{Partition, ReportFormat, ScanError};

use commands::show::ShowTarget;

#[derive(Parser)]
#[command(name = "apkscan", version)]
#[command(about = "List installed Android apps via adb")]
#[command(args_conflicts_with_subcommands = true)]
#[command(
    after_help = "EXAMPLES:\n  apkscan --format json --partition user system\n  \
                  apkscan --no-meta --format csv --output apps.csv\n  apkscan preflight"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    scan: ScanArgs,

    /// Target a specific device (overrides ANDROID_SERIAL)
    #[arg(long, short = 's', global = true)]
    serial: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Args)]
struct ScanArgs {
    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Txt)]
    format: ReportFormat,

    /// Only include these partitions (e.g. user system vendor)
    #[arg(long, value_enum, num_args = 0.., ignore_case = true)]
    partition: Vec<Partition>,

    /// Skip fetching label/version info (faster)
    #[arg(long)]
    no_meta: bool,

    /// Full output file path (default: timestamped name in APKSCAN_OUTPUT_DIR)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Print the full report to the console and show diagnostics
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress progress output
    #[arg(long, short = 'q')]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check adb, device connectivity and the report directory
    Preflight,

    /// Show information
    Show {
        #[command(subcommand)]
        what: ShowTarget,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load .env if present
    dotenvy::dotenv().ok();
    let mut config = Config::load();
    if cli.serial.is_some() {
        config.device_serial = cli.serial.clone();
    }

    init_logging(cli.scan.verbose, cli.scan.quiet);
    let allow_color = config.color && !cli.no_color;
    let style = Style::detect(allow_color);

    let result = match cli.command {
        None => {
            let args = commands::scan::ScanRequest {
                format: cli.scan.format,
                partitions: cli.scan.partition,
                fetch_metadata: !cli.scan.no_meta,
                output: cli.scan.output,
                verbose: cli.scan.verbose,
                quiet: cli.scan.quiet,
            };
            commands::cmd_scan(&config, args, &style)
        }
        Some(Commands::Preflight) => commands::cmd_preflight(&config, &style),
        Some(Commands::Show { what }) => commands::cmd_show(what, &config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let err_style = Style::detect_on(allow_color, &std::io::stderr());
            eprintln!("{} {}", err_style.error("error:"), err);
            let code = err
                .downcast_ref::<ScanError>()
                .map_or(1, ScanError::exit_code);
            ExitCode::from(code)
        }
    }
}

/// Logs go to stderr. `RUST_LOG` wins over the flags.
fn init_logging(verbose: bool, quiet: bool) {
    let default = if verbose {
        "apkscan=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
