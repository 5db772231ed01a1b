//! Scan command - lists packages and writes the report.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;

use apkscan::config::Config;
use apkscan::style::Style;
use apkscan::{run_scan, Adb, Partition, ReportFormat, ScanOptions, ScanOutcome};

/// Flags of the default action.
pub struct ScanRequest {
    pub format: ReportFormat,
    pub partitions: Vec<Partition>,
    pub fetch_metadata: bool,
    pub output: Option<PathBuf>,
    pub verbose: bool,
    pub quiet: bool,
}

/// Execute the scan.
pub fn cmd_scan(config: &Config, request: ScanRequest, style: &Style) -> Result<()> {
    let adb = Adb::new(&config.adb_path).with_serial(config.device_serial.clone());

    let options = ScanOptions {
        format: request.format,
        partitions: request.partitions,
        fetch_metadata: request.fetch_metadata,
        output: request.output,
        output_dir: config.output_dir.clone(),
        serial: config.device_serial.clone(),
        verbose: request.verbose,
        show_progress: !request.quiet && io::stderr().is_terminal(),
    };

    let mut stdout = io::stdout().lock();
    match run_scan(&adb, &options, style, &mut stdout, Local::now().naive_local())? {
        ScanOutcome::Written(report) => {
            tracing::debug!(
                path = %report.path.display(),
                apps = report.records.len(),
                format = %report.format,
                "report written"
            );
        }
        ScanOutcome::NoPackageData | ScanOutcome::NoValidPackages => {}
    }
    Ok(())
}
