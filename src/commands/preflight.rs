//! Preflight command - runs preflight checks.

use anyhow::Result;

use apkscan::config::Config;
use apkscan::preflight;
use apkscan::style::Style;
use apkscan::Adb;

/// Execute the preflight command. Fails if any check fails.
pub fn cmd_preflight(config: &Config, style: &Style) -> Result<()> {
    let adb = Adb::new(&config.adb_path).with_serial(config.device_serial.clone());
    preflight::run_preflight_or_fail(&adb, &config.output_dir, style)
}
