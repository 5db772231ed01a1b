//! Preflight checks.
//!
//! Verifies adb is installed, a device is attached and authorized, and the
//! report directory is writable. Run with `apkscan preflight`.
//!
//! A scan runs only the device check ([`ensure_device`]); the full report is
//! for diagnosing a broken setup.

mod device;
mod environment;
mod host_tools;
mod types;

use std::path::Path;

use anyhow::{bail, Result};

use crate::adb::Adb;
use crate::style::Style;

pub use device::{check_device, ensure_device};
pub use types::{CheckResult, CheckStatus, PreflightReport};

/// Run all preflight checks.
pub fn run_preflight(adb: &Adb, output_dir: &Path) -> PreflightReport {
    let mut checks = Vec::new();

    println!("Running preflight checks...\n");

    println!("Checking host tools...");
    let tools = host_tools::check_host_tools(adb);
    let adb_found = tools
        .first()
        .is_some_and(|check| check.status != CheckStatus::Fail);
    checks.extend(tools);

    println!("Checking device...");
    if adb_found {
        checks.push(check_device(adb, adb.serial()));
    } else {
        checks.push(CheckResult::fail("device", "skipped: adb is not available"));
    }

    println!("Checking environment...");
    checks.push(environment::check_output_dir(output_dir));

    println!();

    PreflightReport { checks }
}

/// Run preflight, print the report and bail if any check fails.
pub fn run_preflight_or_fail(adb: &Adb, output_dir: &Path, style: &Style) -> Result<()> {
    let report = run_preflight(adb, output_dir);
    print!("{}", report.render(style));

    if !report.all_passed() {
        bail!(
            "preflight failed: {} check(s) failed",
            report.fail_count()
        );
    }

    println!("\n{}", style.success("All preflight checks passed!"));
    Ok(())
}
