//! Host tool availability checks.

use crate::adb::{Adb, DeviceBridge, ToolOutcome};
use crate::process;

use super::types::CheckResult;

/// Check adb is installed and answers.
pub fn check_host_tools(adb: &Adb) -> Vec<CheckResult> {
    let mut results = Vec::new();

    match process::which(adb.program()) {
        Some(path) => results.push(CheckResult::pass_with("adb", &path)),
        None => {
            results.push(CheckResult::fail(
                "adb",
                &format!(
                    "'{}' not found. Install Android platform-tools or set APKSCAN_ADB.",
                    adb.program()
                ),
            ));
            return results;
        }
    }

    results.push(check_version(adb));
    results
}

/// `adb version` prints `Android Debug Bridge version 1.0.41` first.
fn check_version(adb: &dyn DeviceBridge) -> CheckResult {
    match adb.invoke(&["version"]) {
        ToolOutcome::Lines(lines) => match lines.first() {
            Some(first) => CheckResult::pass_with("adb version", first.trim()),
            None => CheckResult::warn("adb version", "no output"),
        },
        ToolOutcome::Empty => CheckResult::warn("adb version", "no output"),
        ToolOutcome::ToolMissing => CheckResult::fail("adb version", "adb not found"),
        ToolOutcome::ToolError { detail } => CheckResult::warn("adb version", &detail),
    }
}
