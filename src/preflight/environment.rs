//! Local environment checks.

use std::fs;
use std::path::Path;

use super::types::CheckResult;

/// Check the report directory exists and accepts writes.
pub fn check_output_dir(output_dir: &Path) -> CheckResult {
    let name = "report directory writable";

    if !output_dir.is_dir() {
        return CheckResult::fail(
            name,
            &format!("{} does not exist", output_dir.display()),
        );
    }

    let probe = output_dir.join(".apkscan-preflight");
    match fs::write(&probe, "test") {
        Ok(()) => {
            let _ = fs::remove_file(&probe);
            CheckResult::pass_with(name, &output_dir.display().to_string())
        }
        Err(e) => CheckResult::fail(
            name,
            &format!("Cannot write to {}: {}", output_dir.display(), e),
        ),
    }
}
