//! Device connectivity checks.

use crate::adb::{parse_devices, DeviceBridge, DeviceEntry, ToolOutcome};
use crate::error::ScanError;

use super::types::CheckResult;

/// Find an attached, authorized device, or the one named by `serial`.
pub fn ensure_device(
    bridge: &dyn DeviceBridge,
    serial: Option<&str>,
) -> Result<DeviceEntry, ScanError> {
    let lines = match bridge.devices() {
        ToolOutcome::Lines(lines) => lines,
        ToolOutcome::Empty => return Err(ScanError::NoDevice),
        ToolOutcome::ToolMissing => return Err(ScanError::ToolMissing),
        ToolOutcome::ToolError { detail } => return Err(ScanError::ToolFailed { detail }),
    };

    let entries = parse_devices(&lines);
    for entry in &entries {
        if !entry.is_usable() {
            tracing::debug!(serial = %entry.serial, state = %entry.state, "ignoring device");
        }
    }

    let mut usable: Vec<DeviceEntry> = entries
        .into_iter()
        .filter(DeviceEntry::is_usable)
        .collect();
    match serial {
        Some(wanted) => usable
            .into_iter()
            .find(|entry| entry.serial == wanted)
            .ok_or_else(|| ScanError::DeviceNotFound {
                serial: wanted.to_string(),
            }),
        None => {
            if usable.len() > 1 {
                tracing::warn!(
                    count = usable.len(),
                    "several devices attached; adb will refuse to pick one without a serial"
                );
            }
            if usable.is_empty() {
                Err(ScanError::NoDevice)
            } else {
                Ok(usable.remove(0))
            }
        }
    }
}

/// Preflight form of [`ensure_device`].
pub fn check_device(bridge: &dyn DeviceBridge, serial: Option<&str>) -> CheckResult {
    match ensure_device(bridge, serial) {
        Ok(entry) => CheckResult::pass_with("device", &entry.serial),
        Err(err) => CheckResult::fail("device", &err.to_string()),
    }
}
