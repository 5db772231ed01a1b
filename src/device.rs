//! Device identity from system properties.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::adb::{DeviceBridge, ToolOutcome};

const UNKNOWN: &str = "Unknown";

/// Who we are talking to. Shown in every report header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub manufacturer: String,
    pub model: String,
    pub android_version: String,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            manufacturer: UNKNOWN.to_string(),
            model: UNKNOWN.to_string(),
            android_version: UNKNOWN.to_string(),
        }
    }
}

impl DeviceInfo {
    /// `Samsung SM-G991B (Android 14)`
    pub fn describe(&self) -> String {
        format!(
            "{} {} (Android {})",
            self.manufacturer, self.model, self.android_version
        )
    }

    /// Read the identifying properties. Each one that cannot be read is
    /// reported as `Unknown`.
    pub fn fetch(bridge: &dyn DeviceBridge) -> Self {
        Self {
            manufacturer: getprop(bridge, "ro.product.manufacturer"),
            model: getprop(bridge, "ro.product.model"),
            android_version: getprop(bridge, "ro.build.version.release"),
        }
    }
}

fn getprop(bridge: &dyn DeviceBridge, key: &str) -> String {
    match bridge.shell(&["getprop", key]) {
        ToolOutcome::Lines(lines) => lines
            .into_iter()
            .next()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        ToolOutcome::Empty => UNKNOWN.to_string(),
        ToolOutcome::ToolMissing => {
            warn!(key, "adb unavailable while reading device property");
            UNKNOWN.to_string()
        }
        ToolOutcome::ToolError { detail } => {
            warn!(key, %detail, "could not read device property");
            UNKNOWN.to_string()
        }
    }
}
