//! Label and version lookup via `dumpsys package`.

use tracing::debug;

use crate::adb::{DeviceBridge, ToolOutcome};
use crate::package::{PackageRecord, UNKNOWN_VERSION};

const LABEL_MARKER: &str = "application-label:";
const VERSION_MARKER: &str = "versionName=";

/// Human-readable metadata for one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub label: String,
    pub version: String,
}

impl Metadata {
    /// Defaults used when nothing could be learned about `package_name`.
    pub fn fallback(package_name: &str) -> Self {
        Self {
            label: package_name.to_string(),
            version: UNKNOWN_VERSION.to_string(),
        }
    }

    /// Extract label and version from `dumpsys package` output.
    ///
    /// The last line carrying a marker wins. A line with the label marker is
    /// not searched for the version marker.
    pub fn parse<S: AsRef<str>>(package_name: &str, lines: &[S]) -> Self {
        let mut label = None;
        let mut version = None;

        for line in lines {
            let line = line.as_ref();
            if let Some(value) = value_after(line, LABEL_MARKER) {
                label = Some(value);
            } else if let Some(value) = value_after(line, VERSION_MARKER) {
                version = Some(value);
            }
        }

        Self {
            label: label
                .filter(|l| !l.is_empty())
                .unwrap_or(package_name)
                .to_string(),
            version: version
                .filter(|v| !v.is_empty())
                .unwrap_or(UNKNOWN_VERSION)
                .to_string(),
        }
    }
}

/// Text after the last occurrence of `marker`, without surrounding
/// whitespace or quotes.
fn value_after<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let (_, value) = line.rsplit_once(marker)?;
    Some(value.trim().trim_matches(|c: char| c == '\'' || c == '"').trim())
}

/// Query the device for one package's metadata.
///
/// Never fails: an error or empty answer yields [`Metadata::fallback`].
pub fn fetch(bridge: &dyn DeviceBridge, package_name: &str) -> Metadata {
    match bridge.shell(&["dumpsys", "package", package_name]) {
        ToolOutcome::Lines(lines) => Metadata::parse(package_name, &lines),
        ToolOutcome::Empty => {
            debug!(package = package_name, "dumpsys returned nothing");
            Metadata::fallback(package_name)
        }
        ToolOutcome::ToolMissing => {
            debug!(package = package_name, "adb vanished during metadata lookup");
            Metadata::fallback(package_name)
        }
        ToolOutcome::ToolError { detail } => {
            debug!(package = package_name, %detail, "metadata lookup failed");
            Metadata::fallback(package_name)
        }
    }
}

impl PackageRecord {
    /// Replace label and version with looked-up values.
    pub fn apply(&mut self, metadata: Metadata) {
        self.label = metadata.label;
        self.version = metadata.version;
    }
}
