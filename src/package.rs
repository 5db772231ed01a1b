//! Package records and the `pm list packages -f` line parser.

use serde::{Deserialize, Serialize};

use crate::partition::Partition;

/// Version sentinel when no version could be determined.
pub const UNKNOWN_VERSION: &str = "Unknown";

/// Literal prefix of every listing line.
const LINE_PREFIX: &str = "package:";

/// One installed application.
///
/// Field order matches the structured report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub apk_path: String,
    pub package_name: String,
    pub partition: Partition,
    pub label: String,
    pub version: String,
}

impl PackageRecord {
    /// New record with label and version at their defaults.
    pub fn new(apk_path: impl Into<String>, package_name: impl Into<String>) -> Self {
        let apk_path = apk_path.into();
        let package_name = package_name.into();
        Self {
            partition: Partition::classify(&apk_path),
            label: package_name.clone(),
            version: UNKNOWN_VERSION.to_string(),
            apk_path,
            package_name,
        }
    }

    /// Parse one line of listing output.
    ///
    /// Returns `None` for anything that is not `package:<path>=<name>`.
    /// The split is on the first `=`; adb never emits one inside a path or
    /// package name.
    pub fn parse_line(line: &str) -> Option<Self> {
        let rest = line.strip_prefix(LINE_PREFIX)?;
        let (apk_path, package_name) = rest.split_once('=')?;
        if apk_path.is_empty() || package_name.is_empty() {
            return None;
        }
        Some(Self::new(apk_path, package_name))
    }
}
