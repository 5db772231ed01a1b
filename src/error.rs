//! Fatal errors that end a scan.
//!
//! Per-record problems (a malformed line, a missing label) never show up
//! here; they are absorbed where they happen.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("adb not found. Make sure it is installed and on your PATH (or set APKSCAN_ADB)")]
    ToolMissing,

    #[error("adb command failed: {detail}")]
    ToolFailed { detail: String },

    #[error("no connected and authorized Android devices found")]
    NoDevice,

    #[error("device '{serial}' is not attached and authorized")]
    DeviceNotFound { serial: String },

    #[error("error writing report to {}: {source}", .path.display())]
    WriteReport {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not encode report: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("could not write to the console: {0}")]
    Console(#[from] io::Error),
}

impl ScanError {
    /// Process exit code for this failure. Distinct per class, never 0.
    pub fn exit_code(&self) -> u8 {
        match self {
            ScanError::Encode(_) | ScanError::Console(_) => 1,
            ScanError::ToolMissing => 3,
            ScanError::ToolFailed { .. } => 4,
            ScanError::NoDevice | ScanError::DeviceNotFound { .. } => 5,
            ScanError::WriteReport { .. } => 6,
        }
    }
}
