//! Report rendering.
//!
//! One record set, three encodings:
//! - `txt` - human-readable, grouped by partition
//! - `json` - device info plus the full record list, round-trippable
//! - `csv` - one row per app, fixed column order
//!
//! plus the condensed console summary in [`summary`].

mod table;
mod text;
pub mod summary;

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::device::DeviceInfo;
use crate::error::ScanError;
use crate::package::PackageRecord;
use crate::partition::Partition;

pub use summary::render_summary;
pub use text::render_text;

/// Stem of generated report file names.
pub const DEFAULT_REPORT_STEM: &str = "installed_apps_report";

/// Output encoding of the report file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Plain text grouped by partition
    #[default]
    Txt,
    /// JSON object with device info and the app list
    Json,
    /// Comma-separated, one row per app
    Csv,
}

impl ReportFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Txt => "txt",
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// The structured report as written to disk.
#[derive(Serialize)]
struct StructuredReportRef<'a> {
    device_info: &'a DeviceInfo,
    apps: &'a [PackageRecord],
}

/// The structured report as read back.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StructuredReport {
    pub device_info: DeviceInfo,
    pub apps: Vec<PackageRecord>,
}

impl StructuredReport {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Render the report body in `format`.
pub fn render(
    format: ReportFormat,
    records: &[PackageRecord],
    device: &DeviceInfo,
    generated_at: NaiveDateTime,
) -> Result<String, ScanError> {
    let body = match format {
        ReportFormat::Txt => render_text(records, device, generated_at),
        ReportFormat::Json => {
            let report = StructuredReportRef {
                device_info: device,
                apps: records,
            };
            serde_json::to_string_pretty(&report)?
        }
        ReportFormat::Csv => table::render_csv(records),
    };
    Ok(body)
}

/// Records grouped by partition, alphabetically by partition name, each
/// group in discovery order. Only partitions with records get an entry.
pub fn group_by_partition(records: &[PackageRecord]) -> BTreeMap<Partition, Vec<&PackageRecord>> {
    let mut groups: BTreeMap<Partition, Vec<&PackageRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.partition).or_default().push(record);
    }
    groups
}

/// `<dir>/installed_apps_report_YYYYmmdd_HHMMSS.<ext>`
pub fn default_report_path(dir: &Path, format: ReportFormat, now: NaiveDateTime) -> PathBuf {
    dir.join(format!(
        "{}_{}.{}",
        DEFAULT_REPORT_STEM,
        now.format("%Y%m%d_%H%M%S"),
        format.extension()
    ))
}

/// Write the report, replacing any existing file.
pub fn write_report(path: &Path, contents: &str) -> Result<(), ScanError> {
    fs::write(path, contents).map_err(|source| ScanError::WriteReport {
        path: path.to_path_buf(),
        source,
    })
}
