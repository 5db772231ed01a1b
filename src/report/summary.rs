//! Console summary: per-partition counts and a total.

use crate::device::DeviceInfo;
use crate::package::PackageRecord;
use crate::style::Style;

use super::group_by_partition;

const TOTAL: &str = "total";

/// Count of apps per partition, alphabetical by partition name.
pub fn partition_counts(records: &[PackageRecord]) -> Vec<(&'static str, usize)> {
    group_by_partition(records)
        .into_iter()
        .map(|(partition, apps)| (partition.as_str(), apps.len()))
        .collect()
}

/// Render the summary block.
///
/// Partitions come alphabetically, `total` is always the last line. An empty
/// record set renders only the two header lines.
pub fn render_summary(records: &[PackageRecord], device: &DeviceInfo, style: &Style) -> String {
    let counts = partition_counts(records);
    let width = counts
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0)
        .max(TOTAL.len());

    let mut lines = vec![
        format!("Device: {}", device.describe()),
        "App Summary:".to_string(),
    ];

    if !counts.is_empty() {
        for (i, (name, count)) in counts.iter().enumerate() {
            let row = format!("{:<width$} : {} apps", name, count, width = width);
            lines.push(format!("  ├─ {}", style.accent(i, &row)));
        }
        let total: usize = counts.iter().map(|(_, count)| count).sum();
        lines.push(format!(
            "  └─ {}{} : {}",
            style.bold(TOTAL),
            " ".repeat(width - TOTAL.len()),
            style.bold(&format!("{} apps", total))
        ));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
