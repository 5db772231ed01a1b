//! Plain-text report.

use chrono::NaiveDateTime;

use crate::device::DeviceInfo;
use crate::package::PackageRecord;

use super::group_by_partition;

const RULE_WIDTH: usize = 70;
const FIELD_WIDTH: usize = 15;

pub fn render_text(
    records: &[PackageRecord],
    device: &DeviceInfo,
    generated_at: NaiveDateTime,
) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);

    let mut lines = vec![
        format!(
            "Installed Android Apps Report - {}",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        ),
        format!("Device: {}", device.describe()),
        heavy,
    ];

    for (partition, apps) in group_by_partition(records) {
        lines.push(String::new());
        lines.push(format!("{} Apps ({}):", partition.title(), apps.len()));
        lines.push(light.clone());
        for app in apps {
            lines.push(field("Package Name", &app.package_name));
            lines.push(field("APK Path", &app.apk_path));
            lines.push(field("Label", &app.label));
            lines.push(field("Version", &app.version));
            lines.push(light.clone());
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn field(name: &str, value: &str) -> String {
    format!("{:<width$}: {}", name, value, width = FIELD_WIDTH)
}
