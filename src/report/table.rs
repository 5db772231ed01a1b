//! CSV report.
//!
//! Quoting follows RFC 4180: a field is quoted only when it holds a comma,
//! a quote or a line break, and embedded quotes are doubled. Rows end in CRLF.

use crate::package::PackageRecord;

const COLUMNS: [&str; 5] = ["partition", "package_name", "apk_path", "label", "version"];
const ROW_END: &str = "\r\n";

pub fn render_csv(records: &[PackageRecord]) -> String {
    let mut out = COLUMNS.join(",");
    out.push_str(ROW_END);

    for record in records {
        let row: [&str; 5] = [
            record.partition.as_str(),
            &record.package_name,
            &record.apk_path,
            &record.label,
            &record.version,
        ];
        let cells: Vec<String> = row.iter().map(|cell| escape(cell)).collect();
        out.push_str(&cells.join(","));
        out.push_str(ROW_END);
    }
    out
}

fn escape(cell: &str) -> String {
    if cell.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
