//! The scan pipeline.
//!
//! One linear pass, no retries:
//!
//! ```text
//! preflight -> listing -> parse + filter -> enrich | default
//!           -> device info -> render + write -> summary
//! ```
//!
//! Environment and I/O failures end the run with a [`ScanError`]. Bad lines
//! and failed metadata lookups are absorbed where they happen. An empty
//! listing, or nothing left after filtering, ends the run successfully
//! without a report file.

use std::collections::HashSet;
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::adb::{DeviceBridge, ToolOutcome};
use crate::device::DeviceInfo;
use crate::error::ScanError;
use crate::metadata;
use crate::package::PackageRecord;
use crate::partition::Partition;
use crate::preflight::ensure_device;
use crate::report::{self, ReportFormat};
use crate::style::Style;
use crate::timing::Timer;

const LISTING_COMMAND: [&str; 4] = ["pm", "list", "packages", "-f"];

/// What to scan and where to put the result.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub format: ReportFormat,
    /// Partitions to keep. Empty keeps everything.
    pub partitions: Vec<Partition>,
    /// Look up label and version per package.
    pub fetch_metadata: bool,
    /// Explicit report path; otherwise a timestamped name in `output_dir`.
    pub output: Option<PathBuf>,
    pub output_dir: PathBuf,
    /// Device the bridge was scoped to, if any.
    pub serial: Option<String>,
    /// Print the full text report after the summary.
    pub verbose: bool,
    /// Draw the per-package progress line on stderr.
    pub show_progress: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            partitions: Vec::new(),
            fetch_metadata: true,
            output: None,
            output_dir: PathBuf::from("."),
            serial: None,
            verbose: false,
            show_progress: false,
        }
    }
}

/// A written report.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub path: PathBuf,
    pub format: ReportFormat,
    pub device: DeviceInfo,
    pub records: Vec<PackageRecord>,
}

/// How a successful run ended.
#[derive(Debug, Clone)]
pub enum ScanOutcome {
    /// adb listed no packages at all.
    NoPackageData,
    /// Packages were listed but none parsed or passed the filter.
    NoValidPackages,
    Written(ScanReport),
}

/// Run the whole pipeline against `bridge`.
///
/// Informational messages, the summary and the final path go to `console`.
pub fn run_scan(
    bridge: &dyn DeviceBridge,
    options: &ScanOptions,
    style: &Style,
    console: &mut dyn Write,
    generated_at: NaiveDateTime,
) -> Result<ScanOutcome, ScanError> {
    let attached = ensure_device(bridge, options.serial.as_deref())?;
    debug!(serial = %attached.serial, "device ready");

    let timer = Timer::start("package listing");
    let lines = match bridge.shell(&LISTING_COMMAND) {
        ToolOutcome::Lines(lines) => lines,
        ToolOutcome::Empty => {
            writeln!(console, "{}", style.warning("No package data returned from adb."))?;
            return Ok(ScanOutcome::NoPackageData);
        }
        ToolOutcome::ToolMissing => return Err(ScanError::ToolMissing),
        ToolOutcome::ToolError { detail } => return Err(ScanError::ToolFailed { detail }),
    };
    timer.finish();

    let mut records = parse_and_filter(&lines, &options.partitions);
    if records.is_empty() {
        writeln!(console, "{}", style.warning("No valid packages found."))?;
        return Ok(ScanOutcome::NoValidPackages);
    }

    if options.fetch_metadata {
        enrich(bridge, &mut records, options.show_progress);
    }

    let device = DeviceInfo::fetch(bridge);

    let body = report::render(options.format, &records, &device, generated_at)?;
    let path = options.output.clone().unwrap_or_else(|| {
        report::default_report_path(&options.output_dir, options.format, generated_at)
    });
    report::write_report(&path, &body)?;

    write!(console, "{}", report::render_summary(&records, &device, style))?;
    if options.verbose {
        let text = match options.format {
            ReportFormat::Txt => body,
            _ => report::render_text(&records, &device, generated_at),
        };
        write!(console, "\n{}", text)?;
    }
    writeln!(
        console,
        "\nReport saved to: {}",
        style.success(&path.display().to_string())
    )?;

    Ok(ScanOutcome::Written(ScanReport {
        path,
        format: options.format,
        device,
        records,
    }))
}

/// Parse listing lines, drop what does not parse or is filtered out.
///
/// Discovery order is preserved. A package name seen twice keeps its first
/// entry.
pub fn parse_and_filter<S: AsRef<str>>(
    lines: &[S],
    partitions: &[Partition],
) -> Vec<PackageRecord> {
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for line in lines {
        let line = line.as_ref();
        let Some(record) = PackageRecord::parse_line(line) else {
            debug!(line, "skipping malformed listing line");
            continue;
        };
        if !partitions.is_empty() && !partitions.contains(&record.partition) {
            continue;
        }
        if !seen.insert(record.package_name.clone()) {
            debug!(package = %record.package_name, "skipping duplicate package");
            continue;
        }
        records.push(record);
    }
    records
}

/// Look up metadata for every record, one at a time, in order.
pub fn enrich(bridge: &dyn DeviceBridge, records: &mut [PackageRecord], show_progress: bool) {
    let timer = Timer::start("metadata lookup");
    let total = records.len();
    let mut progress = show_progress.then(|| Progress::new(io::stderr()));

    for (i, record) in records.iter_mut().enumerate() {
        if let Some(progress) = progress.as_mut() {
            progress.update(&format!(
                "[{}/{}] Fetching metadata: {}",
                i + 1,
                total,
                record.package_name
            ));
        }
        let meta = metadata::fetch(bridge, &record.package_name);
        record.apply(meta);
    }

    if let Some(progress) = progress.as_mut() {
        progress.clear();
    }
    timer.finish();
}

/// A single status line redrawn in place with `\r`.
///
/// Shorter updates are padded with spaces over the previous text, so the
/// line stays free of terminal control sequences. Write errors are ignored.
struct Progress<W: Write> {
    out: W,
    drawn: usize,
}

impl<W: Write> Progress<W> {
    fn new(out: W) -> Self {
        Self { out, drawn: 0 }
    }

    fn update(&mut self, text: &str) {
        let width = text.chars().count();
        let pad = self.drawn.saturating_sub(width);
        let _ = write!(self.out, "\r{}{}", text, " ".repeat(pad));
        let _ = self.out.flush();
        self.drawn = width.max(self.drawn);
    }

    fn clear(&mut self) {
        let _ = write!(self.out, "\r{}\r", " ".repeat(self.drawn));
        let _ = self.out.flush();
        self.drawn = 0;
    }
}
