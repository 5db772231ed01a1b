//! Pipeline tests.
//!
//! Drive `run_scan` end to end against a scripted bridge and a temporary
//! report directory.

mod helpers;

use std::fs;

use apkscan::report::StructuredReport;
use apkscan::style::Style;
use apkscan::{run_scan, Partition, ReportFormat, ScanError, ScanOptions, ScanOutcome};
use helpers::{assert_file_contains, files_in, generated_at, FakeBridge};
use regex::Regex;
use tempfile::TempDir;

const LISTING: &str = "\
package:/data/app/com.example.app-1/base.apk=com.example.app
package:/system/app/Calculator/Calculator.apk=com.android.calculator2
package:/vendor/app/Ims/Ims.apk=com.vendor.ims
not a package line
package:/product/priv-app/Wallpaper/Wallpaper.apk=com.android.wallpaper
package:/data/app/com.google.maps-2/base.apk=com.google.maps
";

const EXAMPLE_DUMPSYS: &str = "\
Packages:
  Package [com.example.app] (8c1e2f):
    application-label:'Example App'
    versionCode=231 minSdk=26 targetSdk=34
    versionName=2.3.1
";

struct Run {
    dir: TempDir,
    console: Vec<u8>,
}

impl Run {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
            console: Vec::new(),
        }
    }

    fn options(&self) -> ScanOptions {
        ScanOptions {
            output_dir: self.dir.path().to_path_buf(),
            ..ScanOptions::default()
        }
    }

    fn scan(
        &mut self,
        bridge: &FakeBridge,
        options: &ScanOptions,
    ) -> Result<ScanOutcome, ScanError> {
        run_scan(
            bridge,
            options,
            &Style::plain(),
            &mut self.console,
            generated_at(),
        )
    }

    fn console(&self) -> String {
        String::from_utf8_lossy(&self.console).into_owned()
    }
}

fn written(outcome: ScanOutcome) -> apkscan::pipeline::ScanReport {
    match outcome {
        ScanOutcome::Written(report) => report,
        other => panic!("expected a written report, got {:?}", other),
    }
}

#[test]
fn user_app_line_becomes_user_record() {
    let bridge = FakeBridge::with_listing(
        "package:/data/app/com.example.app-1/base.apk=com.example.app\n",
    );
    let mut run = Run::new();
    let options = ScanOptions {
        fetch_metadata: false,
        ..run.options()
    };

    let report = written(run.scan(&bridge, &options).unwrap());

    assert_eq!(report.records.len(), 1);
    let record = &report.records[0];
    assert_eq!(record.apk_path, "/data/app/com.example.app-1/base.apk");
    assert_eq!(record.package_name, "com.example.app");
    assert_eq!(record.partition, Partition::User);
}

#[test]
fn metadata_is_extracted_from_dumpsys() {
    let bridge = FakeBridge::with_listing(LISTING).dumpsys("com.example.app", EXAMPLE_DUMPSYS);
    let mut run = Run::new();
    let options = run.options();

    let report = written(run.scan(&bridge, &options).unwrap());

    let example = report
        .records
        .iter()
        .find(|r| r.package_name == "com.example.app")
        .unwrap();
    assert_eq!(example.label, "Example App");
    assert_eq!(example.version, "2.3.1");

    // Packages without metadata get defaults, never blanks.
    for record in report.records.iter().filter(|r| r.package_name != "com.example.app") {
        assert_eq!(record.label, record.package_name);
        assert_eq!(record.version, "Unknown");
    }
}

#[test]
fn one_failed_lookup_does_not_stop_the_rest() {
    let bridge = FakeBridge::with_listing(LISTING)
        .dumpsys_fails("com.android.calculator2")
        .dumpsys("com.example.app", EXAMPLE_DUMPSYS);
    let mut run = Run::new();
    let options = run.options();

    let report = written(run.scan(&bridge, &options).unwrap());

    assert_eq!(report.records.len(), 5);
    let calc = &report.records[1];
    assert_eq!(calc.label, "com.android.calculator2");
    assert_eq!(calc.version, "Unknown");
    assert_eq!(report.records[0].label, "Example App");
}

#[test]
fn skipping_metadata_issues_no_queries() {
    let bridge = FakeBridge::with_listing(LISTING).dumpsys("com.example.app", EXAMPLE_DUMPSYS);
    let mut run = Run::new();
    let options = ScanOptions {
        fetch_metadata: false,
        ..run.options()
    };

    let report = written(run.scan(&bridge, &options).unwrap());

    assert_eq!(bridge.dumpsys_calls(), 0);
    for record in &report.records {
        assert_eq!(record.label, record.package_name);
        assert_eq!(record.version, "Unknown");
    }
}

#[test]
fn invocations_are_sequential_in_discovery_order() {
    let bridge = FakeBridge::with_listing(LISTING).pixel();
    let mut run = Run::new();
    let options = run.options();

    run.scan(&bridge, &options).unwrap();

    assert_eq!(
        bridge.calls(),
        [
            "devices",
            "shell pm list packages -f",
            "shell dumpsys package com.example.app",
            "shell dumpsys package com.android.calculator2",
            "shell dumpsys package com.vendor.ims",
            "shell dumpsys package com.android.wallpaper",
            "shell dumpsys package com.google.maps",
            "shell getprop ro.product.manufacturer",
            "shell getprop ro.product.model",
            "shell getprop ro.build.version.release",
        ]
    );
}

#[test]
fn malformed_lines_do_not_count() {
    let bridge = FakeBridge::with_listing(LISTING);
    let mut run = Run::new();
    let options = ScanOptions {
        fetch_metadata: false,
        ..run.options()
    };

    let report = written(run.scan(&bridge, &options).unwrap());
    assert_eq!(report.records.len(), 5);
    assert!(run.console().contains("total   : 5 apps"));
}

#[test]
fn allow_list_limits_records_and_summary() {
    let bridge = FakeBridge::with_listing(LISTING);
    let mut run = Run::new();
    let options = ScanOptions {
        fetch_metadata: false,
        partitions: vec![Partition::User, Partition::System],
        ..run.options()
    };

    let report = written(run.scan(&bridge, &options).unwrap());

    assert_eq!(report.records.len(), 3);
    assert!(report
        .records
        .iter()
        .all(|r| matches!(r.partition, Partition::User | Partition::System)));

    let console = run.console();
    assert!(console.contains("system : 1 apps"));
    assert!(console.contains("user   : 2 apps"));
    assert!(!console.contains("vendor"));
    assert!(!console.contains("product"));
    assert!(console.contains("total  : 3 apps"));
}

#[test]
fn json_report_round_trips() {
    let bridge = FakeBridge::with_listing(LISTING)
        .dumpsys("com.example.app", EXAMPLE_DUMPSYS)
        .pixel();
    let mut run = Run::new();
    let options = ScanOptions {
        format: ReportFormat::Json,
        ..run.options()
    };

    let report = written(run.scan(&bridge, &options).unwrap());

    let text = fs::read_to_string(&report.path).unwrap();
    let back = StructuredReport::from_json(&text).unwrap();
    assert_eq!(back.device_info, report.device);
    assert_eq!(back.apps, report.records);
    assert_eq!(back.device_info.model, "Pixel 8");
}

#[test]
fn csv_report_has_header_and_rows() {
    let bridge = FakeBridge::with_listing(LISTING);
    let mut run = Run::new();
    let path = run.dir.path().join("apps.csv");
    let options = ScanOptions {
        format: ReportFormat::Csv,
        fetch_metadata: false,
        output: Some(path.clone()),
        ..run.options()
    };

    written(run.scan(&bridge, &options).unwrap());

    let csv = fs::read_to_string(&path).unwrap();
    assert!(csv.starts_with("partition,package_name,apk_path,label,version\r\n"));
    let rows: Vec<_> = csv.lines().collect();
    assert_eq!(rows.len(), 6);
    assert!(rows[1].starts_with("user,com.example.app,"));
}

#[test]
fn text_report_groups_by_partition() {
    let bridge = FakeBridge::with_listing(LISTING).pixel();
    let mut run = Run::new();
    let options = ScanOptions {
        fetch_metadata: false,
        ..run.options()
    };

    let report = written(run.scan(&bridge, &options).unwrap());

    assert_file_contains(&report.path, "Installed Android Apps Report - 2026-10-19 09:30:00");
    assert_file_contains(&report.path, "Device: Google Pixel 8 (Android 14)");
    assert_file_contains(&report.path, "Product Apps (1):");
    assert_file_contains(&report.path, "User Apps (2):");
}

#[test]
fn default_report_name_is_timestamped() {
    let bridge = FakeBridge::with_listing(LISTING);
    let mut run = Run::new();
    let options = ScanOptions {
        format: ReportFormat::Csv,
        fetch_metadata: false,
        ..run.options()
    };

    let report = written(run.scan(&bridge, &options).unwrap());

    let name = report.path.file_name().unwrap().to_string_lossy().into_owned();
    let pattern = Regex::new(r"^installed_apps_report_\d{8}_\d{6}\.csv$").unwrap();
    assert!(pattern.is_match(&name), "unexpected name {}", name);
    assert_eq!(name, "installed_apps_report_20261019_093000.csv");
    assert_eq!(files_in(run.dir.path()), [report.path.clone()]);
    assert!(run.console().contains(&format!("Report saved to: {}", report.path.display())));
}

#[test]
fn existing_report_is_overwritten() {
    let bridge = FakeBridge::with_listing(LISTING);
    let mut run = Run::new();
    let path = run.dir.path().join("report.txt");
    fs::write(&path, "stale contents ".repeat(1000)).unwrap();
    let options = ScanOptions {
        fetch_metadata: false,
        output: Some(path.clone()),
        ..run.options()
    };

    written(run.scan(&bridge, &options).unwrap());

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Installed Android Apps Report"));
    assert!(!text.contains("stale"));
}

#[test]
fn verbose_prints_text_report_after_summary() {
    let bridge = FakeBridge::with_listing(LISTING);
    let mut run = Run::new();
    let options = ScanOptions {
        format: ReportFormat::Json,
        fetch_metadata: false,
        verbose: true,
        ..run.options()
    };

    written(run.scan(&bridge, &options).unwrap());

    let console = run.console();
    let summary_at = console.find("App Summary:").unwrap();
    let report_at = console.find("Installed Android Apps Report").unwrap();
    assert!(summary_at < report_at);
}

#[test]
fn empty_listing_writes_nothing() {
    let bridge = FakeBridge::with_listing("");
    let mut run = Run::new();
    let options = run.options();

    let outcome = run.scan(&bridge, &options).unwrap();

    assert!(matches!(outcome, ScanOutcome::NoPackageData));
    assert!(run.console().contains("No package data"));
    assert!(files_in(run.dir.path()).is_empty());
}

#[test]
fn everything_filtered_out_writes_nothing() {
    let bridge = FakeBridge::with_listing(LISTING);
    let mut run = Run::new();
    let options = ScanOptions {
        partitions: vec![Partition::Odm],
        ..run.options()
    };

    let outcome = run.scan(&bridge, &options).unwrap();

    assert!(matches!(outcome, ScanOutcome::NoValidPackages));
    assert!(run.console().contains("No valid packages found."));
    assert!(files_in(run.dir.path()).is_empty());
    assert_eq!(bridge.dumpsys_calls(), 0);
}

#[test]
fn no_authorized_device_is_fatal() {
    let mut bridge = FakeBridge::with_listing(LISTING);
    bridge.devices =
        apkscan::ToolOutcome::from_stdout("List of devices attached\nX\tunauthorized\n");
    let mut run = Run::new();
    let options = run.options();

    let err = run.scan(&bridge, &options).unwrap_err();

    assert!(matches!(err, ScanError::NoDevice));
    assert_eq!(bridge.calls(), ["devices"]);
    assert!(files_in(run.dir.path()).is_empty());
}

#[test]
fn missing_tool_is_fatal() {
    let mut bridge = FakeBridge::with_listing(LISTING);
    bridge.devices = apkscan::ToolOutcome::ToolMissing;
    let mut run = Run::new();
    let options = run.options();

    let err = run.scan(&bridge, &options).unwrap_err();
    assert!(matches!(err, ScanError::ToolMissing));
    assert_ne!(err.exit_code(), 0);
}

#[test]
fn listing_error_is_fatal() {
    let mut bridge = FakeBridge::with_listing("");
    bridge.listing = apkscan::ToolOutcome::ToolError {
        detail: "error: closed".to_string(),
    };
    let mut run = Run::new();
    let options = run.options();

    let err = run.scan(&bridge, &options).unwrap_err();
    assert!(matches!(err, ScanError::ToolFailed { .. }));
    assert!(files_in(run.dir.path()).is_empty());
}

#[test]
fn unwritable_destination_is_fatal() {
    let bridge = FakeBridge::with_listing(LISTING);
    let mut run = Run::new();
    let options = ScanOptions {
        fetch_metadata: false,
        output: Some(run.dir.path().join("missing/dir/report.txt")),
        ..run.options()
    };

    let err = run.scan(&bridge, &options).unwrap_err();

    assert!(matches!(err, ScanError::WriteReport { .. }));
    assert!(!run.console().contains("App Summary"));
}

#[test]
fn missing_device_properties_read_as_unknown() {
    let bridge = FakeBridge::with_listing(LISTING).prop("ro.product.model", "Pixel 8");
    let mut run = Run::new();
    let options = ScanOptions {
        fetch_metadata: false,
        ..run.options()
    };

    let report = written(run.scan(&bridge, &options).unwrap());

    assert_eq!(report.device.manufacturer, "Unknown");
    assert_eq!(report.device.model, "Pixel 8");
    assert_eq!(report.device.android_version, "Unknown");
}
