//! Shared test utilities for apkscan tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use apkscan::{DeviceBridge, ToolOutcome};
use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

pub const ONE_DEVICE: &str = "List of devices attached\nemulator-5554\tdevice\n";

/// A scripted device bridge that records every invocation.
pub struct FakeBridge {
    pub devices: ToolOutcome,
    pub listing: ToolOutcome,
    pub dumpsys: HashMap<String, ToolOutcome>,
    pub props: HashMap<String, String>,
    calls: RefCell<Vec<String>>,
}

impl FakeBridge {
    /// One authorized device, the given listing, no metadata, no properties.
    pub fn with_listing(listing: &str) -> Self {
        Self {
            devices: ToolOutcome::from_stdout(ONE_DEVICE),
            listing: ToolOutcome::from_stdout(listing),
            dumpsys: HashMap::new(),
            props: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn dumpsys(mut self, package: &str, output: &str) -> Self {
        self.dumpsys
            .insert(package.to_string(), ToolOutcome::from_stdout(output));
        self
    }

    pub fn dumpsys_fails(mut self, package: &str) -> Self {
        self.dumpsys.insert(
            package.to_string(),
            ToolOutcome::ToolError {
                detail: "device closed".to_string(),
            },
        );
        self
    }

    pub fn prop(mut self, key: &str, value: &str) -> Self {
        self.props.insert(key.to_string(), value.to_string());
        self
    }

    pub fn pixel(self) -> Self {
        self.prop("ro.product.manufacturer", "Google")
            .prop("ro.product.model", "Pixel 8")
            .prop("ro.build.version.release", "14")
    }

    /// Every invocation so far, arguments joined with spaces.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Number of `dumpsys` invocations so far.
    pub fn dumpsys_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.starts_with("shell dumpsys"))
            .count()
    }
}

impl DeviceBridge for FakeBridge {
    fn invoke(&self, args: &[&str]) -> ToolOutcome {
        self.calls.borrow_mut().push(args.join(" "));
        match args {
            ["devices"] => self.devices.clone(),
            ["shell", "pm", "list", "packages", "-f"] => self.listing.clone(),
            ["shell", "dumpsys", "package", name] => self
                .dumpsys
                .get(*name)
                .cloned()
                .unwrap_or(ToolOutcome::Empty),
            ["shell", "getprop", key] => self
                .props
                .get(*key)
                .map(|value| ToolOutcome::Lines(vec![value.clone()]))
                .unwrap_or(ToolOutcome::Empty),
            _ => ToolOutcome::ToolError {
                detail: format!("unexpected command: {}", args.join(" ")),
            },
        }
    }
}

/// Fixed report timestamp.
pub fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .expect("valid timestamp")
}

/// Files in `dir`, sorted.
pub fn files_in(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .expect("Failed to read dir")
        .map(|entry| entry.expect("Failed to read entry").path())
        .collect();
    files.sort();
    files
}

/// Write an executable shell script standing in for adb.
pub fn create_fake_adb(dir: &TempDir, script: &str) -> PathBuf {
    let path = dir.path().join("fake-adb");
    fs::write(&path, format!("#!/bin/sh\n{}", script)).expect("Failed to write fake adb");

    let mut perms = fs::metadata(&path)
        .expect("Failed to get metadata")
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("Failed to set permissions");
    path
}

/// Assert that a file contains expected content.
pub fn assert_file_contains(path: &Path, expected: &str) {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read file {}: {}", path.display(), e));
    assert!(
        content.contains(expected),
        "File {} does not contain expected content.\nExpected to find: {}\nActual content: {}",
        path.display(),
        expected,
        content
    );
}
