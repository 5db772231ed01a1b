//! Configuration management for apkscan.
//!
//! Reads configuration from environment variables. `main` loads a `.env`
//! file first, so values there act as defaults; the real environment takes
//! precedence. Command-line flags override both.

use std::collections::HashMap;
use std::path::PathBuf;

/// Default adb program, resolved on PATH.
pub const DEFAULT_ADB: &str = "adb";

/// apkscan configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// adb binary to run (default: `adb` on PATH)
    pub adb_path: String,
    /// Device to target when several are attached
    pub device_serial: Option<String>,
    /// Directory for generated report names (default: current directory)
    pub output_dir: PathBuf,
    /// False when `NO_COLOR` is set
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            adb_path: DEFAULT_ADB.to_string(),
            device_serial: None,
            output_dir: PathBuf::from("."),
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Self {
        Self::from_vars(&std::env::vars().collect())
    }

    /// Build configuration from a set of variables.
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            vars.get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
        };

        Self {
            adb_path: get("APKSCAN_ADB")
                .map(str::to_string)
                .unwrap_or(defaults.adb_path),
            device_serial: get("ANDROID_SERIAL").map(str::to_string),
            output_dir: get("APKSCAN_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            // https://no-color.org: any non-empty value disables color
            color: get("NO_COLOR").is_none(),
        }
    }

    /// Resolved settings, one per line, as shown by `apkscan show config`.
    pub fn render(&self) -> String {
        let adb = match crate::process::which(&self.adb_path) {
            Some(path) => format!("FOUND ({path})"),
            None => "NOT FOUND (install platform-tools or set APKSCAN_ADB)".to_string(),
        };
        let rows = [
            ("APKSCAN_ADB", self.adb_path.clone()),
            (
                "ANDROID_SERIAL",
                self.device_serial.as_deref().unwrap_or("(any)").to_string(),
            ),
            ("APKSCAN_OUTPUT_DIR", self.output_dir.display().to_string()),
            ("Color", if self.color { "auto" } else { "off" }.to_string()),
            ("adb", adb),
        ];

        let mut out = String::from("Configuration:\n");
        for (key, value) in rows {
            out.push_str(&format!("  {key}: {value}\n"));
        }
        out
    }
}
