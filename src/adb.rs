//! The adb boundary.
//!
//! Everything this crate learns about the device comes through
//! [`DeviceBridge::invoke`], which folds the different ways a subprocess can
//! end into one [`ToolOutcome`] the pipeline matches on.

use crate::process::{Cmd, ProcessError};

/// Outcome of one device-bridge invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// The tool ran and printed at least one non-blank line.
    Lines(Vec<String>),
    /// The tool ran successfully but printed nothing.
    Empty,
    /// The tool binary could not be found.
    ToolMissing,
    /// The tool ran and reported an error.
    ToolError { detail: String },
}

impl ToolOutcome {
    /// Build an outcome from raw stdout: trailing whitespace (and `\r`) is
    /// removed from each line and blank lines are dropped.
    pub fn from_stdout(stdout: &str) -> Self {
        let lines: Vec<String> = stdout
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();

        if lines.is_empty() {
            Self::Empty
        } else {
            Self::Lines(lines)
        }
    }
}

/// Something that can run device-bridge commands.
///
/// Implemented by [`Adb`] for real devices and by scripted fakes in tests.
pub trait DeviceBridge {
    /// Run the tool with `args` and block until it exits.
    fn invoke(&self, args: &[&str]) -> ToolOutcome;

    /// `devices`: list attached devices.
    fn devices(&self) -> ToolOutcome {
        self.invoke(&["devices"])
    }

    /// `shell <command...>` on the selected device.
    fn shell(&self, command: &[&str]) -> ToolOutcome {
        let mut args = Vec::with_capacity(command.len() + 1);
        args.push("shell");
        args.extend_from_slice(command);
        self.invoke(&args)
    }
}

/// The real adb binary.
#[derive(Debug, Clone)]
pub struct Adb {
    program: String,
    serial: Option<String>,
}

impl Adb {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            serial: None,
        }
    }

    /// Target one device with `-s <serial>` on every invocation.
    pub fn with_serial(mut self, serial: Option<String>) -> Self {
        self.serial = serial;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn serial(&self) -> Option<&str> {
        self.serial.as_deref()
    }
}

impl DeviceBridge for Adb {
    fn invoke(&self, args: &[&str]) -> ToolOutcome {
        let mut cmd = Cmd::new(&self.program);
        // `devices` lists everything; the serial only scopes device commands.
        let scoped = args.first() != Some(&"devices");
        if let Some(serial) = self.serial.as_deref().filter(|_| scoped) {
            cmd = cmd.args(["-s", serial]);
        }

        match cmd
            .args(args)
            .context(format!("adb {} failed", args.join(" ")))
            .run()
        {
            Ok(result) => ToolOutcome::from_stdout(&result.stdout),
            Err(ProcessError::NotFound { .. }) => ToolOutcome::ToolMissing,
            Err(err) => ToolOutcome::ToolError {
                detail: err.to_string(),
            },
        }
    }
}

/// State of one entry in `adb devices` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceEntry {
    pub serial: String,
    pub state: String,
}

impl DeviceEntry {
    /// Only the literal `device` state means attached and authorized.
    pub fn is_usable(&self) -> bool {
        self.state == "device"
    }
}

/// Parse `adb devices` output into entries.
///
/// The `List of devices attached` header and daemon chatter (`* daemon ...`)
/// are skipped.
pub fn parse_devices(lines: &[String]) -> Vec<DeviceEntry> {
    lines
        .iter()
        .filter(|line| !line.starts_with("List of devices") && !line.starts_with('*'))
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let serial = fields.next()?;
            let state = fields.next()?;
            Some(DeviceEntry {
                serial: serial.to_string(),
                state: state.to_string(),
            })
        })
        .collect()
}
