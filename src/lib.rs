//! apkscan library exports.
//!
//! The binary is a thin clap front end over these modules; integration
//! tests drive the pipeline through them with a scripted bridge.

pub mod adb;
pub mod config;
pub mod device;
pub mod error;
pub mod metadata;
pub mod package;
pub mod partition;
pub mod pipeline;
pub mod preflight;
pub mod process;
pub mod report;
pub mod style;
pub mod timing;

pub use adb::{Adb, DeviceBridge, ToolOutcome};
pub use device::DeviceInfo;
pub use error::ScanError;
pub use package::PackageRecord;
pub use partition::Partition;
pub use pipeline::{run_scan, ScanOptions, ScanOutcome};
pub use report::ReportFormat;
