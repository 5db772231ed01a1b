//! Handlers behind the CLI: the default scan, `preflight` and `show`.

mod preflight;
pub mod scan;
pub mod show;

pub use preflight::cmd_preflight;
pub use scan::cmd_scan;
pub use show::cmd_show;
