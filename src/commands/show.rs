//! `apkscan show` - print resolved settings.

use anyhow::Result;
use clap::Subcommand;

use apkscan::config::Config;

#[derive(Subcommand)]
pub enum ShowTarget {
    /// Show resolved configuration and whether adb can be found
    Config,
}

pub fn cmd_show(target: ShowTarget, config: &Config) -> Result<()> {
    match target {
        ShowTarget::Config => print!("{}", config.render()),
    }
    Ok(())
}
