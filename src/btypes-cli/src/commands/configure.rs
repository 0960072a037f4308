//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up btypes CLI defaults.

use crate::config::Config;
use anyhow::Result;
use btypes::HostVersion;

/// Handle the configure command
///
/// # Arguments
/// * `host_version` - Optional host version to set as default
/// * `show` - If true, show current configuration
pub fn handle(host_version: Option<HostVersion>, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if let Some(version) = host_version {
        set_host_version(&mut config, version)?;
    } else {
        show_usage();
    }

    Ok(())
}

fn show_config(config: &Config) {
    if let Some(version) = config.get_host_version() {
        println!("Host version: {}", version);
    } else {
        println!("No host version configured");
    }

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

fn set_host_version(config: &mut Config, version: HostVersion) -> Result<()> {
    config.set_host_version(version);
    config.save()?;

    println!("Host version configured: {}", version);
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

fn show_usage() {
    println!("Usage: btypes configure --host-version 3.3.1");
    println!("   or: btypes configure --show");
    println!();
    println!("The host version selects which struct layouts are resolved when");
    println!("a command is run without --host-version.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_usage_does_not_panic() {
        show_usage();
    }

    #[test]
    fn test_config_lives_under_btypes() {
        let path = Config::config_path().unwrap();
        assert!(path.ends_with("btypes/config.toml"));
    }
}
