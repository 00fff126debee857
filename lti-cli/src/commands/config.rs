//! Inspecting the effective tool configuration

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::{ConfigLoader, ToolConfig};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the merged configuration with the consumer secret masked
    Show,
    /// List the config files that are read, and whether each exists
    Path,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    let layers = layers();
    match args.command {
        ConfigCommands::Show => {
            let config = ConfigLoader::load()?;
            print!("{}", render_config(&config, &layers)?);
        }
        ConfigCommands::Path => {
            for (label, path) in &layers {
                println!("{:<8} {} ({})", label, path.display(), presence(path));
            }
        }
    }
    Ok(())
}

/// Config files in the order they are applied
fn layers() -> Vec<(&'static str, PathBuf)> {
    let mut layers = Vec::new();
    if let Some(user) = ConfigLoader::user_config_path() {
        layers.push(("user", user));
    }
    layers.push(("project", ConfigLoader::project_config_path()));
    layers
}

fn presence(path: &Path) -> &'static str {
    if path.exists() { "found" } else { "missing" }
}

/// TOML for `config show`, prefixed with the layers that contributed
fn render_config(config: &ToolConfig, layers: &[(&str, PathBuf)]) -> Result<String> {
    let mut out = String::new();
    for (label, path) in layers.iter().filter(|(_, path)| path.exists()) {
        out.push_str(&format!("# {} layer: {}\n", label, path.display()));
    }
    if out.is_empty() {
        out.push_str("# no config files found, built-in defaults\n");
    }
    out.push('\n');
    out.push_str(&toml::to_string_pretty(&config.masked())?);
    Ok(out)
}
