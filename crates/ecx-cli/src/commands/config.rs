//! Config command - inspect and edit the ecx configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use ecx_core::models::config::EcxConfig;

/// Shown instead of the translation API key.
const REDACTED: &str = "********";

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration (API key redacted)
    Show,

    /// Write a configuration file with default values
    Init {
        /// Output path (default: the active config path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one value, e.g. "translation.timeout_ms"
    Get { key: String },

    /// Change one value, e.g. "extraction.min_block_length 80"
    Set { key: String, value: String },

    /// Print the config file location
    Path,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => {
            if !path.exists() {
                eprintln!("{} No config file at {}, showing defaults.", style("ℹ").blue(), path.display());
            }
            let view = redacted_view(&load_or_default(&path)?)?;
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        ConfigCommand::Init { output, force } => {
            let target = output.unwrap_or(path);
            if target.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    target.display()
                );
            }
            write_config(&target, &EcxConfig::default())?;
            println!("{} Created configuration file at {}", style("✓").green(), target.display());
        }
        ConfigCommand::Get { key } => {
            let view = redacted_view(&load_or_default(&path)?)?;
            println!("{}", serde_json::to_string_pretty(lookup(&view, &key)?)?);
        }
        ConfigCommand::Set { key, value } => {
            let config = apply_setting(&load_or_default(&path)?, &key, &value)?;
            write_config(&path, &config)?;
            let view = redacted_view(&config)?;
            println!("{} Set {} = {}", style("✓").green(), key, lookup(&view, &key)?);
        }
        ConfigCommand::Path => {
            println!("Configuration file: {}", path.display());
            if path.exists() {
                println!("Status: {}", style("exists").green());
            } else {
                println!("Status: {}", style("not created").yellow());
                println!();
                println!("Run 'ecx config init' to create a configuration file.");
            }
        }
    }

    Ok(())
}

/// `<config_dir>/ecx/config.json`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ecx")
        .join("config.json")
}

fn load_or_default(path: &Path) -> anyhow::Result<EcxConfig> {
    if path.exists() {
        Ok(EcxConfig::from_file(path)?)
    } else {
        Ok(EcxConfig::default())
    }
}

fn write_config(path: &Path, config: &EcxConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;
    Ok(())
}

/// JSON view of `config` with every key present and the API key masked.
fn redacted_view(config: &EcxConfig) -> anyhow::Result<Value> {
    let mut view = serde_json::to_value(config)?;
    if let Some(translation) = view.get_mut("translation").and_then(Value::as_object_mut) {
        let masked = match config.translation.api_key {
            Some(_) => Value::String(REDACTED.to_string()),
            None => Value::Null,
        };
        translation.insert("api_key".to_string(), masked);
    }
    Ok(view)
}

fn split_key(key: &str) -> anyhow::Result<(&str, &str)> {
    match key.split_once('.') {
        Some((section, field)) if !section.is_empty() && !field.is_empty() && !field.contains('.') => {
            Ok((section, field))
        }
        _ => anyhow::bail!("Configuration keys look like <section>.<field>, got '{}'", key),
    }
}

fn lookup<'a>(view: &'a Value, key: &str) -> anyhow::Result<&'a Value> {
    let (section, field) = split_key(key)?;
    view.get(section)
        .and_then(|s| s.get(field))
        .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))
}

/// Return a copy of `config` with `key` set to `raw`.
///
/// The key must name an existing field and the value must have that
/// field's type. `translation.api_key` accepts `null` to clear it.
fn apply_setting(config: &EcxConfig, key: &str, raw: &str) -> anyhow::Result<EcxConfig> {
    let (section, field) = split_key(key)?;

    let mut json = redacted_view(config)?;
    if let Some(key) = config.translation.api_key.as_deref() {
        json["translation"]["api_key"] = Value::String(key.to_string());
    }

    let slot = json
        .get_mut(section)
        .and_then(|s| s.get_mut(field))
        .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))?;

    let value = match (&*slot, key) {
        (_, "translation.api_key") if raw == "null" => Value::Null,
        (_, "translation.api_key") | (Value::String(_), _) => Value::String(raw.to_string()),
        (Value::Bool(_), _) => Value::Bool(
            raw.parse()
                .map_err(|_| anyhow::anyhow!("{} expects true or false, got '{}'", key, raw))?,
        ),
        (Value::Number(_), _) => {
            let n: u64 = raw
                .parse()
                .map_err(|_| anyhow::anyhow!("{} expects a non-negative integer, got '{}'", key, raw))?;
            Value::from(n)
        }
        _ => anyhow::bail!("{} cannot be set from the command line", key),
    };
    *slot = value;

    Ok(serde_json::from_value(json)?)
}
