//! Config command - show or edit configuration

use crate::cache::PublishPolicy;
use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager, LOCAL_CONFIG_FILE};
use crate::error::{UidlError, UidlResult};
use crate::ui::{self, UiContext};
use std::path::PathBuf;
use tokio::fs;

const VALID_KEYS: &[&str] = &[
    "general.log_format",
    "generator.package",
    "generator.extension",
    "generator.force",
    "cache.publish",
];

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    config: &Config,
    config_path: Option<PathBuf>,
) -> UidlResult<()> {
    let manager = match config_path {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };

    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => show_path(&manager),
        Some(ConfigAction::Init { force }) => init_config(&manager, force).await?,
        Some(ConfigAction::Set { key, value, local }) => {
            if local {
                set_local_value(&key, &value).await?
            } else {
                set_value(&manager, &key, &value).await?
            }
        }
    }

    Ok(())
}

fn show_config(config: &Config) -> UidlResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> UidlResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;
    ui::step_ok_detail(&ctx, "Configuration initialized", &path.display().to_string());

    Ok(())
}

/// Apply one key to a typed config, validating the value
fn apply_value(config: &mut Config, key: &str, value: &str) -> UidlResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "log_format"] => config.general.log_format = parse_log_format(value)?,
        ["generator", "package"] => config.generator.package = Some(value.to_string()),
        ["generator", "extension"] => {
            config.generator.extension = value.trim_start_matches('.').to_string()
        }
        ["generator", "force"] => config.generator.force = parse_bool(value)?,
        ["cache", "publish"] => config.cache.publish = parse_policy(value)?,
        _ => {
            return Err(UidlError::User(format!(
                "Unknown config key: {} (valid keys: {})",
                key,
                VALID_KEYS.join(", ")
            )))
        }
    }
    Ok(())
}

async fn set_value(manager: &ConfigManager, key: &str, value: &str) -> UidlResult<()> {
    let ctx = UiContext::detect();

    // Start from the global file alone so local overrides are not copied into it
    let mut config = manager.load().await?;
    apply_value(&mut config, key, value)?;

    manager.save(&config).await?;
    ui::step_ok(&ctx, &format!("Set {} = {}", key, value));

    Ok(())
}

async fn set_local_value(key: &str, value: &str) -> UidlResult<()> {
    let ctx = UiContext::detect();

    let cwd = std::env::current_dir().map_err(|e| UidlError::io("getting current directory", e))?;
    let local_path = cwd.join(LOCAL_CONFIG_FILE);

    // Validate the key and value before touching the file
    apply_value(&mut Config::default(), key, value)?;

    let mut doc: toml::Value = if local_path.exists() {
        let content = fs::read_to_string(&local_path)
            .await
            .map_err(|e| UidlError::io(format!("reading {}", local_path.display()), e))?;
        content
            .parse::<toml::Table>()
            .map(toml::Value::Table)
            .map_err(|e| UidlError::ConfigInvalid {
                path: local_path.clone(),
                reason: e.to_string(),
            })?
    } else {
        toml::Value::Table(toml::map::Map::new())
    };

    set_toml_value(&mut doc, key, value)?;

    // Write back only the keys the user has explicitly set
    let content = toml::to_string_pretty(&doc)?;
    fs::write(&local_path, content)
        .await
        .map_err(|e| UidlError::io(format!("writing {}", local_path.display()), e))?;

    ui::step_ok(
        &ctx,
        &format!("Set {} = {} in {}", key, value, local_path.display()),
    );

    Ok(())
}

/// Set a dot-separated key in a TOML value tree, creating intermediate tables as needed
fn set_toml_value(doc: &mut toml::Value, key: &str, value: &str) -> UidlResult<()> {
    let Some((parents, leaf)) = key.rsplit_once('.') else {
        return Err(UidlError::User(format!("Expected section.key, got: {}", key)));
    };

    let mut current = doc;
    for part in parents.split('.') {
        current = current
            .as_table_mut()
            .ok_or_else(|| UidlError::User(format!("Expected table at key: {}", part)))?
            .entry(part)
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }

    let table = current
        .as_table_mut()
        .ok_or_else(|| UidlError::User(format!("Expected table for key: {}", key)))?;

    let toml_value = match value.parse::<bool>() {
        Ok(b) if key == "generator.force" => toml::Value::Boolean(b),
        _ => toml::Value::String(value.to_string()),
    };

    table.insert(leaf.to_string(), toml_value);
    Ok(())
}

fn parse_bool(value: &str) -> UidlResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(UidlError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}

fn parse_policy(value: &str) -> UidlResult<PublishPolicy> {
    match value {
        "blind" => Ok(PublishPolicy::Blind),
        "compare_and_swap" | "cas" => Ok(PublishPolicy::CompareAndSwap),
        _ => Err(UidlError::User(format!(
            "Invalid publish policy: {}. Use blind or compare_and_swap",
            value
        ))),
    }
}

fn parse_log_format(value: &str) -> UidlResult<String> {
    match value {
        "text" | "json" => Ok(value.to_string()),
        _ => Err(UidlError::User(format!(
            "Invalid log format: {}. Use text or json",
            value
        ))),
    }
}
