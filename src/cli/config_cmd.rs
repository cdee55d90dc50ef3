//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AccessibilityConfig, AppConfig, HotkeyConfig};
use crate::domain::error::ConfigError;
use crate::domain::DisplayMode;
use crate::infrastructure::hotkey::validate_accelerator;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    set_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    presenter.output(get_value(&config, key).as_deref().unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, get_value(&config, key).as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.into(),
    }
}

/// Parse a strictly positive integer
fn parse_positive<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match value.trim().parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(invalid(key, "Value must be a positive whole number")),
    }
}

/// Validate `value` for `key` and store it in `config`
fn set_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "endpoint" => {
            let value = value.trim();
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(invalid(key, "Value must be an http:// or https:// URL"));
            }
            config.endpoint = Some(value.trim_end_matches('/').to_string());
        }
        "timeout_secs" => config.timeout_secs = Some(parse_positive(key, value)?),
        "enhancement_ttl_secs" => {
            config.enhancement_ttl_secs = Some(parse_positive(key, value)?)
        }
        "display_mode" => {
            let mode = value
                .parse::<DisplayMode>()
                .map_err(|e| invalid(key, e.to_string()))?;
            config.display_mode = Some(mode.to_string());
        }
        "hotkeys.analyze" | "hotkeys.replace" => {
            validate_accelerator(value).map_err(|e| invalid(key, e.to_string()))?;
            let hotkeys = config.hotkeys.get_or_insert_with(HotkeyConfig::default);
            if key == "hotkeys.analyze" {
                hotkeys.analyze = Some(value.to_string());
            } else {
                hotkeys.replace = Some(value.to_string());
            }
        }
        "accessibility.max_items" | "accessibility.max_depth" => {
            let limit = parse_positive(key, value)?;
            let section = config
                .accessibility
                .get_or_insert_with(AccessibilityConfig::default);
            if key == "accessibility.max_items" {
                section.max_items = Some(limit);
            } else {
                section.max_depth = Some(limit);
            }
        }
        _ => return Err(invalid(key, "Unknown key")),
    }
    Ok(())
}

/// Current file value for `key`
fn get_value(config: &AppConfig, key: &str) -> Option<String> {
    let hotkeys = config.hotkeys.as_ref();
    let accessibility = config.accessibility.as_ref();

    match key {
        "endpoint" => config.endpoint.clone(),
        "timeout_secs" => config.timeout_secs.map(|n| n.to_string()),
        "display_mode" => config.display_mode.clone(),
        "enhancement_ttl_secs" => config.enhancement_ttl_secs.map(|n| n.to_string()),
        "hotkeys.analyze" => hotkeys.and_then(|h| h.analyze.clone()),
        "hotkeys.replace" => hotkeys.and_then(|h| h.replace.clone()),
        "accessibility.max_items" => accessibility
            .and_then(|a| a.max_items)
            .map(|n| n.to_string()),
        "accessibility.max_depth" => accessibility
            .and_then(|a| a.max_depth)
            .map(|n| n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_every_key() {
        let mut config = AppConfig::empty();
        let values = [
            ("endpoint", "https://scoring.example.com"),
            ("timeout_secs", "15"),
            ("display_mode", "alert"),
            ("enhancement_ttl_secs", "600"),
            ("hotkeys.analyze", "CmdOrCtrl+Shift+KeyA"),
            ("hotkeys.replace", "CmdOrCtrl+Shift+KeyR"),
            ("accessibility.max_items", "40"),
            ("accessibility.max_depth", "6"),
        ];

        for (key, value) in values {
            set_value(&mut config, key, value).unwrap();
        }
        for (key, value) in values {
            assert_eq!(get_value(&config, key).as_deref(), Some(value), "{}", key);
        }
    }

    #[test]
    fn endpoint_drops_trailing_slash() {
        let mut config = AppConfig::empty();
        set_value(&mut config, "endpoint", "http://localhost:8000/").unwrap();
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:8000"));
    }

    #[test]
    fn display_mode_is_normalized() {
        let mut config = AppConfig::empty();
        set_value(&mut config, "display_mode", " Alert ").unwrap();
        assert_eq!(config.display_mode.as_deref(), Some("alert"));
    }

    #[test]
    fn rejects_invalid_values() {
        let mut config = AppConfig::empty();
        assert!(set_value(&mut config, "endpoint", "localhost:8000").is_err());
        assert!(set_value(&mut config, "timeout_secs", "0").is_err());
        assert!(set_value(&mut config, "timeout_secs", "soon").is_err());
        assert!(set_value(&mut config, "display_mode", "popup").is_err());
        assert!(set_value(&mut config, "hotkeys.replace", "Ctrl+Nope").is_err());
        assert!(set_value(&mut config, "accessibility.max_depth", "-1").is_err());
        assert!(config.endpoint.is_none());
        assert!(config.hotkeys.is_none());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = check_key("api_key").unwrap_err();
        assert!(err.to_string().contains("Unknown key"));
        assert!(check_key("endpoint").is_ok());
    }

    #[test]
    fn unset_values_are_none() {
        let config = AppConfig::empty();
        for key in VALID_CONFIG_KEYS {
            assert!(get_value(&config, key).is_none());
        }
    }
}
