//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Set { key, value } => {
            let updated = set_key(&settings, key, value)?;
            updated.save()?;
            Output::success(&format!("Set {} = {}", key, value));
            Output::info(&format!(
                "Saved to {}",
                Settings::default_config_path().display()
            ));
        }

        ConfigAction::Edit => {
            let config_path = Settings::default_config_path();

            // Create default config if it doesn't exist
            if !config_path.exists() {
                settings.save()?;
                Output::info(&format!("Created default config at {:?}", config_path));
            }

            // Try to open in editor
            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());

            Output::info(&format!("Opening config in {}...", editor));

            let status = std::process::Command::new(&editor)
                .arg(&config_path)
                .status();

            match status {
                Ok(s) if s.success() => {
                    Output::success("Config saved.");
                }
                Ok(_) => {
                    Output::warning("Editor exited with non-zero status.");
                }
                Err(e) => {
                    Output::error(&format!("Failed to open editor: {}", e));
                    Output::info(&format!("Config file is at: {:?}", config_path));
                }
            }
        }

        ConfigAction::Path => {
            let config_path = Settings::default_config_path();
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

/// Apply a dotted-key assignment like `prediction.months = 6` and return the
/// updated settings, or an error if the key or value doesn't fit the schema.
fn set_key(settings: &Settings, key: &str, value: &str) -> Result<Settings> {
    let mut segments: Vec<&str> = key.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        anyhow::bail!("Invalid config key: '{}'", key);
    }
    let leaf = segments
        .pop()
        .ok_or_else(|| anyhow::anyhow!("Invalid config key: '{}'", key))?;

    let mut root = toml::Value::try_from(settings)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    // Walk to the section holding the leaf key. Sections must already exist;
    // leaf keys may be new (unset optional values are absent from the table).
    let mut node = &mut root;
    for segment in &segments {
        node = node
            .as_table_mut()
            .and_then(|t| t.get_mut(*segment))
            .ok_or_else(|| anyhow::anyhow!("Unknown config section: '{}'", segment))?;
    }
    let table = node
        .as_table_mut()
        .ok_or_else(|| anyhow::anyhow!("'{}' is not a config section", segments.join(".")))?;
    table.insert(leaf.to_string(), coerce_value(value));

    root.try_into()
        .map_err(|e| anyhow::anyhow!("Invalid value for '{}': {}", key, e))
}

/// Interpret a raw CLI value as the narrowest matching TOML type.
fn coerce_value(raw: &str) -> toml::Value {
    if let Ok(b) = raw.parse::<bool>() {
        return toml::Value::Boolean(b);
    }
    if let Ok(i) = raw.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return toml::Value::Float(f);
    }
    toml::Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_key_updates_nested_integer() {
        let settings = Settings::default();
        let updated = set_key(&settings, "prediction.months", "12").unwrap();
        assert_eq!(updated.prediction.months, 12);
    }

    #[test]
    fn test_set_key_accepts_new_optional_value() {
        let settings = Settings::default();
        let updated = set_key(&settings, "youtube.api_key", "test-key").unwrap();
        assert_eq!(updated.youtube.api_key.as_deref(), Some("test-key"));
    }

    #[test]
    fn test_set_key_rejects_unknown_section() {
        let settings = Settings::default();
        let result = set_key(&settings, "nonsense.key", "1");
        assert!(result.is_err());
    }

    #[test]
    fn test_set_key_rejects_mistyped_value() {
        let settings = Settings::default();
        let result = set_key(&settings, "prediction.months", "soon");
        assert!(result.is_err());
    }

    #[test]
    fn test_coerce_value_picks_narrowest_type() {
        assert!(matches!(coerce_value("true"), toml::Value::Boolean(true)));
        assert!(matches!(coerce_value("42"), toml::Value::Integer(42)));
        assert!(matches!(coerce_value("0.5"), toml::Value::Float(_)));
        assert!(matches!(coerce_value("hello"), toml::Value::String(_)));
    }
}
