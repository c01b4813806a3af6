use crate::state::{parse_binding_spec, KeyBinding};
use std::fs;
use std::path::PathBuf;
use toml::Value as TomlValue;

/// Optional user configuration: `<config dir>/triv/config.toml`.
///
/// ```toml
/// columns = 6
///
/// [bindings]
/// "a" = "left"
/// "d" = "right"
/// ```
#[derive(Debug, Default)]
pub struct Config {
    pub columns: Option<usize>,
    pub bindings: Vec<KeyBinding>,
}

impl Config {
    /// Loads the config file if one exists; anything unreadable or
    /// malformed falls back to defaults.
    pub fn load() -> Self {
        config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .map(|text| Self::parse(&text))
            .unwrap_or_default()
    }

    pub fn parse(text: &str) -> Self {
        let mut config = Config::default();
        let Ok(TomlValue::Table(table)) = toml::from_str::<TomlValue>(text) else {
            return config;
        };
        if let Some(TomlValue::Integer(n)) = table.get("columns") {
            if *n >= 1 {
                config.columns = Some(*n as usize);
            }
        }
        if let Some(TomlValue::Table(bindings)) = table.get("bindings") {
            for (spec, value) in bindings {
                if let TomlValue::String(command) = value {
                    if let Some(binding) = parse_binding_spec(spec, command) {
                        config.bindings.push(binding);
                    }
                }
            }
        }
        config
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("triv").join("config.toml"))
}
