mod defaults;
use crossterm::event::KeyCode;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub permissions: PermissionsConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
    #[serde(default = "defaults::config_path")]
    pub config_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            matching: MatchingConfig::default(),
            completion: CompletionConfig::default(),
            permissions: PermissionsConfig::default(),
            keybindings: KeybindingsConfig::default(),
            config_path: defaults::config_path(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MatchingConfig {
    #[serde(default = "defaults::matching::case_insensitive")]
    pub case_insensitive: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        MatchingConfig {
            case_insensitive: defaults::matching::case_insensitive(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CompletionConfig {
    #[serde(default = "defaults::completion::max_suggestions")]
    pub max_suggestions: usize,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        CompletionConfig {
            max_suggestions: defaults::completion::max_suggestions(),
        }
    }
}

/// What the console sender starts out allowed to do. The `perm` command
/// mutates the live set; this is only the startup state.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PermissionsConfig {
    #[serde(default = "defaults::permissions::administrator")]
    pub administrator: bool,

    #[serde(default = "defaults::permissions::granted")]
    pub granted: Vec<String>,
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        PermissionsConfig {
            administrator: defaults::permissions::administrator(),
            granted: defaults::permissions::granted(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct KeybindingsConfig {
    #[serde(default = "defaults::keys::execute")]
    pub execute: KeyCode,

    #[serde(default = "defaults::keys::complete")]
    pub complete: KeyCode,

    #[serde(default = "defaults::keys::history_prev")]
    pub history_prev: KeyCode,

    #[serde(default = "defaults::keys::history_next")]
    pub history_next: KeyCode,

    #[serde(default = "defaults::keys::scroll_up")]
    pub scroll_up: KeyCode,

    #[serde(default = "defaults::keys::scroll_down")]
    pub scroll_down: KeyCode,

    #[serde(default = "defaults::keys::quit")]
    pub quit: KeyCode,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            execute: defaults::keys::execute(),
            complete: defaults::keys::complete(),
            history_prev: defaults::keys::history_prev(),
            history_next: defaults::keys::history_next(),
            scroll_up: defaults::keys::scroll_up(),
            scroll_down: defaults::keys::scroll_down(),
            quit: defaults::keys::quit(),
        }
    }
}

lazy_static! {
    pub static ref CONFIG: RwLock<AppConfig> = RwLock::new(AppConfig::default());
}

/// Loads application configuration from a file.
///
/// Priorities:
/// 1. A specified override path if provided
/// 2. The default config location (platform-specific user config directory)
/// 3. Built-in defaults if no config file exists
///
/// The loaded configuration is stored in the global `CONFIG` static for
/// application-wide access.
pub fn load_config(path_override: Option<String>) -> Result<AppConfig, String> {
    // Check for path override first
    if let Some(override_path) = path_override {
        let path = PathBuf::from(&override_path);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match toml::from_str::<AppConfig>(&content) {
                    Ok(mut loaded_config) => {
                        loaded_config.config_path = Some(path);

                        let mut global_config = CONFIG.write().unwrap();
                        *global_config = loaded_config.clone();
                        return Ok(loaded_config);
                    }
                    Err(e) => {
                        return Err(format!("Error parsing override config file: {}", e));
                    }
                },
                Err(e) => {
                    return Err(format!("Error reading override config file: {}", e));
                }
            }
        } else {
            return Err(format!(
                "Override config path does not exist: {}",
                path.display()
            ));
        }
    }

    // Try to load from default config path if it exists
    if let Some(config_path) = defaults::config_path() {
        if config_path.exists() {
            match fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str::<AppConfig>(&content) {
                    Ok(mut loaded_config) => {
                        loaded_config.config_path = Some(config_path);

                        let mut global_config = CONFIG.write().unwrap();
                        *global_config = loaded_config.clone();
                        return Ok(loaded_config);
                    }
                    Err(e) => {
                        return Err(format!("Error parsing config file: {}", e));
                    }
                },
                Err(e) => {
                    return Err(format!("Error reading config file: {}", e));
                }
            }
        }
    }

    // Use default configuration if no config file was found or provided
    Ok(load_default_config())
}

/// The named sections of the config file, as accepted by `reload {section}`.
pub const SECTIONS: &[&str] = &["matching", "completion", "permissions", "keybindings"];

// Parses the file recorded at startup (falling back to built-in defaults if
// it no longer exists) without touching the global CONFIG.
fn read_recorded_config() -> Result<AppConfig, String> {
    let recorded = CONFIG.read().unwrap().config_path.clone();
    let Some(path) = recorded.filter(|path| path.exists()) else {
        return Ok(AppConfig::default());
    };
    let content =
        fs::read_to_string(&path).map_err(|e| format!("Error reading config file: {}", e))?;
    let mut parsed = toml::from_str::<AppConfig>(&content)
        .map_err(|e| format!("Error parsing config file: {}", e))?;
    parsed.config_path = Some(path);
    Ok(parsed)
}

/// Reloads from the path recorded at startup (or the default location).
/// Used by the `reload` console command.
pub fn reload_config() -> Result<AppConfig, String> {
    let loaded = read_recorded_config()?;
    let mut global_config = CONFIG.write().unwrap();
    *global_config = loaded.clone();
    Ok(loaded)
}

/// Reloads a single named section from the config file, leaving the rest of
/// the live configuration untouched.
pub fn reload_section(section: &str) -> Result<AppConfig, String> {
    let loaded = read_recorded_config()?;
    let mut global_config = CONFIG.write().unwrap();
    match section {
        "matching" => global_config.matching = loaded.matching,
        "completion" => global_config.completion = loaded.completion,
        "permissions" => global_config.permissions = loaded.permissions,
        "keybindings" => global_config.keybindings = loaded.keybindings,
        _ => return Err(format!("unknown config section '{}'", section)),
    }
    Ok(global_config.clone())
}

// Build an AppConfig::default() and set it to the global CONFIG variable.
// Public so that unit tests can access it.
pub fn load_default_config() -> AppConfig {
    let default_config = AppConfig::default();
    let mut global_config = CONFIG.write().unwrap();
    *global_config = default_config.clone();
    default_config
}

pub fn read_config() -> AppConfig {
    CONFIG.read().unwrap().clone()
}

#[cfg(test)]
mod tests {
    use crate::config::{load_config, AppConfig, CONFIG};
    use crossterm::event::KeyCode;
    use std::fs;
    use tempfile::NamedTempFile;

    fn setup() {
        reset_config();
    }

    fn teardown() {
        reset_config();
    }

    // Reset the global CONFIG to default after each test
    fn reset_config() {
        let default_config = AppConfig::default();
        let mut global_config = CONFIG.write().unwrap();
        *global_config = default_config;
    }

    #[test]
    fn test_load_no_file_uses_default_config() {
        setup();
        let config = load_config(None).unwrap();
        assert!(config.matching.case_insensitive);
        assert_eq!(config.completion.max_suggestions, 32);
        assert!(!config.permissions.administrator);
        assert_eq!(config.permissions.granted, vec!["console.math".to_string()]);
        assert_eq!(config.keybindings.complete, KeyCode::Tab);
        teardown();
    }

    #[test]
    fn test_load_custom_config_uses_custom_values() {
        setup();
        let temp_file = NamedTempFile::new().unwrap();
        let custom_config = r#"
        [matching]
        case_insensitive = false

        [permissions]
        administrator = true

        [keybindings]
        complete = { F = 2 }
        "#;
        fs::write(&temp_file, custom_config).unwrap();

        let config = load_config(Some(temp_file.path().to_str().unwrap().to_string())).unwrap();

        // Custom values should be used
        assert!(!config.matching.case_insensitive);
        assert!(config.permissions.administrator);
        assert_eq!(config.keybindings.complete, KeyCode::F(2));

        // Other values should be defaults
        assert_eq!(config.completion.max_suggestions, 32);
        assert_eq!(config.keybindings.execute, KeyCode::Enter);

        teardown();
    }

    #[test]
    fn test_invalid_config_loading_returns_err() {
        setup();

        let temp_file = NamedTempFile::new().unwrap();
        fs::write(&temp_file, "this is not valid TOML").unwrap();
        assert!(load_config(Some(temp_file.path().to_str().unwrap().to_string())).is_err());

        teardown();
    }
}
