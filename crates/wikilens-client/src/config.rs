use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for wikilens.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (WIKILENS_* prefix)
/// 3. Config file (~/.config/wikilens/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Language for search matching and result labels.
    ///
    /// Can be set via:
    /// - CLI: --lang de
    /// - ENV: WIKILENS_LANGUAGE
    /// - Config: language = "de"
    #[serde(default = "default_language")]
    pub language: String,

    /// Maximum number of search results.
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,

    /// Action API endpoint used for `wbsearchentities`.
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,

    /// Base URL of `Special:EntityData`.
    #[serde(default = "default_entity_data_endpoint")]
    pub entity_data_endpoint: String,

    /// User agent sent with every request. Wikimedia asks for a contact URL.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Client-side request rate.
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    /// Retries for transient failures (5xx, 429, timeouts).
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Logging options handed to twyg.
    #[serde(default)]
    pub logging: twyg::Opts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            search_limit: default_search_limit(),
            api_endpoint: default_api_endpoint(),
            entity_data_endpoint: default_entity_data_endpoint(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            requests_per_second: default_requests_per_second(),
            max_retries: default_max_retries(),
            logging: twyg::Opts::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/wikilens/config.toml
    /// Reads environment variables with WIKILENS_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("wikilens");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        log::debug!("Loaded configuration (language: {})", config.language);
        Ok(config)
    }

    /// Load configuration, overriding the language when the `--lang` CLI
    /// flag is provided.
    pub fn load_with_language(language: Option<String>) -> Result<Self> {
        let mut config = Self::load()?;
        if let Some(language) = language {
            config.language = language;
        }
        Ok(config)
    }
}

fn default_language() -> String {
    "en".to_string()
}

const fn default_search_limit() -> u32 {
    10
}

fn default_api_endpoint() -> String {
    "https://www.wikidata.org/w/api.php".to_string()
}

fn default_entity_data_endpoint() -> String {
    "https://www.wikidata.org/wiki/Special:EntityData".to_string()
}

fn default_user_agent() -> String {
    format!(
        "wikilens/{} (https://github.com/oxur/wikilens)",
        env!("CARGO_PKG_VERSION")
    )
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_requests_per_second() -> u32 {
    5
}

const fn default_max_retries() -> usize {
    3
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/wikilens/config.toml
/// - macOS: ~/Library/Application Support/wikilens/config.toml
/// - Windows: %APPDATA%\wikilens\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wikilens")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# wikilens Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (WIKILENS_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Language used to match search terms and to pick labels
#
# Can also be set via:
# - CLI: wikilens search --lang de Berlin
# - Environment: WIKILENS_LANGUAGE=de
language = "en"

# Maximum number of search results
search_limit = 10

# Wikidata endpoints; point these at a mirror if you run one
#api_endpoint = "https://www.wikidata.org/w/api.php"
#entity_data_endpoint = "https://www.wikidata.org/wiki/Special:EntityData"

# Request behaviour
timeout_secs = 30
requests_per_second = 5
max_retries = 3

# Logging
[logging]
coloured = true
level = "info"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.language, "en");
        assert_eq!(config.search_limit, 10);
        assert_eq!(config.max_retries, 3);
        assert!(config.user_agent.starts_with("wikilens/"));
        assert!(config.entity_data_endpoint.ends_with("Special:EntityData"));
    }

    #[test]
    fn test_config_load() {
        // Should not fail even if config file doesn't exist
        let result = Config::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_with_language_override() {
        let config = Config::load_with_language(Some("de".to_string()));
        assert!(config.is_ok());
        assert_eq!(config.unwrap().language, "de");
    }

    #[test]
    fn test_config_path_is_under_wikilens() {
        let path = config_file_path();
        assert!(path.ends_with("wikilens/config.toml"));
    }

    #[test]
    fn test_example_config_mentions_every_setting() {
        let example = example_config();
        for key in [
            "language",
            "search_limit",
            "api_endpoint",
            "entity_data_endpoint",
            "timeout_secs",
            "requests_per_second",
            "max_retries",
            "[logging]",
        ] {
            assert!(example.contains(key), "missing {key}");
        }
    }
}
