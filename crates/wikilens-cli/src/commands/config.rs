use anyhow::{Context, Result};
use wikilens_client::{config, Config};

const VALID_KEYS: &str = "language, search_limit, api_endpoint, entity_data_endpoint, \
user_agent, timeout_secs, requests_per_second, max_retries";

/// Show the current effective configuration.
pub fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    for key in VALID_KEYS.split(", ") {
        if let Some(value) = config_value(&config, key) {
            println!("  {key}: {value}");
        }
    }
    println!("  logging.level: {:?}", config.logging.level());
    println!("  logging.coloured: {}", config.logging.coloured());
    println!("  logging.output: {:?}", config.logging.output());

    println!("\nPriority: CLI args > ENV vars (WIKILENS_*) > Config file > Defaults");

    Ok(())
}

/// Get a specific config value, or print the whole config file.
pub fn get_config(key: Option<String>) -> Result<()> {
    if let Some(key) = key {
        let config = Config::load()?;
        match config_value(&config, &key) {
            Some(value) => println!("{value}"),
            None => anyhow::bail!("Unknown config key: {}\n\nValid keys: {}", key, VALID_KEYS),
        }
    } else {
        let config_path = config::config_file_path();

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).context("Failed to read config file")?;
            print!("{}", contents);
        } else {
            println!("Config file does not exist: {}", config_path.display());
            println!("\nRun 'wikilens config init' to create it.");
        }
    }

    Ok(())
}

/// The display value of `key`, or `None` for an unknown key.
pub fn config_value(config: &Config, key: &str) -> Option<String> {
    let value = match key {
        "language" => config.language.clone(),
        "search_limit" => config.search_limit.to_string(),
        "api_endpoint" => config.api_endpoint.clone(),
        "entity_data_endpoint" => config.entity_data_endpoint.clone(),
        "user_agent" => config.user_agent.clone(),
        "timeout_secs" => config.timeout_secs.to_string(),
        "requests_per_second" => config.requests_per_second.to_string(),
        "max_retries" => config.max_retries.to_string(),
        _ => return None,
    };
    Some(value)
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure wikilens.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_valid_key_has_a_value() {
        let config = Config::default();
        for key in VALID_KEYS.split(", ") {
            assert!(config_value(&config, key).is_some(), "no value for {key}");
        }
    }

    #[test]
    fn test_config_value_formats_numbers() {
        let config = Config::default();
        assert_eq!(config_value(&config, "search_limit").as_deref(), Some("10"));
        assert_eq!(config_value(&config, "language").as_deref(), Some("en"));
    }

    #[test]
    fn test_unknown_key() {
        assert!(config_value(&Config::default(), "database_path").is_none());
    }
}
