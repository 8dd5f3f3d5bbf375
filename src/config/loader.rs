//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CarelineConfig;
use crate::domain::errors::CarelineError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CarelineConfig
/// 4. Applies environment variable overrides (CARELINE_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use careline::config::loader::load_config;
///
/// let config = load_config("careline.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CarelineConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CarelineError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CarelineError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: CarelineConfig = toml::from_str(&contents)
        .map_err(|e| CarelineError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        CarelineError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Loads a `.env` file (if present) and then the TOML configuration
///
/// Convenience wrapper around [`load_config`] for deployments that keep
/// secrets in a dotenv file next to the binary. A missing `.env` file is
/// not an error.
///
/// # Errors
///
/// Same conditions as [`load_config`].
pub fn load_config_with_dotenv(path: impl AsRef<Path>) -> Result<CarelineConfig> {
    if dotenvy::dotenv().is_ok() {
        tracing::debug!("Loaded environment from .env file");
    }
    load_config(path)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CarelineError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the CARELINE_* prefix
///
/// Environment variables follow the pattern: CARELINE_<SECTION>_<KEY>
/// For example: CARELINE_API_BASE_URL, CARELINE_SYNC_INTERVAL_SECONDS
fn apply_env_overrides(config: &mut CarelineConfig) {
    if let Ok(val) = std::env::var("CARELINE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("CARELINE_API_BASE_URL") {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("CARELINE_API_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.api.timeout_seconds = timeout;
        }
    }

    if let Ok(val) = std::env::var("CARELINE_SYNC_INTERVAL_SECONDS") {
        if let Ok(interval) = val.parse() {
            config.sync.interval_seconds = interval;
        }
    }

    if let Ok(val) = std::env::var("CARELINE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CARELINE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("CARELINE_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}
