//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CurveQueryConfig;
use super::secret::api_key;
use crate::domain::errors::CurveQueryError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

/// Prefix of every environment override
pub const ENV_PREFIX: &str = "CURVEQUERY";

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern is a valid regex")
    })
}

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Substitutes `${VAR}` placeholders from the environment
/// 3. Parses the TOML into [`CurveQueryConfig`]
/// 4. Applies `CURVEQUERY_<SECTION>_<KEY>` overrides
/// 5. Validates the result
///
/// # Errors
///
/// Returns [`CurveQueryError::Configuration`] if any step fails
///
/// # Examples
///
/// ```no_run
/// use curvequery::config::load_config;
///
/// let config = load_config("curvequery.toml").expect("Failed to load config");
/// println!("{}", config.service.base_url);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CurveQueryConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CurveQueryError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CurveQueryError::Configuration(format!(
            "Failed to read configuration file {}: {e}",
            path.display()
        ))
    })?;

    load_config_from_str(&contents, |name| std::env::var(name).ok())
}

/// Loads configuration from TOML text with an explicit variable lookup
///
/// `lookup` resolves both `${VAR}` placeholders and overrides, which keeps
/// tests independent of the process environment.
///
/// # Errors
///
/// Returns [`CurveQueryError::Configuration`] on missing variables, malformed
/// TOML, unparsable overrides or failed validation
pub fn load_config_from_str<F>(contents: &str, lookup: F) -> Result<CurveQueryConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let contents = substitute_env_vars(contents, &lookup)?;

    let mut config: CurveQueryConfig = toml::from_str(&contents)
        .map_err(|e| CurveQueryError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config, &lookup)?;

    config.validate().map_err(|e| {
        CurveQueryError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Replaces `${VAR_NAME}` placeholders outside comment lines
fn substitute_env_vars<F>(input: &str, lookup: &F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let re = placeholder_pattern();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match lookup(var_name) {
                Some(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                None => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CurveQueryError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_override<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let name = format!("{ENV_PREFIX}_{key}");
    match lookup(&name) {
        None => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
            CurveQueryError::Configuration(format!("Invalid value '{raw}' for {name}"))
        }),
    }
}

/// Applies `CURVEQUERY_<SECTION>_<KEY>` overrides
fn apply_env_overrides<F>(config: &mut CurveQueryConfig, lookup: &F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = parse_override(lookup, "APPLICATION_LOG_LEVEL")? {
        config.application.log_level = val;
    }

    if let Some(val) = parse_override(lookup, "SERVICE_BASE_URL")? {
        config.service.base_url = val;
    }
    if let Some(val) = parse_override::<String, _>(lookup, "SERVICE_API_KEY")? {
        config.service.api_key = Some(api_key(val));
    }
    if let Some(val) = parse_override(lookup, "SERVICE_TIMEOUT_SECONDS")? {
        config.service.timeout_seconds = val;
    }
    if let Some(val) = parse_override(lookup, "SERVICE_RETRY_MAX_RETRIES")? {
        config.service.retry.max_retries = val;
    }
    if let Some(val) = parse_override(lookup, "SERVICE_RETRY_INITIAL_DELAY_MS")? {
        config.service.retry.initial_delay_ms = val;
    }
    if let Some(val) = parse_override(lookup, "SERVICE_RETRY_MAX_DELAY_MS")? {
        config.service.retry.max_delay_ms = val;
    }

    if let Some(val) = parse_override(lookup, "QUERY_PARTITION_SIZE")? {
        config.query.partition_size = val;
    }

    if let Some(val) = parse_override(lookup, "LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = val;
    }
    if let Some(val) = parse_override(lookup, "LOGGING_LOCAL_PATH")? {
        config.logging.local_path = val;
    }
    if let Some(val) = parse_override(lookup, "LOGGING_LOCAL_ROTATION")? {
        config.logging.local_rotation = val;
    }

    Ok(())
}
