use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_API_BASE: &str = "http://localhost:5000";
pub const DEFAULT_STATE_PATH: &str = "./.sma/session.json";
pub const DEFAULT_USER_AGENT: &str = "sma-cli/0.1 (sentiment-client)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Check that a service address uses the http or https scheme. `source`
/// names where the value came from (an env var or a CLI flag).
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] naming `source` otherwise.
pub fn validate_api_base(source: &str, api_base: &str) -> Result<(), ConfigError> {
    if api_base.starts_with("http://") || api_base.starts_with("https://") {
        return Ok(());
    }
    Err(ConfigError::InvalidEnvVar {
        var: source.to_string(),
        reason: format!("'{api_base}' must start with http:// or https://"),
    })
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let api_base = or_default("SMA_API_BASE", DEFAULT_API_BASE);
    validate_api_base("SMA_API_BASE", &api_base)?;

    let state_path = PathBuf::from(or_default("SMA_STATE_PATH", DEFAULT_STATE_PATH));
    let log_level = or_default("SMA_LOG_LEVEL", "warn");
    let request_timeout_secs = parse_u64("SMA_REQUEST_TIMEOUT_SECS", "120")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SMA_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("SMA_USER_AGENT", DEFAULT_USER_AGENT);
    let export_dir = PathBuf::from(or_default("SMA_EXPORT_DIR", "."));

    Ok(AppConfig {
        api_base,
        state_path,
        log_level,
        request_timeout_secs,
        user_agent,
        export_dir,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_uses_defaults_when_env_is_empty() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.api_base, "http://localhost:5000");
        assert_eq!(cfg.state_path, PathBuf::from("./.sma/session.json"));
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.request_timeout_secs, 120);
        assert_eq!(cfg.user_agent, "sma-cli/0.1 (sentiment-client)");
        assert_eq!(cfg.export_dir, PathBuf::from("."));
    }

    #[test]
    fn build_app_config_reads_overrides() {
        let mut map = HashMap::new();
        map.insert("SMA_API_BASE", "https://sma.example.com/");
        map.insert("SMA_STATE_PATH", "/tmp/sma/state.json");
        map.insert("SMA_LOG_LEVEL", "debug");
        map.insert("SMA_REQUEST_TIMEOUT_SECS", "15");
        map.insert("SMA_USER_AGENT", "custom-agent/2.0");
        map.insert("SMA_EXPORT_DIR", "/tmp/exports");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.api_base, "https://sma.example.com/");
        assert_eq!(cfg.state_path, PathBuf::from("/tmp/sma/state.json"));
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.request_timeout_secs, 15);
        assert_eq!(cfg.user_agent, "custom-agent/2.0");
        assert_eq!(cfg.export_dir, PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let mut map = HashMap::new();
        map.insert("SMA_API_BASE", "   ");
        map.insert("SMA_REQUEST_TIMEOUT_SECS", "");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.api_base, "http://localhost:5000");
        assert_eq!(cfg.request_timeout_secs, 120);
    }

    #[test]
    fn build_app_config_fails_with_invalid_timeout() {
        let mut map = HashMap::new();
        map.insert("SMA_REQUEST_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SMA_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(SMA_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_zero_timeout() {
        let mut map = HashMap::new();
        map.insert("SMA_REQUEST_TIMEOUT_SECS", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SMA_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(SMA_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_non_http_api_base() {
        let mut map = HashMap::new();
        map.insert("SMA_API_BASE", "localhost:5000");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SMA_API_BASE"),
            "expected InvalidEnvVar(SMA_API_BASE), got: {result:?}"
        );
    }

    #[test]
    fn validate_api_base_names_the_source() {
        assert!(validate_api_base("--api-base", "https://sma.example.com").is_ok());
        let err = validate_api_base("--api-base", "ftp://sma.example.com").unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "--api-base"),
            "unexpected error: {err:?}"
        );
    }
}
