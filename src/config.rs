use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::ConfigError;

pub const BIND_VAR: &str = "SIKLUS_BIND";
pub const MODEL_PATH_VAR: &str = "SIKLUS_MODEL_PATH";

pub const DEFAULT_BIND: &str = "0.0.0.0:5000";
pub const DEFAULT_MODEL_PATH: &str = "model/xgb_model.json";

/// Server settings, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr:  SocketAddr,
    pub model_path: PathBuf,
}

impl AppConfig {
    /// Reads `SIKLUS_BIND` and `SIKLUS_MODEL_PATH`, falling back to defaults.
    pub fn from_env() -> Result<AppConfig, ConfigError> {
        AppConfig::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys use defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<AppConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = lookup(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_owned());
        let bind_addr = bind
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::BindAddr { var: BIND_VAR, value: bind.clone() })?;

        let model_path = match lookup(MODEL_PATH_VAR) {
            Some(p) if p.trim().is_empty() => return Err(ConfigError::Empty { var: MODEL_PATH_VAR }),
            Some(p) => PathBuf::from(p.trim()),
            None    => PathBuf::from(DEFAULT_MODEL_PATH),
        };

        Ok(AppConfig { bind_addr, model_path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:5000".parse().unwrap());
        assert_eq!(cfg.model_path, PathBuf::from("model/xgb_model.json"));
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = AppConfig::from_lookup(lookup(&[
            (BIND_VAR, "127.0.0.1:8080"),
            (MODEL_PATH_VAR, " /srv/models/xgb.json "),
        ]))
        .unwrap();
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert_eq!(cfg.model_path, PathBuf::from("/srv/models/xgb.json"));
    }

    #[test]
    fn bad_values_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[(BIND_VAR, "localhost")])).unwrap_err();
        assert_eq!(err, ConfigError::BindAddr { var: BIND_VAR, value: "localhost".into() });

        let err = AppConfig::from_lookup(lookup(&[(MODEL_PATH_VAR, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Empty { var: MODEL_PATH_VAR });
    }
}
