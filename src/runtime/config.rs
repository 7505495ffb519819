use std::env;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::runtime::arity::MAX_ARITY;

pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 10_000;

const MAX_ARITY_VAR: &str = "SLOTH_MAX_ARITY";
const MAX_CHAIN_DEPTH_VAR: &str = "SLOTH_MAX_CHAIN_DEPTH";

/// Limits applied by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Largest callable arity accepted by application.
    pub max_arity: usize,
    /// Longest over-application chain before giving up.
    pub max_chain_depth: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_arity: MAX_ARITY,
            max_chain_depth: DEFAULT_MAX_CHAIN_DEPTH,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid runtime config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for {var}: {value:?}")]
    Env { var: &'static str, value: String },

    #[error("max_arity {max_arity} exceeds the supported maximum {limit}")]
    ArityTooLarge { max_arity: usize, limit: usize },

    #[error("max_chain_depth must be at least 1")]
    ZeroChainDepth,
}

impl RuntimeConfig {
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()
    }

    /// Reads `SLOTH_MAX_ARITY` and `SLOTH_MAX_CHAIN_DEPTH`, falling back to
    /// the defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(MAX_ARITY_VAR) {
            config.max_arity = parse_var(MAX_ARITY_VAR, value)?;
        }
        if let Some(value) = lookup(MAX_CHAIN_DEPTH_VAR) {
            config.max_chain_depth = parse_var(MAX_CHAIN_DEPTH_VAR, value)?;
        }
        config.validate()
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.max_arity > MAX_ARITY {
            return Err(ConfigError::ArityTooLarge {
                max_arity: self.max_arity,
                limit: MAX_ARITY,
            });
        }
        if self.max_chain_depth == 0 {
            return Err(ConfigError::ZeroChainDepth);
        }
        Ok(self)
    }
}

fn parse_var(var: &'static str, value: String) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Env { var, value })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.max_arity, 25);
        assert_eq!(config.max_chain_depth, DEFAULT_MAX_CHAIN_DEPTH);
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = RuntimeConfig::from_json(r#"{"max_chain_depth": 16}"#).unwrap();
        assert_eq!(config.max_arity, MAX_ARITY);
        assert_eq!(config.max_chain_depth, 16);
    }

    #[test]
    fn test_from_json_rejects_unknown_fields() {
        let err = RuntimeConfig::from_json(r#"{"max_depth": 16}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validate_limits() {
        let err = RuntimeConfig::from_json(r#"{"max_arity": 30}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ArityTooLarge {
                max_arity: 30,
                limit: 25
            }
        ));
        let err = RuntimeConfig::from_json(r#"{"max_chain_depth": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroChainDepth));
    }

    #[test]
    fn test_from_lookup_reads_variables() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("SLOTH_MAX_ARITY", "8"),
            ("SLOTH_MAX_CHAIN_DEPTH", " 32 "),
        ]))
        .unwrap();
        assert_eq!(config.max_arity, 8);
        assert_eq!(config.max_chain_depth, 32);
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let err = RuntimeConfig::from_lookup(lookup(&[("SLOTH_MAX_ARITY", "many")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value for SLOTH_MAX_ARITY: \"many\""
        );
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = RuntimeConfig {
            max_arity: 4,
            max_chain_depth: 9,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(RuntimeConfig::from_json(&json).unwrap(), config);
    }
}
