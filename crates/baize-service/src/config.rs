use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Configuration for the league service boundary.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Serve standings and match history to anonymous callers.
    pub allow_anonymous_read: bool,
    /// Upper bound on rows per import batch. 0 disables the limit.
    pub max_import_batch: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            allow_anonymous_read: true,
            max_import_batch: 1000,
        }
    }
}

impl ServiceConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ServiceError> {
        toml::from_str(text).map_err(|e| ServiceError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServiceConfig::default();
        assert!(config.allow_anonymous_read);
        assert_eq!(config.max_import_batch, 1000);
    }

    #[test]
    fn parses_partial_toml_over_defaults() {
        let config = ServiceConfig::from_toml_str("allow_anonymous_read = false").unwrap();
        assert!(!config.allow_anonymous_read);
        assert_eq!(config.max_import_batch, 1000);
    }

    #[test]
    fn rejects_malformed_toml() {
        let error = ServiceConfig::from_toml_str("max_import_batch = \"many\"").unwrap_err();
        assert!(matches!(error, ServiceError::Config(_)));
    }
}
