//! Bridge-wide configuration.
//!
//! Adapter-specific settings travel in the configuration struct of each
//! builder. This struct only carries what is shared by all of them.

use crate::types::AwsRegion;

/// Global configuration for the bridge.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BridgeConfig {
    /// Region used by adapters that do not configure one.
    pub default_region: AwsRegion,
    /// Log filter directive.
    pub log_level: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            default_region: AwsRegion::default(),
            log_level: "info".to_owned(),
        }
    }
}

impl BridgeConfig {
    /// Load configuration from environment variables.
    ///
    /// `AWS_REGION` wins over `AWS_DEFAULT_REGION`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("AWS_REGION").or_else(|| lookup("AWS_DEFAULT_REGION")) {
            config.default_region = AwsRegion::new(v);
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }
}
