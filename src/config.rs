use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tree::RenderOptions;

/// Widest ancestor column accepted for rendering
const MAX_INDENT_WIDTH: usize = 8;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderOptions,
}

impl Config {
    /// Parse and validate a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;

        tracing::debug!(?config, "Loaded configuration");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let width = self.render.indent_width;
        if width == 0 || width > MAX_INDENT_WIDTH {
            return Err(ConfigError::Invalid(format!(
                "render.indent_width must be 1-{MAX_INDENT_WIDTH}, got {width}"
            )));
        }
        Ok(())
    }
}
