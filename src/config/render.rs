//! Render configuration module.
//!
//! Controls how trees are printed by the command-line front end.

use super::{ConfigResult, Validate};
use crate::data_structures::RenderOptions;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Largest accepted indentation step.
const MAX_INDENT: usize = 16;

/// Render configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    /// Spaces added per level of depth
    pub indent: usize,

    /// Optional line printed above the rendered keys
    pub header: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            header: None,
        }
    }
}

impl Validate for RenderConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.indent == 0 || self.indent > MAX_INDENT {
            return Err(ConfigError::ValueOutOfRange {
                key: "render.indent".to_string(),
                message: format!("must be between 1 and {MAX_INDENT}, got {}", self.indent),
            });
        }

        if let Some(header) = &self.header {
            if header.contains('\n') {
                return Err(ConfigError::ValidationError(
                    "render.header must be a single line".to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        Self {
            indent: config.indent,
            header: config.header.clone(),
        }
    }
}
