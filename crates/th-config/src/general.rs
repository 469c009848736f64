//! General application configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_page_size() -> usize {
    10
}

const fn default_max_page_size() -> usize {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct GeneralConfig {
    /// Rows per page for list commands.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Upper bound accepted for `page_size`, including `--page-size` overrides.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl GeneralConfig {
    /// Reject a zero page size or one above `max_page_size`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming `general.page_size`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.check_page_size(self.page_size)
    }

    /// Validate a page size against this config's bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when `size` is zero or too large.
    pub fn check_page_size(&self, size: usize) -> Result<(), ConfigError> {
        if size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.page_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        if size > self.max_page_size {
            return Err(ConfigError::InvalidValue {
                field: "general.page_size".into(),
                reason: format!("{size} exceeds max_page_size {}", self.max_page_size),
            });
        }
        Ok(())
    }
}
