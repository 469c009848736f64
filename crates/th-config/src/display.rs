use serde::{Deserialize, Serialize};

const fn default_color() -> bool {
    true
}

/// Terminal rendering preferences.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Color tag columns in table output when stdout is a terminal.
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}
