use serde::Deserialize;
use std::collections::HashMap;

/// Default: persistence file name, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "tasks.dat";

/// Configuration from cadence.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path of the task data file, relative to the working directory
    #[serde(default = "default_data_file")]
    pub data_file: String,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_file: default_data_file(),
            ui: UiConfig::default(),
        }
    }
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UiConfig {
    /// Hex color overrides keyed by theme slot (e.g. `highlight = "#FB4196"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
