//! Global calgrid configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CalGridError, CalGridResult};
use crate::grid::WeekStart;
use crate::view::CalendarView;

const DEFAULT_SLOT_INTERVAL_MINUTES: u32 = 60;

fn default_slot_interval() -> u32 {
    DEFAULT_SLOT_INTERVAL_MINUTES
}

fn is_default_slot_interval(minutes: &u32) -> bool {
    *minutes == DEFAULT_SLOT_INTERVAL_MINUTES
}

/// Configuration at ~/.config/calgrid/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CalgridConfig {
    #[serde(default)]
    pub week_start: WeekStart,

    #[serde(
        default = "default_slot_interval",
        skip_serializing_if = "is_default_slot_interval"
    )]
    pub slot_interval_minutes: u32,

    #[serde(default)]
    pub default_view: CalendarView,

    /// JSON file with the initial events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_file: Option<PathBuf>,
}

impl Default for CalgridConfig {
    fn default() -> Self {
        CalgridConfig {
            week_start: WeekStart::default(),
            slot_interval_minutes: DEFAULT_SLOT_INTERVAL_MINUTES,
            default_view: CalendarView::default(),
            events_file: None,
        }
    }
}

impl CalgridConfig {
    pub fn config_path() -> CalGridResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalGridError::Config("Could not determine config directory".into()))?
            .join("calgrid");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, falling back to defaults if absent.
    pub fn load() -> CalGridResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> CalGridResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CalGridError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> CalGridResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| CalGridError::Serialization(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| CalGridError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalGridResult<()> {
        let contents = format!(
            "\
# calgrid configuration

# First day of the week (\"sunday\" or \"monday\"):
# week_start = \"sunday\"

# Week view slot length in minutes, must divide 60:
# slot_interval_minutes = {}

# View shown when none is given (\"month\" or \"week\"):
# default_view = \"month\"

# JSON file holding the initial events:
# events_file = \"~/calendar/events.json\"
",
            DEFAULT_SLOT_INTERVAL_MINUTES
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalGridError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalGridError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
