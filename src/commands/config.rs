use std::path::PathBuf;

use anyhow::Result;
use calgrid_core::config::CalgridConfig;
use calgrid_core::grid::{WeekStart, time_slots};
use calgrid_core::view::CalendarView;
use owo_colors::OwoColorize;

/// Settings to save into the config file.
#[derive(Default)]
pub struct ConfigChanges {
    pub week_start: Option<WeekStart>,
    pub default_view: Option<CalendarView>,
    pub slot_interval_minutes: Option<u32>,
    pub events_file: Option<PathBuf>,
}

impl ConfigChanges {
    fn is_empty(&self) -> bool {
        self.week_start.is_none()
            && self.default_view.is_none()
            && self.slot_interval_minutes.is_none()
            && self.events_file.is_none()
    }

    fn apply(self, config: &mut CalgridConfig) -> Result<()> {
        if let Some(minutes) = self.slot_interval_minutes {
            time_slots(minutes)?;
            config.slot_interval_minutes = minutes;
        }
        if let Some(week_start) = self.week_start {
            config.week_start = week_start;
        }
        if let Some(view) = self.default_view {
            config.default_view = view;
        }
        if let Some(path) = self.events_file {
            config.events_file = Some(path);
        }
        Ok(())
    }
}

pub fn run(changes: ConfigChanges) -> Result<()> {
    let config_path = CalgridConfig::config_path()?;

    if !config_path.exists() {
        CalgridConfig::create_default_config(&config_path)?;
        println!("{}", format!("Created {}", config_path.display()).green());
    }

    let mut config = CalgridConfig::load_from(&config_path)?;

    if !changes.is_empty() {
        changes.apply(&mut config)?;
        config.save_to(&config_path)?;
        println!("{}", format!("Saved {}", config_path.display()).green());
    }

    println!("{}", "Paths".bold());
    println!("  Config:      {}", config_path.display());
    println!(
        "  Events:      {}",
        config
            .events_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    );

    println!("{}", "Settings".bold());
    println!("  Week start:  {:?}", config.week_start);
    println!("  Slot length: {} min", config.slot_interval_minutes);
    println!("  View:        {}", config.default_view);

    Ok(())
}
