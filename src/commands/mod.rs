pub mod check;
pub mod config;
pub mod day;
pub mod delete;
pub mod edit;
pub mod month;
pub mod new;
pub mod week;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use calgrid_core::config::CalgridConfig;
use calgrid_core::grid::WeekStart;
use calgrid_core::store::EventObserver;
use calgrid_core::view::CalendarView;
use calgrid_core::{Calendar, CalendarEvent};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Settings shared by every command: config merged with global flags.
pub struct Context {
    pub config: CalgridConfig,
    pub events_file: Option<PathBuf>,
    pub week_start: WeekStart,
}

impl Context {
    pub fn new(
        config: CalgridConfig,
        events_flag: Option<PathBuf>,
        week_start_flag: Option<WeekStart>,
    ) -> Self {
        let events_file = events_flag.or_else(|| config.events_file.clone());
        let week_start = week_start_flag.unwrap_or(config.week_start);
        Context {
            config,
            events_file,
            week_start,
        }
    }

    pub fn load_events(&self) -> Result<Vec<CalendarEvent>> {
        match &self.events_file {
            Some(path) => load_events(&expand_path(path)),
            None => Ok(Vec::new()),
        }
    }

    /// Build the widget anchored on `date` with the events file loaded.
    pub fn calendar(
        &self,
        view: CalendarView,
        date: NaiveDate,
        observer: impl EventObserver + 'static,
    ) -> Result<Calendar> {
        Ok(Calendar::new(
            self.load_events()?,
            view,
            date.and_time(NaiveTime::MIN),
            observer,
            self.week_start,
        ))
    }
}

/// Read initial events from a JSON array. A missing file means no events.
pub fn load_events(path: &Path) -> Result<Vec<CalendarEvent>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "events file not found, starting empty");
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let events: Vec<CalendarEvent> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse events from {}", path.display()))?;

    tracing::debug!(count = events.len(), path = %path.display(), "loaded events");
    Ok(events)
}

fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&raw).into_owned())
}

/// Parse YYYY-MM-DD, defaulting to today.
pub fn resolve_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}'. Expected YYYY-MM-DD", s)),
        None => Ok(Local::now().date_naive()),
    }
}

/// Parse "YYYY-MM-DD HH:MM" or "YYYY-MM-DDTHH:MM".
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .with_context(|| format!("Invalid date/time '{}'. Expected YYYY-MM-DD HH:MM", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_events(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("events.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn flags_override_config() {
        let config = CalgridConfig {
            events_file: Some(PathBuf::from("from-config.json")),
            week_start: WeekStart::Monday,
            ..Default::default()
        };

        let ctx = Context::new(config.clone(), None, None);
        assert_eq!(ctx.events_file, Some(PathBuf::from("from-config.json")));
        assert_eq!(ctx.week_start, WeekStart::Monday);

        let ctx = Context::new(
            config,
            Some(PathBuf::from("flag.json")),
            Some(WeekStart::Sunday),
        );
        assert_eq!(ctx.events_file, Some(PathBuf::from("flag.json")));
        assert_eq!(ctx.week_start, WeekStart::Sunday);
    }

    #[test]
    fn loads_events_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_events(
            dir.path(),
            r#"[{"id":"e1","title":"Standup","start":"2024-01-15T09:00:00","end":"2024-01-15T09:30:00"}]"#,
        );

        let events = load_events(&path).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Standup");
    }

    #[test]
    fn missing_events_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_events(&dir.path().join("nope.json")).unwrap().is_empty());
    }

    #[test]
    fn malformed_events_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_events(dir.path(), "{not json");
        let err = load_events(&path).unwrap_err();
        assert!(err.to_string().contains("events.json"));
    }

    #[test]
    fn parses_dates_and_times() {
        assert_eq!(
            resolve_date(Some("2024-01-15")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert!(resolve_date(Some("15/01/2024")).is_err());
        assert_eq!(resolve_date(None).unwrap(), Local::now().date_naive());

        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(parse_datetime("2024-01-15 09:30").unwrap(), expected);
        assert_eq!(parse_datetime("2024-01-15T09:30").unwrap(), expected);
        assert!(parse_datetime("tomorrow").is_err());
    }
}
