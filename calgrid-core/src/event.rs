//! Calendar event types.
//!
//! `CalendarEvent` is what the store owns. `NewEvent` and `EventUpdate` are the
//! payloads flowing in from the event form, and `EventDraft` is the partial
//! shape the validator inspects.

use std::fmt;

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Color used when the form has no explicit choice.
pub const DEFAULT_EVENT_COLOR: &str = "#3b82f6";

/// Palette offered by the event form, as (name, hex).
pub const EVENT_COLORS: [(&str, &str); 8] = [
    ("blue", "#3b82f6"),
    ("green", "#10b981"),
    ("amber", "#f59e0b"),
    ("red", "#ef4444"),
    ("violet", "#8b5cf6"),
    ("pink", "#ec4899"),
    ("cyan", "#06b6d4"),
    ("lime", "#84cc16"),
];

/// Resolve a palette name ("green") to its hex value. Anything else is
/// returned unchanged so custom colors pass through.
pub fn resolve_color(color: &str) -> String {
    EVENT_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(color.trim()))
        .map(|(_, hex)| hex.to_string())
        .unwrap_or_else(|| color.to_string())
}

/// Suggested categories as (value, label). Categories stay free-form.
pub const CATEGORY_PRESETS: [(&str, &str); 5] = [
    ("meeting", "Meeting"),
    ("personal", "Personal"),
    ("work", "Work"),
    ("travel", "Travel"),
    ("other", "Other"),
];

/// A calendar event owned by the event store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Local wall-clock start
    pub start: NaiveDateTime,
    /// Local wall-clock end, strictly after `start`
    pub end: NaiveDateTime,
    /// Display color, e.g. "#3b82f6"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CalendarEvent {
    /// Attach an id to a new event payload.
    pub fn from_new(id: String, new: NewEvent) -> Self {
        CalendarEvent {
            id,
            title: new.title,
            description: new.description,
            start: new.start,
            end: new.end,
            color: new.color,
            category: new.category,
        }
    }

    /// Merge the fields present in `update`, leaving the rest untouched.
    pub fn apply(&mut self, update: &EventUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(description) = &update.description {
            self.description = non_empty(description);
        }
        if let Some(start) = update.start {
            self.start = start;
        }
        if let Some(end) = update.end {
            self.end = end;
        }
        if let Some(color) = &update.color {
            self.color = non_empty(color);
        }
        if let Some(category) = &update.category {
            self.category = non_empty(category);
        }
    }

    /// Color to render with, falling back to the default palette entry.
    pub fn display_color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_EVENT_COLOR)
    }

    pub fn is_multi_day(&self) -> bool {
        self.start.date() != self.end.date()
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Everything needed to create an event, minus the id the store assigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl NewEvent {
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        NewEvent {
            title: title.into(),
            description: None,
            start,
            end,
            color: None,
            category: None,
        }
    }
}

/// Field-level partial update. `None` leaves the stored value unchanged;
/// an empty string clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl EventUpdate {
    pub fn is_empty(&self) -> bool {
        *self == EventUpdate::default()
    }
}

/// A possibly incomplete event, as inspected by the validator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl From<&NewEvent> for EventDraft {
    fn from(new: &NewEvent) -> Self {
        EventDraft {
            title: Some(new.title.clone()),
            description: new.description.clone(),
            start: Some(new.start),
            end: Some(new.end),
        }
    }
}

impl From<&CalendarEvent> for EventDraft {
    fn from(event: &CalendarEvent) -> Self {
        EventDraft {
            title: Some(event.title.clone()),
            description: event.description.clone(),
            start: Some(event.start),
            end: Some(event.end),
        }
    }
}

impl From<&EventUpdate> for EventDraft {
    fn from(update: &EventUpdate) -> Self {
        EventDraft {
            title: update.title.clone(),
            description: update.description.clone(),
            start: update.start,
            end: update.end,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Generate a session-unique event id: `evt-<unix millis>-<9 random chars>`.
pub fn generate_event_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(9).collect();
    format!("evt-{}-{}", millis, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn make_test_event() -> CalendarEvent {
        CalendarEvent {
            id: "evt-1".to_string(),
            title: "Standup".to_string(),
            description: Some("Daily sync".to_string()),
            start: at(15, 9, 0),
            end: at(15, 9, 30),
            color: Some("#10b981".to_string()),
            category: Some("work".to_string()),
        }
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut event = make_test_event();
        let before = event.clone();
        event.apply(&EventUpdate {
            title: Some("New".to_string()),
            ..Default::default()
        });

        assert_eq!(event.title, "New");
        assert_eq!(event.description, before.description);
        assert_eq!(event.start, before.start);
        assert_eq!(event.end, before.end);
        assert_eq!(event.color, before.color);
        assert_eq!(event.category, before.category);
    }

    #[test]
    fn empty_update_is_a_no_op() {
        let mut event = make_test_event();
        let update = EventUpdate::default();
        assert!(update.is_empty());
        event.apply(&update);
        assert_eq!(event, make_test_event());
    }

    #[test]
    fn empty_strings_clear_optional_fields() {
        let mut event = make_test_event();
        event.apply(&EventUpdate {
            description: Some(String::new()),
            category: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(event.description, None);
        assert_eq!(event.category, None);
        assert_eq!(event.color.as_deref(), Some("#10b981"));
    }

    #[test]
    fn display_color_falls_back_to_default() {
        let mut event = make_test_event();
        assert_eq!(event.display_color(), "#10b981");
        event.color = None;
        assert_eq!(event.display_color(), DEFAULT_EVENT_COLOR);
    }

    #[test]
    fn palette_names_resolve_to_hex() {
        assert_eq!(resolve_color("Green"), "#10b981");
        assert_eq!(resolve_color("#123456"), "#123456");
        assert_eq!(EVENT_COLORS[0].1, DEFAULT_EVENT_COLOR);
    }

    #[test]
    fn generated_ids_are_prefixed_and_distinct() {
        let a = generate_event_id();
        let b = generate_event_id();
        assert!(a.starts_with("evt-"));
        assert_eq!(a.rsplit('-').next().unwrap().len(), 9);
        assert_ne!(a, b);
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let json = r#"{"id":"e1","title":"Lunch","start":"2024-01-15T12:00:00","end":"2024-01-15T13:00:00"}"#;
        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.start, at(15, 12, 0));
        assert_eq!(event.description, None);
        assert!(!event.is_multi_day());

        let out = serde_json::to_string(&event).unwrap();
        assert!(!out.contains("description"));
    }
}
