//! Event validation.
//!
//! Messages are meant to be shown to the user verbatim, so they are plain
//! sentences rather than codes. Every applicable check runs; nothing
//! short-circuits.

use crate::event::{EventDraft, EventUpdate};

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;

pub const TITLE_REQUIRED: &str = "Title is required";
pub const TITLE_TOO_LONG: &str = "Title must be less than 100 characters";
pub const DESCRIPTION_TOO_LONG: &str = "Description must be less than 500 characters";
pub const DATES_REQUIRED: &str = "Start and end dates are required";
pub const END_BEFORE_START: &str = "End date must be after start date";

/// Validate a (possibly partial) event. An empty result means valid.
pub fn validate(draft: &EventDraft) -> Vec<String> {
    let mut errors = Vec::new();

    if draft.title.as_deref().is_none_or(|t| t.trim().is_empty()) {
        errors.push(TITLE_REQUIRED.to_string());
    }

    check_lengths(draft, &mut errors);

    if draft.start.is_none() || draft.end.is_none() {
        errors.push(DATES_REQUIRED.to_string());
    }

    check_ordering(draft, &mut errors);

    errors
}

/// Validate only the fields an update carries.
///
/// Absent fields are left alone by the merge, so they are not required here.
pub fn validate_update(update: &EventUpdate) -> Vec<String> {
    let draft = EventDraft::from(update);
    let mut errors = Vec::new();

    if draft.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        errors.push(TITLE_REQUIRED.to_string());
    }

    check_lengths(&draft, &mut errors);
    check_ordering(&draft, &mut errors);

    errors
}

fn check_lengths(draft: &EventDraft, errors: &mut Vec<String>) {
    if let Some(title) = &draft.title {
        if title.chars().count() > MAX_TITLE_LEN {
            errors.push(TITLE_TOO_LONG.to_string());
        }
    }

    if let Some(description) = &draft.description {
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            errors.push(DESCRIPTION_TOO_LONG.to_string());
        }
    }
}

fn check_ordering(draft: &EventDraft, errors: &mut Vec<String>) {
    if let (Some(start), Some(end)) = (draft.start, draft.end) {
        if end <= start {
            errors.push(END_BEFORE_START.to_string());
        }
    }
}
