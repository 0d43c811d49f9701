//! Core of the calgrid calendar widget.
//!
//! - `grid` and `format`: month/week date grids, time slots and labels
//! - `filter` and `validation`: bucketing events into days and slots, checking input
//! - `store`: the owned event list and its observer hooks
//! - `view`: visible period, selection and modal state
//! - `form` and `calendar`: the event form and the widget facade hosts drive

pub mod calendar;
pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod form;
pub mod format;
pub mod grid;
pub mod store;
pub mod validation;
pub mod view;

pub use calendar::Calendar;
pub use error::{CalGridError, CalGridResult};
pub use event::*;
