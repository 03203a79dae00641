//! Syllabus text to calendar events.
//!
//! Two halves:
//! - `extract` turns free-form syllabus text into `EventDraft`s using fixed
//!   date/time/keyword/location/recurrence pattern tables
//! - `calendar` collects finalized `Event`s and renders them as an ICS
//!   document (`ics`) or as provider deep links (`links`)

pub mod calendar;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod extract;
pub mod ics;
pub mod links;
pub mod recurrence;
pub mod zone;

pub use calendar::{Calendar, CalendarOptions};
pub use error::{SyllabusError, SyllabusResult};
pub use event::{Event, EventDraft};
pub use extract::parse;
pub use links::Provider;
