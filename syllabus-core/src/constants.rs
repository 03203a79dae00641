//! Shared limits and literal defaults.

/// Maximum number of characters kept in an event title.
pub const MAX_TITLE_CHARS: usize = 100;

/// Maximum number of characters kept in an event description.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Duration given to a timed event when only its start time is known.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

/// Title used when an event is added without one.
pub const DEFAULT_TITLE: &str = "Untitled Event";

/// PRODID written into generated calendars.
pub const DEFAULT_PRODUCT_ID: &str = "-//Syllabus Calendar Converter//EN";

/// Domain appended to event ids to form ICS UIDs.
pub const DEFAULT_UID_DOMAIN: &str = "syllabus-converter.com";

/// File name used when a calendar is written without an explicit path.
pub const DEFAULT_OUTPUT_FILE: &str = "syllabus-calendar.ics";
