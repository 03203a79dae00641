//! iCalendar (RFC 5545) reading and writing.
//!
//! Output is written line by line rather than through a component model so
//! property order and escaping are exact. Input goes through the icalendar
//! parser.

mod escape;
mod generate;
mod parse;

pub use escape::{escape, unescape};
pub use generate::generate_calendar;
pub use parse::parse_calendar;
