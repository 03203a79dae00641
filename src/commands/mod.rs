pub mod config;
pub mod extract;
pub mod ics;
pub mod links;
pub mod show;

/// How far recurring events are expanded when no `--until` is given (one term).
pub const TERM_DAYS: i64 = 16 * 7;
