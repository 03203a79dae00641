//! Collapsing of repeated detections.

use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::event::EventDraft;

/// Two drafts are duplicates when they share a title and a start time.
/// End time and location are not part of the key.
fn dedup_key(draft: &EventDraft) -> (Option<String>, NaiveDateTime) {
    (draft.title.clone(), draft.start)
}

/// Drop every draft whose key was already seen, keeping first occurrences in
/// their original order.
pub fn dedup_events(drafts: Vec<EventDraft>) -> Vec<EventDraft> {
    let mut seen = HashSet::new();
    drafts
        .into_iter()
        .filter(|draft| seen.insert(dedup_key(draft)))
        .collect()
}
