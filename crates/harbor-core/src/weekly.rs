//! Weekly update staleness tracking.
//!
//! During review mode each weekly update field is checked against a 7-day
//! window; a field never written, or last written 7 or more whole days ago,
//! needs attention. Writing a field always stamps its timestamp together
//! with the text.

use jiff::Timestamp;

use crate::models::{FieldKey, WeeklyUpdate, WeeklyUpdates};

/// Days after which an unwritten field goes stale.
const STALE_AFTER_DAYS: i64 = 7;

/// Whether a field needs attention at a weekly review.
///
/// `true` when the field has never been written, or when at least
/// [`STALE_AFTER_DAYS`] whole days have passed since the last write.
/// Applies to every field independently; whether the field gates the review
/// is [`FieldKey::required`]'s concern, not this one's.
pub fn needs_attention(field: &WeeklyUpdate, now: Timestamp) -> bool {
    match field.last_updated_at {
        None => true,
        Some(written) => {
            let elapsed_days = (now.as_second() - written.as_second()) / (24 * 60 * 60);
            elapsed_days >= STALE_AFTER_DAYS
        }
    }
}

/// Write a field's text, stamping its freshness timestamp atomically.
///
/// Returns the full replacement map for the aggregate (text and timestamp
/// never update independently).
pub fn write(fields: &WeeklyUpdates, key: FieldKey, text: &str, now: Timestamp) -> WeeklyUpdates {
    let mut next = fields.clone();
    next.insert(
        key,
        WeeklyUpdate {
            text: text.to_string(),
            last_updated_at: Some(now),
        },
    );
    next
}

/// The fields needing attention right now, in display order.
pub fn stale_fields(fields: &WeeklyUpdates, now: Timestamp) -> Vec<FieldKey> {
    FieldKey::all()
        .into_iter()
        .filter(|key| {
            fields
                .get(key)
                .map_or(true, |field| needs_attention(field, now))
        })
        .collect()
}
