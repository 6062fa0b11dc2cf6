//! Content for the response composer.
//!
//! The engine decides what must be said; the composer owns the final
//! phrasing and localization. Every terminal session outcome maps to
//! exactly one of these messages.

use chrono::Local;

use crate::gateway::GatewayError;
use crate::models::HealthRecord;

/// Confirmation after a successful insert, with the record's headline
/// value and the save time interpolated.
pub fn saved_confirmation(record: &HealthRecord) -> String {
    let when = Local::now().format("%d %b %Y, %H:%M");
    format!(
        "Saved your {} \"{}\" ({when}).",
        record.label(),
        record.headline()
    )
}

/// Failure message after a gateway error. The session is gone by the
/// time this is shown; re-invoking the intent starts over.
pub fn save_failed(record: &HealthRecord, error: &GatewayError) -> String {
    format!(
        "I couldn't save your {}: {error}. Nothing was recorded. Tell me about it again and we can retry.",
        record.label()
    )
}
