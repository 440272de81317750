//! Pure status resolution over an ordered event sequence.
//!
//! The carrier guarantees chronological ordering (oldest first), so position
//! alone determines recency; no date comparison is performed.

use super::types::TrackingEvent;

/// Returns the most recent event, i.e. the last element of the sequence.
pub fn latest(events: &[TrackingEvent]) -> Option<&TrackingEvent> {
    events.last()
}

/// Whether the shipment counts as delivered.
///
/// True when the latest event has a non-null `delivery_status` OR its
/// `status_description` contains "delivered" (case-insensitive). The two
/// signals are OR'd, so a text match alone is sufficient.
pub fn is_delivered(events: &[TrackingEvent]) -> bool {
    match latest(events) {
        Some(event) => {
            event.delivery_status.is_some()
                || event.status_description.to_lowercase().contains("delivered")
        }
        None => false,
    }
}
