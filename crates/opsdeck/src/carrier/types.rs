//! Wire types for the carrier tracking API.
//!
//! Field names follow the carrier's JSON contract verbatim (snake_case).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One carrier-reported milestone for a shipment.
///
/// Events arrive in chronological order, oldest first. A non-null
/// `delivery_status` marks a terminal delivery event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub barcode: String,
    pub status: String,
    pub status_description: String,
    pub status_date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub delivery_status: Option<String>,
    #[serde(default)]
    pub delivery_description: Option<String>,
    #[serde(default)]
    pub delivery_datetime: Option<String>,
    #[serde(default)]
    pub receiver_name: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub status_detail: String,
    #[serde(default)]
    pub delivery_officer_name: Option<String>,
    #[serde(default)]
    pub delivery_officer_tel: Option<String>,
    #[serde(default)]
    pub office_name: Option<String>,
    #[serde(default)]
    pub office_tel: Option<String>,
    #[serde(default)]
    pub call_center_tel: String,
}

/// Request body for the track endpoint.
#[derive(Debug, Serialize)]
pub struct TrackRequest<'a> {
    pub status: &'a str,
    pub language: &'a str,
    pub barcode: Vec<&'a str>,
}

/// Daily request quota usage reported alongside the tracking data.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackCount {
    #[serde(default)]
    pub track_date: String,
    #[serde(default)]
    pub count_number: i64,
    #[serde(default)]
    pub track_count_limit: i64,
}

/// Payload of a successful track response: events keyed by barcode.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackPayload {
    #[serde(default)]
    pub items: HashMap<String, Vec<TrackingEvent>>,
    #[serde(default)]
    pub track_count: Option<TrackCount>,
}

/// Top-level track response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackResponse {
    pub status: bool,
    #[serde(default)]
    pub message: String,
    pub response: TrackPayload,
}

impl TrackResponse {
    /// Extracts the event list for one barcode.
    ///
    /// A carrier-level failure flag or an absent barcode key both yield an
    /// empty list; "not found yet" is a normal outcome for a freshly posted
    /// shipment, not an error.
    pub fn events_for(mut self, barcode: &str) -> Vec<TrackingEvent> {
        if !self.status {
            return Vec::new();
        }
        self.response.items.remove(barcode).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESPONSE: &str = r#"{
        "response": {
            "items": {
                "EE001040482TH": [
                    {
                        "barcode": "EE001040482TH",
                        "status": "103",
                        "status_description": "Arrived at post office",
                        "status_date": "18/01/2569 10:01:00+07:00",
                        "location": "BANGKOK",
                        "postcode": "10110",
                        "delivery_status": null,
                        "delivery_description": null,
                        "delivery_datetime": null,
                        "receiver_name": null,
                        "signature": null,
                        "status_detail": "",
                        "delivery_officer_name": null,
                        "delivery_officer_tel": null,
                        "office_name": "Bangkok Post Office",
                        "office_tel": "02-0000000",
                        "call_center_tel": "1545"
                    }
                ]
            },
            "track_count": {
                "track_date": "18/01/2569",
                "count_number": 1,
                "track_count_limit": 500
            }
        },
        "message": "successful",
        "status": true
    }"#;

    #[test]
    fn test_deserialize_track_response() {
        let resp: TrackResponse = serde_json::from_str(SAMPLE_RESPONSE).unwrap();
        assert!(resp.status);
        assert_eq!(resp.message, "successful");

        let events = resp.events_for("EE001040482TH");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].status, "103");
        assert_eq!(events[0].location, "BANGKOK");
        assert!(events[0].delivery_status.is_none());
    }

    #[test]
    fn test_events_for_absent_barcode_is_empty() {
        let resp: TrackResponse = serde_json::from_str(SAMPLE_RESPONSE).unwrap();
        assert!(resp.events_for("RR999999999TH").is_empty());
    }

    #[test]
    fn test_events_for_carrier_failure_flag_is_empty() {
        let resp: TrackResponse = serde_json::from_str(
            r#"{"response": {"items": {}}, "message": "invalid token", "status": false}"#,
        )
        .unwrap();
        assert!(resp.events_for("EE001040482TH").is_empty());
    }

    #[test]
    fn test_event_roundtrips_through_serde() {
        let resp: TrackResponse = serde_json::from_str(SAMPLE_RESPONSE).unwrap();
        let events = resp.events_for("EE001040482TH");
        let json = serde_json::to_string(&events[0]).unwrap();
        assert!(json.contains("\"status_description\":\"Arrived at post office\""));
    }
}
