//! Test harness for isolated service-level tests.
//!
//! `TestHarness` wires a `Dashboard` to an in-memory database and a
//! `ScriptedCarrier`, a `TrackingProvider` stub that replays canned replies
//! and records every outbound call (tracking number and token) so tests can
//! assert that a lookup did or did not happen.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use opsdeck::carrier::error::CarrierError;
use opsdeck::carrier::{TrackingEvent, TrackingProvider};
use opsdeck::db::Database;
use opsdeck::Dashboard;

/// One recorded outbound carrier call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub tracking_number: String,
    pub token: Option<String>,
}

#[derive(Debug, Clone)]
enum ScriptedReply {
    Events(Vec<TrackingEvent>),
    Fail,
}

#[derive(Default)]
struct CarrierState {
    replies: HashMap<String, ScriptedReply>,
    calls: Vec<RecordedCall>,
}

/// Scripted stand-in for the carrier API. Unknown tracking numbers yield an
/// empty event list, matching the real carrier's "not found yet" behavior.
#[derive(Clone, Default)]
pub struct ScriptedCarrier {
    state: Arc<Mutex<CarrierState>>,
}

impl ScriptedCarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts an event list for a tracking number.
    pub fn respond_with(&self, tracking_number: &str, events: Vec<TrackingEvent>) {
        self.state
            .lock()
            .unwrap()
            .replies
            .insert(tracking_number.to_string(), ScriptedReply::Events(events));
    }

    /// Scripts a fetch failure for a tracking number.
    pub fn fail_for(&self, tracking_number: &str) {
        self.state
            .lock()
            .unwrap()
            .replies
            .insert(tracking_number.to_string(), ScriptedReply::Fail);
    }

    /// All outbound calls recorded so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }
}

#[async_trait]
impl TrackingProvider for ScriptedCarrier {
    async fn track(
        &self,
        tracking_number: &str,
        token_override: Option<&str>,
    ) -> Result<Vec<TrackingEvent>, CarrierError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall {
            tracking_number: tracking_number.to_string(),
            token: token_override.map(String::from),
        });

        match state.replies.get(tracking_number) {
            Some(ScriptedReply::Events(events)) => Ok(events.clone()),
            Some(ScriptedReply::Fail) => {
                Err(CarrierError::Parse("scripted failure".to_string()))
            }
            None => Ok(Vec::new()),
        }
    }
}

/// Harness bundling the service under test with its scripted carrier.
pub struct TestHarness {
    pub carrier: ScriptedCarrier,
    pub dashboard: Dashboard,
}

impl TestHarness {
    /// Harness with a fresh in-memory database.
    pub fn new() -> Self {
        let db = Database::open_in_memory().expect("Failed to create test database");
        let carrier = ScriptedCarrier::new();
        let dashboard = Dashboard::new(Some(db), Box::new(carrier.clone()));
        Self { carrier, dashboard }
    }

    /// Harness with no backing store, for persistence-degradation tests.
    pub fn without_database() -> Self {
        let carrier = ScriptedCarrier::new();
        let dashboard = Dashboard::new(None, Box::new(carrier.clone()));
        Self { carrier, dashboard }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a tracking event with the fields the refresh pipeline reads.
pub fn tracking_event(
    barcode: &str,
    status: &str,
    status_description: &str,
    status_date: &str,
    location: &str,
    delivery_status: Option<&str>,
) -> TrackingEvent {
    TrackingEvent {
        barcode: barcode.to_string(),
        status: status.to_string(),
        status_description: status_description.to_string(),
        status_date: status_date.to_string(),
        location: location.to_string(),
        postcode: String::new(),
        delivery_status: delivery_status.map(String::from),
        delivery_description: None,
        delivery_datetime: None,
        receiver_name: None,
        signature: None,
        status_detail: String::new(),
        delivery_officer_name: None,
        delivery_officer_tel: None,
        office_name: None,
        office_tel: None,
        call_center_tel: String::new(),
    }
}
