//! Emergency-transport request domain model
//!
//! An emergency request is created once per incident. After submission the
//! patient snapshot, symptoms, and service selection are immutable; only
//! the status and estimated arrival time change, pushed by the server.

use super::ids::{RequestId, ServiceId};
use super::patient::Patient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed platform dispatch cost in VND, charged on every emergency request
pub const BASE_DISPATCH_COST: i64 = 200_000;

/// Emergency request lifecycle status
///
/// Legal transitions, driven by the server:
///
/// ```text
/// pending -> requested -> dispatched -> arrived -> completed
/// pending | requested | dispatched -> cancelled
/// ```
///
/// The client additionally stops offering cancellation once a vehicle is
/// dispatched, even though the server still accepts it at that point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmergencyStatus {
    /// Created, not yet acknowledged by a dispatcher
    Pending,
    /// Acknowledged, waiting for a vehicle assignment
    Requested,
    /// Vehicle on the way; estimated arrival becomes available
    Dispatched,
    /// Vehicle at the pickup address
    Arrived,
    /// Transport finished; terminal
    Completed,
    /// Cancelled; terminal
    Cancelled,
}

impl EmergencyStatus {
    /// True once the request can no longer change
    pub fn is_terminal(&self) -> bool {
        matches!(self, EmergencyStatus::Completed | EmergencyStatus::Cancelled)
    }

    /// True while the client still offers the cancel action
    pub fn can_cancel(&self) -> bool {
        matches!(self, EmergencyStatus::Pending | EmergencyStatus::Requested)
    }
}

impl fmt::Display for EmergencyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EmergencyStatus::Pending => "pending",
            EmergencyStatus::Requested => "requested",
            EmergencyStatus::Dispatched => "dispatched",
            EmergencyStatus::Arrived => "arrived",
            EmergencyStatus::Completed => "completed",
            EmergencyStatus::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// Add-on service selectable with an emergency request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyService {
    /// Service identifier
    pub id: ServiceId,
    /// Display name
    pub name: String,
    /// Short description
    pub description: String,
    /// Price in VND
    pub price: i64,
}

/// Price breakdown for an emergency request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyPricing {
    /// Fixed platform dispatch cost
    pub base_cost: i64,
    /// Sum of selected add-on service prices
    pub services_cost: i64,
    /// `base_cost + services_cost`
    pub total_cost: i64,
}

/// A validated emergency request ready for submission
///
/// Built by the emergency aggregate once every precondition has passed;
/// the REST adapter serializes it as the creation payload.
#[derive(Debug, Clone, PartialEq)]
pub struct EmergencyRequestDraft {
    /// Patient snapshot to submit
    pub patient: Patient,
    /// Confirmed pickup address
    pub address: String,
    /// Symptom description, non-empty
    pub symptoms: String,
    /// Selected add-on services
    pub selected_services: Vec<EmergencyService>,
    /// Price breakdown computed client-side
    pub pricing: EmergencyPricing,
}

/// A submitted emergency-transport request
#[derive(Debug, Clone, PartialEq)]
pub struct EmergencyRequest {
    /// Server-assigned identifier
    pub id: RequestId,

    /// Patient snapshot at submission time, not a live reference
    pub patient: Patient,

    /// Pickup address, confirmed by the user before submission
    pub address: String,

    /// Symptom description, always non-empty
    pub symptoms: String,

    /// Add-on services chosen at submission time
    pub selected_services: Vec<EmergencyService>,

    /// Price breakdown computed at submission time
    pub pricing: EmergencyPricing,

    /// Current lifecycle status
    pub status: EmergencyStatus,

    /// Populated only once the status is `dispatched`
    pub estimated_arrival_time: Option<DateTime<Utc>>,

    /// When the request was submitted
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(EmergencyStatus::Completed.is_terminal());
        assert!(EmergencyStatus::Cancelled.is_terminal());
        for status in [
            EmergencyStatus::Pending,
            EmergencyStatus::Requested,
            EmergencyStatus::Dispatched,
            EmergencyStatus::Arrived,
        ] {
            assert!(!status.is_terminal(), "{status} must not be terminal");
        }
    }

    #[test]
    fn test_cancel_gating_stops_at_dispatch() {
        assert!(EmergencyStatus::Pending.can_cancel());
        assert!(EmergencyStatus::Requested.can_cancel());
        assert!(!EmergencyStatus::Dispatched.can_cancel());
        assert!(!EmergencyStatus::Arrived.can_cancel());
        assert!(!EmergencyStatus::Completed.can_cancel());
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&EmergencyStatus::Dispatched).unwrap(),
            "\"dispatched\""
        );
        let status: EmergencyStatus = serde_json::from_str("\"arrived\"").unwrap();
        assert_eq!(status, EmergencyStatus::Arrived);
    }
}
