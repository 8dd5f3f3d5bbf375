//! Cart domain model
//!
//! A cart is a set of line items keyed by service id, owned by one account.
//! An empty cart is a valid persistent state, not an error. Derived totals
//! come from [`crate::core::pricing`]; the cart itself stores no money
//! beyond the per-item unit price.

use super::ids::ServiceId;
use super::patient::Patient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reference to an add-on service attached to a booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRef {
    /// Service identifier
    pub id: ServiceId,
    /// Display name at the time of booking
    pub name: String,
}

/// Booking context captured when a line item comes from the exam-booking
/// flow rather than a direct catalog add
///
/// The patient here is a snapshot taken at booking time, not a live
/// reference to the relatives collection.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentInfo {
    /// Patient snapshot at booking time
    pub patient: Patient,

    /// Appointment date (display format, e.g. "2026-09-14")
    pub date: String,

    /// Appointment time slot (display format, e.g. "09:30")
    pub time: String,

    /// Add-on services chosen during booking
    pub additional_services: Vec<ServiceRef>,

    /// Symptom description entered by the user
    pub symptoms: String,

    /// When the booking was created
    pub created_at: DateTime<Utc>,
}

/// One service entry in a cart
///
/// `quantity` never observably reaches 0: decrementing from 1 removes the
/// item instead (enforced by the cart aggregate).
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineItem {
    /// Unique key within the cart
    pub service_id: ServiceId,

    /// Display name of the service
    pub name: String,

    /// Unit price in whole VND (no subunit), non-negative
    pub unit_price: i64,

    /// Quantity, always >= 1
    pub quantity: u32,

    /// Booking context, present only for items from the booking flow
    pub appointment: Option<AppointmentInfo>,
}

impl CartLineItem {
    /// Price contribution of this line: `unit_price * quantity`
    pub fn line_total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

/// The authoritative cart snapshot for one account
///
/// Items are keyed by service id; ordering is irrelevant. The aggregate
/// layer treats this as a cache invalidated by the next successful fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    /// Line items, at most one per service id
    pub items: Vec<CartLineItem>,
}

impl Cart {
    /// An empty cart
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when the cart holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up a line item by service id
    pub fn item(&self, service_id: &ServiceId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| &i.service_id == service_id)
    }

    /// True when the cart contains the given service
    pub fn contains(&self, service_id: &ServiceId) -> bool {
        self.item(service_id).is_some()
    }

    /// Number of distinct line items
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
