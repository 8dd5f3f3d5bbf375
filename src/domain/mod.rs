//! Core domain types and models
//!
//! This module contains the domain layer: identifiers, the patient/subject
//! model, cart, order, and emergency-request types, plus the crate-wide
//! error and result types.

pub mod cart;
pub mod emergency;
pub mod errors;
pub mod ids;
pub mod order;
pub mod patient;
pub mod result;

pub use cart::{AppointmentInfo, Cart, CartLineItem, ServiceRef};
pub use emergency::{
    EmergencyPricing, EmergencyRequest, EmergencyRequestDraft, EmergencyService, EmergencyStatus,
    BASE_DISPATCH_COST,
};
pub use errors::CarelineError;
pub use ids::{OrderId, RelativeId, RequestId, ServiceId};
pub use order::{Order, OrderStatus, PaymentMethod};
pub use patient::{Patient, Subject, UserProfile, ACCOUNT_HOLDER_SENTINEL, SELF_RELATIONSHIP};
pub use result::Result;
