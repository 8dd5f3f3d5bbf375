//! Backend abstraction trait
//!
//! Aggregates depend on this trait rather than the concrete REST adapter,
//! which keeps business logic testable without a network and leaves room
//! for alternative transports.

use crate::domain::cart::{Cart, CartLineItem};
use crate::domain::emergency::{EmergencyRequest, EmergencyRequestDraft};
use crate::domain::ids::{OrderId, RequestId, ServiceId};
use crate::domain::order::{Order, PaymentMethod};
use crate::domain::patient::Patient;
use crate::domain::result::Result;
use async_trait::async_trait;

/// Operations the healthcare backend exposes to this client
///
/// Error contract: implementations classify failures into
/// [`crate::domain::CarelineError`] kinds: `NotAuthenticated` for 401/403,
/// `NotFound` for 404, `Transport` for connectivity, `Api` otherwise.
/// Callers never see transport-level types.
#[async_trait]
pub trait HealthApi: Send + Sync {
    /// Fetches the authoritative cart for the authenticated account
    async fn fetch_cart(&self) -> Result<Cart>;

    /// Adds a line item; an existing item with the same service id is
    /// replaced server-side
    async fn add_to_cart(&self, item: &CartLineItem) -> Result<()>;

    /// Sets the quantity of an existing line item
    async fn update_quantity(&self, service_id: &ServiceId, quantity: u32) -> Result<()>;

    /// Removes a line item
    async fn remove_from_cart(&self, service_id: &ServiceId) -> Result<()>;

    /// Removes every line item
    async fn clear_cart(&self) -> Result<()>;

    /// Creates an order from the current server-side cart contents
    async fn create_order(&self, payment_method: PaymentMethod) -> Result<Order>;

    /// Fetches one order
    async fn fetch_order(&self, id: &OrderId) -> Result<Order>;

    /// Cancels an order; the server re-validates that it is still pending
    async fn cancel_order(&self, id: &OrderId) -> Result<Order>;

    /// Submits an emergency-transport request
    async fn create_emergency_request(
        &self,
        draft: &EmergencyRequestDraft,
    ) -> Result<EmergencyRequest>;

    /// Fetches one emergency request
    async fn fetch_emergency_request(&self, id: &RequestId) -> Result<EmergencyRequest>;

    /// Cancels an emergency request
    async fn cancel_emergency_request(&self, id: &RequestId) -> Result<EmergencyRequest>;

    /// Lists the account's stored relatives
    async fn list_relatives(&self) -> Result<Vec<Patient>>;
}
