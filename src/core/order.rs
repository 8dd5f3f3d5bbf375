//! Order aggregate
//!
//! Tracks one checked-out order. The server owns status transitions; this
//! aggregate only mirrors them and gates the cancel action. Refreshes come
//! in two flavors: user-initiated (errors surface) and silent (errors are
//! logged and swallowed so background polling never disturbs the viewer).

use crate::api::traits::HealthApi;
use crate::domain::errors::CarelineError;
use crate::domain::ids::OrderId;
use crate::domain::order::Order;
use crate::domain::result::Result;
use std::sync::Arc;

/// Aggregate over one order
pub struct OrderAggregate {
    api: Arc<dyn HealthApi>,
    id: OrderId,
    order: Option<Order>,
}

impl OrderAggregate {
    /// Creates an aggregate for the given order id; call
    /// [`refresh`](Self::refresh) to fetch the first snapshot.
    pub fn new(api: Arc<dyn HealthApi>, id: OrderId) -> Self {
        Self {
            api,
            id,
            order: None,
        }
    }

    /// Creates an aggregate seeded with a snapshot, as after checkout
    pub fn from_order(api: Arc<dyn HealthApi>, order: Order) -> Self {
        Self {
            api,
            id: order.id.clone(),
            order: Some(order),
        }
    }

    /// The tracked order id
    pub fn id(&self) -> &OrderId {
        &self.id
    }

    /// The current snapshot, if one has been fetched
    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    /// True once the order can no longer change
    pub fn is_terminal(&self) -> bool {
        self.order.as_ref().is_some_and(|o| o.status.is_terminal())
    }

    /// Re-fetches the order from the server
    ///
    /// With `silent` set (background polling), fetch failures are logged
    /// and swallowed so a transient hiccup doesn't interrupt the viewer;
    /// the previous snapshot stays in place. Without it, failures surface
    /// as recoverable errors.
    ///
    /// # Errors
    ///
    /// Only when `silent` is false.
    pub async fn refresh(&mut self, silent: bool) -> Result<()> {
        match self.api.fetch_order(&self.id).await {
            Ok(order) => {
                self.order = Some(order);
                Ok(())
            }
            Err(e) if silent => {
                tracing::warn!(order_id = %self.id, error = %e, "Silent order refresh failed");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Cancels the order
    ///
    /// Pre-checks the snapshot (fetching one first if needed) and refuses
    /// locally unless the status is still pending; the server re-validates
    /// regardless.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` when the order is not pending; the snapshot
    /// is left unchanged. Propagates fetch and cancellation errors.
    pub async fn cancel(&mut self) -> Result<()> {
        if self.order.is_none() {
            self.refresh(false).await?;
        }
        let status = self
            .order
            .as_ref()
            .map(|o| o.status)
            .ok_or_else(|| CarelineError::NotFound(format!("order {}", self.id)))?;

        if !status.can_cancel() {
            return Err(CarelineError::invalid_state("cancel order", status));
        }

        let order = self.api.cancel_order(&self.id).await?;
        tracing::info!(order_id = %self.id, "Order cancelled");
        self.order = Some(order);
        Ok(())
    }
}
