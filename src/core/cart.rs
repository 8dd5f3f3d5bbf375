//! Cart aggregate
//!
//! Holds the current authoritative cart snapshot for the account. Every
//! mutation is a server call followed by a full reload of the canonical
//! cart; the client never merges optimistically, so local state is a cache
//! invalidated by the next successful fetch. The `updating` flag lets a UI
//! disable quantity controls while a mutation is in flight, which is the
//! only mitigation for rapid double-taps (last request to complete wins).

use crate::api::traits::HealthApi;
use crate::domain::cart::{Cart, CartLineItem};
use crate::domain::errors::CarelineError;
use crate::domain::ids::ServiceId;
use crate::domain::order::{Order, PaymentMethod};
use crate::domain::result::Result;
use std::sync::Arc;

/// Aggregate over the account's cart
pub struct CartAggregate {
    api: Arc<dyn HealthApi>,
    cart: Cart,
    updating: bool,
}

impl CartAggregate {
    /// Creates an aggregate with an empty local snapshot; call
    /// [`load`](Self::load) to fetch the authoritative state.
    pub fn new(api: Arc<dyn HealthApi>) -> Self {
        Self {
            api,
            cart: Cart::empty(),
            updating: false,
        }
    }

    /// The current authoritative snapshot
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// True while a mutation is in flight; UIs disable controls on this
    pub fn is_updating(&self) -> bool {
        self.updating
    }

    /// Fetches the authoritative cart
    ///
    /// A 404 means the account has no cart yet and is treated as an empty
    /// cart, not an error.
    ///
    /// # Errors
    ///
    /// Propagates transport and API errors other than not-found.
    pub async fn load(&mut self) -> Result<()> {
        match self.api.fetch_cart().await {
            Ok(cart) => {
                self.cart = cart;
                Ok(())
            }
            Err(CarelineError::NotFound(_)) => {
                self.cart = Cart::empty();
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Adds a line item and reloads
    ///
    /// An existing item with the same service id is replaced server-side;
    /// the reload makes whatever the server decided authoritative.
    ///
    /// # Errors
    ///
    /// Propagates API and transport errors.
    pub async fn add_item(&mut self, item: CartLineItem) -> Result<()> {
        self.updating = true;
        let result = async {
            self.api.add_to_cart(&item).await?;
            self.load().await
        }
        .await;
        self.updating = false;
        result
    }

    /// Sets the quantity of a line item
    ///
    /// A quantity of 0 removes the item instead, so quantity never
    /// observably reaches 0.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the service is not in the current snapshot.
    pub async fn set_quantity(&mut self, service_id: &ServiceId, quantity: u32) -> Result<()> {
        if !self.cart.contains(service_id) {
            return Err(CarelineError::NotFound(format!(
                "service {service_id} not in cart"
            )));
        }

        if quantity == 0 {
            return self.remove_item(service_id).await;
        }

        self.updating = true;
        let result = async {
            self.api.update_quantity(service_id, quantity).await?;
            self.load().await
        }
        .await;
        self.updating = false;
        result
    }

    /// Removes a line item; removing an absent item is a no-op
    ///
    /// # Errors
    ///
    /// Propagates API and transport errors.
    pub async fn remove_item(&mut self, service_id: &ServiceId) -> Result<()> {
        self.updating = true;
        let result = async {
            self.api.remove_from_cart(service_id).await?;
            self.load().await
        }
        .await;
        self.updating = false;
        result
    }

    /// Checks out the cart, producing an order
    ///
    /// The server creates the order from the current cart contents. On
    /// success the cart is cleared with a separate follow-up call; if that
    /// clear fails the order still exists and the cart may transiently
    /// show the ordered items, so the failure is logged rather than
    /// propagated.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCart` without calling the backend when the snapshot
    /// has no items; otherwise propagates order-creation errors.
    pub async fn checkout(&mut self, payment_method: PaymentMethod) -> Result<Order> {
        if self.cart.is_empty() {
            return Err(CarelineError::EmptyCart);
        }

        self.updating = true;
        let result = self.checkout_inner(payment_method).await;
        self.updating = false;
        result
    }

    async fn checkout_inner(&mut self, payment_method: PaymentMethod) -> Result<Order> {
        let order = self.api.create_order(payment_method).await?;

        tracing::info!(
            order_id = %order.id,
            total_price = order.total_price,
            "Order created from cart"
        );

        if let Err(e) = self.api.clear_cart().await {
            tracing::warn!(
                order_id = %order.id,
                error = %e,
                "Cart clear after checkout failed; ordered items may reappear until the next reload"
            );
        }

        if let Err(e) = self.load().await {
            tracing::warn!(
                order_id = %order.id,
                error = %e,
                "Cart reload after checkout failed"
            );
        }

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testutil::{line_item, MockApi};
    use crate::domain::order::OrderStatus;
    use std::sync::atomic::Ordering;

    fn service_id(id: &str) -> ServiceId {
        ServiceId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_load_not_found_is_empty_cart() {
        let api = Arc::new(MockApi::default());
        api.cart_missing.store(true, Ordering::SeqCst);
        let mut aggregate = CartAggregate::new(api);
        aggregate.load().await.unwrap();
        assert!(aggregate.cart().is_empty());
    }

    #[tokio::test]
    async fn test_add_item_reloads_authoritative_state() {
        let api = Arc::new(MockApi::default());
        let mut aggregate = CartAggregate::new(api.clone());

        aggregate
            .add_item(line_item("general-checkup", 300_000, 1))
            .await
            .unwrap();

        assert_eq!(aggregate.cart().len(), 1);
        assert_eq!(api.calls(), ["add_to_cart", "fetch_cart"]);
        assert!(!aggregate.is_updating());
    }

    #[tokio::test]
    async fn test_add_same_service_replaces_line() {
        let api = Arc::new(MockApi::default());
        let mut aggregate = CartAggregate::new(api);

        aggregate
            .add_item(line_item("x-ray", 150_000, 1))
            .await
            .unwrap();
        aggregate
            .add_item(line_item("x-ray", 150_000, 3))
            .await
            .unwrap();

        assert_eq!(aggregate.cart().len(), 1);
        assert_eq!(
            aggregate.cart().item(&service_id("x-ray")).unwrap().quantity,
            3
        );
    }

    #[tokio::test]
    async fn test_set_quantity_updates_in_place() {
        let api = Arc::new(MockApi::with_items(vec![line_item("x-ray", 150_000, 1)]));
        let mut aggregate = CartAggregate::new(api);
        aggregate.load().await.unwrap();

        aggregate.set_quantity(&service_id("x-ray"), 4).await.unwrap();
        assert_eq!(
            aggregate.cart().item(&service_id("x-ray")).unwrap().quantity,
            4
        );
    }

    #[tokio::test]
    async fn test_set_quantity_zero_removes_item() {
        let api = Arc::new(MockApi::with_items(vec![line_item("x-ray", 150_000, 1)]));
        let mut aggregate = CartAggregate::new(api.clone());
        aggregate.load().await.unwrap();

        aggregate.set_quantity(&service_id("x-ray"), 0).await.unwrap();
        assert!(aggregate.cart().is_empty());
        assert!(api.called("remove_from_cart"));
        assert!(!api.called("update_quantity"));
    }

    #[tokio::test]
    async fn test_set_quantity_unknown_service_fails() {
        let api = Arc::new(MockApi::default());
        let mut aggregate = CartAggregate::new(api.clone());
        aggregate.load().await.unwrap();

        let result = aggregate.set_quantity(&service_id("ghost"), 2).await;
        assert!(matches!(result, Err(CarelineError::NotFound(_))));
        assert!(!api.called("update_quantity"));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let api = Arc::new(MockApi::with_items(vec![line_item("x-ray", 150_000, 1)]));
        let mut aggregate = CartAggregate::new(api);
        aggregate.load().await.unwrap();

        aggregate.remove_item(&service_id("x-ray")).await.unwrap();
        let after_first = aggregate.cart().clone();

        aggregate.remove_item(&service_id("x-ray")).await.unwrap();
        assert_eq!(aggregate.cart(), &after_first);
        assert!(aggregate.cart().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_never_hits_backend() {
        let api = Arc::new(MockApi::default());
        let mut aggregate = CartAggregate::new(api.clone());
        aggregate.load().await.unwrap();

        let result = aggregate.checkout(PaymentMethod::Cash).await;
        assert!(matches!(result, Err(CarelineError::EmptyCart)));
        assert!(!api.called("create_order"));
    }

    #[tokio::test]
    async fn test_checkout_creates_order_and_clears_cart() {
        let api = Arc::new(MockApi::with_items(vec![
            line_item("general-checkup", 300_000, 1),
            line_item("blood-test", 100_000, 1),
        ]));
        let mut aggregate = CartAggregate::new(api.clone());
        aggregate.load().await.unwrap();

        let order = aggregate.checkout(PaymentMethod::Cash).await.unwrap();
        assert_eq!(order.total_price, 440_000);
        assert_eq!(order.tax_price, 40_000);
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(aggregate.cart().is_empty());
        assert!(api.called("clear_cart"));
    }

    #[tokio::test]
    async fn test_checkout_survives_failed_clear() {
        let api = Arc::new(MockApi::with_items(vec![line_item("x-ray", 150_000, 2)]));
        api.fail_clear.store(true, Ordering::SeqCst);
        let mut aggregate = CartAggregate::new(api.clone());
        aggregate.load().await.unwrap();

        let order = aggregate.checkout(PaymentMethod::Momo).await.unwrap();
        assert_eq!(order.total_price, 330_000);
        // clear failed, so the reload still shows the ordered items
        assert_eq!(aggregate.cart().len(), 1);
    }
}
