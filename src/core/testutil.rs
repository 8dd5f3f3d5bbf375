//! In-process backend double for aggregate unit tests
//!
//! Simulates the server's observable behavior: it keeps an authoritative
//! cart, creates orders from it, re-validates cancellation, and can be
//! told to fail specific operations. Call names are recorded so tests can
//! assert which endpoints were (not) hit.

use crate::api::traits::HealthApi;
use crate::domain::cart::{Cart, CartLineItem};
use crate::domain::emergency::{EmergencyRequest, EmergencyRequestDraft, EmergencyStatus};
use crate::domain::errors::CarelineError;
use crate::domain::ids::{OrderId, RequestId, ServiceId};
use crate::domain::order::{Order, OrderStatus, PaymentMethod};
use crate::domain::patient::Patient;
use crate::domain::result::Result;
use crate::core::pricing;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub(crate) struct MockApi {
    pub cart: Mutex<Vec<CartLineItem>>,
    pub order: Mutex<Option<Order>>,
    pub emergency: Mutex<Option<EmergencyRequest>>,
    pub relatives: Mutex<Vec<Patient>>,
    pub calls: Mutex<Vec<String>>,
    /// Fail the next clear_cart with a server error
    pub fail_clear: AtomicBool,
    /// Fail all fetches with a transport error
    pub fail_fetch: AtomicBool,
    /// Report the cart as not found (404), as for a brand-new account
    pub cart_missing: AtomicBool,
}

impl MockApi {
    pub fn with_items(items: Vec<CartLineItem>) -> Self {
        let api = Self::default();
        *api.cart.lock().unwrap() = items;
        api
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, name: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|c| c == name)
    }

    fn record(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_string());
    }

    fn fetch_gate(&self) -> Result<()> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            Err(CarelineError::Transport("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl HealthApi for MockApi {
    async fn fetch_cart(&self) -> Result<Cart> {
        self.record("fetch_cart");
        self.fetch_gate()?;
        if self.cart_missing.load(Ordering::SeqCst) {
            return Err(CarelineError::NotFound("fetch cart: no cart".to_string()));
        }
        Ok(Cart {
            items: self.cart.lock().unwrap().clone(),
        })
    }

    async fn add_to_cart(&self, item: &CartLineItem) -> Result<()> {
        self.record("add_to_cart");
        let mut cart = self.cart.lock().unwrap();
        // server semantics: same service id replaces the line
        cart.retain(|i| i.service_id != item.service_id);
        cart.push(item.clone());
        Ok(())
    }

    async fn update_quantity(&self, service_id: &ServiceId, quantity: u32) -> Result<()> {
        self.record("update_quantity");
        let mut cart = self.cart.lock().unwrap();
        match cart.iter_mut().find(|i| &i.service_id == service_id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(())
            }
            None => Err(CarelineError::NotFound(format!(
                "service {service_id} not in cart"
            ))),
        }
    }

    async fn remove_from_cart(&self, service_id: &ServiceId) -> Result<()> {
        self.record("remove_from_cart");
        self.cart
            .lock()
            .unwrap()
            .retain(|i| &i.service_id != service_id);
        Ok(())
    }

    async fn clear_cart(&self) -> Result<()> {
        self.record("clear_cart");
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(CarelineError::Api {
                status: 500,
                message: "internal error".to_string(),
            });
        }
        self.cart.lock().unwrap().clear();
        Ok(())
    }

    async fn create_order(&self, payment_method: PaymentMethod) -> Result<Order> {
        self.record("create_order");
        let items = self.cart.lock().unwrap().clone();
        let subtotal = pricing::subtotal(&items);
        let order = Order {
            id: OrderId::new("ord-1").unwrap(),
            items,
            payment_method,
            total_price: subtotal + pricing::tax(subtotal),
            tax_price: pricing::tax(subtotal),
            is_paid: false,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };
        *self.order.lock().unwrap() = Some(order.clone());
        Ok(order)
    }

    async fn fetch_order(&self, id: &OrderId) -> Result<Order> {
        self.record("fetch_order");
        self.fetch_gate()?;
        self.order
            .lock()
            .unwrap()
            .clone()
            .filter(|o| &o.id == id)
            .ok_or_else(|| CarelineError::NotFound(format!("order {id}")))
    }

    async fn cancel_order(&self, id: &OrderId) -> Result<Order> {
        self.record("cancel_order");
        let mut guard = self.order.lock().unwrap();
        let order = guard
            .as_mut()
            .filter(|o| &o.id == id)
            .ok_or_else(|| CarelineError::NotFound(format!("order {id}")))?;
        // server re-validates independently of the client gate
        if !order.status.can_cancel() {
            return Err(CarelineError::Api {
                status: 400,
                message: "order is not pending".to_string(),
            });
        }
        order.status = OrderStatus::Cancelled;
        Ok(order.clone())
    }

    async fn create_emergency_request(
        &self,
        draft: &EmergencyRequestDraft,
    ) -> Result<EmergencyRequest> {
        self.record("create_emergency_request");
        let request = EmergencyRequest {
            id: RequestId::new("er-1").unwrap(),
            patient: draft.patient.clone(),
            address: draft.address.clone(),
            symptoms: draft.symptoms.clone(),
            selected_services: draft.selected_services.clone(),
            pricing: draft.pricing,
            status: EmergencyStatus::Pending,
            estimated_arrival_time: None,
            created_at: Utc::now(),
        };
        *self.emergency.lock().unwrap() = Some(request.clone());
        Ok(request)
    }

    async fn fetch_emergency_request(&self, id: &RequestId) -> Result<EmergencyRequest> {
        self.record("fetch_emergency_request");
        self.fetch_gate()?;
        self.emergency
            .lock()
            .unwrap()
            .clone()
            .filter(|r| &r.id == id)
            .ok_or_else(|| CarelineError::NotFound(format!("emergency request {id}")))
    }

    async fn cancel_emergency_request(&self, id: &RequestId) -> Result<EmergencyRequest> {
        self.record("cancel_emergency_request");
        let mut guard = self.emergency.lock().unwrap();
        let request = guard
            .as_mut()
            .filter(|r| &r.id == id)
            .ok_or_else(|| CarelineError::NotFound(format!("emergency request {id}")))?;
        if request.status.is_terminal() {
            return Err(CarelineError::Api {
                status: 400,
                message: "request already closed".to_string(),
            });
        }
        request.status = EmergencyStatus::Cancelled;
        Ok(request.clone())
    }

    async fn list_relatives(&self) -> Result<Vec<Patient>> {
        self.record("list_relatives");
        self.fetch_gate()?;
        Ok(self.relatives.lock().unwrap().clone())
    }
}

pub(crate) fn line_item(id: &str, price: i64, qty: u32) -> CartLineItem {
    CartLineItem {
        service_id: ServiceId::new(id).unwrap(),
        name: id.to_string(),
        unit_price: price,
        quantity: qty,
        appointment: None,
    }
}
