//! Order domain model
//!
//! An order is created atomically from a non-empty cart at checkout and is
//! a copy: it shares no mutable state with the cart that produced it. The
//! server drives status transitions; the client only gates the cancel
//! action.

use super::cart::CartLineItem;
use super::ids::OrderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Accepted payment methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Visa card
    Visa,
    /// Mastercard
    Mastercard,
    /// MoMo e-wallet
    Momo,
    /// ZaloPay e-wallet
    Zalopay,
    /// Cash on delivery
    Cash,
}

/// Order lifecycle status
///
/// Legal transitions, driven by the server:
///
/// ```text
/// pending -> confirmed -> processing -> completed
/// pending -> cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Awaiting confirmation; the only state that permits cancellation
    Pending,
    /// Confirmed by the provider
    Confirmed,
    /// Being fulfilled
    Processing,
    /// Fulfilled; terminal
    Completed,
    /// Cancelled; terminal
    Cancelled,
}

impl OrderStatus {
    /// True once the order can no longer change
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// True while cancellation is still permitted
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// A checked-out order
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Server-assigned identifier
    pub id: OrderId,

    /// Copies of the cart line items at checkout time
    pub items: Vec<CartLineItem>,

    /// Payment method chosen at checkout
    pub payment_method: PaymentMethod,

    /// Grand total in VND (subtotal + tax)
    pub total_price: i64,

    /// Tax portion in VND
    pub tax_price: i64,

    /// Whether payment has been captured
    pub is_paid: bool,

    /// Current lifecycle status
    pub status: OrderStatus,

    /// When the order was created
    pub created_at: DateTime<Utc>,
}
