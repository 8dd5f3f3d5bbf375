//! Price arithmetic for carts and emergency requests
//!
//! Pure, deterministic functions over line items; no I/O. All amounts are
//! whole VND. The tax rate is 10% and rounding truncates toward the
//! currency's smallest unit, which for VND means plain integer division.

use crate::domain::cart::CartLineItem;
use crate::domain::emergency::{EmergencyPricing, EmergencyService};

/// Tax rate numerator over a denominator of 100
const TAX_RATE_PERCENT: i64 = 10;

/// Sum of `unit_price * quantity` over all items; empty list yields 0
pub fn subtotal(items: &[CartLineItem]) -> i64 {
    items.iter().map(CartLineItem::line_total).sum()
}

/// Tax on a subtotal, truncated to whole VND
pub fn tax(subtotal: i64) -> i64 {
    subtotal * TAX_RATE_PERCENT / 100
}

/// Grand total: subtotal plus tax
pub fn total(items: &[CartLineItem]) -> i64 {
    let sub = subtotal(items);
    sub + tax(sub)
}

/// Total cost of an emergency request: base dispatch cost plus add-ons
pub fn emergency_total(base_cost: i64, services: &[EmergencyService]) -> i64 {
    base_cost + services_cost(services)
}

/// Sum of selected add-on service prices
pub fn services_cost(services: &[EmergencyService]) -> i64 {
    services.iter().map(|s| s.price).sum()
}

/// Full price breakdown for an emergency request
pub fn emergency_pricing(base_cost: i64, services: &[EmergencyService]) -> EmergencyPricing {
    let services_cost = services_cost(services);
    EmergencyPricing {
        base_cost,
        services_cost,
        total_cost: base_cost + services_cost,
    }
}
