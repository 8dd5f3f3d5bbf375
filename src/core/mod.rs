//! Business logic: pricing, patient selection, aggregates, polling
//!
//! Each aggregate is a consistency boundary over one piece of remote
//! state. Mutations go to the server and are followed by an authoritative
//! reload; local state is a cache, never a source of truth.

pub mod cart;
pub mod emergency;
pub mod order;
pub mod pricing;
pub mod selector;
pub mod sync;

#[cfg(test)]
pub(crate) mod testutil;

pub use cart::CartAggregate;
pub use emergency::EmergencyRequestAggregate;
pub use order::OrderAggregate;
pub use selector::{resolve_account_holder, validate_for_submission, SubmissionCheck};
pub use sync::{Pollable, RequestSyncLoop, SyncHandle};
