//! Backend adapter: session seam, trait, wire models, REST implementation
//!
//! Aggregates in [`crate::core`] talk to [`HealthApi`]; [`RestApi`] is the
//! production implementation over reqwest.

pub mod models;
pub mod rest;
pub mod session;
pub mod traits;

pub use rest::RestApi;
pub use session::{Session, SharedSession, StaticSession};
pub use traits::HealthApi;
