// Careline - Healthcare services client core
// Copyright (c) 2026 Careline Contributors
// Licensed under the MIT License

//! # Careline - healthcare services client core
//!
//! Careline is the client-side core of a healthcare-services platform:
//! a shopping cart for medical services, order tracking, and
//! emergency-transport requests, all backed by a remote REST API.
//!
//! ## Overview
//!
//! This library provides:
//! - **Cart management** with authoritative server state and checkout
//! - **Order tracking** with a status state machine and gated cancellation
//! - **Emergency requests** with patient validation and client-side pricing
//! - **Background polling** that silently refreshes open detail views
//!
//! ## Architecture
//!
//! Careline follows a layered architecture:
//!
//! - [`core`] - Business logic (aggregates, pricing, selection, polling)
//! - [`api`] - Backend adapter (REST over reqwest, session seam)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use careline::api::{RestApi, StaticSession};
//! use careline::config::load_config;
//! use careline::core::CartAggregate;
//! use careline::domain::order::PaymentMethod;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("careline.toml")?;
//!     let session = Arc::new(StaticSession::authenticated("bearer-token"));
//!     let api = Arc::new(RestApi::new(&config.api, session)?);
//!
//!     let mut cart = CartAggregate::new(api);
//!     cart.load().await?;
//!     let order = cart.checkout(PaymentMethod::Cash).await?;
//!
//!     println!("Order {} created, total {} VND", order.id, order.total_price);
//!     Ok(())
//! }
//! ```
//!
//! ## Consistency model
//!
//! Every mutation is followed by a full reload of the authoritative
//! server state; the client never applies optimistic local edits. Each
//! aggregate keeps a single current snapshot and treats it as a cache
//! invalidated by the next successful fetch.
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::CarelineError`] through the
//! [`domain::Result`] alias. Transport failures during background polls
//! are logged and swallowed; user-initiated calls surface them with a
//! retry affordance left to the caller.

pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
