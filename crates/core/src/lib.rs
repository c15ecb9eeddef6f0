//! QKart Core - Shared types and cart logic.
//!
//! This crate provides the types and pure routines used across the QKart
//! storefront client:
//! - `storefront` - REST client, session handling and the application shell
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no timers. Everything here can be tested with plain values.
//!
//! # Modules
//!
//! - [`types`] - Products, cart entries, line items, prices, ratings and
//!   account forms
//! - [`cart`] - Cart reconciliation against the product catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{cart_total, contains_product, reconcile, total_quantity};
pub use types::*;
