//! Karvaan Core - Shared types library.
//!
//! This crate provides common types used across all Karvaan components:
//! - `storefront` - Public-facing storefront API
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, order statuses, and
//!   the checkout form enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
