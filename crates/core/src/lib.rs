//! AOS MICEPP Core - Shared types library.
//!
//! This crate provides common types used across the AOS MICEPP client
//! components:
//! - `client` - Session, guard policy and HTTP services
//! - `cli` - The `aos` terminal front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails, the role
//!   model, the identity record, and domain status enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
