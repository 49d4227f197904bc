//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Rich domain types
//! - `wire.rs` — Raw serde structs matching the registry's `args` objects
//! - `client.rs` — Sub-client with the RPC methods for that domain

pub mod attribute;
pub mod document;
pub mod owner;
