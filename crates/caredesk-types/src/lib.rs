//! Shared types, adapter traits, and the error type for Caredesk.
//!
//! Adapter crates depend only on this crate, so they can compile in
//! parallel with the server crate.

pub mod auth_adapter;
pub mod error;
pub mod meta_adapter;
pub mod prelude;
pub mod types;

// vim: ts=4
