//! Caredesk is the settings service of a behavioral-health practice
//! management application.
//!
//! # Features
//!
//! - Settings categories (calendar, contact form, client portal, ...)
//!		- structured nested objects over the API
//!		- one flat key/value row per leaf in storage
//!		- practice-wide or per-clinician scope
//! - Bearer token authentication through a pluggable auth adapter
//! - Pluggable persistence through a meta adapter

#![forbid(unsafe_code)]

pub mod app;
pub mod extract;
pub mod middleware;
pub mod prelude;
pub mod routes;
pub mod settings;

pub use crate::app::{App, AppBuilder, AppState};

// vim: ts=4
