//! Settings subsystem: structured categories stored as flat key/value rows
//!
//! # Architecture
//!
//! - **Types** (`types.rs`): Category definitions, flattening and the registry
//! - **Categories** (`categories.rs`): The built-in category schemas
//! - **Service** (`service.rs`): SettingsService reading and merging categories
//! - **Handler** (`handler.rs`): HTTP API endpoints
//!
//! # Scope
//!
//! Scope is a static property of a category:
//! - **Practice**: one object shared by every clinician (last writer wins)
//! - **Clinician**: keys are namespaced as `clinician:{id}:{key}`

pub mod categories;
pub mod handler;
pub mod service;
pub mod types;

pub use types::{
	CategoryDefinition, CategoryDefinitionBuilder, CategoryScope, FieldDefinition, FieldType,
	FrozenSettingsRegistry, SettingValue, SettingsRegistry,
};

// vim: ts=4
