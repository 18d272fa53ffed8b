//! Persistence adapter interface
//!
//! The settings store only needs a flat key/value table. Keys are unique,
//! values are plain strings.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;
use crate::types::SettingRow;

#[async_trait]
pub trait MetaAdapter: Debug + Send + Sync {
	/// # Settings
	/// Lists all rows whose key starts with `prefix` (literal match, no wildcards)
	async fn list_settings(&self, prefix: &str) -> ClResult<Vec<SettingRow>>;

	/// Inserts or updates every row in a single transaction.
	/// Either all rows are written or none are.
	async fn upsert_settings(&self, rows: &[SettingRow]) -> ClResult<()>;

	/// Deletes all rows whose key starts with `prefix`
	/// Returns the number of deleted rows
	async fn delete_settings(&self, prefix: &str) -> ClResult<u64>;
}

// vim: ts=4
