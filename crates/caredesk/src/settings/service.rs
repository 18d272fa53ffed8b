//! Settings service - reads and writes whole categories

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use caredesk_types::meta_adapter::MetaAdapter;
use caredesk_types::types::SettingRow;

use crate::prelude::*;

use super::types::{CategoryDefinition, CategoryScope, FrozenSettingsRegistry};

/// Settings service - main interface for accessing and managing settings
pub struct SettingsService {
	registry: Arc<FrozenSettingsRegistry>,
	meta: Arc<dyn MetaAdapter>,
}

impl SettingsService {
	pub fn new(registry: Arc<FrozenSettingsRegistry>, meta: Arc<dyn MetaAdapter>) -> Self {
		Self { registry, meta }
	}

	fn definition(&self, category: &str) -> ClResult<&CategoryDefinition> {
		self.registry.get(category).ok_or_else(|| Error::UnknownCategory(category.to_string()))
	}

	/// Key namespace of the category for the given clinician.
	/// Practice-wide categories ignore the clinician.
	fn scope_prefix(def: &CategoryDefinition, clinician_id: &str) -> ClResult<String> {
		match def.scope {
			CategoryScope::Practice => Ok(String::new()),
			CategoryScope::Clinician => {
				if clinician_id.is_empty() || clinician_id.contains(':') {
					return Err(Error::ValidationError(format!(
						"Invalid clinician id '{}'",
						clinician_id
					)));
				}
				Ok(format!("clinician:{}:", clinician_id))
			}
		}
	}

	async fn read(&self, def: &CategoryDefinition, scope_prefix: &str) -> ClResult<Value> {
		let prefix = format!("{}{}", scope_prefix, def.key_prefix());
		let rows = self.meta.list_settings(&prefix).await?;

		let stored: HashMap<&str, &str> = rows
			.iter()
			.filter_map(|row| row.key.strip_prefix(scope_prefix).map(|k| (k, row.value.as_ref())))
			.collect();

		Ok(def.reconstruct(&stored))
	}

	/// Get the full settings object of a category.
	/// Fields without a stored row take their default.
	pub async fn get_category(&self, clinician_id: &str, category: &str) -> ClResult<Value> {
		let def = self.definition(category)?;
		let scope_prefix = Self::scope_prefix(def, clinician_id)?;

		self.read(def, &scope_prefix).await
	}

	/// Merge a partial settings object into a category and return the result.
	/// All changed fields are written in one transaction.
	pub async fn update_category(
		&self,
		clinician_id: &str,
		category: &str,
		patch: &Value,
	) -> ClResult<Value> {
		let def = self.definition(category)?;
		let scope_prefix = Self::scope_prefix(def, clinician_id)?;
		let changes = def.flatten(patch)?;

		let rows: Vec<SettingRow> = changes
			.iter()
			.map(|(field, value)| {
				SettingRow::new(format!("{}{}", scope_prefix, field.key), value.to_stored())
			})
			.collect();
		self.meta.upsert_settings(&rows).await?;

		info!(
			"Settings category '{}' updated by {} ({} fields)",
			category,
			clinician_id,
			rows.len()
		);

		self.read(def, &scope_prefix).await
	}

	/// Delete every stored row of a category, reverting it to defaults
	pub async fn reset_category(&self, clinician_id: &str, category: &str) -> ClResult<Value> {
		let def = self.definition(category)?;
		let scope_prefix = Self::scope_prefix(def, clinician_id)?;

		let deleted = self
			.meta
			.delete_settings(&format!("{}{}", scope_prefix, def.key_prefix()))
			.await?;
		info!("Settings category '{}' reset by {} ({} rows)", category, clinician_id, deleted);

		Ok(def.defaults())
	}

	/// Describe all registered categories
	pub fn list_categories(&self) -> Vec<&CategoryDefinition> {
		self.registry.list()
	}
}

// vim: ts=4
