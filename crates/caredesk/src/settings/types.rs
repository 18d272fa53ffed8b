//! Settings types and definitions
//!
//! A category is a fixed nested schema (`group.field` leaves). Every leaf is
//! stored as its own key/value row, the key being hand-authored per field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

use crate::prelude::*;

/// Category scope defines who shares a settings object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryScope {
	/// Practice-wide: one object shared by every clinician
	#[serde(rename = "practice")]
	Practice,
	/// Per-clinician: keys are namespaced by the clinician id
	#[serde(rename = "clinician")]
	Clinician,
}

/// Primitive type of a leaf setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
	#[serde(rename = "bool")]
	Bool,
	#[serde(rename = "int")]
	Int,
	#[serde(rename = "string")]
	String,
}

impl FieldType {
	pub fn name(self) -> &'static str {
		match self {
			FieldType::Bool => "bool",
			FieldType::Int => "int",
			FieldType::String => "string",
		}
	}
}

/// Setting value types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)] // No type tag - type comes from the field definition
pub enum SettingValue {
	Bool(bool), // Must be before Int to avoid bool -> int coercion
	Int(i64),
	String(String),
}

impl SettingValue {
	pub fn field_type(&self) -> FieldType {
		match self {
			SettingValue::Bool(_) => FieldType::Bool,
			SettingValue::Int(_) => FieldType::Int,
			SettingValue::String(_) => FieldType::String,
		}
	}

	/// Strict conversion from a request value. Returns `None` on type mismatch.
	pub fn from_json(ty: FieldType, value: &Value) -> Option<SettingValue> {
		match (ty, value) {
			(FieldType::Bool, Value::Bool(b)) => Some(SettingValue::Bool(*b)),
			(FieldType::Int, Value::Number(n)) => n.as_i64().map(SettingValue::Int),
			(FieldType::String, Value::String(s)) => Some(SettingValue::String(s.clone())),
			_ => None,
		}
	}

	pub fn to_json(&self) -> Value {
		match self {
			SettingValue::Bool(b) => Value::Bool(*b),
			SettingValue::Int(i) => Value::from(*i),
			SettingValue::String(s) => Value::String(s.clone()),
		}
	}

	/// Storage form: `"true"`/`"false"`, decimal integers, raw strings
	pub fn to_stored(&self) -> String {
		match self {
			SettingValue::Bool(b) => b.to_string(),
			SettingValue::Int(i) => i.to_string(),
			SettingValue::String(s) => s.clone(),
		}
	}

	/// Parses a stored string back using the declared type
	pub fn from_stored(ty: FieldType, stored: &str) -> Option<SettingValue> {
		match ty {
			FieldType::Bool => match stored {
				"true" => Some(SettingValue::Bool(true)),
				"false" => Some(SettingValue::Bool(false)),
				_ => None,
			},
			FieldType::Int => stored.trim().parse().ok().map(SettingValue::Int),
			FieldType::String => Some(SettingValue::String(stored.to_string())),
		}
	}
}

/// Converts a camelCase name to snake_case (`contactForm` -> `contact_form`)
pub fn to_snake_case(name: &str) -> String {
	let mut res = String::with_capacity(name.len() + 4);
	for (i, c) in name.chars().enumerate() {
		if c.is_ascii_uppercase() {
			if i > 0 {
				res.push('_');
			}
			res.push(c.to_ascii_lowercase());
		} else {
			res.push(c);
		}
	}
	res
}

fn is_snake_case(key: &str) -> bool {
	!key.is_empty()
		&& key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
		&& !key.starts_with('_')
		&& !key.ends_with('_')
}

/// Leaf setting definition
#[derive(Debug, Clone, Serialize)]
pub struct FieldDefinition {
	/// Nested path, e.g. "display.startTime"
	pub path: Box<str>,
	/// Storage key, e.g. "calendar_start_time"
	pub key: Box<str>,
	#[serde(rename = "type")]
	pub ty: FieldType,
	pub default: SettingValue,
	#[serde(skip)]
	group: Box<str>,
	#[serde(skip)]
	name: Box<str>,
}

/// Category definition - the fixed schema of one settings object
#[derive(Debug, Clone, Serialize)]
pub struct CategoryDefinition {
	pub name: Box<str>,
	pub description: Box<str>,
	pub scope: CategoryScope,
	pub fields: Vec<FieldDefinition>,
}

impl CategoryDefinition {
	/// Create a builder for constructing a CategoryDefinition
	pub fn builder(name: impl Into<String>) -> CategoryDefinitionBuilder {
		CategoryDefinitionBuilder::new(name)
	}

	/// Prefix shared by the storage keys of every field (`calendar_`)
	pub fn key_prefix(&self) -> String {
		format!("{}_", to_snake_case(&self.name))
	}

	pub fn field(&self, path: &str) -> Option<&FieldDefinition> {
		self.fields.iter().find(|f| f.path.as_ref() == path)
	}

	/// The settings object with every field at its default
	pub fn defaults(&self) -> Value {
		self.reconstruct(&HashMap::new())
	}

	/// Validate a partial nested settings object and flatten it into
	/// (field, value) pairs. Nothing is accepted unless everything is valid.
	pub fn flatten<'a>(&'a self, patch: &Value) -> ClResult<Vec<(&'a FieldDefinition, SettingValue)>> {
		let Value::Object(groups) = patch else {
			return Err(Error::ValidationError(format!(
				"Settings for category '{}' must be an object",
				self.name
			)));
		};

		let mut res = Vec::new();
		for (group, fields) in groups {
			let Value::Object(fields) = fields else {
				return Err(Error::ValidationError(format!(
					"Settings group '{}' must be an object",
					group
				)));
			};

			for (name, value) in fields {
				let path = format!("{}.{}", group, name);
				let def = self.field(&path).ok_or_else(|| {
					Error::ValidationError(format!(
						"Unknown setting '{}' for category '{}'",
						path, self.name
					))
				})?;
				let value = SettingValue::from_json(def.ty, value).ok_or_else(|| {
					Error::ValidationError(format!(
						"Type mismatch for setting '{}': expected {}",
						path,
						def.ty.name()
					))
				})?;
				res.push((def, value));
			}
		}

		Ok(res)
	}

	/// Rebuild the nested settings object from stored rows.
	///
	/// `stored` maps storage keys (without any scope prefix) to raw values.
	/// Missing or unparsable values fall back to the field default.
	pub fn reconstruct(&self, stored: &HashMap<&str, &str>) -> Value {
		let mut root = Map::new();

		for field in &self.fields {
			let value = match stored.get(field.key.as_ref()) {
				Some(raw) => SettingValue::from_stored(field.ty, raw).unwrap_or_else(|| {
					warn!(
						"Stored value {:?} for '{}' is not a valid {}, using default",
						raw,
						field.key,
						field.ty.name()
					);
					field.default.clone()
				}),
				None => field.default.clone(),
			};

			if let Value::Object(group) = root
				.entry(field.group.to_string())
				.or_insert_with(|| Value::Object(Map::new()))
			{
				group.insert(field.name.to_string(), value.to_json());
			}
		}

		Value::Object(root)
	}
}

/// Builder for CategoryDefinition with fluent API
pub struct CategoryDefinitionBuilder {
	name: String,
	description: Option<String>,
	scope: CategoryScope,
	fields: Vec<(String, String, SettingValue)>,
}

impl CategoryDefinitionBuilder {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			description: None,
			scope: CategoryScope::Practice,
			fields: Vec::new(),
		}
	}

	/// Set the description (required)
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Set the category scope (defaults to Practice)
	pub fn scope(mut self, scope: CategoryScope) -> Self {
		self.scope = scope;
		self
	}

	/// Add a leaf field. Its type is the type of `default`.
	pub fn field(
		mut self,
		path: impl Into<String>,
		key: impl Into<String>,
		default: SettingValue,
	) -> Self {
		self.fields.push((path.into(), key.into(), default));
		self
	}

	/// Build the CategoryDefinition
	pub fn build(self) -> ClResult<CategoryDefinition> {
		let description = self
			.description
			.ok_or_else(|| Error::ConfigError("Category description is required".into()))?;

		if self.name.is_empty() || !self.name.chars().all(|c| c.is_ascii_alphanumeric()) {
			return Err(Error::ConfigError(format!("Invalid category name '{}'", self.name)));
		}
		if self.fields.is_empty() {
			return Err(Error::ConfigError(format!("Category '{}' has no fields", self.name)));
		}

		let prefix = format!("{}_", to_snake_case(&self.name));
		let mut paths = HashSet::new();
		let mut keys = HashSet::new();
		let mut fields = Vec::with_capacity(self.fields.len());

		for (path, key, default) in self.fields {
			let Some((group, name)) = path.split_once('.') else {
				return Err(Error::ConfigError(format!(
					"Setting path '{}' must have the form 'group.field'",
					path
				)));
			};
			if group.is_empty() || name.is_empty() || name.contains('.') {
				return Err(Error::ConfigError(format!("Invalid setting path '{}'", path)));
			}
			if !key.starts_with(&prefix) || !is_snake_case(&key) {
				return Err(Error::ConfigError(format!(
					"Setting key '{}' must be snake_case and start with '{}'",
					key, prefix
				)));
			}
			if !paths.insert(path.clone()) {
				return Err(Error::ConfigError(format!("Duplicate setting path '{}'", path)));
			}
			if !keys.insert(key.clone()) {
				return Err(Error::ConfigError(format!("Duplicate setting key '{}'", key)));
			}

			fields.push(FieldDefinition {
				group: group.into(),
				name: name.into(),
				path: path.into(),
				key: key.into(),
				ty: default.field_type(),
				default,
			});
		}

		Ok(CategoryDefinition {
			name: self.name.into(),
			description: description.into(),
			scope: self.scope,
			fields,
		})
	}
}

/// Mutable registry used during app initialization
pub struct SettingsRegistry {
	definitions: HashMap<Box<str>, CategoryDefinition>,
}

impl SettingsRegistry {
	pub fn new() -> Self {
		Self { definitions: HashMap::new() }
	}

	/// Register a new category definition
	pub fn register(&mut self, def: CategoryDefinition) -> ClResult<()> {
		if self.definitions.contains_key(&def.name) {
			return Err(Error::ConfigError(format!(
				"Settings category '{}' is already registered",
				def.name
			)));
		}

		// A prefix scan of one category must never see rows of another
		let prefix = def.key_prefix();
		if let Some(other) = self.definitions.values().find(|d| {
			let other = d.key_prefix();
			other.starts_with(&prefix) || prefix.starts_with(&other)
		}) {
			return Err(Error::ConfigError(format!(
				"Settings category '{}' clashes with '{}'",
				def.name, other.name
			)));
		}

		debug!("Registering settings category: {}", def.name);
		self.definitions.insert(def.name.clone(), def);
		Ok(())
	}

	/// Freeze the registry (make it immutable)
	pub fn freeze(self) -> FrozenSettingsRegistry {
		info!("Freezing settings registry with {} categories", self.definitions.len());
		FrozenSettingsRegistry { definitions: self.definitions }
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

impl Default for SettingsRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// Immutable registry stored in AppState
pub struct FrozenSettingsRegistry {
	definitions: HashMap<Box<str>, CategoryDefinition>,
}

impl FrozenSettingsRegistry {
	/// Get a category definition by name
	pub fn get(&self, name: &str) -> Option<&CategoryDefinition> {
		self.definitions.get(name)
	}

	/// List all registered categories, sorted by name
	pub fn list(&self) -> Vec<&CategoryDefinition> {
		let mut defs: Vec<_> = self.definitions.values().collect();
		defs.sort_by(|a, b| a.name.cmp(&b.name));
		defs
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}


// vim: ts=4
