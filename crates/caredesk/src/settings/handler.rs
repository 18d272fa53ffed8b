//! Settings management handlers

use axum::{
	Json,
	extract::{Query, State},
	http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;

use caredesk_types::auth_adapter::AuthCtx;
use caredesk_types::types::ApiResponse;

use crate::extract::{ApiJson, Auth, OptionalRequestId};
use crate::prelude::*;
use crate::settings::{CategoryDefinition, CategoryScope};

#[derive(Debug, Deserialize)]
pub struct SettingsQuery {
	pub category: Option<String>,
	pub clinician_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClinicianQuery {
	pub clinician_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
	pub category: Option<String>,
	pub settings: Option<Value>,
}

fn require_category(category: Option<&str>) -> ClResult<&str> {
	match category.map(str::trim) {
		Some(category) if !category.is_empty() => Ok(category),
		_ => Err(Error::ValidationError("Category is required".into())),
	}
}

/// Pick the clinician whose settings are addressed.
/// Only per-clinician categories look at `requested`; acting on someone
/// else's settings needs the admin role.
fn resolve_clinician<'a>(
	app: &App,
	auth: &'a AuthCtx,
	category: &str,
	requested: Option<&'a str>,
) -> ClResult<&'a str> {
	let def = app
		.settings_registry
		.get(category)
		.ok_or_else(|| Error::UnknownCategory(category.to_string()))?;

	match (def.scope, requested) {
		(CategoryScope::Clinician, Some(id)) if id != &*auth.clinician_id => {
			if auth.is_admin() {
				Ok(id)
			} else {
				warn!(
					"Clinician {} attempted to access settings of {} without permission",
					auth.clinician_id, id
				);
				Err(Error::PermissionDenied)
			}
		}
		_ => Ok(&*auth.clinician_id),
	}
}

/// GET /api/settings?category=... - Get a category's settings
pub async fn get_settings(
	State(app): State<App>,
	Auth(auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
	Query(query): Query<SettingsQuery>,
) -> ClResult<(StatusCode, Json<ApiResponse<Value>>)> {
	let category = require_category(query.category.as_deref())?;
	let clinician_id = resolve_clinician(&app, &auth, category, query.clinician_id.as_deref())?;

	let data = app.settings.get_category(clinician_id, category).await?;

	let response = ApiResponse::new("Settings retrieved successfully", data).with_req_id(req_id);
	Ok((StatusCode::OK, Json(response)))
}

/// PUT /api/settings - Merge a partial settings object into a category
pub async fn update_settings(
	State(app): State<App>,
	Auth(auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
	Query(query): Query<ClinicianQuery>,
	ApiJson(req): ApiJson<UpdateSettingsRequest>,
) -> ClResult<(StatusCode, Json<ApiResponse<Value>>)> {
	let category = require_category(req.category.as_deref())?;
	let clinician_id = resolve_clinician(&app, &auth, category, query.clinician_id.as_deref())?;
	let settings = req
		.settings
		.as_ref()
		.ok_or_else(|| Error::ValidationError("Settings object is required".into()))?;

	let data = app.settings.update_category(clinician_id, category, settings).await?;

	let response = ApiResponse::new("Settings updated successfully", data).with_req_id(req_id);
	Ok((StatusCode::OK, Json(response)))
}

/// DELETE /api/settings?category=... - Reset a category to its defaults
pub async fn reset_settings(
	State(app): State<App>,
	Auth(auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
	Query(query): Query<SettingsQuery>,
) -> ClResult<(StatusCode, Json<ApiResponse<Value>>)> {
	let category = require_category(query.category.as_deref())?;
	let clinician_id = resolve_clinician(&app, &auth, category, query.clinician_id.as_deref())?;

	let data = app.settings.reset_category(clinician_id, category).await?;

	let response = ApiResponse::new("Settings reset to defaults", data).with_req_id(req_id);
	Ok((StatusCode::OK, Json(response)))
}

/// GET /api/settings/categories - Describe the registered categories
pub async fn list_categories(
	State(app): State<App>,
	Auth(_auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ClResult<(StatusCode, Json<ApiResponse<Vec<CategoryDefinition>>>)> {
	let categories = app.settings.list_categories().into_iter().cloned().collect();

	let response = ApiResponse::new("Settings categories", categories).with_req_id(req_id);
	Ok((StatusCode::OK, Json(response)))
}


// vim: ts=4
