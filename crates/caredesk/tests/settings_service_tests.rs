//! Settings service tests against stub and real storage

mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;

use caredesk_auth_adapter_jwt::AuthAdapterJwt;
use caredesk_types::meta_adapter::MetaAdapter;
use caredesk_types::prelude::*;
use caredesk_types::types::SettingRow;
use common::{JWT_SECRET, TestApp, build_app, send};

/// Storage that fails every call
#[derive(Debug)]
struct BrokenMeta;

#[async_trait]
impl MetaAdapter for BrokenMeta {
	async fn list_settings(&self, _prefix: &str) -> ClResult<Vec<SettingRow>> {
		Err(Error::DbError)
	}
	async fn upsert_settings(&self, _rows: &[SettingRow]) -> ClResult<()> {
		Err(Error::DbError)
	}
	async fn delete_settings(&self, _prefix: &str) -> ClResult<u64> {
		Err(Error::DbError)
	}
}

#[tokio::test]
async fn test_storage_failure_is_internal_error() {
	let auth = Arc::new(AuthAdapterJwt::new(JWT_SECRET).unwrap());
	let app = build_app(Arc::new(BrokenMeta), auth.clone());
	let router = caredesk::routes::init(app);
	let token: String = auth.create_access_token("clinician1", &[], 60).unwrap().into();

	let (status, body) =
		send(&router, "GET", "/api/settings?category=calendar", Some(&token), None).await;
	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body, json!({ "error": "Internal server error" }));

	let (status, body) = send(
		&router,
		"PUT",
		"/api/settings",
		Some(&token),
		Some(json!({ "category": "calendar", "settings": { "display": { "viewMode": "day" } } })),
	)
	.await;
	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body, json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn test_values_are_stored_as_strings() {
	let t = TestApp::new().await;

	t.app
		.settings
		.update_category(
			"clinician1",
			"billing",
			&json!({ "invoices": { "autoGenerate": true, "dueDays": 45 } }),
		)
		.await
		.unwrap();

	let rows = t.meta.list_settings("billing_").await.unwrap();
	assert_eq!(
		rows,
		vec![
			SettingRow::new("billing_auto_generate_invoices", "true"),
			SettingRow::new("billing_invoice_due_days", "45"),
		]
	);
}

#[tokio::test]
async fn test_unparsable_stored_value_falls_back_to_default() {
	let t = TestApp::new().await;

	t.meta
		.upsert_settings(&[
			SettingRow::new("calendar_show_weekends", "maybe"),
			SettingRow::new("calendar_cancellation_notice_hours", "twelve"),
			SettingRow::new("calendar_view_mode", "day"),
		])
		.await
		.unwrap();

	let data = t.app.settings.get_category("clinician1", "calendar").await.unwrap();
	assert_eq!(data["display"]["showWeekends"], false);
	assert_eq!(data["display"]["cancellationNoticeHours"], 24);
	assert_eq!(data["display"]["viewMode"], "day");
}

#[tokio::test]
async fn test_unknown_rows_are_ignored() {
	let t = TestApp::new().await;

	t.meta.upsert_settings(&[SettingRow::new("portal_legacy_theme", "dark")]).await.unwrap();

	let data = t.app.settings.get_category("clinician1", "portal").await.unwrap();
	assert_eq!(data["general"]["isEnabled"], false);
	assert!(data.get("legacy").is_none());
}

#[tokio::test]
async fn test_empty_patch_changes_nothing() {
	let t = TestApp::new().await;

	let data = t.app.settings.update_category("clinician1", "calendar", &json!({})).await.unwrap();
	assert_eq!(data, t.app.settings_registry.get("calendar").unwrap().defaults());
	assert!(t.meta.list_settings("").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_float_is_rejected_for_int_field() {
	let t = TestApp::new().await;

	let res = t
		.app
		.settings
		.update_category("clinician1", "billing", &json!({ "invoices": { "dueDays": 30.5 } }))
		.await;
	assert!(matches!(res, Err(Error::ValidationError(_))));
}

#[tokio::test]
async fn test_invalid_clinician_id_is_rejected() {
	let t = TestApp::new().await;

	let res = t.app.settings.get_category("a:b", "notifications").await;
	assert!(matches!(res, Err(Error::ValidationError(_))));

	// Practice-wide categories never look at the clinician id
	let res = t.app.settings.get_category("a:b", "calendar").await;
	assert!(res.is_ok());
}

#[tokio::test]
async fn test_reset_only_touches_own_scope() {
	let t = TestApp::new().await;
	let patch = json!({ "email": { "reminderLeadHours": 6 } });

	t.app.settings.update_category("clinician1", "notifications", &patch).await.unwrap();
	t.app.settings.update_category("clinician2", "notifications", &patch).await.unwrap();

	t.app.settings.reset_category("clinician1", "notifications").await.unwrap();

	let one = t.app.settings.get_category("clinician1", "notifications").await.unwrap();
	let two = t.app.settings.get_category("clinician2", "notifications").await.unwrap();
	assert_eq!(one["email"]["reminderLeadHours"], 24);
	assert_eq!(two["email"]["reminderLeadHours"], 6);
}

// vim: ts=4
