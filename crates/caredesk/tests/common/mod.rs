//! Shared helpers for the integration tests

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use caredesk::{App, AppBuilder};
use caredesk_auth_adapter_jwt::AuthAdapterJwt;
use caredesk_meta_adapter_sqlite::MetaAdapterSqlite;
use caredesk_types::meta_adapter::MetaAdapter;

pub const JWT_SECRET: &str = "integration-test-secret";

pub struct TestApp {
	pub app: App,
	pub router: Router,
	pub meta: Arc<MetaAdapterSqlite>,
	pub auth: Arc<AuthAdapterJwt>,
	_tmp: TempDir,
}

impl TestApp {
	pub async fn new() -> TestApp {
		let tmp = TempDir::new().expect("Failed to create temp directory");
		let meta = Arc::new(MetaAdapterSqlite::new(tmp.path()).await.expect("Failed to open db"));
		let auth = Arc::new(AuthAdapterJwt::new(JWT_SECRET).expect("Failed to create auth"));

		let app = build_app(meta.clone(), auth.clone());
		let router = caredesk::routes::init(app.clone());

		TestApp { app, router, meta, auth, _tmp: tmp }
	}

	pub fn token(&self, clinician_id: &str, roles: &[&str]) -> String {
		self.auth.create_access_token(clinician_id, roles, 3600).expect("Failed to sign").into()
	}

	pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
		send(&self.router, "GET", uri, token, None).await
	}

	pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
		send(&self.router, "PUT", uri, token, Some(body)).await
	}

	pub async fn put_raw(&self, uri: &str, token: Option<&str>, body: &str) -> (StatusCode, Value) {
		send_raw(&self.router, "PUT", uri, token, Some(body.to_string())).await
	}

	pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
		send(&self.router, "DELETE", uri, token, None).await
	}
}

pub fn build_app(meta: Arc<dyn MetaAdapter>, auth: Arc<AuthAdapterJwt>) -> App {
	let mut builder = AppBuilder::new();
	builder.meta_adapter(meta).auth_adapter(auth);
	builder.build().expect("Failed to build app")
}

pub async fn send(
	router: &Router,
	method: &str,
	uri: &str,
	token: Option<&str>,
	body: Option<Value>,
) -> (StatusCode, Value) {
	send_raw(router, method, uri, token, body.map(|body| body.to_string())).await
}

pub async fn send_raw(
	router: &Router,
	method: &str,
	uri: &str,
	token: Option<&str>,
	body: Option<String>,
) -> (StatusCode, Value) {
	let mut req = Request::builder().method(method).uri(uri);
	if let Some(token) = token {
		req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
	}
	let req = match body {
		Some(body) => req
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(body)),
		None => req.body(Body::empty()),
	}
	.expect("Failed to build request");

	let res = router.clone().oneshot(req).await.expect("Request failed");
	let status = res.status();
	let bytes = res.into_body().collect().await.expect("Failed to read body").to_bytes();
	let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

	(status, json)
}

// vim: ts=4
