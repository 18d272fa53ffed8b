//! Request middleware: request ids and bearer token authentication

use axum::{
	extract::{Request, State},
	http::{HeaderName, HeaderValue, header},
	middleware::Next,
	response::Response,
};

use crate::extract::{Auth, RequestId};
use crate::prelude::*;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

const MAX_REQUEST_ID_LEN: usize = 64;

/// Tags every request with a request id, reusing a sane incoming `x-request-id`
pub async fn request_id(mut req: Request, next: Next) -> Response {
	let req_id = req
		.headers()
		.get(&REQUEST_ID_HEADER)
		.and_then(|h| h.to_str().ok())
		.filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
		.map_or_else(|| uuid::Uuid::new_v4().to_string(), str::to_string);

	req.extensions_mut().insert(RequestId(req_id.clone()));
	let mut res = next.run(req).await;

	if let Ok(value) = HeaderValue::from_str(&req_id) {
		res.headers_mut().insert(REQUEST_ID_HEADER, value);
	}
	res
}

/// Rejects the request with 401 unless it carries a valid bearer token
pub async fn require_auth(
	State(app): State<App>,
	mut req: Request,
	next: Next,
) -> ClResult<Response> {
	let token = req
		.headers()
		.get(header::AUTHORIZATION)
		.and_then(|h| h.to_str().ok())
		.and_then(|h| h.strip_prefix("Bearer "))
		.map(str::trim)
		.filter(|token| !token.is_empty())
		.ok_or(Error::Unauthorized)?;

	let auth = app.auth_adapter.validate_access_token(token).await?;
	debug!("Authenticated clinician {}", auth.clinician_id);

	req.extensions_mut().insert(Auth(auth));
	Ok(next.run(req).await)
}

// vim: ts=4
