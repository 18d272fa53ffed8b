use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;

use crate::middleware::{request_id, require_auth};
use crate::prelude::*;
use crate::settings;

pub fn init(app: App) -> Router {
	let protected_router = Router::new()
		.route(
			"/api/settings",
			get(settings::handler::get_settings)
				.put(settings::handler::update_settings)
				.delete(settings::handler::reset_settings),
		)
		.route("/api/settings/categories", get(settings::handler::list_categories))
		.route_layer(middleware::from_fn_with_state(app.clone(), require_auth));

	let public_router: Router<App> = Router::new().route("/health", get(|| async { "ok" }));

	Router::new()
		.merge(public_router)
		.merge(protected_router)
		.layer(middleware::from_fn(request_id))
		.layer(TraceLayer::new_for_http())
		.with_state(app)
}

// vim: ts=4
