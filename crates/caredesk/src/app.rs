//! App state and builder - constructs and runs the Caredesk application

use std::sync::Arc;

use caredesk_types::auth_adapter::AuthAdapter;
use caredesk_types::meta_adapter::MetaAdapter;

use crate::prelude::*;
use crate::routes;
use crate::settings::categories::register_categories;
use crate::settings::service::SettingsService;
use crate::settings::{FrozenSettingsRegistry, SettingsRegistry};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub opts: AppBuilderOpts,

	pub auth_adapter: Arc<dyn AuthAdapter>,

	// Settings subsystem
	pub settings: Arc<SettingsService>,
	pub settings_registry: Arc<FrozenSettingsRegistry>,
}

pub type App = Arc<AppState>;

pub struct Adapters {
	pub auth_adapter: Option<Arc<dyn AuthAdapter>>,
	pub meta_adapter: Option<Arc<dyn MetaAdapter>>,
}

#[derive(Debug)]
pub struct AppBuilderOpts {
	pub listen: Box<str>,
}

pub struct AppBuilder {
	opts: AppBuilderOpts,
	adapters: Adapters,
}

impl AppBuilder {
	pub fn new() -> Self {
		// A subscriber may already be installed (tests build several apps)
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init();
		AppBuilder {
			opts: AppBuilderOpts { listen: "127.0.0.1:8080".into() },
			adapters: Adapters { auth_adapter: None, meta_adapter: None },
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}

	// Adapters
	pub fn auth_adapter(&mut self, auth_adapter: Arc<dyn AuthAdapter>) -> &mut Self {
		self.adapters.auth_adapter = Some(auth_adapter);
		self
	}
	pub fn meta_adapter(&mut self, meta_adapter: Arc<dyn MetaAdapter>) -> &mut Self {
		self.adapters.meta_adapter = Some(meta_adapter);
		self
	}

	/// Assemble the application state
	pub fn build(self) -> ClResult<App> {
		let auth_adapter = self
			.adapters
			.auth_adapter
			.ok_or_else(|| Error::ConfigError("No auth adapter configured".into()))?;
		let meta_adapter = self
			.adapters
			.meta_adapter
			.ok_or_else(|| Error::ConfigError("No meta adapter configured".into()))?;

		let mut registry = SettingsRegistry::new();
		register_categories(&mut registry)?;
		let settings_registry = Arc::new(registry.freeze());
		let settings =
			Arc::new(SettingsService::new(settings_registry.clone(), meta_adapter));

		Ok(Arc::new(AppState {
			opts: self.opts,
			auth_adapter,
			settings,
			settings_registry,
		}))
	}

	/// Build the application and serve HTTP until Ctrl-C
	pub async fn run(self) -> ClResult<()> {
		info!("Caredesk v{} starting", VERSION);
		let app = self.build()?;
		let router = routes::init(app.clone());

		let listener = tokio::net::TcpListener::bind(app.opts.listen.as_ref()).await?;
		info!("Listening on {}", listener.local_addr()?);

		axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

		info!("Shutdown complete");
		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

async fn shutdown_signal() {
	match tokio::signal::ctrl_c().await {
		Ok(()) => info!("Shutdown signal received"),
		Err(err) => error!("Failed to listen for shutdown signal: {}", err),
	}
}

// vim: ts=4
