use std::sync::Arc;
use std::{env, path};

use caredesk::AppBuilder;
use caredesk_auth_adapter_jwt::AuthAdapterJwt;
use caredesk_meta_adapter_sqlite::MetaAdapterSqlite;
use caredesk_types::prelude::*;

const TOKEN_TTL_SECS: u64 = 12 * 3600;

pub struct Config {
	pub listen: String,
	pub db_dir: path::PathBuf,
	pub jwt_secret: String,
}

impl Config {
	fn from_env() -> ClResult<Self> {
		Ok(Config {
			listen: env::var("LISTEN").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
			db_dir: path::PathBuf::from(env::var("DB_DIR").unwrap_or_else(|_| "./data".to_string())),
			jwt_secret: env::var("JWT_SECRET")
				.map_err(|_| Error::ConfigError("JWT_SECRET is not set".into()))?,
		})
	}
}

#[tokio::main]
async fn main() -> ClResult<()> {
	// Installs the tracing subscriber, so it comes first
	let mut builder = AppBuilder::new();

	let config = Config::from_env().inspect_err(|err| error!("{}", err))?;
	let auth_adapter = Arc::new(AuthAdapterJwt::new(&config.jwt_secret)?);

	let mut args = env::args().skip(1);
	if let Some(cmd) = args.next() {
		if cmd != "token" {
			return Err(Error::ConfigError(format!("Unknown command '{}'", cmd)));
		}
		let clinician_id = args
			.next()
			.ok_or_else(|| Error::ConfigError("Usage: caredesk-server token <clinician_id> [roles]".into()))?;
		let roles = args.next().unwrap_or_default();
		let roles: Vec<&str> = roles.split(',').map(str::trim).filter(|r| !r.is_empty()).collect();

		let token = auth_adapter.create_access_token(&clinician_id, &roles, TOKEN_TTL_SECS)?;
		println!("{}", token);
		return Ok(());
	}

	let meta_adapter = Arc::new(MetaAdapterSqlite::new(&config.db_dir).await?);

	builder.listen(config.listen).auth_adapter(auth_adapter).meta_adapter(meta_adapter);
	builder.run().await
}

// vim: ts=4
