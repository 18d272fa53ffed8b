//! SQLite implementation of the Caredesk `MetaAdapter`
//!
//! Settings are stored one leaf per row in a `settings(key, value)` table so
//! that any tool reading plain key/value pairs can inspect them.

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use caredesk::meta_adapter::MetaAdapter;
use caredesk::prelude::*;
use caredesk::types::SettingRow;

mod schema;
mod setting;
mod utils;

const DB_FILE: &str = "meta.db";

#[derive(Debug)]
pub struct MetaAdapterSqlite {
	db: SqlitePool,
}

impl MetaAdapterSqlite {
	/// Opens (or creates) `meta.db` inside `db_dir`
	pub async fn new(db_dir: impl AsRef<Path>) -> ClResult<Self> {
		tokio::fs::create_dir_all(db_dir.as_ref()).await?;
		let db_path = db_dir.as_ref().join(DB_FILE);

		let opts = sqlite::SqliteConnectOptions::new()
			.filename(&db_path)
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		schema::init_db(&db)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		info!("Meta database opened: {}", db_path.display());
		Ok(Self { db })
	}
}

#[async_trait]
impl MetaAdapter for MetaAdapterSqlite {
	// Settings
	//**********
	async fn list_settings(&self, prefix: &str) -> ClResult<Vec<SettingRow>> {
		setting::list(&self.db, prefix).await
	}

	async fn upsert_settings(&self, rows: &[SettingRow]) -> ClResult<()> {
		setting::upsert(&self.db, rows).await
	}

	async fn delete_settings(&self, prefix: &str) -> ClResult<u64> {
		setting::delete(&self.db, prefix).await
	}
}

// vim: ts=4
