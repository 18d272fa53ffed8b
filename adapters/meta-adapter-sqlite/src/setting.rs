//! Settings key-value store management
//!
//! Every row is a single leaf setting stored as a plain string. Prefix
//! matching compares the leading characters exactly: `LIKE` would treat `_`
//! as a wildcard and ignore ASCII case.

use sqlx::{Row, SqlitePool};

use caredesk::prelude::*;
use caredesk::types::SettingRow;

use crate::utils::inspect;

/// List all settings whose key starts with `prefix`
pub(crate) async fn list(db: &SqlitePool, prefix: &str) -> ClResult<Vec<SettingRow>> {
	let rows =
		sqlx::query("SELECT key, value FROM settings WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key")
			.bind(prefix)
			.fetch_all(db)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

	let mut settings = Vec::with_capacity(rows.len());
	for row in rows {
		let key: String = row.try_get("key").inspect_err(inspect).map_err(|_| Error::DbError)?;
		let value: String =
			row.try_get("value").inspect_err(inspect).map_err(|_| Error::DbError)?;
		settings.push(SettingRow::new(key, value));
	}

	Ok(settings)
}

/// Insert or update all rows inside one transaction
pub(crate) async fn upsert(db: &SqlitePool, rows: &[SettingRow]) -> ClResult<()> {
	if rows.is_empty() {
		return Ok(());
	}

	let mut tx = db.begin().await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	for row in rows {
		sqlx::query(
			"INSERT INTO settings (key, value, updated_at) VALUES (?, ?, unixepoch())
			ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
		)
		.bind(row.key.as_ref())
		.bind(row.value.as_ref())
		.execute(&mut *tx)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;
	}

	tx.commit().await.inspect_err(inspect).map_err(|_| Error::DbError)?;
	debug!("Upserted {} setting rows", rows.len());

	Ok(())
}

/// Delete all settings whose key starts with `prefix`
pub(crate) async fn delete(db: &SqlitePool, prefix: &str) -> ClResult<u64> {
	let res = sqlx::query("DELETE FROM settings WHERE substr(key, 1, length(?1)) = ?1")
		.bind(prefix)
		.execute(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	Ok(res.rows_affected())
}

// vim: ts=4
