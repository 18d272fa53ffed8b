//! Shared utilities for the SQLite adapter

use caredesk::prelude::*;

/// Log database error for debugging
pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

// vim: ts=4
