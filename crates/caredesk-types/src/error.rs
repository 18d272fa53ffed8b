//! Error type shared by the server crate and all adapters

use axum::{Json, http::StatusCode, response::IntoResponse};

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// No or invalid caller identity
	Unauthorized,
	PermissionDenied,
	/// Settings category not in the registry
	UnknownCategory(String),
	ValidationError(String),
	DbError,
	ConfigError(String),
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::Unauthorized => write!(f, "Unauthorized"),
			Error::PermissionDenied => write!(f, "Permission denied"),
			Error::UnknownCategory(name) => write!(f, "Invalid category: {}", name),
			Error::ValidationError(msg) => write!(f, "{}", msg),
			Error::DbError => write!(f, "Database error"),
			Error::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
			Error::Internal(msg) => write!(f, "Internal error: {}", msg),
			Error::Io(err) => write!(f, "I/O error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl Error {
	pub fn status_code(&self) -> StatusCode {
		match self {
			Error::Unauthorized => StatusCode::UNAUTHORIZED,
			Error::PermissionDenied => StatusCode::FORBIDDEN,
			Error::UnknownCategory(_) | Error::ValidationError(_) => StatusCode::BAD_REQUEST,
			Error::DbError | Error::ConfigError(_) | Error::Internal(_) | Error::Io(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let status = self.status_code();
		let message = if status.is_server_error() {
			// Details stay in the log, the caller only gets a generic message
			tracing::error!("Request failed: {}", self);
			"Internal server error".to_string()
		} else {
			self.to_string()
		};

		(status, Json(serde_json::json!({ "error": message }))).into_response()
	}
}


// vim: ts=4
