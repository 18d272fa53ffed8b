//! Common types used throughout Caredesk.

use serde::{Deserialize, Serialize};

// SettingRow //
//************//
/// A single flat key/value row of the settings table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingRow {
	pub key: Box<str>,
	pub value: Box<str>,
}

impl SettingRow {
	pub fn new(key: impl Into<Box<str>>, value: impl Into<Box<str>>) -> Self {
		Self { key: key.into(), value: value.into() }
	}
}

// ApiResponse //
//*************//
/// Success envelope returned by every JSON endpoint
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
	pub message: String,
	pub data: T,
	#[serde(rename = "reqId", skip_serializing_if = "Option::is_none")]
	pub req_id: Option<String>,
}

impl<T> ApiResponse<T> {
	pub fn new(message: impl Into<String>, data: T) -> Self {
		Self { message: message.into(), data, req_id: None }
	}

	pub fn with_req_id(mut self, req_id: Option<String>) -> Self {
		self.req_id = req_id;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_api_response_shape() {
		let response = ApiResponse::new("ok", serde_json::json!({ "a": 1 }));
		let json = serde_json::to_value(&response).unwrap();
		assert_eq!(json, serde_json::json!({ "message": "ok", "data": { "a": 1 } }));

		let response = ApiResponse::new("ok", 1).with_req_id(Some("r1".into()));
		let json = serde_json::to_value(&response).unwrap();
		assert_eq!(json["reqId"], "r1");
	}
}

// vim: ts=4
