//! Authentication adapter interface

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

/// Role name that allows acting on another clinician's settings
pub const ROLE_ADMIN: &str = "admin";

/// Authenticated caller, attached to the request by the auth middleware
#[derive(Clone, Debug)]
pub struct AuthCtx {
	pub clinician_id: Box<str>,
	pub roles: Box<[Box<str>]>,
}

impl AuthCtx {
	pub fn has_role(&self, role: &str) -> bool {
		self.roles.iter().any(|r| r.as_ref() == role)
	}

	pub fn is_admin(&self) -> bool {
		self.has_role(ROLE_ADMIN)
	}
}

#[async_trait]
pub trait AuthAdapter: Debug + Send + Sync {
	/// Validates a bearer access token and returns the caller it belongs to.
	/// Any failure must be reported as `Error::Unauthorized`.
	async fn validate_access_token(&self, token: &str) -> ClResult<AuthCtx>;
}


// vim: ts=4
