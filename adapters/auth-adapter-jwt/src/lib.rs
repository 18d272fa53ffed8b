//! JWT access token adapter
//!
//! Tokens are HS256-signed with a shared secret. The `sub` claim carries the
//! clinician id and `r` the comma-separated role list.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use caredesk::auth_adapter::{AuthAdapter, AuthCtx};
use caredesk::prelude::*;

#[derive(Clone, Debug, Deserialize, Serialize)]
struct AccessToken<S> {
	sub: S,
	iat: u64,
	exp: u64,
	r: Option<S>,
}

pub struct AuthAdapterJwt {
	encoding_key: EncodingKey,
	decoding_key: DecodingKey,
}

impl std::fmt::Debug for AuthAdapterJwt {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AuthAdapterJwt").finish_non_exhaustive()
	}
}

fn now() -> u64 {
	SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default().as_secs()
}

impl AuthAdapterJwt {
	pub fn new(secret: &str) -> ClResult<Self> {
		if secret.is_empty() {
			return Err(Error::ConfigError("JWT secret must not be empty".into()));
		}

		Ok(Self {
			encoding_key: EncodingKey::from_secret(secret.as_bytes()),
			decoding_key: DecodingKey::from_secret(secret.as_bytes()),
		})
	}

	/// Issues an access token for a clinician, valid for `ttl_secs` seconds
	pub fn create_access_token(
		&self,
		clinician_id: &str,
		roles: &[&str],
		ttl_secs: u64,
	) -> ClResult<Box<str>> {
		if clinician_id.is_empty() {
			return Err(Error::ValidationError("Clinician id must not be empty".into()));
		}

		let roles = if roles.is_empty() { None } else { Some(roles.join(",")) };
		let iat = now();
		let claims =
			AccessToken { sub: clinician_id, iat, exp: iat + ttl_secs, r: roles.as_deref() };

		let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
			.map_err(|err| Error::Internal(format!("Failed to sign token: {}", err)))?;

		Ok(token.into())
	}
}

#[async_trait]
impl AuthAdapter for AuthAdapterJwt {
	async fn validate_access_token(&self, token: &str) -> ClResult<AuthCtx> {
		let token_data = decode::<AccessToken<Box<str>>>(
			token,
			&self.decoding_key,
			&Validation::new(Algorithm::HS256),
		)
		.inspect_err(|err| debug!("Rejected access token: {}", err))
		.map_err(|_| Error::Unauthorized)?;

		let claims = token_data.claims;
		if claims.sub.is_empty() {
			return Err(Error::Unauthorized);
		}

		Ok(AuthCtx {
			clinician_id: claims.sub,
			roles: claims
				.r
				.unwrap_or_default()
				.split(',')
				.map(str::trim)
				.filter(|r| !r.is_empty())
				.map(Box::from)
				.collect(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_secret_rejected() {
		assert!(matches!(AuthAdapterJwt::new(""), Err(Error::ConfigError(_))));
	}

	#[tokio::test]
	async fn test_token_round_trip() {
		let adapter = AuthAdapterJwt::new("test-secret").unwrap();
		let token = adapter.create_access_token("clinician1", &["admin", "billing"], 3600).unwrap();

		let auth = adapter.validate_access_token(&token).await.unwrap();
		assert_eq!(auth.clinician_id.as_ref(), "clinician1");
		assert!(auth.is_admin());
		assert!(auth.has_role("billing"));
	}

	#[tokio::test]
	async fn test_token_without_roles() {
		let adapter = AuthAdapterJwt::new("test-secret").unwrap();
		let token = adapter.create_access_token("clinician2", &[], 3600).unwrap();

		let auth = adapter.validate_access_token(&token).await.unwrap();
		assert_eq!(auth.clinician_id.as_ref(), "clinician2");
		assert!(auth.roles.is_empty());
	}

	#[tokio::test]
	async fn test_wrong_secret_rejected() {
		let issuer = AuthAdapterJwt::new("secret-a").unwrap();
		let verifier = AuthAdapterJwt::new("secret-b").unwrap();
		let token = issuer.create_access_token("clinician1", &[], 3600).unwrap();

		assert!(matches!(verifier.validate_access_token(&token).await, Err(Error::Unauthorized)));
	}

	#[tokio::test]
	async fn test_expired_token_rejected() {
		let adapter = AuthAdapterJwt::new("test-secret").unwrap();
		let claims = AccessToken { sub: "clinician1", iat: 0, exp: now() - 3600, r: None };
		let token = encode(&Header::new(Algorithm::HS256), &claims, &adapter.encoding_key).unwrap();

		assert!(matches!(adapter.validate_access_token(&token).await, Err(Error::Unauthorized)));
	}

	#[tokio::test]
	async fn test_garbage_rejected() {
		let adapter = AuthAdapterJwt::new("test-secret").unwrap();
		assert!(matches!(
			adapter.validate_access_token("not.a.token").await,
			Err(Error::Unauthorized)
		));
	}

	#[test]
	fn test_empty_clinician_id_rejected() {
		let adapter = AuthAdapterJwt::new("test-secret").unwrap();
		assert!(adapter.create_access_token("", &[], 60).is_err());
	}
}

// vim: ts=4
