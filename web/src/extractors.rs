//! Custom Axum extractors.
//!
//! Identity is asserted upstream by the auth gateway and forwarded as plain
//! headers (`x-user-id`, `x-user-role`). The extractor here only parses the
//! assertion; authorization decisions (role checks, ownership) live in the
//! lifecycle engine against the account store.
//!
//! # Examples
//!
//! ```ignore
//! use helphive_web::extractors::Identity;
//!
//! async fn handler(identity: Identity) -> Result<Json<Response>, AppError> {
//!     tracing::info!(account_id = %identity.account_id, "Processing request");
//!     Ok(Json(response))
//! }
//! ```

use crate::error::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use helphive_core::types::{AccountId, Role};
use uuid::Uuid;

/// Header carrying the caller's account id, set by the auth gateway.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the caller's claimed role, set by the auth gateway.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// The authenticated caller, parsed from the gateway headers.
///
/// Rejects with 401 when `x-user-id` is absent or not a UUID. The claimed
/// role is advisory only; the engine resolves the authoritative role from
/// the account store before letting a caller accept a request.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    /// The caller's account id.
    pub account_id: AccountId,
    /// The role the gateway claims for the caller, when parseable.
    pub claimed_role: Option<Role>,
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let account_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .map(AccountId::from_uuid)
            .ok_or_else(|| AppError::unauthorized("missing or malformed x-user-id header"))?;

        let claimed_role = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok());

        Ok(Self {
            account_id,
            claimed_role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn test_identity_from_headers() {
        let uuid = Uuid::new_v4();
        let req = Request::builder()
            .header(USER_ID_HEADER, uuid.to_string())
            .header(USER_ROLE_HEADER, "volunteer")
            .body(())
            .expect("Valid request");

        let (mut parts, _) = req.into_parts();
        let identity = Identity::from_request_parts(&mut parts, &())
            .await
            .expect("Should extract");

        assert_eq!(*identity.account_id.as_uuid(), uuid);
        assert_eq!(identity.claimed_role, Some(Role::Volunteer));
    }

    #[tokio::test]
    async fn test_missing_user_id_is_rejected() {
        let req = Request::builder().body(()).expect("Valid request");

        let (mut parts, _) = req.into_parts();
        let result = Identity::from_request_parts(&mut parts, &()).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_malformed_user_id_is_rejected() {
        let req = Request::builder()
            .header(USER_ID_HEADER, "not-a-uuid")
            .body(())
            .expect("Valid request");

        let (mut parts, _) = req.into_parts();
        let result = Identity::from_request_parts(&mut parts, &()).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unknown_role_is_ignored() {
        let req = Request::builder()
            .header(USER_ID_HEADER, Uuid::new_v4().to_string())
            .header(USER_ROLE_HEADER, "superadmin")
            .body(())
            .expect("Valid request");

        let (mut parts, _) = req.into_parts();
        let identity = Identity::from_request_parts(&mut parts, &())
            .await
            .expect("Should extract");

        assert_eq!(identity.claimed_role, None);
    }
}
