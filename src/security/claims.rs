use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// User that every unauthenticated request runs as when JWTs are optional.
pub const DEMO_USER_ID: &str = "550e8400-e29b-41d4-a716-446655440000";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UserClaims {
    pub sub: String, // User ID (Subject)
    pub name: Option<String>,
    pub roles: Option<Vec<String>>,
    pub exp: usize, // Expiration time (UNIX timestamp)
}

/// Identity attached to a request by the auth middleware.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: String,
    /// `None` for the demo user.
    pub claims: Option<UserClaims>,
}

impl UserContext {
    #[must_use]
    pub fn demo() -> Self {
        Self {
            user_id: DEMO_USER_ID.to_string(),
            claims: None,
        }
    }

    #[must_use]
    pub fn from_claims(claims: UserClaims) -> Self {
        Self {
            user_id: claims.sub.clone(),
            claims: Some(claims),
        }
    }
}

impl<S> FromRequestParts<S> for UserContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}
