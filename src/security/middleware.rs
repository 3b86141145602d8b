use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use super::claims::{UserClaims, UserContext};
use crate::AppState;
use crate::error::AppError;

/// Attach a [`UserContext`] to the request.
///
/// A valid `Bearer` JWT yields its subject. Without a token the request runs
/// as the demo user unless `security.jwt_required` is set.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let required = state.config.security.jwt_required;
    attach_context(&state, required, request, next).await
}

/// [`auth_middleware`] for the public demo endpoints: a missing token always
/// means the demo user. A token that is present must still be valid.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    attach_context(&state, false, request, next).await
}

async fn attach_context(
    state: &AppState,
    required: bool,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let context = match auth_header.and_then(|v| v.strip_prefix("Bearer ")) {
        Some(token) => {
            let claims = decode_token(token.trim(), &state.config.security.jwt_secret)?;
            UserContext::from_claims(claims)
        }
        None if required => return Err(AppError::Unauthorized),
        None => UserContext::demo(),
    };

    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}

/// Decode and validate an HS256 token.
pub fn decode_token(token: &str, secret: &str) -> Result<UserClaims, AppError> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    decode::<UserClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!(name: "auth.token.rejected", error = %e, "Rejected bearer token");
            AppError::Unauthorized
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn token(secret: &str, exp: usize) -> String {
        let claims = UserClaims {
            sub: "user-42".to_string(),
            name: Some("Grace".to_string()),
            roles: None,
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn far_future() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[test]
    fn test_decode_valid_token() {
        let claims = decode_token(&token("s3cret", far_future()), "s3cret").unwrap();
        assert_eq!(claims.sub, "user-42");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        assert!(matches!(
            decode_token(&token("s3cret", far_future()), "other"),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        assert!(decode_token(&token("s3cret", 1_000), "s3cret").is_err());
    }
}
