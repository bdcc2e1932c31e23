use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::auth::jwt::{JwtKeys, TokenKind};
use crate::error::ApiError;

/// Extracts and verifies the bearer access token, resolving the caller's
/// email. Every failure surfaces as the same 401; the reason is only logged.
#[derive(Debug)]
pub struct AuthUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                warn!("missing Authorization header");
                ApiError::Unauthenticated
            })?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
            .ok_or_else(|| {
                warn!("Authorization header is not a bearer token");
                ApiError::Unauthenticated
            })?;

        let claims = keys.verify(token, TokenKind::Access).map_err(|e| {
            warn!(error = %e, "bearer token rejected");
            ApiError::Unauthenticated
        })?;

        Ok(AuthUser(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use axum::http::Request;

    fn make_keys() -> JwtKeys {
        JwtKeys::new(&JwtConfig {
            access_secret: "access-dev-secret".into(),
            refresh_secret: "refresh-dev-secret".into(),
            access_ttl_minutes: 5,
            refresh_ttl_minutes: 60,
        })
    }

    fn parts_with_header(header: Option<String>) -> axum::http::request::Parts {
        let mut builder = Request::builder().uri("/employee/1");
        if let Some(h) = header {
            builder = builder.header("authorization", h);
        }
        let (parts, _) = builder.body(()).expect("build request").into_parts();
        parts
    }

    #[tokio::test]
    async fn resolves_subject_from_valid_bearer_token() {
        let keys = make_keys();
        let token = keys.sign_access("ak@x.com").expect("sign access");
        let mut parts = parts_with_header(Some(format!("Bearer {token}")));
        let AuthUser(email) = AuthUser::from_request_parts(&mut parts, &keys)
            .await
            .expect("should authenticate");
        assert_eq!(email, "ak@x.com");
    }

    #[tokio::test]
    async fn missing_header_is_unauthenticated() {
        let keys = make_keys();
        let mut parts = parts_with_header(None);
        let err = AuthUser::from_request_parts(&mut parts, &keys)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_unauthenticated() {
        let keys = make_keys();
        let mut parts = parts_with_header(Some("Basic dXNlcjpwYXNz".into()));
        let err = AuthUser::from_request_parts(&mut parts, &keys)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn refresh_token_is_rejected_at_the_gate() {
        let keys = make_keys();
        let token = keys.sign_refresh("ak@x.com").expect("sign refresh");
        let mut parts = parts_with_header(Some(format!("Bearer {token}")));
        let err = AuthUser::from_request_parts(&mut parts, &keys)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn tampered_token_is_unauthenticated() {
        let keys = make_keys();
        let token = keys.sign_access("ak@x.com").expect("sign access");
        let mut tampered = token.clone();
        tampered.push('x');
        let mut parts = parts_with_header(Some(format!("Bearer {tampered}")));
        let err = AuthUser::from_request_parts(&mut parts, &keys)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }
}
