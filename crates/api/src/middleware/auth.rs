//! Authentication middleware for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{AppState, error::ApiError};
use ledgerlink_shared::{JwtError, Tenant};

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Authentication middleware that resolves the request's tenant.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token using the JWT service
/// 3. Stores the resolved tenant in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return ApiError::unauthenticated(
            "MISSING_TOKEN",
            "Authorization header with Bearer token is required",
        )
        .into_response();
    };

    match state.jwt_service.resolve_tenant(token) {
        Ok(tenant) => {
            request.extensions_mut().insert(tenant);
            next.run(request).await
        }
        Err(e) => {
            let (code, message) = match e {
                JwtError::Expired => ("TOKEN_EXPIRED", "Token has expired"),
                JwtError::MissingTenant => ("MISSING_TENANT", "Token does not identify a tenant"),
                _ => ("INVALID_TOKEN", "Invalid or malformed token"),
            };
            ApiError::unauthenticated(code, message).into_response()
        }
    }
}

/// Extractor for the authenticated tenant.
///
/// ```ignore
/// async fn handler(AuthTenant(tenant): AuthTenant) -> impl IntoResponse {
///     // tenant.id scopes everything this handler touches
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthTenant(pub Tenant);

impl<S> FromRequestParts<S> for AuthTenant
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Tenant>()
            .cloned()
            .map(AuthTenant)
            .ok_or_else(|| ApiError::unauthenticated("UNAUTHORIZED", "Authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Bearer abc", Some("abc"))]
    #[case("bearer abc", Some("abc"))]
    #[case("Bearer ", None)]
    #[case("Basic abc", None)]
    #[case("abc", None)]
    fn test_extract_bearer_token(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_bearer_token(header), expected);
    }
}
