// Authentication middleware for protected routes

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::auth::{error::AuthError, models::Role, token::TokenService};

/// Verified identity attached to a request by the bearer-token stage
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity {
    pub subject_id: i32,
    pub role: Role,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedIdentity
where
    Arc<TokenService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Absent header fails Unauthorized without touching the token service
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::InvalidToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidToken)?;

        let tokens = Arc::<TokenService>::from_ref(state);
        let claims = tokens.verify(token)?;

        Ok(AuthenticatedIdentity {
            subject_id: claims.sub,
            role: claims.role,
        })
    }
}

/// Role gate for administrative routes
///
/// Runs strictly after identity extraction: a request that fails token
/// verification never reaches the role comparison. The comparison is an
/// exhaustive match on Role rather than a string check.
pub async fn require_admin(
    State(tokens): State<Arc<TokenService>>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let endpoint = request.uri().path().to_string();

    let (mut parts, body) = request.into_parts();
    let identity = AuthenticatedIdentity::from_request_parts(&mut parts, &tokens)
        .await
        .map_err(|e| {
            warn!("Rejected request to protected endpoint {}: {}", endpoint, e);
            e
        })?;

    match identity.role {
        Role::Admin => {}
        Role::User => {
            return Err(AuthError::InsufficientPermissions {
                required: Role::Admin,
                actual: identity.role,
            });
        }
    }

    debug!(
        "Authorization successful: subject_id={}, role={}, endpoint={}",
        identity.subject_id, identity.role, endpoint
    );

    let mut request = Request::from_parts(parts, body);
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;
    use proptest::prelude::*;

    fn test_state() -> Arc<TokenService> {
        Arc::new(TokenService::new(
            "test_secret_key_for_testing_purposes".to_string(),
        ))
    }

    fn parts_with_auth(auth_value: &str) -> Parts {
        let req = HttpRequest::builder()
            .uri("/")
            .header(header::AUTHORIZATION, auth_value)
            .body(())
            .unwrap();
        let (parts, _) = req.into_parts();
        parts
    }

    fn parts_without_auth() -> Parts {
        let req = HttpRequest::builder().uri("/").body(()).unwrap();
        let (parts, _) = req.into_parts();
        parts
    }

    #[tokio::test]
    async fn valid_token_attaches_identity() {
        let state = test_state();
        let token = state.issue(42, Role::User).unwrap();

        let mut parts = parts_with_auth(&format!("Bearer {}", token));
        let identity = AuthenticatedIdentity::from_request_parts(&mut parts, &state)
            .await
            .unwrap();

        assert_eq!(identity.subject_id, 42);
        assert_eq!(identity.role, Role::User);
    }

    #[tokio::test]
    async fn missing_header_is_missing_token() {
        let state = test_state();
        let mut parts = parts_without_auth();
        let result = AuthenticatedIdentity::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingToken)));
    }

    #[tokio::test]
    async fn non_bearer_schemes_are_invalid() {
        let state = test_state();

        for auth_value in ["Basic dXNlcjpwYXNz", "token_without_bearer", "InvalidFormat token"] {
            let mut parts = parts_with_auth(auth_value);
            let result = AuthenticatedIdentity::from_request_parts(&mut parts, &state).await;
            assert!(matches!(result, Err(AuthError::InvalidToken)));
        }
    }

    #[tokio::test]
    async fn tampered_token_is_invalid() {
        let state = test_state();
        let other = TokenService::new("a_different_secret_entirely".to_string());
        let token = other.issue(1, Role::Admin).unwrap();

        let mut parts = parts_with_auth(&format!("Bearer {}", token));
        let result = AuthenticatedIdentity::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    proptest! {
        #[test]
        fn prop_garbage_bearer_values_rejected(garbage in "[a-zA-Z0-9]{10,50}") {
            let state = test_state();
            let mut parts = parts_with_auth(&format!("Bearer {}", garbage));

            let rt = tokio::runtime::Runtime::new().unwrap();
            let result = rt.block_on(AuthenticatedIdentity::from_request_parts(&mut parts, &state));
            prop_assert!(result.is_err());
        }
    }
}
