// JWT token generation and validation service

use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::error::AuthError;
use crate::auth::models::Role;

/// Canonical token lifetime: one hour for every issuance path
pub const TOKEN_TTL_SECONDS: i64 = 3600;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Token service for JWT operations
///
/// The signing secret is injected at construction and never read from
/// process-wide state. A token stays valid for its full window regardless
/// of later password changes or account deletion; there is no revocation
/// list.
pub struct TokenService {
    secret: String,
    token_ttl: i64,
}

impl TokenService {
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            token_ttl: TOKEN_TTL_SECONDS,
        }
    }

    /// Issue a signed token encoding the subject id and role
    pub fn issue(&self, subject_id: i32, role: Role) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject_id,
            role,
            iat: now,
            exp: now + self.token_ttl,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    /// Decode a token and validate its signature and expiry
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_token_service() -> TokenService {
        TokenService::new("test_secret_key_for_testing_purposes".to_string())
    }

    #[test]
    fn token_expiry_is_one_hour() {
        let service = test_token_service();
        let token = service.issue(1, Role::User).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECONDS);
    }

    #[test]
    fn claims_round_trip_subject_and_role() {
        let service = test_token_service();

        let token = service.issue(42, Role::Admin).unwrap();
        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, Role::Admin);

        let token = service.issue(7, Role::User).unwrap();
        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.role, Role::User);
    }

    #[test]
    fn malformed_tokens_are_invalid() {
        let service = test_token_service();

        for garbage in ["", "not.a.token", "invalid_token_format"] {
            assert!(matches!(
                service.verify(garbage),
                Err(AuthError::InvalidToken)
            ));
        }
    }

    #[test]
    fn altered_signature_is_invalid() {
        let service1 = TokenService::new("secret1".to_string());
        let service2 = TokenService::new("secret2".to_string());

        let token = service1.issue(1, Role::User).unwrap();

        assert!(service1.verify(&token).is_ok());
        assert!(matches!(
            service2.verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn expired_token_fails_with_expired() {
        let service = test_token_service();

        // Encode a token that expired well outside the validation leeway
        let claims = Claims {
            sub: 1,
            role: Role::User,
            iat: Utc::now().timestamp() - 7200,
            exp: Utc::now().timestamp() - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test_secret_key_for_testing_purposes".as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service.verify(&token),
            Err(AuthError::ExpiredToken)
        ));
    }

    proptest! {
        #[test]
        fn prop_issue_verify_round_trip(subject_id in 1i32..1000000) {
            let service = test_token_service();
            let token = service.issue(subject_id, Role::User)?;
            let claims = service.verify(&token)?;
            prop_assert_eq!(claims.sub, subject_id);
            prop_assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECONDS);
        }

        #[test]
        fn prop_random_strings_rejected(garbage in "[a-zA-Z0-9]{10,50}") {
            let service = test_token_service();
            prop_assert!(service.verify(&garbage).is_err());
        }
    }
}
