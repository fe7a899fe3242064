//! JWT Token Service
//!
//! Handles JWT creation, validation, and claims management for user
//! authentication. Tokens are stateless: the claims duplicate the user's
//! identity and role so authorization never needs a database round trip.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::models::AuthUser;
use crate::database::models::UserRole;

const ISSUER: &str = "conecta-server";

/// Tokens expire 7 days after issuance.
const TOKEN_TTL_DAYS: i64 = 7;

/// JWT Claims structure containing user information and token metadata
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User unique identifier
    pub sub: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
    /// Token issuer
    pub iss: String,
}

/// JWT Service for token operations
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    /// Create a new JWT service with the provided secret
    pub fn new(secret: &str) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::default();
        validation.set_issuer(&[ISSUER]);

        Self {
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Generate a JWT token carrying the user's identity and role claims
    pub fn create_token(&self, user: &AuthUser) -> Result<String> {
        let now = Utc::now();
        let expiration = now + Duration::days(TOKEN_TTL_DAYS);

        let claims = Claims {
            sub: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            iss: ISSUER.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).context("Failed to encode JWT token")
    }

    /// Validate and decode a JWT token
    pub fn validate_token(&self, token: &str) -> Result<TokenData<Claims>> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .context("Failed to validate JWT token")
    }

    /// Extract claims from a validated token
    pub fn decode_claims(&self, token: &str) -> Result<Claims> {
        let token_data = self.validate_token(token)?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(role: UserRole) -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            first_name: "Ana".to_string(),
            last_name: "Silva".to_string(),
            email: "ana@exemplo.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_jwt_roundtrip() {
        let jwt_service = JwtService::new("test_secret");
        let user = sample_user(UserRole::Administrator);

        let token = jwt_service.create_token(&user).unwrap();
        let claims = jwt_service.decode_claims(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, UserRole::Administrator);
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_DAYS * 24 * 60 * 60);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let jwt_service = JwtService::new("test_secret");
        let user = sample_user(UserRole::Member);

        // Forge claims whose expiry is well past the validation leeway.
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            iat: (now - Duration::days(8)).timestamp(),
            exp: (now - Duration::days(1)).timestamp(),
            iss: ISSUER.to_string(),
        };
        let token = encode(&Header::default(), &claims, &jwt_service.encoding_key).unwrap();

        assert!(jwt_service.validate_token(&token).is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = JwtService::new("secret_a");
        let verifier = JwtService::new("secret_b");
        let user = sample_user(UserRole::Member);

        let token = issuer.create_token(&user).unwrap();

        assert!(verifier.validate_token(&token).is_err());
        assert!(issuer.validate_token(&token).is_ok());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let jwt_service = JwtService::new("test_secret");
        assert!(jwt_service.validate_token("not.a.jwt").is_err());
    }
}
