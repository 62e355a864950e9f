use crate::{config::Config, models::Role, utils::error::AppError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token lifetime. Expiry forces a full re-login; there is no refresh flow.
const TOKEN_TTL_SECS: i64 = 3600;

/// Identity assertion carried by every issued token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // external user id
    pub role: Role,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
    pub jti: String,
}

/// Signing material, derived from the configured secret once at startup and
/// shared read-only across requests for the process lifetime.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn from_config(config: &Config) -> Self {
        Self::from_secret(&config.jwt_secret)
    }

    pub fn from_secret(secret: &str) -> Self {
        JwtKeys {
            encoding: EncodingKey::from_secret(secret.as_ref()),
            decoding: DecodingKey::from_secret(secret.as_ref()),
        }
    }
}

/// Issues a signed assertion of the three identity fields, expiring one hour
/// from now.
pub fn issue(keys: &JwtKeys, external_id: &str, role: Role, email: &str) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: external_id.to_string(),
        role,
        email: email.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::seconds(TOKEN_TTL_SECS)).timestamp() as usize,
        jti: Uuid::new_v4().to_string(),
    };

    encode(&Header::default(), &claims, &keys.encoding)
        .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
}

/// Validates signature and expiry. A token past its expiry instant fails
/// `ExpiredToken`; a bad signature or malformed input fails `InvalidToken`.
pub fn verify(keys: &JwtKeys, token: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(token, &keys.decoding, &validation)
        .map(|data| data.claims)
        .map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_keys() -> JwtKeys {
        JwtKeys::from_secret("test-secret")
    }

    fn encode_with_age(keys: &JwtKeys, age_secs: i64) -> String {
        let issued = Utc::now() - Duration::seconds(age_secs);
        let claims = Claims {
            sub: "S100".to_string(),
            role: Role::Student,
            email: "jo@x.com".to_string(),
            iat: issued.timestamp() as usize,
            exp: (issued + Duration::seconds(TOKEN_TTL_SECS)).timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
        };
        encode(&Header::default(), &claims, &keys.encoding).unwrap()
    }

    #[test]
    fn test_issue_verify_round_trip() {
        let keys = test_keys();
        let token = issue(&keys, "T001", Role::Teacher, "a@x.com").unwrap();

        let claims = verify(&keys, &token).unwrap();
        assert_eq!(claims.sub, "T001");
        assert_eq!(claims.role, Role::Teacher);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp, claims.iat + TOKEN_TTL_SECS as usize);
    }

    #[test]
    fn test_token_issued_59_minutes_ago_still_verifies() {
        let keys = test_keys();
        let token = encode_with_age(&keys, 59 * 60);
        assert!(verify(&keys, &token).is_ok());
    }

    #[test]
    fn test_token_older_than_one_hour_is_expired() {
        let keys = test_keys();
        let token = encode_with_age(&keys, 61 * 60);
        assert!(matches!(verify(&keys, &token), Err(AppError::ExpiredToken)));
    }

    #[test]
    fn test_wrong_key_fails_invalid() {
        let keys = test_keys();
        let token = issue(&keys, "S100", Role::Student, "jo@x.com").unwrap();

        let other = JwtKeys::from_secret("another-secret");
        assert!(matches!(verify(&other, &token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_garbage_token_fails_invalid() {
        let keys = test_keys();
        assert!(matches!(
            verify(&keys, "not-a-jwt"),
            Err(AppError::InvalidToken)
        ));
    }
}
