use anyhow::{anyhow, Result};
/// JWT token generation and validation using HS256.
/// The shared secret comes from configuration and is installed once at
/// startup before the server accepts requests.
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use uuid::Uuid;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

lazy_static! {
    static ref JWT_KEYS: RwLock<Option<(EncodingKey, DecodingKey)>> = RwLock::new(None);
}

/// Install the signing secret. Must be called during application startup
/// before any JWT operation.
pub fn initialize_keys(secret: &str) -> Result<()> {
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());

    let mut keys = JWT_KEYS
        .write()
        .map_err(|e| anyhow!("Failed to acquire write lock on JWT keys: {}", e))?;
    *keys = Some((encoding_key, decoding_key));
    Ok(())
}

/// Issue an access token for a user. Exposed for tooling and tests; token
/// issuance normally lives in the identity service.
pub fn generate_token(user_id: Uuid, ttl_secs: i64) -> Result<String> {
    let keys = JWT_KEYS
        .read()
        .map_err(|e| anyhow!("Failed to acquire read lock on JWT keys: {}", e))?;
    let (encoding_key, _) = keys
        .as_ref()
        .ok_or_else(|| anyhow!("JWT keys not initialized"))?;

    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::seconds(ttl_secs)).timestamp(),
    };

    encode(&Header::default(), &claims, encoding_key)
        .map_err(|e| anyhow!("Failed to encode token: {}", e))
}

/// Validate a bearer token and return its claims.
pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    let keys = JWT_KEYS
        .read()
        .map_err(|e| anyhow!("Failed to acquire read lock on JWT keys: {}", e))?;
    let (_, decoding_key) = keys
        .as_ref()
        .ok_or_else(|| anyhow!("JWT keys not initialized"))?;

    decode::<Claims>(token, decoding_key, &Validation::default())
        .map_err(|e| anyhow!("Invalid token: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        initialize_keys("test-secret-for-unit-tests").unwrap();

        let user_id = Uuid::new_v4();
        let token = generate_token(user_id, 3600).unwrap();
        let data = validate_token(&token).unwrap();

        assert_eq!(data.claims.sub, user_id.to_string());
        assert!(data.claims.exp > data.claims.iat);
    }

    #[test]
    fn test_garbage_token_rejected() {
        initialize_keys("test-secret-for-unit-tests").unwrap();
        assert!(validate_token("not.a.token").is_err());
    }
}
