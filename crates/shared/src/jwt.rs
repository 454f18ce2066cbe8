//! Admin session tokens.
//!
//! Tokens are signed with RS256 in production. Tests may build a config from a
//! shared secret, in which case HS256 is used instead.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Scope granted by a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenScope {
    Admin,
}

/// JWT token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (admin user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// JWT ID
    pub jti: String,
    pub scope: TokenScope,
}

/// An issued token together with its identifier and lifetime.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub jti: String,
    pub expires_in: i64,
}

/// Configuration for token generation and validation.
#[derive(Clone)]
pub struct JwtConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    /// Access token expiration in seconds
    pub access_token_expiry_secs: i64,
    /// Leeway in seconds for clock skew tolerance
    pub leeway_secs: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("algorithm", &self.algorithm)
            .field("access_token_expiry_secs", &self.access_token_expiry_secs)
            .field("leeway_secs", &self.leeway_secs)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

/// Default leeway in seconds for clock skew tolerance
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

impl JwtConfig {
    /// Creates a JwtConfig from an RSA key pair in PEM format.
    pub fn new(
        private_key_pem: &str,
        public_key_pem: &str,
        access_token_expiry_secs: i64,
    ) -> Result<Self, JwtError> {
        Self::with_leeway(
            private_key_pem,
            public_key_pem,
            access_token_expiry_secs,
            DEFAULT_LEEWAY_SECS,
        )
    }

    /// Creates a JwtConfig from an RSA key pair in PEM format with custom leeway.
    pub fn with_leeway(
        private_key_pem: &str,
        public_key_pem: &str,
        access_token_expiry_secs: i64,
        leeway_secs: u64,
    ) -> Result<Self, JwtError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
            .map_err(|e| JwtError::InvalidKey(format!("Invalid private key: {}", e)))?;

        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| JwtError::InvalidKey(format!("Invalid public key: {}", e)))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            algorithm: Algorithm::RS256,
            access_token_expiry_secs,
            leeway_secs,
        })
    }

    /// Creates a JwtConfig backed by a shared HS256 secret.
    /// Only meant for tests.
    pub fn from_secret(secret: &str, access_token_expiry_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
            access_token_expiry_secs,
            leeway_secs: 0,
        }
    }

    /// Issues an admin access token for the given admin user.
    pub fn issue_admin_token(&self, admin_id: Uuid) -> Result<IssuedToken, JwtError> {
        let now = Utc::now();
        let jti = Uuid::new_v4().to_string();
        let exp = (now + Duration::seconds(self.access_token_expiry_secs)).timestamp();

        let claims = Claims {
            sub: admin_id.to_string(),
            exp,
            iat: now.timestamp(),
            jti: jti.clone(),
            scope: TokenScope::Admin,
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))?;

        Ok(IssuedToken {
            token,
            jti,
            expires_in: self.access_token_expiry_secs,
        })
    }

    /// Validates a token and returns its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidToken,
                _ => JwtError::DecodingError(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Validates a token and requires the admin scope.
    pub fn validate_admin_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;
        if claims.scope != TokenScope::Admin {
            return Err(JwtError::InvalidToken);
        }
        Ok(claims)
    }
}

/// Extracts the admin ID from validated claims.
pub fn extract_admin_id(claims: &Claims) -> Result<Uuid, JwtError> {
    Uuid::parse_str(&claims.sub).map_err(|_| JwtError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> JwtConfig {
        JwtConfig::from_secret("test_secret_key_for_jwt_testing_12345", 900)
    }

    #[test]
    fn test_issue_admin_token() {
        let config = create_test_config();
        let issued = config.issue_admin_token(Uuid::new_v4()).unwrap();

        assert!(!issued.token.is_empty());
        assert!(!issued.jti.is_empty());
        assert_eq!(issued.expires_in, 900);
        assert!(issued.token.contains('.'), "JWT should have dots separating parts");
    }

    #[test]
    fn test_validate_admin_token() {
        let config = create_test_config();
        let admin_id = Uuid::new_v4();

        let issued = config.issue_admin_token(admin_id).unwrap();
        let claims = config.validate_admin_token(&issued.token).unwrap();

        assert_eq!(claims.sub, admin_id.to_string());
        assert_eq!(claims.jti, issued.jti);
        assert_eq!(claims.scope, TokenScope::Admin);
        assert_eq!(extract_admin_id(&claims).unwrap(), admin_id);
    }

    #[test]
    fn test_expired_token() {
        let config = JwtConfig::from_secret("test_secret_key_for_jwt_testing_12345", -120);
        let issued = config.issue_admin_token(Uuid::new_v4()).unwrap();

        let result = config.validate_admin_token(&issued.token);
        assert!(
            matches!(result, Err(JwtError::TokenExpired)),
            "Expected TokenExpired, got: {:?}",
            result
        );
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = JwtConfig::from_secret("secret-one-secret-one-secret-one", 900);
        let verifier = JwtConfig::from_secret("secret-two-secret-two-secret-two", 900);
        let issued = issuer.issue_admin_token(Uuid::new_v4()).unwrap();

        assert!(matches!(
            verifier.validate_admin_token(&issued.token),
            Err(JwtError::InvalidToken)
        ));
    }

    #[test]
    fn test_malformed_token() {
        let config = create_test_config();
        assert!(config.validate_token("not_a_jwt").is_err());
        assert!(config.validate_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_unique_jti_per_token() {
        let config = create_test_config();
        let admin_id = Uuid::new_v4();

        let first = config.issue_admin_token(admin_id).unwrap();
        let second = config.issue_admin_token(admin_id).unwrap();

        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_invalid_rsa_key() {
        let result = JwtConfig::new("not a key", "not a key either", 900);
        assert!(matches!(result, Err(JwtError::InvalidKey(_))));
    }

    #[test]
    fn test_extract_admin_id_rejects_garbage() {
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            exp: 0,
            iat: 0,
            jti: "jti".to_string(),
            scope: TokenScope::Admin,
        };
        assert!(matches!(
            extract_admin_id(&claims),
            Err(JwtError::InvalidToken)
        ));
    }

    #[test]
    fn test_token_scope_serialization() {
        assert_eq!(
            serde_json::to_string(&TokenScope::Admin).unwrap(),
            "\"admin\""
        );
    }
}
