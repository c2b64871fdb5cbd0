//! Bearer token service.
//!
//! Issues and verifies HS256-signed tokens carrying a user identifier. The
//! signing secret is injected from configuration at startup. Tokens carry no
//! expiry claim; validity is purely signature + payload based.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use minimart_core::UserId;

/// Errors that can occur in the token service.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Token could not be signed.
    #[error("failed to sign token: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),

    /// Signature did not validate or the payload is malformed.
    #[error("invalid token")]
    Invalid,
}

/// Claims embedded in issued tokens.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    user_id: i64,
}

/// Issues and verifies bearer tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Create a token service from the configured signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let secret = secret.expose_secret().as_bytes();

        // Tokens carry only a userId claim. Expiry validation must be
        // disabled explicitly or verification would reject every token.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a signed token embedding the given user ID.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Sign` if signing fails.
    pub fn issue(&self, user_id: UserId) -> Result<String, TokenError> {
        let claims = Claims {
            user_id: user_id.as_i64(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding).map_err(TokenError::Sign)
    }

    /// Verify a token and extract the embedded user ID.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` if the signature does not validate or
    /// the payload is malformed.
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| TokenError::Invalid)?;

        Ok(UserId::new(data.claims.user_id))
    }
}
