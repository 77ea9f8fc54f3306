use jsonwebtoken::{decode, Algorithm, Validation};
use serde::Deserialize;

pub use jsonwebtoken::DecodingKey;

use crate::error::AuthError;

/// Claims extracted from an identity-provider session token.
#[derive(Debug, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iss: String,
    pub exp: u64,
    pub iat: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Validate a session JWT.
///
/// The identity provider publishes its signing keys out of band; this
/// function takes a pre-fetched public key and the expected issuer.
/// Expiry and issuer are both enforced. A token with an empty `sub`
/// claim is rejected — every record in the store must be attributable
/// to a subject.
pub fn validate_token(
    token: &str,
    decoding_key: &DecodingKey,
    issuer: &str,
) -> Result<SessionClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_issuer(&[issuer]);
    validation.validate_exp = true;

    let token_data = decode::<SessionClaims>(token, decoding_key, &validation)?;

    if token_data.claims.sub.is_empty() {
        return Err(AuthError::InvalidToken("empty sub claim".to_string()));
    }

    Ok(token_data.claims)
}
