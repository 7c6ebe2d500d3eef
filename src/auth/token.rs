//! Signing and verifying the JSON Web Tokens handed out at log-in.

use std::fmt::Debug;

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use time::{Duration, OffsetDateTime};

use crate::{Error, auth::UserID};

/// How long a token is valid for when the server is not configured otherwise.
pub const DEFAULT_TOKEN_DURATION: Duration = Duration::minutes(60);

/// The contents of a JSON Web Token.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// The user the token was issued to.
    pub sub: UserID,
    /// When the token was issued, as a Unix timestamp.
    pub iat: i64,
    /// When the token expires, as a Unix timestamp.
    pub exp: i64,
}

/// The keys used to sign and verify tokens.
#[derive(Clone)]
pub struct JwtKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtKeys {
    /// Derive the signing keys from the server's `secret`.
    ///
    /// The secret is hashed first so that short secrets still produce a full
    /// length HMAC key.
    pub fn from_secret(secret: &str) -> Self {
        let hash = Sha512::digest(secret);

        Self {
            encoding_key: EncodingKey::from_secret(&hash),
            decoding_key: DecodingKey::from_secret(&hash),
        }
    }
}

impl Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("JwtKeys { .. }")
    }
}

/// A signed token and the moment it stops being accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedToken {
    /// The encoded JWT.
    pub token: String,
    /// When the token expires.
    pub expires_at: OffsetDateTime,
}

/// Sign a token for `user_id` that is valid for `duration` from now.
///
/// # Errors
/// Returns [Error::TokenCreation] if the token could not be encoded.
pub fn issue_token(
    user_id: UserID,
    duration: Duration,
    keys: &JwtKeys,
) -> Result<IssuedToken, Error> {
    let now = OffsetDateTime::now_utc();
    let expires_at = now + duration;
    let claims = Claims {
        sub: user_id,
        iat: now.unix_timestamp(),
        exp: expires_at.unix_timestamp(),
    };

    let token = encode(&Header::default(), &claims, &keys.encoding_key)
        .map_err(|error| Error::TokenCreation(error.to_string()))?;

    Ok(IssuedToken { token, expires_at })
}

/// Verify the signature and expiry of `token` and return its claims.
///
/// # Errors
/// Returns [Error::InvalidToken] if the token is malformed, was signed with a
/// different key, or has expired.
pub fn decode_token(token: &str, keys: &JwtKeys) -> Result<Claims, Error> {
    decode::<Claims>(token, &keys.decoding_key, &Validation::default())
        .map(|token_data| token_data.claims)
        .map_err(|error| {
            tracing::debug!("rejected bearer token: {error}");
            Error::InvalidToken
        })
}
