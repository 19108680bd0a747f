//! JWT assertion construction for the Box enterprise app-auth flow.
//!
//! Claim building and signing are pure functions of their inputs so the
//! assertion can be tested without a live token endpoint.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The fixed Box OAuth2 token endpoint, also the assertion audience.
pub const TOKEN_URL: &str = "https://api.box.com/oauth2/token";

/// Grant type URN for the JWT-bearer exchange.
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Subject-type marker for enterprise-level authentication.
pub const ENTERPRISE_SUB_TYPE: &str = "enterprise";

/// Assertion lifetime. Box rejects assertions that live longer than an hour.
pub const ASSERTION_TTL: Duration = Duration::from_secs(45 * 60);

/// Claim set for the signed app-auth assertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionClaims {
    /// Issuer: the app's client ID.
    pub iss: String,
    /// Subject: the enterprise ID being authenticated for.
    pub sub: String,
    /// Box-specific subject type, always "enterprise" here.
    pub box_sub_type: String,
    /// Audience: the token endpoint URL.
    pub aud: String,
    /// Unique, unguessable per-call identifier.
    pub jti: String,
    /// Expiration time (Unix timestamp).
    pub exp: u64,
}

/// Build the claim set for one token exchange.
pub fn build_claims(
    client_id: &str,
    enterprise_id: &str,
    jti: String,
    now: SystemTime,
) -> AssertionClaims {
    let exp = (now + ASSERTION_TTL)
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    AssertionClaims {
        iss: client_id.to_string(),
        sub: enterprise_id.to_string(),
        box_sub_type: ENTERPRISE_SUB_TYPE.to_string(),
        aud: TOKEN_URL.to_string(),
        jti,
        exp,
    }
}

/// Fresh unguessable assertion identifier: 16 random bytes, hex-encoded.
pub fn new_jti<R: Rng + ?Sized>(rng: &mut R) -> String {
    let bytes: [u8; 16] = rng.gen();
    hex::encode(bytes)
}

/// Sign the claim set with RSA-SHA256.
///
/// The configured public key ID travels in the `kid` header so the
/// token service can select the matching verification key.
pub fn sign_assertion(
    claims: &AssertionClaims,
    key_id: &str,
    key: &EncodingKey,
) -> Result<String, jsonwebtoken::errors::Error> {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(key_id.to_string());
    encode(&header, claims, key)
}
