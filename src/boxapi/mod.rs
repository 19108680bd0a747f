//! Box API integration: enterprise app-auth and content access.
//!
//! The flow mirrors the Box server-auth documentation:
//!
//! 1. **Key loading** - parse the console-exported private key
//! 2. **Assertion** - build and RS256-sign the enterprise claim set
//! 3. **Exchange** - trade the assertion for a short-lived bearer token
//! 4. **Content** - list a folder's images and download one

pub mod claims;
mod client;
mod key;

pub use claims::{
    build_claims, new_jti, sign_assertion, AssertionClaims, ASSERTION_TTL, ENTERPRISE_SUB_TYPE,
    JWT_BEARER_GRANT, TOKEN_URL,
};
pub use client::{
    pick_random, ApiError, AuthError, BearerToken, BoxClient, Credentials, ImageEntry,
    BOX_API_BASE_URL,
};
pub use key::{parse_private_key, KeyError};
