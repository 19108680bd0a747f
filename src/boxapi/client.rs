//! BoxClient - handles communication with the Box API.

use std::time::{Duration, SystemTime};

use jsonwebtoken::EncodingKey;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use super::claims::{self, JWT_BEARER_GRANT};
use super::key::{parse_private_key, KeyError};

/// Default base URL for the Box content API.
pub const BOX_API_BASE_URL: &str = "https://api.box.com";

/// Default timeout for HTTP requests (30 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Extensions accepted when filtering folder listings down to images.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Enterprise app-auth credentials, loaded once at startup.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub enterprise_id: String,
    pub key_id: String,
    /// PEM document or bare base64 key body.
    pub private_key: String,
    /// Present in some console exports; decryption is unsupported and
    /// the value is never used for signing.
    pub passphrase: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("enterprise_id", &self.enterprise_id)
            .field("key_id", &self.key_id)
            .field("private_key", &"***")
            .field("passphrase", &self.passphrase.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Short-lived access token from the JWT-bearer exchange.
///
/// The value only ever leaves this module inside an `Authorization`
/// header; it is redacted from Debug output and never logged.
pub struct BearerToken {
    value: String,
    issued_at: SystemTime,
    expires_in: Duration,
}

impl BearerToken {
    /// Whether the token has outlived the lifetime the endpoint granted.
    pub fn is_expired(&self) -> bool {
        match self.issued_at.elapsed() {
            Ok(elapsed) => elapsed >= self.expires_in,
            Err(_) => false,
        }
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerToken")
            .field("value", &"***")
            .field("issued_at", &self.issued_at)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

fn default_expires_in() -> u64 {
    45 * 60
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

/// One entry of a Box folder listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageEntry {
    pub id: String,
    pub name: String,
    /// Absent for folders and extensionless files.
    #[serde(default)]
    pub extension: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FolderItems {
    entries: Vec<ImageEntry>,
}

/// Errors that can occur during the credential-to-token exchange.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid private key: {0}")]
    Key(#[from] KeyError),

    #[error("failed to sign JWT assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("token request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token endpoint returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to decode token response: {0}")]
    Decode(String),
}

/// Errors that can occur on authorized content requests.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("client is not authenticated")]
    NotAuthenticated,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("no images found in the folder")]
    NoImages,
}

/// Client for the Box API, authenticated via the JWT-bearer flow.
pub struct BoxClient {
    credentials: Credentials,
    signing_key: EncodingKey,
    token_url: String,
    api_base_url: String,
    http_client: reqwest::Client,
    token: Option<BearerToken>,
}

impl BoxClient {
    /// Create a client against the production Box endpoints.
    ///
    /// Parses the private key eagerly so credential problems surface
    /// before any network traffic.
    pub fn new(credentials: Credentials) -> Result<Self, AuthError> {
        Self::with_endpoints(
            credentials,
            claims::TOKEN_URL.to_string(),
            BOX_API_BASE_URL.to_string(),
        )
    }

    /// Create a client with custom endpoints.
    ///
    /// Useful for testing against a mock server.
    pub fn with_endpoints(
        credentials: Credentials,
        token_url: String,
        api_base_url: String,
    ) -> Result<Self, AuthError> {
        let signing_key = parse_private_key(&credentials.private_key)?;

        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            credentials,
            signing_key,
            token_url,
            api_base_url,
            http_client,
            token: None,
        })
    }

    /// The bearer token from the last successful [`authenticate`] call.
    ///
    /// [`authenticate`]: BoxClient::authenticate
    pub fn token(&self) -> Option<&BearerToken> {
        self.token.as_ref()
    }

    /// Get the token endpoint URL.
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Get the content API base URL.
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Exchange a signed JWT assertion for a bearer token.
    ///
    /// Builds the enterprise claim set, signs it with the parsed key,
    /// and POSTs the form-encoded grant to the token endpoint. One
    /// outbound call, no retry; the caller decides whether to wrap
    /// this in a retry policy.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Api` when the endpoint rejects the grant,
    /// `AuthError::Decode` when the response body is not well-formed
    /// JSON or lacks `access_token`, or `AuthError::Http` on transport
    /// failures.
    pub async fn authenticate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), AuthError> {
        let claims = claims::build_claims(
            &self.credentials.client_id,
            &self.credentials.enterprise_id,
            claims::new_jti(rng),
            SystemTime::now(),
        );
        let assertion =
            claims::sign_assertion(&claims, &self.credentials.key_id, &self.signing_key)?;

        log::debug!("exchanging JWT assertion at {}", self.token_url);

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::warn!("token endpoint rejected the assertion with status {}", status);
            return Err(AuthError::Api { status, body });
        }

        let body = response.text().await?;
        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::Decode(e.to_string()))?;

        log::info!(
            "authenticated with Box, token valid for {}s",
            parsed.expires_in
        );

        self.token = Some(BearerToken {
            value: parsed.access_token,
            issued_at: SystemTime::now(),
            expires_in: Duration::from_secs(parsed.expires_in),
        });

        Ok(())
    }

    fn bearer_header(&self) -> Result<String, ApiError> {
        match &self.token {
            Some(token) => Ok(format!("Bearer {}", token.value)),
            None => Err(ApiError::NotAuthenticated),
        }
    }

    /// List the image files in a Box folder.
    ///
    /// Fetches the folder items with just the fields the renderer
    /// needs and keeps only entries with an image extension.
    pub async fn list_images(&self, folder_id: &str) -> Result<Vec<ImageEntry>, ApiError> {
        let url = format!(
            "{}/2.0/folders/{}/items?fields=id,name,extension",
            self.api_base_url, folder_id
        );

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", self.bearer_header()?)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Api { status, body });
        }

        let body = response.text().await?;
        let items: FolderItems =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;

        let images: Vec<ImageEntry> = items
            .entries
            .into_iter()
            .filter(|entry| {
                entry
                    .extension
                    .as_deref()
                    .is_some_and(is_image_extension)
            })
            .collect();

        log::debug!("folder {} holds {} image(s)", folder_id, images.len());
        Ok(images)
    }

    /// Download the full byte payload of a Box file.
    pub async fn download_file(&self, file_id: &str) -> Result<Vec<u8>, ApiError> {
        let url = format!("{}/2.0/files/{}/content", self.api_base_url, file_id);

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", self.bearer_header()?)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Api { status, body });
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

fn is_image_extension(ext: &str) -> bool {
    let lower = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|e| *e == lower)
}

/// Pick one entry uniformly at random.
///
/// The randomness source is passed in explicitly so callers can seed
/// it for deterministic selection in tests.
pub fn pick_random<'a, R: Rng + ?Sized>(
    entries: &'a [ImageEntry],
    rng: &mut R,
) -> Result<&'a ImageEntry, ApiError> {
    entries.choose(rng).ok_or(ApiError::NoImages)
}
