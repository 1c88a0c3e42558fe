use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ShortenError, ShortenErrorKind, ShortenedTarget};

const SHORTEN_PATH: &str = "/api/shorten";

#[derive(Debug, Clone)]
pub struct ShortenSettings {
    /// Service base URL, deployment-time configured.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ShortenSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Serialize)]
struct ShortenRequestBody<'a> {
    url: &'a str,
    #[serde(rename = "turnstileToken")]
    turnstile_token: &'a str,
}

/// Success body. Older deployments answered with snake_case field names,
/// newer ones with camelCase; both map onto the same fields here.
#[derive(Deserialize)]
struct ShortenResponseBody {
    #[serde(default, alias = "shortened_url", alias = "shortUrl")]
    short_url: Option<String>,
    #[serde(default, alias = "original_url", alias = "originalUrl")]
    original_url: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Seam for the remote shortening service. One attempt per call, no
/// retries: the verification token accompanying a request is single-use.
#[async_trait::async_trait]
pub trait Shortener: Send + Sync {
    async fn shorten(&self, url: &str, token: &str) -> Result<ShortenedTarget, ShortenError>;
}

#[derive(Debug, Clone)]
pub struct HttpShortener {
    settings: ShortenSettings,
}

impl HttpShortener {
    pub fn new(settings: ShortenSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, ShortenError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| ShortenError::new(ShortenErrorKind::Network, err.to_string()))
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.settings.base_url.trim_end_matches('/'),
            SHORTEN_PATH
        )
    }
}

#[async_trait::async_trait]
impl Shortener for HttpShortener {
    async fn shorten(&self, url: &str, token: &str) -> Result<ShortenedTarget, ShortenError> {
        let client = self.build_client()?;
        let body = ShortenRequestBody {
            url,
            turnstile_token: token,
        };

        let response = client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let server_message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.error)
                .filter(|message| !message.is_empty());
            return Err(ShortenError::new(
                ShortenErrorKind::Rejected {
                    status: status.as_u16(),
                    server_message,
                },
                status.to_string(),
            ));
        }

        let parsed = serde_json::from_slice::<ShortenResponseBody>(&bytes).map_err(|err| {
            ShortenError::new(ShortenErrorKind::MalformedResponse, err.to_string())
        })?;
        let short_url = parsed.short_url.filter(|value| !value.is_empty()).ok_or_else(|| {
            ShortenError::new(
                ShortenErrorKind::MalformedResponse,
                "success response without a short link",
            )
        })?;

        Ok(ShortenedTarget {
            short_url,
            original_url: parsed
                .original_url
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| url.to_string()),
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ShortenError {
    if err.is_timeout() {
        return ShortenError::new(ShortenErrorKind::Timeout, err.to_string());
    }
    ShortenError::new(ShortenErrorKind::Network, err.to_string())
}
