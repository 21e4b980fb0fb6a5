use futures::future::{select, Either};
use gloo_timers::future::TimeoutFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const UNSPLASH_API_URL: &str = "https://api.unsplash.com";
pub const IMAGES_PER_PAGE: u32 = 10;

/// The source API has no timeout of its own; without one a dead connection
/// leaves the session stuck in Loading forever.
const REQUEST_TIMEOUT_MS: u32 = 8_000;

// Unsplash API response structures
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Photo {
    pub id: String,
    pub urls: PhotoUrls,
    pub alt_description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PhotoUrls {
    pub small: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub results: Vec<Photo>,
    pub total_pages: u32,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum SearchError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("search API returned HTTP {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("request timed out after {} seconds", REQUEST_TIMEOUT_MS / 1_000)]
    Timeout,
    #[error("UNSPLASH_ACCESS_KEY was not set at build time")]
    MissingCredential,
}

/// Endpoint plus the access key injected at build time. The key never
/// appears in logs; `Debug` redacts it.
#[derive(Clone)]
pub struct ApiConfig {
    pub base_url: String,
    access_key: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_key: access_key.into(),
        }
    }

    /// A CSR app has no process environment at runtime, so the credential is
    /// baked in when the wasm module is compiled.
    pub fn from_env() -> Result<Self, SearchError> {
        match option_env!("UNSPLASH_ACCESS_KEY") {
            Some(key) if !key.is_empty() => Ok(Self::new(UNSPLASH_API_URL, key)),
            _ => Err(SearchError::MissingCredential),
        }
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("access_key", &"<redacted>")
            .finish()
    }
}

pub fn search_url(config: &ApiConfig, query: &str, page: u32) -> String {
    format!(
        "{}/search/photos?query={}&page={}&per_page={}&client_id={}",
        config.base_url,
        urlencode(query),
        page,
        IMAGES_PER_PAGE,
        config.access_key
    )
}

pub async fn search_photos(
    config: &ApiConfig,
    query: &str,
    page: u32,
) -> Result<SearchResponse, SearchError> {
    let url = search_url(config, query, page);
    let request = Box::pin(send_request(url));
    let deadline = Box::pin(TimeoutFuture::new(REQUEST_TIMEOUT_MS));

    match select(request, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(SearchError::Timeout),
    }
}

async fn send_request(url: String) -> Result<SearchResponse, SearchError> {
    let response = reqwasm::http::Request::get(&url)
        .header("Accept-Version", "v1")
        .send()
        .await
        .map_err(|e| SearchError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(SearchError::Status(response.status()));
    }

    response
        .json::<SearchResponse>()
        .await
        .map_err(|e| SearchError::Malformed(e.to_string()))
}

fn urlencode(s: &str) -> String {
    let mut result = String::new();
    for c in s.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '~' => result.push(c),
            ' ' => result.push_str("%20"),
            _ => {
                for byte in c.to_string().as_bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ApiConfig {
        ApiConfig::new("https://api.example.com", "test-key")
    }

    #[test]
    fn search_url_carries_all_parameters() {
        let url = search_url(&config(), "cats", 3);
        assert_eq!(
            url,
            "https://api.example.com/search/photos?query=cats&page=3&per_page=10&client_id=test-key"
        );
    }

    #[test]
    fn query_is_percent_encoded() {
        let url = search_url(&config(), "golden retriever", 1);
        assert!(url.contains("query=golden%20retriever&"));

        let url = search_url(&config(), "cats&page=9", 1);
        assert!(url.contains("query=cats%26page%3D9&"));
    }

    #[test]
    fn urlencode_leaves_unreserved_characters_alone() {
        assert_eq!(urlencode("abc-XYZ_0.9~"), "abc-XYZ_0.9~");
        assert_eq!(urlencode("caf\u{e9}"), "caf%C3%A9");
    }

    #[test]
    fn sample_response_deserializes() {
        let body = r#"{
            "results": [
                {
                    "id": "abc123",
                    "urls": { "small": "https://images.example.com/abc123?w=400", "full": "https://images.example.com/abc123" },
                    "alt_description": "a cat on a fence",
                    "likes": 12
                },
                {
                    "id": "def456",
                    "urls": { "small": "https://images.example.com/def456?w=400" },
                    "alt_description": null
                }
            ],
            "total": 42,
            "total_pages": 5
        }"#;

        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.total_pages, 5);
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].id, "abc123");
        assert_eq!(
            parsed.results[0].alt_description.as_deref(),
            Some("a cat on a fence")
        );
        assert_eq!(parsed.results[1].alt_description, None);
        assert_eq!(
            parsed.results[1].urls.small,
            "https://images.example.com/def456?w=400"
        );
    }

    #[test]
    fn malformed_body_is_an_error() {
        let err = serde_json::from_str::<SearchResponse>(r#"{"results": 7}"#);
        assert!(err.is_err());
    }

    #[test]
    fn debug_redacts_the_credential() {
        let rendered = format!("{:?}", config());
        assert!(!rendered.contains("test-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
