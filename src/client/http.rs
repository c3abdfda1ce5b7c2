//! HTTP client module
//!
//! Provides `HttpClient` for API calls and remote file downloads. Every
//! request carries an explicit timeout.

use super::Auth;
use crate::error::{EtlError, Result};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// HTTP client for fetching sources.
///
/// # Example
/// ```no_run
/// use etl_processor::client::{Auth, HttpClient};
/// use std::time::Duration;
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let client = HttpClient::try_new(Auth::None, Duration::from_secs(10))?;
/// let url = Url::parse("https://api.example.com/movies")?;
/// let body = client.get_json(&url).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a client that sends `auth` on every request.
    ///
    /// # Errors
    /// Returns an error if the credentials are not valid header values or
    /// the underlying client cannot be built.
    pub fn try_new(auth: Auth, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(value) = auth.header() {
            headers.insert(AUTHORIZATION, header_value(&value)?);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| EtlError::fetch_from("http client", e))?;
        Ok(Self { client })
    }

    /// Unauthenticated client with the default timeout
    pub fn try_default() -> Result<Self> {
        Self::try_new(Auth::None, Self::DEFAULT_TIMEOUT)
    }

    /// Wrap an already configured reqwest client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// GET a URL, failing on transport errors and non-success statuses.
    pub async fn get(&self, url: &Url) -> Result<reqwest::Response> {
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| EtlError::fetch_from(url.as_str(), e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EtlError::fetch(
                url.as_str(),
                format!("HTTP {}: {}", status, body),
            ));
        }
        Ok(response)
    }

    /// GET a URL and decode the body as JSON.
    pub async fn get_json(&self, url: &Url) -> Result<Value> {
        let response = self.get(url).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| EtlError::fetch_from(url.as_str(), e))?;
        serde_json::from_slice(&bytes).map_err(|e| EtlError::parse_from(url.as_str(), e))
    }

    /// Download a URL into `destination`, replacing any existing file.
    ///
    /// Returns the path written to.
    pub async fn download(&self, url: &Url, destination: impl AsRef<Path>) -> Result<PathBuf> {
        let destination = destination.as_ref();
        let response = self.get(url).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| EtlError::fetch_from(url.as_str(), e))?;

        std::fs::write(destination, &bytes).map_err(|e| {
            EtlError::fetch(
                url.as_str(),
                format!("cannot save to {}: {}", destination.display(), e),
            )
        })?;
        log::info!("File downloaded successfully: {}", destination.display());
        Ok(destination.to_path_buf())
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    value
        .parse()
        .map_err(|e| EtlError::fetch("http client", format!("invalid credentials: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client() -> HttpClient {
        HttpClient::from_client(Client::builder().no_proxy().build().unwrap())
    }

    #[tokio::test]
    async fn test_get_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movies"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"title": "Heat"}])))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/movies", server.uri())).unwrap();
        let body = test_client().get_json(&url).await.unwrap();
        assert_eq!(body, json!([{"title": "Heat"}]));
    }

    #[tokio::test]
    async fn test_error_status_is_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let url = Url::parse(&server.uri()).unwrap();
        let err = test_client().get_json(&url).await.unwrap_err();
        assert_eq!(err.kind(), "FetchError");
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("maintenance"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let url = Url::parse(&server.uri()).unwrap();
        let err = test_client().get_json(&url).await.unwrap_err();
        assert_eq!(err.kind(), "ParseError");
    }

    #[tokio::test]
    async fn test_apikey_header_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("authorization", "ApiKey secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let client = HttpClient::try_new(Auth::Apikey("secret".into()), Duration::from_secs(5)).unwrap();
        let url = Url::parse(&server.uri()).unwrap();
        // Without the header the mock has no match and answers 404
        let body = client.get_json(&url).await.unwrap();
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_timeout_is_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = HttpClient::try_new(Auth::None, Duration::from_millis(300)).unwrap();
        let url = Url::parse(&server.uri()).unwrap();
        let err = client.get_json(&url).await.unwrap_err();

        assert_eq!(err.kind(), "FetchError");
        assert!(
            err.to_string().contains("timed out"),
            "timeout cause missing from: {}",
            err
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[tokio::test]
    async fn test_bearer_header_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer token-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let client =
            HttpClient::try_new(Auth::Bearer("token-123".into()), Duration::from_secs(5)).unwrap();
        let url = Url::parse(&server.uri()).unwrap();
        let body = client.get_json(&url).await.unwrap();
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_download_writes_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string("a,b\n1,2\n"))
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let destination = temp.path().join("downloaded_file.csv");
        let url = Url::parse(&format!("{}/data.csv", server.uri())).unwrap();

        let written = test_client().download(&url, &destination).await.unwrap();
        assert_eq!(written, destination);
        assert_eq!(std::fs::read_to_string(destination).unwrap(), "a,b\n1,2\n");
    }
}
