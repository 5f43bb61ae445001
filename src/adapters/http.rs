use crate::domain::model::{FetchConfig, FetchFailure};
use crate::domain::ports::{ConfigProvider, DataSource};
use crate::utils::error::{ComposeError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Network transport: locators are joined onto a base endpoint and fetched as
/// JSON. All transport, status, and parse problems surface as `FetchFailure`
/// values; no retries happen here.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base: String,
    default_headers: HashMap<String, String>,
}

impl HttpSource {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base: base.into(),
            default_headers: HashMap::new(),
        }
    }

    pub fn from_config(config: &impl ConfigProvider) -> Result<Self> {
        validate_url("source.endpoint", config.endpoint())?;

        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build().map_err(|e| ComposeError::ConfigError {
            message: format!("failed to build HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            base: config.endpoint().to_string(),
            default_headers: config.default_headers().cloned().unwrap_or_default(),
        })
    }

    fn join(&self, locator: &str) -> String {
        format!(
            "{}/{}",
            self.base.trim_end_matches('/'),
            locator.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn retrieve(
        &self,
        locator: &str,
        config: &FetchConfig,
    ) -> std::result::Result<Value, FetchFailure> {
        let url = self.join(locator);
        let method = config
            .method
            .as_deref()
            .unwrap_or("GET")
            .to_ascii_uppercase();

        tracing::debug!("HTTP {} {}", method, url);

        let mut request = match method.as_str() {
            "GET" => self.client.get(&url),
            "POST" => self.client.post(&url),
            "PUT" => self.client.put(&url),
            "DELETE" => self.client.delete(&url),
            other => {
                return Err(FetchFailure::new(
                    locator,
                    format!("unsupported method: {}", other),
                ))
            }
        };

        for (name, value) in &self.default_headers {
            request = request.header(name, value);
        }
        if let Some(headers) = &config.headers {
            for (name, value) in headers {
                request = request.header(name, value);
            }
        }
        if let Some(body) = &config.body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchFailure::new(locator, format!("transport error: {}", e)))?;

        let status = response.status();
        tracing::debug!("HTTP response status: {}", status);
        if !status.is_success() {
            return Err(FetchFailure::new(
                locator,
                format!("unexpected status: {}", status),
            ));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchFailure::new(locator, format!("invalid JSON payload: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn get_returns_parsed_json() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/users");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!([{"id": 1}, {"id": 2}]));
        });

        let source = HttpSource::new(server.base_url());
        let value = source
            .retrieve("/users", &FetchConfig::default())
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(value, json!([{"id": 1}, {"id": 2}]));
    }

    #[tokio::test]
    async fn post_sends_body_and_headers() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/search")
                .header("x-api-key", "secret")
                .json_body(json!({"q": "button"}));
            then.status(200).json_body(json!({"hits": 0}));
        });

        let source = HttpSource::new(server.base_url());
        let config = FetchConfig {
            method: Some("post".to_string()),
            headers: Some(
                [("x-api-key".to_string(), "secret".to_string())]
                    .into_iter()
                    .collect(),
            ),
            body: Some(json!({"q": "button"})),
        };
        let value = source.retrieve("/search", &config).await.unwrap();

        api_mock.assert();
        assert_eq!(value, json!({"hits": 0}));
    }

    #[tokio::test]
    async fn non_success_status_is_a_fetch_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/users");
            then.status(503);
        });

        let source = HttpSource::new(server.base_url());
        let failure = source
            .retrieve("/users", &FetchConfig::default())
            .await
            .unwrap_err();

        assert_eq!(failure.locator, "/users");
        assert!(failure.reason.contains("503"));
    }

    #[tokio::test]
    async fn invalid_json_payload_is_a_fetch_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/users");
            then.status(200).body("not json at all");
        });

        let source = HttpSource::new(server.base_url());
        let failure = source
            .retrieve("/users", &FetchConfig::default())
            .await
            .unwrap_err();

        assert!(failure.reason.contains("invalid JSON"));
    }

    #[tokio::test]
    async fn unsupported_method_is_rejected_before_sending() {
        let source = HttpSource::new("http://localhost:1");
        let config = FetchConfig {
            method: Some("TRACE".to_string()),
            ..Default::default()
        };
        let failure = source.retrieve("/x", &config).await.unwrap_err();
        assert!(failure.reason.contains("unsupported method"));
    }
}
