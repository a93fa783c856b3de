use std::time::Duration;

use vocab_config::network::HttpConfig;
use vocab_core::{FetchError, FetchMethod, FetchRequest, Fetcher};

/// Provider fetcher on a shared reqwest client
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: config.timeout(),
        }
    }

    fn map_error(&self, url: &str, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else if let Some(status) = e.status() {
            FetchError::Http {
                status: status.as_u16(),
                url: redact_query(url).to_string(),
            }
        } else {
            // reqwest errors print the full url, query and all
            FetchError::Network(e.without_url().to_string())
        }
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<u8>, FetchError> {
        let mut builder = match request.method {
            FetchMethod::Get => self.client.get(&request.url),
            FetchMethod::Post => self.client.post(&request.url),
        }
        .timeout(self.timeout)
        .query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        tracing::debug!(url = %redact_query(&request.url), "fetching");

        let response = builder
            .send()
            .await
            .map_err(|e| self.map_error(&request.url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: redact_query(&request.url).to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_error(&request.url, e))?;
        Ok(body.to_vec())
    }
}

/// Query strings may carry API keys
fn redact_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}
