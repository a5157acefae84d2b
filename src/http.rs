use reqwest::{RequestBuilder, Url};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{QualError, Result};

/// A [`reqwest::Client`] that retries transient failures with exponential backoff.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl HttpClient {
    pub(crate) fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(QualError::ClientBuild)?;
        Ok(Self { inner, config })
    }

    pub(crate) fn with_client(inner: reqwest::Client, config: ClientConfig) -> Self {
        Self { inner, config }
    }

    pub(crate) fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// GET `url` with `params` appended as a query string and return the body.
    pub(crate) async fn get_text(&self, url: &str, params: &[(&str, String)]) -> Result<String> {
        let url = with_query(url, params)?;
        self.send(url.as_str(), |client| client.get(url.clone()))
            .await
    }

    /// POST `form` url-encoded to `url` and return the body.
    pub(crate) async fn post_form_text(&self, url: &str, form: &[(&str, String)]) -> Result<String> {
        self.send(url, |client| client.post(url).form(form)).await
    }

    async fn send(
        &self,
        url: &str,
        build: impl Fn(&reqwest::Client) -> RequestBuilder,
    ) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.send_once(url, &build).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_transient() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = self.config.backoff_for(attempt);
                    warn!(url, attempt, ?delay, error = %e, "retrying request");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send_once(
        &self,
        url: &str,
        build: &impl Fn(&reqwest::Client) -> RequestBuilder,
    ) -> Result<String> {
        debug!(url, "sending request");

        let response = build(&self.inner)
            .send()
            .await
            .map_err(|e| QualError::Http {
                url: url.to_owned(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(QualError::UnexpectedStatus {
                url: url.to_owned(),
                status,
            });
        }

        response.text().await.map_err(|e| QualError::ResponseBody {
            url: url.to_owned(),
            source: e,
        })
    }
}

fn with_query(url: &str, params: &[(&str, String)]) -> Result<Url> {
    let parsed = if params.is_empty() {
        Url::parse(url)
    } else {
        Url::parse_with_params(url, params)
    };
    parsed.map_err(|e| QualError::InvalidUrl {
        url: url.to_owned(),
        detail: e.to_string(),
    })
}
