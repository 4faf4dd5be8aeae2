use super::types::{extract_answer, Answer, GenerateContentRequest};
use super::ExchangeService;
use crate::config::ExchangeConfig;
use crate::ExchangeError;
use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Gemini `generateContent` client performing one POST per query.
///
/// Cloning is cheap: clones share the connection pool and configuration.
#[derive(Clone)]
pub struct ExchangeClient {
    client: Client,
    config: Arc<ExchangeConfig>,
}

impl ExchangeClient {
    pub fn new(config: ExchangeConfig) -> Self {
        Self::new_with_client(config, Client::new())
    }

    pub fn new_with_client(config: ExchangeConfig, client: Client) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    async fn exchange(&self, query: &str) -> Result<Answer, ExchangeError> {
        tracing::debug!(
            "Sending generateContent request ({} chars) to {}",
            query.len(),
            self.config.endpoint_url
        );

        let response = self
            .client
            .post(&self.config.endpoint_url)
            .query(&[("key", self.config.api_key.as_str())])
            .header(CONTENT_TYPE, self.config.media_type)
            .json(&GenerateContentRequest::from_query(query))
            .send()
            .await
            .map_err(|e| {
                let message = describe(e);
                tracing::error!("Failed to send request to Gemini: {}", message);
                ExchangeError::NetworkFailure(message)
            })?;

        let status = response.status();
        if !status.is_success() {
            let reason = response
                .extensions()
                .get::<ReasonPhrase>()
                .and_then(|r| std::str::from_utf8(r.as_bytes()).ok());
            tracing::error!("Gemini API error (status {})", status);
            return Err(ExchangeError::http(status, reason));
        }

        let body = response.text().await.map_err(|e| {
            let message = describe(e);
            tracing::error!("Failed to read Gemini response body: {}", message);
            ExchangeError::NetworkFailure(message)
        })?;

        extract_answer(&body)
    }

    /// Like [`ExchangeService::ask`], but completes with
    /// [`ExchangeError::Cancelled`] once `token` fires. The in-flight request
    /// is dropped, which aborts the underlying connection.
    pub async fn ask_cancellable(
        &self,
        query: &str,
        token: &CancellationToken,
    ) -> Result<Answer, ExchangeError> {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::debug!("generateContent request cancelled");
                Err(ExchangeError::Cancelled)
            }
            result = self.exchange(query) => result,
        }
    }

    /// Fire one exchange on the tokio runtime and hand its result to
    /// `on_complete` exactly once. Never blocks the calling thread.
    ///
    /// Must be called from within a tokio runtime.
    pub fn ask_with_callback<F>(&self, query: impl Into<String>, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Answer, ExchangeError>) + Send + 'static,
    {
        let client = self.clone();
        let query = query.into();
        tokio::spawn(async move {
            let result = client.exchange(&query).await;
            on_complete(result);
        })
    }

    pub fn ask_with_callback_cancellable<F>(
        &self,
        query: impl Into<String>,
        token: CancellationToken,
        on_complete: F,
    ) -> JoinHandle<()>
    where
        F: FnOnce(Result<Answer, ExchangeError>) + Send + 'static,
    {
        let client = self.clone();
        let query = query.into();
        tokio::spawn(async move {
            let result = client.ask_cancellable(&query, &token).await;
            on_complete(result);
        })
    }
}

#[async_trait]
impl ExchangeService for ExchangeClient {
    async fn ask(&self, query: &str) -> Result<Answer, ExchangeError> {
        self.exchange(query).await
    }
}

/// Flatten a reqwest error and its sources into one line.
///
/// The URL is stripped first since it carries the API key.
fn describe(err: reqwest::Error) -> String {
    let err = err.without_url();
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
