//! Chat session orchestration: validates input, runs exchanges, keeps the transcript.

use crate::config::ExchangeConfig;
use crate::exchange::{ExchangeClient, ExchangeService, Query};
use crate::transcript::Transcript;
use crate::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

/// Drives a text chat against an [`ExchangeService`].
pub struct App {
    exchange: Box<dyn ExchangeService>,
    transcript: Transcript,
}

impl App {
    /// Build an app around any exchange service (mocks included).
    pub fn with_service(exchange: Box<dyn ExchangeService>) -> Self {
        Self {
            exchange,
            transcript: Transcript::new(),
        }
    }

    /// Construct an app from environment configuration (`ExchangeConfig::from_env`).
    pub fn new() -> Result<Self> {
        let config = ExchangeConfig::from_env()?;
        info!("Using Gemini endpoint: {}", config.endpoint_url);
        Ok(Self::with_service(Box::new(ExchangeClient::new(config))))
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Ask one raw input line. Blank input is ignored and yields `None`;
    /// otherwise returns the echoed user line and the answer or error line.
    pub async fn submit(&mut self, input: &str) -> Option<(String, String)> {
        let query = Query::parse(input)?;
        let user_line = self.transcript.push_user(query.as_str()).to_string();

        let result = self.exchange.ask(query.as_str()).await;
        if let Err(e) = &result {
            warn!("Exchange failed: {:?}", e);
        }
        let reply_line = self.transcript.push_result(&result).to_string();

        Some((user_line, reply_line))
    }

    /// Submit every line of `input`, writing transcript lines to `output` as they arrive.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            self.submit_to(&line, &mut output).await?;
        }
        Ok(())
    }

    /// Ask each query in order, writing and flushing every reply before the next ask.
    pub async fn run_queries<W>(&mut self, queries: &[String], mut output: W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        for query in queries {
            self.submit_to(query, &mut output).await?;
        }
        Ok(())
    }

    async fn submit_to<W>(&mut self, input: &str, output: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        if let Some((user_line, reply_line)) = self.submit(input).await {
            output
                .write_all(format!("{}\n{}\n", user_line, reply_line).as_bytes())
                .await?;
            output.flush().await?;
        }
        Ok(())
    }
}
