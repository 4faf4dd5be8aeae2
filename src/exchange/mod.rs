//! Query-to-answer exchange with the Gemini generative-language API
//!
//! One call to [`ExchangeService::ask`] is one POST to `generateContent`,
//! resolving to either the answer text or a classified [`ExchangeError`].

pub mod client;
pub mod mock;
pub mod types;

pub use client::ExchangeClient;
pub use mock::MockExchangeClient;
pub use types::{extract_answer, Answer, GenerateContentRequest, Query};

use crate::ExchangeError;
use async_trait::async_trait;

#[async_trait]
pub trait ExchangeService: Send + Sync {
    async fn ask(&self, query: &str) -> Result<Answer, ExchangeError>;
}
