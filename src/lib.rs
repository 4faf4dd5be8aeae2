//! Client for asking the Gemini generative-language API a free-text question
//!
//! Packages a query as a `generateContent` request, performs one HTTP exchange
//! and extracts the answer text, classifying every failure on the way.

pub mod app;
pub mod config;
pub mod error;
pub mod exchange;
pub mod transcript;

pub use error::{Error, ExchangeError, Result};
