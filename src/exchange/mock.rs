use super::types::Answer;
use super::ExchangeService;
use crate::ExchangeError;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Deterministic in-memory [`ExchangeService`].
///
/// Queued results are replayed in order and cycle once exhausted. With nothing
/// queued the query is echoed back as the answer.
#[derive(Clone)]
pub struct MockExchangeClient {
    responses: Arc<Mutex<Vec<Result<Answer, ExchangeError>>>>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockExchangeClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_answer(self, answer: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(Ok(Answer(answer.to_string())));
        self
    }

    pub fn with_error(self, error: ExchangeError) -> Self {
        self.responses.lock().unwrap().push(Err(error));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    /// Queries received so far, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl Default for MockExchangeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExchangeService for MockExchangeClient {
    async fn ask(&self, query: &str) -> Result<Answer, ExchangeError> {
        let count = {
            let mut queries = self.queries.lock().unwrap();
            queries.push(query.to_string());
            queries.len()
        };

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(Answer(format!("You asked: {}", query)))
        } else {
            let index = (count - 1) % responses.len();
            responses[index].clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_default_echoes_query() {
        let client = MockExchangeClient::new();
        let answer = client.ask("ping").await.unwrap();
        assert_eq!(answer.as_str(), "You asked: ping");
    }

    #[tokio::test]
    async fn test_mock_custom_responses_cycle() {
        let client = MockExchangeClient::new()
            .with_answer("first")
            .with_error(ExchangeError::ParseFailure);

        assert_eq!(client.ask("a").await.unwrap().as_str(), "first");
        assert_eq!(client.ask("b").await, Err(ExchangeError::ParseFailure));

        // Should cycle back
        assert_eq!(client.ask("c").await.unwrap().as_str(), "first");
    }

    #[tokio::test]
    async fn test_mock_records_queries() {
        let client = MockExchangeClient::new();
        assert_eq!(client.get_call_count(), 0);

        client.ask("one").await.unwrap();
        client.ask("two").await.unwrap();

        assert_eq!(client.get_call_count(), 2);
        assert_eq!(client.queries(), vec!["one".to_string(), "two".to_string()]);
    }
}
