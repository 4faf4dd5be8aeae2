//! Plain-text chat transcript.

use crate::exchange::Answer;
use crate::ExchangeError;

#[derive(Debug, Default, Clone)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line and return it without the trailing newline.
    fn push_line(&mut self, line: String) -> &str {
        let start = self.text.len();
        self.text.push_str(&line);
        self.text.push('\n');
        &self.text[start..self.text.len() - 1]
    }

    pub fn push_user(&mut self, query: &str) -> &str {
        self.push_line(format!("User: {}", query))
    }

    pub fn push_answer(&mut self, answer: &Answer) -> &str {
        self.push_line(format!("Gemini: {}", answer))
    }

    pub fn push_error(&mut self, error: &ExchangeError) -> &str {
        self.push_line(format!("Error: {}", error))
    }

    pub fn push_result(&mut self, result: &Result<Answer, ExchangeError>) -> &str {
        match result {
            Ok(answer) => self.push_answer(answer),
            Err(error) => self.push_error(error),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
