//! Mock implementations for testing.
//!
//! Stand-ins for the text-generation service so chat behaviour can be
//! exercised without a network.

use async_trait::async_trait;
use feelora::llm::LLMClient;
use feelora::types::{AppError, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Mock LLM client with a canned reply or a forced failure.
///
/// Every prompt it receives is recorded, so tests can inspect what the chat
/// actually sent.
///
/// ```ignore
/// let client = MockLLMClient::replying("Take a slow breath.");
/// let failing = MockLLMClient::failing();
/// ```
#[derive(Clone)]
pub struct MockLLMClient {
    response: String,
    should_fail: bool,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockLLMClient {
    /// Create a mock client that returns the given response.
    pub fn replying(response: &str) -> Self {
        Self {
            response: response.to_string(),
            should_fail: false,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock client that always returns an error.
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            should_fail: true,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().len()
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());
        if self.should_fail {
            return Err(AppError::LLM("Mock LLM failure".to_string()));
        }
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
