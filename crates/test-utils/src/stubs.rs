use std::sync::Mutex;

use futures::future::BoxFuture;

use labeljury::services::{Completion, ServiceError, TextExtraction};

/// A completion service that answers from `(needle, response)` rules:
/// the first rule whose needle appears in the prompt wins. Records every
/// prompt it was asked.
pub struct ScriptedCompletion {
    rules: Vec<(String, String)>,
    fallback: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    pub fn new(fallback: &str) -> Self {
        Self {
            rules: Vec::new(),
            fallback: fallback.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn on(mut self, needle: &str, response: &str) -> Self {
        self.rules.push((needle.to_string(), response.to_string()));
        self
    }

    /// Prompts seen so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Completion for ScriptedCompletion {
    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, ServiceError>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let response = self
            .rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| self.fallback.clone());
        Box::pin(async move { Ok(response) })
    }
}

/// A completion service that is always unreachable.
pub struct FailingCompletion(pub String);

impl Completion for FailingCompletion {
    fn complete<'a>(&'a self, _prompt: &'a str) -> BoxFuture<'a, Result<String, ServiceError>> {
        let message = self.0.clone();
        Box::pin(async move { Err(ServiceError::Unavailable(message)) })
    }
}

/// A media-to-text service that always returns the same text.
pub struct ScriptedExtraction(pub String);

impl TextExtraction for ScriptedExtraction {
    fn extract<'a>(&'a self, _media_ref: &'a str) -> BoxFuture<'a, Result<String, ServiceError>> {
        let text = self.0.clone();
        Box::pin(async move { Ok(text) })
    }
}

/// A media-to-text service that is always unreachable.
pub struct FailingExtraction(pub String);

impl TextExtraction for FailingExtraction {
    fn extract<'a>(&'a self, _media_ref: &'a str) -> BoxFuture<'a, Result<String, ServiceError>> {
        let message = self.0.clone();
        Box::pin(async move { Err(ServiceError::Unavailable(message)) })
    }
}
