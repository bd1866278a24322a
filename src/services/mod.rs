// src/services/mod.rs

//! External collaborators the engine calls but does not implement: the
//! media-to-text service, the reasoning/completion service, and the static
//! knowledge lookup. Tasks hold these behind trait objects so tests can
//! substitute scripted stubs.

pub mod gemini;
pub mod knowledge;

use futures::future::BoxFuture;
use thiserror::Error;

pub use gemini::{GeminiClient, ModelConfig};
pub use knowledge::KnowledgeBase;

/// Failure of an external service call. Either way the current run is
/// aborted; retry policy is left to callers.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Unavailable(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Media-to-text: extract the text visible in the referenced image.
pub trait TextExtraction: Send + Sync {
    fn extract<'a>(&'a self, media_ref: &'a str) -> BoxFuture<'a, Result<String, ServiceError>>;
}

/// Reasoning/completion: one stateless prompt in, one response text out.
pub trait Completion: Send + Sync {
    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, ServiceError>>;
}
