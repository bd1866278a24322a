// src/errors.rs

//! Crate-wide error types, one enum per layer of the engine.
//!
//! Build-time problems (`GraphError`) surface before any task runs; runtime
//! problems abort the current run only. `RecordError` variants indicate a
//! broken task implementation rather than bad input.

use thiserror::Error;

use crate::record::Field;
use crate::services::ServiceError;

/// Contract violations on the shared record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("field '{0}' has not been written")]
    MissingField(Field),

    #[error("field '{0}' was already written in this run")]
    DuplicateWrite(Field),

    #[error("field '{0}' is outside the task's declared input set")]
    UndeclaredRead(Field),

    #[error("value kind does not match field '{0}'")]
    KindMismatch(Field),
}

/// Problems detected while building the task graph. These are fatal at
/// startup and can never occur at run time.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("graph must contain at least one task")]
    Empty,

    #[error("duplicate task name '{0}'")]
    DuplicateTask(String),

    #[error("field '{field}' is produced by both '{first}' and '{second}'")]
    DuplicateProducer {
        field: Field,
        first: String,
        second: String,
    },

    #[error("task '{task}' declares output '{field}', which is reserved for external input")]
    ReservedField { task: String, field: Field },

    #[error("task '{task}' input '{field}' has no producer and is not an external input")]
    UnmappedInput { task: String, field: Field },

    #[error("cycle detected in task graph involving '{0}'")]
    Cycle(String),
}

/// Failure of a single task invocation.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("collaborator unavailable: {0}")]
    Collaborator(#[from] ServiceError),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Failure of a whole run: which task broke, and how.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("task '{task}' failed: {source}")]
    TaskFailed {
        task: String,
        #[source]
        source: TaskError,
    },

    #[error("task '{task}' panicked: {message}")]
    TaskPanicked { task: String, message: String },

    #[error("task '{task}' wrote undeclared field '{field}'")]
    UndeclaredWrite { task: String, field: Field },

    #[error("task '{task}' did not write its declared output '{field}'")]
    MissingOutput { task: String, field: Field },

    #[error("task '{task}': {source}")]
    Record {
        task: String,
        #[source]
        source: RecordError,
    },
}

impl RunError {
    /// Name of the task this failure is attributed to.
    pub fn task(&self) -> &str {
        match self {
            RunError::TaskFailed { task, .. }
            | RunError::TaskPanicked { task, .. }
            | RunError::UndeclaredWrite { task, .. }
            | RunError::MissingOutput { task, .. }
            | RunError::Record { task, .. } => task,
        }
    }
}
