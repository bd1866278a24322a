// src/tasks/mod.rs

//! The task contract plus the four concrete tasks of the analysis graph.
//!
//! A task declares the record fields it reads and the fields it produces;
//! the graph is wired from those declarations alone. Tasks are constructed
//! once at graph-build time, hold only shared immutable configuration
//! (collaborator handles), and are invoked exactly once per run.

pub mod coach;
pub mod extractor;
pub mod scientist;
pub mod synthesizer;

use futures::future::BoxFuture;

use crate::errors::TaskError;
use crate::record::{Field, RecordView, Value};

pub use coach::Coach;
pub use extractor::Extractor;
pub use scientist::Scientist;
pub use synthesizer::{MarkerRules, Synthesizer};

/// A unit of work in the graph.
pub trait Task: Send + Sync {
    /// Unique name, used in logs and failure reports.
    fn name(&self) -> &str;

    /// Record fields this task reads. Must all be produced by other tasks
    /// or be external initial input.
    fn inputs(&self) -> &[Field];

    /// Record fields this task produces. Each field has exactly one
    /// producer in a valid graph.
    fn outputs(&self) -> &[Field];

    /// Run the task against a frozen view of its declared inputs.
    ///
    /// Implementations must write every declared output and nothing else;
    /// the runner enforces both.
    fn invoke(&self, view: RecordView) -> BoxFuture<'_, Result<TaskOutput, TaskError>>;
}

/// The writes a task hands back to the runner.
#[derive(Debug, Default)]
pub struct TaskOutput {
    writes: Vec<(Field, Value)>,
}

impl TaskOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(mut self, field: Field, value: impl Into<Value>) -> Self {
        self.writes.push((field, value.into()));
        self
    }

    pub fn into_writes(self) -> Vec<(Field, Value)> {
        self.writes
    }
}
