#![allow(dead_code)]

use futures::future::BoxFuture;

use labeljury::errors::TaskError;
use labeljury::record::{Category, Field, FieldKind, RecordView, Value};
use labeljury::services::ServiceError;
use labeljury::tasks::{Task, TaskOutput};

/// A configurable task for graph and runner tests: declare arbitrary
/// input/output fields, script its writes, or make it fail.
pub struct StubTask {
    name: String,
    inputs: Vec<Field>,
    outputs: Vec<Field>,
    values: Vec<(Field, Value)>,
    omitted: Vec<Field>,
    failure: Option<String>,
}

impl StubTask {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            values: Vec::new(),
            omitted: Vec::new(),
            failure: None,
        }
    }

    /// Declare an input field.
    pub fn reads(mut self, field: Field) -> Self {
        self.inputs.push(field);
        self
    }

    /// Declare an output field, written with a default value on invoke.
    pub fn writes(mut self, field: Field) -> Self {
        self.outputs.push(field);
        self
    }

    /// Script an explicit value for a write. The field does not have to be
    /// declared, which lets tests provoke undeclared-write failures.
    pub fn value(mut self, field: Field, value: impl Into<Value>) -> Self {
        self.values.push((field, value.into()));
        self
    }

    /// Declare an output but never write it (provokes a missing-output
    /// failure).
    pub fn omitting(mut self, field: Field) -> Self {
        self.outputs.push(field);
        self.omitted.push(field);
        self
    }

    /// Fail every invocation as if the collaborator were unreachable.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    fn default_value(&self, field: Field) -> Value {
        match field.kind() {
            FieldKind::Text => Value::Text(format!("{} from {}", field, self.name)),
            FieldKind::Category => Value::Category(Category::Tradeoff),
        }
    }
}

impl Task for StubTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> &[Field] {
        &self.inputs
    }

    fn outputs(&self) -> &[Field] {
        &self.outputs
    }

    fn invoke(&self, _view: RecordView) -> BoxFuture<'_, Result<TaskOutput, TaskError>> {
        Box::pin(async move {
            if let Some(message) = &self.failure {
                return Err(TaskError::Collaborator(ServiceError::Unavailable(
                    message.clone(),
                )));
            }

            let mut output = TaskOutput::new();
            for (field, value) in &self.values {
                output = output.write(*field, value.clone());
            }
            for &field in &self.outputs {
                let scripted = self.values.iter().any(|(f, _)| *f == field);
                if !scripted && !self.omitted.contains(&field) {
                    output = output.write(field, self.default_value(field));
                }
            }
            Ok(output)
        })
    }
}
