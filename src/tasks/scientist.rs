// src/tasks/scientist.rs

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::info;

use crate::errors::TaskError;
use crate::record::{Field, RecordView};
use crate::services::{Completion, KnowledgeBase};
use crate::tasks::{Task, TaskOutput};

/// Toxicology analyst: grounds the extracted ingredient list against the
/// knowledge table, then asks the completion service for a cold, factual
/// risk report.
pub struct Scientist {
    llm: Arc<dyn Completion>,
    knowledge: KnowledgeBase,
}

impl Scientist {
    pub fn new(llm: Arc<dyn Completion>, knowledge: KnowledgeBase) -> Self {
        Self { llm, knowledge }
    }

    fn prompt(&self, ingredients: &str, known: &[String]) -> String {
        format!(
            "You are a strict toxicologist.\n\
             Analyze these ingredients: {ingredients}\n\
             \n\
             Known risk data:\n{}\n\
             \n\
             If you see a known risk, highlight it.\n\
             If the list is mostly chemical/processed, say so.\n\
             Be cold and factual.",
            if known.is_empty() {
                "(none on record)".to_string()
            } else {
                known.join("\n")
            }
        )
    }
}

impl Task for Scientist {
    fn name(&self) -> &str {
        "scientist"
    }

    fn inputs(&self) -> &[Field] {
        &[Field::ExtractedText]
    }

    fn outputs(&self) -> &[Field] {
        &[Field::ScientistReport]
    }

    fn invoke(&self, view: RecordView) -> BoxFuture<'_, Result<TaskOutput, TaskError>> {
        Box::pin(async move {
            let ingredients = view.text(Field::ExtractedText)?.to_lowercase();
            if ingredients.trim().is_empty() {
                return Err(TaskError::Validation(
                    "extracted text is empty".to_string(),
                ));
            }

            let known = self.knowledge.matches(&ingredients);
            info!(known_hits = known.len(), "scientist analyzing ingredients");

            let report = self.llm.complete(&self.prompt(&ingredients, &known)).await?;
            Ok(TaskOutput::new().write(Field::ScientistReport, report))
        })
    }
}
