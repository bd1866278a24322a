// src/tasks/coach.rs

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::info;

use crate::errors::TaskError;
use crate::record::{Field, RecordView};
use crate::services::Completion;
use crate::tasks::{Task, TaskOutput};

/// Persona analyst: judges the ingredients against the user's goal rather
/// than their chemistry. Runs in the same layer as the scientist and never
/// reads its report.
pub struct Coach {
    llm: Arc<dyn Completion>,
}

impl Coach {
    pub fn new(llm: Arc<dyn Completion>) -> Self {
        Self { llm }
    }

    fn prompt(&self, persona: &str, ingredients: &str) -> String {
        format!(
            "You are a nutrition coach for a {persona}.\n\
             The user wants to know if they should eat this.\n\
             Ingredients: {ingredients}\n\
             \n\
             Ignore minor chemicals. Focus on the goal.\n\
             - Athlete: wants protein/energy.\n\
             - Parent: wants safety.\n\
             \n\
             Is this good for them?"
        )
    }
}

impl Task for Coach {
    fn name(&self) -> &str {
        "coach"
    }

    fn inputs(&self) -> &[Field] {
        &[Field::ExtractedText, Field::Persona]
    }

    fn outputs(&self) -> &[Field] {
        &[Field::CoachReport]
    }

    fn invoke(&self, view: RecordView) -> BoxFuture<'_, Result<TaskOutput, TaskError>> {
        Box::pin(async move {
            let ingredients = view.text(Field::ExtractedText)?;
            let persona = view.text(Field::Persona)?;
            if ingredients.trim().is_empty() {
                return Err(TaskError::Validation(
                    "extracted text is empty".to_string(),
                ));
            }

            info!(persona = %persona, "coach analyzing ingredients");
            let report = self
                .llm
                .complete(&self.prompt(persona, ingredients))
                .await?;
            Ok(TaskOutput::new().write(Field::CoachReport, report))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RecordError;
    use crate::record::Record;
    use crate::services::ServiceError;

    struct Fixed;

    impl Completion for Fixed {
        fn complete<'a>(&'a self, _prompt: &'a str) -> BoxFuture<'a, Result<String, ServiceError>> {
            Box::pin(async move { Ok("coach report".to_string()) })
        }
    }

    #[tokio::test]
    async fn missing_persona_is_a_contract_violation() {
        let mut record = Record::new();
        record.set(Field::ExtractedText, "water").unwrap();
        let view = record.view(&[Field::ExtractedText, Field::Persona]);

        let task = Coach::new(Arc::new(Fixed));
        let err = task.invoke(view).await.unwrap_err();
        assert!(matches!(
            err,
            TaskError::Record(RecordError::MissingField(Field::Persona))
        ));
    }

    #[tokio::test]
    async fn writes_only_its_own_report_field() {
        let mut record = Record::new();
        record.set(Field::ExtractedText, "oats, protein").unwrap();
        record.set(Field::Persona, "Athlete").unwrap();
        let view = record.view(&[Field::ExtractedText, Field::Persona]);

        let task = Coach::new(Arc::new(Fixed));
        let writes = task.invoke(view).await.unwrap().into_writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, Field::CoachReport);
    }
}
