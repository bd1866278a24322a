// src/tasks/synthesizer.rs

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::info;

use crate::errors::TaskError;
use crate::record::{Category, Field, RecordView};
use crate::services::Completion;
use crate::tasks::{Task, TaskOutput};

/// Ordered marker rules mapping response tokens to categories.
///
/// Rules are evaluated left to right over the whole response text and the
/// last matching rule wins; with no match the category stays `Tradeoff`.
/// The default order places WARNING last, so a response carrying both
/// tokens is classified WARNING.
#[derive(Debug, Clone)]
pub struct MarkerRules {
    rules: Vec<(&'static str, Category)>,
}

impl MarkerRules {
    pub fn classify(&self, text: &str) -> Category {
        let mut category = Category::Tradeoff;
        for (marker, c) in &self.rules {
            if text.contains(marker) {
                category = *c;
            }
        }
        category
    }
}

impl Default for MarkerRules {
    fn default() -> Self {
        Self {
            rules: vec![("SAFE", Category::Safe), ("WARNING", Category::Warning)],
        }
    }
}

/// Terminal fan-in task: weighs both reports against each other and writes
/// the final verdict plus its category.
pub struct Synthesizer {
    llm: Arc<dyn Completion>,
    rules: MarkerRules,
}

impl Synthesizer {
    pub fn new(llm: Arc<dyn Completion>) -> Self {
        Self {
            llm,
            rules: MarkerRules::default(),
        }
    }

    fn prompt(&self, scientist: &str, coach: &str) -> String {
        format!(
            "You are the final judge.\n\
             Scientist report: {scientist}\n\
             Coach report: {coach}\n\
             \n\
             Rules:\n\
             1. If the scientist flags something toxic or an allergen, the mode is WARNING.\n\
             2. If the scientist dislikes it but the coach likes it, the mode is TRADEOFF.\n\
             3. If both agree it's good, the mode is SAFE.\n\
             \n\
             Output format:\n\
             Verdict: [one short sentence]\n\
             Mode: [SAFE / WARNING / TRADEOFF]"
        )
    }
}

impl Task for Synthesizer {
    fn name(&self) -> &str {
        "synthesizer"
    }

    fn inputs(&self) -> &[Field] {
        &[Field::ScientistReport, Field::CoachReport]
    }

    fn outputs(&self) -> &[Field] {
        &[Field::Verdict, Field::Category]
    }

    fn invoke(&self, view: RecordView) -> BoxFuture<'_, Result<TaskOutput, TaskError>> {
        Box::pin(async move {
            let scientist = view.text(Field::ScientistReport)?;
            let coach = view.text(Field::CoachReport)?;

            let response = self.llm.complete(&self.prompt(scientist, coach)).await?;
            let category = self.rules.classify(&response);
            info!(category = %category, "synthesizer reached a verdict");

            Ok(TaskOutput::new()
                .write(Field::Verdict, response)
                .write(Field::Category, category))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_token_classifies_safe() {
        let rules = MarkerRules::default();
        assert_eq!(
            rules.classify("Verdict: fine. Mode: SAFE"),
            Category::Safe
        );
    }

    #[test]
    fn warning_token_classifies_warning() {
        let rules = MarkerRules::default();
        assert_eq!(
            rules.classify("Verdict: allergen. Mode: WARNING"),
            Category::Warning
        );
    }

    #[test]
    fn no_token_defaults_to_tradeoff() {
        let rules = MarkerRules::default();
        assert_eq!(
            rules.classify("Verdict: depends on the dose."),
            Category::Tradeoff
        );
    }

    #[test]
    fn warning_wins_when_both_tokens_appear() {
        // Last matching rule wins; WARNING is ordered after SAFE.
        let rules = MarkerRules::default();
        assert_eq!(
            rules.classify("Mostly SAFE, but peanuts mean WARNING for allergies."),
            Category::Warning
        );
    }

    #[test]
    fn markers_are_case_sensitive() {
        let rules = MarkerRules::default();
        assert_eq!(rules.classify("probably safe"), Category::Tradeoff);
    }
}
