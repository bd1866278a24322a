// src/tasks/extractor.rs

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::{debug, info};

use crate::errors::TaskError;
use crate::record::{Field, RecordView};
use crate::services::TextExtraction;
use crate::tasks::{Task, TaskOutput};

/// Text written when no image reference was supplied. Downstream tasks see
/// this sentinel instead of an empty field.
pub const NO_IMAGE_SENTINEL: &str = "No image provided.";

/// Vision entry point: turns the label photo into ingredient text.
///
/// An absent image reference is the one soft failure in the graph: the
/// extractor writes [`NO_IMAGE_SENTINEL`] and the run continues. A present
/// image that cannot be read or yields no text still fails the run.
pub struct Extractor {
    vision: Arc<dyn TextExtraction>,
}

impl Extractor {
    pub fn new(vision: Arc<dyn TextExtraction>) -> Self {
        Self { vision }
    }
}

impl Task for Extractor {
    fn name(&self) -> &str {
        "extractor"
    }

    fn inputs(&self) -> &[Field] {
        &[Field::ImageRef]
    }

    fn outputs(&self) -> &[Field] {
        &[Field::ExtractedText]
    }

    fn invoke(&self, view: RecordView) -> BoxFuture<'_, Result<TaskOutput, TaskError>> {
        Box::pin(async move {
            let media_ref = match view.try_text(Field::ImageRef)? {
                Some(r) if !r.trim().is_empty() => r.to_string(),
                _ => {
                    debug!("no image reference supplied; writing sentinel text");
                    return Ok(TaskOutput::new().write(Field::ExtractedText, NO_IMAGE_SENTINEL));
                }
            };

            info!(media = %media_ref, "extracting text from image");
            let text = self.vision.extract(&media_ref).await?;

            if text.trim().is_empty() {
                return Err(TaskError::Validation(format!(
                    "extraction of '{media_ref}' returned no text"
                )));
            }

            Ok(TaskOutput::new().write(Field::ExtractedText, text))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use crate::services::ServiceError;

    struct Scripted(&'static str);

    impl TextExtraction for Scripted {
        fn extract<'a>(
            &'a self,
            _media_ref: &'a str,
        ) -> BoxFuture<'a, Result<String, ServiceError>> {
            Box::pin(async move { Ok(self.0.to_string()) })
        }
    }

    fn view_with_image(image: Option<&str>) -> RecordView {
        let mut record = Record::new();
        if let Some(image) = image {
            record.set(Field::ImageRef, image).unwrap();
        }
        record.view(&[Field::ImageRef])
    }

    #[tokio::test]
    async fn absent_image_yields_sentinel() {
        let task = Extractor::new(Arc::new(Scripted("ignored")));
        let out = task.invoke(view_with_image(None)).await.unwrap();
        let writes = out.into_writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, Field::ExtractedText);
        assert_eq!(writes[0].1, NO_IMAGE_SENTINEL.into());
    }

    #[tokio::test]
    async fn present_image_goes_through_the_service() {
        let task = Extractor::new(Arc::new(Scripted("sugar, caffeine")));
        let out = task
            .invoke(view_with_image(Some("label.jpg")))
            .await
            .unwrap();
        assert_eq!(out.into_writes()[0].1, "sugar, caffeine".into());
    }

    #[tokio::test]
    async fn blank_extraction_is_a_validation_error() {
        let task = Extractor::new(Arc::new(Scripted("   ")));
        let err = task
            .invoke(view_with_image(Some("label.jpg")))
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::Validation(_)));
    }
}
