// src/record/store.rs

use std::collections::HashMap;

use crate::errors::RecordError;
use crate::record::fields::{Category, Field, Value};

/// Run-scoped shared state: one optional slot per field.
///
/// Every slot starts empty and is written at most once. The runner is the
/// only writer after a run starts; tasks never touch a `Record` directly,
/// they receive a [`RecordView`] restricted to their declared inputs.
#[derive(Debug, Default, Clone)]
pub struct Record {
    image_ref: Option<Value>,
    persona: Option<Value>,
    extracted_text: Option<Value>,
    scientist_report: Option<Value>,
    coach_report: Option<Value>,
    verdict: Option<Value>,
    category: Option<Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, field: Field) -> &Option<Value> {
        match field {
            Field::ImageRef => &self.image_ref,
            Field::Persona => &self.persona,
            Field::ExtractedText => &self.extracted_text,
            Field::ScientistReport => &self.scientist_report,
            Field::CoachReport => &self.coach_report,
            Field::Verdict => &self.verdict,
            Field::Category => &self.category,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<Value> {
        match field {
            Field::ImageRef => &mut self.image_ref,
            Field::Persona => &mut self.persona,
            Field::ExtractedText => &mut self.extracted_text,
            Field::ScientistReport => &mut self.scientist_report,
            Field::CoachReport => &mut self.coach_report,
            Field::Verdict => &mut self.verdict,
            Field::Category => &mut self.category,
        }
    }

    /// Read a field, failing if it has not been written yet.
    pub fn get(&self, field: Field) -> Result<&Value, RecordError> {
        self.slot(field)
            .as_ref()
            .ok_or(RecordError::MissingField(field))
    }

    pub fn try_get(&self, field: Field) -> Option<&Value> {
        self.slot(field).as_ref()
    }

    /// Write a field exactly once, enforcing the field's value kind.
    pub fn set(&mut self, field: Field, value: impl Into<Value>) -> Result<(), RecordError> {
        let value = value.into();
        if value.kind() != field.kind() {
            return Err(RecordError::KindMismatch(field));
        }
        let slot = self.slot_mut(field);
        if slot.is_some() {
            return Err(RecordError::DuplicateWrite(field));
        }
        *slot = Some(value);
        Ok(())
    }

    /// Read a text field.
    pub fn text(&self, field: Field) -> Result<&str, RecordError> {
        match self.get(field)? {
            Value::Text(s) => Ok(s),
            Value::Category(_) => Err(RecordError::KindMismatch(field)),
        }
    }

    /// Read the category field.
    pub fn category(&self, field: Field) -> Result<Category, RecordError> {
        match self.get(field)? {
            Value::Category(c) => Ok(*c),
            Value::Text(_) => Err(RecordError::KindMismatch(field)),
        }
    }

    /// Frozen snapshot of the given fields, for handing to a task.
    ///
    /// Declared fields that are still empty (an absent external input) are
    /// simply missing from the view; anything outside `fields` cannot be
    /// read through it at all.
    pub fn view(&self, fields: &[Field]) -> RecordView {
        let values = fields
            .iter()
            .filter_map(|&f| self.slot(f).clone().map(|v| (f, v)))
            .collect();
        RecordView {
            declared: fields.to_vec(),
            values,
        }
    }
}

/// Read-only snapshot of the record fields one task declared as inputs.
///
/// Built by the runner after all producing tasks have completed, so a view
/// is always internally consistent; it is never updated afterwards.
#[derive(Debug, Clone)]
pub struct RecordView {
    declared: Vec<Field>,
    values: HashMap<Field, Value>,
}

impl RecordView {
    pub fn get(&self, field: Field) -> Result<&Value, RecordError> {
        if !self.declared.contains(&field) {
            return Err(RecordError::UndeclaredRead(field));
        }
        self.values
            .get(&field)
            .ok_or(RecordError::MissingField(field))
    }

    /// Read a declared field that may legitimately be absent.
    pub fn try_get(&self, field: Field) -> Result<Option<&Value>, RecordError> {
        if !self.declared.contains(&field) {
            return Err(RecordError::UndeclaredRead(field));
        }
        Ok(self.values.get(&field))
    }

    pub fn text(&self, field: Field) -> Result<&str, RecordError> {
        match self.get(field)? {
            Value::Text(s) => Ok(s),
            Value::Category(_) => Err(RecordError::KindMismatch(field)),
        }
    }

    pub fn try_text(&self, field: Field) -> Result<Option<&str>, RecordError> {
        match self.try_get(field)? {
            Some(Value::Text(s)) => Ok(Some(s)),
            Some(Value::Category(_)) => Err(RecordError::KindMismatch(field)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_roundtrips() {
        let mut record = Record::new();
        record.set(Field::Persona, "Athlete").unwrap();
        assert_eq!(record.text(Field::Persona).unwrap(), "Athlete");
    }

    #[test]
    fn get_unwritten_field_is_missing() {
        let record = Record::new();
        assert_eq!(
            record.get(Field::ExtractedText),
            Err(RecordError::MissingField(Field::ExtractedText))
        );
    }

    #[test]
    fn second_write_is_rejected() {
        let mut record = Record::new();
        record.set(Field::ExtractedText, "sugar, water").unwrap();
        assert_eq!(
            record.set(Field::ExtractedText, "again"),
            Err(RecordError::DuplicateWrite(Field::ExtractedText))
        );
        // The first write survives.
        assert_eq!(record.text(Field::ExtractedText).unwrap(), "sugar, water");
    }

    #[test]
    fn category_field_rejects_text() {
        let mut record = Record::new();
        assert_eq!(
            record.set(Field::Category, "SAFE"),
            Err(RecordError::KindMismatch(Field::Category))
        );
        record.set(Field::Category, Category::Safe).unwrap();
        assert_eq!(record.category(Field::Category).unwrap(), Category::Safe);
    }

    #[test]
    fn view_blocks_undeclared_reads() {
        let mut record = Record::new();
        record.set(Field::ExtractedText, "water").unwrap();
        record.set(Field::Persona, "Parent").unwrap();

        let view = record.view(&[Field::ExtractedText]);
        assert_eq!(view.text(Field::ExtractedText).unwrap(), "water");
        assert_eq!(
            view.get(Field::Persona),
            Err(RecordError::UndeclaredRead(Field::Persona))
        );
    }

    #[test]
    fn view_is_a_frozen_snapshot() {
        let mut record = Record::new();
        record.set(Field::ExtractedText, "water").unwrap();
        let view = record.view(&[Field::ExtractedText, Field::Persona]);

        // Writes after the snapshot are invisible to the view.
        record.set(Field::Persona, "Parent").unwrap();
        assert_eq!(view.try_text(Field::Persona).unwrap(), None);
    }
}
