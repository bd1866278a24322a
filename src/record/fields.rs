// src/record/fields.rs

use std::fmt;

/// The fixed set of record fields.
///
/// `ImageRef` and `Persona` are external initial input: they are filled in
/// by the caller before a run starts and no task may produce them. Every
/// other field is written by exactly one task per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Opaque handle to the label photo (a path or URL). Optional.
    ImageRef,
    /// Who the analysis is for ("Athlete", "Parent", ...).
    Persona,
    /// Ingredient text extracted from the image.
    ExtractedText,
    /// The scientist's report.
    ScientistReport,
    /// The coach's report.
    CoachReport,
    /// Final free-text verdict.
    Verdict,
    /// Final category.
    Category,
}

impl Field {
    /// Fields supplied by the caller rather than produced by a task.
    pub const EXTERNAL: [Field; 2] = [Field::ImageRef, Field::Persona];

    pub fn is_external(self) -> bool {
        Self::EXTERNAL.contains(&self)
    }

    /// The value kind this field accepts.
    pub fn kind(self) -> FieldKind {
        match self {
            Field::Category => FieldKind::Category,
            _ => FieldKind::Text,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::ImageRef => "image_ref",
            Field::Persona => "persona",
            Field::ExtractedText => "extracted_text",
            Field::ScientistReport => "scientist_report",
            Field::CoachReport => "coach_report",
            Field::Verdict => "verdict",
            Field::Category => "category",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of value a field stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Category,
}

/// A value stored in one record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Category(Category),
}

impl Value {
    pub fn kind(&self) -> FieldKind {
        match self {
            Value::Text(_) => FieldKind::Text,
            Value::Category(_) => FieldKind::Category,
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<Category> for Value {
    fn from(c: Category) -> Self {
        Value::Category(c)
    }
}

/// Final outcome category of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Safe,
    Warning,
    Tradeoff,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Safe => "SAFE",
            Category::Warning => "WARNING",
            Category::Tradeoff => "TRADEOFF",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
