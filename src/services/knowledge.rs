// src/services/knowledge.rs

/// Static substance → risk/benefit notes, consulted read-only by the
/// scientist to ground its prompt before reasoning.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<(String, String)>,
}

impl KnowledgeBase {
    /// The built-in table.
    pub fn builtin() -> Self {
        let entries = [
            ("aspartame", "Risk: Headaches & Gut sensitivity"),
            ("sugar", "Risk: High Glycemic Index (Spikes Insulin)"),
            ("peanuts", "Risk: Severe Allergen (Anaphylaxis)"),
            ("caffeine", "Risk: Anxiety/Jitters"),
            ("protein", "Benefit: Muscle Repair"),
        ]
        .into_iter()
        .map(|(name, note)| (name.to_string(), note.to_string()))
        .collect();
        Self { entries }
    }

    /// Extend the table with additional entries (e.g. from config).
    pub fn with_entries(mut self, extra: impl IntoIterator<Item = (String, String)>) -> Self {
        self.entries.extend(extra);
        self
    }

    /// All known substances found in `text`, as "NAME: note" lines.
    ///
    /// Case-insensitive substring match: "Contains Aspartame" matches the
    /// "aspartame" entry.
    pub fn matches(&self, text: &str) -> Vec<String> {
        let haystack = text.to_lowercase();
        self.entries
            .iter()
            .filter(|(name, _)| haystack.contains(&name.to_lowercase()))
            .map(|(name, note)| format!("{}: {}", name.to_uppercase(), note))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}
