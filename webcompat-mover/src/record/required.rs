//! Required field definitions and the missing-field report.

/// A bug field that must be set before a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    OpSys,
    Url,
    Version,
}

/// Ordered list of required fields and how to describe them to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredFieldSpec {
    entries: Vec<(RequiredField, String)>,
}

impl Default for RequiredFieldSpec {
    fn default() -> Self {
        Self::new()
            .with(RequiredField::OpSys, "OS (Categories > Platform > OS)")
            .with(RequiredField::Url, "URL (References > URL)")
            .with(RequiredField::Version, "Browser version (Categories > Version)")
    }
}

impl RequiredFieldSpec {
    /// Creates an empty spec.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a field. A field added twice keeps its first position and
    /// takes the new description.
    #[must_use]
    pub fn with(mut self, field: RequiredField, description: impl Into<String>) -> Self {
        let description = description.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == field) {
            Some(entry) => entry.1 = description,
            None => self.entries.push((field, description)),
        }
        self
    }

    /// Iterates fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (RequiredField, &str)> {
        self.entries
            .iter()
            .map(|(field, description)| (*field, description.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Descriptions of required fields that are unset, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingFieldReport {
    descriptions: Vec<String>,
}

impl MissingFieldReport {
    pub(crate) fn push(&mut self, description: &str) {
        self.descriptions.push(description.to_string());
    }

    /// True when the bug can be moved.
    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }
}
