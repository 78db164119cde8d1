// src/domain/validation.rs
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Field-level validation failures collected while checking an entity before save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<F: Into<String>, M: Into<String>>(&mut self, field: F, message: M) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Messages recorded for one field, empty if the field passed
    pub fn messages(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// Ok when nothing was recorded, the collected errors otherwise
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .fields
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect();
        write!(f, "{}", rendered.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_errors_when_into_result_then_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn given_errors_on_two_fields_when_display_then_lists_both() {
        let mut errors = ValidationErrors::new();
        errors.add("title", "too long");
        errors.add("user_id", "This value does not exist");
        errors.add("title", "second");

        assert_eq!(errors.messages("title").len(), 2);
        assert!(errors.has_field("user_id"));
        assert_eq!(
            errors.to_string(),
            "title: too long, second; user_id: This value does not exist"
        );
    }
}
