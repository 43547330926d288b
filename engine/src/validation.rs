use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Field name mapped to every rule it violated, in the order the rules ran.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.0.entry(field.into()).or_default().push(message.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// `Ok(())` when no rule failed, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), EntityValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(EntityValidationError(self))
        }
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{field}: {}", messages.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("entity validation failed ({0})")]
pub struct EntityValidationError(pub FieldErrors);

impl EntityValidationError {
    pub fn errors(&self) -> &FieldErrors {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_accumulate_per_field_in_insertion_order() {
        let mut errors = FieldErrors::new();
        errors
            .add("name", "name should not be empty")
            .add("name", "name must be shorter than or equal to 255 characters")
            .add("description", "too long");

        assert_eq!(
            Some(
                &[
                    "name should not be empty".to_string(),
                    "name must be shorter than or equal to 255 characters".to_string()
                ][..]
            ),
            errors.get("name")
        );
        assert_eq!(1, errors.get("description").unwrap().len());
    }

    #[test]
    fn into_result_is_ok_only_when_empty() {
        assert!(FieldErrors::new().into_result().is_ok());

        let mut errors = FieldErrors::new();
        errors.add("name", "name should not be empty");
        let err = errors.into_result().unwrap_err();

        assert_eq!(
            "entity validation failed (name: name should not be empty)",
            err.to_string()
        );
    }
}
