use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("clip name is empty")]
    EmptyName,
    #[error("clip name {0:?} is not a legal identifier")]
    InvalidSyntax(String),
    #[error("a clip named {0} already exists")]
    DuplicateName(String),
}

/// A validated clip name: an ASCII letter followed by letters, digits
/// or underscores. Comparison is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !is_legal(&name) {
            return Err(ValidationError::InvalidSyntax(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_legal(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(first) if first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Checks a candidate name against the currently declared set. Rules
/// short-circuit in order: empty, syntax, duplicate.
pub fn validate(candidate: &str, existing: &[Identifier]) -> Result<Identifier, ValidationError> {
    let ident = Identifier::new(candidate)?;
    if existing.iter().any(|entry| entry == &ident) {
        return Err(ValidationError::DuplicateName(ident.into_inner()));
    }
    Ok(ident)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn existing() -> Vec<Identifier> {
        vec![
            Identifier::new("Footsteps").unwrap(),
            Identifier::new("Explosion").unwrap(),
        ]
    }

    #[test]
    fn accepts_legal_names() {
        for name in ["Jump", "a", "snake_case_9", "X1_"] {
            assert_eq!(validate(name, &existing()).unwrap().as_str(), name);
        }
    }

    #[test]
    fn rejects_empty_before_syntax() {
        assert_eq!(validate("", &existing()), Err(ValidationError::EmptyName));
    }

    #[test]
    fn rejects_illegal_syntax() {
        for name in ["3Jump", "_lead", "has space", "dash-ed", "uni\u{e9}"] {
            assert_eq!(
                validate(name, &existing()),
                Err(ValidationError::InvalidSyntax(name.to_string()))
            );
        }
    }

    #[test]
    fn rejects_exact_duplicates_case_sensitively() {
        assert_eq!(
            validate("Explosion", &existing()),
            Err(ValidationError::DuplicateName("Explosion".to_string()))
        );
        // Different case is a different identifier.
        assert!(validate("explosion", &existing()).is_ok());
    }

    #[test]
    fn identifier_serializes_as_bare_string() {
        let ident = Identifier::new("Jump").unwrap();
        assert_eq!(serde_json::to_string(&ident).unwrap(), "\"Jump\"");
        let back: Identifier = serde_json::from_str("\"Jump\"").unwrap();
        assert_eq!(back, ident);
    }
}
