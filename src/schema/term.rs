use std::fmt;

use super::Field;

/// Term represents the value that the token can take.
///
/// It is made of a [`Field`] and the text of the token.
#[derive(Clone, PartialEq, PartialOrd, Ord, Eq, Hash)]
pub struct Term {
    field: Field,
    text: String,
}

impl Term {
    /// Builds a term given a field, and a text value.
    pub fn from_field_text(field: Field, text: &str) -> Term {
        Term {
            field,
            text: text.to_string(),
        }
    }

    /// Returns the field.
    pub fn field(&self) -> Field {
        self.field
    }

    /// Returns the text of the term.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Term(field={}, text={:?})", self.field.field_id(), self.text)
    }
}
