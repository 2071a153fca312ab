use std::fmt;

use serde::Serialize;

use crate::{BlockJoinError, DocId, Score};

pub(crate) fn does_not_match(doc: DocId) -> BlockJoinError {
    BlockJoinError::InvalidArgument(format!("Document #({doc}) does not match"))
}

fn is_true(val: &bool) -> bool {
    *val
}

/// Object describing the score of a given document.
/// It is organized in trees.
///
/// `.to_pretty_json()` can be useful to print out a human readable
/// representation of this tree when debugging a given score.
#[derive(Clone, Serialize)]
pub struct Explanation {
    value: Score,
    description: String,
    #[serde(skip_serializing_if = "is_true")]
    is_match: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<Explanation>,
}

impl fmt::Debug for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Explanation({}: {})", self.description, self.value)?;
        if !self.details.is_empty() {
            f.debug_list().entries(self.details.iter()).finish()?;
        }
        Ok(())
    }
}

impl Explanation {
    /// Creates a new explanation object.
    pub fn new<T: ToString>(description: T, value: Score) -> Explanation {
        Explanation {
            value,
            description: description.to_string(),
            is_match: true,
            details: Vec::new(),
        }
    }

    /// Creates the explanation of a document that is not matched.
    ///
    /// Its value is 0.
    pub fn not_a_match() -> Explanation {
        Explanation {
            value: 0.0,
            description: "Not a match".to_string(),
            is_match: false,
            details: Vec::new(),
        }
    }

    /// Returns the value associated to the current node.
    pub fn value(&self) -> Score {
        self.value
    }

    /// Returns the description of the current node.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns false iff the explained document does not match.
    pub fn is_match(&self) -> bool {
        self.is_match
    }

    /// Returns the children of the current node.
    pub fn details(&self) -> &[Explanation] {
        &self.details
    }

    /// Add some detail, explaining some part of the current node formula.
    ///
    /// Details are treated as child of the current node.
    pub fn add_detail(&mut self, child_explanation: Explanation) {
        self.details.push(child_explanation);
    }

    /// Shortcut for `self.details.push(Explanation::new(name, value));`
    pub fn add_const<T: ToString>(&mut self, name: T, value: Score) {
        self.details.push(Explanation::new(name, value));
    }

    /// Returns an indented json representation of the explanation tree for debug usage.
    pub fn to_pretty_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::Explanation;

    #[test]
    fn test_explanation_json() {
        let mut explanation = Explanation::new("product of:", 2.0);
        explanation.add_const("tf", 1.0);
        explanation.add_const("idf", 2.0);
        let json = explanation.to_pretty_json().unwrap();
        assert!(json.contains("\"description\": \"product of:\""));
        assert!(json.contains("\"description\": \"idf\""));
        assert!(!json.contains("is_match"));
        assert_eq!(explanation.details().len(), 2);
    }

    #[test]
    fn test_not_a_match() {
        let explanation = Explanation::not_a_match();
        assert!(!explanation.is_match());
        assert_eq!(explanation.value(), 0.0);
        assert_eq!(explanation.description(), "Not a match");
        let json = explanation.to_pretty_json().unwrap();
        assert!(json.contains("\"is_match\": false"));
    }
}
