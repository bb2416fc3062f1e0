//! Text matching utilities for question assertions

/// Text matching strategies for assertions
#[derive(Debug, Clone)]
pub enum TextMatch {
    /// Exact text match
    Exact(String),
    /// Text starts with prefix
    StartsWith(String),
    /// Text contains substring
    Contains(String),
}

impl TextMatch {
    /// Assert that the actual text matches this pattern
    pub fn assert(&self, actual: &str, context: &str) {
        match self {
            TextMatch::Exact(expected) => {
                assert_eq!(
                    actual, expected,
                    "{context}: expected text '{expected}', got '{actual}'"
                );
            }
            TextMatch::StartsWith(prefix) => {
                assert!(
                    actual.starts_with(prefix.as_str()),
                    "{context}: expected text starting with '{prefix}', got '{actual}'"
                );
            }
            TextMatch::Contains(needle) => {
                assert!(
                    actual.contains(needle.as_str()),
                    "{context}: expected text containing '{needle}', got '{actual}'"
                );
            }
        }
    }
}
