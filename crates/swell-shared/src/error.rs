//! Error types for Swell.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwellError {
    #[error("Unknown focus: {0} (expected relationships, stress or performance)")]
    UnknownFocus(String),

    #[error("Unknown tier: {0} (expected easy, core or stretch)")]
    UnknownTier(String),

    #[error("Invalid day key '{0}': expected YYYY-MM-DD")]
    InvalidDay(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_input() {
        let err = SwellError::UnknownTier("epic".into());
        assert_eq!(
            err.to_string(),
            "Unknown tier: epic (expected easy, core or stretch)"
        );
        assert!(SwellError::InvalidDay("soon".into())
            .to_string()
            .contains("'soon'"));
    }
}
