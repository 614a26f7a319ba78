//! Error types for configuration and saved-state handling.

use thiserror::Error;

/// Errors surfaced to the host.
///
/// The animation engine itself never fails; these only come from parsing
/// configuration and decoding saved state.
#[derive(Debug, Error)]
pub enum CoverError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Saved state error: {0}")]
    State(String),
}

/// Result type for cover operations.
pub type CoverResult<T> = Result<T, CoverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_source() {
        let cases = [
            (CoverError::InvalidColor("#12".into()), "Invalid color: #12"),
            (CoverError::Config("density".into()), "Configuration error: density"),
            (CoverError::State("eof".into()), "Saved state error: eof"),
        ];
        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
            match err {
                CoverError::InvalidColor(_) | CoverError::Config(_) | CoverError::State(_) => {}
            }
        }
    }
}
