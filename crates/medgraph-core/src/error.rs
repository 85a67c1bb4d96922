use thiserror::Error;

/// Core error types for medgraph entity handling
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid entity ID: {0}")]
    InvalidId(String),

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("{field} must be at most {max} characters (got {actual})")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

impl CoreError {
    /// Create a new InvalidId error
    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId(id.into())
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CoreError::EmptyField { field: "name" }.to_string(),
            "name must not be empty"
        );
        assert_eq!(
            CoreError::FieldTooLong {
                field: "hospital",
                max: 100,
                actual: 101
            }
            .to_string(),
            "hospital must be at most 100 characters (got 101)"
        );
        assert_eq!(CoreError::invalid_id("abc").to_string(), "Invalid entity ID: abc");
    }
}
