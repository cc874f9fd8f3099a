use thiserror::Error;

/// Errors surfaced by the normalization, diff and merge operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DnaError {
    /// A required argument was empty or missing.
    #[error("Argument {argument} cannot be null or empty")]
    InvalidArgument {
        /// Name of the offending argument, e.g. `selector` or `value`.
        argument: &'static str,
    },

    /// The upstream CSS parser rejected the source text.
    #[error("failed to parse stylesheet: {message}")]
    Parse { message: String },
}

impl DnaError {
    pub(crate) fn invalid(argument: &'static str) -> Self {
        DnaError::InvalidArgument { argument }
    }
}

pub type Result<T> = std::result::Result<T, DnaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_names_the_argument() {
        let err = DnaError::invalid("selector");
        assert_eq!(err.to_string(), "Argument selector cannot be null or empty");
    }

    #[test]
    fn parse_error_carries_upstream_message() {
        let err = DnaError::Parse {
            message: "Unexpected end of input".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to parse stylesheet: Unexpected end of input"
        );
    }
}
