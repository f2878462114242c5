use thiserror::Error;

/// Where a piece of input text came from
///
/// Only affects the wording of user-facing messages: a document read from a
/// file is reported differently from one that was typed or pasted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputOrigin {
    #[default]
    Typed,
    File,
}

/// Recoverable extraction errors surfaced to the user
///
/// None of these are fatal. The session layer clears the affected derived
/// state and keeps the raw input so the user can correct it.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{}", invalid_json_message(.origin))]
    InvalidJson {
        origin: InputOrigin,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid regular expression.")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("JSON document is nested deeper than {limit} levels.")]
    DepthLimitExceeded { limit: usize },
}

fn invalid_json_message(origin: &InputOrigin) -> &'static str {
    match origin {
        InputOrigin::Typed => "Invalid JSON format.",
        InputOrigin::File => "Invalid JSON format in the uploaded file.",
    }
}

pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_json_message_depends_on_origin() {
        let typed = ExtractError::InvalidJson {
            origin: InputOrigin::Typed,
            source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        };
        let file = ExtractError::InvalidJson {
            origin: InputOrigin::File,
            source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        };

        assert_eq!(typed.to_string(), "Invalid JSON format.");
        assert_eq!(file.to_string(), "Invalid JSON format in the uploaded file.");
    }

    #[test]
    fn test_invalid_pattern_message() {
        let err = ExtractError::InvalidPattern {
            pattern: "^bad(".to_string(),
            source: regex::Regex::new("^bad(").unwrap_err(),
        };
        assert_eq!(err.to_string(), "Invalid regular expression.");
    }
}
