use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt;

#[derive(Debug)]
pub enum NormalizerError {
    // I/O errors
    Io(std::io::Error),
    GrammarNotFound(String),

    // Grammar resource errors
    TransducerNotFound(String),
    InvalidGrammar(String),
    UnsupportedArchive(String),
    Serialization(String),

    // Request validation errors
    InvalidRequest(String),
    TextTooLong { length: usize, max: usize },

    // Internal errors
    Unknown(String),
}

impl fmt::Display for NormalizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizerError::Io(e) => write!(f, "I/O error: {}", e),
            NormalizerError::GrammarNotFound(path) => {
                write!(f, "Grammar archive not found: {}", path)
            }
            NormalizerError::TransducerNotFound(name) => {
                write!(f, "Transducer '{}' not found in grammar archive", name)
            }
            NormalizerError::InvalidGrammar(msg) => write!(f, "Invalid grammar: {}", msg),
            NormalizerError::UnsupportedArchive(msg) => {
                write!(f, "Unsupported grammar archive: {}", msg)
            }
            NormalizerError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            NormalizerError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            NormalizerError::TextTooLong { length, max } => write!(
                f,
                "Text too long: {} characters (maximum is {})",
                length, max
            ),
            NormalizerError::Unknown(msg) => write!(f, "Unknown error: {}", msg),
        }
    }
}

impl std::error::Error for NormalizerError {}

// Conversions
impl From<std::io::Error> for NormalizerError {
    fn from(err: std::io::Error) -> Self {
        NormalizerError::Io(err)
    }
}

impl From<serde_json::Error> for NormalizerError {
    fn from(err: serde_json::Error) -> Self {
        NormalizerError::Serialization(err.to_string())
    }
}

impl From<crate::fst::FstError> for NormalizerError {
    fn from(err: crate::fst::FstError) -> Self {
        NormalizerError::InvalidGrammar(err.to_string())
    }
}

// Axum integration
impl IntoResponse for NormalizerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            NormalizerError::InvalidRequest(_) | NormalizerError::TextTooLong { .. } => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            _ => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (
            status,
            axum::Json(serde_json::json!({
                "status": "error",
                "error": message
            })),
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, NormalizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_too_long() {
        let err = NormalizerError::TextTooLong {
            length: 12_000,
            max: 10_000,
        };
        assert_eq!(
            err.to_string(),
            "Text too long: 12000 characters (maximum is 10000)"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: NormalizerError = io.into();
        assert!(matches!(err, NormalizerError::Io(_)));
    }

    #[test]
    fn test_request_errors_map_to_bad_request() {
        let response = NormalizerError::InvalidRequest("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_grammar_errors_map_to_internal_error() {
        let response = NormalizerError::TransducerNotFound("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
