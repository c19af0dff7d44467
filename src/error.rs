use thiserror::Error;

/// Errors raised by the paint library.
#[derive(Debug, Error)]
pub enum PaintError {
    #[error("invalid color {input:?}: {reason}")]
    InvalidColor { input: String, reason: String },

    #[error("snapshot holds {found} colors but the surface has {expected} cells")]
    LengthMismatch { expected: usize, found: usize },

    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

impl PaintError {
    pub(crate) fn invalid_color(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidColor {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
