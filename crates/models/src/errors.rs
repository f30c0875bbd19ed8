use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),
    #[error("invalid parameter {field}: {reason}")]
    InvalidParameter { field: &'static str, reason: String },
    /// A stored line could not be decoded. `name` is set when the line's key was still readable.
    #[error("cannot parse stored record: {reason}")]
    Parse { name: Option<String>, reason: String },
}

impl ModelError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { field, reason: reason.into() }
    }
}
