use models::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("person already exists: {0}")]
    DuplicateKey(String),
    #[error("person not found: {0}")]
    NotFound(String),
    #[error("database read error: {0}")]
    StorageRead(String),
    #[error("database write error: {0}")]
    StorageWrite(String),
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Flat classification of every failure a request can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingParameter,
    InvalidParameter,
    DuplicateKey,
    NotFound,
    StorageRead,
    StorageWrite,
    ParseError,
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateKey(_) => ErrorKind::DuplicateKey,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::StorageRead(_) => ErrorKind::StorageRead,
            Self::StorageWrite(_) => ErrorKind::StorageWrite,
            Self::Model(ModelError::MissingParameter(_)) => ErrorKind::MissingParameter,
            Self::Model(ModelError::InvalidParameter { .. }) => ErrorKind::InvalidParameter,
            Self::Model(ModelError::Parse { .. }) => ErrorKind::ParseError,
        }
    }

    /// Failures of the backing medium rather than of the request.
    pub fn is_storage(&self) -> bool {
        matches!(self.kind(), ErrorKind::StorageRead | ErrorKind::StorageWrite | ErrorKind::ParseError)
    }
}
