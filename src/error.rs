use thiserror::Error;

use crate::entry::Kind;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum EntryError {
    /// A typed accessor was used on an entry holding a different kind.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Kind, found: Kind },
    /// A read-only dictionary lookup missed.
    #[error("key not found: {0}")]
    KeyNotFound(String),
}

pub type Result<T> = std::result::Result<T, EntryError>;
