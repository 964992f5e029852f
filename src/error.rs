/// Error types shared by the injector and the options page
use thiserror::Error;

/// Errors from in-memory edits of a link configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("both a name and a URL are required")]
    MissingField,

    #[error("no link at position {index} (list has {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("built-in link \"{0}\" can be disabled but not removed")]
    NotRemovable(String),

    #[error("stored links were not loaded, editing is disabled")]
    Locked,
}

/// Errors talking to the extension's synchronized storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("failed to encode links: {0}")]
    Encode(String),

    #[error("failed to decode stored links: {0}")]
    Decode(String),
}

/// Reasons the content script gives up without touching the page.
#[derive(Debug, Error)]
pub enum InjectError {
    #[error("navigation container `{0}` not found on this page")]
    MissingContainer(&'static str),

    #[error("failed to insert navigation links: {0}")]
    Dom(String),
}
