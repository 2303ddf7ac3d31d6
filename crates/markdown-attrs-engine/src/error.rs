use thiserror::Error;

/// Errors raised when parsing names of engine settings.
///
/// Converting a document never fails; these only surface while reading
/// configuration or command-line values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unknown node kind `{0}`")]
    UnknownNodeKind(String),

    #[error("unknown merge direction `{0}` (expected `next` or `previous`)")]
    UnknownDirection(String),

    #[error("unknown conflict policy `{0}` (expected `overwrite` or `keep_existing`)")]
    UnknownConflictPolicy(String),
}
