//! Error taxonomy for repository operations
//!
//! Operations return `anyhow::Result` throughout; the variants below are the
//! domain failures callers are expected to distinguish, either by message or
//! by downcasting. Plain I/O and serialization errors propagate as-is with
//! context attached at the call site.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KitError {
    /// The path escapes the repository root. Fatal, never retried.
    #[error("unsafe path detected: {0}")]
    UnsafePath(String),

    /// The path is not tracked by the index.
    #[error("pathspec '{0}' did not match any files")]
    PathspecNotFound(String),

    /// A tracked file's on-disk content differs from its staged digest.
    /// Recoverable by committing the change or forcing the operation.
    #[error("local changes present: {0}")]
    LocalChangesPresent(String),

    /// An untracked file sits where the target tree wants different
    /// content. Blocks the whole operation, forced or not.
    #[error("untracked file '{0}' would be overwritten by checkout")]
    UntrackedOverwrite(String),

    /// A digest reachable from the index or a reference has no object
    /// file behind it.
    #[error("object {0} not found")]
    ObjectNotFound(String),

    #[error("invalid object id: {0}")]
    InvalidObjectId(String),

    #[error("short object id {0} is ambiguous")]
    AmbiguousObjectId(String),

    #[error("corrupt object: {0}")]
    CorruptObject(String),

    #[error("branch {0} not found")]
    BranchNotFound(String),

    #[error("branch {0} already exists")]
    BranchAlreadyExists(String),

    /// HEAD is attached to a branch whose ref file does not exist yet.
    #[error("no commits yet on branch '{0}'")]
    NoCommitsYet(String),

    #[error("not a kit repository: {0}")]
    NotARepository(String),

    #[error("unknown revision: {0}")]
    UnknownRevision(String),
}
