use thiserror::Error;

/// Alias for `core::result::Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors from Merkle tree construction, lookup and proof handling.
///
/// A failed verification is not an error: `verify_tree` and `verify_content`
/// report tampering or absence as `Ok(false)`. Variants here mean the
/// question could not be answered at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Tried to build a tree from zero content items.
    #[error("cannot build a merkle tree from an empty content list")]
    EmptyInput,
    /// The content digest or the hash primitive reported a failure.
    #[error("hash failure: {0}")]
    HashFailure(String),
    /// No leaf holds content equal to the one requested.
    #[error("content not found in tree")]
    ContentNotFound,
    /// A leaf index past the real leaves was requested.
    #[error("leaf index {index} out of range (leaf count {leaf_count})")]
    LeafIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of real (non-padding) leaves in the tree.
        leaf_count: usize,
    },
    /// An encoded proof could not be decoded or is structurally invalid.
    #[error("invalid proof: {0}")]
    InvalidProof(String),
    /// A digest could not be parsed.
    #[error("invalid digest: {0}")]
    InvalidDigest(String),
    /// A hash strategy name did not match any built-in strategy.
    #[error("unknown hash strategy: {0}")]
    UnknownHashStrategy(String),
}
