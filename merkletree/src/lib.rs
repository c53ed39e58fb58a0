//! Binary Merkle tree over an ordered list of content.
//!
//! Leaves are the digests of the content items in input order. Each level
//! above pairs nodes `(2i, 2i + 1)` and stores `H(left || right)`; an
//! odd-sized level first gets a padding copy of its last node. The single
//! remaining node is the root, which commits to the whole list.
//!
//! Two ways to check integrity:
//!
//! - [`MerkleTree::verify_tree`] replays the hashing over the stored leaf
//!   digests and compares every level.
//! - [`MerkleTree::merkle_path`] extracts an O(log n) [`MerklePath`] that
//!   anyone holding the root can check with [`MerklePath::verify`].
//!
//! ```
//! use merkletree::{HashStrategy, MerkleTree};
//!
//! let tree = MerkleTree::new(vec!["Hello", "Hi", "Hey", "Hola"]).unwrap();
//! assert!(tree.verify_tree().unwrap());
//!
//! let path = tree.merkle_path(&"Hey").unwrap();
//! assert!(path
//!     .verify_content("Hey", tree.root(), &HashStrategy::Sha256)
//!     .unwrap());
//! ```
//!
//! # Core types
//!
//! - [`MerkleTree`]: build, root, verification, audit paths, rebuild.
//! - [`Content`]: what a leaf item must provide (digest and equality).
//! - [`MerkleHasher`] / [`HashStrategy`]: the digest primitive.
//! - [`MerklePath`]: a serializable inclusion proof.

#![warn(missing_docs)]

mod content;
mod error;
mod hash;
mod node;
mod options;
pub(crate) mod proof;
pub(crate) mod tree;
mod verify;
mod visualize;

#[cfg(test)]
pub(crate) mod test_utils;

pub use content::Content;
pub use error::{Error, Result};
pub use hash::{Digest, HashStrategy, MerkleHasher};
pub use node::{Node, NodeKind};
pub use options::TreeOptions;
pub use proof::{MerklePath, PathStep, Side};
pub use tree::MerkleTree;
