//! Tree nodes.
//!
//! Nodes live in per-level vectors owned by the tree. Links between levels
//! are plain indices: a node's children sit at `left`/`right` in the level
//! below, its parent at `parent` in the level above.

use crate::Digest;

/// What a node is, with its links downward.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// A leaf. `content` indexes the tree's content list; padding leaves
    /// have none.
    Leaf {
        /// Index into the tree's contents, `None` for a padding leaf.
        content: Option<usize>,
    },
    /// An internal node hashing two children of the level below.
    Internal {
        /// Index of the left child.
        left: usize,
        /// Index of the right child.
        right: usize,
    },
}

/// A node of a [`MerkleTree`](crate::MerkleTree).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub(crate) digest: Digest,
    pub(crate) kind: NodeKind,
    pub(crate) duplicate: bool,
    pub(crate) parent: Option<usize>,
}

impl Node {
    pub(crate) fn leaf(digest: Digest, content: usize) -> Self {
        Node {
            digest,
            kind: NodeKind::Leaf {
                content: Some(content),
            },
            duplicate: false,
            parent: None,
        }
    }

    pub(crate) fn internal(digest: Digest, left: usize, right: usize, duplicate: bool) -> Self {
        Node {
            digest,
            kind: NodeKind::Internal { left, right },
            duplicate,
            parent: None,
        }
    }

    /// Padding copy appended to an odd-sized level.
    ///
    /// Same digest and children; a padding leaf drops its content link.
    pub(crate) fn padding_copy(&self) -> Self {
        let kind = match self.kind {
            NodeKind::Leaf { .. } => NodeKind::Leaf { content: None },
            NodeKind::Internal { left, right } => NodeKind::Internal { left, right },
        };
        Node {
            digest: self.digest.clone(),
            kind,
            duplicate: true,
            parent: None,
        }
    }

    /// The stored digest.
    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    /// Leaf or internal, with links.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// True for leaves (real or padding).
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// True for padding nodes, and for internal nodes whose children are
    /// both duplicates.
    ///
    /// Duplicates are hashed like any other node; the flag only tells
    /// display and diagnostics that the node adds no new data.
    pub fn is_duplicate(&self) -> bool {
        self.duplicate
    }

    /// Index into the tree's contents, for real leaves.
    pub fn content_index(&self) -> Option<usize> {
        match self.kind {
            NodeKind::Leaf { content } => content,
            NodeKind::Internal { .. } => None,
        }
    }

    /// `(left, right)` child indices in the level below, for internal nodes.
    pub fn children(&self) -> Option<(usize, usize)> {
        match self.kind {
            NodeKind::Internal { left, right } => Some((left, right)),
            NodeKind::Leaf { .. } => None,
        }
    }

    /// Index of the parent in the level above; `None` at the root.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }
}
