//! Audit paths (inclusion proofs).
//!
//! A [`MerklePath`] lists, from the leaf up to just below the root, the
//! digest of the sibling at each level and the side it sits on. Because
//! pairs are hashed in fixed `left || right` order, the side tells the
//! verifier whether the next step is `H(sibling || current)` or
//! `H(current || sibling)`. With the leaf's own digest this is enough to
//! recompute the root without the rest of the tree.

use bincode::{Decode, Encode};
use itertools::Itertools;

use crate::{node::Node, Content, Digest, Error, MerkleHasher, MerkleTree, Result};


/// Upper bound on the number of steps in a decoded path. A tree over
/// `usize::MAX` leaves has at most 64 levels above the leaves.
const MAX_PATH_STEPS: usize = 64;

/// Upper bound on the encoded size accepted by
/// [`MerklePath::decode_from_slice`].
const MAX_ENCODED_PROOF_BYTES: usize = 1024 * 1024;

/// Which side of the pair the sibling occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Sibling is the left operand: next digest is `H(sibling || current)`.
    Left,
    /// Sibling is the right operand: next digest is `H(current || sibling)`.
    Right,
}

/// One level of an audit path.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathStep {
    /// Digest of the sibling node.
    pub sibling: Digest,
    /// Side of the sibling in the hash step.
    pub side: Side,
}

/// An inclusion proof for one leaf.
///
/// Produced by [`MerkleTree::merkle_path`]; checked with
/// [`verify`](Self::verify) by anyone holding the claimed root.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MerklePath {
    leaf_index: u64,
    steps: Vec<PathStep>,
}

impl MerklePath {
    /// Assemble a path from its parts.
    pub fn new(leaf_index: u64, steps: Vec<PathStep>) -> Self {
        MerklePath { leaf_index, steps }
    }

    /// Position of the proved leaf in the content list.
    pub fn leaf_index(&self) -> u64 {
        self.leaf_index
    }

    /// Steps from the leaf upward.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Number of steps (tree height minus one).
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True for the path of a single-leaf tree.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// `(sibling digest, side)` pairs from the leaf upward.
    pub fn iter(&self) -> impl Iterator<Item = (&Digest, Side)> + '_ {
        self.steps.iter().map(|step| (&step.sibling, step.side))
    }

    /// Check that the sides agree with `leaf_index`.
    ///
    /// Padding never shifts positions, so the sibling at depth `d` sits on
    /// the right exactly when bit `d` of the index is clear, and the index
    /// must fit in `len()` bits.
    pub fn check_position(&self) -> Result<()> {
        let depth = self.steps.len();
        if depth < u64::BITS as usize && self.leaf_index >> depth != 0 {
            return Err(Error::InvalidProof(format!(
                "leaf index {} out of range for {} steps",
                self.leaf_index, depth
            )));
        }
        for (d, step) in self.steps.iter().enumerate() {
            let bit = u32::try_from(d)
                .ok()
                .and_then(|d| self.leaf_index.checked_shr(d))
                .unwrap_or(0)
                & 1;
            let expected = if bit == 0 {
                Side::Right
            } else {
                Side::Left
            };
            if step.side != expected {
                return Err(Error::InvalidProof(format!(
                    "side at depth {} disagrees with leaf index {}",
                    d, self.leaf_index
                )));
            }
        }
        Ok(())
    }

    /// Fold the path over `leaf_digest` and return the resulting root.
    ///
    /// Fails with [`Error::InvalidProof`] when the sides disagree with
    /// [`leaf_index`](Self::leaf_index).
    pub fn compute_root<H: MerkleHasher>(&self, leaf_digest: &Digest, hasher: &H) -> Result<Digest> {
        self.check_position()?;
        self.steps
            .iter()
            .try_fold(leaf_digest.clone(), |current, step| match step.side {
                Side::Left => hasher.hash_pair(&step.sibling, &current),
                Side::Right => hasher.hash_pair(&current, &step.sibling),
            })
    }

    /// Whether folding the path over `leaf_digest` yields `expected_root`.
    pub fn verify<H: MerkleHasher>(
        &self,
        leaf_digest: &Digest,
        expected_root: &Digest,
        hasher: &H,
    ) -> Result<bool> {
        Ok(&self.compute_root(leaf_digest, hasher)? == expected_root)
    }

    /// Like [`verify`](Self::verify), digesting `content` first.
    pub fn verify_content<C: Content + ?Sized, H: MerkleHasher>(
        &self,
        content: &C,
        expected_root: &Digest,
        hasher: &H,
    ) -> Result<bool> {
        let leaf_digest = content.calculate_hash(hasher)?;
        self.verify(&leaf_digest, expected_root, hasher)
    }

    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| Error::InvalidProof(format!("encode error: {}", e)))
    }

    /// Decode from bytes using bincode.
    ///
    /// Rejects trailing bytes, more than 64 steps, empty sibling digests,
    /// siblings of differing lengths, and sides that disagree with the leaf
    /// index.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<MAX_ENCODED_PROOF_BYTES>();
        let (path, read): (Self, usize) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| Error::InvalidProof(format!("decode error: {}", e)))?;
        if read != bytes.len() {
            return Err(Error::InvalidProof(format!(
                "{} trailing bytes after proof",
                bytes.len() - read
            )));
        }
        if path.steps.len() > MAX_PATH_STEPS {
            return Err(Error::InvalidProof(format!(
                "path has {} steps (max {})",
                path.steps.len(),
                MAX_PATH_STEPS
            )));
        }
        if path.steps.iter().any(|step| step.sibling.is_empty()) {
            return Err(Error::InvalidProof("empty sibling digest".into()));
        }
        if !path.steps.iter().map(|step| step.sibling.len()).all_equal() {
            return Err(Error::InvalidProof(
                "sibling digests differ in length".into(),
            ));
        }
        path.check_position()?;
        Ok(path)
    }
}

impl<'a> IntoIterator for &'a MerklePath {
    type Item = &'a PathStep;
    type IntoIter = std::slice::Iter<'a, PathStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Walks from a leaf to just below the root, yielding each sibling node and
/// its side. Stops at the root level (the node without a parent).
pub(crate) struct AuthPath<'a> {
    levels: &'a [Vec<Node>],
    depth: usize,
    index: usize,
}

impl<'a> AuthPath<'a> {
    pub(crate) fn new(levels: &'a [Vec<Node>], leaf_index: usize) -> Self {
        AuthPath {
            levels,
            depth: 0,
            index: leaf_index,
        }
    }
}

impl<'a> Iterator for AuthPath<'a> {
    type Item = (&'a Node, Side);

    fn next(&mut self) -> Option<Self::Item> {
        let level = self.levels.get(self.depth)?;
        let node = level.get(self.index)?;
        let parent = node.parent?;
        let (sibling_index, side) = if self.index % 2 == 0 {
            (self.index + 1, Side::Right)
        } else {
            (self.index - 1, Side::Left)
        };
        let sibling = level.get(sibling_index)?;
        self.depth += 1;
        self.index = parent;
        Some((sibling, side))
    }
}

impl<C: Content, H: MerkleHasher> MerkleTree<C, H> {
    /// Audit path for the first leaf whose content equals `content`.
    ///
    /// Fails with [`Error::ContentNotFound`] when no leaf matches.
    pub fn merkle_path(&self, content: &C) -> Result<MerklePath> {
        let index = self.position_of(content).ok_or(Error::ContentNotFound)?;
        self.merkle_path_at(index)
    }

    /// Audit path for the leaf at `index`.
    pub fn merkle_path_at(&self, index: usize) -> Result<MerklePath> {
        if index >= self.contents.len() {
            return Err(Error::LeafIndexOutOfRange {
                index,
                leaf_count: self.contents.len(),
            });
        }
        let steps = AuthPath::new(&self.levels, index)
            .map(|(sibling, side)| PathStep {
                sibling: sibling.digest.clone(),
                side,
            })
            .collect();
        Ok(MerklePath::new(index as u64, steps))
    }
}
