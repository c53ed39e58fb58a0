//! The capability a value needs to be stored in a [`MerkleTree`](crate::MerkleTree).

use crate::{Digest, MerkleHasher, Result};

/// A content item stored in a leaf.
///
/// Exactly two operations: digest yourself with the tree's hasher, and tell
/// whether another item is the same entry. Equality is what lookups use
/// (`verify_content`, `merkle_path`), so it should not depend on the digest.
pub trait Content {
    /// Digest of this item's bytes under `hasher`.
    fn calculate_hash<H: MerkleHasher>(&self, hasher: &H) -> Result<Digest>;

    /// Whether `other` is the same entry as `self`.
    fn equals(&self, other: &Self) -> bool;
}

impl Content for [u8] {
    fn calculate_hash<H: MerkleHasher>(&self, hasher: &H) -> Result<Digest> {
        hasher.hash(self)
    }

    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

impl Content for str {
    fn calculate_hash<H: MerkleHasher>(&self, hasher: &H) -> Result<Digest> {
        hasher.hash(self.as_bytes())
    }

    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

impl Content for String {
    fn calculate_hash<H: MerkleHasher>(&self, hasher: &H) -> Result<Digest> {
        self.as_str().calculate_hash(hasher)
    }

    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

impl Content for Vec<u8> {
    fn calculate_hash<H: MerkleHasher>(&self, hasher: &H) -> Result<Digest> {
        self.as_slice().calculate_hash(hasher)
    }

    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

impl<const N: usize> Content for [u8; N] {
    fn calculate_hash<H: MerkleHasher>(&self, hasher: &H) -> Result<Digest> {
        hasher.hash(self)
    }

    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

impl<T: Content + ?Sized> Content for &T {
    fn calculate_hash<H: MerkleHasher>(&self, hasher: &H) -> Result<Digest> {
        (**self).calculate_hash(hasher)
    }

    fn equals(&self, other: &Self) -> bool {
        (**self).equals(*other)
    }
}
