//! Digest bytes and the pluggable hash primitive.
//!
//! Internal nodes always hash `left ++ right` in that order. No sorting of
//! the pair, no domain tags: the leaf digest is whatever the content
//! reports, and a parent is `H(left.digest || right.digest)`.

use std::{fmt, str::FromStr};

use bincode::{Decode, Encode};

use crate::{Error, Result};

/// Number of hex characters shown by [`Digest::short`].
const SHORT_HEX_LEN: usize = 8;

/// Digest bytes produced by a [`MerkleHasher`].
///
/// Length depends on the primitive; every built-in strategy yields 32 bytes.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Digest(Vec<u8>);

impl Digest {
    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Digest(bytes.into())
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume and return the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a zero-length digest.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex encoding of the full digest.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| Error::InvalidDigest(e.to_string()))?;
        if bytes.is_empty() {
            return Err(Error::InvalidDigest("empty digest".into()));
        }
        Ok(Digest(bytes))
    }

    /// First few hex characters, for logs and dumps.
    pub fn short(&self) -> String {
        let mut hex = self.to_hex();
        hex.truncate(SHORT_HEX_LEN);
        hex
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.short())
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Digest {
    fn from(bytes: Vec<u8>) -> Self {
        Digest(bytes)
    }
}

impl From<[u8; 32]> for Digest {
    fn from(bytes: [u8; 32]) -> Self {
        Digest(bytes.to_vec())
    }
}

/// The digest primitive used for every node of a tree.
///
/// Implement this to plug in a primitive the crate does not ship. Only
/// [`hash`](MerkleHasher::hash) is required; [`hash_pair`](MerkleHasher::hash_pair)
/// defaults to hashing the concatenation `left ++ right`.
pub trait MerkleHasher {
    /// Digest arbitrary bytes.
    fn hash(&self, data: &[u8]) -> Result<Digest>;

    /// Digest of an internal node: `H(left || right)`.
    fn hash_pair(&self, left: &Digest, right: &Digest) -> Result<Digest> {
        let mut buf = Vec::with_capacity(left.len() + right.len());
        buf.extend_from_slice(left.as_bytes());
        buf.extend_from_slice(right.as_bytes());
        self.hash(&buf)
    }
}

impl<H: MerkleHasher + ?Sized> MerkleHasher for &H {
    fn hash(&self, data: &[u8]) -> Result<Digest> {
        (**self).hash(data)
    }

    fn hash_pair(&self, left: &Digest, right: &Digest) -> Result<Digest> {
        (**self).hash_pair(left, right)
    }
}

/// Built-in hash strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HashStrategy {
    /// SHA-256.
    #[default]
    Sha256,
    /// Keccak-256 with the original Keccak padding (as used by Ethereum),
    /// not the standardized SHA3-256.
    Keccak256,
    /// BLAKE3 with 32-byte output.
    Blake3,
}

impl HashStrategy {
    /// All built-in strategies.
    pub const ALL: [HashStrategy; 3] = [
        HashStrategy::Sha256,
        HashStrategy::Keccak256,
        HashStrategy::Blake3,
    ];

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            HashStrategy::Sha256 => "sha256",
            HashStrategy::Keccak256 => "keccak256",
            HashStrategy::Blake3 => "blake3",
        }
    }

    /// Output length in bytes.
    pub fn output_len(&self) -> usize {
        32
    }

    fn digest_parts(&self, parts: &[&[u8]]) -> Digest {
        match self {
            HashStrategy::Sha256 => digest_with::<sha2::Sha256>(parts),
            HashStrategy::Keccak256 => digest_with::<sha3::Keccak256>(parts),
            HashStrategy::Blake3 => {
                let mut hasher = blake3::Hasher::new();
                for part in parts {
                    hasher.update(part);
                }
                Digest::from(*hasher.finalize().as_bytes())
            }
        }
    }
}

fn digest_with<D: sha2::Digest>(parts: &[&[u8]]) -> Digest {
    let mut hasher = D::new();
    for part in parts {
        hasher.update(part);
    }
    Digest(hasher.finalize().to_vec())
}

impl MerkleHasher for HashStrategy {
    fn hash(&self, data: &[u8]) -> Result<Digest> {
        Ok(self.digest_parts(&[data]))
    }

    // Both halves stream into one hasher; no concatenation buffer.
    fn hash_pair(&self, left: &Digest, right: &Digest) -> Result<Digest> {
        Ok(self.digest_parts(&[left.as_bytes(), right.as_bytes()]))
    }
}

impl fmt::Display for HashStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(HashStrategy::Sha256),
            "keccak256" | "keccak-256" => Ok(HashStrategy::Keccak256),
            "blake3" => Ok(HashStrategy::Blake3),
            other => Err(Error::UnknownHashStrategy(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        let digest = HashStrategy::Sha256.hash(b"abc").expect("sha256");
        assert_eq!(
            digest.to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_keccak256_is_not_sha3() {
        let digest = HashStrategy::Keccak256.hash(b"").expect("keccak");
        assert_eq!(
            digest.to_hex(),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_blake3_matches_crate() {
        let digest = HashStrategy::Blake3.hash(b"hello").expect("blake3");
        assert_eq!(digest.as_bytes(), blake3::hash(b"hello").as_bytes());
    }

    #[test]
    fn test_hash_pair_is_ordered_concatenation() {
        for strategy in HashStrategy::ALL {
            let a = strategy.hash(b"a").expect("hash a");
            let b = strategy.hash(b"b").expect("hash b");
            let mut concat = a.as_bytes().to_vec();
            concat.extend_from_slice(b.as_bytes());

            let pair = strategy.hash_pair(&a, &b).expect("pair");
            assert_eq!(pair, strategy.hash(&concat).expect("concat"));
            assert_ne!(pair, strategy.hash_pair(&b, &a).expect("swapped"));
        }
    }

    #[test]
    fn test_strategy_names_roundtrip() {
        for strategy in HashStrategy::ALL {
            assert_eq!(strategy.name().parse::<HashStrategy>(), Ok(strategy));
            assert_eq!(strategy.output_len(), 32);
        }
        assert_eq!("SHA-256".parse::<HashStrategy>(), Ok(HashStrategy::Sha256));
        assert!("md5".parse::<HashStrategy>().is_err());
    }

    #[test]
    fn test_digest_hex() {
        let digest = HashStrategy::Sha256.hash(b"test data").expect("sha256");
        assert_eq!(Digest::from_hex(&digest.to_hex()), Ok(digest.clone()));
        assert_eq!(digest.short().len(), 8);
        assert!(Digest::from_hex("zz").is_err());
        assert!(Digest::from_hex("").is_err());
    }
}
