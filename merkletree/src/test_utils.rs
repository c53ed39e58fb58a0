//! Shared fixtures for unit tests.

use std::cell::Cell;

use sha2::{Digest as _, Sha256};

use crate::{Content, Digest, Error, HashStrategy, MerkleHasher, MerkleTree, Result};

/// SHA-256 computed directly, bypassing the crate's strategy code.
pub(crate) fn sha256(data: &[u8]) -> Digest {
    Digest::from_bytes(Sha256::digest(data).to_vec())
}

/// SHA-256 of `left || right`, computed directly.
pub(crate) fn sha256_pair(left: &Digest, right: &Digest) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    Digest::from_bytes(hasher.finalize().to_vec())
}

/// `count` distinct string items: "item-0", "item-1", ...
pub(crate) fn items(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("item-{}", i)).collect()
}

/// A string tree over `items(count)`.
pub(crate) fn tree_of(count: usize, strategy: HashStrategy) -> MerkleTree<String> {
    MerkleTree::with_strategy(items(count), strategy).expect("build tree")
}

/// Content whose equality only looks at `id`, so `payload` can change
/// without the item losing its identity.
#[derive(Clone, Debug)]
pub(crate) struct Record {
    pub id: u32,
    pub payload: String,
    pub poisoned: bool,
}

impl Record {
    pub fn new(id: u32, payload: &str) -> Self {
        Record {
            id,
            payload: payload.to_string(),
            poisoned: false,
        }
    }

    /// A record carrying only the id, for lookups.
    pub fn key(id: u32) -> Self {
        Record::new(id, "")
    }
}

impl Content for Record {
    fn calculate_hash<H: MerkleHasher>(&self, hasher: &H) -> Result<Digest> {
        if self.poisoned {
            return Err(Error::HashFailure(format!("record {} is poisoned", self.id)));
        }
        let mut bytes = self.id.to_be_bytes().to_vec();
        bytes.extend_from_slice(self.payload.as_bytes());
        hasher.hash(&bytes)
    }

    fn equals(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// SHA-256 hasher that fails once it has been called `budget` times.
#[derive(Debug)]
pub(crate) struct BudgetHasher {
    pub budget: Cell<usize>,
}

impl BudgetHasher {
    pub fn new(budget: usize) -> Self {
        BudgetHasher {
            budget: Cell::new(budget),
        }
    }
}

impl MerkleHasher for BudgetHasher {
    fn hash(&self, data: &[u8]) -> Result<Digest> {
        let remaining = self.budget.get();
        if remaining == 0 {
            return Err(Error::HashFailure("hash budget exhausted".into()));
        }
        self.budget.set(remaining - 1);
        HashStrategy::Sha256.hash(data)
    }
}
