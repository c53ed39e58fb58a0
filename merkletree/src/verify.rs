//! Integrity checks over a built tree.
//!
//! Both checks answer `Ok(false)` for tampering, absence or inconsistency;
//! `Err` only comes from the hash primitive.

use tracing::debug;

use crate::{
    proof::{AuthPath, Side},
    tree::build_levels_from_leaves,
    Content, MerkleHasher, MerkleTree, Result,
};

impl<C: Content, H: MerkleHasher> MerkleTree<C, H> {
    /// Check that every stored digest above the leaves is consistent.
    ///
    /// Replays the level builder over the stored leaf digests (content is
    /// not re-hashed) and compares each recomputed node, padding included,
    /// with the stored one.
    pub fn verify_tree(&self) -> Result<bool> {
        let leaves = self.levels[0][..self.contents.len()].to_vec();
        let recomputed = build_levels_from_leaves(leaves, &self.options.hasher)?;

        if recomputed.len() != self.levels.len() {
            debug!(
                expected = recomputed.len(),
                stored = self.levels.len(),
                "tree height mismatch"
            );
            return Ok(false);
        }
        for (depth, (fresh, stored)) in recomputed.iter().zip(&self.levels).enumerate() {
            if fresh.len() != stored.len() {
                debug!(depth, "level width mismatch");
                return Ok(false);
            }
            if let Some(index) = fresh
                .iter()
                .zip(stored)
                .position(|(a, b)| a.digest != b.digest)
            {
                debug!(depth, index, "digest mismatch");
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Check one item's membership and integrity.
    ///
    /// Finds the first leaf whose content equals `content`, re-hashes that
    /// leaf's stored content, then folds the stored siblings up to the root.
    /// Not found, a stale leaf digest, or a root mismatch all give
    /// `Ok(false)`.
    pub fn verify_content(&self, content: &C) -> Result<bool> {
        let Some(index) = self.position_of(content) else {
            debug!("content not found");
            return Ok(false);
        };
        let hasher = &self.options.hasher;
        let mut running = self.contents[index].calculate_hash(hasher)?;
        if running != self.levels[0][index].digest {
            debug!(index, "leaf digest does not match content");
            return Ok(false);
        }

        for (sibling, side) in AuthPath::new(&self.levels, index) {
            running = match side {
                Side::Left => hasher.hash_pair(&sibling.digest, &running)?,
                Side::Right => hasher.hash_pair(&running, &sibling.digest)?,
            };
        }
        if &running != self.root() {
            debug!(index, "recomputed root does not match");
            return Ok(false);
        }
        Ok(true)
    }
}
