use crate::HashStrategy;

/// Build-time configuration of a [`MerkleTree`](crate::MerkleTree).
///
/// `hasher` selects the digest primitive for leaves and internal nodes.
/// With the `serde` feature, `TreeOptions<HashStrategy>` can be read from a
/// caller's config file:
///
/// ```toml
/// hasher = "keccak256"
/// elide_duplicates = true
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeOptions<H = HashStrategy> {
    /// Digest primitive.
    pub hasher: H,
    /// Hide padding nodes in the display dump.
    #[cfg_attr(feature = "serde", serde(default))]
    pub elide_duplicates: bool,
}

impl TreeOptions {
    /// SHA-256, duplicates shown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for a built-in strategy.
    pub fn with_strategy(strategy: HashStrategy) -> Self {
        TreeOptions {
            hasher: strategy,
            elide_duplicates: false,
        }
    }
}

impl<H> TreeOptions<H> {
    /// Swap in another digest primitive.
    pub fn with_hasher<H2>(self, hasher: H2) -> TreeOptions<H2> {
        TreeOptions {
            hasher,
            elide_duplicates: self.elide_duplicates,
        }
    }

    /// Whether the display dump hides padding nodes.
    pub fn elide_duplicates(mut self, elide: bool) -> Self {
        self.elide_duplicates = elide;
        self
    }
}
