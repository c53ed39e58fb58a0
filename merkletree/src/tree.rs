use tracing::{debug, trace};

use crate::{
    node::Node, Content, Digest, Error, HashStrategy, MerkleHasher, Result, TreeOptions,
};

/// A binary Merkle tree over an ordered list of content.
///
/// Levels are stored bottom-up: `levels[0]` holds the leaves in input order
/// (plus one padding leaf when the count is odd), the last level holds the
/// root alone. Every odd-sized level below the root gets one padding copy of
/// its last node, so pairing `(2i, 2i + 1)` is always exact.
///
/// A tree with a single content item has one level: its root is that item's
/// digest, unhashed. Adding a second item therefore changes the root from
/// `H(a)` to `H(H(a) || H(b))`.
///
/// All reads take `&self`; [`rebuild`](Self::rebuild) and
/// [`rebuild_with`](Self::rebuild_with) take `&mut self`. Callers sharing a
/// tree across threads must serialize rebuilds against readers, e.g. with an
/// `RwLock`.
#[derive(Clone, Debug)]
pub struct MerkleTree<C, H = HashStrategy> {
    pub(crate) contents: Vec<C>,
    pub(crate) levels: Vec<Vec<Node>>,
    pub(crate) options: TreeOptions<H>,
}

impl<C: Content> MerkleTree<C> {
    /// Build a SHA-256 tree.
    pub fn new(contents: Vec<C>) -> Result<Self> {
        Self::from_options(contents, TreeOptions::default())
    }

    /// Build a tree with one of the built-in strategies.
    pub fn with_strategy(contents: Vec<C>, strategy: HashStrategy) -> Result<Self> {
        Self::from_options(contents, TreeOptions::with_strategy(strategy))
    }
}

impl<C: Content, H: MerkleHasher> MerkleTree<C, H> {
    /// Build a tree with a caller-supplied digest primitive.
    pub fn with_hasher(contents: Vec<C>, hasher: H) -> Result<Self> {
        Self::from_options(contents, TreeOptions::new().with_hasher(hasher))
    }

    /// Build a tree from explicit options.
    ///
    /// Fails with [`Error::EmptyInput`] for an empty list, or with the first
    /// hashing error; no partial tree is returned.
    pub fn from_options(contents: Vec<C>, options: TreeOptions<H>) -> Result<Self> {
        let levels = build_levels(&contents, &options.hasher)?;
        let tree = MerkleTree {
            contents,
            levels,
            options,
        };
        debug!(
            leaves = tree.leaf_count(),
            height = tree.height(),
            root = %tree.root().short(),
            "built merkle tree"
        );
        Ok(tree)
    }

    /// Recompute every digest from the current contents.
    ///
    /// Picks up content changed through [`contents_mut`](Self::contents_mut).
    /// The new levels are built aside and swapped in only on success; on
    /// error the tree is left exactly as it was.
    pub fn rebuild(&mut self) -> Result<()> {
        let levels = build_levels(&self.contents, &self.options.hasher)?;
        self.levels = levels;
        debug!(
            leaves = self.leaf_count(),
            root = %self.root().short(),
            "rebuilt merkle tree"
        );
        Ok(())
    }

    /// Replace the whole dataset and rebuild.
    ///
    /// Same atomicity as [`rebuild`](Self::rebuild): on error both contents
    /// and levels are unchanged.
    pub fn rebuild_with(&mut self, contents: Vec<C>) -> Result<()> {
        let levels = build_levels(&contents, &self.options.hasher)?;
        self.contents = contents;
        self.levels = levels;
        debug!(
            leaves = self.leaf_count(),
            root = %self.root().short(),
            "rebuilt merkle tree with new contents"
        );
        Ok(())
    }

    /// Index of the first leaf whose content equals `content`.
    ///
    /// Equal duplicates are ambiguous; lookups always resolve to the first.
    pub fn position_of(&self, content: &C) -> Option<usize> {
        self.contents.iter().position(|c| c.equals(content))
    }
}

impl<C, H> MerkleTree<C, H> {
    /// The root digest. Pure accessor, nothing is recomputed.
    pub fn root(&self) -> &Digest {
        &self.root_node().digest
    }

    /// The root node.
    pub fn root_node(&self) -> &Node {
        // Construction never produces an empty level or an empty level list.
        &self.levels[self.levels.len() - 1][0]
    }

    /// Number of content items (padding excluded).
    pub fn leaf_count(&self) -> usize {
        self.contents.len()
    }

    /// Leaf level, including the padding leaf if any.
    pub fn leaves(&self) -> &[Node] {
        &self.levels[0]
    }

    /// Number of levels, leaves and root included.
    pub fn height(&self) -> usize {
        self.levels.len()
    }

    /// All levels, leaves first.
    pub fn levels(&self) -> &[Vec<Node>] {
        &self.levels
    }

    /// The content list in leaf order.
    pub fn contents(&self) -> &[C] {
        &self.contents
    }

    /// Mutable access to the contents.
    ///
    /// Stored digests do not follow: until [`rebuild`](Self::rebuild) runs,
    /// `verify_content` reports changed items as `false` while `verify_tree`
    /// (which trusts leaf digests) still reports `true`.
    pub fn contents_mut(&mut self) -> &mut [C] {
        &mut self.contents
    }

    /// The digest primitive.
    pub fn hasher(&self) -> &H {
        &self.options.hasher
    }

    /// The options the tree was built with.
    pub fn options(&self) -> &TreeOptions<H> {
        &self.options
    }
}

/// Hash every content item into a leaf, then pair levels up to the root.
pub(crate) fn build_levels<C: Content, H: MerkleHasher>(
    contents: &[C],
    hasher: &H,
) -> Result<Vec<Vec<Node>>> {
    if contents.is_empty() {
        return Err(Error::EmptyInput);
    }
    let leaves = contents
        .iter()
        .enumerate()
        .map(|(i, content)| Ok(Node::leaf(content.calculate_hash(hasher)?, i)))
        .collect::<Result<Vec<_>>>()?;
    build_levels_from_leaves(leaves, hasher)
}

/// Pair levels bottom-up starting from already-digested real leaves.
///
/// Shared by construction and by `verify_tree`, which replays it over the
/// stored leaf digests.
pub(crate) fn build_levels_from_leaves<H: MerkleHasher>(
    leaves: Vec<Node>,
    hasher: &H,
) -> Result<Vec<Vec<Node>>> {
    let mut levels = vec![leaves];
    while let Some(current) = levels.last_mut().filter(|level| level.len() > 1) {
        pad_level(current);
        let next = pair_level(current, hasher)?;
        levels.push(next);
    }
    Ok(levels)
}

fn pad_level(level: &mut Vec<Node>) {
    if level.len() % 2 == 1 {
        if let Some(last) = level.last() {
            let padding = last.padding_copy();
            trace!(
                width = level.len(),
                digest = %padding.digest.short(),
                "padding odd level"
            );
            level.push(padding);
        }
    }
}

fn pair_level<H: MerkleHasher>(level: &mut [Node], hasher: &H) -> Result<Vec<Node>> {
    level
        .chunks_exact_mut(2)
        .enumerate()
        .map(|(parent, pair)| {
            let digest = hasher.hash_pair(&pair[0].digest, &pair[1].digest)?;
            let duplicate = pair[0].duplicate && pair[1].duplicate;
            pair[0].parent = Some(parent);
            pair[1].parent = Some(parent);
            Ok(Node::internal(digest, 2 * parent, 2 * parent + 1, duplicate))
        })
        .collect()
}
