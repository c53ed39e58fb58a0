//! Human-readable dump of a tree, level by level from the root down.
//!
//! Diagnostic only. Padding nodes are tagged `(duplicate)` or left out
//! entirely when the tree was built with `elide_duplicates`.

use std::{fmt, io};

use crate::MerkleTree;

static INDENT_SPACES: usize = 4;

impl<C, H> MerkleTree<C, H> {
    /// Render the dump into a `String`.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }

    /// Write the dump into `write`.
    pub fn visualize<W: io::Write>(&self, mut write: W) -> io::Result<()> {
        write!(write, "{}", self)?;
        write.flush()
    }
}

impl<C, H> fmt::Display for MerkleTree<C, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = " ".repeat(INDENT_SPACES);
        writeln!(
            f,
            "merkle tree: {} leaves, height {}",
            self.leaf_count(),
            self.height()
        )?;
        writeln!(f, "root: {}", self.root())?;
        for (depth, level) in self.levels.iter().enumerate().rev() {
            writeln!(f, "level {}:", depth)?;
            for (index, node) in level.iter().enumerate() {
                if node.duplicate && self.options.elide_duplicates {
                    continue;
                }
                write!(f, "{indent}[{index}] {}", node.digest)?;
                if node.duplicate {
                    write!(f, " (duplicate)")?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
