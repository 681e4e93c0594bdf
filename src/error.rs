use core::fmt;

/// Errors returned by the table's fallible operations.
///
/// Lookups that simply find nothing return `None` instead. A call that
/// returns an error has not modified the table.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// The table is empty, so it has no minimum, maximum, floor or ceiling
    /// and nothing to delete.
    Underflow,
    /// `select` was asked for a rank at or past the number of keys.
    RankOutOfBounds {
        /// The requested zero-based rank.
        rank: usize,
        /// The number of keys in the table.
        len: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Underflow => f.write_str("symbol table underflow"),
            Error::RankOutOfBounds { rank, len } => {
                write!(f, "rank {rank} out of bounds for table of {len} keys")
            }
        }
    }
}

impl core::error::Error for Error {}

/// A broken tree invariant, as reported by `check_invariants`.
///
/// Depths count edges from the root.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Violation {
    /// A key is not strictly between the bounds set by its ancestors.
    SymmetricOrder {
        /// Depth of the offending node, with the root at 0.
        depth: usize,
    },
    /// A node's recorded subtree size differs from its actual node count.
    SizeMismatch {
        /// The size stored in the node.
        recorded: usize,
        /// The number of nodes counted in its subtree.
        actual: usize,
    },
    /// `select` and `rank` disagree at this rank.
    RankMismatch {
        /// The zero-based rank where `select` and `rank` disagree.
        rank: usize,
    },
    /// A node has a red right link.
    RedRightLink {
        /// Depth of the node whose right child is red.
        depth: usize,
    },
    /// A red node has a red left child.
    ConsecutiveRedLinks {
        /// Depth of the red node with a red left child.
        depth: usize,
    },
    /// The root is colored red.
    RedRoot,
    /// Two root-to-null paths cross a different number of black links.
    BlackImbalance {
        /// Black links on the leftmost root-to-null path.
        expected: usize,
        /// Black links on the path that disagrees.
        found: usize,
    },
    /// The number of reachable nodes differs from the number stored.
    LenMismatch {
        /// Nodes reachable from the root.
        len: usize,
        /// Entries the arena holds.
        stored: usize,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::SymmetricOrder { depth } => write!(f, "key out of symmetric order at depth {depth}"),
            Violation::SizeMismatch { recorded, actual } => {
                write!(f, "subtree size is {recorded} but the subtree holds {actual} nodes")
            }
            Violation::RankMismatch { rank } => write!(f, "rank and select disagree at rank {rank}"),
            Violation::RedRightLink { depth } => write!(f, "red right link at depth {depth}"),
            Violation::ConsecutiveRedLinks { depth } => write!(f, "two red links in a row at depth {depth}"),
            Violation::RedRoot => f.write_str("root is red"),
            Violation::BlackImbalance { expected, found } => {
                write!(f, "path crosses {found} black links, expected {expected}")
            }
            Violation::LenMismatch { len, stored } => {
                write!(f, "tree reaches {len} nodes but stores {stored}")
            }
        }
    }
}

impl core::error::Error for Violation {}
