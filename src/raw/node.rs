use super::handle::Link;

/// Color of the link from a node's parent to the node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    #[must_use]
    pub(crate) const fn flipped(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

// A red node is glued to its parent: together they form a 3-node of the
// 2-3 tree the LLRB simulates.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link,
    pub(crate) right: Link,
    pub(crate) color: Color,
    // The number of nodes in the subtree rooted here.
    pub(crate) size: usize,
}

impl<K, V> Node<K, V> {
    /// New nodes always join their parent with a red link.
    pub(crate) const fn new_red(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            color: Color::Red,
            size: 1,
        }
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}
