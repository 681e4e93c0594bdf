use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;

use alloc::vec::Vec;
use log::{debug, trace};

use super::arena::Arena;
use super::handle::{Handle, Link};
use super::node::{Color, Node};

/// The left-leaning red-black tree backing `LlrbMap`.
///
/// Every structural change goes through `rotate_left`, `rotate_right` and
/// `flip_colors`; `move_red_left`/`move_red_right` and `balance` are built
/// on top of them. Recursive helpers take a subtree handle and return the
/// handle of the (possibly different) node now rooting that subtree.
#[derive(Clone)]
pub(crate) struct RawLlrbMap<K, V> {
    /// Arena storing all tree nodes.
    pub(super) nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    pub(super) root: Link,
}

impl<K, V> RawLlrbMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of key-value pairs in the tree.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.size_of(self.root)
    }

    /// Returns true if the tree contains no elements.
    #[inline]
    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        debug!("shrinking node arena holding {} nodes", self.nodes.len());
        self.nodes.shrink_to_fit();
    }

    /// Clears all elements from the tree.
    pub(crate) fn clear(&mut self) {
        debug!("clearing tree of {} nodes", self.len());
        self.nodes.clear();
        self.root = None;
    }

    /// Returns a reference to a node by handle.
    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    /// Returns a mutable reference to a node by handle.
    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    /// Returns the root handle, if any.
    #[inline]
    pub(crate) const fn root(&self) -> Link {
        self.root
    }

    #[inline]
    pub(crate) fn size_of(&self, link: Link) -> usize {
        link.map_or(0, |h| self.nodes.get(h).size)
    }

    /// Null links are black.
    #[inline]
    pub(crate) fn is_red(&self, link: Link) -> bool {
        link.is_some_and(|h| self.nodes.get(h).is_red())
    }

    #[inline]
    fn left_of(&self, link: Link) -> Link {
        link.and_then(|h| self.nodes.get(h).left)
    }

    #[inline]
    fn left_child(&self, h: Handle) -> Handle {
        self.nodes.get(h).left.expect("`RawLlrbMap::left_child()` - left link is null!")
    }

    #[inline]
    fn right_child(&self, h: Handle) -> Handle {
        self.nodes.get(h).right.expect("`RawLlrbMap::right_child()` - right link is null!")
    }

    fn update_size(&mut self, h: Handle) {
        let node = self.nodes.get(h);
        let size = 1 + self.size_of(node.left) + self.size_of(node.right);
        self.nodes.get_mut(h).size = size;
    }

    // ─── Primitives ──────────────────────────────────────────────────────────

    /// Turns the red right link of `h` into a left link.
    pub(crate) fn rotate_left(&mut self, h: Handle) -> Handle {
        let x = self.nodes.get(h).right.expect("`RawLlrbMap::rotate_left()` - right link is null!");
        debug_assert!(self.nodes.get(x).is_red(), "rotate_left: right link of {h:?} is black");
        let x_left = self.nodes.get(x).left;
        let (color, size) = {
            let node = self.nodes.get(h);
            (node.color, node.size)
        };

        let node = self.nodes.get_mut(h);
        node.right = x_left;
        node.color = Color::Red;

        let top = self.nodes.get_mut(x);
        top.left = Some(h);
        top.color = color;
        top.size = size;

        self.update_size(h);
        trace!("rotate_left: {h:?} -> {x:?}");
        x
    }

    /// Turns the red left link of `h` into a right link.
    pub(crate) fn rotate_right(&mut self, h: Handle) -> Handle {
        let x = self.nodes.get(h).left.expect("`RawLlrbMap::rotate_right()` - left link is null!");
        debug_assert!(self.nodes.get(x).is_red(), "rotate_right: left link of {h:?} is black");
        let x_right = self.nodes.get(x).right;
        let (color, size) = {
            let node = self.nodes.get(h);
            (node.color, node.size)
        };

        let node = self.nodes.get_mut(h);
        node.left = x_right;
        node.color = Color::Red;

        let top = self.nodes.get_mut(x);
        top.right = Some(h);
        top.color = color;
        top.size = size;

        self.update_size(h);
        trace!("rotate_right: {h:?} -> {x:?}");
        x
    }

    /// Toggles the color of `h` and both of its children.
    ///
    /// Splits a temporary 4-node on the way up an insertion, or joins `h`
    /// with its children into a 4-node on the way down a deletion.
    pub(crate) fn flip_colors(&mut self, h: Handle) {
        let node = self.nodes.get_mut(h);
        node.color = node.color.flipped();
        let children = [node.left, node.right];
        for child in children.into_iter().flatten() {
            let child = self.nodes.get_mut(child);
            child.color = child.color.flipped();
        }
        trace!("flip_colors: {h:?}");
    }

    /// Makes `h.left` or one of its children red, borrowing from the right
    /// sibling when it is a 3-node.
    ///
    /// Requires `h` red and both `h.left` and `h.left.left` black.
    fn move_red_left(&mut self, h: Handle) -> Handle {
        self.flip_colors(h);
        if let Some(right) = self.nodes.get(h).right
            && self.is_red(self.nodes.get(right).left)
        {
            let right = self.rotate_right(right);
            self.nodes.get_mut(h).right = Some(right);
            let h = self.rotate_left(h);
            self.flip_colors(h);
            trace!("move_red_left: borrowed from right sibling");
            return h;
        }
        h
    }

    /// Makes `h.right` or one of its children red.
    ///
    /// Requires `h` red and both `h.right` and `h.right.left` black.
    fn move_red_right(&mut self, h: Handle) -> Handle {
        self.flip_colors(h);
        if self.is_red(self.left_of(self.nodes.get(h).left)) {
            let h = self.rotate_right(h);
            self.flip_colors(h);
            trace!("move_red_right: borrowed from left sibling");
            return h;
        }
        h
    }

    /// Restores the local invariants below `h` after a deletion step.
    fn balance(&mut self, h: Handle) -> Handle {
        let mut h = h;
        if self.is_red(self.nodes.get(h).right) {
            h = self.rotate_left(h);
        }
        let left = self.nodes.get(h).left;
        if self.is_red(left) && self.is_red(self.left_of(left)) {
            h = self.rotate_right(h);
        }
        let node = self.nodes.get(h);
        if self.is_red(node.left) && self.is_red(node.right) {
            self.flip_colors(h);
        }
        self.update_size(h);
        h
    }

    /// Insertion fix-up: lean left, split 4-nodes, recompute the size.
    fn fix_up(&mut self, h: Handle) -> Handle {
        let mut h = h;
        let node = self.nodes.get(h);
        if self.is_red(node.right) && !self.is_red(node.left) {
            h = self.rotate_left(h);
        }
        let left = self.nodes.get(h).left;
        if self.is_red(left) && self.is_red(self.left_of(left)) {
            h = self.rotate_right(h);
        }
        let node = self.nodes.get(h);
        if self.is_red(node.left) && self.is_red(node.right) {
            self.flip_colors(h);
        }
        self.update_size(h);
        h
    }

    fn blacken_root(&mut self) {
        if let Some(root) = self.root {
            self.nodes.get_mut(root).color = Color::Black;
        }
    }

    /// A root that is a 2-node is colored red so deletion always has a red
    /// link to push down.
    fn redden_root_if_2node(&mut self, root: Handle) {
        let node = self.nodes.get(root);
        if !self.is_red(node.left) && !self.is_red(node.right) {
            self.nodes.get_mut(root).color = Color::Red;
        }
    }

    /// Unlinks the node and returns its entry.
    fn free(&mut self, h: Handle) -> (K, V) {
        trace!("free: {h:?}");
        self.nodes.take(h).into_entry()
    }

    // ─── Minimum / maximum deletion ──────────────────────────────────────────

    /// Removes and returns the smallest entry.
    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let root = self.root?;
        self.redden_root_if_2node(root);
        let (root, entry) = self.delete_min_at(root);
        self.root = root;
        self.blacken_root();
        Some(entry)
    }

    /// Removes and returns the largest entry.
    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let root = self.root?;
        self.redden_root_if_2node(root);
        let (root, entry) = self.delete_max_at(root);
        self.root = root;
        self.blacken_root();
        Some(entry)
    }

    fn delete_min_at(&mut self, h: Handle) -> (Link, (K, V)) {
        let Some(left) = self.nodes.get(h).left else {
            let right = self.nodes.get(h).right;
            return (right, self.free(h));
        };

        let mut h = h;
        if !self.is_red(Some(left)) && !self.is_red(self.nodes.get(left).left) {
            h = self.move_red_left(h);
        }
        let left = self.left_child(h);
        let (left, entry) = self.delete_min_at(left);
        self.nodes.get_mut(h).left = left;
        (Some(self.balance(h)), entry)
    }

    fn delete_max_at(&mut self, h: Handle) -> (Link, (K, V)) {
        let mut h = h;
        if self.is_red(self.nodes.get(h).left) {
            h = self.rotate_right(h);
        }
        let Some(right) = self.nodes.get(h).right else {
            let left = self.nodes.get(h).left;
            return (left, self.free(h));
        };

        if !self.is_red(Some(right)) && !self.is_red(self.nodes.get(right).left) {
            h = self.move_red_right(h);
        }
        let right = self.right_child(h);
        let (right, entry) = self.delete_max_at(right);
        self.nodes.get_mut(h).right = right;
        (Some(self.balance(h)), entry)
    }

    /// Takes every entry out in ascending key order and leaves the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let order = self.in_order();
        let entries: Vec<(K, V)> = order.into_iter().map(|h| self.nodes.take(h).into_entry()).collect();
        self.root = None;
        self.nodes.clear();
        debug!("drained {} entries", entries.len());
        entries
    }

    /// Handles of every node in ascending key order.
    pub(crate) fn in_order(&self) -> Vec<Handle> {
        let mut order = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        let mut current = self.root;
        loop {
            while let Some(h) = current {
                stack.push(h);
                current = self.nodes.get(h).left;
            }
            let Some(h) = stack.pop() else {
                break;
            };
            order.push(h);
            current = self.nodes.get(h).right;
        }
        order
    }
}

impl<K: Ord, V> RawLlrbMap<K, V> {
    /// Finds the node holding `key`.
    pub(crate) fn search<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.nodes.get(h);
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(h),
            };
        }
        None
    }

    /// Returns a reference to the value corresponding to the key.
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|h| &self.nodes.get(h).value)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let h = self.search(key)?;
        Some(&mut self.nodes.get_mut(h).value)
    }

    /// Returns the key-value pair corresponding to the key.
    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|h| {
            let node = self.nodes.get(h);
            (&node.key, &node.value)
        })
    }

    /// Returns true if the tree contains the specified key.
    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).is_some()
    }

    /// Inserts a key-value pair into the tree.
    /// Returns the old value if the key was already present.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut replaced = None;
        let root = self.insert_at(self.root, key, value, &mut replaced);
        self.root = Some(root);
        self.blacken_root();
        replaced
    }

    fn insert_at(&mut self, link: Link, key: K, value: V, replaced: &mut Option<V>) -> Handle {
        let Some(h) = link else {
            let h = self.nodes.alloc(Node::new_red(key, value));
            trace!("insert: new red leaf {h:?}");
            return h;
        };

        match key.cmp(&self.nodes.get(h).key) {
            Ordering::Less => {
                let left = self.nodes.get(h).left;
                let left = self.insert_at(left, key, value, replaced);
                self.nodes.get_mut(h).left = Some(left);
            }
            Ordering::Greater => {
                let right = self.nodes.get(h).right;
                let right = self.insert_at(right, key, value, replaced);
                self.nodes.get_mut(h).right = Some(right);
            }
            Ordering::Equal => {
                // Overwrite in place; the shape below is untouched.
                *replaced = Some(mem::replace(&mut self.nodes.get_mut(h).value, value));
                return h;
            }
        }

        self.fix_up(h)
    }

    /// Removes a key from the tree, returning the stored key and value.
    ///
    /// An absent key leaves the tree untouched.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let root = self.root?;
        if !self.contains_key(key) {
            return None;
        }

        self.redden_root_if_2node(root);
        let (root, entry) = self.remove_at(root, key);
        self.root = root;
        self.blacken_root();
        Some(entry)
    }

    // Requires `key` to be present in the subtree rooted at `h`.
    fn remove_at<Q>(&mut self, h: Handle, key: &Q) -> (Link, (K, V))
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut h = h;

        if key.cmp(self.nodes.get(h).key.borrow()).is_lt() {
            let left = self.left_child(h);
            if !self.is_red(Some(left)) && !self.is_red(self.nodes.get(left).left) {
                h = self.move_red_left(h);
            }
            let left = self.left_child(h);
            let (left, entry) = self.remove_at(left, key);
            self.nodes.get_mut(h).left = left;
            return (Some(self.balance(h)), entry);
        }

        if self.is_red(self.nodes.get(h).left) {
            h = self.rotate_right(h);
        }
        if key.cmp(self.nodes.get(h).key.borrow()).is_eq() && self.nodes.get(h).right.is_none() {
            let left = self.nodes.get(h).left;
            return (left, self.free(h));
        }

        let right = self.right_child(h);
        if !self.is_red(Some(right)) && !self.is_red(self.nodes.get(right).left) {
            h = self.move_red_right(h);
        }
        let right = self.right_child(h);

        let entry = if key.cmp(self.nodes.get(h).key.borrow()).is_eq() {
            // Re-key `h` with its successor and delete the successor node.
            let (right, (successor_key, successor_value)) = self.delete_min_at(right);
            let node = self.nodes.get_mut(h);
            node.right = right;
            let key = mem::replace(&mut node.key, successor_key);
            let value = mem::replace(&mut node.value, successor_value);
            (key, value)
        } else {
            let (right, entry) = self.remove_at(right, key);
            self.nodes.get_mut(h).right = right;
            entry
        };

        (Some(self.balance(h)), entry)
    }
}
