/// A zero-based rank into the sorted order of a map or set.
///
/// Indexing with a `Rank` panics when it is out of bounds; use
/// [`select`](crate::LlrbMap::select) or
/// [`get_by_rank`](crate::LlrbMap::get_by_rank) for a checked lookup.
///
/// # Examples
///
/// ```
/// use llrb_tree::{LlrbMap, Rank};
///
/// let mut map = LlrbMap::new();
/// map.insert("a", 10);
/// map.insert("b", 20);
///
/// assert_eq!(map[Rank(0)], 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
