use std::collections::BTreeMap;
use std::ops::Bound;
use std::panic::{self, AssertUnwindSafe};

use llrb_tree::{Error, LlrbMap, Rank};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 1_000;

fn key_strategy() -> impl Strategy<Value = i64> {
    // Narrow enough that inserts and removes collide often.
    -500i64..500i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

fn search_example() -> LlrbMap<char, usize> {
    let mut map = LlrbMap::new();
    for (value, key) in "SEARCHEXAMPLE".chars().enumerate() {
        map.insert(key, value);
    }
    map
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    Remove(i64),
    DeleteMin,
    DeleteMax,
    Get(i64),
    Floor(i64),
    Ceiling(i64),
    Rank(i64),
    Select(usize),
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        6 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        1 => Just(MapOp::DeleteMin),
        1 => Just(MapOp::DeleteMax),
        1 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::Floor),
        1 => key_strategy().prop_map(MapOp::Ceiling),
        1 => key_strategy().prop_map(MapOp::Rank),
        1 => (0usize..600).prop_map(MapOp::Select),
    ]
}

// ─── Concrete scenarios ──────────────────────────────────────────────────────

#[test]
fn search_example_summary() {
    let map = search_example();
    assert_eq!(map.len(), 10);
    assert_eq!(map.min(), Ok(&'A'));
    assert_eq!(map.max(), Ok(&'X'));
    assert_eq!(map.rank(&'M'), 5);
    // The second E overwrote the first.
    assert_eq!(map.get(&'E'), Some(&12));
    assert_eq!(map.keys().collect::<String>(), "ACEHLMPRSX");
    assert_eq!(map.check_invariants(), Ok(()));
}

#[test]
fn delete_min_drains_in_ascending_order() {
    let mut map = search_example();
    let mut drained = Vec::new();
    while let Ok((key, _)) = map.delete_min() {
        assert_eq!(map.check_invariants(), Ok(()));
        drained.push(key);
    }
    assert_eq!(drained, "ACEHLMPRSX".chars().collect::<Vec<_>>());
    assert!(map.is_empty());
}

#[test]
fn delete_max_drains_in_descending_order() {
    let mut map = search_example();
    let mut drained = String::new();
    while let Ok((key, _)) = map.delete_max() {
        assert_eq!(map.check_invariants(), Ok(()));
        drained.push(key);
    }
    assert_eq!(drained, "XSRPMLHECA");
}

#[test]
fn select_ends_match_min_and_max() {
    let map = search_example();
    assert_eq!(map.select(0), map.min());
    assert_eq!(map.select(map.len() - 1), map.max());
    assert_eq!(map.select(map.len()), Err(Error::RankOutOfBounds { rank: 10, len: 10 }));
}

#[test]
fn floor_and_ceiling_between_keys() {
    let map = search_example();
    assert_eq!(map.floor(&'F'), Ok(Some(&'E')));
    assert_eq!(map.ceiling(&'F'), Ok(Some(&'H')));
    assert_eq!(map.floor(&'E'), Ok(Some(&'E')));
    assert_eq!(map.ceiling(&'E'), Ok(Some(&'E')));
    assert_eq!(map.floor(&'0'), Ok(None));
    assert_eq!(map.ceiling(&'Z'), Ok(None));
}

#[test]
fn removing_absent_key_is_noop() {
    let mut map = search_example();
    let before: Vec<_> = map.iter().map(|(&k, &v)| (k, v)).collect();
    assert_eq!(map.remove(&'Q'), None);
    assert_eq!(map.remove_entry(&'B'), None);
    let after: Vec<_> = map.iter().map(|(&k, &v)| (k, v)).collect();
    assert_eq!(after, before);
    assert_eq!(map.len(), 10);
    assert_eq!(map.check_invariants(), Ok(()));
}

#[test]
fn empty_map_underflows() {
    let mut map: LlrbMap<char, usize> = LlrbMap::new();
    assert_eq!(map.delete_min(), Err(Error::Underflow));
    assert_eq!(map.delete_max(), Err(Error::Underflow));
    assert_eq!(map.min(), Err(Error::Underflow));
    assert_eq!(map.max(), Err(Error::Underflow));
    assert_eq!(map.floor(&'A'), Err(Error::Underflow));
    assert_eq!(map.ceiling(&'A'), Err(Error::Underflow));
    assert_eq!(map.select(0), Err(Error::RankOutOfBounds { rank: 0, len: 0 }));
    assert_eq!(map.height(), None);
    assert_eq!(map.len_between(&'A', &'Z'), 0);
    assert_eq!(map.keys_between(&'A', &'Z').next(), None);
    assert_eq!(map.check_invariants(), Ok(()));
}

#[test]
fn keys_between_is_inclusive() {
    let map = search_example();
    assert_eq!(map.keys_between(&'E', &'Q').collect::<String>(), "EHLMP");
    assert_eq!(map.keys_between(&'E', &'Q').rev().collect::<String>(), "PMLHE");
    assert_eq!(map.keys_between(&'F', &'G').count(), 0);
    assert_eq!(map.keys_between(&'Q', &'E').count(), 0);
    assert_eq!(map.len_between(&'E', &'Q'), 5);
    assert_eq!(map.len_between(&'B', &'D'), 1);
    assert_eq!(map.len_between(&'Q', &'E'), 0);
}

#[test]
fn crossed_range_is_empty() {
    let map = search_example();
    let mut range = map.range((Bound::Included(&'S'), Bound::Excluded(&'C')));
    assert_eq!(range.len(), 0);
    assert_eq!(range.next(), None);
    assert_eq!(map.range('C'..'C').count(), 0);
}

#[test]
fn height_stays_logarithmic_for_sorted_input() {
    let map: LlrbMap<u32, ()> = (0..4096).map(|k| (k, ())).collect();
    assert_eq!(map.check_invariants(), Ok(()));
    // 2 lg n for n = 4096.
    assert!(map.height().unwrap() <= 24);

    let map: LlrbMap<u32, ()> = (0..4096).rev().map(|k| (k, ())).collect();
    assert_eq!(map.check_invariants(), Ok(()));
    assert!(map.height().unwrap() <= 24);
}

#[test]
fn rank_indexing() {
    let mut map = search_example();
    assert_eq!(map[Rank(0)], 8);
    map[Rank(9)] = 100;
    assert_eq!(map.get(&'X'), Some(&100));
    assert_eq!(map[&'X'], 100);
}

#[test]
#[should_panic(expected = "rank out of bounds")]
fn rank_index_out_of_bounds_panics() {
    let map = search_example();
    let _value: usize = map[Rank(10)];
}

#[test]
fn capacity_survives_churn() {
    let mut map = LlrbMap::with_capacity(64);
    for round in 0..4 {
        for k in 0..64 {
            map.insert(k, round);
        }
        for k in 0..64 {
            assert_eq!(map.remove(&k), Some(round));
        }
    }
    assert!(map.is_empty());
    assert!(map.capacity() >= 64);
    map.shrink_to_fit();
    assert_eq!(map.check_invariants(), Ok(()));
}

#[test]
fn panicking_retain_keeps_unvisited_entries() {
    let mut map: LlrbMap<i32, i32> = (0..100).map(|k| (k, k * 10)).collect();
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        map.retain(|&k, _| {
            assert!(k != 50, "predicate failed at 50");
            k % 2 == 0
        });
    }));
    assert!(result.is_err());

    // Odd keys below 50 were rejected before the panic; 50 and everything
    // after it are still present.
    let expected: Vec<i32> = (0..50).step_by(2).chain(50..100).collect();
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), expected);
    assert_eq!(map.get(&99), Some(&990));
    assert_eq!(map.check_invariants(), Ok(()));
}

#[test]
fn shrink_after_draining_reuses_storage() {
    let mut map: LlrbMap<u32, u32> = (0..2048).map(|k| (k, k)).collect();
    while map.pop_first().is_some() {}
    map.shrink_to_fit();
    assert_eq!(map.check_invariants(), Ok(()));

    map.extend((0..16).map(|k| (k, k)));
    assert_eq!(map.len(), 16);
    assert_eq!(map.check_invariants(), Ok(()));
}

#[test]
fn iterators_debug_as_lists() {
    let map = LlrbMap::from([(2, 'b'), (1, 'a')]);
    assert_eq!(format!("{:?}", map.iter()), "[(1, 'a'), (2, 'b')]");
    assert_eq!(format!("{:?}", map.range(2..)), "[(2, 'b')]");
    assert_eq!(format!("{:?}", map.keys()), "[1, 2]");
    assert_eq!(format!("{:?}", map.values()), "['a', 'b']");
}

#[test]
fn debug_lists_entries_in_order() {
    let map = LlrbMap::from([(3, 'c'), (1, 'a'), (2, 'b')]);
    assert_eq!(format!("{map:?}"), "{1: 'a', 2: 'b', 3: 'c'}");
}

// ─── Model-based properties ──────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Replays a random operation sequence on both `LlrbMap` and `BTreeMap`,
    /// checking the results and the tree invariants after every step.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut map: LlrbMap<i64, i64> = LlrbMap::new();
        let mut model: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                MapOp::Insert(k, v) => {
                    prop_assert_eq!(map.insert(*k, *v), model.insert(*k, *v), "insert({}, {})", k, v);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(map.remove(k), model.remove(k), "remove({})", k);
                }
                MapOp::DeleteMin => {
                    prop_assert_eq!(map.delete_min().ok(), model.pop_first(), "delete_min");
                }
                MapOp::DeleteMax => {
                    prop_assert_eq!(map.delete_max().ok(), model.pop_last(), "delete_max");
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(map.get(k), model.get(k), "get({})", k);
                }
                MapOp::Floor(k) => {
                    let expected = if model.is_empty() {
                        Err(Error::Underflow)
                    } else {
                        Ok(model.range(..=*k).next_back().map(|(k, _)| k))
                    };
                    prop_assert_eq!(map.floor(k), expected, "floor({})", k);
                }
                MapOp::Ceiling(k) => {
                    let expected = if model.is_empty() {
                        Err(Error::Underflow)
                    } else {
                        Ok(model.range(*k..).next().map(|(k, _)| k))
                    };
                    prop_assert_eq!(map.ceiling(k), expected, "ceiling({})", k);
                }
                MapOp::Rank(k) => {
                    prop_assert_eq!(map.rank(k), model.range(..*k).count(), "rank({})", k);
                }
                MapOp::Select(i) => {
                    let expected = model.keys().nth(*i).ok_or(Error::RankOutOfBounds { rank: *i, len: model.len() });
                    prop_assert_eq!(map.select(*i), expected, "select({})", i);
                }
            }
            prop_assert_eq!(map.len(), model.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(map.check_invariants(), Ok(()), "invariants broken after {:?}", op);
        }
    }

    /// `rank(select(i)) == i` for every rank and `select(rank(k)) == k` for
    /// every key.
    #[test]
    fn rank_and_select_are_inverse(entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..TEST_SIZE)) {
        let map: LlrbMap<i64, i64> = entries.into_iter().collect();
        for i in 0..map.len() {
            let key = map.select(i).unwrap();
            prop_assert_eq!(map.rank(key), i);
            prop_assert_eq!(map.rank_of(key), Some(i));
        }
        for key in map.keys() {
            prop_assert_eq!(map.select(map.rank(key)), Ok(key));
        }
    }

    /// Inserting a fresh key and removing it again leaves the same entries.
    #[test]
    fn insert_then_remove_round_trips(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..TEST_SIZE),
        key in 500i64..1_000,
        value in value_strategy(),
    ) {
        let mut map: LlrbMap<i64, i64> = entries.into_iter().collect();
        let before = map.clone();
        prop_assert_eq!(map.insert(key, value), None);
        prop_assert_eq!(map.remove(&key), Some(value));
        prop_assert_eq!(&map, &before);
        prop_assert_eq!(map.check_invariants(), Ok(()));
    }

    /// Repeating an insert changes neither the value nor the length.
    #[test]
    fn reinsert_is_idempotent(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..TEST_SIZE),
        key in key_strategy(),
        value in value_strategy(),
    ) {
        let mut map: LlrbMap<i64, i64> = entries.into_iter().collect();
        map.insert(key, value);
        let len = map.len();
        prop_assert_eq!(map.insert(key, value), Some(value));
        prop_assert_eq!(map.get(&key), Some(&value));
        prop_assert_eq!(map.len(), len);
    }

    /// Keys come out strictly ascending and equal to the model's key set.
    #[test]
    fn keys_are_strictly_ascending(entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..TEST_SIZE)) {
        let map: LlrbMap<i64, i64> = entries.iter().copied().collect();
        let model: BTreeMap<i64, i64> = entries.into_iter().collect();
        let keys: Vec<_> = map.keys().copied().collect();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(keys, model.keys().copied().collect::<Vec<_>>());
        prop_assert_eq!(map.values().collect::<Vec<_>>(), model.values().collect::<Vec<_>>());
        prop_assert_eq!(map.into_iter().collect::<Vec<_>>(), model.into_iter().collect::<Vec<_>>());
    }

    /// Bounded iteration and counting agree with `BTreeMap::range`.
    #[test]
    fn range_matches_btreemap(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..TEST_SIZE),
        lo in key_strategy(),
        hi in key_strategy(),
    ) {
        let map: LlrbMap<i64, i64> = entries.iter().copied().collect();
        let model: BTreeMap<i64, i64> = entries.into_iter().collect();
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };

        let got: Vec<_> = map.range(lo..=hi).collect();
        let expected: Vec<_> = model.range(lo..=hi).collect();
        prop_assert_eq!(&got, &expected, "range({}..={})", lo, hi);

        let got: Vec<_> = map.range(lo..hi).rev().collect();
        let expected: Vec<_> = model.range(lo..hi).rev().collect();
        prop_assert_eq!(&got, &expected, "range({}..{}).rev()", lo, hi);

        let got: Vec<_> = map.range((Bound::Excluded(lo), Bound::Unbounded)).collect();
        let expected: Vec<_> = model.range((Bound::Excluded(lo), Bound::Unbounded)).collect();
        prop_assert_eq!(&got, &expected, "range(({}, ..))", lo);

        prop_assert_eq!(map.range(..hi).len(), model.range(..hi).count());
        prop_assert_eq!(map.len_between(&lo, &hi), model.range(lo..=hi).count());
        prop_assert_eq!(map.keys_between(&lo, &hi).count(), model.range(lo..=hi).count());
    }

    /// Alternating `next` and `next_back` visits every entry exactly once.
    #[test]
    fn iter_meets_in_the_middle(entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE)) {
        let map: LlrbMap<i64, i64> = entries.into_iter().collect();
        let mut iter = map.iter();
        let mut front = Vec::new();
        let mut back = Vec::new();
        loop {
            prop_assert_eq!(iter.len(), map.len() - front.len() - back.len());
            let Some(item) = iter.next() else { break };
            front.push(item);
            let Some(item) = iter.next_back() else { break };
            back.push(item);
        }
        back.reverse();
        front.extend(back);
        prop_assert_eq!(front, map.iter().collect::<Vec<_>>());
    }

    /// `retain` keeps exactly the entries the predicate accepts.
    #[test]
    fn retain_matches_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..TEST_SIZE)) {
        let mut map: LlrbMap<i64, i64> = entries.iter().copied().collect();
        let mut model: BTreeMap<i64, i64> = entries.into_iter().collect();
        map.retain(|k, v| (k + *v % 7) % 3 == 0);
        model.retain(|k, v| (k + *v % 7) % 3 == 0);
        prop_assert_eq!(map.iter().collect::<Vec<_>>(), model.iter().collect::<Vec<_>>());
        prop_assert_eq!(map.check_invariants(), Ok(()));
    }
}
