use super::*;

use proptest::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Walk every level and check the structural invariants.
fn validate_list<K: Ord, V>(sl: &SkipList<K, V>) {
    let arena = &sl.arena;
    assert!(sl.height <= sl.max_height, "height above max_height");

    // Level 0: every entry, in order, doubly linked.
    let mut heights = Vec::new();
    let mut at = arena.next(HEAD, 0);
    let mut prev = HEAD;
    while at != TAIL {
        assert_eq!(arena.prev(at, 0), prev, "level 0 back link broken");
        let h = arena.height(at);
        assert!(h >= 1 && h <= sl.height, "tower height {h} out of range");
        if prev != HEAD {
            assert_ne!(
                arena.key(prev).cmp(&arena.key(at)),
                Ordering::Greater,
                "level 0 out of order"
            );
        }
        heights.push(h);
        prev = at;
        at = arena.next(at, 0);
    }
    assert_eq!(arena.prev(TAIL, 0), prev);
    assert_eq!(heights.len(), sl.len, "reachable count must match len");

    // Upper levels: sorted, mutual inverses, only towers tall enough.
    let mut participation = 0;
    for level in 0..sl.max_height {
        let mut at = arena.next(HEAD, level);
        let mut prev = HEAD;
        while at != TAIL {
            assert!(level < sl.height, "node linked above current height");
            assert!(arena.height(at) > level, "short tower linked on level {level}");
            assert_eq!(arena.prev(at, level), prev, "back link broken on level {level}");
            if prev != HEAD {
                assert_ne!(arena.key(prev).cmp(&arena.key(at)), Ordering::Greater);
            }
            participation += 1;
            prev = at;
            at = arena.next(at, level);
        }
        assert_eq!(arena.prev(TAIL, level), prev);
    }
    assert_eq!(
        participation,
        heights.iter().sum::<usize>(),
        "each tower must appear on exactly its own levels"
    );
}

/// Keys on each level in use, bottom first.
fn levels<K: Clone, V>(sl: &SkipList<K, V>) -> Vec<Vec<K>> {
    (0..sl.height)
        .map(|level| {
            let mut keys = Vec::new();
            let mut at = sl.arena.next(HEAD, level);
            while at != TAIL {
                keys.extend(sl.arena.key(at).cloned());
                at = sl.arena.next(at, level);
            }
            keys
        })
        .collect()
}

fn flatten(model: &BTreeMap<u8, Vec<u32>>) -> Vec<(u8, u32)> {
    model
        .iter()
        .flat_map(|(k, vs)| vs.iter().map(move |v| (*k, *v)))
        .collect()
}

fn contents(sl: &SkipList<u8, u32>) -> Vec<(u8, u32)> {
    sl.iter().map(|(k, v)| (*k, *v)).collect()
}

/// Cursor `n` steps from `begin()`, wrapping onto `end()`.
fn nth_cursor(sl: &SkipList<u8, u32>, n: usize) -> Cursor {
    let mut c = sl.begin();
    for _ in 0..n % (sl.len() + 1) {
        c = sl.next(c);
    }
    c
}

#[derive(Clone, Debug)]
enum Op {
    Insert(u8, u32),
    InsertWithHint(u8, u32, usize),
    EraseKey(u8),
    EraseAt(usize),
    Find(u8),
    Bounds(u8),
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    // Small key space so equal-key runs are common.
    let key = 0u8..32;
    let op = prop_oneof![
        30 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        30 => (key.clone(), any::<u32>(), any::<usize>())
            .prop_map(|(k, v, h)| Op::InsertWithHint(k, v, h)),
        10 => key.clone().prop_map(Op::EraseKey),
        10 => any::<usize>().prop_map(Op::EraseAt),
        10 => key.clone().prop_map(Op::Find),
        10 => key.prop_map(Op::Bounds),
    ];
    prop::collection::vec(op, 0..=400)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ops_match_model(ops in ops_strategy(), seed in any::<u64>()) {
        let mut sl = SkipList::with_options(Options::new().max_height(10).seed(seed)).unwrap();
        let mut model: BTreeMap<u8, Vec<u32>> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let c = sl.insert(k, v);
                    prop_assert_eq!(sl.get(c), Some((&k, &v)));
                    model.entry(k).or_default().push(v);
                }
                Op::InsertWithHint(k, v, h) => {
                    let hint = nth_cursor(&sl, h);
                    let c = sl.insert_with_hint(hint, k, v);
                    prop_assert_eq!(sl.get(c), Some((&k, &v)));
                    model.entry(k).or_default().push(v);
                }
                Op::EraseKey(k) => {
                    let expected = model.remove(&k).map_or(0, |vs| vs.len());
                    prop_assert_eq!(sl.erase_key(&k), expected);
                    prop_assert_eq!(sl.find(&k), sl.end());
                }
                Op::EraseAt(n) => {
                    let c = nth_cursor(&sl, n);
                    match sl.get(c).map(|(k, v)| (*k, *v)) {
                        Some((k, v)) => {
                            let next = sl.next(c);
                            prop_assert_eq!(sl.erase(c), Ok(next));
                            let vs = model.get_mut(&k).unwrap();
                            let pos = vs.iter().position(|x| *x == v).unwrap();
                            vs.remove(pos);
                            if vs.is_empty() {
                                model.remove(&k);
                            }
                            prop_assert_eq!(sl.erase(c), Err(crate::Error::InvalidIterator));
                        }
                        None => {
                            prop_assert_eq!(sl.erase(c), Err(crate::Error::InvalidIterator));
                        }
                    }
                }
                Op::Find(k) => {
                    let found = sl.get(sl.find(&k)).map(|(_, v)| *v);
                    let expected = model.get(&k).and_then(|vs| vs.first().copied());
                    prop_assert_eq!(found, expected);
                }
                Op::Bounds(k) => {
                    let lower = sl.get(sl.lower_bound(&k)).map(|(k, _)| *k);
                    let upper = sl.get(sl.upper_bound(&k)).map(|(k, _)| *k);
                    prop_assert_eq!(lower, model.range(k..).next().map(|(k, _)| *k));
                    prop_assert_eq!(upper, model.range(k + 1..).next().map(|(k, _)| *k));
                }
            }

            validate_list(&sl);
            prop_assert_eq!(contents(&sl), flatten(&model));
            prop_assert_eq!(sl.len(), model.values().map(Vec::len).sum::<usize>());
        }

        let mut backward: Vec<_> = sl.iter().rev().map(|(k, v)| (*k, *v)).collect();
        backward.reverse();
        prop_assert_eq!(backward, contents(&sl));
    }

    #[test]
    fn hinted_insert_builds_same_towers(
        entries in prop::collection::vec((0u8..64, any::<u32>(), any::<usize>()), 0..300),
        seed in any::<u64>(),
    ) {
        let opts = Options::new().max_height(12).seed(seed);
        let mut plain = SkipList::with_options(opts.clone()).unwrap();
        let mut hinted = SkipList::with_options(opts).unwrap();

        for (k, v, h) in entries {
            plain.insert(k, v);
            let hint = nth_cursor(&hinted, h);
            hinted.insert_with_hint(hint, k, v);
        }

        validate_list(&hinted);
        prop_assert_eq!(levels(&plain), levels(&hinted));
        prop_assert_eq!(contents(&plain), contents(&hinted));
    }

    #[test]
    fn insert_then_erase_restores_levels(
        keys in prop::collection::vec(0u8..64, 0..200),
        extra in 0u8..64,
        seed in any::<u64>(),
    ) {
        let mut sl = SkipList::with_options(Options::new().max_height(12).seed(seed)).unwrap();
        for (i, k) in keys.into_iter().enumerate() {
            sl.insert(k, i as u32);
        }
        let before = levels(&sl);

        let c = sl.insert(extra, u32::MAX);
        sl.erase(c).unwrap();
        validate_list(&sl);

        let after = levels(&sl);
        prop_assert_eq!(&after[..before.len()], &before[..]);
        prop_assert!(after[before.len()..].iter().all(Vec::is_empty));
    }
}
