use std::cmp::Ordering;
use std::iter::FusedIterator;
use std::ops::{Bound, RangeBounds};

use super::node::{Arena, HEAD, TAIL};
use super::{Cursor, SkipList};
use crate::types::Comparator;

/// Borrowing iterator over entries in level-0 order.
///
/// Simply follows level 0 links in either direction. The list cannot be
/// mutated while an `Iter` is alive; use [`Cursor`]s to walk and mutate.
pub struct Iter<'a, K, V> {
    arena: &'a Arena<K, V>,
    /// Next node to yield from the front.
    front: usize,
    /// Next node to yield from the back.
    back: usize,
    done: bool,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// Yield nodes from `first` up to but excluding `stop`.
    fn between(arena: &'a Arena<K, V>, first: usize, stop: usize) -> Self {
        let done = first == stop || first == TAIL;
        let back = if done { HEAD } else { arena.prev(stop, 0) };
        Iter {
            arena,
            front: first,
            back,
            done,
        }
    }

    fn empty(arena: &'a Arena<K, V>) -> Self {
        Iter {
            arena,
            front: TAIL,
            back: HEAD,
            done: true,
        }
    }

    fn entry(&self, idx: usize) -> Option<(&'a K, &'a V)> {
        let arena: &'a Arena<K, V> = self.arena;
        arena.node(idx).entry.as_ref().map(|(k, v)| (k, v))
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let idx = self.front;
        if idx == self.back {
            self.done = true;
        } else {
            self.front = self.arena.next(idx, 0);
        }
        self.entry(idx)
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let idx = self.back;
        if idx == self.front {
            self.done = true;
        } else {
            self.back = self.arena.prev(idx, 0);
        }
        self.entry(idx)
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V, C: Comparator<K>> SkipList<K, V, C> {
    /// Iterate over every entry in list order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::between(&self.arena, self.arena.next(HEAD, 0), TAIL)
    }

    /// Iterate from `cursor` to the end. Stale cursors and sentinels give an
    /// empty iterator, except HEAD which starts at the first entry.
    pub fn iter_from(&self, cursor: Cursor) -> Iter<'_, K, V> {
        if !self.is_live(cursor) {
            return Iter::empty(&self.arena);
        }
        let first = if cursor.slot == HEAD {
            self.arena.next(HEAD, 0)
        } else {
            cursor.slot
        };
        Iter::between(&self.arena, first, TAIL)
    }

    /// Iterate over the entries whose keys fall in `range`.
    ///
    /// Bounds are resolved with [`lower_bound`](Self::lower_bound) and
    /// [`upper_bound`](Self::upper_bound). A range whose start is ordered
    /// after its end is empty.
    pub fn range<R: RangeBounds<K>>(&self, range: R) -> Iter<'_, K, V> {
        if self.range_is_empty(range.start_bound(), range.end_bound()) {
            return Iter::empty(&self.arena);
        }
        let first = match range.start_bound() {
            Bound::Included(k) => self.lower_bound(k),
            Bound::Excluded(k) => self.upper_bound(k),
            Bound::Unbounded => self.begin(),
        };
        let stop = match range.end_bound() {
            Bound::Included(k) => self.upper_bound(k),
            Bound::Excluded(k) => self.lower_bound(k),
            Bound::Unbounded => self.end(),
        };
        Iter::between(&self.arena, first.slot, stop.slot)
    }

    fn range_is_empty(&self, start: Bound<&K>, end: Bound<&K>) -> bool {
        let (s, s_inclusive, e, e_inclusive) = match (start, end) {
            (Bound::Included(s), Bound::Included(e)) => (s, true, e, true),
            (Bound::Included(s), Bound::Excluded(e)) => (s, true, e, false),
            (Bound::Excluded(s), Bound::Included(e)) => (s, false, e, true),
            (Bound::Excluded(s), Bound::Excluded(e)) => (s, false, e, false),
            _ => return false,
        };
        match self.cmp.compare(s, e) {
            Ordering::Greater => true,
            Ordering::Equal => !(s_inclusive && e_inclusive),
            Ordering::Less => false,
        }
    }
}

impl<'a, K, V, C: Comparator<K>> IntoIterator for &'a SkipList<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
