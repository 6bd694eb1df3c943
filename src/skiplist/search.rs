use std::cmp::Ordering;

use super::node::{HEAD, TAIL};
use super::{Cursor, SkipList};
use crate::types::Comparator;

/// How far a forward scan may go relative to the target key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Stop {
    /// Advance while the next key is strictly before the target.
    /// Rests on the last node before the equal-key run.
    Before,
    /// Advance while the next key is not after the target.
    /// Rests on the last node of the equal-key run, if any.
    NotAfter,
}

impl<K, V, C: Comparator<K>> SkipList<K, V, C> {
    /// Order of a real node's key relative to `key`.
    #[inline]
    pub(super) fn cmp_node(&self, idx: usize, key: &K) -> Ordering {
        match self.arena.key(idx) {
            Some(k) => self.cmp.compare(k, key),
            None => unreachable!("sentinel {idx} compared against a key"),
        }
    }

    /// Walk forward on one level from `at` for as long as `stop` allows.
    /// Returns the node the scan rests on; `at` itself if it cannot move.
    pub(super) fn advance(&self, mut at: usize, level: usize, key: &K, stop: Stop) -> usize {
        loop {
            let next = self.arena.next(at, level);
            if next == TAIL {
                return at;
            }
            let go = match stop {
                Stop::Before => self.cmp_node(next, key) == Ordering::Less,
                Stop::NotAfter => self.cmp_node(next, key) != Ordering::Greater,
            };
            if !go {
                return at;
            }
            at = next;
        }
    }

    /// Top-down descent from the head sentinel.
    ///
    /// ```text
    /// Level 2:  HEAD ───────────► 20 ──────────────► TAIL
    ///                             │ drop
    /// Level 1:  HEAD ──► 10 ───► 20 ──────► 40 ───► TAIL
    ///                             │ drop
    /// Level 0:  HEAD ──► 10 ──► 20 ──► 30 ──► 40 ──► TAIL
    ///                                  ▲
    ///                 descend(30, NotAfter) rests here
    /// ```
    ///
    /// `path[i]` receives the resting node at level `i` for every level in
    /// use; the level-0 resting node is returned. Levels at or above the
    /// current height are left untouched.
    pub(super) fn descend(&self, key: &K, stop: Stop, path: &mut [usize]) -> usize {
        let mut at = HEAD;
        for level in (0..self.height).rev() {
            at = self.advance(at, level, key, stop);
            path[level] = at;
        }
        at
    }

    /// Level-0 resting node of a descent, without recording the path.
    pub(super) fn rest(&self, key: &K, stop: Stop) -> usize {
        let mut at = HEAD;
        for level in (0..self.height).rev() {
            at = self.advance(at, level, key, stop);
        }
        at
    }

    /// First entry whose key equals `key`, or `end()`.
    ///
    /// With duplicates this is the oldest of the equal-key run.
    pub fn find(&self, key: &K) -> Cursor {
        let candidate = self.arena.next(self.rest(key, Stop::Before), 0);
        if candidate != TAIL && self.cmp_node(candidate, key) == Ordering::Equal {
            self.cursor(candidate)
        } else {
            self.end()
        }
    }

    /// First entry not ordered before `key`, or `end()`.
    pub fn lower_bound(&self, key: &K) -> Cursor {
        self.cursor(self.arena.next(self.rest(key, Stop::Before), 0))
    }

    /// First entry ordered after `key`, or `end()`.
    pub fn upper_bound(&self, key: &K) -> Cursor {
        self.cursor(self.arena.next(self.rest(key, Stop::NotAfter), 0))
    }

    /// Value of the first entry with this key.
    pub fn get_key(&self, key: &K) -> Option<&V> {
        self.get(self.find(key)).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key) != self.end()
    }

    /// Number of entries whose key equals `key`.
    pub fn count(&self, key: &K) -> usize {
        let mut n = 0;
        let mut at = self.arena.next(self.rest(key, Stop::Before), 0);
        while at != TAIL && self.cmp_node(at, key) == Ordering::Equal {
            n += 1;
            at = self.arena.next(at, 0);
        }
        n
    }
}
