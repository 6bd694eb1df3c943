use std::cmp::Ordering;

use super::node::{HEAD, TAIL};
use super::search::Stop;
use super::{Cursor, SkipList};
use crate::options::MAX_HEIGHT_LIMIT;
use crate::types::Comparator;

/// Per-level splice points for a new node: `path[i]` is its level-`i`
/// predecessor.
type Path = [usize; MAX_HEIGHT_LIMIT];

/// Why a hint could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HintRejected {
    Sentinel,
    Stale,
    AtFront,
    AnchorAfterKey,
}

impl<K, V, C: Comparator<K>> SkipList<K, V, C> {
    /// Insert an entry and return a cursor to it.
    ///
    /// Duplicates are allowed. A new entry is placed after every entry with
    /// an equal key, so an equal-key run reads in insertion order.
    ///
    /// Algorithm:
    ///   1. Draw the new tower's level, growing the list height if needed
    ///   2. Descend from HEAD, recording the last node not after `key` per level
    ///   3. Splice the new node after those nodes on levels `0..=level`
    pub fn insert(&mut self, key: K, value: V) -> Cursor {
        let level = self.draw_level();
        let mut path: Path = [HEAD; MAX_HEIGHT_LIMIT];
        self.descend(&key, Stop::NotAfter, &mut path);
        self.link(key, value, level, &path)
    }

    /// Insert an entry next to a position believed to be close to it.
    ///
    /// `hint` is conventionally the entry just after where `key` belongs
    /// (the cursor `upper_bound(&key)` would return). The node right before
    /// the hint is the anchor; the splice points are found by scanning
    /// forward from the anchor and climbing from it instead of descending
    /// from HEAD, which is O(1) amortized for an accurate hint.
    ///
    /// The hint is ignored, falling back to [`insert`](Self::insert), when
    /// it is `end()`, another sentinel or stale, when the anchor is HEAD, or
    /// when the anchor's key is ordered after `key`. The resulting list is
    /// the same either way; only the cost differs.
    pub fn insert_with_hint(&mut self, hint: Cursor, key: K, value: V) -> Cursor {
        let anchor = match self.hint_anchor(hint, &key) {
            Ok(anchor) => anchor,
            Err(_reason) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(reason = ?_reason, "hint rejected, inserting from head");
                return self.insert(key, value);
            }
        };

        let level = self.draw_level();
        let mut path: Path = [HEAD; MAX_HEIGHT_LIMIT];
        self.hinted_path(anchor, &key, level, &mut path);
        self.link(key, value, level, &path)
    }

    /// Anchor node of a usable hint.
    fn hint_anchor(&self, hint: Cursor, key: &K) -> Result<usize, HintRejected> {
        if hint.slot == HEAD || hint.slot == TAIL {
            return Err(HintRejected::Sentinel);
        }
        if !self.is_live(hint) {
            return Err(HintRejected::Stale);
        }
        let anchor = self.arena.prev(hint.slot, 0);
        if anchor == HEAD {
            return Err(HintRejected::AtFront);
        }
        if self.cmp_node(anchor, key) == Ordering::Greater {
            return Err(HintRejected::AnchorAfterKey);
        }
        Ok(anchor)
    }

    /// Fill `path[0..=level]` starting from `anchor`, a node not after `key`.
    ///
    /// ```text
    /// Level 2:  A ─────────────────────────────► ...      climb: back on L1
    /// Level 1:  A ────────► B ──────────────────► ...     until a node taller
    /// Level 0:  A ──► x ──► B ──► anchor ──► y ──► ...    than L1 (B → A)
    ///                              │
    ///              forward scan on levels below anchor's height
    /// ```
    ///
    /// Levels the anchor takes part in are resolved by a local descent from
    /// the anchor. For each level above, the splice point is the nearest
    /// node at or before the one found a level below that is tall enough
    /// to reach it.
    fn hinted_path(&self, anchor: usize, key: &K, level: usize, path: &mut [usize]) {
        let reach = self.arena.height(anchor);
        let mut at = anchor;
        for i in (0..reach).rev() {
            at = self.advance(at, i, key, Stop::NotAfter);
            path[i] = at;
        }
        for i in reach..=level {
            path[i] = self.climb(path[i - 1], i);
        }
    }

    /// Nearest node at or before `from` that takes part in `level`.
    ///
    /// `from` must take part in `level - 1`; the walk goes backward on that
    /// level while the visited tower is too short. HEAD spans every level,
    /// so the walk always terminates.
    pub(super) fn climb(&self, mut from: usize, level: usize) -> usize {
        debug_assert!(level > 0 && level < self.max_height);
        while self.arena.height(from) <= level {
            from = self.arena.prev(from, level - 1);
        }
        from
    }

    /// Create the node and splice it in on levels `0..=level`.
    fn link(&mut self, key: K, value: V, level: usize, path: &[usize]) -> Cursor {
        let new = self.arena.alloc(key, value, level + 1);
        for (i, &pred) in path.iter().enumerate().take(level + 1) {
            self.arena.splice_after(pred, new, i);
        }
        self.len += 1;
        self.cursor(new)
    }
}
