mod erase;
mod insert;
mod iter;
pub(crate) mod level;
pub(crate) mod node;
#[cfg(test)]
mod proptests;
mod search;

use std::fmt;
use std::fmt::Write as _;

use crate::error::Result;
use crate::options::Options;
use crate::types::{Ascending, Comparator};

pub use iter::Iter;
use level::LevelGenerator;
use node::{Arena, HEAD, TAIL};

/// A position in a [`SkipList`]: a real entry, or one of the two sentinels.
///
/// Cursors are plain handles. They do not borrow the list, so the list can
/// be mutated while a cursor is held. A cursor whose node has been erased is
/// stale: [`SkipList::get`] returns `None` for it and [`SkipList::erase`]
/// rejects it with [`Error::InvalidIterator`](crate::Error::InvalidIterator).
///
/// Two cursors are equal iff they name the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    slot: usize,
    generation: u32,
}

/// Counters describing the current shape of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    /// Number of stored entries.
    pub len: usize,
    /// Number of levels in use. Never shrinks, except on `clear`.
    pub height: usize,
    /// Configured tower limit.
    pub max_height: usize,
    /// `nodes_per_level[i]` is how many entries take part in level `i`.
    pub nodes_per_level: Vec<usize>,
}

/// An ordered multimap built as a doubly linked skip list.
///
/// ```text
/// Level 3:  HEAD ──────────────────────────────► 50 ──────────► TAIL
/// Level 2:  HEAD ──────────► 20 ────────────────► 50 ──────────► TAIL
/// Level 1:  HEAD ──► 10 ──► 20 ────► 35 ────────► 50 ──► 60 ──► TAIL
/// Level 0:  HEAD ──► 10 ──► 20 ──► 25 ──► 35 ──► 50 ──► 60 ──► TAIL
/// ```
///
/// Every level is linked in both directions. Level 0 holds every entry in
/// the order given by the comparator `C`; equal keys keep insertion order.
///
/// Average case: O(log n) insert, find, bounds and erase; O(1) amortized
/// insert when the hint passed to [`insert_with_hint`](Self::insert_with_hint)
/// is accurate.
///
/// # Concurrency
///
/// The list is not internally synchronized. Mutation needs `&mut self`, so
/// sharing one list across threads requires an outer lock such as a
/// `Mutex`. Cursors are validated on every use and never dangle.
pub struct SkipList<K, V, C = Ascending> {
    arena: Arena<K, V>,
    cmp: C,
    levels: LevelGenerator,
    max_height: usize,
    height: usize,
    len: usize,
}

impl<K: Ord, V> SkipList<K, V, Ascending> {
    /// Create an empty ascending list with default options.
    pub fn new() -> Self {
        Self::build(Ascending, Options::default())
    }

    /// Create an empty ascending list whose towers are at most `max_height` tall.
    ///
    /// # Panics
    /// Panics if `max_height` is 0 or above [`MAX_HEIGHT_LIMIT`](crate::MAX_HEIGHT_LIMIT).
    pub fn with_max_height(max_height: usize) -> Self {
        let options = Options::new().max_height(max_height);
        if let Err(e) = options.validate() {
            panic!("{e}");
        }
        Self::build(Ascending, options)
    }

    /// Create an empty ascending list from validated options.
    pub fn with_options(options: Options) -> Result<Self> {
        Self::with_comparator(Ascending, options)
    }
}

impl<K: Ord, V> Default for SkipList<K, V, Ascending> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Comparator<K>> SkipList<K, V, C> {
    /// Create an empty list ordered by `cmp`.
    pub fn with_comparator(cmp: C, options: Options) -> Result<Self> {
        options.validate()?;
        Ok(Self::build(cmp, options))
    }

    fn build(cmp: C, options: Options) -> Self {
        SkipList {
            arena: Arena::new(options.max_height),
            cmp,
            levels: LevelGenerator::new(options.max_height, options.seed),
            max_height: options.max_height,
            height: 0,
            len: 0,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list holds no entries.
    pub fn is_empty(&self) -> bool {
        self.arena.next(HEAD, 0) == TAIL
    }

    /// Tower limit this list was built with.
    pub fn max_height(&self) -> usize {
        self.max_height
    }

    /// Number of levels currently in use.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The comparator ordering this list.
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Cursor at the first entry, or `end()` when empty.
    pub fn begin(&self) -> Cursor {
        self.cursor(self.arena.next(HEAD, 0))
    }

    /// Past-the-end cursor. Always the tail sentinel.
    pub fn end(&self) -> Cursor {
        self.cursor(TAIL)
    }

    /// Step forward on level 0. `end()` and stale cursors yield `end()`.
    pub fn next(&self, cursor: Cursor) -> Cursor {
        if !self.is_live(cursor) || cursor.slot == TAIL {
            return self.end();
        }
        self.cursor(self.arena.next(cursor.slot, 0))
    }

    /// Step backward on level 0.
    ///
    /// Stepping back from the first entry lands on the head sentinel, which
    /// stays put on further steps. Stale cursors yield `end()`.
    pub fn prev(&self, cursor: Cursor) -> Cursor {
        if !self.is_live(cursor) {
            return self.end();
        }
        if cursor.slot == HEAD {
            return cursor;
        }
        self.cursor(self.arena.prev(cursor.slot, 0))
    }

    /// Entry under the cursor. `None` for sentinels and stale cursors.
    pub fn get(&self, cursor: Cursor) -> Option<(&K, &V)> {
        if !self.is_live(cursor) {
            return None;
        }
        self.arena.node(cursor.slot).entry.as_ref().map(|(k, v)| (k, v))
    }

    /// Mutable value under the cursor. Keys are never handed out mutably.
    pub fn get_mut(&mut self, cursor: Cursor) -> Option<&mut V> {
        if !self.is_live(cursor) {
            return None;
        }
        self.arena.node_mut(cursor.slot).entry.as_mut().map(|(_, v)| v)
    }

    /// First entry in list order.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.get(self.begin())
    }

    /// Last entry in list order.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.get(self.cursor(self.arena.prev(TAIL, 0)))
    }

    /// Drop every entry. Options and RNG state are kept; the height resets.
    pub fn clear(&mut self) {
        let mut at = self.arena.next(HEAD, 0);
        while at != TAIL {
            let next = self.arena.next(at, 0);
            self.arena.release(at);
            at = next;
        }
        self.arena.reset_sentinels();
        self.height = 0;
        self.len = 0;
    }

    /// Shape counters for the whole list. O(n · height).
    pub fn stats(&self) -> Stats {
        let nodes_per_level = (0..self.height)
            .map(|level| {
                let mut count = 0;
                let mut at = self.arena.next(HEAD, level);
                while at != TAIL {
                    count += 1;
                    at = self.arena.next(at, level);
                }
                count
            })
            .collect();
        Stats {
            len: self.len,
            height: self.height,
            max_height: self.max_height,
            nodes_per_level,
        }
    }

    /// Render every level, top first, as a chain of keys.
    ///
    /// ```text
    /// L1: HEAD -> 2 -> TAIL
    /// L0: HEAD -> 1 -> 2 -> 3 -> TAIL
    /// ```
    ///
    /// Meant for eyeballing small lists; the format may change.
    pub fn dump(&self) -> String
    where
        K: fmt::Debug,
    {
        let mut out = String::new();
        for level in (0..self.height).rev() {
            let _ = write!(out, "L{level}: HEAD");
            let mut at = self.arena.next(HEAD, level);
            while at != TAIL {
                if let Some(key) = self.arena.key(at) {
                    let _ = write!(out, " -> {key:?}");
                }
                at = self.arena.next(at, level);
            }
            out.push_str(" -> TAIL\n");
        }
        out
    }

    #[inline]
    fn cursor(&self, slot: usize) -> Cursor {
        Cursor {
            slot,
            generation: self.arena.generation(slot).unwrap_or_default(),
        }
    }

    /// Cursor still names a node of this list (sentinels included).
    #[inline]
    fn is_live(&self, cursor: Cursor) -> bool {
        self.arena.generation(cursor.slot) == Some(cursor.generation)
    }

    /// Draw a tower level for a new node and grow the list height to fit it.
    fn draw_level(&mut self) -> usize {
        let level = self.levels.random_level();
        if level >= self.height {
            #[cfg(feature = "tracing")]
            tracing::trace!(from = self.height, to = level + 1, "skip list height grows");
            self.height = level + 1;
        }
        level
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C: Comparator<K>> fmt::Debug for SkipList<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for SkipList<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for SkipList<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = Self::build(C::default(), Options::default());
        list.extend(iter);
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list() {
        let sl: SkipList<u32, u32> = SkipList::with_max_height(8);
        assert!(sl.is_empty());
        assert_eq!(sl.begin(), sl.end());
        assert_eq!(sl.height(), 0);
        assert!(sl.first().is_none());
        assert!(sl.last().is_none());
        assert_eq!(sl.dump(), "");
    }

    #[test]
    #[should_panic]
    fn test_zero_height_panics() {
        let _sl: SkipList<u32, u32> = SkipList::with_max_height(0);
    }

    #[test]
    fn test_prev_from_begin_reaches_head_and_stays() {
        let mut sl = SkipList::with_max_height(4);
        sl.insert(1, 'a');
        let head = sl.prev(sl.begin());
        assert_ne!(head, sl.end());
        assert!(sl.get(head).is_none());
        assert_eq!(sl.prev(head), head);
        assert_eq!(sl.next(head), sl.begin());
    }

    #[test]
    fn test_clear_resets_shape() {
        let mut sl = SkipList::with_options(Options::new().seed(3)).unwrap();
        for i in 0..100 {
            sl.insert(i, i);
        }
        let stale = sl.begin();
        sl.clear();
        assert!(sl.is_empty());
        assert_eq!(sl.len(), 0);
        assert_eq!(sl.height(), 0);
        assert!(sl.get(stale).is_none());

        sl.insert(5, 5);
        assert_eq!(sl.first(), Some((&5, &5)));
        assert_ne!(sl.begin(), stale);
    }

    #[test]
    fn test_stats_level_zero_counts_everything() {
        let mut sl = SkipList::with_options(Options::new().max_height(12).seed(11)).unwrap();
        for i in 0..500 {
            sl.insert(i, ());
        }
        let stats = sl.stats();
        assert_eq!(stats.len, 500);
        assert_eq!(stats.max_height, 12);
        assert_eq!(stats.nodes_per_level.len(), stats.height);
        assert_eq!(stats.nodes_per_level[0], 500);
        for pair in stats.nodes_per_level.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
    }

    #[test]
    fn test_debug_prints_in_order() {
        let sl: SkipList<i32, &str> = [(2, "b"), (1, "a")].into_iter().collect();
        assert_eq!(format!("{sl:?}"), r#"{1: "a", 2: "b"}"#);
    }
}
