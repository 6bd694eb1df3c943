use std::cmp::Ordering;

use super::node::{HEAD, TAIL};
use super::search::Stop;
use super::{Cursor, SkipList};
use crate::error::{Error, Result};
use crate::types::Comparator;

impl<K, V, C: Comparator<K>> SkipList<K, V, C> {
    /// Remove the entry under `cursor` and return a cursor to its successor.
    ///
    /// Fails with [`Error::InvalidIterator`] for sentinels and for cursors
    /// whose node is already gone; the list is left untouched in that case.
    pub fn erase(&mut self, cursor: Cursor) -> Result<Cursor> {
        self.remove(cursor).map(|(next, _)| next)
    }

    /// Like [`erase`](Self::erase), but also hands back the removed entry.
    pub fn remove(&mut self, cursor: Cursor) -> Result<(Cursor, (K, V))> {
        if cursor.slot == HEAD || cursor.slot == TAIL || !self.is_live(cursor) {
            return Err(Error::InvalidIterator);
        }
        let next = self.arena.next(cursor.slot, 0);
        let entry = self.unlink_and_release(cursor.slot)?;
        Ok((self.cursor(next), entry))
    }

    /// Remove every entry whose key equals `key`. Returns how many went.
    ///
    /// O(log n) to reach the equal-key run plus O(k) for k matches.
    pub fn erase_key(&mut self, key: &K) -> usize {
        let mut at = self.arena.next(self.rest(key, Stop::Before), 0);
        let mut removed = 0;
        while at != TAIL && self.cmp_node(at, key) == Ordering::Equal {
            let next = self.arena.next(at, 0);
            if self.unlink_and_release(at).is_ok() {
                removed += 1;
            }
            at = next;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(removed, "erased equal-key run");
        removed
    }

    fn unlink_and_release(&mut self, idx: usize) -> Result<(K, V)> {
        self.arena.unlink(idx);
        let entry = self.arena.release(idx).ok_or(Error::InvalidIterator)?;
        self.len -= 1;
        Ok(entry)
    }
}
