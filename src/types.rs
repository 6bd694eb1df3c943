use std::cmp::Ordering;

/// Decides the level-0 order of a [`SkipList`](crate::SkipList).
///
/// Entries are kept so that `compare(prev, next)` is never `Greater` along
/// level 0. Two keys are the same key iff `compare` returns `Equal`; this is
/// what find, equal-key runs and `erase_key` use, not `PartialEq`.
///
/// Any `Fn(&K, &K) -> Ordering` closure is a comparator.
pub trait Comparator<K: ?Sized> {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Smallest key first. The default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ascending;

/// Largest key first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Descending;

impl<K: Ord + ?Sized> Comparator<K> for Ascending {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K: Ord + ?Sized> Comparator<K> for Descending {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        b.cmp(a)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
