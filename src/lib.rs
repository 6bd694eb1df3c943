//! # Skip List Engine
//!
//! An in-memory ordered multimap built as a doubly linked skip list: the
//! kind of index a storage engine keeps as its memtable.
//!
//! ## Core idea
//! Every entry is a tower of random height. Level 0 links all entries in
//! order; each higher level links a random half of the level below, so a
//! search skips most of the list and costs O(log n) on average. No
//! rebalancing is ever needed, which keeps writes cheap.
//!
//! ```
//! use skiplist_engine::SkipList;
//!
//! let mut sl = SkipList::with_max_height(8);
//! sl.insert(3, "c");
//! sl.insert(1, "a");
//! sl.insert(2, "b");
//!
//! let keys: Vec<_> = sl.iter().map(|(k, _)| *k).collect();
//! assert_eq!(keys, [1, 2, 3]);
//! assert_eq!(sl.get(sl.find(&2)), Some((&2, &"b")));
//! assert_eq!(sl.find(&5), sl.end());
//! ```
//!
//! ## Threading
//! Single writer, no internal locking. Wrap the list in a lock to share it.

pub mod error;
pub mod options;
pub mod skiplist;
pub mod types;

// Public re-exports for the top-level API
pub use error::{Error, Result};
pub use options::{DEFAULT_MAX_HEIGHT, MAX_HEIGHT_LIMIT, Options};
pub use skiplist::{Cursor, Iter, SkipList, Stats};
pub use types::{Ascending, Comparator, Descending};
