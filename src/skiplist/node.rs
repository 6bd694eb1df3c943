/// Arena slot of the head sentinel. Never freed.
pub(crate) const HEAD: usize = 0;
/// Arena slot of the tail sentinel. Never freed.
pub(crate) const TAIL: usize = 1;

/// Neighbors of a node at one level, as arena indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Link {
    pub(crate) next: usize,
    pub(crate) prev: usize,
}

/// One tower in the list.
///
/// `links[i]` are the level-`i` neighbors, so `links.len()` is the height.
/// The slice is sized once at creation and never resized. Sentinels carry
/// no entry.
#[derive(Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) entry: Option<(K, V)>,
    pub(crate) links: Box<[Link]>,
}

#[derive(Debug)]
struct Slot<K, V> {
    generation: u32,
    node: Option<Node<K, V>>,
}

/// Owns every node of one list, addressed by index.
///
/// ```text
///  slots: [HEAD][TAIL][ n2 ][ -- ][ n4 ] ...
///                       ▲     ▲
///                       │     └── vacant, index on the free list
///                       └──────── live, reachable from HEAD on level 0
/// ```
///
/// Freeing a slot bumps its generation, so a stale `(index, generation)`
/// pair can be told apart from whatever reuses the slot later.
#[derive(Debug)]
pub(crate) struct Arena<K, V> {
    slots: Vec<Slot<K, V>>,
    free: Vec<usize>,
}

impl<K, V> Arena<K, V> {
    /// Create an arena holding only the two sentinels, each `max_height` tall
    /// and linked to each other on every level.
    pub(crate) fn new(max_height: usize) -> Self {
        let sentinel = || Node {
            entry: None,
            links: vec![Link { next: TAIL, prev: HEAD }; max_height].into_boxed_slice(),
        };
        Arena {
            slots: vec![
                Slot { generation: 0, node: Some(sentinel()) },
                Slot { generation: 0, node: Some(sentinel()) },
            ],
            free: Vec::new(),
        }
    }

    /// Store a new, still unlinked, node of the given height.
    pub(crate) fn alloc(&mut self, key: K, value: V, height: usize) -> usize {
        let node = Node {
            entry: Some((key, value)),
            links: vec![Link { next: TAIL, prev: HEAD }; height].into_boxed_slice(),
        };
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx].node = Some(node);
                idx
            }
            None => {
                self.slots.push(Slot { generation: 0, node: Some(node) });
                self.slots.len() - 1
            }
        }
    }

    /// Free an unlinked node and hand back its entry.
    pub(crate) fn release(&mut self, idx: usize) -> Option<(K, V)> {
        debug_assert!(idx != HEAD && idx != TAIL, "sentinels are never released");
        let slot = &mut self.slots[idx];
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(idx);
        node.entry
    }

    /// Generation of a live slot, `None` if the index is out of range or vacant.
    pub(crate) fn generation(&self, idx: usize) -> Option<u32> {
        let slot = self.slots.get(idx)?;
        slot.node.as_ref().map(|_| slot.generation)
    }

    pub(crate) fn node(&self, idx: usize) -> &Node<K, V> {
        match &self.slots[idx].node {
            Some(node) => node,
            None => unreachable!("slot {idx} is vacant but still referenced"),
        }
    }

    pub(crate) fn node_mut(&mut self, idx: usize) -> &mut Node<K, V> {
        match &mut self.slots[idx].node {
            Some(node) => node,
            None => unreachable!("slot {idx} is vacant but still referenced"),
        }
    }

    #[inline]
    pub(crate) fn height(&self, idx: usize) -> usize {
        self.node(idx).links.len()
    }

    #[inline]
    pub(crate) fn next(&self, idx: usize, level: usize) -> usize {
        self.node(idx).links[level].next
    }

    #[inline]
    pub(crate) fn prev(&self, idx: usize, level: usize) -> usize {
        self.node(idx).links[level].prev
    }

    /// Key of a real node. Sentinels have none.
    #[inline]
    pub(crate) fn key(&self, idx: usize) -> Option<&K> {
        self.node(idx).entry.as_ref().map(|(k, _)| k)
    }

    /// Link `new` directly after `pred` on `level`.
    pub(crate) fn splice_after(&mut self, pred: usize, new: usize, level: usize) {
        let succ = self.next(pred, level);
        self.node_mut(new).links[level] = Link { next: succ, prev: pred };
        self.node_mut(pred).links[level].next = new;
        self.node_mut(succ).links[level].prev = new;
    }

    /// Bypass `idx` on every level it occupies. The node itself is left as is.
    pub(crate) fn unlink(&mut self, idx: usize) {
        for level in 0..self.height(idx) {
            let Link { next, prev } = self.node(idx).links[level];
            self.node_mut(prev).links[level].next = next;
            self.node_mut(next).links[level].prev = prev;
        }
    }

    /// Point every sentinel level back at the other sentinel.
    pub(crate) fn reset_sentinels(&mut self) {
        for link in self.node_mut(HEAD).links.iter_mut() {
            link.next = TAIL;
        }
        for link in self.node_mut(TAIL).links.iter_mut() {
            link.prev = HEAD;
        }
    }
}
