//! Light registry
//!
//! A fixed-capacity pool of registration slots plus a doubly-linked list of the
//! active ones. Nodes are addressed by index; `prev`/`next` are indices into the
//! same pool, so there is no pointer arithmetic anywhere.
//!
//! # Slot policy
//!
//! Free slots are found with a circular search cursor. Acquiring moves the
//! cursor past the returned slot; releasing resets it to the freed slot, so the
//! most recently freed slot is reused first.
//!
//! # Ordering
//!
//! Inserts push to the front of the active list. Traversal is therefore
//! most-recently-inserted first, which is the order the binder admits lights in.

use crate::foundation::collections::LightInfoKey;

/// Default number of registration slots per scene
pub const DEFAULT_REGISTRY_CAPACITY: usize = 32;

/// Handle to an occupied registry slot
///
/// The generation counter makes handles to a slot that has since been released
/// (and possibly reused) inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightNodeHandle {
    index: u32,
    generation: u32,
}

impl LightNodeHandle {
    /// Pool index of the slot
    pub const fn index(&self) -> usize {
        self.index as usize
    }

    /// Generation of the slot when this handle was issued
    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone, Default)]
struct LightNode {
    info: Option<LightInfoKey>,
    prev: Option<usize>,
    next: Option<usize>,
    generation: u32,
}

/// Flat pool of registry nodes with a circular free-slot cursor
#[derive(Debug, Clone)]
pub struct LightNodePool {
    nodes: Vec<LightNode>,
    num_occupied: usize,
    search_index: usize,
}

impl LightNodePool {
    /// Create a pool with `capacity` slots
    pub fn new(capacity: usize) -> Self {
        Self {
            nodes: vec![LightNode::default(); capacity],
            num_occupied: 0,
            search_index: 0,
        }
    }

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.num_occupied
    }

    /// Whether no slot is occupied
    pub fn is_empty(&self) -> bool {
        self.num_occupied == 0
    }

    /// Whether every slot is occupied
    pub fn is_full(&self) -> bool {
        self.num_occupied >= self.nodes.len()
    }

    /// Index the next free-slot search starts from
    pub fn search_index(&self) -> usize {
        self.search_index
    }

    /// Occupy the next free slot with `info`
    ///
    /// Returns `None` when the pool is full; the caller goes without a slot.
    pub fn acquire_slot(&mut self, info: LightInfoKey) -> Option<LightNodeHandle> {
        if self.is_full() {
            log::debug!("LightNodePool: all {} slots occupied, light not registered", self.nodes.len());
            return None;
        }

        let capacity = self.nodes.len();
        let mut index = self.search_index;
        // Terminates: at least one slot is free
        while self.nodes[index].info.is_some() {
            index = (index + 1) % capacity;
        }

        let node = &mut self.nodes[index];
        node.info = Some(info);
        node.prev = None;
        node.next = None;

        self.num_occupied += 1;
        self.search_index = (index + 1) % capacity;

        Some(LightNodeHandle {
            index: index as u32,
            generation: node.generation,
        })
    }

    /// Free the slot behind `handle`
    ///
    /// Stale or out-of-range handles are ignored. Returns whether a slot was freed.
    pub fn release_slot(&mut self, handle: LightNodeHandle) -> bool {
        if !self.is_live(handle) {
            log::debug!("LightNodePool: ignoring release of stale handle {:?}", handle);
            return false;
        }

        let node = &mut self.nodes[handle.index()];
        node.info = None;
        node.prev = None;
        node.next = None;
        node.generation = node.generation.wrapping_add(1);

        self.num_occupied -= 1;
        self.search_index = handle.index();
        true
    }

    /// Whether `handle` refers to a currently occupied slot of this pool
    pub fn is_live(&self, handle: LightNodeHandle) -> bool {
        self.nodes
            .get(handle.index())
            .is_some_and(|node| node.info.is_some() && node.generation == handle.generation)
    }

    fn handle_at(&self, index: usize) -> LightNodeHandle {
        LightNodeHandle {
            index: index as u32,
            generation: self.nodes[index].generation,
        }
    }
}

/// Registry of active lights for one scene
#[derive(Debug, Clone)]
pub struct LightRegistry {
    pool: LightNodePool,
    head: Option<usize>,
}

impl LightRegistry {
    /// Create a registry with `capacity` slots
    pub fn new(capacity: usize) -> Self {
        Self {
            pool: LightNodePool::new(capacity),
            head: None,
        }
    }

    /// Register a descriptor at the front of the active list
    ///
    /// Returns `None` when the registry is full.
    pub fn insert(&mut self, info: LightInfoKey) -> Option<LightNodeHandle> {
        let handle = self.pool.acquire_slot(info)?;
        let index = handle.index();

        self.pool.nodes[index].next = self.head;
        if let Some(old_head) = self.head {
            self.pool.nodes[old_head].prev = Some(index);
        }
        self.head = Some(index);

        log::trace!("LightRegistry: inserted slot {} ({} active)", index, self.pool.len());
        Some(handle)
    }

    /// Unlink and free a registered light
    ///
    /// Stale handles are ignored. Returns whether a light was removed.
    pub fn remove(&mut self, handle: LightNodeHandle) -> bool {
        if !self.pool.is_live(handle) {
            log::debug!("LightRegistry: ignoring removal of stale handle {:?}", handle);
            return false;
        }

        let index = handle.index();
        let (prev, next) = {
            let node = &self.pool.nodes[index];
            (node.prev, node.next)
        };

        match prev {
            Some(prev) => self.pool.nodes[prev].next = next,
            None => self.head = next,
        }
        if let Some(next) = next {
            self.pool.nodes[next].prev = prev;
        }

        self.pool.release_slot(handle)
    }

    /// Remove every registered light
    pub fn clear(&mut self) {
        while let Some(head) = self.head {
            let handle = self.pool.handle_at(head);
            self.remove(handle);
        }
    }

    /// Handle of the most recently inserted light
    pub fn head(&self) -> Option<LightNodeHandle> {
        self.head.map(|index| self.pool.handle_at(index))
    }

    /// Descriptor key registered under `handle`
    pub fn info(&self, handle: LightNodeHandle) -> Option<LightInfoKey> {
        if self.pool.is_live(handle) {
            self.pool.nodes[handle.index()].info
        } else {
            None
        }
    }

    /// Number of registered lights
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// Whether no light is registered
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of slots
    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Underlying slot pool
    pub fn pool(&self) -> &LightNodePool {
        &self.pool
    }

    /// Walk the active list from most to least recently inserted
    pub fn iter(&self) -> ActiveLights<'_> {
        ActiveLights {
            pool: &self.pool,
            cursor: self.head,
        }
    }
}

impl Default for LightRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY_CAPACITY)
    }
}

impl<'a> IntoIterator for &'a LightRegistry {
    type Item = (LightNodeHandle, LightInfoKey);
    type IntoIter = ActiveLights<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the active list, head to tail
pub struct ActiveLights<'a> {
    pool: &'a LightNodePool,
    cursor: Option<usize>,
}

impl Iterator for ActiveLights<'_> {
    type Item = (LightNodeHandle, LightInfoKey);

    fn next(&mut self) -> Option<Self::Item> {
        // Linked nodes are always occupied, so a `None` info ends the walk
        let index = self.cursor?;
        let node = &self.pool.nodes[index];
        let info = node.info?;
        self.cursor = node.next;
        Some((self.pool.handle_at(index), info))
    }
}
