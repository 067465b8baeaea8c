//! Memory management utilities

/// Per-frame arena for short-lived graphics objects
///
/// Allocations live until [`FrameArena::reset`] reclaims the whole frame at once;
/// there is no per-object free.
#[derive(Debug)]
pub struct FrameArena<T> {
    items: Vec<T>,
    frame: u64,
}

impl<T> FrameArena<T> {
    /// Create a new arena with room for `capacity` objects before it grows
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            frame: 0,
        }
    }

    /// Move `value` into the arena and return a reference valid for this frame
    pub fn alloc(&mut self, value: T) -> &mut T {
        self.items.push(value);
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    /// Number of objects allocated this frame
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing has been allocated this frame
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the current frame
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Bulk-reclaim every allocation and start the next frame
    pub fn reset(&mut self) {
        log::trace!("FrameArena: reclaiming {} objects from frame {}", self.items.len(), self.frame);
        self.items.clear();
        self.frame += 1;
    }
}

impl<T> Default for FrameArena<T> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
