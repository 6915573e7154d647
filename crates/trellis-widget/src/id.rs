//! Widget handles.

use std::fmt;

use serde::Serialize;

/// A handle to a widget in a [`WidgetTree`](crate::WidgetTree).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a widget is torn down and its slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WidgetId {
    /// Slot index into the tree's arena.
    pub(crate) idx: u32,
    /// Must match the tree's generation for this slot.
    pub(crate) generation: u32,
}

impl WidgetId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self { idx, generation }
    }

    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }

    pub(crate) const fn slot(self) -> usize {
        self.idx as usize
    }
}

impl fmt::Debug for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WidgetId({}@gen{})", self.idx, self.generation)
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}@gen{}", self.idx, self.generation)
    }
}
