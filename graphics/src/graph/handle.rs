//! Resource handles and the slot table behind them.
//!
//! A handle is an opaque `{ index, version }` pair. The index points into the
//! frame graph's slot table and is never reused within a frame; the version
//! increments on every write, so a handle held across a write to the same
//! resource observably goes stale. [`FrameGraphId`] layers a zero-cost
//! resource-kind tag on top.

use std::fmt;
use std::marker::PhantomData;

use crate::graph::resource::FrameGraphResource;

/// Monotonic write counter carried by handles and resources.
///
/// Versions may wrap within a frame; validity is a slot lookup plus an
/// equality compare, never an ordering compare.
pub type Version = u16;

const INVALID_INDEX: u32 = u32::MAX;

/// Untyped handle to a virtual resource.
///
/// The default value is the uninitialized sentinel; every API that accepts a
/// handle asserts it was produced by this frame's builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameGraphHandle {
    index: u32,
    version: Version,
}

impl FrameGraphHandle {
    pub(crate) fn new(index: u32) -> Self {
        Self { index, version: 0 }
    }

    /// Slot index this handle refers to.
    pub fn index(self) -> u32 {
        self.index
    }

    /// Version this handle was issued at.
    pub fn version(self) -> Version {
        self.version
    }

    /// Whether the handle was ever assigned by a builder.
    ///
    /// An initialized handle may still be stale; see
    /// [`FrameGraph::is_valid`](crate::FrameGraph::is_valid).
    pub fn is_initialized(self) -> bool {
        self.index != INVALID_INDEX
    }

    /// Same slot, next version. Used after a write to an already-written
    /// resource.
    pub(crate) fn next_version(self) -> Self {
        Self {
            index: self.index,
            version: self.version.wrapping_add(1),
        }
    }
}

impl Default for FrameGraphHandle {
    fn default() -> Self {
        Self {
            index: INVALID_INDEX,
            version: 0,
        }
    }
}

/// Typed handle to a virtual resource of kind `R`.
///
/// `Copy` and cheap to move around; pass data structs are expected to hold
/// these by value.
pub struct FrameGraphId<R: FrameGraphResource> {
    handle: FrameGraphHandle,
    _kind: PhantomData<fn() -> R>,
}

impl<R: FrameGraphResource> FrameGraphId<R> {
    pub(crate) fn new(handle: FrameGraphHandle) -> Self {
        Self {
            handle,
            _kind: PhantomData,
        }
    }

    /// The untyped handle underneath.
    pub fn handle(self) -> FrameGraphHandle {
        self.handle
    }

    /// Whether the handle was ever assigned by a builder.
    pub fn is_initialized(self) -> bool {
        self.handle.is_initialized()
    }
}

// Manual impls: the derives would demand bounds on `R` that the phantom tag
// does not actually require.
impl<R: FrameGraphResource> Clone for FrameGraphId<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: FrameGraphResource> Copy for FrameGraphId<R> {}

impl<R: FrameGraphResource> Default for FrameGraphId<R> {
    fn default() -> Self {
        Self::new(FrameGraphHandle::default())
    }
}

impl<R: FrameGraphResource> PartialEq for FrameGraphId<R> {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl<R: FrameGraphResource> Eq for FrameGraphId<R> {}

impl<R: FrameGraphResource> fmt::Debug for FrameGraphId<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.handle.is_initialized() {
            write!(f, "FrameGraphId({}.v{})", self.handle.index(), self.handle.version())
        } else {
            write!(f, "FrameGraphId(invalid)")
        }
    }
}

impl<R: FrameGraphResource> From<FrameGraphId<R>> for FrameGraphHandle {
    fn from(id: FrameGraphId<R>) -> Self {
        id.handle
    }
}

/// Indirection from a handle index to the current (resource, node) pair.
///
/// `node_index` is overwritten when the resource is written to, redirecting
/// subsequent reads to the newest version node.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResourceSlot {
    /// Index into the frame graph's resource table.
    pub resource_index: u32,
    /// Index into the frame graph's resource-node table.
    pub node_index: u32,
}
