//! Backend abstraction consumed by the frame graph.
//!
//! The frame graph never talks to a GPU API directly. Concrete resource
//! creation and destruction go through [`ResourceAllocator`], and the
//! execute phase frames its work with [`Driver`] group markers. Both traits
//! are intentionally small; a real renderer implements them on top of its
//! device layer, and [`dummy`] provides no-op implementations for tests and
//! development.

pub mod dummy;

use std::fmt;

use crate::graph::target::TargetFlags;
use crate::types::{TextureDescriptor, TextureUsage};

/// Opaque handle to a concrete backend texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(u32);

impl TextureId {
    /// Wrap a backend-chosen id.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// The backend-chosen id.
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "texture#{}", self.0)
    }
}

/// Opaque handle to a concrete backend render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTargetId(u32);

impl RenderTargetId {
    /// Wrap a backend-chosen id.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// The backend-chosen id.
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Concrete attachments for a render target about to be created.
///
/// Built by the execute phase from the devirtualized attachment textures of
/// a pass's render-target declaration.
#[derive(Debug, Clone, Default)]
pub struct RenderTargetAllocation {
    /// Concrete color attachments, per slot.
    pub color: [Option<TextureId>; crate::graph::target::MAX_COLOR_ATTACHMENTS],
    /// Concrete depth attachment.
    pub depth: Option<TextureId>,
    /// Concrete stencil attachment.
    pub stencil: Option<TextureId>,
    /// Sample count.
    pub samples: u8,
    /// Attachments whose previous content may be discarded when the pass
    /// begins.
    pub discard_start: TargetFlags,
    /// Attachments whose content may be discarded when the pass ends.
    pub discard_end: TargetFlags,
}

/// Creates and destroys concrete GPU resources on behalf of the frame graph.
///
/// Implementations may pool: `create_texture` for a descriptor/usage pair
/// that was destroyed earlier in the frame is free to hand the same object
/// back.
pub trait ResourceAllocator {
    /// Create a concrete texture.
    fn create_texture(
        &mut self,
        name: &str,
        descriptor: &TextureDescriptor,
        usage: TextureUsage,
    ) -> TextureId;

    /// Destroy a concrete texture.
    fn destroy_texture(&mut self, texture: TextureId);

    /// Create a concrete render target from devirtualized attachments.
    fn create_render_target(
        &mut self,
        name: &str,
        allocation: &RenderTargetAllocation,
    ) -> RenderTargetId;

    /// Destroy a concrete render target.
    fn destroy_render_target(&mut self, target: RenderTargetId);
}

/// Command-stream hooks used by the execute phase.
///
/// Pass callbacks receive the driver directly and are expected to record
/// their commands synchronously; the frame graph itself only uses the
/// framing hooks below.
pub trait Driver {
    /// Open a named debug group.
    fn push_group_marker(&mut self, name: &str);

    /// Close the innermost debug group.
    fn pop_group_marker(&mut self);

    /// Kick the GPU; called once after all passes have executed.
    fn flush(&mut self);
}
