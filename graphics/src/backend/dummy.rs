//! Dummy backend for testing and development.
//!
//! [`DummyAllocator`] and [`DummyDriver`] don't perform actual GPU
//! operations but provide valid implementations of the backend traits for
//! exercising the frame graph without GPU hardware.

use super::{Driver, RenderTargetAllocation, RenderTargetId, ResourceAllocator, TextureId};
use crate::types::{TextureDescriptor, TextureUsage};

/// Dummy resource allocator.
///
/// Hands out sequential ids and keeps a live count so tests can assert
/// balanced create/destroy.
#[derive(Debug, Default)]
pub struct DummyAllocator {
    next_id: u32,
    live_textures: u32,
    live_render_targets: u32,
}

impl DummyAllocator {
    /// Create a new dummy allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of textures currently alive.
    pub fn live_textures(&self) -> u32 {
        self.live_textures
    }

    /// Number of render targets currently alive.
    pub fn live_render_targets(&self) -> u32 {
        self.live_render_targets
    }
}

impl ResourceAllocator for DummyAllocator {
    fn create_texture(
        &mut self,
        name: &str,
        descriptor: &TextureDescriptor,
        usage: TextureUsage,
    ) -> TextureId {
        self.next_id += 1;
        self.live_textures += 1;
        log::trace!(
            "DummyAllocator: creating texture '{}' ({}x{}, {:?})",
            name,
            descriptor.width,
            descriptor.height,
            usage
        );
        TextureId::new(self.next_id)
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        self.live_textures -= 1;
        log::trace!("DummyAllocator: destroying {texture}");
    }

    fn create_render_target(
        &mut self,
        name: &str,
        allocation: &RenderTargetAllocation,
    ) -> RenderTargetId {
        self.next_id += 1;
        self.live_render_targets += 1;
        log::trace!(
            "DummyAllocator: creating render target '{}' (discard start {:?}, end {:?})",
            name,
            allocation.discard_start,
            allocation.discard_end
        );
        RenderTargetId::new(self.next_id)
    }

    fn destroy_render_target(&mut self, target: RenderTargetId) {
        self.live_render_targets -= 1;
        log::trace!("DummyAllocator: destroying render target #{}", target.raw());
    }
}

/// Dummy driver.
///
/// Tracks group-marker nesting so tests can assert balanced push/pop.
#[derive(Debug, Default)]
pub struct DummyDriver {
    depth: u32,
    flushes: u32,
}

impl DummyDriver {
    /// Create a new dummy driver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current group-marker nesting depth.
    pub fn marker_depth(&self) -> u32 {
        self.depth
    }

    /// Number of times the driver was flushed.
    pub fn flushes(&self) -> u32 {
        self.flushes
    }
}

impl Driver for DummyDriver {
    fn push_group_marker(&mut self, name: &str) {
        self.depth += 1;
        log::trace!("DummyDriver: push group '{name}'");
    }

    fn pop_group_marker(&mut self) {
        assert!(self.depth > 0, "pop_group_marker without matching push");
        self.depth -= 1;
    }

    fn flush(&mut self) {
        self.flushes += 1;
        log::trace!("DummyDriver: flush");
    }
}
