//! The texture resource kind.

use crate::backend::{ResourceAllocator, TextureId};
use crate::graph::FrameGraphResource;
use crate::types::{TextureDescriptor, TextureSubResource, TextureUsage};

/// A frame graph texture.
///
/// The concrete backend texture is only present between devirtualize and
/// destroy; outside that window `texture` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Texture {
    /// Concrete backend texture, when instantiated.
    pub texture: Option<TextureId>,
}

impl FrameGraphResource for Texture {
    type Descriptor = TextureDescriptor;
    type SubResourceDescriptor = TextureSubResource;
    type Usage = TextureUsage;

    fn create(
        &mut self,
        allocator: &mut dyn ResourceAllocator,
        name: &str,
        descriptor: &Self::Descriptor,
        usage: Self::Usage,
    ) {
        self.texture = Some(allocator.create_texture(name, descriptor, usage));
    }

    fn destroy(&mut self, allocator: &mut dyn ResourceAllocator) {
        if let Some(texture) = self.texture.take() {
            allocator.destroy_texture(texture);
        }
    }
}
