//! Shared descriptor types.

mod texture;

pub use texture::{TextureDescriptor, TextureFormat, TextureSubResource, TextureUsage};
