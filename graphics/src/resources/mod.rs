//! Built-in resource kinds.

mod texture;

pub use texture::Texture;
