//! Texture descriptors and usage flags.

use bitflags::bitflags;

bitflags! {
    /// Usage flags for frame graph textures.
    ///
    /// Read and write declarations each carry one or more of these bits; the
    /// compile phase unions them into the mask the texture is created with.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextureUsage: u16 {
        /// Texture can be used as a color attachment.
        const COLOR_ATTACHMENT = 1 << 0;
        /// Texture can be used as a depth attachment.
        const DEPTH_ATTACHMENT = 1 << 1;
        /// Texture can be used as a stencil attachment.
        const STENCIL_ATTACHMENT = 1 << 2;
        /// Texture content can be uploaded from the CPU.
        const UPLOADABLE = 1 << 3;
        /// Texture can be sampled in a shader.
        const SAMPLEABLE = 1 << 4;
    }
}

impl Default for TextureUsage {
    fn default() -> Self {
        Self::empty()
    }
}

/// Texture pixel formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureFormat {
    /// 8-bit RGBA, unsigned normalized.
    #[default]
    Rgba8Unorm,
    /// 16-bit float RGBA.
    Rgba16Float,
    /// 16-bit unsigned integer, single channel.
    R16Uint,
    /// 32-bit float depth.
    Depth32Float,
    /// 24-bit depth with 8-bit stencil.
    Depth24Stencil8,
}

/// Descriptor for creating a texture.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureDescriptor {
    /// Width of the texture in pixels.
    pub width: u32,
    /// Height of the texture in pixels.
    pub height: u32,
    /// Number of images for 3D textures.
    pub depth: u32,
    /// Number of mip levels.
    pub levels: u8,
    /// Sample count; 1 requests no multisampling.
    pub samples: u8,
    /// Pixel format.
    pub format: TextureFormat,
}

impl Default for TextureDescriptor {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            depth: 1,
            levels: 1,
            samples: 1,
            format: TextureFormat::default(),
        }
    }
}

impl TextureDescriptor {
    /// Create a 2D texture descriptor.
    pub fn new_2d(width: u32, height: u32, format: TextureFormat) -> Self {
        Self {
            width,
            height,
            format,
            ..Self::default()
        }
    }
}

/// Describes a texture subresource relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureSubResource {
    /// Mip level within the parent.
    pub level: u8,
    /// Layer or cube face within the parent.
    pub layer: u8,
}
