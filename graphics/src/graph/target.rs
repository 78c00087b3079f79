//! Render target declarations for render passes.
//!
//! A pass declares a render target over a set of attachment handles; the
//! declaration is implemented as a write on each attachment with the
//! attachment-specific usage bit. The concrete target is created right
//! before the pass executes and destroyed right after, with discard flags
//! derived from the dependency graph (see
//! [`Builder::declare_render_target`](crate::Builder::declare_render_target)).

use bitflags::bitflags;

use crate::backend::RenderTargetId;
use crate::graph::handle::FrameGraphId;
use crate::resources::Texture;
use crate::types::TextureUsage;

/// Number of color attachment slots.
pub const MAX_COLOR_ATTACHMENTS: usize = 4;

/// Total attachment slots: colors, then depth, then stencil.
pub(crate) const MAX_ATTACHMENTS: usize = MAX_COLOR_ATTACHMENTS + 2;

pub(crate) const DEPTH_SLOT: usize = MAX_COLOR_ATTACHMENTS;
pub(crate) const STENCIL_SLOT: usize = MAX_COLOR_ATTACHMENTS + 1;

bitflags! {
    /// Per-attachment flags of a render target.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TargetFlags: u8 {
        /// Color attachment 0.
        const COLOR0 = 1 << 0;
        /// Color attachment 1.
        const COLOR1 = 1 << 1;
        /// Color attachment 2.
        const COLOR2 = 1 << 2;
        /// Color attachment 3.
        const COLOR3 = 1 << 3;
        /// Depth attachment.
        const DEPTH = 1 << 4;
        /// Stencil attachment.
        const STENCIL = 1 << 5;
        /// All color attachments.
        const COLOR = Self::COLOR0.bits()
            | Self::COLOR1.bits()
            | Self::COLOR2.bits()
            | Self::COLOR3.bits();
        /// Every attachment.
        const ALL = Self::COLOR.bits() | Self::DEPTH.bits() | Self::STENCIL.bits();
    }
}

impl Default for TargetFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Flag for an attachment slot index (colors first, then depth, stencil).
pub(crate) fn slot_flag(slot: usize) -> TargetFlags {
    debug_assert!(slot < MAX_ATTACHMENTS);
    TargetFlags::from_bits_truncate(1 << slot)
}

/// Write usage carried by the attachment at `slot`.
pub(crate) fn slot_usage(slot: usize) -> TextureUsage {
    match slot {
        DEPTH_SLOT => TextureUsage::DEPTH_ATTACHMENT,
        STENCIL_SLOT => TextureUsage::STENCIL_ATTACHMENT,
        _ => TextureUsage::COLOR_ATTACHMENT,
    }
}

/// Attachment handles of a render target declaration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Attachments {
    /// Color attachments, per slot.
    pub color: [Option<FrameGraphId<Texture>>; MAX_COLOR_ATTACHMENTS],
    /// Depth attachment.
    pub depth: Option<FrameGraphId<Texture>>,
    /// Stencil attachment.
    pub stencil: Option<FrameGraphId<Texture>>,
}

impl Attachments {
    /// Attachments with a single color at slot 0.
    pub fn new_color(color: FrameGraphId<Texture>) -> Self {
        Self::default().with_color(0, color)
    }

    /// Set the color attachment at `slot`.
    pub fn with_color(mut self, slot: usize, color: FrameGraphId<Texture>) -> Self {
        self.color[slot] = Some(color);
        self
    }

    /// Set the depth attachment.
    pub fn with_depth(mut self, depth: FrameGraphId<Texture>) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Set the stencil attachment.
    pub fn with_stencil(mut self, stencil: FrameGraphId<Texture>) -> Self {
        self.stencil = Some(stencil);
        self
    }

    pub(crate) fn slot(&self, slot: usize) -> Option<FrameGraphId<Texture>> {
        match slot {
            DEPTH_SLOT => self.depth,
            STENCIL_SLOT => self.stencil,
            _ => self.color[slot],
        }
    }

    pub(crate) fn set_slot(&mut self, slot: usize, id: FrameGraphId<Texture>) {
        match slot {
            DEPTH_SLOT => self.depth = Some(id),
            STENCIL_SLOT => self.stencil = Some(id),
            _ => self.color[slot] = Some(id),
        }
    }
}

/// Descriptor for declaring a render target on a pass.
#[derive(Debug, Clone, Default)]
pub struct RenderTargetDescriptor {
    /// The attachment handles.
    pub attachments: Attachments,
    /// Sample count; 1 requests no multisampling.
    pub samples: u8,
}

impl RenderTargetDescriptor {
    /// Descriptor with the given attachments and no multisampling.
    pub fn new(attachments: Attachments) -> Self {
        Self {
            attachments,
            samples: 1,
        }
    }

    /// Set the sample count.
    pub fn with_samples(mut self, samples: u8) -> Self {
        self.samples = samples;
        self
    }
}

/// Result of declaring a render target.
///
/// All attachment handles have received new versions; the old handles are no
/// longer valid. `id` retrieves the concrete target in the execute phase via
/// [`FrameGraphResources::render_target`](crate::FrameGraphResources::render_target).
#[derive(Debug, Clone, Copy)]
pub struct RenderTarget {
    /// Post-write attachment handles.
    pub attachments: Attachments,
    /// Id of this declaration within the pass.
    pub id: u32,
}

/// Execute-phase view of a declared render target.
#[derive(Debug, Clone, Copy)]
pub struct RenderTargetInfo {
    /// The concrete render target; present while the declaring pass runs.
    pub target: Option<RenderTargetId>,
    /// Attachments whose previous content may be discarded at pass start.
    pub discard_start: TargetFlags,
    /// Attachments whose content may be discarded at pass end.
    pub discard_end: TargetFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_flags() {
        assert_eq!(slot_flag(0), TargetFlags::COLOR0);
        assert_eq!(slot_flag(3), TargetFlags::COLOR3);
        assert_eq!(slot_flag(DEPTH_SLOT), TargetFlags::DEPTH);
        assert_eq!(slot_flag(STENCIL_SLOT), TargetFlags::STENCIL);
    }

    #[test]
    fn test_slot_usage() {
        assert_eq!(slot_usage(0), TextureUsage::COLOR_ATTACHMENT);
        assert_eq!(slot_usage(2), TextureUsage::COLOR_ATTACHMENT);
        assert_eq!(slot_usage(DEPTH_SLOT), TextureUsage::DEPTH_ATTACHMENT);
        assert_eq!(slot_usage(STENCIL_SLOT), TextureUsage::STENCIL_ATTACHMENT);
    }

    #[test]
    fn test_attachments_slot_access() {
        let color = FrameGraphId::default();
        let depth = FrameGraphId::default();
        let attachments = Attachments::new_color(color).with_depth(depth);

        assert_eq!(attachments.slot(0), Some(color));
        assert_eq!(attachments.slot(1), None);
        assert_eq!(attachments.slot(DEPTH_SLOT), Some(depth));
        assert_eq!(attachments.slot(STENCIL_SLOT), None);
    }

    #[test]
    fn test_color_flags_cover_all_slots() {
        let mut flags = TargetFlags::empty();
        for slot in 0..MAX_COLOR_ATTACHMENTS {
            flags |= slot_flag(slot);
        }
        assert_eq!(flags, TargetFlags::COLOR);
    }
}
