//! # Firethorn Graphics
//!
//! Frame graph for Firethorn: a per-frame declarative scheduler for GPU work.
//!
//! Client code declares *passes* and the *virtual resources* each pass reads
//! and writes. The graph then determines which passes are actually needed to
//! produce the requested outputs, computes the lifetime of each resource
//! across the surviving passes, resolves each resource's cumulative usage
//! mask, and drives concrete resource creation/destruction tightly around the
//! passes that need them while invoking the execute callbacks in declaration
//! order.

pub mod backend;
pub mod graph;
pub mod profiling;
pub mod resources;
pub mod types;

pub use backend::{Driver, RenderTargetAllocation, RenderTargetId, ResourceAllocator, TextureId};
pub use graph::dependency::{DependencyGraph, Edge, EdgeId, NodeId};
pub use graph::target::{
    Attachments, RenderTarget, RenderTargetDescriptor, RenderTargetInfo, TargetFlags,
};
pub use graph::{
    Builder, FrameGraph, FrameGraphHandle, FrameGraphId, FrameGraphResource, FrameGraphResources,
    UsageFlags, Version,
};
pub use resources::Texture;
pub use types::{TextureDescriptor, TextureFormat, TextureSubResource, TextureUsage};

/// Graphics library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
