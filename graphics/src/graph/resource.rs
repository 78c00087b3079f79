//! Virtual resources and their typed state.
//!
//! A *virtual* resource is a declared resource before concrete backend
//! allocation. The generic, kind-independent part ([`ResourceInfo`]) is what
//! the compile phase manipulates: reference counts, the current version, and
//! the first/last user passes. The typed part ([`ResourceEntry`]) carries the
//! descriptor, the aggregated usage mask, the concrete resource (valid only
//! between devirtualize and destroy), and the usage payload of every edge the
//! resource has minted.
//!
//! Edge payload ownership mirrors the dependency structure: the base
//! `{from, to}` edge lives in the [`DependencyGraph`], while the typed usage
//! attached to it is owned by the resource that created the edge, keyed by
//! [`EdgeId`]. Downcasts to the typed entry only happen on paths where the
//! resource kind is known by construction (the builder call that minted the
//! handle).

use std::any::Any;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::backend::ResourceAllocator;
use crate::graph::dependency::{DependencyGraph, EdgeId};
use crate::graph::handle::Version;

/// Bitmask capability required of a resource kind's usage type.
///
/// Satisfied by any `bitflags`-style mask; the blanket impl below picks up
/// every type with the right operator surface.
pub trait UsageFlags:
    Copy + Default + PartialEq + BitOr<Output = Self> + BitOrAssign + fmt::Debug + 'static
{
}

impl<T> UsageFlags for T where
    T: Copy + Default + PartialEq + BitOr<Output = T> + BitOrAssign + fmt::Debug + 'static
{
}

/// A resource kind usable in the frame graph.
///
/// A kind declares its descriptor types and usage mask, and knows how to
/// create and destroy its concrete backend object through the
/// [`ResourceAllocator`]. The implementing type *is* the concrete resource;
/// its `Default` value represents "not yet devirtualized".
pub trait FrameGraphResource: Default + 'static {
    /// Describes the resource for creation (dimensions, format, ...).
    type Descriptor: Clone + fmt::Debug + 'static;
    /// Describes a subresource relative to its parent (mip level, layer, ...).
    type SubResourceDescriptor: Clone + Default + fmt::Debug + 'static;
    /// Usage bitmask aggregated across all surviving edges.
    type Usage: UsageFlags;

    /// Instantiate the concrete backend object.
    fn create(
        &mut self,
        allocator: &mut dyn ResourceAllocator,
        name: &str,
        descriptor: &Self::Descriptor,
        usage: Self::Usage,
    );

    /// Destroy the concrete backend object.
    fn destroy(&mut self, allocator: &mut dyn ResourceAllocator);
}

/// Kind-independent state of a virtual resource.
#[derive(Debug)]
pub(crate) struct ResourceInfo {
    /// Resource name, for debugging and graphing.
    pub name: String,
    /// Dense id, for debugging and graphing.
    pub id: u16,
    /// Externally owned; the graph never creates or destroys it.
    pub imported: bool,
    /// Version of the newest resource node bound to this resource.
    pub version: Version,
    /// Resource-level reference count, accumulated during compile.
    pub refcount: u32,
    /// First surviving pass (declaration index) that touches this resource.
    pub first: Option<usize>,
    /// Last surviving pass (declaration index) that touches this resource.
    pub last: Option<usize>,
    /// Parent resource index, for subresources.
    pub parent: Option<usize>,
}

impl ResourceInfo {
    fn new(name: &str, id: u16) -> Self {
        Self {
            name: name.to_string(),
            id,
            imported: false,
            version: 0,
            refcount: 0,
            first: None,
            last: None,
            parent: None,
        }
    }
}

/// Object-safe view of a virtual resource, independent of its kind.
pub(crate) trait VirtualResource {
    fn info(&self) -> &ResourceInfo;
    fn info_mut(&mut self) -> &mut ResourceInfo;

    /// Accumulate usage from the given edges, ignoring edges with a culled
    /// endpoint. Called during compile, once with a node's reader edges and
    /// once with its writer edge.
    fn resolve_usage(&mut self, graph: &DependencyGraph, edges: &[EdgeId]);

    /// Instantiate the concrete resource. Exactly once per surviving
    /// resource, before its first user pass executes.
    fn devirtualize(&mut self, allocator: &mut dyn ResourceAllocator);

    /// Destroy the concrete resource. Exactly once, after the last user pass.
    fn destroy(&mut self, allocator: &mut dyn ResourceAllocator);

    /// Debug rendering of the aggregated usage mask.
    fn usage_string(&self) -> String;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Typed state of a virtual resource of kind `R`.
pub(crate) struct ResourceEntry<R: FrameGraphResource> {
    info: ResourceInfo,
    descriptor: R::Descriptor,
    #[allow(dead_code)]
    sub_descriptor: R::SubResourceDescriptor,
    /// Union of all surviving edge usages; valid after resolve_usage.
    usage: R::Usage,
    /// The concrete resource; valid only between devirtualize and destroy.
    resource: R,
    /// For imported resources, the usage the owner declared permissible.
    allowed_usage: Option<R::Usage>,
    /// Usage payload of every edge this resource minted, keyed by edge id.
    edge_usages: Vec<(EdgeId, R::Usage)>,
    devirtualized: bool,
}

impl<R: FrameGraphResource> ResourceEntry<R> {
    pub fn new(name: &str, id: u16, descriptor: R::Descriptor) -> Self {
        Self {
            info: ResourceInfo::new(name, id),
            descriptor,
            sub_descriptor: R::SubResourceDescriptor::default(),
            usage: R::Usage::default(),
            resource: R::default(),
            allowed_usage: None,
            edge_usages: Vec::new(),
            devirtualized: false,
        }
    }

    pub fn new_subresource(
        name: &str,
        id: u16,
        descriptor: R::Descriptor,
        sub_descriptor: R::SubResourceDescriptor,
        parent: usize,
    ) -> Self {
        let mut entry = Self::new(name, id, descriptor);
        entry.sub_descriptor = sub_descriptor;
        entry.info.parent = Some(parent);
        entry
    }

    pub fn new_imported(
        name: &str,
        id: u16,
        descriptor: R::Descriptor,
        allowed_usage: R::Usage,
        resource: R,
    ) -> Self {
        let mut entry = Self::new(name, id, descriptor);
        entry.info.imported = true;
        entry.allowed_usage = Some(allowed_usage);
        entry.resource = resource;
        entry
    }

    pub fn descriptor(&self) -> &R::Descriptor {
        &self.descriptor
    }

    pub fn usage(&self) -> R::Usage {
        self.usage
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    /// Remember the usage attached to an edge this resource minted.
    pub fn record_edge_usage(&mut self, edge: EdgeId, usage: R::Usage) {
        self.edge_usages.push((edge, usage));
    }

    fn edge_usage(&self, edge: EdgeId) -> R::Usage {
        self.edge_usages
            .iter()
            .find(|(id, _)| *id == edge)
            .map(|(_, usage)| *usage)
            .unwrap_or_default()
    }
}

impl<R: FrameGraphResource> VirtualResource for ResourceEntry<R> {
    fn info(&self) -> &ResourceInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut ResourceInfo {
        &mut self.info
    }

    fn resolve_usage(&mut self, graph: &DependencyGraph, edges: &[EdgeId]) {
        for &edge in edges {
            if graph.is_edge_valid(graph.edge(edge)) {
                let usage = self.edge_usage(edge);
                self.usage |= usage;
            }
        }
    }

    fn devirtualize(&mut self, allocator: &mut dyn ResourceAllocator) {
        debug_assert!(!self.devirtualized, "resource devirtualized twice");
        self.devirtualized = true;
        if self.info.imported {
            // The owner told us what the resource supports; exceeding that
            // is a contract violation.
            let allowed = self.allowed_usage.unwrap_or_default();
            assert!(
                allowed | self.usage == allowed,
                "imported resource '{}' used as {:?} but only {:?} was declared",
                self.info.name,
                self.usage,
                allowed
            );
            return;
        }
        self.resource
            .create(allocator, &self.info.name, &self.descriptor, self.usage);
    }

    fn destroy(&mut self, allocator: &mut dyn ResourceAllocator) {
        if self.info.imported {
            return;
        }
        self.resource.destroy(allocator);
    }

    fn usage_string(&self) -> String {
        format!("{:?}", self.usage)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::dummy::DummyAllocator;
    use crate::graph::dependency::{DependencyGraph, Edge};
    use crate::resources::Texture;
    use crate::types::{TextureDescriptor, TextureUsage};

    fn entry() -> ResourceEntry<Texture> {
        ResourceEntry::new("test", 0, TextureDescriptor::default())
    }

    #[test]
    fn test_resolve_usage_ignores_culled_edges() {
        let mut graph = DependencyGraph::new();
        let resource = graph.register_node();
        let alive_pass = graph.register_node();
        let dead_pass = graph.register_node();
        let e0 = graph.link(Edge { from: resource, to: alive_pass });
        let e1 = graph.link(Edge { from: resource, to: dead_pass });
        graph.make_target(alive_pass);
        graph.cull(|_| {});

        let mut entry = entry();
        entry.record_edge_usage(e0, TextureUsage::SAMPLEABLE);
        entry.record_edge_usage(e1, TextureUsage::UPLOADABLE);
        entry.resolve_usage(&graph, &[e0, e1]);

        assert_eq!(entry.usage(), TextureUsage::SAMPLEABLE);
    }

    #[test]
    fn test_resolve_usage_accumulates() {
        let mut graph = DependencyGraph::new();
        let resource = graph.register_node();
        let pass = graph.register_node();
        let e0 = graph.link(Edge { from: resource, to: pass });
        let e1 = graph.link(Edge { from: pass, to: resource });
        graph.make_target(pass);
        graph.cull(|_| {});

        let mut entry = entry();
        entry.record_edge_usage(e0, TextureUsage::SAMPLEABLE);
        entry.record_edge_usage(e1, TextureUsage::COLOR_ATTACHMENT);
        entry.resolve_usage(&graph, &[e0]);
        entry.resolve_usage(&graph, &[e1]);

        assert_eq!(
            entry.usage(),
            TextureUsage::SAMPLEABLE | TextureUsage::COLOR_ATTACHMENT
        );
    }

    #[test]
    fn test_devirtualize_creates_concrete_resource() {
        let mut allocator = DummyAllocator::new();
        let mut entry = entry();
        assert!(entry.resource().texture.is_none());

        entry.devirtualize(&mut allocator);
        assert!(entry.resource().texture.is_some());

        entry.destroy(&mut allocator);
        assert!(entry.resource().texture.is_none());
    }

    #[test]
    fn test_imported_resource_skips_allocator() {
        let mut allocator = DummyAllocator::new();
        let concrete = Texture {
            texture: Some(crate::backend::TextureId::new(42)),
        };
        let mut entry = ResourceEntry::<Texture>::new_imported(
            "backbuffer",
            0,
            TextureDescriptor::default(),
            TextureUsage::COLOR_ATTACHMENT,
            concrete,
        );

        entry.devirtualize(&mut allocator);
        assert_eq!(entry.resource().texture, Some(crate::backend::TextureId::new(42)));
        assert_eq!(allocator.live_textures(), 0);

        entry.destroy(&mut allocator);
        assert!(entry.resource().texture.is_some());
    }

    #[test]
    #[should_panic(expected = "imported resource")]
    fn test_imported_usage_conflict_panics() {
        let mut allocator = DummyAllocator::new();
        let mut entry = ResourceEntry::<Texture>::new_imported(
            "backbuffer",
            0,
            TextureDescriptor::default(),
            TextureUsage::COLOR_ATTACHMENT,
            Texture::default(),
        );
        entry.usage = TextureUsage::SAMPLEABLE;
        entry.devirtualize(&mut allocator);
    }
}
