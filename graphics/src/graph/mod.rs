//! The frame graph.
//!
//! A frame graph is rebuilt every frame in three phases:
//!
//! 1. **Build** — [`FrameGraph::add_pass`] runs each pass's setup callback
//!    with a [`Builder`], declaring the virtual resources the pass creates,
//!    reads and writes. Writes version their resource: each write to an
//!    already-written resource produces a new resource node sharing the same
//!    underlying resource, which linearises in-place mutation into a chain
//!    and keeps the graph a DAG.
//! 2. **Compile** — [`FrameGraph::compile`] culls every node not transitively
//!    required by a target ([`FrameGraph::present`] /
//!    [`Builder::side_effect`]), accumulates resource reference counts,
//!    resolves cumulative usage masks, and computes each resource's first and
//!    last user pass.
//! 3. **Execute** — [`FrameGraph::execute`] walks the surviving passes in
//!    declaration order, devirtualizing each resource right before its first
//!    user and destroying it right after its last, with the pass callbacks
//!    invoked in between.
//!
//! # Example
//!
//! ```
//! use firethorn_graphics::backend::dummy::{DummyAllocator, DummyDriver};
//! use firethorn_graphics::{
//!     FrameGraph, FrameGraphId, Texture, TextureDescriptor, TextureUsage,
//! };
//!
//! #[derive(Default, Clone)]
//! struct ColorPassData {
//!     output: FrameGraphId<Texture>,
//! }
//!
//! let mut fg = FrameGraph::new(Box::new(DummyAllocator::new()));
//! let color_pass = fg.add_pass(
//!     "color",
//!     |builder, data: &mut ColorPassData| {
//!         data.output = builder.create::<Texture>("color buffer", TextureDescriptor::default());
//!         data.output = builder.write(data.output, TextureUsage::COLOR_ATTACHMENT);
//!     },
//!     |resources, data: &ColorPassData, _driver| {
//!         let texture = resources.get(data.output);
//!         assert!(texture.texture.is_some());
//!     },
//! );
//! fg.present(color_pass.output);
//! fg.compile();
//! fg.execute(&mut DummyDriver::new());
//! ```

pub mod dependency;
mod handle;
mod pass;
mod resource;
mod resource_node;
mod resources;
pub mod target;

pub use handle::{FrameGraphHandle, FrameGraphId, Version};
pub use resource::{FrameGraphResource, UsageFlags};
pub use resources::FrameGraphResources;

use std::io::{self, Write};

use firethorn_core::profiling::profile_function;

use crate::backend::{Driver, RenderTargetAllocation, ResourceAllocator};
use dependency::{DependencyGraph, Edge};
use handle::ResourceSlot;
use pass::{Pass, PassExecutor, PassNode, RenderTargetData};
use resource::{ResourceEntry, VirtualResource};
use resource_node::ResourceNode;
use target::{
    DEPTH_SLOT, MAX_ATTACHMENTS, RenderTarget, RenderTargetDescriptor, STENCIL_SLOT, TargetFlags,
    slot_flag, slot_usage,
};

/// What a dependency-graph node stands for, keyed by dense node id.
#[derive(Debug, Clone, Copy)]
enum NodeKind {
    /// Index into the pass-node table.
    Pass(usize),
    /// Index into the resource-node table.
    Resource(usize),
}

/// Per-frame declarative scheduler for GPU work.
///
/// See the [module documentation](self) for the build/compile/execute flow.
pub struct FrameGraph {
    allocator: Box<dyn ResourceAllocator>,
    graph: DependencyGraph,
    /// Owner of each graph node, parallel to the graph's dense node ids.
    node_kinds: Vec<NodeKind>,
    pass_nodes: Vec<PassNode>,
    resource_nodes: Vec<ResourceNode>,
    resources: Vec<Box<dyn VirtualResource>>,
    slots: Vec<ResourceSlot>,
}

impl FrameGraph {
    /// Create an empty frame graph over the given allocator.
    pub fn new(allocator: Box<dyn ResourceAllocator>) -> Self {
        Self {
            allocator,
            graph: DependencyGraph::new(),
            node_kinds: Vec::new(),
            pass_nodes: Vec::new(),
            resource_nodes: Vec::new(),
            resources: Vec::new(),
            slots: Vec::new(),
        }
    }

    /// Add a pass to the frame graph.
    ///
    /// `setup` runs synchronously and declares resource accesses through the
    /// [`Builder`]; `execute` runs later, from [`execute`](Self::execute),
    /// and must not capture references into the builder. Returns a clone of
    /// the pass data as filled in by `setup`, so later passes can pick up
    /// the handles it produced.
    pub fn add_pass<D, Setup, Execute>(&mut self, name: &str, setup: Setup, execute: Execute) -> D
    where
        D: Default + Clone + 'static,
        Setup: FnOnce(&mut Builder<'_>, &mut D),
        Execute: FnMut(&FrameGraphResources<'_>, &D, &mut dyn Driver) + 'static,
    {
        let pass_index = self.add_render_pass_node(name);
        let mut data = D::default();
        {
            let mut builder = Builder {
                frame_graph: self,
                pass: pass_index,
            };
            setup(&mut builder, &mut data);
        }
        let filled = data.clone();
        self.pass_nodes[pass_index].set_executor(Box::new(Pass::new(data, execute)));
        filled
    }

    /// Request that a resource survives the frame.
    ///
    /// Records a read of `handle` inside a synthetic present pass and makes
    /// the referenced resource node a graph target, anchoring the cull
    /// traversal.
    pub fn present(&mut self, handle: impl Into<FrameGraphHandle>) {
        let handle = handle.into();
        debug_assert!(self.is_valid(handle), "present on a stale handle");

        let pass_index = self.add_present_pass_node();
        let node_index = self.node_index(handle);
        let edge = self.graph.link(Edge {
            from: self.resource_nodes[node_index].node(),
            to: self.pass_nodes[pass_index].node(),
        });
        self.resource_nodes[node_index].add_outgoing_edge(edge);

        let node = self.resource_nodes[node_index].node();
        if !self.graph.is_target(node) {
            self.graph.make_target(node);
        }
    }

    /// Import an externally-owned concrete resource.
    ///
    /// The graph never creates or destroys it; using it beyond
    /// `allowed_usage` is a contract violation caught at devirtualize time.
    pub fn import<R: FrameGraphResource>(
        &mut self,
        name: &str,
        descriptor: R::Descriptor,
        allowed_usage: R::Usage,
        resource: R,
    ) -> FrameGraphId<R> {
        let id = self.resources.len() as u16;
        self.add_resource(ResourceEntry::<R>::new_imported(
            name,
            id,
            descriptor,
            allowed_usage,
            resource,
        ))
    }

    /// Whether `handle` still refers to the current version of its resource.
    pub fn is_valid(&self, handle: impl Into<FrameGraphHandle>) -> bool {
        let handle = handle.into();
        if !handle.is_initialized() {
            return false;
        }
        let slot = self.slot(handle);
        self.resources[slot.resource_index as usize].info().version == handle.version()
    }

    /// Cull unreferenced passes and resources, then resolve resource
    /// lifetimes and usage masks.
    pub fn compile(&mut self) -> &mut Self {
        profile_function!();

        self.graph.cull(|_| {});

        let Self {
            graph,
            node_kinds,
            pass_nodes,
            resource_nodes,
            resources,
            slots,
            ..
        } = self;

        // Accumulate resource-level reference counts from every version node,
        // culled or not (a culled node contributes zero).
        for node in resource_nodes.iter() {
            let slot = slots[node.handle().index() as usize];
            let info = resources[slot.resource_index as usize].info_mut();
            info.refcount += graph.ref_count(node.node());
        }

        // Resolve usage masks across the surviving version nodes. Edges with
        // a culled endpoint contribute nothing.
        for node in resource_nodes.iter() {
            if graph.is_culled(node.node()) {
                continue;
            }
            let slot = slots[node.handle().index() as usize];
            let resource = &mut resources[slot.resource_index as usize];
            resource.resolve_usage(graph, node.readers());
            if let Some(writer) = node.writer() {
                resource.resolve_usage(graph, &[writer]);
            }
        }

        // First/last users in declaration order — the canonical
        // linearisation; no reordering.
        for (pass_index, pass_node) in pass_nodes.iter().enumerate() {
            if graph.is_culled(pass_node.node()) {
                continue;
            }

            for (_, edge) in graph.incoming_edges(pass_node.node()) {
                if graph.is_culled(edge.from) {
                    continue;
                }
                let NodeKind::Resource(node_index) = node_kinds[edge.from.index()] else {
                    continue;
                };
                let slot = slots[resource_nodes[node_index].handle().index() as usize];
                let info = resources[slot.resource_index as usize].info_mut();
                info.first = info.first.or(Some(pass_index));
                info.last = Some(pass_index);
            }

            for (_, edge) in graph.outgoing_edges(pass_node.node()) {
                if graph.is_culled(edge.to) {
                    continue;
                }
                let NodeKind::Resource(node_index) = node_kinds[edge.to.index()] else {
                    continue;
                };
                let slot = slots[resource_nodes[node_index].handle().index() as usize];
                let info = resources[slot.resource_index as usize].info_mut();
                info.first = info.first.or(Some(pass_index));
                info.last = Some(pass_index);
            }
        }

        log::debug!(
            "frame graph compiled: {}/{} passes alive, {}/{} resources referenced",
            pass_nodes.iter().filter(|p| !graph.is_culled(p.node())).count(),
            pass_nodes.len(),
            resources.iter().filter(|r| r.info().refcount > 0).count(),
            resources.len()
        );

        self
    }

    /// Execute all surviving passes in declaration order, then [`reset`](Self::reset).
    pub fn execute(&mut self, driver: &mut dyn Driver) {
        profile_function!();

        driver.push_group_marker("FrameGraph");
        for pass_index in 0..self.pass_nodes.len() {
            if self.graph.is_culled(self.pass_nodes[pass_index].node()) {
                continue;
            }
            driver.push_group_marker(self.pass_nodes[pass_index].name());
            log::trace!("executing pass '{}'", self.pass_nodes[pass_index].name());

            self.devirtualize_for_pass(pass_index);
            self.create_render_targets(pass_index);

            if let Some(mut executor) = self.pass_nodes[pass_index].take_executor() {
                let resources = FrameGraphResources::new(self, pass_index);
                executor.execute(&resources, driver);
            }

            self.destroy_render_targets(pass_index);
            self.destroy_for_pass(pass_index);

            driver.pop_group_marker();
        }
        // a good moment to kick the GPU: we just recorded a frame's worth of work
        driver.flush();
        driver.pop_group_marker();

        self.reset();
    }

    /// Drop all passes, nodes, resources and slots, in that order.
    pub fn reset(&mut self) {
        self.pass_nodes.clear();
        self.resource_nodes.clear();
        self.resources.clear();
        self.slots.clear();
        self.graph.clear();
        self.node_kinds.clear();
    }

    /// Write a Graphviz rendering of the dependency graph.
    pub fn export_graphviz<W: Write>(&self, out: &mut W, name: &str) -> io::Result<()> {
        let Self {
            graph,
            node_kinds,
            pass_nodes,
            resource_nodes,
            resources,
            slots,
            ..
        } = self;
        graph.export_graphviz(out, name, |node| match node_kinds[node.index()] {
            NodeKind::Pass(index) => {
                let pass_node = &pass_nodes[index];
                if pass_node.is_present() {
                    format!(
                        "[label=\"Present, id: {}\", style=filled, fillcolor=red3]",
                        node.index()
                    )
                } else {
                    let refs = graph.ref_count(node);
                    let fill = if refs > 0 { "darkorange" } else { "darkorange4" };
                    format!(
                        "[label=\"{}\\nrefs: {}, id: {}\", style=filled, fillcolor={}]",
                        pass_node.name(),
                        refs,
                        node.index(),
                        fill
                    )
                }
            }
            NodeKind::Resource(index) => {
                let resource_node = &resource_nodes[index];
                let slot = slots[resource_node.handle().index() as usize];
                let resource = &resources[slot.resource_index as usize];
                let info = resource.info();
                let imported = if info.imported { ", imported" } else { "" };
                let parent = match info.parent {
                    Some(parent) => format!(", sub of \\\"{}\\\"", resources[parent].info().name),
                    None => String::new(),
                };
                let fill = if info.refcount > 0 { "skyblue" } else { "skyblue4" };
                format!(
                    "[label=\"{}\\nrefs: {}, id: {}\\nversion: {}{}{}\\nusage: {}\", style=filled, fillcolor={}]",
                    info.name,
                    info.refcount,
                    info.id,
                    resource_node.handle().version(),
                    imported,
                    parent,
                    resource.usage_string(),
                    fill
                )
            }
        })
    }

    // ------------------------------------------------------------------
    // internals
    // ------------------------------------------------------------------

    fn add_render_pass_node(&mut self, name: &str) -> usize {
        let node = self.graph.register_node();
        self.node_kinds.push(NodeKind::Pass(self.pass_nodes.len()));
        self.pass_nodes.push(PassNode::new_render(node, name));
        self.pass_nodes.len() - 1
    }

    fn add_present_pass_node(&mut self) -> usize {
        let node = self.graph.register_node();
        self.node_kinds.push(NodeKind::Pass(self.pass_nodes.len()));
        self.pass_nodes.push(PassNode::new_present(node));
        self.pass_nodes.len() - 1
    }

    fn add_resource_node(&mut self, handle: FrameGraphHandle) -> usize {
        let node = self.graph.register_node();
        self.node_kinds.push(NodeKind::Resource(self.resource_nodes.len()));
        self.resource_nodes.push(ResourceNode::new(node, handle));
        self.resource_nodes.len() - 1
    }

    /// Register a resource entry with its initial version node and slot.
    fn add_resource<R: FrameGraphResource>(&mut self, entry: ResourceEntry<R>) -> FrameGraphId<R> {
        let handle = FrameGraphHandle::new(self.slots.len() as u32);
        let resource_index = self.resources.len() as u32;
        let node_index = self.add_resource_node(handle) as u32;
        self.slots.push(ResourceSlot {
            resource_index,
            node_index,
        });
        self.resources.push(Box::new(entry));
        FrameGraphId::new(handle)
    }

    fn slot(&self, handle: FrameGraphHandle) -> ResourceSlot {
        self.slots[handle.index() as usize]
    }

    /// Index of the newest version node of the resource behind `handle`.
    fn node_index(&self, handle: FrameGraphHandle) -> usize {
        self.slot(handle).node_index as usize
    }

    pub(crate) fn typed_entry<R: FrameGraphResource>(
        &self,
        handle: FrameGraphHandle,
    ) -> &ResourceEntry<R> {
        let slot = self.slot(handle);
        self.resources[slot.resource_index as usize]
            .as_any()
            .downcast_ref::<ResourceEntry<R>>()
            .expect("handle used with a different resource kind")
    }

    fn typed_entry_mut<R: FrameGraphResource>(
        &mut self,
        handle: FrameGraphHandle,
    ) -> &mut ResourceEntry<R> {
        let slot = self.slot(handle);
        self.resources[slot.resource_index as usize]
            .as_any_mut()
            .downcast_mut::<ResourceEntry<R>>()
            .expect("handle used with a different resource kind")
    }

    fn read_typed<R: FrameGraphResource>(
        &mut self,
        pass_index: usize,
        input: FrameGraphId<R>,
        usage: R::Usage,
    ) -> FrameGraphId<R> {
        let handle = input.handle();
        debug_assert!(self.is_valid(handle), "read on a stale handle");

        let node_index = self.node_index(handle);
        let edge = self.graph.link(Edge {
            from: self.resource_nodes[node_index].node(),
            to: self.pass_nodes[pass_index].node(),
        });
        self.resource_nodes[node_index].add_outgoing_edge(edge);
        self.typed_entry_mut::<R>(handle).record_edge_usage(edge, usage);
        input
    }

    fn write_typed<R: FrameGraphResource>(
        &mut self,
        pass_index: usize,
        input: FrameGraphId<R>,
        usage: R::Usage,
    ) -> FrameGraphId<R> {
        let handle = input.handle();
        debug_assert!(self.is_valid(handle), "write on a stale handle");

        let slot_index = handle.index() as usize;
        let node_index = self.slots[slot_index].node_index as usize;

        let output = if self.resource_nodes[node_index].has_writer() {
            // The current version already has a producer: writing again
            // yields a new version. The slot is redirected, so the input
            // handle goes stale.
            let next = handle.next_version();
            let new_node_index = self.add_resource_node(next);
            self.slots[slot_index].node_index = new_node_index as u32;
            self.typed_entry_mut::<R>(next).info_mut().version = next.version();

            let edge = self.graph.link(Edge {
                from: self.pass_nodes[pass_index].node(),
                to: self.resource_nodes[new_node_index].node(),
            });
            self.resource_nodes[new_node_index].set_incoming_edge(edge);
            self.typed_entry_mut::<R>(next).record_edge_usage(edge, usage);
            FrameGraphId::new(next)
        } else {
            // First write: the resource was just created and never produced,
            // so this pass becomes the producer of the current version.
            let edge = self.graph.link(Edge {
                from: self.pass_nodes[pass_index].node(),
                to: self.resource_nodes[node_index].node(),
            });
            self.resource_nodes[node_index].set_incoming_edge(edge);
            self.typed_entry_mut::<R>(handle).record_edge_usage(edge, usage);
            input
        };
        output
    }

    fn devirtualize_for_pass(&mut self, pass_index: usize) {
        let Self {
            resources,
            allocator,
            ..
        } = self;
        for resource in resources.iter_mut() {
            if resource.info().first == Some(pass_index) {
                resource.devirtualize(allocator.as_mut());
            }
        }
    }

    fn destroy_for_pass(&mut self, pass_index: usize) {
        let Self {
            resources,
            allocator,
            ..
        } = self;
        for resource in resources.iter_mut() {
            if resource.info().last == Some(pass_index) {
                resource.destroy(allocator.as_mut());
            }
        }
    }

    fn create_render_targets(&mut self, pass_index: usize) {
        let Self {
            graph,
            pass_nodes,
            resource_nodes,
            resources,
            slots,
            allocator,
            ..
        } = self;

        let pass_name = pass_nodes[pass_index].name().to_string();
        for data in pass_nodes[pass_index].render_targets_mut() {
            let mut discard_start = TargetFlags::empty();
            let mut discard_end = TargetFlags::empty();
            let mut allocation = RenderTargetAllocation {
                samples: data.descriptor.samples,
                ..Default::default()
            };

            for slot_index in 0..MAX_ATTACHMENTS {
                let Some(outgoing) = data.outgoing[slot_index] else {
                    continue;
                };
                let flag = slot_flag(slot_index);

                // Content is undefined before the pass when the attachment
                // was never written (the declaration's own write is the
                // first), or when the pre-write version did not survive.
                match data.incoming[slot_index] {
                    None => discard_start |= flag,
                    Some(incoming) => {
                        if incoming == outgoing
                            || graph.is_culled(resource_nodes[incoming].node())
                        {
                            discard_start |= flag;
                        }
                    }
                }

                // Content may be dropped after the pass when no surviving
                // consumer reads the post-write version.
                let outgoing_node = resource_nodes[outgoing].node();
                if graph.is_culled(outgoing_node) {
                    discard_end |= flag;
                } else {
                    let consumed = graph.is_target(outgoing_node)
                        || graph
                            .outgoing_edges(outgoing_node)
                            .any(|(_, edge)| graph.is_edge_valid(edge));
                    if !consumed {
                        discard_end |= flag;
                    }
                }

                // Attachment handles are textures by construction.
                let id = data
                    .descriptor
                    .attachments
                    .slot(slot_index)
                    .expect("attachment slot recorded without a handle");
                let slot = slots[id.handle().index() as usize];
                let texture = resources[slot.resource_index as usize]
                    .as_any()
                    .downcast_ref::<ResourceEntry<crate::resources::Texture>>()
                    .expect("render target attachments are textures")
                    .resource()
                    .texture;
                match slot_index {
                    DEPTH_SLOT => allocation.depth = texture,
                    STENCIL_SLOT => allocation.stencil = texture,
                    color => allocation.color[color] = texture,
                }
            }

            allocation.discard_start = discard_start;
            allocation.discard_end = discard_end;
            data.discard_start = discard_start;
            data.discard_end = discard_end;
            data.target = Some(allocator.create_render_target(&pass_name, &allocation));
        }
    }

    fn destroy_render_targets(&mut self, pass_index: usize) {
        let Self {
            pass_nodes,
            allocator,
            ..
        } = self;
        for data in pass_nodes[pass_index].render_targets_mut() {
            if let Some(target) = data.target.take() {
                allocator.destroy_render_target(target);
            }
        }
    }
}

/// Declares the resource accesses of one pass. Handed to setup callbacks.
pub struct Builder<'a> {
    frame_graph: &'a mut FrameGraph,
    pass: usize,
}

impl Builder<'_> {
    /// Create a virtual resource of kind `R`.
    pub fn create<R: FrameGraphResource>(
        &mut self,
        name: &str,
        descriptor: R::Descriptor,
    ) -> FrameGraphId<R> {
        let id = self.frame_graph.resources.len() as u16;
        self.frame_graph
            .add_resource(ResourceEntry::<R>::new(name, id, descriptor))
    }

    /// Create a subresource of `parent`.
    ///
    /// Adds a parent-to-child dependency edge, so the parent stays alive as
    /// long as the subresource survives culling. The parent handle receives
    /// a new version under the same rules as [`write`](Self::write).
    pub fn create_subresource<R: FrameGraphResource>(
        &mut self,
        parent: &mut FrameGraphId<R>,
        name: &str,
        sub_descriptor: R::SubResourceDescriptor,
    ) -> FrameGraphId<R> {
        let fg = &mut *self.frame_graph;
        debug_assert!(fg.is_valid(*parent), "subresource of a stale handle");

        let parent_slot_index = parent.handle().index() as usize;
        let parent_node_index = fg.slots[parent_slot_index].node_index as usize;
        if fg.resource_nodes[parent_node_index].has_writer() {
            let next = parent.handle().next_version();
            let new_node_index = fg.add_resource_node(next);
            fg.slots[parent_slot_index].node_index = new_node_index as u32;
            fg.typed_entry_mut::<R>(next).info_mut().version = next.version();
            *parent = FrameGraphId::new(next);
        }

        let parent_resource_index = fg.slots[parent_slot_index].resource_index as usize;
        let descriptor = fg.typed_entry::<R>(parent.handle()).descriptor().clone();
        let id = fg.resources.len() as u16;
        let child = fg.add_resource(ResourceEntry::<R>::new_subresource(
            name,
            id,
            descriptor,
            sub_descriptor,
            parent_resource_index,
        ));

        let parent_node_index = fg.slots[parent_slot_index].node_index as usize;
        let child_node_index = fg.node_index(child.handle());
        let edge = fg.graph.link(Edge {
            from: fg.resource_nodes[parent_node_index].node(),
            to: fg.resource_nodes[child_node_index].node(),
        });
        fg.resource_nodes[parent_node_index].add_outgoing_edge(edge);

        child
    }

    /// Declare a read of `input` by this pass.
    pub fn read<R: FrameGraphResource>(
        &mut self,
        input: FrameGraphId<R>,
        usage: R::Usage,
    ) -> FrameGraphId<R> {
        self.frame_graph.read_typed(self.pass, input, usage)
    }

    /// Declare a write of `input` by this pass.
    ///
    /// If the current version already has a producer, a new version is
    /// created and returned; the input handle becomes invalid.
    pub fn write<R: FrameGraphResource>(
        &mut self,
        input: FrameGraphId<R>,
        usage: R::Usage,
    ) -> FrameGraphId<R> {
        self.frame_graph.write_typed(self.pass, input, usage)
    }

    /// Mark this pass as having side effects, shielding it from culling.
    pub fn side_effect(&mut self) {
        let node = self.frame_graph.pass_nodes[self.pass].node();
        self.frame_graph.graph.make_target(node);
    }

    /// The descriptor a resource was declared with.
    pub fn descriptor<R: FrameGraphResource>(&self, handle: FrameGraphId<R>) -> &R::Descriptor {
        self.frame_graph.typed_entry::<R>(handle.handle()).descriptor()
    }

    /// Declare a render target for this pass.
    ///
    /// Every attachment is written with its attachment-specific usage bit,
    /// so all attachment handles receive new versions; the new handles are
    /// available in the returned [`RenderTarget`].
    pub fn declare_render_target(&mut self, descriptor: RenderTargetDescriptor) -> RenderTarget {
        let mut data = RenderTargetData {
            descriptor: descriptor.clone(),
            ..Default::default()
        };
        let mut attachments = descriptor.attachments;

        for slot_index in 0..MAX_ATTACHMENTS {
            let Some(id) = attachments.slot(slot_index) else {
                continue;
            };
            data.incoming[slot_index] = Some(self.frame_graph.node_index(id.handle()));
            let written = self.write(id, slot_usage(slot_index));
            data.outgoing[slot_index] = Some(self.frame_graph.node_index(written.handle()));
            attachments.set_slot(slot_index, written);
        }

        data.descriptor.attachments = attachments;
        let id = self.frame_graph.pass_nodes[self.pass].push_render_target(data);
        RenderTarget { attachments, id }
    }
}
