//! Execution-phase resource access.
//!
//! A [`FrameGraphResources`] is handed to each pass callback and maps the
//! handles captured during setup to concrete resources. It is scoped to the
//! executing pass and borrows the frame graph immutably; callbacks record
//! commands through the driver, they do not mutate the graph.

use crate::graph::FrameGraph;
use crate::graph::handle::FrameGraphId;
use crate::graph::resource::FrameGraphResource;
use crate::graph::target::RenderTargetInfo;

/// Used to retrieve concrete resources in the execute phase.
pub struct FrameGraphResources<'a> {
    frame_graph: &'a FrameGraph,
    pass_index: usize,
}

impl<'a> FrameGraphResources<'a> {
    pub(crate) fn new(frame_graph: &'a FrameGraph, pass_index: usize) -> Self {
        Self {
            frame_graph,
            pass_index,
        }
    }

    /// Name of the pass being executed.
    pub fn pass_name(&self) -> &str {
        self.frame_graph.pass_nodes[self.pass_index].name()
    }

    /// The concrete resource for a handle.
    ///
    /// Valid only between the resource's devirtualize and destroy; outside
    /// that window (e.g. for a culled, never-instantiated resource) the
    /// kind's default "empty" value is returned.
    pub fn get<R: FrameGraphResource>(&self, id: FrameGraphId<R>) -> &R {
        debug_assert!(
            self.frame_graph.is_valid(id),
            "stale resource handle in pass '{}'",
            self.pass_name()
        );
        self.frame_graph.typed_entry::<R>(id.handle()).resource()
    }

    /// The descriptor the resource was declared with.
    pub fn descriptor<R: FrameGraphResource>(&self, id: FrameGraphId<R>) -> &R::Descriptor {
        self.frame_graph.typed_entry::<R>(id.handle()).descriptor()
    }

    /// The resolved usage mask of the resource (union of all surviving edge
    /// usages).
    pub fn usage<R: FrameGraphResource>(&self, id: FrameGraphId<R>) -> R::Usage {
        self.frame_graph.typed_entry::<R>(id.handle()).usage()
    }

    /// The concrete render target declared by this pass under `id`.
    pub fn render_target(&self, id: u32) -> RenderTargetInfo {
        let data = &self.frame_graph.pass_nodes[self.pass_index].render_targets()[id as usize];
        RenderTargetInfo {
            target: data.target,
            discard_start: data.discard_start,
            discard_end: data.discard_end,
        }
    }
}
