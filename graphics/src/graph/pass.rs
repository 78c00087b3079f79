//! Pass nodes and the type-erased execute callback.
//!
//! Each pass's user data is a distinct type, so the execute closure and its
//! data travel together behind the [`PassExecutor`] trait. The frame graph
//! stores executors by pass index and takes them out for the single
//! invocation during the execute phase.

use crate::backend::{Driver, RenderTargetId};
use crate::graph::dependency::NodeId;
use crate::graph::resources::FrameGraphResources;
use crate::graph::target::{MAX_ATTACHMENTS, RenderTargetDescriptor, TargetFlags};

/// Type-erased pairing of a pass's data with its execute closure.
pub(crate) trait PassExecutor {
    fn execute(&mut self, resources: &FrameGraphResources<'_>, driver: &mut dyn Driver);
}

/// Concrete executor for a pass with data `D` and closure `E`.
pub(crate) struct Pass<D, E> {
    data: D,
    execute: E,
}

impl<D, E> Pass<D, E> {
    pub fn new(data: D, execute: E) -> Self {
        Self { data, execute }
    }
}

impl<D, E> PassExecutor for Pass<D, E>
where
    E: FnMut(&FrameGraphResources<'_>, &D, &mut dyn Driver),
{
    fn execute(&mut self, resources: &FrameGraphResources<'_>, driver: &mut dyn Driver) {
        (self.execute)(resources, &self.data, driver);
    }
}

/// One render-target declaration on a render pass.
///
/// Pairs, per attachment slot, the resource node before the declaration
/// (`incoming`) and after (`outgoing`). Discard flags and the concrete
/// target are filled in by the execute phase.
#[derive(Default)]
pub(crate) struct RenderTargetData {
    pub descriptor: RenderTargetDescriptor,
    /// Resource-node table indices of the pre-write attachment nodes.
    pub incoming: [Option<usize>; MAX_ATTACHMENTS],
    /// Resource-node table indices of the post-write attachment nodes.
    pub outgoing: [Option<usize>; MAX_ATTACHMENTS],
    /// Concrete target; present only while the declaring pass executes.
    pub target: Option<RenderTargetId>,
    pub discard_start: TargetFlags,
    pub discard_end: TargetFlags,
}

/// The kind-specific part of a pass node.
pub(crate) enum PassKind {
    /// A client pass with an execute callback and optional render targets.
    Render {
        executor: Option<Box<dyn PassExecutor>>,
        render_targets: Vec<RenderTargetData>,
    },
    /// A synthetic sink anchoring a `present()` request. No client body.
    Present,
}

/// A dependency-graph node representing one pass.
pub(crate) struct PassNode {
    node: NodeId,
    name: String,
    kind: PassKind,
}

impl PassNode {
    pub fn new_render(node: NodeId, name: &str) -> Self {
        Self {
            node,
            name: name.to_string(),
            kind: PassKind::Render {
                executor: None,
                render_targets: Vec::new(),
            },
        }
    }

    pub fn new_present(node: NodeId) -> Self {
        Self {
            node,
            name: "Present".to_string(),
            kind: PassKind::Present,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_present(&self) -> bool {
        matches!(self.kind, PassKind::Present)
    }

    pub fn set_executor(&mut self, executor: Box<dyn PassExecutor>) {
        match &mut self.kind {
            PassKind::Render { executor: slot, .. } => *slot = Some(executor),
            PassKind::Present => unreachable!("present passes have no executor"),
        }
    }

    /// Remove the executor for its single invocation.
    pub fn take_executor(&mut self) -> Option<Box<dyn PassExecutor>> {
        match &mut self.kind {
            PassKind::Render { executor, .. } => executor.take(),
            PassKind::Present => None,
        }
    }

    pub fn push_render_target(&mut self, data: RenderTargetData) -> u32 {
        match &mut self.kind {
            PassKind::Render { render_targets, .. } => {
                render_targets.push(data);
                (render_targets.len() - 1) as u32
            }
            PassKind::Present => unreachable!("present passes have no render targets"),
        }
    }

    pub fn render_targets(&self) -> &[RenderTargetData] {
        match &self.kind {
            PassKind::Render { render_targets, .. } => render_targets,
            PassKind::Present => &[],
        }
    }

    pub fn render_targets_mut(&mut self) -> &mut [RenderTargetData] {
        match &mut self.kind {
            PassKind::Render { render_targets, .. } => render_targets,
            PassKind::Present => &mut [],
        }
    }
}
