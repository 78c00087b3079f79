//! Resource nodes: one graph node per resource *version*.
//!
//! Writing to a resource produces a logically new value; each version gets
//! its own node so the write chain linearises into a DAG. A node tracks its
//! single incoming writer edge and any number of outgoing reader edges.

use crate::graph::dependency::{EdgeId, NodeId};
use crate::graph::handle::FrameGraphHandle;

/// A dependency-graph node representing one version of a virtual resource.
#[derive(Debug)]
pub(crate) struct ResourceNode {
    node: NodeId,
    /// The handle this node was created for; its version is this node's
    /// version.
    handle: FrameGraphHandle,
    /// Outgoing reader edges (resource → pass).
    readers: Vec<EdgeId>,
    /// The single incoming writer edge (pass → resource), if any.
    writer: Option<EdgeId>,
}

impl ResourceNode {
    pub fn new(node: NodeId, handle: FrameGraphHandle) -> Self {
        Self {
            node,
            handle,
            readers: Vec::new(),
            writer: None,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn handle(&self) -> FrameGraphHandle {
        self.handle
    }

    /// Record a reader edge leaving this node.
    pub fn add_outgoing_edge(&mut self, edge: EdgeId) {
        self.readers.push(edge);
    }

    /// Record the writer edge entering this node.
    ///
    /// # Panics
    ///
    /// Panics if a writer is already set; a version has exactly one producer.
    pub fn set_incoming_edge(&mut self, edge: EdgeId) {
        assert!(
            self.writer.is_none(),
            "resource node {} already has a writer",
            self.handle.index()
        );
        self.writer = Some(edge);
    }

    pub fn has_writer(&self) -> bool {
        self.writer.is_some()
    }

    pub fn readers(&self) -> &[EdgeId] {
        &self.readers
    }

    pub fn writer(&self) -> Option<EdgeId> {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::dependency::{DependencyGraph, Edge};

    #[test]
    fn test_reader_and_writer_tracking() {
        let mut graph = DependencyGraph::new();
        let resource = graph.register_node();
        let pass = graph.register_node();

        let mut node = ResourceNode::new(resource, FrameGraphHandle::new(0));
        assert!(!node.has_writer());

        let read = graph.link(Edge { from: resource, to: pass });
        node.add_outgoing_edge(read);
        let write = graph.link(Edge { from: pass, to: resource });
        node.set_incoming_edge(write);

        assert!(node.has_writer());
        assert_eq!(node.readers(), &[read]);
        assert_eq!(node.writer(), Some(write));
    }

    #[test]
    #[should_panic(expected = "already has a writer")]
    fn test_second_writer_panics() {
        let mut graph = DependencyGraph::new();
        let resource = graph.register_node();
        let pass = graph.register_node();

        let mut node = ResourceNode::new(resource, FrameGraphHandle::new(0));
        let w0 = graph.link(Edge { from: pass, to: resource });
        let w1 = graph.link(Edge { from: pass, to: resource });
        node.set_incoming_edge(w0);
        node.set_incoming_edge(w1);
    }
}
