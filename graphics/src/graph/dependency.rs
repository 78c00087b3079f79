//! Generic dependency graph with reverse reference-count culling.
//!
//! The graph is an untyped bipartite DAG: the frame graph registers pass
//! nodes and resource nodes here and links them with directed edges
//! (pass → resource for writes, resource → pass for reads). Nodes are plain
//! dense ids; the per-node state the graph owns is a single reference count
//! with a TARGET sentinel bit. Everything else (names, colors, culled-hooks)
//! is supplied by the owner at the call site, so the graph stays usable on
//! its own.
//!
//! # Culling
//!
//! After construction, a node's reference count is its out-degree: a node is
//! alive only if something downstream depends on it. [`DependencyGraph::cull`]
//! seeds a worklist with every zero-refcount node and walks incoming edges
//! backwards, decrementing producers and cascading. Target nodes carry the
//! sentinel bit, never reach zero, and shield their transitive producers.

use std::io::{self, Write};

use firethorn_core::pool::Poolable;

/// Sentinel bit marking a node as a graph target (a sink that must survive).
const TARGET: u32 = 1 << 31;

/// Identifier of a node in the dependency graph.
///
/// Ids are dense and assigned in registration order. They are only valid
/// within the graph that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Raw index of this node (dense, registration order).
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identifier of an edge in the dependency graph.
///
/// Ids are dense and assigned in link order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(u32);

impl EdgeId {
    /// Raw index of this edge (dense, link order).
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A directed edge between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Source node (the producer kept alive by this edge).
    pub from: NodeId,
    /// Destination node (the consumer).
    pub to: NodeId,
}

/// Generic bipartite DAG of nodes and edges.
///
/// Node reference counts live in the graph itself, keyed by [`NodeId`];
/// callers keep whatever per-node payload they need in their own tables.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Per-node reference count, including the TARGET sentinel bit.
    ref_counts: Vec<u32>,
    edges: Vec<Edge>,
}

impl DependencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            // Reasonable defaults for a typical frame
            ref_counts: Vec::with_capacity(8),
            edges: Vec::with_capacity(16),
        }
    }

    /// Register a new node and return its dense id.
    pub fn register_node(&mut self) -> NodeId {
        let id = NodeId(self.ref_counts.len() as u32);
        self.ref_counts.push(0);
        id
    }

    /// Number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.ref_counts.len()
    }

    /// Append an edge to the edge list. No duplicate check is performed.
    pub fn link(&mut self, edge: Edge) -> EdgeId {
        assert!(
            edge.from.index() < self.ref_counts.len() && edge.to.index() < self.ref_counts.len(),
            "edge endpoints must be registered nodes"
        );
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(edge);
        id
    }

    /// Look up an edge by id.
    pub fn edge(&self, id: EdgeId) -> Edge {
        self.edges[id.index()]
    }

    /// All edges, in link order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Iterate over edges pointing at `node`.
    ///
    /// Linear scan over the edge list; pass counts are small enough that an
    /// adjacency index has not been worth carrying.
    pub fn incoming_edges(&self, node: NodeId) -> impl Iterator<Item = (EdgeId, Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(move |(_, edge)| edge.to == node)
            .map(|(i, edge)| (EdgeId(i as u32), *edge))
    }

    /// Iterate over edges leaving `node`.
    pub fn outgoing_edges(&self, node: NodeId) -> impl Iterator<Item = (EdgeId, Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(move |(_, edge)| edge.from == node)
            .map(|(i, edge)| (EdgeId(i as u32), *edge))
    }

    /// An edge is valid when neither of its endpoints has been culled.
    pub fn is_edge_valid(&self, edge: Edge) -> bool {
        !self.is_culled(edge.from) && !self.is_culled(edge.to)
    }

    /// Mark `node` as a graph target. Target nodes are never culled and
    /// shield their transitive producers.
    ///
    /// # Panics
    ///
    /// Panics if the node is already referenced (refcount must be 0).
    pub fn make_target(&mut self, node: NodeId) {
        let count = &mut self.ref_counts[node.index()];
        assert!(*count == 0, "make_target on an already-referenced node");
        *count = TARGET;
    }

    /// Check whether `node` is a target.
    pub fn is_target(&self, node: NodeId) -> bool {
        self.ref_counts[node.index()] >= TARGET
    }

    /// Check whether `node` was culled.
    ///
    /// Meaningful only after [`cull`](Self::cull) has run; reference counts
    /// are zero until then.
    pub fn is_culled(&self, node: NodeId) -> bool {
        self.ref_counts[node.index()] == 0
    }

    /// Reference count of `node`: 1 for targets, the actual count otherwise.
    pub fn ref_count(&self, node: NodeId) -> u32 {
        let count = self.ref_counts[node.index()];
        if count >= TARGET { 1 } else { count }
    }

    /// Cull every node not transitively required by a target.
    ///
    /// Reference counts are seeded from out-degrees, so a node with no
    /// surviving consumer drops to zero and releases its own producers in
    /// turn. `on_culled` is invoked exactly once for each node that becomes
    /// culled, in cascade order.
    pub fn cull(&mut self, mut on_culled: impl FnMut(NodeId)) {
        firethorn_core::profiling::profile_function!();

        // Out-degree becomes the reference count: a node is alive only if
        // something downstream depends on it.
        for i in 0..self.edges.len() {
            let from = self.edges[i].from;
            self.ref_counts[from.index()] += 1;
        }

        let mut stack: Vec<NodeId> = Vec::with_capacity(self.ref_counts.len());
        for (i, &count) in self.ref_counts.iter().enumerate() {
            if count == 0 {
                stack.push(NodeId(i as u32));
            }
        }

        while let Some(node) = stack.pop() {
            for i in 0..self.edges.len() {
                let edge = self.edges[i];
                if edge.to == node {
                    let count = &mut self.ref_counts[edge.from.index()];
                    *count -= 1;
                    if *count == 0 {
                        stack.push(edge.from);
                    }
                }
            }
            on_culled(node);
        }
    }

    /// Remove all nodes and edges, preserving allocations.
    pub fn clear(&mut self) {
        self.ref_counts.clear();
        self.edges.clear();
    }

    /// Write a Graphviz rendering of the graph.
    ///
    /// `node_style` supplies the full attribute block for each node (label,
    /// fill color, ...). Edges with both endpoints alive are drawn solid
    /// `red2`; edges with a culled endpoint dashed `red4`. The output is
    /// deterministic for a given graph.
    pub fn export_graphviz<W: Write>(
        &self,
        out: &mut W,
        name: &str,
        mut node_style: impl FnMut(NodeId) -> String,
    ) -> io::Result<()> {
        writeln!(out, "digraph \"{name}\" {{")?;
        writeln!(out, "rankdir = LR")?;
        writeln!(out, "bgcolor = black")?;
        writeln!(out, "node [shape=rectangle, fontname=\"helvetica\", fontsize=10]")?;
        writeln!(out)?;

        for i in 0..self.ref_counts.len() {
            let id = NodeId(i as u32);
            writeln!(out, "\"N{i}\" {}", node_style(id))?;
        }
        writeln!(out)?;

        for i in 0..self.ref_counts.len() {
            let id = NodeId(i as u32);
            let (valid, invalid): (Vec<_>, Vec<_>) = self
                .outgoing_edges(id)
                .partition(|(_, edge)| self.is_edge_valid(*edge));

            if !valid.is_empty() {
                write!(out, "N{i} -> {{ ")?;
                for (_, edge) in &valid {
                    write!(out, "N{} ", edge.to.index())?;
                }
                writeln!(out, "}} [color=red2]")?;
            }
            if !invalid.is_empty() {
                write!(out, "N{i} -> {{ ")?;
                for (_, edge) in &invalid {
                    write!(out, "N{} ", edge.to.index())?;
                }
                writeln!(out, "}} [color=red4 style=dashed]")?;
            }
        }

        writeln!(out, "}}")
    }
}

impl Poolable for DependencyGraph {
    fn new_empty() -> Self {
        Self::new()
    }
    fn reset(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(graph: &mut DependencyGraph, from: NodeId, to: NodeId) -> EdgeId {
        graph.link(Edge { from, to })
    }

    #[test]
    fn test_linear_chain_with_target() {
        let mut graph = DependencyGraph::new();
        let n0 = graph.register_node();
        let n1 = graph.register_node();
        let n2 = graph.register_node();
        link(&mut graph, n0, n1);
        link(&mut graph, n1, n2);
        graph.make_target(n2);

        let mut culled = Vec::new();
        graph.cull(|node| culled.push(node));

        assert!(culled.is_empty());
        assert!(!graph.is_culled(n0));
        assert!(!graph.is_culled(n1));
        assert!(!graph.is_culled(n2));
        assert_eq!(graph.ref_count(n0), 1);
        assert_eq!(graph.ref_count(n1), 1);
        assert_eq!(graph.ref_count(n2), 1);
    }

    #[test]
    fn test_branch_cull() {
        let mut graph = DependencyGraph::new();
        let n0 = graph.register_node();
        let n1 = graph.register_node();
        let n2 = graph.register_node();
        let n1_0 = graph.register_node();
        link(&mut graph, n0, n1);
        link(&mut graph, n1, n2);
        link(&mut graph, n1, n1_0);
        graph.make_target(n2);

        let mut culled = Vec::new();
        graph.cull(|node| culled.push(node));

        assert_eq!(culled, vec![n1_0]);
        assert!(graph.is_culled(n1_0));
        assert!(!graph.is_culled(n0));
        assert!(!graph.is_culled(n1));
        assert!(!graph.is_culled(n2));
        assert_eq!(graph.ref_count(n0), 1);
        assert_eq!(graph.ref_count(n1), 1);
        assert_eq!(graph.ref_count(n2), 1);
    }

    #[test]
    fn test_deep_cull_cascade() {
        let mut graph = DependencyGraph::new();
        let n0 = graph.register_node();
        let n1 = graph.register_node();
        let n2 = graph.register_node();
        let n1_0 = graph.register_node();
        let n1_0_0 = graph.register_node();
        let n1_0_1 = graph.register_node();
        link(&mut graph, n0, n1);
        link(&mut graph, n1, n2);
        link(&mut graph, n1, n1_0);
        link(&mut graph, n1_0, n1_0_0);
        link(&mut graph, n1_0, n1_0_1);
        graph.make_target(n2);

        let mut culled = Vec::new();
        graph.cull(|node| culled.push(node));

        for node in [n1_0, n1_0_0, n1_0_1] {
            assert!(graph.is_culled(node));
            assert_eq!(culled.iter().filter(|&&n| n == node).count(), 1);
        }
        assert_eq!(culled.len(), 3);
        for node in [n0, n1, n2] {
            assert!(!graph.is_culled(node));
            assert_eq!(graph.ref_count(node), 1);
        }
    }

    #[test]
    fn test_cull_without_targets_eliminates_everything() {
        let mut graph = DependencyGraph::new();
        let n0 = graph.register_node();
        let n1 = graph.register_node();
        link(&mut graph, n0, n1);

        let mut culled = Vec::new();
        graph.cull(|node| culled.push(node));

        assert_eq!(culled.len(), 2);
        assert!(graph.is_culled(n0));
        assert!(graph.is_culled(n1));
    }

    #[test]
    fn test_edge_validity_after_cull() {
        let mut graph = DependencyGraph::new();
        let n0 = graph.register_node();
        let n1 = graph.register_node();
        let n1_0 = graph.register_node();
        let alive = link(&mut graph, n0, n1);
        let dead = link(&mut graph, n0, n1_0);
        graph.make_target(n1);

        graph.cull(|_| {});

        assert!(graph.is_edge_valid(graph.edge(alive)));
        assert!(!graph.is_edge_valid(graph.edge(dead)));
    }

    #[test]
    fn test_target_survives_with_no_consumers() {
        let mut graph = DependencyGraph::new();
        let n0 = graph.register_node();
        graph.make_target(n0);

        let mut culled = Vec::new();
        graph.cull(|node| culled.push(node));

        assert!(culled.is_empty());
        assert!(!graph.is_culled(n0));
        assert!(graph.is_target(n0));
        assert_eq!(graph.ref_count(n0), 1);
    }

    #[test]
    #[should_panic(expected = "already-referenced")]
    fn test_make_target_twice_panics() {
        let mut graph = DependencyGraph::new();
        let n0 = graph.register_node();
        graph.make_target(n0);
        graph.make_target(n0);
    }

    #[test]
    fn test_clear() {
        let mut graph = DependencyGraph::new();
        let n0 = graph.register_node();
        let n1 = graph.register_node();
        link(&mut graph, n0, n1);

        graph.clear();

        assert_eq!(graph.node_count(), 0);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_pooled_graph_reuse_across_frames() {
        use firethorn_core::pool::Pooled;

        let mut frame = Pooled::<DependencyGraph>::default();

        let graph = frame.activate();
        let n0 = graph.register_node();
        let n1 = graph.register_node();
        graph.link(Edge { from: n0, to: n1 });
        assert_eq!(graph.node_count(), 2);

        // frame boundary: tables cleared, allocations retained
        frame.release();
        assert!(frame.is_pooled());
        assert_eq!(frame.inner().node_count(), 0);
        assert!(frame.inner().edges().is_empty());

        let graph = frame.activate();
        assert_eq!(graph.node_count(), 0);
        let n0 = graph.register_node();
        graph.make_target(n0);
        graph.cull(|_| {});
        assert!(!graph.is_culled(n0));
    }

    #[test]
    fn test_export_graphviz_marks_culled_edges() {
        let mut graph = DependencyGraph::new();
        let n0 = graph.register_node();
        let n1 = graph.register_node();
        let n1_0 = graph.register_node();
        link(&mut graph, n0, n1);
        link(&mut graph, n0, n1_0);
        graph.make_target(n1);
        graph.cull(|_| {});

        let mut out = Vec::new();
        graph
            .export_graphviz(&mut out, "test", |node| {
                format!("[label=\"node {}\"]", node.index())
            })
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("digraph \"test\" {"));
        assert!(text.contains("[color=red2]"));
        assert!(text.contains("[color=red4 style=dashed]"));
        assert!(text.contains("\"N0\" [label=\"node 0\"]"));
    }
}
