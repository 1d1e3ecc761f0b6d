//! Scoped graph mutation for the path search.
//!
//! Yen's algorithm removes edges and whole nodes while hunting for spur
//! paths and must hand the graph back exactly as it found it. `GraphTxn`
//! records every removal and reconnects on drop, so restoration also
//! happens on early breaks and panics.

use crate::graph::{Graph, NodeId};

pub struct GraphTxn<'a> {
    graph: &'a mut Graph,
    removed: Vec<(NodeId, NodeId)>,
}

impl<'a> GraphTxn<'a> {
    pub fn new(graph: &'a mut Graph) -> Self {
        Self {
            graph,
            removed: Vec::new(),
        }
    }

    /// Read-only view for running searches inside the transaction.
    pub fn graph(&self) -> &Graph {
        self.graph
    }

    /// Remove the edge joining `a` and `b`, if any. Returns whether an
    /// edge was removed.
    pub fn remove_edge_between(&mut self, a: NodeId, b: NodeId) -> bool {
        match self.graph.edge_between(a, b) {
            Some(id) => {
                let ends = self
                    .graph
                    .disconnect(id)
                    .expect("edge vanished mid-transaction");
                self.removed.push(ends);
                true
            }
            None => false,
        }
    }

    /// Take a node out of play by removing every incident edge. The node
    /// itself stays in the arena; with no edges it cannot be traversed.
    pub fn detach_node(&mut self, n: NodeId) {
        while let Some(&id) = self.graph.node(n).edge_ids().first() {
            let ends = self
                .graph
                .disconnect(id)
                .expect("edge vanished mid-transaction");
            self.removed.push(ends);
        }
    }

    /// Number of recorded removals (diagnostic).
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }
}

impl Drop for GraphTxn<'_> {
    fn drop(&mut self) {
        // Reconnect in reverse removal order.
        for (a, b) in self.removed.drain(..).rev() {
            self.graph.connect(a, b);
        }
    }
}
