//! Single-source shortest path over a unit-weight graph.
//!
//! Dijkstra with uniform edge weight 1 (equivalent to BFS). The frontier
//! pick is the first minimum found; which of several equal-cost parents
//! ends up as predecessor is arbitrary and must not be relied on.

use crate::graph::{Graph, NodeId};

/// Result of a full shortest-path run from one source.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    src: NodeId,
    dist: Vec<Option<u32>>,
    prev: Vec<Option<NodeId>>,
}

impl ShortestPaths {
    pub fn source(&self) -> NodeId {
        self.src
    }

    /// Hop distance to `n`; `None` means unreachable.
    pub fn dist(&self, n: NodeId) -> Option<u32> {
        self.dist[n.0]
    }

    pub fn prev(&self, n: NodeId) -> Option<NodeId> {
        self.prev[n.0]
    }

    /// Ordered node list from the source to `dst` inclusive, via the
    /// predecessor chain. Empty when `dst` is the source or unreachable.
    pub fn path_to(&self, dst: NodeId) -> Vec<NodeId> {
        if dst == self.src || self.prev[dst.0].is_none() {
            return Vec::new();
        }
        let mut path = vec![dst];
        let mut at = dst;
        while let Some(p) = self.prev[at.0] {
            path.push(p);
            at = p;
        }
        path.reverse();
        path
    }
}

pub fn shortest_paths(graph: &Graph, src: NodeId) -> ShortestPaths {
    let n = graph.node_count();
    let mut dist: Vec<Option<u32>> = vec![None; n];
    let mut prev: Vec<Option<NodeId>> = vec![None; n];
    let mut done = vec![false; n];
    dist[src.0] = Some(0);

    while let Some((u, du)) = select_min(&dist, &done) {
        done[u.0] = true;
        for v in graph.neighbors(u) {
            if done[v.0] {
                continue;
            }
            let alt = du + 1;
            if dist[v.0].is_none_or(|d| alt < d) {
                dist[v.0] = Some(alt);
                prev[v.0] = Some(u);
            }
        }
    }

    ShortestPaths { src, dist, prev }
}

/// True iff some path connects `src` and `dst`. Runs the same loop as
/// [`shortest_paths`] but stops as soon as `dst` is finalized.
pub fn is_path(graph: &Graph, src: NodeId, dst: NodeId) -> bool {
    let n = graph.node_count();
    let mut dist: Vec<Option<u32>> = vec![None; n];
    let mut done = vec![false; n];
    dist[src.0] = Some(0);

    while let Some((u, du)) = select_min(&dist, &done) {
        if u == dst {
            return true;
        }
        done[u.0] = true;
        for v in graph.neighbors(u) {
            if done[v.0] {
                continue;
            }
            let alt = du + 1;
            if dist[v.0].is_none_or(|d| alt < d) {
                dist[v.0] = Some(alt);
            }
        }
    }
    false
}

/// Shortest path from `src` to `dst` as an inclusive node list.
/// Empty when `src == dst` or no path exists.
pub fn construct_path(graph: &Graph, src: NodeId, dst: NodeId) -> Vec<NodeId> {
    if src == dst {
        return Vec::new();
    }
    shortest_paths(graph, src).path_to(dst)
}

/// First not-yet-finalized node with minimal finite distance.
fn select_min(dist: &[Option<u32>], done: &[bool]) -> Option<(NodeId, u32)> {
    let mut best: Option<(NodeId, u32)> = None;
    for (i, d) in dist.iter().enumerate() {
        if done[i] {
            continue;
        }
        if let Some(d) = *d {
            if best.is_none_or(|(_, b)| d < b) {
                best = Some((NodeId(i), d));
            }
        }
    }
    best
}
