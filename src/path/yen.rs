//! Loopless k-shortest-paths (Yen's algorithm) and n-way ECMP.
//!
//! Both run the same accepted-list/candidate-list loop; ECMP merely stops
//! accepting as soon as the best remaining candidate is strictly longer
//! than the last accepted path, so it collects the equal-cost front and
//! nothing more.

use crate::graph::{Graph, NodeId};

use super::shortest::construct_path;
use super::txn::GraphTxn;

/// Up to `k` loopless paths from `source` to `sink`, sorted by length,
/// shortest first. The first entry is always a true shortest path.
pub fn k_shortest_paths(
    graph: &mut Graph,
    source: NodeId,
    sink: NodeId,
    k: usize,
) -> Vec<Vec<NodeId>> {
    yen(graph, source, sink, k, false)
}

/// Up to `n` equal-cost shortest paths from `source` to `sink`. Stops
/// growing once the next best candidate is longer than the paths already
/// accepted; the result may therefore hold fewer than `n` paths.
pub fn n_way_ecmp(graph: &mut Graph, source: NodeId, sink: NodeId, n: usize) -> Vec<Vec<NodeId>> {
    yen(graph, source, sink, n, true)
}

fn yen(
    graph: &mut Graph,
    source: NodeId,
    sink: NodeId,
    k: usize,
    stop_on_longer: bool,
) -> Vec<Vec<NodeId>> {
    let mut accepted: Vec<Vec<NodeId>> = Vec::new();
    if k == 0 {
        return accepted;
    }

    let first = construct_path(graph, source, sink);
    if first.len() < 2 {
        // No path, or source == sink.
        return accepted;
    }
    accepted.push(first);

    let mut candidates: Vec<Vec<NodeId>> = Vec::new();

    while accepted.len() < k {
        let prev = accepted.last().expect("accepted is non-empty").clone();

        // Spur node ranges from the source to the next-to-last node of
        // the previously accepted path.
        for i in 0..prev.len().saturating_sub(1) {
            let spur = prev[i];
            let root = &prev[..i];

            let mut txn = GraphTxn::new(graph);

            // Remove the next edge of every accepted path sharing this
            // root, forcing the spur path to diverge.
            for p in &accepted {
                if p.len() >= i + 2 && p[..i] == *root {
                    txn.remove_edge_between(p[i], p[i + 1]);
                }
            }
            // Root-path nodes (except the spur node itself) must not be
            // revisited by the spur path.
            for &node in root {
                if node != spur {
                    txn.detach_node(node);
                }
            }

            let spur_path = construct_path(txn.graph(), spur, sink);
            drop(txn);

            if spur_path.len() < 2 {
                continue;
            }
            let mut total: Vec<NodeId> = root.to_vec();
            total.extend(spur_path);
            if total.first() == Some(&source)
                && total.last() == Some(&sink)
                && !candidates.contains(&total)
                && !accepted.contains(&total)
            {
                candidates.push(total);
            }
        }

        if candidates.is_empty() {
            // Alternatives exhausted.
            break;
        }
        candidates.sort_by_key(|p| p.len());
        let next = candidates.remove(0);
        if stop_on_longer && next.len() > prev.len() {
            break;
        }
        accepted.push(next);
    }

    accepted.sort_by_key(|p| p.len());
    accepted
}
