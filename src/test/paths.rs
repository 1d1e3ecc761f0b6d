use std::collections::HashSet;

use crate::graph::{Graph, NodeId};
use crate::path::{
    GraphTxn, construct_path, is_path, k_shortest_paths, n_way_ecmp, shortest_paths,
};

/// Diamond with a long detour:
///
///   0 - 1 - 3
///   |       |
///   2 ------+
///   0 - 4 - 5 - 3
fn diamond_with_detour() -> (Graph, [NodeId; 6]) {
    let mut g = Graph::default();
    let n: Vec<NodeId> = (0..6).map(|i| g.add_switch(i.to_string())).collect();
    g.connect(n[0], n[1]);
    g.connect(n[1], n[3]);
    g.connect(n[0], n[2]);
    g.connect(n[2], n[3]);
    g.connect(n[0], n[4]);
    g.connect(n[4], n[5]);
    g.connect(n[5], n[3]);
    (g, [n[0], n[1], n[2], n[3], n[4], n[5]])
}

fn adjacency_snapshot(g: &Graph) -> Vec<Vec<NodeId>> {
    g.node_ids()
        .map(|n| {
            let mut nbrs: Vec<_> = g.neighbors(n).collect();
            nbrs.sort();
            nbrs
        })
        .collect()
}

#[test]
fn dijkstra_finds_hop_distances_from_the_source() {
    let (g, [a, b, c, d, e, f]) = diamond_with_detour();
    let sp = shortest_paths(&g, a);
    assert_eq!(sp.dist(a), Some(0));
    assert_eq!(sp.dist(b), Some(1));
    assert_eq!(sp.dist(c), Some(1));
    assert_eq!(sp.dist(d), Some(2));
    assert_eq!(sp.dist(e), Some(1));
    assert_eq!(sp.dist(f), Some(2));

    let path = sp.path_to(d);
    assert_eq!(path.len(), 3);
    assert_eq!(path[0], a);
    assert_eq!(path[2], d);
}

#[test]
fn unreachable_nodes_have_no_distance_or_path() {
    let mut g = Graph::default();
    let a = g.add_switch("a");
    let b = g.add_switch("b");
    let island = g.add_switch("island");
    g.connect(a, b);

    let sp = shortest_paths(&g, a);
    assert_eq!(sp.dist(island), None);
    assert!(sp.path_to(island).is_empty());
    assert!(!is_path(&g, a, island));
    assert!(is_path(&g, a, b));
}

#[test]
fn construct_path_of_a_node_to_itself_is_empty() {
    let (g, [a, ..]) = diamond_with_detour();
    assert!(construct_path(&g, a, a).is_empty());
}

#[test]
fn k_shortest_paths_are_sorted_loopless_and_distinct() {
    let (mut g, [a, _, _, d, _, _]) = diamond_with_detour();
    let paths = k_shortest_paths(&mut g, a, d, 4);

    assert_eq!(paths.len(), 3);
    assert_eq!(paths[0].len(), 3);
    assert_eq!(paths[1].len(), 3);
    assert_eq!(paths[2].len(), 4);

    let mut seen = HashSet::new();
    for p in &paths {
        assert_eq!(p.first(), Some(&a));
        assert_eq!(p.last(), Some(&d));
        let nodes: HashSet<_> = p.iter().collect();
        assert_eq!(nodes.len(), p.len(), "looping path {p:?}");
        assert!(seen.insert(p.clone()), "duplicate path {p:?}");
    }
}

#[test]
fn k_shortest_paths_leaves_the_graph_untouched() {
    let (mut g, [a, _, _, d, _, _]) = diamond_with_detour();
    let edges_before = g.edge_count();
    let adj_before = adjacency_snapshot(&g);

    let _ = k_shortest_paths(&mut g, a, d, 4);

    assert_eq!(g.edge_count(), edges_before);
    assert_eq!(adjacency_snapshot(&g), adj_before);
}

#[test]
fn ecmp_keeps_only_the_equal_cost_front() {
    let (mut g, [a, _, _, d, _, _]) = diamond_with_detour();
    let paths = n_way_ecmp(&mut g, a, d, 4);

    assert_eq!(paths.len(), 2, "only the two 2-hop paths are equal cost");
    for p in &paths {
        assert_eq!(p.len(), 3);
    }
}

#[test]
fn requesting_fewer_paths_caps_the_result() {
    let (mut g, [a, _, _, d, _, _]) = diamond_with_detour();
    assert_eq!(k_shortest_paths(&mut g, a, d, 1).len(), 1);
    assert!(k_shortest_paths(&mut g, a, d, 0).is_empty());
}

#[test]
fn no_paths_between_disconnected_components() {
    let mut g = Graph::default();
    let a = g.add_switch("a");
    let b = g.add_switch("b");
    assert!(k_shortest_paths(&mut g, a, b, 3).is_empty());
    assert!(n_way_ecmp(&mut g, a, b, 3).is_empty());
}

#[test]
fn txn_restores_removed_edges_and_detached_nodes_on_drop() {
    let (mut g, [a, b, c, d, _, _]) = diamond_with_detour();
    let edges_before = g.edge_count();
    let adj_before = adjacency_snapshot(&g);

    {
        let mut txn = GraphTxn::new(&mut g);
        assert!(txn.remove_edge_between(a, b));
        assert!(!txn.remove_edge_between(a, b), "already gone");
        txn.detach_node(c);
        assert_eq!(txn.removed_count(), 3);
        assert!(!txn.graph().is_neighbor(a, b));
        assert!(!txn.graph().is_neighbor(c, d));
    }

    assert_eq!(g.edge_count(), edges_before);
    assert_eq!(adjacency_snapshot(&g), adj_before);
    assert!(is_path(&g, a, d));
}
