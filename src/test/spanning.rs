use crate::graph::NodeId;
use crate::path::kruskal;

#[test]
fn picks_edges_in_input_order_and_skips_cycles() {
    let vertices = ["a", "b", "c", "d"];
    let edges = [("a", "b"), ("b", "c"), ("a", "c"), ("c", "d")];
    let tree = kruskal(&vertices, &edges);
    // ("a","c") would close a cycle and is skipped.
    assert_eq!(tree, vec![("a", "b"), ("b", "c"), ("c", "d")]);
}

#[test]
fn connected_input_yields_a_spanning_tree() {
    let vertices: Vec<NodeId> = (0..6).map(NodeId).collect();
    // A 6-cycle plus chords.
    let mut edges = Vec::new();
    for i in 0..6 {
        edges.push((NodeId(i), NodeId((i + 1) % 6)));
    }
    edges.push((NodeId(0), NodeId(3)));
    edges.push((NodeId(1), NodeId(4)));

    let tree = kruskal(&vertices, &edges);
    assert_eq!(tree.len(), vertices.len() - 1);

    // Every vertex is covered by the tree.
    for v in &vertices {
        assert!(
            tree.iter().any(|(x, y)| x == v || y == v),
            "vertex {v:?} missing"
        );
    }
}

#[test]
fn disconnected_input_yields_a_forest() {
    let vertices = ["a", "b", "c", "d"];
    let edges = [("a", "b"), ("c", "d")];
    let tree = kruskal(&vertices, &edges);
    assert_eq!(tree, vec![("a", "b"), ("c", "d")]);
}

#[test]
fn self_and_repeated_edges_never_enter_the_tree() {
    let vertices = ["a", "b"];
    let edges = [("a", "a"), ("a", "b"), ("a", "b")];
    let tree = kruskal(&vertices, &edges);
    assert_eq!(tree, vec![("a", "b")]);
}
