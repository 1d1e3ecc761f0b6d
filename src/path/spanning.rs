//! Spanning-tree selection over discovered links.
//!
//! Kruskal reduced to the unit-weight case: since every link costs the
//! same, edges are taken in input order and any spanning tree will do.
//! Used to restrict controller-driven flooding to a loop-free domain.

/// Select a spanning subset of `edges`, processing them in input order
/// and keeping each edge that joins two components. Vertices absent from
/// `vertices` are ignored.
pub fn kruskal<V: PartialEq + Clone>(vertices: &[V], edges: &[(V, V)]) -> Vec<(V, V)> {
    // A forest of component membership lists, one per vertex to start.
    let mut forest: Vec<Vec<V>> = vertices.iter().map(|v| vec![v.clone()]).collect();
    let mut chosen = Vec::new();

    for (u, v) in edges {
        if forest.len() == 1 {
            break;
        }
        let Some(first) = forest.iter().position(|tree| tree.contains(u)) else {
            continue;
        };
        if forest[first].contains(v) {
            continue;
        }
        let Some(second) = forest.iter().position(|tree| tree.contains(v)) else {
            continue;
        };
        chosen.push((u.clone(), v.clone()));
        let merged = forest.remove(second);
        let first = if second < first { first - 1 } else { first };
        forest[first].extend(merged);
    }

    chosen
}
