//! Physical port numbering of a k-ary fat-tree link.
//!
//! Ports are 1-indexed. On a pod switch the first k/2 ports face down
//! (hosts for an edge switch, edge switches for an aggregation switch)
//! and the last k/2 face up. On a core switch port x+1 faces pod x.
//! This is the wiring the compiled tables assume; discovery may disagree,
//! which is what table resync is for.

use crate::addr::Address;

/// Port pair `(port_at_a, port_at_b)` of the fat-tree link between `a`
/// and `b`, or `None` when the two addresses are not adjacent in a
/// k-ary fat-tree.
pub fn wire_ports(k: usize, a: &Address, b: &Address) -> Option<(u16, u16)> {
    if a.is_host(k) && b.is_edge_switch(k) {
        return host_edge(a, b);
    }
    if a.is_edge_switch(k) && b.is_host(k) {
        return host_edge(b, a).map(swap);
    }
    if a.is_edge_switch(k) && b.is_aggr_switch(k) {
        return edge_aggr(a, b);
    }
    if a.is_aggr_switch(k) && b.is_edge_switch(k) {
        return edge_aggr(b, a).map(swap);
    }
    if a.is_aggr_switch(k) && b.is_core(k) {
        return aggr_core(k, a, b);
    }
    if a.is_core(k) && b.is_aggr_switch(k) {
        return aggr_core(k, b, a).map(swap);
    }
    None
}

fn swap((x, y): (u16, u16)) -> (u16, u16) {
    (y, x)
}

/// Host has a single port; the edge switch reaches host offset h on
/// downward port h-1 (offsets start at 2).
fn host_edge(host: &Address, edge: &Address) -> Option<(u16, u16)> {
    if host.pod() != edge.pod() || host.switch_index() != edge.switch_index() {
        return None;
    }
    let off = host.host_offset();
    if off < 2 {
        return None;
    }
    Some((1, (off - 1) as u16))
}

/// Pod-internal bipartite mesh: edge switch z reaches aggregation switch
/// w on upward port w+1; the aggregation switch answers on downward
/// port z+1.
fn edge_aggr(edge: &Address, aggr: &Address) -> Option<(u16, u16)> {
    if edge.pod() != aggr.pod() {
        return None;
    }
    Some((
        (aggr.switch_index() + 1) as u16,
        (edge.switch_index() + 1) as u16,
    ))
}

/// Aggregation switch index a (zero-based within the pod's upper layer)
/// owns core row a+1; core column c sits on its upward port k/2+c. The
/// core switch reaches pod x on port x+1.
fn aggr_core(k: usize, aggr: &Address, core: &Address) -> Option<(u16, u16)> {
    let half = k / 2;
    let row = core.switch_index() as usize;
    let col = core.host_offset() as usize;
    if !(1..=half).contains(&row) || !(1..=half).contains(&col) {
        return None;
    }
    if aggr.switch_index() as usize != half + row - 1 {
        return None;
    }
    Some(((half + col) as u16, (aggr.pod() as u16) + 1))
}
