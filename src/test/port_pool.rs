use crate::addr::Address;
use crate::routing::PortPool;

fn addr(s: &str) -> Address {
    s.parse().expect(s)
}

#[test]
fn a_host_has_exactly_one_port() {
    let mut pool = PortPool::new(4);
    let host = addr("10.0.0.2");
    let edge = addr("10.0.0.1");
    assert_eq!(pool.take(&host, &edge), Some(1));
    assert_eq!(pool.take(&host, &edge), None);
}

#[test]
fn edge_switch_hands_out_downstream_then_upstream_ranges() {
    let mut pool = PortPool::new(4);
    let edge = addr("10.0.0.1");
    let host = addr("10.0.0.2");
    let aggr = addr("10.0.2.1");

    // Host-facing links consume the downward half in order.
    assert_eq!(pool.take(&edge, &host), Some(1));
    assert_eq!(pool.take(&edge, &host), Some(2));
    assert_eq!(pool.take(&edge, &host), None);

    // Aggregation-facing links consume the upward half.
    assert_eq!(pool.take(&edge, &aggr), Some(3));
    assert_eq!(pool.take(&edge, &aggr), Some(4));
    assert_eq!(pool.take(&edge, &aggr), None);
}

#[test]
fn aggregation_switch_splits_edge_and_core_directions() {
    let mut pool = PortPool::new(4);
    let aggr = addr("10.1.2.1");
    let edge = addr("10.1.0.1");
    let core = addr("10.4.1.1");

    assert_eq!(pool.take(&aggr, &core), Some(3));
    assert_eq!(pool.take(&aggr, &edge), Some(1));
    assert_eq!(pool.take(&aggr, &core), Some(4));
    assert_eq!(pool.take(&aggr, &edge), Some(2));
    assert_eq!(pool.take(&aggr, &core), None);
    assert_eq!(pool.take(&aggr, &edge), None);
}

#[test]
fn switches_draw_from_independent_pools() {
    let mut pool = PortPool::new(4);
    let host = addr("10.0.0.2");
    let e0 = addr("10.0.0.1");
    let e1 = addr("10.0.1.1");

    assert_eq!(pool.take(&e0, &host), Some(1));
    assert_eq!(pool.take(&e1, &host), Some(1));
}

#[test]
fn larger_fabrics_get_wider_ranges() {
    let mut pool = PortPool::new(8);
    let edge = addr("10.0.0.1");
    let aggr = addr("10.0.4.1");
    for want in 5..=8 {
        assert_eq!(pool.take(&edge, &aggr), Some(want));
    }
    assert_eq!(pool.take(&edge, &aggr), None);
}
