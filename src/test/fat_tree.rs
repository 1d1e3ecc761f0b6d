use std::collections::HashSet;

use crate::graph::FabricRole;
use crate::topo::{TopoError, build_fat_tree};

#[test]
fn rejects_odd_or_tiny_port_counts() {
    for k in [0, 1, 3, 5, 7] {
        assert!(matches!(
            build_fat_tree(k),
            Err(TopoError::BadPortCount { k: got }) if got == k
        ));
    }
}

#[test]
fn k4_has_the_textbook_element_counts() {
    let t = build_fat_tree(4).expect("k=4 builds");
    assert_eq!(t.servers.len(), 16);
    assert_eq!(t.switches.len(), 20);
    assert_eq!(t.core_switches.len(), 4);
    assert_eq!(t.pods.len(), 4);
    // 16 host links + 4 pods * 4 mesh links + 4 cores * 4 uplinks
    assert_eq!(t.graph().edge_count(), 48);
}

#[test]
fn k6_scales_as_expected() {
    let t = build_fat_tree(6).expect("k=6 builds");
    assert_eq!(t.servers.len(), 54);
    assert_eq!(t.switches.len(), 45);
    assert_eq!(t.core_switches.len(), 9);
    assert_eq!(t.pods.len(), 6);
}

#[test]
fn every_switch_has_degree_k_and_every_host_degree_one() {
    let t = build_fat_tree(4).expect("k=4 builds");
    for &sw in &t.switches {
        assert_eq!(t.graph().degree(sw), 4, "{}", t.graph().node(sw).name);
    }
    for &h in &t.servers {
        assert_eq!(t.graph().degree(h), 1, "{}", t.graph().node(h).name);
    }
}

#[test]
fn names_encode_positions() {
    let t = build_fat_tree(4).expect("k=4 builds");
    let g = t.graph();

    assert!(g.node_by_name("10.0.0.1").is_some(), "edge 0 of pod 0");
    assert!(g.node_by_name("10.0.2.1").is_some(), "aggr 0 of pod 0");
    assert!(g.node_by_name("10.3.1.3").is_some(), "host 1 of edge 1, pod 3");
    assert!(g.node_by_name("10.4.1.1").is_some(), "first core");
    assert!(g.node_by_name("10.4.2.2").is_some(), "last core");
    assert!(g.node_by_name("10.4.0.0").is_none());

    let aggr = t.pods[1].aggr[0];
    assert_eq!(t.addr_of(aggr).to_string(), "10.1.2.1");
    assert_eq!(g.node(aggr).role, Some(FabricRole::Aggregate));
}

#[test]
fn each_core_switch_reaches_every_pod_exactly_once() {
    let t = build_fat_tree(6).expect("k=6 builds");
    let g = t.graph();
    for &core in &t.core_switches {
        let pods: HashSet<u8> = g.neighbors(core).map(|nb| t.addr_of(nb).pod()).collect();
        assert_eq!(pods.len(), 6, "{}", g.node(core).name);
    }
}

#[test]
fn aggregation_switch_owns_a_contiguous_core_run() {
    // Aggregation switch a of any pod links cores a*k/2 .. (a+1)*k/2.
    let t = build_fat_tree(4).expect("k=4 builds");
    let g = t.graph();
    for pod in &t.pods {
        for (a, &aggr) in pod.aggr.iter().enumerate() {
            let mut cores: Vec<_> = g
                .neighbors(aggr)
                .filter(|&nb| t.core_switches.contains(&nb))
                .collect();
            cores.sort();
            assert_eq!(cores, t.core_switches[a * 2..(a + 1) * 2]);
        }
    }
}
