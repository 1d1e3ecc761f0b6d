use crate::addr::Address;
use crate::ctl::{ControlPlane, LinkEvent, flood_domain};
use crate::routing::wire_ports;
use crate::topo::build_fat_tree;

fn addr(s: &str) -> Address {
    s.parse().expect(s)
}

#[test]
fn packet_in_lookups_answer_from_the_compiled_tables() {
    let plane = ControlPlane::new(4).expect("k=4 compiles");
    assert_eq!(plane.lookup("10.4.1.1", &addr("10.2.0.2")), Some(3));
    assert_eq!(plane.lookup("10.0.0.1", &addr("10.0.2.1")), Some(4));
    assert_eq!(plane.lookup("10.9.9.9", &addr("10.0.0.2")), None);
}

#[test]
fn switch_enter_resyncs_ports_once() {
    let plane = ControlPlane::new(4).expect("k=4 compiles");
    let links = vec![LinkEvent::new("10.4.1.1", "10.0.2.1", 7)];

    assert_eq!(plane.on_switch_enter(&links), 1);
    assert_eq!(plane.lookup("10.4.1.1", &addr("10.0.1.2")), Some(7));
    // Re-announcing the same link changes nothing.
    assert_eq!(plane.on_switch_enter(&links), 0);

    plane.with_tables(|t| assert_eq!(t.k(), 4));
}

/// Derive both directions of every switch-to-switch link of a k=2
/// fat-tree from the physical wiring.
fn k2_discovery() -> (Vec<String>, Vec<LinkEvent>) {
    let k = 2;
    let t = build_fat_tree(k).expect("k=2 builds");
    let g = t.graph();

    let mut switches = Vec::new();
    let mut links = Vec::new();
    for &sw in &t.switches {
        let a = t.addr_of(sw);
        switches.push(a.to_string());
        for nb in g.neighbors(sw) {
            let b = t.addr_of(nb);
            if b.is_host(k) {
                continue; // discovery never sees hosts
            }
            let (pa, _) = wire_ports(k, &a, &b).expect("adjacent in the fat tree");
            links.push(LinkEvent::new(a.to_string(), b.to_string(), pa));
        }
    }
    (switches, links)
}

#[test]
fn flood_domain_spans_the_fabric_without_loops() {
    let (switches, links) = k2_discovery();
    let flood = flood_domain(&switches, &links, 2);

    assert_eq!(flood.len(), switches.len());

    // 5 switches, so the spanning tree holds 4 undirected links; both
    // directions flood, and the two edge switches add their silent
    // host port.
    let total: usize = flood.values().map(Vec::len).sum();
    assert_eq!(total, 4 * 2 + 2);

    for edge in ["10.0.0.1", "10.1.0.1"] {
        let mut ports = flood[edge].clone();
        ports.sort_unstable();
        assert_eq!(ports, vec![1, 2], "edge switch {edge} floods both ports");
    }

    // The core floods towards both pods.
    let mut core = flood["10.2.1.1"].clone();
    core.sort_unstable();
    assert_eq!(core, vec![1, 2]);
}

#[test]
fn flood_ports_exist_on_the_switch() {
    let (switches, links) = k2_discovery();
    let flood = flood_domain(&switches, &links, 2);
    for ports in flood.values() {
        for &p in ports {
            assert!((1..=2).contains(&p));
        }
    }
}
