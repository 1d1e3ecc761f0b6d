//! Flood-domain restriction.
//!
//! Flooding over the full fabric would loop; instead the controller
//! floods only along a spanning tree of the discovered switch-to-switch
//! links. Edge switches additionally flood their host-facing ports,
//! which discovery cannot see and which are exactly the ports without a
//! discovered link.

use std::collections::HashMap;

use tracing::debug;

use crate::path::kruskal;

use super::LinkEvent;

/// Per-switch flood port lists for a discovered fabric of `num_ports`
/// port switches.
pub fn flood_domain(
    switches: &[String],
    links: &[LinkEvent],
    num_ports: usize,
) -> HashMap<String, Vec<u16>> {
    let pairs: Vec<(&str, &str)> = links
        .iter()
        .map(|l| (l.src.as_str(), l.dst.as_str()))
        .collect();
    let vertices: Vec<&str> = switches.iter().map(String::as_str).collect();
    let tree = kruskal(&vertices, &pairs);
    debug!(
        switches = switches.len(),
        links = links.len(),
        tree_edges = tree.len(),
        "built flood spanning tree"
    );

    let mut flood: HashMap<String, Vec<u16>> = switches
        .iter()
        .map(|s| (s.clone(), Vec::new()))
        .collect();

    // Both directions of every tree edge flood: the tree is undirected
    // but the discovered links (and their ports) are not.
    for link in links {
        let forward = (link.src.as_str(), link.dst.as_str());
        let on_tree = tree
            .iter()
            .any(|(u, v)| (*u, *v) == forward || (*v, *u) == forward);
        if !on_tree {
            continue;
        }
        if let Some(ports) = flood.get_mut(&link.src) {
            if !ports.contains(&link.port) {
                ports.push(link.port);
            }
        }
    }

    // An edge switch shows only its k/2 upward links to discovery; the
    // silent half of its ports faces hosts and must flood too.
    for switch in switches {
        let used: Vec<u16> = links
            .iter()
            .filter(|l| &l.src == switch)
            .map(|l| l.port)
            .collect();
        if used.len() != num_ports / 2 {
            continue;
        }
        let Some(ports) = flood.get_mut(switch) else {
            continue;
        };
        for port in 1..=num_ports as u16 {
            if !used.contains(&port) && !ports.contains(&port) {
                ports.push(port);
            }
        }
    }

    flood
}
