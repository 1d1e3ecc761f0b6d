//! Free-port bookkeeping for wiring a fat-tree into a live network.
//!
//! Each pod switch starts with a downstream range (1..=k/2) and an
//! upstream range (k/2+1..=k); a host has its single port 1. Ports are
//! handed out in range order, consumed exactly once and never returned.
//! Does not serve core switches as a source: a core switch's ports are
//! fixed by destination pod, not pooled.

use std::collections::HashMap;

use crate::addr::Address;

#[derive(Debug, Clone)]
struct Ranges {
    downstream: Vec<u16>,
    upstream: Vec<u16>,
    host: Vec<u16>,
}

#[derive(Debug, Clone)]
pub struct PortPool {
    k: usize,
    pools: HashMap<String, Ranges>,
}

impl PortPool {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            pools: HashMap::new(),
        }
    }

    /// Next free port on `src` for a link towards `dst`, or `None` when
    /// the relevant range is exhausted.
    ///
    /// Direction is inferred from the two addresses: a host always uses
    /// its only port; a link towards a core switch, or from an edge
    /// switch up to an aggregation switch, draws from the upstream
    /// range; everything else draws from the downstream range.
    pub fn take(&mut self, src: &Address, dst: &Address) -> Option<u16> {
        let k = self.k;
        let ranges = self.ranges(src);
        if src.is_host(k) {
            return pop_first(&mut ranges.host);
        }
        let upstream = dst.is_core(k) || (src.is_edge_switch(k) && dst.is_aggr_switch(k));
        if upstream {
            pop_first(&mut ranges.upstream)
        } else {
            pop_first(&mut ranges.downstream)
        }
    }

    fn ranges(&mut self, src: &Address) -> &mut Ranges {
        let half = (self.k / 2) as u16;
        let k = self.k as u16;
        self.pools.entry(src.to_string()).or_insert_with(|| Ranges {
            downstream: (1..=half).collect(),
            upstream: (half + 1..=k).collect(),
            host: vec![1],
        })
    }
}

fn pop_first(range: &mut Vec<u16>) -> Option<u16> {
    if range.is_empty() {
        return None;
    }
    Some(range.remove(0))
}
