//! Compiled tables behind a single-writer/multiple-reader lock.
//!
//! Packet-in lookups are read-only and may be served from any number of
//! workers; a resync triggered by switch discovery takes the write side.
//! Queries never observe a half-updated table.

use std::sync::RwLock;

use tracing::info;

use crate::addr::Address;
use crate::routing::RoutingTables;
use crate::topo::TopoError;

use super::LinkEvent;

pub struct ControlPlane {
    tables: RwLock<RoutingTables>,
}

impl ControlPlane {
    /// Compile tables for a k-port fat-tree.
    pub fn new(k: usize) -> Result<Self, TopoError> {
        Ok(Self {
            tables: RwLock::new(RoutingTables::compile(k)?),
        })
    }

    /// Resync port numbers from a fresh discovery snapshot. Returns the
    /// number of table rows that changed.
    pub fn on_switch_enter(&self, links: &[LinkEvent]) -> usize {
        let mut tables = self.tables.write().expect("tables lock poisoned");
        let updates =
            tables.sync_ports(links.iter().map(|l| (l.src.as_str(), l.dst.as_str(), l.port)));
        if updates > 0 {
            info!(updates, "resynced routing tables from discovered links");
        }
        updates
    }

    /// Answer a packet-in: which port should `src` use towards `dst`?
    /// `None` means no route; the caller decides between flood and drop.
    pub fn lookup(&self, src: &str, dst: &Address) -> Option<u16> {
        self.tables
            .read()
            .expect("tables lock poisoned")
            .lookup_port(src, dst)
    }

    /// Run a closure against the current table snapshot.
    pub fn with_tables<T>(&self, f: impl FnOnce(&RoutingTables) -> T) -> T {
        f(&self.tables.read().expect("tables lock poisoned"))
    }
}
