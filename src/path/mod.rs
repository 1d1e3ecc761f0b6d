//! Path engine: shortest paths, loopless k-shortest-paths (Yen's
//! algorithm), n-way ECMP enumeration and spanning-tree selection.
//!
//! All queries run over the unit-weight undirected [`Graph`](crate::graph::Graph).
//! Yen's algorithm mutates the graph while searching; every mutation goes
//! through a [`GraphTxn`] so the graph is restored on all exit paths.

mod shortest;
mod spanning;
mod txn;
mod yen;

pub use shortest::{ShortestPaths, construct_path, is_path, shortest_paths};
pub use spanning::kruskal;
pub use txn::GraphTxn;
pub use yen::{k_shortest_paths, n_way_ecmp};
