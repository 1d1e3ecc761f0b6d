//! 路由模块
//!
//! fat-tree 的两级前缀/后缀转发表编译器、端口池与物理布线约定。

mod port_pool;
mod tables;
mod wiring;

pub use port_pool::PortPool;
pub use tables::{PrefixEntry, RoutingTables, SuffixEntry};
pub use wiring::wire_ports;
