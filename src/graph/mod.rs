//! 图原语模块
//!
//! 此模块包含拓扑图的核心组件：节点、边和基于 arena 的无向图。

// 子模块声明
mod arena;
mod id;
mod node;

// 重新导出公共接口
pub use arena::{Graph, GraphError};
pub use id::{EdgeId, NodeId};
pub use node::{Edge, FabricRole, Node, NodeKind};
