//! 节点类型
//!
//! 定义拓扑节点类型（交换机、服务器）以及 fat-tree 角色。

use super::id::{EdgeId, NodeId};

/// 节点种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Switch,
    Server,
}

/// fat-tree 中节点的层次角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FabricRole {
    Core,
    Aggregate,
    Edge,
    Host,
}

/// 拓扑节点
///
/// 节点拥有自己的关联边列表（`EdgeId` 引用），不直接持有邻居。
#[derive(Debug, Clone)]
pub struct Node {
    /// 节点名称（点分地址或合成整数标签），在一个拓扑内唯一
    pub name: String,
    pub kind: NodeKind,
    /// 仅 fat-tree 节点携带角色
    pub role: Option<FabricRole>,
    pub(super) edges: Vec<EdgeId>,
}

impl Node {
    /// 关联边的数量即节点度数
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_ids(&self) -> &[EdgeId] {
        &self.edges
    }
}

/// 无向边：无序的节点对，所有边长度为 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
}

impl Edge {
    /// 获取对端节点
    pub fn other(&self, n: NodeId) -> NodeId {
        if self.a == n { self.b } else { self.a }
    }

    /// 端点集合是否为 {a, b}
    pub fn joins(&self, a: NodeId, b: NodeId) -> bool {
        (self.a == a && self.b == b) || (self.a == b && self.b == a)
    }
}
