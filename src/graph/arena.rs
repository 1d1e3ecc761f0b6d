//! 图存储
//!
//! 基于 arena 的无向图：节点存放在向量中，由稳定的 `NodeId` 索引；
//! 边存放在槽位表中，删除后留下可复用的空槽。这样循环引用的拓扑
//! （fat-tree、Jellyfish）不需要双向对象引用。

use std::collections::HashMap;

use thiserror::Error;

use super::id::{EdgeId, NodeId};
use super::node::{Edge, FabricRole, Node, NodeKind};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// 边已经被断开（或从未存在）
    #[error("edge {0:?} is not connected")]
    StaleEdge(EdgeId),
}

/// 无向拓扑图
#[derive(Debug, Default, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Option<Edge>>,
    free: Vec<EdgeId>,
    by_name: HashMap<String, NodeId>,
}

impl Graph {
    /// 添加交换机节点
    pub fn add_switch(&mut self, name: impl Into<String>) -> NodeId {
        self.add_node(name, NodeKind::Switch, None)
    }

    /// 添加服务器节点
    pub fn add_server(&mut self, name: impl Into<String>) -> NodeId {
        self.add_node(name, NodeKind::Server, None)
    }

    /// 添加节点（可带 fat-tree 角色）
    ///
    /// 节点名称在一个图中必须唯一。
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        kind: NodeKind,
        role: Option<FabricRole>,
    ) -> NodeId {
        let name = name.into();
        let id = NodeId(self.nodes.len());
        debug_assert!(
            !self.by_name.contains_key(&name),
            "duplicate node name {name:?}"
        );
        self.by_name.insert(name.clone(), id);
        self.nodes.push(Node {
            name,
            kind,
            role,
            edges: Vec::new(),
        });
        id
    }

    /// 连接两个节点：创建一条边并追加到两端的边列表
    ///
    /// 不做自环检查，调用方需要避免把节点连到自身。
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> EdgeId {
        let edge = Edge { a, b };
        let id = match self.free.pop() {
            Some(id) => {
                self.edges[id.0] = Some(edge);
                id
            }
            None => {
                let id = EdgeId(self.edges.len());
                self.edges.push(Some(edge));
                id
            }
        };
        self.nodes[a.0].edges.push(id);
        self.nodes[b.0].edges.push(id);
        id
    }

    /// 断开一条边：从两端的边列表中移除并清空槽位
    pub fn disconnect(&mut self, id: EdgeId) -> Result<(NodeId, NodeId), GraphError> {
        let Some(edge) = self.edges.get_mut(id.0).and_then(Option::take) else {
            return Err(GraphError::StaleEdge(id));
        };
        self.nodes[edge.a.0].edges.retain(|&e| e != id);
        self.nodes[edge.b.0].edges.retain(|&e| e != id);
        self.free.push(id);
        Ok((edge.a, edge.b))
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0).and_then(Option::as_ref)
    }

    /// 查找连接 a 和 b 的边
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.nodes[a.0].edges.iter().copied().find(|&id| {
            self.edges[id.0]
                .as_ref()
                .is_some_and(|edge| edge.joins(a, b))
        })
    }

    /// 判断两个节点是否相邻
    pub fn is_neighbor(&self, a: NodeId, b: NodeId) -> bool {
        self.edge_between(a, b).is_some()
    }

    /// 遍历节点的所有邻居（多重边会重复出现）
    pub fn neighbors(&self, n: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[n.0]
            .edges
            .iter()
            .filter_map(move |&id| self.edges[id.0].as_ref().map(|edge| edge.other(n)))
    }

    pub fn degree(&self, n: NodeId) -> usize {
        self.nodes[n.0].degree()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// 存活边的数量
    pub fn edge_count(&self) -> usize {
        self.edges.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }
}
