//! Fat-tree 拓扑构建
//!
//! k 叉 fat-tree：k 个 pod，每个 pod 有 k/2 个汇聚交换机和 k/2 个
//! 边缘交换机，(k/2)^2 个核心交换机。节点名称编码其位置：
//! pod 交换机 `10.<pod>.<idx>.1`，主机 `10.<pod>.<edge>.<off+2>`，
//! 核心交换机 `10.<k>.<row>.<col>`（row、col 从 1 开始）。

use tracing::info;

use crate::addr::Address;
use crate::graph::{FabricRole, Graph, NodeId, NodeKind};

use super::TopoError;

/// 一个 pod：等长的汇聚交换机列表与边缘交换机列表
#[derive(Debug, Clone)]
pub struct Pod {
    pub aggr: Vec<NodeId>,
    pub edge: Vec<NodeId>,
}

/// Fat-tree 拓扑
#[derive(Debug, Clone)]
pub struct FatTree {
    pub k: usize,
    pub servers: Vec<NodeId>,
    pub switches: Vec<NodeId>,
    pub pods: Vec<Pod>,
    pub core_switches: Vec<NodeId>,
    graph: Graph,
}

impl FatTree {
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// 节点名称解析成地址；构建器生成的名称保证可解析
    pub fn addr_of(&self, id: NodeId) -> Address {
        self.graph
            .node(id)
            .name
            .parse()
            .expect("fat-tree node names are addresses")
    }
}

/// 构建并校验一个 k 叉 fat-tree
pub fn build_fat_tree(k: usize) -> Result<FatTree, TopoError> {
    if k < 2 || k % 2 != 0 {
        return Err(TopoError::BadPortCount { k });
    }
    let half = k / 2;
    let mut graph = Graph::default();

    let mut servers = Vec::with_capacity(k * half * half);
    let mut switches = Vec::with_capacity(k * k + half * half);
    let mut pods = Vec::with_capacity(k);

    // pod 内部：汇聚/边缘交换机、主机以及 pod 内全连接
    for pod in 0..k {
        let mut aggr = Vec::with_capacity(half);
        let mut edge = Vec::with_capacity(half);
        for idx in 0..half {
            let aggr_id = graph.add_node(
                format!("10.{pod}.{}.1", idx + half),
                NodeKind::Switch,
                Some(FabricRole::Aggregate),
            );
            let edge_id = graph.add_node(
                format!("10.{pod}.{idx}.1"),
                NodeKind::Switch,
                Some(FabricRole::Edge),
            );
            for off in 0..half {
                let host = graph.add_node(
                    format!("10.{pod}.{idx}.{}", off + 2),
                    NodeKind::Server,
                    Some(FabricRole::Host),
                );
                graph.connect(edge_id, host);
                servers.push(host);
            }
            aggr.push(aggr_id);
            edge.push(edge_id);
            switches.push(aggr_id);
            switches.push(edge_id);
        }
        for &a in &aggr {
            for &e in &edge {
                graph.connect(a, e);
            }
        }
        pods.push(Pod { aggr, edge });
    }

    // 核心层
    let mut core_switches = Vec::with_capacity(half * half);
    for row in 0..half {
        for col in 0..half {
            let core = graph.add_node(
                format!("10.{k}.{}.{}", row + 1, col + 1),
                NodeKind::Switch,
                Some(FabricRole::Core),
            );
            core_switches.push(core);
            switches.push(core);
        }
    }

    // 核心 <-> 汇聚：每个 pod 内从头开始推进共享游标，
    // 保证每个核心交换机经由某个汇聚交换机恰好触达每个 pod 一次
    for pod in &pods {
        let mut cursor = 0;
        for &aggr in &pod.aggr {
            for _ in 0..half {
                graph.connect(core_switches[cursor], aggr);
                cursor += 1;
            }
        }
    }

    let topo = FatTree {
        k,
        servers,
        switches,
        pods,
        core_switches,
        graph,
    };
    verify(&topo)?;
    info!(
        k,
        servers = topo.servers.len(),
        switches = topo.switches.len(),
        cores = topo.core_switches.len(),
        "✅ fat-tree 拓扑校验通过"
    );
    Ok(topo)
}

fn fail(msg: String) -> Result<(), TopoError> {
    Err(TopoError::InvariantViolation(msg))
}

/// 构建后的结构校验；任何失败都意味着不能把该拓扑交给路由使用
fn verify(t: &FatTree) -> Result<(), TopoError> {
    let k = t.k;
    let half = k / 2;
    let g = t.graph();

    if t.core_switches.len() != half * half {
        return fail(format!(
            "expected {} core switches, got {}",
            half * half,
            t.core_switches.len()
        ));
    }
    if t.pods.len() != k {
        return fail(format!("expected {k} pods, got {}", t.pods.len()));
    }

    for (pod_idx, pod) in t.pods.iter().enumerate() {
        if pod.aggr.len() != half || pod.edge.len() != half {
            return fail(format!(
                "pod {pod_idx} has {} aggregation and {} edge switches, expected {half} each",
                pod.aggr.len(),
                pod.edge.len()
            ));
        }

        for &aggr in &pod.aggr {
            if g.degree(aggr) != k {
                return fail(format!(
                    "aggregation switch {} has degree {}, expected {k}",
                    g.node(aggr).name,
                    g.degree(aggr)
                ));
            }
            let (mut down, mut up) = (0, 0);
            for nb in g.neighbors(aggr) {
                match g.node(nb).role {
                    Some(FabricRole::Edge) => down += 1,
                    Some(FabricRole::Core) => up += 1,
                    _ => {}
                }
            }
            if down != half || up != half {
                return fail(format!(
                    "aggregation switch {} has {down} edge links and {up} core links, expected {half} each",
                    g.node(aggr).name
                ));
            }
        }

        for &edge in &pod.edge {
            if g.degree(edge) != k {
                return fail(format!(
                    "edge switch {} has degree {}, expected {k}",
                    g.node(edge).name,
                    g.degree(edge)
                ));
            }
            let (mut hosts, mut up) = (0, 0);
            for nb in g.neighbors(edge) {
                match g.node(nb).role {
                    Some(FabricRole::Host) => hosts += 1,
                    Some(FabricRole::Aggregate) => up += 1,
                    _ => {}
                }
            }
            if hosts != half || up != half {
                return fail(format!(
                    "edge switch {} has {hosts} host links and {up} aggregation links, expected {half} each",
                    g.node(edge).name
                ));
            }
        }
    }

    for &core in &t.core_switches {
        if g.degree(core) != k {
            return fail(format!(
                "core switch {} has degree {}, expected {k}",
                g.node(core).name,
                g.degree(core)
            ));
        }
        // 每条边都落在不同的 pod 中
        let mut pods_seen = Vec::with_capacity(k);
        for nb in g.neighbors(core) {
            if g.node(nb).role != Some(FabricRole::Aggregate) {
                return fail(format!(
                    "core switch {} is linked to non-aggregation node {}",
                    g.node(core).name,
                    g.node(nb).name
                ));
            }
            let pod = t.addr_of(nb).pod();
            if pods_seen.contains(&pod) {
                return fail(format!(
                    "core switch {} reaches pod {pod} more than once",
                    g.node(core).name
                ));
            }
            pods_seen.push(pod);
        }
    }

    Ok(())
}
