//! Jellyfish 拓扑构建
//!
//! 随机化的度受限交换机互连：服务器轮转挂接到交换机上，交换机之间
//! 随机连线，然后用断边重连的方式修补剩余端口。生成结果没有唯一
//! 标准形；连通性在生成后统一检查，失败会在限定次数内整体重试。

use rand::Rng;
use tracing::{info, warn};

use crate::graph::{Graph, NodeId, NodeKind};
use crate::path::is_path;

use super::TopoError;

#[derive(Debug, Clone)]
pub struct JellyfishOpts {
    pub num_servers: usize,
    pub num_switches: usize,
    /// 每个交换机的目标度数（含服务器侧端口）
    pub num_ports: usize,
    /// 连通性检查失败时的最大重试次数
    pub max_attempts: usize,
}

impl Default for JellyfishOpts {
    fn default() -> Self {
        Self {
            num_servers: 16,
            num_switches: 20,
            num_ports: 4,
            max_attempts: 50,
        }
    }
}

/// Jellyfish 拓扑（无 pod 结构）
#[derive(Debug, Clone)]
pub struct Jellyfish {
    pub num_ports: usize,
    pub servers: Vec<NodeId>,
    pub switches: Vec<NodeId>,
    graph: Graph,
}

impl Jellyfish {
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }
}

/// 生成一个连通的 Jellyfish 拓扑
///
/// 随机过程可能留下不连通的分量；每次失败整体重新生成，超过
/// `max_attempts` 次后返回 [`TopoError::Unreachable`]。
pub fn build_jellyfish<R: Rng + ?Sized>(
    opts: &JellyfishOpts,
    rng: &mut R,
) -> Result<Jellyfish, TopoError> {
    let attempts = opts.max_attempts.max(1);
    for attempt in 1..=attempts {
        let topo = generate(opts, rng);
        if connected(&topo) {
            info!(
                attempt,
                servers = topo.servers.len(),
                switches = topo.switches.len(),
                "jellyfish 拓扑生成完毕"
            );
            return Ok(topo);
        }
        warn!(attempt, "生成的拓扑存在不连通分量，重试");
    }
    Err(TopoError::Unreachable { attempts })
}

fn generate<R: Rng + ?Sized>(opts: &JellyfishOpts, rng: &mut R) -> Jellyfish {
    let mut graph = Graph::default();

    let switches: Vec<NodeId> = (0..opts.num_switches)
        .map(|i| graph.add_switch(i.to_string()))
        .collect();
    let servers: Vec<NodeId> = (0..opts.num_servers)
        .map(|i| graph.add_server((opts.num_switches + i).to_string()))
        .collect();

    // 服务器轮转挂接：每个交换机挂到的服务器数最多差 1
    if !switches.is_empty() {
        for (i, &srv) in servers.iter().enumerate() {
            graph.connect(srv, switches[i % switches.len()]);
        }
    }

    let n = switches.len();

    // 随机连线：只向前找候选（index+1..），耗尽时回绕一次再放弃
    for i in 0..n.saturating_sub(2) {
        let want = opts.num_ports.saturating_sub(graph.degree(switches[i]));
        for _ in 0..want {
            let mut other = rng.gen_range(i + 1..n);
            let mut looped = false;
            while graph.degree(switches[other]) >= opts.num_ports
                || graph.is_neighbor(switches[i], switches[other])
            {
                other += 1;
                if other >= n {
                    if looped {
                        break;
                    }
                    looped = true;
                    other = i + 1;
                }
            }
            if other < n {
                graph.connect(switches[i], switches[other]);
            }
        }
    }

    // 缺两个以上端口的交换机：找一个非邻居 A，把 A 的某条交换机间
    // 边 A–B 断开，改接 short–A 和 short–B（A、B 度数不变）
    for i in 0..n {
        let mut guard = 0;
        while opts.num_ports.saturating_sub(graph.degree(switches[i])) >= 2 {
            guard += 1;
            if guard > 100 * n {
                // 修补不动就交给连通性检查去兜底
                break;
            }
            let Some(a) = pick_non_neighbor(&graph, &switches, switches[i], rng) else {
                break;
            };
            let Some((edge_id, b)) = breakable_edge(&graph, a, &[switches[i]]) else {
                continue;
            };
            let _ = graph.disconnect(edge_id);
            graph.connect(switches[i], a);
            graph.connect(switches[i], b);
        }
    }

    // 恰好剩一个端口的交换机：两两直连，已相邻时再用断边重连
    let mut lonely: Vec<NodeId> = switches
        .iter()
        .copied()
        .filter(|&s| graph.degree(s) + 1 == opts.num_ports)
        .collect();
    let mut guard = 0;
    while lonely.len() >= 2 && guard < 100 * n {
        guard += 1;
        let ia = rng.gen_range(0..lonely.len());
        let mut ib = rng.gen_range(0..lonely.len() - 1);
        if ib >= ia {
            ib += 1;
        }
        let (a, b) = (lonely[ia], lonely[ib]);
        if !graph.is_neighbor(a, b) {
            graph.connect(a, b);
            lonely.retain(|&s| s != a && s != b);
            continue;
        }
        // 找一个与 a、b 都无关系的第三方交换机
        let mut third = None;
        for _ in 0..10 * n.max(1) {
            let c = switches[rng.gen_range(0..n)];
            if c == a || c == b || graph.is_neighbor(c, a) || graph.is_neighbor(c, b) {
                continue;
            }
            third = Some(c);
            break;
        }
        let Some(c) = third else { continue };
        let Some((edge_id, other)) = breakable_edge(&graph, c, &[a, b]) else {
            continue;
        };
        let _ = graph.disconnect(edge_id);
        graph.connect(c, a);
        graph.connect(other, b);
        lonely.retain(|&s| s != a && s != b);
    }

    Jellyfish {
        num_ports: opts.num_ports,
        servers,
        switches,
        graph,
    }
}

/// 随机挑一个与 `from` 不相邻（也不等于 `from`）的交换机
fn pick_non_neighbor<R: Rng + ?Sized>(
    graph: &Graph,
    switches: &[NodeId],
    from: NodeId,
    rng: &mut R,
) -> Option<NodeId> {
    let n = switches.len();
    for _ in 0..10 * n.max(1) {
        let cand = switches[rng.gen_range(0..n)];
        if cand != from && !graph.is_neighbor(from, cand) {
            return Some(cand);
        }
    }
    None
}

/// 在 `node` 的交换机间边里找一条可以断开的：对端不是服务器，
/// 也不与 `avoid` 里的任何节点相邻或相同
fn breakable_edge(
    graph: &Graph,
    node: NodeId,
    avoid: &[NodeId],
) -> Option<(crate::graph::EdgeId, NodeId)> {
    for &edge_id in graph.node(node).edge_ids() {
        let Some(edge) = graph.edge(edge_id) else {
            continue;
        };
        let other = edge.other(node);
        if graph.node(other).kind == NodeKind::Server {
            continue;
        }
        if avoid
            .iter()
            .any(|&x| other == x || graph.is_neighbor(other, x))
        {
            continue;
        }
        return Some((edge_id, other));
    }
    None
}

/// 第一个服务器到其余所有服务器都可达才算连通
fn connected(topo: &Jellyfish) -> bool {
    let Some(&first) = topo.servers.first() else {
        return true;
    };
    topo.servers
        .iter()
        .skip(1)
        .all(|&srv| is_path(topo.graph(), first, srv))
}
