use clap::Parser;
use fabric_rs::graph::{Graph, NodeId, NodeKind};
use fabric_rs::path::{k_shortest_paths, n_way_ecmp, shortest_paths};
use fabric_rs::topo::{JellyfishOpts, TopoError, build_fat_tree, build_jellyfish};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use tracing::error;

#[derive(Debug, Parser)]
#[command(
    name = "topo-stats",
    about = "Path statistics for fat-tree / jellyfish topologies"
)]
struct Args {
    /// Topology kind: fattree or jellyfish
    #[arg(long, default_value = "fattree")]
    topology: String,

    /// Switch port count (fat-tree k / jellyfish ports per switch)
    #[arg(long, default_value_t = 4)]
    ports: usize,

    /// Number of servers (jellyfish only)
    #[arg(long, default_value_t = 16)]
    servers: usize,

    /// Number of switches (jellyfish only)
    #[arg(long, default_value_t = 20)]
    switches: usize,

    /// Sampled server pairs for the link-usage distribution
    #[arg(long, default_value_t = 64)]
    pairs: usize,

    /// Paths per pair for k-shortest-paths / ECMP counting
    #[arg(long, default_value_t = 8)]
    paths: usize,

    /// RNG seed (jellyfish generation and pair sampling)
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Write the JSON report here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct Report {
    topology: String,
    /// shortest-path hop count between server pairs -> number of pairs
    path_length_histogram: BTreeMap<u32, u64>,
    link_usage: LinkUsage,
}

/// Distinct-path counts per directed switch-to-switch link, sorted
/// ascending (the "rank of link" curves of the jellyfish paper).
#[derive(Debug, Serialize)]
struct LinkUsage {
    sampled_pairs: usize,
    paths_per_pair: usize,
    ksp: Vec<u64>,
    ecmp: Vec<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        error!(%err, "topo-stats failed");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), TopoError> {
    let mut rng = StdRng::seed_from_u64(args.seed);

    let (mut graph, servers) = match args.topology.as_str() {
        "fattree" | "f" => {
            let topo = build_fat_tree(args.ports)?;
            (topo.graph().clone(), topo.servers.clone())
        }
        "jellyfish" | "j" => {
            let opts = JellyfishOpts {
                num_servers: args.servers,
                num_switches: args.switches,
                num_ports: args.ports,
                ..JellyfishOpts::default()
            };
            let topo = build_jellyfish(&opts, &mut rng)?;
            (topo.graph().clone(), topo.servers.clone())
        }
        other => {
            error!(topology = other, "unknown topology, use fattree or jellyfish");
            std::process::exit(2);
        }
    };

    let report = Report {
        topology: args.topology.clone(),
        path_length_histogram: path_length_histogram(&graph, &servers),
        link_usage: link_usage(&mut graph, &servers, args.pairs, args.paths, &mut rng),
    };

    let json = serde_json::to_string_pretty(&report).expect("report serializes");
    match &args.out {
        Some(path) => fs::write(path, json).expect("write report"),
        None => println!("{json}"),
    }
    Ok(())
}

fn path_length_histogram(graph: &Graph, servers: &[NodeId]) -> BTreeMap<u32, u64> {
    let mut histogram = BTreeMap::new();
    for (i, &src) in servers.iter().enumerate() {
        let sp = shortest_paths(graph, src);
        for &dst in &servers[i + 1..] {
            if let Some(dist) = sp.dist(dst) {
                *histogram.entry(dist).or_insert(0) += 1;
            }
        }
    }
    histogram
}

fn link_usage<R: Rng>(
    graph: &mut Graph,
    servers: &[NodeId],
    pairs: usize,
    paths_per_pair: usize,
    rng: &mut R,
) -> LinkUsage {
    let mut ksp_counts: HashMap<(NodeId, NodeId), u64> = HashMap::new();
    let mut ecmp_counts: HashMap<(NodeId, NodeId), u64> = HashMap::new();

    let sampled = if servers.len() < 2 { 0 } else { pairs };
    for _ in 0..sampled {
        let src = servers[rng.gen_range(0..servers.len())];
        let mut dst = servers[rng.gen_range(0..servers.len())];
        while dst == src {
            dst = servers[rng.gen_range(0..servers.len())];
        }
        for path in k_shortest_paths(graph, src, dst, paths_per_pair) {
            count_switch_links(graph, &path, &mut ksp_counts);
        }
        for path in n_way_ecmp(graph, src, dst, paths_per_pair) {
            count_switch_links(graph, &path, &mut ecmp_counts);
        }
    }

    let mut ksp: Vec<u64> = ksp_counts.into_values().collect();
    let mut ecmp: Vec<u64> = ecmp_counts.into_values().collect();
    ksp.sort_unstable();
    ecmp.sort_unstable();

    LinkUsage {
        sampled_pairs: sampled,
        paths_per_pair,
        ksp,
        ecmp,
    }
}

/// Count each directed switch-to-switch hop of one path, skipping the
/// server endpoints.
fn count_switch_links(graph: &Graph, path: &[NodeId], counts: &mut HashMap<(NodeId, NodeId), u64>) {
    for hop in path.windows(2) {
        let (u, v) = (hop[0], hop[1]);
        if graph.node(u).kind != NodeKind::Switch || graph.node(v).kind != NodeKind::Switch {
            continue;
        }
        *counts.entry((u, v)).or_insert(0) += 1;
    }
}
