use clap::Parser;
use fabric_rs::addr::Address;
use fabric_rs::routing::RoutingTables;
use std::fs;
use std::path::PathBuf;
use tracing::error;

#[derive(Debug, Parser)]
#[command(
    name = "dump-tables",
    about = "Compile and print the two-level fat-tree routing tables"
)]
struct Args {
    /// Fat-tree switch port count (k)
    #[arg(long, default_value_t = 4)]
    ports: usize,

    /// Write the JSON dump here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Answer a single lookup instead of dumping: SRC_SWITCH_ADDR DST_HOST_ADDR
    #[arg(long, num_args = 2, value_names = ["SRC", "DST"])]
    lookup: Option<Vec<String>>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse();
    let tables = match RoutingTables::compile(args.ports) {
        Ok(tables) => tables,
        Err(err) => {
            error!(%err, "cannot compile tables");
            std::process::exit(2);
        }
    };

    if let Some(pair) = &args.lookup {
        let dst: Address = match pair[1].parse() {
            Ok(addr) => addr,
            Err(err) => {
                error!(addr = %pair[1], %err, "bad destination address");
                std::process::exit(2);
            }
        };
        match tables.lookup_port(&pair[0], &dst) {
            Some(port) => println!("{port}"),
            None => {
                error!(src = %pair[0], dst = %dst, "no matching route");
                std::process::exit(1);
            }
        }
        return;
    }

    let json = serde_json::to_string_pretty(&tables).expect("tables serialize");
    match &args.out {
        Some(path) => fs::write(path, json).expect("write dump"),
        None => println!("{json}"),
    }
}
