use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tn_app::{AppConfig, AppResult, MstOutcome, Network, RouteOutcome};
use tn_core::StationId;
use tn_core::timing;
use tn_graph::{Algorithm, MstAlgorithm};
use tn_registry::TraversalOrder;

#[derive(Parser)]
#[command(name = "transitnet")]
#[command(about = "transitnet - transport network routing and planning tool", long_about = None)]
struct Cli {
    /// Path to the YAML config file
    #[arg(long, global = true, default_value = "transitnet.yaml")]
    config: PathBuf,
    /// Data directory (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stations by id
    Stations,
    /// Register a new station
    AddStation {
        id: StationId,
        name: String,
    },
    /// Remove a station and every route touching it
    RemoveStation { id: StationId },
    /// Add a two-way route
    Connect {
        from: StationId,
        to: StationId,
        /// Distance in km
        weight: f64,
    },
    /// Remove a two-way route
    Disconnect { from: StationId, to: StationId },
    /// Close a route without removing it
    Close { from: StationId, to: StationId },
    /// Reopen a closed route
    Reopen { from: StationId, to: StationId },
    /// List routes with their state
    Edges,
    /// Find a route between two stations
    Route {
        from: StationId,
        to: StationId,
        /// bfs, dfs, dijkstra or floyd-warshall (defaults to the config)
        #[arg(short, long)]
        algorithm: Option<Algorithm>,
    },
    /// Compute a minimum spanning tree
    Mst {
        /// kruskal or prim (defaults to the config)
        #[arg(short, long)]
        algorithm: Option<MstAlgorithm>,
    },
    /// Print the station registry in tree order
    Traverse {
        /// in, pre or post
        #[arg(short, long, default_value = "in")]
        order: TraversalOrder,
    },
    /// Write all three registry traversals to a file
    ExportTraversals { output: PathBuf },
    /// Show the query history
    Reports {
        /// Write the text report to a file instead of stdout
        #[arg(short, long)]
        export: Option<PathBuf>,
        /// Empty the history after showing it
        #[arg(long)]
        clear: bool,
    },
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    if let Err(err) = tn_app::init_tracing(cli.verbose) {
        eprintln!("warning: logging disabled: {err}");
    }

    let mut config = AppConfig::load_or_default(&cli.config)?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    tracing::debug!(
        config = %cli.config.display(),
        data_dir = %config.data_dir.display(),
        "configuration resolved"
    );

    let mut network = Network::new();
    network.load(&config)?;

    let changed = run(&mut network, &config, cli.command)?;
    if changed {
        network.save(&config)?;
    }
    timing::log_summary();
    Ok(())
}

/// Execute one command. Returns whether the network needs saving.
fn run(network: &mut Network, config: &AppConfig, command: Commands) -> AppResult<bool> {
    match command {
        Commands::Stations => {
            cmd_stations(network);
            Ok(false)
        }
        Commands::AddStation { id, name } => {
            network.add_station(id, &name)?;
            println!("✓ Added station {id} ({})", name.trim());
            Ok(true)
        }
        Commands::RemoveStation { id } => {
            network.remove_station(id)?;
            println!("✓ Removed station {id}");
            Ok(true)
        }
        Commands::Connect { from, to, weight } => {
            network.connect(from, to, weight)?;
            println!("✓ Connected {from} ↔ {to} ({weight} km)");
            Ok(true)
        }
        Commands::Disconnect { from, to } => {
            network.disconnect(from, to)?;
            println!("✓ Disconnected {from} ↔ {to}");
            Ok(true)
        }
        Commands::Close { from, to } => {
            network.close(from, to)?;
            println!("✓ Closed {from} ↔ {to}");
            Ok(true)
        }
        Commands::Reopen { from, to } => {
            network.reopen(from, to)?;
            println!("✓ Reopened {from} ↔ {to}");
            Ok(true)
        }
        Commands::Edges => {
            cmd_edges(network);
            Ok(false)
        }
        Commands::Route {
            from,
            to,
            algorithm,
        } => {
            let algorithm = match algorithm {
                Some(algorithm) => algorithm,
                None => config.route_algorithm()?,
            };
            let outcome = network.find_route(algorithm, from, to)?;
            print_route(&outcome);
            Ok(outcome.found())
        }
        Commands::Mst { algorithm } => {
            let algorithm = match algorithm {
                Some(algorithm) => algorithm,
                None => config.mst_algorithm()?,
            };
            let outcome = network.spanning_tree(algorithm)?;
            print_mst(network, &outcome);
            Ok(!outcome.edges.is_empty())
        }
        Commands::Traverse { order } => {
            let ids: Vec<String> = network
                .traverse(order)
                .iter()
                .map(ToString::to_string)
                .collect();
            println!("{order}: {}", ids.join(", "));
            Ok(false)
        }
        Commands::ExportTraversals { output } => {
            network.registry().export_traversals(&output)?;
            println!("✓ Traversals written to {}", output.display());
            Ok(false)
        }
        Commands::Reports { export, clear } => {
            cmd_reports(network, export.as_deref())?;
            if clear {
                network.clear_reports();
                println!("✓ Report history cleared");
            }
            Ok(clear)
        }
    }
}

fn cmd_stations(network: &Network) {
    let stations = network.stations();
    if stations.is_empty() {
        println!("No stations");
        return;
    }
    println!("Stations ({}):", stations.len());
    for station in stations {
        println!("  {:>5}  {}", station.id, station.name);
    }
}

fn cmd_edges(network: &Network) {
    let graph = network.graph();
    let mut shown = std::collections::HashSet::new();
    let mut lines = Vec::new();
    for edge in network.edges() {
        if !shown.insert((edge.from.min(edge.to), edge.from.max(edge.to))) {
            continue;
        }
        let state = if edge.closed { "closed" } else { "open" };
        lines.push(format!(
            "  {} ({}) ↔ {} ({})  {:.2} km  [{state}]",
            edge.from,
            graph.station_name(edge.from).unwrap_or("?"),
            edge.to,
            graph.station_name(edge.to).unwrap_or("?"),
            edge.weight
        ));
    }
    if lines.is_empty() {
        println!("No routes");
    } else {
        println!("Routes ({}):", graph.edge_count());
        for line in lines {
            println!("{line}");
        }
    }
}

fn print_route(outcome: &RouteOutcome) {
    println!(
        "{}: {} ({}) → {} ({})",
        outcome.algorithm,
        outcome.origin.id,
        outcome.origin.name,
        outcome.destination.id,
        outcome.destination.name
    );
    if !outcome.found() {
        println!("  No path found");
        return;
    }
    let stops: Vec<String> = outcome
        .path
        .iter()
        .zip(&outcome.path_names)
        .map(|(id, name)| format!("{id} ({name})"))
        .collect();
    println!("  Path: {}", stops.join(" → "));
    println!("  Hops: {}", outcome.hops());
    println!("  Cost: {:.2} km", outcome.cost);
}

fn print_mst(network: &Network, outcome: &MstOutcome) {
    println!("{}:", outcome.algorithm);
    if outcome.edges.is_empty() {
        println!("  No edges");
        return;
    }
    let graph = network.graph();
    for &(from, to) in &outcome.edges {
        println!(
            "  • {from} ({}) ↔ {to} ({})",
            graph.station_name(from).unwrap_or("?"),
            graph.station_name(to).unwrap_or("?")
        );
    }
    println!("  Edges: {}", outcome.edges.len());
    println!("  Total cost: {:.2} km", outcome.total_cost);
    if !outcome.spans_all() {
        println!("  Note: the network is not connected; the tree does not reach every station");
    }
}

fn cmd_reports(network: &Network, export: Option<&Path>) -> AppResult<()> {
    match export {
        Some(path) => {
            network.reports().export_text(path)?;
            println!(
                "✓ {} reports written to {}",
                network.reports().len(),
                path.display()
            );
        }
        None => print!("{}", network.reports().render_text()),
    }
    Ok(())
}
