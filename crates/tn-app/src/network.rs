//! The network service: graph, registry and report log kept in step.

use tn_core::timing::{QueryKind, QueryTimer};
use tn_core::{Real, StationId, ensure_weight};
use tn_graph::{
    Algorithm, Edge, Graph, MstAlgorithm, Station, check_consistency, find_route, spanning_tree,
};
use tn_registry::{StationRegistry, TraversalOrder};
use tn_reports::{ReportEntry, ReportLog};
use tn_store::{
    LoadSummary, read_closures, read_routes, read_stations, write_closures, write_routes,
    write_stations,
};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Answer to a route query.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOutcome {
    pub algorithm: Algorithm,
    pub origin: Station,
    pub destination: Station,
    pub path: Vec<StationId>,
    pub path_names: Vec<String>,
    pub cost: Real,
}

impl RouteOutcome {
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Hops along the path, 0 when not found.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Answer to a spanning tree query.
#[derive(Debug, Clone, PartialEq)]
pub struct MstOutcome {
    pub algorithm: MstAlgorithm,
    pub edges: Vec<(StationId, StationId)>,
    pub total_cost: Real,
    pub station_count: usize,
}

impl MstOutcome {
    /// Whether the tree reaches every station.
    pub fn spans_all(&self) -> bool {
        self.station_count == 0 || self.edges.len() + 1 == self.station_count
    }
}

/// Owns the transport network and its query history.
///
/// Stations are held twice: the graph keeps the copy the engines read and the
/// registry keeps the ordered copy used for listings and traversals. Every
/// mutation goes through this type, which updates both together.
#[derive(Debug, Clone, Default)]
pub struct Network {
    graph: Graph,
    registry: StationRegistry,
    reports: ReportLog,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn registry(&self) -> &StationRegistry {
        &self.registry
    }

    pub fn reports(&self) -> &ReportLog {
        &self.reports
    }

    pub fn clear_reports(&mut self) {
        self.reports.clear();
    }

    /// Stations sorted by id.
    pub fn stations(&self) -> Vec<Station> {
        self.registry.stations()
    }

    pub fn station(&self, id: StationId) -> AppResult<&Station> {
        self.registry.search(id).ok_or(AppError::StationNotFound(id))
    }

    /// Every directed edge, open and closed.
    pub fn edges(&self) -> Vec<Edge> {
        self.graph.all_edges()
    }

    pub fn traverse(&self, order: TraversalOrder) -> Vec<StationId> {
        self.registry.traverse(order)
    }

    pub fn add_station(&mut self, id: StationId, name: &str) -> AppResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput(
                "station name must not be empty".to_string(),
            ));
        }
        let station = Station::new(id, name);
        if !self.registry.insert(station.clone()) {
            return Err(AppError::DuplicateStation(id));
        }
        self.graph.add_station(station);
        tracing::debug!(%id, name, "station added");
        Ok(())
    }

    /// Remove a station together with every route touching it.
    pub fn remove_station(&mut self, id: StationId) -> AppResult<()> {
        if !self.registry.remove(id) {
            return Err(AppError::StationNotFound(id));
        }
        self.graph.remove_station(id);
        tracing::debug!(%id, "station removed");
        Ok(())
    }

    /// Add a two-way route between existing stations. A pair holds at most
    /// one route, open or closed.
    pub fn connect(&mut self, from: StationId, to: StationId, weight: Real) -> AppResult<()> {
        self.require_station(from)?;
        self.require_station(to)?;
        if from == to {
            return Err(AppError::InvalidInput(format!(
                "a route must join two different stations, got {from} twice"
            )));
        }
        let weight = ensure_weight(weight, "route weight")?;
        if self.connected(from, to) {
            return Err(AppError::DuplicateRoute { from, to });
        }
        self.graph.add_edge(from, to, weight, true);
        tracing::debug!(%from, %to, weight, "route added");
        Ok(())
    }

    /// Remove the first route between `from` and `to`, both directions.
    pub fn disconnect(&mut self, from: StationId, to: StationId) -> AppResult<()> {
        self.require_edge(from, to)?;
        self.graph.remove_edge(from, to, true);
        tracing::debug!(%from, %to, "route removed");
        Ok(())
    }

    /// Close the first route between `from` and `to`, both directions.
    pub fn close(&mut self, from: StationId, to: StationId) -> AppResult<()> {
        self.set_closed(from, to, true)
    }

    pub fn reopen(&mut self, from: StationId, to: StationId) -> AppResult<()> {
        self.set_closed(from, to, false)
    }

    fn set_closed(&mut self, from: StationId, to: StationId, closed: bool) -> AppResult<()> {
        self.require_edge(from, to)?;
        self.graph.mark_edge_closed(from, to, closed, true);
        tracing::debug!(%from, %to, closed, "route state changed");
        Ok(())
    }

    fn require_station(&self, id: StationId) -> AppResult<()> {
        if self.graph.has_station(id) {
            Ok(())
        } else {
            Err(AppError::StationNotFound(id))
        }
    }

    fn connected(&self, a: StationId, b: StationId) -> bool {
        self.graph.has_edge(a, b) || self.graph.has_edge(b, a)
    }

    fn require_edge(&self, from: StationId, to: StationId) -> AppResult<()> {
        if self.graph.has_edge(from, to) {
            Ok(())
        } else {
            Err(AppError::RouteNotFound { from, to })
        }
    }

    fn name_of(&self, id: StationId) -> String {
        self.graph.station_name(id).unwrap_or_default().to_string()
    }

    /// Run a path query and record it when a path exists.
    #[tracing::instrument(skip(self))]
    pub fn find_route(
        &mut self,
        algorithm: Algorithm,
        origin: StationId,
        destination: StationId,
    ) -> AppResult<RouteOutcome> {
        let origin_station = self.station(origin)?.clone();
        let destination_station = self.station(destination)?.clone();

        let timer = QueryTimer::start(QueryKind::Route);
        let route = find_route(&self.graph, algorithm, origin, destination);
        timer.finish();

        let path_names: Vec<String> = route.path.iter().map(|&id| self.name_of(id)).collect();
        let outcome = RouteOutcome {
            algorithm,
            origin: origin_station,
            destination: destination_station,
            path: route.path,
            path_names,
            cost: route.cost,
        };

        if outcome.found() {
            self.reports.add(ReportEntry::route(
                algorithm.name(),
                (origin, outcome.origin.name.as_str()),
                (destination, outcome.destination.name.as_str()),
                outcome.path.clone(),
                outcome.path_names.clone(),
                outcome.cost,
            ));
            tracing::info!(hops = outcome.hops(), cost = outcome.cost, "route found");
        } else {
            tracing::info!("no route");
        }
        Ok(outcome)
    }

    /// Run a spanning tree query and record it when the tree is non-empty.
    #[tracing::instrument(skip(self))]
    pub fn spanning_tree(&mut self, algorithm: MstAlgorithm) -> AppResult<MstOutcome> {
        let timer = QueryTimer::start(QueryKind::SpanningTree);
        let tree = spanning_tree(&self.graph, algorithm);
        timer.finish();

        if !tree.is_empty() {
            let entry = ReportEntry::spanning_tree(
                algorithm.name(),
                &tree.edges,
                |id| self.name_of(id),
                tree.total_cost,
            );
            self.reports.add(entry);
        }
        tracing::info!(edges = tree.len(), total_cost = tree.total_cost, "spanning tree");
        Ok(MstOutcome {
            algorithm,
            edges: tree.edges,
            total_cost: tree.total_cost,
            station_count: self.graph.station_count(),
        })
    }

    /// Replace the whole network with the contents of the data directory.
    ///
    /// Duplicate station ids, routes to unknown stations, repeated routes
    /// between one pair, closures of missing routes and unreadable reports are
    /// skipped like malformed lines.
    #[tracing::instrument(skip(self, config), fields(data_dir = %config.data_dir.display()))]
    pub fn load(&mut self, config: &AppConfig) -> AppResult<LoadSummary> {
        let files = config.data_files();
        let stations = read_stations(&files.stations)?;
        let routes = read_routes(&files.routes)?;
        let closures = read_closures(&files.closures)?;
        let (reports, bad_reports) = ReportLog::load_jsonl(&config.reports_path())?;

        let mut network = Network {
            reports,
            ..Network::default()
        };
        let mut summary = LoadSummary {
            skipped: stations.skipped + routes.skipped + closures.skipped + bad_reports,
            ..LoadSummary::default()
        };

        for station in stations.records {
            let id = station.id;
            if network.registry.insert(station.clone()) {
                network.graph.add_station(station);
                summary.stations += 1;
            } else {
                tracing::warn!(%id, "duplicate station id, keeping the first");
                summary.skipped += 1;
            }
        }
        for route in routes.records {
            let (from, to) = (route.from, route.to);
            if !network.graph.has_station(from) || !network.graph.has_station(to) {
                tracing::warn!(%from, %to, "route to unknown station");
                summary.skipped += 1;
            } else if from == to || network.connected(from, to) {
                tracing::warn!(%from, %to, "repeated or looping route, keeping the first");
                summary.skipped += 1;
            } else {
                network.graph.add_edge(from, to, route.weight, true);
                summary.routes += 1;
            }
        }
        for closure in closures.records {
            if network.graph.has_edge(closure.from, closure.to) {
                network
                    .graph
                    .mark_edge_closed(closure.from, closure.to, true, true);
                summary.closures += 1;
            } else {
                tracing::warn!(from = %closure.from, to = %closure.to, "closure of unknown route");
                summary.skipped += 1;
            }
        }

        for finding in check_consistency(&network.graph) {
            tracing::warn!(%finding, "inconsistent network");
        }

        *self = network;
        tracing::info!(%summary, reports = self.reports.len(), "network loaded");
        Ok(summary)
    }

    /// Write stations, routes, closures and reports to the data directory.
    #[tracing::instrument(skip(self, config), fields(data_dir = %config.data_dir.display()))]
    pub fn save(&self, config: &AppConfig) -> AppResult<()> {
        let files = config.data_files();
        let edges = self.graph.all_edges();
        write_stations(&files.stations, &self.registry.stations())?;
        write_routes(&files.routes, &edges)?;
        write_closures(&files.closures, &edges)?;
        self.reports.save_jsonl(&config.reports_path())?;
        tracing::info!(
            stations = self.graph.station_count(),
            routes = self.graph.edge_count(),
            "network saved"
        );
        Ok(())
    }
}
