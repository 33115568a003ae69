use std::collections::BTreeMap;

use log::debug;

use crate::RouterId;
use crate::algorithms::dijkstra::{self, ShortestPathTree};
use crate::error::{NetworkError, Result};
use crate::network::Network;

/// Forwarding decision for one destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Via { next_hop: RouterId, cost: u64 },
    /// Destination is in another connected component.
    NoRoute,
}

impl Route {
    pub fn next_hop(&self) -> Option<RouterId> {
        match self {
            Route::Via { next_hop, .. } => Some(*next_hop),
            Route::NoRoute => None,
        }
    }

    pub fn cost(&self) -> Option<u64> {
        match self {
            Route::Via { cost, .. } => Some(*cost),
            Route::NoRoute => None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, Route::Via { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTable {
    origin: RouterId,
    entries: BTreeMap<RouterId, Route>,
}

impl RoutingTable {
    pub fn new(origin: RouterId) -> Self {
        Self {
            origin,
            entries: BTreeMap::new(),
        }
    }

    fn from_tree(network: &Network, tree: &ShortestPathTree) -> Self {
        let mut table = RoutingTable::new(tree.source());

        for router in network.routers() {
            let route = match (tree.next_hop(router.id), tree.distance(router.id)) {
                (Some(next_hop), Some(cost)) => Route::Via { next_hop, cost },
                _ => Route::NoRoute,
            };
            table.add_route(router.id, route);
        }

        table
    }

    pub fn origin(&self) -> RouterId {
        self.origin
    }

    pub fn add_route(&mut self, destination: RouterId, route: Route) {
        self.entries.insert(destination, route);
    }

    pub fn get(&self, destination: RouterId) -> Option<&Route> {
        self.entries.get(&destination)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending destination order.
    pub fn iter(&self) -> impl Iterator<Item = (RouterId, &Route)> {
        self.entries.iter().map(|(destination, route)| (*destination, route))
    }

    /// Destinations with a route, the origin included.
    pub fn reachable_count(&self) -> usize {
        self.entries.values().filter(|route| route.is_reachable()).count()
    }
}

/// Routing table of `origin`: next hop and cost towards every router.
pub fn routing_table(network: &Network, origin: RouterId) -> Result<RoutingTable> {
    let tree = dijkstra::shortest_path_tree(network, origin)?;
    let table = RoutingTable::from_tree(network, &tree);

    debug!(
        "Routing table for R{}: {}/{} destinations reachable",
        origin,
        table.reachable_count(),
        table.len()
    );
    Ok(table)
}

/// One routing table per router, each from an independent Dijkstra run.
pub fn all_routing_tables(network: &Network) -> Result<Vec<RoutingTable>> {
    if network.is_empty() {
        return Err(NetworkError::invalid("the network has no routers"));
    }

    network
        .routers()
        .iter()
        .map(|router| routing_table(network, router.id))
        .collect()
}
