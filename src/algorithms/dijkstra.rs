use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;

use crate::error::{NetworkError, Result};
use crate::network::Network;
use crate::{Cost, RouterId};

/// Shortest path between two routers. Only built by [`shortest_path`], so the
/// path always holds at least the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPath {
    path: Vec<RouterId>,
    cost: u64,
}

impl ShortestPath {
    /// Routers from source to destination, both included.
    pub fn path(&self) -> &[RouterId] {
        &self.path
    }

    pub fn cost(&self) -> u64 {
        self.cost
    }

    pub fn source(&self) -> RouterId {
        self.path[0]
    }

    pub fn destination(&self) -> RouterId {
        self.path[self.path.len() - 1]
    }

    pub fn hops(&self) -> usize {
        self.path.len() - 1
    }
}

/// Result of one single-source run: per-router distance and predecessor,
/// indexed by [`RouterId`]. Built fresh for every query.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: RouterId,
    distance: Vec<Option<u64>>,
    predecessor: Vec<Option<RouterId>>,
}

#[derive(Debug, PartialEq, Eq)]
struct State {
    cost: u64,
    router: RouterId,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap, lower id first on ties
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.router.cmp(&self.router))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl ShortestPathTree {
    pub fn source(&self) -> RouterId {
        self.source
    }

    /// Minimal cost from the source, `None` when unreachable or unknown.
    pub fn distance(&self, router: RouterId) -> Option<u64> {
        self.distance.get(router).copied().flatten()
    }

    pub fn predecessor(&self, router: RouterId) -> Option<RouterId> {
        self.predecessor.get(router).copied().flatten()
    }

    pub fn is_reachable(&self, router: RouterId) -> bool {
        self.distance(router).is_some()
    }

    /// Routers on the path from the source to `dest`, both ends included.
    pub fn path_to(&self, dest: RouterId) -> Option<Vec<RouterId>> {
        self.distance(dest)?;

        let mut path = vec![dest];
        let mut current = dest;
        while let Some(previous) = self.predecessor(current) {
            path.push(previous);
            current = previous;
        }

        path.reverse();
        Some(path)
    }

    /// First router after the source on the way to `dest`.
    /// The source is its own next hop.
    pub fn next_hop(&self, dest: RouterId) -> Option<RouterId> {
        self.distance(dest)?;
        if dest == self.source {
            return Some(self.source);
        }

        let mut current = dest;
        loop {
            match self.predecessor(current) {
                Some(previous) if previous == self.source => return Some(current),
                Some(previous) => current = previous,
                None => return None,
            }
        }
    }
}

/// Dijkstra from `source` over the current topology.
///
/// Stale heap entries are skipped on pop instead of decreasing keys. A
/// predecessor only changes on a strictly shorter distance, so among equal-cost
/// paths the first one found is kept.
pub fn shortest_path_tree(network: &Network, source: RouterId) -> Result<ShortestPathTree> {
    check_router(network, source)?;

    let n = network.len();
    let mut distance: Vec<Option<u64>> = vec![None; n];
    let mut predecessor: Vec<Option<RouterId>> = vec![None; n];
    let mut visited = vec![false; n];
    let mut heap = BinaryHeap::new();

    distance[source] = Some(0);
    heap.push(State {
        cost: 0,
        router: source,
    });

    while let Some(State { cost, router }) = heap.pop() {
        if visited[router] {
            continue;
        }
        visited[router] = true;

        for link in network.neighbors(router)? {
            let candidate = cost + u64::from(link.cost);
            let improves = distance[link.neighbor].is_none_or(|known| candidate < known);

            if !visited[link.neighbor] && improves {
                distance[link.neighbor] = Some(candidate);
                predecessor[link.neighbor] = Some(router);
                heap.push(State {
                    cost: candidate,
                    router: link.neighbor,
                });
            }
        }
    }

    debug!(
        "Dijkstra from R{}: {}/{} routers reachable",
        source,
        visited.iter().filter(|seen| **seen).count(),
        n
    );

    Ok(ShortestPathTree {
        source,
        distance,
        predecessor,
    })
}

/// Cheapest path from `source` to `dest`.
pub fn shortest_path(network: &Network, source: RouterId, dest: RouterId) -> Result<ShortestPath> {
    check_router(network, dest)?;
    let tree = shortest_path_tree(network, source)?;

    match (tree.path_to(dest), tree.distance(dest)) {
        (Some(path), Some(cost)) => Ok(ShortestPath { path, cost }),
        _ => Err(NetworkError::NoRoute {
            from: source,
            to: dest,
        }),
    }
}

pub(crate) fn check_router(network: &Network, id: RouterId) -> Result<()> {
    if network.is_empty() {
        return Err(NetworkError::invalid("the network has no routers"));
    }
    if !network.contains(id) {
        return Err(NetworkError::invalid(format!(
            "router R{} is out of range (network has {} routers)",
            id,
            network.len()
        )));
    }
    Ok(())
}

/// Sum of link costs along `path`, `None` if two consecutive routers are not adjacent.
pub fn path_cost(network: &Network, path: &[RouterId]) -> Option<u64> {
    path.windows(2).try_fold(0u64, |total, pair| {
        network
            .link_cost(pair[0], pair[1])
            .map(|cost: Cost| total + u64::from(cost))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 0-1 (5), 1-2 (3), 0-2 (10), 2-3 (2)
    fn diamond() -> Network {
        let mut network = Network::with_routers(4);
        network.add_link(0, 1, 5).unwrap();
        network.add_link(1, 2, 3).unwrap();
        network.add_link(0, 2, 10).unwrap();
        network.add_link(2, 3, 2).unwrap();
        network
    }

    #[test]
    fn finds_cheaper_multi_hop_path() {
        let route = shortest_path(&diamond(), 0, 3).unwrap();

        assert_eq!(route.path(), [0, 1, 2, 3]);
        assert_eq!(route.cost(), 10);
        assert_eq!(route.hops(), 3);
        assert_eq!(path_cost(&diamond(), route.path()), Some(10));
    }

    #[test]
    fn path_to_self_is_trivial() {
        let route = shortest_path(&diamond(), 2, 2).unwrap();
        assert_eq!(route.path(), [2]);
        assert_eq!(route.cost(), 0);
        assert_eq!(route.hops(), 0);
        assert_eq!((route.source(), route.destination()), (2, 2));
    }

    #[test]
    fn isolated_router_has_no_route() {
        let mut network = diamond();
        let isolated = network.add_router();

        for source in 0..isolated {
            assert!(matches!(
                shortest_path(&network, source, isolated),
                Err(NetworkError::NoRoute { to, .. }) if to == isolated
            ));
        }
        let own = shortest_path(&network, isolated, isolated).unwrap();
        assert_eq!(own.path(), [isolated]);
        assert_eq!(own.cost(), 0);
    }

    #[test]
    fn rejects_out_of_range_and_empty_network() {
        assert!(matches!(
            shortest_path(&diamond(), 0, 4),
            Err(NetworkError::InvalidArgument(_))
        ));
        assert!(matches!(
            shortest_path(&diamond(), 9, 0),
            Err(NetworkError::InvalidArgument(_))
        ));
        assert!(matches!(
            shortest_path(&Network::new(), 0, 0),
            Err(NetworkError::InvalidArgument(_))
        ));
    }

    #[test]
    fn tree_records_distances_and_next_hops() {
        let tree = shortest_path_tree(&diamond(), 0).unwrap();

        assert_eq!(tree.source(), 0);
        assert_eq!(tree.distance(0), Some(0));
        assert_eq!(tree.distance(1), Some(5));
        assert_eq!(tree.distance(2), Some(8));
        assert_eq!(tree.distance(3), Some(10));
        assert_eq!(tree.predecessor(0), None);
        assert_eq!(tree.predecessor(2), Some(1));
        assert_eq!(tree.next_hop(0), Some(0));
        assert_eq!(tree.next_hop(1), Some(1));
        assert_eq!(tree.next_hop(3), Some(1));
    }

    #[test]
    fn equal_cost_paths_keep_first_found() {
        // 0-1-3 and 0-2-3 both cost 2; R1 is expanded first.
        let mut network = Network::with_routers(4);
        network.add_link(0, 1, 1).unwrap();
        network.add_link(0, 2, 1).unwrap();
        network.add_link(1, 3, 1).unwrap();
        network.add_link(2, 3, 1).unwrap();

        let route = shortest_path(&network, 0, 3).unwrap();
        assert_eq!(route.cost(), 2);
        assert_eq!(route.path(), [0, 1, 3]);
    }

    #[test]
    fn queries_do_not_interfere() {
        let network = diamond();
        let from_zero = shortest_path_tree(&network, 0).unwrap();
        let from_three = shortest_path_tree(&network, 3).unwrap();

        assert_eq!(from_zero.distance(3), Some(10));
        assert_eq!(from_three.distance(0), Some(10));
        assert_eq!(from_three.path_to(0), Some(vec![3, 2, 1, 0]));
    }
}
