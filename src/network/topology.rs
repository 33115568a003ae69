use log::debug;

use crate::error::{NetworkError, Result};
use crate::{Cost, RouterId};

/// Matrix cell used for "no link" in [`Network::adjacency_matrix`].
pub const NO_LINK: i64 = -1;

/// Largest network accepted from a topology file or the random generator.
pub const MAX_ROUTERS: usize = 4096;

/// One direction of an undirected link, as stored in a router's neighbor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub neighbor: RouterId,
    pub cost: Cost,
}

/// A router is purely structural: its id and its neighbor list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    pub id: RouterId,
    neighbors: Vec<Link>,
}

impl Router {
    fn new(id: RouterId) -> Self {
        Self {
            id,
            neighbors: Vec::new(),
        }
    }

    pub fn neighbors(&self) -> &[Link] {
        &self.neighbors
    }

    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    fn cost_to(&self, neighbor: RouterId) -> Option<Cost> {
        self.neighbors
            .iter()
            .find(|link| link.neighbor == neighbor)
            .map(|link| link.cost)
    }

    /// Inserts or updates the entry for `neighbor`, returning the replaced cost.
    fn set_link(&mut self, neighbor: RouterId, cost: Cost) -> Option<Cost> {
        if let Some(link) = self.neighbors.iter_mut().find(|l| l.neighbor == neighbor) {
            let previous = link.cost;
            link.cost = cost;
            Some(previous)
        } else {
            self.neighbors.push(Link { neighbor, cost });
            None
        }
    }

    fn drop_link(&mut self, neighbor: RouterId) -> bool {
        let before = self.neighbors.len();
        self.neighbors.retain(|link| link.neighbor != neighbor);
        self.neighbors.len() != before
    }
}

/// Undirected weighted router graph stored as a dense arena indexed by [`RouterId`].
///
/// Invariants held after every public operation:
/// - every link is stored in both endpoints with the same cost,
/// - no self-loops and at most one entry per neighbor pair,
/// - costs are strictly positive,
/// - `routers[i].id == i` for every router.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Network {
    routers: Vec<Router>,
}

impl Network {
    pub fn new() -> Self {
        Self {
            routers: Vec::new(),
        }
    }

    /// Rejects router counts above [`MAX_ROUTERS`] before anything is allocated.
    pub fn check_capacity(count: usize) -> Result<()> {
        if count > MAX_ROUTERS {
            return Err(NetworkError::invalid(format!(
                "{} routers exceeds the limit of {}",
                count, MAX_ROUTERS
            )));
        }
        Ok(())
    }

    /// Network with `count` routers and no links.
    pub fn with_routers(count: usize) -> Self {
        Self {
            routers: (0..count).map(Router::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.routers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routers.is_empty()
    }

    pub fn contains(&self, id: RouterId) -> bool {
        id < self.routers.len()
    }

    pub fn routers(&self) -> &[Router] {
        &self.routers
    }

    pub fn router(&self, id: RouterId) -> Result<&Router> {
        self.routers.get(id).ok_or(NetworkError::NotFound(id))
    }

    pub fn neighbors(&self, id: RouterId) -> Result<&[Link]> {
        self.router(id).map(Router::neighbors)
    }

    pub fn link_cost(&self, a: RouterId, b: RouterId) -> Option<Cost> {
        self.routers.get(a).and_then(|router| router.cost_to(b))
    }

    /// Number of undirected links.
    pub fn link_count(&self) -> usize {
        self.routers.iter().map(Router::degree).sum::<usize>() / 2
    }

    /// Every undirected link once, as `(a, b, cost)` with `a < b`.
    pub fn links(&self) -> impl Iterator<Item = (RouterId, RouterId, Cost)> + '_ {
        self.routers.iter().flat_map(|router| {
            router
                .neighbors
                .iter()
                .filter(move |link| router.id < link.neighbor)
                .map(move |link| (router.id, link.neighbor, link.cost))
        })
    }

    pub fn add_router(&mut self) -> RouterId {
        let id = self.routers.len();
        self.routers.push(Router::new(id));
        debug!("Added router R{}", id);
        id
    }

    /// Removes a router and its links, then renumbers the survivors so ids stay
    /// contiguous. Ids greater than `id` shift down by one.
    pub fn remove_router(&mut self, id: RouterId) -> Result<()> {
        if !self.contains(id) {
            return Err(NetworkError::NotFound(id));
        }

        self.routers.remove(id);
        for (index, router) in self.routers.iter_mut().enumerate() {
            router.id = index;
            router.neighbors.retain(|link| link.neighbor != id);
            for link in &mut router.neighbors {
                if link.neighbor > id {
                    link.neighbor -= 1;
                }
            }
        }

        debug!("Removed router R{}, {} routers remain", id, self.routers.len());
        Ok(())
    }

    /// Adds a link, or overwrites the cost of an existing one in both directions.
    /// Returns the replaced cost, if any.
    pub fn add_link(&mut self, a: RouterId, b: RouterId, cost: Cost) -> Result<Option<Cost>> {
        self.check_pair(a, b)?;
        if cost == 0 {
            return Err(NetworkError::invalid("link cost must be strictly positive"));
        }

        let previous = self.routers[a].set_link(b, cost);
        self.routers[b].set_link(a, cost);

        match previous {
            Some(old) => debug!("Updated link R{} <-> R{} cost {} -> {}", a, b, old, cost),
            None => debug!("Added link R{} <-> R{} cost {}", a, b, cost),
        }
        Ok(previous)
    }

    /// Removes the link between `a` and `b`. Returns `false` when there was none.
    pub fn remove_link(&mut self, a: RouterId, b: RouterId) -> Result<bool> {
        self.check_pair(a, b)?;

        let removed = self.routers[a].drop_link(b);
        self.routers[b].drop_link(a);

        if removed {
            debug!("Removed link R{} <-> R{}", a, b);
        }
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.routers.clear();
    }

    /// Dense `n x n` cost matrix: `0` on the diagonal, [`NO_LINK`] where routers
    /// are not adjacent.
    pub fn adjacency_matrix(&self) -> Vec<Vec<i64>> {
        let n = self.routers.len();
        let mut matrix = vec![vec![NO_LINK; n]; n];

        for router in &self.routers {
            matrix[router.id][router.id] = 0;
            for link in &router.neighbors {
                matrix[router.id][link.neighbor] = i64::from(link.cost);
            }
        }

        matrix
    }

    /// Builds a network from a dense cost matrix, rejecting anything that would
    /// break the store's invariants.
    pub fn from_adjacency_matrix(rows: &[Vec<i64>]) -> Result<Self> {
        let n = rows.len();
        Self::check_capacity(n)?;

        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(NetworkError::invalid(format!(
                    "matrix row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            if row[i] != 0 {
                return Err(NetworkError::invalid(format!(
                    "matrix diagonal at {} must be 0, found {}",
                    i, row[i]
                )));
            }
        }

        let mut network = Network::with_routers(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let (forward, backward) = (rows[i][j], rows[j][i]);
                if forward != backward {
                    return Err(NetworkError::invalid(format!(
                        "matrix is not symmetric at ({}, {}): {} vs {}",
                        i, j, forward, backward
                    )));
                }
                if forward == NO_LINK {
                    continue;
                }
                let cost = Cost::try_from(forward)
                    .ok()
                    .filter(|cost| *cost > 0)
                    .ok_or_else(|| {
                        NetworkError::invalid(format!(
                            "invalid cost {} at ({}, {})",
                            forward, i, j
                        ))
                    })?;
                network.add_link(i, j, cost)?;
            }
        }

        Ok(network)
    }

    fn check_pair(&self, a: RouterId, b: RouterId) -> Result<()> {
        if a == b {
            return Err(NetworkError::invalid(format!(
                "a router cannot link to itself (R{})",
                a
            )));
        }
        for id in [a, b] {
            if !self.contains(id) {
                return Err(NetworkError::invalid(format!(
                    "router R{} is out of range (network has {} routers)",
                    id,
                    self.routers.len()
                )));
            }
        }
        Ok(())
    }
}
