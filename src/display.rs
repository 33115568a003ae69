//! Console tables for the shell.

use std::fmt;

use crate::RouterId;
use crate::algorithms::ShortestPath;
use crate::network::{Link, Network, router_label};
use crate::routing_table::{Route, RoutingTable};

const CELL: usize = 5;

/// Cost matrix with `R<i>` headers and `-` for missing links.
pub struct CostMatrix<'a>(pub &'a Network);

impl fmt::Display for CostMatrix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let network = self.0;
        if network.is_empty() {
            return writeln!(f, "No routers in the network.");
        }

        writeln!(
            f,
            "Cost matrix ({} routers, {} links):",
            network.len(),
            network.link_count()
        )?;
        write!(f, "{:<CELL$}", "")?;
        for router in network.routers() {
            write!(f, "{:>CELL$}", router_label(router.id))?;
        }
        writeln!(f)?;

        for (i, row) in network.adjacency_matrix().iter().enumerate() {
            write!(f, "{:<CELL$}", router_label(i))?;
            for &cell in row {
                if cell < 0 {
                    write!(f, "{:>CELL$}", "-")?;
                } else {
                    write!(f, "{:>CELL$}", cell)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub struct RoutingTableView<'a>(pub &'a RoutingTable);

impl fmt::Display for RoutingTableView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.0;
        writeln!(f, "Routing table for {}:", router_label(table.origin()))?;
        writeln!(f, "{:<12} {:<12} {:<8}", "Destination", "Next Hop", "Cost")?;
        writeln!(f, "{}", "-".repeat(34))?;

        for (destination, route) in table.iter() {
            match route {
                Route::Via { next_hop, cost } => writeln!(
                    f,
                    "{:<12} {:<12} {:<8}",
                    router_label(destination),
                    router_label(*next_hop),
                    cost
                )?,
                Route::NoRoute => {
                    writeln!(f, "{:<12} {:<12} {:<8}", router_label(destination), "-", "-")?
                }
            }
        }
        Ok(())
    }
}

pub struct PathView<'a>(pub &'a ShortestPath);

impl fmt::Display for PathView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let route = self.0;
        let hops: Vec<String> = route.path().iter().map(|id| router_label(*id)).collect();

        writeln!(
            f,
            "Shortest path {} -> {}:",
            router_label(route.source()),
            router_label(route.destination())
        )?;
        writeln!(f, "  {}", hops.join(" -> "))?;
        writeln!(f, "Total cost: {}", route.cost())
    }
}

pub struct NeighborsView<'a> {
    pub router: RouterId,
    pub links: &'a [Link],
}

impl fmt::Display for NeighborsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Neighbors of {}:", router_label(self.router))?;
        if self.links.is_empty() {
            return writeln!(f, "  none");
        }
        for link in self.links {
            writeln!(f, "  {:<8} cost {}", router_label(link.neighbor), link.cost)?;
        }
        Ok(())
    }
}
