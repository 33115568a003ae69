pub mod algorithms;
pub mod config;
pub mod display;
pub mod error;
pub mod network;
pub mod persistence;
pub mod routing_table;
pub mod shell;

/// Dense router index, contiguous in `[0, n)`.
pub type RouterId = usize;

/// Link cost. Always strictly positive once stored in a [`network::Network`].
pub type Cost = u32;

pub use algorithms::{ShortestPath, ShortestPathTree, shortest_path, shortest_path_tree};
pub use config::SimulatorConfig;
pub use error::{NetworkError, Result};
pub use network::{Link, Network, RandomTopology, Router};
pub use routing_table::{Route, RoutingTable, all_routing_tables, routing_table};
