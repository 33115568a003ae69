pub mod dijkstra;

pub use dijkstra::{ShortestPath, ShortestPathTree, path_cost, shortest_path, shortest_path_tree};
