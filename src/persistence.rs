pub mod edge_list;
pub mod matrix;
pub mod tables;

use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;

use crate::error::{NetworkError, Result};
use crate::network::Network;
use crate::routing_table::RoutingTable;

/// On-disk topology representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyFormat {
    EdgeList,
    Matrix,
}

impl TopologyFormat {
    /// `.mat` / `.matrix` files are matrices, everything else is an edge list.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("mat") | Some("matrix") => TopologyFormat::Matrix,
            _ => TopologyFormat::EdgeList,
        }
    }
}

impl FromStr for TopologyFormat {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "edges" | "edge-list" => Ok(TopologyFormat::EdgeList),
            "matrix" => Ok(TopologyFormat::Matrix),
            other => Err(NetworkError::invalid(format!(
                "unknown topology format '{}' (expected 'edges' or 'matrix')",
                other
            ))),
        }
    }
}

impl fmt::Display for TopologyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopologyFormat::EdgeList => write!(f, "edges"),
            TopologyFormat::Matrix => write!(f, "matrix"),
        }
    }
}

pub fn save(network: &Network, path: &Path, format: TopologyFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let writer = BufWriter::new(File::create(path)?);
    match format {
        TopologyFormat::EdgeList => edge_list::write(network, writer)?,
        TopologyFormat::Matrix => matrix::write(network, writer)?,
    }

    info!(
        "Saved {} routers / {} links to {} ({})",
        network.len(),
        network.link_count(),
        path.display(),
        format
    );
    Ok(())
}

pub fn load(path: &Path, format: TopologyFormat) -> Result<Network> {
    let reader = BufReader::new(File::open(path)?);
    let network = match format {
        TopologyFormat::EdgeList => edge_list::read(reader)?,
        TopologyFormat::Matrix => matrix::read(reader)?,
    };

    info!(
        "Loaded {} routers / {} links from {} ({})",
        network.len(),
        network.link_count(),
        path.display(),
        format
    );
    Ok(network)
}

pub fn export_tables(tables: &[RoutingTable], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    tables::write(tables, BufWriter::new(File::create(path)?))?;
    info!("Exported {} routing tables to {}", tables.len(), path.display());
    Ok(())
}

/// Saved topologies in `dir` (`red_*.txt` edge lists and matrix files), sorted
/// by name. The directory is created when missing.
pub fn list_saved(dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut saved = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let is_edge_list = name.starts_with("red_") && name.ends_with(".txt");
        if path.is_file() && (is_edge_list || TopologyFormat::from_path(&path) == TopologyFormat::Matrix) {
            saved.push(path);
        }
    }

    saved.sort();
    Ok(saved)
}
