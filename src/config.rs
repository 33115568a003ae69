use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::Cost;
use crate::network::RandomTopology;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Directory holding saved topologies and exported tables.
    pub data_dir: PathBuf,
    pub topology_file: String,
    pub tables_file: String,
    pub link_probability: f64,
    pub min_cost: Cost,
    pub max_cost: Cost,
    /// Fixed seed for random topologies; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            topology_file: "red_guardada.txt".to_string(),
            tables_file: "tablas.txt".to_string(),
            link_probability: 0.4,
            min_cost: 1,
            max_cost: 20,
            seed: None,
        }
    }
}

impl SimulatorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: SimulatorConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.random_topology().validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("writing config {}", path.display()))?;
        Ok(())
    }

    pub fn random_topology(&self) -> RandomTopology {
        RandomTopology {
            link_probability: self.link_probability,
            cost_range: self.min_cost..=self.max_cost,
        }
    }

    /// Resolves a file name against the data directory; paths with a directory
    /// component are used as given.
    pub fn resolve(&self, file: &str) -> PathBuf {
        let path = Path::new(file);
        if path.is_absolute() || path.components().count() > 1 {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }

    pub fn topology_path(&self) -> PathBuf {
        self.resolve(&self.topology_file)
    }

    pub fn tables_path(&self) -> PathBuf {
        self.resolve(&self.tables_file)
    }
}
