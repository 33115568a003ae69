//! Text commands driving a [`Network`]: the interactive front end and `-c`
//! scripts both go through [`Session::execute`].

use std::path::PathBuf;

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::algorithms::shortest_path;
use crate::config::SimulatorConfig;
use crate::display::{CostMatrix, NeighborsView, PathView, RoutingTableView};
use crate::error::{NetworkError, Result};
use crate::network::{Network, parse_router_id, router_label};
use crate::persistence::{self, TopologyFormat};
use crate::routing_table::{all_routing_tables, routing_table};
use crate::{Cost, RouterId};

pub const HELP: &str = "\
Commands:
  show                              print the cost matrix
  path <from> <to>                  shortest path between two routers
  neighbors <id>                    links of one router
  add-router [<peer>:<cost> ...]    add a router, optionally linked to peers
  remove-router <id>                remove a router (higher ids shift down)
  add-link <a> <b> <cost>           add a link or update its cost
  remove-link <a> <b>               remove a link
  table <id>                        routing table of one router
  tables                            all routing tables, also exported to disk
  generate <routers> [seed]         replace the network with a random one
  save [file]                       save (.mat/.matrix files use the matrix format)
  load <file>                       load a saved network
  list                              saved networks in the data directory
  help                              this text
  exit | quit                       leave
Router ids may be written as 3 or R3.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Path { from: RouterId, to: RouterId },
    Neighbors(RouterId),
    AddRouter { links: Vec<(RouterId, Cost)> },
    RemoveRouter(RouterId),
    AddLink { a: RouterId, b: RouterId, cost: Cost },
    RemoveLink { a: RouterId, b: RouterId },
    Table(RouterId),
    Tables,
    Generate { routers: usize, seed: Option<u64> },
    Save { file: Option<String> },
    Load { file: String },
    List,
    Help,
    Exit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(NetworkError::invalid("empty command"));
        };
        let args: Vec<&str> = words.collect();

        let command = match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("show" | "topology", []) => Command::Show,
            ("path", [from, to]) => Command::Path {
                from: parse_router_id(from)?,
                to: parse_router_id(to)?,
            },
            ("neighbors", [id]) => Command::Neighbors(parse_router_id(id)?),
            ("add-router", peers) => Command::AddRouter {
                links: peers.iter().map(|peer| parse_peer(peer)).collect::<Result<_>>()?,
            },
            ("remove-router", [id]) => Command::RemoveRouter(parse_router_id(id)?),
            ("add-link", [a, b, cost]) => Command::AddLink {
                a: parse_router_id(a)?,
                b: parse_router_id(b)?,
                cost: parse_cost(cost)?,
            },
            ("remove-link", [a, b]) => Command::RemoveLink {
                a: parse_router_id(a)?,
                b: parse_router_id(b)?,
            },
            ("table", [id]) => Command::Table(parse_router_id(id)?),
            ("tables", []) => Command::Tables,
            ("generate", [routers, rest @ ..]) if rest.len() <= 1 => Command::Generate {
                routers: routers.parse().map_err(|_| {
                    NetworkError::invalid(format!("'{}' is not a router count", routers))
                })?,
                seed: rest
                    .first()
                    .map(|seed| {
                        seed.parse()
                            .map_err(|_| NetworkError::invalid(format!("'{}' is not a seed", seed)))
                    })
                    .transpose()?,
            },
            ("save", []) => Command::Save { file: None },
            ("save", [file]) => Command::Save {
                file: Some(file.to_string()),
            },
            ("load", [file]) => Command::Load {
                file: file.to_string(),
            },
            ("list", []) => Command::List,
            ("help" | "?", []) => Command::Help,
            ("exit" | "quit", []) => Command::Exit,
            (other, _) => {
                return Err(NetworkError::invalid(format!(
                    "cannot parse '{}' (unknown command or wrong arguments for '{}'); try 'help'",
                    line.trim(),
                    other
                )));
            }
        };

        Ok(command)
    }
}

/// Link costs arrive as signed text so negative input gets a cost error
/// rather than a parse error.
fn parse_cost(token: &str) -> Result<Cost> {
    let value: i64 = token
        .parse()
        .map_err(|_| NetworkError::invalid(format!("'{}' is not a link cost", token)))?;
    Cost::try_from(value)
        .ok()
        .filter(|cost| *cost > 0)
        .ok_or_else(|| NetworkError::invalid(format!("link cost must be strictly positive, got {}", value)))
}

fn parse_peer(token: &str) -> Result<(RouterId, Cost)> {
    let (peer, cost) = token
        .split_once(':')
        .ok_or_else(|| NetworkError::invalid(format!("expected <peer>:<cost>, found '{}'", token)))?;
    Ok((parse_router_id(peer)?, parse_cost(cost)?))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Output(String),
    Exit,
}

/// Owns the network for one simulation run.
pub struct Session {
    network: Network,
    config: SimulatorConfig,
    rng: StdRng,
    current_file: Option<(PathBuf, TopologyFormat)>,
}

impl Session {
    pub fn new(network: Network, config: SimulatorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            network,
            config,
            rng,
            current_file: None,
        }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// File used by a bare `save`: the last file loaded or saved.
    pub fn current_file(&self) -> Option<&PathBuf> {
        self.current_file.as_ref().map(|(path, _)| path)
    }

    /// Format a bare `save` writes, which is the one the current file was read
    /// or written in.
    pub fn current_format(&self) -> Option<TopologyFormat> {
        self.current_file.as_ref().map(|(_, format)| *format)
    }

    pub fn set_current_file(&mut self, path: PathBuf, format: TopologyFormat) {
        self.current_file = Some((path, format));
    }

    /// Replaces the network with a random one drawn from the session's generator.
    pub fn generate(&mut self, routers: usize) -> Result<()> {
        let params = self.config.random_topology();
        self.network.generate_random(routers, &params, &mut self.rng)
    }

    pub fn execute_line(&mut self, line: &str) -> Result<Outcome> {
        let command = Command::parse(line)?;
        self.execute(command)
    }

    /// Runs one command. On error the network is left as it was.
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        let output = match command {
            Command::Exit => return Ok(Outcome::Exit),
            Command::Help => HELP.to_string(),
            Command::Show => CostMatrix(&self.network).to_string(),
            Command::Path { from, to } => match shortest_path(&self.network, from, to) {
                Ok(route) => PathView(&route).to_string(),
                Err(NetworkError::NoRoute { from, to }) => format!(
                    "No route between {} and {}.",
                    router_label(from),
                    router_label(to)
                ),
                Err(e) => return Err(e),
            },
            Command::Neighbors(id) => NeighborsView {
                router: id,
                links: self.network.neighbors(id)?,
            }
            .to_string(),
            Command::AddRouter { links } => self.add_router(&links)?,
            Command::RemoveRouter(id) => {
                self.network.remove_router(id)?;
                format!(
                    "Removed {}; routers above it were renumbered ({} remain).",
                    router_label(id),
                    self.network.len()
                )
            }
            Command::AddLink { a, b, cost } => match self.network.add_link(a, b, cost)? {
                Some(previous) => format!(
                    "Updated link {} <-> {}: cost {} -> {}.",
                    router_label(a),
                    router_label(b),
                    previous,
                    cost
                ),
                None => format!(
                    "Added link {} <-> {} with cost {}.",
                    router_label(a),
                    router_label(b),
                    cost
                ),
            },
            Command::RemoveLink { a, b } => {
                if self.network.remove_link(a, b)? {
                    format!("Removed link {} <-> {}.", router_label(a), router_label(b))
                } else {
                    format!("No link between {} and {}.", router_label(a), router_label(b))
                }
            }
            Command::Table(id) => RoutingTableView(&routing_table(&self.network, id)?).to_string(),
            Command::Tables => self.all_tables()?,
            Command::Generate { routers, seed } => {
                match seed {
                    Some(seed) => self.network.generate_random(
                        routers,
                        &self.config.random_topology(),
                        &mut StdRng::seed_from_u64(seed),
                    )?,
                    None => self.generate(routers)?,
                }
                format!(
                    "Generated a random network with {} routers and {} links.",
                    self.network.len(),
                    self.network.link_count()
                )
            }
            Command::Save { file } => {
                let (path, format) = match (file, self.current_file.clone()) {
                    (Some(file), _) => {
                        let path = self.config.resolve(&file);
                        let format = TopologyFormat::from_path(&path);
                        (path, format)
                    }
                    (None, Some(current)) => current,
                    (None, None) => (self.config.topology_path(), TopologyFormat::EdgeList),
                };
                persistence::save(&self.network, &path, format)?;
                let message = format!("Network saved to {} ({}).", path.display(), format);
                self.set_current_file(path, format);
                message
            }
            Command::Load { file } => {
                let path = self.config.resolve(&file);
                let format = TopologyFormat::from_path(&path);
                self.network = persistence::load(&path, format)?;
                let message = format!(
                    "Loaded {} routers and {} links from {}.",
                    self.network.len(),
                    self.network.link_count(),
                    path.display()
                );
                self.set_current_file(path, format);
                message
            }
            Command::List => {
                let saved = persistence::list_saved(&self.config.data_dir)?;
                if saved.is_empty() {
                    format!("No saved networks in {}.", self.config.data_dir.display())
                } else {
                    let entries: Vec<String> = saved
                        .iter()
                        .enumerate()
                        .map(|(index, path)| format!("  [{}] {}", index + 1, path.display()))
                        .collect();
                    format!("Saved networks:\n{}", entries.join("\n"))
                }
            }
        };

        Ok(Outcome::Output(output))
    }

    fn add_router(&mut self, links: &[(RouterId, Cost)]) -> Result<String> {
        if let Some((peer, _)) = links.iter().find(|(peer, _)| !self.network.contains(*peer)) {
            return Err(NetworkError::invalid(format!(
                "cannot link the new router to {}: it does not exist",
                router_label(*peer)
            )));
        }

        let id = self.network.add_router();
        for &(peer, cost) in links {
            self.network.add_link(id, peer, cost)?;
        }

        info!("Router {} added with {} links", router_label(id), links.len());
        Ok(format!(
            "Added router {} with {} links.",
            router_label(id),
            self.network.neighbors(id)?.len()
        ))
    }

    fn all_tables(&self) -> Result<String> {
        let tables = all_routing_tables(&self.network)?;
        let path = self.config.tables_path();
        persistence::export_tables(&tables, &path)?;

        let views: Vec<String> = tables
            .iter()
            .map(|table| RoutingTableView(table).to_string())
            .collect();
        Ok(format!(
            "{}\nRouting tables exported to {}.",
            views.join("\n"),
            path.display()
        ))
    }
}
