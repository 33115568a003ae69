use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use router_sim::SimulatorConfig;
use router_sim::display::CostMatrix;
use router_sim::network::Network;
use router_sim::persistence::{self, TopologyFormat};
use router_sim::shell::{Outcome, Session};

#[derive(Parser)]
#[command(name = "router-sim", about = "Packet-routing network simulator")]
struct Cli {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for saved networks and exported routing tables
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Network file to load at startup
    #[arg(long, conflicts_with = "routers")]
    load: Option<PathBuf>,

    /// Format of --load; inferred from the extension when omitted
    #[arg(long, requires = "load")]
    format: Option<TopologyFormat>,

    /// Start from a random network with this many routers
    #[arg(long)]
    routers: Option<usize>,

    /// Seed for random networks
    #[arg(long)]
    seed: Option<u64>,

    /// Run a command and exit instead of prompting (repeatable)
    #[arg(short = 'c', long = "command")]
    commands: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimulatorConfig::load(path)?,
        None => SimulatorConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let mut session = match cli.load {
        Some(path) => {
            let format = cli.format.unwrap_or_else(|| TopologyFormat::from_path(&path));
            let network = persistence::load(&path, format)
                .with_context(|| format!("loading {}", path.display()))?;
            let mut session = Session::new(network, config);
            session.set_current_file(path, format);
            session
        }
        None => {
            let mut session = Session::new(Network::new(), config);
            if let Some(routers) = cli.routers {
                session.generate(routers)?;
            }
            session
        }
    };
    info!(
        "Starting with {} routers and {} links",
        session.network().len(),
        session.network().link_count()
    );

    if !cli.commands.is_empty() {
        for command in &cli.commands {
            match session.execute_line(command)? {
                Outcome::Output(text) => println!("{}", text),
                Outcome::Exit => break,
            }
        }
        return Ok(());
    }

    run_interactive(&mut session)
}

fn run_interactive(session: &mut Session) -> Result<()> {
    println!("Router network simulator. Type 'help' for commands.");
    println!("{}", CostMatrix(session.network()));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("router-sim> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match session.execute_line(&line) {
            Ok(Outcome::Output(text)) => println!("{}", text),
            Ok(Outcome::Exit) => break,
            Err(e) => {
                warn!("Command '{}' failed: {}", line.trim(), e);
                println!("Error: {}", e);
            }
        }
    }

    println!("Bye.");
    Ok(())
}
