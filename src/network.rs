pub mod generator;
pub mod topology;

pub use generator::RandomTopology;
pub use topology::{Link, MAX_ROUTERS, Network, Router};

use crate::RouterId;
use crate::error::{NetworkError, Result};

/// Display label of a router, e.g. `R3`.
pub fn router_label(id: RouterId) -> String {
    format!("R{}", id)
}

/// Parses a router id written either bare (`3`) or prefixed (`R3`, `r3`).
pub fn parse_router_id(token: &str) -> Result<RouterId> {
    let digits = token
        .strip_prefix('R')
        .or_else(|| token.strip_prefix('r'))
        .unwrap_or(token);

    digits
        .parse::<RouterId>()
        .map_err(|_| NetworkError::invalid(format!("'{}' is not a router id", token)))
}
