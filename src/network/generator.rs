use std::ops::RangeInclusive;

use log::info;
use rand::Rng;

use super::topology::Network;
use crate::Cost;
use crate::error::{NetworkError, Result};

/// Parameters of an Erdős–Rényi style random topology.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomTopology {
    /// Probability that any given unordered pair of routers is linked.
    pub link_probability: f64,
    pub cost_range: RangeInclusive<Cost>,
}

impl Default for RandomTopology {
    fn default() -> Self {
        Self {
            link_probability: 0.4,
            cost_range: 1..=20,
        }
    }
}

impl RandomTopology {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.link_probability) {
            return Err(NetworkError::invalid(format!(
                "link probability {} is outside [0, 1]",
                self.link_probability
            )));
        }
        let (min, max) = (*self.cost_range.start(), *self.cost_range.end());
        if min == 0 || min > max {
            return Err(NetworkError::invalid(format!(
                "cost range {}..={} must be non-empty and strictly positive",
                min, max
            )));
        }
        Ok(())
    }
}

impl Network {
    /// Replaces the whole topology with `routers` routers linked at random.
    ///
    /// Parameters are validated before the current topology is cleared.
    pub fn generate_random<R: Rng + ?Sized>(
        &mut self,
        routers: usize,
        params: &RandomTopology,
        rng: &mut R,
    ) -> Result<()> {
        params.validate()?;
        Network::check_capacity(routers)?;

        *self = Network::with_routers(routers);
        for a in 0..routers {
            for b in (a + 1)..routers {
                if rng.gen_bool(params.link_probability) {
                    let cost = rng.gen_range(params.cost_range.clone());
                    self.add_link(a, b, cost)?;
                }
            }
        }

        info!(
            "Generated random network: {} routers, {} links",
            self.len(),
            self.link_count()
        );
        Ok(())
    }

    pub fn random<R: Rng + ?Sized>(
        routers: usize,
        params: &RandomTopology,
        rng: &mut R,
    ) -> Result<Self> {
        let mut network = Network::new();
        network.generate_random(routers, params, rng)?;
        Ok(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn same_seed_same_topology() {
        let params = RandomTopology::default();
        let first = Network::random(12, &params, &mut StdRng::seed_from_u64(7)).unwrap();
        let second = Network::random(12, &params, &mut StdRng::seed_from_u64(7)).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 12);
    }

    #[test]
    fn costs_stay_in_range() {
        let params = RandomTopology {
            link_probability: 0.8,
            cost_range: 3..=5,
        };
        let network = Network::random(15, &params, &mut StdRng::seed_from_u64(11)).unwrap();

        assert!(network.link_count() > 0);
        assert!(network.links().all(|(_, _, cost)| (3..=5).contains(&cost)));
    }

    #[test]
    fn probability_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        let none = RandomTopology {
            link_probability: 0.0,
            ..RandomTopology::default()
        };
        let all = RandomTopology {
            link_probability: 1.0,
            ..RandomTopology::default()
        };

        assert_eq!(Network::random(6, &none, &mut rng).unwrap().link_count(), 0);
        assert_eq!(Network::random(6, &all, &mut rng).unwrap().link_count(), 15);
    }

    #[test]
    fn invalid_params_leave_network_untouched() {
        let mut network = Network::with_routers(3);
        network.add_link(0, 1, 2).unwrap();
        let snapshot = network.clone();
        let mut rng = StdRng::seed_from_u64(3);

        let bad_probability = RandomTopology {
            link_probability: 1.5,
            ..RandomTopology::default()
        };
        let zero_cost = RandomTopology {
            cost_range: 0..=4,
            ..RandomTopology::default()
        };

        assert!(network.generate_random(5, &bad_probability, &mut rng).is_err());
        assert!(network.generate_random(5, &zero_cost, &mut rng).is_err());
        assert!(
            network
                .generate_random(100_000_000_000, &RandomTopology::default(), &mut rng)
                .is_err()
        );
        assert_eq!(network, snapshot);
    }
}
