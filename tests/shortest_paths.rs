use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use router_sim::algorithms::path_cost;
use router_sim::{
    Network, NetworkError, RandomTopology, Route, RouterId, all_routing_tables, shortest_path,
};

/// Cheapest simple path by exhaustive DFS.
fn brute_force(network: &Network, from: RouterId, to: RouterId) -> Option<u64> {
    fn walk(
        network: &Network,
        at: RouterId,
        to: RouterId,
        cost: u64,
        seen: &mut Vec<bool>,
        best: &mut Option<u64>,
    ) {
        if best.is_some_and(|b| cost >= b) {
            return;
        }
        if at == to {
            *best = Some(best.map_or(cost, |b| b.min(cost)));
            return;
        }
        for link in network.neighbors(at).unwrap() {
            if !seen[link.neighbor] {
                seen[link.neighbor] = true;
                walk(network, link.neighbor, to, cost + u64::from(link.cost), seen, best);
                seen[link.neighbor] = false;
            }
        }
    }

    let mut seen = vec![false; network.len()];
    seen[from] = true;
    let mut best = None;
    walk(network, from, to, 0, &mut seen, &mut best);
    best
}

fn component_of(network: &Network, start: RouterId) -> Vec<bool> {
    let mut reached = vec![false; network.len()];
    let mut stack = vec![start];
    reached[start] = true;
    while let Some(at) = stack.pop() {
        for link in network.neighbors(at).unwrap() {
            if !reached[link.neighbor] {
                reached[link.neighbor] = true;
                stack.push(link.neighbor);
            }
        }
    }
    reached
}

#[test]
fn dijkstra_matches_exhaustive_search_on_small_graphs() {
    let mut rng = StdRng::seed_from_u64(2024);

    for round in 0..60 {
        let routers = rng.gen_range(1..=8);
        let params = RandomTopology {
            link_probability: rng.gen_range(0.1..0.9),
            cost_range: 1..=12,
        };
        let network = Network::random(routers, &params, &mut rng).unwrap();

        for from in 0..routers {
            for to in 0..routers {
                match (shortest_path(&network, from, to), brute_force(&network, from, to)) {
                    (Ok(route), Some(expected)) => {
                        assert_eq!(route.cost(), expected, "round {} R{}->R{}", round, from, to);
                        assert_eq!(route.path().first(), Some(&from));
                        assert_eq!(route.path().last(), Some(&to));
                        assert_eq!(path_cost(&network, route.path()), Some(route.cost()));
                    }
                    (Err(NetworkError::NoRoute { .. }), None) => {}
                    (got, expected) => {
                        panic!("round {} R{}->R{}: {:?} vs {:?}", round, from, to, got, expected)
                    }
                }
            }
        }
    }
}

#[test]
fn routing_tables_agree_with_components() {
    let mut rng = StdRng::seed_from_u64(77);
    let params = RandomTopology {
        link_probability: 0.2,
        cost_range: 1..=9,
    };
    let network = Network::random(10, &params, &mut rng).unwrap();

    for table in all_routing_tables(&network).unwrap() {
        let origin = table.origin();
        let reached = component_of(&network, origin);

        for (destination, route) in table.iter() {
            assert_eq!(route.is_reachable(), reached[destination]);
            if let Route::Via { next_hop, cost } = *route {
                let expected = shortest_path(&network, origin, destination).unwrap();
                assert_eq!(cost, expected.cost());
                if destination == origin {
                    assert_eq!(next_hop, origin);
                    assert_eq!(cost, 0);
                } else {
                    assert_eq!(next_hop, expected.path()[1]);
                    assert!(network.link_cost(origin, next_hop).is_some());
                }
            }
        }
    }
}

#[test]
fn scenario_four_routers() {
    let mut network = Network::with_routers(4);
    network.add_link(0, 1, 5).unwrap();
    network.add_link(1, 2, 3).unwrap();
    network.add_link(0, 2, 10).unwrap();
    network.add_link(2, 3, 2).unwrap();

    let route = shortest_path(&network, 0, 3).unwrap();
    assert_eq!(route.path(), [0, 1, 2, 3]);
    assert_eq!(route.cost(), 10);

    let table = router_sim::routing_table(&network, 0).unwrap();
    assert_eq!(table.get(3), Some(&Route::Via { next_hop: 1, cost: 10 }));
}

#[test]
fn removal_keeps_invariants_under_random_mutation() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut network = Network::random(12, &RandomTopology::default(), &mut rng).unwrap();

    while network.len() > 1 {
        let victim = rng.gen_range(0..network.len());
        let before = network.len();
        network.remove_router(victim).unwrap();

        assert_eq!(network.len(), before - 1);
        for (index, router) in network.routers().iter().enumerate() {
            assert_eq!(router.id, index);
            for link in router.neighbors() {
                assert!(network.contains(link.neighbor));
                assert_ne!(link.neighbor, router.id);
                assert_eq!(network.link_cost(link.neighbor, router.id), Some(link.cost));
            }
        }
    }
}
