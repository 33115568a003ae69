//! Edge-list topology files: one undirected link per line, `R<a> R<b> <cost>`.
//!
//! Lines starting with `#` are comments, except the `# routers: <n>` directive
//! written by [`write`], which keeps trailing isolated routers across a round
//! trip. Ids are 0-based: a file numbering its routers `R1..Rn` loads with an
//! extra isolated `R0`. Ids and the directive are capped at [`MAX_ROUTERS`].

use std::io::{BufRead, Write};

use chrono::Local;

use crate::error::{NetworkError, Result};
use crate::network::{MAX_ROUTERS, Network, parse_router_id, router_label};
use crate::{Cost, RouterId};

const ROUTERS_DIRECTIVE: &str = "routers:";

pub fn write<W: Write>(network: &Network, mut writer: W) -> Result<()> {
    writeln!(writer, "# router-sim topology, saved {}", Local::now().to_rfc3339())?;
    writeln!(writer, "# {} {}", ROUTERS_DIRECTIVE, network.len())?;

    for (a, b, cost) in network.links() {
        writeln!(
            writer,
            "{} {} {}",
            router_label(a),
            router_label(b),
            cost
        )?;
    }

    writer.flush()?;
    Ok(())
}

/// Parses an edge list. Routers are allocated up to the highest id mentioned,
/// so ids stay contiguous even when the file skips some.
pub fn read<R: BufRead>(reader: R) -> Result<Network> {
    let mut routers_hint = 0usize;
    let mut links: Vec<(RouterId, RouterId, Cost)> = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }
        if let Some(comment) = trimmed.strip_prefix('#') {
            if let Some(count) = parse_routers_directive(comment) {
                routers_hint = count.map_err(|e| at_line(line_number, e))?;
            }
            continue;
        }

        links.push(parse_link(trimmed).map_err(|e| at_line(line_number, e))?);
    }

    let highest = links.iter().map(|&(a, b, _)| a.max(b) + 1).max().unwrap_or(0);
    let mut network = Network::with_routers(highest.max(routers_hint));
    for (a, b, cost) in links {
        network.add_link(a, b, cost)?;
    }

    Ok(network)
}

/// `None` for an ordinary comment.
fn parse_routers_directive(comment: &str) -> Option<Result<usize>> {
    let count = comment.trim().strip_prefix(ROUTERS_DIRECTIVE)?.trim();
    Some(
        count
            .parse::<usize>()
            .map_err(|_| NetworkError::invalid(format!("invalid router count '{}'", count)))
            .and_then(|count| Network::check_capacity(count).map(|()| count)),
    )
}

fn parse_link(line: &str) -> Result<(RouterId, RouterId, Cost)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [a, b, cost] = fields[..] else {
        return Err(NetworkError::invalid(format!(
            "expected '<router> <router> <cost>', found '{}'",
            line
        )));
    };

    let a = parse_router_id(a)?;
    let b = parse_router_id(b)?;
    if a.max(b) >= MAX_ROUTERS {
        return Err(NetworkError::invalid(format!(
            "router R{} is beyond the limit of {} routers",
            a.max(b),
            MAX_ROUTERS
        )));
    }
    if a == b {
        return Err(NetworkError::invalid(format!("self-loop on R{}", a)));
    }
    let cost = cost
        .parse::<Cost>()
        .ok()
        .filter(|cost| *cost > 0)
        .ok_or_else(|| NetworkError::invalid(format!("invalid link cost '{}'", cost)))?;

    Ok((a, b, cost))
}

fn at_line(line_number: usize, error: NetworkError) -> NetworkError {
    match error {
        NetworkError::InvalidArgument(reason) => {
            NetworkError::InvalidArgument(format!("line {}: {}", line_number, reason))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_prefixed_and_bare_ids_and_skips_comments() {
        let input = "# my network\n\nR0 R1 5\n1 2 3\n   # indented comment\nR2 R3 2\n";
        let network = read(input.as_bytes()).unwrap();

        assert_eq!(network.len(), 4);
        assert_eq!(network.link_cost(0, 1), Some(5));
        assert_eq!(network.link_cost(2, 1), Some(3));
        assert_eq!(network.link_cost(3, 2), Some(2));
    }

    #[test]
    fn fills_gaps_to_keep_ids_contiguous() {
        let network = read("R0 R4 1\n".as_bytes()).unwrap();

        assert_eq!(network.len(), 5);
        assert!(network.neighbors(2).unwrap().is_empty());
    }

    #[test]
    fn routers_directive_keeps_isolated_routers() {
        let network = read("# routers: 6\nR0 R1 1\n".as_bytes()).unwrap();
        assert_eq!(network.len(), 6);
    }

    #[test]
    fn duplicate_lines_keep_the_last_cost() {
        let network = read("R0 R1 5\nR1 R0 9\n".as_bytes()).unwrap();

        assert_eq!(network.link_cost(0, 1), Some(9));
        assert_eq!(network.neighbors(0).unwrap().len(), 1);
    }

    #[test]
    fn malformed_lines_report_their_position() {
        for input in ["R0 R1\n", "R0 R1 0\n", "R0 R1 -3\n", "R2 R2 4\n", "Rx R1 4\n"] {
            let error = read(format!("# header\n{}", input).as_bytes()).unwrap_err();
            match error {
                NetworkError::InvalidArgument(reason) => assert!(reason.starts_with("line 2:")),
                other => panic!("unexpected error {:?}", other),
            }
        }
    }

    #[test]
    fn oversized_ids_and_counts_are_rejected() {
        for input in [
            "R18446744073709551615 R0 1\n",
            "R0 R100000000 1\n",
            "# routers: 2305843009213693951\nR0 R1 1\n",
            "# routers: 99999999999999999999999\n",
        ] {
            match read(input.as_bytes()) {
                Err(NetworkError::InvalidArgument(reason)) => {
                    assert!(reason.starts_with("line 1:"), "{}", reason)
                }
                other => panic!("'{}' gave {:?}", input.trim(), other),
            }
        }

        let largest = format!("# routers: {}\nR0 R{} 1\n", MAX_ROUTERS, MAX_ROUTERS - 1);
        assert_eq!(read(largest.as_bytes()).unwrap().len(), MAX_ROUTERS);
    }

    #[test]
    fn one_based_files_gain_an_isolated_r0() {
        let network = read("R1 R2 4\nR2 R3 1\n".as_bytes()).unwrap();

        assert_eq!(network.len(), 4);
        assert!(network.neighbors(0).unwrap().is_empty());
        assert_eq!(network.link_cost(1, 2), Some(4));
    }

    #[test]
    fn writes_each_link_once() {
        let mut network = Network::with_routers(3);
        network.add_link(0, 1, 4).unwrap();
        network.add_link(2, 1, 6).unwrap();

        let mut buffer = Vec::new();
        write(&network, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let body: Vec<_> = text.lines().filter(|l| !l.starts_with('#')).collect();

        assert!(text.contains("# routers: 3"));
        assert_eq!(body, vec!["R0 R1 4", "R1 R2 6"]);
    }
}
