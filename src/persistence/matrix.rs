//! Dense matrix snapshots: `n` lines of `n` integers, `-1` for "no link".

use std::io::{BufRead, Write};

use crate::error::{NetworkError, Result};
use crate::network::Network;

pub fn write<W: Write>(network: &Network, mut writer: W) -> Result<()> {
    for row in network.adjacency_matrix() {
        let line: Vec<String> = row.iter().map(i64::to_string).collect();
        writeln!(writer, "{}", line.join(" "))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read<R: BufRead>(reader: R) -> Result<Network> {
    let mut rows = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let row = line
            .split_whitespace()
            .map(|cell| {
                cell.parse::<i64>().map_err(|_| {
                    NetworkError::invalid(format!("line {}: '{}' is not an integer", index + 1, cell))
                })
            })
            .collect::<Result<Vec<i64>>>()?;
        rows.push(row);
    }

    Network::from_adjacency_matrix(&rows)
}
