//! CSV-like routing table export.

use std::io::Write;

use crate::error::Result;
use crate::network::router_label;
use crate::routing_table::{Route, RoutingTable};

pub fn write<W: Write>(tables: &[RoutingTable], mut writer: W) -> Result<()> {
    for table in tables {
        writeln!(writer, "Routing table for {}:", router_label(table.origin()))?;
        writeln!(writer, "destination,next_hop,cost")?;

        for (destination, route) in table.iter() {
            match route {
                Route::Via { next_hop, cost } => writeln!(
                    writer,
                    "{},{},{}",
                    router_label(destination),
                    router_label(*next_hop),
                    cost
                )?,
                Route::NoRoute => writeln!(writer, "{},-,-", router_label(destination))?,
            }
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}
