//! Space-separated `<file> <node>` output.

use std::io::Write;

use distrib_placement::Allocation;

use crate::error::ReportResult;

/// Write one `<file_id> <node_id>` row per file in input order, no header.
/// Unassignable files get `sentinel` in place of a node id.
pub fn write_csv<W: Write>(allocation: &Allocation, sentinel: &str, mut out: W) -> ReportResult<()> {
    for a in &allocation.assignments {
        writeln!(out, "{} {}", a.item_id, a.placement.label(sentinel))?;
    }
    out.flush()?;
    Ok(())
}
