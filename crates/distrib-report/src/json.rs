//! JSON output of a finished allocation.

use distrib_placement::Allocation;

use crate::error::ReportResult;

/// Pretty-printed JSON of the allocation, for piping into other tools.
pub fn to_json(allocation: &Allocation) -> ReportResult<String> {
    Ok(serde_json::to_string_pretty(allocation)?)
}
