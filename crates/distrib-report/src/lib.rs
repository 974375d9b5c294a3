//! Rendering of a finished [`Allocation`](distrib_placement::Allocation).
//!
//! Everything here is a pure projection of the allocation result. Nothing
//! in this crate changes where a file goes.
//!
//! - **`text`** — Box-drawn tables for the terminal
//! - **`csv`** — `<file> <node>` rows, one per file
//! - **`chart`** — Stacked bar chart of node usage as SVG
//! - **`json`** — serde_json dump of the whole allocation

pub mod chart;
pub mod csv;
pub mod error;
pub mod json;
pub mod text;

pub use chart::{DEFAULT_CHART_TITLE, render_chart};
pub use csv::write_csv;
pub use error::{ReportError, ReportResult};
pub use json::to_json;
pub use text::format_text;
