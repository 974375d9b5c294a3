//! Human-readable report formatting.

use distrib_placement::{Allocation, NodeUsage};

/// Two tables (files, then nodes) followed by a one-line summary.
///
/// Nodes are listed largest capacity first; equal capacities keep input
/// order.
pub fn format_text(allocation: &Allocation, sentinel: &str) -> String {
    let mut out = String::new();

    let files = Grid {
        headers: vec!["file", "size", "assigned node"],
        numeric: vec![false, true, false],
        rows: allocation
            .assignments
            .iter()
            .map(|a| {
                vec![
                    a.item_id.clone(),
                    a.size.to_string(),
                    a.placement.label(sentinel).to_string(),
                ]
            })
            .collect(),
    };
    out.push_str(&files.render());
    out.push('\n');

    let mut nodes: Vec<&NodeUsage> = allocation.nodes.iter().collect();
    nodes.sort_by(|a, b| b.capacity.cmp(&a.capacity));

    let node_table = Grid {
        headers: vec!["node", "capacity", "remaining", "used %", "files"],
        numeric: vec![false, true, true, true, false],
        rows: nodes
            .iter()
            .map(|n| {
                vec![
                    n.node_id.clone(),
                    n.capacity.to_string(),
                    n.remaining.to_string(),
                    format!("{:.1}", n.utilization() * 100.0),
                    n.items.join(", "),
                ]
            })
            .collect(),
    };
    out.push_str(&node_table.render());
    out.push('\n');

    let unassignable = allocation.assignments.len() - allocation.placed_count();
    out.push_str(&format!(
        "{} of {} files placed on {} nodes, {unassignable} unassignable ({} rounds)\n",
        allocation.placed_count(),
        allocation.assignments.len(),
        allocation.nodes.len(),
        allocation.rounds,
    ));

    out
}

/// A fancy-grid table: double rules around the header, single rules
/// between rows.
struct Grid {
    headers: Vec<&'static str>,
    /// Right-align this column.
    numeric: Vec<bool>,
    rows: Vec<Vec<String>>,
}

impl Grid {
    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(col, h)| {
                self.rows
                    .iter()
                    .map(|r| r[col].chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        out.push_str(&rule(&widths, '╒', '═', '╤', '╕'));
        let header: Vec<String> = self.headers.iter().map(|h| h.to_string()).collect();
        out.push_str(&self.line(&header, &widths, false));
        out.push_str(&rule(&widths, '╞', '═', '╪', '╡'));

        for (i, row) in self.rows.iter().enumerate() {
            out.push_str(&self.line(row, &widths, true));
            if i + 1 < self.rows.len() {
                out.push_str(&rule(&widths, '├', '─', '┼', '┤'));
            }
        }
        out.push_str(&rule(&widths, '╘', '═', '╧', '╛'));
        out
    }

    fn line(&self, cells: &[String], widths: &[usize], align: bool) -> String {
        let mut out = String::from("│");
        for (col, cell) in cells.iter().enumerate() {
            let pad = widths[col] - cell.chars().count();
            if align && self.numeric[col] {
                out.push_str(&format!(" {}{cell} │", " ".repeat(pad)));
            } else {
                out.push_str(&format!(" {cell}{} │", " ".repeat(pad)));
            }
        }
        out.push('\n');
        out
    }
}

fn rule(widths: &[usize], left: char, fill: char, join: char, right: char) -> String {
    let mut out = String::new();
    out.push(left);
    for (i, w) in widths.iter().enumerate() {
        if i > 0 {
            out.push(join);
        }
        out.extend(std::iter::repeat_n(fill, w + 2));
    }
    out.push(right);
    out.push('\n');
    out
}
