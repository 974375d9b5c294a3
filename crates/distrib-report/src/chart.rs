//! Stacked bar chart of node usage, rendered as SVG.
//!
//! One bar per node, one segment per file bound to it (stacked in binding
//! order), topped by a hatched segment for the space left. Files keep the
//! same colour in every bar and in the legend.
//!
//! Geometry is computed here so the template only places pre-formatted
//! numbers.

use askama::Template;

use distrib_placement::Allocation;

use crate::error::ReportResult;

pub const DEFAULT_CHART_TITLE: &str = "Files distribution among nodes";

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 90.0;
const PLOT_HEIGHT: f64 = 320.0;
const BAR_WIDTH: f64 = 36.0;
const BAR_GAP: f64 = 18.0;
const LEGEND_COLUMN_WIDTH: f64 = 130.0;
const LEGEND_ROW_HEIGHT: f64 = 16.0;
/// Legend entries per column before another column is added.
const LEGEND_ROWS: usize = 14;
const Y_TICKS: u64 = 5;

const SPACE_LEFT_FILL: &str = "url(#space-left)";

#[derive(Template)]
#[template(path = "chart.svg")]
struct ChartTemplate {
    title: String,
    width: String,
    height: String,
    title_x: String,
    plot_left: String,
    plot_right: String,
    plot_bottom: String,
    axis_label_x: String,
    axis_label_y: String,
    tick_label_x: String,
    node_label_y: String,
    bar_width: String,
    ticks: Vec<TickView>,
    bars: Vec<BarView>,
    legend: Vec<LegendView>,
}

struct TickView {
    y: String,
    label: String,
}

struct BarView {
    node_id: String,
    x: String,
    label_x: String,
    segments: Vec<SegmentView>,
}

struct SegmentView {
    y: String,
    height: String,
    fill: String,
    tooltip: String,
}

struct LegendView {
    x: String,
    y: String,
    text_x: String,
    text_y: String,
    fill: String,
    label: String,
}

/// Render the allocation as a standalone SVG document.
pub fn render_chart(allocation: &Allocation, title: &str) -> ReportResult<String> {
    Ok(build(allocation, title).render()?)
}

fn build(allocation: &Allocation, title: &str) -> ChartTemplate {
    let placed: Vec<(usize, &str)> = allocation
        .assignments
        .iter()
        .filter(|a| !a.placement.is_unassignable())
        .map(|a| a.item_id.as_str())
        .enumerate()
        .collect();
    let colour_of = |id: &str| {
        placed
            .iter()
            .find(|(_, p)| *p == id)
            .map(|&(i, _)| item_colour(i, placed.len()))
            .unwrap_or_else(|| "#888888".to_string())
    };

    let max_capacity = allocation
        .nodes
        .iter()
        .map(|n| n.capacity)
        .max()
        .unwrap_or(0)
        .max(1);
    let scale = PLOT_HEIGHT / max_capacity as f64;
    let plot_bottom = MARGIN_TOP + PLOT_HEIGHT;

    let bars: Vec<BarView> = allocation
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let x = MARGIN_LEFT + BAR_GAP + i as f64 * (BAR_WIDTH + BAR_GAP);
            let mut top = plot_bottom;
            let mut segments = Vec::with_capacity(node.items.len() + 1);

            for (id, size) in allocation.item_sizes(node) {
                let h = size as f64 * scale;
                top -= h;
                segments.push(SegmentView {
                    y: fmt(top),
                    height: fmt(h),
                    fill: colour_of(id),
                    tooltip: format!("{id}: {size}"),
                });
            }

            let h = node.remaining as f64 * scale;
            top -= h;
            segments.push(SegmentView {
                y: fmt(top),
                height: fmt(h),
                fill: SPACE_LEFT_FILL.to_string(),
                tooltip: format!("space left: {}", node.remaining),
            });

            BarView {
                node_id: node.node_id.clone(),
                x: fmt(x),
                label_x: fmt(x + BAR_WIDTH / 2.0),
                segments,
            }
        })
        .collect();

    let ticks: Vec<TickView> = (0..=Y_TICKS)
        .map(|t| {
            let value = (u128::from(max_capacity) * u128::from(t) / u128::from(Y_TICKS)) as u64;
            TickView {
                y: fmt(plot_bottom - value as f64 * scale),
                label: value.to_string(),
            }
        })
        .collect();

    let plot_right =
        MARGIN_LEFT + BAR_GAP + allocation.nodes.len() as f64 * (BAR_WIDTH + BAR_GAP);

    let mut entries: Vec<(String, String)> = placed
        .iter()
        .map(|&(i, id)| (item_colour(i, placed.len()), id.to_string()))
        .collect();
    entries.push((SPACE_LEFT_FILL.to_string(), "space left".to_string()));

    let columns = legend_columns(allocation.assignments.len());
    let rows = entries.len().div_ceil(columns);
    let legend_left = plot_right + 20.0;
    let legend: Vec<LegendView> = entries
        .into_iter()
        .enumerate()
        .map(|(i, (fill, label))| {
            let x = legend_left + (i / rows) as f64 * LEGEND_COLUMN_WIDTH;
            let y = MARGIN_TOP + (i % rows) as f64 * LEGEND_ROW_HEIGHT;
            LegendView {
                x: fmt(x),
                y: fmt(y),
                text_x: fmt(x + 16.0),
                text_y: fmt(y + 9.0),
                fill,
                label,
            }
        })
        .collect();

    let width = legend_left + columns as f64 * LEGEND_COLUMN_WIDTH + 10.0;
    let legend_bottom = MARGIN_TOP + rows as f64 * LEGEND_ROW_HEIGHT;
    let height = (plot_bottom + MARGIN_BOTTOM).max(legend_bottom + 20.0);

    ChartTemplate {
        title: title.to_string(),
        width: fmt(width),
        height: fmt(height),
        title_x: fmt(width / 2.0),
        plot_left: fmt(MARGIN_LEFT),
        plot_right: fmt(plot_right),
        plot_bottom: fmt(plot_bottom),
        axis_label_x: fmt((MARGIN_LEFT + plot_right) / 2.0),
        axis_label_y: fmt(MARGIN_TOP + PLOT_HEIGHT / 2.0),
        tick_label_x: fmt(MARGIN_LEFT - 6.0),
        node_label_y: fmt(plot_bottom + 14.0),
        bar_width: fmt(BAR_WIDTH),
        ticks,
        bars,
        legend,
    }
}

/// Legend width follows the total file count, unassignable files included:
/// one column, plus one more for every 14 files.
fn legend_columns(files: usize) -> usize {
    (files + LEGEND_ROWS) / LEGEND_ROWS
}

/// Spread colours evenly around the hue wheel.
fn item_colour(index: usize, total: usize) -> String {
    let hue = (index * 360) / total.max(1);
    let lightness = if index % 2 == 0 { 48 } else { 62 };
    format!("hsl({hue}, 70%, {lightness}%)")
}

fn fmt(v: f64) -> String {
    format!("{v:.1}")
}
