use std::fmt::Display;

use colored::Colorize;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::query::{RowSet, Value};
use crate::views::{Bar, Content, Metric, Section, View};

const BAR_WIDTH: usize = 40;

/// Render a whole view as terminal text.
pub fn render(view: &View) -> String {
    let mut out = String::new();
    push_line(&mut out, view.title.bold());
    if let Some(caption) = &view.caption {
        push_line(&mut out, caption.dimmed());
    }

    for section in &view.sections {
        out.push('\n');
        render_section(&mut out, section);
    }
    out
}

fn push_line(out: &mut String, text: impl Display) {
    out.push_str(&text.to_string());
    out.push('\n');
}

fn render_section(out: &mut String, section: &Section) {
    if let Some(heading) = &section.heading {
        push_line(out, heading.bold().underline());
    }

    match &section.content {
        Content::Metrics { metrics } => push_line(out, metrics_table(metrics)),
        Content::Table { rows } if rows.is_empty() => push_line(out, "No results.".dimmed()),
        Content::Table { rows } => push_line(out, rows_table(rows)),
        Content::BarChart { bars } => out.push_str(&bar_chart(bars)),
        Content::Message { text } => push_line(out, text),
        Content::Error { message } => push_line(out, message.red()),
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn value_cell(value: &Value) -> Cell {
    let cell = Cell::new(value.to_string());
    if value.is_numeric() {
        cell.set_alignment(CellAlignment::Right)
    } else {
        cell
    }
}

pub fn rows_table(rows: &RowSet) -> Table {
    let mut table = new_table();
    table.set_header(rows.columns());
    for row in rows.rows() {
        table.add_row(row.values().iter().map(value_cell));
    }
    table
}

fn metrics_table(metrics: &[Metric]) -> Table {
    let mut table = new_table();
    table.set_header(metrics.iter().map(|m| m.label.as_str()));
    table.add_row(metrics.iter().map(|m| value_cell(&m.value)));
    table
}

/// Horizontal bars scaled against the largest value.
pub fn bar_chart(bars: &[Bar]) -> String {
    if bars.is_empty() {
        return format!("{}\n", "No results.".dimmed());
    }

    let label_width = bars.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);
    let max = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);

    let mut out = String::new();
    for bar in bars {
        let length = if max > 0.0 {
            ((bar.value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        push_line(
            &mut out,
            format!(
                "{:<width$} │ {} {}",
                bar.label,
                "█".repeat(length).cyan(),
                format_bar_value(bar.value),
                width = label_width,
            ),
        );
    }
    out
}

fn format_bar_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
