//! Rendering primitives for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table as ComfyTable};

use super::context::UiContext;
use super::theme::{self, Badge};

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let painted = kind.paint(ctx.color);
    if message.is_empty() {
        painted
    } else {
        format!("{} {}", painted, message)
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{} {}", theme::dim(&format!("{}:", key), ctx.color), value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a receipt (summary block after an action).
///
/// Pretty mode: Badge + indented key-value pairs
/// Plain mode: status=ok + key=value lines
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, &str)]) -> String {
    let mut lines = Vec::new();
    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Ok, title));
        for (key, value) in items {
            lines.push(format!("  {}", kv(ctx, key, value)));
        }
    } else {
        lines.push("status=ok".to_string());
        for (key, value) in items {
            lines.push(kv(ctx, key, value));
        }
    }
    lines.join("\n")
}

/// Render rows under headers.
///
/// Pretty mode: bordered comfy-table; `status_column` is colored by value
/// Plain mode: tab-separated values, no header
pub fn table(
    ctx: &UiContext,
    headers: &[&str],
    rows: &[Vec<String>],
    status_column: Option<usize>,
) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = ComfyTable::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.to_vec());

    for row in rows {
        let cells: Vec<Cell> = row
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let cell = Cell::new(value);
                match status_column {
                    Some(col) if col == i && ctx.color => {
                        let fg = if value == "available" {
                            Color::Green
                        } else {
                            Color::Yellow
                        };
                        cell.fg(fg)
                    }
                    _ => cell,
                }
            })
            .collect();
        table.add_row(cells);
    }
    table.to_string()
}

/// Print an error to stderr.
pub fn print_error(ctx: &UiContext, message: &str) {
    eprintln!("{}", badge(ctx, Badge::Err, message));
}
