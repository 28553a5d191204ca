//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric**. Each image is shown by its positional
//! index and title, with its identifier and measurements as indented context
//! lines. The same image reads the same way in `select`, `layout` and
//! `check` output.
//!
//! # Output Format
//!
//! ## Select
//!
//! ```text
//! Selection travel (post, daily): 2 of 5 images
//! 001 Tokyo
//!     Id: 101
//!     Aspect: 1.78 (1600×900)
//! 002 Rome
//!     Id: 121
//!     Aspect: 1.50 (fallback)
//! ```
//!
//! ## Layout
//!
//! ```text
//! Tiled at 900px: 7 images in 3 rows
//! Row 1 (justified, 196px)
//!     001 Tokyo 295×196
//!     002 Kyoto 295×196
//!     003 Rome 294×196
//! Row 2 (justified, 275px)
//!     ...
//! ```
//!
//! ```text
//! Collage at 1200px: 5 images
//! 001 Tokyo span 2×20 (392px)
//! 005 Rome span 3×24 (472px) feature
//! ```
//!
//! ## Check
//!
//! ```text
//! Source content (directory)
//!     Eligible: 5 images
//! Gallery
//!     Layout: tiled
//!     ...
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions do no I/O.

use crate::aspect;
use crate::config::GalleryConfig;
use crate::layout::{GalleryLayout, JustifiedLayout, MetroTile, RowKind};
use crate::source::ImageRecord;
use crate::types::Variant;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Index + title; untitled images show their id in parens.
///
/// ```text
/// 001 Tokyo
/// 002 (img/2.jpg)
/// ```
fn image_line(index: usize, record: Option<&ImageRecord>, fallback_id: &str) -> String {
    match record {
        Some(r) if !r.title.is_empty() => format!("{} {}", format_index(index), r.title),
        Some(r) => format!("{} ({})", format_index(index), r.id),
        None => format!("{} ({})", format_index(index), fallback_id),
    }
}

fn aspect_line(record: &ImageRecord) -> String {
    let ratio = aspect::resolve(record);
    let origin = match (record.aspect_hint, record.natural) {
        (Some(hint), _) if hint.is_finite() && hint > 0.0 => "hint".to_string(),
        (_, Some(d)) if d.width > 0 && d.height > 0 => format!("{}×{}", d.width, d.height),
        _ => "fallback".to_string(),
    };
    format!("Aspect: {ratio:.2} ({origin})")
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn category_label(category: &str) -> &str {
    if category.is_empty() { "(all)" } else { category }
}

// ============================================================================
// Select
// ============================================================================

/// Format the rotated selection.
pub fn format_selection_output(
    config: &GalleryConfig,
    selected: &[&ImageRecord],
    eligible: usize,
) -> Vec<String> {
    let mut lines = vec![format!(
        "Selection {} ({}, {}): {} of {}",
        category_label(&config.category),
        config.selection.mode,
        config.selection.cycle,
        selected.len(),
        plural(eligible, "image")
    )];
    for (i, record) in selected.iter().enumerate() {
        lines.push(image_line(i + 1, Some(record), ""));
        lines.push(format!("{}Id: {}", indent(1), record.id));
        lines.push(format!("{}{}", indent(1), aspect_line(record)));
    }
    if selected.is_empty() {
        lines.push(format!("{}No images found for this category.", indent(1)));
    }
    lines
}

pub fn print_selection_output(config: &GalleryConfig, selected: &[&ImageRecord], eligible: usize) {
    for line in format_selection_output(config, selected, eligible) {
        println!("{}", line);
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Format computed geometry. `layout` is `None` for CSS-only variants.
pub fn format_layout_output(
    variant: Variant,
    width: u32,
    selected: &[&ImageRecord],
    layout: Option<&GalleryLayout>,
) -> Vec<String> {
    match layout {
        None => vec![format!(
            "{} at {width}px: {} sized by CSS, no layout pass",
            title_case(variant.as_str()),
            plural(selected.len(), "image")
        )],
        Some(GalleryLayout::Justified(rows)) => format_justified(width, selected, rows),
        Some(GalleryLayout::Metro { tiles }) => format_metro(width, selected, tiles),
    }
}

fn format_justified(
    width: u32,
    selected: &[&ImageRecord],
    layout: &JustifiedLayout,
) -> Vec<String> {
    let mut lines = vec![format!(
        "Tiled at {width}px: {} in {}",
        plural(layout.item_count(), "image"),
        plural(layout.rows.len(), "row")
    )];
    for (r, row) in layout.rows.iter().enumerate() {
        let kind = match row.kind {
            RowKind::Justified => "justified",
            RowKind::Panorama => "panorama",
            RowKind::Ragged => "ragged",
        };
        lines.push(format!("Row {} ({kind}, {}px)", r + 1, row.height));
        for tile in &row.tiles {
            lines.push(format!(
                "{}{} {}×{}",
                indent(1),
                image_line(tile.index + 1, selected.get(tile.index).copied(), "?"),
                tile.width,
                tile.height
            ));
        }
    }
    lines
}

fn format_metro(width: u32, selected: &[&ImageRecord], tiles: &[MetroTile]) -> Vec<String> {
    let mut lines = vec![format!("Collage at {width}px: {}", plural(tiles.len(), "image"))];
    for tile in tiles {
        let mut line = image_line(tile.index + 1, selected.get(tile.index).copied(), "?");
        match (tile.row_span, tile.height) {
            (Some(rows), Some(height)) => {
                line.push_str(&format!(" span {}×{rows} ({height}px)", tile.column_span));
            }
            _ => line.push_str(&format!(" span {}×auto", tile.column_span)),
        }
        if tile.feature {
            line.push_str(" feature");
        }
        lines.push(line);
    }
    lines
}

pub fn print_layout_output(
    variant: Variant,
    width: u32,
    selected: &[&ImageRecord],
    layout: Option<&GalleryLayout>,
) {
    for line in format_layout_output(variant, width, selected, layout) {
        println!("{}", line);
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the effective configuration and a source summary.
pub fn format_check_output(
    config: &GalleryConfig,
    source_label: &str,
    eligible: usize,
    threads: usize,
) -> Vec<String> {
    let t = &config.tiled;
    let c = &config.collage;
    let s = &config.selection;
    vec![
        format!("Source {source_label}"),
        format!("{}Eligible: {}", indent(1), plural(eligible, "image")),
        "Gallery".to_string(),
        format!("{}Layout: {}", indent(1), config.layout),
        format!(
            "{}Category: {}",
            indent(1),
            category_label(&config.category)
        ),
        format!(
            "{}Gutter: {}px × {}px",
            indent(1),
            config.horizontal_gap(),
            config.vertical_gap()
        ),
        format!("{}Click menu: {}", indent(1), on_off(config.click_menu)),
        format!(
            "{}Selection: max {}, cycle {}, mode {}, drafts {}",
            indent(1),
            s.max,
            s.cycle,
            s.mode,
            if s.include_draft { "included" } else { "excluded" }
        ),
        "Tiled".to_string(),
        format!(
            "{}Row height: {}px ±{:.0}%",
            indent(1),
            t.row_height,
            t.tolerance * 100.0
        ),
        format!("{}Panorama threshold: {}", indent(1), t.panorama_threshold),
        format!(
            "{}Per row: {}-{}, last row {}",
            indent(1),
            t.min_per_row,
            t.max_per_row,
            t.last_row
        ),
        "Collage".to_string(),
        format!(
            "{}Grid: {} columns × {}px rows",
            indent(1),
            c.columns,
            c.row_unit
        ),
        format!(
            "{}Spans: {}-{} columns, feature every {} ({}×{}), crop {}",
            indent(1),
            c.min_columns,
            c.max_columns,
            c.feature_every,
            c.feature_width,
            c.feature_height,
            on_off(c.crop)
        ),
        "Processing".to_string(),
        format!("{}Threads: {threads}", indent(1)),
        format!(
            "{}Resize quiet: {}ms",
            indent(1),
            config.viewport.resize_quiet_ms
        ),
    ]
}

pub fn print_check_output(
    config: &GalleryConfig,
    source_label: &str,
    eligible: usize,
    threads: usize,
) {
    for line in format_check_output(config, source_label, eligible, threads) {
        println!("{}", line);
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
