//! Metro collage placement.
//!
//! Tiles sit on a fixed-column CSS grid with dense auto-flow. Each tile gets
//! a column span from its aspect ratio, and every `feature_every`-th tile is
//! promoted to a larger feature tile:
//!
//! | Tile | Column span |
//! |---|---|
//! | feature | `min(columns, max(feature_column_span, max_column_span))` |
//! | `aspect >= 1.7` | `min(max_column_span, 3)` |
//! | `aspect >= 1.25` | `min(max_column_span, 2)` |
//! | otherwise | `max(min_column_span, 2)` |
//!
//! With cropping on, the row span is the tile's natural height expressed in
//! grid rows (at least 2; features at least `feature_row_span`), and the
//! tile carries the matching pixel height for renderers that are not grid
//! aware. With cropping off, rows stay automatic.
//!
//! One pass, one decision per tile, no backtracking.

use super::MetroParams;
use crate::types::GalleryItem;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetroTile {
    /// Position in the slice given to [`place`].
    pub index: usize,
    pub feature: bool,
    pub column_span: u32,
    /// `None` means the grid sizes the row automatically.
    pub row_span: Option<u32>,
    /// Explicit tile height in px; `None` when uncropped.
    pub height: Option<u32>,
}

/// Place every item on a grid `container_width` px wide.
///
/// Returns nothing for an empty slice or an unmeasured (zero) width.
pub fn place(items: &[GalleryItem], container_width: u32, params: &MetroParams) -> Vec<MetroTile> {
    if items.is_empty() || container_width == 0 {
        return Vec::new();
    }
    let params = params.clamped();

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let feature = is_feature(index, params.feature_every);
            let column_span = column_span(item.aspect_ratio(), feature, &params);
            let (row_span, height) = if params.crop {
                let rows = row_span(
                    item.aspect_ratio(),
                    column_span,
                    feature,
                    container_width,
                    &params,
                );
                (Some(rows), Some(span_height(rows, &params)))
            } else {
                (None, None)
            };
            MetroTile {
                index,
                feature,
                column_span,
                row_span,
                height,
            }
        })
        .collect()
}

fn is_feature(index: usize, every: usize) -> bool {
    every > 0 && (index + 1) % every == 0
}

fn column_span(aspect: f64, feature: bool, params: &MetroParams) -> u32 {
    let span = if feature {
        params
            .columns
            .min(params.feature_column_span.max(params.max_column_span))
    } else if aspect >= 1.7 {
        params.max_column_span.min(3)
    } else if aspect >= 1.25 {
        params.max_column_span.min(2)
    } else {
        params.min_column_span.max(2)
    };
    span.clamp(1, params.columns)
}

fn row_span(
    aspect: f64,
    column_span: u32,
    feature: bool,
    container_width: u32,
    params: &MetroParams,
) -> u32 {
    let width = f64::from(column_span) / f64::from(params.columns) * f64::from(container_width);
    let height = width / aspect;
    let gap = f64::from(params.gap);
    let rows = ((height + gap) / (f64::from(params.row_unit) + gap))
        .round()
        .clamp(2.0, f64::from(u32::MAX)) as u32;
    if feature {
        rows.max(params.feature_row_span)
    } else {
        rows
    }
}

/// Pixel height covered by `rows` grid rows and the gaps between them.
///
/// Saturates at `u32::MAX` for degenerate aspects or gaps.
fn span_height(rows: u32, params: &MetroParams) -> u32 {
    let rows = u64::from(rows);
    let px = rows * u64::from(params.row_unit) + rows.saturating_sub(1) * u64::from(params.gap);
    u32::try_from(px).unwrap_or(u32::MAX)
}
