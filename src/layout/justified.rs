//! Justified row packing.
//!
//! Images flow left to right into rows whose height stays close to a target,
//! and every row (except, optionally, the last) is stretched or compressed so
//! its tiles plus gaps fill the container exactly.
//!
//! ## Algorithm
//!
//! One greedy pass groups items into rows:
//!
//! 1. An image with `aspect >= panorama_threshold` closes the current row
//!    and sits alone in the next one.
//! 2. Otherwise it joins the current row. The row closes once its width at
//!    the target height reaches the container, or it holds `max_per_row`
//!    images. If closing would need a stretch beyond `1 + tolerance` and
//!    there is room for more, one more image is pulled in first.
//! 3. A final row shorter than `min_per_row` borrows the last image of the
//!    row before it, if that row can spare one.
//!
//! Then each row is sized:
//!
//! | Row | Height | Widths |
//! |---|---|---|
//! | regular | fill height, clamped to the tolerance band | stretched to fill |
//! | panorama | target height, stretched with the tile | fills the container |
//! | last, `left` policy | target height, clamped | natural, left-aligned |
//! | last, overfull | target height, clamped | compressed to fit |
//!
//! Widths are rounded per tile; the last tile of a filled row absorbs the
//! rounding remainder so `sum(widths) + gaps == container width` exactly.

use super::{JustifiedParams, LastRowPolicy};
use crate::types::GalleryItem;
use serde::Serialize;

/// One placed image. `index` points into the slice given to [`pack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub index: usize,
    pub width: u32,
    pub height: u32,
}

/// Per-item geometry in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    /// Stretched or compressed to fill the container.
    Justified,
    /// A single wide image filling the container.
    Panorama,
    /// Last row under [`LastRowPolicy::Left`]: natural widths, not filled.
    Ragged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JustifiedRow {
    pub kind: RowKind,
    pub height: u32,
    pub tiles: Vec<Tile>,
}

impl JustifiedRow {
    /// Total rendered width of the row including gaps.
    pub fn width(&self, gap: u32) -> u32 {
        let tiles: u32 = self.tiles.iter().map(|t| t.width).sum();
        tiles + gap * self.tiles.len().saturating_sub(1) as u32
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JustifiedLayout {
    pub rows: Vec<JustifiedRow>,
}

impl JustifiedLayout {
    pub fn item_count(&self) -> usize {
        self.rows.iter().map(JustifiedRow::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of tiles in each row, top to bottom.
    pub fn row_lengths(&self) -> Vec<usize> {
        self.rows.iter().map(JustifiedRow::len).collect()
    }

    /// Flatten to one size per input item, in input order.
    pub fn tile_sizes(&self) -> Vec<TileSize> {
        let empty = TileSize {
            width: 0,
            height: 0,
        };
        let mut sizes = vec![empty; self.item_count()];
        for tile in self.rows.iter().flat_map(|r| &r.tiles) {
            if let Some(slot) = sizes.get_mut(tile.index) {
                *slot = TileSize {
                    width: tile.width,
                    height: tile.height,
                };
            }
        }
        sizes
    }
}

/// Row under construction: indices into the item slice.
#[derive(Debug)]
struct PendingRow {
    indices: Vec<usize>,
    panorama: bool,
}

/// Pack `items` into justified rows for a container `container_width` px wide.
///
/// Returns an empty layout for an empty slice or an unmeasured (zero) width.
pub fn pack(
    items: &[GalleryItem],
    container_width: u32,
    params: &JustifiedParams,
) -> JustifiedLayout {
    if items.is_empty() || container_width == 0 {
        return JustifiedLayout::default();
    }
    let params = params.clamped();

    let pending = group_rows(items, container_width, &params);
    let last = pending.len() - 1;
    let rows = pending
        .iter()
        .enumerate()
        .map(|(r, row)| size_row(items, row, r == last, container_width, &params))
        .collect();

    JustifiedLayout { rows }
}

fn group_rows(
    items: &[GalleryItem],
    container_width: u32,
    params: &JustifiedParams,
) -> Vec<PendingRow> {
    let cw = f64::from(container_width);
    let gap = f64::from(params.gap);
    let base = params.target_row_height;

    let mut rows: Vec<PendingRow> = Vec::new();
    let mut row: Vec<usize> = Vec::new();
    let mut row_aspect = 0.0;

    for (i, item) in items.iter().enumerate() {
        let ar = item.aspect_ratio();

        if ar >= params.panorama_threshold {
            if !row.is_empty() {
                rows.push(PendingRow {
                    indices: std::mem::take(&mut row),
                    panorama: false,
                });
                row_aspect = 0.0;
            }
            rows.push(PendingRow {
                indices: vec![i],
                panorama: true,
            });
            continue;
        }

        row.push(i);
        row_aspect += ar;

        let total_gap = gap * (row.len() - 1) as f64;
        let width_at_base = base * row_aspect + total_gap;

        if width_at_base >= cw || row.len() >= params.max_per_row {
            let factor = (cw - total_gap) / (base * row_aspect);
            let more_remain = i + 1 < items.len();
            if factor > 1.0 + params.tolerance && row.len() < params.max_per_row && more_remain {
                continue;
            }
            rows.push(PendingRow {
                indices: std::mem::take(&mut row),
                panorama: false,
            });
            row_aspect = 0.0;
        }
    }
    if !row.is_empty() {
        rows.push(PendingRow {
            indices: row,
            panorama: false,
        });
    }

    fix_widow(&mut rows, params.min_per_row);
    rows
}

/// Move one image from the second-to-last row into a too-short last row.
///
/// A trailing panorama keeps its row to itself.
fn fix_widow(rows: &mut [PendingRow], min_per_row: usize) {
    let [.., prev, last] = rows else {
        return;
    };
    if last.panorama || last.indices.len() >= min_per_row || prev.indices.len() <= min_per_row {
        return;
    }
    if let Some(moved) = prev.indices.pop() {
        last.indices.insert(0, moved);
    }
}

fn size_row(
    items: &[GalleryItem],
    row: &PendingRow,
    is_last: bool,
    container_width: u32,
    params: &JustifiedParams,
) -> JustifiedRow {
    let cw = f64::from(container_width);
    let count = row.indices.len();
    let gap_px = params.gap * (count as u32).saturating_sub(1);
    let total_gap = f64::from(gap_px);
    let (min_h, max_h) = (params.min_row_height(), params.max_row_height());
    let sum_aspect: f64 = row.indices.iter().map(|&i| items[i].aspect_ratio()).sum();

    let (kind, target_height) = if row.panorama {
        (RowKind::Panorama, params.target_row_height.clamp(min_h, max_h))
    } else if is_last && params.last_row == LastRowPolicy::Left {
        (RowKind::Ragged, params.target_row_height.clamp(min_h, max_h))
    } else {
        (RowKind::Justified, ((cw - total_gap) / sum_aspect).clamp(min_h, max_h))
    };

    let natural: Vec<f64> = row
        .indices
        .iter()
        .map(|&i| items[i].aspect_ratio() * target_height)
        .collect();
    let natural_sum: f64 = natural.iter().sum();
    // A ragged row that borrowed a wide image can exceed the container at
    // target height; it is compressed to fit instead.
    let overfull = kind == RowKind::Ragged && natural_sum > cw - total_gap;
    let filled = kind != RowKind::Ragged || overfull;

    let mut factor = if filled {
        (cw - total_gap) / natural_sum
    } else {
        1.0
    };
    if !factor.is_finite() || factor <= 0.0 {
        factor = 1.0;
    }

    // A panorama keeps its proportions; other rows stay inside the band and
    // the presentation layer crops the small aspect difference.
    let height = match kind {
        RowKind::Panorama => (target_height * factor).round() as u32,
        _ => target_height.round() as u32,
    };

    let available = i64::from(container_width) - i64::from(gap_px);
    let mut used: i64 = 0;
    let mut tiles = Vec::with_capacity(count);
    for (k, (&index, w)) in row.indices.iter().zip(&natural).enumerate() {
        let rounded = (w * factor).round() as i64;
        let width = if k + 1 < count {
            rounded
        } else if filled {
            (available - used).max(0)
        } else {
            rounded.min(available - used).max(0)
        };
        used += width;
        tiles.push(Tile {
            index,
            width: width as u32,
            height,
        });
    }

    log::trace!(
        "row {:?}: {} tiles, target {:.1}px, factor {:.3}, height {}px",
        kind,
        count,
        target_height,
        factor,
        height
    );

    JustifiedRow {
        kind,
        height,
        tiles,
    }
}
