//! Gallery geometry: justified rows and metro collages.
//!
//! Both algorithms are pure functions of `(items, container width, params)`.
//! Nothing is cached between passes, so calling them again with the same
//! inputs always yields the same geometry, and a pass never reads sizes a
//! previous pass produced.
//!
//! | Variant | Algorithm | Output |
//! |---|---|---|
//! | `tiled` | [`justified::pack`] | rows of `width × height` tiles |
//! | `collage` | [`metro::place`] | column span, row span, explicit height |
//!
//! A container width of zero means "not measured yet": both algorithms
//! return an empty layout and the caller retries on the next trigger.
//!
//! Tunables arrive as [`JustifiedParams`] / [`MetroParams`]. Their
//! `clamped()` constructors pull every value into its valid range; the
//! algorithms clamp again on entry so a hand-built params value can never
//! break them.

pub mod justified;
pub mod metro;

pub use justified::{JustifiedLayout, JustifiedRow, RowKind, Tile, TileSize};
pub use metro::MetroTile;

use crate::types::{GalleryItem, Variant};
use serde::{Deserialize, Serialize};

/// What happens to the final row of a justified gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LastRowPolicy {
    /// Natural widths at the target height, left-aligned.
    #[default]
    Left,
    /// Stretched to the container width like every other row.
    Justify,
}

impl LastRowPolicy {
    pub fn parse(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("justify") {
            LastRowPolicy::Justify
        } else {
            LastRowPolicy::Left
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LastRowPolicy::Left => "left",
            LastRowPolicy::Justify => "justify",
        }
    }
}

/// Tuning for the justified row packer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JustifiedParams {
    /// Row height the packer aims for, in px.
    pub target_row_height: f64,
    /// Allowed deviation from the target height, as a fraction (0.05–0.6).
    pub tolerance: f64,
    /// Aspect ratio at or above which an image gets a row of its own.
    pub panorama_threshold: f64,
    pub min_per_row: usize,
    pub max_per_row: usize,
    pub last_row: LastRowPolicy,
    /// Horizontal gap between tiles, in px.
    pub gap: u32,
}

pub const MIN_TOLERANCE: f64 = 0.05;
pub const MAX_TOLERANCE: f64 = 0.6;
pub const MIN_PANORAMA_THRESHOLD: f64 = 1.8;

impl Default for JustifiedParams {
    fn default() -> Self {
        Self {
            target_row_height: 220.0,
            tolerance: 0.25,
            panorama_threshold: 2.6,
            min_per_row: 2,
            max_per_row: 5,
            last_row: LastRowPolicy::Left,
            gap: 8,
        }
    }
}

impl JustifiedParams {
    /// Pull every field into its valid range. Non-finite values take the default.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let min_per_row = self.min_per_row.max(1);
        Self {
            target_row_height: finite_positive(self.target_row_height)
                .unwrap_or(defaults.target_row_height),
            tolerance: finite_or(self.tolerance, defaults.tolerance)
                .clamp(MIN_TOLERANCE, MAX_TOLERANCE),
            panorama_threshold: finite_or(self.panorama_threshold, defaults.panorama_threshold)
                .max(MIN_PANORAMA_THRESHOLD),
            min_per_row,
            max_per_row: self.max_per_row.max(min_per_row),
            last_row: self.last_row,
            gap: self.gap,
        }
    }

    /// Smallest row height a non-panorama row may take.
    pub fn min_row_height(&self) -> f64 {
        self.target_row_height * (1.0 - self.tolerance)
    }

    /// Largest row height a non-panorama row may take.
    pub fn max_row_height(&self) -> f64 {
        self.target_row_height * (1.0 + self.tolerance)
    }
}

/// Tuning for the metro collage placer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetroParams {
    pub columns: u32,
    /// Height of one implicit grid row, in px.
    pub row_unit: u32,
    pub min_column_span: u32,
    pub max_column_span: u32,
    /// Every n-th tile is a feature tile; 0 disables features.
    pub feature_every: usize,
    pub feature_column_span: u32,
    pub feature_row_span: u32,
    /// Crop tiles to whole grid rows. Without cropping, rows size themselves.
    pub crop: bool,
    pub gap: u32,
}

impl Default for MetroParams {
    fn default() -> Self {
        Self {
            columns: 6,
            row_unit: 12,
            min_column_span: 2,
            max_column_span: 3,
            feature_every: 5,
            feature_column_span: 3,
            feature_row_span: 4,
            crop: true,
            gap: 8,
        }
    }
}

impl MetroParams {
    pub fn clamped(&self) -> Self {
        let min_column_span = self.min_column_span.max(1);
        let max_column_span = self.max_column_span.max(min_column_span);
        Self {
            columns: self.columns.max(2),
            row_unit: self.row_unit.max(6),
            min_column_span,
            max_column_span,
            feature_every: self.feature_every,
            feature_column_span: self.feature_column_span.max(max_column_span),
            feature_row_span: self.feature_row_span.max(3),
            crop: self.crop,
            gap: self.gap,
        }
    }
}

/// Geometry of one gallery after a layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GalleryLayout {
    Justified(JustifiedLayout),
    Metro { tiles: Vec<MetroTile> },
}

impl GalleryLayout {
    /// Number of items that received geometry.
    pub fn item_count(&self) -> usize {
        match self {
            GalleryLayout::Justified(layout) => layout.item_count(),
            GalleryLayout::Metro { tiles } => tiles.len(),
        }
    }
}

/// Run the algorithm matching `variant`.
///
/// Returns `None` for variants that CSS lays out on its own (`grid`,
/// `masonry`). An unmeasured width still yields `Some` empty layout.
pub fn compute(
    variant: Variant,
    items: &[GalleryItem],
    container_width: u32,
    justified: &JustifiedParams,
    metro: &MetroParams,
) -> Option<GalleryLayout> {
    match variant {
        Variant::Tiled => Some(GalleryLayout::Justified(justified::pack(
            items,
            container_width,
            justified,
        ))),
        Variant::Collage => Some(GalleryLayout::Metro {
            tiles: metro::place(items, container_width, metro),
        }),
        Variant::Grid | Variant::Masonry => None,
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

fn finite_positive(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}
