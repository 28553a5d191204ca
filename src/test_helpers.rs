//! Shared test utilities for the tiled-gal test suite.
//!
//! Builders for gallery items and content manifests, plus assertions for the
//! geometric properties every layout pass must hold.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let items = items_with_aspects(&[1.5, 0.8, 3.0]);
//! let layout = justified::pack(&items, 900, &JustifiedParams::default());
//! assert_rows_fill(&layout, 900, 8);
//! ```

use crate::layout::{JustifiedLayout, JustifiedParams, JustifiedRow, RowKind};
use crate::source::ManifestSource;
use crate::types::GalleryItem;

// =========================================================================
// Item builders
// =========================================================================

/// One item per aspect ratio, with ids `"0"`, `"1"`, ...
pub fn items_with_aspects(aspects: &[f64]) -> Vec<GalleryItem> {
    aspects
        .iter()
        .enumerate()
        .map(|(i, &ar)| GalleryItem::new(i.to_string(), ar))
        .collect()
}

/// Input indices of a row's tiles, left to right.
pub fn tile_indices(row: &JustifiedRow) -> Vec<usize> {
    row.tiles.iter().map(|t| t.index).collect()
}

// =========================================================================
// Layout assertions
// =========================================================================

/// Assert a row's height lies inside the tolerance band (allowing rounding).
pub fn assert_row_height_in_band(row: &JustifiedRow, params: &JustifiedParams) {
    let p = params.clamped();
    let height = f64::from(row.height);
    assert!(
        height >= p.min_row_height().floor() && height <= p.max_row_height().ceil(),
        "row height {} outside [{:.1}, {:.1}]: {row:?}",
        row.height,
        p.min_row_height(),
        p.max_row_height()
    );
}

/// Assert every filled (non-ragged) row sums to exactly `container_width`.
pub fn assert_rows_fill(layout: &JustifiedLayout, container_width: u32, gap: u32) {
    for (i, row) in layout.rows.iter().enumerate() {
        if row.kind != RowKind::Ragged {
            assert_eq!(
                row.width(gap),
                container_width,
                "row {i} does not fill the container: {row:?}"
            );
        }
    }
}

// =========================================================================
// Content fixtures
// =========================================================================

/// A small WordPress-shaped manifest:
///
/// ```text
/// travel
/// ├── japan      post 10 (publish): featured 101, attachments 101 102
/// │              post 11 (draft):   no featured, attachments 112 111
/// └── italy      post 12 (publish): featured 121
/// portraits      post 13 (publish): attachment 131 (pdf) only
/// ```
pub fn sample_manifest() -> ManifestSource {
    let json = r#"{
        "categories": [
            { "slug": "travel" },
            { "slug": "japan", "parent": "travel" },
            { "slug": "italy", "parent": "travel" },
            { "slug": "portraits" }
        ],
        "posts": [
            { "id": "10", "title": "Tokyo", "status": "publish", "categories": ["japan"],
              "featured": "101", "permalink": "/tokyo" },
            { "id": "11", "title": "Kyoto", "status": "draft", "categories": ["japan"],
              "permalink": "/kyoto" },
            { "id": "12", "title": "Rome", "status": "publish", "categories": ["italy"],
              "featured": "121", "permalink": "/rome" },
            { "id": "13", "title": "Studio", "status": "publish", "categories": ["portraits"],
              "permalink": "/studio" }
        ],
        "attachments": [
            { "id": "101", "parent": "10", "url": "/img/101.jpg", "width": 1600, "height": 900 },
            { "id": "102", "parent": "10", "url": "/img/102.jpg", "width": 800, "height": 1200,
              "menu_order": 1 },
            { "id": "111", "parent": "11", "url": "/img/111.jpg", "menu_order": 2 },
            { "id": "112", "parent": "11", "url": "/img/112.jpg", "width": 1000, "height": 1000,
              "menu_order": 1 },
            { "id": "121", "parent": "12", "url": "/img/121.jpg", "width": 3000, "height": 1000 },
            { "id": "131", "parent": "13", "url": "/img/131.pdf", "mime": "application/pdf" }
        ]
    }"#;
    ManifestSource::from_json(json).unwrap()
}
