//! Shared types used across selection, layout and presentation.
//!
//! These are the values that cross module boundaries: the content source
//! hands out [`ImageId`]s, the resolver turns records into [`GalleryItem`]s,
//! and the orchestrator dispatches on a gallery's [`Variant`].

use crate::aspect;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of one image in the content source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(pub String);

impl ImageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ImageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifies one gallery instance on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GalleryId(pub usize);

impl fmt::Display for GalleryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gallery-{}", self.0)
    }
}

/// Pixel dimensions of an image resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// One image entering a layout pass.
///
/// The aspect ratio is always finite and positive: [`GalleryItem::new`]
/// replaces anything else with [`aspect::FALLBACK_ASPECT`].
/// Deserialized items go through the same check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawGalleryItem")]
pub struct GalleryItem {
    pub id: ImageId,
    aspect_ratio: f64,
}

impl GalleryItem {
    pub fn new(id: impl Into<ImageId>, aspect_ratio: f64) -> Self {
        Self {
            id: id.into(),
            aspect_ratio: aspect::resolve_aspect(Some(aspect_ratio), None),
        }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }
}

#[derive(Deserialize)]
struct RawGalleryItem {
    id: ImageId,
    aspect_ratio: f64,
}

impl From<RawGalleryItem> for GalleryItem {
    fn from(raw: RawGalleryItem) -> Self {
        GalleryItem::new(raw.id, raw.aspect_ratio)
    }
}

/// Gallery presentation variant.
///
/// Only `Tiled` and `Collage` need algorithmic placement; `Grid` and
/// `Masonry` are fixed CSS templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Tiled,
    Grid,
    Masonry,
    Collage,
}

impl Variant {
    /// Parse a user-supplied layout name. Unknown names fall back to `Tiled`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "grid" => Variant::Grid,
            "masonry" => Variant::Masonry,
            "collage" => Variant::Collage,
            _ => Variant::Tiled,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Tiled => "tiled",
            Variant::Grid => "grid",
            Variant::Masonry => "masonry",
            Variant::Collage => "collage",
        }
    }

    /// Whether this variant is sized by a layout pass rather than pure CSS.
    pub fn is_algorithmic(self) -> bool {
        matches!(self, Variant::Tiled | Variant::Collage)
    }
}
