//! Aspect ratio resolution.
//!
//! Every layout pass needs a width/height ratio per image, and the server
//! only sometimes knows it. Resolution tries each source in priority order;
//! the first usable value wins:
//!
//! ```text
//! explicit hint (> 0)  →  natural width / height (both > 0)  →  1.5
//! ```
//!
//! Resolution never fails. Packing math reads ratios from here, never from
//! pixel sizes a previous pass already applied.

use crate::types::Dimensions;

/// Ratio used when nothing better is known (a 3:2 landscape frame).
pub const FALLBACK_ASPECT: f64 = 1.5;

/// Anything the resolver can read an aspect ratio from.
pub trait AspectSource {
    /// Explicitly attached ratio, e.g. from stored attachment metadata.
    fn aspect_hint(&self) -> Option<f64>;

    /// Measured intrinsic size of the underlying image resource.
    fn natural_size(&self) -> Option<Dimensions>;
}

/// Resolve the aspect ratio of any [`AspectSource`].
pub fn resolve(source: &impl AspectSource) -> f64 {
    resolve_aspect(source.aspect_hint(), source.natural_size())
}

/// Resolve an aspect ratio from its raw inputs.
///
/// Non-finite or non-positive hints count as absent.
pub fn resolve_aspect(hint: Option<f64>, natural: Option<Dimensions>) -> f64 {
    if let Some(ar) = hint.filter(|ar| ar.is_finite() && *ar > 0.0) {
        return ar;
    }
    match natural {
        Some(Dimensions { width, height }) if width > 0 && height > 0 => {
            width as f64 / height as f64
        }
        _ => FALLBACK_ASPECT,
    }
}
