//! # Tiled Gal
//!
//! Responsive photo gallery layout. Given a curated set of images and the
//! width of the container they will be shown in, compute where every image
//! goes: justified rows that fill the width exactly, or a metro collage on a
//! fixed-column grid. Which images appear, and in what order, can rotate by
//! the hour or the day without storing any state.
//!
//! # Pipeline
//!
//! ```text
//! content source ──▶ rotation ──▶ aspect ratios ──▶ layout ──▶ presentation
//!   (ids, records)   (shuffle,     (hint → natural   (justified  (HTML, or any
//!                     cap)          size → 1.5)       or metro)   Surface)
//! ```
//!
//! Every stage after the content source is a pure in-memory transform. The
//! two layout algorithms are functions of `(items, container width, params)`
//! and are recomputed from scratch on every pass.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`aspect`] | Aspect ratio resolution with a fixed fallback |
//! | [`rotation`] | Time-bucketed, seeded shuffle and cap of a candidate list |
//! | [`layout`] | Justified row packer and metro collage placer |
//! | [`orchestrator`] | Per-gallery layout state, sweeps, resize debouncing |
//! | [`menu`] | Click-menu entries, link rule, page-wide open menu |
//! | [`source`] | Content sources: JSON manifest or content directory |
//! | [`render`] | Maud HTML output with inline geometry |
//! | [`config`] | Layered `config.toml` loading and normalization |
//! | [`naming`] | `NNN-name` ordering convention for content directories |
//! | [`types`] | Shared types (`ImageId`, `GalleryItem`, `Variant`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Clamp, Never Reject
//!
//! Tuning values come from people editing config files. An out-of-range
//! tolerance or a negative gutter is pulled to the nearest valid value, a
//! missing image size falls back to 3:2, and an unmeasured container makes
//! a pass a no-op. The only errors are I/O and parse failures.
//!
//! ## Rows Stay in the Height Band
//!
//! A justified row closes once it would overfill the width at the target
//! height. Its final height is clamped into `target × (1 ± tolerance)` and
//! the widths are stretched to fill the container, with the last tile
//! absorbing integer rounding. Panoramas (very wide images) get a row of
//! their own; a lone trailing image borrows one from the row above.
//!
//! ## Reproducible Rotation
//!
//! The shuffle seed is a CRC-32 of the time bucket and the gallery's rotation
//! key, fed into a generator created for that call. Two requests in the same
//! hour see the same order; two galleries with different keys never do.

pub mod aspect;
pub mod config;
pub mod layout;
pub mod menu;
pub mod naming;
pub mod orchestrator;
pub mod output;
pub mod render;
pub mod rotation;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
