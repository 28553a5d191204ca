//! Gallery configuration module.
//!
//! Handles loading, normalizing, and merging `config.toml` files. Layers are
//! applied in order, each overriding only the keys it sets:
//!
//! ```text
//! stock defaults  →  content/config.toml  →  --config <file>  →  CLI flags
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! layout = "tiled"          # tiled | grid | masonry | collage
//! category = ""             # Category slug or path; empty = everything
//! gutter = 8                # Horizontal gap between tiles (px)
//! # v_gutter = 8            # Vertical gap; defaults to gutter
//! per_row = 3               # Columns for grid and masonry
//! size = "large"            # Image size requested from the content source
//! click_menu = false        # Per-image "View image / Read post" menu
//! background = "transparent"  # Letterbox color for uncropped collages
//!
//! [selection]
//! max = 12                  # Images per gallery
//! cycle = "none"            # none | hourly | daily
//! include_draft = false
//! mode = "post"             # post | attachment
//!
//! [tiled]
//! row_height = 220
//! last_row = "left"         # left | justify
//! tolerance = 0.25          # 0.05 - 0.6
//! panorama_threshold = 2.6  # >= 1.8
//! min_per_row = 2
//! max_per_row = 5
//!
//! [collage]
//! columns = 6
//! row_unit = 12
//! min_columns = 2
//! max_columns = 3
//! feature_every = 5         # 0 disables feature tiles
//! feature_width = 3
//! feature_height = 4
//! crop = true
//!
//! [processing]
//! max_threads = 4           # Omit for auto = CPU cores
//!
//! [viewport]
//! resize_quiet_ms = 80
//! ```
//!
//! ## Normalization
//!
//! Out-of-range numbers are clamped to the nearest valid bound and unknown
//! names fall back to their defaults; a gallery never fails to render because
//! of a bad tuning value. Unknown keys are still rejected to catch typos.

use crate::layout::{JustifiedParams, LastRowPolicy, MetroParams};
use crate::rotation::{RotationConfig, RotationPeriod};
use crate::source::{ContentQuery, SelectionMode};
use crate::types::Variant;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Gallery configuration loaded from `config.toml`.
///
/// All fields have defaults; user files only set what they override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    pub layout: String,
    pub category: String,
    pub gutter: i64,
    pub v_gutter: Option<i64>,
    /// Column count for the CSS-only `grid` and `masonry` layouts.
    pub per_row: i64,
    pub size: String,
    pub click_menu: bool,
    pub background: String,
    pub selection: SelectionConfig,
    pub tiled: TiledConfig,
    pub collage: CollageConfig,
    pub processing: ProcessingConfig,
    pub viewport: ViewportConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            layout: "tiled".to_string(),
            category: String::new(),
            gutter: 8,
            v_gutter: None,
            per_row: 3,
            size: "large".to_string(),
            click_menu: false,
            background: "transparent".to_string(),
            selection: SelectionConfig::default(),
            tiled: TiledConfig::default(),
            collage: CollageConfig::default(),
            processing: ProcessingConfig::default(),
            viewport: ViewportConfig::default(),
        }
    }
}

/// Which images a gallery draws from and how many it shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionConfig {
    pub max: i64,
    pub cycle: String,
    pub include_draft: bool,
    pub mode: String,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max: 12,
            cycle: "none".to_string(),
            include_draft: false,
            mode: "post".to_string(),
        }
    }
}

/// Justified row tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TiledConfig {
    pub row_height: i64,
    pub last_row: String,
    pub tolerance: f64,
    pub panorama_threshold: f64,
    pub min_per_row: i64,
    pub max_per_row: i64,
}

impl Default for TiledConfig {
    fn default() -> Self {
        Self {
            row_height: 220,
            last_row: "left".to_string(),
            tolerance: 0.25,
            panorama_threshold: 2.6,
            min_per_row: 2,
            max_per_row: 5,
        }
    }
}

/// Metro collage tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollageConfig {
    pub columns: i64,
    pub row_unit: i64,
    pub min_columns: i64,
    pub max_columns: i64,
    pub feature_every: i64,
    pub feature_width: i64,
    pub feature_height: i64,
    pub crop: bool,
}

impl Default for CollageConfig {
    fn default() -> Self {
        Self {
            columns: 6,
            row_unit: 12,
            min_columns: 2,
            max_columns: 3,
            feature_every: 5,
            feature_width: 3,
            feature_height: 4,
            crop: true,
        }
    }
}

/// Parallel layout settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of layout worker threads.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_threads: Option<usize>,
}

/// Resize handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportConfig {
    /// Quiet period after the last resize event before re-laying out.
    pub resize_quiet_ms: i64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            resize_quiet_ms: 80,
        }
    }
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_threads
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

impl GalleryConfig {
    /// Clamp every tunable into its valid range and canonicalize names.
    pub fn normalize(mut self) -> Self {
        self.layout = Variant::parse(&self.layout).as_str().to_string();
        self.category = self.category.trim().trim_matches('/').to_string();
        self.gutter = self.gutter.max(0);
        self.v_gutter = self.v_gutter.map(|v| v.max(0));
        self.per_row = self.per_row.max(1);
        if self.size.trim().is_empty() {
            self.size = "large".to_string();
        }

        let s = &mut self.selection;
        s.max = s.max.max(1);
        s.cycle = RotationPeriod::parse(&s.cycle).as_str().to_string();
        s.mode = SelectionMode::parse(&s.mode).as_str().to_string();

        let t = &mut self.tiled;
        t.row_height = t.row_height.max(80);
        t.last_row = LastRowPolicy::parse(&t.last_row).as_str().to_string();
        t.tolerance = finite_or(t.tolerance, 0.25).clamp(0.05, 0.6);
        t.panorama_threshold = finite_or(t.panorama_threshold, 2.6).max(1.8);
        t.min_per_row = t.min_per_row.max(1);
        t.max_per_row = t.max_per_row.max(t.min_per_row);

        let c = &mut self.collage;
        c.columns = c.columns.max(2);
        c.row_unit = c.row_unit.max(6);
        c.min_columns = c.min_columns.max(1);
        c.max_columns = c.max_columns.max(c.min_columns);
        c.feature_every = c.feature_every.max(0);
        c.feature_width = c.feature_width.max(c.max_columns);
        c.feature_height = c.feature_height.max(3);

        self.viewport.resize_quiet_ms = self.viewport.resize_quiet_ms.max(1);
        self
    }

    pub fn variant(&self) -> Variant {
        Variant::parse(&self.layout)
    }

    pub fn horizontal_gap(&self) -> u32 {
        to_u32(self.gutter)
    }

    /// Vertical gap, defaulting to the horizontal one.
    pub fn vertical_gap(&self) -> u32 {
        to_u32(self.v_gutter.unwrap_or(self.gutter))
    }

    pub fn to_justified_params(&self) -> JustifiedParams {
        JustifiedParams {
            target_row_height: self.tiled.row_height as f64,
            tolerance: self.tiled.tolerance,
            panorama_threshold: self.tiled.panorama_threshold,
            min_per_row: to_usize(self.tiled.min_per_row),
            max_per_row: to_usize(self.tiled.max_per_row),
            last_row: LastRowPolicy::parse(&self.tiled.last_row),
            gap: self.horizontal_gap(),
        }
        .clamped()
    }

    pub fn to_metro_params(&self) -> MetroParams {
        let c = &self.collage;
        MetroParams {
            columns: to_u32(c.columns),
            row_unit: to_u32(c.row_unit),
            min_column_span: to_u32(c.min_columns),
            max_column_span: to_u32(c.max_columns),
            feature_every: to_usize(c.feature_every),
            feature_column_span: to_u32(c.feature_width),
            feature_row_span: to_u32(c.feature_height),
            crop: c.crop,
            gap: self.horizontal_gap(),
        }
        .clamped()
    }

    pub fn selection_mode(&self) -> SelectionMode {
        SelectionMode::parse(&self.selection.mode)
    }

    pub fn content_query(&self) -> ContentQuery {
        ContentQuery::new(
            self.category.clone(),
            self.selection_mode(),
            self.selection.include_draft,
        )
    }

    /// Rotation stream for this gallery: one per category and mode.
    pub fn rotation_config(&self) -> RotationConfig {
        RotationConfig::new(
            RotationPeriod::parse(&self.selection.cycle),
            format!("{}|{}", self.category, self.selection_mode().as_str()),
            to_usize(self.selection.max),
        )
    }

    pub fn resize_quiet(&self) -> Duration {
        Duration::from_millis(self.viewport.resize_quiet_ms.max(1) as u64)
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

fn to_u32(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

fn to_usize(value: i64) -> usize {
    usize::try_from(value.max(0)).unwrap_or(usize::MAX)
}

// =============================================================================
// Config loading and merging
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    load_config_file(&config_path).map(Some)
}

/// Parse a single TOML file without merging.
pub fn load_config_file(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge overlays in order onto `base`, then deserialize and normalize.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<GalleryConfig, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let config: GalleryConfig = merged.try_into()?;
    Ok(config.normalize())
}

/// Load config for a content root plus an optional extra file.
///
/// `root` may be a directory (its `config.toml` is used) or a manifest file
/// (the `config.toml` next to it is used).
pub fn load_config(root: &Path, extra: Option<&Path>) -> Result<GalleryConfig, ConfigError> {
    let dir = if root.is_dir() {
        root
    } else {
        root.parent().unwrap_or(Path::new("."))
    };
    let mut overlays = Vec::new();
    if let Some(value) = load_raw_config(dir)? {
        overlays.push(value);
    }
    if let Some(path) = extra {
        overlays.push(load_config_file(path)?);
    }
    resolve_config(stock_defaults_value(), overlays)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Tiled Gal Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Config is layered:
#   stock defaults -> content/config.toml -> --config <file> -> CLI flags
#
# Out-of-range numbers are clamped to the nearest valid value.
# Unknown keys will cause an error.

# Gallery layout: "tiled" (justified rows), "collage" (metro grid),
# "grid" or "masonry" (pure CSS templates).
layout = "tiled"

# Category slug or path to draw images from, including sub-categories.
# Empty means every category.
category = ""

# Horizontal gap between tiles, in px.
gutter = 8

# Vertical gap between rows, in px. Defaults to gutter.
# v_gutter = 8

# Columns for the grid and masonry layouts.
per_row = 3

# Image size requested from the content source.
size = "large"

# Show a small menu on click with "View image" and "Read post about the image".
click_menu = false

# Letterbox color behind uncropped collage tiles.
background = "transparent"

# ---------------------------------------------------------------------------
# Selection
# ---------------------------------------------------------------------------
[selection]
# Maximum number of images shown.
max = 12

# Reshuffle the selection every "hourly" or "daily"; "none" keeps source order.
cycle = "none"

# Include images from unpublished content.
include_draft = false

# "post": one representative image per content item.
# "attachment": every image attached to matching content.
mode = "post"

# ---------------------------------------------------------------------------
# Tiled (justified rows)
# ---------------------------------------------------------------------------
[tiled]
# Target row height in px (minimum 80).
row_height = 220

# Final row: "left" keeps natural widths, "justify" stretches it.
last_row = "left"

# Allowed row height deviation from row_height, as a fraction (0.05 - 0.6).
tolerance = 0.25

# Images at least this wide (width / height) get a row of their own (>= 1.8).
panorama_threshold = 2.6

# Fewest and most images per row.
min_per_row = 2
max_per_row = 5

# ---------------------------------------------------------------------------
# Collage (metro grid)
# ---------------------------------------------------------------------------
[collage]
# Grid columns (minimum 2).
columns = 6

# Height of one grid row in px (minimum 6).
row_unit = 12

# Column span range for regular tiles.
min_columns = 2
max_columns = 3

# Every n-th tile becomes a larger feature tile; 0 disables features.
feature_every = 5

# Feature tile size in columns and (minimum) rows.
feature_width = 3
feature_height = 4

# Crop tiles to whole grid rows. When false, tiles keep their aspect ratio.
crop = true

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel layout workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_threads = 4

# ---------------------------------------------------------------------------
# Viewport
# ---------------------------------------------------------------------------
[viewport]
# Quiet period after the last resize event before laying out again, in ms.
resize_quiet_ms = 80
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // =========================================================================
    // Defaults
    // =========================================================================

    #[test]
    fn default_config_matches_stock_values() {
        let config = GalleryConfig::default();
        assert_eq!(config.layout, "tiled");
        assert_eq!(config.gutter, 8);
        assert_eq!(config.selection.max, 12);
        assert_eq!(config.tiled.row_height, 220);
        assert_eq!(config.collage.columns, 6);
        assert_eq!(config.viewport.resize_quiet_ms, 80);
    }

    #[test]
    fn default_params_match_layout_defaults() {
        let config = GalleryConfig::default();
        assert_eq!(config.to_justified_params(), JustifiedParams::default());
        assert_eq!(config.to_metro_params(), MetroParams::default());
    }

    #[test]
    fn stock_config_toml_round_trips_to_defaults() {
        let value: toml::Value = toml::from_str(stock_config_toml()).unwrap();
        let config = resolve_config(stock_defaults_value(), [value]).unwrap();
        assert_eq!(config, GalleryConfig::default());
    }

    #[test]
    fn defaults_are_already_normalized() {
        assert_eq!(
            GalleryConfig::default().normalize(),
            GalleryConfig::default()
        );
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    #[test]
    fn parse_partial_config() {
        let toml = r#"
layout = "collage"

[collage]
crop = false
"#;
        let config: GalleryConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.variant(), Variant::Collage);
        assert!(!config.collage.crop);
        // Defaults preserved
        assert_eq!(config.collage.columns, 6);
        assert_eq!(config.tiled.tolerance, 0.25);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<GalleryConfig, _> = toml::from_str("gutterr = 4");
        assert!(result.is_err());
        let nested: Result<GalleryConfig, _> = toml::from_str("[tiled]\nrow_hieght = 200");
        assert!(nested.is_err());
    }

    #[test]
    fn integer_tolerance_is_accepted() {
        let config: GalleryConfig = toml::from_str("[tiled]\ntolerance = 1").unwrap();
        assert_eq!(config.normalize().tiled.tolerance, 0.6);
    }

    // =========================================================================
    // Normalization
    // =========================================================================

    #[test]
    fn out_of_range_values_are_clamped() {
        let toml = r#"
gutter = -4
per_row = 0

[selection]
max = -1

[tiled]
row_height = 10
tolerance = 0.001
panorama_threshold = 1.0
min_per_row = 4
max_per_row = 2

[collage]
columns = 1
row_unit = 1
min_columns = 3
max_columns = 1
feature_every = -2
feature_width = 1
feature_height = 0

[viewport]
resize_quiet_ms = 0
"#;
        let config: GalleryConfig = toml::from_str(toml).unwrap();
        let config = config.normalize();
        assert_eq!(config.gutter, 0);
        assert_eq!(config.per_row, 1);
        assert_eq!(config.selection.max, 1);
        assert_eq!(config.tiled.row_height, 80);
        assert_eq!(config.tiled.tolerance, 0.05);
        assert_eq!(config.tiled.panorama_threshold, 1.8);
        assert_eq!(config.tiled.max_per_row, 4);
        assert_eq!(config.collage.columns, 2);
        assert_eq!(config.collage.row_unit, 6);
        assert_eq!(config.collage.max_columns, 3);
        assert_eq!(config.collage.feature_every, 0);
        assert_eq!(config.collage.feature_width, 3);
        assert_eq!(config.collage.feature_height, 3);
        assert_eq!(config.viewport.resize_quiet_ms, 1);
    }

    #[test]
    fn unknown_names_fall_back() {
        let toml = r#"
layout = "carousel"

[selection]
cycle = "weekly"
mode = "everything"

[tiled]
last_row = "center"
"#;
        let config: GalleryConfig = toml::from_str(toml).unwrap();
        let config = config.normalize();
        assert_eq!(config.layout, "tiled");
        assert_eq!(config.selection.cycle, "none");
        assert_eq!(config.selection.mode, "post");
        assert_eq!(config.tiled.last_row, "left");
    }

    #[test]
    fn names_are_canonicalized() {
        let config: GalleryConfig =
            toml::from_str("layout = \" Collage \"\n[selection]\ncycle = \"DAILY\"").unwrap();
        let config = config.normalize();
        assert_eq!(config.layout, "collage");
        assert_eq!(config.selection.cycle, "daily");
    }

    #[test]
    fn vertical_gap_defaults_to_gutter() {
        let mut config = GalleryConfig {
            gutter: 12,
            ..Default::default()
        };
        assert_eq!(config.vertical_gap(), 12);
        config.v_gutter = Some(4);
        assert_eq!(config.vertical_gap(), 4);
    }

    #[test]
    fn rotation_config_keys_on_category_and_mode() {
        let mut config = GalleryConfig {
            category: "travel".into(),
            ..Default::default()
        };
        config.selection.cycle = "hourly".into();
        config.selection.mode = "attachment".into();
        let rotation = config.rotation_config();
        assert_eq!(rotation.group_key, "travel|attachment");
        assert_eq!(rotation.period, RotationPeriod::Hourly);
        assert_eq!(rotation.cap, 12);
    }

    #[test]
    fn content_query_follows_selection() {
        let mut config = GalleryConfig::default();
        config.selection.include_draft = true;
        let query = config.content_query();
        assert_eq!(query.mode, SelectionMode::Post);
        assert_eq!(query.statuses.len(), 5);
    }

    // =========================================================================
    // Processing config
    // =========================================================================

    #[test]
    fn effective_threads_auto() {
        let config = ProcessingConfig { max_threads: None };
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn effective_threads_clamped_to_cores() {
        let config = ProcessingConfig {
            max_threads: Some(99999),
        };
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_threads: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_zero_means_one() {
        let config = ProcessingConfig {
            max_threads: Some(0),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    // =========================================================================
    // merge_toml
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("gutter = 8").unwrap();
        let overlay: toml::Value = toml::from_str("gutter = 2").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("gutter").unwrap().as_integer(), Some(2));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[tiled]
row_height = 220
tolerance = 0.25
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str("[tiled]\nrow_height = 300").unwrap();
        let merged = merge_toml(base, overlay);
        let tiled = merged.get("tiled").unwrap();
        assert_eq!(tiled.get("row_height").unwrap().as_integer(), Some(300));
        // tolerance preserved from base
        assert_eq!(tiled.get("tolerance").unwrap().as_float(), Some(0.25));
    }

    // =========================================================================
    // load_config
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path(), None).unwrap();
        assert_eq!(config, GalleryConfig::default());
    }

    #[test]
    fn load_config_layers_root_then_extra() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "layout = \"collage\"\ngutter = 4\n[collage]\ncolumns = 8\n",
        )
        .unwrap();
        let extra = tmp.path().join("override.toml");
        fs::write(&extra, "gutter = 12\n").unwrap();

        let config = load_config(tmp.path(), Some(&extra)).unwrap();
        assert_eq!(config.variant(), Variant::Collage);
        assert_eq!(config.gutter, 12);
        assert_eq!(config.collage.columns, 8);
        assert_eq!(config.to_metro_params().gap, 12);
    }

    #[test]
    fn load_config_next_to_manifest() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "category = \"travel\"\n").unwrap();
        let manifest = tmp.path().join("site.json");
        fs::write(&manifest, "{}").unwrap();
        let config = load_config(&manifest, None).unwrap();
        assert_eq!(config.category, "travel");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path(), None);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_missing_extra_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(tmp.path(), Some(&tmp.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
