//! HTML presentation of a gallery.
//!
//! Produces the markup a page embeds: one container per gallery carrying its
//! tuning as CSS custom properties and `data-*` attributes, and one
//! `<figure>` per image. When a layout pass has run, each figure also gets
//! its geometry inline, so the page renders correctly at that width without
//! any client-side script.
//!
//! ```text
//! div.ap-gallery.ap-gallery--tiled  style="--ap-gap:8px;"  data-row-height="220" ...
//! ├── figure.ap-gallery__item  data-aspect="1.5"  style="width:295px;height:196px;"
//! │   ├── a.ap-gallery__link   (published, or viewer logged in)
//! │   │   └── img.ap-gallery__img
//! │   ├── span.ap-gallery__menu-toggle   (click_menu)
//! │   └── div.ap-gallery__menu           (click_menu)
//! └── ...
//! ```
//!
//! Uses [maud](https://maud.lambda.xyz/) like the rest of the HTML output;
//! the stylesheet is `static/gallery.css`, embedded at compile time.

use crate::aspect;
use crate::config::GalleryConfig;
use crate::layout::{GalleryLayout, MetroTile, TileSize};
use crate::menu;
use crate::source::ImageRecord;
use crate::types::Variant;
use maud::{DOCTYPE, Markup, PreEscaped, html};

pub const GALLERY_CSS: &str = include_str!("../static/gallery.css");

pub const EMPTY_MESSAGE: &str = "No images found for this category.";

/// Per-image geometry in input order.
enum Geometry<'a> {
    None,
    Tiles(Vec<TileSize>),
    Metro(&'a [MetroTile]),
}

impl Geometry<'_> {
    fn style(&self, index: usize) -> Option<String> {
        match self {
            Geometry::None => None,
            Geometry::Tiles(sizes) => sizes
                .get(index)
                .map(|s| format!("width:{}px;height:{}px;", s.width, s.height)),
            Geometry::Metro(tiles) => tiles.iter().find(|t| t.index == index).map(metro_style),
        }
    }
}

fn metro_style(tile: &MetroTile) -> String {
    let mut style = format!("grid-column:span {};", tile.column_span);
    match (tile.row_span, tile.height) {
        (Some(rows), Some(height)) => {
            style.push_str(&format!("grid-row:span {rows};height:{height}px;"));
        }
        _ => style.push_str("grid-row:auto;height:auto;"),
    }
    style
}

/// Render one gallery.
///
/// `images` is the rotated selection in display order; `layout`, when
/// present, must have been computed for exactly these images.
pub fn render_gallery(
    config: &GalleryConfig,
    images: &[&ImageRecord],
    layout: Option<&GalleryLayout>,
    logged_in: bool,
) -> Markup {
    if images.is_empty() {
        return html! {
            div.ap-gallery."ap-gallery--empty" { (EMPTY_MESSAGE) }
        };
    }

    let variant = config.variant();
    let geometry = match layout {
        Some(GalleryLayout::Justified(rows)) => Geometry::Tiles(rows.tile_sizes()),
        Some(GalleryLayout::Metro { tiles }) => Geometry::Metro(tiles),
        None => Geometry::None,
    };

    let mut classes = vec!["ap-gallery".to_string(), format!("ap-gallery--{}", variant.as_str())];
    if variant == Variant::Collage && !config.collage.crop {
        classes.push("ap--nocrop".to_string());
    }

    let tiled = variant == Variant::Tiled;
    let collage = variant == Variant::Collage;
    let t = &config.tiled;
    let c = &config.collage;

    html! {
        div class=(classes.join(" ")) style=(container_style(config))
            data-row-height=[tiled.then_some(t.row_height)]
            data-last-row=[tiled.then_some(t.last_row.as_str())]
            data-tolerance=[tiled.then(|| format_number(t.tolerance))]
            data-pano-threshold=[tiled.then(|| format_number(t.panorama_threshold))]
            data-min-per-row=[tiled.then_some(t.min_per_row)]
            data-max-per-row=[tiled.then_some(t.max_per_row)]
            data-min-col=[collage.then_some(c.min_columns)]
            data-max-col=[collage.then_some(c.max_columns)]
            data-feature-every=[collage.then_some(c.feature_every)]
            data-feature-w=[collage.then_some(c.feature_width)]
            data-feature-h=[collage.then_some(c.feature_height)]
        {
            @for (index, record) in images.iter().enumerate() {
                (render_item(record, geometry.style(index), config.click_menu, logged_in))
            }
        }
    }
}

/// CSS custom properties for the gallery container.
fn container_style(config: &GalleryConfig) -> String {
    let mut style = format!("--ap-gap:{}px;", config.horizontal_gap());
    if let Some(v) = config.v_gutter {
        style.push_str(&format!("--ap-vgap:{}px;", v.max(0)));
    }
    match config.variant() {
        Variant::Grid => {
            style.push_str(&format!("--ap-grid-cols: repeat({}, 1fr);", config.per_row))
        }
        Variant::Masonry => style.push_str(&format!("--ap-columns: {};", config.per_row)),
        Variant::Collage => {
            style.push_str(&format!(
                "--ap-cols:{}; --ap-row:{}px;",
                config.collage.columns, config.collage.row_unit
            ));
            style.push_str(&format!("--ap-bg:{};", config.background));
        }
        Variant::Tiled => {}
    }
    style
}

fn render_item(
    record: &ImageRecord,
    style: Option<String>,
    click_menu: bool,
    logged_in: bool,
) -> Markup {
    let aspect = format_number(aspect::resolve(record));
    let img = html! {
        img.ap-gallery__img src=(record.url) alt=(record.title) loading="lazy" decoding="async"
            width=[record.natural.map(|d| d.width)]
            height=[record.natural.map(|d| d.height)];
    };

    html! {
        figure.ap-gallery__item data-aspect=(aspect) style=[style] {
            @if menu::is_linkable(record, logged_in) {
                a.ap-gallery__link.ap-focus-outline
                    href=(menu::link_target(record)) aria-label=(record.title) {
                    (img)
                }
            } @else {
                (img)
            }
            @if click_menu {
                span.ap-gallery__menu-toggle tabindex="0" aria-label="Open options" {}
                div.ap-gallery__menu role="menu" {
                    @for entry in menu::menu_entries(record, logged_in) {
                        @if entry.external {
                            a role="menuitem" href=(entry.href) target="_blank" rel="noopener" {
                                (entry.label)
                            }
                        } @else {
                            a role="menuitem" href=(entry.href) { (entry.label) }
                        }
                    }
                }
            }
        }
    }
}

/// Standalone preview document around a rendered gallery.
pub fn render_page(title: &str, gallery: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(GALLERY_CSS)) }
            }
            body {
                main { (gallery) }
            }
        }
    }
}

/// Shortest decimal form: `1.5`, `0.25`, `2`.
fn format_number(value: f64) -> String {
    let s = format!("{value:.4}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{self, JustifiedParams, MetroParams};
    use crate::source::{ContentSource, PostStatus};
    use crate::test_helpers::*;
    use crate::types::{Dimensions, GalleryItem, ImageId};

    fn record(id: &str, status: PostStatus, width: u32, height: u32) -> ImageRecord {
        ImageRecord {
            id: ImageId::new(id),
            title: format!("Photo {id}"),
            url: format!("/img/{id}.jpg"),
            permalink: Some(format!("/post/{id}")),
            parent_status: status,
            aspect_hint: None,
            natural: Some(Dimensions { width, height }),
        }
    }

    fn items(records: &[&ImageRecord]) -> Vec<GalleryItem> {
        records
            .iter()
            .map(|r| GalleryItem::new(r.id.clone(), aspect::resolve(*r)))
            .collect()
    }

    // =========================================================================
    // Container
    // =========================================================================

    #[test]
    fn empty_selection_renders_message() {
        let html = render_gallery(&GalleryConfig::default(), &[], None, false).into_string();
        assert_eq!(
            html,
            "<div class=\"ap-gallery ap-gallery--empty\">No images found for this category.</div>"
        );
    }

    #[test]
    fn tiled_container_carries_tuning() {
        let a = record("1", PostStatus::Publish, 300, 200);
        let html = render_gallery(&GalleryConfig::default(), &[&a], None, false).into_string();
        assert!(html.contains("class=\"ap-gallery ap-gallery--tiled\""));
        assert!(html.contains("style=\"--ap-gap:8px;\""));
        assert!(html.contains("data-row-height=\"220\""));
        assert!(html.contains("data-tolerance=\"0.25\""));
        assert!(html.contains("data-pano-threshold=\"2.6\""));
        assert!(html.contains("data-last-row=\"left\""));
        assert!(!html.contains("data-min-col"));
    }

    #[test]
    fn collage_without_crop_adds_nocrop_class() {
        let mut config = GalleryConfig {
            layout: "collage".into(),
            background: "#000".into(),
            v_gutter: Some(3),
            ..Default::default()
        };
        config.collage.crop = false;
        let a = record("1", PostStatus::Publish, 300, 200);
        let html = render_gallery(&config, &[&a], None, false).into_string();
        assert!(html.contains("class=\"ap-gallery ap-gallery--collage ap--nocrop\""));
        assert!(html.contains("--ap-vgap:3px;"));
        assert!(html.contains("--ap-cols:6; --ap-row:12px;--ap-bg:#000;"));
        assert!(html.contains("data-feature-every=\"5\""));
        assert!(!html.contains("data-row-height"));
    }

    #[test]
    fn grid_and_masonry_use_per_row() {
        let a = record("1", PostStatus::Publish, 300, 200);
        let grid = GalleryConfig {
            layout: "grid".into(),
            per_row: 4,
            ..Default::default()
        };
        let html = render_gallery(&grid, &[&a], None, false).into_string();
        assert!(html.contains("--ap-grid-cols: repeat(4, 1fr);"));

        let masonry = GalleryConfig {
            layout: "masonry".into(),
            ..Default::default()
        };
        let html = render_gallery(&masonry, &[&a], None, false).into_string();
        assert!(html.contains("--ap-columns: 3;"));
    }

    // =========================================================================
    // Items
    // =========================================================================

    #[test]
    fn published_item_is_linked() {
        let a = record("1", PostStatus::Publish, 300, 200);
        let html = render_gallery(&GalleryConfig::default(), &[&a], None, false).into_string();
        assert!(html.contains("data-aspect=\"1.5\""));
        assert!(html.contains("href=\"/post/1\""));
        assert!(html.contains("width=\"300\""));
    }

    #[test]
    fn draft_item_unlinked_for_visitors() {
        let a = record("1", PostStatus::Draft, 300, 200);
        let visitor = render_gallery(&GalleryConfig::default(), &[&a], None, false).into_string();
        assert!(!visitor.contains("ap-gallery__link"));
        let editor = render_gallery(&GalleryConfig::default(), &[&a], None, true).into_string();
        assert!(editor.contains("ap-gallery__link"));
    }

    #[test]
    fn click_menu_entries_follow_link_rule() {
        let config = GalleryConfig {
            click_menu: true,
            ..Default::default()
        };
        let draft = record("2", PostStatus::Draft, 100, 100);
        let html = render_gallery(&config, &[&draft], None, false).into_string();
        assert!(html.contains("ap-gallery__menu-toggle"));
        assert!(html.contains(">View image</a>"));
        assert!(!html.contains("Read post about the image"));

        let html = render_gallery(&config, &[&draft], None, true).into_string();
        assert!(html.contains(">Read post about the image</a>"));
    }

    #[test]
    fn justified_geometry_is_inlined() {
        let records: Vec<ImageRecord> = (0..7)
            .map(|i| record(&i.to_string(), PostStatus::Publish, 300, 200))
            .collect();
        let refs: Vec<&ImageRecord> = records.iter().collect();
        let layout = GalleryLayout::Justified(layout::justified::pack(
            &items(&refs),
            900,
            &JustifiedParams::default(),
        ));
        let html =
            render_gallery(&GalleryConfig::default(), &refs, Some(&layout), false).into_string();
        assert!(html.contains("style=\"width:295px;height:196px;\""));
        assert!(html.contains("style=\"width:294px;height:196px;\""));
    }

    #[test]
    fn metro_geometry_is_inlined() {
        let config = GalleryConfig {
            layout: "collage".into(),
            ..Default::default()
        };
        let a = record("1", PostStatus::Publish, 100, 100);
        let tiles = layout::metro::place(&items(&[&a]), 1200, &MetroParams::default());
        let layout = GalleryLayout::Metro { tiles };
        let html = render_gallery(&config, &[&a], Some(&layout), false).into_string();
        assert!(html.contains("style=\"grid-column:span 2;grid-row:span 20;height:392px;\""));
    }

    #[test]
    fn uncropped_metro_rows_are_automatic() {
        let tile = MetroTile {
            index: 0,
            feature: false,
            column_span: 3,
            row_span: None,
            height: None,
        };
        assert_eq!(
            metro_style(&tile),
            "grid-column:span 3;grid-row:auto;height:auto;"
        );
    }

    #[test]
    fn titles_are_escaped() {
        let mut a = record("1", PostStatus::Publish, 300, 200);
        a.title = "<b>bold</b>".into();
        let html = render_gallery(&GalleryConfig::default(), &[&a], None, false).into_string();
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn manifest_records_render_end_to_end() {
        let source = sample_manifest();
        let ids = source.image_ids(&GalleryConfig::default().content_query());
        let records: Vec<&ImageRecord> = ids.iter().filter_map(|id| source.image(id)).collect();
        let html = render_gallery(&GalleryConfig::default(), &records, None, false).into_string();
        assert_eq!(html.matches("<figure").count(), 2);
        assert!(html.contains("href=\"/tokyo\""));
        assert!(html.contains("data-aspect=\"3\""));
    }

    // =========================================================================
    // Page
    // =========================================================================

    #[test]
    fn page_includes_doctype_and_stylesheet() {
        let page = render_page("Preview", html! { p { "x" } }).into_string();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Preview</title>"));
        assert!(page.contains(".ap-gallery--tiled"));
    }

    #[test]
    fn format_number_trims_zeros() {
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(16.0 / 9.0), "1.7778");
    }
}
