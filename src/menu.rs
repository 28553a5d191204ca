//! Click menu: which entries an image offers, and which menu is open.
//!
//! A page holds at most one open menu across all of its galleries. Opening a
//! menu closes any other; clicking the open menu's toggle again, clicking
//! outside, or re-laying out the page closes it.
//!
//! The link rule is shared with [`crate::render`]: an image links to its
//! content item when that item is published or the viewer is logged in.

use crate::source::{ImageRecord, PostStatus};
use crate::types::{GalleryId, ImageId};
use serde::Serialize;

/// The image whose menu is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuTarget {
    pub gallery: GalleryId,
    pub item: ImageId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub label: &'static str,
    pub href: String,
    /// Opens in a new tab.
    pub external: bool,
}

pub const VIEW_IMAGE: &str = "View image";
pub const READ_POST: &str = "Read post about the image";

/// Whether `record` links to its content item for this viewer.
pub fn is_linkable(record: &ImageRecord, logged_in: bool) -> bool {
    record.parent_status == PostStatus::Publish || logged_in
}

/// Link target for an image: its content item, or the file itself for orphans.
pub fn link_target(record: &ImageRecord) -> &str {
    record.permalink.as_deref().unwrap_or(&record.url)
}

/// Entries offered by the menu on `record`.
pub fn menu_entries(record: &ImageRecord, logged_in: bool) -> Vec<MenuEntry> {
    let mut entries = vec![MenuEntry {
        label: VIEW_IMAGE,
        href: record.url.clone(),
        external: true,
    }];
    if is_linkable(record, logged_in) {
        entries.push(MenuEntry {
            label: READ_POST,
            href: link_target(record).to_string(),
            external: false,
        });
    }
    entries
}

/// The page-wide open-menu state.
#[derive(Debug, Default)]
pub struct MenuController {
    open: Option<MenuTarget>,
}

impl MenuController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a click on an item's toggle. Returns whether a menu is now open.
    pub fn toggle(&mut self, gallery: GalleryId, item: ImageId) -> bool {
        let target = MenuTarget { gallery, item };
        if self.open.as_ref() == Some(&target) {
            self.open = None;
        } else {
            self.open = Some(target);
        }
        self.open.is_some()
    }

    /// Close whatever is open. Returns the menu that was closed.
    pub fn dismiss(&mut self) -> Option<MenuTarget> {
        self.open.take()
    }

    pub fn is_open(&self, gallery: GalleryId, item: &ImageId) -> bool {
        self.open
            .as_ref()
            .is_some_and(|t| t.gallery == gallery && &t.item == item)
    }

    pub fn current(&self) -> Option<&MenuTarget> {
        self.open.as_ref()
    }
}
