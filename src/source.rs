//! Content sources: where eligible images come from.
//!
//! A gallery is defined by a category, a status filter and a selection
//! mode. The [`ContentSource`] trait answers "which images, in what order"
//! and "what do we know about this image"; rotation, layout and rendering
//! only ever see the resulting ids and [`ImageRecord`]s.
//!
//! ## Manifest source
//!
//! [`ManifestSource`] reads a JSON export of categories, posts and their
//! attachments:
//!
//! ```json
//! {
//!   "categories":  [{ "slug": "travel" }, { "slug": "japan", "parent": "travel" }],
//!   "posts":       [{ "id": "10", "title": "Tokyo", "status": "publish",
//!                     "categories": ["japan"], "featured": "101", "permalink": "/tokyo" }],
//!   "attachments": [{ "id": "101", "parent": "10", "url": "/img/101.jpg",
//!                     "width": 1600, "height": 900, "menu_order": 0 }]
//! }
//! ```
//!
//! A category includes all of its descendants. In `post` mode each matching
//! post contributes its featured image, or failing that its first image
//! attachment; in `attachment` mode every image attached to a matching post
//! is eligible, ordered by `(menu_order, id)`.
//!
//! ## Directory source
//!
//! [`DirectorySource`] treats a content directory as the category tree:
//!
//! ```text
//! content/
//! ├── 010-Travel/
//! │   ├── 010-Japan/          # content item, published
//! │   │   ├── 001-tokyo.jpg   # representative image in post mode
//! │   │   └── 002-kyoto.jpg
//! │   └── 020-Italy/
//! │       └── 001-rome.jpg
//! └── wip/                    # unnumbered → draft
//!     └── 001-test.jpg
//! ```
//!
//! Categories are paths relative to the root (`travel/japan` and
//! `010-Travel/010-Japan` both work); the empty category is the whole tree.

use crate::aspect::{self, AspectSource};
use crate::naming::{self, EntryName};
use crate::types::{Dimensions, GalleryItem, ImageId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Manifest JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Representative image per content item, or every image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Post,
    Attachment,
}

impl SelectionMode {
    pub fn parse(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("attachment") {
            SelectionMode::Attachment
        } else {
            SelectionMode::Post
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SelectionMode::Post => "post",
            SelectionMode::Attachment => "attachment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Publish,
    Draft,
    Pending,
    Future,
    Private,
    /// `trash`, `inherit`, `auto-draft` and anything else: never shown.
    #[serde(other)]
    Other,
}

impl PostStatus {
    /// Statuses a gallery may draw from.
    pub fn visible(include_draft: bool) -> Vec<PostStatus> {
        if include_draft {
            vec![
                PostStatus::Publish,
                PostStatus::Draft,
                PostStatus::Pending,
                PostStatus::Future,
                PostStatus::Private,
            ]
        } else {
            vec![PostStatus::Publish]
        }
    }
}

/// What a gallery asks its source for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentQuery {
    /// Category slug or path; empty means everything.
    pub category: String,
    pub mode: SelectionMode,
    pub statuses: Vec<PostStatus>,
}

impl ContentQuery {
    pub fn new(category: impl Into<String>, mode: SelectionMode, include_draft: bool) -> Self {
        Self {
            category: category.into(),
            mode,
            statuses: PostStatus::visible(include_draft),
        }
    }
}

/// Everything the presentation layer needs to know about one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRecord {
    pub id: ImageId,
    pub title: String,
    /// URL of the image file itself.
    pub url: String,
    /// Page about the image, when it belongs to a content item.
    pub permalink: Option<String>,
    pub parent_status: PostStatus,
    pub aspect_hint: Option<f64>,
    pub natural: Option<Dimensions>,
}

impl ImageRecord {
    /// The layout input for this image, with its aspect ratio resolved.
    pub fn to_item(&self) -> GalleryItem {
        GalleryItem::new(self.id.clone(), aspect::resolve(self))
    }
}

impl AspectSource for ImageRecord {
    fn aspect_hint(&self) -> Option<f64> {
        self.aspect_hint
    }

    fn natural_size(&self) -> Option<Dimensions> {
        self.natural
    }
}

pub trait ContentSource {
    /// Eligible images for `query`, in gallery order. Unknown categories yield nothing.
    fn image_ids(&self, query: &ContentQuery) -> Vec<ImageId>;

    fn image(&self, id: &ImageId) -> Option<&ImageRecord>;
}

/// Open a content directory, or a `.json` manifest file.
pub fn open(path: &Path) -> Result<Box<dyn ContentSource>, SourceError> {
    if path.is_file() {
        Ok(Box::new(ManifestSource::load(path)?))
    } else {
        Ok(Box::new(DirectorySource::open(path)?))
    }
}

// ============================================================================
// Manifest source
// ============================================================================

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    categories: Vec<CategoryEntry>,
    #[serde(default)]
    posts: Vec<PostEntry>,
    #[serde(default)]
    attachments: Vec<AttachmentEntry>,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    slug: String,
    #[serde(default)]
    parent: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PostEntry {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    status: PostStatus,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    featured: Option<String>,
    #[serde(default)]
    permalink: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AttachmentEntry {
    id: String,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default = "default_mime")]
    mime: String,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    aspect: Option<f64>,
    #[serde(default)]
    menu_order: i64,
}

fn default_mime() -> String {
    "image/jpeg".to_string()
}

impl AttachmentEntry {
    fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

/// Content source backed by a JSON manifest.
#[derive(Debug)]
pub struct ManifestSource {
    children: HashMap<String, Vec<String>>,
    posts: Vec<PostEntry>,
    attachments: Vec<AttachmentEntry>,
    records: HashMap<ImageId, ImageRecord>,
}

impl ManifestSource {
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let manifest: Manifest = serde_json::from_str(json)?;
        Ok(Self::from_manifest(manifest))
    }

    fn from_manifest(manifest: Manifest) -> Self {
        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        for cat in &manifest.categories {
            if let Some(parent) = &cat.parent {
                children
                    .entry(parent.clone())
                    .or_default()
                    .push(cat.slug.clone());
            }
        }

        let posts_by_id: HashMap<&str, &PostEntry> =
            manifest.posts.iter().map(|p| (p.id.as_str(), p)).collect();

        let records = manifest
            .attachments
            .iter()
            .filter(|a| a.is_image())
            .map(|a| {
                let parent = a.parent.as_deref().and_then(|id| posts_by_id.get(id));
                let natural = match (a.width, a.height) {
                    (Some(width), Some(height)) => Some(Dimensions { width, height }),
                    _ => None,
                };
                let record = ImageRecord {
                    id: ImageId::new(a.id.clone()),
                    title: parent
                        .map(|p| p.title.clone())
                        .unwrap_or_else(|| a.title.clone()),
                    url: a.url.clone(),
                    permalink: parent.and_then(|p| p.permalink.clone()),
                    parent_status: parent.map(|p| p.status).unwrap_or_default(),
                    aspect_hint: a.aspect,
                    natural,
                };
                (record.id.clone(), record)
            })
            .collect();

        Self {
            children,
            posts: manifest.posts,
            attachments: manifest.attachments,
            records,
        }
    }

    /// The category itself and every category beneath it.
    fn category_tree(&self, slug: &str) -> HashSet<String> {
        let mut seen = HashSet::new();
        let mut stack = vec![slug.to_string()];
        while let Some(current) = stack.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            if let Some(kids) = self.children.get(&current) {
                stack.extend(kids.iter().cloned());
            }
        }
        seen
    }

    fn matching_posts(&self, query: &ContentQuery) -> Vec<&PostEntry> {
        let tree = (!query.category.is_empty()).then(|| self.category_tree(&query.category));
        self.posts
            .iter()
            .filter(|p| query.statuses.contains(&p.status))
            .filter(|p| match &tree {
                Some(tree) => p.categories.iter().any(|c| tree.contains(c)),
                None => true,
            })
            .collect()
    }

    /// Image attachments of the given posts, in `(menu_order, id)` order.
    fn image_attachments<'a>(&'a self, parents: &HashSet<&str>) -> Vec<&'a AttachmentEntry> {
        let mut found: Vec<&AttachmentEntry> = self
            .attachments
            .iter()
            .filter(|a| a.is_image())
            .filter(|a| a.parent.as_deref().is_some_and(|p| parents.contains(p)))
            .collect();
        found.sort_by(|a, b| {
            a.menu_order
                .cmp(&b.menu_order)
                .then_with(|| compare_ids(&a.id, &b.id))
        });
        found
    }
}

impl ContentSource for ManifestSource {
    fn image_ids(&self, query: &ContentQuery) -> Vec<ImageId> {
        let posts = self.matching_posts(query);
        log::debug!(
            "category '{}': {} matching posts",
            query.category,
            posts.len()
        );

        match query.mode {
            SelectionMode::Attachment => {
                let parents: HashSet<&str> = posts.iter().map(|p| p.id.as_str()).collect();
                self.image_attachments(&parents)
                    .into_iter()
                    .map(|a| ImageId::new(a.id.clone()))
                    .collect()
            }
            SelectionMode::Post => posts
                .iter()
                .filter_map(|post| {
                    let featured = post
                        .featured
                        .as_ref()
                        .map(|id| ImageId::new(id.clone()))
                        .filter(|id| self.records.contains_key(id));
                    featured.or_else(|| {
                        let parent = HashSet::from([post.id.as_str()]);
                        self.image_attachments(&parent)
                            .first()
                            .map(|a| ImageId::new(a.id.clone()))
                    })
                })
                .collect(),
        }
    }

    fn image(&self, id: &ImageId) -> Option<&ImageRecord> {
        self.records.get(id)
    }
}

/// Numeric ids compare numerically, anything else as text.
fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

// ============================================================================
// Directory source
// ============================================================================

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// A directory that directly holds images.
#[derive(Debug)]
struct Album {
    /// Path components relative to the content root.
    components: Vec<String>,
    status: PostStatus,
    images: Vec<ImageId>,
}

/// Content source backed by a directory tree of images.
#[derive(Debug)]
pub struct DirectorySource {
    root: PathBuf,
    albums: Vec<Album>,
    records: HashMap<ImageId, ImageRecord>,
}

impl DirectorySource {
    /// Walk `root` and measure every image found.
    ///
    /// Images whose size cannot be read stay eligible; their aspect ratio
    /// falls back at resolution time.
    pub fn open(root: &Path) -> Result<Self, SourceError> {
        let mut by_dir: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && is_image(entry.path()) {
                let dir = entry.path().parent().unwrap_or(root).to_path_buf();
                by_dir.entry(dir).or_default().push(entry.into_path());
            }
        }

        let mut albums = Vec::new();
        let mut records = HashMap::new();
        for (dir, mut files) in by_dir {
            let rel_dir = dir.strip_prefix(root).unwrap_or(&dir);
            let components = path_components(rel_dir);
            let status = if components.iter().all(|c| EntryName::parse(c).is_numbered()) {
                PostStatus::Publish
            } else {
                PostStatus::Draft
            };
            let title = components
                .last()
                .map(|c| EntryName::parse(c).display_title())
                .unwrap_or_default();

            files.sort_by(|a, b| naming::compare_entries(&file_stem(a), &file_stem(b)));
            let mut images = Vec::with_capacity(files.len());
            for file in files {
                let rel = path_components(file.strip_prefix(root).unwrap_or(&file)).join("/");
                let stem = EntryName::parse(&file_stem(&file));
                let record = ImageRecord {
                    id: ImageId::new(rel.clone()),
                    title: if stem.name.is_empty() {
                        title.clone()
                    } else {
                        stem.display_title()
                    },
                    url: rel,
                    permalink: (!components.is_empty())
                        .then(|| format!("{}/", components.join("/"))),
                    parent_status: status,
                    aspect_hint: None,
                    natural: measure(&file),
                };
                images.push(record.id.clone());
                records.insert(record.id.clone(), record);
            }
            albums.push(Album {
                components,
                status,
                images,
            });
        }

        albums.sort_by(|a, b| compare_paths(&a.components, &b.components));
        log::debug!(
            "scanned {}: {} albums, {} images",
            root.display(),
            albums.len(),
            records.len()
        );

        Ok(Self {
            root: root.to_path_buf(),
            albums,
            records,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentSource for DirectorySource {
    fn image_ids(&self, query: &ContentQuery) -> Vec<ImageId> {
        let wanted: Vec<&str> = query
            .category
            .split('/')
            .filter(|c| !c.is_empty())
            .collect();

        self.albums
            .iter()
            .filter(|album| query.statuses.contains(&album.status))
            .filter(|album| in_category(&album.components, &wanted))
            .flat_map(|album| match query.mode {
                SelectionMode::Post => album.images.iter().take(1),
                SelectionMode::Attachment => album.images.iter().take(album.images.len()),
            })
            .cloned()
            .collect()
    }

    fn image(&self, id: &ImageId) -> Option<&ImageRecord> {
        self.records.get(id)
    }
}

fn in_category(components: &[String], wanted: &[&str]) -> bool {
    components.len() >= wanted.len()
        && components
            .iter()
            .zip(wanted)
            .all(|(have, want)| EntryName::parse(have).matches_slug(have, want))
}

fn compare_paths(a: &[String], b: &[String]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        let ord = naming::compare_entries(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn path_components(path: &Path) -> Vec<String> {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect()
}

fn measure(path: &Path) -> Option<Dimensions> {
    match image::image_dimensions(path) {
        Ok((width, height)) => Some(Dimensions { width, height }),
        Err(e) => {
            log::warn!("cannot read size of {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn ids(list: &[ImageId]) -> Vec<&str> {
        list.iter().map(ImageId::as_str).collect()
    }

    // =========================================================================
    // ManifestSource
    // =========================================================================

    #[test]
    fn post_mode_uses_featured_images_of_published_posts() {
        let source = sample_manifest();
        let query = ContentQuery::new("travel", SelectionMode::Post, false);
        assert_eq!(ids(&source.image_ids(&query)), vec!["101", "121"]);
    }

    #[test]
    fn include_draft_adds_unpublished_posts() {
        let source = sample_manifest();
        let query = ContentQuery::new("travel", SelectionMode::Post, true);
        // Draft post 11 has no featured image: first attachment by menu_order
        assert_eq!(ids(&source.image_ids(&query)), vec!["101", "112", "121"]);
    }

    #[test]
    fn attachment_mode_lists_all_images_by_menu_order() {
        let source = sample_manifest();
        let query = ContentQuery::new("japan", SelectionMode::Attachment, true);
        assert_eq!(
            ids(&source.image_ids(&query)),
            vec!["101", "102", "112", "111"]
        );
    }

    #[test]
    fn category_includes_descendants_only() {
        let source = sample_manifest();
        let italy = ContentQuery::new("italy", SelectionMode::Post, false);
        assert_eq!(ids(&source.image_ids(&italy)), vec!["121"]);
    }

    #[test]
    fn non_image_attachments_are_ignored() {
        let source = sample_manifest();
        let query = ContentQuery::new("portraits", SelectionMode::Attachment, false);
        assert!(source.image_ids(&query).is_empty());
        let post_mode = ContentQuery::new("portraits", SelectionMode::Post, false);
        assert!(source.image_ids(&post_mode).is_empty());
    }

    #[test]
    fn unknown_category_is_empty() {
        let source = sample_manifest();
        let query = ContentQuery::new("nope", SelectionMode::Post, true);
        assert!(source.image_ids(&query).is_empty());
    }

    #[test]
    fn empty_category_means_everything() {
        let source = sample_manifest();
        let query = ContentQuery::new("", SelectionMode::Post, false);
        assert_eq!(ids(&source.image_ids(&query)), vec!["101", "121"]);
    }

    #[test]
    fn records_carry_parent_details() {
        let source = sample_manifest();
        let record = source.image(&ImageId::new("112")).unwrap();
        assert_eq!(record.title, "Kyoto");
        assert_eq!(record.parent_status, PostStatus::Draft);
        assert_eq!(record.permalink.as_deref(), Some("/kyoto"));
        assert_eq!(aspect::resolve(record), 1.0);
    }

    #[test]
    fn missing_dimensions_fall_back() {
        let source = sample_manifest();
        let record = source.image(&ImageId::new("111")).unwrap();
        assert_eq!(aspect::resolve(record), aspect::FALLBACK_ASPECT);
    }

    #[test]
    fn category_cycles_terminate() {
        let json = r#"{
            "categories": [{ "slug": "a", "parent": "b" }, { "slug": "b", "parent": "a" }],
            "posts": [{ "id": "1", "categories": ["b"], "featured": "9" }],
            "attachments": [{ "id": "9", "parent": "1" }]
        }"#;
        let source = ManifestSource::from_json(json).unwrap();
        let query = ContentQuery::new("a", SelectionMode::Post, false);
        assert_eq!(ids(&source.image_ids(&query)), vec!["9"]);
    }

    #[test]
    fn unknown_post_status_is_never_visible() {
        let json = r#"{
            "posts": [
                { "id": "1", "status": "trash", "featured": "10" },
                { "id": "2", "status": "auto-draft", "featured": "20" },
                { "id": "3", "featured": "30" }
            ],
            "attachments": [
                { "id": "10", "parent": "1", "url": "/10.jpg" },
                { "id": "20", "parent": "2", "url": "/20.jpg" },
                { "id": "30", "parent": "3", "url": "/30.jpg" }
            ]
        }"#;
        let source = ManifestSource::from_json(json).unwrap();
        let query = ContentQuery::new("", SelectionMode::Post, true);
        assert_eq!(ids(&source.image_ids(&query)), vec!["30"]);
        let trashed = source.image(&ImageId::new("10")).unwrap();
        assert_eq!(trashed.parent_status, PostStatus::Other);
        assert!(!crate::menu::is_linkable(trashed, false));
    }

    #[test]
    fn invalid_manifest_is_error() {
        assert!(matches!(
            ManifestSource::from_json("{ not json"),
            Err(SourceError::Json(_))
        ));
    }

    // =========================================================================
    // DirectorySource
    // =========================================================================

    fn write_png(path: &Path, width: u32, height: u32) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        image::RgbImage::new(width, height).save(path).unwrap();
    }

    fn content_tree() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write_png(&root.join("010-Travel/010-Japan/002-kyoto.png"), 30, 20);
        write_png(&root.join("010-Travel/010-Japan/001-tokyo.png"), 20, 40);
        write_png(&root.join("010-Travel/020-Italy/001-rome.png"), 60, 20);
        write_png(&root.join("wip/001-test.png"), 10, 10);
        fs::write(root.join("010-Travel/notes.txt"), "not an image").unwrap();
        tmp
    }

    #[test]
    fn directory_post_mode_takes_first_image_per_album() {
        let tmp = content_tree();
        let source = DirectorySource::open(tmp.path()).unwrap();
        let query = ContentQuery::new("travel", SelectionMode::Post, false);
        assert_eq!(
            ids(&source.image_ids(&query)),
            vec!["010-Travel/010-Japan/001-tokyo.png", "010-Travel/020-Italy/001-rome.png"]
        );
    }

    #[test]
    fn directory_attachment_mode_orders_by_number() {
        let tmp = content_tree();
        let source = DirectorySource::open(tmp.path()).unwrap();
        let query = ContentQuery::new("010-Travel/japan", SelectionMode::Attachment, false);
        assert_eq!(
            ids(&source.image_ids(&query)),
            vec!["010-Travel/010-Japan/001-tokyo.png", "010-Travel/010-Japan/002-kyoto.png"]
        );
    }

    #[test]
    fn unnumbered_directories_are_drafts() {
        let tmp = content_tree();
        let source = DirectorySource::open(tmp.path()).unwrap();
        let published = ContentQuery::new("", SelectionMode::Post, false);
        assert_eq!(source.image_ids(&published).len(), 2);
        let everything = ContentQuery::new("", SelectionMode::Post, true);
        assert_eq!(source.image_ids(&everything).len(), 3);
    }

    #[test]
    fn directory_records_are_measured() {
        let tmp = content_tree();
        let source = DirectorySource::open(tmp.path()).unwrap();
        let record = source
            .image(&ImageId::new("010-Travel/020-Italy/001-rome.png"))
            .unwrap();
        assert_eq!(record.title, "rome");
        assert_eq!(
            record.natural,
            Some(Dimensions {
                width: 60,
                height: 20
            })
        );
        assert_eq!(aspect::resolve(record), 3.0);
        assert_eq!(record.permalink.as_deref(), Some("010-Travel/020-Italy/"));
    }

    #[test]
    fn unreadable_image_stays_eligible_without_size() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("001-Broken");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("001-bad.jpg"), b"not really a jpeg").unwrap();
        let source = DirectorySource::open(tmp.path()).unwrap();
        let query = ContentQuery::new("", SelectionMode::Post, false);
        let found = source.image_ids(&query);
        assert_eq!(found.len(), 1);
        let record = source.image(&found[0]).unwrap();
        assert_eq!(record.natural, None);
        assert_eq!(aspect::resolve(record), aspect::FALLBACK_ASPECT);
    }
}
