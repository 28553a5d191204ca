use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tiled_gal::config::{self, GalleryConfig};
use tiled_gal::layout::GalleryLayout;
use tiled_gal::menu::MenuController;
use tiled_gal::orchestrator::{Gallery, Orchestrator, Surface};
use tiled_gal::source::{self, ContentSource, ImageRecord};
use tiled_gal::types::GalleryId;
use tiled_gal::{output, render, rotation};

/// Shared flags for commands that pick images.
#[derive(clap::Args, Clone)]
struct TimeArgs {
    /// Evaluate rotation at this instant (RFC 3339) instead of now
    #[arg(long, value_parser = parse_instant)]
    at: Option<DateTime<Utc>>,
}

impl TimeArgs {
    fn now(&self) -> DateTime<Utc> {
        self.at.unwrap_or_else(Utc::now)
    }
}

#[derive(Parser)]
#[command(name = "tiled-gal")]
#[command(about = "Responsive photo gallery layout")]
#[command(long_about = "\
Responsive photo gallery layout

Selects images from a category, optionally rotates the selection by hour or
day, and lays them out for a given container width as justified rows
(layout = \"tiled\") or a metro collage (layout = \"collage\").

Content sources:

  content/                         # Directory: folders are categories
  ├── config.toml                  # Gallery config (optional)
  ├── 010-Travel/
  │   ├── 010-Japan/               # Numbered = published
  │   │   ├── 001-tokyo.jpg        # Representative image (lowest number)
  │   │   └── 002-kyoto.jpg
  │   └── 020-Italy/
  │       └── 001-rome.jpg
  └── wip/                         # No number prefix = draft
      └── 001-test.jpg

  site.json                        # Manifest: categories, posts, attachments
  config.toml                      # Read from next to the manifest

Run 'tiled-gal gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory or JSON manifest
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Extra config file layered over the content config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Category to draw images from (overrides config)
    #[arg(long, global = true)]
    category: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the (rotated) image selection
    Select(TimeArgs),
    /// Print the geometry for a container width
    Layout {
        /// Container width in px
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        width: u32,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        time: TimeArgs,
    },
    /// Write a standalone HTML preview of the gallery
    Render {
        /// Container width in px
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        width: u32,
        /// Output HTML file
        #[arg(long, default_value = "gallery.html")]
        output: PathBuf,
        /// Render as a logged-in viewer (drafts are linked)
        #[arg(long)]
        logged_in: bool,
        #[command(flatten)]
        time: TimeArgs,
    },
    /// Load source and config, print the effective settings
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let mut gallery_config = config::load_config(&cli.source, cli.config.as_deref())?;
    if let Some(category) = &cli.category {
        gallery_config.category = category.clone();
        gallery_config = gallery_config.normalize();
    }
    init_thread_pool(&gallery_config.processing);
    let content = source::open(&cli.source)?;

    match &cli.command {
        Command::Select(time) => {
            let (selected, eligible) = select(content.as_ref(), &gallery_config, time.now());
            output::print_selection_output(&gallery_config, &selected, eligible);
        }
        Command::Layout { width, json, time } => {
            let (selected, _) = select(content.as_ref(), &gallery_config, time.now());
            let layout = lay_out(&gallery_config, &selected, *width);
            if *json {
                let ids: Vec<&str> = selected.iter().map(|r| r.id.as_str()).collect();
                let doc = serde_json::json!({
                    "variant": gallery_config.variant(),
                    "width": width,
                    "images": ids,
                    "layout": layout,
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                output::print_layout_output(
                    gallery_config.variant(),
                    *width,
                    &selected,
                    layout.as_ref(),
                );
            }
        }
        Command::Render {
            width,
            output: path,
            logged_in,
            time,
        } => {
            let (selected, _) = select(content.as_ref(), &gallery_config, time.now());
            let layout = lay_out(&gallery_config, &selected, *width);
            let gallery =
                render::render_gallery(&gallery_config, &selected, layout.as_ref(), *logged_in);
            let title = page_title(&gallery_config);
            let page = render::render_page(&title, gallery);
            std::fs::write(path, page.into_string())?;
            println!(
                "Rendered {} images at {}px → {}",
                selected.len(),
                width,
                path.display()
            );
        }
        Command::Check => {
            let eligible = content.image_ids(&gallery_config.content_query()).len();
            let label = source_label(&cli.source);
            output::print_check_output(
                &gallery_config,
                &label,
                eligible,
                config::effective_threads(&gallery_config.processing),
            );
        }
        // Printed before any content is loaded
        Command::GenConfig => {}
    }

    Ok(())
}

/// Eligible images for the configured gallery, rotated and capped.
fn select<'a>(
    content: &'a dyn ContentSource,
    config: &GalleryConfig,
    now: DateTime<Utc>,
) -> (Vec<&'a ImageRecord>, usize) {
    let eligible = content.image_ids(&config.content_query());
    let chosen = rotation::select(&eligible, &config.rotation_config(), now);
    let records = chosen.iter().filter_map(|id| content.image(id)).collect();
    (records, eligible.len())
}

/// A container of fixed width that keeps the last applied layout.
struct FixedWidth {
    width: u32,
    applied: Option<GalleryLayout>,
}

impl Surface for FixedWidth {
    fn container_width(&self, _gallery: GalleryId) -> Option<u32> {
        Some(self.width)
    }

    fn apply(&mut self, _gallery: GalleryId, layout: &GalleryLayout) {
        self.applied = Some(layout.clone());
    }
}

fn lay_out(config: &GalleryConfig, selected: &[&ImageRecord], width: u32) -> Option<GalleryLayout> {
    let surface = FixedWidth {
        width,
        applied: None,
    };
    let mut orchestrator = Orchestrator::new(surface, MenuController::new(), config.resize_quiet());
    let items = selected.iter().map(|r| r.to_item()).collect();
    let gallery = Gallery::new(GalleryId(0), config.variant(), items)
        .with_params(config.to_justified_params(), config.to_metro_params());
    orchestrator.register(gallery);
    orchestrator.surface_mut().applied.take()
}

fn page_title(config: &GalleryConfig) -> String {
    if config.category.is_empty() {
        "Gallery".to_string()
    } else {
        format!("Gallery: {}", config.category)
    }
}

fn source_label(path: &Path) -> String {
    let kind = if path.is_file() { "manifest" } else { "directory" };
    format!("{} ({kind})", path.display())
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp like 2026-10-15T09:30:00Z: {e}"))
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
