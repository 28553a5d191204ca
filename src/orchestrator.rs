//! Layout orchestration across every gallery on a page.
//!
//! Each registered gallery moves through a small state machine:
//!
//! ```text
//! Unmeasured ──(width known)──▶ LaidOut{width} ──(resize settles)──▶ LaidOut{width'}
//!      ▲                                                                   │
//!      └───────────────────────(width lost)────────────────────────────────┘
//! ```
//!
//! A sweep measures every gallery through the [`Surface`], computes the new
//! geometry in parallel (galleries share no mutable state) and applies it
//! back sequentially. Galleries whose width did not change are skipped;
//! galleries without a width stay unmeasured and are retried next sweep.
//!
//! ## Resize debouncing
//!
//! Resize events arm a [`Debounce`]; each new event pushes the deadline out.
//! Once the quiet period passes without another event, [`Orchestrator::tick`]
//! runs exactly one sweep and closes any open click menu. Hosts without their
//! own event loop can use [`ResizeWatcher`], which does the same on a
//! background thread.

use crate::layout::{self, GalleryLayout, JustifiedParams, MetroParams};
use crate::menu::MenuController;
use crate::types::{GalleryId, GalleryItem, Variant};
use rayon::prelude::*;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Presentation layer seam: where widths come from and geometry goes.
pub trait Surface {
    /// Current inner width of the gallery's container, `None` when hidden
    /// or not yet attached.
    fn container_width(&self, gallery: GalleryId) -> Option<u32>;

    /// Replace all geometry of `gallery` with `layout`.
    fn apply(&mut self, gallery: GalleryId, layout: &GalleryLayout);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    Unmeasured,
    LaidOut { width: u32 },
}

/// One gallery instance and its tuning.
#[derive(Debug, Clone)]
pub struct Gallery {
    pub id: GalleryId,
    pub variant: Variant,
    pub items: Vec<GalleryItem>,
    pub justified: JustifiedParams,
    pub metro: MetroParams,
    state: LayoutState,
}

impl Gallery {
    pub fn new(id: GalleryId, variant: Variant, items: Vec<GalleryItem>) -> Self {
        Self {
            id,
            variant,
            items,
            justified: JustifiedParams::default(),
            metro: MetroParams::default(),
            state: LayoutState::Unmeasured,
        }
    }

    pub fn with_params(mut self, justified: JustifiedParams, metro: MetroParams) -> Self {
        self.justified = justified;
        self.metro = metro;
        self
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }
}

/// What one sweep did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub laid_out: Vec<GalleryId>,
    pub no_width: Vec<GalleryId>,
    pub unchanged: Vec<GalleryId>,
    pub not_algorithmic: Vec<GalleryId>,
}

/// Trailing-edge debounce driven by caller-supplied instants.
#[derive(Debug, Clone)]
pub struct Debounce {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Record an event at `now`, superseding any pending one.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// Whether the quiet period has elapsed. Fires at most once per burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }
}

pub struct Orchestrator<S: Surface> {
    surface: S,
    menu: MenuController,
    galleries: Vec<Gallery>,
    resize: Debounce,
}

impl<S: Surface> Orchestrator<S> {
    pub fn new(surface: S, menu: MenuController, quiet: Duration) -> Self {
        Self {
            surface,
            menu,
            galleries: Vec::new(),
            resize: Debounce::new(quiet),
        }
    }

    /// Add a gallery and lay it out right away if its width is known.
    pub fn register(&mut self, gallery: Gallery) -> LayoutState {
        let id = gallery.id;
        self.galleries.retain(|g| g.id != id);
        self.galleries.push(gallery);
        let width = self.surface.container_width(id);
        let Some(gallery) = self.galleries.last_mut() else {
            return LayoutState::Unmeasured;
        };
        if let Some(layout) = measure_and_compute(gallery, width) {
            self.surface.apply(id, &layout);
        }
        gallery.state
    }

    /// Re-measure and re-lay out every gallery.
    pub fn layout_all(&mut self) -> SweepReport {
        let mut report = SweepReport::default();

        let mut pending = Vec::new();
        for (slot, gallery) in self.galleries.iter_mut().enumerate() {
            if !gallery.variant.is_algorithmic() {
                report.not_algorithmic.push(gallery.id);
                continue;
            }
            match self.surface.container_width(gallery.id).filter(|&w| w > 0) {
                None => {
                    gallery.state = LayoutState::Unmeasured;
                    report.no_width.push(gallery.id);
                }
                Some(width) if gallery.state == (LayoutState::LaidOut { width }) => {
                    report.unchanged.push(gallery.id);
                }
                Some(width) => pending.push((slot, width)),
            }
        }

        let galleries = &self.galleries;
        let computed: Vec<(usize, u32, Option<GalleryLayout>)> = pending
            .par_iter()
            .map(|&(slot, width)| {
                let g = &galleries[slot];
                let layout = layout::compute(g.variant, &g.items, width, &g.justified, &g.metro);
                (slot, width, layout)
            })
            .collect();

        for (slot, width, layout) in computed {
            let gallery = &mut self.galleries[slot];
            if let Some(layout) = layout {
                self.surface.apply(gallery.id, &layout);
                gallery.state = LayoutState::LaidOut { width };
                report.laid_out.push(gallery.id);
            }
        }

        log::debug!(
            "sweep: {} laid out, {} without width, {} unchanged, {} css-only",
            report.laid_out.len(),
            report.no_width.len(),
            report.unchanged.len(),
            report.not_algorithmic.len()
        );
        report
    }

    pub fn on_resize(&mut self, now: Instant) {
        self.resize.trigger(now);
    }

    /// Run the pending resize sweep once the quiet period has passed.
    pub fn tick(&mut self, now: Instant) -> Option<SweepReport> {
        if !self.resize.poll(now) {
            return None;
        }
        if let Some(closed) = self.menu.dismiss() {
            log::debug!(
                "resize closed menu on {} in {}",
                closed.item,
                closed.gallery
            );
        }
        Some(self.layout_all())
    }

    pub fn resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    pub fn gallery(&self, id: GalleryId) -> Option<&Gallery> {
        self.galleries.iter().find(|g| g.id == id)
    }

    pub fn galleries(&self) -> &[Gallery] {
        &self.galleries
    }

    pub fn menu(&self) -> &MenuController {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut MenuController {
        &mut self.menu
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

/// Compute a gallery's layout for `width`, updating its state.
fn measure_and_compute(gallery: &mut Gallery, width: Option<u32>) -> Option<GalleryLayout> {
    let Some(width) = width.filter(|&w| w > 0) else {
        gallery.state = LayoutState::Unmeasured;
        return None;
    };
    let layout = layout::compute(
        gallery.variant,
        &gallery.items,
        width,
        &gallery.justified,
        &gallery.metro,
    )?;
    gallery.state = LayoutState::LaidOut { width };
    Some(layout)
}

// ============================================================================
// Background resize watcher
// ============================================================================

/// Runs a callback once resize notifications have been quiet for a while.
///
/// Dropping the watcher stops its thread; a pass that has not fired yet is
/// dropped with it.
pub struct ResizeWatcher {
    tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ResizeWatcher {
    pub fn spawn<F>(quiet: Duration, mut on_settled: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            // Wait for the first event of a burst, then for silence.
            while rx.recv().is_ok() {
                loop {
                    match rx.recv_timeout(quiet) {
                        Ok(()) => continue,
                        Err(RecvTimeoutError::Timeout) => {
                            on_settled();
                            break;
                        }
                        Err(RecvTimeoutError::Disconnected) => return,
                    }
                }
            }
        });
        Self {
            tx: Some(tx),
            handle: Some(handle),
        }
    }

    /// Report a resize event.
    pub fn notify(&self) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(());
        }
    }
}

impl Drop for ResizeWatcher {
    fn drop(&mut self) {
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
