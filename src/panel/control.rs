//! Preview control
//!
//! Owns the panel's children and rebuilds them from scratch on every
//! preview. Read failures end up as a banner; nothing is returned to or
//! raised at the host.

use ratatui::layout::Rect;

use super::banner::WarningBanner;
use super::surface::{detached, BackendFactory, RenderSurface};
use super::PanelChild;
use crate::classify::Classifier;
use crate::stream::{read_all, ReadLimits, ReadStream};

/// Width used when the host has not sized the control yet
pub const DEFAULT_WIDTH: u16 = 80;

/// Height used when the host has not sized the control yet
pub const DEFAULT_HEIGHT: u16 = 24;

/// Result of the last preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// No preview yet, or unloaded
    Empty,
    /// Surface shown, nothing flagged
    Rendered,
    /// Surface shown below a warning banner
    Blocked,
    /// Reading failed; banner only
    Failed,
}

/// Construction options for [`PreviewControl`]
#[derive(Debug, Clone)]
pub struct ControlOptions {
    pub limits: ReadLimits,
    pub classifier: Classifier,
    pub width: u16,
    pub height: u16,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            limits: ReadLimits::default(),
            classifier: Classifier::standard().clone(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Areas assigned to the panel's children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelLayout {
    pub banner: Option<Rect>,
    pub surface: Option<Rect>,
}

/// Composable preview panel
pub struct PreviewControl {
    children: Vec<PanelChild>,
    width: u16,
    height: u16,
    limits: ReadLimits,
    classifier: Classifier,
    backends: Box<dyn BackendFactory>,
    outcome: PreviewOutcome,
}

impl PreviewControl {
    pub fn new() -> Self {
        Self::with_options(ControlOptions::default())
    }

    pub fn with_options(options: ControlOptions) -> Self {
        Self {
            children: Vec::new(),
            width: options.width,
            height: options.height,
            limits: options.limits,
            classifier: options.classifier,
            backends: Box::new(detached),
            outcome: PreviewOutcome::Empty,
        }
    }

    /// Use `factory` for the render surfaces of later previews
    pub fn with_backend(mut self, factory: impl BackendFactory + 'static) -> Self {
        self.backends = Box::new(factory);
        self
    }

    /// Replace the panel's contents with a preview of `stream`
    pub fn do_preview<S: ReadStream + ?Sized>(&mut self, stream: &mut S) {
        self.clear();

        let document = match read_all(stream, self.limits) {
            Ok(document) => document,
            Err(e) => {
                log::warn!("preview failed: {}", e);
                self.children
                    .push(PanelChild::Banner(WarningBanner::read_failure(&e, self.width)));
                self.outcome = PreviewOutcome::Failed;
                return;
            }
        };

        let blocked = self.classifier.contains_blocked_bytes(&document);
        if blocked {
            self.children
                .push(PanelChild::Banner(WarningBanner::blocked(self.width)));
        }
        log::info!(
            "previewing {} bytes (blocked elements: {})",
            document.len(),
            blocked
        );

        let surface = RenderSurface::open(self.backends.create(), document);
        self.children.push(PanelChild::Surface(surface));
        self.outcome = if blocked {
            PreviewOutcome::Blocked
        } else {
            PreviewOutcome::Rendered
        };
    }

    /// Drop all children and release their resources
    pub fn unload(&mut self) {
        self.clear();
        log::debug!("preview unloaded");
    }

    fn clear(&mut self) {
        // Dropping a surface releases its backend
        self.children.clear();
        self.outcome = PreviewOutcome::Empty;
    }

    pub fn children(&self) -> &[PanelChild] {
        &self.children
    }

    pub fn banner(&self) -> Option<&WarningBanner> {
        self.children.iter().find_map(PanelChild::as_banner)
    }

    pub fn surface(&self) -> Option<&RenderSurface> {
        self.children.iter().find_map(PanelChild::as_surface)
    }

    pub fn outcome(&self) -> PreviewOutcome {
        self.outcome
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the control; the banner follows immediately
    pub fn set_width(&mut self, width: u16) {
        self.width = width;
        for child in &mut self.children {
            if let PanelChild::Banner(banner) = child {
                banner.set_width(width);
            }
        }
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.height = height;
        self.set_width(width);
    }

    /// Banner on top at its own height, surface filling the rest
    pub fn layout(&self, area: Rect) -> PanelLayout {
        let mut remaining = area;
        let mut layout = PanelLayout::default();

        for child in &self.children {
            match child {
                PanelChild::Banner(banner) => {
                    let h = banner.height().min(remaining.height);
                    layout.banner = Some(Rect::new(remaining.x, remaining.y, remaining.width, h));
                    remaining.y += h;
                    remaining.height -= h;
                }
                PanelChild::Surface(_) => layout.surface = Some(remaining),
            }
        }

        layout
    }
}

impl Default for PreviewControl {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Rule, RuleSet};
    use crate::panel::{Dock, SurfaceBackend, SurfaceSettings};
    use crate::stream::MemoryStream;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counting {
        released: Rc<Cell<usize>>,
    }

    impl SurfaceBackend for Counting {
        fn load_document(&mut self, _settings: &SurfaceSettings, _document: &[u8]) {}

        fn release(&mut self) {
            self.released.set(self.released.get() + 1);
        }
    }

    fn counting_control() -> (PreviewControl, Rc<Cell<usize>>, Rc<Cell<usize>>) {
        let created = Rc::new(Cell::new(0));
        let released = Rc::new(Cell::new(0));
        let (c, r) = (created.clone(), released.clone());
        let control = PreviewControl::new().with_backend(move || {
            c.set(c.get() + 1);
            Box::new(Counting {
                released: r.clone(),
            }) as Box<dyn SurfaceBackend>
        });
        (control, created, released)
    }

    #[test]
    fn test_new_control_is_empty() {
        let control = PreviewControl::new();
        assert!(control.children().is_empty());
        assert_eq!(control.outcome(), PreviewOutcome::Empty);
        assert_eq!(control.width(), DEFAULT_WIDTH);
    }

    #[test]
    fn test_outcomes() {
        let mut control = PreviewControl::new();

        control.do_preview(&mut MemoryStream::new("<svg></svg>"));
        assert_eq!(control.outcome(), PreviewOutcome::Rendered);

        control.do_preview(&mut MemoryStream::new("<svg><script/></svg>"));
        assert_eq!(control.outcome(), PreviewOutcome::Blocked);

        control.do_preview(&mut MemoryStream::failing("gone"));
        assert_eq!(control.outcome(), PreviewOutcome::Failed);

        control.unload();
        assert_eq!(control.outcome(), PreviewOutcome::Empty);
        assert!(control.children().is_empty());
    }

    #[test]
    fn test_previous_surface_released_on_repreview() {
        let (mut control, created, released) = counting_control();

        control.do_preview(&mut MemoryStream::new("<svg/>"));
        assert_eq!((created.get(), released.get()), (1, 0));

        control.do_preview(&mut MemoryStream::new("<svg><circle/></svg>"));
        assert_eq!((created.get(), released.get()), (2, 1));

        control.do_preview(&mut MemoryStream::failing("gone"));
        assert_eq!((created.get(), released.get()), (2, 2));
    }

    #[test]
    fn test_unload_and_drop_release() {
        let (mut control, _, released) = counting_control();
        control.do_preview(&mut MemoryStream::new("<svg/>"));
        control.unload();
        assert_eq!(released.get(), 1);

        control.do_preview(&mut MemoryStream::new("<svg/>"));
        drop(control);
        assert_eq!(released.get(), 2);
    }

    #[test]
    fn test_no_backend_created_on_read_failure() {
        let (mut control, created, _) = counting_control();
        control.do_preview(&mut MemoryStream::failing("gone"));
        assert_eq!(created.get(), 0);
        assert!(control.surface().is_none());
    }

    #[test]
    fn test_size_cap_produces_failure_banner() {
        let mut control = PreviewControl::with_options(ControlOptions {
            limits: ReadLimits {
                chunk_size: 8,
                max_bytes: Some(16),
            },
            ..ControlOptions::default()
        });
        control.do_preview(&mut MemoryStream::new(vec![b' '; 64]));
        assert_eq!(control.children().len(), 1);
        assert!(control.banner().unwrap().text().contains("too large"));
    }

    #[test]
    fn test_custom_classifier() {
        let classifier = Classifier::new(&RuleSet::empty().with(Rule::element("use"))).unwrap();
        let mut control = PreviewControl::with_options(ControlOptions {
            classifier,
            ..ControlOptions::default()
        });

        control.do_preview(&mut MemoryStream::new("<svg><script/></svg>"));
        assert_eq!(control.children().len(), 1);

        control.do_preview(&mut MemoryStream::new(r##"<svg><use href="#a"/></svg>"##));
        assert_eq!(control.children().len(), 2);
    }

    #[test]
    fn test_banner_tracks_width_and_set_size() {
        let mut control = PreviewControl::new();
        control.do_preview(&mut MemoryStream::new("<svg><script/></svg>"));
        control.set_size(120, 40);
        assert_eq!(control.banner().unwrap().width(), 120);
        assert_eq!(control.height(), 40);
        control.set_width(30);
        assert_eq!(control.banner().unwrap().width(), 30);
    }

    #[test]
    fn test_width_change_without_banner() {
        let mut control = PreviewControl::new();
        control.do_preview(&mut MemoryStream::new("<svg/>"));
        control.set_width(10);
        assert_eq!(control.width(), 10);
        assert!(control.banner().is_none());
    }

    #[test]
    fn test_layout_stacks_banner_above_surface() {
        let mut control = PreviewControl::new();
        control.do_preview(&mut MemoryStream::new("<svg><script/></svg>"));
        let area = Rect::new(0, 0, 80, 24);
        let h = control.banner().unwrap().height();

        let layout = control.layout(area);
        assert_eq!(layout.banner, Some(Rect::new(0, 0, 80, h)));
        assert_eq!(layout.surface, Some(Rect::new(0, h, 80, 24 - h)));
    }

    #[test]
    fn test_layout_surface_only_and_banner_only() {
        let mut control = PreviewControl::new();
        let area = Rect::new(2, 3, 40, 10);

        control.do_preview(&mut MemoryStream::new("<svg/>"));
        let layout = control.layout(area);
        assert_eq!(layout.banner, None);
        assert_eq!(layout.surface, Some(area));

        control.do_preview(&mut MemoryStream::failing("gone"));
        let layout = control.layout(area);
        assert!(layout.banner.is_some());
        assert_eq!(layout.surface, None);
    }

    #[test]
    fn test_layout_clamps_tall_banner() {
        let mut control = PreviewControl::new();
        control.set_width(4);
        control.do_preview(&mut MemoryStream::new("<svg><script/></svg>"));
        let layout = control.layout(Rect::new(0, 0, 4, 3));
        assert_eq!(layout.banner, Some(Rect::new(0, 0, 4, 3)));
        assert_eq!(layout.surface, Some(Rect::new(0, 3, 4, 0)));
        assert_eq!(control.children()[1].dock(), Dock::Fill);
    }
}
