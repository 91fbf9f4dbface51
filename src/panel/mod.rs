//! Preview panel: warning banner, render surface and the control that owns them

pub mod banner;
pub mod control;
pub mod surface;

pub use banner::{WarningBanner, BLOCKED_MESSAGE, CAUTION_COLOR, READ_FAILURE_MESSAGE};
pub use control::{ControlOptions, PanelLayout, PreviewControl, PreviewOutcome};
pub use surface::{
    detached, BackendFactory, DetachedBackend, RenderSurface, SurfaceBackend, SurfaceSettings,
};

/// Edge a child is docked to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dock {
    Top,
    Fill,
}

/// Scrollbar policy of a text child
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBars {
    None,
    Both,
}

/// Border drawn around a child
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    None,
    Plain,
}

/// A child of the preview panel
#[derive(Debug)]
pub enum PanelChild {
    Banner(WarningBanner),
    Surface(RenderSurface),
}

impl PanelChild {
    pub fn as_banner(&self) -> Option<&WarningBanner> {
        match self {
            Self::Banner(banner) => Some(banner),
            Self::Surface(_) => None,
        }
    }

    pub fn as_surface(&self) -> Option<&RenderSurface> {
        match self {
            Self::Surface(surface) => Some(surface),
            Self::Banner(_) => None,
        }
    }

    pub fn is_banner(&self) -> bool {
        matches!(self, Self::Banner(_))
    }

    pub fn is_surface(&self) -> bool {
        matches!(self, Self::Surface(_))
    }

    pub fn dock(&self) -> Dock {
        match self {
            Self::Banner(banner) => banner.dock(),
            Self::Surface(surface) => surface.dock(),
        }
    }
}
