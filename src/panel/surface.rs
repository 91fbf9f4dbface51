//! Isolated render surface
//!
//! The rendering engine itself is opaque: a [`SurfaceBackend`] receives the
//! locked-down settings and the raw document and owns whatever native
//! resources it needs. The surface releases the backend exactly once, when
//! it is dropped.

use std::borrow::Cow;
use std::fmt;

use super::Dock;
use crate::classify::decode_text;

/// Rendering configuration applied to every surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSettings {
    context_menu_enabled: bool,
    script_errors_suppressed: bool,
    allow_navigation: bool,
    scrollbars_enabled: bool,
}

impl SurfaceSettings {
    /// The only configuration untrusted content is shown with
    pub const fn locked() -> Self {
        Self {
            context_menu_enabled: false,
            script_errors_suppressed: true,
            allow_navigation: false,
            scrollbars_enabled: true,
        }
    }

    pub fn context_menu_enabled(&self) -> bool {
        self.context_menu_enabled
    }

    pub fn script_errors_suppressed(&self) -> bool {
        self.script_errors_suppressed
    }

    pub fn allow_navigation(&self) -> bool {
        self.allow_navigation
    }

    pub fn scrollbars_enabled(&self) -> bool {
        self.scrollbars_enabled
    }
}

/// Embeddable view that actually draws the document
pub trait SurfaceBackend {
    /// Show `document` using `settings`
    fn load_document(&mut self, settings: &SurfaceSettings, document: &[u8]);

    /// Free native resources. Called once, when the owning surface drops.
    fn release(&mut self) {}
}

/// Creates a fresh backend for every preview
pub trait BackendFactory {
    fn create(&mut self) -> Box<dyn SurfaceBackend>;
}

impl<F> BackendFactory for F
where
    F: FnMut() -> Box<dyn SurfaceBackend>,
{
    fn create(&mut self) -> Box<dyn SurfaceBackend> {
        self()
    }
}

/// Backend with no native view; hosts draw from [`RenderSurface::document`]
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedBackend;

impl SurfaceBackend for DetachedBackend {
    fn load_document(&mut self, _settings: &SurfaceSettings, _document: &[u8]) {}
}

/// Factory producing [`DetachedBackend`]s
pub fn detached() -> Box<dyn SurfaceBackend> {
    Box::new(DetachedBackend)
}

/// Script-suppressed, navigation-locked view filling the rest of the panel
pub struct RenderSurface {
    settings: SurfaceSettings,
    document: Vec<u8>,
    backend: Option<Box<dyn SurfaceBackend>>,
}

impl RenderSurface {
    /// Configure `backend` and push `document` into it
    pub(crate) fn open(mut backend: Box<dyn SurfaceBackend>, document: Vec<u8>) -> Self {
        let settings = SurfaceSettings::locked();
        backend.load_document(&settings, &document);
        Self {
            settings,
            document,
            backend: Some(backend),
        }
    }

    pub fn settings(&self) -> &SurfaceSettings {
        &self.settings
    }

    pub fn dock(&self) -> Dock {
        Dock::Fill
    }

    /// Raw document bytes as handed to the backend
    pub fn document(&self) -> &[u8] {
        &self.document
    }

    /// Document decoded for display
    pub fn document_text(&self) -> Cow<'_, str> {
        decode_text(&self.document)
    }
}

impl fmt::Debug for RenderSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderSurface")
            .field("settings", &self.settings)
            .field("document_len", &self.document.len())
            .field("attached", &self.backend.is_some())
            .finish()
    }
}

impl Drop for RenderSurface {
    fn drop(&mut self) {
        if let Some(mut backend) = self.backend.take() {
            backend.release();
        }
    }
}
