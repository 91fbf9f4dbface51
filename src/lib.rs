//! svgview - Safe preview of untrusted SVG documents
//!
//! The core is [`panel::PreviewControl`]: it drains a pull stream, checks
//! the document for active content, and rebuilds a small panel of a
//! warning banner and an isolated render surface. The [`app`] module is a
//! terminal host built on top of it.

pub mod app;
pub mod classify;
pub mod error;
pub mod panel;
pub mod stream;

pub use classify::{contains_blocked_elements, Classifier, Rule, RuleSet};
pub use error::{PreviewError, Result};
pub use panel::{PanelChild, PreviewControl, PreviewOutcome};
pub use stream::{MemoryStream, ReadStream};
