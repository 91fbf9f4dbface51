//! Application module
//!
//! The terminal host around the preview control: argument parsing, config
//! file, the interactive event loop and the non-interactive check report.

mod check;
mod config;
mod config_file;
mod event_loop;
mod highlight;
mod render;
mod source;

pub use check::{run_check, CheckReport};
pub use config::{Config, Input};
pub use config_file::{ClassifierConfig, ConfigFile, ReaderConfig, UiConfig};
pub use event_loop::{run_app, ViewState};
pub use highlight::highlight_markup;
pub use render::{render_frame, RenderContext};
pub use source::open_input;

/// Process exit codes
pub mod exit_code {
    /// Clean document, or interactive session ended normally
    pub const SUCCESS: i32 = 0;
    /// Blocked elements detected (--check)
    pub const BLOCKED: i32 = 1;
    /// Document could not be read, or runtime error
    pub const ERROR: i32 = 2;
    /// Invalid arguments
    pub const INVALID: i32 = 3;
}
