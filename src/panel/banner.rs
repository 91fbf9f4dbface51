//! Warning banner shown above the preview

use ratatui::style::Color;
use ratatui::text::Line;

use super::{BorderStyle, Dock, ScrollBars};

/// Message shown when the classifier flags the document
pub const BLOCKED_MESSAGE: &str = "Some elements in this image have been blocked to help prevent \
the sender from identifying your computer or running code on it. Open the file in a trusted \
viewer to see all elements.";

/// Prefix of the message shown when the document could not be read
pub const READ_FAILURE_MESSAGE: &str = "This image could not be previewed";

/// Caution background for every banner
pub const CAUTION_COLOR: Color = Color::LightYellow;

/// Read-only, borderless text panel docked to the top of the preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningBanner {
    text: String,
    width: u16,
    height: u16,
}

impl WarningBanner {
    /// Create a banner spanning `width` cells.
    ///
    /// Empty text is replaced by the generic failure message so the banner
    /// always says something.
    pub fn new(text: impl Into<String>, width: u16) -> Self {
        let mut text = text.into();
        if text.trim().is_empty() {
            text = READ_FAILURE_MESSAGE.to_string();
        }
        let height = wrapped_line_count(&text, width);
        Self {
            text,
            width,
            height,
        }
    }

    /// Banner for a flagged document
    pub fn blocked(width: u16) -> Self {
        Self::new(BLOCKED_MESSAGE, width)
    }

    /// Banner summarizing a read failure
    pub fn read_failure(reason: &dyn std::fmt::Display, width: u16) -> Self {
        Self::new(format!("{}: {}", READ_FAILURE_MESSAGE, reason), width)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Rows needed to show the whole message at the current width
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize and refit the height to the wrapped text
    pub fn set_width(&mut self, width: u16) {
        self.width = width;
        self.height = wrapped_line_count(&self.text, width);
    }

    pub fn dock(&self) -> Dock {
        Dock::Top
    }

    pub fn background(&self) -> Color {
        CAUTION_COLOR
    }

    pub fn is_multiline(&self) -> bool {
        true
    }

    pub fn is_read_only(&self) -> bool {
        true
    }

    pub fn scrollbars(&self) -> ScrollBars {
        ScrollBars::None
    }

    pub fn border(&self) -> BorderStyle {
        BorderStyle::None
    }
}

/// Greedy word-wrap line count, one row minimum
fn wrapped_line_count(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let mut rows = 0usize;

    for line in text.lines() {
        let mut used = 0usize;
        let mut line_rows = 1usize;
        for word in line.split_whitespace() {
            let w = Line::raw(word).width();
            let needed = if used == 0 { w } else { used + 1 + w };
            if needed <= width {
                used = needed;
            } else if used == 0 {
                // Word longer than the row wraps by itself
                line_rows += (w - 1) / width;
                used = (w - 1) % width + 1;
            } else {
                line_rows += 1 + w.saturating_sub(1) / width;
                used = (w.max(1) - 1) % width + 1;
            }
        }
        rows += line_rows;
    }

    u16::try_from(rows.max(1)).unwrap_or(u16::MAX)
}
