//! Drawing the preview panel into a terminal frame

use ratatui::prelude::*;
use ratatui::widgets::{
    Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
};

use crate::panel::{PanelChild, PreviewControl, RenderSurface, WarningBanner};

/// Context for rendering a frame
pub struct RenderContext<'a> {
    pub control: &'a PreviewControl,
    pub title: &'a str,
    /// Surface content, already split and highlighted
    pub lines: &'a [Line<'static>],
    pub scroll: usize,
}

/// Render the control's children into the whole frame
pub fn render_frame(frame: &mut Frame, ctx: &RenderContext) {
    let layout = ctx.control.layout(frame.area());

    for child in ctx.control.children() {
        match child {
            PanelChild::Banner(banner) => {
                if let Some(area) = layout.banner {
                    render_banner(frame, banner, area);
                }
            }
            PanelChild::Surface(surface) => {
                if let Some(area) = layout.surface {
                    render_surface(frame, surface, ctx, area);
                }
            }
        }
    }
}

fn render_banner(frame: &mut Frame, banner: &WarningBanner, area: Rect) {
    let style = Style::default().bg(banner.background()).fg(Color::Black);
    let widget = Paragraph::new(banner.text())
        .style(style)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_surface(frame: &mut Frame, surface: &RenderSurface, ctx: &RenderContext, area: Rect) {
    let title = format!(" {} (q to close) ", ctx.title);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);

    let visible = usize::from(inner.height);
    let lines: Vec<Line> = ctx
        .lines
        .iter()
        .skip(ctx.scroll)
        .take(visible)
        .cloned()
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);

    if surface.settings().scrollbars_enabled() && ctx.lines.len() > visible {
        let mut state = ScrollbarState::new(ctx.lines.len().saturating_sub(visible))
            .position(ctx.scroll);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut state,
        );
    }
}

/// Rows available for document lines at the given frame size
pub(crate) fn surface_rows(control: &PreviewControl, area: Rect) -> usize {
    control
        .layout(area)
        .surface
        .map(|r| usize::from(r.height.saturating_sub(2)))
        .unwrap_or(0)
}
