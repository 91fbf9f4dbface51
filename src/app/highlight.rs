//! Markup highlighting for the terminal render surface

use std::sync::OnceLock;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Lazy-initialized syntax set
static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();

/// Lazy-initialized theme set
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn get_syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn get_theme(name: &str) -> Option<&'static Theme> {
    THEME_SET.get_or_init(ThemeSet::load_defaults).themes.get(name)
}

/// Split `text` into display lines, highlighted as XML when `theme` names a
/// known syntect theme. Falls back to plain lines.
pub fn highlight_markup(text: &str, theme: Option<&str>) -> Vec<Line<'static>> {
    theme
        .and_then(|name| highlight_with(text, name))
        .unwrap_or_else(|| plain_lines(text))
}

fn plain_lines(text: &str) -> Vec<Line<'static>> {
    text.lines().map(|l| Line::raw(expand_tabs(l))).collect()
}

fn highlight_with(text: &str, theme_name: &str) -> Option<Vec<Line<'static>>> {
    let ss = get_syntax_set();
    let theme = get_theme(theme_name)?;
    let syntax = ss
        .find_syntax_by_extension("svg")
        .or_else(|| ss.find_syntax_by_extension("xml"))?;

    let mut h = HighlightLines::new(syntax, theme);
    let mut lines = Vec::new();

    for line in LinesWithEndings::from(text) {
        let ranges = h.highlight_line(line, ss).ok()?;
        let spans: Vec<Span<'static>> = ranges
            .iter()
            .map(|(style, segment)| {
                let fg = Color::Rgb(style.foreground.r, style.foreground.g, style.foreground.b);
                Span::styled(
                    expand_tabs(segment.trim_end_matches(['\n', '\r'])),
                    Style::default().fg(fg),
                )
            })
            .collect();
        lines.push(Line::from(spans));
    }

    Some(lines)
}

/// Tabs render as zero-width in most terminals' cell model
fn expand_tabs(s: &str) -> String {
    s.replace('\t', "    ")
}
