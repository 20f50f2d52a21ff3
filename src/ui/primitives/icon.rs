use crossterm::style::Stylize;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Progress,
    Skipped,
    Arrow,
    Deploy,
    Check,
}

impl Icon {
    /// (unicode, ascii) glyphs
    fn glyphs(self) -> (&'static str, &'static str) {
        use crate::ui::theme::{icons as u, icons_ascii as a};
        match self {
            Icon::Success => (u::SUCCESS, a::SUCCESS),
            Icon::Error => (u::ERROR, a::ERROR),
            Icon::Warning => (u::WARNING, a::WARNING),
            Icon::Progress => (u::PROGRESS, a::PROGRESS),
            Icon::Skipped => (u::SKIPPED, a::SKIPPED),
            Icon::Arrow => (u::ARROW, a::ARROW),
            Icon::Deploy => (u::DEPLOY, a::DEPLOY),
            Icon::Check => (u::CHECK, a::CHECK),
        }
    }

    pub fn render(&self, supports_unicode: bool) -> &'static str {
        let (unicode, ascii) = self.glyphs();
        if supports_unicode {
            unicode
        } else {
            ascii
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => theme::colors::SUCCESS,
            Icon::Error => theme::colors::ERROR,
            Icon::Warning | Icon::Progress => theme::colors::WARNING,
            Icon::Skipped | Icon::Arrow => theme::colors::DIM,
            Icon::Deploy | Icon::Check => theme::colors::INFO,
        };
        format!("{}", s.with(color))
    }
}
