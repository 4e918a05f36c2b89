// theme support for the tui

use clap::ValueEnum;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeKind {
    Dark,
    Light,
    Nord,
}

impl ThemeKind {
    pub const ALL: &'static [ThemeKind] = &[Self::Dark, Self::Light, Self::Nord];

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Nord => "nord",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }
}

// light background -> light theme, anything else (including unknown) -> dark
pub fn detect_theme() -> ThemeKind {
    match terminal_light::luma() {
        Ok(luma) if luma > 0.6 => ThemeKind::Light,
        _ => ThemeKind::Dark,
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub border: Color,
    pub selection: Color,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
    pub muted: Color,
    // trace field colors
    pub reason: Color,
    pub confidence: Color,
    pub evidence: Color,
}

impl Theme {
    pub fn from_kind(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Dark => Self::dark(),
            ThemeKind::Light => Self::light(),
            ThemeKind::Nord => Self::nord(),
        }
    }

    fn dark() -> Self {
        Self {
            bg: Color::Rgb(23, 23, 23),
            fg: Color::Rgb(229, 229, 229),
            accent: Color::Rgb(163, 163, 163),
            border: Color::Rgb(38, 38, 38),
            selection: Color::Rgb(64, 64, 64),
            error: Color::Rgb(248, 113, 113),
            success: Color::Rgb(52, 211, 153),
            warning: Color::Rgb(251, 191, 36),
            muted: Color::Rgb(115, 115, 115),
            reason: Color::Rgb(251, 191, 36),
            confidence: Color::Rgb(56, 189, 248),
            evidence: Color::Rgb(167, 139, 250),
        }
    }

    fn light() -> Self {
        Self {
            bg: Color::Rgb(250, 250, 250),
            fg: Color::Rgb(23, 23, 23),
            accent: Color::Rgb(64, 64, 64),
            border: Color::Rgb(212, 212, 212),
            selection: Color::Rgb(229, 229, 229),
            error: Color::Rgb(220, 38, 38),
            success: Color::Rgb(5, 150, 105),
            warning: Color::Rgb(217, 119, 6),
            muted: Color::Rgb(115, 115, 115),
            reason: Color::Rgb(180, 83, 9),
            confidence: Color::Rgb(2, 132, 199),
            evidence: Color::Rgb(124, 58, 237),
        }
    }

    fn nord() -> Self {
        Self {
            bg: Color::Rgb(46, 52, 64),
            fg: Color::Rgb(236, 239, 244),
            accent: Color::Rgb(136, 192, 208),
            border: Color::Rgb(67, 76, 94),
            selection: Color::Rgb(67, 76, 94),
            error: Color::Rgb(191, 97, 106),
            success: Color::Rgb(163, 190, 140),
            warning: Color::Rgb(235, 203, 139),
            muted: Color::Rgb(76, 86, 106),
            reason: Color::Rgb(235, 203, 139),
            confidence: Color::Rgb(129, 161, 193),
            evidence: Color::Rgb(180, 142, 173),
        }
    }

    // style helpers
    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.selection)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Badge style for a verdict: green for allow, red for abstain.
    pub fn badge(&self, allow: bool) -> Style {
        let color = if allow { self.success } else { self.error };
        Style::default()
            .fg(color)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }
}
