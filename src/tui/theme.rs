//! Runtime-switchable color themes.
//!
//! Views never hardcode colors; they go through [`palette`] and [`Styles`]
//! so a theme switch takes effect on the next frame. No behavioral logic
//! depends on specific style values.

use ratatui::prelude::*;
use std::sync::RwLock;

/// Semantic colors for the dashboard.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// Price/market direction
    pub up: Color,
    pub down: Color,

    pub accent: Color,
    pub fg: Color,
    pub fg_dim: Color,
    pub border: Color,
    pub border_active: Color,
    pub surface: Color,
    pub cursor_bg: Color,

    pub ok: Color,
    pub warn: Color,
    pub err: Color,
}

const DARK: Palette = Palette {
    up: Color::Green,
    down: Color::Red,
    accent: Color::Cyan,
    fg: Color::White,
    fg_dim: Color::Gray,
    border: Color::DarkGray,
    border_active: Color::Cyan,
    surface: Color::Rgb(28, 28, 38),
    cursor_bg: Color::DarkGray,
    ok: Color::Green,
    warn: Color::Yellow,
    err: Color::Red,
};

const LIGHT: Palette = Palette {
    up: Color::Rgb(0, 130, 0),
    down: Color::Rgb(190, 0, 0),
    accent: Color::Rgb(0, 95, 150),
    fg: Color::Rgb(25, 25, 25),
    fg_dim: Color::Rgb(105, 105, 105),
    border: Color::Rgb(175, 175, 175),
    border_active: Color::Rgb(0, 95, 150),
    surface: Color::Rgb(238, 238, 244),
    cursor_bg: Color::Rgb(205, 222, 240),
    ok: Color::Rgb(0, 130, 0),
    warn: Color::Rgb(170, 130, 0),
    err: Color::Rgb(190, 0, 0),
};

const HIGH_CONTRAST: Palette = Palette {
    up: Color::LightGreen,
    down: Color::LightRed,
    accent: Color::LightCyan,
    fg: Color::White,
    fg_dim: Color::Gray,
    border: Color::White,
    border_active: Color::LightCyan,
    surface: Color::Rgb(16, 16, 16),
    cursor_bg: Color::White,
    ok: Color::LightGreen,
    warn: Color::LightYellow,
    err: Color::LightRed,
};

/// The available themes, cycled in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
    HighContrast,
}

impl ThemeKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::HighContrast => "high-contrast",
        }
    }

    #[must_use]
    pub const fn palette(self) -> Palette {
        match self {
            Self::Dark => DARK,
            Self::Light => LIGHT,
            Self::HighContrast => HIGH_CONTRAST,
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::HighContrast,
            Self::HighContrast => Self::Dark,
        }
    }

    /// Parse a theme name, falling back to dark for anything unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::Light,
            "high-contrast" | "highcontrast" | "hc" => Self::HighContrast,
            _ => Self::Dark,
        }
    }
}

static ACTIVE: RwLock<ThemeKind> = RwLock::new(ThemeKind::Dark);

/// Colors of the active theme.
pub fn palette() -> Palette {
    active().palette()
}

/// The active theme.
pub fn active() -> ThemeKind {
    ACTIVE.read().map(|k| *k).unwrap_or_default()
}

pub fn set_theme(kind: ThemeKind) {
    if let Ok(mut slot) = ACTIVE.write() {
        *slot = kind;
    }
}

/// Advance to the next theme and return its name.
pub fn cycle_theme() -> &'static str {
    if let Ok(mut slot) = ACTIVE.write() {
        *slot = slot.next();
        slot.name()
    } else {
        ThemeKind::default().name()
    }
}

/// Style presets shared across views.
pub struct Styles;

impl Styles {
    pub fn title() -> Style {
        Style::default().fg(palette().accent).bold()
    }

    pub fn text() -> Style {
        Style::default().fg(palette().fg)
    }

    pub fn dim() -> Style {
        Style::default().fg(palette().fg_dim)
    }

    /// Row under the cursor.
    pub fn selected() -> Style {
        Style::default()
            .bg(palette().cursor_bg)
            .fg(palette().fg)
            .bold()
    }

    pub fn border(active: bool) -> Style {
        let p = palette();
        Style::default().fg(if active { p.border_active } else { p.border })
    }

    pub fn status() -> Style {
        Style::default().bg(palette().surface)
    }

    pub fn key() -> Style {
        Style::default().fg(palette().accent)
    }

    pub fn key_desc() -> Style {
        Style::default().fg(palette().fg_dim)
    }
}
