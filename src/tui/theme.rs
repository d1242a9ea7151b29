// src/tui/theme.rs — Color scheme and style definitions for the dashboard.

use ratatui::style::{Color, Modifier, Style};

use crate::engine::CredentialState;

/// Harbor-at-dusk palette.
pub struct Theme;

impl Theme {
    // ── Brand colors ─────────────────────────────────────────────
    pub const TIDE_TEAL: Color = Color::Rgb(60, 190, 180);
    pub const FOAM_WHITE: Color = Color::Rgb(235, 240, 240);
    pub const BUOY_GREEN: Color = Color::Rgb(90, 200, 120);
    pub const SIGNAL_RED: Color = Color::Rgb(225, 85, 85);
    pub const SAND_YELLOW: Color = Color::Rgb(225, 195, 80);
    pub const MIST_GRAY: Color = Color::Rgb(125, 130, 145);
    pub const HULL_DIM: Color = Color::Rgb(75, 82, 100);

    // ── Semantic styles ──────────────────────────────────────────

    /// Main title / header bar.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::TIDE_TEAL)
            .add_modifier(Modifier::BOLD)
    }

    /// Block border.
    pub fn border() -> Style {
        Style::default().fg(Theme::HULL_DIM)
    }

    /// Normal body text.
    pub fn text() -> Style {
        Style::default().fg(Theme::FOAM_WHITE)
    }

    /// Dimmed / secondary text.
    pub fn text_dim() -> Style {
        Style::default().fg(Theme::MIST_GRAY)
    }

    pub fn success() -> Style {
        Style::default().fg(Theme::BUOY_GREEN)
    }

    pub fn warning() -> Style {
        Style::default().fg(Theme::SAND_YELLOW)
    }

    pub fn error() -> Style {
        Style::default().fg(Theme::SIGNAL_RED)
    }

    /// Table header row.
    pub fn table_header() -> Style {
        Style::default()
            .fg(Theme::TIDE_TEAL)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// Selected table row.
    pub fn table_selected() -> Style {
        Style::default()
            .bg(Color::Rgb(38, 46, 62))
            .fg(Theme::FOAM_WHITE)
    }

    /// Key hint in the footer.
    pub fn key_hint() -> Style {
        Style::default().fg(Theme::TIDE_TEAL)
    }

    /// Description next to key hint.
    pub fn key_desc() -> Style {
        Style::default().fg(Theme::MIST_GRAY)
    }

    /// Color-coded engine state cell.
    pub fn state(state: CredentialState) -> Style {
        match state {
            CredentialState::InstalledWithCredential => Self::success(),
            CredentialState::InstalledNoCredential => Self::warning(),
            CredentialState::NotInstalled => Self::text_dim(),
        }
    }
}
