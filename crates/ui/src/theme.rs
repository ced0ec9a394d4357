use ratatui::style::{Color, Modifier, Style};
use termfolio_core::Tone;

/// Iceberg color theme for the portfolio terminal
///
/// Based on iceberg.vim color scheme (https://github.com/cocopon/iceberg.vim)
#[derive(Debug, Clone, Copy)]
pub struct Theme;

impl Theme {
    /// Primary background: deep blue-black (fills terminal)
    pub const BG: Color = Color::Rgb(22, 24, 33);

    /// Foreground: light blue-gray (primary text)
    pub const FG: Color = Color::Rgb(198, 200, 209);

    /// Secondary background: menu and chat panels
    pub const PANEL_BG: Color = Color::Rgb(30, 33, 50);

    /// Selected menu row, focused trigger
    pub const ACTIVE: Color = Color::Rgb(39, 44, 66);

    pub const BLUE: Color = Color::Rgb(132, 160, 198);

    pub const CYAN: Color = Color::Rgb(137, 184, 194);

    pub const PURPLE: Color = Color::Rgb(160, 147, 199);

    pub const GREEN: Color = Color::Rgb(180, 190, 130);

    pub const YELLOW: Color = Color::Rgb(226, 164, 120);

    pub const RED: Color = Color::Rgb(226, 120, 120);

    pub const MUTED: Color = Color::Rgb(107, 112, 137);

    pub const BORDER: Color = Color::Rgb(60, 65, 90);

    /// Base style for all text
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    pub fn primary() -> Style {
        Style::default().fg(Self::BLUE).bg(Self::BG)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::GREEN).bg(Self::BG)
    }

    pub fn warning() -> Style {
        Style::default().fg(Self::YELLOW).bg(Self::BG)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::RED).bg(Self::BG)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED).bg(Self::BG)
    }

    pub fn panel() -> Style {
        Style::default().fg(Self::FG).bg(Self::PANEL_BG)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn active() -> Style {
        Style::default().fg(Self::FG).bg(Self::ACTIVE)
    }

    /// The `visitor@host ~ %` prompt
    pub fn prompt() -> Style {
        Style::default().fg(Self::GREEN).bg(Self::BG).add_modifier(Modifier::BOLD)
    }

    pub fn heading() -> Style {
        Style::default().fg(Self::BLUE).bg(Self::BG).add_modifier(Modifier::BOLD)
    }

    /// External hyperlink label
    pub fn link() -> Style {
        Style::default().fg(Self::CYAN).bg(Self::BG).add_modifier(Modifier::UNDERLINED)
    }

    /// Clickable command trigger
    pub fn trigger() -> Style {
        Style::default().fg(Self::PURPLE).bg(Self::BG).add_modifier(Modifier::UNDERLINED)
    }

    /// Trigger currently selected with the keyboard
    pub fn trigger_selected() -> Style {
        Style::default().fg(Self::BG).bg(Self::PURPLE).add_modifier(Modifier::BOLD)
    }

    pub fn tag() -> Style {
        Style::default().fg(Self::CYAN).bg(Self::PANEL_BG)
    }

    /// Map a semantic tone from a response descriptor to a color
    pub fn tone_color(tone: Tone) -> Color {
        match tone {
            Tone::Normal => Self::FG,
            Tone::Primary => Self::BLUE,
            Tone::Muted => Self::MUTED,
            Tone::Accent => Self::CYAN,
            Tone::Success => Self::GREEN,
            Tone::Warning => Self::YELLOW,
            Tone::Emphasis => Self::PURPLE,
        }
    }

    pub fn tone(tone: Tone) -> Style {
        let style = Style::default().fg(Self::tone_color(tone)).bg(Self::BG);
        match tone {
            Tone::Emphasis => style.add_modifier(Modifier::BOLD),
            _ => style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_values() {
        assert!(matches!(Theme::BG, Color::Rgb(_, _, _)));
        assert!(matches!(Theme::FG, Color::Rgb(_, _, _)));
        assert!(matches!(Theme::PANEL_BG, Color::Rgb(_, _, _)));
    }

    #[test]
    fn test_tone_colors() {
        assert_eq!(Theme::tone_color(Tone::Normal), Theme::FG);
        assert_eq!(Theme::tone_color(Tone::Muted), Theme::MUTED);
        assert_eq!(Theme::tone_color(Tone::Success), Theme::GREEN);
        assert_eq!(Theme::tone_color(Tone::Warning), Theme::YELLOW);
    }

    #[test]
    fn test_styles() {
        let base = Theme::base();
        assert_eq!(base.fg, Some(Theme::FG));
        assert_eq!(base.bg, Some(Theme::BG));

        let panel = Theme::panel();
        assert_eq!(panel.fg, Some(Theme::FG));
        assert_eq!(panel.bg, Some(Theme::PANEL_BG));

        assert!(Theme::trigger().add_modifier.contains(Modifier::UNDERLINED));
        assert!(Theme::tone(Tone::Emphasis).add_modifier.contains(Modifier::BOLD));
    }
}
