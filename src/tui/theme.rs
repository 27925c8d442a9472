//! Theme module for centralized color and style definitions
//!
//! Each dashboard panel has its own border color so the focused list is easy
//! to pick out.

use ratatui::style::{Color, Modifier, Style};

/// Application theme with all color definitions
#[derive(Debug, Clone)]
pub struct Theme {
    // === Panels ===
    /// File tree border
    pub tree_border: Color,
    /// Unstaged list border and selection
    pub unstaged: Color,
    /// Staged list border and selection
    pub staged: Color,
    /// Command panel border
    pub commands_border: Color,
    /// Border of an unfocused list
    pub border_unfocused: Color,

    // === Text ===
    pub text: Color,
    pub text_muted: Color,
    /// Foreground of the selected row in a focused list
    pub selected_fg: Color,
    /// Key hints in the command panel
    pub key_hint: Color,

    // === Status line ===
    pub running: Color,
    pub success: Color,
    pub failure: Color,

    // === Dialogs ===
    pub prompt_border: Color,
    pub input: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            tree_border: Color::Cyan,
            unstaged: Color::Yellow,
            staged: Color::Green,
            commands_border: Color::Magenta,
            border_unfocused: Color::DarkGray,

            text: Color::White,
            text_muted: Color::DarkGray,
            selected_fg: Color::Black,
            key_hint: Color::Cyan,

            running: Color::Yellow,
            success: Color::Green,
            failure: Color::Red,

            prompt_border: Color::White,
            input: Color::Cyan,
        }
    }

    /// Border style for a file list, dimmed when unfocused
    pub fn list_border_style(&self, color: Color, focused: bool) -> Style {
        if focused {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.border_unfocused)
        }
    }

    /// Style for muted text
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Style for input text
    pub fn input_style(&self) -> Style {
        Style::default().fg(self.input)
    }
}

/// Global theme instance
static THEME: std::sync::OnceLock<Theme> = std::sync::OnceLock::new();

/// Get the current theme
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_colors() {
        let theme = Theme::dark();
        assert_eq!(theme.unstaged, Color::Yellow);
        assert_eq!(theme.staged, Color::Green);
    }

    #[test]
    fn test_unfocused_border_is_dimmed() {
        let theme = Theme::dark();
        assert_eq!(
            theme.list_border_style(theme.staged, false).fg,
            Some(Color::DarkGray)
        );
        assert_eq!(
            theme.list_border_style(theme.staged, true).fg,
            Some(Color::Green)
        );
    }
}
