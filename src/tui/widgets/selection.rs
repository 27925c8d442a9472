//! Selection rendering for the file lists
//!
//! The selected row of the focused list is drawn inverted in the list's
//! color. An unfocused list keeps a bold marker on its selection so the
//! position is not lost when switching back.

use ratatui::style::{Color, Modifier, Style};

use crate::tui::theme::Theme;

/// Returns the selection prefix for a list item.
///
/// Selected items get an arrow (`▶ `), unselected items get two spaces for alignment.
///
/// # Example
/// ```no_run
/// # use gitlith::tui::widgets::selection::selection_prefix;
/// assert_eq!(selection_prefix(true), "▶ ");
/// ```
pub fn selection_prefix(is_selected: bool) -> &'static str {
    if is_selected {
        "▶ "
    } else {
        "  "
    }
}

/// Style for a file list row
pub fn list_item_style(is_selected: bool, list_focused: bool, color: Color, theme: &Theme) -> Style {
    match (is_selected, list_focused) {
        (true, true) => Style::default()
            .fg(theme.selected_fg)
            .bg(color)
            .add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(color).add_modifier(Modifier::BOLD),
        (false, _) => Style::default().fg(theme.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_prefix() {
        assert_eq!(selection_prefix(true), "▶ ");
        assert_eq!(selection_prefix(false), "  ");
    }

    #[test]
    fn test_focused_selection_is_inverted() {
        let theme = Theme::dark();
        let style = list_item_style(true, true, Color::Yellow, &theme);
        assert_eq!(style.bg, Some(Color::Yellow));
        assert_eq!(style.fg, Some(Color::Black));
    }

    #[test]
    fn test_unfocused_selection_is_bold_only() {
        let theme = Theme::dark();
        let style = list_item_style(true, false, Color::Green, &theme);
        assert_eq!(style.bg, None);
        assert!(style.add_modifier.contains(Modifier::BOLD));

        let plain = list_item_style(false, true, Color::Green, &theme);
        assert_eq!(plain.fg, Some(Color::White));
    }
}
