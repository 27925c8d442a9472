//! Overlay dialogs: loading indicator and branch prompt

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::PromptState;
use crate::tui::theme::theme;

/// Rectangle of `width` x `height` centered in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Render the startup loading box
pub fn render_loading_indicator(frame: &mut Frame, area: Rect, message: &str) {
    let t = theme();
    let dialog_area = centered(area, area.width / 2, 3);
    frame.render_widget(Clear, dialog_area);

    let dialog = Paragraph::new(Line::from(Span::styled(
        message,
        Style::default().fg(t.text),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.text)),
    );
    frame.render_widget(dialog, dialog_area);
}

/// Render the single-line prompt
pub fn render_prompt(frame: &mut Frame, area: Rect, prompt: &PromptState) {
    let t = theme();
    let dialog_area = centered(area, area.width / 2, 5);
    frame.render_widget(Clear, dialog_area);

    let content = vec![
        Line::from(vec![
            Span::raw(" "),
            Span::styled(format!("{}_", prompt.buffer), t.input_style()),
        ]),
        Line::from(Span::styled(
            " [Enter] Submit  [Esc] Cancel",
            t.muted_style(),
        )),
    ];

    let dialog = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.prompt_border))
            .title(prompt.purpose.title()),
    );
    frame.render_widget(dialog, dialog_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered(area, 40, 3);
        assert_eq!(rect, Rect::new(20, 10, 40, 3));
    }

    #[test]
    fn test_centered_clips_to_small_area() {
        let area = Rect::new(5, 5, 10, 2);
        let rect = centered(area, 40, 3);
        assert_eq!(rect, Rect::new(5, 5, 10, 2));
    }
}
