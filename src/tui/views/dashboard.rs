//! Dashboard view
//!
//! Four panels: file tree and command help on the left, unstaged and staged
//! lists on the right, with a one-line operation status below.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::app::status::NoticeKind;
use crate::app::{Focus, ViewState};
use crate::file_tree::row_prefix;
use crate::input::COMMAND_HELP;
use crate::tui::theme::{theme, Theme};
use crate::tui::widgets::selection::{list_item_style, selection_prefix};

/// Render the whole dashboard
pub fn render_dashboard(frame: &mut Frame, area: Rect, state: &ViewState) {
    let t = theme();

    let [main, status_area] = split_vertical(area, [Constraint::Min(0), Constraint::Length(1)]);
    let [top, bottom] = split_vertical(main, [Constraint::Percentage(50), Constraint::Percentage(50)]);
    let [tree_area, unstaged_area] = split_horizontal(top);
    let [commands_area, staged_area] = split_horizontal(bottom);

    render_tree(frame, tree_area, state, t);
    render_file_list(frame, unstaged_area, state, Focus::Unstaged, t);
    render_commands(frame, commands_area, t);
    render_file_list(frame, staged_area, state, Focus::Staged, t);
    render_status_line(frame, status_area, state, t);
}

fn split_vertical(area: Rect, constraints: [Constraint; 2]) -> [Rect; 2] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);
    [chunks[0], chunks[1]]
}

fn split_horizontal(area: Rect) -> [Rect; 2] {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    [chunks[0], chunks[1]]
}

fn render_tree(frame: &mut Frame, area: Rect, state: &ViewState, t: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.tree_border))
        .title(" File Tree ");

    let lines: Vec<Line> = match state.tree() {
        Some(tree) => tree
            .rows()
            .iter()
            .map(|row| {
                let name_style = if row.is_dir {
                    Style::default().fg(t.tree_border)
                } else {
                    Style::default().fg(t.text)
                };
                Line::from(vec![
                    Span::styled(row_prefix(row), t.muted_style()),
                    Span::styled(row.name.to_string(), name_style),
                ])
            })
            .collect(),
        None => vec![Line::from(Span::styled("(not loaded)", t.muted_style()))],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_file_list(frame: &mut Frame, area: Rect, state: &ViewState, list: Focus, t: &Theme) {
    let (title, color) = match list {
        Focus::Unstaged => ("Unstaged Files", t.unstaged),
        Focus::Staged => ("Staged Files", t.staged),
    };
    let focused = state.focus() == list;
    let selection = state.selection(list);
    let items = state.items(list);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(t.list_border_style(color, focused))
        .title(format!(" {} ({}) ", title, items.len()));

    let list_items: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let is_selected = selection == Some(i);
            ListItem::new(Line::from(vec![
                Span::raw(selection_prefix(is_selected)),
                Span::raw(path.as_str()),
            ]))
            .style(list_item_style(is_selected, focused, color, t))
        })
        .collect();

    // ListState only drives scrolling; row styles come from list_item_style
    let mut list_state = ListState::default().with_selected(selection);
    frame.render_stateful_widget(List::new(list_items).block(block), area, &mut list_state);
}

fn render_commands(frame: &mut Frame, area: Rect, t: &Theme) {
    let lines: Vec<Line> = COMMAND_HELP
        .iter()
        .map(|(key, label)| {
            Line::from(vec![
                Span::styled(format!("[{}]", key), Style::default().fg(t.key_hint).bold()),
                Span::raw(" "),
                Span::styled(*label, Style::default().fg(t.text)),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.commands_border))
        .title(" Git Commands ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status_line(frame: &mut Frame, area: Rect, state: &ViewState, t: &Theme) {
    let line = if let Some((label, spinner)) = state.status.running() {
        Line::from(vec![
            Span::styled(format!(" {} ", spinner), Style::default().fg(t.running)),
            Span::styled(label.to_string(), Style::default().fg(t.running)),
        ])
    } else if let Some(notice) = state.status.notice() {
        let (mark, color) = match notice.kind {
            NoticeKind::Success => ("✔", t.success),
            NoticeKind::Failure => ("✖", t.failure),
        };
        Line::from(vec![
            Span::styled(format!(" {} ", mark), Style::default().fg(color)),
            Span::styled(notice.message.clone(), Style::default().fg(color)),
        ])
    } else {
        Line::from(Span::styled(" Ready", t.muted_style()))
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_tree::FileTreeNode;
    use crate::git::StatusSnapshot;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_to_text(state: &ViewState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_dashboard(frame, frame.size(), state))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_renders_panels_and_items() {
        let mut state = ViewState::default();
        state.apply_snapshot(StatusSnapshot::new(
            vec!["a.txt".to_string(), "b.txt".to_string()],
            vec!["c.txt".to_string()],
        ));
        state.apply_tree(FileTreeNode::dir(
            "repo",
            vec![FileTreeNode::file("a.txt")],
        ));

        let text = render_to_text(&state);
        assert!(text.contains("File Tree"));
        assert!(text.contains("Unstaged Files (2)"));
        assert!(text.contains("Staged Files (1)"));
        assert!(text.contains("Git Commands"));
        assert!(text.contains("▶ a.txt"));
        assert!(text.contains("└─ a.txt"));
        assert!(text.contains("[Tab] Switch Focus"));
    }

    #[test]
    fn test_status_line_shows_failure() {
        let mut state = ViewState::default();
        state.status.fail("Commit failed: nothing to commit");
        let text = render_to_text(&state);
        assert!(text.contains("✖ Commit failed: nothing to commit"));
    }
}
