//! Settings panel: endpoint status, storage location and data purge.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsEvent {
    None,
    Consumed,
    /// User asked to wipe all persisted data, pending confirmation
    RequestPurge,
}

/// State of the settings panel
#[derive(Debug, Default)]
pub struct SettingsState {
    /// Set after a purge completes so the panel can acknowledge it
    pub purged: bool,
}

impl SettingsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> SettingsEvent {
        match key.code {
            KeyCode::Char('D') => SettingsEvent::RequestPurge,
            _ => SettingsEvent::None,
        }
    }
}

/// Widget rendering the settings panel
pub struct SettingsWidget<'a> {
    state: &'a SettingsState,
    api_key_set: bool,
    text_model: &'a str,
    exam_model: &'a str,
    storage_dir: &'a PathBuf,
    vim_navigation: bool,
}

impl<'a> SettingsWidget<'a> {
    pub fn new(
        state: &'a SettingsState,
        api_key_set: bool,
        text_model: &'a str,
        exam_model: &'a str,
        storage_dir: &'a PathBuf,
        vim_navigation: bool,
    ) -> Self {
        Self {
            state,
            api_key_set,
            text_model,
            exam_model,
            storage_dir,
            vim_navigation,
        }
    }
}

impl Widget for SettingsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7),
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let status = if self.api_key_set {
            Span::styled("ACTIVE", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        } else {
            Span::styled("ERROR: key missing", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        };
        let gateway = Paragraph::new(vec![
            Line::from(vec![Span::raw("API gateway:   "), status]),
            Line::from(format!("Text model:    {}", self.text_model)),
            Line::from(format!("Exam model:    {}", self.exam_model)),
            Line::from(""),
            Line::from(Span::styled(
                "Set the key via config or the GEMINI_API_KEY environment variable.",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(Block::default().borders(Borders::ALL).title(" AI Gateway "));
        gateway.render(chunks[0], buf);

        let storage = Paragraph::new(vec![
            Line::from(format!("Data directory: {}", self.storage_dir.display())),
            Line::from(format!(
                "Vim navigation: {}",
                if self.vim_navigation { "on" } else { "off" }
            )),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Local Storage "));
        storage.render(chunks[1], buf);

        let mut danger = vec![
            Line::from(Span::styled(
                "Shift+D  Delete all saved data",
                Style::default().fg(Color::Red),
            )),
            Line::from(Span::styled(
                "Removes syllabus progress, chat history, tasks and schedules.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        if self.state.purged {
            danger.push(Line::from(""));
            danger.push(Line::from(Span::styled(
                "All saved data has been deleted.",
                Style::default().fg(Color::Yellow),
            )));
        }
        Paragraph::new(danger)
            .block(Block::default().borders(Borders::ALL).title(" Danger Zone "))
            .render(chunks[2], buf);

        Paragraph::new(" Shift+D: Purge data | Tab: Next panel ")
            .style(Style::default().fg(Color::DarkGray))
            .render(chunks[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_purge_requires_shift_d() {
        let mut state = SettingsState::new();
        let ev = state.handle_key(KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT));
        assert_eq!(ev, SettingsEvent::RequestPurge);
        let ev = state.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE));
        assert_eq!(ev, SettingsEvent::None);
    }
}
