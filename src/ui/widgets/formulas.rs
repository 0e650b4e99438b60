//! Formula sheet panel: pick a chapter, view the generated table.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::services::paper::strip_markup;
use crate::ui::widgets::picker::{SetupState, SetupWidget};
use crate::ui::widgets::text_view::{TextViewState, TextViewWidget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulasEvent {
    None,
    Consumed,
    Generate,
}

/// State of the formula sheet panel
#[derive(Debug, Default)]
pub struct FormulasState {
    pub setup: SetupState,
    pub generating: bool,
    pub content: Option<String>,
    pub view: TextViewState,
}

impl FormulasState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a generated sheet
    pub fn sheet_ready(&mut self, content: String) {
        self.content = Some(content);
        self.generating = false;
        self.view.reset();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormulasEvent {
        if self.generating {
            return FormulasEvent::None;
        }
        match key.code {
            KeyCode::Enter => FormulasEvent::Generate,
            KeyCode::Up | KeyCode::Char('k') if self.content.is_some() => {
                self.view.scroll_up(1);
                FormulasEvent::Consumed
            }
            KeyCode::Down | KeyCode::Char('j') if self.content.is_some() => {
                self.view.scroll_down(1);
                FormulasEvent::Consumed
            }
            KeyCode::PageUp => {
                self.view.page_up();
                FormulasEvent::Consumed
            }
            KeyCode::PageDown => {
                self.view.page_down();
                FormulasEvent::Consumed
            }
            _ => {
                if self.setup.handle_key(key) {
                    FormulasEvent::Consumed
                } else {
                    FormulasEvent::None
                }
            }
        }
    }

    /// Keep the view's scroll bounds in sync with the rendered sheet
    pub fn sync_view(&mut self, viewport_height: usize) {
        let lines = self
            .content
            .as_deref()
            .map(|c| strip_markup(c).lines().count())
            .unwrap_or(0);
        self.view.update_dimensions(lines, viewport_height);
    }
}

/// Widget rendering the formula sheet panel
pub struct FormulasWidget<'a> {
    state: &'a FormulasState,
}

impl<'a> FormulasWidget<'a> {
    pub fn new(state: &'a FormulasState) -> Self {
        Self { state }
    }
}

impl Widget for FormulasWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        SetupWidget::new(&self.state.setup)
            .focused(self.state.content.is_none())
            .render(chunks[0], buf);

        match (&self.state.content, self.state.generating) {
            (_, true) => {
                Paragraph::new("Deriving the sheet...")
                    .style(Style::default().fg(Color::Yellow))
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL).title(" Formula Sheet "))
                    .render(chunks[1], buf);
            }
            (Some(content), false) => {
                TextViewWidget::new(content, "Formula Sheet")
                    .scroll_offset(self.state.view.scroll_offset())
                    .focused(true)
                    .render(chunks[1], buf);
            }
            (None, false) => {
                Paragraph::new("Formula, variables and key conditions for one chapter.")
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL).title(" Formula Sheet "))
                    .render(chunks[1], buf);
            }
        }

        Paragraph::new(" j/k: Scroll | h/l: Value | Enter: Generate ")
            .style(Style::default().fg(Color::DarkGray))
            .render(chunks[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_generate_then_scroll() {
        let mut state = FormulasState::new();
        assert_eq!(state.handle_key(key(KeyCode::Enter)), FormulasEvent::Generate);

        state.generating = true;
        assert_eq!(state.handle_key(key(KeyCode::Enter)), FormulasEvent::None);

        state.sheet_ready("line1\nline2\nline3".to_string());
        state.sync_view(2);
        assert_eq!(state.handle_key(key(KeyCode::Down)), FormulasEvent::Consumed);
        assert_eq!(state.view.scroll_offset(), 1);
    }

    #[test]
    fn test_setup_keys_before_generation() {
        let mut state = FormulasState::new();
        assert_eq!(state.handle_key(key(KeyCode::Right)), FormulasEvent::Consumed);
        assert_eq!(state.setup.grade(), "12");
    }
}
