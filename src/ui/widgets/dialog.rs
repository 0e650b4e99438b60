//! Yes/no confirmation dialog for destructive actions.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// What a confirmed dialog should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    ClearChatHistory,
    PurgeAllData,
}

/// State of the active confirmation, if any
#[derive(Debug, Default, Clone)]
pub struct ConfirmState {
    pub pending: Option<ConfirmAction>,
    pub yes_selected: bool,
}

impl ConfirmState {
    /// Open the dialog for an action, defaulting to "No"
    pub fn open(&mut self, action: ConfirmAction) {
        self.pending = Some(action);
        self.yes_selected = false;
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn close(&mut self) {
        self.pending = None;
        self.yes_selected = false;
    }

    /// Handle a key while the dialog is open. Returns the confirmed
    /// action when the user selects Yes.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ConfirmAction> {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.yes_selected = !self.yes_selected;
                None
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                let action = self.pending.take();
                self.close();
                action
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.close();
                None
            }
            KeyCode::Enter => {
                let confirmed = self.yes_selected;
                let action = self.pending.take();
                self.close();
                if confirmed {
                    action
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// Confirmation dialog widget
pub struct ConfirmDialog<'a> {
    title: &'a str,
    message: &'a str,
    yes_selected: bool,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(title: &'a str, message: &'a str) -> Self {
        Self {
            title,
            message,
            yes_selected: false,
        }
    }

    pub fn yes_selected(mut self, selected: bool) -> Self {
        self.yes_selected = selected;
        self
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" {} ", self.title));
        let inner = block.inner(area);
        block.render(area, buf);

        let message_area = Rect {
            x: inner.x + 1,
            y: inner.y + 1,
            width: inner.width.saturating_sub(2),
            height: inner.height.saturating_sub(4),
        };
        Paragraph::new(self.message)
            .wrap(Wrap { trim: true })
            .render(message_area, buf);

        let buttons_y = inner.y + inner.height.saturating_sub(2);
        let button_width = 10u16;
        let total_buttons_width = button_width * 2 + 4;
        let start_x = inner.x + (inner.width.saturating_sub(total_buttons_width)) / 2;

        let yes_style = if self.yes_selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let yes_text = if self.yes_selected { "[ Yes ]" } else { "  Yes  " };
        buf.set_string(start_x, buttons_y, yes_text, yes_style);

        let no_style = if !self.yes_selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let no_text = if !self.yes_selected { "[  No  ]" } else { "   No   " };
        buf.set_string(start_x + button_width + 2, buttons_y, no_text, no_style);
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
    fn test_dialog_defaults_to_no() {
        let mut state = ConfirmState::default();
        state.open(ConfirmAction::PurgeAllData);
        assert!(state.is_open());
        assert!(!state.yes_selected);

        // Enter on "No" closes without confirming
        assert_eq!(state.handle_key(key(KeyCode::Enter)), None);
        assert!(!state.is_open());
    }

    #[test]
    fn test_toggle_then_confirm() {
        let mut state = ConfirmState::default();
        state.open(ConfirmAction::ClearChatHistory);
        state.handle_key(key(KeyCode::Left));
        assert!(state.yes_selected);
        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            Some(ConfirmAction::ClearChatHistory)
        );
        assert!(!state.is_open());
    }

    #[test]
    fn test_y_and_esc_shortcuts() {
        let mut state = ConfirmState::default();
        state.open(ConfirmAction::PurgeAllData);
        assert_eq!(
            state.handle_key(key(KeyCode::Char('y'))),
            Some(ConfirmAction::PurgeAllData)
        );

        state.open(ConfirmAction::PurgeAllData);
        assert_eq!(state.handle_key(key(KeyCode::Esc)), None);
        assert!(!state.is_open());
    }
}
