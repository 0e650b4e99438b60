//! Tutor chat panel with transcript, input line and research mode.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::domain::chat::{default_history, ChatMessage, Role};
use crate::services::paper::strip_markup;
use crate::ui::widgets::text_input::{TextInputAction, TextInputState};
use crate::ui::widgets::text_view::TextViewState;

/// Requests the chat panel raises for the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    None,
    Consumed,
    /// User submitted a message to send
    Send(String),
    /// User asked to wipe the transcript
    ClearHistory,
}

/// State of the tutor chat panel
#[derive(Debug)]
pub struct ChatState {
    pub history: Vec<ChatMessage>,
    pub input: TextInputState,
    pub research_mode: bool,
    pub waiting: bool,
    pub view: TextViewState,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            history: default_history(),
            input: TextInputState::new(),
            research_mode: false,
            waiting: false,
            view: TextViewState::new(),
        }
    }
}

impl ChatState {
    pub fn new(history: Vec<ChatMessage>) -> Self {
        let history = if history.is_empty() {
            default_history()
        } else {
            history
        };
        Self {
            history,
            ..Self::default()
        }
    }

    /// Append the tutor reply and stop waiting
    pub fn reply(&mut self, text: String) {
        self.history.push(ChatMessage::tutor(text));
        self.waiting = false;
        self.view.scroll_to_bottom();
    }

    /// Record a failed turn as a tutor-side error line
    pub fn reply_failed(&mut self, message: &str) {
        self.history
            .push(ChatMessage::tutor(format!("Error: {}", message)));
        self.waiting = false;
        self.view.scroll_to_bottom();
    }

    /// Reset the transcript to the post-clear greeting
    pub fn clear_history(&mut self) {
        self.history = vec![ChatMessage::tutor(
            "History cleared. How can I help you now?",
        )];
        self.view.reset();
    }

    /// Keep the view's scroll bounds in sync with the transcript
    pub fn sync_view(&mut self, viewport_height: usize) {
        let lines = self.transcript_lines().len();
        self.view.update_dimensions(lines, viewport_height);
    }

    /// Handle a key. The input line owns most keys; a few control
    /// combinations work regardless.
    pub fn handle_key(&mut self, key: KeyEvent) -> ChatEvent {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('r') => {
                    self.research_mode = !self.research_mode;
                    return ChatEvent::Consumed;
                }
                KeyCode::Char('d') => return ChatEvent::ClearHistory,
                KeyCode::Char('u') => {
                    self.view.scroll_up(5);
                    return ChatEvent::Consumed;
                }
                KeyCode::Char('n') => {
                    self.view.scroll_down(5);
                    return ChatEvent::Consumed;
                }
                _ => {}
            }
        }
        match key.code {
            // Panel switching stays with the global handler
            KeyCode::Tab | KeyCode::BackTab => ChatEvent::None,
            KeyCode::Up => {
                self.view.scroll_up(1);
                ChatEvent::Consumed
            }
            KeyCode::Down => {
                self.view.scroll_down(1);
                ChatEvent::Consumed
            }
            KeyCode::PageUp => {
                self.view.page_up();
                ChatEvent::Consumed
            }
            KeyCode::PageDown => {
                self.view.page_down();
                ChatEvent::Consumed
            }
            _ => match self.input.handle_key(key) {
                TextInputAction::Submit => {
                    if self.input.is_blank() || self.waiting {
                        return ChatEvent::Consumed;
                    }
                    let message = self.input.value().trim().to_string();
                    self.input.clear();
                    self.history.push(ChatMessage::user(message.clone()));
                    self.waiting = true;
                    self.view.scroll_to_bottom();
                    ChatEvent::Send(message)
                }
                TextInputAction::Cancel => ChatEvent::None,
                _ => ChatEvent::Consumed,
            },
        }
    }

    /// Transcript flattened to display lines
    fn transcript_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for msg in &self.history {
            let (label, style) = match msg.role {
                Role::User => ("You", Style::default().fg(Color::Cyan)),
                Role::Tutor => ("Tutor", Style::default().fg(Color::Green)),
            };
            lines.push(Line::from(Span::styled(
                format!("{}:", label),
                style.add_modifier(Modifier::BOLD),
            )));
            for text_line in strip_markup(&msg.text).lines() {
                lines.push(Line::from(format!("  {}", text_line)));
            }
            lines.push(Line::from(""));
        }
        if self.waiting {
            lines.push(Line::from(Span::styled(
                "Tutor is thinking...",
                Style::default().fg(Color::Yellow),
            )));
        }
        lines
    }
}

/// Widget rendering transcript above the input line
pub struct ChatWidget<'a> {
    state: &'a ChatState,
}

impl<'a> ChatWidget<'a> {
    pub fn new(state: &'a ChatState) -> Self {
        Self { state }
    }
}

impl Widget for ChatWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        let mode = if self.state.research_mode {
            " AI Tutor [research mode] "
        } else {
            " AI Tutor "
        };
        let lines = self.state.transcript_lines();
        let total = lines.len();
        let viewport = chunks[0].height.saturating_sub(2) as usize;
        // Pin to the latest messages unless the user scrolled up
        let offset = if self.state.view.scroll_offset() == 0
            || self.state.view.scroll_offset() > total.saturating_sub(viewport)
        {
            total.saturating_sub(viewport)
        } else {
            self.state.view.scroll_offset()
        };
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((offset as u16, 0))
            .block(Block::default().borders(Borders::ALL).title(mode))
            .render(chunks[0], buf);

        let input_widget =
            crate::ui::widgets::text_input::TextInputWidget::new(&self.state.input)
                .title("Message")
                .placeholder("Ask a doubt, request a derivation...")
                .focused(!self.state.waiting);
        input_widget.render(chunks[1], buf);

        Paragraph::new(" Enter: Send | Ctrl+R: Research mode | Ctrl+D: Clear | Up/Down: Scroll ")
            .style(Style::default().fg(Color::DarkGray))
            .render(chunks[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_starts_with_greeting() {
        let state = ChatState::default();
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].role, Role::Tutor);
    }

    #[test]
    fn test_empty_persisted_history_gets_greeting() {
        let state = ChatState::new(vec![]);
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn test_send_appends_user_message_and_waits() {
        let mut state = ChatState::default();
        for c in "help".chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
        let event = state.handle_key(key(KeyCode::Enter));
        assert_eq!(event, ChatEvent::Send("help".to_string()));
        assert!(state.waiting);
        assert_eq!(state.history.last().unwrap().role, Role::User);
        assert!(state.input.is_blank());
    }

    #[test]
    fn test_blank_send_ignored() {
        let mut state = ChatState::default();
        let event = state.handle_key(key(KeyCode::Enter));
        assert_eq!(event, ChatEvent::Consumed);
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn test_no_double_send_while_waiting() {
        let mut state = ChatState::default();
        state.waiting = true;
        for c in "more".chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(state.handle_key(key(KeyCode::Enter)), ChatEvent::Consumed);
    }

    #[test]
    fn test_reply_and_failure_paths() {
        let mut state = ChatState::default();
        state.waiting = true;
        state.reply("The answer is 42.".to_string());
        assert!(!state.waiting);
        assert_eq!(state.history.last().unwrap().text, "The answer is 42.");

        state.waiting = true;
        state.reply_failed("connection lost");
        assert!(!state.waiting);
        assert!(state.history.last().unwrap().text.starts_with("Error:"));
    }

    #[test]
    fn test_research_mode_toggle() {
        let mut state = ChatState::default();
        let ctrl_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        state.handle_key(ctrl_r);
        assert!(state.research_mode);
        state.handle_key(ctrl_r);
        assert!(!state.research_mode);
    }

    #[test]
    fn test_clear_history() {
        let mut state = ChatState::default();
        state.history.push(ChatMessage::user("hello"));
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(state.handle_key(ctrl_d), ChatEvent::ClearHistory);
        state.clear_history();
        assert_eq!(state.history.len(), 1);
        assert!(state.history[0].text.starts_with("History cleared"));
    }
}
