//! Mnemonic generator panel: topic input plus generated result.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::Paragraph,
};

use crate::services::paper::strip_markup;
use crate::ui::widgets::text_input::{TextInputAction, TextInputState, TextInputWidget};
use crate::ui::widgets::text_view::{TextViewState, TextViewWidget};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MnemonicsEvent {
    None,
    Consumed,
    Generate(String),
}

/// State of the mnemonics panel
#[derive(Debug, Default)]
pub struct MnemonicsState {
    pub topic: TextInputState,
    pub generating: bool,
    pub result: Option<String>,
    pub view: TextViewState,
}

impl MnemonicsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result_ready(&mut self, text: String) {
        self.result = Some(text);
        self.generating = false;
        self.view.reset();
    }

    /// Keep the view's scroll bounds in sync with the result text
    pub fn sync_view(&mut self, viewport_height: usize) {
        let lines = self
            .result
            .as_deref()
            .map(|r| strip_markup(r).lines().count())
            .unwrap_or(0);
        self.view.update_dimensions(lines, viewport_height);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> MnemonicsEvent {
        if self.generating {
            return MnemonicsEvent::None;
        }
        match key.code {
            // Panel switching stays with the global handler
            KeyCode::Tab | KeyCode::BackTab => MnemonicsEvent::None,
            KeyCode::Up => {
                self.view.scroll_up(1);
                MnemonicsEvent::Consumed
            }
            KeyCode::Down => {
                self.view.scroll_down(1);
                MnemonicsEvent::Consumed
            }
            _ => match self.topic.handle_key(key) {
                TextInputAction::Submit => {
                    if self.topic.is_blank() {
                        MnemonicsEvent::Consumed
                    } else {
                        self.generating = true;
                        MnemonicsEvent::Generate(self.topic.value().trim().to_string())
                    }
                }
                TextInputAction::Cancel => MnemonicsEvent::None,
                _ => MnemonicsEvent::Consumed,
            },
        }
    }
}

/// Widget rendering the mnemonics panel
pub struct MnemonicsWidget<'a> {
    state: &'a MnemonicsState,
}

impl<'a> MnemonicsWidget<'a> {
    pub fn new(state: &'a MnemonicsState) -> Self {
        Self { state }
    }
}

impl Widget for MnemonicsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        TextInputWidget::new(&self.state.topic)
            .title("Topic")
            .placeholder("e.g. Reactivity series, Trigonometric identities")
            .focused(!self.state.generating)
            .render(chunks[0], buf);

        let body = if self.state.generating {
            "Composing a memory hook..."
        } else {
            self.state
                .result
                .as_deref()
                .unwrap_or("Type a topic and press Enter for a mnemonic.")
        };
        TextViewWidget::new(body, "Mnemonic")
            .scroll_offset(self.state.view.scroll_offset())
            .render(chunks[1], buf);

        Paragraph::new(" Enter: Generate | Up/Down: Scroll ")
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
    fn test_blank_topic_is_not_submitted() {
        let mut state = MnemonicsState::new();
        assert_eq!(state.handle_key(key(KeyCode::Enter)), MnemonicsEvent::Consumed);
        assert!(!state.generating);
    }

    #[test]
    fn test_submit_flags_generating() {
        let mut state = MnemonicsState::new();
        for c in "d-block".chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            MnemonicsEvent::Generate("d-block".to_string())
        );
        assert!(state.generating);

        // locked while generating
        assert_eq!(state.handle_key(key(KeyCode::Enter)), MnemonicsEvent::None);

        state.result_ready("**Mnemonic Phrase** ...".to_string());
        assert!(!state.generating);
        assert!(state.result.is_some());
    }
}
