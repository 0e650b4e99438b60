//! Text input widget for single-line text entry.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders},
};

/// Single-line text input widget
pub struct TextInputWidget<'a> {
    value: &'a str,
    cursor: usize,
    placeholder: &'a str,
    title: &'a str,
    focused: bool,
}

impl<'a> TextInputWidget<'a> {
    /// Create a new text input widget
    pub fn new(state: &'a TextInputState) -> Self {
        Self {
            value: &state.value,
            cursor: state.cursor,
            placeholder: "",
            title: "Input",
            focused: true,
        }
    }

    /// Set placeholder text
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Set title
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Set focused state
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for TextInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", self.title));

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        if self.focused && !self.value.is_empty() {
            let before_cursor: String = self.value.chars().take(self.cursor).collect();
            let cursor_char: String = self.value.chars().skip(self.cursor).take(1).collect();
            let after_cursor: String = self.value.chars().skip(self.cursor + 1).collect();

            let mut x = inner.x;
            buf.set_string(x, inner.y, &before_cursor, Style::default());
            x += before_cursor.chars().count() as u16;

            let cursor_text = if cursor_char.is_empty() { " " } else { &cursor_char };
            buf.set_string(
                x,
                inner.y,
                cursor_text,
                Style::default().fg(Color::Black).bg(Color::White),
            );
            x += 1;

            buf.set_string(x, inner.y, &after_cursor, Style::default());
        } else if self.focused {
            buf.set_string(
                inner.x,
                inner.y,
                " ",
                Style::default().fg(Color::Black).bg(Color::White),
            );
            if !self.placeholder.is_empty() {
                buf.set_string(
                    inner.x + 1,
                    inner.y,
                    self.placeholder,
                    Style::default().fg(Color::DarkGray),
                );
            }
        } else if self.value.is_empty() {
            buf.set_string(
                inner.x,
                inner.y,
                self.placeholder,
                Style::default().fg(Color::DarkGray),
            );
        } else {
            buf.set_string(inner.x, inner.y, self.value, Style::default());
        }
    }
}

/// State for text input
#[derive(Debug, Default, Clone)]
pub struct TextInputState {
    /// Current value
    pub value: String,
    /// Cursor position (character index)
    pub cursor: usize,
}

impl TextInputState {
    /// Create a new text input state
    pub fn new() -> Self {
        Self::default()
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Handle a key event, returns the resulting action
    pub fn handle_key(&mut self, key: KeyEvent) -> TextInputAction {
        match key.code {
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return TextInputAction::None;
                }
                let at = self.byte_index();
                self.value.insert(at, c);
                self.cursor += 1;
                TextInputAction::Changed
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index();
                    self.value.remove(at);
                    TextInputAction::Changed
                } else {
                    TextInputAction::None
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.value.chars().count() {
                    let at = self.byte_index();
                    self.value.remove(at);
                    TextInputAction::Changed
                } else {
                    TextInputAction::None
                }
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                TextInputAction::None
            }
            KeyCode::Right => {
                if self.cursor < self.value.chars().count() {
                    self.cursor += 1;
                }
                TextInputAction::None
            }
            KeyCode::Home => {
                self.cursor = 0;
                TextInputAction::None
            }
            KeyCode::End => {
                self.cursor = self.value.chars().count();
                TextInputAction::None
            }
            KeyCode::Enter => TextInputAction::Submit,
            KeyCode::Esc => TextInputAction::Cancel,
            _ => TextInputAction::None,
        }
    }

    /// Clear the input
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Get the current value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Check if empty (ignoring whitespace)
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Actions that can result from text input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInputAction {
    /// No action
    None,
    /// Value changed
    Changed,
    /// User submitted (Enter)
    Submit,
    /// User cancelled (Esc)
    Cancel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_backspace() {
        let mut state = TextInputState::new();
        assert!(state.is_blank());

        state.handle_key(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE));
        state.handle_key(KeyEvent::new(KeyCode::Char('i'), KeyModifiers::NONE));
        assert_eq!(state.value(), "hi");
        assert_eq!(state.cursor, 2);

        state.handle_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(state.value(), "h");
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn test_navigation() {
        let mut state = TextInputState::new();
        for c in "hello".chars() {
            state.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }

        state.handle_key(KeyEvent::new(KeyCode::Home, KeyModifiers::NONE));
        assert_eq!(state.cursor, 0);

        state.handle_key(KeyEvent::new(KeyCode::End, KeyModifiers::NONE));
        assert_eq!(state.cursor, 5);

        state.handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE));
        assert_eq!(state.cursor, 4);
    }

    #[test]
    fn test_mid_string_edit_with_multibyte_chars() {
        let mut state = TextInputState::new();
        for c in "\u{0394}E".chars() {
            state.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        state.handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE));
        state.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(state.value(), "\u{0394}xE");
    }

    #[test]
    fn test_submit_and_cancel_actions() {
        let mut state = TextInputState::new();

        let action = state.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(action, TextInputAction::Submit);

        let action = state.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(action, TextInputAction::Cancel);
    }
}
