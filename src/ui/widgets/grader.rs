//! Answer grader panel: question and answer editors plus examiner feedback.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use tui_textarea::{Input, Key, TextArea};

use crate::services::paper::strip_markup;
use crate::ui::widgets::text_view::{TextViewState, TextViewWidget};

/// Which editor has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraderFocus {
    #[default]
    Question,
    Answer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraderEvent {
    None,
    Consumed,
    /// Submit (question, answer) for evaluation
    Grade(String, String),
}

/// State of the answer grader panel
pub struct GraderState {
    pub question: TextArea<'static>,
    pub answer: TextArea<'static>,
    pub focus: GraderFocus,
    pub grading: bool,
    pub feedback: Option<String>,
    pub view: TextViewState,
}

impl Default for GraderState {
    fn default() -> Self {
        let mut question = TextArea::default();
        question.set_cursor_line_style(Style::default());
        let mut answer = TextArea::default();
        answer.set_cursor_line_style(Style::default());
        Self {
            question,
            answer,
            focus: GraderFocus::Question,
            grading: false,
            feedback: None,
            view: TextViewState::new(),
        }
    }
}

impl GraderState {
    pub fn new() -> Self {
        Self::default()
    }

    fn question_text(&self) -> String {
        self.question.lines().join("\n")
    }

    fn answer_text(&self) -> String {
        self.answer.lines().join("\n")
    }

    /// Install examiner feedback
    pub fn feedback_ready(&mut self, text: String) {
        self.feedback = Some(text);
        self.grading = false;
        self.view.reset();
    }

    /// Keep the view's scroll bounds in sync with the feedback text
    pub fn sync_view(&mut self, viewport_height: usize) {
        let lines = self
            .feedback
            .as_deref()
            .map(|f| strip_markup(f).lines().count())
            .unwrap_or(0);
        self.view.update_dimensions(lines, viewport_height);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> GraderEvent {
        if self.grading {
            return GraderEvent::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                // Ctrl+G submits for grading
                KeyCode::Char('g') => {
                    let question = self.question_text();
                    let answer = self.answer_text();
                    if question.trim().is_empty() || answer.trim().is_empty() {
                        return GraderEvent::Consumed;
                    }
                    self.grading = true;
                    return GraderEvent::Grade(question, answer);
                }
                KeyCode::Char('u') => {
                    self.view.scroll_up(3);
                    return GraderEvent::Consumed;
                }
                KeyCode::Char('n') => {
                    self.view.scroll_down(3);
                    return GraderEvent::Consumed;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = match self.focus {
                    GraderFocus::Question => GraderFocus::Answer,
                    GraderFocus::Answer => GraderFocus::Question,
                };
                GraderEvent::Consumed
            }
            // Shift+Tab leaves the panel via the global handler
            KeyCode::BackTab => GraderEvent::None,
            KeyCode::Esc => GraderEvent::None,
            _ => {
                let input = convert_key_event(key);
                match self.focus {
                    GraderFocus::Question => self.question.input(input),
                    GraderFocus::Answer => self.answer.input(input),
                };
                GraderEvent::Consumed
            }
        }
    }
}

/// Convert crossterm KeyEvent to tui-textarea Input
fn convert_key_event(key: KeyEvent) -> Input {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    let key = match key.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        _ => Key::Null,
    };

    Input { key, ctrl, alt, shift }
}

/// Widget rendering both editors beside the feedback view
pub struct GraderWidget<'a> {
    state: &'a GraderState,
}

impl<'a> GraderWidget<'a> {
    pub fn new(state: &'a GraderState) -> Self {
        Self { state }
    }

    fn render_editor(
        textarea: &TextArea<'static>,
        title: &str,
        focused: bool,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", title));
        let inner = block.inner(area);
        block.render(area, buf);

        let (cursor_line, cursor_col) = textarea.cursor();
        let lines: Vec<Line> = textarea
            .lines()
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                if focused && idx == cursor_line {
                    let before: String = line.chars().take(cursor_col).collect();
                    let cursor_char: String =
                        line.chars().skip(cursor_col).take(1).collect();
                    let after: String = line.chars().skip(cursor_col + 1).collect();
                    Line::from(vec![
                        Span::raw(before),
                        Span::styled(
                            if cursor_char.is_empty() {
                                " ".to_string()
                            } else {
                                cursor_char
                            },
                            Style::default().bg(Color::White).fg(Color::Black),
                        ),
                        Span::raw(after),
                    ])
                } else {
                    Line::from(line.to_string())
                }
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}

impl Widget for GraderWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let editors = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(60),
                Constraint::Length(1),
            ])
            .split(columns[0]);

        Self::render_editor(
            &self.state.question,
            "Question",
            self.state.focus == GraderFocus::Question,
            editors[0],
            buf,
        );
        Self::render_editor(
            &self.state.answer,
            "Your Answer",
            self.state.focus == GraderFocus::Answer,
            editors[1],
            buf,
        );
        Paragraph::new(" Tab: Switch field | Ctrl+G: Grade ")
            .style(Style::default().fg(Color::DarkGray))
            .render(editors[2], buf);

        let feedback = if self.state.grading {
            "Evaluating your answer..."
        } else {
            self.state
                .feedback
                .as_deref()
                .unwrap_or("Feedback appears here, marked out of 5.")
        };
        TextViewWidget::new(feedback, "Examiner Feedback")
            .scroll_offset(self.state.view.scroll_offset())
            .render(columns[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_into(state: &mut GraderState, text: &str) {
        for c in text.chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_grade_requires_both_fields() {
        let mut state = GraderState::new();
        let ctrl_g = KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL);

        assert_eq!(state.handle_key(ctrl_g), GraderEvent::Consumed);
        assert!(!state.grading);

        type_into(&mut state, "State Ohm's law");
        state.handle_key(key(KeyCode::Tab));
        type_into(&mut state, "V equals IR");

        assert_eq!(
            state.handle_key(ctrl_g),
            GraderEvent::Grade("State Ohm's law".to_string(), "V equals IR".to_string())
        );
        assert!(state.grading);
    }

    #[test]
    fn test_tab_switches_focus() {
        let mut state = GraderState::new();
        assert_eq!(state.focus, GraderFocus::Question);
        state.handle_key(key(KeyCode::Tab));
        assert_eq!(state.focus, GraderFocus::Answer);
        type_into(&mut state, "hi");
        assert_eq!(state.answer.lines().join(""), "hi");
        assert_eq!(state.question.lines().join(""), "");
    }

    #[test]
    fn test_locked_while_grading() {
        let mut state = GraderState::new();
        state.grading = true;
        assert_eq!(state.handle_key(key(KeyCode::Char('x'))), GraderEvent::None);

        state.feedback_ready("3/5. Missing the unit.".to_string());
        assert!(!state.grading);
        assert!(state.feedback.is_some());
    }
}
