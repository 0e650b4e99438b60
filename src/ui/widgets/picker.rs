//! Grade/subject/chapter selection row shared by the chapter-scoped
//! generator panels.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders},
};

use crate::domain::syllabus::{chapters, GRADES, SUBJECT_NAMES};

/// Which field of the picker has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetupField {
    #[default]
    Grade,
    Subject,
    Chapter,
}

/// Selection state for grade, subject and chapter
#[derive(Debug, Clone, Default)]
pub struct SetupState {
    pub field: SetupField,
    grade_index: usize,
    subject_index: usize,
    chapter_index: usize,
}

impl SetupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grade(&self) -> &'static str {
        GRADES[self.grade_index]
    }

    pub fn subject(&self) -> &'static str {
        SUBJECT_NAMES[self.subject_index]
    }

    pub fn chapter(&self) -> &'static str {
        let list = chapters(self.subject(), self.grade());
        list.get(self.chapter_index).copied().unwrap_or("")
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            SetupField::Grade => SetupField::Subject,
            SetupField::Subject => SetupField::Chapter,
            SetupField::Chapter => SetupField::Grade,
        };
    }

    pub fn prev_field(&mut self) {
        self.field = match self.field {
            SetupField::Grade => SetupField::Chapter,
            SetupField::Subject => SetupField::Grade,
            SetupField::Chapter => SetupField::Subject,
        };
    }

    /// Cycle the focused field's value. The chapter index resets when the
    /// chapter list changes underneath it.
    pub fn cycle(&mut self, forward: bool) {
        match self.field {
            SetupField::Grade => {
                self.grade_index = cycle_index(self.grade_index, GRADES.len(), forward);
                self.chapter_index = 0;
            }
            SetupField::Subject => {
                self.subject_index =
                    cycle_index(self.subject_index, SUBJECT_NAMES.len(), forward);
                self.chapter_index = 0;
            }
            SetupField::Chapter => {
                let len = chapters(self.subject(), self.grade()).len();
                self.chapter_index = cycle_index(self.chapter_index, len, forward);
            }
        }
    }

    /// Handle navigation keys. Returns true when the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.prev_field();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.next_field();
                true
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.cycle(false);
                true
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.cycle(true);
                true
            }
            _ => false,
        }
    }
}

fn cycle_index(current: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    }
}

/// Render the three picker fields stacked vertically
pub struct SetupWidget<'a> {
    state: &'a SetupState,
    focused: bool,
}

impl<'a> SetupWidget<'a> {
    pub fn new(state: &'a SetupState) -> Self {
        Self {
            state,
            focused: true,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn field_line(&self, label: &str, value: &str, field: SetupField) -> Line<'static> {
        let active = self.focused && self.state.field == field;
        let marker = if active { "> " } else { "  " };
        let style = if active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!("{}{:<9}", marker, label), style),
            Span::styled(format!("< {} >", value), style),
        ])
    }
}

impl Widget for SetupWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Setup ");
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            self.field_line("Class", self.state.grade(), SetupField::Grade),
            self.field_line("Subject", self.state.subject(), SetupField::Subject),
            self.field_line("Chapter", self.state.chapter(), SetupField::Chapter),
        ];
        for (i, line) in lines.into_iter().enumerate() {
            if inner.y + (i as u16) >= inner.bottom() {
                break;
            }
            buf.set_line(inner.x, inner.y + i as u16, &line, inner.width);
        }
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
    fn test_defaults() {
        let state = SetupState::new();
        assert_eq!(state.grade(), "11");
        assert_eq!(state.subject(), "Physics");
        assert_eq!(state.chapter(), "Physical World & Measurement");
    }

    #[test]
    fn test_cycle_wraps() {
        let mut state = SetupState::new();
        state.cycle(false);
        assert_eq!(state.grade(), "12");
        state.cycle(true);
        assert_eq!(state.grade(), "11");
    }

    #[test]
    fn test_chapter_resets_on_subject_change() {
        let mut state = SetupState::new();
        state.field = SetupField::Chapter;
        state.cycle(true);
        assert_eq!(state.chapter(), "Kinematics");

        state.field = SetupField::Subject;
        state.cycle(true);
        assert_eq!(state.subject(), "Chemistry");
        assert_eq!(state.chapter(), "Some Basic Concepts");
    }

    #[test]
    fn test_key_navigation() {
        let mut state = SetupState::new();
        assert!(state.handle_key(key(KeyCode::Down)));
        assert_eq!(state.field, SetupField::Subject);
        assert!(state.handle_key(key(KeyCode::Up)));
        assert_eq!(state.field, SetupField::Grade);
        assert!(state.handle_key(key(KeyCode::Right)));
        assert_eq!(state.grade(), "12");
        assert!(!state.handle_key(key(KeyCode::Enter)));
    }
}
