//! Syllabus tracker panel: chapter checklist and per-subject progress.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
};

use crate::domain::syllabus::{chapter_key, chapters, SyllabusProgress, GRADES, SUBJECT_NAMES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyllabusEvent {
    None,
    Consumed,
    /// Completion set changed, persist it
    ProgressChanged,
}

/// State of the syllabus tracker panel
#[derive(Debug, Default)]
pub struct SyllabusState {
    pub progress: SyllabusProgress,
    subject_index: usize,
    grade_index: usize,
    pub cursor: usize,
}

impl SyllabusState {
    pub fn new(progress: SyllabusProgress) -> Self {
        Self {
            progress,
            ..Self::default()
        }
    }

    pub fn subject(&self) -> &'static str {
        SUBJECT_NAMES[self.subject_index]
    }

    pub fn grade(&self) -> &'static str {
        GRADES[self.grade_index]
    }

    fn visible_chapters(&self) -> &'static [&'static str] {
        chapters(self.subject(), self.grade())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> SyllabusEvent {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                SyllabusEvent::Consumed
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.visible_chapters().len().saturating_sub(1);
                self.cursor = (self.cursor + 1).min(max);
                SyllabusEvent::Consumed
            }
            KeyCode::Char('s') => {
                self.subject_index = (self.subject_index + 1) % SUBJECT_NAMES.len();
                self.cursor = 0;
                SyllabusEvent::Consumed
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Right | KeyCode::Char('l') => {
                self.grade_index = (self.grade_index + 1) % GRADES.len();
                self.cursor = 0;
                SyllabusEvent::Consumed
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(chapter) = self.visible_chapters().get(self.cursor) {
                    let key = chapter_key(self.subject(), self.grade(), chapter);
                    self.progress.toggle(&key);
                    SyllabusEvent::ProgressChanged
                } else {
                    SyllabusEvent::Consumed
                }
            }
            _ => SyllabusEvent::None,
        }
    }
}

/// Widget rendering the syllabus tracker
pub struct SyllabusWidget<'a> {
    state: &'a SyllabusState,
}

impl<'a> SyllabusWidget<'a> {
    pub fn new(state: &'a SyllabusState) -> Self {
        Self { state }
    }
}

impl Widget for SyllabusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2 + SUBJECT_NAMES.len() as u16),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        // Progress summary across all subjects
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Overall Progress ");
        let inner = block.inner(chunks[0]);
        block.render(chunks[0], buf);
        for (i, subject) in SUBJECT_NAMES.iter().enumerate() {
            let pct = self.state.progress.subject_progress(subject);
            let row = Rect {
                x: inner.x,
                y: inner.y + i as u16,
                width: inner.width,
                height: 1,
            };
            if row.y >= inner.bottom() {
                break;
            }
            let label_width = 11u16.min(row.width);
            buf.set_string(row.x, row.y, format!("{:<10}", subject), Style::default());
            let gauge_area = Rect {
                x: row.x + label_width,
                y: row.y,
                width: row.width.saturating_sub(label_width),
                height: 1,
            };
            Gauge::default()
                .ratio(f64::from(pct) / 100.0)
                .label(format!("{}%", pct))
                .gauge_style(Style::default().fg(Color::Green))
                .render(gauge_area, buf);
        }

        // Chapter checklist for the focused subject and grade
        let title = format!(" {} - Class {} ", self.state.subject(), self.state.grade());
        let items: Vec<ListItem> = self
            .state
            .visible_chapters()
            .iter()
            .enumerate()
            .map(|(idx, chapter)| {
                let key = chapter_key(self.state.subject(), self.state.grade(), chapter);
                let done = self.state.progress.is_complete(&key);
                let mark = if done { "[x]" } else { "[ ]" };
                let style = if idx == self.state.cursor {
                    Style::default().fg(Color::White).bg(Color::Blue)
                } else if done {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                ListItem::new(format!("{} {}", mark, chapter)).style(style)
            })
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title));
        Widget::render(list, chunks[1], buf);

        Paragraph::new(" space: Mark done | s: Subject | h/l: Class | j/k: Move ")
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
    fn test_toggle_marks_chapter() {
        let mut state = SyllabusState::default();
        assert_eq!(state.handle_key(key(KeyCode::Char(' '))), SyllabusEvent::ProgressChanged);
        let k = chapter_key("Physics", "11", "Physical World & Measurement");
        assert!(state.progress.is_complete(&k));

        // toggling again clears it
        state.handle_key(key(KeyCode::Char(' ')));
        assert!(!state.progress.is_complete(&k));
    }

    #[test]
    fn test_subject_and_grade_switch_reset_cursor() {
        let mut state = SyllabusState::default();
        state.handle_key(key(KeyCode::Down));
        assert_eq!(state.cursor, 1);

        state.handle_key(key(KeyCode::Char('s')));
        assert_eq!(state.subject(), "Chemistry");
        assert_eq!(state.cursor, 0);

        state.handle_key(key(KeyCode::Left));
        assert_eq!(state.grade(), "12");
    }

    #[test]
    fn test_cursor_clamped_to_chapter_list() {
        let mut state = SyllabusState::default();
        for _ in 0..100 {
            state.handle_key(key(KeyCode::Down));
        }
        assert_eq!(state.cursor, chapters("Physics", "11").len() - 1);
    }
}
