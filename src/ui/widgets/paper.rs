//! Printable school paper panel: setup, preview and export.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use std::path::PathBuf;

use crate::services::prompt::PaperKind;
use crate::ui::widgets::picker::{SetupState, SetupWidget};
use crate::ui::widgets::text_view::{TextViewState, TextViewWidget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperEvent {
    None,
    Consumed,
    Generate,
    /// Write the rendered paper to disk
    Export,
}

/// State of the paper generator panel
#[derive(Debug)]
pub struct PaperState {
    pub setup: SetupState,
    pub kind: PaperKind,
    pub generating: bool,
    pub rendered: Option<String>,
    pub exported_to: Option<PathBuf>,
    pub view: TextViewState,
}

impl Default for PaperState {
    fn default() -> Self {
        Self {
            setup: SetupState::new(),
            kind: PaperKind::PeriodicTest,
            generating: false,
            rendered: None,
            exported_to: None,
            view: TextViewState::new(),
        }
    }
}

impl PaperState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the rendered paper text
    pub fn paper_ready(&mut self, rendered: String) {
        self.rendered = Some(rendered);
        self.generating = false;
        self.exported_to = None;
        self.view.reset();
    }

    /// Keep the view's scroll bounds in sync with the rendered paper
    pub fn sync_view(&mut self, viewport_height: usize) {
        let lines = self
            .rendered
            .as_deref()
            .map(|r| r.lines().count())
            .unwrap_or(0);
        self.view.update_dimensions(lines, viewport_height);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PaperEvent {
        if self.generating {
            return PaperEvent::None;
        }

        if self.rendered.is_some() {
            return match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.view.scroll_up(1);
                    PaperEvent::Consumed
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.view.scroll_down(1);
                    PaperEvent::Consumed
                }
                KeyCode::PageUp => {
                    self.view.page_up();
                    PaperEvent::Consumed
                }
                KeyCode::PageDown => {
                    self.view.page_down();
                    PaperEvent::Consumed
                }
                KeyCode::Char('e') => PaperEvent::Export,
                KeyCode::Esc | KeyCode::Char('r') => {
                    self.rendered = None;
                    self.exported_to = None;
                    PaperEvent::Consumed
                }
                _ => PaperEvent::None,
            };
        }

        match key.code {
            KeyCode::Enter => PaperEvent::Generate,
            KeyCode::Char('t') => {
                self.kind = match self.kind {
                    PaperKind::PeriodicTest => PaperKind::TermExam,
                    PaperKind::TermExam => PaperKind::PeriodicTest,
                };
                PaperEvent::Consumed
            }
            _ => {
                if self.setup.handle_key(key) {
                    PaperEvent::Consumed
                } else {
                    PaperEvent::None
                }
            }
        }
    }
}

/// Widget rendering the paper generator panel
pub struct PaperWidget<'a> {
    state: &'a PaperState,
}

impl<'a> PaperWidget<'a> {
    pub fn new(state: &'a PaperState) -> Self {
        Self { state }
    }
}

impl Widget for PaperWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(rendered) = &self.state.rendered {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(1)])
                .split(area);
            TextViewWidget::new(rendered, "Question Paper Preview")
                .scroll_offset(self.state.view.scroll_offset())
                .focused(true)
                .render(chunks[0], buf);
            let footer = match &self.state.exported_to {
                Some(path) => format!(" Saved to {} | Esc: New paper ", path.display()),
                None => " e: Export to file | j/k: Scroll | Esc: New paper ".to_string(),
            };
            Paragraph::new(footer)
                .style(Style::default().fg(Color::DarkGray))
                .render(chunks[1], buf);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        SetupWidget::new(&self.state.setup).render(chunks[0], buf);

        let meta = Paragraph::new(vec![
            Line::from(vec![
                Span::raw("Assessment: "),
                Span::styled(
                    self.state.kind.display_name(),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(format!(
                "Max marks: {}   Time: {}",
                self.state.kind.max_marks(),
                self.state.kind.duration_label()
            )),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Pattern "));
        meta.render(chunks[1], buf);

        let body = if self.state.generating {
            Paragraph::new("Setting the paper, section by section...")
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center)
        } else {
            Paragraph::new("Formal sectioned paper (A-E) for one chapter, ready to print.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
        };
        body.block(Block::default().borders(Borders::ALL).title(" Print Studio "))
            .render(chunks[2], buf);

        Paragraph::new(" t: Assessment type | h/l: Value | Enter: Generate ")
            .style(Style::default().fg(Color::DarkGray))
            .render(chunks[3], buf);
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
    fn test_type_toggle_and_generate() {
        let mut state = PaperState::new();
        assert_eq!(state.kind, PaperKind::PeriodicTest);
        state.handle_key(key(KeyCode::Char('t')));
        assert_eq!(state.kind, PaperKind::TermExam);
        assert_eq!(state.handle_key(key(KeyCode::Enter)), PaperEvent::Generate);
    }

    #[test]
    fn test_preview_keys() {
        let mut state = PaperState::new();
        state.generating = true;
        assert_eq!(state.handle_key(key(KeyCode::Enter)), PaperEvent::None);

        state.paper_ready("THE PAPER".to_string());
        assert_eq!(state.handle_key(key(KeyCode::Char('e'))), PaperEvent::Export);

        state.handle_key(key(KeyCode::Esc));
        assert!(state.rendered.is_none());
    }
}
