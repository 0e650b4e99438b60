//! Dashboard panel: exam countdown, quick stats and panel shortcuts.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::syllabus::{SyllabusProgress, SUBJECT_NAMES};

/// Unix seconds of the target exam morning (20 Jan 2027, 09:00 IST)
const EXAM_TARGET_UNIX: u64 = 1_800_415_800;

/// One shortcut card on the dashboard
pub struct DashboardCard {
    pub label: &'static str,
    pub desc: &'static str,
    /// Panel index the card jumps to
    pub panel: usize,
}

/// Cards in display order
pub fn cards() -> Vec<DashboardCard> {
    vec![
        DashboardCard { label: "Syllabus Tracker", desc: "Track your chapter-wise preparation status.", panel: 8 },
        DashboardCard { label: "JEE Mock Test", desc: "Professional level Mains & Advanced mocks.", panel: 1 },
        DashboardCard { label: "School Paper Mode", desc: "Printable school-level question papers.", panel: 9 },
        DashboardCard { label: "Flashcards", desc: "Active recall for high-yield formulas.", panel: 3 },
        DashboardCard { label: "Ask AI Doubt", desc: "Immediate scientific explanations.", panel: 2 },
        DashboardCard { label: "Formula Sheets", desc: "Generate digital cheat sheets instantly.", panel: 4 },
        DashboardCard { label: "AI Grader", desc: "Expert evaluation of subjective answers.", panel: 5 },
        DashboardCard { label: "Memory Boost", desc: "Generate unique mnemonics for revision.", panel: 6 },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEvent {
    None,
    Consumed,
    /// Jump to the panel with this index
    Open(usize),
}

/// State of the dashboard panel
#[derive(Debug, Default)]
pub struct DashboardState {
    pub cursor: usize,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DashboardEvent {
        let count = cards().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                DashboardEvent::Consumed
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1).min(count.saturating_sub(1));
                DashboardEvent::Consumed
            }
            KeyCode::Enter => DashboardEvent::Open(cards()[self.cursor].panel),
            _ => DashboardEvent::None,
        }
    }
}

/// Days/hours/minutes/seconds until the target exam
pub fn countdown() -> (u64, u64, u64, u64) {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let dist = EXAM_TARGET_UNIX.saturating_sub(now);
    (
        dist / 86_400,
        (dist % 86_400) / 3_600,
        (dist % 3_600) / 60,
        dist % 60,
    )
}

/// Widget rendering the dashboard
pub struct DashboardWidget<'a> {
    state: &'a DashboardState,
    pending_tasks: usize,
    progress: &'a SyllabusProgress,
    gen_ready: bool,
}

impl<'a> DashboardWidget<'a> {
    pub fn new(
        state: &'a DashboardState,
        pending_tasks: usize,
        progress: &'a SyllabusProgress,
        gen_ready: bool,
    ) -> Self {
        Self {
            state,
            pending_tasks,
            progress,
            gen_ready,
        }
    }
}

impl Widget for DashboardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let (days, hours, minutes, seconds) = countdown();
        let gen_status = if self.gen_ready {
            Span::styled("connected", Style::default().fg(Color::Green))
        } else {
            Span::styled("no API key", Style::default().fg(Color::Red))
        };
        let progress_line: Vec<Span> = SUBJECT_NAMES
            .iter()
            .flat_map(|s| {
                vec![
                    Span::raw(format!("{}: ", s)),
                    Span::styled(
                        format!("{}%  ", self.progress.subject_progress(s)),
                        Style::default().fg(Color::Cyan),
                    ),
                ]
            })
            .collect();

        let summary = Paragraph::new(vec![
            Line::from(Span::styled(
                format!(
                    "JEE countdown: {}d {:02}h {:02}m {:02}s",
                    days, hours, minutes, seconds
                ),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Open tasks: {}", self.pending_tasks)),
            Line::from(progress_line),
            Line::from(vec![Span::raw("Generation endpoint: "), gen_status]),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Overview "));
        summary.render(chunks[0], buf);

        let items: Vec<ListItem> = cards()
            .iter()
            .enumerate()
            .map(|(idx, card)| {
                let line = format!("{:<20} {}", card.label, card.desc);
                let style = if idx == self.state.cursor {
                    Style::default().fg(Color::White).bg(Color::Blue)
                } else {
                    Style::default()
                };
                ListItem::new(line).style(style)
            })
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" Quick Access "));
        Widget::render(list, chunks[1], buf);

        Paragraph::new(" j/k: Move | Enter: Open | 1-9,0: Jump to panel | ?: Help ")
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
    fn test_cursor_bounds() {
        let mut state = DashboardState::new();
        state.handle_key(key(KeyCode::Up));
        assert_eq!(state.cursor, 0);
        for _ in 0..50 {
            state.handle_key(key(KeyCode::Down));
        }
        assert_eq!(state.cursor, cards().len() - 1);
    }

    #[test]
    fn test_enter_opens_selected_panel() {
        let mut state = DashboardState::new();
        assert_eq!(state.handle_key(key(KeyCode::Enter)), DashboardEvent::Open(8));
        state.handle_key(key(KeyCode::Down));
        assert_eq!(state.handle_key(key(KeyCode::Enter)), DashboardEvent::Open(1));
    }

    #[test]
    fn test_cards_reference_valid_panels() {
        for card in cards() {
            assert!(card.panel < 11);
        }
    }

    #[test]
    fn test_render_shows_cards_and_status() {
        let state = DashboardState::new();
        let progress = SyllabusProgress::new();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        DashboardWidget::new(&state, 2, &progress, true).render(area, &mut buf);

        let text: String = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol()))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        assert!(text.contains("Quick Access"));
        assert!(text.contains("Syllabus Tracker"));
        assert!(text.contains("Open tasks: 2"));
        assert!(text.contains("connected"));
    }
}
