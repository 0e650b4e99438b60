//! Help view widget showing all keybindings.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

/// Help categories
const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("↑/k", "Move up"),
            ("↓/j", "Move down"),
            ("←/h", "Move left / Previous"),
            ("→/l", "Move right / Next"),
            ("Tab", "Next panel"),
            ("Shift+Tab", "Previous panel"),
            ("1-9, 0", "Jump to panel by number"),
            ("PgUp/PgDn", "Page up / down"),
        ],
    ),
    (
        "Selection & Actions",
        &[
            ("Enter/Space", "Select / Confirm"),
            ("Esc", "Back / Cancel"),
            ("q", "Quit"),
        ],
    ),
    (
        "Mock Exam",
        &[
            ("Space", "Toggle a topic"),
            ("a / x", "Select all / clear topics"),
            ("m", "Switch Mains / Advanced pattern"),
            ("s", "Cycle subject"),
            ("Enter", "Generate, then start the exam"),
            ("n/p", "Next / previous question"),
            ("Shift+S", "Submit the attempt"),
            ("a", "Request AI analysis of the result"),
        ],
    ),
    (
        "AI Tutor Chat",
        &[
            ("Enter", "Send message"),
            ("Ctrl+R", "Toggle research mode"),
            ("Ctrl+D", "Clear chat history"),
            ("Ctrl+U/Ctrl+N", "Scroll transcript"),
        ],
    ),
    (
        "Flashcards & Formula Sheets",
        &[
            ("Enter", "Generate for the selected chapter"),
            ("Space", "Flip the current card"),
            ("h/l", "Previous / next card"),
            ("r", "Back to chapter selection"),
        ],
    ),
    (
        "Answer Grader",
        &[
            ("Tab", "Switch question / answer field"),
            ("Ctrl+G", "Grade the answer"),
            ("Ctrl+U/Ctrl+N", "Scroll feedback"),
        ],
    ),
    (
        "Task Planner",
        &[
            ("a / i", "Add a task"),
            ("Space", "Toggle done"),
            ("d", "Delete task"),
            ("b", "Break the task into subtasks"),
            ("Shift+P", "Plan today's schedule"),
            ("v", "View the last schedule"),
        ],
    ),
    (
        "Syllabus Tracker",
        &[
            ("s", "Cycle subject"),
            ("h/l", "Switch grade"),
            ("Space", "Toggle chapter complete"),
        ],
    ),
    (
        "School Paper",
        &[
            ("t", "Switch Periodic Test / Term Exam"),
            ("Enter", "Generate the paper"),
            ("e", "Export to a text file"),
        ],
    ),
    (
        "Settings",
        &[("Shift+D", "Delete all saved data (with confirm)")],
    ),
];

/// State for the help view
#[derive(Debug, Default, Clone)]
pub struct HelpViewState {
    /// Current scroll offset (in lines)
    pub scroll_offset: usize,
    /// Total number of lines
    pub total_lines: usize,
    /// Visible height
    pub visible_height: usize,
}

impl HelpViewState {
    /// Create a new help view state
    pub fn new() -> Self {
        Self {
            scroll_offset: 0,
            total_lines: 0,
            visible_height: 0,
        }
    }

    /// Scroll up by n lines
    pub fn scroll_up(&mut self, n: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
    }

    /// Scroll down by n lines
    pub fn scroll_down(&mut self, n: usize) {
        let max_offset = self.total_lines.saturating_sub(self.visible_height);
        self.scroll_offset = (self.scroll_offset + n).min(max_offset);
    }

    /// Page up
    pub fn page_up(&mut self) {
        self.scroll_up(self.visible_height.saturating_sub(2));
    }

    /// Page down
    pub fn page_down(&mut self) {
        self.scroll_down(self.visible_height.saturating_sub(2));
    }
}

/// Help view widget
pub struct HelpWidget<'a> {
    scroll_offset: usize,
    state: &'a mut HelpViewState,
}

impl<'a> HelpWidget<'a> {
    /// Create a new help widget
    pub fn new(state: &'a mut HelpViewState) -> Self {
        Self {
            scroll_offset: state.scroll_offset,
            state,
        }
    }

    /// Build help text lines
    fn build_lines() -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(vec![Span::styled(
                "  prep-tui Help  ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(Span::styled(
                "A JEE preparation companion with AI-generated mocks, tutoring and planning.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
        ];

        for (section_name, bindings) in HELP_SECTIONS {
            lines.push(Line::from(Span::styled(
                format!("─── {} ───", section_name),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));

            for (key, description) in *bindings {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:14}", key), Style::default().fg(Color::Green)),
                    Span::raw(*description),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            "─────────────────────────────",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Green)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("q", Style::default().fg(Color::Green)),
            Span::styled(" to close help", Style::default().fg(Color::DarkGray)),
        ]));

        lines
    }
}

impl Widget for HelpWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let lines = Self::build_lines();

        self.state.total_lines = lines.len();
        self.state.visible_height = area.height.saturating_sub(2) as usize;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help (?) ");

        let inner = block.inner(area);
        block.render(area, buf);

        let visible_lines: Vec<Line> = lines
            .into_iter()
            .skip(self.scroll_offset)
            .take(inner.height as usize)
            .collect();

        Paragraph::new(visible_lines).render(inner, buf);

        if self.state.total_lines > self.state.visible_height {
            let mut scrollbar_state = ScrollbarState::new(
                self.state
                    .total_lines
                    .saturating_sub(self.state.visible_height),
            )
            .position(self.scroll_offset);
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .render(area, buf, &mut scrollbar_state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_clamps_to_content() {
        let mut state = HelpViewState::new();
        state.total_lines = 40;
        state.visible_height = 10;
        state.scroll_down(100);
        assert_eq!(state.scroll_offset, 30);
        state.scroll_up(5);
        assert_eq!(state.scroll_offset, 25);
        state.scroll_up(100);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_build_lines_covers_all_sections() {
        let lines = HelpWidget::build_lines();
        let text: String = lines
            .iter()
            .map(|l| {
                l.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        for (section, _) in HELP_SECTIONS {
            assert!(text.contains(section), "missing section {}", section);
        }
    }
}
