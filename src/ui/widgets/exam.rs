//! Mock exam panel: setup, timed attempt, scorecard and analysis.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use crate::domain::exam::{score_exam, AnswerSheet, Exam, Question, QuestionKind, Score};
use crate::domain::syllabus::{chapters, GRADES, SUBJECT_NAMES};
use crate::services::paper::strip_markup;
use crate::services::prompt::ExamKind;
use crate::ui::widgets::text_input::{TextInputAction, TextInputState};
use crate::ui::widgets::text_view::{TextViewState, TextViewWidget};

/// Lifecycle of the exam panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExamPhase {
    #[default]
    Setup,
    Generating,
    Ready,
    InProgress,
    Scored,
}

/// Requests the panel raises for the application to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamEvent {
    None,
    Consumed,
    Generate,
    Analyze,
}

/// Full state of the mock exam panel
#[derive(Debug)]
pub struct ExamPanelState {
    pub phase: ExamPhase,

    // Setup
    pub kind: ExamKind,
    subject_index: usize,
    pub topic_cursor: usize,
    pub selected_topics: BTreeSet<String>,

    // Attempt
    pub exam: Option<Exam>,
    pub answers: AnswerSheet,
    pub question_index: usize,
    pub option_cursor: usize,
    pub answer_input: TextInputState,
    pub answering: bool,
    pub deadline: Option<Instant>,

    // Result
    pub score: Option<Score>,
    pub analysis: Option<String>,
    pub analyzing: bool,
    pub result_view: TextViewState,
}

impl Default for ExamPanelState {
    fn default() -> Self {
        Self {
            phase: ExamPhase::Setup,
            kind: ExamKind::JeeMain,
            subject_index: 0,
            topic_cursor: 0,
            selected_topics: BTreeSet::new(),
            exam: None,
            answers: AnswerSheet::new(),
            question_index: 0,
            option_cursor: 0,
            answer_input: TextInputState::new(),
            answering: false,
            deadline: None,
            score: None,
            analysis: None,
            analyzing: false,
            result_view: TextViewState::new(),
        }
    }
}

impl ExamPanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject(&self) -> &'static str {
        SUBJECT_NAMES[self.subject_index]
    }

    /// Topics for the selected subject across both grades
    pub fn available_topics(&self) -> Vec<&'static str> {
        GRADES
            .iter()
            .flat_map(|g| chapters(self.subject(), g).iter().copied())
            .collect()
    }

    /// Selected topics in catalog order, for the prompt
    pub fn topics_for_prompt(&self) -> Vec<String> {
        self.available_topics()
            .into_iter()
            .filter(|t| self.selected_topics.contains(*t))
            .map(String::from)
            .collect()
    }

    fn cycle_subject(&mut self, forward: bool) {
        let len = SUBJECT_NAMES.len();
        self.subject_index = if forward {
            (self.subject_index + 1) % len
        } else {
            (self.subject_index + len - 1) % len
        };
        self.selected_topics.clear();
        self.topic_cursor = 0;
    }

    fn toggle_topic_at_cursor(&mut self) {
        let topics = self.available_topics();
        if let Some(topic) = topics.get(self.topic_cursor) {
            let topic = topic.to_string();
            if !self.selected_topics.remove(&topic) {
                self.selected_topics.insert(topic);
            }
        }
    }

    /// Install a freshly generated exam and present it for starting
    pub fn exam_ready(&mut self, exam: Exam) {
        self.answers = AnswerSheet::new();
        self.question_index = 0;
        self.option_cursor = 0;
        self.score = None;
        self.analysis = None;
        self.exam = Some(exam);
        self.phase = ExamPhase::Ready;
    }

    /// Begin the timed attempt
    pub fn start(&mut self) {
        if let Some(exam) = &self.exam {
            self.deadline =
                Some(Instant::now() + Duration::from_secs(exam.duration_seconds));
            self.phase = ExamPhase::InProgress;
        }
    }

    /// Remaining attempt time, zero once expired
    pub fn time_remaining(&self) -> Duration {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
            .unwrap_or(Duration::ZERO)
    }

    /// True when the clock has run out mid-attempt
    pub fn time_expired(&self) -> bool {
        self.phase == ExamPhase::InProgress && self.time_remaining() == Duration::ZERO
    }

    /// Score the attempt and move to the result screen
    pub fn submit(&mut self) {
        if let Some(exam) = &self.exam {
            self.score = Some(score_exam(exam, &self.answers));
            self.phase = ExamPhase::Scored;
            self.deadline = None;
            self.answering = false;
            self.result_view.reset();
        }
    }

    /// Discard the attempt and return to setup. Topic selection is kept.
    pub fn reset(&mut self) {
        self.exam = None;
        self.answers = AnswerSheet::new();
        self.score = None;
        self.analysis = None;
        self.analyzing = false;
        self.deadline = None;
        self.answering = false;
        self.phase = ExamPhase::Setup;
    }

    /// Keep the result view's scroll bounds in sync with the analysis text
    pub fn sync_view(&mut self, viewport_height: usize) {
        let lines = self
            .analysis
            .as_deref()
            .map(|a| strip_markup(a).lines().count())
            .unwrap_or(0);
        self.result_view.update_dimensions(lines, viewport_height);
    }

    fn flat_questions(&self) -> Vec<&Question> {
        self.exam
            .as_ref()
            .map(|e| e.questions().collect())
            .unwrap_or_default()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.flat_questions().get(self.question_index).copied()
    }

    fn move_question(&mut self, forward: bool) {
        let count = self.flat_questions().len();
        if count == 0 {
            return;
        }
        if forward && self.question_index + 1 < count {
            self.question_index += 1;
        } else if !forward {
            self.question_index = self.question_index.saturating_sub(1);
        }
        self.option_cursor = 0;
        self.answer_input.clear();
        self.answering = false;
    }

    fn record_option_answer(&mut self) {
        let Some(q) = self.current_question() else {
            return;
        };
        let (id, value) = (
            q.id.clone(),
            q.options.get(self.option_cursor).cloned().unwrap_or_default(),
        );
        if let Some(exam) = &self.exam {
            self.answers.record(exam, &id, value);
        }
    }

    fn record_typed_answer(&mut self) {
        let Some(q) = self.current_question() else {
            return;
        };
        let id = q.id.clone();
        let value = self.answer_input.value().trim().to_string();
        if value.is_empty() {
            return;
        }
        if let Some(exam) = &self.exam {
            self.answers.record(exam, &id, value);
        }
    }

    /// Whether the focused question is answered with option selection
    fn uses_options(&self) -> bool {
        self.current_question()
            .map(|q| q.kind == QuestionKind::Mcq && !q.options.is_empty())
            .unwrap_or(false)
    }

    /// Handle a key for the current phase
    pub fn handle_key(&mut self, key: KeyEvent) -> ExamEvent {
        match self.phase {
            ExamPhase::Setup => self.handle_setup_key(key),
            ExamPhase::Generating => ExamEvent::None,
            ExamPhase::Ready => self.handle_ready_key(key),
            ExamPhase::InProgress => self.handle_attempt_key(key),
            ExamPhase::Scored => self.handle_scored_key(key),
        }
    }

    fn handle_setup_key(&mut self, key: KeyEvent) -> ExamEvent {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.topic_cursor = self.topic_cursor.saturating_sub(1);
                ExamEvent::Consumed
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.available_topics().len().saturating_sub(1);
                self.topic_cursor = (self.topic_cursor + 1).min(max);
                ExamEvent::Consumed
            }
            KeyCode::Char(' ') => {
                self.toggle_topic_at_cursor();
                ExamEvent::Consumed
            }
            KeyCode::Char('a') => {
                self.selected_topics =
                    self.available_topics().iter().map(|t| t.to_string()).collect();
                ExamEvent::Consumed
            }
            KeyCode::Char('x') => {
                self.selected_topics.clear();
                ExamEvent::Consumed
            }
            KeyCode::Char('m') => {
                self.kind = match self.kind {
                    ExamKind::JeeMain => ExamKind::JeeAdvanced,
                    ExamKind::JeeAdvanced => ExamKind::JeeMain,
                };
                ExamEvent::Consumed
            }
            KeyCode::Char('s') | KeyCode::Right | KeyCode::Char('l') => {
                self.cycle_subject(true);
                ExamEvent::Consumed
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.cycle_subject(false);
                ExamEvent::Consumed
            }
            KeyCode::Enter => {
                if self.selected_topics.is_empty() {
                    ExamEvent::None
                } else {
                    ExamEvent::Generate
                }
            }
            _ => ExamEvent::None,
        }
    }

    fn handle_ready_key(&mut self, key: KeyEvent) -> ExamEvent {
        match key.code {
            KeyCode::Enter => {
                self.start();
                ExamEvent::Consumed
            }
            KeyCode::Esc | KeyCode::Char('r') => {
                self.reset();
                ExamEvent::Consumed
            }
            _ => ExamEvent::None,
        }
    }

    fn handle_attempt_key(&mut self, key: KeyEvent) -> ExamEvent {
        // Typing a numerical or text answer captures everything until
        // Enter or Esc.
        if self.answering {
            match self.answer_input.handle_key(key) {
                TextInputAction::Submit => {
                    self.record_typed_answer();
                    self.answering = false;
                }
                TextInputAction::Cancel => self.answering = false,
                _ => {}
            }
            return ExamEvent::Consumed;
        }

        match key.code {
            KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('l') => {
                self.move_question(true);
                ExamEvent::Consumed
            }
            KeyCode::Left | KeyCode::Char('p') | KeyCode::Char('h') => {
                self.move_question(false);
                ExamEvent::Consumed
            }
            KeyCode::Up | KeyCode::Char('k') if self.uses_options() => {
                self.option_cursor = self.option_cursor.saturating_sub(1);
                ExamEvent::Consumed
            }
            KeyCode::Down | KeyCode::Char('j') if self.uses_options() => {
                let max = self
                    .current_question()
                    .map(|q| q.options.len().saturating_sub(1))
                    .unwrap_or(0);
                self.option_cursor = (self.option_cursor + 1).min(max);
                ExamEvent::Consumed
            }
            KeyCode::Enter if self.uses_options() => {
                self.record_option_answer();
                self.move_question(true);
                ExamEvent::Consumed
            }
            KeyCode::Enter => {
                self.answering = true;
                if let Some(q) = self.current_question() {
                    let existing =
                        self.answers.get(&q.id).map(String::from).unwrap_or_default();
                    self.answer_input.clear();
                    for c in existing.chars() {
                        self.answer_input.value.push(c);
                        self.answer_input.cursor += 1;
                    }
                }
                ExamEvent::Consumed
            }
            KeyCode::Char('S') => {
                self.submit();
                ExamEvent::Consumed
            }
            _ => ExamEvent::None,
        }
    }

    fn handle_scored_key(&mut self, key: KeyEvent) -> ExamEvent {
        match key.code {
            KeyCode::Char('a') if self.analysis.is_none() && !self.analyzing => {
                ExamEvent::Analyze
            }
            KeyCode::Char('r') => {
                self.reset();
                ExamEvent::Consumed
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.result_view.scroll_up(1);
                ExamEvent::Consumed
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.result_view.scroll_down(1);
                ExamEvent::Consumed
            }
            _ => ExamEvent::None,
        }
    }
}

fn format_duration(d: Duration) -> String {
    let total = d.as_secs();
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

/// Widget rendering the exam panel for its current phase
pub struct ExamWidget<'a> {
    state: &'a ExamPanelState,
}

impl<'a> ExamWidget<'a> {
    pub fn new(state: &'a ExamPanelState) -> Self {
        Self { state }
    }

    fn render_setup(&self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(area);

        let header = Paragraph::new(vec![
            Line::from(vec![
                Span::raw("Pattern: "),
                Span::styled(
                    self.state.kind.display_name(),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::raw("   Subject: "),
                Span::styled(
                    self.state.subject(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                format!("{} topics selected", self.state.selected_topics.len()),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Mock Exam Setup "));
        header.render(chunks[0], buf);

        let visible = chunks[1].height.saturating_sub(2) as usize;
        let offset = self
            .state
            .topic_cursor
            .saturating_sub(visible.saturating_sub(1));
        let items: Vec<ListItem> = self
            .state
            .available_topics()
            .into_iter()
            .enumerate()
            .skip(offset)
            .take(visible.max(1))
            .map(|(idx, topic)| {
                let checked = self.state.selected_topics.contains(topic);
                let mark = if checked { "[x]" } else { "[ ]" };
                let line = format!("{} {}", mark, topic);
                let style = if idx == self.state.topic_cursor {
                    Style::default().fg(Color::White).bg(Color::Blue)
                } else if checked {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                ListItem::new(line).style(style)
            })
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" Topics "));
        Widget::render(list, chunks[1], buf);

        Paragraph::new(" space: Tick | a: All | x: None | m: Pattern | s: Subject | Enter: Generate ")
            .style(Style::default().fg(Color::DarkGray))
            .render(chunks[2], buf);
    }

    fn render_ready(&self, area: Rect, buf: &mut Buffer) {
        let Some(exam) = &self.state.exam else {
            return;
        };
        let lines = vec![
            Line::from(Span::styled(
                "Paper generated",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Questions: {}", exam.question_count())),
            Line::from(format!(
                "Duration:  {}",
                format_duration(Duration::from_secs(exam.duration_seconds))
            )),
            Line::from("Marking:   +4 correct, -1 wrong"),
            Line::from(""),
            Line::from(Span::styled(
                "Enter: Start attempt | Esc: Discard",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Mock Exam "))
            .render(area, buf);
    }

    fn render_attempt(&self, area: Rect, buf: &mut Buffer) {
        let Some(q) = self.state.current_question() else {
            return;
        };
        let total = self.state.exam.as_ref().map(Exam::question_count).unwrap_or(0);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(area);

        let answered = self.state.answers.len();
        let header = Paragraph::new(format!(
            " Q {}/{} | Answered: {} | Time left: {} ",
            self.state.question_index + 1,
            total,
            answered,
            format_duration(self.state.time_remaining()),
        ))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
        header.render(chunks[0], buf);

        let mut lines: Vec<Line> = Vec::new();
        if let Some(para) = &q.paragraph_text {
            lines.push(Line::from(Span::styled(
                strip_markup(para),
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(""));
        }
        if let Some(case) = &q.case_text {
            lines.push(Line::from(Span::styled(
                strip_markup(case),
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            format!("[{}] {}", q.kind.display_name(), strip_markup(&q.text)),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));

        if q.kind == QuestionKind::Mcq {
            let recorded = self.state.answers.get(&q.id);
            for (oi, opt) in q.options.iter().enumerate() {
                let label = (b'a' + oi as u8) as char;
                let chosen = recorded == Some(opt.as_str());
                let cursor = oi == self.state.option_cursor;
                let mark = if chosen { "(x)" } else { "( )" };
                let style = if cursor {
                    Style::default().fg(Color::White).bg(Color::Blue)
                } else if chosen {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                lines.push(Line::from(Span::styled(
                    format!("  {} ({}) {}", mark, label, strip_markup(opt)),
                    style,
                )));
            }
        } else if self.state.answering {
            lines.push(Line::from(Span::styled(
                format!("Answer: {}_", self.state.answer_input.value()),
                Style::default().fg(Color::Yellow),
            )));
        } else {
            let recorded = self.state.answers.get(&q.id).unwrap_or("(not answered)");
            lines.push(Line::from(format!("Answer: {}", recorded)));
            lines.push(Line::from(Span::styled(
                "Press Enter to type an answer",
                Style::default().fg(Color::DarkGray),
            )));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Question "))
            .render(chunks[1], buf);

        Paragraph::new(" h/l: Question | j/k: Option | Enter: Answer | S: Submit ")
            .style(Style::default().fg(Color::DarkGray))
            .render(chunks[2], buf);
    }

    fn render_scored(&self, area: Rect, buf: &mut Buffer) {
        let Some(score) = &self.state.score else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(8),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(area);

        let pct = if score.max_score > 0 {
            (score.total_score.max(0) as f64 / score.max_score as f64 * 100.0) as u16
        } else {
            0
        };
        let summary = vec![
            Line::from(Span::styled(
                format!("Score: {}/{}", score.total_score, score.max_score),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "Correct: {}  Wrong: {}  Skipped: {}",
                score.correct, score.wrong, score.skipped
            )),
            Line::from(format!("Estimated percentile: {:.2}", score.percentile)),
        ];
        Paragraph::new(summary)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Scorecard "))
            .render(chunks[0], buf);

        let gauge_area = Rect {
            x: chunks[0].x + 2,
            y: chunks[0].bottom().saturating_sub(2),
            width: chunks[0].width.saturating_sub(4),
            height: 1,
        };
        Gauge::default()
            .ratio(f64::from(pct) / 100.0)
            .gauge_style(Style::default().fg(Color::Green))
            .render(gauge_area, buf);

        let analysis_text = if self.state.analyzing {
            "Analyzing performance..."
        } else {
            self.state
                .analysis
                .as_deref()
                .unwrap_or("Press 'a' for an expert strategy analysis.")
        };
        TextViewWidget::new(analysis_text, "Analysis")
            .scroll_offset(self.state.result_view.scroll_offset())
            .render(chunks[1], buf);

        Paragraph::new(" a: Analyze | j/k: Scroll | r: New exam ")
            .style(Style::default().fg(Color::DarkGray))
            .render(chunks[2], buf);
    }
}

impl Widget for ExamWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state.phase {
            ExamPhase::Setup => self.render_setup(area, buf),
            ExamPhase::Generating => {
                Paragraph::new("Setting your paper... this can take a minute.")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Yellow))
                    .block(Block::default().borders(Borders::ALL).title(" Mock Exam "))
                    .render(area, buf);
            }
            ExamPhase::Ready => self.render_ready(area, buf),
            ExamPhase::InProgress => self.render_attempt(area, buf),
            ExamPhase::Scored => self.render_scored(area, buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::exam::Section;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn two_question_exam() -> Exam {
        Exam {
            duration_seconds: 3600,
            total_max_marks: None,
            sections: vec![Section {
                name: "Section A".to_string(),
                context: None,
                questions: vec![
                    Question {
                        id: "q1".to_string(),
                        kind: QuestionKind::Mcq,
                        text: "Pick one".to_string(),
                        options: vec!["A".into(), "B".into()],
                        correct_option: "A".to_string(),
                        explanation: "first".to_string(),
                        marks: None,
                        case_text: None,
                        paragraph_text: None,
                    },
                    Question {
                        id: "q2".to_string(),
                        kind: QuestionKind::Numerical,
                        text: "Compute".to_string(),
                        options: vec![],
                        correct_option: "42".to_string(),
                        explanation: "second".to_string(),
                        marks: None,
                        case_text: None,
                        paragraph_text: None,
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_generate_requires_topics() {
        let mut state = ExamPanelState::new();
        assert_eq!(state.handle_key(key(KeyCode::Enter)), ExamEvent::None);

        state.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(state.selected_topics.len(), 1);
        assert_eq!(state.handle_key(key(KeyCode::Enter)), ExamEvent::Generate);
    }

    #[test]
    fn test_select_all_and_clear() {
        let mut state = ExamPanelState::new();
        state.handle_key(key(KeyCode::Char('a')));
        assert_eq!(state.selected_topics.len(), state.available_topics().len());
        state.handle_key(key(KeyCode::Char('x')));
        assert!(state.selected_topics.is_empty());
    }

    #[test]
    fn test_subject_change_clears_selection() {
        let mut state = ExamPanelState::new();
        state.handle_key(key(KeyCode::Char(' ')));
        state.handle_key(key(KeyCode::Char('s')));
        assert_eq!(state.subject(), "Chemistry");
        assert!(state.selected_topics.is_empty());
    }

    #[test]
    fn test_attempt_flow_mcq_then_typed() {
        let mut state = ExamPanelState::new();
        state.exam_ready(two_question_exam());
        assert_eq!(state.phase, ExamPhase::Ready);

        state.handle_key(key(KeyCode::Enter));
        assert_eq!(state.phase, ExamPhase::InProgress);

        // answer the MCQ with the second option
        state.handle_key(key(KeyCode::Down));
        state.handle_key(key(KeyCode::Enter));
        assert_eq!(state.answers.get("q1"), Some("B"));
        assert_eq!(state.question_index, 1);

        // type the numerical answer
        state.handle_key(key(KeyCode::Enter));
        assert!(state.answering);
        for c in "42".chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
        state.handle_key(key(KeyCode::Enter));
        assert!(!state.answering);
        assert_eq!(state.answers.get("q2"), Some("42"));

        // submit and score
        state.handle_key(key(KeyCode::Char('S')));
        assert_eq!(state.phase, ExamPhase::Scored);
        let score = state.score.as_ref().unwrap();
        assert_eq!(score.correct, 1);
        assert_eq!(score.wrong, 1);
        assert_eq!(score.total_score, 3);
    }

    #[test]
    fn test_analyze_event_only_once() {
        let mut state = ExamPanelState::new();
        state.exam_ready(two_question_exam());
        state.start();
        state.submit();

        assert_eq!(state.handle_key(key(KeyCode::Char('a'))), ExamEvent::Analyze);
        state.analyzing = true;
        assert_eq!(state.handle_key(key(KeyCode::Char('a'))), ExamEvent::None);
        state.analyzing = false;
        state.analysis = Some("tips".to_string());
        assert_eq!(state.handle_key(key(KeyCode::Char('a'))), ExamEvent::None);
    }

    #[test]
    fn test_reset_returns_to_setup() {
        let mut state = ExamPanelState::new();
        state.handle_key(key(KeyCode::Char(' ')));
        state.exam_ready(two_question_exam());
        state.start();
        state.submit();
        state.handle_key(key(KeyCode::Char('r')));
        assert_eq!(state.phase, ExamPhase::Setup);
        assert!(state.exam.is_none());
        // topic ticks survive a reset
        assert_eq!(state.selected_topics.len(), 1);
    }
}
