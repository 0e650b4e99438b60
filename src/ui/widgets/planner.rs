//! Task planner panel: task list, AI breakdown and day schedule.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::domain::planner::TaskList;
use crate::services::paper::strip_markup;
use crate::ui::widgets::text_input::{TextInputAction, TextInputState, TextInputWidget};
use crate::ui::widgets::text_view::{TextViewState, TextViewWidget};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerEvent {
    None,
    Consumed,
    /// Task list changed, persist it
    TasksChanged,
    /// Break the task with this id into sub-tasks
    Breakdown(String),
    /// Build a day schedule from pending tasks
    PlanDay,
}

/// State of the planner panel
#[derive(Debug, Default)]
pub struct PlannerState {
    pub tasks: TaskList,
    pub cursor: usize,
    pub input: TextInputState,
    pub adding: bool,
    /// Parent task id currently being broken down
    pub breaking_down: Option<String>,
    pub schedule: Option<String>,
    pub scheduling: bool,
    pub show_schedule: bool,
    pub view: TextViewState,
}

impl PlannerState {
    pub fn new(tasks: TaskList) -> Self {
        Self {
            tasks,
            ..Self::default()
        }
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.tasks.len().saturating_sub(1));
    }

    fn selected_id(&self) -> Option<String> {
        self.tasks.get(self.cursor).map(|t| t.id.clone())
    }

    /// Splice generated sub-tasks under their parent
    pub fn breakdown_ready(&mut self, parent_id: &str, texts: &[String]) {
        self.tasks.insert_subtasks(parent_id, texts);
        self.breaking_down = None;
    }

    pub fn schedule_ready(&mut self, text: String) {
        self.schedule = Some(text);
        self.scheduling = false;
        self.show_schedule = true;
        self.view.reset();
    }

    /// Keep the view's scroll bounds in sync with the schedule text
    pub fn sync_view(&mut self, viewport_height: usize) {
        let lines = self
            .schedule
            .as_deref()
            .map(|s| strip_markup(s).lines().count())
            .unwrap_or(0);
        self.view.update_dimensions(lines, viewport_height);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PlannerEvent {
        if self.adding {
            return match self.input.handle_key(key) {
                TextInputAction::Submit => {
                    let added = self.tasks.add(self.input.value()).is_some();
                    self.input.clear();
                    self.adding = false;
                    if added {
                        PlannerEvent::TasksChanged
                    } else {
                        PlannerEvent::Consumed
                    }
                }
                TextInputAction::Cancel => {
                    self.input.clear();
                    self.adding = false;
                    PlannerEvent::Consumed
                }
                _ => PlannerEvent::Consumed,
            };
        }

        if self.show_schedule {
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') => {
                    self.show_schedule = false;
                    return PlannerEvent::Consumed;
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.view.scroll_up(1);
                    return PlannerEvent::Consumed;
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.view.scroll_down(1);
                    return PlannerEvent::Consumed;
                }
                _ => return PlannerEvent::None,
            }
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                PlannerEvent::Consumed
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor += 1;
                self.clamp_cursor();
                PlannerEvent::Consumed
            }
            KeyCode::Char('a') | KeyCode::Char('i') => {
                self.adding = true;
                PlannerEvent::Consumed
            }
            KeyCode::Char(' ') | KeyCode::Enter => match self.selected_id() {
                Some(id) => {
                    self.tasks.toggle(&id);
                    PlannerEvent::TasksChanged
                }
                None => PlannerEvent::Consumed,
            },
            KeyCode::Char('d') | KeyCode::Delete => match self.selected_id() {
                Some(id) => {
                    self.tasks.remove(&id);
                    self.clamp_cursor();
                    PlannerEvent::TasksChanged
                }
                None => PlannerEvent::Consumed,
            },
            KeyCode::Char('b') => match self.selected_id() {
                Some(id) if self.breaking_down.is_none() => {
                    self.breaking_down = Some(id.clone());
                    PlannerEvent::Breakdown(id)
                }
                _ => PlannerEvent::Consumed,
            },
            KeyCode::Char('P') => {
                if self.tasks.pending_count() == 0 || self.scheduling {
                    PlannerEvent::Consumed
                } else {
                    self.scheduling = true;
                    PlannerEvent::PlanDay
                }
            }
            KeyCode::Char('v') if self.schedule.is_some() => {
                self.show_schedule = true;
                PlannerEvent::Consumed
            }
            _ => PlannerEvent::None,
        }
    }
}

/// Widget rendering the planner panel
pub struct PlannerWidget<'a> {
    state: &'a PlannerState,
}

impl<'a> PlannerWidget<'a> {
    pub fn new(state: &'a PlannerState) -> Self {
        Self { state }
    }
}

impl Widget for PlannerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.state.show_schedule {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(1)])
                .split(area);
            let content = self.state.schedule.as_deref().unwrap_or("");
            TextViewWidget::new(content, "Today's Schedule (09:00 - 15:00)")
                .scroll_offset(self.state.view.scroll_offset())
                .focused(true)
                .render(chunks[0], buf);
            Paragraph::new(" j/k: Scroll | Esc: Back to tasks ")
                .style(Style::default().fg(Color::DarkGray))
                .render(chunks[1], buf);
            return;
        }

        let mut constraints = vec![Constraint::Min(0), Constraint::Length(1)];
        if self.state.adding {
            constraints.insert(1, Constraint::Length(3));
        }
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let pending = self.state.tasks.pending_count();
        let title = format!(
            " Study Planner ({} open / {} total) ",
            pending,
            self.state.tasks.len()
        );

        if self.state.tasks.is_empty() {
            Paragraph::new("No tasks yet. Press 'a' to add one.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(title))
                .render(chunks[0], buf);
        } else {
            let busy_id = self.state.breaking_down.as_deref();
            let items: Vec<ListItem> = self
                .state
                .tasks
                .tasks()
                .iter()
                .enumerate()
                .map(|(idx, task)| {
                    let mark = if task.completed { "[x]" } else { "[ ]" };
                    let suffix = if busy_id == Some(task.id.as_str()) {
                        " (splitting...)"
                    } else {
                        ""
                    };
                    let line = format!("{} {}{}", mark, task.text, suffix);
                    let style = if idx == self.state.cursor {
                        Style::default().fg(Color::White).bg(Color::Blue)
                    } else if task.completed {
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT)
                    } else if task.is_subtask() {
                        Style::default().fg(Color::Cyan)
                    } else {
                        Style::default()
                    };
                    ListItem::new(line).style(style)
                })
                .collect();
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(title));
            Widget::render(list, chunks[0], buf);
        }

        if self.state.adding {
            TextInputWidget::new(&self.state.input)
                .title("New Task")
                .placeholder("e.g. Finish rotational motion DPP")
                .render(chunks[1], buf);
        }

        let footer = if self.state.scheduling {
            " Building your schedule... "
        } else {
            " a: Add | space: Done | d: Delete | b: Break down | P: Plan my day | v: Schedule "
        };
        Paragraph::new(footer)
            .style(Style::default().fg(Color::DarkGray))
            .render(chunks[chunks.len() - 1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn with_tasks(texts: &[&str]) -> PlannerState {
        let mut tasks = TaskList::new();
        for t in texts {
            tasks.add(t);
        }
        PlannerState::new(tasks)
    }

    #[test]
    fn test_add_task_flow() {
        let mut state = PlannerState::default();
        state.handle_key(key(KeyCode::Char('a')));
        assert!(state.adding);
        for c in "Revise".chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(state.handle_key(key(KeyCode::Enter)), PlannerEvent::TasksChanged);
        assert!(!state.adding);
        assert_eq!(state.tasks.len(), 1);
    }

    #[test]
    fn test_toggle_and_delete_report_changes() {
        let mut state = with_tasks(&["one", "two"]);
        assert_eq!(state.handle_key(key(KeyCode::Char(' '))), PlannerEvent::TasksChanged);
        assert!(state.tasks.get(0).unwrap().completed);

        assert_eq!(state.handle_key(key(KeyCode::Char('d'))), PlannerEvent::TasksChanged);
        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_breakdown_event_and_completion() {
        let mut state = with_tasks(&["parent"]);
        let id = state.tasks.get(0).unwrap().id.clone();
        assert_eq!(
            state.handle_key(key(KeyCode::Char('b'))),
            PlannerEvent::Breakdown(id.clone())
        );
        // no second request while one is in flight
        assert_eq!(state.handle_key(key(KeyCode::Char('b'))), PlannerEvent::Consumed);

        state.breakdown_ready(&id, &["read".to_string(), "solve".to_string()]);
        assert!(state.breaking_down.is_none());
        assert_eq!(state.tasks.len(), 3);
    }

    #[test]
    fn test_plan_day_needs_pending_task() {
        let mut state = PlannerState::default();
        assert_eq!(state.handle_key(key(KeyCode::Char('P'))), PlannerEvent::Consumed);

        let mut state = with_tasks(&["open task"]);
        assert_eq!(state.handle_key(key(KeyCode::Char('P'))), PlannerEvent::PlanDay);
        assert!(state.scheduling);

        state.schedule_ready("<b>09:00</b> deep work".to_string());
        assert!(state.show_schedule);
        state.handle_key(key(KeyCode::Esc));
        assert!(!state.show_schedule);
    }
}
