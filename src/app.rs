//! Application state and the main event loop.
//!
//! All panels are kept alive side by side; the active one gets first
//! claim on key events and raises requests (generation, persistence)
//! that the app turns into background work.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::config::AppConfig;
use crate::domain::planner::{parse_subtasks, TaskList};
use crate::domain::SyllabusProgress;
use crate::error::{AppError, GenError, Result};
use crate::services::gen::{GenClient, GenOutcome, GenPayload, GenTarget, ModelTier};
use crate::services::paper::{export_paper, render_paper, PaperMeta};
use crate::services::store::slot;
use crate::services::{prompt, StateStore};
use crate::ui::input::{Action, InputHandler, InputMode};
use crate::ui::widgets::chat::{ChatEvent, ChatState};
use crate::ui::widgets::dashboard::{DashboardEvent, DashboardState};
use crate::ui::widgets::dialog::{ConfirmAction, ConfirmState};
use crate::ui::widgets::exam::{ExamEvent, ExamPanelState, ExamPhase};
use crate::ui::widgets::flashcards::{FlashcardEvent, FlashcardsState};
use crate::ui::widgets::formulas::{FormulasEvent, FormulasState};
use crate::ui::widgets::grader::{GraderEvent, GraderState};
use crate::ui::widgets::help::HelpViewState;
use crate::ui::widgets::mnemonics::{MnemonicsEvent, MnemonicsState};
use crate::ui::widgets::paper::{PaperEvent, PaperState};
use crate::ui::widgets::planner::{PlannerEvent, PlannerState};
use crate::ui::widgets::settings::{SettingsEvent, SettingsState};
use crate::ui::widgets::syllabus::{SyllabusEvent, SyllabusState};

/// The panels of the application, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Dashboard,
    Exam,
    Chat,
    Flashcards,
    Formulas,
    Grader,
    Mnemonics,
    Planner,
    Syllabus,
    Paper,
    Settings,
}

impl Panel {
    pub const ALL: [Panel; 11] = [
        Panel::Dashboard,
        Panel::Exam,
        Panel::Chat,
        Panel::Flashcards,
        Panel::Formulas,
        Panel::Grader,
        Panel::Mnemonics,
        Panel::Planner,
        Panel::Syllabus,
        Panel::Paper,
        Panel::Settings,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Panel::Dashboard => "Dashboard",
            Panel::Exam => "Mock Exam",
            Panel::Chat => "AI Tutor",
            Panel::Flashcards => "Flashcards",
            Panel::Formulas => "Formulas",
            Panel::Grader => "Grader",
            Panel::Mnemonics => "Mnemonics",
            Panel::Planner => "Planner",
            Panel::Syllabus => "Syllabus",
            Panel::Paper => "School Paper",
            Panel::Settings => "Settings",
        }
    }

    pub fn index(self) -> usize {
        Panel::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Panel> {
        Panel::ALL.get(index).copied()
    }

    pub fn next(self) -> Panel {
        Panel::ALL[(self.index() + 1) % Panel::ALL.len()]
    }

    pub fn prev(self) -> Panel {
        Panel::ALL[(self.index() + Panel::ALL.len() - 1) % Panel::ALL.len()]
    }
}

/// Main application state
pub struct App {
    pub config: AppConfig,
    store: StateStore,
    gen: Option<Arc<GenClient>>,
    outcome_tx: UnboundedSender<GenOutcome>,
    outcome_rx: UnboundedReceiver<GenOutcome>,
    input_handler: InputHandler,

    pub active: Panel,
    pub show_help: bool,
    pub help_view_state: HelpViewState,
    pub confirm: ConfirmState,
    pub error_message: Option<String>,
    pub status_message: Option<String>,

    pub dashboard: DashboardState,
    pub exam: ExamPanelState,
    pub chat: ChatState,
    pub flashcards: FlashcardsState,
    pub formulas: FormulasState,
    pub grader: GraderState,
    pub mnemonics: MnemonicsState,
    pub planner: PlannerState,
    pub syllabus: SyllabusState,
    pub paper: PaperState,
    pub settings: SettingsState,
}

impl App {
    /// Create a new application, loading persisted state
    pub fn new(config: AppConfig) -> Result<Self> {
        let store = StateStore::open(config.storage_dir())?;

        let gen = match GenClient::new(&config.gen, config.api_key()) {
            Ok(client) => Some(Arc::new(client)),
            Err(GenError::MissingApiKey) => {
                tracing::warn!("no API key configured, generation is disabled");
                None
            }
            Err(e) => return Err(AppError::Gen(e)),
        };

        let tasks: TaskList = store.load_or_default(slot::TASKS);
        let history = store.load_or_default(slot::CHAT_HISTORY);
        let progress: SyllabusProgress = store.load_or_default(slot::SYLLABUS);
        let last_schedule: Option<String> = store.load_or_default(slot::LAST_SCHEDULE);

        let mut planner = PlannerState::new(tasks);
        planner.schedule = last_schedule;

        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let input_handler = InputHandler::new(config.ui.vim_navigation);

        Ok(Self {
            config,
            store,
            gen,
            outcome_tx,
            outcome_rx,
            input_handler,
            active: Panel::Dashboard,
            show_help: false,
            help_view_state: HelpViewState::new(),
            confirm: ConfirmState::default(),
            error_message: None,
            status_message: None,
            dashboard: DashboardState::new(),
            exam: ExamPanelState::new(),
            chat: ChatState::new(history),
            flashcards: FlashcardsState::new(),
            formulas: FormulasState::new(),
            grader: GraderState::new(),
            mnemonics: MnemonicsState::new(),
            planner,
            syllabus: SyllabusState::new(progress),
            paper: PaperState::new(),
            settings: SettingsState::new(),
        })
    }

    /// True if the generation endpoint is usable
    pub fn gen_ready(&self) -> bool {
        self.gen.is_some()
    }

    /// Loading message for the active panel, if it has work in flight
    pub fn active_loading(&self) -> Option<&'static str> {
        match self.active {
            Panel::Exam if self.exam.phase == ExamPhase::Generating => {
                Some("Generating your mock exam...")
            }
            Panel::Exam if self.exam.analyzing => Some("Analyzing your performance..."),
            Panel::Flashcards if self.flashcards.generating => Some("Generating flashcards..."),
            Panel::Formulas if self.formulas.generating => Some("Compiling the formula sheet..."),
            Panel::Grader if self.grader.grading => Some("Grading your answer..."),
            Panel::Mnemonics if self.mnemonics.generating => Some("Crafting a mnemonic..."),
            Panel::Planner if self.planner.breaking_down.is_some() => {
                Some("Splitting the task...")
            }
            Panel::Planner if self.planner.scheduling => Some("Planning your day..."),
            Panel::Paper if self.paper.generating => Some("Generating the question paper..."),
            _ => None,
        }
    }

    fn generation_in_flight(&self) -> bool {
        self.exam.phase == ExamPhase::Generating
            || self.exam.analyzing
            || self.chat.waiting
            || self.flashcards.generating
            || self.formulas.generating
            || self.grader.grading
            || self.mnemonics.generating
            || self.planner.breaking_down.is_some()
            || self.planner.scheduling
            || self.paper.generating
    }

    /// Handle a key event. Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Any key dismisses transient messages
        self.error_message = None;
        self.status_message = None;

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        if self.show_help {
            return self.handle_help_key(key);
        }

        if self.confirm.is_open() {
            if let Some(action) = self.confirm.handle_key(key) {
                self.apply_confirmed(action);
            }
            return false;
        }

        if self.handle_panel_key(key) {
            return false;
        }

        self.handle_global_key(key)
    }

    fn handle_help_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => self.show_help = false,
            KeyCode::Up | KeyCode::Char('k') => self.help_view_state.scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.help_view_state.scroll_down(1),
            KeyCode::PageUp => self.help_view_state.page_up(),
            KeyCode::PageDown => self.help_view_state.page_down(),
            _ => {}
        }
        false
    }

    /// Offer the key to the active panel. Returns true when consumed.
    fn handle_panel_key(&mut self, key: KeyEvent) -> bool {
        match self.active {
            Panel::Dashboard => match self.dashboard.handle_key(key) {
                DashboardEvent::None => false,
                DashboardEvent::Consumed => true,
                DashboardEvent::Open(index) => {
                    if let Some(panel) = Panel::from_index(index) {
                        self.active = panel;
                    }
                    true
                }
            },
            Panel::Exam => match self.exam.handle_key(key) {
                ExamEvent::None => false,
                ExamEvent::Consumed => true,
                ExamEvent::Generate => {
                    self.start_exam_generation();
                    true
                }
                ExamEvent::Analyze => {
                    self.start_exam_analysis();
                    true
                }
            },
            Panel::Chat => match self.chat.handle_key(key) {
                ChatEvent::None => false,
                ChatEvent::Consumed => true,
                ChatEvent::Send(message) => {
                    self.persist_chat();
                    let prompt = prompt::chat_turn(&message, self.chat.research_mode);
                    self.spawn_text(GenTarget::Chat, prompt, ModelTier::Text);
                    true
                }
                ChatEvent::ClearHistory => {
                    self.confirm.open(ConfirmAction::ClearChatHistory);
                    true
                }
            },
            Panel::Flashcards => match self.flashcards.handle_key(key) {
                FlashcardEvent::None => false,
                FlashcardEvent::Consumed => true,
                FlashcardEvent::Generate => {
                    self.flashcards.generating = true;
                    let setup = &self.flashcards.setup;
                    let prompt = prompt::flashcards(setup.grade(), setup.subject(), setup.chapter());
                    self.spawn_cards(prompt);
                    true
                }
            },
            Panel::Formulas => match self.formulas.handle_key(key) {
                FormulasEvent::None => false,
                FormulasEvent::Consumed => true,
                FormulasEvent::Generate => {
                    self.formulas.generating = true;
                    let setup = &self.formulas.setup;
                    let prompt =
                        prompt::formula_sheet(setup.grade(), setup.subject(), setup.chapter());
                    self.spawn_text(GenTarget::Formulas, prompt, ModelTier::Text);
                    true
                }
            },
            Panel::Grader => match self.grader.handle_key(key) {
                GraderEvent::None => false,
                GraderEvent::Consumed => true,
                GraderEvent::Grade(question, answer) => {
                    let prompt = prompt::grade_answer(&question, &answer);
                    self.spawn_text(GenTarget::Grader, prompt, ModelTier::Exam);
                    true
                }
            },
            Panel::Mnemonics => match self.mnemonics.handle_key(key) {
                MnemonicsEvent::None => false,
                MnemonicsEvent::Consumed => true,
                MnemonicsEvent::Generate(topic) => {
                    let prompt = prompt::mnemonic(&topic);
                    self.spawn_text(GenTarget::Mnemonic, prompt, ModelTier::Text);
                    true
                }
            },
            Panel::Planner => match self.planner.handle_key(key) {
                PlannerEvent::None => false,
                PlannerEvent::Consumed => true,
                PlannerEvent::TasksChanged => {
                    self.persist_tasks();
                    true
                }
                PlannerEvent::Breakdown(parent_id) => {
                    self.start_task_breakdown(parent_id);
                    true
                }
                PlannerEvent::PlanDay => {
                    let pending: Vec<String> = self
                        .planner
                        .tasks
                        .pending()
                        .map(|t| t.text.clone())
                        .collect();
                    let prompt = prompt::day_schedule(&pending);
                    self.spawn_text(GenTarget::Schedule, prompt, ModelTier::Text);
                    true
                }
            },
            Panel::Syllabus => match self.syllabus.handle_key(key) {
                SyllabusEvent::None => false,
                SyllabusEvent::Consumed => true,
                SyllabusEvent::ProgressChanged => {
                    self.persist_syllabus();
                    true
                }
            },
            Panel::Paper => match self.paper.handle_key(key) {
                PaperEvent::None => false,
                PaperEvent::Consumed => true,
                PaperEvent::Generate => {
                    self.paper.generating = true;
                    let meta = self.paper_meta();
                    let prompt =
                        prompt::school_paper(&meta.grade, &meta.subject, &meta.chapter, meta.kind);
                    self.spawn_exam(GenTarget::Paper, prompt);
                    true
                }
                PaperEvent::Export => {
                    self.export_rendered_paper();
                    true
                }
            },
            Panel::Settings => match self.settings.handle_key(key) {
                SettingsEvent::None => false,
                SettingsEvent::Consumed => true,
                SettingsEvent::RequestPurge => {
                    self.confirm.open(ConfirmAction::PurgeAllData);
                    true
                }
            },
        }
    }

    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        if let Some(action) = self.input_handler.handle_key(key, InputMode::Normal) {
            match action {
                Action::Quit => return true,
                Action::NextPanel => self.active = self.active.next(),
                Action::PrevPanel => self.active = self.active.prev(),
                Action::GotoPanel(index) => {
                    if let Some(panel) = Panel::from_index(index) {
                        self.active = panel;
                    }
                }
                Action::Help => {
                    self.show_help = true;
                    self.help_view_state = HelpViewState::new();
                }
                Action::Back => {
                    if self.active == Panel::Dashboard {
                        return true;
                    }
                    self.active = Panel::Dashboard;
                }
                _ => {}
            }
        }
        false
    }

    fn apply_confirmed(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::ClearChatHistory => {
                self.chat.clear_history();
                self.persist_chat();
            }
            ConfirmAction::PurgeAllData => match self.store.purge() {
                Ok(()) => {
                    self.planner = PlannerState::new(TaskList::default());
                    self.chat = ChatState::new(Vec::new());
                    self.syllabus = SyllabusState::new(SyllabusProgress::default());
                    self.settings.purged = true;
                    self.status_message = Some("All saved data deleted".to_string());
                }
                Err(e) => {
                    self.error_message = Some(format!("Could not delete saved data: {}", e));
                }
            },
        }
    }

    fn start_exam_generation(&mut self) {
        let topics = self.exam.topics_for_prompt();
        let prompt = prompt::mock_exam(self.exam.kind, self.exam.subject(), &topics);
        self.exam.phase = ExamPhase::Generating;
        self.spawn_exam(GenTarget::Exam, prompt);
    }

    fn start_exam_analysis(&mut self) {
        let prompt = match &self.exam.score {
            Some(score) => prompt::performance_analysis(score),
            None => return,
        };
        self.exam.analyzing = true;
        self.spawn_text(GenTarget::ExamAnalysis, prompt, ModelTier::Text);
    }

    fn start_task_breakdown(&mut self, parent_id: String) {
        let text = self
            .planner
            .tasks
            .tasks()
            .iter()
            .find(|t| t.id == parent_id)
            .map(|t| t.text.clone());
        match text {
            Some(text) => {
                let prompt = prompt::task_breakdown(&text);
                self.spawn_text(
                    GenTarget::TaskBreakdown { parent_id },
                    prompt,
                    ModelTier::Text,
                );
            }
            None => self.planner.breaking_down = None,
        }
    }

    fn export_rendered_paper(&mut self) {
        let meta = self.paper_meta();
        let Some(rendered) = self.paper.rendered.as_deref() else {
            return;
        };
        let out_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        match export_paper(&out_dir, &meta, rendered) {
            Ok(path) => {
                self.status_message = Some(format!("Saved to {}", path.display()));
                self.paper.exported_to = Some(path);
            }
            Err(e) => {
                self.error_message = Some(format!("Export failed: {}", e));
            }
        }
    }

    fn paper_meta(&self) -> PaperMeta {
        PaperMeta {
            grade: self.paper.setup.grade().to_string(),
            subject: self.paper.setup.subject().to_string(),
            chapter: self.paper.setup.chapter().to_string(),
            kind: self.paper.kind,
        }
    }

    // -- background generation plumbing --

    fn spawn_text(&mut self, target: GenTarget, prompt: String, tier: ModelTier) {
        let Some(client) = self.gen.clone() else {
            self.generation_failed(target, GenError::MissingApiKey.to_string());
            return;
        };
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = client
                .generate_text(&prompt, tier)
                .await
                .map(GenPayload::Text);
            let _ = tx.send(GenOutcome { target, result });
        });
    }

    fn spawn_exam(&mut self, target: GenTarget, prompt: String) {
        let Some(client) = self.gen.clone() else {
            self.generation_failed(target, GenError::MissingApiKey.to_string());
            return;
        };
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = client.generate_exam(&prompt).await.map(GenPayload::Exam);
            let _ = tx.send(GenOutcome { target, result });
        });
    }

    fn spawn_cards(&mut self, prompt: String) {
        let Some(client) = self.gen.clone() else {
            self.generation_failed(GenTarget::Flashcards, GenError::MissingApiKey.to_string());
            return;
        };
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = client
                .generate_flashcards(&prompt)
                .await
                .map(GenPayload::Cards);
            let _ = tx.send(GenOutcome {
                target: GenTarget::Flashcards,
                result,
            });
        });
    }

    /// Drain finished generations from the channel
    fn poll_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            match outcome.result {
                Ok(payload) => self.apply_payload(outcome.target, payload),
                Err(e) => self.generation_failed(outcome.target, e.to_string()),
            }
        }
    }

    fn apply_payload(&mut self, target: GenTarget, payload: GenPayload) {
        match (target, payload) {
            (GenTarget::Exam, GenPayload::Exam(exam)) => self.exam.exam_ready(exam),
            (GenTarget::ExamAnalysis, GenPayload::Text(text)) => {
                self.exam.analysis = Some(text);
                self.exam.analyzing = false;
            }
            (GenTarget::Chat, GenPayload::Text(text)) => {
                self.chat.reply(text);
                self.persist_chat();
            }
            (GenTarget::Flashcards, GenPayload::Cards(cards)) => {
                self.flashcards.deck_ready(cards)
            }
            (GenTarget::Formulas, GenPayload::Text(text)) => self.formulas.sheet_ready(text),
            (GenTarget::Grader, GenPayload::Text(text)) => self.grader.feedback_ready(text),
            (GenTarget::Mnemonic, GenPayload::Text(text)) => self.mnemonics.result_ready(text),
            (GenTarget::Schedule, GenPayload::Text(text)) => {
                self.planner.schedule_ready(text);
                self.persist_schedule();
            }
            (GenTarget::TaskBreakdown { parent_id }, GenPayload::Text(text)) => {
                let subtasks = parse_subtasks(&text);
                self.planner.breakdown_ready(&parent_id, &subtasks);
                self.persist_tasks();
            }
            (GenTarget::Paper, GenPayload::Exam(exam)) => {
                let meta = self.paper_meta();
                let rendered = render_paper(&exam, &meta);
                self.paper.paper_ready(rendered);
            }
            (target, _) => tracing::warn!(?target, "mismatched generation payload"),
        }
    }

    /// Reset the in-flight flag of the failed target and surface the error
    fn generation_failed(&mut self, target: GenTarget, message: String) {
        tracing::warn!(?target, %message, "generation failed");
        match target {
            GenTarget::Exam => {
                if self.exam.phase == ExamPhase::Generating {
                    self.exam.phase = ExamPhase::Setup;
                }
            }
            GenTarget::ExamAnalysis => self.exam.analyzing = false,
            GenTarget::Chat => {
                // The transcript carries the failure, no overlay needed
                self.chat.reply_failed(&message);
                self.persist_chat();
                return;
            }
            GenTarget::Flashcards => self.flashcards.generating = false,
            GenTarget::Formulas => self.formulas.generating = false,
            GenTarget::Grader => self.grader.grading = false,
            GenTarget::Mnemonic => self.mnemonics.generating = false,
            GenTarget::Schedule => self.planner.scheduling = false,
            GenTarget::TaskBreakdown { .. } => self.planner.breaking_down = None,
            GenTarget::Paper => self.paper.generating = false,
        }
        self.error_message = Some(message);
    }

    // -- persistence --

    fn persist_tasks(&mut self) {
        if let Err(e) = self.store.save(slot::TASKS, &self.planner.tasks) {
            tracing::warn!("failed to save tasks: {}", e);
            self.error_message = Some(format!("Could not save tasks: {}", e));
        }
    }

    fn persist_chat(&mut self) {
        if let Err(e) = self.store.save(slot::CHAT_HISTORY, &self.chat.history) {
            tracing::warn!("failed to save chat history: {}", e);
            self.error_message = Some(format!("Could not save chat history: {}", e));
        }
    }

    fn persist_syllabus(&mut self) {
        if let Err(e) = self.store.save(slot::SYLLABUS, &self.syllabus.progress) {
            tracing::warn!("failed to save syllabus progress: {}", e);
            self.error_message = Some(format!("Could not save syllabus progress: {}", e));
        }
    }

    fn persist_schedule(&mut self) {
        if let Err(e) = self.store.save(slot::LAST_SCHEDULE, &self.planner.schedule) {
            tracing::warn!("failed to save schedule: {}", e);
            self.error_message = Some(format!("Could not save schedule: {}", e));
        }
    }

    /// Periodic work between key events
    fn on_tick(&mut self) {
        if self.exam.phase == ExamPhase::InProgress && self.exam.time_expired() {
            self.exam.submit();
            self.status_message = Some("Time up, attempt submitted automatically".to_string());
        }
    }

    /// Run the main event loop until quit
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);
        let mut last_tick = Instant::now();

        loop {
            self.poll_outcomes();

            terminal.draw(|f| crate::ui::layout::draw(f, self))?;

            // Shorter timeout while a generation runs keeps the
            // spinner and channel responsive
            let timeout = if self.generation_in_flight() {
                Duration::from_millis(50)
            } else {
                tick_rate.saturating_sub(last_tick.elapsed())
            };

            if event::poll(timeout).map_err(|e| AppError::Terminal(e.to_string()))? {
                match event::read().map_err(|e| AppError::Terminal(e.to_string()))? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            break;
                        }
                    }
                    Event::Resize(width, height) => {
                        tracing::debug!("terminal resized to {}x{}", width, height);
                    }
                    _ => {}
                }
            }

            if last_tick.elapsed() >= tick_rate {
                last_tick = Instant::now();
                self.on_tick();
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_order_roundtrip() {
        for (index, panel) in Panel::ALL.iter().enumerate() {
            assert_eq!(panel.index(), index);
            assert_eq!(Panel::from_index(index), Some(*panel));
        }
        assert_eq!(Panel::from_index(Panel::ALL.len()), None);
    }

    #[test]
    fn test_panel_cycling_wraps() {
        assert_eq!(Panel::Settings.next(), Panel::Dashboard);
        assert_eq!(Panel::Dashboard.prev(), Panel::Settings);
        assert_eq!(Panel::Dashboard.next(), Panel::Exam);
    }
}
