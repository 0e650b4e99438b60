//! Keyboard input handling with vim-style navigation support.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Panel navigation mode
    #[default]
    Normal,
    /// Typing into a text field
    Insert,
}

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PageUp,
    PageDown,
    Home,
    End,

    // Selection
    Select,
    Back,

    // Panel switching
    NextPanel,
    PrevPanel,
    GotoPanel(usize),

    // Misc
    Help,
    Quit,
}

/// Input handler for processing keyboard events
pub struct InputHandler {
    vim_navigation: bool,
}

impl InputHandler {
    /// Create a new input handler
    pub fn new(vim_navigation: bool) -> Self {
        Self { vim_navigation }
    }

    /// Handle a key event and return the corresponding action
    pub fn handle_key(&self, key: KeyEvent, mode: InputMode) -> Option<Action> {
        match mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Insert => self.handle_insert_key(key),
        }
    }

    fn handle_normal_key(&self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        match key.code {
            // Arrow keys always work
            KeyCode::Up => Some(Action::MoveUp),
            KeyCode::Down => Some(Action::MoveDown),
            KeyCode::Left => Some(Action::MoveLeft),
            KeyCode::Right => Some(Action::MoveRight),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::Home => Some(Action::Home),
            KeyCode::End => Some(Action::End),

            // Vim-style navigation
            KeyCode::Char('j') if self.vim_navigation => Some(Action::MoveDown),
            KeyCode::Char('k') if self.vim_navigation => Some(Action::MoveUp),
            KeyCode::Char('h') if self.vim_navigation => Some(Action::MoveLeft),
            KeyCode::Char('l') if self.vim_navigation => Some(Action::MoveRight),
            KeyCode::Char('g') if self.vim_navigation => Some(Action::Home),
            KeyCode::Char('G') if self.vim_navigation => Some(Action::End),

            // Panel switching
            KeyCode::Tab => Some(Action::NextPanel),
            KeyCode::BackTab => Some(Action::PrevPanel),
            KeyCode::Char(c @ '1'..='9') => {
                Some(Action::GotoPanel(c as usize - '1' as usize))
            }
            KeyCode::Char('0') => Some(Action::GotoPanel(9)),

            KeyCode::Enter => Some(Action::Select),
            KeyCode::Esc => Some(Action::Back),
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('?') => Some(Action::Help),

            _ => None,
        }
    }

    fn handle_insert_key(&self, key: KeyEvent) -> Option<Action> {
        // Esc leaves insert mode, everything else goes to the text widget
        if key.code == KeyCode::Esc {
            return Some(Action::Back);
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }
        None
    }
}
