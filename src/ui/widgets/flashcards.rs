//! Flashcard deck panel: chapter setup, then card-by-card review.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::domain::flashcard::{Deck, Flashcard};
use crate::services::paper::strip_markup;
use crate::ui::widgets::picker::{SetupState, SetupWidget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashcardEvent {
    None,
    Consumed,
    Generate,
}

/// State of the flashcards panel
#[derive(Debug, Default)]
pub struct FlashcardsState {
    pub setup: SetupState,
    pub generating: bool,
    pub deck: Option<Deck>,
}

impl FlashcardsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a generated deck
    pub fn deck_ready(&mut self, cards: Vec<Flashcard>) {
        self.deck = Some(Deck::new(cards));
        self.generating = false;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FlashcardEvent {
        if self.generating {
            return FlashcardEvent::None;
        }
        if let Some(deck) = &mut self.deck {
            match key.code {
                KeyCode::Char(' ') | KeyCode::Enter => {
                    deck.flip();
                    return FlashcardEvent::Consumed;
                }
                KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('l') => {
                    deck.next();
                    return FlashcardEvent::Consumed;
                }
                KeyCode::Left | KeyCode::Char('p') | KeyCode::Char('h') => {
                    deck.prev();
                    return FlashcardEvent::Consumed;
                }
                KeyCode::Esc | KeyCode::Char('r') => {
                    self.deck = None;
                    return FlashcardEvent::Consumed;
                }
                _ => return FlashcardEvent::None,
            }
        }
        if key.code == KeyCode::Enter {
            return FlashcardEvent::Generate;
        }
        if self.setup.handle_key(key) {
            FlashcardEvent::Consumed
        } else {
            FlashcardEvent::None
        }
    }
}

/// Widget rendering the flashcards panel
pub struct FlashcardsWidget<'a> {
    state: &'a FlashcardsState,
}

impl<'a> FlashcardsWidget<'a> {
    pub fn new(state: &'a FlashcardsState) -> Self {
        Self { state }
    }

    fn render_review(&self, deck: &Deck, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        let (side, text, color) = match (deck.current(), deck.revealed()) {
            (Some(card), false) => ("Front", card.front.clone(), Color::Cyan),
            (Some(card), true) => ("Back", card.back.clone(), Color::Green),
            (None, _) => ("Deck", "No cards.".to_string(), Color::DarkGray),
        };

        let title = format!(
            " Card {}/{} [{}] ",
            deck.position() + 1,
            deck.len().max(1),
            side
        );
        Paragraph::new(strip_markup(&text))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .style(Style::default().fg(color))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(title),
            )
            .render(chunks[0], buf);

        Paragraph::new(" space: Flip | h/l: Prev/Next | Esc: New deck ")
            .style(Style::default().fg(Color::DarkGray))
            .render(chunks[1], buf);
    }
}

impl Widget for FlashcardsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(deck) = &self.state.deck {
            self.render_review(deck, area, buf);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        SetupWidget::new(&self.state.setup).render(chunks[0], buf);

        let body = if self.state.generating {
            Paragraph::new("Writing your deck...")
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center)
        } else {
            Paragraph::new("10 advanced cards per chapter: concepts, formulas, definitions.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
        };
        body.block(Block::default().borders(Borders::ALL).title(" Flashcards "))
            .render(chunks[1], buf);

        Paragraph::new(" j/k: Field | h/l: Value | Enter: Generate ")
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

    fn cards() -> Vec<Flashcard> {
        vec![
            Flashcard {
                front: "F1".into(),
                back: "B1".into(),
            },
            Flashcard {
                front: "F2".into(),
                back: "B2".into(),
            },
        ]
    }

    #[test]
    fn test_enter_requests_generation() {
        let mut state = FlashcardsState::new();
        assert_eq!(state.handle_key(key(KeyCode::Enter)), FlashcardEvent::Generate);
    }

    #[test]
    fn test_keys_ignored_while_generating() {
        let mut state = FlashcardsState::new();
        state.generating = true;
        assert_eq!(state.handle_key(key(KeyCode::Enter)), FlashcardEvent::None);
    }

    #[test]
    fn test_review_flow() {
        let mut state = FlashcardsState::new();
        state.generating = true;
        state.deck_ready(cards());
        assert!(!state.generating);

        state.handle_key(key(KeyCode::Char(' ')));
        assert!(state.deck.as_ref().unwrap().revealed());

        state.handle_key(key(KeyCode::Right));
        let deck = state.deck.as_ref().unwrap();
        assert_eq!(deck.position(), 1);
        assert!(!deck.revealed());

        state.handle_key(key(KeyCode::Esc));
        assert!(state.deck.is_none());
    }
}
