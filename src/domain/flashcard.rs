//! Flashcard deck entities.

use serde::{Deserialize, Serialize};

/// A single two-sided card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

/// Generated deck plus the cursor state for review
#[derive(Debug, Clone, Default)]
pub struct Deck {
    cards: Vec<Flashcard>,
    index: usize,
    revealed: bool,
}

impl Deck {
    pub fn new(cards: Vec<Flashcard>) -> Self {
        Self {
            cards,
            index: 0,
            revealed: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Flashcard> {
        self.cards.get(self.index)
    }

    pub fn revealed(&self) -> bool {
        self.revealed
    }

    /// Flip the current card between front and back
    pub fn flip(&mut self) {
        if !self.cards.is_empty() {
            self.revealed = !self.revealed;
        }
    }

    /// Advance to the next card front-side up, stopping at the end
    pub fn next(&mut self) {
        if self.index + 1 < self.cards.len() {
            self.index += 1;
            self.revealed = false;
        }
    }

    /// Step back to the previous card front-side up
    pub fn prev(&mut self) {
        if self.index > 0 {
            self.index -= 1;
            self.revealed = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck() -> Deck {
        Deck::new(vec![
            Flashcard {
                front: "Ohm's law".into(),
                back: "V = IR".into(),
            },
            Flashcard {
                front: "Escape velocity".into(),
                back: "sqrt(2GM/R)".into(),
            },
        ])
    }

    #[test]
    fn test_navigation_resets_reveal() {
        let mut d = deck();
        d.flip();
        assert!(d.revealed());
        d.next();
        assert_eq!(d.position(), 1);
        assert!(!d.revealed());
        d.next();
        assert_eq!(d.position(), 1);
        d.prev();
        assert_eq!(d.position(), 0);
    }

    #[test]
    fn test_empty_deck_ignores_flip() {
        let mut d = Deck::default();
        d.flip();
        assert!(!d.revealed());
        assert!(d.current().is_none());
    }
}
