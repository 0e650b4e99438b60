//! Core study entities, independent of any transport or UI.

pub mod chat;
pub mod exam;
pub mod flashcard;
pub mod planner;
pub mod syllabus;

pub use chat::{ChatMessage, Role};
pub use exam::{score_exam, AnswerSheet, Exam, Question, QuestionKind, Score, Section};
pub use flashcard::{Deck, Flashcard};
pub use planner::{Task, TaskList};
pub use syllabus::SyllabusProgress;
