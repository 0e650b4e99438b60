//! Reusable UI widgets for prep-tui.

pub mod chat;
pub mod dashboard;
pub mod dialog;
pub mod exam;
pub mod flashcards;
pub mod formulas;
pub mod grader;
pub mod help;
pub mod mnemonics;
pub mod paper;
pub mod picker;
pub mod planner;
pub mod settings;
pub mod syllabus;
pub mod text_input;
pub mod text_view;
