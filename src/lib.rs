//! prep-tui: Terminal companion for JEE preparation
//!
//! This crate provides a keyboard-driven terminal interface around an
//! AI generation endpoint: mock exams with marking and analysis, a
//! tutor chat, flashcards, formula sheets, answer grading, mnemonics,
//! a task planner, a syllabus tracker and printable school papers.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod ui;

pub use app::App;
pub use config::AppConfig;
pub use error::{AppError, Result};
