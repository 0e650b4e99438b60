//! UI components for prep-tui.
//!
//! This module contains:
//! - layout: Main layout rendering
//! - input: Keyboard input handling
//! - widgets: Reusable UI widgets

pub mod input;
pub mod layout;
pub mod widgets;
