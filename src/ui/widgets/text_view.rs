//! Scrollable read-only viewer for generated text output.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::services::paper::strip_markup;

/// Scroll state for a text view
#[derive(Debug, Default, Clone)]
pub struct TextViewState {
    scroll: usize,
    line_count: usize,
    viewport_height: usize,
}

impl TextViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = (self.scroll + lines).min(self.max_scroll());
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport_height.max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport_height.max(1));
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    /// Reset the view for fresh content
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn max_scroll(&self) -> usize {
        self.line_count.saturating_sub(self.viewport_height.max(1))
    }

    /// Record content and viewport dimensions, clamping the offset
    pub fn update_dimensions(&mut self, line_count: usize, viewport_height: usize) {
        self.line_count = line_count;
        self.viewport_height = viewport_height;
        self.scroll = self.scroll.min(self.max_scroll());
    }
}

/// Bordered scrolling paragraph over markup-stripped content
pub struct TextViewWidget<'a> {
    content: &'a str,
    title: &'a str,
    scroll: usize,
    focused: bool,
}

impl<'a> TextViewWidget<'a> {
    pub fn new(content: &'a str, title: &'a str) -> Self {
        Self {
            content,
            title,
            scroll: 0,
            focused: false,
        }
    }

    pub fn scroll_offset(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for TextViewWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let text = strip_markup(self.content);
        let paragraph = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll as u16, 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(format!(" {} ", self.title)),
            );
        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_clamps_to_content() {
        let mut state = TextViewState::new();
        state.update_dimensions(30, 10);

        state.scroll_down(5);
        assert_eq!(state.scroll_offset(), 5);

        state.scroll_to_bottom();
        assert_eq!(state.scroll_offset(), 20);

        state.scroll_down(100);
        assert_eq!(state.scroll_offset(), 20);

        state.scroll_to_top();
        assert_eq!(state.scroll_offset(), 0);
        state.scroll_up(3);
        assert_eq!(state.scroll_offset(), 0);
    }

    #[test]
    fn test_dimensions_clamp_existing_offset() {
        let mut state = TextViewState::new();
        state.update_dimensions(100, 10);
        state.scroll_to_bottom();
        assert_eq!(state.scroll_offset(), 90);

        // shorter content pulls the offset back in range
        state.update_dimensions(20, 10);
        assert_eq!(state.scroll_offset(), 10);
    }

    #[test]
    fn test_page_movement() {
        let mut state = TextViewState::new();
        state.update_dimensions(50, 10);
        state.page_down();
        assert_eq!(state.scroll_offset(), 10);
        state.page_up();
        assert_eq!(state.scroll_offset(), 0);
    }
}
