//! Main layout rendering for the TUI.

use crate::app::{App, Panel};
use crate::ui::widgets::chat::ChatWidget;
use crate::ui::widgets::dashboard::DashboardWidget;
use crate::ui::widgets::dialog::{ConfirmAction, ConfirmDialog};
use crate::ui::widgets::exam::ExamWidget;
use crate::ui::widgets::flashcards::FlashcardsWidget;
use crate::ui::widgets::formulas::FormulasWidget;
use crate::ui::widgets::grader::GraderWidget;
use crate::ui::widgets::help::HelpWidget;
use crate::ui::widgets::mnemonics::MnemonicsWidget;
use crate::ui::widgets::paper::PaperWidget;
use crate::ui::widgets::planner::PlannerWidget;
use crate::ui::widgets::settings::SettingsWidget;
use crate::ui::widgets::syllabus::SyllabusWidget;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
};

/// Draw the main application UI
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    draw_tabs(frame, app, chunks[0]);
    draw_content(frame, app, chunks[1]);

    if app.show_help {
        let help_area = centered_rect(80, 90, area);
        frame.render_widget(HelpWidget::new(&mut app.help_view_state), help_area);
    }

    if let Some(action) = app.confirm.pending {
        draw_confirm_dialog(frame, app, action, area);
    }

    if let Some(ref error) = app.error_message {
        draw_error_overlay(frame, error, area);
    }

    if let Some(message) = app.active_loading() {
        draw_loading_indicator(frame, area, message);
    } else if let Some(ref msg) = app.status_message {
        draw_status_message(frame, msg, area);
    }
}

/// Panel tab bar with jump digits
fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Panel::ALL
        .iter()
        .enumerate()
        .map(|(index, panel)| Line::from(panel_label(index, panel.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.active.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(tabs, area);
}

fn panel_label(index: usize, title: &str) -> String {
    match index {
        0..=8 => format!("{} {}", index + 1, title),
        9 => format!("0 {}", title),
        _ => title.to_string(),
    }
}

/// Render the active panel
fn draw_content(frame: &mut Frame, app: &mut App, area: Rect) {
    let height = area.height as usize;
    match app.active {
        Panel::Dashboard => {
            let widget = DashboardWidget::new(
                &app.dashboard,
                app.planner.tasks.pending_count(),
                &app.syllabus.progress,
                app.gen_ready(),
            );
            frame.render_widget(widget, area);
        }
        Panel::Exam => {
            app.exam.sync_view(height.saturating_sub(9));
            frame.render_widget(ExamWidget::new(&app.exam), area);
        }
        Panel::Chat => {
            app.chat.sync_view(height.saturating_sub(6));
            frame.render_widget(ChatWidget::new(&app.chat), area);
        }
        Panel::Flashcards => {
            frame.render_widget(FlashcardsWidget::new(&app.flashcards), area);
        }
        Panel::Formulas => {
            app.formulas.sync_view(height.saturating_sub(4));
            frame.render_widget(FormulasWidget::new(&app.formulas), area);
        }
        Panel::Grader => {
            app.grader.sync_view((height / 2).saturating_sub(2));
            frame.render_widget(GraderWidget::new(&app.grader), area);
        }
        Panel::Mnemonics => {
            app.mnemonics.sync_view(height.saturating_sub(5));
            frame.render_widget(MnemonicsWidget::new(&app.mnemonics), area);
        }
        Panel::Planner => {
            app.planner.sync_view(height.saturating_sub(2));
            frame.render_widget(PlannerWidget::new(&app.planner), area);
        }
        Panel::Syllabus => {
            frame.render_widget(SyllabusWidget::new(&app.syllabus), area);
        }
        Panel::Paper => {
            app.paper.sync_view(height.saturating_sub(3));
            frame.render_widget(PaperWidget::new(&app.paper), area);
        }
        Panel::Settings => {
            let storage_dir = app.config.storage_dir();
            let widget = SettingsWidget::new(
                &app.settings,
                app.gen_ready(),
                &app.config.gen.text_model,
                &app.config.gen.exam_model,
                &storage_dir,
                app.config.ui.vim_navigation,
            );
            frame.render_widget(widget, area);
        }
    }
}

fn draw_confirm_dialog(frame: &mut Frame, app: &App, action: ConfirmAction, area: Rect) {
    let popup_area = centered_rect(50, 30, area);

    let (title, message) = match action {
        ConfirmAction::ClearChatHistory => (
            "Clear Chat History",
            "Clear the whole conversation?\n\nThis cannot be undone.",
        ),
        ConfirmAction::PurgeAllData => (
            "Delete All Data",
            "WARNING: This will delete all syllabus progress, chat history, and tasks. Proceed?",
        ),
    };

    let dialog = ConfirmDialog::new(title, message).yes_selected(app.confirm.yes_selected);
    frame.render_widget(dialog, popup_area);
}

/// Draw a status message at the bottom of the screen
fn draw_status_message(frame: &mut Frame, message: &str, area: Rect) {
    let msg_area = Rect {
        x: area.x + 2,
        y: area.y + area.height.saturating_sub(4),
        width: area.width.saturating_sub(4).min(message.len() as u16 + 4),
        height: 3,
    };

    frame.render_widget(Clear, msg_area);

    let status = Paragraph::new(message)
        .style(Style::default().fg(Color::Green))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );

    frame.render_widget(status, msg_area);
}

/// Draw error overlay
fn draw_error_overlay(frame: &mut Frame, error: &str, area: Rect) {
    let popup_area = centered_rect(60, 20, area);

    frame.render_widget(Clear, popup_area);

    let error_widget = Paragraph::new(error)
        .style(Style::default().fg(Color::Red))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title("Error"),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(error_widget, popup_area);
}

/// Draw an in-flight generation indicator
fn draw_loading_indicator(frame: &mut Frame, area: Rect, message: &str) {
    let popup_area = centered_rect(50, 5, area);

    frame.render_widget(Clear, popup_area);

    let loading = Paragraph::new(message)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

    frame.render_widget(loading, popup_area);
}

/// Create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
