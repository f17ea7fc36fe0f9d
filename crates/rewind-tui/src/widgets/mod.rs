mod clock;
mod controls;
mod explanation;
mod popup;
mod status_bar;

pub use clock::{hand_endpoint, ClockWidget};
pub use controls::ControlsWidget;
pub use explanation::ExplanationWidget;
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

use crate::app::{App, Mode};

/// Draw the whole screen: clock, controls and answer side by side, with the
/// status bar underneath
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(app.theme.bg0)), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(36),
            Constraint::Percentage(28),
            Constraint::Percentage(36),
        ])
        .split(rows[0]);

    ClockWidget::render(frame, columns[0], app);
    ControlsWidget::render(frame, columns[1], app);
    ExplanationWidget::render(frame, columns[2], app);
    StatusBarWidget::render(frame, rows[1], app);

    if app.mode == Mode::Help {
        PopupWidget::render_help(frame, app);
    }
}
