use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use rewind_core::rewind::RewindState;

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = match &app.mode {
            Mode::Normal => "NORMAL",
            Mode::Editing(_) => "EDIT",
            Mode::Help => "HELP",
        };
        let phase_str = match app.controller.state() {
            RewindState::Idle => "IDLE",
            RewindState::Running(_) => "REWINDING",
            RewindState::Settled(_) => "SETTLED",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            format!(
                " {} | {} | Finish {} | Duration {} min",
                app.focus.label(),
                phase_str,
                app.end_time(),
                app.duration()
            )
        };

        let keys = &app.config.keymap;
        let help_hint = format!(
            " {}:quit {}:start {}:reset {}:help ",
            keys.quit, keys.start, keys.reset, keys.help
        );
        let mode_label = format!(" {} ", mode_str);
        let used = mode_label.chars().count() + status_text.chars().count() + help_hint.chars().count();
        let padding_len = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(
                mode_label,
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
