use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Paragraph},
    Frame,
};

use crate::app::{App, Field, Mode};

/// Input fields, the duration range bar and the two buttons
pub struct ControlsWidget;

impl ControlsWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let border_color = if app.is_input_mode() {
            theme.accent
        } else {
            theme.grey0
        };

        let block = Block::default()
            .title(" Set the Scene ")
            .title_style(Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(theme.bg0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Finish time label
                Constraint::Length(1), // Finish time value
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Duration label
                Constraint::Length(1), // Duration value
                Constraint::Length(1), // Range bar
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Start button
                Constraint::Length(1), // Reset button
                Constraint::Min(0),
            ])
            .split(inner);

        let label_style = Style::default().fg(theme.grey1).add_modifier(Modifier::BOLD);
        frame.render_widget(
            Paragraph::new(Span::styled("FINISH TIME", label_style)),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new(Self::field_line(app, Field::EndTime, app.end_time().to_string())),
            chunks[1],
        );
        frame.render_widget(
            Paragraph::new(Span::styled("DURATION (MINUTES)", label_style)),
            chunks[3],
        );
        frame.render_widget(
            Paragraph::new(Self::field_line(
                app,
                Field::Duration,
                format!("{} min", app.duration()),
            )),
            chunks[4],
        );

        let widget = &app.config.widget;
        let span = (widget.max_duration - widget.min_duration).max(1) as f64;
        let ratio = ((app.duration() - widget.min_duration) as f64 / span).clamp(0.0, 1.0);
        let range = LineGauge::default()
            .filled_style(Style::default().fg(theme.accent))
            .unfilled_style(Style::default().fg(theme.bg2))
            .ratio(ratio)
            .label(format!("{}..{} ", widget.min_duration, widget.max_duration));
        frame.render_widget(range, chunks[5]);

        let keys = &app.config.keymap;
        let start = if app.is_rewinding() {
            Line::from(Span::styled(
                "  Calculating...",
                Style::default().fg(theme.grey0),
            ))
        } else {
            Line::from(vec![
                Span::styled(format!(" [{}] ", keys.start), Style::default().fg(theme.grey1)),
                Span::styled(
                    "Start Rewind",
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                ),
            ])
        };
        frame.render_widget(Paragraph::new(start), chunks[7]);

        let reset = Line::from(vec![
            Span::styled(format!(" [{}] ", keys.reset), Style::default().fg(theme.grey1)),
            Span::styled("Reset", Style::default().fg(theme.fg1)),
        ]);
        frame.render_widget(Paragraph::new(reset), chunks[8]);
    }

    /// One input field, highlighted when focused and showing the edit
    /// buffer while typing
    fn field_line(app: &App, field: Field, value: String) -> Line<'static> {
        let theme = &app.theme;
        let focused = app.focus == field;
        let marker = if focused { "> " } else { "  " };

        match (&app.mode, focused) {
            (Mode::Editing(buffer), true) => Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.accent)),
                Span::styled(
                    format!("{}_", buffer),
                    Style::default()
                        .fg(theme.fg0)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            (_, true) => Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.accent)),
                Span::styled(
                    value,
                    Style::default()
                        .fg(theme.fg0)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            (_, false) => Line::from(vec![
                Span::raw(marker),
                Span::styled(value, Style::default().fg(theme.fg1)),
            ]),
        }
    }
}
