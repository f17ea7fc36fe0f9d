use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use rewind_core::{ExplanationStep, ExplanationTrace};

use crate::app::App;
use crate::theme::Theme;

/// Step-by-step narration of the subtraction, or a placeholder before the
/// first rewind settles
pub struct ExplanationWidget;

impl ExplanationWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let border_color = if app.explanation.is_some() {
            theme.answer
        } else {
            theme.grey0
        };

        let block = Block::default()
            .title(" How do we solve it? ")
            .title_style(Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(theme.bg0));

        let paragraph = match &app.explanation {
            Some(trace) => Paragraph::new(Self::trace_lines(trace, theme))
                .block(block)
                .wrap(Wrap { trim: false }),
            None => Paragraph::new(Self::placeholder_lines(app))
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
        };
        frame.render_widget(paragraph, area);
    }

    fn placeholder_lines(app: &App) -> Vec<Line<'static>> {
        let theme = &app.theme;
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "Answer Area",
                Style::default().fg(theme.grey1).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "Press {} to see the step-by-step solution here!",
                    app.config.keymap.start
                ),
                Style::default().fg(theme.grey0),
            )),
        ]
    }

    pub(crate) fn trace_lines(trace: &ExplanationTrace, theme: &Theme) -> Vec<Line<'static>> {
        let text = Style::default().fg(theme.fg0);
        let dim = Style::default().fg(theme.grey1);
        let mut lines = Vec::new();

        for step in trace.steps() {
            let badge = match step.number() {
                Some(n) => Span::styled(
                    format!(" {} ", n),
                    Style::default()
                        .fg(theme.bg0)
                        .bg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                None => Span::raw("   "),
            };

            match step {
                ExplanationStep::FinishTime { time } => {
                    lines.push(Line::from(vec![
                        badge,
                        Span::styled(" Finish time: ", text),
                        Span::styled(time, Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
                        Span::styled(".", text),
                    ]));
                }
                ExplanationStep::GoBack { minutes } => {
                    lines.push(Line::from(vec![
                        badge,
                        Span::styled(" Go back ", text),
                        Span::styled(
                            format!("{} mins", minutes),
                            Style::default().fg(theme.progress).add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(".", text),
                    ]));
                }
                ExplanationStep::Columns {
                    hour,
                    minute,
                    subtrahend,
                } => {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled("      Hour : Min", dim)));
                    lines.push(Line::from(Span::styled(
                        format!("      {:>4} : {:<3}", hour, minute),
                        text.add_modifier(Modifier::BOLD),
                    )));
                    lines.push(Line::from(vec![
                        Span::styled("      ", text),
                        Span::styled(
                            format!("{:>10}", format!("- {}", subtrahend)),
                            Style::default().fg(theme.progress),
                        ),
                    ]));
                    lines.push(Line::from(Span::styled("      ----------", dim)));
                }
                ExplanationStep::Borrow {
                    hour_from,
                    hour_to,
                    minute_from,
                    minute_to,
                } => {
                    let borrow = Style::default().fg(theme.borrow);
                    lines.push(Line::from(vec![
                        badge,
                        Span::styled(" Borrow 1 Hour:", borrow.add_modifier(Modifier::BOLD)),
                    ]));
                    lines.push(Line::from(Span::styled(
                        format!("      {} becomes {}", hour_from, hour_to),
                        borrow,
                    )));
                    lines.push(Line::from(Span::styled(
                        format!("      {} becomes {}", minute_from, minute_to),
                        borrow,
                    )));
                }
                ExplanationStep::Result { start_time } => {
                    lines.push(Line::from(""));
                    lines.push(Line::from(vec![
                        badge,
                        Span::styled(" Final Calculation:", text),
                    ]));
                    lines.push(Line::from(vec![
                        Span::styled("      Result  <- ", dim),
                        Span::styled(
                            start_time,
                            Style::default().fg(theme.answer).add_modifier(Modifier::BOLD),
                        ),
                    ]));
                }
            }
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewind_core::solve;

    fn flatten(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_trace_lines_with_borrow() {
        let trace = solve("09:24", 34);
        let text = flatten(&ExplanationWidget::trace_lines(&trace, &Theme::default()));
        assert!(text.contains("Finish time: 09:24."));
        assert!(text.contains("Go back 34 mins."));
        assert!(text.contains("Borrow 1 Hour:"));
        assert!(text.contains("9 becomes 8"));
        assert!(text.contains("24 becomes 84"));
        assert!(text.contains("<- 08:50"));
    }

    #[test]
    fn test_trace_lines_without_borrow() {
        let trace = solve("10:45", 20);
        let text = flatten(&ExplanationWidget::trace_lines(&trace, &Theme::default()));
        assert!(!text.contains("Borrow"));
        assert!(text.contains("<- 10:25"));
    }
}
