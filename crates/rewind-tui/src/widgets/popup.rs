use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

pub struct PopupWidget;

impl PopupWidget {
    /// Render the key binding overlay
    pub fn render_help(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let keys = &app.config.keymap;
        let rows: [(&str, &str); 11] = [
            (keys.start.as_str(), "Start the rewind"),
            (keys.reset.as_str(), "Reset to the finish time"),
            (keys.next_field.as_str(), "Next field"),
            (keys.prev_field.as_str(), "Previous field"),
            (keys.increase.as_str(), "Increase by 1 minute"),
            (keys.decrease.as_str(), "Decrease by 1 minute"),
            (keys.increase_more.as_str(), "Increase by 1 hour / 10 minutes"),
            (keys.decrease_more.as_str(), "Decrease by 1 hour / 10 minutes"),
            (keys.edit.as_str(), "Type a value"),
            (keys.help.as_str(), "Toggle this help"),
            (keys.quit.as_str(), "Quit"),
        ];

        let area = frame.area();
        let popup_width = 48u16.min(area.width.saturating_sub(4));
        let popup_height = (rows.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        // Clear the background area
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));

        let mut lines: Vec<Line> = rows
            .iter()
            .map(|(key, description)| {
                Line::from(vec![
                    Span::styled(
                        format!(" {:>9}  ", key),
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*description, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(theme.grey1),
        )).alignment(Alignment::Center));

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(50, 10, area);
        assert_eq!(rect, Rect::new(25, 15, 50, 10));
    }

    #[test]
    fn test_centered_rect_larger_than_area() {
        let area = Rect::new(5, 5, 10, 4);
        let rect = centered_rect(20, 8, area);
        assert_eq!(rect.x, 5);
        assert_eq!(rect.y, 5);
    }
}
