use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine},
        Block, Borders, Gauge, Paragraph,
    },
    Frame,
};
use rewind_core::rewind::RewindState;

use crate::app::App;

const HOUR_HAND_LENGTH: f64 = 0.5;
const MINUTE_HAND_LENGTH: f64 = 0.8;
const TICK_INNER: f64 = 0.88;
const FACE_RADIUS: f64 = 1.0;
/// Bounds of the square the face is drawn in, before aspect correction
const FACE_EXTENT: f64 = 1.15;

/// Tip of a hand of `length` rotated `degrees` clockwise from 12 o'clock
pub fn hand_endpoint(degrees: f64, length: f64) -> (f64, f64) {
    let radians = degrees.to_radians();
    (length * radians.sin(), length * radians.cos())
}

pub struct ClockWidget;

impl ClockWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let title = match app.controller.state() {
            RewindState::Idle => " Current Time ",
            RewindState::Running(_) => " Rewinding Time... ",
            RewindState::Settled(_) => " Start Time ",
        };
        let border_color = if app.is_rewinding() {
            theme.progress
        } else {
            theme.grey0
        };

        let block = Block::default()
            .title(title)
            .title_style(Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(theme.bg0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Progress gauge
                Constraint::Min(3),    // Face
                Constraint::Length(1), // Digital readout
            ])
            .split(inner);

        Self::render_progress(frame, chunks[0], app);
        Self::render_face(frame, chunks[1], app);
        Self::render_digital(frame, chunks[2], app);
    }

    fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
        let ratio = app.display.visual_progress.clamp(0.0, 1.0);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(app.theme.progress).bg(app.theme.bg1))
            .ratio(ratio)
            .label(format!("{:.0}%", ratio * 100.0));
        frame.render_widget(gauge, area);
    }

    fn render_face(frame: &mut Frame, area: Rect, app: &App) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let theme = &app.theme;
        let rotation = app.display.rotation();
        let hour_tip = hand_endpoint(rotation.hour_degrees, HOUR_HAND_LENGTH);
        let minute_tip = hand_endpoint(rotation.minute_degrees, MINUTE_HAND_LENGTH);

        // Cells are about twice as tall as wide
        let aspect = area.width as f64 / (area.height as f64 * 2.0);
        let x_extent = FACE_EXTENT * aspect.max(1.0);
        let y_extent = FACE_EXTENT * (1.0 / aspect).max(1.0);

        let face = theme.grey1;
        let ticks = theme.fg1;
        let label = theme.fg0;
        let hour_color = theme.hour_hand;
        let minute_color = theme.minute_hand;

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .background_color(theme.bg0)
            .x_bounds([-x_extent, x_extent])
            .y_bounds([-y_extent, y_extent])
            .paint(move |ctx| {
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: FACE_RADIUS,
                    color: face,
                });
                for hour in 0..12 {
                    let degrees = hour as f64 * 30.0;
                    let (x1, y1) = hand_endpoint(degrees, TICK_INNER);
                    let (x2, y2) = hand_endpoint(degrees, FACE_RADIUS);
                    ctx.draw(&CanvasLine {
                        x1,
                        y1,
                        x2,
                        y2,
                        color: ticks,
                    });
                }
                ctx.print(-0.05, 0.72, Span::styled("12", Style::default().fg(label)));
                ctx.print(0.72, 0.0, Span::styled("3", Style::default().fg(label)));
                ctx.print(0.0, -0.78, Span::styled("6", Style::default().fg(label)));
                ctx.print(-0.78, 0.0, Span::styled("9", Style::default().fg(label)));

                ctx.layer();
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: 0.0,
                    x2: minute_tip.0,
                    y2: minute_tip.1,
                    color: minute_color,
                });
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: 0.0,
                    x2: hour_tip.0,
                    y2: hour_tip.1,
                    color: hour_color,
                });
            });
        frame.render_widget(canvas, area);
    }

    fn render_digital(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let color = match app.controller.state() {
            RewindState::Settled(_) => theme.answer,
            RewindState::Running(_) => theme.progress,
            RewindState::Idle => theme.fg0,
        };
        let line = Line::from(vec![Span::styled(
            app.display.clock(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )]);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }
}
