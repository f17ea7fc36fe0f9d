use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{debug, info, warn};

use rewind_core::AppConfig;
use rewind_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    keymap::Keymap,
    widgets,
};

use super::{resolve_duration, resolve_end_time};
use crate::InputArgs;

/// Puts the terminal back when dropped, including on early error returns
struct TerminalGuard {
    restore: fn() -> io::Result<()>,
}

impl TerminalGuard {
    fn new(restore: fn() -> io::Result<()>) -> Self {
        Self { restore }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = (self.restore)() {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)
}

pub fn run(config: Arc<AppConfig>, inputs: InputArgs) -> Result<()> {
    // Resolve overrides before touching the terminal so errors print normally
    let end_time = resolve_end_time(&config, inputs.end.as_deref())?;
    let duration = config
        .widget
        .clamp_duration(resolve_duration(&config, inputs.duration)?);

    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);

    let event_handler = EventHandler::new(
        config.animation.tick_rate(),
        config.animation.frame_duration(),
    );

    let mut app = App::new(config.clone());
    app.set_end_time(end_time);
    app.set_duration(duration);
    app.clear_status();
    info!(end_time = %app.end_time(), duration = app.duration(), "Starting TUI");

    // Setup terminal
    enable_raw_mode()?;
    let _guard = TerminalGuard::new(restore_terminal);
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("Rewind"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    main_loop(&mut terminal, &mut app, &keymap, &event_handler)
}

fn main_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    keymap: &Keymap,
    event_handler: &EventHandler,
) -> Result<()> {
    loop {
        // Advance the rewind, if one is playing
        app.on_frame(Instant::now());

        terminal.draw(|frame| widgets::draw(frame, app))?;

        // Poll at the frame rate while animating, at the tick rate otherwise
        let event = if app.needs_fast_update() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };

        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, keymap);
                    debug!(?action, "Key action");
                    app.handle_action(action, Instant::now());
                }
                AppEvent::Resize(width, height) => {
                    debug!(width, height, "Terminal resized");
                }
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static RESTORES: AtomicUsize = AtomicUsize::new(0);

    fn count_restore() -> io::Result<()> {
        RESTORES.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn failing_setup() -> Result<()> {
        let _guard = TerminalGuard::new(count_restore);
        Err(io::Error::other("no alternate screen").into())
    }

    #[test]
    fn test_guard_restores_when_setup_fails() {
        let before = RESTORES.load(Ordering::SeqCst);
        assert!(failing_setup().is_err());
        assert_eq!(RESTORES.load(Ordering::SeqCst), before + 1);
    }

    #[test]
    fn test_guard_ignores_restore_errors() {
        let guard = TerminalGuard::new(|| Err(io::Error::other("closed")));
        drop(guard);
    }
}
