pub mod app;
pub mod event;
pub mod input;
pub mod keymap;
pub mod theme;
pub mod themes;
pub mod widgets;

pub use app::{App, Field, Mode};
pub use event::{AppEvent, EventHandler};
pub use input::{handle_key_event, Action};
pub use keymap::Keymap;
pub use theme::Theme;
pub use themes::{available_themes, load_theme};
