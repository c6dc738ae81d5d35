pub mod action;
pub mod app;
pub mod components;
pub mod events;
pub mod terminal_guard;

pub use action::Action;
pub use app::App;
pub use events::AppEvent;
pub use terminal_guard::{install_panic_hook, TerminalGuard};
