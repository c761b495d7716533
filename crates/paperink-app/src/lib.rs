//! PaperInk Application
//!
//! The application shell: configuration, startup sequence, and the
//! translation of host input events into view model operations.

mod app;
mod config;
mod error;
mod event_handler;
mod shortcuts;

pub use app::{load_session, App};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use event_handler::{EventHandler, HostEvent};
pub use shortcuts::{Shortcut, ShortcutAction, ShortcutRegistry};
