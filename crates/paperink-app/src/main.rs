//! Main application entry point.
//!
//! Usage: `paperink [SESSION.json]`. Without a session file the shortcut
//! list is printed and the startup sequence runs on its own.

use paperink_app::{load_session, App, AppConfig, ShortcutRegistry};
use paperink_core::UserPreference;
use std::path::PathBuf;
use std::process;

fn main() {
    env_logger::init();
    log::info!("Starting PaperInk");

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            process::exit(1);
        }
    };

    let mut app = match App::new(config, UserPreference::load()) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Startup failed: {}", e);
            process::exit(1);
        }
    };

    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => match load_session(&path) {
            Ok(events) => app.replay(events),
            Err(e) => {
                log::error!("{}", e);
                process::exit(1);
            }
        },
        None => ShortcutRegistry::print_all(),
    }

    log::info!("{}", app.summary());
}
