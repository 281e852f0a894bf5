mod app;
mod effects;
mod logging;
mod persistence;
mod timers;
mod ui;

use std::path::PathBuf;

use client_logging::client_info;

fn main() -> Result<(), eframe::Error> {
    logging::initialize(logging::LogDestination::Both);

    let prefs_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut prefs = persistence::load_preferences(&prefs_dir);
    if let Ok(server_url) = std::env::var("TUNEDECK_SERVER") {
        prefs.server_url = server_url;
    }
    if let Ok(user) = std::env::var("TUNEDECK_USER") {
        prefs.user = (!user.is_empty()).then_some(user);
    }
    client_info!(
        "connecting to {} as {}",
        prefs.server_url,
        prefs.user.as_deref().unwrap_or("<anonymous>")
    );

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Tunedeck",
        options,
        Box::new(move |_cc| Box::new(app::DeckApp::new(prefs, prefs_dir))),
    )
}
