//! LED Link library
//! This is the main library for LED Link, a panel that toggles the LED of a
//! BLE microcontroller board.

// Module declarations
pub mod app;
pub mod commands;
pub mod config;
pub mod core;
pub mod logging;
pub mod state;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod testing;

use state::AppState;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let builder = tauri::Builder::default();

    #[cfg(not(any(target_os = "android", target_os = "ios")))]
    let builder = builder.plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
        if let Some(window) = app.get_webview_window("main") {
            let _ = window.show();
            let _ = window.set_focus();
        }
    }));

    builder
        // Register our commands
        .invoke_handler(tauri::generate_handler![
            commands::ui_ready,
            commands::ui_click
        ])
        // Setup our application state
        .setup(|app| {
            if logging::TauriLogger::init(app.handle().clone(), log::Level::Info).is_err() {
                // Another logger is already installed; fall back to env_logger.
                let _ = env_logger::builder()
                    .filter_level(log::LevelFilter::Info)
                    .try_init();
            }

            let app_state = tauri::async_runtime::block_on(AppState::new(app.handle()))
                .map_err(|e| format!("Failed to initialize AppState: {}", e))?;
            app.manage(app_state);
            log::info!("LED Link started");
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
