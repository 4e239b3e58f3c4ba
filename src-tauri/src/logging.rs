use chrono::Local;
use log::{Level, Metadata, Record, SetLoggerError};
use serde::Serialize;
use std::sync::OnceLock;
use tauri::Emitter;

static LOGGER: OnceLock<TauriLogger> = OnceLock::new();

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct LogMessage {
    level: String,
    message: String,
    timestamp: String,
}

impl LogMessage {
    pub fn from_record(record: &Record) -> Self {
        Self {
            level: record.level().to_string(),
            message: record.args().to_string(),
            timestamp: Local::now().to_rfc3339(),
        }
    }
}

/// Logger that mirrors every record to stderr and to the frontend's
/// "log-message" event.
pub struct TauriLogger {
    app_handle: tauri::AppHandle,
    level: Level,
}

impl TauriLogger {
    pub fn new(app_handle: tauri::AppHandle, level: Level) -> Self {
        Self { app_handle, level }
    }

    pub fn init(app_handle: tauri::AppHandle, level: Level) -> Result<(), SetLoggerError> {
        let logger = LOGGER.get_or_init(|| TauriLogger::new(app_handle, level));
        log::set_logger(logger).map(|()| log::set_max_level(level.to_level_filter()))
    }

    fn emit_log(&self, record: &Record) {
        let log_message = LogMessage::from_record(record);

        if let Err(e) = self.app_handle.emit("log-message", log_message) {
            eprintln!("Failed to emit log message: {}", e);
        }
    }
}

impl log::Log for TauriLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
            self.emit_log(record);
        }
    }

    fn flush(&self) {}
}
