use chrono::Local;
use once_cell::sync::Lazy;
use std::sync::Mutex;

// Current log level
static LOG_LEVEL: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Warning));

// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn tag(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

// Set the current log level
pub fn set_log_level(level: LogLevel) {
    if let Ok(mut current_level) = LOG_LEVEL.lock() {
        *current_level = level;
    }
}

// Get the current log level
pub fn get_log_level() -> LogLevel {
    if let Ok(level) = LOG_LEVEL.lock() {
        *level
    } else {
        // Default to Warning if we can't get the lock
        LogLevel::Warning
    }
}

// Log a message with timestamp and level, filtered by the current log level
pub fn log(level: LogLevel, message: &str) {
    if level < get_log_level() {
        return;
    }

    let timestamp = Local::now().format("%H:%M:%S");
    let formatted = format!("[{}] {}: {}", timestamp, level.tag(), message);

    // Diagnostics go to stderr so stdout stays parseable
    match level {
        LogLevel::Error | LogLevel::Warning => eprintln!("{}", formatted),
        _ => println!("{}", formatted),
    }
}

// Convenience functions for different log levels
pub fn debug(message: &str) {
    log(LogLevel::Debug, message);
}

pub fn info(message: &str) {
    log(LogLevel::Info, message);
}

pub fn warning(message: &str) {
    log(LogLevel::Warning, message);
}

pub fn error(message: &str) {
    log(LogLevel::Error, message);
}
