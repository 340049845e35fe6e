//! Logger utility for application-wide logging
//!
//! A file-backed implementation of the `log` facade used by the command line
//! tool; conversion records are also echoed to the console.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Log, Record, Level, Metadata, LevelFilter};

/// Custom logger implementation
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
    /// Most verbose level that is recorded
    level: Level,
}

impl Logger {
    /// Creates a new logger instance writing to `log_file`
    pub fn new(log_file: &str) -> io::Result<Self> {
        Self::with_level(log_file, Level::Debug)
    }

    /// Creates a logger that records messages up to `level`
    pub fn with_level(log_file: &str, level: Level) -> io::Result<Self> {
        let file = File::create(Path::new(log_file))?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            level,
        })
    }

    /// Creates a logger that discards everything written to it
    pub fn disabled() -> Self {
        Logger {
            file: Mutex::new(None),
            level: Level::Error,
        }
    }

    /// Logs a message to the log file
    pub fn log(&self, message: &str) -> io::Result<()> {
        let mut guard = self.file.lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Logs one converted definition with the notation it was converted to
    pub fn log_conversion(&self, source: &str, target_format: &str, output: &str) -> io::Result<()> {
        self.log(&format!("Converted to {}:", target_format))?;
        self.log(&format!("  in:  {}", source))?;
        self.log(&format!("  out: {}", output))
    }

    /// Static method to initialize the global logger
    pub fn init_global_logger(log_file: &str, level: Level) -> io::Result<()> {
        let global_logger = Logger::with_level(log_file, level)?;

        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(level.to_level_filter());
        Ok(())
    }

    /// Parses a level name from configuration ("off" maps to `None`)
    pub fn parse_level(name: &str) -> Option<LevelFilter> {
        name.parse::<LevelFilter>().ok()
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = Logger::log(self, &message);
            println!("{}", message);
        }
    }

    fn flush(&self) {}
}
