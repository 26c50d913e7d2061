//! Minimal stderr logger for the `log` facade.

use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::OwoColorize;

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = match record.level() {
            Level::Error => "ERROR".red().bold().to_string(),
            Level::Warn => "WARN".yellow().bold().to_string(),
            Level::Info => "INFO".green().to_string(),
            Level::Debug => "DEBUG".blue().to_string(),
            Level::Trace => "TRACE".dimmed().to_string(),
        };
        eprintln!(
            "[{level}][{target}] {message}",
            target = record.target().dimmed(),
            message = record.args()
        );
    }

    fn flush(&self) {}
}

/// Install the logger with the given maximum level.
///
/// # Errors
///
/// Fails if another logger has already been installed.
pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    static LOGGER: StderrLogger = StderrLogger;
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

/// Map a `-v` count onto a level filter. Warnings are always shown.
#[must_use]
pub const fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
