//! Stderr backend for the `log` facade.

use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter, Log, Metadata, Record};

struct ShellLogger;

static LOGGER: ShellLogger = ShellLogger;

fn level_tag(level: Level) -> ColoredString {
    match level {
        Level::Error => "ERROR".red().bold(),
        Level::Warn => "WARN".yellow(),
        Level::Info => "INFO".green(),
        Level::Debug => "DEBUG".cyan(),
        Level::Trace => "TRACE".dimmed(),
    }
}

impl Log for ShellLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!(
            "[{}] {}: {}",
            level_tag(record.level()),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Installs the logger. Only the first call has an effect.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    log::set_logger(&LOGGER).map_err(|e| anyhow::anyhow!("cannot install logger: {e}"))?;
    log::set_max_level(level_for(verbose));
    Ok(())
}
