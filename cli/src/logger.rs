use ansi_term::{ANSIString, Color, Style};
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Writes every log record to stderr, prefixed by its level.
pub struct Logger {
    colors_enabled: bool,
}

impl Logger {
    fn prefix(&self, level: Level) -> ANSIString<'static> {
        let style = if self.colors_enabled {
            let color = match level {
                Level::Error => Color::Red,
                Level::Warn => Color::Yellow,
                Level::Info => Color::Cyan,
                Level::Debug => Color::Purple,
                Level::Trace => Color::Green,
            };
            color.bold()
        } else {
            Style::new()
        };
        style.paint(format!("[{}]", level))
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} {}", self.prefix(record.level()), record.args());
        }
    }

    fn flush(&self) {}
}

pub fn init(max_level: LevelFilter, colors_enabled: bool) {
    if log::set_boxed_logger(Box::new(Logger { colors_enabled })).is_err() {
        eprintln!("couldn't set up logger");
        return;
    }
    log::set_max_level(max_level);
}
