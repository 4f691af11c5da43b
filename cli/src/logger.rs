use colored::*;
use curtain_core::paths;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

pub struct CurtainLogger {
    max_level: Level,
    log_file: Mutex<Option<File>>,
    target_colors: Mutex<HashMap<String, usize>>,
    next_color_index: AtomicUsize,
}

impl CurtainLogger {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        let log_file = paths::ensure_data_dir()
            .and_then(|_| paths::log_file_path())
            .and_then(|path| {
                OpenOptions::new()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .open(&path)
                    .map_err(|e| {
                        eprintln!("Warning: Failed to open log file at {:?}: {}", path, e);
                    })
                    .ok()
            });

        Self {
            max_level: max_level(quiet, verbose),
            log_file: Mutex::new(log_file),
            target_colors: Mutex::new(HashMap::new()),
            next_color_index: AtomicUsize::new(0),
        }
    }

    fn color_for_target(&self, target: &str) -> ColoredString {
        let colors: &[fn(&str) -> ColoredString] = &[
            |s| s.green(),
            |s| s.yellow(),
            |s| s.blue(),
            |s| s.magenta(),
            |s| s.cyan(),
        ];

        let color_index = match self.target_colors.lock() {
            Ok(mut target_colors) => *target_colors
                .entry(target.to_string())
                .or_insert_with(|| {
                    self.next_color_index.fetch_add(1, Ordering::SeqCst) % colors.len()
                }),
            Err(_) => 0,
        };

        colors[color_index](target)
    }

    fn format_log(&self, record: &Record) -> String {
        let level_str = level_tag(record.level());
        let target = short_target(record.target());
        let colored_target = if target.is_empty() {
            String::new()
        } else {
            format!("[{}] ", self.color_for_target(target).dimmed())
        };

        match record.level() {
            Level::Error => format!("{} {}{}", level_str, colored_target, record.args())
                .red()
                .bold()
                .to_string(),
            Level::Warn => format!("{} {}{}", level_str, colored_target, record.args())
                .yellow()
                .bold()
                .to_string(),
            level => {
                let colored_level = match level {
                    Level::Info => level_str.green().bold(),
                    Level::Debug => level_str.blue().bold(),
                    _ => level_str.white().bold(),
                };
                format!("{} {}{}", colored_level, colored_target, record.args())
            }
        }
    }
}

fn max_level(quiet: bool, verbose: bool) -> Level {
    if quiet {
        Level::Info
    } else if verbose {
        Level::Trace
    } else {
        Level::Debug
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "[E]",
        Level::Warn => "[W]",
        Level::Info => "[I]",
        Level::Debug => "[D]",
        Level::Trace => "[T]",
    }
}

fn short_target(target: &str) -> &str {
    target.split("::").last().unwrap_or(target)
}

fn format_log_plain(record: &Record) -> String {
    let target = short_target(record.target());
    if target.is_empty() {
        format!("{} {}", level_tag(record.level()), record.args())
    } else {
        format!("{} [{}] {}", level_tag(record.level()), target, record.args())
    }
}

impl Log for CurtainLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        println!("{}", self.format_log(record));

        if let Ok(mut file_opt) = self.log_file.lock() {
            if let Some(file) = file_opt.as_mut() {
                let _ = writeln!(file, "{}", format_log_plain(record));
                let _ = file.flush();
            }
        }
    }

    fn flush(&self) {}
}

pub fn init_logger(quiet: bool, verbose: bool) -> Result<(), log::SetLoggerError> {
    let logger = CurtainLogger::new(quiet, verbose);
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        assert_eq!(max_level(true, false), Level::Info);
        assert_eq!(max_level(false, true), Level::Trace);
        assert_eq!(max_level(false, false), Level::Debug);
    }

    #[test]
    fn test_short_target() {
        assert_eq!(short_target("curtain_core::overlay::controller"), "controller");
        assert_eq!(short_target("curtain"), "curtain");
    }

    #[test]
    fn test_plain_format() {
        assert_eq!(
            format_log_plain(
                &Record::builder()
                    .level(Level::Debug)
                    .target("curtain_core::overlay::controller")
                    .args(format_args!("Dismissed overlay 3"))
                    .build()
            ),
            "[D] [controller] Dismissed overlay 3"
        );
    }
}
