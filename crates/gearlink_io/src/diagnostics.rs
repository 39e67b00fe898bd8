use std::fmt;
use std::sync::Arc;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Sink for advisory messages emitted by a port controller.
///
/// Each controller owns one of these instead of writing through a global
/// callback, so two linked units can report to different targets (or be
/// silenced individually). Nothing a controller logs here changes the result
/// of the operation that produced it.
#[derive(Clone)]
pub struct Diagnostics {
    sink: Arc<dyn Log>,
    max_level: LevelFilter,
    target: String,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(Arc::new(FacadeLog), LevelFilter::Info, "gearlink_io")
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("max_level", &self.max_level)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl Diagnostics {
    pub fn new(sink: Arc<dyn Log>, max_level: LevelFilter, target: impl Into<String>) -> Self {
        Self {
            sink,
            max_level,
            target: target.into(),
        }
    }

    /// Diagnostics that drop everything.
    pub fn silent() -> Self {
        Self::new(Arc::new(FacadeLog), LevelFilter::Off, "gearlink_io")
    }

    pub fn with_level(mut self, max_level: LevelFilter) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn max_level(&self) -> LevelFilter {
        self.max_level
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        if level > self.max_level {
            return;
        }
        let record = Record::builder()
            .args(args)
            .level(level)
            .target(&self.target)
            .module_path_static(Some(module_path!()))
            .build();
        if self.sink.enabled(record.metadata()) {
            self.sink.log(&record);
        }
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Debug, args);
    }

    pub fn trace(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Trace, args);
    }
}

/// Forwards to whatever logger the binary installed through the `log` facade
/// (`env_logger` in the runner).
struct FacadeLog;

impl Log for FacadeLog {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        log::logger().enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        log::logger().log(record);
    }

    fn flush(&self) {
        log::logger().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingLog;

    #[test]
    fn messages_above_max_level_are_dropped() {
        let log = Arc::new(RecordingLog::default());
        let diag = Diagnostics::new(log.clone(), LevelFilter::Info, "unit");

        diag.debug(format_args!("hidden"));
        diag.info(format_args!("shown {}", 1));
        diag.warn(format_args!("also shown"));

        assert_eq!(
            log.entries(),
            vec![
                (Level::Info, "shown 1".to_string()),
                (Level::Warn, "also shown".to_string()),
            ]
        );
    }

    #[test]
    fn records_carry_the_configured_target() {
        let log = Arc::new(RecordingLog::default());
        let diag = Diagnostics::new(log.clone(), LevelFilter::Trace, "left").with_target("right");
        diag.trace(format_args!("x"));
        assert_eq!(log.targets(), vec!["right".to_string()]);
    }

    #[test]
    fn silent_diagnostics_never_reach_the_sink() {
        let log = Arc::new(RecordingLog::default());
        let diag = Diagnostics::new(log.clone(), LevelFilter::Off, "unit");
        diag.warn(format_args!("nope"));
        assert!(log.entries().is_empty());
        assert_eq!(Diagnostics::silent().max_level(), LevelFilter::Off);
    }
}
