//! Log output for the signer.
//!
//! The signer does not reach for process-wide state on its own: records are routed through the
//! [`LogSink`] supplied in its configuration. The default sink forwards to whatever logger has been
//! installed with the `log` facade.

use {
    log::{Level, Log, Record},
    std::{
        fmt::{Arguments, Debug, Formatter, Result as FmtResult},
        sync::Arc,
    },
};

/// Destination for the signer's log records.
#[derive(Clone, Default)]
pub struct LogSink {
    logger: Option<Arc<dyn Log>>,
}

impl LogSink {
    /// A sink that forwards to the logger installed with the `log` facade.
    pub fn global() -> Self {
        Self::default()
    }

    /// A sink that forwards to `logger`, regardless of what has been installed globally.
    pub fn new<L>(logger: L) -> Self
    where
        L: Log + 'static,
    {
        Self {
            logger: Some(Arc::new(logger)),
        }
    }

    /// A sink that forwards to a shared logger.
    pub fn from_arc(logger: Arc<dyn Log>) -> Self {
        Self {
            logger: Some(logger),
        }
    }

    /// Emit a record. Use the `sink_*!` macros rather than calling this directly.
    #[doc(hidden)]
    pub(crate) fn emit(
        &self,
        level: Level,
        args: Arguments<'_>,
        module_path: &'static str,
        file: &'static str,
        line: u32,
    ) {
        let record = Record::builder()
            .args(args)
            .level(level)
            .target(module_path)
            .module_path_static(Some(module_path))
            .file_static(Some(file))
            .line(Some(line))
            .build();

        match &self.logger {
            Some(logger) => {
                if logger.enabled(record.metadata()) {
                    logger.log(&record);
                }
            }
            None => {
                if level <= log::max_level() {
                    let logger = log::logger();
                    if logger.enabled(record.metadata()) {
                        logger.log(&record);
                    }
                }
            }
        }
    }
}

impl Debug for LogSink {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.logger {
            Some(_) => f.write_str("LogSink::Custom"),
            None => f.write_str("LogSink::Global"),
        }
    }
}

macro_rules! sink_log {
    ($sink:expr, $level:expr, $($arg:tt)+) => {
        $sink.emit($level, format_args!($($arg)+), module_path!(), file!(), line!())
    };
}

macro_rules! sink_trace {
    ($sink:expr, $($arg:tt)+) => { sink_log!($sink, ::log::Level::Trace, $($arg)+) };
}

macro_rules! sink_debug {
    ($sink:expr, $($arg:tt)+) => { sink_log!($sink, ::log::Level::Debug, $($arg)+) };
}

macro_rules! sink_warn {
    ($sink:expr, $($arg:tt)+) => { sink_log!($sink, ::log::Level::Warn, $($arg)+) };
}
