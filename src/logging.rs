//! Structured logging backend.
//!
//! [`Logger`] implements [`log::Log`] and is handed to each component by
//! reference instead of being installed as the global logger. Records are
//! written as logfmt lines:
//!
//! ```text
//! level=warn msg="open file failure" filename=qrcode.png error="permission denied"
//! ```

use std::fmt::Write as _;
use std::io::Write;
use std::sync::{Arc, Mutex};

use log::kv::{self, Key, Value, VisitSource};
use log::{LevelFilter, Log, Metadata, Record};

/// Default verbosity, matching the progress messages being hidden unless asked for.
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

/// A logfmt logger writing to an owned sink.
pub struct Logger {
    level: LevelFilter,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl Logger {
    /// Create a logger writing records at or above `level` to `sink`.
    pub fn new(level: LevelFilter, sink: Box<dyn Write + Send>) -> Self {
        // The `log!` macros consult the global max level before reaching an
        // explicit logger, so the gate is opened fully and filtering happens here.
        log::set_max_level(LevelFilter::Trace);
        Self {
            level,
            sink: Mutex::new(sink),
        }
    }

    /// Logger writing to standard error.
    pub fn stderr(level: LevelFilter) -> Self {
        Self::new(level, Box::new(std::io::stderr()))
    }

    /// Logger writing into a shared in-memory buffer.
    pub fn memory(level: LevelFilter) -> (Self, MemorySink) {
        let sink = MemorySink::default();
        (Self::new(level, Box::new(sink.clone())), sink)
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format_record(record);
        if let Ok(mut sink) = self.sink.lock() {
            // Nowhere left to report a failing log sink.
            let _ = sink.write_all(line.as_bytes());
        }
    }

    fn flush(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.flush();
        }
    }
}

/// Render one record as a newline-terminated logfmt line.
pub fn format_record(record: &Record) -> String {
    let mut line = format!(
        "level={} msg={}",
        record.level().as_str().to_lowercase(),
        quote(&record.args().to_string())
    );

    let mut fields = FieldWriter { line: &mut line };
    // Fields that fail to format are dropped; the message itself is kept.
    let _ = record.key_values().visit(&mut fields);

    line.push('\n');
    line
}

struct FieldWriter<'a> {
    line: &'a mut String,
}

impl<'kvs> VisitSource<'kvs> for FieldWriter<'_> {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), kv::Error> {
        write!(self.line, " {}={}", key, quote(&value.to_string()))
            .map_err(|_| kv::Error::msg("failed to format log field"))
    }
}

/// Quote a logfmt value when it is empty or contains separators.
fn quote(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '"' || c == '=');

    if needs_quotes {
        format!("{:?}", value)
    } else {
        value.to_string()
    }
}

/// Parse a level name from config or CLI input.
///
/// Accepts the `log` level names case-insensitively plus `warning`.
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    if name.eq_ignore_ascii_case("warning") {
        return Some(LevelFilter::Warn);
    }
    name.parse().ok()
}

/// Shared in-memory log sink, mainly for capturing output in tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        self.buffer
            .lock()
            .map(|buf| String::from_utf8_lossy(&buf).into_owned())
            .unwrap_or_default()
    }
}

impl Write for MemorySink {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        let mut buf = self
            .buffer
            .lock()
            .map_err(|_| std::io::Error::other("log buffer poisoned"))?;
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
