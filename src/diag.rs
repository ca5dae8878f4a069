//! The diagnostic sink collaborator (§6).
//!
//! The distilled spec describes this as "a caller-supplied callback
//! receiving a formatted string per diagnostic." In this crate that
//! callback surface is the `log` crate's [`log::Log`] trait, the same
//! way the teacher repository's library modules call `log::info!`
//! directly (`apply.rs`, `validate.rs`) and leave installing an actual
//! logger (`pretty_env_logger`, or anything else implementing
//! `log::Log`) to the binary's `main`. The core never opens a file or
//! writes to stdout/stderr itself; every diagnostic goes through a
//! `log` macro so a caller who truly wants the literal callback framing
//! can install a `log::Log` impl that forwards records to a closure.
//!
//! [`install_forwarding_logger`] is provided for exactly that case and
//! for tests that want to assert on which diagnostics a pipeline run
//! emitted.

use log::{Level, Metadata, Record};
use std::sync::{Mutex, OnceLock};

/// Installs a process-wide logger that forwards every formatted record
/// to `sink`. Intended for callers who want the §6 "caller-supplied
/// callback" framing verbatim, and for tests.
///
/// Only the first call in a process takes effect, mirroring
/// `log::set_logger`'s own one-shot semantics; later calls return
/// `false`.
pub fn install_forwarding_logger<F>(sink: F) -> bool
where
  F: Fn(String) + Send + Sync + 'static,
{
  let logger = ForwardingLogger { sink: Box::new(sink) };
  log::set_max_level(log::LevelFilter::Trace);
  log::set_boxed_logger(Box::new(logger)).is_ok()
}

struct ForwardingLogger {
  sink: Box<dyn Fn(String) + Send + Sync>,
}

impl log::Log for ForwardingLogger {
  fn enabled(&self, metadata: &Metadata) -> bool {
    metadata.level() <= Level::Trace
  }

  fn log(&self, record: &Record) {
    if self.enabled(record.metadata()) {
      (self.sink)(format!("{}: {}", record.level(), record.args()));
    }
  }

  fn flush(&self) {}
}

/// An in-memory sink used by this crate's own tests to assert on
/// which diagnostics a pipeline run emitted, without relying on
/// process-global logger installation order across test binaries.
#[derive(Default)]
pub struct CapturedLog {
  lines: Mutex<Vec<String>>,
}

impl CapturedLog {
  pub fn global() -> &'static CapturedLog {
    static LOG: OnceLock<CapturedLog> = OnceLock::new();
    LOG.get_or_init(CapturedLog::default)
  }

  pub fn push(&self, line: String) {
    self.lines.lock().unwrap().push(line);
  }

  pub fn contains(&self, needle: &str) -> bool {
    self.lines.lock().unwrap().iter().any(|l| l.contains(needle))
  }

  pub fn clear(&self) {
    self.lines.lock().unwrap().clear();
  }
}
