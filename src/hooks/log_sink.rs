//! Where finalized summaries go.
//!
//! Closing the outermost scope of a context emits at most one [`LogEntry`]:
//!
//! - nothing if no issues were recorded,
//! - a [`Severity::Warning`] entry if only warnings were recorded,
//! - a [`Severity::Fatal`] entry listing fatal issues and then warnings
//!   otherwise.
//!
//! The entry is emitted whether or not the scope turns it into a failure.
//! Without a registered hook, entries go to
//! [`TracingSink`](crate::hooks::builtin_hooks::tracing_sink::TracingSink).
//!
//! ```rust
//! use issuescope::hooks::log_sink::{IssueSinkHook, LogEntry, register_issue_sink_hook};
//!
//! struct Stderr;
//!
//! impl IssueSinkHook for Stderr {
//!     fn emit(&self, entry: &LogEntry<'_>) {
//!         eprintln!("[{}] {}", entry.severity(), entry.text());
//!     }
//! }
//!
//! register_issue_sink_hook(Stderr);
//! # issuescope::hooks::log_sink::unregister_issue_sink_hook();
//! ```

use issuescope_internals::Severity;
use triomphe::Arc;
use unsize::CoerceUnsize;

use crate::hooks::{builtin_hooks::tracing_sink::TracingSink, hook_lock::HookLock};

type Hook = Arc<dyn IssueSinkHook>;

static HOOK: HookLock<Hook> = HookLock::new();

/// One rendered summary, handed to the sink.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LogEntry<'a> {
    severity: Severity,
    text: &'a str,
    fatal_count: usize,
    warning_count: usize,
}

impl<'a> LogEntry<'a> {
    pub(crate) fn new(
        severity: Severity,
        text: &'a str,
        fatal_count: usize,
        warning_count: usize,
    ) -> Self {
        Self {
            severity,
            text,
            fatal_count,
            warning_count,
        }
    }

    /// Severity of the entry as a whole.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The summary as rendered by the current formatter hook.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Number of fatal issues in the summary.
    #[must_use]
    pub fn fatal_count(&self) -> usize {
        self.fatal_count
    }

    /// Number of warnings in the summary.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warning_count
    }
}

/// Receives the summaries emitted when scopes are finalized.
///
/// Called on the thread that closed the scope, with no engine locks held.
pub trait IssueSinkHook: 'static + Send + Sync {
    /// Handles one entry.
    fn emit(&self, entry: &LogEntry<'_>);
}

pub(crate) fn emit(entry: &LogEntry<'_>) {
    match HOOK.current() {
        Some(hook) => hook.emit(entry),
        None => TracingSink.emit(entry),
    }
}

/// Registers the global log sink, replacing any previous one.
pub fn register_issue_sink_hook(hook: impl IssueSinkHook) {
    HOOK.replace(Some(
        Arc::new(hook).unsize(unsize::Coercion!(to dyn IssueSinkHook)),
    ));
}

/// Removes the registered sink, restoring [`TracingSink`].
///
/// Returns `true` if a hook was registered.
pub fn unregister_issue_sink_hook() -> bool {
    HOOK.replace(None).is_some()
}
