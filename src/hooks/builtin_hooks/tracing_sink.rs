//! The default log sink.

use issuescope_internals::Severity;

use crate::hooks::log_sink::{IssueSinkHook, LogEntry};

/// Forwards finalized summaries to [`tracing`].
///
/// A fatal summary becomes an `ERROR` event, a warnings-only summary a `WARN`
/// event. Both use the `issuescope` target and carry the partition sizes as
/// the `fatal` and `warnings` fields, with the rendered summary as message.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TracingSink;

impl IssueSinkHook for TracingSink {
    fn emit(&self, entry: &LogEntry<'_>) {
        match entry.severity() {
            Severity::Fatal => tracing::error!(
                target: "issuescope",
                fatal = entry.fatal_count(),
                warnings = entry.warning_count(),
                "{}",
                entry.text(),
            ),
            Severity::Warning => tracing::warn!(
                target: "issuescope",
                fatal = entry.fatal_count(),
                warnings = entry.warning_count(),
                "{}",
                entry.text(),
            ),
        }
    }
}
