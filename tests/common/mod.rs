//! Shared test tooling: a log sink that records every entry together with the
//! thread that emitted it.
//!
//! libtest runs each test on its own thread, so filtering by thread id keeps
//! parallel tests from seeing each other's entries.

#![allow(dead_code)]

use std::{
    sync::{Mutex, Once, PoisonError},
    thread::{self, ThreadId},
};

use issuescope::{
    Severity,
    hooks::log_sink::{IssueSinkHook, LogEntry, register_issue_sink_hook},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Captured {
    pub severity: Severity,
    pub text: String,
    pub fatal_count: usize,
    pub warning_count: usize,
}

static ENTRIES: Mutex<Vec<(ThreadId, Captured)>> = Mutex::new(Vec::new());

struct CaptureSink;

impl IssueSinkHook for CaptureSink {
    fn emit(&self, entry: &LogEntry<'_>) {
        let captured = Captured {
            severity: entry.severity(),
            text: entry.text().to_owned(),
            fatal_count: entry.fatal_count(),
            warning_count: entry.warning_count(),
        };
        ENTRIES
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((thread::current().id(), captured));
    }
}

/// Registers the capturing sink. Safe to call from every test.
pub fn install() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| register_issue_sink_hook(CaptureSink));
}

/// Removes and returns the entries emitted by `thread`.
pub fn take_entries_of(thread: ThreadId) -> Vec<Captured> {
    let mut entries = ENTRIES.lock().unwrap_or_else(PoisonError::into_inner);
    let mut taken = Vec::new();
    entries.retain(|(id, entry)| {
        if *id == thread {
            taken.push(entry.clone());
            false
        } else {
            true
        }
    });
    taken
}

/// Removes and returns the entries emitted by the calling thread.
pub fn take_entries() -> Vec<Captured> {
    take_entries_of(thread::current().id())
}
