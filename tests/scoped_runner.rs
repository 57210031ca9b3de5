//! Integration tests for the per-thread runner API.
//!
//! ## Runner Tests
//! - `test_warning_only_scope_returns_value`: warnings are logged, the value
//!   comes back untouched
//! - `test_fatal_issue_fails_outermost_scope`: one fatal issue turns into an
//!   aggregate failure
//! - `test_nested_scopes_log_once`: only the outermost exit logs
//! - `test_only_outermost_scope_escalates`: an inner `*_or_fail` never raises
//! - `test_work_error_takes_precedence`: the work's own error suppresses the
//!   aggregate failure
//! - `test_panic_closes_scope`: unwinding finalizes without escalating
//!
//! ## Mark Tests
//! - `test_reset_discards_marked_issues`
//! - `test_empty_reset_keeps_mark`
//! - `test_list_issues_since_mark`
//!
//! ## Context Tests
//! - `test_operations_outside_scope`
//! - `test_threads_do_not_share_scopes`

mod common;

use std::{panic, thread};

use issuescope::{
    CurrentThread, Issue, NoScopeOpen, RunError, ScopeContext, ScopeGuard, Severity, fatal,
    has_fatal_issues, list_issues, mark, reset, run_collecting, run_collecting_or_fail,
    try_run_collecting, try_run_collecting_or_fail, unmark, warning,
};

use self::common::{Captured, install, take_entries};

#[derive(Debug, PartialEq, thiserror::Error)]
enum LoadError {
    #[error("file not found: {0}")]
    NotFound(&'static str),
}

fn messages(issues: &[Issue]) -> Vec<&str> {
    issues.iter().map(Issue::message).collect()
}

#[test]
fn test_warning_only_scope_returns_value() {
    install();

    let value = run_collecting(|| {
        warning("s1", "w1").unwrap();
        42
    });

    assert_eq!(value, 42);
    assert_eq!(
        take_entries(),
        [Captured {
            severity: Severity::Warning,
            text: "The following warnings have been detected:\n  [WARNING] w1".to_owned(),
            fatal_count: 0,
            warning_count: 1,
        }]
    );
}

#[test]
fn test_warning_only_scope_never_fails() {
    install();

    let result = run_collecting_or_fail(|| {
        warning("s1", "w1").unwrap();
        warning("s2", "w2").unwrap();
        "done"
    });

    assert_eq!(result.unwrap(), "done");
    let entries = take_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, Severity::Warning);
    assert_eq!(entries[0].warning_count, 2);
}

#[test]
fn test_fatal_issue_fails_outermost_scope() {
    install();

    let failure = run_collecting_or_fail(|| {
        fatal("s1", "boom").unwrap();
        1
    })
    .unwrap_err();

    assert_eq!(failure.issues().as_slice(), [Issue::fatal("s1", "boom")]);

    let entries = take_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, Severity::Fatal);
    assert_eq!(entries[0].text, failure.to_string());
}

#[test]
fn test_fatal_summary_lists_fatal_first() {
    install();

    let failure = run_collecting_or_fail(|| {
        warning("s1", "w1").unwrap();
        fatal("s2", "f1").unwrap();
        warning("s3", "w2").unwrap();
    })
    .unwrap_err();

    // The failure keeps reporting order; the summary partitions.
    assert_eq!(messages(failure.issues()), ["w1", "f1", "w2"]);
    assert_eq!(
        failure.to_string(),
        "The following errors and warnings have been detected:\n  \
         [FATAL] f1\n  \
         [WARNING] w1\n  \
         [WARNING] w2"
    );

    let entries = take_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!((entries[0].fatal_count, entries[0].warning_count), (1, 2));
}

#[test]
fn test_fatal_without_escalation_only_logs() {
    install();

    let value = run_collecting(|| {
        fatal("s1", "boom").unwrap();
        7
    });

    assert_eq!(value, 7);
    let entries = take_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, Severity::Fatal);
}

#[test]
fn test_nested_scopes_log_once() {
    install();

    run_collecting(|| {
        run_collecting(|| fatal("x", "bad").unwrap());
        // The inner exit neither logged nor cleared anything.
        assert!(take_entries().is_empty());
        assert_eq!(has_fatal_issues(), Ok(true));
    });

    assert_eq!(has_fatal_issues(), Err(NoScopeOpen));
    let entries = take_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, Severity::Fatal);
}

#[test]
fn test_only_outermost_scope_escalates() {
    install();

    let failure = run_collecting_or_fail(|| {
        let inner = run_collecting_or_fail(|| fatal("inner", "f1").unwrap());
        assert!(inner.is_ok());
    })
    .unwrap_err();
    assert_eq!(messages(failure.issues()), ["f1"]);
    take_entries();

    // An escalating inner scope under a non-escalating outer one never raises.
    let value = run_collecting(|| {
        run_collecting_or_fail(|| fatal("inner", "f2").unwrap()).is_ok()
    });
    assert!(value);
    assert_eq!(take_entries().len(), 1);
}

#[test]
fn test_work_error_takes_precedence() {
    install();

    let result: Result<(), RunError<LoadError>> = try_run_collecting_or_fail(|| {
        fatal("config", "bad key").unwrap();
        Err(LoadError::NotFound("app.toml"))
    });

    let error = result.unwrap_err();
    assert!(error.is_work());
    assert_eq!(error.to_string(), "file not found: app.toml");

    // The issues were still flushed.
    let entries = take_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, Severity::Fatal);
    assert!(!CurrentThread.is_open());
}

#[test]
fn test_fallible_work_with_fatal_issue() {
    install();

    let result: Result<u32, RunError<LoadError>> = try_run_collecting_or_fail(|| {
        fatal("config", "bad key").unwrap();
        Ok(3)
    });
    let failure = result.unwrap_err().into_issues().expect("aggregate failure");
    assert_eq!(messages(failure.issues()), ["bad key"]);

    let result: Result<u32, LoadError> = try_run_collecting(|| {
        warning("config", "unused key").unwrap();
        Err(LoadError::NotFound("app.toml"))
    });
    assert_eq!(result, Err(LoadError::NotFound("app.toml")));

    assert_eq!(take_entries().len(), 2);
}

#[test]
fn test_panic_closes_scope() {
    install();

    let result = panic::catch_unwind(|| {
        run_collecting_or_fail(|| -> u8 {
            fatal("s1", "boom").unwrap();
            panic!("work panicked");
        })
    });

    assert!(result.is_err());
    assert!(!CurrentThread.is_open());
    let entries = take_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, Severity::Fatal);

    // The next scope on this thread starts clean.
    let issues = run_collecting(|| list_issues(false).unwrap());
    assert!(issues.is_empty());
}

#[test]
fn test_explicit_guard() {
    install();

    let outer = ScopeGuard::enter(CurrentThread);
    let inner = ScopeGuard::enter(CurrentThread);
    fatal("s1", "boom").unwrap();
    assert!(inner.exit(true).is_none());

    let failure = outer.exit(true).expect("outermost exit escalates");
    assert_eq!(failure.fatal_issues().count(), 1);
    assert_eq!(take_entries().len(), 1);
}

#[test]
fn test_empty_scope_logs_nothing() {
    install();

    assert_eq!(run_collecting_or_fail(|| 5), Ok(5));
    assert!(take_entries().is_empty());
}

#[test]
fn test_reset_discards_marked_issues() {
    install();

    let issues = run_collecting(|| {
        mark().unwrap();
        warning("a", "m1").unwrap();
        reset().unwrap();
        list_issues(false).unwrap()
    });

    assert!(issues.is_empty());
    assert!(take_entries().is_empty());
}

#[test]
fn test_speculative_branch_rollback() {
    install();

    let result = run_collecting_or_fail(|| {
        warning("parser", "ambiguous input").unwrap();

        mark().unwrap();
        fatal("parser", "not a date").unwrap();
        assert_eq!(has_fatal_issues(), Ok(true));
        reset().unwrap();

        assert_eq!(has_fatal_issues(), Ok(false));
        // Without a mark, reset keeps everything.
        reset().unwrap();
        list_issues(false).unwrap().len()
    });

    assert_eq!(result, Ok(1));
    take_entries();
}

#[test]
fn test_empty_reset_keeps_mark() {
    install();

    let remaining = run_collecting(|| {
        mark().unwrap();
        // Nothing to roll back yet; the mark survives.
        reset().unwrap();
        warning("a", "after").unwrap();
        reset().unwrap();
        list_issues(false).unwrap().len()
    });

    assert_eq!(remaining, 0);
    assert!(take_entries().is_empty());
}

#[test]
fn test_list_issues_since_mark() {
    install();

    run_collecting(|| {
        warning("s", "before").unwrap();
        mark().unwrap();
        assert!(list_issues(true).unwrap().is_empty());

        warning("s", "after").unwrap();
        assert_eq!(messages(&list_issues(true).unwrap()), ["after"]);
        assert_eq!(messages(&list_issues(false).unwrap()), ["before", "after"]);

        // A second mark replaces the first.
        mark().unwrap();
        warning("s", "latest").unwrap();
        assert_eq!(messages(&list_issues(true).unwrap()), ["latest"]);

        unmark().unwrap();
        assert_eq!(list_issues(true).unwrap().len(), 3);
    });
    take_entries();
}

#[test]
fn test_snapshot_is_stable() {
    install();

    run_collecting(|| {
        warning("s", "one").unwrap();
        let snapshot = list_issues(false).unwrap();
        warning("s", "two").unwrap();
        assert_eq!(messages(&snapshot), ["one"]);
    });
    take_entries();
}

#[test]
fn test_report_without_source() {
    install();

    let failure = run_collecting_or_fail(|| {
        issuescope::report(None, "no source", Severity::Fatal).unwrap();
    })
    .unwrap_err();

    assert!(failure.issues()[0].source().is_none());
    take_entries();
}

#[test]
fn test_operations_outside_scope() {
    install();

    assert_eq!(warning("s1", "w1"), Err(NoScopeOpen));
    assert_eq!(fatal("s1", "f1"), Err(NoScopeOpen));
    assert_eq!(has_fatal_issues(), Err(NoScopeOpen));
    assert_eq!(list_issues(false), Err(NoScopeOpen));
    assert_eq!(mark(), Err(NoScopeOpen));
    assert_eq!(unmark(), Err(NoScopeOpen));
    assert_eq!(reset(), Err(NoScopeOpen));
    assert!(take_entries().is_empty());
}

#[test]
fn test_threads_do_not_share_scopes() {
    install();

    run_collecting(|| {
        warning("main", "w1").unwrap();

        let spawned = thread::spawn(|| {
            let outside = warning("worker", "lost");
            let inside = CurrentThread.run_collecting(|| {
                CurrentThread.fatal("worker", "own scope").unwrap();
                CurrentThread.list_issues(false).unwrap().len()
            });
            (outside, inside)
        })
        .join()
        .unwrap();

        assert_eq!(spawned, (Err(NoScopeOpen), 1));
        assert_eq!(messages(&list_issues(false).unwrap()), ["w1"]);
    });

    let entries = take_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, Severity::Warning);
}

#[test]
fn test_reporting_macros() {
    install();

    let failure = run_collecting_or_fail(|| {
        let field = "timeout";
        issuescope::warning!("config", "unknown key `{field}`").unwrap();
        issuescope::fatal!(None, "value {} out of range", -1).unwrap();
        issuescope::warning!("config", "plain text").unwrap();
    })
    .unwrap_err();

    assert_eq!(
        messages(failure.issues()),
        ["unknown key `timeout`", "value -1 out of range", "plain text"]
    );
    take_entries();
}
