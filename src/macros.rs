/// Reports a warning with a formatted message to the calling thread's scope.
///
/// The first argument is the source (anything accepted by
/// [`warning`](crate::warning()), including `None`). The rest is interpreted
/// like the arguments of [`format!()`]. A message without arguments is stored
/// without allocating.
///
/// Evaluates to `Result<(), NoScopeOpen>`. Requires the `std` feature.
///
/// [`format!()`]: std::format
///
/// # Examples
///
/// ```
/// use issuescope::{NoScopeOpen, warning};
///
/// let line = 12;
/// issuescope::run_collecting(|| -> Result<(), NoScopeOpen> {
///     warning!("config", "unused key on line {line}")?;
///     warning!(None, "no source given")?;
///
///     let issues = issuescope::list_issues(false)?;
///     assert_eq!(issues[0].message(), "unused key on line 12");
///     Ok(())
/// })
/// .unwrap();
/// ```
#[macro_export]
macro_rules! warning {
    ($source:expr, $($arg:tt)+) => {
        $crate::warning(
            $source,
            $crate::__private::format_message($crate::__private::format_args!($($arg)+)),
        )
    };
}

/// Reports a fatal issue with a formatted message to the calling thread's
/// scope.
///
/// Takes the same arguments as [`warning!`].
///
/// # Examples
///
/// ```
/// use issuescope::fatal;
///
/// let failure = issuescope::run_collecting_or_fail(|| {
///     fatal!("resource", "no method for {}", "GET").unwrap();
/// })
/// .unwrap_err();
/// assert_eq!(failure.issues()[0].message(), "no method for GET");
/// ```
#[macro_export]
macro_rules! fatal {
    ($source:expr, $($arg:tt)+) => {
        $crate::fatal(
            $source,
            $crate::__private::format_message($crate::__private::format_args!($($arg)+)),
        )
    };
}
