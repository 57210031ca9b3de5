//! The default issue formatter.

use core::fmt;

use issuescope_internals::{Issue, Severity};

use crate::hooks::issue_formatting::IssueFormatterHook;

/// The formatter used when no [`IssueFormatterHook`] is registered.
///
/// Every field is a plain piece of text, so a variant can be built from one of
/// the presets with struct update syntax.
///
/// Output of [`DEFAULT`](Self::DEFAULT) for a scope that recorded one warning
/// and one fatal issue:
///
/// ```text
/// The following errors and warnings have been detected:
///   [FATAL] missing resource method
///   [WARNING] deprecated annotation
/// ```
///
/// # Examples
///
/// ```rust
/// use issuescope::hooks::{
///     builtin_hooks::issue_formatter::DefaultIssueFormatter,
///     issue_formatting::register_issue_formatter_hook,
/// };
///
/// register_issue_formatter_hook(DefaultIssueFormatter {
///     item_indent: "    - ",
///     ..DefaultIssueFormatter::WITH_SOURCES
/// });
/// # issuescope::hooks::issue_formatting::unregister_issue_formatter_hook();
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DefaultIssueFormatter {
    /// Header line of a summary that contains at least one fatal issue
    pub fatal_header: &'static str,

    /// Header line of a summary that only contains warnings
    pub warning_header: &'static str,

    /// Written before every line below the header
    pub item_indent: &'static str,

    /// Written before the message of a fatal issue
    pub fatal_prefix: &'static str,

    /// Written before the message of a warning
    pub warning_prefix: &'static str,

    /// If set, sources are appended to their message, wrapped in this prefix
    /// and suffix. Issues without a source are written unchanged.
    pub source_affixes: Option<(&'static str, &'static str)>,
}

impl DefaultIssueFormatter {
    /// Header, indented `[FATAL]`/`[WARNING]` lines, no sources.
    pub const DEFAULT: Self = Self {
        fatal_header: "The following errors and warnings have been detected:",
        warning_header: "The following warnings have been detected:",
        item_indent: "  ",
        fatal_prefix: "[FATAL] ",
        warning_prefix: "[WARNING] ",
        source_affixes: None,
    };

    /// Like [`DEFAULT`](Self::DEFAULT), with ` (source: ...)` after each
    /// message that has a source.
    pub const WITH_SOURCES: Self = Self {
        source_affixes: Some((" (source: ", ")")),
        ..Self::DEFAULT
    };

    /// The preset selected by the `ISSUESCOPE_FORMAT` environment variable.
    ///
    /// The variable is read once per process. It holds comma-separated
    /// options; `sources` selects [`WITH_SOURCES`](Self::WITH_SOURCES).
    /// Without the `std` feature this is always [`DEFAULT`](Self::DEFAULT).
    #[must_use]
    pub fn from_env() -> &'static Self {
        #[cfg(feature = "std")]
        if FormatEnvOptions::get().show_sources {
            return const { &Self::WITH_SOURCES };
        }

        const { &Self::DEFAULT }
    }
}

impl Default for DefaultIssueFormatter {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl IssueFormatterHook for DefaultIssueFormatter {
    fn format_issue(&self, issue: &Issue, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match issue.severity() {
            Severity::Fatal => self.fatal_prefix,
            Severity::Warning => self.warning_prefix,
        };
        write!(formatter, "{}{prefix}{}", self.item_indent, issue.message())?;

        if let (Some((before, after)), Some(source)) = (self.source_affixes, issue.source()) {
            write!(formatter, "{before}{source}{after}")?;
        }
        Ok(())
    }

    fn summary_header(&self, severity: Severity) -> &str {
        match severity {
            Severity::Fatal => self.fatal_header,
            Severity::Warning => self.warning_header,
        }
    }
}

#[cfg(feature = "std")]
struct FormatEnvOptions {
    show_sources: bool,
}

#[cfg(feature = "std")]
impl FormatEnvOptions {
    fn get() -> &'static Self {
        static ISSUESCOPE_FORMAT_FLAGS: std::sync::OnceLock<FormatEnvOptions> =
            std::sync::OnceLock::new();

        ISSUESCOPE_FORMAT_FLAGS.get_or_init(|| {
            let mut show_sources = false;

            if let Some(var) = std::env::var_os("ISSUESCOPE_FORMAT") {
                for v in var.to_string_lossy().split(',') {
                    if v.trim().eq_ignore_ascii_case("sources") {
                        show_sources = true;
                    }
                }
            }

            FormatEnvOptions { show_sources }
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec::Vec};

    use super::*;
    use crate::hooks::issue_formatting::Summary;

    struct Rendered<'a>(&'a DefaultIssueFormatter, Summary<'a>);

    impl fmt::Display for Rendered<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.format_summary(self.1, f)
        }
    }

    fn render(formatter: &DefaultIssueFormatter, issues: &[Issue]) -> alloc::string::String {
        let fatal: Vec<&Issue> = issues.iter().filter(|i| i.is_fatal()).collect();
        let warnings: Vec<&Issue> = issues.iter().filter(|i| !i.is_fatal()).collect();
        Rendered(formatter, Summary::new(&fatal, &warnings)).to_string()
    }

    #[test]
    fn test_fatal_summary_lists_fatal_before_warnings() {
        let issues = [
            Issue::warning("a", "w1"),
            Issue::fatal("b", "f1"),
            Issue::warning("c", "w2"),
        ];
        assert_eq!(
            render(&DefaultIssueFormatter::DEFAULT, &issues),
            "The following errors and warnings have been detected:\n  [FATAL] f1\n  [WARNING] w1\n  [WARNING] w2"
        );
    }

    #[test]
    fn test_warning_summary() {
        let issues = [Issue::warning("a", "w1")];
        assert_eq!(
            render(&DefaultIssueFormatter::DEFAULT, &issues),
            "The following warnings have been detected:\n  [WARNING] w1"
        );
    }

    #[test]
    fn test_with_sources() {
        let issues = [Issue::fatal("s1", "boom"), Issue::fatal(None, "bare")];
        assert_eq!(
            render(&DefaultIssueFormatter::WITH_SOURCES, &issues),
            "The following errors and warnings have been detected:\n  [FATAL] boom (source: s1)\n  [FATAL] bare"
        );
    }

    #[test]
    fn test_struct_update() {
        let compact = DefaultIssueFormatter {
            item_indent: "",
            fatal_prefix: "E ",
            ..DefaultIssueFormatter::DEFAULT
        };
        let issues = [Issue::fatal("s1", "boom")];
        assert!(render(&compact, &issues).ends_with("\nE boom"));
        assert_eq!(DefaultIssueFormatter::default(), DefaultIssueFormatter::DEFAULT);
    }
}
