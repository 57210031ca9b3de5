//! The [`Issue`] record and its parts.
//!
//! An issue is the unit of reporting: one problem found somewhere in a nested
//! unit of work, tagged with how serious it is and (optionally) with the object
//! it was found in. Issues are immutable once constructed and have no identity
//! beyond their contents; two issues with equal source, message and severity
//! are interchangeable for presentation purposes.

use alloc::{borrow::Cow, string::String, string::ToString};
use core::{
    any::Any,
    fmt,
    hash::{Hash, Hasher},
};

use triomphe::Arc;
use unsize::CoerceUnsize;

/// How serious a reported [`Issue`] is.
///
/// Only [`Fatal`](Severity::Fatal) issues can turn into a raised failure; a
/// scope that only collected [`Warning`](Severity::Warning)s always completes
/// normally.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// A problem worth logging that does not invalidate the result.
    Warning,
    /// A problem that invalidates the result of the enclosing work.
    Fatal,
}

impl Severity {
    /// Returns `true` for [`Severity::Fatal`].
    #[inline]
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(self, Severity::Fatal)
    }

    /// Maps the `is_fatal` flag used by flag-based reporting calls to a
    /// severity.
    #[inline]
    #[must_use]
    pub const fn from_fatal_flag(is_fatal: bool) -> Self {
        if is_fatal {
            Severity::Fatal
        } else {
            Severity::Warning
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Fatal => f.write_str("fatal"),
        }
    }
}

/// Object-safe view of a source value.
///
/// Kept crate-private: the only way to build one is through
/// [`IssueSource::new`], whose bounds are spelled out on the function itself.
pub(crate) trait SourceObject: Any + fmt::Display + fmt::Debug + Send + Sync {
    /// Upcasts to [`Any`] for downcasting by the caller.
    fn as_any(&self) -> &dyn Any;
}

impl<T> SourceObject for T
where
    T: Any + fmt::Display + fmt::Debug + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The object an [`Issue`] was found in.
///
/// This is an opaque handle: the engine never looks inside it beyond
/// displaying it. Any `'static` value that can be displayed, debugged and
/// shared across threads can be used as a source, and callers that know the
/// concrete type can get it back with [`downcast_ref`](Self::downcast_ref).
///
/// Cloning is cheap (reference counted).
///
/// # Equality
///
/// Two sources are equal when they point at the same allocation, or when they
/// hold values of the same concrete type that display identically.
///
/// # Examples
///
/// ```
/// use issuescope_internals::IssueSource;
///
/// #[derive(Debug)]
/// struct Field(&'static str);
///
/// impl std::fmt::Display for Field {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "field `{}`", self.0)
///     }
/// }
///
/// let source = IssueSource::new(Field("name"));
/// assert_eq!(source.to_string(), "field `name`");
/// assert_eq!(source.downcast_ref::<Field>().map(|f| f.0), Some("name"));
/// assert!(source.downcast_ref::<String>().is_none());
/// ```
#[derive(Clone)]
pub struct IssueSource {
    /// The type-erased value.
    object: Arc<dyn SourceObject>,
}

impl IssueSource {
    /// Wraps `value` as an issue source.
    pub fn new<T>(value: T) -> Self
    where
        T: Any + fmt::Display + fmt::Debug + Send + Sync,
    {
        Self {
            object: Arc::new(value).unsize(unsize::Coercion!(to dyn SourceObject)),
        }
    }

    /// Returns the wrapped value if it is a `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.object).as_any().downcast_ref::<T>()
    }

    /// Returns `true` if the wrapped value is a `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        (*self.object).as_any().is::<T>()
    }

    /// Returns `true` if both handles point at the same allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.object, &other.object)
    }
}

impl fmt::Display for IssueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.object, f)
    }
}

impl fmt::Debug for IssueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.object, f)
    }
}

impl PartialEq for IssueSource {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let this: &dyn Any = (*self.object).as_any();
        let that: &dyn Any = (*other.object).as_any();
        Any::type_id(this) == Any::type_id(that)
            && (*self.object).to_string() == (*other.object).to_string()
    }
}

impl Eq for IssueSource {}

impl Hash for IssueSource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Any::type_id((*self.object).as_any()).hash(state);
        (*self.object).to_string().hash(state);
    }
}

impl From<&'static str> for IssueSource {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for IssueSource {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Conversion into the optional source slot of an [`Issue`].
///
/// Implemented for [`IssueSource`] itself, for `Option<IssueSource>` (use
/// `None` to report without a source) and for plain strings, so reporting
/// calls can be written as `warning("users.email", "empty value")`.
pub trait IntoIssueSource {
    /// Performs the conversion.
    fn into_issue_source(self) -> Option<IssueSource>;
}

impl IntoIssueSource for IssueSource {
    #[inline]
    fn into_issue_source(self) -> Option<IssueSource> {
        Some(self)
    }
}

impl IntoIssueSource for Option<IssueSource> {
    #[inline]
    fn into_issue_source(self) -> Option<IssueSource> {
        self
    }
}

impl IntoIssueSource for &'static str {
    #[inline]
    fn into_issue_source(self) -> Option<IssueSource> {
        Some(IssueSource::from(self))
    }
}

impl IntoIssueSource for String {
    #[inline]
    fn into_issue_source(self) -> Option<IssueSource> {
        Some(IssueSource::from(self))
    }
}

/// A single reported problem.
///
/// # Examples
///
/// ```
/// use issuescope_internals::{Issue, Severity};
///
/// let issue = Issue::fatal("s1", "boom");
/// assert_eq!(issue.severity(), Severity::Fatal);
/// assert_eq!(issue.message(), "boom");
/// assert_eq!(issue.source().map(|s| s.to_string()).as_deref(), Some("s1"));
/// assert_eq!(issue, Issue::new("s1", "boom", Severity::Fatal));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Issue {
    /// What the issue was found in, if known.
    source: Option<IssueSource>,
    /// Raw, unformatted description.
    message: Cow<'static, str>,
    /// Warning or fatal.
    severity: Severity,
}

impl Issue {
    /// Creates an issue with the given severity.
    pub fn new(
        source: impl IntoIssueSource,
        message: impl Into<Cow<'static, str>>,
        severity: Severity,
    ) -> Self {
        Self {
            source: source.into_issue_source(),
            message: message.into(),
            severity,
        }
    }

    /// Creates a [`Severity::Warning`] issue.
    pub fn warning(source: impl IntoIssueSource, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(source, message, Severity::Warning)
    }

    /// Creates a [`Severity::Fatal`] issue.
    pub fn fatal(source: impl IntoIssueSource, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(source, message, Severity::Fatal)
    }

    /// The object the issue was found in, if one was given.
    #[inline]
    #[must_use]
    pub fn source(&self) -> Option<&IssueSource> {
        self.source.as_ref()
    }

    /// The raw message, before any formatting hook has seen it.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The severity of the issue.
    #[inline]
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Shorthand for `self.severity().is_fatal()`.
    #[inline]
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.severity.is_fatal()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}
