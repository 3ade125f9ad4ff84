//! # Error Handling
//!
//! Errors surfaced by a [`BoundedSource`](crate::BoundedSource) and its
//! [`Subscription`](crate::Subscription)s.
//!
//! ## Overview
//!
//! Two families of failure exist:
//!
//! - **Content errors** ([`SourceError`]): the sequence holds a missing element.
//!   These are never raised to the caller of `request`; they are delivered to
//!   the subscriber through `on_error`, which terminates the registration.
//! - **Usage errors** ([`RequestError`]): asking for zero items, or asking after
//!   the registration went inert. `request` ignores these silently (with a log
//!   line); `try_request` reports them to the caller. The subscriber is never
//!   signalled for a usage error.
//!
//! ## Example
//!
//! ```rust
//! use streamweave_bounded::error::{ComponentInfo, ErrorKind, SourceError};
//!
//! let error = SourceError::missing_element(3, ComponentInfo::new("numbers", "BoundedSource"));
//! assert_eq!(error.index(), Some(3));
//! assert!(matches!(error.kind, ErrorKind::MissingElement { index: 3 }));
//! ```

use std::fmt;

/// The reason a registration failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
  /// The sequence has no value at `index`.
  #[error("missing element at index {index}")]
  MissingElement {
    /// Position of the missing element in the sequence.
    index: usize,
  },
}

/// Terminal error delivered to a subscriber through `on_error`.
///
/// Carries the failure reason plus the context of the source that produced
/// it, so a subscriber attached to several sources can tell them apart.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error(
  "Error in {} ({}): {}",
  .context.component.name,
  .context.component.type_name,
  .kind
)]
pub struct SourceError {
  /// What went wrong.
  #[source]
  pub kind: ErrorKind,
  /// When and where it went wrong.
  pub context: ErrorContext,
}

impl SourceError {
  /// Creates a new `SourceError` with the given kind and context.
  pub fn new(kind: ErrorKind, context: ErrorContext) -> Self {
    Self { kind, context }
  }

  /// Error for a missing element at `index`, stamped with the current time.
  pub fn missing_element(index: usize, component: ComponentInfo) -> Self {
    Self::new(
      ErrorKind::MissingElement { index },
      ErrorContext::new(component),
    )
  }

  /// Index of the element that caused the error, if the error refers to one.
  pub fn index(&self) -> Option<usize> {
    match self.kind {
      ErrorKind::MissingElement { index } => Some(index),
    }
  }
}

/// Context information about when and where an error occurred.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
  /// The timestamp when the error occurred.
  pub timestamp: chrono::DateTime<chrono::Utc>,
  /// The component that encountered the error.
  pub component: ComponentInfo,
}

impl ErrorContext {
  /// Creates a context for `component` stamped with the current time.
  pub fn new(component: ComponentInfo) -> Self {
    Self {
      timestamp: chrono::Utc::now(),
      component,
    }
  }
}

impl Default for ErrorContext {
  fn default() -> Self {
    Self::new(ComponentInfo::default())
  }
}

/// Identifying information about a source, used in errors and log lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentInfo {
  /// The name of the component.
  pub name: String,
  /// The type name of the component.
  pub type_name: String,
}

impl Default for ComponentInfo {
  fn default() -> Self {
    Self {
      name: "default".to_string(),
      type_name: "default".to_string(),
    }
  }
}

impl ComponentInfo {
  /// Creates a new `ComponentInfo` with the given name and type name.
  pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      type_name: type_name.into(),
    }
  }
}

impl fmt::Display for ComponentInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({})", self.name, self.type_name)
  }
}

/// Why a call to [`Subscription::try_request`](crate::Subscription::try_request)
/// had no effect.
///
/// None of these reach the subscriber; they exist so callers that care can
/// detect their own mistakes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
  /// Demand must be positive.
  #[error("requested zero items; demand must be positive")]
  ZeroDemand,
  /// The registration already delivered a terminal signal or was cancelled.
  #[error("subscription is no longer active")]
  Inactive,
}
