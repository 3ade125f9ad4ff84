use crate::error::SourceError;

/// A signal observed by a subscriber, in the order it was received.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal<T> {
  /// `on_subscribe` was called.
  Start,
  /// `on_next` delivered an item.
  Item(T),
  /// `on_error` terminated the registration.
  Error(SourceError),
  /// `on_complete` terminated the registration.
  Complete,
}

impl<T> Signal<T> {
  /// Whether this signal ends the registration.
  pub fn is_terminal(&self) -> bool {
    matches!(self, Signal::Error(_) | Signal::Complete)
  }

  /// The carried item, if this is an item signal.
  pub fn into_item(self) -> Option<T> {
    match self {
      Signal::Item(item) => Some(item),
      _ => None,
    }
  }
}
