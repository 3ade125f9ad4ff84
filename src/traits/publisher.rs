use crate::traits::subscriber::Subscriber;

/// A source of items delivered under subscriber-controlled demand.
///
/// Each call to [`subscribe`](Publisher::subscribe) creates an independent
/// registration with its own position and demand; subscribers never share
/// progress.
pub trait Publisher {
  /// The type of items this publisher emits.
  type Item;

  /// Attaches `subscriber`, calling its `on_subscribe` synchronously before
  /// returning.
  ///
  /// Demand requested from inside `on_subscribe` is served once
  /// `on_subscribe` has returned, still within this call.
  fn subscribe<S>(&self, subscriber: S)
  where
    S: Subscriber<Self::Item> + Send + 'static;
}
