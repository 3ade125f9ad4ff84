use crate::error::SourceError;
use crate::subscription::Subscription;

/// The receiving end of the demand protocol.
///
/// A subscriber is attached to a [`Publisher`](crate::Publisher) through
/// `subscribe` and from then on is driven entirely by the signals below. The
/// publisher guarantees:
///
/// - `on_subscribe` is called exactly once, before anything else.
/// - `on_next` is never called more often than the subscriber asked for through
///   [`Subscription::request`], never concurrently with itself, and never
///   after a terminal signal.
/// - At most one of `on_error` / `on_complete` is called, and nothing follows
///   it.
/// - After [`Subscription::cancel`] has been observed, nothing is called.
///
/// Callbacks may call back into the subscription (request more, or cancel)
/// without restriction; such calls never recurse into another callback.
///
/// # Example
///
/// ```rust
/// use streamweave_bounded::{BoundedSource, Publisher, SourceError, Subscriber, Subscription};
///
/// struct Sum(i64);
///
/// impl Subscriber<i64> for Sum {
///   fn on_subscribe(&mut self, subscription: Subscription<i64>) {
///     subscription.request(u64::MAX);
///   }
///
///   fn on_next(&mut self, item: i64) {
///     self.0 += item;
///   }
///
///   fn on_error(&mut self, _error: SourceError) {}
///
///   fn on_complete(&mut self) {}
/// }
///
/// BoundedSource::new(vec![1, 2, 3]).subscribe(Sum(0));
/// ```
pub trait Subscriber<T> {
  /// Receives the subscription handle. Called once, before any other signal.
  fn on_subscribe(&mut self, subscription: Subscription<T>);

  /// Receives the next item of the sequence.
  fn on_next(&mut self, item: T);

  /// Receives the terminal error. No further signals follow.
  fn on_error(&mut self, error: SourceError);

  /// Signals that the whole sequence was delivered. No further signals follow.
  fn on_complete(&mut self);
}

impl<T, S> Subscriber<T> for Box<S>
where
  S: Subscriber<T> + ?Sized,
{
  fn on_subscribe(&mut self, subscription: Subscription<T>) {
    (**self).on_subscribe(subscription);
  }

  fn on_next(&mut self, item: T) {
    (**self).on_next(item);
  }

  fn on_error(&mut self, error: SourceError) {
    (**self).on_error(error);
  }

  fn on_complete(&mut self) {
    (**self).on_complete();
  }
}
