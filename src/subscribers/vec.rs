use crate::error::SourceError;
use crate::signal::Signal;
use crate::subscription::Subscription;
use crate::traits::subscriber::Subscriber;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Signals<T> = Arc<Mutex<Vec<Signal<T>>>>;
type Anchor<T> = Mutex<Option<Subscription<T>>>;

/// A subscriber that records every signal it receives.
///
/// The paired [`Recording`] handle reads the recorded signals and drives the
/// subscription from outside. Only the handles keep the subscription alive:
/// once every [`Recording`] is dropped, an unfinished registration is freed
/// along with everything it recorded.
pub struct VecSubscriber<T> {
  initial_request: u64,
  signals: Signals<T>,
  /// Weak: the registration owns this subscriber.
  anchor: Weak<Anchor<T>>,
}

impl<T> VecSubscriber<T> {
  /// Creates a subscriber that requests nothing on its own.
  pub fn new() -> (Self, Recording<T>) {
    Self::with_initial_request(0)
  }

  /// Creates a subscriber that requests `n` items from inside `on_subscribe`.
  pub fn with_initial_request(n: u64) -> (Self, Recording<T>) {
    let recording = Recording {
      signals: Arc::new(Mutex::new(Vec::new())),
      anchor: Arc::new(Mutex::new(None)),
    };
    (
      Self {
        initial_request: n,
        signals: Arc::clone(&recording.signals),
        anchor: Arc::downgrade(&recording.anchor),
      },
      recording,
    )
  }

  fn record(&self, signal: Signal<T>) {
    lock(&self.signals).push(signal);
  }
}

impl<T: Clone> Subscriber<T> for VecSubscriber<T> {
  fn on_subscribe(&mut self, subscription: Subscription<T>) {
    self.record(Signal::Start);
    if let Some(anchor) = self.anchor.upgrade() {
      *lock(&anchor) = Some(subscription.clone());
    }
    if self.initial_request > 0 {
      subscription.request(self.initial_request);
    }
  }

  fn on_next(&mut self, item: T) {
    self.record(Signal::Item(item));
  }

  fn on_error(&mut self, error: SourceError) {
    self.record(Signal::Error(error));
  }

  fn on_complete(&mut self) {
    self.record(Signal::Complete);
  }
}

/// Read side and remote control of a [`VecSubscriber`].
pub struct Recording<T> {
  signals: Signals<T>,
  anchor: Arc<Anchor<T>>,
}

impl<T> Clone for Recording<T> {
  fn clone(&self) -> Self {
    Self {
      signals: Arc::clone(&self.signals),
      anchor: Arc::clone(&self.anchor),
    }
  }
}

impl<T: Clone> Recording<T> {
  /// The subscription, once `on_subscribe` has been received.
  pub fn subscription(&self) -> Option<Subscription<T>> {
    lock(&self.anchor).clone()
  }

  /// Requests `n` more items. Has no effect before `on_subscribe`.
  pub fn request(&self, n: u64) {
    // The subscription is cloned out so that the lock is free while items are
    // recorded.
    if let Some(subscription) = self.subscription() {
      subscription.request(n);
    }
  }

  /// Cancels the subscription. Has no effect before `on_subscribe`.
  pub fn cancel(&self) {
    if let Some(subscription) = self.subscription() {
      subscription.cancel();
    }
  }

  /// Every signal received so far.
  pub fn signals(&self) -> Vec<Signal<T>> {
    lock(&self.signals).clone()
  }

  /// Every item received so far.
  pub fn items(&self) -> Vec<T> {
    lock(&self.signals)
      .iter()
      .filter_map(|signal| match signal {
        Signal::Item(item) => Some(item.clone()),
        _ => None,
      })
      .collect()
  }

  /// The terminal error, if one was received.
  pub fn error(&self) -> Option<SourceError> {
    lock(&self.signals)
      .iter()
      .find_map(|signal| match signal {
        Signal::Error(error) => Some(error.clone()),
        _ => None,
      })
  }

  /// Whether `on_complete` was received.
  pub fn is_complete(&self) -> bool {
    lock(&self.signals)
      .iter()
      .any(|signal| matches!(signal, Signal::Complete))
  }

  /// Whether `on_subscribe` was received.
  pub fn is_started(&self) -> bool {
    lock(&self.signals)
      .iter()
      .any(|signal| matches!(signal, Signal::Start))
  }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
  mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
