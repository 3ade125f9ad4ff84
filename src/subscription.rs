//! # Subscription
//!
//! Per-registration protocol state and the demand controller handed to a
//! subscriber in `on_subscribe`.
//!
//! ## Drain protocol
//!
//! Every registration owns a `draining` flag. Whoever flips it from `false` to
//! `true` owns the emission loop for that registration and keeps emitting until
//! demand, the sequence, or validity runs out. Any other `request` (from another
//! thread, or reentrantly from inside `on_next`) only adds to the pending
//! demand and returns; the owner picks the new demand up on its next
//! iteration. After clearing the flag the owner checks once more for demand or
//! cancellation that arrived in between and, if it can re-acquire the flag,
//! runs another pass. The loop is iterative, so stack depth stays constant no
//! matter how often a subscriber re-requests from inside its own callbacks.
//!
//! The subscriber itself is moved out of its slot for the duration of a pass,
//! so no lock is held while a callback runs.

use crate::error::{ComponentInfo, RequestError, SourceError};
use crate::traits::subscriber::Subscriber;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace, warn};

type BoxedSubscriber<T> = Box<dyn Subscriber<T> + Send>;

/// Lifecycle of a registration. Leaves `ACTIVE` exactly once, so a cancel and
/// a terminal signal can never both take effect.
const ACTIVE: u8 = 0;
const CANCELLED: u8 = 1;
/// A terminal signal was delivered, or is being delivered.
const TERMINATED: u8 = 2;

/// State of one subscriber's registration with a source.
pub(crate) struct Registration<T> {
  sequence: Arc<[Option<T>]>,
  component: ComponentInfo,
  subscriber: Mutex<Option<BoxedSubscriber<T>>>,
  /// Next index to emit. Only written by the drain owner.
  cursor: AtomicUsize,
  demand: AtomicU64,
  draining: AtomicBool,
  state: AtomicU8,
  /// The subscriber was dropped; nothing can be signalled any more.
  released: AtomicBool,
}

impl<T> Registration<T> {
  fn state(&self) -> u8 {
    self.state.load(Ordering::SeqCst)
  }
}

impl<T: Clone> Registration<T> {
  /// Creates a registration with the draining flag already held, so that no
  /// item can be emitted before `start` has attached the subscriber.
  pub(crate) fn new(sequence: Arc<[Option<T>]>, component: ComponentInfo) -> Self {
    Self {
      sequence,
      component,
      subscriber: Mutex::new(None),
      cursor: AtomicUsize::new(0),
      demand: AtomicU64::new(0),
      draining: AtomicBool::new(true),
      state: AtomicU8::new(ACTIVE),
      released: AtomicBool::new(false),
    }
  }

  /// Hands the subscriber its subscription, then serves whatever demand it
  /// requested from inside `on_subscribe`.
  pub(crate) fn start(self: &Arc<Self>, mut subscriber: BoxedSubscriber<T>) {
    {
      let _held = scopeguard::guard(&self.draining, |draining| {
        draining.store(false, Ordering::SeqCst)
      });
      let _poisoned = scopeguard::guard_on_unwind(&self.released, |released| {
        released.store(true, Ordering::SeqCst)
      });
      subscriber.on_subscribe(Subscription {
        registration: Arc::clone(self),
      });
      *self.slot() = Some(subscriber);
    }
    if self.has_pending_work() {
      self.drain();
    }
  }

  fn slot(&self) -> MutexGuard<'_, Option<BoxedSubscriber<T>>> {
    self.subscriber.lock().unwrap_or_else(PoisonError::into_inner)
  }

  fn is_inert(&self) -> bool {
    self.released.load(Ordering::SeqCst) || self.state() != ACTIVE
  }

  fn has_pending_work(&self) -> bool {
    !self.released.load(Ordering::SeqCst)
      && (self.state() == CANCELLED || self.demand.load(Ordering::SeqCst) > 0)
  }

  /// Adds `n` to the pending demand, saturating at `u64::MAX`, and returns
  /// the new total.
  fn add_demand(&self, n: u64) -> u64 {
    let previous = self
      .demand
      .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |pending| {
        Some(pending.saturating_add(n))
      })
      .unwrap_or_else(|pending| pending);
    previous.saturating_add(n)
  }

  fn drain(&self) {
    loop {
      if self
        .draining
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
      {
        trace!(component = %self.component.name, "drain already in progress");
        return;
      }
      {
        let _held = scopeguard::guard(&self.draining, |draining| {
          draining.store(false, Ordering::SeqCst)
        });
        // A panicking callback has already dropped the subscriber.
        let _poisoned = scopeguard::guard_on_unwind(&self.released, |released| {
          released.store(true, Ordering::SeqCst)
        });
        self.drain_pass();
      }
      if !self.has_pending_work() {
        return;
      }
    }
  }

  /// One emission pass. Must only run while the draining flag is held.
  fn drain_pass(&self) {
    let Some(mut subscriber) = self.slot().take() else {
      self.released.store(true, Ordering::SeqCst);
      return;
    };
    let len = self.sequence.len();
    let mut cursor = self.cursor.load(Ordering::Acquire);

    loop {
      if self.state() == CANCELLED {
        self.release_cancelled(cursor);
        return;
      }
      if cursor == len {
        break;
      }
      if self.demand.load(Ordering::SeqCst) == 0 {
        *self.slot() = Some(subscriber);
        return;
      }

      match &self.sequence[cursor] {
        Some(item) => {
          trace!(component = %self.component.name, index = cursor, "emitting item");
          subscriber.on_next(item.clone());
          cursor += 1;
          self.cursor.store(cursor, Ordering::Release);
          self.demand.fetch_sub(1, Ordering::SeqCst);
        }
        None => {
          debug!(
            component = %self.component.name,
            index = cursor,
            "missing element, terminating with error"
          );
          if !self.finish() {
            self.release_cancelled(cursor);
            return;
          }
          subscriber.on_error(SourceError::missing_element(cursor, self.component.clone()));
          return;
        }
      }
    }

    if !self.finish() {
      self.release_cancelled(cursor);
      return;
    }
    debug!(component = %self.component.name, "sequence exhausted, signalling completion");
    subscriber.on_complete();
  }

  /// Claims the terminal transition. Returns `false` if a cancel got there
  /// first, in which case no terminal signal may be sent.
  fn finish(&self) -> bool {
    let claimed = self
      .state
      .compare_exchange(ACTIVE, TERMINATED, Ordering::SeqCst, Ordering::SeqCst)
      .is_ok();
    self.released.store(true, Ordering::SeqCst);
    claimed
  }

  fn release_cancelled(&self, index: usize) {
    debug!(
      component = %self.component.name,
      index,
      "subscription cancelled, releasing subscriber"
    );
    self.released.store(true, Ordering::SeqCst);
  }
}

/// Demand controller for one registration.
///
/// Handed to the subscriber in `on_subscribe`. Cheap to clone; all clones
/// control the same registration and may be used from any thread, including
/// from inside the subscriber's own callbacks.
pub struct Subscription<T> {
  registration: Arc<Registration<T>>,
}

impl<T> Clone for Subscription<T> {
  fn clone(&self) -> Self {
    Self {
      registration: Arc::clone(&self.registration),
    }
  }
}

impl<T: Clone> Subscription<T> {
  /// Declares that the subscriber can accept `n` more items.
  ///
  /// Items due under the new demand are delivered before this returns, unless
  /// another call already owns the emission loop, in which case that call
  /// delivers them. Requesting zero items, or requesting after the
  /// registration terminated or was cancelled, has no effect.
  pub fn request(&self, n: u64) {
    match self.try_request(n) {
      Ok(()) => {}
      Err(RequestError::ZeroDemand) => {
        warn!(
          component = %self.registration.component.name,
          "ignoring request for zero items"
        );
      }
      Err(RequestError::Inactive) => {
        trace!(
          component = %self.registration.component.name,
          requested = n,
          "ignoring request on inactive subscription"
        );
      }
    }
  }

  /// Like [`request`](Self::request), but reports why a call had no effect.
  ///
  /// The subscriber is never signalled about a rejected request.
  pub fn try_request(&self, n: u64) -> Result<(), RequestError> {
    let registration = &self.registration;
    if registration.is_inert() {
      return Err(RequestError::Inactive);
    }
    if n == 0 {
      return Err(RequestError::ZeroDemand);
    }
    let pending = registration.add_demand(n);
    trace!(
      component = %registration.component.name,
      requested = n,
      pending,
      "demand added"
    );
    registration.drain();
    Ok(())
  }

  /// Stops delivery. Idempotent.
  ///
  /// No callback is invoked. An `on_next` already running on another thread
  /// completes, but nothing is emitted after it.
  pub fn cancel(&self) {
    let registration = &self.registration;
    if registration
      .state
      .compare_exchange(ACTIVE, CANCELLED, Ordering::SeqCst, Ordering::SeqCst)
      .is_err()
    {
      return;
    }
    debug!(component = %registration.component.name, "cancel requested");
    registration.drain();
  }
}

impl<T> Subscription<T> {
  /// Whether [`cancel`](Self::cancel) has been called.
  pub fn is_cancelled(&self) -> bool {
    self.registration.state() == CANCELLED
  }

  /// Whether a terminal signal (`on_error` or `on_complete`) was delivered.
  pub fn is_terminated(&self) -> bool {
    self.registration.state() == TERMINATED
  }

  /// Demand granted but not yet served.
  pub fn pending(&self) -> u64 {
    self.registration.demand.load(Ordering::SeqCst)
  }

  /// Number of items emitted so far, which is also the index of the next one.
  pub fn position(&self) -> usize {
    self.registration.cursor.load(Ordering::Acquire)
  }

  /// The source this subscription belongs to.
  pub fn component(&self) -> &ComponentInfo {
    &self.registration.component
  }
}

impl<T> fmt::Debug for Subscription<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Subscription")
      .field("component", &self.registration.component.name)
      .field("position", &self.position())
      .field("pending", &self.pending())
      .field("cancelled", &self.is_cancelled())
      .field("terminated", &self.is_terminated())
      .finish()
  }
}
