//! # Stream adapter
//!
//! Exposes any [`Publisher`] as a [`futures::Stream`] of
//! `Result<T, SourceError>`, translating polling into demand.
//!
//! The stream requests `prefetch` items when it subscribes and tops demand
//! back up once three quarters of that batch has been yielded, so at most
//! `prefetch` items are ever buffered between the publisher and the poller.
//! Dropping the stream cancels the subscription.
//!
//! ```rust
//! use futures::StreamExt;
//! use streamweave_bounded::BoundedSource;
//!
//! # tokio_test::block_on(async {
//! let items: Vec<_> = BoundedSource::new(vec![1, 2, 3])
//!   .into_stream(2)
//!   .map(|item| item.unwrap())
//!   .collect()
//!   .await;
//! assert_eq!(items, vec![1, 2, 3]);
//! # });
//! ```

use crate::error::SourceError;
use crate::subscription::Subscription;
use crate::traits::{publisher::Publisher, subscriber::Subscriber};
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll, ready};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::trace;

enum Event<T> {
  Subscribed(Subscription<T>),
  Item(T),
  Error(SourceError),
  Complete,
}

/// Subscriber half of a [`SourceStream`]; forwards every signal into the
/// stream's channel.
struct ChannelSubscriber<T> {
  sender: UnboundedSender<Event<T>>,
  prefetch: u64,
}

impl<T: Clone> Subscriber<T> for ChannelSubscriber<T> {
  fn on_subscribe(&mut self, subscription: Subscription<T>) {
    // A closed channel means the stream is gone and has cancelled already.
    let _ = self.sender.send(Event::Subscribed(subscription.clone()));
    subscription.request(self.prefetch);
  }

  fn on_next(&mut self, item: T) {
    let _ = self.sender.send(Event::Item(item));
  }

  fn on_error(&mut self, error: SourceError) {
    let _ = self.sender.send(Event::Error(error));
  }

  fn on_complete(&mut self) {
    let _ = self.sender.send(Event::Complete);
  }
}

/// A [`Stream`] over the items of a [`Publisher`].
///
/// Yields `Ok(item)` for every item. A missing element yields one `Err` and
/// ends the stream.
pub struct SourceStream<T: Clone> {
  receiver: UnboundedReceiver<Event<T>>,
  subscription: Option<Subscription<T>>,
  prefetch: u64,
  /// Replenish once this many items have been yielded since the last request.
  limit: u64,
  consumed: u64,
  done: bool,
}

impl<T> SourceStream<T>
where
  T: Clone + Send + Sync + 'static,
{
  /// Subscribes to `publisher`, keeping up to `prefetch` items of demand
  /// outstanding. A `prefetch` of zero is treated as one.
  pub fn new<P>(publisher: &P, prefetch: u64) -> Self
  where
    P: Publisher<Item = T>,
  {
    let prefetch = prefetch.max(1);
    let (sender, mut receiver) = unbounded_channel();
    publisher.subscribe(ChannelSubscriber { sender, prefetch });

    // `on_subscribe` runs inside `subscribe`, so the handle is already queued.
    let subscription = match receiver.try_recv() {
      Ok(Event::Subscribed(subscription)) => Some(subscription),
      _ => None,
    };

    Self {
      receiver,
      subscription,
      prefetch,
      limit: prefetch - prefetch / 4,
      consumed: 0,
      done: false,
    }
  }

  /// The demand each replenishment tops up to.
  pub fn prefetch(&self) -> u64 {
    self.prefetch
  }

  /// The underlying subscription, until the stream ends.
  pub fn subscription(&self) -> Option<Subscription<T>> {
    self.subscription.clone()
  }
}

impl<T: Clone> SourceStream<T> {
  fn replenish(&mut self) {
    self.consumed += 1;
    if self.consumed < self.limit {
      return;
    }
    if let Some(subscription) = &self.subscription {
      trace!(requested = self.consumed, "replenishing stream demand");
      subscription.request(self.consumed);
    }
    self.consumed = 0;
  }

  fn finish(&mut self) {
    self.done = true;
    self.subscription = None;
    self.receiver.close();
  }
}

impl<T: Clone> Stream for SourceStream<T> {
  type Item = Result<T, SourceError>;

  fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
    let this = self.get_mut();
    if this.done {
      return Poll::Ready(None);
    }
    loop {
      match ready!(this.receiver.poll_recv(cx)) {
        Some(Event::Subscribed(subscription)) => {
          this.subscription = Some(subscription);
        }
        Some(Event::Item(item)) => {
          this.replenish();
          return Poll::Ready(Some(Ok(item)));
        }
        Some(Event::Error(error)) => {
          this.finish();
          return Poll::Ready(Some(Err(error)));
        }
        Some(Event::Complete) | None => {
          this.finish();
          return Poll::Ready(None);
        }
      }
    }
  }
}

impl<T: Clone> Drop for SourceStream<T> {
  fn drop(&mut self) {
    if let Some(subscription) = self.subscription.take() {
      subscription.cancel();
    }
  }
}
