//! # StreamWeave Bounded
//!
//! A demand-driven publisher over a fixed, finite sequence.
//!
//! A [`BoundedSource`] emits its items to a single [`Subscriber`] per
//! subscription, never more than the subscriber asked for, strictly in
//! order, followed by exactly one terminal signal: `on_complete` once the
//! sequence is exhausted, or `on_error` when a missing element is reached.
//!
//! ## Key Features
//!
//! - **Backpressure**: delivery is bounded by the demand declared through
//!   [`Subscription::request`]
//! - **Reentrancy-safe**: subscribers may request more from inside `on_next`
//!   without recursion or duplicate delivery
//! - **Thread-safe**: demand may be added from any number of threads; exactly
//!   one of them delivers at a time
//! - **Cancellable**: [`Subscription::cancel`] silences the subscription
//! - **Stream adapter**: [`SourceStream`] exposes any publisher as a
//!   `futures::Stream`
//!
//! ## Quick Start
//!
//! ```rust
//! use streamweave_bounded::subscribers::VecSubscriber;
//! use streamweave_bounded::{BoundedSource, Publisher, Signal};
//!
//! let source = BoundedSource::new(vec![0, 1, 2]);
//! let (subscriber, recording) = VecSubscriber::with_initial_request(3);
//! source.subscribe(subscriber);
//!
//! assert_eq!(
//!   recording.signals(),
//!   vec![
//!     Signal::Start,
//!     Signal::Item(0),
//!     Signal::Item(1),
//!     Signal::Item(2),
//!     Signal::Complete,
//!   ]
//! );
//! ```

// Documentation enforcement - treat missing docs as errors
#![deny(missing_docs)]

/// Source configuration.
pub mod config;
/// Error types for content and usage errors.
pub mod error;
/// Signals as observed by a subscriber.
pub mod signal;
/// The bounded sequence publisher.
pub mod source;
/// Ready-made subscribers.
pub mod subscribers;
/// Per-registration demand control.
pub mod subscription;
/// Publisher and subscriber traits.
pub mod traits;

pub use config::SourceConfig;
pub use error::{ComponentInfo, ErrorContext, ErrorKind, RequestError, SourceError};
pub use signal::Signal;
pub use source::BoundedSource;
pub use subscribers::{Recording, SourceStream, VecSubscriber};
pub use subscription::Subscription;
pub use traits::publisher::Publisher;
pub use traits::subscriber::Subscriber;

#[cfg(test)]
mod error_test;
#[cfg(test)]
mod source_test;
