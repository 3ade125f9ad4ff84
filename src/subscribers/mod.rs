//! Ready-made subscribers.

/// Adapter from a publisher to a `futures::Stream`.
pub mod stream;
/// A subscriber that records every signal.
pub mod vec;

pub use stream::SourceStream;
pub use vec::{Recording, VecSubscriber};
