use crate::config::SourceConfig;
use crate::error::ComponentInfo;
use crate::subscribers::stream::SourceStream;
use crate::subscription::Registration;
use crate::traits::{publisher::Publisher, subscriber::Subscriber};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A publisher over a fixed, finite sequence of items.
///
/// Items are delivered strictly in order and only as far as the subscriber's
/// demand reaches. A `None` entry marks a missing element: delivery stops
/// just before it and the subscriber receives `on_error` instead.
///
/// The sequence is immutable and shared, so cloning a source or subscribing
/// to it repeatedly is cheap. Each subscription keeps its own position.
///
/// # Example
///
/// ```rust
/// use streamweave_bounded::subscribers::VecSubscriber;
/// use streamweave_bounded::{BoundedSource, Publisher};
///
/// let source = BoundedSource::new(vec![1, 2, 3]);
/// let (subscriber, recording) = VecSubscriber::new();
/// source.subscribe(subscriber);
///
/// recording.request(2);
/// assert_eq!(recording.items(), vec![1, 2]);
/// assert!(!recording.is_complete());
///
/// recording.request(1);
/// assert_eq!(recording.items(), vec![1, 2, 3]);
/// assert!(recording.is_complete());
/// ```
pub struct BoundedSource<T> {
  sequence: Arc<[Option<T>]>,
  config: SourceConfig,
}

impl<T> BoundedSource<T> {
  /// Creates a source whose every element is present.
  pub fn new(items: impl IntoIterator<Item = T>) -> Self {
    Self::from_options(items.into_iter().map(Some))
  }

  /// Creates a source that may contain missing elements (`None`).
  pub fn from_options(items: impl IntoIterator<Item = Option<T>>) -> Self {
    Self {
      sequence: items.into_iter().collect(),
      config: SourceConfig::default(),
    }
  }

  /// Creates a source by cloning the elements of `slice`.
  pub fn from_slice(slice: &[T]) -> Self
  where
    T: Clone,
  {
    Self::new(slice.iter().cloned())
  }

  /// Number of elements in the sequence, missing ones included.
  pub fn len(&self) -> usize {
    self.sequence.len()
  }

  /// Whether the sequence has no elements.
  pub fn is_empty(&self) -> bool {
    self.sequence.is_empty()
  }

  /// Replaces the configuration.
  #[must_use]
  pub fn with_config(mut self, config: SourceConfig) -> Self {
    self.config = config;
    self
  }

  /// Sets the name used in errors and log lines.
  #[must_use]
  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.config = self.config.with_name(name);
    self
  }

  /// Returns a reference to the source's configuration.
  pub fn config(&self) -> &SourceConfig {
    &self.config
  }

  /// Returns information about the component for error reporting.
  pub fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: self
        .config
        .name()
        .unwrap_or_else(|| "bounded_source".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }
}

impl<T> BoundedSource<T>
where
  T: Clone + Send + Sync + 'static,
{
  /// Subscribes a [`SourceStream`] that keeps up to `prefetch` items of
  /// demand outstanding.
  pub fn into_stream(self, prefetch: u64) -> SourceStream<T> {
    SourceStream::new(&self, prefetch)
  }
}

impl<T> Publisher for BoundedSource<T>
where
  T: Clone + Send + Sync + 'static,
{
  type Item = T;

  fn subscribe<S>(&self, subscriber: S)
  where
    S: Subscriber<T> + Send + 'static,
  {
    let component = self.component_info();
    debug!(component = %component.name, len = self.sequence.len(), "subscriber registered");
    let registration = Arc::new(Registration::new(Arc::clone(&self.sequence), component));
    registration.start(Box::new(subscriber));
  }
}

impl<T> Clone for BoundedSource<T> {
  fn clone(&self) -> Self {
    Self {
      sequence: Arc::clone(&self.sequence),
      config: self.config.clone(),
    }
  }
}

impl<T> From<Vec<T>> for BoundedSource<T> {
  fn from(items: Vec<T>) -> Self {
    Self::new(items)
  }
}

impl<T> FromIterator<Option<T>> for BoundedSource<T> {
  fn from_iter<I: IntoIterator<Item = Option<T>>>(iter: I) -> Self {
    Self::from_options(iter)
  }
}

impl<T: fmt::Debug> fmt::Debug for BoundedSource<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("BoundedSource")
      .field("sequence", &self.sequence)
      .field("config", &self.config)
      .finish()
  }
}
