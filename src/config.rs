/// Configuration for a [`BoundedSource`](crate::BoundedSource).
///
/// The name identifies the source in error contexts and log lines. Sources
/// without a name report themselves as `bounded_source`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceConfig {
  /// Optional name for identifying this source in logs and errors.
  pub name: Option<String>,
}

impl SourceConfig {
  /// Sets the name for this source configuration.
  ///
  /// # Arguments
  ///
  /// * `name` - The name to assign to this source.
  #[must_use]
  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  /// Returns the current name, if set.
  pub fn name(&self) -> Option<String> {
    self.name.clone()
  }
}
