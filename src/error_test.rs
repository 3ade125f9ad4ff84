use crate::error::{ComponentInfo, ErrorContext, ErrorKind, RequestError, SourceError};
use std::error::Error;

#[test]
fn test_missing_element_carries_index() {
  let error = SourceError::missing_element(7, ComponentInfo::new("numbers", "BoundedSource"));

  assert_eq!(error.index(), Some(7));
  assert_eq!(error.kind, ErrorKind::MissingElement { index: 7 });
  assert_eq!(error.context.component.name, "numbers");
}

#[test]
fn test_source_error_display() {
  let error = SourceError::missing_element(2, ComponentInfo::new("numbers", "BoundedSource"));

  assert_eq!(
    error.to_string(),
    "Error in numbers (BoundedSource): missing element at index 2"
  );
}

#[test]
fn test_source_error_source_is_kind() {
  let error = SourceError::missing_element(0, ComponentInfo::default());

  let source = error.source().expect("kind should be the source");
  assert_eq!(source.to_string(), "missing element at index 0");
}

#[test]
fn test_error_context_timestamp_is_recent() {
  let before = chrono::Utc::now();
  let context = ErrorContext::new(ComponentInfo::default());
  let after = chrono::Utc::now();

  assert!(context.timestamp >= before);
  assert!(context.timestamp <= after);
}

#[test]
fn test_component_info_default() {
  let info = ComponentInfo::default();
  assert_eq!(info.name, "default");
  assert_eq!(info.type_name, "default");
  assert_eq!(info.to_string(), "default (default)");
}

#[test]
fn test_request_error_display() {
  assert_eq!(
    RequestError::ZeroDemand.to_string(),
    "requested zero items; demand must be positive"
  );
  assert_eq!(
    RequestError::Inactive.to_string(),
    "subscription is no longer active"
  );
}
