use crate::config::SourceConfig;
use crate::source::BoundedSource;
use crate::subscribers::VecSubscriber;
use crate::traits::publisher::Publisher;

#[test]
fn test_source_config_default() {
  let config = SourceConfig::default();
  assert_eq!(config.name(), None);
}

#[test]
fn test_source_config_with_name() {
  let config = SourceConfig::default().with_name("numbers");
  assert_eq!(config.name(), Some("numbers".to_string()));
}

#[test]
fn test_len_and_is_empty() {
  let source = BoundedSource::new(vec![1, 2, 3]);
  assert_eq!(source.len(), 3);
  assert!(!source.is_empty());

  let empty = BoundedSource::<i32>::new(Vec::new());
  assert_eq!(empty.len(), 0);
  assert!(empty.is_empty());
}

#[test]
fn test_missing_elements_count_towards_len() {
  let source = BoundedSource::from_options(vec![Some(1), None, Some(3)]);
  assert_eq!(source.len(), 3);
}

#[test]
fn test_from_slice() {
  let source = BoundedSource::from_slice(&["a", "b"]);
  let (subscriber, recording) = VecSubscriber::with_initial_request(2);
  source.subscribe(subscriber);
  assert_eq!(recording.items(), vec!["a", "b"]);
}

#[test]
fn test_from_vec_and_from_iterator() {
  let from_vec: BoundedSource<i32> = vec![1, 2].into();
  assert_eq!(from_vec.len(), 2);

  let collected: BoundedSource<i32> = vec![Some(1), None].into_iter().collect();
  assert_eq!(collected.len(), 2);
}

#[test]
fn test_component_info_defaults_to_bounded_source() {
  let source = BoundedSource::new(vec![1]);
  let info = source.component_info();
  assert_eq!(info.name, "bounded_source");
  assert!(info.type_name.contains("BoundedSource"));
}

#[test]
fn test_with_name_flows_into_component_info() {
  let source = BoundedSource::new(vec![1]).with_name("numbers");
  assert_eq!(source.config().name(), Some("numbers".to_string()));
  assert_eq!(source.component_info().name, "numbers");
}

#[test]
fn test_with_config() {
  let source =
    BoundedSource::new(vec![1]).with_config(SourceConfig::default().with_name("configured"));
  assert_eq!(source.component_info().name, "configured");
}

#[test]
fn test_error_names_the_source() {
  let source = BoundedSource::from_options(vec![None::<i32>]).with_name("broken");
  let (subscriber, recording) = VecSubscriber::with_initial_request(1);
  source.subscribe(subscriber);

  let error = recording.error().expect("missing element should error");
  assert_eq!(error.context.component.name, "broken");
  assert_eq!(error.index(), Some(0));
}

#[test]
fn test_each_subscription_has_its_own_position() {
  let source = BoundedSource::new(vec![1, 2, 3]);

  let (first, first_recording) = VecSubscriber::with_initial_request(2);
  source.subscribe(first);
  let (second, second_recording) = VecSubscriber::with_initial_request(3);
  source.subscribe(second);

  assert_eq!(first_recording.items(), vec![1, 2]);
  assert!(!first_recording.is_complete());
  assert_eq!(second_recording.items(), vec![1, 2, 3]);
  assert!(second_recording.is_complete());

  first_recording.request(1);
  assert_eq!(first_recording.items(), vec![1, 2, 3]);
  assert!(first_recording.is_complete());
}

#[test]
fn test_clone_shares_sequence() {
  let source = BoundedSource::new(vec![String::from("x")]).with_name("original");
  let copy = source.clone();

  assert_eq!(copy.len(), 1);
  assert_eq!(copy.component_info().name, "original");

  let (subscriber, recording) = VecSubscriber::with_initial_request(1);
  copy.subscribe(subscriber);
  assert_eq!(recording.items(), vec![String::from("x")]);
}

#[test]
fn test_debug_output() {
  let source = BoundedSource::from_options(vec![Some(1), None]);
  let debug = format!("{:?}", source);
  assert!(debug.contains("BoundedSource"));
  assert!(debug.contains("None"));
}
