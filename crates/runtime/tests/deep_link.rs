mod common;

use duonav_common::{DeepLinkRequest, NavError};
use duonav_runtime::{IntentFlags, LaunchIntent, NavDeepLinkBuilder};

use common::{sample_graph, stack_ids, test_env};

#[test]
fn a_uri_request_lands_on_the_most_specific_match() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    // Both detail ("example.com/{id}") and promo ("example.com/.*") match;
    // the parameterized pattern is the more specific one.
    let request = DeepLinkRequest::from_uri("https://example.com/42");
    env.controller.navigate_to_request(&request, None, None).unwrap();
    let entry = env.controller.current_back_stack_entry().unwrap();
    assert_eq!(entry.destination().id(), 3);
    assert_eq!(
        entry.arguments().as_ref().unwrap().get_str("id"),
        Some("42")
    );
}

#[test]
fn an_unmatched_request_is_an_error() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    let request = DeepLinkRequest::from_uri("https://other.com/nowhere");
    let err = env
        .controller
        .navigate_to_request(&request, None, None)
        .unwrap_err();
    assert!(matches!(err, NavError::InvalidArgument(_)));
}

#[test]
fn a_launch_intent_without_a_deep_link_is_ignored() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    assert!(!env.controller.handle_deep_link(&LaunchIntent::new()).unwrap());
    assert_eq!(stack_ids(&env.controller), vec![1, 2]);
}

#[test]
fn an_explicit_id_chain_replaces_the_back_stack() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    let mut intent = LaunchIntent::new();
    intent.set_deep_link(vec![1, 20, 22], None);
    assert!(env.controller.handle_deep_link(&intent).unwrap());
    assert_eq!(stack_ids(&env.controller), vec![1, 20, 22]);
}

#[test]
fn a_chain_with_an_unknown_id_is_rejected_whole() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    env.controller.navigate(3, None, None, None).unwrap();
    let mut intent = LaunchIntent::new();
    intent.set_deep_link(vec![1, 99], None);
    assert!(!env.controller.handle_deep_link(&intent).unwrap());
    // A partially valid chain must not disturb the current stack.
    assert_eq!(stack_ids(&env.controller), vec![1, 2, 3]);
}

#[test]
fn new_task_without_clear_task_restarts_the_task() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    let mut intent = LaunchIntent::from_uri("https://example.com/42");
    intent.add_flags(IntentFlags::NEW_TASK);
    assert!(env.controller.handle_deep_link(&intent).unwrap());
    let started = env.nav_host.started_stacks.borrow();
    assert_eq!(started.len(), 1);
    assert!(started[0][0].flags().contains(IntentFlags::CLEAR_TASK));
    assert_eq!(env.nav_host.finishes.get(), 1);
    // The current task is finishing, so its stack stays as it was.
    drop(started);
    assert_eq!(stack_ids(&env.controller), vec![1, 2]);
}

#[test]
fn new_task_with_clear_task_replays_the_chain_from_the_root() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    env.controller.navigate(3, None, None, None).unwrap();
    let mut intent = LaunchIntent::new();
    intent.set_deep_link(vec![1, 20, 22], None);
    intent.add_flags(IntentFlags::NEW_TASK | IntentFlags::CLEAR_TASK);
    assert!(env.controller.handle_deep_link(&intent).unwrap());
    assert_eq!(stack_ids(&env.controller), vec![1, 2, 20, 21, 22]);
}

#[test]
fn the_launch_intent_deep_link_is_applied_once_per_process() {
    let mut env = test_env();
    *env.nav_host.launch_intent.borrow_mut() =
        Some(LaunchIntent::from_uri("https://example.com/42"));
    env.controller.set_graph(sample_graph(), None).unwrap();
    assert_eq!(stack_ids(&env.controller), vec![1, 3]);
    let entry = env.controller.current_back_stack_entry().unwrap();
    assert_eq!(
        entry.arguments().as_ref().unwrap().get_str("id"),
        Some("42")
    );
    // A later graph swap sees the intent as already consumed.
    env.controller.set_graph(sample_graph(), None).unwrap();
    assert_eq!(stack_ids(&env.controller), vec![1, 2]);
}

#[test]
fn the_task_stack_builder_produces_a_minimal_id_chain() {
    let stack = NavDeepLinkBuilder::new()
        .set_graph(sample_graph())
        .set_destination(22)
        .create_task_stack()
        .unwrap();
    assert_eq!(stack.len(), 1);
    assert_eq!(stack[0].deep_link_ids(), Some(&[1, 20, 22][..]));
    assert!(stack[0]
        .flags()
        .contains(IntentFlags::NEW_TASK | IntentFlags::CLEAR_TASK));
}

#[test]
fn a_built_stack_round_trips_through_the_controller() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    let stack = NavDeepLinkBuilder::from_controller(&env.controller)
        .set_destination(22)
        .create_task_stack()
        .unwrap();
    assert!(env.controller.handle_deep_link(&stack[0]).unwrap());
    assert_eq!(stack_ids(&env.controller), vec![1, 2, 20, 21, 22]);
}
