mod common;

use std::cell::Cell;
use std::rc::Rc;

use duonav_common::{
    Bundle, LifecycleEvent, LifecycleState, NavAction, NavError, NavOptions, NavigatorProvider,
};

use common::{pane, sample_graph, stack_identities, stack_ids, test_env};

#[test]
fn set_graph_lands_on_the_start_destination() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    assert_eq!(stack_ids(&env.controller), vec![1, 2]);
    assert_eq!(env.controller.current_destination().unwrap().id(), 2);
    assert_eq!(env.pane_host.pushes.borrow().len(), 1);
}

#[test]
fn the_root_graph_entry_stays_at_the_bottom() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    env.controller.navigate(3, None, None, None).unwrap();
    env.controller.navigate(20, None, None, None).unwrap();
    let ids = stack_ids(&env.controller);
    assert_eq!(ids[0], 1);
    assert!(!env
        .controller
        .current_destination()
        .unwrap()
        .is_graph());
}

#[test]
fn navigating_into_a_nested_graph_synthesizes_its_entry() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    env.controller.navigate(20, None, None, None).unwrap();
    assert_eq!(stack_ids(&env.controller), vec![1, 2, 20, 21]);
}

#[test]
fn pop_to_an_unknown_destination_changes_nothing() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    env.controller.navigate(3, None, None, None).unwrap();
    let ids = stack_ids(&env.controller);
    let identities = stack_identities(&env.controller);
    assert!(!env.controller.pop_back_stack_to(true, 99, false));
    assert_eq!(stack_ids(&env.controller), ids);
    assert_eq!(stack_identities(&env.controller), identities);
}

#[test]
fn popping_an_empty_controller_is_ignored() {
    let mut env = test_env();
    assert!(!env.controller.pop_back_stack(true));
}

#[test]
fn exactly_one_entry_is_resumed() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    env.controller.navigate(3, None, None, None).unwrap();
    let states: Vec<_> = env
        .controller
        .back_stack_entries()
        .map(|entry| (entry.destination().id(), entry.lifecycle_state()))
        .collect();
    assert_eq!(
        states,
        vec![
            (1, LifecycleState::Resumed),
            (2, LifecycleState::Created),
            (3, LifecycleState::Resumed),
        ]
    );
}

#[test]
fn a_floating_top_keeps_the_pane_below_started() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    env.controller.navigate(3, None, None, None).unwrap();
    env.controller.navigate(4, None, None, None).unwrap();
    let states: Vec<_> = env
        .controller
        .back_stack_entries()
        .map(|entry| (entry.destination().id(), entry.lifecycle_state()))
        .collect();
    assert_eq!(
        states,
        vec![
            (1, LifecycleState::Resumed),
            (2, LifecycleState::Created),
            (3, LifecycleState::Started),
            (4, LifecycleState::Resumed),
        ]
    );
}

#[test]
fn navigating_past_an_overlay_pops_it_first() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    env.controller.navigate(4, None, None, None).unwrap();
    assert_eq!(stack_ids(&env.controller), vec![1, 2, 4]);
    env.controller.navigate(3, None, None, None).unwrap();
    assert_eq!(stack_ids(&env.controller), vec![1, 2, 3]);
    assert_eq!(env.overlay_host.dismissals.get(), 1);
}

#[test]
fn overlays_stack_on_each_other() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    env.controller.navigate(4, None, None, None).unwrap();
    env.controller.navigate(4, None, None, None).unwrap();
    assert_eq!(stack_ids(&env.controller), vec![1, 2, 4, 4]);
}

#[test]
fn single_top_reuses_the_current_entry() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    env.controller.navigate(3, None, None, None).unwrap();
    let before = stack_identities(&env.controller);
    let mut args = Bundle::new();
    args.put_str("id", "7");
    let options = NavOptions::builder().launch_single_top(true).build();
    env.controller
        .navigate(3, Some(args), Some(options), None)
        .unwrap();
    assert_eq!(stack_identities(&env.controller), before);
    let entry = env.controller.current_back_stack_entry().unwrap();
    assert_eq!(
        entry.arguments().as_ref().unwrap().get_str("id"),
        Some("7")
    );
}

#[test]
fn action_indirection_carries_default_arguments() {
    let mut env = test_env();
    let graph = sample_graph();
    let mut defaults = Bundle::new();
    defaults.put_str("k", "v");
    let home = graph.find_node(2).unwrap();
    home.put_action(10, NavAction::new(3).with_default_arguments(defaults))
        .unwrap();
    env.controller.set_graph(graph, None).unwrap();
    env.controller.navigate(10, None, None, None).unwrap();
    let entry = env.controller.current_back_stack_entry().unwrap();
    assert_eq!(entry.destination().id(), 3);
    assert_eq!(entry.arguments().as_ref().unwrap().get_str("k"), Some("v"));
}

#[test]
fn explicit_arguments_override_action_defaults() {
    let mut env = test_env();
    let graph = sample_graph();
    let mut defaults = Bundle::new();
    defaults.put_str("k", "v");
    graph
        .find_node(2)
        .unwrap()
        .put_action(10, NavAction::new(3).with_default_arguments(defaults))
        .unwrap();
    env.controller.set_graph(graph, None).unwrap();
    let mut args = Bundle::new();
    args.put_str("k", "override");
    env.controller.navigate(10, Some(args), None, None).unwrap();
    let entry = env.controller.current_back_stack_entry().unwrap();
    assert_eq!(
        entry.arguments().as_ref().unwrap().get_str("k"),
        Some("override")
    );
}

#[test]
fn an_unknown_action_with_no_parent_to_retry_fails() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    let err = env.controller.navigate(10, None, None, None).unwrap_err();
    assert!(matches!(err, NavError::InvalidArgument(_)));
}

#[test]
fn an_action_declared_lower_in_the_stack_is_found_by_retrying() {
    let mut env = test_env();
    let graph = sample_graph();
    graph
        .find_node(2)
        .unwrap()
        .put_action(10, NavAction::new(5))
        .unwrap();
    env.controller.set_graph(graph, None).unwrap();
    env.controller.navigate(3, None, None, None).unwrap();
    env.controller.navigate(20, None, None, None).unwrap();
    let notifications = Rc::new(Cell::new(0u32));
    let seen = notifications.clone();
    env.controller
        .add_on_destination_changed_listener(Rc::new(move |_, _| {
            seen.set(seen.get() + 1);
        }));
    // One call at registration time.
    assert_eq!(notifications.get(), 1);
    env.controller.navigate(10, None, None, None).unwrap();
    // The intermediate pops stay silent; only the final navigation
    // dispatches.
    assert_eq!(notifications.get(), 2);
    assert_eq!(stack_ids(&env.controller), vec![1, 2, 5]);
}

#[test]
fn a_pop_only_action_pops_to_its_target() {
    let mut env = test_env();
    let graph = sample_graph();
    let options = NavOptions::builder().pop_up_to(2, false).build();
    graph
        .find_node(3)
        .unwrap()
        .put_action(10, NavAction::new(0).with_options(options))
        .unwrap();
    env.controller.set_graph(graph, None).unwrap();
    env.controller.navigate(3, None, None, None).unwrap();
    env.controller.navigate(10, None, None, None).unwrap();
    assert_eq!(stack_ids(&env.controller), vec![1, 2]);
}

#[test]
fn zero_with_pop_up_to_is_a_pure_pop() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    env.controller.navigate(3, None, None, None).unwrap();
    env.controller.navigate(5, None, None, None).unwrap();
    let options = NavOptions::builder().pop_up_to(3, false).build();
    env.controller.navigate(0, None, Some(options), None).unwrap();
    assert_eq!(stack_ids(&env.controller), vec![1, 2, 3]);
}

#[test]
fn zero_without_pop_up_to_is_rejected() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    let err = env.controller.navigate(0, None, None, None).unwrap_err();
    assert!(matches!(err, NavError::InvalidArgument(_)));
}

#[test]
fn pop_up_to_trims_the_stack_before_pushing() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    env.controller.navigate(3, None, None, None).unwrap();
    env.controller.navigate(5, None, None, None).unwrap();
    let options = NavOptions::builder().pop_up_to(2, false).build();
    env.controller.navigate(20, None, Some(options), None).unwrap();
    assert_eq!(stack_ids(&env.controller), vec![1, 2, 20, 21]);
}

#[test]
fn a_declining_pane_host_leaves_the_stack_untouched() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    env.controller.navigate(3, None, None, None).unwrap();
    env.pane_host.state_saved.set(true);
    let ids = stack_ids(&env.controller);
    assert!(!env.controller.pop_back_stack(true));
    assert_eq!(stack_ids(&env.controller), ids);
}

#[test]
fn the_provider_cannot_change_under_a_live_stack() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    let err = env
        .controller
        .set_navigator_provider(Rc::new(NavigatorProvider::new()))
        .unwrap_err();
    assert!(matches!(err, NavError::InvalidState(_)));
}

#[test]
fn host_lifecycle_events_clamp_every_entry() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    env.controller.navigate(3, None, None, None).unwrap();
    env.controller.handle_lifecycle_event(LifecycleEvent::Pause);
    let top = env.controller.current_back_stack_entry().unwrap();
    assert_eq!(top.lifecycle_state(), LifecycleState::Started);
    env.controller.handle_lifecycle_event(LifecycleEvent::Resume);
    assert_eq!(top.lifecycle_state(), LifecycleState::Resumed);
}

#[test]
fn popped_entries_are_destroyed_and_lose_their_scope() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    env.controller.navigate(3, None, None, None).unwrap();
    let entry = env.controller.current_back_stack_entry().unwrap();
    entry.scope().put("draft", Rc::new("unsaved".to_owned()));
    assert!(env.controller.pop_back_stack(true));
    assert_eq!(entry.lifecycle_state(), LifecycleState::Destroyed);
    assert!(entry.scope().is_empty());
}

#[test]
fn scope_owner_returns_the_graph_entry() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    env.controller.navigate(20, None, None, None).unwrap();
    let owner = env.controller.scope_owner(20).unwrap();
    assert!(owner.destination().is_graph());
    owner.scope().put("shared", Rc::new(1_i64));
    // Navigating within the graph keeps the same owner entry.
    env.controller.navigate(22, None, None, None).unwrap();
    let owner_again = env.controller.scope_owner(20).unwrap();
    assert!(Rc::ptr_eq(&owner, &owner_again));
    assert_eq!(*owner_again.scope().get::<i64>("shared").unwrap(), 1);
    // A non-graph id is not a scope owner.
    assert!(matches!(
        env.controller.scope_owner(22),
        Err(NavError::InvalidArgument(_))
    ));
}

#[test]
fn navigate_up_pops_within_the_task() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    env.controller.navigate(3, None, None, None).unwrap();
    assert!(env.controller.navigate_up(true).unwrap());
    assert_eq!(env.controller.current_destination().unwrap().id(), 2);
}

#[test]
fn navigate_up_from_the_start_destination_has_nowhere_to_go() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    assert!(!env.controller.navigate_up(true).unwrap());
}

#[test]
fn navigate_up_from_a_lone_deep_linked_destination_rebuilds_the_parent_task() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    // Land on settings(22) with everything else popped away, as an external
    // deep link would leave us.
    env.controller.navigate(20, None, None, None).unwrap();
    let options = NavOptions::builder().pop_up_to(1, true).build();
    env.controller.navigate(22, None, Some(options), None).unwrap();
    assert_eq!(stack_ids(&env.controller), vec![1, 20, 22]);
    assert!(env.controller.navigate_up(true).unwrap());
    assert_eq!(env.nav_host.started_stacks.borrow().len(), 1);
    assert_eq!(env.nav_host.finishes.get(), 1);
}

#[test]
fn replacing_the_graph_swaps_the_stack() {
    let mut env = test_env();
    env.controller.set_graph(sample_graph(), None).unwrap();
    env.controller.navigate(3, None, None, None).unwrap();

    let other = duonav_common::NavDestination::new_graph("navigation");
    other.set_id(40);
    other.add_destination(pane(41, "app.OtherPane")).unwrap();
    other.set_start_destination(41).unwrap();
    env.controller.set_graph(other, None).unwrap();
    assert_eq!(stack_ids(&env.controller), vec![40, 41]);
}

#[test]
fn start_arguments_reach_the_start_destination() {
    let mut env = test_env();
    let mut args = Bundle::new();
    args.put_str("source", "launcher");
    env.controller.set_graph(sample_graph(), Some(args)).unwrap();
    let entry = env.controller.current_back_stack_entry().unwrap();
    assert_eq!(
        entry.arguments().as_ref().unwrap().get_str("source"),
        Some("launcher")
    );
}
