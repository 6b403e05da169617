use std::sync::Once;

use pretty_assertions::assert_eq;
use studio_core::{ErrorInfo, RequestResult, Settlement, ViewStateController};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(studio_logging::initialize_for_tests);
}

type Controller = ViewStateController<&'static str, String>;

#[test]
fn late_settlement_of_superseded_fetch_is_discarded() {
    init_logging();
    let mut controller = Controller::new();
    let first = controller.trigger("a");
    let second = controller.trigger("b");
    assert!(first.seq < second.seq);

    // B resolves first, then A arrives late.
    assert_eq!(
        controller.settle(second.seq, Ok("data-b".to_string())),
        Settlement::Committed
    );
    assert_eq!(
        controller.settle(first.seq, Ok("data-a".to_string())),
        Settlement::Stale
    );

    assert_eq!(controller.state(), &RequestResult::Success("data-b".to_string()));
    assert_eq!(controller.params(), Some(&"b"));
}

#[test]
fn earlier_fetch_settling_first_does_not_commit() {
    init_logging();
    let mut controller = Controller::new();
    let first = controller.trigger("a");
    let second = controller.trigger("b");

    assert_eq!(
        controller.settle(first.seq, Err(ErrorInfo::new("boom"))),
        Settlement::Stale
    );
    assert!(controller.state().is_loading());

    controller.settle(second.seq, Ok("data-b".to_string()));
    assert_eq!(controller.state().data(), Some(&"data-b".to_string()));
}

#[test]
fn settling_twice_is_stale() {
    init_logging();
    let mut controller = Controller::new();
    let ticket = controller.trigger("a");

    assert_eq!(
        controller.settle(ticket.seq, Ok("x".to_string())),
        Settlement::Committed
    );
    assert_eq!(
        controller.settle(ticket.seq, Ok("y".to_string())),
        Settlement::Stale
    );
    assert_eq!(controller.state().data(), Some(&"x".to_string()));
}

#[test]
fn error_replaces_previous_data() {
    init_logging();
    let mut controller = Controller::new();
    let ticket = controller.trigger("a");
    controller.settle(ticket.seq, Ok("x".to_string()));

    let ticket = controller.retry().expect("settled controller retries");
    controller.settle(ticket.seq, Err(ErrorInfo::new("HTTP Error 500").with_status(500)));

    assert_eq!(controller.state().data(), None);
    assert_eq!(
        controller.state().error().map(|e| e.status),
        Some(Some(500))
    );
}

#[test]
fn retry_reuses_parameters_and_only_after_settling() {
    init_logging();
    let mut controller = Controller::new();
    assert!(controller.retry().is_none(), "nothing to retry yet");

    let ticket = controller.trigger("a");
    assert!(controller.retry().is_none(), "retry is not queued while loading");

    controller.settle(ticket.seq, Err(ErrorInfo::new("Request timeout")));
    let again = controller.retry().expect("retry after failure");
    assert_eq!(again.params, "a");
    assert!(again.seq > ticket.seq);
    assert!(controller.state().is_loading());
}

#[test]
fn focus_same_key_keeps_state_and_new_key_reloads() {
    init_logging();
    let mut controller = Controller::new();
    let ticket = controller.focus("a").expect("idle controller fetches");
    controller.settle(ticket.seq, Ok("x".to_string()));

    assert!(controller.focus("a").is_none());
    assert_eq!(controller.state().data(), Some(&"x".to_string()));

    let ticket = controller.focus("b").expect("new key fetches");
    assert_eq!(ticket.params, "b");
    assert_eq!(controller.state(), &RequestResult::Loading);
}

#[test]
fn abandon_discards_in_flight_result() {
    init_logging();
    let mut controller = Controller::new();
    let ticket = controller.trigger("a");

    assert!(controller.abandon());
    assert!(!controller.abandon());
    assert_eq!(
        controller.settle(ticket.seq, Ok("x".to_string())),
        Settlement::Stale
    );
    assert!(controller.state().is_idle());
    assert_eq!(controller.params(), None);
}
