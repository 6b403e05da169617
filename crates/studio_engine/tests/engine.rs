use std::time::{Duration, Instant};

use serde_json::json;
use studio_core::{
    update, AppState, Effect, Msg, PageData, ResourceRequest, Route, Slot, ViewTarget,
};
use studio_engine::{ApiConfig, EngineEvent, EngineHandle};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Polls without blocking the test runtime that drives the mock server.
async fn next_event(engine: &EngineHandle, within: Duration) -> Option<EngineEvent> {
    let deadline = Instant::now() + within;
    while Instant::now() < deadline {
        if let Some(event) = engine.try_recv() {
            return Some(event);
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    None
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_effect_settles_into_page_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/feedback/captcha"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "captcha_id": "c9",
            "question": "Type WXYZ"
        })))
        .mount(&server)
        .await;

    let engine = EngineHandle::new(ApiConfig::new(&server.uri())).expect("engine");
    let (state, effects) = update(AppState::new(), Msg::Navigate(Route::Feedback));
    let Some(Effect::Fetch { slot, seq, request }) = effects.into_iter().next() else {
        panic!("feedback page issues a fetch");
    };
    assert_eq!(request, ResourceRequest::GetCaptcha);
    engine.fetch(slot, seq, request);

    let Some(EngineEvent::FetchSettled {
        slot,
        seq: settled_seq,
        outcome,
    }) = next_event(&engine, Duration::from_secs(5)).await
    else {
        panic!("fetch did not settle");
    };
    assert_eq!(slot, Slot::Page);
    assert_eq!(settled_seq, seq);
    assert!(matches!(outcome, Ok(PageData::Captcha(_))));

    let (state, _) = update(
        state,
        Msg::FetchSettled {
            slot,
            seq: settled_seq,
            outcome,
        },
    );
    let feedback = state.view().feedback.expect("feedback view");
    assert_eq!(feedback.captcha_question.as_deref(), Some("Type WXYZ"));
}

#[tokio::test(flavor = "multi_thread")]
async fn cancelled_fetch_never_reports() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/about"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 1}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let engine = EngineHandle::new(ApiConfig::new(&server.uri())).expect("engine");
    let (_, effects) = update(AppState::new(), Msg::Navigate(Route::About));
    for effect in effects {
        if let Effect::Fetch { slot, seq, request } = effect {
            engine.fetch(slot, seq, request);
            engine.cancel(slot);
        }
    }

    assert!(next_event(&engine, Duration::from_millis(800)).await.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn failures_arrive_as_error_info() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authenticated"})),
        )
        .mount(&server)
        .await;

    let engine = EngineHandle::new(ApiConfig::new(&server.uri())).expect("engine");
    let (state, effects) = update(AppState::new(), Msg::Navigate(Route::News));
    let Some(Effect::Fetch { slot, seq, request }) = effects.into_iter().next() else {
        panic!("news page issues a fetch");
    };
    engine.fetch(slot, seq, request);

    let Some(EngineEvent::FetchSettled { slot, seq, outcome }) =
        next_event(&engine, Duration::from_secs(5)).await
    else {
        panic!("fetch did not settle");
    };
    let err = outcome.clone().expect_err("401");
    assert_eq!(err.status, Some(401));
    assert_eq!(err.message, "Not authenticated");

    let (_, effects) = update(state, Msg::FetchSettled { slot, seq, outcome });
    assert_eq!(effects, vec![Effect::RedirectToLogin]);
}

#[tokio::test(flavor = "multi_thread")]
async fn unauthorized_view_count_reports_and_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/projects/p1/view"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authenticated"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let engine = EngineHandle::new(ApiConfig::new(&server.uri())).expect("engine");
    engine.record_view(ViewTarget::Project { id: "p1".into() });

    let event = next_event(&engine, Duration::from_secs(5)).await;
    assert_eq!(event, Some(EngineEvent::Unauthorized));

    let (_, effects) = update(AppState::new(), Msg::Unauthorized);
    assert_eq!(effects, vec![Effect::RedirectToLogin]);
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_view_count_stays_silent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/about/1/view"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let engine = EngineHandle::new(ApiConfig::new(&server.uri())).expect("engine");
    engine.record_view(ViewTarget::About { id: 1 });

    assert!(next_event(&engine, Duration::from_millis(800)).await.is_none());
}
