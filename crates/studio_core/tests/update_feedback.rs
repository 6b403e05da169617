use std::sync::Once;

use pretty_assertions::assert_eq;
use studio_core::model::{Captcha, FeedbackForm, FeedbackReceipt};
use studio_core::{
    update, AppState, Effect, ErrorInfo, Msg, PageData, RequestSeq, ResourceRequest, Route, Slot,
    CAPTCHA_REQUIRED,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(studio_logging::initialize_for_tests);
}

fn seq_of(effects: &[Effect], wanted: Slot) -> RequestSeq {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Fetch { slot, seq, .. } if *slot == wanted => Some(*seq),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no fetch for {wanted:?} in {effects:?}"))
}

fn form(answer: &str) -> FeedbackForm {
    FeedbackForm {
        name: "Sam".into(),
        email: "sam@example.com".into(),
        subject: Some("Hello".into()),
        message: "Great games!".into(),
        captcha_id: "cap-1".into(),
        captcha_answer: answer.into(),
    }
}

fn receipt() -> FeedbackReceipt {
    FeedbackReceipt {
        id: 9,
        name: "Sam".into(),
        email: "sam@example.com".into(),
        subject: Some("Hello".into()),
        message: "Great games!".into(),
        is_read: false,
        created_at: None,
        updated_at: None,
    }
}

/// Feedback page with a loaded captcha.
fn feedback_page() -> AppState {
    let (state, effects) = update(AppState::new(), Msg::Navigate(Route::Feedback));
    assert_eq!(
        effects,
        vec![Effect::Fetch {
            slot: Slot::Page,
            seq: seq_of(&effects, Slot::Page),
            request: ResourceRequest::GetCaptcha,
        }]
    );
    let seq = seq_of(&effects, Slot::Page);
    let captcha = Captcha {
        captcha_id: "cap-1".into(),
        question: "Type ABCD".into(),
    };
    let (state, effects) = update(
        state,
        Msg::FetchSettled {
            slot: Slot::Page,
            seq,
            outcome: Ok(PageData::Captcha(captcha)),
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn captcha_is_shown_on_the_form() {
    init_logging();
    let view = feedback_page().view();
    let feedback = view.feedback.expect("feedback view on feedback route");

    assert_eq!(feedback.captcha_id.as_deref(), Some("cap-1"));
    assert_eq!(feedback.captcha_question.as_deref(), Some("Type ABCD"));
    assert!(!feedback.submitting);
    assert!(!feedback.sent);
}

#[test]
fn missing_answer_fails_locally_without_a_request() {
    init_logging();
    let (state, effects) = update(feedback_page(), Msg::FeedbackSubmitted(form("   ")));

    assert!(effects.is_empty());
    let feedback = state.view().feedback.expect("feedback view");
    assert_eq!(feedback.error.as_deref(), Some(CAPTCHA_REQUIRED));
    assert!(!feedback.submitting);
}

#[test]
fn answer_is_uppercased_and_submitted_once() {
    init_logging();
    let (state, effects) = update(feedback_page(), Msg::FeedbackSubmitted(form(" ab3d ")));

    let seq = seq_of(&effects, Slot::Submission);
    assert_eq!(
        effects,
        vec![Effect::Fetch {
            slot: Slot::Submission,
            seq,
            request: ResourceRequest::SubmitFeedback(form("AB3D")),
        }]
    );
    assert!(state.view().feedback.expect("feedback view").submitting);

    let (_, effects) = update(state, Msg::FeedbackSubmitted(form("ab3d")));
    assert!(effects.is_empty(), "no double submit while sending");
}

#[test]
fn success_marks_sent_and_reloads_captcha() {
    init_logging();
    let (state, effects) = update(feedback_page(), Msg::FeedbackSubmitted(form("abcd")));
    let seq = seq_of(&effects, Slot::Submission);

    let (state, effects) = update(
        state,
        Msg::FetchSettled {
            slot: Slot::Submission,
            seq,
            outcome: Ok(PageData::FeedbackReceipt(receipt())),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::Fetch {
            slot: Slot::Page,
            seq: seq_of(&effects, Slot::Page),
            request: ResourceRequest::GetCaptcha,
        }]
    );
    let feedback = state.view().feedback.expect("feedback view");
    assert!(feedback.sent);
    assert_eq!(feedback.error, None);
}

#[test]
fn rejected_submission_shows_server_detail() {
    init_logging();
    let (state, effects) = update(feedback_page(), Msg::FeedbackSubmitted(form("nope")));
    let seq = seq_of(&effects, Slot::Submission);

    let (state, effects) = update(
        state,
        Msg::FetchSettled {
            slot: Slot::Submission,
            seq,
            outcome: Err(ErrorInfo::new("Invalid captcha").with_status(400)),
        },
    );

    assert!(effects.is_empty());
    let feedback = state.view().feedback.expect("feedback view");
    assert_eq!(feedback.error.as_deref(), Some("Invalid captcha"));
    assert!(!feedback.sent);
}

#[test]
fn submission_outside_feedback_page_is_ignored() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Navigate(Route::News));
    let (state, effects) = update(state, Msg::FeedbackSubmitted(form("abcd")));

    assert!(effects.is_empty());
    assert!(state.controller(Slot::Submission).state().is_idle());
    assert_eq!(state.view().feedback, None);
}

#[test]
fn leaving_the_page_cancels_a_pending_submission() {
    init_logging();
    let (state, effects) = update(feedback_page(), Msg::FeedbackSubmitted(form("abcd")));
    let seq = seq_of(&effects, Slot::Submission);

    let (state, effects) = update(state, Msg::Navigate(Route::Home));
    assert!(effects.contains(&Effect::Cancel {
        slot: Slot::Submission
    }));

    let (state, effects) = update(
        state,
        Msg::FetchSettled {
            slot: Slot::Submission,
            seq,
            outcome: Ok(PageData::FeedbackReceipt(receipt())),
        },
    );
    assert!(effects.is_empty());
    assert!(state.controller(Slot::Submission).state().is_idle());
}
