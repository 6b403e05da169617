use studio_logging::{studio_debug, studio_info, studio_warn};

use crate::effect::{Effect, Slot};
use crate::model::FeedbackForm;
use crate::pages::seo_for;
use crate::resource::{PageData, ResourceRequest, ViewTarget};
use crate::route::Route;
use crate::{AppState, ErrorInfo, Msg, RequestResult, RequestSeq};

/// Shown when the feedback form is submitted without a captcha answer.
pub const CAPTCHA_REQUIRED: &str = "Please complete the captcha";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Navigate(route) => navigate(&mut state, route),
        Msg::RetryClicked => retry(&mut state),
        Msg::FeedbackSubmitted(form) => submit_feedback(&mut state, form),
        Msg::FetchSettled { slot, seq, outcome } => settle(&mut state, slot, seq, outcome),
        Msg::Unauthorized => {
            studio_warn!("unauthorized background call");
            redirect_to_login(&mut state)
        }
        Msg::Unmount => unmount(&mut state),
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn navigate(state: &mut AppState, route: Route) -> Vec<Effect> {
    if state.route.as_ref() == Some(&route) {
        return Vec::new();
    }
    studio_info!("navigate to {}", route.path());

    // The outgoing page gives up the head before the incoming one applies.
    deactivate_seo(state);
    state.redirecting = false;
    state.feedback_sent = false;

    let mut effects = Vec::new();
    let banner = route
        .page_type()
        .map(|page_type| ResourceRequest::GetBanner { page_type });
    focus_slot(state, Slot::Page, route.primary_request(), &mut effects);
    focus_slot(state, Slot::Banner, banner, &mut effects);
    focus_slot(state, Slot::Submission, None, &mut effects);

    state.route = Some(route);
    activate_seo(state);
    state.mark_dirty();
    effects
}

fn focus_slot(
    state: &mut AppState,
    slot: Slot,
    request: Option<ResourceRequest>,
    effects: &mut Vec<Effect>,
) {
    match request {
        Some(request) => {
            let controller = state.controller_mut(slot);
            let superseded = controller.in_flight();
            if let Some(ticket) = controller.focus(request) {
                if superseded.is_some() {
                    effects.push(Effect::Cancel { slot });
                }
                effects.push(Effect::Fetch {
                    slot,
                    seq: ticket.seq,
                    request: ticket.params,
                });
            }
        }
        None => {
            if state.controller_mut(slot).abandon() {
                effects.push(Effect::Cancel { slot });
            }
        }
    }
}

/// Trigger `request` on `slot`, cancelling whatever it superseded.
fn issue(state: &mut AppState, slot: Slot, request: ResourceRequest, effects: &mut Vec<Effect>) {
    let controller = state.controller_mut(slot);
    if controller.in_flight().is_some() {
        effects.push(Effect::Cancel { slot });
    }
    let ticket = controller.trigger(request);
    effects.push(Effect::Fetch {
        slot,
        seq: ticket.seq,
        request: ticket.params,
    });
}

fn retry(state: &mut AppState) -> Vec<Effect> {
    match state.page.retry() {
        Some(ticket) => {
            studio_debug!("retrying {}", ticket.params.label());
            state.mark_dirty();
            vec![Effect::Fetch {
                slot: Slot::Page,
                seq: ticket.seq,
                request: ticket.params,
            }]
        }
        None => Vec::new(),
    }
}

fn submit_feedback(state: &mut AppState, mut form: FeedbackForm) -> Vec<Effect> {
    if state.route.as_ref() != Some(&Route::Feedback) {
        studio_debug!("feedback submitted outside the feedback page; ignoring");
        return Vec::new();
    }
    if state.submission.state().is_loading() {
        return Vec::new();
    }

    form.captcha_answer = form.captcha_answer.trim().to_uppercase();
    state.feedback_sent = false;
    state.mark_dirty();
    if form.captcha_id.trim().is_empty() || form.captcha_answer.is_empty() {
        state.submission.reject(
            ResourceRequest::SubmitFeedback(form),
            ErrorInfo::new(CAPTCHA_REQUIRED),
        );
        return Vec::new();
    }

    let mut effects = Vec::new();
    issue(
        state,
        Slot::Submission,
        ResourceRequest::SubmitFeedback(form),
        &mut effects,
    );
    effects
}

fn settle(
    state: &mut AppState,
    slot: Slot,
    seq: RequestSeq,
    outcome: Result<PageData, ErrorInfo>,
) -> Vec<Effect> {
    if !state.controller(slot).is_current(seq) {
        studio_debug!("ignoring stale {:?} settlement {}", slot, seq);
        return Vec::new();
    }
    if let Err(err) = &outcome {
        if err.is_unauthorized() {
            return unauthorized(state, slot);
        }
    }

    state.controller_mut(slot).settle(seq, outcome);
    state.mark_dirty();
    match slot {
        Slot::Page => page_settled(state),
        Slot::Banner => {
            if let Some(err) = state.banner.state().error() {
                studio_warn!("banner unavailable, hiding it: {}", err);
            }
            Vec::new()
        }
        Slot::Submission => submission_settled(state),
    }
}

/// 401 preempts the failure state: the controller goes idle and the host
/// redirects, once per navigation.
fn unauthorized(state: &mut AppState, slot: Slot) -> Vec<Effect> {
    state.controller_mut(slot).abandon();
    state.mark_dirty();
    studio_warn!("unauthorized response on {:?}", slot);
    redirect_to_login(state)
}

fn redirect_to_login(state: &mut AppState) -> Vec<Effect> {
    if state.redirecting {
        return Vec::new();
    }
    studio_info!("redirecting to login");
    state.redirecting = true;
    state.mark_dirty();
    vec![Effect::RedirectToLogin]
}

fn page_settled(state: &mut AppState) -> Vec<Effect> {
    let Some(data) = state.page.state().data() else {
        return Vec::new();
    };
    let target = match data {
        PageData::Project(project) => Some(ViewTarget::Project {
            id: project.id.clone(),
        }),
        PageData::About(about) => Some(ViewTarget::About { id: about.id }),
        _ => None,
    };
    activate_seo(state);
    target
        .map(|target| vec![Effect::RecordView { target }])
        .unwrap_or_default()
}

fn submission_settled(state: &mut AppState) -> Vec<Effect> {
    if !matches!(state.submission.state(), RequestResult::Success(_)) {
        return Vec::new();
    }
    state.feedback_sent = true;
    // Captchas are single-use; fetch a fresh one for the next message.
    let mut effects = Vec::new();
    issue(state, Slot::Page, ResourceRequest::GetCaptcha, &mut effects);
    effects
}

fn unmount(state: &mut AppState) -> Vec<Effect> {
    deactivate_seo(state);
    let mut effects = Vec::new();
    for slot in [Slot::Page, Slot::Banner, Slot::Submission] {
        if state.controller_mut(slot).abandon() {
            effects.push(Effect::Cancel { slot });
        }
    }
    state.route = None;
    state.mark_dirty();
    effects
}

fn activate_seo(state: &mut AppState) {
    let Some(route) = state.route.as_ref() else {
        return;
    };
    let (config, structured) = seo_for(
        route,
        state.page.state().data(),
        &state.site,
        &state.images,
    );
    if let Some(previous) = state.activation.take() {
        state.seo.teardown(previous);
    }
    state.activation = Some(state.seo.apply(&config, structured.as_ref()));
}

fn deactivate_seo(state: &mut AppState) {
    if let Some(activation) = state.activation.take() {
        state.seo.teardown(activation);
    }
}
