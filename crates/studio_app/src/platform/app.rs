use std::env;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use studio_core::seo::SiteProfile;
use studio_core::{update, AppState, AppViewModel, Msg, PageView, Route, Slot};
use studio_engine::ApiConfig;
use studio_logging::{studio_info, studio_warn};

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};

/// Headless host: visits each location given on the command line (or `/`),
/// waits for its fetches to settle, and prints the resulting document head.
pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::from_env());

    let config = ApiConfig::from_env();
    studio_info!("API base URL {}", config.base_url);
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(&config, msg_tx)?;
    // Fetches settle within the client deadline; leave slack for decoding.
    let settle_within = config.timeout + Duration::from_secs(1);

    let mut locations: Vec<String> = env::args().skip(1).collect();
    if locations.is_empty() {
        locations.push("/".to_string());
    }

    let mut state = AppState::with_site(SiteProfile::default(), config.image_resolver());
    for location in locations {
        let (next, redirect) = dispatch(state, Msg::Navigate(Route::parse(&location)), &runner);
        state = next;
        let (next, redirect) = match redirect {
            Some(url) => (state, Some(url)),
            None => wait_for_settle(state, &msg_rx, &runner, settle_within),
        };
        state = next;

        if let Some(url) = redirect {
            println!("{location}: redirect to {url}");
            break;
        }
        print_page(&location, &mut state);
    }

    let _ = dispatch(state, Msg::Unmount, &runner);
    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> (AppState, Option<String>) {
    let (state, effects) = update(state, msg);
    let redirect = runner.enqueue(effects);
    (state, redirect)
}

fn in_flight(state: &AppState) -> bool {
    [Slot::Page, Slot::Banner, Slot::Submission]
        .into_iter()
        .any(|slot| state.controller(slot).in_flight().is_some())
}

fn wait_for_settle(
    mut state: AppState,
    msg_rx: &mpsc::Receiver<Msg>,
    runner: &EffectRunner,
    within: Duration,
) -> (AppState, Option<String>) {
    let deadline = Instant::now() + within;
    while in_flight(&state) {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let Ok(msg) = msg_rx.recv_timeout(remaining) else {
            studio_warn!("gave up waiting for fetches to settle");
            break;
        };
        let (next, redirect) = dispatch(state, msg, runner);
        state = next;
        if redirect.is_some() {
            return (state, redirect);
        }
    }
    (state, None)
}

fn print_page(location: &str, state: &mut AppState) {
    if !state.consume_dirty() {
        return;
    }
    let view = state.view();
    println!("{location}: {}", summary(&view));
    if let Some(banner) = &view.banner_url {
        println!("  banner: {banner}");
    }
    if let Some(feedback) = &view.feedback {
        if let Some(question) = &feedback.captcha_question {
            println!("  captcha: {question}");
        }
    }
    println!("{}", state.head().render());
}

fn summary(view: &AppViewModel) -> String {
    match &view.page {
        PageView::Blank => format!("{} (no content)", view.document_title),
        PageView::Loading => format!("{} (still loading)", view.document_title),
        PageView::Failed { message } => format!("{} (error: {message})", view.document_title),
        PageView::Ready { cards } => {
            let titles: Vec<&str> = cards.iter().map(|card| card.title.as_str()).collect();
            format!("{} [{}]", view.document_title, titles.join(", "))
        }
    }
}
