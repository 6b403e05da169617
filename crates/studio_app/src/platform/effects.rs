use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use studio_core::{Effect, Msg};
use studio_engine::{ApiConfig, ApiError, EngineEvent, EngineHandle};
use studio_logging::{studio_debug, studio_info};

/// Executes core effects on the engine and feeds settlements back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
    login_url: String,
}

impl EffectRunner {
    pub fn new(config: &ApiConfig, msg_tx: mpsc::Sender<Msg>) -> Result<Self, ApiError> {
        let engine = EngineHandle::new(config.clone())?;
        let runner = Self {
            engine,
            login_url: config.login_url(),
        };
        runner.spawn_event_loop(msg_tx);
        Ok(runner)
    }

    /// Returns the login URL when the effects ask the host to leave the page.
    pub fn enqueue(&self, effects: Vec<Effect>) -> Option<String> {
        let mut redirect = None;
        for effect in effects {
            match effect {
                Effect::Fetch { slot, seq, request } => {
                    studio_debug!("Fetch {:?} {} {}", slot, seq, request.label());
                    self.engine.fetch(slot, seq, request);
                }
                Effect::Cancel { slot } => {
                    studio_debug!("Cancel {:?}", slot);
                    self.engine.cancel(slot);
                }
                Effect::RecordView { target } => {
                    self.engine.record_view(target);
                }
                Effect::RedirectToLogin => {
                    studio_info!("RedirectToLogin {}", self.login_url);
                    redirect = Some(self.login_url.clone());
                }
            }
        }
        redirect
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.recv_timeout(Duration::from_millis(50)) else {
                continue;
            };
            let msg = match event {
                EngineEvent::FetchSettled { slot, seq, outcome } => {
                    Msg::FetchSettled { slot, seq, outcome }
                }
                EngineEvent::Unauthorized => Msg::Unauthorized,
            };
            if msg_tx.send(msg).is_err() {
                break;
            }
        });
    }
}
