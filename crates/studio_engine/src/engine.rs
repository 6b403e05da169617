use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use studio_core::{RequestSeq, ResourceRequest, Slot, ViewTarget};
use studio_logging::{studio_debug, studio_error, studio_warn};
use tokio_util::sync::CancellationToken;

use crate::client::Transport;
use crate::resources::ResourceClients;
use crate::{ApiConfig, ApiError, EngineEvent};

enum EngineCommand {
    Fetch {
        slot: Slot,
        seq: RequestSeq,
        request: ResourceRequest,
    },
    Cancel {
        slot: Slot,
    },
    RecordView {
        target: ViewTarget,
    },
}

/// Runs API calls on a background tokio runtime and reports settlements
/// over a channel.
///
/// At most one fetch per slot is live: a new fetch for a slot cancels the
/// previous one, and cancelled fetches never report. Clones share the same
/// runtime and event queue.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        Self::with_clients(Arc::new(ResourceClients::new(config)?))
    }

    /// Fails when the runtime cannot be started; no command would ever run.
    pub fn with_clients<T: Transport + 'static>(
        clients: Arc<ResourceClients<T>>,
    ) -> Result<Self, ApiError> {
        let runtime = tokio::runtime::Runtime::new().map_err(|err| {
            studio_error!("failed to start engine runtime: {}", err);
            ApiError::Runtime(err.to_string())
        })?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let mut live: HashMap<Slot, CancellationToken> = HashMap::new();
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Fetch { slot, seq, request } => {
                        let token = CancellationToken::new();
                        if let Some(previous) = live.insert(slot, token.clone()) {
                            previous.cancel();
                        }
                        let clients = clients.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            run_fetch(clients.as_ref(), slot, seq, request, token, event_tx).await;
                        });
                    }
                    EngineCommand::Cancel { slot } => {
                        if let Some(token) = live.remove(&slot) {
                            token.cancel();
                        }
                    }
                    EngineCommand::RecordView { target } => {
                        let clients = clients.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            match clients.record_view(&target).await {
                                Ok(()) => {}
                                Err(err) if err.status() == Some(401) => {
                                    let _ = event_tx.send(EngineEvent::Unauthorized);
                                }
                                Err(err) => {
                                    studio_warn!("view count for {:?} not recorded: {}", target, err);
                                }
                            }
                        });
                    }
                }
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn fetch(&self, slot: Slot, seq: RequestSeq, request: ResourceRequest) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Fetch { slot, seq, request });
    }

    pub fn cancel(&self, slot: Slot) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { slot });
    }

    pub fn record_view(&self, target: ViewTarget) {
        let _ = self.cmd_tx.send(EngineCommand::RecordView { target });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

async fn run_fetch<T: Transport>(
    clients: &ResourceClients<T>,
    slot: Slot,
    seq: RequestSeq,
    request: ResourceRequest,
    token: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let outcome = clients.execute(&request, &token).await;
    if matches!(outcome, Err(ApiError::Cancelled)) {
        studio_debug!("{:?} fetch {} cancelled", slot, seq);
        return;
    }
    let _ = event_tx.send(EngineEvent::FetchSettled {
        slot,
        seq,
        outcome: outcome.map_err(|err| err.to_error_info()),
    });
}
