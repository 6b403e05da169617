use std::fmt;

use studio_logging::{studio_debug, studio_warn};

use crate::{ErrorInfo, RequestResult};

/// Monotonic per-controller sequence number attached to every issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestSeq(u64);

impl RequestSeq {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A fetch the caller must now run. Its result is only accepted under `seq`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket<P> {
    pub seq: RequestSeq,
    pub params: P,
}

/// What happened to a settled fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Committed,
    /// Superseded by a later trigger, abandoned, or already settled.
    Stale,
}

/// Owns the `RequestResult` of one logical fetch operation.
///
/// The controller never performs IO. `trigger` hands out a [`FetchTicket`]
/// and `settle` accepts the outcome only when it carries the latest issued
/// sequence number, so an older fetch that settles late can never overwrite
/// the state of a newer one.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewStateController<P, T> {
    params: Option<P>,
    state: RequestResult<T>,
    issued: u64,
    in_flight: Option<RequestSeq>,
}

impl<P, T> Default for ViewStateController<P, T> {
    fn default() -> Self {
        Self {
            params: None,
            state: RequestResult::Idle,
            issued: 0,
            in_flight: None,
        }
    }
}

impl<P, T> ViewStateController<P, T>
where
    P: Clone + PartialEq + fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RequestResult<T> {
        &self.state
    }

    /// Parameters of the most recent trigger (the identity key of this instance).
    pub fn params(&self) -> Option<&P> {
        self.params.as_ref()
    }

    pub fn in_flight(&self) -> Option<RequestSeq> {
        self.in_flight
    }

    pub fn is_current(&self, seq: RequestSeq) -> bool {
        self.in_flight == Some(seq)
    }

    /// Enter `Loading` and issue a new fetch, superseding any in-flight one.
    pub fn trigger(&mut self, params: P) -> FetchTicket<P> {
        if let Some(previous) = self.in_flight {
            studio_debug!("superseding in-flight fetch {} for {:?}", previous, self.params);
        }
        self.issued += 1;
        let seq = RequestSeq(self.issued);
        self.in_flight = Some(seq);
        self.state = RequestResult::Loading;
        self.params = Some(params.clone());
        FetchTicket { seq, params }
    }

    /// Switch to the identity key `params`.
    ///
    /// A different key (or an idle controller) resets to `Loading` and
    /// fetches again; the same key keeps the current state and issues nothing.
    pub fn focus(&mut self, params: P) -> Option<FetchTicket<P>> {
        if !self.state.is_idle() && self.params.as_ref() == Some(&params) {
            return None;
        }
        Some(self.trigger(params))
    }

    /// Replay the last trigger with identical parameters.
    ///
    /// Only valid once the previous fetch has settled; never queued while loading.
    pub fn retry(&mut self) -> Option<FetchTicket<P>> {
        if !self.state.is_settled() {
            return None;
        }
        let params = self.params.clone()?;
        Some(self.trigger(params))
    }

    /// Commit `outcome` if `seq` is the fetch this controller is waiting for.
    pub fn settle(&mut self, seq: RequestSeq, outcome: Result<T, ErrorInfo>) -> Settlement {
        if !self.is_current(seq) {
            studio_debug!(
                "discarding stale settlement {} (waiting for {:?}) for {:?}",
                seq,
                self.in_flight,
                self.params
            );
            return Settlement::Stale;
        }
        if let Err(err) = &outcome {
            studio_warn!("fetch {} for {:?} failed: {}", seq, self.params, err);
        }
        self.in_flight = None;
        self.state = outcome.into();
        Settlement::Committed
    }

    /// Fail without issuing a fetch (local validation). Discards any in-flight fetch.
    pub fn reject(&mut self, params: P, error: ErrorInfo) {
        self.in_flight = None;
        self.params = Some(params);
        self.state = RequestResult::Failure(error);
    }

    /// Forget the current key; any in-flight result will be discarded.
    ///
    /// Returns `true` when a fetch was in flight.
    pub fn abandon(&mut self) -> bool {
        let was_in_flight = self.in_flight.take().is_some();
        self.params = None;
        self.state = RequestResult::Idle;
        was_in_flight
    }
}
