use crate::controller::RequestSeq;
use crate::resource::{ResourceRequest, ViewTarget};

/// Which controller of the active page a fetch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The page's main content.
    Page,
    Banner,
    /// Feedback form submission.
    Submission,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run `request` and report back with `Msg::FetchSettled { slot, seq, .. }`.
    Fetch {
        slot: Slot,
        seq: RequestSeq,
        request: ResourceRequest,
    },
    /// Abort whatever is in flight for `slot`; its result would be ignored anyway.
    Cancel { slot: Slot },
    /// Bump a view counter; the outcome never reaches page state.
    RecordView { target: ViewTarget },
    RedirectToLogin,
}
