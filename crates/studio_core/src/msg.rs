use crate::controller::RequestSeq;
use crate::effect::Slot;
use crate::model::FeedbackForm;
use crate::resource::PageData;
use crate::route::Route;
use crate::ErrorInfo;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Router moved to a new location.
    Navigate(Route),
    /// User pressed the retry affordance of the page.
    RetryClicked,
    /// User submitted the feedback form.
    FeedbackSubmitted(FeedbackForm),
    /// Engine settled a fetch issued through `Effect::Fetch`.
    FetchSettled {
        slot: Slot,
        seq: RequestSeq,
        outcome: Result<PageData, ErrorInfo>,
    },
    /// A call outside the page's fetches (a view count) was rejected with 401.
    Unauthorized,
    /// Host is tearing the page down.
    Unmount,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
