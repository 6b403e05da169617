//! Studio core: pure page lifecycle, fetch state, and document metadata.
mod controller;
mod effect;
mod error;
mod image;
pub mod model;
mod msg;
mod pages;
mod request;
mod resource;
mod route;
pub mod seo;
mod state;
mod update;
mod view_model;

pub use controller::{FetchTicket, RequestSeq, Settlement, ViewStateController};
pub use effect::{Effect, Slot};
pub use error::ErrorInfo;
pub use image::{ImageUrlResolver, DEFAULT_PLACEHOLDER, DEFAULT_UPLOAD_PREFIX};
pub use msg::Msg;
pub use pages::{seo_for, DESCRIPTION_LIMIT};
pub use request::RequestResult;
pub use resource::{PageData, Paging, ProjectQuery, ResourceRequest, ViewTarget};
pub use route::{Route, FEATURED_GAMES};
pub use state::{AppState, PageController};
pub use update::{update, CAPTCHA_REQUIRED};
pub use view_model::{AppViewModel, CardView, FeedbackView, PageView};
