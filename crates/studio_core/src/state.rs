use crate::controller::ViewStateController;
use crate::effect::Slot;
use crate::image::ImageUrlResolver;
use crate::resource::{PageData, ResourceRequest};
use crate::route::Route;
use crate::seo::{Activation, DocumentHead, SeoManager, SiteProfile};
use crate::view_model::AppViewModel;

pub type PageController = ViewStateController<ResourceRequest, PageData>;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub(crate) site: SiteProfile,
    pub(crate) images: ImageUrlResolver,
    pub(crate) route: Option<Route>,
    pub(crate) page: PageController,
    pub(crate) banner: PageController,
    pub(crate) submission: PageController,
    pub(crate) seo: SeoManager,
    pub(crate) activation: Option<Activation>,
    pub(crate) feedback_sent: bool,
    pub(crate) redirecting: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_site(site: SiteProfile, images: ImageUrlResolver) -> Self {
        Self {
            site,
            images,
            ..Self::default()
        }
    }

    /// Seed the head with the tags already present in the served HTML.
    pub fn with_head(mut self, head: DocumentHead) -> Self {
        self.seo = SeoManager::with_head(head);
        self
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::build(self, self.dirty)
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn head(&self) -> &DocumentHead {
        self.seo.head()
    }

    pub fn seo(&self) -> &SeoManager {
        &self.seo
    }

    pub fn images(&self) -> &ImageUrlResolver {
        &self.images
    }

    pub fn controller(&self, slot: Slot) -> &PageController {
        match slot {
            Slot::Page => &self.page,
            Slot::Banner => &self.banner,
            Slot::Submission => &self.submission,
        }
    }

    pub(crate) fn controller_mut(&mut self, slot: Slot) -> &mut PageController {
        match slot {
            Slot::Page => &mut self.page,
            Slot::Banner => &mut self.banner,
            Slot::Submission => &mut self.submission,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
