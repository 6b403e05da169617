use crate::image::ImageUrlResolver;
use crate::resource::PageData;
use crate::route::Route;
use crate::{AppState, RequestResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub image_url: String,
    pub href: String,
}

/// Main content area. Variants are exclusive: an error never sits next to
/// data from an earlier load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageView {
    #[default]
    Blank,
    Loading,
    Failed {
        message: String,
    },
    Ready {
        cards: Vec<CardView>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedbackView {
    pub captcha_id: Option<String>,
    pub captcha_question: Option<String>,
    pub submitting: bool,
    pub sent: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub route: Option<Route>,
    pub document_title: String,
    pub page: PageView,
    pub banner_url: Option<String>,
    /// Present only on the feedback page.
    pub feedback: Option<FeedbackView>,
    pub redirecting: bool,
    pub dirty: bool,
}

impl AppViewModel {
    pub(crate) fn build(state: &AppState, dirty: bool) -> Self {
        let images = &state.images;
        let page = match state.page.state() {
            RequestResult::Idle => PageView::Blank,
            RequestResult::Loading => PageView::Loading,
            RequestResult::Failure(err) => PageView::Failed {
                message: err.message.clone(),
            },
            RequestResult::Success(data) => PageView::Ready {
                cards: cards_for(data, images),
            },
        };
        let banner_url = match state.banner.state().data() {
            Some(PageData::Banner(Some(banner))) => Some(images.resolve(Some(banner.image.as_str()))),
            _ => None,
        };
        let feedback = (state.route.as_ref() == Some(&Route::Feedback)).then(|| {
            let captcha = match state.page.state().data() {
                Some(PageData::Captcha(captcha)) => Some(captcha),
                _ => None,
            };
            FeedbackView {
                captcha_id: captcha.map(|c| c.captcha_id.clone()),
                captcha_question: captcha.map(|c| c.question.clone()),
                submitting: state.submission.state().is_loading(),
                sent: state.feedback_sent,
                error: state.submission.state().error().map(|e| e.message.clone()),
            }
        });

        Self {
            route: state.route.clone(),
            document_title: state.seo.head().title().to_string(),
            page,
            banner_url,
            feedback,
            redirecting: state.redirecting,
            dirty,
        }
    }
}

fn cards_for(data: &PageData, images: &ImageUrlResolver) -> Vec<CardView> {
    match data {
        PageData::Projects(list) => list
            .items
            .iter()
            .map(|item| CardView {
                id: item.id.clone(),
                title: item.title.clone(),
                summary: item.description.clone().unwrap_or_default(),
                image_url: images.resolve(item.image.as_deref()),
                href: format!("/projects/{}", item.id),
            })
            .collect(),
        PageData::Project(item) => vec![CardView {
            id: item.id.clone(),
            title: item.title.clone(),
            summary: item.description.clone().unwrap_or_default(),
            image_url: images.resolve(item.image.as_deref()),
            href: item
                .link
                .clone()
                .unwrap_or_else(|| format!("/projects/{}", item.id)),
        }],
        PageData::NewsList(list) => list
            .items
            .iter()
            .map(|item| CardView {
                id: item.id.clone(),
                title: item.title.clone(),
                summary: item.excerpt.clone().unwrap_or_default(),
                image_url: images.resolve(item.image.as_deref()),
                href: format!("/news/{}", item.id),
            })
            .collect(),
        PageData::News(item) => vec![CardView {
            id: item.id.clone(),
            title: item.title.clone(),
            summary: item
                .content
                .clone()
                .or_else(|| item.excerpt.clone())
                .unwrap_or_default(),
            image_url: images.resolve(item.image.as_deref()),
            href: format!("/news/{}", item.id),
        }],
        PageData::About(about) => vec![CardView {
            id: about.id.to_string(),
            title: about.title.clone().unwrap_or_else(|| "About Us".to_string()),
            summary: about.description.clone().unwrap_or_default(),
            image_url: images.resolve(about.image.as_deref()),
            href: "/about".to_string(),
        }],
        PageData::Banner(_) | PageData::Captcha(_) | PageData::FeedbackReceipt(_) => Vec::new(),
    }
}
