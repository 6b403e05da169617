use crate::model::{
    AboutUs, Banner, Captcha, Category, FeedbackForm, FeedbackReceipt, NewsItem, NewsList,
    PageType, ProjectItem, ProjectList,
};

/// Optional offset/limit pair understood by every list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Paging {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl Paging {
    pub fn first(limit: u32) -> Self {
        Self {
            skip: None,
            limit: Some(limit),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ProjectQuery {
    pub category: Option<Category>,
    pub paging: Paging,
}

/// One call a page can ask the engine to make. Doubles as the identity key
/// of the controller that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceRequest {
    ListProjects(ProjectQuery),
    GetProject { id: String },
    ListNews(Paging),
    GetNews { id: String },
    GetAbout,
    GetBanner { page_type: PageType },
    GetCaptcha,
    SubmitFeedback(FeedbackForm),
}

impl ResourceRequest {
    /// Short label for logs; never includes form contents.
    pub fn label(&self) -> String {
        match self {
            ResourceRequest::ListProjects(query) => match query.category {
                Some(category) => format!("projects[{}]", category.as_str()),
                None => "projects".to_string(),
            },
            ResourceRequest::GetProject { id } => format!("project/{id}"),
            ResourceRequest::ListNews(_) => "news".to_string(),
            ResourceRequest::GetNews { id } => format!("news/{id}"),
            ResourceRequest::GetAbout => "about".to_string(),
            ResourceRequest::GetBanner { page_type } => format!("banner/{}", page_type.as_str()),
            ResourceRequest::GetCaptcha => "captcha".to_string(),
            ResourceRequest::SubmitFeedback(_) => "feedback".to_string(),
        }
    }
}

/// Fire-and-forget view counter targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewTarget {
    Project { id: String },
    About { id: i64 },
}

/// Decoded payload of a settled [`ResourceRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageData {
    Projects(ProjectList),
    Project(ProjectItem),
    NewsList(NewsList),
    News(NewsItem),
    About(AboutUs),
    /// `None` when the page type has no banner configured.
    Banner(Option<Banner>),
    Captcha(Captcha),
    FeedbackReceipt(FeedbackReceipt),
}
