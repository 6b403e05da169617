use studio_core::model::{
    AboutUs, Banner, Captcha, Category, FeedbackForm, FeedbackReceipt, NewsItem, NewsList,
    PageType, ProjectItem, ProjectList, UploadedImage,
};
use studio_core::{PageData, Paging, ProjectQuery, ResourceRequest, ViewTarget};
use studio_logging::studio_debug;
use tokio_util::sync::CancellationToken;

use crate::client::{ApiCall, HttpClient, ReqwestTransport, Transport, UploadFile};
use crate::{ApiConfig, ApiError};

/// Typed wrappers over the public REST endpoints plus the admin image upload.
pub struct ResourceClients<T: Transport = ReqwestTransport> {
    http: HttpClient<T>,
}

impl ResourceClients<ReqwestTransport> {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }
}

impl<T: Transport> ResourceClients<T> {
    pub fn with_http(http: HttpClient<T>) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &HttpClient<T> {
        &self.http
    }

    pub async fn list_projects(&self, query: &ProjectQuery) -> Result<ProjectList, ApiError> {
        self.http.send(projects_call(query)).await
    }

    pub async fn games(&self, paging: Paging) -> Result<ProjectList, ApiError> {
        self.list_projects(&ProjectQuery {
            category: Some(Category::Game),
            paging,
        })
        .await
    }

    pub async fn websites(&self, paging: Paging) -> Result<ProjectList, ApiError> {
        self.list_projects(&ProjectQuery {
            category: Some(Category::Website),
            paging,
        })
        .await
    }

    pub async fn project(&self, id: &str) -> Result<ProjectItem, ApiError> {
        self.http.send(ApiCall::get(format!("/projects/{id}"))).await
    }

    pub async fn increment_project_views(&self, id: &str) -> Result<ProjectItem, ApiError> {
        self.http.send(ApiCall::post(format!("/projects/{id}/view"))).await
    }

    pub async fn list_news(&self, paging: Paging) -> Result<NewsList, ApiError> {
        self.http.send(news_call(paging)).await
    }

    pub async fn news(&self, id: &str) -> Result<NewsItem, ApiError> {
        self.http.send(ApiCall::get(format!("/news/{id}"))).await
    }

    /// The about-us record currently published.
    pub async fn about(&self) -> Result<AboutUs, ApiError> {
        self.http.send(ApiCall::get("/about")).await
    }

    pub async fn about_by_id(&self, id: i64) -> Result<AboutUs, ApiError> {
        self.http.send(ApiCall::get(format!("/about/{id}"))).await
    }

    pub async fn increment_about_views(&self, id: i64) -> Result<AboutUs, ApiError> {
        self.http.send(ApiCall::post(format!("/about/{id}/view"))).await
    }

    /// `None` when no banner is configured for `page_type`.
    pub async fn banner(&self, page_type: PageType) -> Result<Option<Banner>, ApiError> {
        missing_as_none(self.http.send(banner_call(page_type)).await)
    }

    pub async fn captcha(&self) -> Result<Captcha, ApiError> {
        self.http.send(ApiCall::get("/feedback/captcha")).await
    }

    pub async fn submit_feedback(&self, form: &FeedbackForm) -> Result<FeedbackReceipt, ApiError> {
        self.http.send(ApiCall::post("/feedback").with_json(form)?).await
    }

    /// Admin upload; relies on the session cookie held by the transport.
    pub async fn upload_image(&self, file: UploadFile) -> Result<UploadedImage, ApiError> {
        self.http
            .send(ApiCall::post("/admin/upload/image").with_file(file))
            .await
    }

    /// Run the call behind `request` and wrap the result for the page.
    pub async fn execute(
        &self,
        request: &ResourceRequest,
        cancel: &CancellationToken,
    ) -> Result<PageData, ApiError> {
        studio_debug!("executing {}", request.label());
        let http = &self.http;
        match request {
            ResourceRequest::ListProjects(query) => http
                .send_cancellable(projects_call(query), cancel)
                .await
                .map(PageData::Projects),
            ResourceRequest::GetProject { id } => http
                .send_cancellable(ApiCall::get(format!("/projects/{id}")), cancel)
                .await
                .map(PageData::Project),
            ResourceRequest::ListNews(paging) => http
                .send_cancellable(news_call(*paging), cancel)
                .await
                .map(PageData::NewsList),
            ResourceRequest::GetNews { id } => http
                .send_cancellable(ApiCall::get(format!("/news/{id}")), cancel)
                .await
                .map(PageData::News),
            ResourceRequest::GetAbout => http
                .send_cancellable(ApiCall::get("/about"), cancel)
                .await
                .map(PageData::About),
            ResourceRequest::GetBanner { page_type } => missing_as_none(
                http.send_cancellable(banner_call(*page_type), cancel).await,
            )
            .map(PageData::Banner),
            ResourceRequest::GetCaptcha => http
                .send_cancellable(ApiCall::get("/feedback/captcha"), cancel)
                .await
                .map(PageData::Captcha),
            ResourceRequest::SubmitFeedback(form) => http
                .send_cancellable(ApiCall::post("/feedback").with_json(form)?, cancel)
                .await
                .map(PageData::FeedbackReceipt),
        }
    }

    /// Bump a view counter; the returned record is discarded.
    pub async fn record_view(&self, target: &ViewTarget) -> Result<(), ApiError> {
        match target {
            ViewTarget::Project { id } => self.increment_project_views(id).await.map(drop),
            ViewTarget::About { id } => self.increment_about_views(*id).await.map(drop),
        }
    }
}

fn projects_call(query: &ProjectQuery) -> ApiCall {
    ApiCall::get("/projects")
        .with_query("category", query.category.map(Category::as_str))
        .with_query("skip", query.paging.skip)
        .with_query("limit", query.paging.limit)
}

fn news_call(paging: Paging) -> ApiCall {
    ApiCall::get("/news")
        .with_query("skip", paging.skip)
        .with_query("limit", paging.limit)
}

fn banner_call(page_type: PageType) -> ApiCall {
    ApiCall::get(format!("/banners/page/{}", page_type.as_str()))
}

fn missing_as_none<V>(outcome: Result<V, ApiError>) -> Result<Option<V>, ApiError> {
    match outcome {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.status() == Some(404) => Ok(None),
        Err(err) => Err(err),
    }
}
