use url::Url;

use crate::model::{Category, PageType};
use crate::resource::{Paging, ProjectQuery, ResourceRequest};

/// Number of featured games shown on the home page.
pub const FEATURED_GAMES: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Games,
    Websites,
    Project { id: String },
    News,
    NewsArticle { id: String },
    About,
    Feedback,
    NotFound { path: String },
}

impl Route {
    /// Parse a browser location.
    ///
    /// Accepts absolute URLs (hash-routed `https://host/#/news/3` or plain
    /// `https://host/news/3`), bare paths, relative hash-routed locations
    /// (`/#/news/3`), and bare fragments (`#/about`).
    /// Anything unrecognized becomes [`Route::NotFound`].
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        let path = match Url::parse(location) {
            Ok(url) => match url.fragment().filter(|fragment| fragment.starts_with('/')) {
                Some(fragment) => fragment.to_string(),
                None => url.path().to_string(),
            },
            Err(_) => match location.split_once('#') {
                Some((_, fragment)) if fragment.starts_with('/') => fragment.to_string(),
                _ => location.to_string(),
            },
        };
        Self::from_path(&path)
    }

    fn from_path(raw: &str) -> Self {
        let path = raw
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["games"] => Route::Games,
            ["websites"] => Route::Websites,
            ["projects", id] => Route::Project { id: id.to_string() },
            ["news"] => Route::News,
            ["news", id] => Route::NewsArticle { id: id.to_string() },
            ["about"] => Route::About,
            ["feedback"] => Route::Feedback,
            _ => Route::NotFound {
                path: path.to_string(),
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Games => "/games".to_string(),
            Route::Websites => "/websites".to_string(),
            Route::Project { id } => format!("/projects/{id}"),
            Route::News => "/news".to_string(),
            Route::NewsArticle { id } => format!("/news/{id}"),
            Route::About => "/about".to_string(),
            Route::Feedback => "/feedback".to_string(),
            Route::NotFound { path } => path.clone(),
        }
    }

    /// Banner slot for this page, if it shows one.
    pub fn page_type(&self) -> Option<PageType> {
        match self {
            Route::Home => Some(PageType::Home),
            Route::Games => Some(PageType::Game),
            Route::Websites => Some(PageType::Website),
            Route::News => Some(PageType::News),
            Route::About => Some(PageType::About),
            Route::Project { .. }
            | Route::NewsArticle { .. }
            | Route::Feedback
            | Route::NotFound { .. } => None,
        }
    }

    /// The fetch that drives this page's main content.
    pub fn primary_request(&self) -> Option<ResourceRequest> {
        let request = match self {
            Route::Home => ResourceRequest::ListProjects(ProjectQuery {
                category: Some(Category::Game),
                paging: Paging::first(FEATURED_GAMES),
            }),
            Route::Games => ResourceRequest::ListProjects(ProjectQuery {
                category: Some(Category::Game),
                paging: Paging::default(),
            }),
            Route::Websites => ResourceRequest::ListProjects(ProjectQuery {
                category: Some(Category::Website),
                paging: Paging::default(),
            }),
            Route::Project { id } => ResourceRequest::GetProject { id: id.clone() },
            Route::News => ResourceRequest::ListNews(Paging::default()),
            Route::NewsArticle { id } => ResourceRequest::GetNews { id: id.clone() },
            Route::About => ResourceRequest::GetAbout,
            Route::Feedback => ResourceRequest::GetCaptcha,
            Route::NotFound { .. } => return None,
        };
        Some(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hash_routed_urls() {
        assert_eq!(
            Route::parse("https://studio.example.com/#/news/42"),
            Route::NewsArticle {
                id: "42".to_string()
            }
        );
        assert_eq!(Route::parse("https://studio.example.com/"), Route::Home);
        assert_eq!(Route::parse("#/about"), Route::About);
        assert_eq!(
            Route::parse("/#/news/3"),
            Route::NewsArticle {
                id: "3".to_string()
            }
        );
        assert_eq!(Route::parse("/#section"), Route::Home);
    }

    #[test]
    fn ignores_query_and_trailing_slash() {
        assert_eq!(Route::parse("/games/?page=2"), Route::Games);
        assert_eq!(
            Route::parse("/projects/p-1/"),
            Route::Project {
                id: "p-1".to_string()
            }
        );
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(
            Route::parse("/admin/panel"),
            Route::NotFound {
                path: "/admin/panel".to_string()
            }
        );
        assert_eq!(Route::parse("/admin/panel").primary_request(), None);
    }

    #[test]
    fn path_round_trips_for_known_routes() {
        for route in [
            Route::Home,
            Route::Games,
            Route::Websites,
            Route::Project { id: "x".into() },
            Route::News,
            Route::NewsArticle { id: "n".into() },
            Route::About,
            Route::Feedback,
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }
}
