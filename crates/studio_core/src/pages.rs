//! Per-route head metadata, before and after the page's data arrives.
use serde_json::Value;

use crate::image::ImageUrlResolver;
use crate::model::{AboutUs, NewsItem, ProjectItem};
use crate::resource::PageData;
use crate::route::Route;
use crate::seo::structured::{self, ArticleMeta, ProductMeta};
use crate::seo::{OgType, SeoConfig, SiteProfile};

/// Search engines truncate longer descriptions.
pub const DESCRIPTION_LIMIT: usize = 160;

/// Head metadata for `route`, given the page's data if it has loaded.
pub fn seo_for(
    route: &Route,
    data: Option<&PageData>,
    site: &SiteProfile,
    images: &ImageUrlResolver,
) -> (SeoConfig, Option<Value>) {
    let canonical = site.url_for(&route.path());
    match (route, data) {
        (Route::Home, _) => (
            with_canonical(site.default_seo(), canonical),
            Some(structured::organization(site)),
        ),
        (Route::Games, _) => (
            with_canonical(
                site.page_seo(
                    "Games",
                    "Explore our collection of interactive experiences and mini-games.",
                ),
                canonical,
            ),
            None,
        ),
        (Route::Websites, _) => (
            with_canonical(
                site.page_seo(
                    "Web Demos",
                    "A showcase of responsive, high-performance web development.",
                ),
                canonical,
            ),
            None,
        ),
        (Route::News, _) => (
            with_canonical(
                site.page_seo(
                    "Latest News",
                    &format!(
                        "Insights, updates, and announcements from the {} team.",
                        site.name
                    ),
                ),
                canonical,
            ),
            None,
        ),
        (Route::Project { .. }, Some(PageData::Project(project))) => {
            project_seo(project, canonical, site, images)
        }
        (Route::Project { .. }, _) => (
            SeoConfig::new(
                format!("Loading Project | {}", site.name),
                "Loading project...",
            ),
            None,
        ),
        (Route::NewsArticle { .. }, Some(PageData::News(news))) => {
            article_seo(news, canonical, site, images)
        }
        (Route::NewsArticle { .. }, _) => (
            SeoConfig::new(
                format!("Loading Article | {}", site.name),
                "Loading article...",
            ),
            None,
        ),
        (Route::About, Some(PageData::About(about))) => {
            (about_seo(about, canonical, site, images), None)
        }
        (Route::About, _) => (
            with_canonical(
                site.page_seo(
                    "About Us",
                    "We are a passionate team dedicated to redefining web experiences through AI.",
                ),
                canonical,
            ),
            None,
        ),
        (Route::Feedback, _) => (
            with_canonical(
                site.page_seo(
                    "Contact",
                    "We'd love to hear from you! Send us a message and we'll respond as soon as possible.",
                ),
                canonical,
            ),
            None,
        ),
        (Route::NotFound { .. }, _) => (
            SeoConfig {
                noindex: Some(true),
                ..site.page_seo("Page Not Found", "The page you are looking for does not exist.")
            },
            None,
        ),
    }
}

fn with_canonical(config: SeoConfig, canonical: String) -> SeoConfig {
    SeoConfig {
        og_url: Some(canonical.clone()),
        canonical: Some(canonical),
        ..config
    }
}

fn project_seo(
    project: &ProjectItem,
    canonical: String,
    site: &SiteProfile,
    images: &ImageUrlResolver,
) -> (SeoConfig, Option<Value>) {
    let description = project
        .description
        .as_deref()
        .map(truncate_description)
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| format!("Discover {} by {}.", project.title, site.name));
    let image = project.image.as_deref().map(|name| images.resolve(Some(name)));

    let mut config = with_canonical(site.page_seo(&project.title, &description), canonical);
    config.keywords = Some(keywords(&[
        project.category.as_str().to_lowercase().as_str(),
        &project.tags().join(", "),
        &project.title,
        &site.name,
    ]));
    if image.is_some() {
        config.og_image.clone_from(&image);
    }

    let data = structured::software_application(
        site,
        &ProductMeta {
            name: &project.title,
            description: &description,
            image: image.as_deref(),
            category: project.category,
            url: project.link.as_deref().or(config.canonical.as_deref()),
        },
    );
    (config, Some(data))
}

fn article_seo(
    news: &NewsItem,
    canonical: String,
    site: &SiteProfile,
    images: &ImageUrlResolver,
) -> (SeoConfig, Option<Value>) {
    let excerpt = news.excerpt.as_deref().unwrap_or_default();
    let short = truncate_description(excerpt);
    let description = if short.is_empty() {
        format!("Read {} on {} blog.", news.title, site.name)
    } else {
        short.clone()
    };
    let image = news.image.as_deref().map(|name| images.resolve(Some(name)));

    let config = SeoConfig {
        title: format!("{} | {} News", news.title, site.name),
        description,
        keywords: Some(keywords(&["news, article, blog", &news.title, &site.name])),
        og_title: Some(news.title.clone()),
        og_description: Some(short),
        og_image: image.clone(),
        og_url: Some(canonical.clone()),
        og_type: Some(OgType::Article),
        canonical: Some(canonical),
        ..SeoConfig::default()
    };
    let data = structured::article(
        site,
        &ArticleMeta {
            title: &news.title,
            description: excerpt,
            image: image.as_deref(),
            date_published: news.date.as_deref(),
            date_modified: news.updated_at.as_deref(),
            author: news.author.as_deref(),
        },
    );
    (config, Some(data))
}

fn about_seo(
    about: &AboutUs,
    canonical: String,
    site: &SiteProfile,
    images: &ImageUrlResolver,
) -> SeoConfig {
    let title = about.title.as_deref().unwrap_or("About Us");
    let description = about
        .description
        .as_deref()
        .or(about.subtitle.as_deref())
        .map(truncate_description)
        .unwrap_or_else(|| site.default_description.clone());
    let mut config = with_canonical(site.page_seo(title, &description), canonical);
    if let Some(image) = about.image.as_deref() {
        config.og_image = Some(images.resolve(Some(image)));
    }
    config
}

fn truncate_description(text: &str) -> String {
    text.trim().chars().take(DESCRIPTION_LIMIT).collect()
}

fn keywords(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
