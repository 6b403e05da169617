//! Search-engine metadata: per-page configuration, site defaults, JSON-LD
//! builders, and the single-owner document head manager.
mod head;
mod manager;
pub mod structured;

pub use head::{DocumentHead, HeadNode, MetaAttr, MetaKey, JSON_LD_MIME};
pub use manager::{Activation, SeoManager, SeoSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OgType {
    #[default]
    Website,
    Article,
}

impl OgType {
    pub fn as_str(self) -> &'static str {
        match self {
            OgType::Website => "website",
            OgType::Article => "article",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TwitterCard {
    Summary,
    #[default]
    SummaryLargeImage,
}

impl TwitterCard {
    pub fn as_str(self) -> &'static str {
        match self {
            TwitterCard::Summary => "summary",
            TwitterCard::SummaryLargeImage => "summary_large_image",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Robots {
    IndexFollow,
    NoindexNofollow,
}

impl Robots {
    pub fn as_str(self) -> &'static str {
        match self {
            Robots::IndexFollow => "index, follow",
            Robots::NoindexNofollow => "noindex, nofollow",
        }
    }
}

/// What a page asks for. Optional fields fall back during [`SeoConfig::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeoConfig {
    pub title: String,
    pub description: String,
    pub keywords: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub og_url: Option<String>,
    pub og_type: Option<OgType>,
    pub twitter_card: Option<TwitterCard>,
    pub canonical: Option<String>,
    pub noindex: Option<bool>,
}

impl SeoConfig {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Merge every default in one place.
    pub fn resolve(&self) -> ResolvedSeo {
        // Blank overrides count as absent.
        let og_title = non_blank(&self.og_title).unwrap_or(&self.title).to_string();
        let og_description = non_blank(&self.og_description)
            .unwrap_or(&self.description)
            .to_string();
        ResolvedSeo {
            title: self.title.clone(),
            description: self.description.clone(),
            keywords: self.keywords.clone(),
            twitter_title: og_title.clone(),
            twitter_description: og_description.clone(),
            og_title,
            og_description,
            og_type: self.og_type.unwrap_or_default(),
            og_image: self.og_image.clone(),
            og_url: self.og_url.clone(),
            twitter_card: self.twitter_card.unwrap_or_default(),
            canonical: self.canonical.clone(),
            robots: if self.noindex.unwrap_or(false) {
                Robots::NoindexNofollow
            } else {
                Robots::IndexFollow
            },
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.trim().is_empty())
}

/// [`SeoConfig`] with every default applied. Optional fields here are the
/// ones whose tags are only written when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSeo {
    pub title: String,
    pub description: String,
    pub keywords: Option<String>,
    pub og_title: String,
    pub og_description: String,
    pub og_type: OgType,
    pub og_image: Option<String>,
    pub og_url: Option<String>,
    pub twitter_card: TwitterCard,
    pub twitter_title: String,
    pub twitter_description: String,
    pub canonical: Option<String>,
    pub robots: Robots,
}

impl ResolvedSeo {
    /// Tracked meta tags in document order, skipping absent optional ones.
    pub fn meta_tags(&self) -> Vec<(MetaKey, String)> {
        let mut tags = vec![(MetaKey::name("description"), self.description.clone())];
        if let Some(keywords) = &self.keywords {
            tags.push((MetaKey::name("keywords"), keywords.clone()));
        }
        tags.push((MetaKey::property("og:title"), self.og_title.clone()));
        tags.push((MetaKey::property("og:description"), self.og_description.clone()));
        tags.push((MetaKey::property("og:type"), self.og_type.as_str().to_string()));
        if let Some(image) = &self.og_image {
            tags.push((MetaKey::property("og:image"), image.clone()));
        }
        if let Some(url) = &self.og_url {
            tags.push((MetaKey::property("og:url"), url.clone()));
        }
        tags.push((
            MetaKey::name("twitter:card"),
            self.twitter_card.as_str().to_string(),
        ));
        tags.push((MetaKey::name("twitter:title"), self.twitter_title.clone()));
        tags.push((
            MetaKey::name("twitter:description"),
            self.twitter_description.clone(),
        ));
        if let Some(image) = &self.og_image {
            tags.push((MetaKey::name("twitter:image"), image.clone()));
        }
        tags.push((MetaKey::name("robots"), self.robots.as_str().to_string()));
        tags
    }
}

/// Site-wide identity used for defaults, canonical URLs, and JSON-LD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteProfile {
    pub name: String,
    /// Public origin, no trailing slash.
    pub origin: String,
    pub logo: String,
    pub tagline: String,
    pub default_title: String,
    pub default_description: String,
    pub default_keywords: String,
    pub default_og_image: String,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            name: "AI-Tracks Studio".to_string(),
            origin: "https://studio.ai-tracks.com".to_string(),
            logo: "https://studio.ai-tracks.com/logo.png".to_string(),
            tagline: "Innovative Web & Game Experiences Powered by AI".to_string(),
            default_title: "AI-Tracks Studio - Innovative Web & Game Experiences".to_string(),
            default_description: "AI-Tracks Studio creates cutting-edge web applications and games powered by artificial intelligence. Explore our portfolio of innovative projects.".to_string(),
            default_keywords: "AI, web development, game development, interactive experiences, React, TypeScript".to_string(),
            default_og_image: "https://studio.ai-tracks.com/og-image.jpg".to_string(),
        }
    }
}

impl SiteProfile {
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.origin, path.trim_start_matches('/'))
    }

    pub fn default_seo(&self) -> SeoConfig {
        SeoConfig {
            keywords: Some(self.default_keywords.clone()),
            og_type: Some(OgType::Website),
            og_image: Some(self.default_og_image.clone()),
            twitter_card: Some(TwitterCard::SummaryLargeImage),
            ..SeoConfig::new(&self.default_title, &self.default_description)
        }
    }

    /// Site defaults with a `"{title} | {site}"` title and mirrored Open Graph text.
    pub fn page_seo(&self, title: &str, description: &str) -> SeoConfig {
        let full_title = format!("{title} | {}", self.name);
        SeoConfig {
            title: full_title.clone(),
            description: description.to_string(),
            og_title: Some(full_title),
            og_description: Some(description.to_string()),
            ..self.default_seo()
        }
    }
}
