//! schema.org JSON-LD payloads.
use serde_json::{json, Map, Value};

use super::SiteProfile;
use crate::model::Category;

pub fn organization(site: &SiteProfile) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": site.name,
        "url": site.origin,
        "logo": site.logo,
        "description": site.tagline,
        "sameAs": [],
    })
}

#[derive(Debug, Clone, Copy)]
pub struct ArticleMeta<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub image: Option<&'a str>,
    pub date_published: Option<&'a str>,
    pub date_modified: Option<&'a str>,
    pub author: Option<&'a str>,
}

pub fn article(site: &SiteProfile, meta: &ArticleMeta<'_>) -> Value {
    let mut value = json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": meta.title,
        "description": meta.description,
        "author": {
            "@type": "Person",
            "name": meta.author.unwrap_or(&site.name),
        },
        "publisher": {
            "@type": "Organization",
            "name": site.name,
            "logo": {
                "@type": "ImageObject",
                "url": site.logo,
            },
        },
    });
    if let Value::Object(map) = &mut value {
        insert_opt(map, "image", meta.image);
        insert_opt(map, "datePublished", meta.date_published);
        insert_opt(
            map,
            "dateModified",
            meta.date_modified.or(meta.date_published),
        );
    }
    value
}

#[derive(Debug, Clone, Copy)]
pub struct ProductMeta<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub image: Option<&'a str>,
    pub category: Category,
    pub url: Option<&'a str>,
}

/// Games and web demos are published as free `SoftwareApplication`s.
pub fn software_application(site: &SiteProfile, meta: &ProductMeta<'_>) -> Value {
    let application_category = match meta.category {
        Category::Game => "GameApplication",
        Category::Website => "WebApplication",
    };
    let mut value = json!({
        "@context": "https://schema.org",
        "@type": "SoftwareApplication",
        "name": meta.name,
        "description": meta.description,
        "applicationCategory": application_category,
        "offers": {
            "@type": "Offer",
            "price": "0",
            "priceCurrency": "USD",
            "availability": "https://schema.org/InStock",
        },
        "author": organization(site),
    });
    if let Value::Object(map) = &mut value {
        insert_opt(map, "image", meta.image);
        insert_opt(map, "url", meta.url);
    }
    value
}

fn insert_opt(map: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        map.insert(key.to_string(), Value::String(value.to_string()));
    }
}
