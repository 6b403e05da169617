use maud::{html, Markup, PreEscaped};

/// MIME type of structured-data script nodes.
pub const JSON_LD_MIME: &str = "application/ld+json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaAttr {
    Name,
    Property,
}

impl MetaAttr {
    pub fn as_str(self) -> &'static str {
        match self {
            MetaAttr::Name => "name",
            MetaAttr::Property => "property",
        }
    }
}

/// Identity of a meta tag: `name="…"` or `property="…"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetaKey {
    pub attr: MetaAttr,
    pub value: String,
}

impl MetaKey {
    pub fn name(value: &str) -> Self {
        Self {
            attr: MetaAttr::Name,
            value: value.to_string(),
        }
    }

    pub fn property(value: &str) -> Self {
        Self {
            attr: MetaAttr::Property,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadNode {
    Meta { key: MetaKey, content: String },
    Link { rel: String, href: String },
    Script { mime: String, text: String },
}

/// In-memory model of a document `<head>`.
///
/// Meta tags and links are keyed: writing one that exists updates it in place
/// and removes any duplicates, so the head never holds two nodes for the same
/// key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentHead {
    title: String,
    nodes: Vec<HeadNode>,
}

impl DocumentHead {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        title.clone_into(&mut self.title);
    }

    pub fn nodes(&self) -> &[HeadNode] {
        &self.nodes
    }

    /// Returns `true` when the tag did not exist yet.
    pub fn upsert_meta(&mut self, key: &MetaKey, content: &str) -> bool {
        let mut seen = false;
        self.nodes.retain_mut(|node| match node {
            HeadNode::Meta {
                key: existing,
                content: existing_content,
            } if existing == key => {
                if seen {
                    return false;
                }
                seen = true;
                content.clone_into(existing_content);
                true
            }
            _ => true,
        });
        if !seen {
            self.nodes.push(HeadNode::Meta {
                key: key.clone(),
                content: content.to_string(),
            });
        }
        !seen
    }

    pub fn meta(&self, key: &MetaKey) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            HeadNode::Meta {
                key: existing,
                content,
            } if existing == key => Some(content.as_str()),
            _ => None,
        })
    }

    pub fn meta_count(&self, key: &MetaKey) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, HeadNode::Meta { key: existing, .. } if existing == key))
            .count()
    }

    /// Same keyed semantics as [`DocumentHead::upsert_meta`], keyed by `rel`.
    pub fn upsert_link(&mut self, rel: &str, href: &str) -> bool {
        let mut seen = false;
        self.nodes.retain_mut(|node| match node {
            HeadNode::Link {
                rel: existing,
                href: existing_href,
            } if existing == rel => {
                if seen {
                    return false;
                }
                seen = true;
                href.clone_into(existing_href);
                true
            }
            _ => true,
        });
        if !seen {
            self.nodes.push(HeadNode::Link {
                rel: rel.to_string(),
                href: href.to_string(),
            });
        }
        !seen
    }

    pub fn link(&self, rel: &str) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            HeadNode::Link { rel: existing, href } if existing == rel => Some(href.as_str()),
            _ => None,
        })
    }

    pub fn append_script(&mut self, mime: &str, text: &str) {
        self.nodes.push(HeadNode::Script {
            mime: mime.to_string(),
            text: text.to_string(),
        });
    }

    /// Removes every script of `mime`; returns how many were removed.
    pub fn remove_scripts(&mut self, mime: &str) -> usize {
        let before = self.nodes.len();
        self.nodes
            .retain(|node| !matches!(node, HeadNode::Script { mime: existing, .. } if existing == mime));
        before - self.nodes.len()
    }

    pub fn scripts<'a>(&'a self, mime: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.nodes.iter().filter_map(move |node| match node {
            HeadNode::Script { mime: existing, text } if existing == mime => Some(text.as_str()),
            _ => None,
        })
    }

    /// Serialize as an HTML `<head>` element.
    pub fn render(&self) -> String {
        html! {
            head {
                title { (self.title) }
                @for node in &self.nodes {
                    (render_node(node))
                }
            }
        }
        .into_string()
    }
}

fn render_node(node: &HeadNode) -> Markup {
    match node {
        HeadNode::Meta { key, content } => match key.attr {
            MetaAttr::Name => html! { meta name=(key.value) content=(content); },
            MetaAttr::Property => html! { meta property=(key.value) content=(content); },
        },
        HeadNode::Link { rel, href } => html! { link rel=(rel) href=(href); },
        // Script bodies are raw text; only a closing tag can break out of them.
        HeadNode::Script { mime, text } => html! {
            script type=(mime) { (PreEscaped(text.replace("</", "<\\/"))) }
        },
    }
}
