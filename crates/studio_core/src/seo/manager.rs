use serde_json::Value;
use studio_logging::studio_trace;

use super::head::{DocumentHead, JSON_LD_MIME};
use super::{ResolvedSeo, SeoConfig};

/// Handle for one page's ownership of the head. Later activations supersede
/// earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Activation(u64);

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SeoSlot {
    #[default]
    Empty,
    Applied {
        activation: Activation,
        seo: ResolvedSeo,
        structured_data: Option<Value>,
    },
}

/// Sole writer of the document head.
///
/// `apply` writes every tracked tag and the page's JSON-LD node; `teardown`
/// removes the JSON-LD node but only for the activation that still owns the
/// head, so a late teardown from a previous page cannot clobber the current one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeoManager {
    head: DocumentHead,
    slot: SeoSlot,
    issued: u64,
}

impl SeoManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing head (e.g. the static `index.html` tags).
    pub fn with_head(head: DocumentHead) -> Self {
        Self {
            head,
            ..Self::default()
        }
    }

    pub fn head(&self) -> &DocumentHead {
        &self.head
    }

    pub fn slot(&self) -> &SeoSlot {
        &self.slot
    }

    pub fn active(&self) -> Option<Activation> {
        match self.slot {
            SeoSlot::Empty => None,
            SeoSlot::Applied { activation, .. } => Some(activation),
        }
    }

    pub fn apply(&mut self, config: &SeoConfig, structured_data: Option<&Value>) -> Activation {
        let seo = config.resolve();
        self.head.set_title(&seo.title);
        for (key, content) in seo.meta_tags() {
            self.head.upsert_meta(&key, &content);
        }
        if let Some(canonical) = &seo.canonical {
            self.head.upsert_link("canonical", canonical);
        }

        let removed = self.head.remove_scripts(JSON_LD_MIME);
        if removed > 0 {
            studio_trace!("removed {} previous JSON-LD node(s)", removed);
        }
        if let Some(data) = structured_data {
            self.head.append_script(JSON_LD_MIME, &data.to_string());
        }

        self.issued += 1;
        let activation = Activation(self.issued);
        studio_trace!("seo activation {:?}: {}", activation, seo.title);
        self.slot = SeoSlot::Applied {
            activation,
            seo,
            structured_data: structured_data.cloned(),
        };
        activation
    }

    /// Page deactivation. Meta tags stay for the next `apply` to overwrite.
    ///
    /// Returns `false` when `activation` no longer owns the head.
    pub fn teardown(&mut self, activation: Activation) -> bool {
        if self.active() != Some(activation) {
            studio_trace!("ignoring teardown of superseded activation {:?}", activation);
            return false;
        }
        self.head.remove_scripts(JSON_LD_MIME);
        if let SeoSlot::Applied {
            structured_data, ..
        } = &mut self.slot
        {
            *structured_data = None;
        }
        true
    }

    pub fn structured_data(&self) -> Option<&Value> {
        match &self.slot {
            SeoSlot::Applied {
                structured_data, ..
            } => structured_data.as_ref(),
            SeoSlot::Empty => None,
        }
    }
}
