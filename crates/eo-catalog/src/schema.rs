//! Declarative field tables driving the renderer and the search index.
//!
//! Each entry pairs a display label with a typed accessor. The dotted `path`
//! names the payload field the accessor reads; it is metadata for listings
//! and is never parsed at runtime.

use crate::record::{Categories, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderHint {
    Text,
    /// Rendered as a hyperlink with a fixed caption
    Link,
}

impl RenderHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderHint::Text => "text",
            RenderHint::Link => "link",
        }
    }
}

pub type Accessor = fn(&Record) -> Option<String>;

#[derive(Clone, Copy)]
pub struct FieldSpec {
    pub label: &'static str,
    pub path: &'static str,
    pub hint: RenderHint,
    pub value: Accessor,
}

impl FieldSpec {
    pub const fn text(label: &'static str, path: &'static str, value: Accessor) -> Self {
        Self {
            label,
            path,
            hint: RenderHint::Text,
            value,
        }
    }

    pub const fn link(label: &'static str, path: &'static str, value: Accessor) -> Self {
        Self {
            label,
            path,
            hint: RenderHint::Link,
            value,
        }
    }

    pub fn resolve(&self, record: &Record) -> Option<String> {
        (self.value)(record)
    }
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("label", &self.label)
            .field("path", &self.path)
            .field("hint", &self.hint)
            .finish()
    }
}

/// Summary and detail tables used by the renderer
#[derive(Debug, Clone)]
pub struct Schema {
    pub summary: Vec<FieldSpec>,
    pub details: Vec<FieldSpec>,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            summary: SUMMARY_FIELDS.to_vec(),
            details: DETAIL_FIELDS.to_vec(),
        }
    }
}

fn text(value: &Option<String>) -> Option<String> {
    value.clone()
}

fn nested(record: &Record, field: fn(&Categories) -> &Option<String>) -> Option<String> {
    record.categories.as_ref().and_then(|c| field(c).clone())
}

fn date(value: &Option<crate::record::DateValue>) -> Option<String> {
    value.as_ref().map(ToString::to_string)
}

/// Empty lists count as absent
fn list(value: &Option<crate::record::TextList>) -> Option<String> {
    value
        .as_ref()
        .filter(|l| !l.is_empty())
        .map(ToString::to_string)
}

pub const SUMMARY_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Publication Date", "publication_date", |r| date(&r.publication_date)),
    FieldSpec::text("Signing Date", "signing_date", |r| date(&r.signing_date)),
    FieldSpec::text("Effective Date", "effective_date", |r| date(&r.effective_date)),
    FieldSpec::text("Expiration Date", "expiration_date", |r| date(&r.expiration_date)),
    FieldSpec::link("Original Document", "original_url", |r| text(&r.original_url)),
    FieldSpec::link("PDF Copy", "pdf_file", |r| text(&r.pdf_file)),
    FieldSpec::text("Generated", "timestamp", |r| date(&r.timestamp)),
    FieldSpec::text("Policy Domain", "categories.policy_domain", |r| {
        nested(r, |c| &c.policy_domain)
    }),
    FieldSpec::text("Regulatory Impact", "categories.regulatory_impact", |r| {
        nested(r, |c| &c.regulatory_impact)
    }),
    FieldSpec::text(
        "Constitutional Authority",
        "categories.constitutional_authority",
        |r| nested(r, |c| &c.constitutional_authority),
    ),
    FieldSpec::text("Duration", "categories.duration", |r| {
        nested(r, |c| &c.duration)
    }),
    FieldSpec::text("Scope of Impact", "categories.scope_of_impact", |r| {
        nested(r, |c| &c.scope_of_impact)
    }),
    FieldSpec::text("Political Context", "categories.political_context", |r| {
        nested(r, |c| &c.political_context)
    }),
    FieldSpec::text("Legal Framework", "categories.legal_framework", |r| {
        nested(r, |c| &c.legal_framework)
    }),
    FieldSpec::text(
        "Budgetary Implications",
        "categories.budgetary_implications",
        |r| nested(r, |c| &c.budgetary_implications),
    ),
    FieldSpec::text(
        "Implementation Timeline",
        "categories.implementation_timeline",
        |r| nested(r, |c| &c.implementation_timeline),
    ),
    FieldSpec::text("Precedential Value", "categories.precedential_value", |r| {
        nested(r, |c| &c.precedential_value)
    }),
];

pub const DETAIL_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Summary", "summary", |r| text(&r.summary)),
    FieldSpec::text("Purpose", "purpose", |r| text(&r.purpose)),
    FieldSpec::text("Economic Effects", "economic_effects", |r| {
        text(&r.economic_effects)
    }),
    FieldSpec::text("Geopolitical Effects", "geopolitical_effects", |r| {
        text(&r.geopolitical_effects)
    }),
    FieldSpec::text("Deeper Dive", "deeper_dive", |r| text(&r.deeper_dive)),
    FieldSpec::text("Positive Impacts", "positive_impacts", |r| {
        list(&r.positive_impacts)
    }),
    FieldSpec::text("Negative Impacts", "negative_impacts", |r| {
        list(&r.negative_impacts)
    }),
    FieldSpec::text("Key Industries", "key_industries", |r| {
        list(&r.key_industries)
    }),
];
