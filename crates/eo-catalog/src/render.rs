//! Projection of records into element trees.
//!
//! Every function here is pure: it builds a fresh detached tree from a
//! record and a field table. [`ListView`] is the only stateful piece and its
//! `render_list` always replaces the container's children wholesale.

use crate::node::{Element, el};
use crate::record::Record;
use crate::schema::{FieldSpec, RenderHint, Schema};

/// Shown wherever a value is absent
pub const PLACEHOLDER: &str = "-";

/// Caption for link-hinted fields, independent of the target
pub const LINK_CAPTION: &str = "Click Here";

pub fn or_placeholder(value: Option<String>) -> String {
    value.unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Title as a self-link keyed by the record number, plus an "EO n" line
pub fn render_header(record: &Record) -> Element {
    let anchor = record.anchor_id();
    let title = el("h1", [("class", "eo-title")]).with_child(
        el("a", [("id", anchor.clone()), ("href", format!("#{anchor}"))])
            .with_text(or_placeholder(record.title.clone())),
    );
    let subtitle =
        el("p", [("class", "eo-number")]).with_text(format!("EO {}", record.eo_number));

    el("div", [("class", "eo-header")])
        .with_child(title)
        .with_child(subtitle)
}

fn label(field: &FieldSpec) -> Element {
    Element::new("p").with_child(el("span", [("class", "eo-label")]).with_text(field.label))
}

fn value(field: &FieldSpec, record: &Record) -> Element {
    match field.hint {
        RenderHint::Link => el(
            "a",
            [
                ("class", "eo-link".to_string()),
                ("href", field.resolve(record).unwrap_or_default()),
            ],
        )
        .with_text(LINK_CAPTION),
        RenderHint::Text => {
            el("span", [("class", "eo-value")]).with_text(or_placeholder(field.resolve(record)))
        }
    }
}

pub fn render_summary(record: &Record, fields: &[FieldSpec]) -> Element {
    let mut summary = el("div", [("class", "eo-summary")]);
    for field in fields {
        summary.append(
            el("div", [("class", "eo-field"), ("data-path", field.path)])
                .with_child(label(field))
                .with_child(value(field, record)),
        );
    }
    summary
}

pub fn render_details(record: &Record, fields: &[FieldSpec]) -> Element {
    let mut details = el("div", [("class", "eo-details")]);
    for field in fields {
        details.append(
            el("div", [("class", "eo-detail"), ("data-path", field.path)])
                .with_child(label(field))
                .with_child(value(field, record)),
        );
    }
    details
}

/// Header, summary and details for one record
pub fn render_record(record: &Record, schema: &Schema) -> Element {
    el(
        "div",
        [
            ("class", "eo".to_string()),
            ("data-eo", record.eo_number.to_string()),
        ],
    )
    .with_child(render_header(record))
    .with_child(render_summary(record, &schema.summary))
    .with_child(render_details(record, &schema.details))
}

/// The container the record list is rendered into
#[derive(Debug, Clone)]
pub struct ListView {
    container: Element,
    schema: Schema,
}

impl ListView {
    pub fn new(id: &str, schema: Schema) -> Self {
        Self {
            container: el("div", [("id", id)]),
            schema,
        }
    }

    /// Replace the container contents with one node per record, in order
    pub fn render_list<'r>(&mut self, records: impl IntoIterator<Item = &'r Record>) {
        self.container.clear();
        for record in records {
            self.container.append(render_record(record, &self.schema));
        }
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of rendered entries
    pub fn len(&self) -> usize {
        self.container.elements().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
