//! Flatten a rendered record tree into labelled text rows for the terminal.

use eo_catalog::node::Element;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: String,
    pub value: String,
    /// Link target for link-hinted fields, if non-empty
    pub target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: &'static str,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline {
    pub title: String,
    pub number: String,
    pub sections: Vec<Section>,
}

fn text_of(tree: &Element, class: &str) -> String {
    tree.find(&|e| e.has_class(class))
        .map(Element::text_content)
        .unwrap_or_default()
}

fn field(row: &Element) -> Field {
    let label = text_of(row, "eo-label");
    let value = row.elements().nth(1);
    Field {
        label,
        value: value.map(Element::text_content).unwrap_or_default(),
        target: value
            .filter(|v| v.tag == "a")
            .and_then(|v| v.attr("href"))
            .filter(|href| !href.is_empty())
            .map(str::to_string),
    }
}

fn section(tree: &Element, name: &'static str, class: &str) -> Option<Section> {
    let container = tree.find(&|e| e.has_class(class))?;
    Some(Section {
        name,
        fields: container.elements().map(field).collect(),
    })
}

/// Read back the header, summary and details of a `render_record` tree
pub fn outline(tree: &Element) -> Outline {
    Outline {
        title: text_of(tree, "eo-title"),
        number: text_of(tree, "eo-number"),
        sections: [
            section(tree, "Summary", "eo-summary"),
            section(tree, "Details", "eo-details"),
        ]
        .into_iter()
        .flatten()
        .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eo_catalog::render::render_record;
    use eo_catalog::{Record, Schema};

    #[test]
    fn test_outline_of_rendered_record() {
        let record = Record {
            title: Some("Restoring Energy Dominance".to_string()),
            summary: Some("Expands production.".to_string()),
            original_url: Some("https://example.gov/eo1".to_string()),
            ..Record::new(14002)
        };
        let outline = outline(&render_record(&record, &Schema::default()));

        assert_eq!(outline.title, "Restoring Energy Dominance");
        assert_eq!(outline.number, "EO 14002");
        assert_eq!(outline.sections.len(), 2);

        let summary = &outline.sections[0];
        let original = summary
            .fields
            .iter()
            .find(|f| f.label == "Original Document")
            .unwrap();
        assert_eq!(original.value, "Click Here");
        assert_eq!(original.target.as_deref(), Some("https://example.gov/eo1"));

        let pdf = summary.fields.iter().find(|f| f.label == "PDF Copy").unwrap();
        assert_eq!(pdf.target, None);

        let details = &outline.sections[1];
        assert_eq!(details.fields[0].label, "Summary");
        assert_eq!(details.fields[0].value, "Expands production.");
        assert_eq!(details.fields[1].value, "-");
    }
}
