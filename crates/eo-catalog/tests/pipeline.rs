use eo_catalog::node::Element;
use eo_catalog::render::{LINK_CAPTION, PLACEHOLDER, render_summary};
use eo_catalog::schema::{FieldSpec, SUMMARY_FIELDS};
use eo_catalog::{
    Record, RecordStore, Schema, SearchController, SearchOptions, StaticSource, ViewState,
};

const PAYLOAD: &str = r#"{
  "eos": [
    {
      "eo_number": 14001,
      "title": "Modernizing Federal Permitting",
      "summary": "Streamlines environmental review for infrastructure projects.",
      "signing_date": "2025-01-20",
      "categories": { "policy_domain": "Infrastructure" },
      "original_url": "https://example.gov/eo1"
    },
    {
      "eo_number": 14002,
      "title": "Restoring Energy Dominance",
      "summary": "Expands domestic oil and gas production.",
      "key_industries": ["Oil", "Gas"],
      "categories": { "policy_domain": "Energy" }
    },
    {
      "eo_number": 14003,
      "title": "Energy Emergency Declaration"
    },
    {
      "eo_number": 14004
    }
  ],
  "build_time": "2025-03-01T12:00:00Z"
}"#;

fn store() -> RecordStore {
    RecordStore::new(StaticSource::new("fixture", PAYLOAD))
}

fn controller(store: &RecordStore) -> SearchController<'_> {
    SearchController::new(store, SearchOptions::default(), Schema::default()).unwrap()
}

fn visible(controller: &SearchController) -> Vec<u32> {
    controller
        .entries()
        .iter()
        .map(|e| e.record.eo_number)
        .collect()
}

fn field_value<'a>(tree: &'a Element, path: &str) -> &'a Element {
    tree.find(&|e| e.attr("data-path") == Some(path))
        .and_then(|field| field.elements().nth(1))
        .unwrap_or_else(|| panic!("no rendered value for {path}"))
}

#[test]
fn placeholder_for_every_absent_text_field() {
    let store = store();
    let schema = Schema::default();
    for record in store.get().unwrap().iter() {
        let tree = eo_catalog::render::render_record(record, &schema);
        let fields = schema.summary.iter().chain(schema.details.iter());
        for field in fields.filter(|f| f.hint == eo_catalog::RenderHint::Text) {
            let rendered = field_value(&tree, field.path).text_content();
            match field.resolve(record) {
                Some(value) => assert_eq!(rendered, value),
                None => assert_eq!(rendered, PLACEHOLDER, "{} of {}", field.path, record.eo_number),
            }
        }
    }
}

#[test]
fn rendering_twice_does_not_accumulate() {
    let store = store();
    let mut controller = controller(&store);
    let first = controller.view().container().text_content();
    let count = controller.view().len();

    controller.handle_input("");
    controller.handle_input("");
    assert_eq!(controller.view().len(), count);
    assert_eq!(controller.view().container().text_content(), first);
}

#[test]
fn empty_query_restores_original_order() {
    let store = store();
    let mut controller = controller(&store);

    for query in ["energy", "permiting", "quantum", "oil gas", ""] {
        controller.handle_input(query);
    }
    assert_eq!(controller.state(), &ViewState::Unfiltered);
    assert_eq!(visible(&controller), vec![14001, 14002, 14003, 14004]);
    assert!(controller.message().is_none());
}

#[test]
fn result_message_pluralization() {
    let store = store();
    let mut controller = controller(&store);

    controller.handle_input("Permiting");
    assert_eq!(controller.message(), Some("Found 1 result for \"Permiting\""));

    controller.handle_input("energy");
    assert_eq!(controller.message(), Some("Found 2 results for \"energy\""));
    assert_eq!(visible(&controller), vec![14002, 14003]);

    controller.handle_input("Quantum Cryptography");
    assert_eq!(
        controller.message(),
        Some("Found 0 results for \"Quantum Cryptography\"")
    );
    assert!(controller.view().is_empty());
}

#[test]
fn fuzzy_tolerance() {
    let store = store();
    let mut controller = controller(&store);

    controller.handle_input("Permiting");
    assert_eq!(visible(&controller), vec![14001]);

    controller.handle_input("Quantum Cryptography");
    assert!(visible(&controller).is_empty());
}

#[test]
fn nested_category_resolution() {
    let store = store();
    let collection = store.get().unwrap();

    let with = render_summary(collection.find(14002).unwrap(), SUMMARY_FIELDS);
    assert_eq!(
        field_value(&with, "categories.policy_domain").text_content(),
        "Energy"
    );

    let without = render_summary(collection.find(14004).unwrap(), SUMMARY_FIELDS);
    assert_eq!(
        field_value(&without, "categories.policy_domain").text_content(),
        PLACEHOLDER
    );
}

#[test]
fn link_hint_uses_fixed_caption() {
    let record = Record {
        original_url: Some("https://example.gov/eo1".to_string()),
        ..Record::new(1)
    };
    let field = FieldSpec::link("Original Document", "original_url", |r| {
        r.original_url.clone()
    });
    let tree = render_summary(&record, &[field]);
    let link = field_value(&tree, "original_url");

    assert_eq!(link.tag, "a");
    assert_eq!(link.attr("href"), Some("https://example.gov/eo1"));
    assert_eq!(link.text_content(), LINK_CAPTION);
}

#[test]
fn store_is_loaded_once_and_shared() {
    let store = store();
    assert!(!store.is_loaded());
    let a = controller(&store);
    let b = controller(&store);
    assert!(store.is_loaded());
    assert!(std::ptr::eq(a.collection(), b.collection()));
}
