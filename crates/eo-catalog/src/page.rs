//! Static HTML page around the controller's current view.

use crate::controller::{SearchController, ViewState};
use crate::node::{Element, el};

pub const DEFAULT_PAGE_TITLE: &str = "Executive Orders";

const STYLE: &str = "\
body { font-family: sans-serif; max-width: 60rem; margin: 0 auto; padding: 1rem; }
#search { width: 100%; font-size: 1.1rem; padding: 0.4rem; }
.eo { border-top: 1px solid #ccc; padding: 1rem 0; }
.eo-label { font-weight: bold; margin-right: 0.5rem; }
.eo-number, #build-time, #result-count { color: #666; }";

/// Page chrome: heading, build time, search box and result message
fn chrome(controller: &SearchController, title: &str) -> Element {
    let query = match controller.state() {
        ViewState::Filtered { query } => query.clone(),
        ViewState::Unfiltered => String::new(),
    };

    el("header", [("class", "eo-page-header")])
        .with_child(Element::new("h1").with_text(title))
        .with_child(
            el("p", [("id", "build-time")])
                .with_text(controller.build_time_label().unwrap_or_default()),
        )
        .with_child(el(
            "input",
            [
                ("id", "search"),
                ("type", "search"),
                ("placeholder", "Search executive orders"),
                ("value", query.as_str()),
            ],
        ))
        .with_child(
            el("p", [("id", "result-count")])
                .with_text(controller.message().unwrap_or_default()),
        )
}

/// Complete HTML document with `#search`, `#build-time`, `#result-count`
/// and the `#eos` list container.
pub fn render_page(controller: &SearchController, title: &str) -> String {
    let head = Element::new("head")
        .with_child(el("meta", [("charset", "utf-8")]))
        .with_child(el(
            "meta",
            [
                ("name", "viewport"),
                ("content", "width=device-width, initial-scale=1"),
            ],
        ))
        .with_child(Element::new("title").with_text(title))
        .with_child(Element::new("style").with_text(STYLE));

    let body = Element::new("body")
        .with_child(chrome(controller, title))
        .with_child(Element::new("main").with_child(controller.view().container().clone()));

    let html = el("html", [("lang", "en")])
        .with_child(head)
        .with_child(body);

    format!("<!DOCTYPE html>\n{}\n", html.to_html())
}
