//! Mapping list rendering
//!
//! `ListView` is the host-independent result of rendering a mapping
//! collection: either a placeholder or one row per mapping, in backend
//! order. Hosts present it as a terminal table or as HTML.

use crate::dom::{el, Element};
use crate::mapping::Mapping;
use serde_json::Value;

/// Placeholder shown for an empty collection
pub const EMPTY_MESSAGE: &str = "No mappings found.";

/// One rendered mapping
#[derive(Debug, Clone, PartialEq)]
pub struct MappingRow {
    pub id: Option<String>,
    pub name: String,
    pub method: String,
    pub url: String,
    /// Pretty-printed request matcher
    pub request_json: String,
    /// Pretty-printed response definition
    pub response_json: String,
}

impl MappingRow {
    pub fn from_mapping(mapping: &Mapping) -> Self {
        let summary = mapping.summary();
        Self {
            id: mapping.id().map(str::to_string),
            name: mapping.display_name(),
            method: summary.method,
            url: summary.url,
            request_json: pretty_or_empty(mapping.request()),
            response_json: pretty_or_empty(mapping.response()),
        }
    }
}

/// Rendered mapping collection
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListView {
    #[default]
    Empty,
    Table(Vec<MappingRow>),
}

impl ListView {
    pub fn from_mappings(mappings: &[Mapping]) -> Self {
        if mappings.is_empty() {
            return ListView::Empty;
        }
        ListView::Table(mappings.iter().map(MappingRow::from_mapping).collect())
    }

    pub fn rows(&self) -> &[MappingRow] {
        match self {
            ListView::Empty => &[],
            ListView::Table(rows) => rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }

    /// Build the HTML presentation of the list
    pub fn to_element(&self) -> Element {
        let rows = match self {
            ListView::Empty => {
                return el("p").class("muted").text(EMPTY_MESSAGE);
            }
            ListView::Table(rows) => rows,
        };

        let head = el("thead").child(el("tr").children(
            ["Name", "API", "HTTP Method", "Request", "Response"]
                .into_iter()
                .map(|title| el("th").text(title)),
        ));

        el("table")
            .class("mocks")
            .child(head)
            .child(el("tbody").children(rows.iter().map(row_element)))
    }
}

fn row_element(row: &MappingRow) -> Element {
    let tr = match &row.id {
        Some(id) => el("tr").attr("data-id", id.as_str()),
        None => el("tr"),
    };

    tr.child(el("td").attr("title", row.name.as_str()).text(row.name.as_str()))
        .child(
            el("td")
                .class("url")
                .attr("title", row.url.as_str())
                .text(row.url.as_str()),
        )
        .child(el("td").child(el("span").class("tag").text(row.method.as_str())))
        .child(el("td").child(disclosure("Show Request", &row.request_json)))
        .child(el("td").child(disclosure("Show Response", &row.response_json)))
}

fn disclosure(label: &str, json: &str) -> Element {
    el("details")
        .child(el("summary").child(el("span").class("muted").text(label)))
        .child(el("pre").text(json))
}

/// Render a standalone HTML document around the list
pub fn render_page(view: &ListView, status: &str) -> String {
    let document = el("html")
        .attr("lang", "en")
        .child(
            el("head")
                .child(el("meta").attr("charset", "UTF-8"))
                .child(
                    el("meta")
                        .attr("name", "viewport")
                        .attr("content", "width=device-width, initial-scale=1.0"),
                )
                .child(el("title").text("Stubdeck Mappings"))
                .child(el("style").markup(PAGE_STYLE)),
        )
        .child(
            el("body")
                .child(el("header").child(el("h1").text("Stubdeck Mappings")))
                .child(el("div").id("status").class("status").text(status))
                .child(el("main").id("list").child(view.to_element())),
        );

    format!("<!DOCTYPE html>\n{}", document.render())
}

/// Pretty-print JSON with two-space indentation
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn pretty_or_empty(value: Option<&Value>) -> String {
    match value {
        Some(value) => pretty_json(value),
        None => "{}".to_string(),
    }
}

const PAGE_STYLE: &str = r#"
* { box-sizing: border-box; }
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: #fafafa;
    color: #333;
    margin: 0;
    font-size: 14px;
}
header {
    background: #fff;
    border-bottom: 1px solid #e0e0e0;
    padding: 0.75rem 1rem;
}
h1 { font-size: 1.1rem; font-weight: 600; margin: 0; }
.status { padding: 0.5rem 1rem; color: #666; font-size: 0.85rem; }
main { padding: 0 1rem 1rem; }
.muted { color: #666; }
table.mocks { width: 100%; border-collapse: collapse; background: #fff; }
table.mocks th, table.mocks td {
    text-align: left;
    vertical-align: top;
    padding: 0.5rem;
    border-bottom: 1px solid #f0f0f0;
}
table.mocks th { font-weight: 500; color: #666; background: #fafafa; }
td.url { white-space: nowrap; overflow: hidden; text-overflow: ellipsis; max-width: 60ch; }
.tag {
    font-family: ui-monospace, monospace;
    font-size: 0.75rem;
    padding: 0.1rem 0.4rem;
    border-radius: 3px;
    background: #eff6ff;
    color: #1d4ed8;
}
pre {
    margin-top: 8px;
    background: #f5f5f5;
    padding: 0.5rem;
    border-radius: 4px;
    overflow: auto;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mappings(values: Vec<Value>) -> Vec<Mapping> {
        values
            .into_iter()
            .map(|v| Mapping::from_value(v).unwrap())
            .collect()
    }

    #[test]
    fn test_empty_collection_shows_placeholder() {
        let view = ListView::from_mappings(&[]);
        assert_eq!(view, ListView::Empty);
        assert_eq!(
            view.to_element().render(),
            r#"<p class="muted">No mappings found.</p>"#
        );
    }

    #[test]
    fn test_rows_keep_backend_order() {
        let view = ListView::from_mappings(&mappings(vec![
            json!({ "id": "b", "request": { "url": "/z" } }),
            json!({ "id": "a", "request": { "url": "/a" } }),
        ]));

        let ids: Vec<_> = view.rows().iter().map(|r| r.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("b"), Some("a")]);
    }

    #[test]
    fn test_row_summary_and_json() {
        let view = ListView::from_mappings(&mappings(vec![json!({
            "id": "m1",
            "request": { "method": "POST", "urlPattern": "/foo/.*" },
            "response": { "status": 201 }
        })]));

        let row = &view.rows()[0];
        assert_eq!(row.method, "POST");
        assert_eq!(row.url, "regex:/foo/.*");
        assert_eq!(row.name, "POST regex:/foo/.*");
        assert_eq!(
            row.request_json,
            "{\n  \"method\": \"POST\",\n  \"urlPattern\": \"/foo/.*\"\n}"
        );
        assert_eq!(row.response_json, "{\n  \"status\": 201\n}");
    }

    #[test]
    fn test_missing_request_renders_empty_object() {
        let view = ListView::from_mappings(&mappings(vec![json!({ "id": "x" })]));
        assert_eq!(view.rows()[0].request_json, "{}");
        assert_eq!(view.rows()[0].response_json, "{}");
    }

    #[test]
    fn test_html_escapes_user_text() {
        let view = ListView::from_mappings(&mappings(vec![json!({
            "id": "m1",
            "name": "<b>bold</b>",
            "request": { "url": "/a?x=1&y=2" },
            "response": { "body": "<html>" }
        })]));

        let table = view.to_element();
        let html = table.render();
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(html.contains("/a?x=1&amp;y=2"));
        assert!(html.contains("&lt;html&gt;"));
        assert!(!html.contains("<b>bold"));

        let rows = table.find_all("tr");
        // Header row plus one mapping row
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get_attr("data-id"), Some("m1"));
    }

    #[test]
    fn test_render_page_contains_status() {
        let html = render_page(&ListView::Empty, "Loaded 0 mappings");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<div id="status" class="status">Loaded 0 mappings</div>"#));
        assert!(html.contains(EMPTY_MESSAGE));
    }
}
