//! HTML parser for extracting searchable text and links
//!
//! This module handles parsing HTML content to extract:
//! - The visible text of the document body
//! - Every anchor `href` in document order

use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text content is never rendered
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that start a new line of rendered text
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "details", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "summary", "table", "td",
    "th", "tr", "ul",
];

/// A parsed HTML document
///
/// Parsing is lenient: malformed markup still produces a tree, the same way
/// a browser would repair it.
pub struct ParsedDocument {
    html: Html,
}

/// Parses an HTML body
///
/// # Example
///
/// ```
/// use sumi_seek::crawler::parse_document;
///
/// let doc = parse_document(r#"<html><body><p>Hello <a href="/next">world</a></p></body></html>"#);
/// assert_eq!(doc.body_text(), "Hello world");
/// assert_eq!(doc.hrefs(), vec!["/next".to_string()]);
/// ```
pub fn parse_document(body: &str) -> ParsedDocument {
    ParsedDocument {
        html: Html::parse_document(body),
    }
}

impl ParsedDocument {
    /// Returns the visible text of `<body>` with whitespace collapsed
    ///
    /// Inline elements join their text directly, so `<b>C</b>ode` reads as
    /// `Code`. Block elements are separated by whitespace. Script and style
    /// contents are skipped.
    pub fn body_text(&self) -> String {
        let Ok(body_selector) = Selector::parse("body") else {
            return String::new();
        };

        let Some(body) = self.html.select(&body_selector).next() else {
            return String::new();
        };

        let mut text = String::new();
        collect_visible_text(body, &mut text);

        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Returns the raw `href` of every `<a>` element, in document order
    pub fn hrefs(&self) -> Vec<String> {
        let Ok(a_selector) = Selector::parse("a[href]") else {
            return Vec::new();
        };

        self.html
            .select(&a_selector)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string)
            .collect()
    }

    /// Returns the page title (from `<title>`), if any
    pub fn title(&self) -> Option<String> {
        let title_selector = Selector::parse("title").ok()?;

        self.html
            .select(&title_selector)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

/// Appends the rendered text of `element` and its descendants to `out`
fn collect_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                let name = el.name();
                if HIDDEN_ELEMENTS.contains(&name) {
                    continue;
                }
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };

                let block = BLOCK_ELEMENTS.contains(&name);
                if block {
                    out.push(' ');
                }
                collect_visible_text(child_element, out);
                if block {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}
