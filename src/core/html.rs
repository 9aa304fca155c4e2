// src/core/html.rs
// Thin helpers over `scraper` so the page specs read like the markup they walk.

use scraper::{ElementRef, Selector};

use super::sanitize::normalize_ws;

/// Compile a CSS selector. Selectors in this crate are string literals,
/// so a failure here is a typo caught by the parser tests.
pub fn sel(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}"))
}

/// Visible text of an element, whitespace collapsed and trimmed.
pub fn text_of(el: ElementRef<'_>) -> String {
    let raw: String = el.text().collect::<Vec<_>>().join(" ");
    normalize_ws(&raw)
}

/// Text of the first match of `selector` under `scope`, if any.
pub fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(text_of)
}

/// Attribute value, trimmed.
pub fn attr(el: ElementRef<'_>, name: &str) -> Option<String> {
    el.value().attr(name).map(|v| v.trim().to_string())
}

/// Non-empty text fragments in document order, each trimmed.
pub fn stripped_strings(el: ElementRef<'_>) -> Vec<String> {
    el.text()
        .map(normalize_ws)
        .filter(|t| !t.is_empty())
        .collect()
}

/// True if any class on the element starts with `prefix`.
pub fn has_class_prefix(el: ElementRef<'_>, prefix: &str) -> bool {
    el.value().classes().any(|c| c.starts_with(prefix))
}

/// Element siblings following `el`, skipping text nodes.
pub fn next_element_siblings<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.next_siblings().filter_map(ElementRef::wrap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn text_helpers_collapse_whitespace() {
        let doc = Html::parse_fragment(
            r#"<div class="a-b c"><p> Hello
                <b>big</b>   world </p><p>second</p></div>"#,
        );
        let div = doc.select(&sel("div")).next().unwrap();
        assert_eq!(text_of(div), "Hello big world second");
        assert_eq!(stripped_strings(div), vec!["Hello", "big", "world", "second"]);
        assert_eq!(first_text(div, &sel("p")).as_deref(), Some("Hello big world"));
        assert!(has_class_prefix(div, "a-"));
        assert!(!has_class_prefix(div, "b"));
    }
}
