//! Queryable document tree
//!
//! Flat element list built from the scanner's token stream, exposing the
//! capability set the analyzer needs: title text, has-element, element
//! counting, and attribute presence checks. Nesting is irrelevant to every
//! rule, so no hierarchy is kept.

use crate::html::scanner::{self, Token};

/// An element found in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Tag name, lowercased.
    pub name: String,
    attributes: Vec<(String, Option<String>)>,
}

impl Element {
    /// Whether the attribute is present at all, with or without a value.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|(n, _)| n == name)
    }

    /// Attribute value. Bare attributes (`defer`) yield an empty string.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }
}

/// Parsed document, queryable but inert.
///
/// Rebuilt from scratch on every analysis run; nothing here outlives one
/// render cycle.
#[derive(Debug, Clone, Default)]
pub struct DocumentTree {
    elements: Vec<Element>,
    title: Option<String>,
}

impl DocumentTree {
    /// Scan markup and collect its elements in document order.
    pub fn parse(content: &str) -> Self {
        let mut elements = Vec::new();
        let mut title: Option<String> = None;
        let mut in_title = false;

        for token in scanner::scan(content) {
            match token {
                Token::Open(tag) => {
                    if tag.name == "title" && !tag.self_closing && title.is_none() {
                        in_title = true;
                    }
                    elements.push(Element {
                        name: tag.name,
                        attributes: tag
                            .attributes
                            .into_iter()
                            .map(|a| (a.name, a.value))
                            .collect(),
                    });
                }
                Token::Close(name) => {
                    if in_title && name == "title" {
                        in_title = false;
                        // An empty <title></title> still counts as present
                        title.get_or_insert_with(String::new);
                    }
                }
                Token::Text(text) => {
                    if in_title {
                        title.get_or_insert_with(String::new).push_str(&text);
                    }
                }
            }
        }

        Self { elements, title }
    }

    /// Text of the first `<title>` element, if one was closed.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Whether any element with this tag name exists.
    pub fn has_element(&self, name: &str) -> bool {
        self.elements.iter().any(|e| e.name == name)
    }

    /// Total number of elements in the document.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// All elements with the given tag name, in document order.
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements.iter().filter(move |e| e.name == name)
    }

    /// Count of elements matching a predicate.
    pub fn count_matching(&self, pred: impl Fn(&Element) -> bool) -> usize {
        self.elements.iter().filter(|&e| pred(e)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_text() {
        let tree = DocumentTree::parse("<head><title>My Page</title></head>");
        assert_eq!(tree.title(), Some("My Page"));
    }

    #[test]
    fn test_empty_title_is_present_but_empty() {
        let tree = DocumentTree::parse("<title></title>");
        assert_eq!(tree.title(), Some(""));
    }

    #[test]
    fn test_unclosed_title_is_absent() {
        let tree = DocumentTree::parse("<title>never closed");
        assert_eq!(tree.title(), None);
    }

    #[test]
    fn test_first_title_wins() {
        let tree = DocumentTree::parse("<title>first</title><title>second</title>");
        assert_eq!(tree.title(), Some("first"));
    }

    #[test]
    fn test_attribute_queries() {
        let tree = DocumentTree::parse(r#"<img src="a.png"><img src="b.png" alt="">"#);

        let imgs: Vec<_> = tree.elements_named("img").collect();
        assert_eq!(imgs.len(), 2);
        assert!(!imgs[0].has_attr("alt"));
        assert!(imgs[1].has_attr("alt"));
        assert_eq!(imgs[1].attr("alt"), Some(""));
    }

    #[test]
    fn test_count_matching() {
        let tree = DocumentTree::parse(
            r#"<script src="a.js"></script><script>inline()</script><script src="b.js"></script>"#,
        );

        let external = tree.count_matching(|e| e.name == "script" && e.has_attr("src"));
        assert_eq!(external, 2);
    }

    #[test]
    fn test_element_count_ignores_close_tags() {
        let tree = DocumentTree::parse("<div><p>x</p></div>");
        assert_eq!(tree.element_count(), 2);
    }
}
