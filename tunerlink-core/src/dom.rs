//! DOM capability interface.
//!
//! The adapter never talks to a concrete DOM. Everything it needs from the
//! page goes through [`Document`] and [`Element`]: selector queries, text and
//! attribute reads, class toggling and a simulated click. The browser binding
//! lives in `tunerlink-web`; [`memory`] provides an in-memory tree.

pub mod memory;

use crate::error::Result;

pub use memory::{ClickRecord, MemoryDocument, MemoryElement};

/// Document loading phase, as reported by `document.readyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyState {
    #[default]
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    /// Parse a `document.readyState` value. Unknown values map to `Loading`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "interactive" => Self::Interactive,
            "complete" => Self::Complete,
            _ => Self::Loading,
        }
    }

    /// Whether the DOM is ready to be queried.
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Interactive | Self::Complete)
    }
}

/// Point inside an element's box, expressed as fractions of its width and height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickPosition {
    pub x: f64,
    pub y: f64,
}

impl ClickPosition {
    /// Create a click position, clamping both fractions into `0.0..=1.0`.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
        }
    }
}

/// A DOM node handle.
///
/// Handles are cheap to clone and compare by node identity.
pub trait Element: Clone + PartialEq {
    /// Value of an attribute, `None` if it is not set.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Whether the control is disabled and must be treated as absent.
    fn is_disabled(&self) -> bool;

    /// Concatenated text of the node and its descendants.
    fn text_content(&self) -> Option<String>;

    /// Direct child nodes, text nodes included.
    fn child_nodes(&self) -> Vec<Self>;

    /// Add a class to the element's class list.
    fn add_class(&self, class: &str);
}

/// Read and write access to the page.
pub trait Document {
    type Element: Element;

    /// First element matching `selector` in document order.
    fn query_selector(&self, selector: &str) -> Option<Self::Element>;

    /// Current loading phase of the page.
    fn ready_state(&self) -> ReadyState;

    /// Simulate a user click on `element`.
    ///
    /// Without a position the click lands in the middle of the element.
    ///
    /// # Errors
    ///
    /// Returns an error if the click events could not be dispatched.
    fn click(&self, element: &Self::Element, position: Option<ClickPosition>) -> Result<()>;
}

/// Trimmed text of the first element matching `selector`.
///
/// Missing elements and whitespace-only text are both `None`.
#[must_use]
pub fn query_text<D: Document + ?Sized>(document: &D, selector: &str) -> Option<String> {
    document
        .query_selector(selector)
        .and_then(|element| element.text_content())
        .and_then(non_empty)
}

/// First non-empty text found by trying `selectors` in order.
#[must_use]
pub fn query_text_chain<D: Document + ?Sized>(document: &D, selectors: &[&str]) -> Option<String> {
    selectors
        .iter()
        .find_map(|selector| query_text(document, selector))
}

/// Attribute of the first element matching `selector`, passed through `transform`.
#[must_use]
pub fn query_attribute<D, T, F>(
    document: &D,
    selector: &str,
    attribute: &str,
    transform: F,
) -> Option<T>
where
    D: Document + ?Sized,
    F: FnOnce(&str) -> Option<T>,
{
    document
        .query_selector(selector)
        .and_then(|element| element.attribute(attribute))
        .and_then(|value| transform(&value))
}

/// Trim `text`, mapping an empty result to `None`.
pub(crate) fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == text.len() {
        Some(text)
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> MemoryDocument {
        let document = MemoryDocument::new();
        let root = document.root();
        let now_playing = root.append(MemoryElement::new("div").with_class("nowPlaying"));
        now_playing.append(
            MemoryElement::new("span")
                .with_class("title")
                .with_text("  Song  "),
        );
        now_playing.append(MemoryElement::new("span").with_class("blank").with_text("   "));
        root.append(
            MemoryElement::new("div")
                .with_class("handle")
                .with_attribute("aria-valuenow", "40"),
        );
        document
    }

    #[test]
    fn test_ready_state_parse() {
        assert_eq!(ReadyState::parse("loading"), ReadyState::Loading);
        assert_eq!(ReadyState::parse("interactive"), ReadyState::Interactive);
        assert_eq!(ReadyState::parse("complete"), ReadyState::Complete);
        assert_eq!(ReadyState::parse("bogus"), ReadyState::Loading);
    }

    #[test]
    fn test_ready_state_is_ready() {
        assert!(!ReadyState::Loading.is_ready());
        assert!(ReadyState::Interactive.is_ready());
        assert!(ReadyState::Complete.is_ready());
    }

    #[test]
    fn test_click_position_clamped() {
        let position = ClickPosition::new(1.5, -0.2);
        assert!((position.x - 1.0).abs() < f64::EPSILON);
        assert!(position.y.abs() < f64::EPSILON);
    }

    #[test]
    fn test_query_text_trims() {
        let document = page();
        assert_eq!(query_text(&document, ".nowPlaying .title"), Some("Song".to_string()));
    }

    #[test]
    fn test_query_text_blank_is_none() {
        let document = page();
        assert_eq!(query_text(&document, ".nowPlaying .blank"), None);
        assert_eq!(query_text(&document, ".missing"), None);
    }

    #[test]
    fn test_query_text_chain_falls_through() {
        let document = page();
        let text = query_text_chain(&document, &[".missing", ".nowPlaying .blank", ".title"]);
        assert_eq!(text, Some("Song".to_string()));
        assert_eq!(query_text_chain(&document, &[".missing"]), None);
    }

    #[test]
    fn test_query_attribute_transform() {
        let document = page();
        let value = query_attribute(&document, ".handle", "aria-valuenow", |raw| {
            raw.parse::<f64>().ok()
        });
        assert_eq!(value, Some(40.0));

        let missing: Option<f64> =
            query_attribute(&document, ".handle", "aria-missing", |raw| raw.parse().ok());
        assert_eq!(missing, None);
    }
}
