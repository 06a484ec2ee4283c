//! In-memory DOM tree implementing the [`Document`] capability interface.
//!
//! Supports element and text nodes, attributes (the class list lives in the
//! `class` attribute), and a selector engine for descendant combinators over
//! compound selectors: `tag`, `.class`, `[attr]` and `[attr=value]`.
//! Clicks are recorded instead of dispatched.

use super::{ClickPosition, Document, Element, ReadyState};
use crate::error::Result;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

enum NodeKind {
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
    },
    Text(String),
}

struct Node {
    kind: NodeKind,
    children: Vec<MemoryElement>,
}

/// Shared handle to a node of a [`MemoryDocument`].
///
/// Clones refer to the same node; equality is node identity.
#[derive(Clone)]
pub struct MemoryElement {
    node: Arc<Mutex<Node>>,
}

impl MemoryElement {
    /// Create a detached element node.
    pub fn new(tag: impl Into<String>) -> Self {
        Self::from_kind(NodeKind::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
        })
    }

    /// Create a detached text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::from_kind(NodeKind::Text(text.into()))
    }

    fn from_kind(kind: NodeKind) -> Self {
        Self {
            node: Arc::new(Mutex::new(Node {
                kind,
                children: Vec::new(),
            })),
        }
    }

    /// Builder: add a class.
    #[must_use]
    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Builder: set an attribute.
    #[must_use]
    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder: append a text child.
    #[must_use]
    pub fn with_text(self, text: &str) -> Self {
        self.append(Self::text(text));
        self
    }

    /// Append `child` and return it.
    pub fn append(&self, child: Self) -> Self {
        lock(&self.node).children.push(child.clone());
        child
    }

    /// Remove every child node.
    pub fn clear_children(&self) {
        lock(&self.node).children.clear();
    }

    /// Replace all children with a single text node.
    pub fn set_text(&self, text: &str) {
        let mut node = lock(&self.node);
        node.children.clear();
        node.children.push(Self::text(text));
    }

    /// Set an attribute. No-op on text nodes.
    pub fn set_attribute(&self, name: &str, value: &str) {
        if let NodeKind::Element { attributes, .. } = &mut lock(&self.node).kind {
            attributes.insert(name.to_string(), value.to_string());
        }
    }

    /// Remove an attribute.
    pub fn remove_attribute(&self, name: &str) {
        if let NodeKind::Element { attributes, .. } = &mut lock(&self.node).kind {
            attributes.remove(name);
        }
    }

    /// Tag name, `None` for text nodes.
    #[must_use]
    pub fn tag(&self) -> Option<String> {
        match &lock(&self.node).kind {
            NodeKind::Element { tag, .. } => Some(tag.clone()),
            NodeKind::Text(_) => None,
        }
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    fn is_element(&self) -> bool {
        matches!(lock(&self.node).kind, NodeKind::Element { .. })
    }

    fn children(&self) -> Vec<Self> {
        lock(&self.node).children.clone()
    }
}

impl PartialEq for MemoryElement {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &lock(&self.node).kind {
            NodeKind::Element { tag, attributes } => f
                .debug_struct("MemoryElement")
                .field("tag", tag)
                .field("attributes", attributes)
                .finish_non_exhaustive(),
            NodeKind::Text(text) => f.debug_tuple("MemoryText").field(text).finish(),
        }
    }
}

impl Element for MemoryElement {
    fn attribute(&self, name: &str) -> Option<String> {
        match &lock(&self.node).kind {
            NodeKind::Element { attributes, .. } => attributes.get(name).cloned(),
            NodeKind::Text(_) => None,
        }
    }

    fn is_disabled(&self) -> bool {
        self.attribute("disabled").is_some()
    }

    fn text_content(&self) -> Option<String> {
        let children = {
            let node = lock(&self.node);
            if let NodeKind::Text(text) = &node.kind {
                return Some(text.clone());
            }
            node.children.clone()
        };
        Some(
            children
                .iter()
                .filter_map(Element::text_content)
                .collect::<String>(),
        )
    }

    fn child_nodes(&self) -> Vec<Self> {
        self.children()
    }

    fn add_class(&self, class: &str) {
        if self.has_class(class) {
            return;
        }
        if let NodeKind::Element { attributes, .. } = &mut lock(&self.node).kind {
            let classes = attributes.entry("class".to_string()).or_default();
            if !classes.is_empty() {
                classes.push(' ');
            }
            classes.push_str(class);
        }
    }
}

/// A recorded simulated click.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickRecord {
    pub element: MemoryElement,
    pub position: Option<ClickPosition>,
}

/// In-memory page. Clones share the same tree, ready state and click log.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    root: MemoryElement,
    ready_state: Arc<Mutex<ReadyState>>,
    clicks: Arc<Mutex<Vec<ClickRecord>>>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Create an empty, fully loaded page with a `body` root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: MemoryElement::new("body"),
            ready_state: Arc::new(Mutex::new(ReadyState::Complete)),
            clicks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Builder: start in the given loading phase.
    #[must_use]
    pub fn with_ready_state(self, state: ReadyState) -> Self {
        self.set_ready_state(state);
        self
    }

    #[must_use]
    pub fn root(&self) -> MemoryElement {
        self.root.clone()
    }

    pub fn set_ready_state(&self, state: ReadyState) {
        *lock(&self.ready_state) = state;
    }

    /// Clicks recorded so far, oldest first.
    #[must_use]
    pub fn clicks(&self) -> Vec<ClickRecord> {
        lock(&self.clicks).clone()
    }

    /// Drain the click log.
    pub fn take_clicks(&self) -> Vec<ClickRecord> {
        std::mem::take(&mut *lock(&self.clicks))
    }
}

impl Document for MemoryDocument {
    type Element = MemoryElement;

    fn query_selector(&self, selector: &str) -> Option<MemoryElement> {
        let selector = Selector::parse(selector)?;
        let mut ancestors = Vec::new();
        find_first(&self.root, &mut ancestors, &selector)
    }

    fn ready_state(&self) -> ReadyState {
        *lock(&self.ready_state)
    }

    fn click(&self, element: &MemoryElement, position: Option<ClickPosition>) -> Result<()> {
        lock(&self.clicks).push(ClickRecord {
            element: element.clone(),
            position,
        });
        Ok(())
    }
}

fn find_first(
    node: &MemoryElement,
    ancestors: &mut Vec<MemoryElement>,
    selector: &Selector,
) -> Option<MemoryElement> {
    if node.is_element() && selector.matches(node, ancestors) {
        return Some(node.clone());
    }
    ancestors.push(node.clone());
    for child in node.children() {
        if let Some(found) = find_first(&child, ancestors, selector) {
            return Some(found);
        }
    }
    ancestors.pop();
    None
}

#[derive(Debug, Default)]
struct Compound {
    tag: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

impl Compound {
    fn parse(input: &str) -> Option<Self> {
        let mut compound = Self::default();
        let mut rest = input;

        let tag_end = rest.find(['.', '[']).unwrap_or(rest.len());
        if tag_end > 0 {
            compound.tag = Some(rest[..tag_end].to_ascii_lowercase());
        }
        rest = &rest[tag_end..];

        while !rest.is_empty() {
            if let Some(after_dot) = rest.strip_prefix('.') {
                let end = after_dot.find(['.', '[']).unwrap_or(after_dot.len());
                if end == 0 {
                    return None;
                }
                compound.classes.push(after_dot[..end].to_string());
                rest = &after_dot[end..];
            } else if let Some(after_bracket) = rest.strip_prefix('[') {
                let end = after_bracket.find(']')?;
                let body = &after_bracket[..end];
                let attribute = match body.split_once('=') {
                    Some((name, value)) => (
                        name.trim().to_string(),
                        Some(value.trim().trim_matches(['"', '\'']).to_string()),
                    ),
                    None => (body.trim().to_string(), None),
                };
                compound.attributes.push(attribute);
                rest = &after_bracket[end + 1..];
            } else {
                return None;
            }
        }
        Some(compound)
    }

    fn matches(&self, element: &MemoryElement) -> bool {
        if let Some(tag) = &self.tag {
            if element.tag().as_deref() != Some(tag.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|class| element.has_class(class))
            && self.attributes.iter().all(|(name, expected)| {
                match (element.attribute(name), expected) {
                    (Some(actual), Some(expected)) => &actual == expected,
                    (Some(_), None) => true,
                    (None, _) => false,
                }
            })
    }
}

/// Compound selectors joined by descendant combinators.
#[derive(Debug)]
struct Selector {
    compounds: Vec<Compound>,
}

impl Selector {
    fn parse(input: &str) -> Option<Self> {
        let compounds = input
            .split_whitespace()
            .map(Compound::parse)
            .collect::<Option<Vec<_>>>()?;
        if compounds.is_empty() {
            return None;
        }
        Some(Self { compounds })
    }

    /// `ancestors` runs from the root down to the element's parent.
    fn matches(&self, element: &MemoryElement, ancestors: &[MemoryElement]) -> bool {
        let Some((last, rest)) = self.compounds.split_last() else {
            return false;
        };
        if !last.matches(element) {
            return false;
        }
        let mut remaining = rest.iter().rev().peekable();
        for ancestor in ancestors.iter().rev() {
            match remaining.peek() {
                Some(compound) if compound.matches(ancestor) => {
                    remaining.next();
                }
                Some(_) => {}
                None => break,
            }
        }
        remaining.peek().is_none()
    }
}
