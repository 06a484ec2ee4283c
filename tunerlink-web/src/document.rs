//! [`Document`] implementation over the live browser DOM.

use crate::geometry::{client_point, ClientRect};
use js_sys::Reflect;
use tracing::{debug, warn};
use tunerlink_core::{ClickPosition, CoreError, Document, Element, ReadyState, Result};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{MouseEvent, MouseEventInit, Node};

const LOG_TARGET_DOM: &str = "tunerlink::dom";

/// Mouse events dispatched for one simulated click, in order.
const CLICK_SEQUENCE: [&str; 4] = ["mouseover", "mousedown", "mouseup", "click"];

/// The page's `document`.
#[derive(Debug, Clone)]
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    #[must_use]
    pub const fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// The current window's document, if any.
    #[must_use]
    pub fn from_window() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }

    #[must_use]
    pub const fn inner(&self) -> &web_sys::Document {
        &self.document
    }
}

/// A DOM node handle. Text nodes are included so the duration display's
/// children can be read.
#[derive(Debug, Clone)]
pub struct WebElement {
    node: Node,
}

impl WebElement {
    fn as_element(&self) -> Option<&web_sys::Element> {
        self.node.dyn_ref::<web_sys::Element>()
    }

    fn describe(&self) -> String {
        self.as_element()
            .map_or_else(|| self.node.node_name(), |element| element.tag_name().to_lowercase())
    }
}

impl PartialEq for WebElement {
    fn eq(&self, other: &Self) -> bool {
        self.node.is_same_node(Some(&other.node))
    }
}

impl Element for WebElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.as_element()?.get_attribute(name)
    }

    fn is_disabled(&self) -> bool {
        let property = Reflect::get(&self.node, &JsValue::from_str("disabled"))
            .ok()
            .and_then(|value| value.as_bool())
            .unwrap_or(false);
        property
            || self
                .as_element()
                .is_some_and(|element| element.has_attribute("disabled"))
    }

    fn text_content(&self) -> Option<String> {
        self.node.text_content()
    }

    fn child_nodes(&self) -> Vec<Self> {
        let children = self.node.child_nodes();
        (0..children.length())
            .filter_map(|index| children.item(index))
            .map(|node| Self { node })
            .collect()
    }

    fn add_class(&self, class: &str) {
        let Some(element) = self.as_element() else {
            return;
        };
        if let Err(e) = element.class_list().add_1(class) {
            warn!(target: LOG_TARGET_DOM, "Failed to add class {}: {:?}", class, e);
        }
    }
}

impl Document for WebDocument {
    type Element = WebElement;

    fn query_selector(&self, selector: &str) -> Option<WebElement> {
        match self.document.query_selector(selector) {
            Ok(found) => found.map(|element| WebElement {
                node: element.into(),
            }),
            Err(e) => {
                debug!(target: LOG_TARGET_DOM, "Bad selector {:?}: {:?}", selector, e);
                None
            }
        }
    }

    fn ready_state(&self) -> ReadyState {
        Reflect::get(&self.document, &JsValue::from_str("readyState"))
            .ok()
            .and_then(|value| value.as_string())
            .map_or(ReadyState::Loading, |value| ReadyState::parse(&value))
    }

    fn click(&self, element: &WebElement, position: Option<ClickPosition>) -> Result<()> {
        let Some(target) = element.as_element() else {
            return Err(CoreError::ClickFailed {
                control: element.describe(),
                reason: "not an element".to_string(),
            });
        };
        let bounds = target.get_bounding_client_rect();
        let (client_x, client_y) = client_point(
            ClientRect {
                left: bounds.left(),
                top: bounds.top(),
                width: bounds.width(),
                height: bounds.height(),
            },
            position,
        );

        let fail = |e: JsValue| CoreError::ClickFailed {
            control: element.describe(),
            reason: format!("{e:?}"),
        };
        for event_type in CLICK_SEQUENCE {
            let init = MouseEventInit::new();
            init.set_bubbles(true);
            init.set_cancelable(true);
            init.set_client_x(client_x);
            init.set_client_y(client_y);
            let event = MouseEvent::new_with_mouse_event_init_dict(event_type, &init).map_err(fail)?;
            target.dispatch_event(&event).map_err(fail)?;
        }
        Ok(())
    }
}
