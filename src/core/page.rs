/// In-memory host document
///
/// A page is a fixed set of named elements. Each element carries a text value
/// and a width value, the two properties the metrics widget writes. Handles are
/// cheap clones that share the page, so the poller can write while the
/// terminal dashboard reads.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub text: String,
    pub width: String,
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    elements: Arc<RwLock<HashMap<String, Element>>>,
}

impl Page {
    /// Create a page hosting the given element ids, all empty
    pub fn with_elements<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let elements = ids
            .into_iter()
            .map(|id| (id.into(), Element::default()))
            .collect();
        Self {
            elements: Arc::new(RwLock::new(elements)),
        }
    }

    /// Look up an element; `None` when the page doesn't host it
    pub fn get_element_by_id(&self, id: &str) -> Option<ElementHandle> {
        let elements = self.elements.read().unwrap_or_else(PoisonError::into_inner);
        elements.contains_key(id).then(|| ElementHandle {
            id: id.to_string(),
            page: self.clone(),
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Current state of an element, if hosted
    pub fn element(&self, id: &str) -> Option<Element> {
        self.elements
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    fn update(&self, id: &str, f: impl FnOnce(&mut Element)) {
        let mut elements = self.elements.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(element) = elements.get_mut(id) {
            f(element);
        }
    }
}

/// A resolved element of a [`Page`]
#[derive(Debug, Clone)]
pub struct ElementHandle {
    id: String,
    page: Page,
}

impl ElementHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.page.update(&self.id, |element| element.text = text);
    }

    pub fn set_width(&self, width: impl Into<String>) {
        let width = width.into();
        self.page.update(&self.id, |element| element.width = width);
    }

    pub fn text(&self) -> String {
        self.page.element(&self.id).map(|e| e.text).unwrap_or_default()
    }

    pub fn width(&self) -> String {
        self.page.element(&self.id).map(|e| e.width).unwrap_or_default()
    }
}
