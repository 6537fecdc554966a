//! Element store: the ordered element collection plus the current selection.
//!
//! Order is z-order: later elements draw on top and are hit-tested first.
//! The store also owns id allocation so new elements never depend on clock
//! resolution. Selection always names an element that is present, or nothing.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use crate::element::{Element, ElementId, ElementPatch};

pub struct ElementStore {
    elements: Vec<Element>,
    selected: Option<ElementId>,
    next_id: u64,
}

impl ElementStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { elements: Vec::new(), selected: None, next_id: 1 }
    }

    /// Create a store holding `elements`, as loaded from storage.
    #[must_use]
    pub fn with_elements(elements: Vec<Element>) -> Self {
        let mut store = Self::new();
        store.replace_all(elements);
        store
    }

    /// Allocate a fresh id, strictly greater than every id handed out or loaded so far.
    pub fn next_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Add an element on top of the z-order.
    pub fn append(&mut self, element: Element) {
        self.bump_past(element.id());
        self.elements.push(element);
    }

    /// Merge `patch` into the element with `id`. Returns false if no such element exists.
    pub fn patch(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        let Some(element) = self.elements.iter_mut().find(|el| el.id() == id) else {
            return false;
        };
        element.apply_patch(patch);
        true
    }

    /// Overwrite the most recently appended element. Returns false on an empty store.
    pub fn replace_last(&mut self, element: Element) -> bool {
        let Some(last) = self.elements.last_mut() else {
            return false;
        };
        let id = element.id();
        *last = element;
        self.bump_past(id);
        if let Some(sel) = self.selected {
            if !self.contains(sel) {
                self.selected = None;
            }
        }
        true
    }

    /// Remove an element by id, returning it if it was present.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let index = self.elements.iter().position(|el| el.id() == id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(self.elements.remove(index))
    }

    /// Drop every element and the selection.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.selected = None;
    }

    /// Replace the whole collection with a snapshot.
    pub fn replace_all(&mut self, elements: Vec<Element>) {
        self.elements = elements;
        if let Some(max) = self.elements.iter().map(|el| el.id().0).max() {
            self.next_id = self.next_id.max(max.saturating_add(1));
        }
        if let Some(sel) = self.selected {
            if !self.contains(sel) {
                self.selected = None;
            }
        }
    }

    /// Select an element. Returns false (and leaves the selection alone) if `id` is absent.
    pub fn select(&mut self, id: ElementId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    #[must_use]
    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    #[must_use]
    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.and_then(|id| self.get(id))
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.iter().any(|el| el.id() == id)
    }

    #[must_use]
    pub fn last(&self) -> Option<&Element> {
        self.elements.last()
    }

    /// All elements, bottom of the z-order first.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn bump_past(&mut self, id: ElementId) {
        if id.0 >= self.next_id {
            self.next_id = id.0.saturating_add(1);
        }
    }
}

impl Default for ElementStore {
    fn default() -> Self {
        Self::new()
    }
}
