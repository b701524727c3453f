//! Element hierarchy and capability lookups.

use std::collections::HashMap;

use super::{ElementId, ElementState};
use crate::error::{MotionError, MotionResult};
use crate::layout::Rect;

/// Registry of every element the interaction layer knows about.
///
/// Hover classification walks parent links here instead of querying a live
/// document, so it works the same under any host.
pub struct ElementTree {
    /// Element states indexed by ID.
    elements: HashMap<ElementId, ElementState>,
    /// Root element IDs.
    roots: Vec<ElementId>,
    /// Parent-child relationships.
    children: HashMap<ElementId, Vec<ElementId>>,
    /// ID counter for generating unique IDs.
    next_id: u64,
}

impl ElementTree {
    /// Creates a new empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: HashMap::with_capacity(64),
            roots: Vec::with_capacity(4),
            children: HashMap::with_capacity(64),
            next_id: 1,
        }
    }

    /// Generates a new unique element ID.
    pub fn next_id(&mut self) -> ElementId {
        let id = ElementId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Registers a root element.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::DuplicateElement`] if the ID is taken.
    pub fn add_root(&mut self, state: ElementState) -> MotionResult<ElementId> {
        let id = state.id;
        if self.elements.contains_key(&id) {
            return Err(MotionError::DuplicateElement(id));
        }
        self.elements.insert(id, ElementState { parent: None, ..state });
        self.roots.push(id);
        self.children.insert(id, Vec::new());
        Ok(id)
    }

    /// Adds a child element under `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::UnknownElement`] if the parent is not
    /// registered, or [`MotionError::DuplicateElement`] if the ID is taken.
    pub fn add_child(&mut self, parent: ElementId, state: ElementState) -> MotionResult<ElementId> {
        if !self.elements.contains_key(&parent) {
            return Err(MotionError::UnknownElement(parent));
        }
        let id = state.id;
        if self.elements.contains_key(&id) {
            return Err(MotionError::DuplicateElement(id));
        }

        self.elements.insert(
            id,
            ElementState {
                parent: Some(parent),
                ..state
            },
        );
        self.children.entry(parent).or_default().push(id);
        self.children.insert(id, Vec::new());
        Ok(id)
    }

    /// Removes an element and all its descendants. Returns every removed ID.
    pub fn remove(&mut self, id: ElementId) -> Vec<ElementId> {
        let mut removed = Vec::new();
        self.remove_into(id, &mut removed);
        removed
    }

    fn remove_into(&mut self, id: ElementId, removed: &mut Vec<ElementId>) {
        if let Some(children) = self.children.remove(&id) {
            for child in children {
                self.remove_into(child, removed);
            }
        }

        if let Some(parent) = self.elements.get(&id).and_then(|s| s.parent) {
            if let Some(siblings) = self.children.get_mut(&parent) {
                siblings.retain(|&c| c != id);
            }
        }

        self.roots.retain(|&r| r != id);

        if self.elements.remove(&id).is_some() {
            removed.push(id);
        }
    }

    /// Gets an element by ID.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&ElementState> {
        self.elements.get(&id)
    }

    /// Returns true if `id` is registered.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Current bounding box, or [`Rect::ZERO`] for unknown elements.
    #[must_use]
    pub fn rect(&self, id: ElementId) -> Rect {
        self.elements.get(&id).map_or(Rect::ZERO, |s| s.rect)
    }

    /// Records a new bounding box from the host. Returns false for unknown
    /// elements.
    pub fn set_rect(&mut self, id: ElementId, rect: Rect) -> bool {
        match self.elements.get_mut(&id) {
            Some(state) => {
                state.rect = rect;
                true
            }
            None => false,
        }
    }

    /// Sets or clears `flag` on an element. Returns false for unknown
    /// elements.
    pub fn set_flag(&mut self, id: ElementId, flag: u32, on: bool) -> bool {
        match self.elements.get_mut(&id) {
            Some(state) => {
                if on {
                    state.flags.set(flag);
                } else {
                    state.flags.clear(flag);
                }
                true
            }
            None => false,
        }
    }

    /// Returns the children of an element.
    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns all root elements.
    #[must_use]
    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    /// Iterates `id` and then each ancestor up to its root.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = &ElementState> + '_ {
        std::iter::successors(self.elements.get(&id), move |state| {
            state.parent.and_then(|p| self.elements.get(&p))
        })
    }

    /// Returns true iff `target` or one of its ancestors carries the
    /// interactive marker. Unknown targets are not interactive.
    #[must_use]
    pub fn is_interactive(&self, target: ElementId) -> bool {
        self.ancestors(target).any(ElementState::is_interactive)
    }

    /// Returns all element IDs in depth-first order.
    pub fn iter_dfs(&self) -> impl Iterator<Item = ElementId> + '_ {
        ElementDfsIterator {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Finds the topmost (last painted) element whose box contains the point.
    ///
    /// Used by hosts that only report raw coordinates, to synthesize the
    /// pointer-over target.
    #[must_use]
    pub fn hit_test(&self, x: f32, y: f32) -> Option<ElementId> {
        let all: Vec<_> = self.iter_dfs().collect();
        all.into_iter()
            .rev()
            .find(|id| self.elements.get(id).is_some_and(|s| s.rect.contains(x, y)))
    }
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Depth-first iterator over the element tree.
struct ElementDfsIterator<'a> {
    tree: &'a ElementTree,
    stack: Vec<ElementId>,
}

impl Iterator for ElementDfsIterator<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;

        if let Some(children) = self.tree.children.get(&id) {
            for &child in children.iter().rev() {
                self.stack.push(child);
            }
        }

        Some(id)
    }
}
