//! Element tree: ownership, z-order and parent/child relations.
//!
//! Sibling sequences (and the root registry) are paint order: index 0 is
//! bottommost, the last entry is topmost. Children paint above their parent.
//! Hit-testing walks the exact reverse.

use std::collections::HashMap;

use crate::element::{Element, ElementFlags, ElementId};

/// Owns every element and the relations between them.
#[derive(Debug)]
pub struct ElementTree {
    /// Elements indexed by ID.
    elements: HashMap<ElementId, Element>,
    /// Root elements in paint order.
    roots: Vec<ElementId>,
    /// ID counter for generating unique IDs.
    next_id: u64,
}

impl ElementTree {
    /// Creates a new empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: HashMap::with_capacity(256),
            roots: Vec::with_capacity(16),
            next_id: 1,
        }
    }

    /// Generates a new unique element ID.
    pub fn next_id(&mut self) -> ElementId {
        let id = ElementId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Registers an element as the topmost root.
    pub(crate) fn insert_root(&mut self, element: Element) {
        let id = element.state.id();
        self.elements.insert(id, element);
        self.roots.push(id);
    }

    /// Returns true if the element exists.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Gets an element by ID.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Gets mutable access to an element.
    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the tree holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Root elements in paint order.
    #[must_use]
    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    /// Parent of an element.
    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(&id).and_then(|e| e.parent)
    }

    /// Children of an element in paint order.
    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements.get(&id).map_or(&[], |e| e.children.as_slice())
    }

    /// Returns true if `parent` is a proper ancestor of `child`.
    #[must_use]
    pub fn is_child_of(&self, parent: ElementId, child: ElementId) -> bool {
        let mut current = self.parent(child);
        while let Some(id) = current {
            if id == parent {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Moves `child` to the top of `parent`'s children.
    ///
    /// Re-parenting is a move. Returns false (and changes nothing) when either
    /// element is unknown, when they are the same element, or when `child` is
    /// an ancestor of `parent`.
    pub fn add_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        if !self.contains(parent) || !self.contains(child) {
            tracing::debug!(parent = parent.raw(), child = child.raw(), "add_child on unknown element");
            return false;
        }
        if parent == child || self.is_child_of(child, parent) {
            tracing::debug!(parent = parent.raw(), child = child.raw(), "add_child would create a cycle");
            return false;
        }

        self.detach(child);
        if let Some(element) = self.elements.get_mut(&child) {
            element.parent = Some(parent);
        }
        if let Some(element) = self.elements.get_mut(&parent) {
            element.children.push(child);
        }
        true
    }

    /// Detaches `child` from its parent; it becomes the topmost root.
    ///
    /// Returns false if the element is unknown or already a root.
    pub fn remove_child(&mut self, child: ElementId) -> bool {
        if self.parent(child).is_none() {
            return false;
        }
        self.detach(child);
        self.roots.push(child);
        true
    }

    /// Swaps `child` with its neighbour one step toward the top.
    pub fn move_forward(&mut self, child: ElementId) -> bool {
        self.with_siblings(child, |siblings, index| {
            if index + 1 < siblings.len() {
                siblings.swap(index, index + 1);
                true
            } else {
                false
            }
        })
    }

    /// Swaps `child` with its neighbour one step toward the bottom.
    pub fn move_backward(&mut self, child: ElementId) -> bool {
        self.with_siblings(child, |siblings, index| {
            if index > 0 {
                siblings.swap(index, index - 1);
                true
            } else {
                false
            }
        })
    }

    /// Moves `child` to the top of its siblings.
    pub fn send_to_top(&mut self, child: ElementId) -> bool {
        self.with_siblings(child, |siblings, index| {
            let id = siblings.remove(index);
            siblings.push(id);
            index + 1 != siblings.len()
        })
    }

    /// Moves `child` to the bottom of its siblings.
    pub fn send_to_bottom(&mut self, child: ElementId) -> bool {
        self.with_siblings(child, |siblings, index| {
            let id = siblings.remove(index);
            siblings.insert(0, id);
            index != 0
        })
    }

    /// Returns the subtree rooted at `id`, deepest first (post-order).
    #[must_use]
    pub fn subtree_postorder(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        if !self.contains(id) {
            return out;
        }
        // (node, children visited)
        let mut stack = vec![(id, false)];
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                out.push(node);
                continue;
            }
            stack.push((node, true));
            for &child in self.children(node).iter().rev() {
                stack.push((child, false));
            }
        }
        out
    }

    /// Removes an element's storage. The caller destroys the subtree deepest-first.
    pub(crate) fn take(&mut self, id: ElementId) -> Option<Element> {
        self.detach(id);
        let element = self.elements.remove(&id)?;
        // Children still registered would be orphaned roots; promote them.
        for &child in &element.children {
            if let Some(c) = self.elements.get_mut(&child) {
                c.parent = None;
                self.roots.push(child);
            }
        }
        Some(element)
    }

    /// Returns all element IDs in paint order (bottommost first).
    pub fn iter_paint_order(&self) -> impl Iterator<Item = ElementId> + '_ {
        PaintOrderIter {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Returns the IDs of shown elements in paint order.
    ///
    /// An element without `VISIBLE` hides its whole subtree.
    #[must_use]
    pub fn visible_paint_order(&self) -> Vec<ElementId> {
        let mut out = Vec::with_capacity(self.elements.len());
        let mut stack: Vec<ElementId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(element) = self.elements.get(&id) else {
                continue;
            };
            if !element.state.flags().contains(ElementFlags::VISIBLE) {
                continue;
            }
            out.push(id);
            stack.extend(element.children.iter().rev().copied());
        }
        out
    }

    /// Returns all element IDs in hit-test order (topmost first).
    pub fn iter_hit_order(&self) -> impl Iterator<Item = ElementId> + '_ {
        let all: Vec<_> = self.iter_paint_order().collect();
        all.into_iter().rev()
    }

    fn detach(&mut self, child: ElementId) {
        match self.parent(child) {
            Some(parent) => {
                if let Some(p) = self.elements.get_mut(&parent) {
                    p.children.retain(|&c| c != child);
                }
            }
            None => self.roots.retain(|&r| r != child),
        }
        if let Some(element) = self.elements.get_mut(&child) {
            element.parent = None;
        }
    }

    fn with_siblings(&mut self, child: ElementId, f: impl FnOnce(&mut Vec<ElementId>, usize) -> bool) -> bool {
        if !self.contains(child) {
            return false;
        }
        let siblings = match self.parent(child) {
            Some(parent) => match self.elements.get_mut(&parent) {
                Some(p) => &mut p.children,
                None => return false,
            },
            None => &mut self.roots,
        };
        match siblings.iter().position(|&c| c == child) {
            Some(index) => f(siblings, index),
            None => false,
        }
    }
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Depth-first paint-order iterator.
struct PaintOrderIter<'a> {
    tree: &'a ElementTree,
    stack: Vec<ElementId>,
}

impl Iterator for PaintOrderIter<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;

        // Push children in reverse order so they're processed bottom-to-top
        for &child in self.tree.children(id).iter().rev() {
            self.stack.push(child);
        }

        Some(id)
    }
}
