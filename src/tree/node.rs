//! Borrowed, read-only views over tree nodes.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::{iter, ptr, slice};

use crate::error::TreeError;

use super::arena::{Node, NodeId, Tree};

/// A node of a [`Tree`] together with the tree that owns it.
///
/// All read operations on a subtree go through this view: it is cheap to copy
/// and borrows the tree immutably, so several views can be used at once.
pub struct NodeRef<'a, T> {
    tree: &'a Tree<T>,
    id: NodeId,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<'a, T> NodeRef<'a, T> {
    pub(super) fn new(tree: &'a Tree<T>, id: NodeId) -> Self {
        Self { tree, id }
    }

    /// Fails if the handle this view was built from is dead.
    pub(super) fn checked(self) -> Result<Self, TreeError> {
        self.tree.try_node(self.id).map(|_| self)
    }

    fn node(&self) -> &'a Node<T> {
        self.tree.node(self.id)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'a Tree<T> {
        self.tree
    }

    pub fn value(&self) -> &'a T {
        &self.node().value
    }

    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        self.node().parent.map(|id| NodeRef::new(self.tree, id))
    }

    /// Direct children in insertion order.
    pub fn children(&self) -> ChildIter<'a, T> {
        ChildIter {
            tree: self.tree,
            ids: self.node().children.iter(),
        }
    }

    /// The set of values held by direct children.
    pub fn child_values(&self) -> &'a HashSet<T> {
        &self.node().child_values
    }

    pub fn child_count(&self) -> usize {
        self.node().children.len()
    }

    /// The `index`-th direct child.
    pub fn child(&self, index: usize) -> Result<NodeRef<'a, T>, TreeError> {
        self.tree
            .child(self.id, index)
            .map(|id| NodeRef::new(self.tree, id))
    }

    pub fn is_leaf(&self) -> bool {
        self.node().children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    /// Number of edges between this node and the root.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.node().parent;
        while let Some(id) = current {
            depth += 1;
            current = self.tree.node(id).parent;
        }
        depth
    }

    /// Child indices leading from the root down to this node. Empty for the
    /// root.
    pub fn position(&self) -> Vec<usize> {
        let mut path = Vec::with_capacity(self.depth());
        let mut current = *self;
        while let Some(parent) = current.parent() {
            let Some(index) = parent.node().children.iter().position(|id| *id == current.id) else {
                panic!("tree link {} is missing from its parent", current.id);
            };
            path.push(index);
            current = parent;
        }
        path.reverse();
        path
    }

    /// Number of nodes in this subtree, this node included.
    pub fn count(&self) -> usize {
        1 + self.descendants().count()
    }

    /// Every node below this one in depth-first pre-order. This node itself
    /// is not yielded.
    pub fn descendants(&self) -> Descendants<'a, T> {
        Descendants {
            tree: self.tree,
            stack: self.node().children.iter().rev().copied().collect(),
        }
    }

    /// Run `action` on every descendant, in the order of
    /// [`NodeRef::descendants`].
    pub fn for_each_descendant<F>(&self, action: F)
    where
        F: FnMut(NodeRef<'a, T>),
    {
        self.descendants().for_each(action);
    }
}

impl<'a, T> NodeRef<'a, T>
where
    T: Eq + Hash + fmt::Debug,
{
    /// The direct child holding `value`, if any.
    pub fn search_immediate_children(&self, value: &T) -> Option<NodeRef<'a, T>> {
        if !self.node().child_values.contains(value) {
            return None;
        }
        self.children().find(|child| child.value() == value)
    }

    /// Depth-first search of this subtree, this node included.
    ///
    /// At every visited node the node itself is checked first, then its
    /// direct children as a group, and only then does the search descend
    /// into each child in order.
    ///
    /// # Panics
    ///
    /// Panics if two direct children of a visited node hold equal values,
    /// which insertion never allows.
    pub fn deep_search(&self, value: &T) -> Option<NodeRef<'a, T>> {
        let mut pending = vec![self.id];

        while let Some(id) = pending.pop() {
            let node = NodeRef::new(self.tree, id);
            if node.value() == value {
                return Some(node);
            }

            if node.child_values().contains(value) {
                let mut matches = node.children().filter(|child| child.value() == value);
                let found = matches.next();
                assert!(
                    matches.next().is_none(),
                    "multiple children of {:?} hold the value {:?}",
                    node.value(),
                    value
                );
                return found;
            }

            pending.extend(node.node().children.iter().rev().copied());
        }
        None
    }

    /// Whether this subtree holds `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.deep_search(value).is_some()
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("value", self.value())
            .field("children", &self.child_count())
            .finish()
    }
}

/// Nodes compare equal when their values match, they share the same parent,
/// and their children compare equal pairwise in order.
///
/// Within one tree "the same parent" means the same handle. Across trees it
/// means a parent at the same [`position`](NodeRef::position).
impl<T: PartialEq> PartialEq for NodeRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        same_parent(*self, *other) && subtree_eq(*self, *other)
    }
}

fn same_parent<T>(a: NodeRef<'_, T>, b: NodeRef<'_, T>) -> bool {
    if ptr::eq(a.tree, b.tree) {
        return a.node().parent == b.node().parent;
    }
    match (a.parent(), b.parent()) {
        (None, None) => true,
        (Some(a), Some(b)) => a.position() == b.position(),
        _ => false,
    }
}

fn subtree_eq<T: PartialEq>(a: NodeRef<'_, T>, b: NodeRef<'_, T>) -> bool {
    let mut pending = vec![(a, b)];
    while let Some((a, b)) = pending.pop() {
        if a.value() != b.value() || a.child_count() != b.child_count() {
            return false;
        }
        pending.extend(a.children().zip(b.children()));
    }
    true
}

impl<T: Hash> Hash for NodeRef<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for node in iter::once(*self).chain(self.descendants()) {
            node.value().hash(state);
            node.child_count().hash(state);
        }
    }
}

/// Iterator over the direct children of a node.
pub struct ChildIter<'a, T> {
    tree: &'a Tree<T>,
    ids: slice::Iter<'a, NodeId>,
}

impl<'a, T> Iterator for ChildIter<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|id| NodeRef::new(self.tree, *id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<T> DoubleEndedIterator for ChildIter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ids.next_back().map(|id| NodeRef::new(self.tree, *id))
    }
}

impl<T> ExactSizeIterator for ChildIter<'_, T> {}

/// Pre-order iterator over all descendants of a node.
pub struct Descendants<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<NodeId>,
}

impl<'a, T> Iterator for Descendants<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.node(id);
        self.stack.extend(node.children.iter().rev().copied());
        Some(NodeRef::new(self.tree, id))
    }
}
