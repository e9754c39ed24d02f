//! Collection view over a node's direct children.
//!
//! [`Children`] exposes the familiar container operations (`add`, `remove`,
//! `retain_all`, ...) and reports outcomes as "did the collection change"
//! booleans. Callers that need to know *why* an operation failed should use
//! the `Result`-returning methods on [`Tree`] instead.
//!
//! Iteration and traversal deliberately differ: [`Children::iter`] yields the
//! direct children only, while [`Children::for_each`] visits every
//! descendant.

use std::fmt;
use std::hash::Hash;

use super::arena::{NodeId, Tree};
use super::node::{ChildIter, NodeRef};
use crate::error::TreeError;

/// Mutable collection view of one node's direct children.
pub struct Children<'a, T> {
    tree: &'a mut Tree<T>,
    id: NodeId,
}

impl<T> Tree<T> {
    /// Open a collection view over the children of `id`.
    pub fn children_mut(&mut self, id: NodeId) -> Result<Children<'_, T>, TreeError> {
        self.try_node(id)?;
        Ok(Children { tree: self, id })
    }
}

impl<T> Children<'_, T> {
    fn node(&self) -> NodeRef<'_, T> {
        NodeRef::new(&*self.tree, self.id)
    }

    /// Handle of the node whose children this view covers.
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.node().child_count()
    }

    pub fn is_empty(&self) -> bool {
        self.node().is_leaf()
    }

    /// Direct children in insertion order.
    pub fn iter(&self) -> ChildIter<'_, T> {
        self.node().children()
    }

    /// Visit every descendant in pre-order, the owning node excluded.
    pub fn for_each<F>(&self, action: F)
    where
        F: for<'n> FnMut(NodeRef<'n, T>),
    {
        self.node().descendants().for_each(action);
    }
}

impl<T: Clone> Children<'_, T> {
    /// Snapshot of the direct children's values.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().map(|child| child.value().clone()).collect()
    }
}

impl<T> Children<'_, T>
where
    T: Eq + Hash + Clone + fmt::Debug,
{
    /// Whether the owning node or any node below it holds `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.node().contains(value)
    }

    /// Append `value` as a new child. Returns `false` if it was rejected.
    pub fn add_value(&mut self, value: T) -> bool {
        changed(self.tree.insert_value(self.id, value).map(|_| true))
    }

    /// Graft `subtree` as a new child. Returns `false` if it was rejected.
    pub fn add(&mut self, subtree: Tree<T>) -> bool {
        changed(self.tree.graft(self.id, subtree).map(|_| true))
    }

    /// Graft every subtree in order.
    ///
    /// Returns `false` if any subtree was rejected; subtrees before the
    /// rejected one stay attached.
    pub fn add_all<I>(&mut self, subtrees: I) -> bool
    where
        I: IntoIterator<Item = Tree<T>>,
    {
        changed(self.tree.graft_all(self.id, subtrees).map(|_| true))
    }

    /// Append every value in order, with the same semantics as
    /// [`Children::add_all`].
    pub fn add_values<I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        changed(self.tree.insert(self.id, values).map(|_| true))
    }

    /// Remove the child holding `value`, with its descendants.
    pub fn remove(&mut self, value: &T) -> bool {
        changed(self.tree.remove_value(self.id, value))
    }

    /// Remove every child whose value is in `values`.
    pub fn remove_all(&mut self, values: &[T]) -> bool {
        changed(self.tree.remove_all(self.id, values))
    }

    /// Keep only the children whose value is in `values`.
    pub fn retain_all(&mut self, values: &[T]) -> bool {
        changed(self.tree.retain_all(self.id, values))
    }

    /// Remove every child.
    pub fn clear(&mut self) {
        changed(self.tree.clear(self.id).map(|dropped| dropped > 0));
    }
}

/// Collapse an operation's outcome to "did the collection change", logging
/// the reason when it was rejected.
fn changed(result: Result<bool, TreeError>) -> bool {
    match result {
        Ok(changed) => changed,
        Err(err) => {
            tracing::debug!(%err, "Collection operation rejected");
            false
        }
    }
}
