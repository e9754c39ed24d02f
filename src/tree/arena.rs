//! Arena storage for [`Tree`]: every node lives in one vector and refers to
//! its parent and children by [`NodeId`].

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::TreeError;

use super::node::NodeRef;

/// Handle to a node inside a single [`Tree`].
///
/// A handle pairs a slot index with the generation of the node that occupied
/// the slot when the handle was issued. Slots are recycled after removal, but
/// the generation moves on, so a stale handle never aliases a newer node and
/// every operation given it fails with [`TreeError::InvalidNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    /// Position of the node's slot in the arena.
    pub fn index(self) -> usize {
        self.index
    }

    /// How many times the slot had been vacated when this handle was issued.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
pub(super) struct Node<T> {
    pub(super) value: T,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
    /// Values held by `children`, kept in lockstep with it.
    pub(super) child_values: HashSet<T>,
}

impl<T> Node<T> {
    fn new(value: T, parent: Option<NodeId>) -> Self {
        Self {
            value,
            parent,
            children: Vec::new(),
            child_values: HashSet::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    node: Option<Node<T>>,
}

/// An N-ary tree whose direct children of any node hold pairwise distinct
/// values.
///
/// The tree owns all of its nodes. Callers address nodes through [`NodeId`]
/// handles for mutation and read them through [`NodeRef`] views.
///
/// ```
/// use jutils::tree::{RenderOptions, Tree};
///
/// let mut tree = Tree::new("Languages");
/// let root = tree.root();
/// tree.insert(root, ["Compiled", "Interpreted"]).unwrap();
///
/// let compiled = tree.deep_search(&"Compiled").unwrap();
/// tree.insert(compiled, ["Rust", "Go"]).unwrap();
///
/// assert_eq!(tree.count(), 5);
/// assert_eq!(
///     tree.root_ref().render(&RenderOptions::default()),
///     "Languages\n├── Compiled\n│   ├── Rust\n│   └── Go\n└── Interpreted"
/// );
/// ```
///
/// A tree is single-threaded data: it does no internal locking, and sharing
/// one between threads needs external synchronization.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    slots: Vec<Slot<T>>,
    /// Vacated slot indices, reused before the arena grows.
    free: Vec<usize>,
    root: NodeId,
}

impl<T> Tree<T> {
    /// Create a tree holding a single parentless root node.
    pub fn new(root_value: T) -> Self {
        let mut tree = Self::empty();
        tree.root = tree.push(Node::new(root_value, None));
        tree
    }

    /// An arena with no slots. `root` is dangling until the first push.
    fn empty() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
        }
    }

    /// Handle of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Read-only view of the root node.
    pub fn root_ref(&self) -> NodeRef<'_, T> {
        NodeRef::new(self, self.root)
    }

    /// Read-only view of a node, or `None` for a dead handle.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        self.slot(id).map(|_| NodeRef::new(self, id))
    }

    /// Whether `id` points at a live node of this tree.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.slot(id).is_some()
    }

    /// Total number of nodes, root included.
    pub fn count(&self) -> usize {
        self.root_ref().count()
    }

    /// The value stored at `id`.
    pub fn value(&self, id: NodeId) -> Result<&T, TreeError> {
        Ok(&self.try_node(id)?.value)
    }

    /// The `index`-th direct child of `parent`.
    pub fn child(&self, parent: NodeId, index: usize) -> Result<NodeId, TreeError> {
        let children = &self.try_node(parent)?.children;
        children
            .get(index)
            .copied()
            .ok_or(TreeError::IndexOutOfRange {
                index,
                len: children.len(),
            })
    }

    pub(super) fn slot(&self, id: NodeId) -> Option<&Node<T>> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub(super) fn try_node(&self, id: NodeId) -> Result<&Node<T>, TreeError> {
        self.slot(id).ok_or(TreeError::InvalidNode(id))
    }

    fn try_node_mut(&mut self, id: NodeId) -> Result<&mut Node<T>, TreeError> {
        self.slot_mut(id).ok_or(TreeError::InvalidNode(id))
    }

    /// Look up a handle reached through the tree's own links.
    ///
    /// Panics if the handle is dead, which means a parent or child link
    /// points at a vacated slot.
    pub(super) fn node(&self, id: NodeId) -> &Node<T> {
        match self.slot(id) {
            Some(node) => node,
            None => panic!("tree link {id} points at a removed node"),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match self.slot_mut(id) {
            Some(node) => node,
            None => panic!("tree link {id} points at a removed node"),
        }
    }

    fn push(&mut self, node: Node<T>) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }

        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    /// Take the node out of its slot and queue the slot for reuse.
    fn vacate(&mut self, id: NodeId) -> Node<T> {
        let node = self
            .slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| {
                let node = slot.node.take()?;
                slot.generation = slot.generation.wrapping_add(1);
                Some(node)
            });
        match node {
            Some(node) => {
                self.free.push(id.index);
                node
            }
            None => panic!("tree link {id} points at a removed node"),
        }
    }

    /// Move the subtree rooted at `id` out of `source` and append it to this
    /// arena under `parent`. Returns the new handle of the moved root.
    ///
    /// Walks the subtree with an explicit worklist, so depth is bounded only
    /// by memory.
    fn adopt(&mut self, source: &mut Tree<T>, id: NodeId, parent: Option<NodeId>) -> NodeId {
        let (new_root, children) = self.adopt_one(source, id, parent);
        let mut pending = vec![(new_root, children)];

        while let Some((new_parent, children)) = pending.pop() {
            for child in children {
                let (new_child, grandchildren) = self.adopt_one(source, child, Some(new_parent));
                self.node_mut(new_parent).children.push(new_child);
                pending.push((new_child, grandchildren));
            }
        }
        new_root
    }

    /// Move one node across arenas. Its child links are handed back still
    /// pointing into `source`.
    fn adopt_one(
        &mut self,
        source: &mut Tree<T>,
        id: NodeId,
        parent: Option<NodeId>,
    ) -> (NodeId, Vec<NodeId>) {
        let Node {
            value,
            children,
            child_values,
            ..
        } = source.vacate(id);

        let new_id = self.push(Node {
            value,
            parent,
            children: Vec::with_capacity(children.len()),
            child_values,
        });
        (new_id, children)
    }
}

impl<T> Tree<T>
where
    T: Eq + Hash + Clone + fmt::Debug,
{
    /// Wrap `value` in a new node and append it to `parent`'s children.
    pub fn insert_value(&mut self, parent: NodeId, value: T) -> Result<NodeId, TreeError> {
        let node = self.try_node(parent)?;
        if node.child_values.contains(&value) {
            tracing::warn!(%parent, ?value, "Rejected duplicate child value");
            return Err(TreeError::DuplicateKey(format!("{value:?}")));
        }

        let id = self.push(Node::new(value.clone(), Some(parent)));
        let node = self.try_node_mut(parent)?;
        node.children.push(id);
        node.child_values.insert(value);

        tracing::debug!(%parent, child = %id, "Inserted node");
        Ok(id)
    }

    /// Insert each value, in order, as a new child of `parent`.
    ///
    /// Insertion is not atomic: if a value is rejected as a duplicate the
    /// error is returned immediately and the values before it stay inserted.
    pub fn insert<I>(&mut self, parent: NodeId, values: I) -> Result<Vec<NodeId>, TreeError>
    where
        I: IntoIterator<Item = T>,
    {
        self.try_node(parent)?;
        values
            .into_iter()
            .map(|value| self.insert_value(parent, value))
            .collect()
    }

    /// Attach a whole tree as a new child subtree of `parent`.
    ///
    /// The subtree's root value must not already be held by one of
    /// `parent`'s children. Returns the handle of the grafted root.
    pub fn graft(&mut self, parent: NodeId, mut subtree: Tree<T>) -> Result<NodeId, TreeError> {
        let node = self.try_node(parent)?;
        let value = subtree.node(subtree.root).value.clone();
        if node.child_values.contains(&value) {
            tracing::warn!(%parent, ?value, "Rejected duplicate subtree");
            return Err(TreeError::DuplicateKey(format!("{value:?}")));
        }

        let subtree_root = subtree.root;
        let id = self.adopt(&mut subtree, subtree_root, Some(parent));
        let node = self.try_node_mut(parent)?;
        node.children.push(id);
        node.child_values.insert(value);

        tracing::debug!(%parent, child = %id, "Grafted subtree");
        Ok(id)
    }

    /// Graft each tree, in order, under `parent`. Same partial-failure
    /// behavior as [`Tree::insert`].
    pub fn graft_all<I>(&mut self, parent: NodeId, subtrees: I) -> Result<Vec<NodeId>, TreeError>
    where
        I: IntoIterator<Item = Tree<T>>,
    {
        self.try_node(parent)?;
        subtrees
            .into_iter()
            .map(|subtree| self.graft(parent, subtree))
            .collect()
    }

    /// Replace the value at `id`, returning the old one.
    ///
    /// Fails with [`TreeError::DuplicateKey`] if a sibling already holds
    /// `value`.
    pub fn set_value(&mut self, id: NodeId, value: T) -> Result<T, TreeError> {
        let node = self.try_node(id)?;
        let parent = node.parent;
        if node.value == value {
            return Ok(std::mem::replace(&mut self.try_node_mut(id)?.value, value));
        }

        if let Some(parent) = parent {
            let siblings = &mut self.try_node_mut(parent)?.child_values;
            if siblings.contains(&value) {
                return Err(TreeError::DuplicateKey(format!("{value:?}")));
            }
            siblings.insert(value.clone());
        }

        let old = std::mem::replace(&mut self.try_node_mut(id)?.value, value);
        if let Some(parent) = parent {
            self.try_node_mut(parent)?.child_values.remove(&old);
        }
        Ok(old)
    }

    /// Find the first node in the whole tree holding `value`.
    pub fn deep_search(&self, value: &T) -> Option<NodeId> {
        self.root_ref().deep_search(value).map(|node| node.id())
    }

    /// Whether any node in the tree holds `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.deep_search(value).is_some()
    }

    /// Unlink the subtree rooted at `id` and return it as a tree of its own.
    pub fn detach(&mut self, id: NodeId) -> Result<Tree<T>, TreeError> {
        if id == self.root {
            return Err(TreeError::RootRemoval);
        }
        let node = self.try_node(id)?;
        let value = node.value.clone();
        let parent = node.parent;

        if let Some(parent) = parent {
            let parent = self.try_node_mut(parent)?;
            parent.children.retain(|child| *child != id);
            parent.child_values.remove(&value);
        }

        let mut detached = Tree::empty();
        detached.root = detached.adopt(self, id, None);

        tracing::debug!(node = %id, size = detached.count(), "Detached subtree");
        Ok(detached)
    }

    /// Remove `child` and all of its descendants from `parent`.
    ///
    /// Returns `Ok(false)` when `child` is not a direct child of `parent`.
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> Result<bool, TreeError> {
        if !self.try_node(parent)?.children.contains(&child) {
            return Ok(false);
        }
        self.detach(child)?;
        Ok(true)
    }

    /// Remove the direct child of `parent` holding `value`, with its
    /// descendants.
    pub fn remove_value(&mut self, parent: NodeId, value: &T) -> Result<bool, TreeError> {
        let child = NodeRef::new(self, parent)
            .checked()?
            .search_immediate_children(value)
            .map(|child| child.id());

        match child {
            Some(child) => self.remove(parent, child),
            None => Ok(false),
        }
    }

    /// Remove every direct child of `parent` whose value is in `values`.
    pub fn remove_all(&mut self, parent: NodeId, values: &[T]) -> Result<bool, TreeError> {
        self.remove_children_where(parent, |value| values.contains(value))
    }

    /// Keep only the direct children of `parent` whose value is in `values`.
    pub fn retain_all(&mut self, parent: NodeId, values: &[T]) -> Result<bool, TreeError> {
        self.remove_children_where(parent, |value| !values.contains(value))
    }

    /// Remove every descendant of `id`. Returns how many nodes were dropped.
    pub fn clear(&mut self, id: NodeId) -> Result<usize, TreeError> {
        let before = NodeRef::new(self, id).checked()?.count();
        self.remove_children_where(id, |_| true)?;
        Ok(before - 1)
    }

    fn remove_children_where<F>(&mut self, parent: NodeId, mut doomed: F) -> Result<bool, TreeError>
    where
        F: FnMut(&T) -> bool,
    {
        let targets: Vec<NodeId> = self
            .try_node(parent)?
            .children
            .iter()
            .copied()
            .filter(|child| doomed(&self.node(*child).value))
            .collect();

        for child in &targets {
            self.detach(*child)?;
        }
        Ok(!targets.is_empty())
    }
}

impl<T: PartialEq> PartialEq for Tree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.root_ref() == other.root_ref()
    }
}

impl<T: Eq> Eq for Tree<T> {}

impl<T: Hash> Hash for Tree<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.root_ref().hash(state);
    }
}
