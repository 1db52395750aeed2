use crate::logging::TREE_BUILD;
use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};
use std::ops::Index;
use uuid::Uuid;

/// Handle to a row inside a [`Tree`], valid for one build of that tree.
///
/// Ids carry the build id they were issued under, so ids kept across
/// [`Sink::clear_content`] or taken from another tree are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    build: Uuid,
}

impl NodeId {
    pub fn index(self) -> usize {
        self.index
    }

    pub fn build_id(self) -> Uuid {
        self.build
    }
}

/// One two-column row: a label, a display value and its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub label: String,
    pub value: String,
    pub enabled: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(label: &str, value: &str, parent: Option<NodeId>) -> Self {
        Node {
            label: label.to_string(),
            value: value.to_string(),
            enabled: true,
            parent,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Receiver of rows produced by the tree builder and by bespoke collaborators.
pub trait Sink {
    fn root(&self) -> NodeId;

    /// Appends a row as the last child of `parent` and returns it, or `None`
    /// when `parent` does not belong to the current content.
    fn add_entry(&mut self, label: &str, value: &str, parent: NodeId) -> Option<NodeId>;

    /// Sets `enabled` on a row and every row below it. Unknown ids are ignored.
    fn set_enabled_recursive(&mut self, id: NodeId, enabled: bool);

    /// Removes every row below the root in one step.
    fn clear_content(&mut self);
}

/// Arena of rows under an invisible root, freed as one unit.
#[derive(Debug, Clone)]
pub struct Tree {
    id: Uuid,
    nodes: Vec<Node>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        Tree {
            id: Uuid::new_v4(),
            nodes: vec![Node::new("", "", None)],
        }
    }

    /// Build id, regenerated whenever the content is cleared.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn root(&self) -> NodeId {
        self.id_at(0)
    }

    fn id_at(&self, index: usize) -> NodeId {
        NodeId {
            index,
            build: self.id,
        }
    }

    /// Whether `id` was issued by the current content of this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        id.build == self.id && id.index < self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if self.contains(id) {
            self.nodes.get(id.index)
        } else {
            None
        }
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        self.get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |child| &self.nodes[child.index])
    }

    /// Number of rows, not counting the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rows in pre-order as `(depth, id)`, top-level rows at depth 0.
    pub fn walk(&self) -> Vec<(usize, NodeId)> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: Vec<(usize, NodeId)> = self.nodes[0]
            .children
            .iter()
            .rev()
            .map(|&child| (0, child))
            .collect();
        while let Some((depth, id)) = stack.pop() {
            out.push((depth, id));
            stack.extend(
                self.nodes[id.index]
                    .children
                    .iter()
                    .rev()
                    .map(|&child| (depth + 1, child)),
            );
        }
        out
    }

    /// Follows labels from the root, first match at each level.
    pub fn find_path(&self, labels: &[&str]) -> Option<NodeId> {
        labels.iter().try_fold(self.root(), |current, label| {
            self.nodes[current.index]
                .children
                .iter()
                .copied()
                .find(|child| self.nodes[child.index].label == *label)
        })
    }
}

/// Panics when `id` is stale or belongs to another tree; use [`Tree::get`]
/// for ids of unknown origin.
impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        match self.get(id) {
            Some(node) => node,
            None => panic!("{:?} does not belong to tree build {}", id, self.id),
        }
    }
}

impl Sink for Tree {
    fn root(&self) -> NodeId {
        self.id_at(0)
    }

    fn add_entry(&mut self, label: &str, value: &str, parent: NodeId) -> Option<NodeId> {
        if !self.contains(parent) {
            tracing::warn!(
                target: TREE_BUILD,
                label,
                parent = ?parent,
                build_id = %self.id,
                "parent row does not belong to this build, row dropped"
            );
            return None;
        }
        let id = self.id_at(self.nodes.len());
        self.nodes.push(Node::new(label, value, Some(parent)));
        self.nodes[parent.index].children.push(id);
        Some(id)
    }

    fn set_enabled_recursive(&mut self, id: NodeId, enabled: bool) {
        if !self.contains(id) {
            tracing::warn!(
                target: TREE_BUILD,
                id = ?id,
                build_id = %self.id,
                "row does not belong to this build, enabled state unchanged"
            );
            return;
        }
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let node = &mut self.nodes[current.index];
            node.enabled = enabled;
            pending.extend_from_slice(&node.children);
        }
    }

    fn clear_content(&mut self) {
        self.nodes.truncate(1);
        self.nodes[0].children.clear();
        self.id = Uuid::new_v4();
    }
}

struct NodeRef<'a> {
    tree: &'a Tree,
    id: NodeId,
}

struct ChildrenRef<'a> {
    tree: &'a Tree,
    children: &'a [NodeId],
}

impl Serialize for NodeRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node = &self.tree.nodes[self.id.index];
        let mut state = serializer.serialize_struct("Node", 4)?;
        state.serialize_field("label", &node.label)?;
        state.serialize_field("value", &node.value)?;
        state.serialize_field("enabled", &node.enabled)?;
        state.serialize_field(
            "children",
            &ChildrenRef {
                tree: self.tree,
                children: &node.children,
            },
        )?;
        state.end()
    }
}

impl Serialize for ChildrenRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.children.len()))?;
        for &id in self.children {
            seq.serialize_element(&NodeRef {
                tree: self.tree,
                id,
            })?;
        }
        seq.end()
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ChildrenRef {
            tree: self,
            children: &self.nodes[0].children,
        }
        .serialize(serializer)
    }
}
