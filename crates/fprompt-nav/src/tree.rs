//! Arena-backed menu tree.
//!
//! Nodes live in a flat `Vec` and refer to their children by [`NodeId`], so
//! insertion is a loop over path segments rather than recursion. Node 0 is
//! always the root group. Children are kept sorted by their path segment,
//! which is also their menu label.

use tracing::debug;

use crate::error::{RegistryError, Result};
use crate::formula::FormulaHandle;

/// Index of a node in a [`MenuTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A menu group: the root, or a dotted prefix shared by its descendants.
#[derive(Debug)]
pub struct Group {
    name: Option<String>,
    segment: String,
    children: Vec<NodeId>,
}

impl Group {
    /// Full dotted name, `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.name.is_none()
    }

    /// Children, sorted by label.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// A formula placed in the tree under its last path segment.
#[derive(Debug)]
pub struct Leaf {
    segment: String,
    formula: FormulaHandle,
}

impl Leaf {
    pub fn formula(&self) -> &FormulaHandle {
        &self.formula
    }
}

#[derive(Debug)]
pub enum Node {
    Group(Group),
    Formula(Leaf),
}

impl Node {
    /// The label shown in menus: the node's own path segment.
    pub fn label(&self) -> &str {
        match self {
            Self::Group(group) => &group.segment,
            Self::Formula(leaf) => &leaf.segment,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }
}

/// The whole navigation hierarchy.
#[derive(Debug)]
pub struct MenuTree {
    nodes: Vec<Node>,
}

impl MenuTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::Group(Group {
                name: None,
                segment: String::new(),
                children: Vec::new(),
            })],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// The group at `id`, or `None` if it is a formula.
    pub fn group(&self, id: NodeId) -> Option<&Group> {
        match self.node(id) {
            Node::Group(group) => Some(group),
            Node::Formula(_) => None,
        }
    }

    /// Total number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Number of registered formulas.
    pub fn formula_count(&self) -> usize {
        self.nodes.iter().filter(|n| !n.is_group()).count()
    }

    /// Follows `path` (a dotted group name) from the root.
    pub fn find(&self, path: &str) -> Option<NodeId> {
        let mut current = self.root();
        for segment in path.split('.') {
            current = self.child_by_segment(current, segment)?;
        }
        Some(current)
    }

    /// Inserts `formula` under its dotted name, creating missing groups.
    ///
    /// For `a.b.c` the groups `a` and `a.b` are created on first use and
    /// reused afterwards; the formula becomes leaf `c` of `a.b`. A path
    /// segment already taken by a sibling is rejected.
    pub fn insert(&mut self, formula: FormulaHandle) -> Result<NodeId> {
        let full = formula.name().to_string();
        let segments = split_path(&full)?;
        let Some((leaf, prefix)) = segments.split_last() else {
            return Err(invalid(&full, "name is empty"));
        };

        let mut current = self.root();
        for (depth, segment) in prefix.iter().enumerate() {
            current = match self.child_by_segment(current, segment) {
                Some(id) if self.node(id).is_group() => id,
                Some(_) => {
                    return Err(RegistryError::DuplicateName {
                        name: segments[..=depth].join("."),
                    });
                }
                None => {
                    let name = segments[..=depth].join(".");
                    debug!(group = %name, "creating group");
                    self.push_child(
                        current,
                        Node::Group(Group {
                            name: Some(name),
                            segment: segment.to_string(),
                            children: Vec::new(),
                        }),
                    )
                }
            };
        }

        if self.child_by_segment(current, leaf).is_some() {
            return Err(RegistryError::DuplicateName { name: full });
        }
        debug!(formula = %full, "registering formula");
        Ok(self.push_child(
            current,
            Node::Formula(Leaf {
                segment: leaf.to_string(),
                formula,
            }),
        ))
    }

    /// Every node below the root, depth first in menu order, with its depth
    /// (direct children of the root have depth 0).
    pub fn walk(&self) -> Vec<(usize, NodeId)> {
        let mut out = Vec::with_capacity(self.nodes.len().saturating_sub(1));
        let mut stack: Vec<(usize, NodeId)> = self
            .children_of(self.root())
            .iter()
            .rev()
            .map(|&id| (0, id))
            .collect();
        while let Some((depth, id)) = stack.pop() {
            out.push((depth, id));
            stack.extend(self.children_of(id).iter().rev().map(|&c| (depth + 1, c)));
        }
        out
    }

    fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.group(id).map(Group::children).unwrap_or(&[])
    }

    fn child_by_segment(&self, parent: NodeId, segment: &str) -> Option<NodeId> {
        let children = self.children_of(parent);
        children
            .binary_search_by(|&c| self.node(c).label().cmp(segment))
            .ok()
            .map(|i| children[i])
    }

    fn push_child(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        let label = node.label().to_string();
        self.nodes.push(node);

        let position = self
            .children_of(parent)
            .binary_search_by(|&c| self.node(c).label().cmp(label.as_str()))
            .unwrap_or_else(|i| i);
        if let Node::Group(group) = &mut self.nodes[parent.0] {
            group.children.insert(position, id);
        }
        id
    }
}

impl Default for MenuTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits a dotted name into segments, rejecting empty or padded ones.
fn split_path(name: &str) -> Result<Vec<&str>> {
    if name.is_empty() {
        return Err(invalid(name, "name is empty"));
    }
    let segments: Vec<&str> = name.split('.').collect();
    if segments.iter().any(|s| s.trim().is_empty()) {
        return Err(invalid(name, "empty path segment"));
    }
    if segments.iter().any(|s| s.trim() != *s) {
        return Err(invalid(name, "path segments cannot start or end with spaces"));
    }
    Ok(segments)
}

fn invalid(name: &str, reason: &'static str) -> RegistryError {
    RegistryError::InvalidName {
        name: name.to_string(),
        reason,
    }
}
