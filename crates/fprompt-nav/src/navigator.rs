//! The group run loop.
//!
//! Each group shows, in order: "Go back" ("Quit" at the root), every
//! extension entry, then its own children sorted by label. The chosen element
//! runs and the menu is shown again until the user leaves.
//!
//! Abandonment handling:
//! - a child run that ends in [`PromptError::Abandoned`] (a sub-group whose
//!   selection was abandoned, or an extension entry) returns to this menu;
//! - an abandoned selection in this group propagates to the caller, which for
//!   the root ends the launch.

use tracing::debug;

use fprompt_core::error::PromptError;
use fprompt_core::Result;
use fprompt_ui::styles::EntryStyle;

use crate::menu::{self, MenuItem, PICK_FORMULA};
use crate::session::{Flow, MenuAction, Session};
use crate::tree::{Group, MenuTree, Node, NodeId};

/// Something that can be picked from a group's menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Element {
    Leave,
    Persistent(usize),
    Node(NodeId),
}

/// Walks a [`MenuTree`] interactively.
pub struct Navigator<'p> {
    tree: &'p MenuTree,
    persistent: &'p [Box<dyn MenuAction>],
    auto_select: bool,
}

impl<'p> Navigator<'p> {
    pub fn new(tree: &'p MenuTree, persistent: &'p [Box<dyn MenuAction>]) -> Self {
        Self {
            tree,
            persistent,
            auto_select: false,
        }
    }

    /// Runs a group's only child directly, without showing its menu.
    ///
    /// Has no effect while persistent entries are installed.
    pub fn with_auto_select(mut self, enabled: bool) -> Self {
        self.auto_select = enabled;
        self
    }

    /// Runs the root group until the user quits.
    pub fn run_root(&self, session: &mut Session<'_>) -> Result<()> {
        self.run_group(self.tree.root(), session)
    }

    fn run_group(&self, id: NodeId, session: &mut Session<'_>) -> Result<()> {
        let Some(group) = self.tree.group(id) else {
            return Ok(());
        };
        // Persistent entries would be unreachable if the menu were skipped.
        let single =
            self.auto_select && self.persistent.is_empty() && group.children().len() == 1;

        loop {
            let element = if single {
                Element::Node(group.children()[0])
            } else {
                self.select(group, session)?
            };

            let flow = match self.dispatch(element, session) {
                Ok(flow) => flow,
                Err(PromptError::Abandoned) => {
                    debug!(group = group.name().unwrap_or("<root>"), "back to menu");
                    Flow::Stay
                }
                Err(e) => return Err(e),
            };

            if flow == Flow::Leave || single {
                return Ok(());
            }
        }
    }

    fn select(&self, group: &Group, session: &mut Session<'_>) -> Result<Element> {
        let elements = self.elements(group);
        let items: Vec<MenuItem> = elements.iter().map(|&e| self.item(e, group)).collect();
        let index = menu::choose(session, &items, PICK_FORMULA)?;
        Ok(elements[index])
    }

    fn elements(&self, group: &Group) -> Vec<Element> {
        let mut elements = Vec::with_capacity(1 + self.persistent.len() + group.children().len());
        elements.push(Element::Leave);
        elements.extend((0..self.persistent.len()).map(Element::Persistent));
        elements.extend(group.children().iter().map(|&c| Element::Node(c)));
        elements
    }

    fn item(&self, element: Element, group: &Group) -> MenuItem {
        match element {
            Element::Leave if group.is_root() => MenuItem::new("Quit", EntryStyle::Navigation),
            Element::Leave => MenuItem::new("Go back", EntryStyle::Navigation),
            Element::Persistent(i) => {
                MenuItem::new(self.persistent[i].label(), EntryStyle::Navigation)
            }
            Element::Node(id) => {
                let node = self.tree.node(id);
                let style = if node.is_group() {
                    EntryStyle::Group
                } else {
                    EntryStyle::Item
                };
                MenuItem::new(node.label(), style)
            }
        }
    }

    fn dispatch(&self, element: Element, session: &mut Session<'_>) -> Result<Flow> {
        match element {
            Element::Leave => Ok(Flow::Leave),
            Element::Persistent(i) => self.persistent[i].run(session),
            Element::Node(id) => match self.tree.node(id) {
                Node::Group(_) => {
                    self.run_group(id, session)?;
                    Ok(Flow::Stay)
                }
                Node::Formula(leaf) => leaf.formula().run(session),
            },
        }
    }
}
