//! Output formatting helpers for the `fprompt` CLI.
//!
//! Provides JSON output and the indented rendering of the formula tree used
//! by `fprompt list`.

use std::io::{self, Write};

use serde::Serialize;

use fprompt_nav::tree::{MenuTree, Node, NodeId};
use fprompt_ui::Theme;

/// A view model for one node of the formula tree in JSON output.
#[derive(Serialize, Debug, PartialEq)]
pub struct NodeView {
    /// Full dotted name.
    pub name: String,
    /// `"group"` or `"formula"`.
    pub kind: &'static str,
    /// Declared inputs of a formula, as `{name, kind, optional}`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<InputView>,
    /// Children of a group, in menu order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeView>,
}

/// A formula input in JSON output.
#[derive(Serialize, Debug, PartialEq)]
pub struct InputView {
    pub name: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

/// Builds views for the children of `id`.
pub fn node_views(tree: &MenuTree, id: NodeId) -> Vec<NodeView> {
    let Some(group) = tree.group(id) else {
        return Vec::new();
    };
    group
        .children()
        .iter()
        .map(|&child| match tree.node(child) {
            Node::Group(g) => NodeView {
                name: g.name().unwrap_or_default().to_string(),
                kind: "group",
                inputs: Vec::new(),
                children: node_views(tree, child),
            },
            Node::Formula(leaf) => {
                let formula = leaf.formula();
                NodeView {
                    name: formula.name().to_string(),
                    kind: "formula",
                    inputs: formula
                        .inputs()
                        .iter()
                        .map(|input| InputView {
                            name: input.name().to_string(),
                            kind: input.kind().as_str(),
                            optional: input.is_optional(),
                        })
                        .collect(),
                    children: Vec::new(),
                }
            }
        })
        .collect()
}

/// Renders the tree as indented lines: groups as headings, formulas with
/// their input names.
pub fn format_tree(tree: &MenuTree, theme: &Theme) -> Vec<String> {
    tree.walk()
        .into_iter()
        .map(|(depth, id)| {
            let indent = "  ".repeat(depth);
            let node = tree.node(id);
            match node {
                Node::Group(_) => format!("{indent}{}", theme.heading(node.label())),
                Node::Formula(leaf) => {
                    let inputs: Vec<String> = leaf
                        .formula()
                        .inputs()
                        .iter()
                        .map(|input| {
                            if input.is_optional() {
                                format!("[{}]", input.name())
                            } else {
                                input.name().to_string()
                            }
                        })
                        .collect();
                    let args = theme.muted(&format!("({})", inputs.join(", ")));
                    format!("{indent}{} {args}", node.label())
                }
            }
        })
        .collect()
}

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}
