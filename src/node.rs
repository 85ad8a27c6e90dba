// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tree nodes produced by [`Aggregator::generate`](crate::Aggregator::generate).
//!
//! A [`Node`] is one position in the assembled log hierarchy.  It carries its dotted
//! stack, an optional value (only statement leaves have one) and the children attached
//! beneath it, in the order they were attached.
//!
//! ```rust
//! use stacklog::Node;
//!
//! let mut formulas = Node::branch(".formulas");
//! formulas.add(Node::leaf(".formulas", "10"));
//!
//! assert_eq!(formulas.children().len(), 1);
//! assert_eq!(formulas.children()[0].value(), Some("10"));
//! ```

use std::fmt::Display;
use std::hash::{Hash, Hasher};

/// The stack of the synthetic root returned by `generate`.
pub const ROOT_STACK: &str = ".";

/**
One element of an assembled log tree.

Equality and hashing consider only the stack and the value, never the children.  The
aggregator relies on this to collapse identical `(stack, message)` statements into one
entry.
*/
#[derive(Debug, Clone)]
pub struct Node {
    stack: String,
    value: Option<String>,
    children: Vec<Node>,
}

impl Node {
    /// Creates the synthetic root marker.
    pub fn root() -> Self {
        Self::branch(ROOT_STACK)
    }

    /// Creates a node with no value, as used for declared prefixes.
    pub fn branch(stack: impl Into<String>) -> Self {
        Node {
            stack: stack.into(),
            value: None,
            children: Vec::new(),
        }
    }

    /// Creates a statement leaf.
    pub fn leaf(stack: impl Into<String>, value: impl Into<String>) -> Self {
        Node {
            stack: stack.into(),
            value: Some(value.into()),
            children: Vec::new(),
        }
    }

    pub fn stack(&self) -> &str {
        &self.stack
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Appends a child.  No uniqueness check is performed here.
    pub fn add(&mut self, child: Node) {
        self.children.push(child);
    }

    /**
    Searches the descendants of this node for one whose stack equals `path`.

    The walk is depth-first and pre-order: each child is compared, then its own subtree is
    searched, before moving to the next sibling.  The node itself is never compared.
    */
    pub fn search(&self, path: &str) -> Option<&Node> {
        for child in &self.children {
            if child.stack == path {
                return Some(child);
            }
            if let Some(found) = child.search(path) {
                return Some(found);
            }
        }
        None
    }

    /// Mutable twin of [`search`](Self::search), same traversal order.
    pub(crate) fn search_mut(&mut self, path: &str) -> Option<&mut Node> {
        for child in &mut self.children {
            if child.stack == path {
                return Some(child);
            }
            if let Some(found) = child.search_mut(path) {
                return Some(found);
            }
        }
        None
    }

    /**
    Renders this node and its subtree as indented text.

    This is a debugging aid.  The layout is stable but it is not a wire format.

    ```rust
    use stacklog::Node;

    let mut sum = Node::branch(".sum");
    sum.add(Node::leaf(".sum", "10"));
    assert_eq!(sum.render(0), ".sum[\n  .sum:10\n  ]\n");
    ```
    */
    pub fn render(&self, depth: usize) -> String {
        let indentation = "  ".repeat(depth + 1);
        let mut out = String::new();
        out.push_str(&self.stack);
        if let Some(value) = &self.value {
            out.push(':');
            out.push_str(value);
        }
        if self.children.is_empty() {
            return out;
        }
        out.push_str("[\n");
        let mut first = true;
        for child in &self.children {
            if !first {
                out.push_str(",\n");
            }
            first = false;
            out.push_str(&indentation);
            out.push_str(&child.render(depth + 1));
        }
        out.push('\n');
        out.push_str(&indentation);
        out.push_str("]\n");
        out
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.stack == other.stack && self.value == other.value
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.stack.hash(state);
        self.value.hash(state);
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(0))
    }
}

/*
Boilerplate notes for Node:

IMPLEMENTED:
- Debug, Clone: derived
- PartialEq/Eq/Hash: by stack and value only, children ignored
- Display: the canonical dump

NOT IMPLEMENTED:
- Default: a node without a stack is meaningless; use Node::root()
- Ord/PartialOrd: no meaningful order between positions
- Copy: owns heap data
*/
