// SPDX-License-Identifier: MIT OR Apache-2.0

//! The aggregator: turns flat, dot-addressed statements into one tree.
//!
//! An [`Aggregator`] accumulates statements for a single unit of work.  Every statement
//! names a dotted stack such as `waabox.formulas.sum`; the first time a stack is seen, each
//! of its prefixes (`.waabox`, `.waabox.formulas`, `.waabox.formulas.sum`) is declared as a
//! bare entry.  [`Aggregator::generate`] then replays the flat entries into a fresh tree,
//! hanging every entry under the node of its parent stack.
//!
//! ```rust
//! use stacklog::Aggregator;
//!
//! let mut log = Aggregator::new();
//! log.log("waabox.formulas.sum", "10").unwrap();
//! log.log("waabox.formulas.pow", "20").unwrap();
//!
//! let root = log.generate().unwrap();
//! let formulas = &root.children()[0].children()[0];
//! assert_eq!(formulas.stack(), ".waabox.formulas");
//! assert_eq!(formulas.children()[1].children()[0].value(), Some("20"));
//! ```

use crate::error::Error;
use crate::node::Node;
use crate::template::Template;
use std::collections::{HashMap, HashSet};

/// Accumulates the statements of one logger and assembles them on demand.
///
/// An aggregator has a single writer.  Isolation between units of work comes from
/// [`ContextRegistry`](crate::context::ContextRegistry), not from locking.
#[derive(Debug, Clone)]
pub struct Aggregator {
    declared: HashSet<String>,
    entries: Vec<Node>,
    globals: HashMap<String, String>,
    enabled: bool,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    /// Creates an empty, enabled aggregator.
    pub fn new() -> Self {
        Aggregator {
            declared: HashSet::new(),
            entries: Vec::new(),
            globals: HashMap::new(),
            enabled: true,
        }
    }

    /**
    Registers a global variable, replacing any previous value for `name`.

    Every later [`log`](Self::log) substitutes `${name}` in its stack with `value`.

    ```rust
    use stacklog::Aggregator;

    let mut log = Aggregator::new();
    log.register_global("user", "waabox");
    log.log("${user}.login", "ok").unwrap();
    assert_eq!(log.entries()[0].stack(), ".waabox");
    ```
    */
    pub fn register_global(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.globals.insert(name.into(), value.into());
    }

    pub fn globals(&self) -> &HashMap<String, String> {
        &self.globals
    }

    /**
    Logs `message` under `stack`.

    Both arguments accept either a `&str` or an `Option<&str>`; an absent argument fails
    with [`Error::InvalidArgument`].  A disabled aggregator ignores the call entirely,
    including argument validation.

    Identical `(stack, message)` pairs are recorded once.  Logging the same statement
    twice does not repeat it in the generated tree.
    */
    pub fn log<'a>(
        &mut self,
        stack: impl Into<Option<&'a str>>,
        message: impl Into<Option<&'a str>>,
    ) -> Result<(), Error> {
        self.log_statement(stack.into(), message.into())
    }

    /// Logs `message` under the stack of a resolved template.
    pub fn log_template<'a>(
        &mut self,
        template: &Template,
        message: impl Into<Option<&'a str>>,
    ) -> Result<(), Error> {
        self.log_statement(Some(template.stack()), message.into())
    }

    fn log_statement(&mut self, stack: Option<&str>, message: Option<&str>) -> Result<(), Error> {
        if !self.enabled {
            return Ok(());
        }
        let stack = stack.ok_or(Error::InvalidArgument("the stack cannot be absent"))?;
        let message = message.ok_or(Error::InvalidArgument("the message cannot be absent"))?;

        let resolved = self.replace_with_globals(stack);
        let leaf_stack = format!(".{resolved}");
        if !self.declared.contains(&leaf_stack) {
            self.declare_prefixes(&resolved);
        }

        let entry = Node::leaf(leaf_stack, message);
        if !self.entries.contains(&entry) {
            self.entries.push(entry);
        }
        Ok(())
    }

    /// Declares `.s1`, `.s1.s2`, ... for every prefix of `stack` not seen before.
    fn declare_prefixes(&mut self, stack: &str) {
        let segments = split_stack(stack);
        for end in 1..=segments.len() {
            let prefix = format!(".{}", segments[..end].join("."));
            if self.declared.insert(prefix.clone()) {
                self.entries.push(Node::branch(prefix));
            }
        }
    }

    fn replace_with_globals(&self, stack: &str) -> String {
        let mut resolved = stack.to_string();
        for (name, value) in &self.globals {
            let placeholder = format!("${{{name}}}");
            if resolved.contains(&placeholder) {
                resolved = resolved.replace(&placeholder, value);
            }
        }
        resolved
    }

    /**
    Assembles every entry logged so far into a new tree.

    Each call builds a fresh snapshot rooted at [`Node::root`]; the aggregator itself is not
    modified, so later statements show up in later snapshots.

    Fails with [`Error::UndeclaredStack`] if an entry's parent stack has no node in the tree
    being built.  No partial tree is returned in that case.
    */
    pub fn generate(&self) -> Result<Node, Error> {
        let mut root = Node::root();
        for entry in &self.entries {
            let stack = entry.stack();
            // A leaf shares its stack with the prefix declared for it, so it lands here.
            if let Some(existing) = root.search_mut(stack) {
                existing.add(entry.clone());
                continue;
            }
            let parent = parent_stack(stack);
            if parent.is_empty() {
                root.add(entry.clone());
                continue;
            }
            match root.search_mut(parent) {
                Some(node) => node.add(entry.clone()),
                None => {
                    let stack = parent.to_string();
                    logwise::warn_sync!(
                        "generate found an undeclared stack: {stack}",
                        stack = stack.clone()
                    );
                    return Err(Error::UndeclaredStack(stack));
                }
            }
        }
        Ok(root)
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The flat entries in insertion order: declared prefixes and statement leaves.
    pub fn entries(&self) -> &[Node] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops all entries, declarations and globals.  The enabled flag is kept.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.declared.clear();
        self.globals.clear();
    }

    #[cfg(test)]
    pub(crate) fn push_raw(&mut self, entry: Node) {
        self.entries.push(entry);
    }
}

/// Splits on `.`, dropping trailing empty segments.  A stack without any `.` is one segment.
fn split_stack(stack: &str) -> Vec<&str> {
    if !stack.contains('.') {
        return vec![stack];
    }
    let mut segments: Vec<&str> = stack.split('.').collect();
    while segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }
    segments
}

fn parent_stack(stack: &str) -> &str {
    stack.rfind('.').map_or("", |index| &stack[..index])
}

/*
Boilerplate notes for Aggregator:

- Clone: derived, cloning yields an independent logger with the same history
- Default: same as new(), enabled and empty
- PartialEq/Eq/Hash: not implemented, two loggers with the same entries are still distinct loggers
- Display: not implemented, render a generated tree instead
*/
