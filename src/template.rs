// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named, reusable stack templates.
//!
//! A [`Template`] pairs a name with a stack that may contain `${placeholder}` tokens.
//! Templates are declared in JSON documents and collected into a [`TemplateSet`]:
//!
//! ```json
//! [
//!   { "name": "formula", "stack": "${name}.formulas.${formulaName}" }
//! ]
//! ```
//!
//! Before logging, a template is copied out of the set and its placeholders filled in with
//! [`Template::with`]:
//!
//! ```rust
//! use stacklog::{Aggregator, TemplateSet};
//!
//! let templates = TemplateSet::from_json(
//!     r#"[{"name": "formula", "stack": "${name}.formulas.${formulaName}"}]"#,
//! ).unwrap();
//!
//! let sum = templates.named("formula").unwrap()
//!     .with("name", "waabox")
//!     .with("formulaName", "sum");
//! assert_eq!(sum.stack(), "waabox.formulas.sum");
//!
//! let mut log = Aggregator::new();
//! log.log_template(&sum, "10").unwrap();
//! ```

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named stack with optional `${placeholder}` tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Template {
    name: String,
    stack: String,
}

impl Template {
    pub fn new(name: impl Into<String>, stack: impl Into<String>) -> Self {
        Template {
            name: name.into(),
            stack: stack.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stack(&self) -> &str {
        &self.stack
    }

    /**
    Replaces every `${var}` in the stack with `value`.

    `value` may itself be a placeholder such as `${user}`; it is then left for the
    aggregator's globals to resolve at log time.

    ```rust
    use stacklog::Template;

    let t = Template::new("t", "${who}.visits").with("who", "${user}");
    assert_eq!(t.stack(), "${user}.visits");
    ```
    */
    pub fn with(mut self, var: &str, value: &str) -> Self {
        self.stack = self.stack.replace(&format!("${{{var}}}"), value);
        self
    }

    /// Copies the template registered under `name` in the process-wide table.
    ///
    /// See [`set_global_templates`](crate::global_templates::set_global_templates).
    pub fn named(name: &str) -> Result<Template, Error> {
        crate::global_templates::global_templates().named(name)
    }
}

/// An ordered collection of templates, unique by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSet {
    templates: Vec<Template>,
    index: HashMap<String, usize>,
}

impl TemplateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON array of `{"name": .., "stack": ..}` records.
    pub fn from_json(document: &str) -> Result<Self, Error> {
        let mut set = TemplateSet::new();
        set.extend_from_json(document)?;
        Ok(set)
    }

    /**
    Merges another definition document into this set.

    A definition whose name is already present replaces the earlier one, keeping its
    position.  If the document fails to parse, the set is left unchanged.
    */
    pub fn extend_from_json(&mut self, document: &str) -> Result<(), Error> {
        let parsed: Vec<Template> = serde_json::from_str(document)?;
        for template in parsed {
            self.insert(template);
        }
        Ok(())
    }

    /// Adds `template`, replacing any template with the same name.
    pub fn insert(&mut self, template: Template) {
        match self.index.get(template.name()) {
            Some(&position) => self.templates[position] = template,
            None => {
                self.index
                    .insert(template.name().to_string(), self.templates.len());
                self.templates.push(template);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.index.get(name).map(|&position| &self.templates[position])
    }

    /// Returns a copy of the template registered under `name`.
    pub fn named(&self, name: &str) -> Result<Template, Error> {
        match self.get(name) {
            Some(template) => Ok(template.clone()),
            None => {
                let missing = name.to_string();
                logwise::warn_sync!("template lookup failed: {name}", name = missing.clone());
                Err(Error::TemplateNotFound(missing))
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFINITIONS: &str = r#"[
        {"name": "testExample", "stack": "${name}.formulas.${formulaName}"},
        {"name": "login", "stack": "session.${user}.login"}
    ]"#;

    #[test]
    fn parses_definitions_in_order() {
        let set = TemplateSet::from_json(DEFINITIONS).unwrap();
        let names: Vec<&str> = set.iter().map(Template::name).collect();
        assert_eq!(names, vec!["testExample", "login"]);
        assert_eq!(
            set.get("login").map(Template::stack),
            Some("session.${user}.login")
        );
    }

    #[test]
    fn named_returns_an_independent_copy() {
        let set = TemplateSet::from_json(DEFINITIONS).unwrap();
        let filled = set.named("testExample").unwrap().with("name", "waabox");
        assert_eq!(filled.stack(), "waabox.formulas.${formulaName}");
        assert_eq!(
            set.get("testExample").map(Template::stack),
            Some("${name}.formulas.${formulaName}")
        );
    }

    #[test]
    fn missing_template_is_reported() {
        let set = TemplateSet::new();
        match set.named("nope") {
            Err(Error::TemplateNotFound(name)) => assert_eq!(name, "nope"),
            other => panic!("expected TemplateNotFound, got {other:?}"),
        }
    }

    #[test]
    fn later_definitions_replace_earlier_ones() {
        let mut set = TemplateSet::from_json(DEFINITIONS).unwrap();
        set.extend_from_json(
            r#"[{"name": "testExample", "stack": "override"}, {"name": "extra", "stack": "x"}]"#,
        )
        .unwrap();
        let names: Vec<&str> = set.iter().map(Template::name).collect();
        assert_eq!(names, vec!["testExample", "login", "extra"]);
        assert_eq!(set.get("testExample").map(Template::stack), Some("override"));
    }

    #[test]
    fn null_or_missing_fields_are_rejected() {
        assert!(matches!(
            TemplateSet::from_json(r#"[{"name": "a", "stack": null}]"#),
            Err(Error::TemplateSource(_))
        ));
        assert!(matches!(
            TemplateSet::from_json(r#"[{"name": "a"}]"#),
            Err(Error::TemplateSource(_))
        ));
    }

    #[test]
    fn failed_merge_leaves_set_unchanged() {
        let mut set = TemplateSet::from_json(DEFINITIONS).unwrap();
        let before = set.clone();
        assert!(set.extend_from_json("not json").is_err());
        assert_eq!(set, before);
    }

    #[test]
    fn with_replaces_every_occurrence() {
        let t = Template::new("t", "${a}.${a}.${b}").with("a", "x");
        assert_eq!(t.stack(), "x.x.${b}");
    }
}
