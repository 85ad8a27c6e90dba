// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide template table.
//!
//! Templates are configuration: they are parsed once at startup and never change after.
//! This module holds that table so that code anywhere in the process can write
//! `Template::named("...")` without threading a [`TemplateSet`] through every call.
//!
//! # Examples
//!
//! ```
//! use stacklog::global_templates::{global_templates, set_global_templates};
//! use stacklog::{Template, TemplateSet};
//!
//! let templates = TemplateSet::from_json(r#"[{"name": "login", "stack": "session.${user}"}]"#)
//!     .unwrap();
//! set_global_templates(templates).unwrap();
//!
//! let login = Template::named("login").unwrap().with("user", "waabox");
//! assert_eq!(login.stack(), "session.waabox");
//! assert_eq!(global_templates().len(), 1);
//! ```
//!
//! # Implementation Notes
//!
//! The table lives in a `OnceLock`, so reads take no lock and the table can be shared by
//! every thread and every execution context.  Installation is first-writer-wins.  Reading
//! the table before anything was installed freezes it as empty.

use crate::error::Error;
use crate::template::TemplateSet;
use std::sync::OnceLock;

static GLOBAL_TEMPLATES: OnceLock<TemplateSet> = OnceLock::new();

/// Installs the process-wide template table.
///
/// Fails with [`Error::TemplatesAlreadyInstalled`] if a table was already installed, or if
/// [`global_templates`] was read before this call.
pub fn set_global_templates(templates: TemplateSet) -> Result<(), Error> {
    let count = templates.len() as u64;
    GLOBAL_TEMPLATES
        .set(templates)
        .map_err(|_| Error::TemplatesAlreadyInstalled)?;
    logwise::debuginternal_sync!("installed {count} global templates", count = count);
    Ok(())
}

/// Returns the process-wide template table, or an empty one if none was installed.
pub fn global_templates() -> &'static TemplateSet {
    GLOBAL_TEMPLATES.get_or_init(TemplateSet::new)
}
