// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error type shared by every fallible operation in the crate.

/// Errors raised by stacklog.
///
/// All of these are programmer errors surfaced synchronously.  Nothing is retried.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required argument to `log` was absent.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// `generate` found an entry whose parent stack was never declared.
    #[error("undeclared stack: {0}")]
    UndeclaredStack(String),

    /// No template is registered under this name.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// A template definition document could not be parsed.
    #[error("invalid template definitions: {0}")]
    TemplateSource(#[from] serde_json::Error),

    /// The process-wide template table was already installed.
    #[error("global templates already installed")]
    TemplatesAlreadyInstalled,
}
