//! Error types for the texbot library.
//!
//! Two distinct error types reflect two distinct failure points:
//!
//! * [`ExtractError`] — the message text contained a `$$…$$` block but its
//!   render options could not be understood. A message with no block at all
//!   is *not* an error: [`crate::extract::extract`] returns `Ok(None)`.
//!
//! * [`RenderError`] — a render call was attempted and stopped at one of the
//!   pipeline stages. Each variant maps to exactly one [`ErrorKind`], and only
//!   [`RenderError::Typeset`] carries a user-facing diagnostic.
//!
//! Every `RenderError` is terminal for its call: the pipeline never retries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while turning message text into a [`crate::RenderRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The `[N]` suffix was present but is not a usable scale factor.
    #[error("Invalid scale '{raw}': expected an integer between 1 and {max}")]
    InvalidScale { raw: String, max: u32 },

    /// The expression body is empty after trimming.
    #[error("Expression is empty")]
    EmptyExpression,
}

/// [`crate::config::RenderConfigBuilder::build`] validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: path for `{tool}` is empty")]
    EmptyToolPath { tool: &'static str },

    #[error("Invalid configuration: workspace root '{path}' is not a directory")]
    WorkspaceRootMissing { path: PathBuf },
}

/// All errors a single render call can end with.
#[derive(Debug, Error)]
pub enum RenderError {
    // ── Workspace ─────────────────────────────────────────────────────────
    /// The temporary workspace directory could not be created.
    #[error("Failed to create render workspace: {0}")]
    Workspace(#[source] std::io::Error),

    // ── Artifact I/O ──────────────────────────────────────────────────────
    /// Writing the LaTeX source or reading the final PNG failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Tool stages ───────────────────────────────────────────────────────
    /// `latex` rejected the expression.
    ///
    /// `diagnostic` is whatever [`crate::pipeline::diagnostic::extract_diagnostic`]
    /// found in the tool output, or the empty string.
    #[error("LaTeX could not typeset the expression: {failure}")]
    Typeset {
        diagnostic: String,
        #[source]
        failure: ToolFailure,
    },

    /// `dvisvgm` failed to convert the DVI document.
    #[error("DVI to SVG conversion failed: {0}")]
    Vectorize(#[source] ToolFailure),

    /// `inkscape` failed to rasterise the SVG image.
    #[error("SVG to PNG conversion failed: {0}")]
    Rasterize(#[source] ToolFailure),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// The blocking render task panicked or was cancelled.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RenderError {
    /// The flat classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RenderError::Workspace(_) => ErrorKind::Workspace,
            RenderError::Io { .. } => ErrorKind::Io,
            RenderError::Typeset { .. } => ErrorKind::Typeset,
            RenderError::Vectorize(_) => ErrorKind::Vectorize,
            RenderError::Rasterize(_) => ErrorKind::Rasterize,
            RenderError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// The extracted LaTeX diagnostic; `Some` only for typeset failures.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            RenderError::Typeset { diagnostic, .. } => Some(diagnostic),
            _ => None,
        }
    }
}

/// Why an external tool did not produce its artifact.
#[derive(Debug, Error)]
pub enum ToolFailure {
    /// The process could not be started (missing binary, permissions…).
    #[error("could not launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran and exited unsuccessfully.
    #[error("`{program}` exited with {}", exit_label(.code))]
    Exit {
        program: String,
        code: Option<i32>,
        /// Captured stdout followed by stderr.
        output: String,
    },

    /// The process exited successfully but its output file is missing.
    #[error("`{program}` did not produce '{path}'")]
    MissingArtifact { program: String, path: PathBuf },

    /// The process produced a file that is not a readable image.
    #[error("`{program}` produced an unreadable image '{path}': {detail}")]
    InvalidArtifact {
        program: String,
        path: PathBuf,
        detail: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Serialisable tag for a [`RenderError`], used in reports and JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Workspace,
    Io,
    Typeset,
    Vectorize,
    Rasterize,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Workspace => "workspace",
            ErrorKind::Io => "io",
            ErrorKind::Typeset => "typeset",
            ErrorKind::Vectorize => "vectorize",
            ErrorKind::Rasterize => "rasterize",
            ErrorKind::Internal => "internal",
        };
        f.write_str(name)
    }
}
