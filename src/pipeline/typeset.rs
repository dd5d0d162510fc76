//! Stage A: `latex` turns `source.tex` into `source.dvi`.
//!
//! Invoked non-interactively with shell escape disabled and halting on the
//! first error. On failure the combined output goes through
//! [`extract_diagnostic`] so the user sees TeX's own complaint.

use super::diagnostic::extract_diagnostic;
use super::source::SourceDocument;
use super::tool;
use super::workspace::Workspace;
use crate::error::{RenderError, ToolFailure};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The device-independent document produced by `latex`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DviDocument(pub(crate) PathBuf);

impl DviDocument {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Arguments passed to `latex`.
pub fn latex_args(ws: &Workspace, source: &SourceDocument) -> Vec<String> {
    vec![
        "-no-shell-escape".to_string(),
        "-interaction=nonstopmode".to_string(),
        "-halt-on-error".to_string(),
        format!("-output-directory={}", ws.path().display()),
        "-output-format=dvi".to_string(),
        source.path().display().to_string(),
    ]
}

/// Run `latex` on `source`.
pub fn typeset(
    latex: &Path,
    ws: &Workspace,
    source: &SourceDocument,
) -> Result<DviDocument, RenderError> {
    tool::run(latex, latex_args(ws, source), ws.path()).map_err(|failure| {
        let diagnostic = match &failure {
            ToolFailure::Exit { output, .. } => extract_diagnostic(output).unwrap_or_default(),
            _ => String::new(),
        };
        RenderError::Typeset {
            diagnostic,
            failure,
        }
    })?;

    let dvi = ws.artifact("dvi");
    if !dvi.is_file() {
        return Err(RenderError::Typeset {
            diagnostic: String::new(),
            failure: ToolFailure::MissingArtifact {
                program: tool::program_name(latex),
                path: dvi,
            },
        });
    }

    debug!("Typeset DVI: {}", dvi.display());
    Ok(DviDocument(dvi))
}
