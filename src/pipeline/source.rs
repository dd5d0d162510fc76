//! Source materialisation: wrap the expression in a standalone LaTeX document.
//!
//! The preamble is fixed. Text is forced to white because the image is
//! composited over a dark chat background; a light-themed client will show
//! white-on-white. The expression is set in inline math mode.

use super::workspace::Workspace;
use crate::error::RenderError;
use crate::extract::RenderRequest;
use std::path::{Path, PathBuf};
use tracing::debug;

const PREAMBLE: &str = r"\documentclass{standalone}
\usepackage{amsmath}
\usepackage{amssymb}
\usepackage{amsfonts}
\usepackage{xcolor}
\usepackage{siunitx}
\usepackage[dvips]{graphicx}
\usepackage[utf8]{inputenc}
\thispagestyle{empty}
";

/// The `.tex` file written into the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument(pub(crate) PathBuf);

impl SourceDocument {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Full document text for `expression`.
pub fn document(expression: &str) -> String {
    format!(
        "{PREAMBLE}\\begin{{document}}\n\\color{{white}}\n${expression}$\n\\end{{document}}\n"
    )
}

/// Write `source.tex` for `request` into the workspace.
pub fn write_source(ws: &Workspace, request: &RenderRequest) -> Result<SourceDocument, RenderError> {
    let path = ws.artifact("tex");
    std::fs::write(&path, document(request.expression())).map_err(|source| RenderError::Io {
        path: path.clone(),
        source,
    })?;
    debug!("Wrote LaTeX source: {}", path.display());
    Ok(SourceDocument(path))
}
