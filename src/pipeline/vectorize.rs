//! Stage B: `dvisvgm` turns `source.dvi` into `source.svg`.
//!
//! Glyphs are emitted as paths (`--no-fonts`) so the rasteriser needs no TeX
//! fonts, the bounding box hugs the ink (`--exact-bbox`), and output is
//! compressed at level 4. Failures here are rare and their output is not
//! reliably parseable, so no diagnostic is extracted.

use super::tool;
use super::typeset::DviDocument;
use super::workspace::Workspace;
use crate::error::{RenderError, ToolFailure};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The vector image produced by `dvisvgm`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgImage(pub(crate) PathBuf);

impl SvgImage {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Arguments passed to `dvisvgm`.
pub fn dvisvgm_args(dvi: &DviDocument, out: &Path) -> Vec<String> {
    vec![
        "--no-fonts".to_string(),
        "--exact-bbox".to_string(),
        "-Z4".to_string(),
        format!("--output={}", out.display()),
        dvi.path().display().to_string(),
    ]
}

/// Run `dvisvgm` on `dvi`.
pub fn vectorize(
    dvisvgm: &Path,
    ws: &Workspace,
    dvi: &DviDocument,
) -> Result<SvgImage, RenderError> {
    let svg = ws.artifact("svg");
    tool::run(dvisvgm, dvisvgm_args(dvi, &svg), ws.path()).map_err(RenderError::Vectorize)?;

    if !svg.is_file() {
        return Err(RenderError::Vectorize(ToolFailure::MissingArtifact {
            program: tool::program_name(dvisvgm),
            path: svg,
        }));
    }

    debug!("Vectorized SVG: {}", svg.display());
    Ok(SvgImage(svg))
}
