//! Stage C: `inkscape` turns `source.svg` into `source.png`, then the PNG is
//! read back into memory.
//!
//! Only the output height is pinned (`scale × 50` px); Inkscape derives the
//! width from the SVG's aspect ratio. The result is decoded far enough to
//! read its dimensions, which also rejects a tool that wrote something that
//! is not a PNG.

use super::tool;
use super::vectorize::SvgImage;
use super::workspace::Workspace;
use crate::config::InkscapeCli;
use crate::error::{RenderError, ToolFailure};
use crate::output::RenderedImage;
use image::{ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The raster image produced by `inkscape`, still inside the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngImage(pub(crate) PathBuf);

impl PngImage {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Arguments passed to `inkscape`.
pub fn inkscape_args(cli: InkscapeCli, svg: &SvgImage, height: u32, out: &Path) -> Vec<String> {
    let mut args = vec![
        svg.path().display().to_string(),
        format!("--export-height={height}"),
    ];
    args.extend(cli.output_args(out));
    args
}

/// Run `inkscape` on `svg` with the requested pixel height.
pub fn rasterize(
    inkscape: &Path,
    cli: InkscapeCli,
    ws: &Workspace,
    svg: &SvgImage,
    height: u32,
) -> Result<PngImage, RenderError> {
    let png = ws.artifact("png");
    tool::run(inkscape, inkscape_args(cli, svg, height, &png), ws.path())
        .map_err(RenderError::Rasterize)?;

    if !png.is_file() {
        return Err(RenderError::Rasterize(ToolFailure::MissingArtifact {
            program: tool::program_name(inkscape),
            path: png,
        }));
    }

    debug!("Rasterized PNG: {}", png.display());
    Ok(PngImage(png))
}

/// Read the finished PNG fully into memory.
///
/// Must run before the workspace is removed; the returned image owns its
/// bytes and no longer depends on the file.
pub fn load(inkscape: &Path, png: &PngImage) -> Result<RenderedImage, RenderError> {
    let bytes = std::fs::read(png.path()).map_err(|source| RenderError::Io {
        path: png.path().to_path_buf(),
        source,
    })?;

    let invalid = |detail: String| {
        RenderError::Rasterize(ToolFailure::InvalidArtifact {
            program: tool::program_name(inkscape),
            path: png.path().to_path_buf(),
            detail,
        })
    };

    let (width, height) = ImageReader::with_format(Cursor::new(&bytes), ImageFormat::Png)
        .into_dimensions()
        .map_err(|e| invalid(e.to_string()))?;

    debug!("Loaded PNG: {}x{} px, {} bytes", width, height, bytes.len());
    Ok(RenderedImage::new(bytes, width, height))
}
