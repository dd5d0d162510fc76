//! Render entry points.
//!
//! [`render_blocking`] drives the whole pipeline on the calling thread; each
//! external tool blocks it until the tool exits. [`render`] is the async
//! wrapper: it moves the same work onto tokio's blocking pool so runtime
//! worker threads never wait on `latex` or `inkscape`.
//!
//! Calls are independent. Each one gets its own workspace and its own child
//! processes; nothing limits how many run at once.

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::extract::RenderRequest;
use crate::output::RenderedImage;
use crate::pipeline::workspace::Workspace;
use crate::pipeline::{rasterize, source, typeset, vectorize, RenderStage};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Render `request` to a PNG without blocking the async runtime.
///
/// # Errors
/// See [`render_blocking`]. Additionally returns [`RenderError::Internal`]
/// if the blocking task panics.
pub async fn render(
    request: RenderRequest,
    config: &RenderConfig,
) -> Result<RenderedImage, RenderError> {
    let config = config.clone();
    tokio::task::spawn_blocking(move || render_blocking(&request, &config))
        .await
        .map_err(|e| RenderError::Internal(format!("Render task panicked: {}", e)))?
}

/// Render `request` to a PNG on the current thread.
///
/// The workspace is created first and removed last, whatever happens in
/// between; the returned image is already in memory.
///
/// # Errors
/// The first failing stage ends the call:
/// - [`RenderError::Workspace`] — temp dir could not be created
/// - [`RenderError::Io`] — `source.tex` could not be written or `source.png` read
/// - [`RenderError::Typeset`] — `latex` rejected the expression (with diagnostic)
/// - [`RenderError::Vectorize`] — `dvisvgm` failed
/// - [`RenderError::Rasterize`] — `inkscape` failed or wrote no valid PNG
pub fn render_blocking(
    request: &RenderRequest,
    config: &RenderConfig,
) -> Result<RenderedImage, RenderError> {
    let started = Instant::now();
    info!(
        "Rendering expression '{}' at scale {}",
        request.expression(),
        request.scale()
    );

    let ws = Workspace::create(config)?;
    let result = run_stages(&ws, request, config, started);
    ws.close();

    match &result {
        Ok(img) => info!(
            "Rendered {}x{} px in {}ms",
            img.width(),
            img.height(),
            started.elapsed().as_millis()
        ),
        Err(e) => warn!(
            "Render failed ({}) after {}ms: {}",
            e.kind(),
            started.elapsed().as_millis(),
            e
        ),
    }
    result
}

/// Stages 2–6, all inside `ws`.
fn run_stages(
    ws: &Workspace,
    request: &RenderRequest,
    config: &RenderConfig,
    started: Instant,
) -> Result<RenderedImage, RenderError> {
    reached(RenderStage::WorkspaceReady, started);

    let source = source::write_source(ws, request)?;
    reached(RenderStage::SourceWritten, started);

    let dvi = typeset::typeset(&config.latex_path, ws, &source)?;
    reached(RenderStage::Typeset, started);

    let svg = vectorize::vectorize(&config.dvisvgm_path, ws, &dvi)?;
    reached(RenderStage::Vectorized, started);

    let png = rasterize::rasterize(
        &config.inkscape_path,
        config.inkscape_cli,
        ws,
        &svg,
        request.target_height(),
    )?;
    reached(RenderStage::Rasterized, started);

    let image = rasterize::load(&config.inkscape_path, &png)?;
    reached(RenderStage::Done, started);

    Ok(image)
}

fn reached(stage: RenderStage, started: Instant) {
    debug!("Stage {} reached at {}ms", stage, started.elapsed().as_millis());
}
