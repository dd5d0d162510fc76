//! Pipeline stages for LaTeX-to-PNG rendering.
//!
//! Each submodule implements exactly one transformation step and consumes
//! the typed artifact of the step before it, so stages cannot run out of
//! order.
//!
//! ## Data Flow
//!
//! ```text
//! request ──▶ source ──▶ typeset ──▶ vectorize ──▶ rasterize
//!            (.tex)     (latex→.dvi) (dvisvgm→.svg) (inkscape→.png)
//! ```
//!
//! 1. [`workspace`] — uniquely named temp dir owned by one render call
//! 2. [`source`]    — the fixed standalone document around the expression
//! 3. [`typeset`]   — `latex` in batch mode; failures go through [`diagnostic`]
//! 4. [`vectorize`] — `dvisvgm` with fonts converted to paths
//! 5. [`rasterize`] — `inkscape` at `scale × 50` px, then read into memory
//!
//! [`tool`] runs the external processes for stages 3–5.

pub mod diagnostic;
pub mod rasterize;
pub mod source;
pub mod tool;
pub mod typeset;
pub mod vectorize;
pub mod workspace;

use serde::Serialize;
use std::fmt;

/// Position of a render call in the stage sequence.
///
/// Transitions are one-way: `Start → WorkspaceReady → SourceWritten →
/// Typeset → Vectorized → Rasterized → Done`. A failure at any point ends
/// the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStage {
    Start,
    WorkspaceReady,
    SourceWritten,
    Typeset,
    Vectorized,
    Rasterized,
    Done,
}

impl fmt::Display for RenderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RenderStage::Start => "start",
            RenderStage::WorkspaceReady => "workspace ready",
            RenderStage::SourceWritten => "source written",
            RenderStage::Typeset => "typeset",
            RenderStage::Vectorized => "vectorized",
            RenderStage::Rasterized => "rasterized",
            RenderStage::Done => "done",
        };
        f.write_str(name)
    }
}
