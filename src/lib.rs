//! # texbot
//!
//! Render the `$$…$$` LaTeX expression in a chat message to a PNG.
//!
//! ## Why shell out?
//!
//! A real TeX installation typesets anything a user can paste from a paper:
//! `amsmath` environments, `siunitx` units, arbitrary macros. Pure-Rust math
//! renderers cover a subset. This crate drives the standard tools and keeps
//! the awkward parts (scratch directories, cleanup, TeX's error output) in
//! one place.
//!
//! ## Pipeline Overview
//!
//! ```text
//! message text
//!  │
//!  ├─ 1. Extract    first $$…$$ block + optional [scale]
//!  ├─ 2. Workspace  unique temp dir, removed on every exit path
//!  ├─ 3. Source     standalone document, white text, inline math
//!  ├─ 4. Typeset    latex → DVI (errors → diagnostic)
//!  ├─ 5. Vectorize  dvisvgm → SVG
//!  ├─ 6. Rasterize  inkscape → PNG at scale × 50 px
//!  └─ 7. Output     PNG bytes in memory
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use texbot::{extract, render, RenderConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RenderConfig::default();
//!     if let Some(request) = extract(r"look: $$ e^{i\pi} + 1 = 0 $$[3]")? {
//!         match render(request, &config).await {
//!             Ok(image) => std::fs::write("render.png", image.as_bytes())?,
//!             Err(e) => eprintln!("{e} {}", e.diagnostic().unwrap_or("")),
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `texbot` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! ## Requirements
//!
//! `latex` (with the `standalone`, `amsmath`, `amsfonts`, `xcolor` and
//! `siunitx` packages), `dvisvgm` and `inkscape` must be installed. Their
//! locations are set in [`RenderConfig`].

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod message;
pub mod output;
pub mod pipeline;
pub mod render;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{InkscapeCli, RenderConfig, RenderConfigBuilder};
pub use error::{ConfigError, ErrorKind, ExtractError, RenderError, ToolFailure};
pub use extract::{extract, RenderRequest, DEFAULT_SCALE};
pub use message::{handle_message, Reply, USAGE_HINT};
pub use output::{RenderSummary, RenderedImage};
pub use pipeline::diagnostic::extract_diagnostic;
pub use render::{render, render_blocking};
