//! Configuration types for the render pipeline.
//!
//! All environment-dependent behaviour is controlled through [`RenderConfig`],
//! built via its [`RenderConfigBuilder`]. The command-line flags passed to each
//! tool are fixed by the pipeline; only *where* the tools live, which Inkscape
//! CLI dialect they speak, and where workspaces are created can change.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a render call.
///
/// Built via [`RenderConfig::builder()`] or using [`RenderConfig::default()`].
///
/// # Example
/// ```rust
/// use texbot::{InkscapeCli, RenderConfig};
///
/// let config = RenderConfig::builder()
///     .latex_path("/usr/bin/latex")
///     .inkscape_cli(InkscapeCli::Modern)
///     .build()
///     .unwrap();
/// assert_eq!(config.inkscape_cli, InkscapeCli::Modern);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Typesetting engine producing DVI output. Default: `latex` on `PATH`.
    pub latex_path: PathBuf,

    /// DVI → SVG converter. Default: `dvisvgm` on `PATH`.
    pub dvisvgm_path: PathBuf,

    /// SVG → PNG converter. Default: `inkscape` on `PATH`.
    pub inkscape_path: PathBuf,

    /// Which Inkscape command-line dialect to use. Default: [`InkscapeCli::Legacy`].
    pub inkscape_cli: InkscapeCli,

    /// Parent directory for per-render workspaces.
    /// If None, uses the system temporary directory.
    pub workspace_root: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            latex_path: PathBuf::from("latex"),
            dvisvgm_path: PathBuf::from("dvisvgm"),
            inkscape_path: PathBuf::from("inkscape"),
            inkscape_cli: InkscapeCli::default(),
            workspace_root: None,
        }
    }
}

impl RenderConfig {
    /// Create a new builder for `RenderConfig`.
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`RenderConfig`].
#[derive(Debug)]
pub struct RenderConfigBuilder {
    config: RenderConfig,
}

impl RenderConfigBuilder {
    pub fn latex_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.latex_path = path.into();
        self
    }

    pub fn dvisvgm_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.dvisvgm_path = path.into();
        self
    }

    pub fn inkscape_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.inkscape_path = path.into();
        self
    }

    pub fn inkscape_cli(mut self, cli: InkscapeCli) -> Self {
        self.config.inkscape_cli = cli;
        self
    }

    pub fn workspace_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.workspace_root = Some(dir.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RenderConfig, ConfigError> {
        let c = &self.config;
        for (name, path) in [
            ("latex", &c.latex_path),
            ("dvisvgm", &c.dvisvgm_path),
            ("inkscape", &c.inkscape_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::EmptyToolPath { tool: name });
            }
        }
        if let Some(root) = &c.workspace_root {
            if !root.is_dir() {
                return Err(ConfigError::WorkspaceRootMissing { path: root.clone() });
            }
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Inkscape command-line dialect.
///
/// Inkscape 1.0 removed `--export-png`; the replacement needs an explicit
/// export type. Both dialects receive the same `--export-height`.
///
/// | Dialect | Output flags |
/// |---------|--------------|
/// | `Legacy` | `--export-png=<out>` (Inkscape 0.92) |
/// | `Modern` | `--export-type=png --export-filename=<out>` (Inkscape ≥ 1.0) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InkscapeCli {
    /// `--export-png=<out>`. (default)
    #[default]
    Legacy,
    /// `--export-type=png --export-filename=<out>`.
    Modern,
}

impl InkscapeCli {
    /// Output-selection arguments for this dialect.
    pub fn output_args(&self, out: &Path) -> Vec<String> {
        match self {
            InkscapeCli::Legacy => vec![format!("--export-png={}", out.display())],
            InkscapeCli::Modern => vec![
                "--export-type=png".to_string(),
                format!("--export-filename={}", out.display()),
            ],
        }
    }
}
