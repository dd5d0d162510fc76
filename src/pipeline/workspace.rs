//! Per-render scratch directory.
//!
//! Every artifact of one render (`source.tex`, `source.dvi`, `source.svg`,
//! `source.png`) lives in a uniquely named [`TempDir`]. The directory is
//! removed when [`Workspace::close`] runs at the end of the pipeline, or by
//! `TempDir`'s `Drop` if the pipeline unwinds before reaching it.

use crate::config::RenderConfig;
use crate::error::RenderError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

const WORKSPACE_PREFIX: &str = "texbot";

/// File stem shared by all artifacts in a workspace.
const STEM: &str = "source";

/// A uniquely named temporary directory owned by one render call.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a fresh workspace under `config.workspace_root` or the system
    /// temp dir.
    pub fn create(config: &RenderConfig) -> Result<Self, RenderError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(WORKSPACE_PREFIX);
        let dir = match &config.workspace_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(RenderError::Workspace)?;

        debug!("Created workspace: {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the artifact with the given extension, e.g. `source.dvi`.
    pub fn artifact(&self, extension: &str) -> PathBuf {
        self.dir.path().join(format!("{STEM}.{extension}"))
    }

    /// Remove the workspace and everything in it.
    ///
    /// Removal errors are logged, not returned: by the time this runs the
    /// render result is already decided.
    pub fn close(self) {
        let path = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => debug!("Removed workspace: {}", path.display()),
            Err(e) => warn!("Failed to remove workspace {}: {}", path.display(), e),
        }
    }
}
