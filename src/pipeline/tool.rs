//! Blocking invocation of an external command-line tool.
//!
//! Each stage runs its tool with stdin closed, the workspace as working
//! directory, and stdout + stderr captured. There is no timeout: a tool that
//! hangs blocks its render call until it exits.

use crate::error::ToolFailure;
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;
use tracing::{debug, warn};

/// Run `program` with `args` inside `cwd` and wait for it to finish.
///
/// # Returns
/// - `Ok(output)` — the process exited with status 0
/// - `Err(ToolFailure::Launch)` — the process could not be spawned
/// - `Err(ToolFailure::Exit)` — non-zero exit; carries the captured output
pub fn run<I, S>(program: &Path, args: I, cwd: &Path) -> Result<String, ToolFailure>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let name = program_name(program);
    let started = Instant::now();

    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| {
            warn!("Failed to launch {}: {}", name, source);
            ToolFailure::Launch {
                program: name.clone(),
                source,
            }
        })?;

    let combined = combine_output(&output.stdout, &output.stderr);
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if !output.status.success() {
        warn!(
            "{} failed with {:?} after {}ms",
            name,
            output.status.code(),
            elapsed_ms
        );
        return Err(ToolFailure::Exit {
            program: name,
            code: output.status.code(),
            output: combined,
        });
    }

    debug!("{} finished in {}ms", name, elapsed_ms);
    Ok(combined)
}

/// Short display name for a tool path, e.g. `/usr/bin/latex` → `latex`.
pub fn program_name(program: &Path) -> String {
    program
        .file_name()
        .unwrap_or(program.as_os_str())
        .to_string_lossy()
        .into_owned()
}

fn combine_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(stdout).into_owned();
    if !stderr.is_empty() {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&String::from_utf8_lossy(stderr));
    }
    text
}
