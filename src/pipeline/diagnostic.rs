//! Pull the human-readable reason out of a failed `latex` run.
//!
//! TeX reports a fatal error as a line starting with `! `, then context
//! lines, then (with `-halt-on-error`) `No pages of output.`. We return the
//! text between those two markers. This is a string heuristic tied to TeX's
//! exact phrasing: a TeX distribution that words things differently yields
//! `None`, and callers show an empty diagnostic.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_LATEX_ERROR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\n)! ([\s\S]+)\nNo pages").unwrap());

/// Extract the first `! …` error block from captured `latex` output.
pub fn extract_diagnostic(output: &str) -> Option<String> {
    RE_LATEX_ERROR
        .captures(output)
        .map(|caps| caps[1].to_string())
}
