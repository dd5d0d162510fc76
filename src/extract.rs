//! Expression extraction: find the `$$…$$` block in a chat message.
//!
//! Grammar: `$$ <body> $$` optionally followed by `[<digits>]`, e.g.
//! `$$ \frac{1}{2} $$[3]`. Only the first block in the text is considered,
//! and the body cannot contain a `$` (there is no escape mechanism).
//!
//! The body is trimmed of outer whitespace only; braces, backslashes and
//! newlines inside it reach `latex` verbatim.

use crate::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Scale used when the message has no `[N]` suffix.
pub const DEFAULT_SCALE: u32 = 4;

/// Output pixel height per unit of scale.
pub const PIXELS_PER_SCALE: u32 = 50;

/// Largest scale whose pixel height still fits in a `u32`.
pub const MAX_SCALE: u32 = u32::MAX / PIXELS_PER_SCALE;

static RE_EXPRESSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\$\s*([^$]+)\s*\$\$(\[(\d+)\])?").unwrap());

/// A validated render request: one expression and its scale.
///
/// Fields are private so the invariants (non-empty trimmed expression,
/// scale in `1..=MAX_SCALE`) hold for every value in circulation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RenderRequest {
    expression: String,
    scale: u32,
}

impl RenderRequest {
    /// Build a request, trimming `expression` and validating `scale`.
    pub fn new(expression: impl AsRef<str>, scale: u32) -> Result<Self, ExtractError> {
        let expression = expression.as_ref().trim();
        if expression.is_empty() {
            return Err(ExtractError::EmptyExpression);
        }
        Ok(Self {
            expression: expression.to_string(),
            scale: validate_scale(scale, || scale.to_string())?,
        })
    }

    /// Same expression, different scale.
    pub fn with_scale(self, scale: u32) -> Result<Self, ExtractError> {
        Ok(Self {
            scale: validate_scale(scale, || scale.to_string())?,
            ..self
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Pixel height requested from the rasteriser: `scale × 50`.
    pub fn target_height(&self) -> u32 {
        // Cannot overflow: scale <= MAX_SCALE.
        self.scale * PIXELS_PER_SCALE
    }
}

/// Scan `text` for the first `$$…$$` block.
///
/// # Returns
/// - `Ok(Some(request))` — a block with a non-empty body was found
/// - `Ok(None)` — no block, or the body is only whitespace
/// - `Err(ExtractError::InvalidScale)` — the `[N]` suffix is zero or too large
pub fn extract(text: &str) -> Result<Option<RenderRequest>, ExtractError> {
    let Some(caps) = RE_EXPRESSION.captures(text) else {
        return Ok(None);
    };

    let body = caps[1].trim();
    if body.is_empty() {
        return Ok(None);
    }

    let scale = match caps.get(3) {
        Some(raw) => parse_scale(raw.as_str())?,
        None => DEFAULT_SCALE,
    };

    Ok(Some(RenderRequest {
        expression: body.to_string(),
        scale,
    }))
}

fn parse_scale(raw: &str) -> Result<u32, ExtractError> {
    let invalid = || ExtractError::InvalidScale {
        raw: raw.to_string(),
        max: MAX_SCALE,
    };
    let scale: u32 = raw.parse().map_err(|_| invalid())?;
    validate_scale(scale, || raw.to_string())
}

fn validate_scale(scale: u32, raw: impl FnOnce() -> String) -> Result<u32, ExtractError> {
    if scale == 0 || scale > MAX_SCALE {
        return Err(ExtractError::InvalidScale {
            raw: raw(),
            max: MAX_SCALE,
        });
    }
    Ok(scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn must_match(text: &str) -> RenderRequest {
        extract(text)
            .expect("extract should not fail")
            .expect("expected a match")
    }

    #[test]
    fn plain_expression_gets_default_scale() {
        let r = must_match("$$hello$$");
        assert_eq!(r.expression(), "hello");
        assert_eq!(r.scale(), 4);
    }

    #[test]
    fn outer_whitespace_is_trimmed() {
        let r = must_match("$$  hello   $$");
        assert_eq!(r.expression(), "hello");
        assert_eq!(r.scale(), 4);
    }

    #[test]
    fn scale_suffix_is_parsed() {
        let r = must_match("$$hello$$[3]");
        assert_eq!(r.expression(), "hello");
        assert_eq!(r.scale(), 3);
        assert_eq!(r.target_height(), 150);
    }

    #[test]
    fn complex_body_is_preserved() {
        let text = "look: $$\n  \\begin{pmatrix} 1 & 0 \\\\\n 0 & 1 \\end{pmatrix}\n $$ neat";
        let r = must_match(text);
        assert_eq!(
            r.expression(),
            "\\begin{pmatrix} 1 & 0 \\\\\n 0 & 1 \\end{pmatrix}"
        );
    }

    #[test]
    fn nested_braces_survive() {
        let r = must_match(r"$$\frac{a^{2}}{\sqrt{b_{i}}}$$");
        assert_eq!(r.expression(), r"\frac{a^{2}}{\sqrt{b_{i}}}");
    }

    #[test]
    fn no_delimiters_is_no_match() {
        assert_eq!(extract("no math here").unwrap(), None);
        assert_eq!(extract("$single$ dollars").unwrap(), None);
    }

    #[test]
    fn whitespace_body_is_no_match() {
        assert_eq!(extract("$$   $$").unwrap(), None);
    }

    #[test]
    fn only_first_block_counts() {
        let r = must_match("$$a$$[2] and $$b$$[5]");
        assert_eq!(r.expression(), "a");
        assert_eq!(r.scale(), 2);
    }

    #[test]
    fn non_numeric_suffix_is_ignored() {
        let r = must_match("$$x$$[big]");
        assert_eq!(r.expression(), "x");
        assert_eq!(r.scale(), DEFAULT_SCALE);
    }

    #[test]
    fn zero_scale_is_invalid() {
        let err = extract("$$x$$[0]").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidScale { ref raw, .. } if raw == "0"));
    }

    #[test]
    fn overflowing_scale_is_invalid() {
        let err = extract("$$x$$[99999999999999999999]").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidScale { .. }));

        let too_big = format!("$$x$$[{}]", MAX_SCALE as u64 + 1);
        assert!(extract(&too_big).is_err());

        let max = format!("$$x$$[{MAX_SCALE}]");
        assert_eq!(must_match(&max).scale(), MAX_SCALE);
    }

    #[test]
    fn extraction_is_deterministic() {
        let text = "$$ e^{i\\pi} + 1 = 0 $$[2]";
        assert_eq!(extract(text).unwrap(), extract(text).unwrap());
    }

    #[test]
    fn request_new_validates() {
        assert_eq!(
            RenderRequest::new("   ", 4).unwrap_err(),
            ExtractError::EmptyExpression
        );
        assert!(RenderRequest::new("x", 0).is_err());

        let r = RenderRequest::new("  x  ", 2).unwrap();
        assert_eq!(r.expression(), "x");
        assert_eq!(r.scale(), 2);

        let r = r.with_scale(7).unwrap();
        assert_eq!(r.scale(), 7);
        assert_eq!(r.expression(), "x");
    }
}
