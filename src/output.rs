//! Output types: the rendered image and a serialisable summary of a render.

use crate::error::{ErrorKind, RenderError};
use crate::extract::RenderRequest;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// A finished render: PNG bytes plus their pixel dimensions.
///
/// The bytes are owned; the workspace the PNG came from is already gone by
/// the time a caller sees this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl RenderedImage {
    pub(crate) fn new(bytes: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            bytes,
            width,
            height,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// A reader over the PNG bytes, for upload APIs that take `impl Read`.
    pub fn reader(&self) -> Cursor<&[u8]> {
        Cursor::new(self.bytes.as_slice())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn content_type(&self) -> &'static str {
        "image/png"
    }

    /// Attachment name used when delivering the image.
    pub fn file_name(&self) -> &'static str {
        "render.png"
    }

    /// `data:image/png;base64,…` form, for HTML or JSON embedding.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.content_type(), STANDARD.encode(&self.bytes))
    }
}

/// Flat, serialisable record of one render attempt.
///
/// Exactly one of (`width`, `height`, `bytes`) or `error_kind` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSummary {
    pub expression: String,
    pub scale: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// LaTeX diagnostic; present (possibly empty) only for typeset failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl RenderSummary {
    pub fn new(request: &RenderRequest, result: &Result<RenderedImage, RenderError>) -> Self {
        let mut summary = Self {
            expression: request.expression().to_string(),
            scale: request.scale(),
            width: None,
            height: None,
            bytes: None,
            error_kind: None,
            error: None,
            diagnostic: None,
        };
        match result {
            Ok(img) => {
                summary.width = Some(img.width());
                summary.height = Some(img.height());
                summary.bytes = Some(img.as_bytes().len());
            }
            Err(e) => {
                summary.error_kind = Some(e.kind());
                summary.error = Some(e.to_string());
                summary.diagnostic = e.diagnostic().map(str::to_string);
            }
        }
        summary
    }

    pub fn is_success(&self) -> bool {
        self.error_kind.is_none()
    }
}
