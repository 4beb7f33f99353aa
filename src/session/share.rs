//! Shareable URL fragments
//!
//! Encodes `{content, fileType}` as URL-safe unpadded base64, suitable for
//! appending after `#` in a link. Theme is deliberately not part of the
//! payload; the recipient keeps their own.

use anyhow::{Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::document::{DocumentState, FileType};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SharePayload {
    content: String,
    file_type: FileType,
}

/// Decoded share fragment: just the content and its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedDocument {
    pub content: String,
    pub file_type: FileType,
}

/// Encode document content and type as a URL fragment (without the `#`).
pub fn encode_fragment(doc: &DocumentState) -> String {
    let payload = SharePayload {
        content: doc.content.clone(),
        file_type: doc.file_type,
    };
    // Serializing a two-field struct of plain values cannot fail
    let json = serde_json::to_string(&payload).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Decode a URL fragment back into content and type.
///
/// Accepts the fragment with or without its leading `#`. Any decode or
/// parse failure is an error for the caller to fall back on.
pub fn decode_fragment(fragment: &str) -> Result<SharedDocument> {
    let encoded = fragment.strip_prefix('#').unwrap_or(fragment);
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .context("Share fragment is not valid base64")?;
    let json = String::from_utf8(bytes).context("Share fragment is not valid UTF-8")?;
    let payload: SharePayload =
        serde_json::from_str(&json).context("Share fragment payload is not valid")?;

    Ok(SharedDocument {
        content: payload.content,
        file_type: payload.file_type,
    })
}
