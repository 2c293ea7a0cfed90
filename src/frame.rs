//! Payload frame construction and parsing.
//!
//! The inner frame is the logical byte stream hidden in the carrier:
//!
//! ```text
//! [4 bytes] real size (big-endian u32)
//! [N bytes] file data
//! [M bytes] extension string, NUL-terminated (".png\0")
//! ```
//!
//! When encryption is enabled the whole inner frame is encrypted and
//! wrapped in an outer frame with the same length-prefix pattern:
//!
//! ```text
//! [4 bytes] ciphertext size (big-endian u32)
//! [N bytes] ciphertext
//! ```

use std::path::Path;

use crate::config::{DEFAULT_EXTENSION, MAX_EXTENSION_LEN};
use crate::error::{Error, Result};

/// Parsed inner frame: the recovered file bytes and their extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerFrame {
    pub data: Vec<u8>,
    pub extension: String,
}

/// Dot-prefixed extension of `path`, or `.bin` when it has none.
pub fn extension_for_path(path: &Path) -> String {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if !ext.is_empty() => format!(".{ext}"),
        _ => DEFAULT_EXTENSION.to_string(),
    }
}

/// Build the inner frame for `data` with the given dot-prefixed extension.
pub fn build_inner_frame(data: &[u8], extension: &str) -> Result<Vec<u8>> {
    if data.len() > u32::MAX as usize {
        return Err(Error::InvalidArgument(format!(
            "payload of {} bytes exceeds the u32 length prefix",
            data.len()
        )));
    }
    if extension.len() + 1 > MAX_EXTENSION_LEN {
        return Err(Error::InvalidArgument(format!(
            "extension '{extension}' longer than {} bytes",
            MAX_EXTENSION_LEN - 1
        )));
    }
    if extension.as_bytes().contains(&0) {
        return Err(Error::InvalidArgument(
            "extension contains a NUL byte".to_string(),
        ));
    }

    let mut frame = Vec::with_capacity(4 + data.len() + extension.len() + 1);
    frame.extend_from_slice(&(data.len() as u32).to_be_bytes());
    frame.extend_from_slice(data);
    frame.extend_from_slice(extension.as_bytes());
    frame.push(0);
    Ok(frame)
}

/// Parse an inner frame: read the length prefix, slice the file data and
/// scan the tail for the NUL-terminated extension.
///
/// `bytes` may carry trailing garbage after the terminator (cipher block
/// padding); the scan is bounded by [`MAX_EXTENSION_LEN`].
pub fn parse_inner_frame(bytes: &[u8]) -> Result<InnerFrame> {
    if bytes.len() < 4 {
        return Err(Error::MalformedStream(
            "frame shorter than its length prefix".to_string(),
        ));
    }

    let real_size = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
    let rest = &bytes[4..];
    if rest.len() < real_size {
        return Err(Error::MalformedStream(format!(
            "declared size {real_size} exceeds the {} bytes present",
            rest.len()
        )));
    }

    let data = rest[..real_size].to_vec();
    let tail = &rest[real_size..];
    let window = &tail[..tail.len().min(MAX_EXTENSION_LEN)];
    let nul = window
        .iter()
        .position(|&b| b == 0)
        .ok_or(Error::ExtensionNotFound)?;

    let extension = std::str::from_utf8(&window[..nul])
        .map_err(|_| Error::MalformedStream("extension is not valid UTF-8".to_string()))?
        .to_string();

    Ok(InnerFrame { data, extension })
}

/// Wrap ciphertext in the outer length-prefixed frame.
pub fn build_outer_frame(ciphertext: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(4 + ciphertext.len());
    frame.extend_from_slice(&(ciphertext.len() as u32).to_be_bytes());
    frame.extend_from_slice(ciphertext);
    frame
}

/// Unwrap an outer frame, returning the ciphertext slice.
pub fn parse_outer_frame(bytes: &[u8]) -> Result<&[u8]> {
    if bytes.len() < 4 {
        return Err(Error::MalformedStream(
            "frame shorter than its length prefix".to_string(),
        ));
    }
    let cipher_size = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
    if bytes.len() - 4 < cipher_size {
        return Err(Error::MalformedStream(format!(
            "declared ciphertext size {cipher_size} exceeds the {} bytes present",
            bytes.len() - 4
        )));
    }
    Ok(&bytes[4..4 + cipher_size])
}
