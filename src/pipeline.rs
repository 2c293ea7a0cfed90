//! Embed/extract orchestration.
//!
//! Sequences framing, the optional cipher and the chosen bit codec. Every
//! operation is all-or-nothing: the first error aborts the pipeline and
//! nothing is written.

use std::path::Path;

use crate::bmp::BmpImage;
use crate::config::{CipherConfig, MAX_EXTENSION_LEN};
use crate::crypto;
use crate::error::{Error, Result};
use crate::frame;
use crate::stego::{self, capacity, PayloadDecoder, StegoMethod};

/// Outcome of a successful embed operation.
#[derive(Debug)]
pub struct EmbedReport {
    /// Total bytes written into the carrier, frame overhead included.
    pub embedded_bytes: usize,
    /// Carrier capacity for the chosen method.
    pub capacity_bytes: usize,
    /// Extension recorded in the inner frame.
    pub extension: String,
    /// Whether the payload was encrypted.
    pub encrypted: bool,
}

/// Outcome of a successful extract operation.
#[derive(Debug)]
pub struct ExtractReport {
    /// Bytes recovered and written to the output file.
    pub recovered_bytes: usize,
    /// Extension recovered from the inner frame.
    pub extension: String,
    /// Whether the payload was decrypted.
    pub decrypted: bool,
}

/// Hide `input` inside `carrier` and write the result to `output`.
pub fn embed(
    input: &Path,
    carrier: &Path,
    output: &Path,
    method: StegoMethod,
    cipher: Option<&CipherConfig>,
) -> Result<EmbedReport> {
    let data = std::fs::read(input)?;
    let extension = frame::extension_for_path(input);
    let inner = frame::build_inner_frame(&data, &extension)?;

    let payload = match cipher {
        Some(config) => {
            let ciphertext = crypto::encrypt(&inner, config)?;
            frame::build_outer_frame(&ciphertext)
        }
        None => inner,
    };

    let mut bmp = BmpImage::load(carrier)?;
    let geo = bmp.geometry();
    capacity::ensure_fits(method, &geo, payload.len())?;
    stego::embed_payload(bmp.pixels_mut(), &geo, method, &payload)?;
    bmp.save(output)?;

    Ok(EmbedReport {
        embedded_bytes: payload.len(),
        capacity_bytes: capacity::max_payload_bytes(method, &geo),
        extension,
        encrypted: cipher.is_some(),
    })
}

/// Recover the hidden file from `carrier` and write it to `output`.
pub fn extract(
    carrier: &Path,
    output: &Path,
    method: StegoMethod,
    cipher: Option<&CipherConfig>,
) -> Result<ExtractReport> {
    let bmp = BmpImage::load(carrier)?;
    let geo = bmp.geometry();
    let mut decoder = PayloadDecoder::new(bmp.pixels(), geo, method)?;

    let header = decoder.read_bytes(4)?;
    let declared = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;

    // The declared size plus its own prefix can never exceed what the
    // carrier holds; anything larger means we are not reading a payload.
    let capacity = capacity::max_payload_bytes(method, &geo);
    if declared.saturating_add(4) > capacity {
        return Err(Error::MalformedStream(format!(
            "declared size {declared} exceeds carrier capacity {capacity}"
        )));
    }

    let inner = if let Some(config) = cipher {
        let body = decoder.read_bytes(declared)?;
        let mut outer = header;
        outer.extend_from_slice(&body);
        let ciphertext = frame::parse_outer_frame(&outer)?;
        let plaintext = crypto::decrypt(ciphertext, config)?;
        frame::parse_inner_frame(&plaintext)?
    } else {
        // Unencrypted: the declared size is the real payload size. The
        // extension length is unknown, so keep reading one byte at a time
        // until the terminator shows up or the bound is exceeded.
        let body = decoder.read_bytes(declared)?;
        let mut raw = header;
        raw.extend_from_slice(&body);

        let mut terminated = false;
        for _ in 0..MAX_EXTENSION_LEN {
            let byte = match decoder.read_bytes(1) {
                Ok(byte) => byte,
                Err(Error::InsufficientCapacity { .. }) => return Err(Error::ExtensionNotFound),
                Err(e) => return Err(e),
            };
            raw.push(byte[0]);
            if byte[0] == 0 {
                terminated = true;
                break;
            }
        }
        if !terminated {
            return Err(Error::ExtensionNotFound);
        }

        frame::parse_inner_frame(&raw)?
    };

    std::fs::write(output, &inner.data)?;

    Ok(ExtractReport {
        recovered_bytes: inner.data.len(),
        extension: inner.extension,
        decrypted: cipher.is_some(),
    })
}
