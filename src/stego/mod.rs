//! Steganographic bit codecs over the carrier's pixel components.
//!
//! This module provides:
//! - Component addressing over the padded pixel buffer
//! - The three embedding codecs: LSB1, LSB4 and LSBI
//! - Capacity planning and a cursor-threading payload decoder

pub mod capacity;
pub mod component;
pub mod lsb1;
pub mod lsb4;
pub mod lsbi;

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub use component::{Channel, ComponentRef, Geometry};
pub use lsbi::LsbiDecoder;

/// Steganography method selecting which bit codec to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StegoMethod {
    /// One payload bit per component LSB.
    Lsb1,
    /// Four payload bits per component low nibble.
    Lsb4,
    /// One payload bit per green/blue component, with adaptive inversion.
    Lsbi,
}

impl FromStr for StegoMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "LSB1" => Ok(StegoMethod::Lsb1),
            "LSB4" => Ok(StegoMethod::Lsb4),
            "LSBI" => Ok(StegoMethod::Lsbi),
            _ => Err(Error::InvalidArgument(format!(
                "unknown steganography method '{s}' (expected LSB1, LSB4 or LSBI)"
            ))),
        }
    }
}

impl fmt::Display for StegoMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StegoMethod::Lsb1 => "LSB1",
            StegoMethod::Lsb4 => "LSB4",
            StegoMethod::Lsbi => "LSBI",
        };
        f.write_str(name)
    }
}

/// Embed the complete payload starting at the first component.
pub fn embed_payload(
    pixels: &mut [u8],
    geo: &Geometry,
    method: StegoMethod,
    payload: &[u8],
) -> Result<()> {
    let num_bits = payload.len() * 8;
    match method {
        StegoMethod::Lsb1 => lsb1::embed(pixels, geo, payload, num_bits, 0)?,
        StegoMethod::Lsb4 => lsb4::embed(pixels, geo, payload, num_bits, 0)?,
        StegoMethod::Lsbi => lsbi::embed(pixels, geo, payload, num_bits, 0)?,
    };
    Ok(())
}

/// Cursor-threading reader over an embedded payload.
///
/// Extraction reads the stream field by field (length header, body,
/// extension tail); the decoder keeps the component cursor, and for LSBI
/// the pattern map, across calls.
pub struct PayloadDecoder<'a> {
    pixels: &'a [u8],
    geo: Geometry,
    state: DecoderState,
}

enum DecoderState {
    Plain { method: StegoMethod, cursor: usize },
    Inverted(LsbiDecoder),
}

impl<'a> PayloadDecoder<'a> {
    /// Create a decoder positioned at the start of the embedded stream.
    /// For LSBI this consumes the reserved pattern-map components.
    pub fn new(pixels: &'a [u8], geo: Geometry, method: StegoMethod) -> Result<Self> {
        let state = match method {
            StegoMethod::Lsbi => DecoderState::Inverted(LsbiDecoder::begin(pixels, &geo)?),
            _ => DecoderState::Plain { method, cursor: 0 },
        };
        Ok(Self { pixels, geo, state })
    }

    /// Read the next `count` bytes of the embedded stream.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        let num_bits = count * 8;
        match &mut self.state {
            DecoderState::Plain { method, cursor } => {
                let (bytes, next) = match method {
                    StegoMethod::Lsb1 => lsb1::extract(self.pixels, &self.geo, num_bits, *cursor)?,
                    StegoMethod::Lsb4 => lsb4::extract(self.pixels, &self.geo, num_bits, *cursor)?,
                    StegoMethod::Lsbi => unreachable!("LSBI uses the inverted decoder state"),
                };
                *cursor = next;
                Ok(bytes)
            }
            DecoderState::Inverted(decoder) => decoder.read_bits(self.pixels, &self.geo, num_bits),
        }
    }
}
