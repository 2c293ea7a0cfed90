//! 24-bit uncompressed BMP container.
//!
//! Parses the 14-byte file header and the 40-byte BITMAPINFOHEADER, both
//! little-endian, and keeps everything before the pixel array as an opaque
//! blob so saving re-emits the original header bytes verbatim. The codecs
//! only ever see the pixel buffer.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::stego::Geometry;

const FILE_HEADER_LEN: usize = 14;
const INFO_HEADER_LEN: usize = 40;

/// A loaded BMP carrier: opaque header bytes plus the mutable pixel buffer.
#[derive(Debug, Clone)]
pub struct BmpImage {
    header: Vec<u8>,
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl BmpImage {
    /// Load a carrier from disk, validating it is a 24bpp uncompressed BMP.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read(path)?;
        Self::from_bytes(raw)
    }

    /// Parse a carrier from raw file bytes.
    pub fn from_bytes(raw: Vec<u8>) -> Result<Self> {
        if raw.len() < FILE_HEADER_LEN + INFO_HEADER_LEN {
            return Err(Error::InvalidBmp(
                "file shorter than the BMP headers".to_string(),
            ));
        }
        if &raw[0..2] != b"BM" {
            return Err(Error::InvalidBmp("missing 'BM' magic".to_string()));
        }

        let off_bits = u32::from_le_bytes([raw[10], raw[11], raw[12], raw[13]]) as usize;
        let dib_size = u32::from_le_bytes([raw[14], raw[15], raw[16], raw[17]]);
        if dib_size != INFO_HEADER_LEN as u32 {
            return Err(Error::InvalidBmp(format!(
                "unsupported DIB header size {dib_size}"
            )));
        }

        let width = i32::from_le_bytes([raw[18], raw[19], raw[20], raw[21]]);
        let height = i32::from_le_bytes([raw[22], raw[23], raw[24], raw[25]]);
        let bits_per_pixel = u16::from_le_bytes([raw[28], raw[29]]);
        let compression = u32::from_le_bytes([raw[30], raw[31], raw[32], raw[33]]);

        if bits_per_pixel != 24 || compression != 0 {
            return Err(Error::UnsupportedBmp {
                bits_per_pixel,
                compression,
            });
        }

        let width = width.unsigned_abs() as usize;
        let height = height.unsigned_abs() as usize;
        if width == 0 || height == 0 {
            return Err(Error::InvalidBmp("zero image dimension".to_string()));
        }

        if off_bits < FILE_HEADER_LEN + INFO_HEADER_LEN || off_bits >= raw.len() {
            return Err(Error::InvalidBmp(format!(
                "pixel data offset {off_bits} out of range"
            )));
        }

        let geo = Geometry::new(width, height);
        let pixels = raw[off_bits..].to_vec();
        if pixels.len() < geo.row_stride() * height {
            return Err(Error::InvalidBmp(format!(
                "truncated pixel data: {} bytes for {width}x{height}",
                pixels.len()
            )));
        }

        let mut header = raw;
        header.truncate(off_bits);

        Ok(Self {
            header,
            width,
            height,
            pixels,
        })
    }

    /// Write the carrier back out: original header, current pixels.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut out = Vec::with_capacity(self.header.len() + self.pixels.len());
        out.extend_from_slice(&self.header);
        out.extend_from_slice(&self.pixels);
        fs::write(path, out)?;
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }
}
