//! LSB steganography for 24-bit uncompressed bitmaps.
//!
//! Hides an arbitrary file inside the pixel data of a BMP carrier and
//! recovers it later, optionally protecting the payload with
//! password-based encryption.
//!
//! # Features
//!
//! - **Three bit codecs**: plain LSB (`LSB1`), 4-bit LSB (`LSB4`) and
//!   adaptive LSB with inversion (`LSBI`)
//! - **Payload framing**: length-prefixed frame carrying the file bytes
//!   and their original extension
//! - **Optional encryption**: AES-128/192/256 or 3DES in ECB, CBC, CFB or
//!   OFB mode, keyed via PBKDF2-HMAC-SHA256
//! - **CLI interface**: `stegobmp embed` / `stegobmp extract`
//!
//! # Architecture
//!
//! ```text
//! File -> Frame ([size][data][ext\0]) -> optional cipher -> Bit codec -> Carrier pixels
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use stegobmp::{pipeline, StegoMethod};
//!
//! // Hide secret.txt inside carrier.bmp
//! let report = pipeline::embed(
//!     Path::new("secret.txt"),
//!     Path::new("carrier.bmp"),
//!     Path::new("loaded.bmp"),
//!     StegoMethod::Lsb1,
//!     None,
//! ).unwrap();
//! println!("embedded {} bytes", report.embedded_bytes);
//!
//! // Recover it later
//! let report = pipeline::extract(
//!     Path::new("loaded.bmp"),
//!     Path::new("recovered"),
//!     StegoMethod::Lsb1,
//!     None,
//! ).unwrap();
//! assert_eq!(report.extension, ".txt");
//! ```

pub mod bmp;
pub mod config;
pub mod crypto;
pub mod error;
pub mod frame;
pub mod pipeline;
pub mod stego;

pub use bmp::BmpImage;
pub use config::{CipherAlgorithm, CipherConfig, CipherMode};
pub use error::{Error, Result};
pub use stego::StegoMethod;
