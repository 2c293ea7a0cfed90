//! Error types for stegobmp operations.

use thiserror::Error;

/// Result type alias for stegobmp operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while embedding into or extracting from a carrier.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The carrier could not be parsed as a BMP file.
    #[error("Invalid BMP file: {0}")]
    InvalidBmp(String),

    /// The carrier is a well-formed BMP the codecs cannot work with.
    #[error("Unsupported BMP: expected 24bpp uncompressed, got {bits_per_pixel}bpp with compression {compression}")]
    UnsupportedBmp {
        bits_per_pixel: u16,
        compression: u32,
    },

    /// Payload larger than the codec capacity of the carrier.
    #[error("Insufficient capacity: need {needed} bytes, have {available} bytes")]
    InsufficientCapacity { needed: usize, available: usize },

    /// A caller-supplied argument violates a codec contract.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The embedded stream does not decode to a valid frame.
    #[error("Malformed stream: {0}")]
    MalformedStream(String),

    /// No NUL terminator found for the embedded extension string.
    #[error("Extension terminator not found in embedded stream")]
    ExtensionNotFound,

    /// Encryption or decryption failed (wrong password or corrupted data).
    #[error("Cipher failure: wrong password or corrupted data")]
    CipherFailure,
}
