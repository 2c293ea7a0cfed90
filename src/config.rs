//! Cipher configuration and wire-format constants.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Extension used when the input filename has no dot-suffix.
pub const DEFAULT_EXTENSION: &str = ".bin";

/// Maximum embedded extension length in bytes, including the NUL terminator.
pub const MAX_EXTENSION_LEN: usize = 64;

/// PBKDF2 parameters for key and IV derivation.
///
/// Both sides of the channel must derive identical key material from the
/// password alone, so the salt and iteration count are fixed.
pub mod kdf_params {
    /// Fixed salt shared by embedder and extractor.
    pub const SALT: [u8; 8] = [0; 8];

    /// PBKDF2-HMAC-SHA256 iteration count.
    pub const ITERATIONS: u32 = 10_000;
}

/// Symmetric cipher used to protect the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CipherAlgorithm {
    #[default]
    Aes128,
    Aes192,
    Aes256,
    TripleDes,
}

impl CipherAlgorithm {
    /// Key length in bytes.
    pub fn key_len(&self) -> usize {
        match self {
            CipherAlgorithm::Aes128 => 16,
            CipherAlgorithm::Aes192 => 24,
            CipherAlgorithm::Aes256 => 32,
            CipherAlgorithm::TripleDes => 24,
        }
    }

    /// Cipher block length in bytes (also the IV length for IV modes).
    pub fn block_len(&self) -> usize {
        match self {
            CipherAlgorithm::TripleDes => 8,
            _ => 16,
        }
    }
}

impl FromStr for CipherAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aes128" => Ok(CipherAlgorithm::Aes128),
            "aes192" => Ok(CipherAlgorithm::Aes192),
            "aes256" => Ok(CipherAlgorithm::Aes256),
            "3des" => Ok(CipherAlgorithm::TripleDes),
            _ => Err(Error::InvalidArgument(format!(
                "unknown encryption algorithm '{s}' (expected aes128, aes192, aes256 or 3des)"
            ))),
        }
    }
}

impl fmt::Display for CipherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CipherAlgorithm::Aes128 => "AES128",
            CipherAlgorithm::Aes192 => "AES192",
            CipherAlgorithm::Aes256 => "AES256",
            CipherAlgorithm::TripleDes => "3DES",
        };
        f.write_str(name)
    }
}

/// Block-cipher mode of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CipherMode {
    Ecb,
    #[default]
    Cbc,
    Cfb,
    Ofb,
}

impl CipherMode {
    /// Whether the mode consumes an IV. ECB is the only mode that does not.
    pub fn uses_iv(&self) -> bool {
        !matches!(self, CipherMode::Ecb)
    }

    /// Whether the mode is a stream mode (no padding of the plaintext).
    pub fn is_stream(&self) -> bool {
        matches!(self, CipherMode::Cfb | CipherMode::Ofb)
    }
}

impl FromStr for CipherMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ecb" => Ok(CipherMode::Ecb),
            "cbc" => Ok(CipherMode::Cbc),
            "cfb" => Ok(CipherMode::Cfb),
            "ofb" => Ok(CipherMode::Ofb),
            _ => Err(Error::InvalidArgument(format!(
                "unknown cipher mode '{s}' (expected ecb, cbc, cfb or ofb)"
            ))),
        }
    }
}

impl fmt::Display for CipherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CipherMode::Ecb => "ECB",
            CipherMode::Cbc => "CBC",
            CipherMode::Cfb => "CFB",
            CipherMode::Ofb => "OFB",
        };
        f.write_str(name)
    }
}

/// Complete cipher selection for one embed or extract operation.
#[derive(Debug, Clone)]
pub struct CipherConfig {
    pub algorithm: CipherAlgorithm,
    pub mode: CipherMode,
    pub password: String,
}

impl CipherConfig {
    pub fn new(algorithm: CipherAlgorithm, mode: CipherMode, password: impl Into<String>) -> Self {
        Self {
            algorithm,
            mode,
            password: password.into(),
        }
    }

    /// Human-readable description, e.g. `AES256-CBC`.
    pub fn describe(&self) -> String {
        format!("{}-{}", self.algorithm, self.mode)
    }
}
