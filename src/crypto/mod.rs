//! Cryptographic operations for stegobmp.
//!
//! This module provides:
//! - AES-128/192/256 and 3DES encryption in ECB, CBC, CFB and OFB modes
//! - PBKDF2-HMAC-SHA256 password-based key and IV derivation

mod cipher;
mod kdf;

pub use cipher::{decrypt, encrypt};
pub use kdf::{derive_key_material, KeyMaterial};
