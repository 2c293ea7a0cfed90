//! PBKDF2 key and IV derivation.
//!
//! Key and IV are derived together from the password in a single PBKDF2
//! run, then split: the first `key_len` bytes are the key, the rest the IV.
//! The salt and iteration count are fixed so that the extractor can
//! re-derive identical material from the password alone.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use crate::config::{kdf_params, CipherAlgorithm, CipherMode};

/// Key and IV derived for one cipher configuration.
#[derive(Debug, Clone)]
pub struct KeyMaterial {
    pub key: Vec<u8>,
    pub iv: Vec<u8>,
}

/// Derive key material for the given algorithm and mode.
///
/// The IV is empty for modes that do not use one (ECB).
pub fn derive_key_material(
    password: &str,
    algorithm: CipherAlgorithm,
    mode: CipherMode,
) -> KeyMaterial {
    let key_len = algorithm.key_len();
    let iv_len = if mode.uses_iv() {
        algorithm.block_len()
    } else {
        0
    };

    let mut buf = vec![0u8; key_len + iv_len];
    pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        &kdf_params::SALT,
        kdf_params::ITERATIONS,
        &mut buf,
    );

    let iv = buf.split_off(key_len);
    KeyMaterial { key: buf, iv }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_deterministic() {
        let a = derive_key_material("password123", CipherAlgorithm::Aes256, CipherMode::Cbc);
        let b = derive_key_material("password123", CipherAlgorithm::Aes256, CipherMode::Cbc);

        assert_eq!(a.key, b.key);
        assert_eq!(a.iv, b.iv);
    }

    #[test]
    fn test_different_passwords_different_keys() {
        let a = derive_key_material("password1", CipherAlgorithm::Aes128, CipherMode::Cbc);
        let b = derive_key_material("password2", CipherAlgorithm::Aes128, CipherMode::Cbc);

        assert_ne!(a.key, b.key);
    }

    #[test]
    fn test_lengths_match_algorithm() {
        let m = derive_key_material("pw", CipherAlgorithm::Aes192, CipherMode::Ofb);
        assert_eq!(m.key.len(), 24);
        assert_eq!(m.iv.len(), 16);

        let m = derive_key_material("pw", CipherAlgorithm::TripleDes, CipherMode::Cbc);
        assert_eq!(m.key.len(), 24);
        assert_eq!(m.iv.len(), 8);
    }

    #[test]
    fn test_ecb_derives_no_iv() {
        let m = derive_key_material("pw", CipherAlgorithm::Aes256, CipherMode::Ecb);
        assert_eq!(m.key.len(), 32);
        assert!(m.iv.is_empty());
    }

    #[test]
    fn test_key_is_prefix_across_modes() {
        // The key half must not depend on whether an IV is derived after it.
        let with_iv = derive_key_material("pw", CipherAlgorithm::Aes256, CipherMode::Cbc);
        let without_iv = derive_key_material("pw", CipherAlgorithm::Aes256, CipherMode::Ecb);
        assert_eq!(with_iv.key, without_iv.key);
    }
}
