//! Block-cipher encryption of the payload frame.
//!
//! Dispatches over the four supported ciphers and four modes of operation.
//! ECB and CBC pad the plaintext with PKCS#7; CFB and OFB are stream modes
//! and preserve the plaintext length.

use aes::{Aes128, Aes192, Aes256};
use cipher::block_padding::Pkcs7;
use cipher::{
    AsyncStreamCipher, BlockCipher, BlockDecrypt, BlockDecryptMut, BlockEncrypt, BlockEncryptMut,
    KeyInit, KeyIvInit, StreamCipher,
};
use des::TdesEde3;

use crate::config::{CipherAlgorithm, CipherConfig, CipherMode};
use crate::crypto::kdf::derive_key_material;
use crate::error::{Error, Result};

/// Encrypt `plaintext` with key material derived from the password.
pub fn encrypt(plaintext: &[u8], config: &CipherConfig) -> Result<Vec<u8>> {
    let material = derive_key_material(&config.password, config.algorithm, config.mode);
    match config.algorithm {
        CipherAlgorithm::Aes128 => {
            encrypt_with::<Aes128>(config.mode, &material.key, &material.iv, plaintext)
        }
        CipherAlgorithm::Aes192 => {
            encrypt_with::<Aes192>(config.mode, &material.key, &material.iv, plaintext)
        }
        CipherAlgorithm::Aes256 => {
            encrypt_with::<Aes256>(config.mode, &material.key, &material.iv, plaintext)
        }
        CipherAlgorithm::TripleDes => {
            encrypt_with::<TdesEde3>(config.mode, &material.key, &material.iv, plaintext)
        }
    }
}

/// Decrypt `ciphertext` with key material derived from the password.
///
/// A wrong password surfaces as [`Error::CipherFailure`] for the padded
/// modes (the PKCS#7 check fails); stream modes produce garbage that the
/// frame parser rejects downstream.
pub fn decrypt(ciphertext: &[u8], config: &CipherConfig) -> Result<Vec<u8>> {
    let material = derive_key_material(&config.password, config.algorithm, config.mode);
    match config.algorithm {
        CipherAlgorithm::Aes128 => {
            decrypt_with::<Aes128>(config.mode, &material.key, &material.iv, ciphertext)
        }
        CipherAlgorithm::Aes192 => {
            decrypt_with::<Aes192>(config.mode, &material.key, &material.iv, ciphertext)
        }
        CipherAlgorithm::Aes256 => {
            decrypt_with::<Aes256>(config.mode, &material.key, &material.iv, ciphertext)
        }
        CipherAlgorithm::TripleDes => {
            decrypt_with::<TdesEde3>(config.mode, &material.key, &material.iv, ciphertext)
        }
    }
}

fn encrypt_with<C>(mode: CipherMode, key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>>
where
    C: BlockCipher + BlockEncrypt + BlockDecrypt + KeyInit,
    <C as cipher::BlockSizeUser>::BlockSize: cipher::typenum::IsLess<cipher::typenum::consts::U256, Output = cipher::typenum::True>,
{
    match mode {
        CipherMode::Ecb => {
            let enc =
                ecb::Encryptor::<C>::new_from_slice(key).map_err(|_| Error::CipherFailure)?;
            Ok(enc.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
        }
        CipherMode::Cbc => {
            let enc = cbc::Encryptor::<C>::new_from_slices(key, iv)
                .map_err(|_| Error::CipherFailure)?;
            Ok(enc.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
        }
        CipherMode::Cfb => {
            let enc = cfb_mode::Encryptor::<C>::new_from_slices(key, iv)
                .map_err(|_| Error::CipherFailure)?;
            let mut buf = plaintext.to_vec();
            enc.encrypt(&mut buf);
            Ok(buf)
        }
        CipherMode::Ofb => {
            let mut cipher =
                ofb::Ofb::<C>::new_from_slices(key, iv).map_err(|_| Error::CipherFailure)?;
            let mut buf = plaintext.to_vec();
            cipher.apply_keystream(&mut buf);
            Ok(buf)
        }
    }
}

fn decrypt_with<C>(mode: CipherMode, key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>>
where
    C: BlockCipher + BlockEncrypt + BlockDecrypt + KeyInit,
    <C as cipher::BlockSizeUser>::BlockSize: cipher::typenum::IsLess<cipher::typenum::consts::U256, Output = cipher::typenum::True>,
{
    match mode {
        CipherMode::Ecb => {
            let dec =
                ecb::Decryptor::<C>::new_from_slice(key).map_err(|_| Error::CipherFailure)?;
            dec.decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
                .map_err(|_| Error::CipherFailure)
        }
        CipherMode::Cbc => {
            let dec = cbc::Decryptor::<C>::new_from_slices(key, iv)
                .map_err(|_| Error::CipherFailure)?;
            dec.decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
                .map_err(|_| Error::CipherFailure)
        }
        CipherMode::Cfb => {
            let dec = cfb_mode::Decryptor::<C>::new_from_slices(key, iv)
                .map_err(|_| Error::CipherFailure)?;
            let mut buf = ciphertext.to_vec();
            dec.decrypt(&mut buf);
            Ok(buf)
        }
        CipherMode::Ofb => {
            // OFB decryption is the same keystream XOR as encryption.
            let mut cipher =
                ofb::Ofb::<C>::new_from_slices(key, iv).map_err(|_| Error::CipherFailure)?;
            let mut buf = ciphertext.to_vec();
            cipher.apply_keystream(&mut buf);
            Ok(buf)
        }
    }
}
