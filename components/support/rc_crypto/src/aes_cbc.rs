/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! AES in CBC mode with PKCS#7 padding.
//!
//! This is unauthenticated encryption: it is only meant to be used as a
//! building block for constructions that authenticate the ciphertext before
//! handing it to [`decrypt`].

use crate::error::*;
use aes::{Aes128, Aes192, Aes256};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};

/// Length in bytes of an AES block, and so of a CBC initialization vector.
pub const BLOCK_LEN: usize = 16;

#[cfg(not(feature = "restricted-key-length"))]
const MAX_KEY_LEN: usize = 32;
#[cfg(feature = "restricted-key-length")]
const MAX_KEY_LEN: usize = 16;

/// Whether AES keys of `key_len` bytes can be used under the active
/// cryptographic policy.
pub fn is_key_length_available(key_len: usize) -> bool {
    matches!(key_len, 16 | 24 | 32) && key_len <= MAX_KEY_LEN
}

fn check_key(key: &[u8]) -> Result<()> {
    match key.len() {
        16 | 24 | 32 if is_key_length_available(key.len()) => Ok(()),
        16 | 24 | 32 => Err(ErrorKind::UnavailableKeyLength(key.len()).into()),
        len => Err(ErrorKind::InvalidKeyLength(len).into()),
    }
}

/// Encrypt `plaintext` under `key` with the given `iv`. The AES variant is
/// picked from the key length.
pub fn encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    check_key(key)?;
    let ciphertext = match key.len() {
        16 => cbc::Encryptor::<Aes128>::new_from_slices(key, iv)
            .map_err(|_| ErrorKind::CipherInit)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        24 => cbc::Encryptor::<Aes192>::new_from_slices(key, iv)
            .map_err(|_| ErrorKind::CipherInit)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        _ => cbc::Encryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(|_| ErrorKind::CipherInit)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
    };
    Ok(ciphertext)
}

/// Decrypt `ciphertext` under `key` with the given `iv` and strip the
/// padding. Fails with [`ErrorKind::Padding`] when the ciphertext is not
/// block-aligned or the padding is malformed.
pub fn decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    check_key(key)?;
    let plaintext = match key.len() {
        16 => cbc::Decryptor::<Aes128>::new_from_slices(key, iv)
            .map_err(|_| ErrorKind::CipherInit)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        24 => cbc::Decryptor::<Aes192>::new_from_slices(key, iv)
            .map_err(|_| ErrorKind::CipherInit)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        _ => cbc::Decryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(|_| ErrorKind::CipherInit)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
    };
    plaintext.map_err(|_| ErrorKind::Padding.into())
}
