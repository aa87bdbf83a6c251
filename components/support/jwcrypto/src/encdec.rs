/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::{EncryptionAlgorithm, JwCryptoError};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{de::DeserializeOwned, Serialize};
use zeroize::Zeroizing;

/// High-level struct for handling Encryption/Decryption
///
/// Keys are passed around as the base64url encoding of the raw content
/// encryption key, which must have the length `enc` calls for.
pub struct EncryptorDecryptor {
    enc: EncryptionAlgorithm,
    key: Zeroizing<Vec<u8>>,
}

impl EncryptorDecryptor {
    /// Create a key that can be used to construct an EncryptorDecryptor
    pub fn create_key(enc: EncryptionAlgorithm) -> Result<String, JwCryptoError> {
        let key = enc.generate_key()?;
        Ok(URL_SAFE_NO_PAD.encode(&*key))
    }

    pub fn new(enc: EncryptionAlgorithm, key: &str) -> Result<Self, JwCryptoError> {
        match URL_SAFE_NO_PAD.decode(key) {
            Ok(key) if key.len() == enc.parameter_set().cek_byte_length() => Ok(Self {
                enc,
                key: Zeroizing::new(key),
            }),
            _ => Err(JwCryptoError::InvalidKey),
        }
    }

    pub fn new_with_random_key(enc: EncryptionAlgorithm) -> Result<Self, JwCryptoError> {
        Self::new(enc, &Self::create_key(enc)?)
    }

    /// Encrypt a string
    pub fn encrypt(&self, cleartext: &str) -> Result<String, JwCryptoError> {
        crate::encrypt_to_jwe(
            cleartext.as_bytes(),
            crate::EncryptionParameters::Direct {
                enc: self.enc,
                key: &self.key,
                kid: None,
            },
        )
    }

    /// Encrypt a struct
    pub fn encrypt_struct<T: Serialize>(&self, fields: &T) -> Result<String, JwCryptoError> {
        let str = serde_json::to_string(fields)?;
        self.encrypt(&str)
    }

    /// Decrypt a string
    pub fn decrypt(&self, ciphertext: &str) -> Result<String, JwCryptoError> {
        if ciphertext.is_empty() {
            return Err(JwCryptoError::EmptyCyphertext);
        }
        crate::decrypt_jwe(
            ciphertext,
            crate::DecryptionParameters::Direct { key: &self.key },
        )
    }

    /// Decrypt a struct
    pub fn decrypt_struct<T: DeserializeOwned>(
        &self,
        ciphertext: &str,
    ) -> Result<T, JwCryptoError> {
        let json = self.decrypt(ciphertext)?;
        Ok(serde_json::from_str(&json)?)
    }

    // Create canary text.
    //
    // These are used to check if a key is still valid for a database.  Call this when opening a
    // database for the first time and save the result.
    pub fn create_canary(&self, text: &str) -> Result<String, JwCryptoError> {
        self.encrypt(text)
    }

    // Check canary text.
    //
    // Call this when re-opening a database, using the same text parameter and the return value
    // of the initial create_canary call.
    //
    // - If check_canary() returns true, then it's safe to assume the key can decrypt the DB data
    // - If check_canary() returns false, then the key is no longer valid.  It should be
    // regenerated and the DB data should be wiped since we can no longer read it properly
    pub fn check_canary(&self, canary: &str, text: &str) -> Result<bool, JwCryptoError> {
        match self.decrypt(canary) {
            Ok(decrypted) => Ok(decrypted == text),
            Err(JwCryptoError::AuthenticationTagMismatch) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
