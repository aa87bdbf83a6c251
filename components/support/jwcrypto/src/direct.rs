/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Support for "Direct Encryption with a Shared Symmetric Key"
//! See https://tools.ietf.org/html/rfc7518#section-4.5 for all the details.

use crate::{
    aes,
    error::{JwCryptoError, Result},
    Algorithm, CompactJwe, EncryptionAlgorithm, JweHeader,
};

pub(crate) fn encrypt_to_jwe(
    data: &[u8],
    enc: EncryptionAlgorithm,
    key: &[u8],
    kid: Option<String>,
) -> Result<CompactJwe> {
    let protected_header = JweHeader {
        kid,
        alg: Algorithm::Direct,
        enc,
    };
    aes::aes_cbc_hmac_encrypt(data, protected_header, key)
}

pub(crate) fn decrypt_jwe(jwe: &CompactJwe, key: &[u8]) -> Result<String> {
    // `alg="dir"` mandates no encrypted key.
    if jwe.encrypted_key()?.is_some() {
        return Err(JwCryptoError::IllegalState(
            "The Encrypted Key must be empty.",
        ));
    }
    aes::aes_cbc_hmac_decrypt(jwe, key)
}
