/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

// Glue between the JWE compact form and the AES_CBC_HMAC_SHA2 content
// encryption. See https://tools.ietf.org/html/rfc7516#section-5.1 for how
// the protected header becomes the additional authenticated data.

use crate::{
    error::{JwCryptoError, Result},
    CompactJwe, ContentEncryptionParts, JweHeader,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Does the AES-encrypt heavy-lifting for the schemes supported by this crate.
pub(crate) fn aes_cbc_hmac_encrypt(
    data: &[u8],
    protected_header: JweHeader,
    content_encryption_key: &[u8],
) -> Result<CompactJwe> {
    let additional_data = serde_json::to_string(&protected_header)?;
    let additional_data = URL_SAFE_NO_PAD.encode(additional_data.as_bytes());
    let (iv, ciphertext, auth_tag) = protected_header
        .enc
        .content_encryption()
        .encrypt(data, additional_data.as_bytes(), content_encryption_key)?
        .into_parts();
    CompactJwe::new(
        Some(protected_header),
        None,
        Some(iv),
        ciphertext,
        Some(auth_tag),
    )
}

/// Does the AES-decrypt heavy-lifting for the schemes supported by this crate
pub(crate) fn aes_cbc_hmac_decrypt(
    jwe: &CompactJwe,
    content_encryption_key: &[u8],
) -> Result<String> {
    let protected_header = jwe
        .protected_header()?
        .ok_or(JwCryptoError::IllegalState("missing protected_header"))?;
    let auth_tag = jwe
        .auth_tag()?
        .ok_or(JwCryptoError::IllegalState("auth_tag must be present."))?;
    let iv = jwe
        .iv()?
        .ok_or(JwCryptoError::IllegalState("iv must be present."))?;
    let parts = ContentEncryptionParts::new(iv, jwe.ciphertext()?, auth_tag);
    // The AAD is the protected header exactly as it was transmitted.
    let aad = jwe.protected_header_raw().as_bytes();
    let plaintext = protected_header
        .enc
        .content_encryption()
        .decrypt(&parts, aad, content_encryption_key)?;
    Ok(String::from_utf8(plaintext)?)
}
