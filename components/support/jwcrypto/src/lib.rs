/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! A library for using JSON Web Encryption (JWE) with the AES_CBC_HMAC_SHA2
//! content encryption algorithms, as described in
//! https://tools.ietf.org/html/rfc7518#section-5.2 and related standards.
//! The primitives (AES, HMAC, randomness) come from [rc_crypto] - this crate
//! composes them into the authenticated encryption scheme and does the JOSE
//! wrappers around it. The headers support serialization and deserialization
//! to and from JSON via serde in a way that's compatible with rfc7518 etc.

pub use content_encryption::{
    AesCbcHmacSha2, ContentEncryptionParts, ParameterSet, SplitKey, A128CBC_HS256, A192CBC_HS384,
    A256CBC_HS512,
};
pub use encdec::EncryptorDecryptor;
pub use error::JwCryptoError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use error::Result;
use serde_derive::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use zeroize::Zeroizing;

mod aes;
pub mod content_encryption;
mod direct;
mod encdec;
mod error;

/// Specifies the mode, algorithm and keys of the encryption operation.
pub enum EncryptionParameters<'a> {
    // Direct Encryption with a shared symmetric key.
    Direct {
        enc: EncryptionAlgorithm,
        key: &'a [u8],
        kid: Option<String>,
    },
}

/// Specifies the mode and keys of the decryption operation.
pub enum DecryptionParameters<'a> {
    // Direct with a shared symmetric key.
    Direct { key: &'a [u8] },
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
enum Algorithm {
    #[serde(rename = "dir")]
    Direct,
}

/// The encryption algorithms supported by this crate.
#[allow(non_camel_case_types)]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncryptionAlgorithm {
    #[serde(rename = "A128CBC-HS256")]
    A128CBC_HS256,
    #[serde(rename = "A192CBC-HS384")]
    A192CBC_HS384,
    #[serde(rename = "A256CBC-HS512")]
    A256CBC_HS512,
}

impl EncryptionAlgorithm {
    pub fn algorithm_id(&self) -> &'static str {
        self.parameter_set().identifier()
    }

    pub fn parameter_set(&self) -> &'static ParameterSet {
        match self {
            Self::A128CBC_HS256 => &A128CBC_HS256,
            Self::A192CBC_HS384 => &A192CBC_HS384,
            Self::A256CBC_HS512 => &A256CBC_HS512,
        }
    }

    pub fn content_encryption(&self) -> AesCbcHmacSha2 {
        AesCbcHmacSha2::new(self.parameter_set())
    }

    /// Whether this algorithm can be used under the active cryptographic
    /// policy.
    pub fn is_available(&self) -> bool {
        self.parameter_set().is_available()
    }

    /// Generate a new random content encryption key of the right length.
    pub fn generate_key(&self) -> Result<Zeroizing<Vec<u8>>> {
        let mut key = Zeroizing::new(vec![0; self.parameter_set().cek_byte_length()]);
        rc_crypto::rand::fill(&mut key)?;
        Ok(key)
    }
}

#[derive(Serialize, Deserialize, Debug)]
struct JweHeader {
    alg: Algorithm,
    enc: EncryptionAlgorithm,
    #[serde(skip_serializing_if = "Option::is_none")]
    kid: Option<String>,
}

/// Internal representation of a CompactJwe. The public interface of this
/// crate is all via strings, so it's not public.
#[derive(Debug)]
struct CompactJwe {
    jwe_segments: Vec<String>,
}

impl CompactJwe {
    // A builder pattern would be nicer, but this will do for now.
    fn new(
        protected_header: Option<JweHeader>,
        encrypted_key: Option<Vec<u8>>,
        iv: Option<Vec<u8>>,
        ciphertext: Vec<u8>,
        auth_tag: Option<Vec<u8>>,
    ) -> Result<Self> {
        let protected_header = protected_header
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?
            .map(|h| URL_SAFE_NO_PAD.encode(h))
            .unwrap_or_default();
        let encrypted_key = encrypted_key
            .as_ref()
            .map(|k| URL_SAFE_NO_PAD.encode(k))
            .unwrap_or_default();
        let iv = iv
            .as_ref()
            .map(|iv| URL_SAFE_NO_PAD.encode(iv))
            .unwrap_or_default();
        let ciphertext = URL_SAFE_NO_PAD.encode(ciphertext);
        let auth_tag = auth_tag
            .as_ref()
            .map(|t| URL_SAFE_NO_PAD.encode(t))
            .unwrap_or_default();
        let jwe_segments = vec![protected_header, encrypted_key, iv, ciphertext, auth_tag];
        Ok(Self { jwe_segments })
    }

    fn protected_header(&self) -> Result<Option<JweHeader>> {
        Ok(self
            .try_deserialize_base64_segment(0)?
            .map(|s| serde_json::from_slice(&s))
            .transpose()?)
    }

    fn protected_header_raw(&self) -> &str {
        &self.jwe_segments[0]
    }

    fn encrypted_key(&self) -> Result<Option<Vec<u8>>> {
        self.try_deserialize_base64_segment(1)
    }

    fn iv(&self) -> Result<Option<Vec<u8>>> {
        self.try_deserialize_base64_segment(2)
    }

    fn ciphertext(&self) -> Result<Vec<u8>> {
        self.try_deserialize_base64_segment(3)?
            .ok_or(JwCryptoError::IllegalState("Ciphertext is empty"))
    }

    fn auth_tag(&self) -> Result<Option<Vec<u8>>> {
        self.try_deserialize_base64_segment(4)
    }

    fn try_deserialize_base64_segment(&self, index: usize) -> Result<Option<Vec<u8>>> {
        Ok(match self.jwe_segments[index].is_empty() {
            true => None,
            false => Some(URL_SAFE_NO_PAD.decode(&self.jwe_segments[index])?),
        })
    }
}

impl FromStr for CompactJwe {
    type Err = JwCryptoError;
    fn from_str(str: &str) -> Result<Self> {
        let jwe_segments: Vec<String> = str.split('.').map(|s| s.to_owned()).collect();
        if jwe_segments.len() != 5 {
            return Err(JwCryptoError::DeserializationError);
        }
        Ok(Self { jwe_segments })
    }
}

impl fmt::Display for CompactJwe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        assert!(self.jwe_segments.len() == 5);
        write!(f, "{}", self.jwe_segments.join("."))
    }
}

/// Encrypt and serialize data in the JWE compact form.
pub fn encrypt_to_jwe(data: &[u8], encryption_params: EncryptionParameters<'_>) -> Result<String> {
    let jwe = match encryption_params {
        EncryptionParameters::Direct { enc, key, kid } => {
            direct::encrypt_to_jwe(data, enc, key, kid)
        }
    }?;
    Ok(jwe.to_string())
}

/// Deserialize and decrypt data in the JWE compact form.
pub fn decrypt_jwe(jwe: &str, decryption_params: DecryptionParameters<'_>) -> Result<String> {
    let jwe = jwe.parse()?;
    match decryption_params {
        DecryptionParameters::Direct { key } => direct::decrypt_jwe(&jwe, key),
    }
}

#[test]
fn test_encryption_algorithm_serde() {
    for (enc, id) in [
        (EncryptionAlgorithm::A128CBC_HS256, "A128CBC-HS256"),
        (EncryptionAlgorithm::A192CBC_HS384, "A192CBC-HS384"),
        (EncryptionAlgorithm::A256CBC_HS512, "A256CBC-HS512"),
    ] {
        assert_eq!(enc.algorithm_id(), id);
        let jstr = serde_json::to_string(&enc).unwrap();
        assert_eq!(jstr, format!("\"{}\"", id));
        assert_eq!(enc, serde_json::from_str(&jstr).unwrap());
    }
    assert!(serde_json::from_str::<EncryptionAlgorithm>("\"A256GCM\"").is_err());
}

#[test]
fn test_generate_key() {
    let enc = EncryptionAlgorithm::A192CBC_HS384;
    let k1 = enc.generate_key().unwrap();
    let k2 = enc.generate_key().unwrap();
    assert_eq!(k1.len(), 48);
    assert_ne!(k1, k2);
}

#[test]
fn test_jwe_header_ser() {
    let header = JweHeader {
        alg: Algorithm::Direct,
        enc: EncryptionAlgorithm::A128CBC_HS256,
        kid: Some("the-key-id".to_string()),
    };
    // Make sure all the tags get the right info by checking the literal string.
    assert_eq!(
        serde_json::to_string(&header).unwrap(),
        r#"{"alg":"dir","enc":"A128CBC-HS256","kid":"the-key-id"}"#
    );
}

#[test]
fn test_compact_jwe_roundtrip() {
    let mut iv = [0u8; 16];
    rc_crypto::rand::fill(&mut iv).unwrap();
    let mut ciphertext = [0u8; 240];
    rc_crypto::rand::fill(&mut ciphertext).unwrap();
    let mut auth_tag = [0u8; 32];
    rc_crypto::rand::fill(&mut auth_tag).unwrap();
    let jwe = CompactJwe::new(
        Some(JweHeader {
            alg: Algorithm::Direct,
            enc: EncryptionAlgorithm::A256CBC_HS512,
            kid: None,
        }),
        None,
        Some(iv.to_vec()),
        ciphertext.to_vec(),
        Some(auth_tag.to_vec()),
    )
    .unwrap();
    let compacted = jwe.to_string();
    let jwe2: CompactJwe = compacted.parse().unwrap();
    assert_eq!(jwe.jwe_segments, jwe2.jwe_segments);
    assert_eq!(jwe2.iv().unwrap().unwrap(), iv);
    assert_eq!(jwe2.auth_tag().unwrap().unwrap(), auth_tag);
    assert!(jwe2.encrypted_key().unwrap().is_none());
}

#[test]
fn test_compact_jwe_wrong_segment_count() {
    assert!(matches!(
        "a.b.c.d".parse::<CompactJwe>(),
        Err(JwCryptoError::DeserializationError)
    ));
    assert!(matches!(
        "a.b.c.d.e.f".parse::<CompactJwe>(),
        Err(JwCryptoError::DeserializationError)
    ));
}
