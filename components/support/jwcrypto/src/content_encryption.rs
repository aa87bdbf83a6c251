/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! The AES_CBC_HMAC_SHA2 family of content encryption algorithms, which
//! compose AES-CBC and a truncated HMAC-SHA2 into an AEAD.
//! See https://tools.ietf.org/html/rfc7518#section-5.2 for all the details.
//!
//! The content encryption key is split in two halves: the first one keys the
//! HMAC, the second one keys AES. The authentication tag covers
//! `AAD || IV || ciphertext || AL`, where `AL` is the bit length of the AAD
//! as a big-endian 64-bit integer. Decryption always verifies the tag, in
//! constant time, before touching the ciphertext.

use crate::error::{JwCryptoError, Result};
use rc_crypto::{aes_cbc, constant_time, digest, hmac, ErrorKind};

/// Length of the initialization vector, which is one AES block.
pub const IV_LEN: usize = aes_cbc::BLOCK_LEN;

/// Describes one instantiation of AES_CBC_HMAC_SHA2.
///
/// The tag length is part of the table rather than derived from the MAC
/// output length, since the RFC fixes it per algorithm.
#[derive(Debug, PartialEq, Eq)]
pub struct ParameterSet {
    identifier: &'static str,
    cek_byte_length: usize,
    mac_algorithm: &'static digest::Algorithm,
    tag_length: usize,
}

pub static A128CBC_HS256: ParameterSet =
    ParameterSet::new("A128CBC-HS256", 32, &digest::SHA256, 16);

pub static A192CBC_HS384: ParameterSet =
    ParameterSet::new("A192CBC-HS384", 48, &digest::SHA384, 24);

// T_LEN is 32 octets, not the 64 HMAC-SHA-512 produces.
pub static A256CBC_HS512: ParameterSet =
    ParameterSet::new("A256CBC-HS512", 64, &digest::SHA512, 32);

/// The two halves of a content encryption key. Both borrow from the key the
/// caller supplied; nothing is copied.
#[derive(Debug)]
pub struct SplitKey<'a> {
    pub mac_key: &'a [u8],
    pub enc_key: &'a [u8],
}

impl ParameterSet {
    /// Panics if `cek_byte_length` is odd, or if `tag_length` is zero or
    /// longer than the output of `mac_algorithm`. In a `static` or `const`
    /// initializer that panic is a compile error.
    pub const fn new(
        identifier: &'static str,
        cek_byte_length: usize,
        mac_algorithm: &'static digest::Algorithm,
        tag_length: usize,
    ) -> Self {
        assert!(
            cek_byte_length % 2 == 0,
            "CEK length must be even so it splits into two halves"
        );
        assert!(tag_length > 0, "tag length must not be zero");
        assert!(
            tag_length <= mac_algorithm.result_len(),
            "tag length exceeds the MAC output length"
        );
        Self {
            identifier,
            cek_byte_length,
            mac_algorithm,
            tag_length,
        }
    }

    /// The `enc` header value, e.g. `A128CBC-HS256`.
    pub fn identifier(&self) -> &'static str {
        self.identifier
    }

    /// Length in bytes of the whole content encryption key.
    pub fn cek_byte_length(&self) -> usize {
        self.cek_byte_length
    }

    pub fn mac_algorithm(&self) -> &'static digest::Algorithm {
        self.mac_algorithm
    }

    /// Length in bytes of the truncated authentication tag.
    pub fn tag_length(&self) -> usize {
        self.tag_length
    }

    /// Length in bytes of the AES key, which is half of the CEK.
    pub fn enc_key_length(&self) -> usize {
        self.cek_byte_length / 2
    }

    /// Whether the cryptographic policy we're running under lets us use
    /// AES keys of [`Self::enc_key_length`] bytes. Encrypting or decrypting
    /// with an unavailable parameter set fails with
    /// [`JwCryptoError::UnavailableAlgorithm`].
    pub fn is_available(&self) -> bool {
        aes_cbc::is_key_length_available(self.enc_key_length())
    }

    /// Split `cek` into its MAC key (first half) and encryption key (second
    /// half).
    pub fn split_key<'a>(&self, cek: &'a [u8]) -> Result<SplitKey<'a>> {
        if cek.len() != self.cek_byte_length {
            log::warn!(
                "Bad key length for {}: {} != {}",
                self.identifier,
                cek.len(),
                self.cek_byte_length
            );
            return Err(JwCryptoError::InvalidKeyLength {
                expected: self.cek_byte_length,
                actual: cek.len(),
            });
        }
        let (mac_key, enc_key) = cek.split_at(self.enc_key_length());
        Ok(SplitKey { mac_key, enc_key })
    }

    fn authentication_tag(
        &self,
        mac_key: &[u8],
        aad: &[u8],
        iv: &[u8],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        let al = aad_length_bits(aad)?;
        let input = [aad, iv, ciphertext, &al].concat();
        let key = hmac::SigningKey::new(self.mac_algorithm, mac_key);
        let signature = hmac::sign(&key, &input).map_err(|_| JwCryptoError::EncryptionFailure)?;
        let tag = signature
            .as_ref()
            .get(..self.tag_length)
            .ok_or(JwCryptoError::EncryptionFailure)?;
        Ok(tag.to_vec())
    }
}

/// The number of bits in `aad`, as a 64-bit unsigned integer in network byte
/// order.
fn aad_length_bits(aad: &[u8]) -> Result<[u8; 8]> {
    let bits = u64::try_from(aad.len())
        .ok()
        .and_then(|len| len.checked_mul(8))
        .ok_or(JwCryptoError::EncryptionFailure)?;
    Ok(bits.to_be_bytes())
}

/// What an encryption produces, and a decryption consumes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentEncryptionParts {
    iv: Vec<u8>,
    ciphertext: Vec<u8>,
    tag: Vec<u8>,
}

impl ContentEncryptionParts {
    pub fn new(iv: Vec<u8>, ciphertext: Vec<u8>, tag: Vec<u8>) -> Self {
        Self {
            iv,
            ciphertext,
            tag,
        }
    }

    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    pub fn authentication_tag(&self) -> &[u8] {
        &self.tag
    }

    /// Returns `(iv, ciphertext, tag)`.
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
        (self.iv, self.ciphertext, self.tag)
    }
}

/// Encrypts and decrypts content with one [`ParameterSet`].
///
/// This holds nothing but a reference to its (immutable) parameter set, so a
/// single instance can be shared by any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct AesCbcHmacSha2 {
    params: &'static ParameterSet,
}

impl AesCbcHmacSha2 {
    pub fn new(params: &'static ParameterSet) -> Self {
        Self { params }
    }

    pub fn parameter_set(&self) -> &'static ParameterSet {
        self.params
    }

    pub fn is_available(&self) -> bool {
        self.params.is_available()
    }

    /// Encrypt `plaintext` and authenticate it together with `aad`, using a
    /// fresh random IV.
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        aad: &[u8],
        cek: &[u8],
    ) -> Result<ContentEncryptionParts> {
        // Reject a bad key before consuming any entropy.
        self.params.split_key(cek)?;
        let mut iv = [0u8; IV_LEN];
        rc_crypto::rand::fill(&mut iv)?;
        self.encrypt_with_iv(plaintext, aad, cek, &iv)
    }

    /// Like [`Self::encrypt`], but with a caller supplied IV. Reusing an IV
    /// with the same key leaks information about the plaintexts, so this is
    /// only meant for reproducing known test vectors.
    pub fn encrypt_with_iv(
        &self,
        plaintext: &[u8],
        aad: &[u8],
        cek: &[u8],
        iv: &[u8],
    ) -> Result<ContentEncryptionParts> {
        let SplitKey { mac_key, enc_key } = self.params.split_key(cek)?;
        let ciphertext = aes_cbc::encrypt(enc_key, iv, plaintext).map_err(|e| {
            match e.kind() {
                ErrorKind::UnavailableKeyLength(_) => {
                    JwCryptoError::UnavailableAlgorithm(self.params.identifier)
                }
                _ => JwCryptoError::EncryptionFailure,
            }
        })?;
        let tag = self
            .params
            .authentication_tag(mac_key, aad, iv, &ciphertext)?;
        Ok(ContentEncryptionParts::new(iv.to_vec(), ciphertext, tag))
    }

    /// Verify the authentication tag of `parts` and, only if it matches,
    /// decrypt the ciphertext.
    pub fn decrypt(
        &self,
        parts: &ContentEncryptionParts,
        aad: &[u8],
        cek: &[u8],
    ) -> Result<Vec<u8>> {
        let SplitKey { mac_key, enc_key } = self.params.split_key(cek)?;
        let computed_tag =
            self.params
                .authentication_tag(mac_key, aad, parts.iv(), parts.ciphertext())?;
        if constant_time::verify_slices_are_equal(&computed_tag, parts.authentication_tag())
            .is_err()
        {
            return Err(self.decryption_failed(JwCryptoError::AuthenticationTagMismatch));
        }
        aes_cbc::decrypt(enc_key, parts.iv(), parts.ciphertext()).map_err(|e| match e.kind() {
            ErrorKind::UnavailableKeyLength(_) => {
                JwCryptoError::UnavailableAlgorithm(self.params.identifier)
            }
            _ => self.decryption_failed(JwCryptoError::DecryptionFailure),
        })
    }

    fn decryption_failed(&self, err: JwCryptoError) -> JwCryptoError {
        log::debug!("{}: content decryption failed", self.params.identifier);
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    static ALL: [&ParameterSet; 3] = [&A128CBC_HS256, &A192CBC_HS384, &A256CBC_HS512];

    fn available() -> impl Iterator<Item = &'static ParameterSet> {
        ALL.into_iter().filter(|params| params.is_available())
    }

    // From RFC 7516, appendix A.3.
    const PLAINTEXT: &str = "Live long and prosper.";
    const CEK: [u8; 32] = [
        4, 211, 31, 197, 84, 157, 252, 254, 11, 100, 157, 250, 63, 170, 106, 206, 107, 124, 212,
        45, 111, 107, 9, 219, 200, 177, 0, 240, 143, 156, 44, 207,
    ];
    const IV: [u8; 16] = [
        3, 22, 60, 12, 43, 67, 104, 105, 108, 108, 105, 99, 111, 116, 104, 101,
    ];
    const CIPHERTEXT_B64: &str = "KDlTtXchhZTGufMYmOYGS4HffxPSUrfmqCHXaI9wOGY";

    // From RFC 7518, appendix B.
    const RFC7518_PLAINTEXT: &str = "A cipher system must not be required to be secret, and it must be able to fall into the hands of the enemy without inconvenience";
    const RFC7518_AAD: &str = "The second principle of Auguste Kerckhoffs";
    const RFC7518_IV: &str = "1af38c2dc2b96ffdd86694092341bc04";

    fn sequential_key(params: &ParameterSet) -> Vec<u8> {
        (0..params.cek_byte_length).map(|i| i as u8).collect()
    }

    fn random_key(params: &ParameterSet) -> Vec<u8> {
        let mut key = vec![0u8; params.cek_byte_length];
        rc_crypto::rand::fill(&mut key).unwrap();
        key
    }

    fn flip_bit(bytes: &[u8], bit: usize) -> Vec<u8> {
        let mut out = bytes.to_vec();
        out[bit / 8] ^= 1 << (bit % 8);
        out
    }

    #[test]
    fn test_parameter_set_table() {
        for params in ALL {
            assert_eq!(params.cek_byte_length % 2, 0);
            assert!(params.tag_length <= params.mac_algorithm.result_len());
        }
        assert_eq!(A128CBC_HS256.tag_length, 16);
        assert_eq!(A192CBC_HS384.tag_length, 24);
        assert_eq!(A256CBC_HS512.tag_length, 32);
        assert_eq!(A256CBC_HS512.mac_algorithm.result_len(), 64);
    }

    #[test]
    fn test_custom_parameter_set() {
        static A128CBC_HS384: ParameterSet =
            ParameterSet::new("A128CBC-HS384", 32, &digest::SHA384, 24);
        assert_eq!(A128CBC_HS384.identifier(), "A128CBC-HS384");
        assert_eq!(A128CBC_HS384.cek_byte_length(), 32);
        assert_eq!(A128CBC_HS384.enc_key_length(), 16);
        assert_eq!(A128CBC_HS384.mac_algorithm(), &digest::SHA384);
        assert_eq!(A128CBC_HS384.tag_length(), 24);

        let cipher = AesCbcHmacSha2::new(&A128CBC_HS384);
        let key = random_key(&A128CBC_HS384);
        let parts = cipher.encrypt(b"bobo", b"aad", &key).unwrap();
        assert_eq!(parts.authentication_tag().len(), 24);
        assert_eq!(cipher.decrypt(&parts, b"aad", &key).unwrap(), b"bobo");
    }

    #[test]
    #[should_panic(expected = "tag length exceeds the MAC output length")]
    fn test_tag_longer_than_mac() {
        ParameterSet::new("A128CBC-HS256", 32, &digest::SHA256, 40);
    }

    #[test]
    #[should_panic(expected = "tag length must not be zero")]
    fn test_empty_tag() {
        ParameterSet::new("A128CBC-HS256", 32, &digest::SHA256, 0);
    }

    #[test]
    #[should_panic(expected = "CEK length must be even")]
    fn test_odd_cek_length() {
        ParameterSet::new("A128CBC-HS256", 33, &digest::SHA256, 16);
    }

    #[test]
    fn test_split_key() {
        let key = sequential_key(&A192CBC_HS384);
        let split = A192CBC_HS384.split_key(&key).unwrap();
        assert_eq!(split.mac_key, &key[..24]);
        assert_eq!(split.enc_key, &key[24..]);
    }

    #[test]
    fn test_invalid_key_length() {
        for params in ALL {
            let cipher = AesCbcHmacSha2::new(params);
            for len in [0, params.cek_byte_length - 1, params.cek_byte_length + 1] {
                let key = vec![0u8; len];
                assert!(matches!(
                    cipher.encrypt(b"bobo", b"aad", &key),
                    Err(JwCryptoError::InvalidKeyLength { expected, actual })
                        if expected == params.cek_byte_length && actual == len
                ));
                let parts = ContentEncryptionParts::new(vec![0; 16], vec![0; 16], vec![0; 16]);
                assert!(matches!(
                    cipher.decrypt(&parts, b"aad", &key),
                    Err(JwCryptoError::InvalidKeyLength { .. })
                ));
            }
        }
    }

    #[test]
    fn test_rfc7516_vector() {
        let cipher = AesCbcHmacSha2::new(&A128CBC_HS256);
        let aad = "eyJhbGciOiJSU0EtT0FFUCIsImVuYyI6IkEyNTZHQ00ifQ";
        let parts = cipher
            .encrypt_with_iv(PLAINTEXT.as_bytes(), aad.as_bytes(), &CEK, &IV)
            .unwrap();
        assert_eq!(URL_SAFE_NO_PAD.encode(parts.ciphertext()), CIPHERTEXT_B64);
        assert_eq!(parts.iv(), IV);

        // The same key, IV and plaintext with the actual A128KW/A128CBC-HS256
        // protected header from the RFC give the published tag.
        let aad = "eyJhbGciOiJBMTI4S1ciLCJlbmMiOiJBMTI4Q0JDLUhTMjU2In0";
        let parts = cipher
            .encrypt_with_iv(PLAINTEXT.as_bytes(), aad.as_bytes(), &CEK, &IV)
            .unwrap();
        assert_eq!(URL_SAFE_NO_PAD.encode(parts.ciphertext()), CIPHERTEXT_B64);
        assert_eq!(
            URL_SAFE_NO_PAD.encode(parts.authentication_tag()),
            "U0m_YmjN04DJvceFICbCVQ"
        );
        let decrypted = cipher.decrypt(&parts, aad.as_bytes(), &CEK).unwrap();
        assert_eq!(decrypted, PLAINTEXT.as_bytes());
    }

    #[test]
    fn test_rfc7518_vectors() {
        let expected = [
            (
                &A128CBC_HS256,
                "c80edfa32ddf39d5ef00c0b468834279a2e46a1b8049f792f76bfe54b903a9c9a94ac9b47ad2655c5f10f9aef71427e2fc6f9b3f399a221489f16362c703233609d45ac69864e3321cf82935ac4096c86e133314c54019e8ca7980dfa4b9cf1b384c486f3a54c51078158ee5d79de59fbd34d848b3d69550a67646344427ade54b8851ffb598f7f80074b9473c82e2db",
                "652c3fa36b0a7c5b3219fab3a30bc1c4",
            ),
            (
                &A192CBC_HS384,
                "ea65da6b59e61edb419be62d19712ae5d303eeb50052d0dfd6697f77224c8edb000d279bdc14c1072654bd30944230c657bed4ca0c9f4a8466f22b226d1746214bf8cfc2400add9f5126e479663fc90b3bed787a2f0ffcbf3904be2a641d5c2105bfe591bae23b1d7449e532eef60a9ac8bb6c6b01d35d49787bcd57ef484927f280adc91ac0c4e79c7b11efc60054e3",
                "8490ac0e58949bfe51875d733f93ac2075168039ccc733d7",
            ),
            (
                &A256CBC_HS512,
                "4affaaadb78c31c5da4b1b590d10ffbd3dd8d5d302423526912da037ecbcc7bd822c301dd67c373bccb584ad3e9279c2e6d12a1374b77f077553df829410446b36ebd97066296ae6427ea75c2e0846a11a09ccf5370dc80bfecbad28c73f09b3a3b75e662a2594410ae496b2e2e6609e31e6e02cc837f053d21f37ff4f51950bbe2638d09dd7a4930930806d0703b1f6",
                "4dd3b4c088a7f45c216839645b2012bf2e6269a8c56a816dbc1b267761955bc5",
            ),
        ];
        let iv = hex::decode(RFC7518_IV).unwrap();
        for (params, ciphertext, tag) in expected {
            if !params.is_available() {
                continue;
            }
            let cipher = AesCbcHmacSha2::new(params);
            let key = sequential_key(params);
            let parts = cipher
                .encrypt_with_iv(
                    RFC7518_PLAINTEXT.as_bytes(),
                    RFC7518_AAD.as_bytes(),
                    &key,
                    &iv,
                )
                .unwrap();
            assert_eq!(hex::encode(parts.ciphertext()), ciphertext);
            assert_eq!(hex::encode(parts.authentication_tag()), tag);
            assert_eq!(parts.authentication_tag().len(), params.tag_length);
        }
    }

    #[test]
    fn test_roundtrip() {
        for params in available() {
            let cipher = AesCbcHmacSha2::new(params);
            let key = random_key(params);
            for plaintext in ["", "a", "exactly 16 bytes", "to be, or not ðŸðŸ"] {
                let parts = cipher.encrypt(plaintext.as_bytes(), b"", &key).unwrap();
                assert_eq!(parts.iv().len(), IV_LEN);
                assert_eq!(parts.ciphertext().len() % aes_cbc::BLOCK_LEN, 0);
                assert_eq!(parts.authentication_tag().len(), params.tag_length);
                let decrypted = cipher.decrypt(&parts, b"", &key).unwrap();
                assert_eq!(decrypted, plaintext.as_bytes());
            }
        }
    }

    #[test]
    fn test_tamper_detection() {
        let cipher = AesCbcHmacSha2::new(&A128CBC_HS256);
        let key = random_key(&A128CBC_HS256);
        let aad: &[u8] = b"eyJhbGciOiJkaXIiLCJlbmMiOiJBMTI4Q0JDLUhTMjU2In0";
        let parts = cipher
            .encrypt(b"The big brown fox fell down", aad, &key)
            .unwrap();
        let (iv, ciphertext, tag) = parts.clone().into_parts();

        let assert_mismatch = |parts: &ContentEncryptionParts, aad: &[u8]| {
            assert!(matches!(
                cipher.decrypt(parts, aad, &key),
                Err(JwCryptoError::AuthenticationTagMismatch)
            ));
        };
        for bit in 0..ciphertext.len() * 8 {
            let modified = ContentEncryptionParts::new(
                iv.clone(),
                flip_bit(&ciphertext, bit),
                tag.clone(),
            );
            assert_mismatch(&modified, aad);
        }
        for bit in 0..tag.len() * 8 {
            let modified =
                ContentEncryptionParts::new(iv.clone(), ciphertext.clone(), flip_bit(&tag, bit));
            assert_mismatch(&modified, aad);
        }
        for bit in 0..iv.len() * 8 {
            let modified =
                ContentEncryptionParts::new(flip_bit(&iv, bit), ciphertext.clone(), tag.clone());
            assert_mismatch(&modified, aad);
        }
        for bit in 0..aad.len() * 8 {
            assert_mismatch(&parts, &flip_bit(aad, bit)[..]);
        }
        // Truncated and extended tags are just mismatches too.
        let short = ContentEncryptionParts::new(iv.clone(), ciphertext.clone(), tag[..8].to_vec());
        assert_mismatch(&short, aad);
        let mut long_tag = tag;
        long_tag.push(0);
        let long = ContentEncryptionParts::new(iv, ciphertext, long_tag);
        assert_mismatch(&long, aad);
    }

    #[test]
    fn test_wrong_key() {
        for params in available() {
            let cipher = AesCbcHmacSha2::new(params);
            let parts = cipher.encrypt(b"bobo", b"", &random_key(params)).unwrap();
            assert!(matches!(
                cipher.decrypt(&parts, b"", &random_key(params)),
                Err(JwCryptoError::AuthenticationTagMismatch)
            ));
        }
    }

    #[test]
    fn test_padding_failure_indistinguishable_from_tag_mismatch() {
        let params = &A128CBC_HS256;
        let cipher = AesCbcHmacSha2::new(params);
        let key = random_key(params);
        let aad: &[u8] = b"aad";
        // The first block alone decrypts to sixteen zero bytes, which isn't
        // valid PKCS#7 padding.
        let parts = cipher.encrypt(&[0u8; 32], aad, &key).unwrap();
        let ciphertext = parts.ciphertext()[..aes_cbc::BLOCK_LEN].to_vec();
        let SplitKey { mac_key, .. } = params.split_key(&key).unwrap();
        let tag = params
            .authentication_tag(mac_key, aad, parts.iv(), &ciphertext)
            .unwrap();

        let bad_padding = ContentEncryptionParts::new(parts.iv().to_vec(), ciphertext, tag);
        let padding_err = cipher.decrypt(&bad_padding, aad, &key).unwrap_err();
        assert!(matches!(padding_err, JwCryptoError::DecryptionFailure));

        let mut bad_tag = parts.authentication_tag().to_vec();
        bad_tag[0] ^= 0xff;
        let bad_tag = ContentEncryptionParts::new(
            parts.iv().to_vec(),
            parts.ciphertext().to_vec(),
            bad_tag,
        );
        let tag_err = cipher.decrypt(&bad_tag, aad, &key).unwrap_err();
        assert!(matches!(tag_err, JwCryptoError::AuthenticationTagMismatch));

        assert_eq!(padding_err.to_string(), tag_err.to_string());
        assert!(std::error::Error::source(&padding_err).is_none());
        assert!(std::error::Error::source(&tag_err).is_none());
    }

    #[test]
    fn test_bad_iv_length() {
        let cipher = AesCbcHmacSha2::new(&A128CBC_HS256);
        assert!(matches!(
            cipher.encrypt_with_iv(b"bobo", b"", &CEK, &IV[..12]),
            Err(JwCryptoError::EncryptionFailure)
        ));
    }

    #[test]
    fn test_iv() {
        // Encrypting the same thing twice should give different payloads due
        // to different IV.
        let cipher = AesCbcHmacSha2::new(&A128CBC_HS256);
        let e1 = cipher.encrypt(PLAINTEXT.as_bytes(), b"", &CEK).unwrap();
        let e2 = cipher.encrypt(PLAINTEXT.as_bytes(), b"", &CEK).unwrap();
        assert_ne!(e1.iv(), e2.iv());
        assert_ne!(e1.ciphertext(), e2.ciphertext());
        assert_ne!(e1.authentication_tag(), e2.authentication_tag());
    }

    #[cfg(not(feature = "restricted-key-length"))]
    #[test]
    fn test_all_available() {
        for params in ALL {
            assert!(params.is_available());
            assert!(AesCbcHmacSha2::new(params).is_available());
        }
    }

    #[cfg(feature = "restricted-key-length")]
    #[test]
    fn test_restricted_policy() {
        assert!(A128CBC_HS256.is_available());
        assert!(!A192CBC_HS384.is_available());
        assert!(!A256CBC_HS512.is_available());
        let params = &A256CBC_HS512;
        let cipher = AesCbcHmacSha2::new(params);
        let key = random_key(params);
        assert!(matches!(
            cipher.encrypt(b"bobo", b"", &key),
            Err(JwCryptoError::UnavailableAlgorithm("A256CBC-HS512"))
        ));

        // A message carrying a valid tag still can't be decrypted.
        let iv = [7u8; IV_LEN];
        let ciphertext = vec![42u8; 2 * aes_cbc::BLOCK_LEN];
        let SplitKey { mac_key, .. } = params.split_key(&key).unwrap();
        let tag = params
            .authentication_tag(mac_key, b"aad", &iv, &ciphertext)
            .unwrap();
        let parts = ContentEncryptionParts::new(iv.to_vec(), ciphertext, tag);
        assert!(matches!(
            cipher.decrypt(&parts, b"aad", &key),
            Err(JwCryptoError::UnavailableAlgorithm("A256CBC-HS512"))
        ));
    }
}
