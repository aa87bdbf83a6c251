/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::{digest, error::*};
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

/// A calculated signature value.
#[derive(Clone)]
pub struct Signature(digest::Digest);

impl AsRef<[u8]> for Signature {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

/// A key to use for HMAC signing.
///
/// The key bytes are wiped when the key is dropped.
pub struct SigningKey {
    pub(crate) digest_alg: &'static digest::Algorithm,
    pub(crate) key_value: Zeroizing<Vec<u8>>,
}

impl SigningKey {
    pub fn new(digest_alg: &'static digest::Algorithm, key_value: &[u8]) -> Self {
        SigningKey {
            digest_alg,
            key_value: Zeroizing::new(key_value.to_vec()),
        }
    }

    #[inline]
    pub fn digest_algorithm(&self) -> &'static digest::Algorithm {
        self.digest_alg
    }
}

/// Calculate the HMAC of `data` using `key`.
pub fn sign(key: &SigningKey, data: &[u8]) -> Result<Signature> {
    let value = match key.digest_alg {
        digest::Algorithm::SHA256 => mac::<Hmac<Sha256>>(&key.key_value, data)?,
        digest::Algorithm::SHA384 => mac::<Hmac<Sha384>>(&key.key_value, data)?,
        digest::Algorithm::SHA512 => mac::<Hmac<Sha512>>(&key.key_value, data)?,
    };
    Ok(Signature(digest::Digest {
        value,
        algorithm: key.digest_alg,
    }))
}

fn mac<M: Mac + hmac::digest::KeyInit>(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    // HMAC accepts keys of any length, so this can only fail on a broken backend.
    let mut mac = <M as Mac>::new_from_slice(key).map_err(|_| ErrorKind::InternalError)?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
