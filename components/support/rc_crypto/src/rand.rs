/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::error::*;
use rand::{rngs::OsRng, RngCore};

/// Fill a buffer with cryptographically secure pseudo-random data.
///
/// Every call reads from the operating system generator, so this is safe to
/// call from any number of threads at once.
pub fn fill(dest: &mut [u8]) -> Result<()> {
    OsRng
        .try_fill_bytes(dest)
        .map_err(|e| ErrorKind::RandError(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn random_fill() {
        let mut out = vec![0u8; 64];
        assert!(fill(&mut out).is_ok());
        assert_ne!(out, vec![0u8; 64]);
    }
}
