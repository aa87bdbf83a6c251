/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::error::*;
use subtle::ConstantTimeEq;

/// Returns `Ok(())` if `a == b` and `Error` otherwise.
///
/// The comparison touches every byte of `a` regardless of where the first
/// difference is. When the lengths differ, `a` is still traversed in full
/// before reporting the mismatch, so the amount of work only depends on
/// `a.len()`. Callers should pass the locally computed value as `a`.
pub fn verify_slices_are_equal(a: &[u8], b: &[u8]) -> Result<()> {
    let len_eq = (a.len() as u64).ct_eq(&(b.len() as u64));
    let other = if a.len() == b.len() { b } else { a };
    let bytes_eq = a.ct_eq(other);
    if bool::from(len_eq & bytes_eq) {
        Ok(())
    } else {
        Err(ErrorKind::InternalError.into())
    }
}
