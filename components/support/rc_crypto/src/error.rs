/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Internal crypto error")]
    InternalError,
    #[error("Invalid key length: {0}")]
    InvalidKeyLength(usize),
    #[error("Key length of {0} bytes is not permitted by the cryptographic policy")]
    UnavailableKeyLength(usize),
    #[error("Cipher initialization error")]
    CipherInit,
    #[error("Padding error")]
    Padding,
    #[error("Random generation error: {0}")]
    RandError(String),
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }
}

impl From<ErrorKind> for Error {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Error(Box::new(kind))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
