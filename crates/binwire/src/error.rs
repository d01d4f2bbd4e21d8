// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error taxonomy for codec resolution and stream operations.

use std::fmt;

/// Errors produced by resolution, registration, and stream round trips.
#[derive(Debug)]
pub enum WireError {
    /// No codec pair could be produced for the type. Reported at first use.
    Unresolvable { type_name: &'static str },
    /// Explicit registration of a type that already has a codec pair.
    DuplicateRegistration { type_name: &'static str },
    /// Underlying I/O failure, propagated unchanged from the stream layer.
    Io(std::io::Error),
    /// Well-formed bytes violating a structural invariant at decode time.
    InvalidData { reason: String },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolvable { type_name } => write!(
                f,
                "no codec pair for `{}`: implement `Wire` or register a (decode, encode) pair before first use",
                type_name
            ),
            Self::DuplicateRegistration { type_name } => {
                write!(f, "codec pair already registered for `{}`", type_name)
            }
            Self::Io(e) => write!(f, "stream error: {}", e),
            Self::InvalidData { reason } => write!(f, "invalid data: {}", reason),
        }
    }
}

impl std::error::Error for WireError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for WireError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

pub type WireResult<T> = std::result::Result<T, WireError>;
