use std::fmt::{self, Write};
use std::io::{self, Read};
use std::str::FromStr;

use sha1::{Digest, Sha1};
use thiserror::Error;

use super::{ContentSource, Kind};

/// An error which can be returned when parsing a git object ID.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ParseHashError {
    /// Value being parsed is empty.
    #[error("cannot parse object ID from empty string")]
    Empty,

    /// Contains an invalid digit.
    ///
    /// Among other causes, this variant will be constructed when parsing a string that
    /// contains an uppercase letter.
    #[error("value contains invalid digit `{0}`")]
    InvalidDigit(char),

    /// ID is longer than 40 hex digits (or 20 bytes).
    #[error("value is more than 40 digits long")]
    Overflow,

    /// ID is shorter than 40 hex digits (or 20 bytes).
    #[error("value is less than 40 digits long")]
    Underflow,
}

/// A `Hash` is the SHA-1 digest that identifies an object within a repository.
/// It is stored as 20 raw bytes, but is usually shown as 40 lowercase hex digits.
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Hash([u8; 20]);

impl Hash {
    /// The all-zero hash, often used to stand in for "no object."
    pub const ZERO: Hash = Hash([0; 20]);

    /// Create a new hash from a 20-byte slice.
    ///
    /// It is an error if the slice contains anything other than 20 bytes.
    pub fn new(id: &[u8]) -> Result<Hash, ParseHashError> {
        match id.len() {
            20 => {
                let mut bytes = [0u8; 20];
                bytes.copy_from_slice(id);
                Ok(Hash(bytes))
            }
            0 => Err(ParseHashError::Empty),
            n if n < 20 => Err(ParseHashError::Underflow),
            _ => Err(ParseHashError::Overflow),
        }
    }

    /// Convert a 40-character hex ID to a hash.
    ///
    /// It is an error if the ID contains anything other than 40 lowercase hex digits.
    pub fn from_hex<T: AsRef<[u8]>>(id: T) -> Result<Hash, ParseHashError> {
        let hex = id.as_ref();

        match hex.len() {
            40 => {
                let mut bytes = [0u8; 20];
                for (byte, pair) in bytes.iter_mut().zip(hex.chunks(2)) {
                    *byte = digit_value(pair[0])? << 4 | digit_value(pair[1])?;
                }
                Ok(Hash(bytes))
            }
            0 => Err(ParseHashError::Empty),
            n if n < 40 => Err(ParseHashError::Underflow),
            _ => Err(ParseHashError::Overflow),
        }
    }

    /// Returns the raw 20 bytes of the hash.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the all-zero hash.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Computes the hash of an object whose content is provided by a
    /// [`ContentSource`], streaming the content rather than buffering it.
    ///
    /// The source's `len()` is used as the object size.
    pub fn of_source(kind: Kind, source: &dyn ContentSource) -> io::Result<Hash> {
        let mut hasher = framed_hasher(kind, source.len() as u64);

        let mut reader = source.open()?;
        let mut buf = [0; 8192];

        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }

        Ok(finish(hasher))
    }
}

/// Computes the ID of an object from its kind, size, and content.
///
/// The digest covers `"<kind> <size>\0"` followed by the content, which is
/// what `git hash-object` produces. `size` is expected to equal
/// `content.len()`; if it does not, the result is still deterministic but
/// will not match the ID git would assign.
pub fn compute_hash(kind: Kind, size: u64, content: &[u8]) -> Hash {
    let mut hasher = framed_hasher(kind, size);
    hasher.update(content);
    finish(hasher)
}

fn framed_hasher(kind: Kind, size: u64) -> Sha1 {
    let mut hasher = Sha1::new();

    hasher.update(kind.as_str());
    hasher.update(b" ");
    hasher.update(size.to_string());
    hasher.update(b"\0");

    hasher
}

fn finish(hasher: Sha1) -> Hash {
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hasher.finalize()[..]);
    Hash(bytes)
}

impl FromStr for Hash {
    type Err = ParseHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::from_hex(s.as_bytes())
    }
}

static CHARS: &[u8] = b"0123456789abcdef";

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in self.0.iter() {
            f.write_char(CHARS[(byte >> 4) as usize].into())?;
            f.write_char(CHARS[(byte & 0xf) as usize].into())?;
        }

        Ok(())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self)
    }
}

fn digit_value(c: u8) -> Result<u8, ParseHashError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        _ => Err(ParseHashError::InvalidDigit(c as char)),
    }
}
