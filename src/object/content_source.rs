use std::io::{BufRead, Result};

/// Byte content that can be read from the start any number of times.
///
/// [`RawObject`](super::RawObject) and [`Blob`](super::Blob) implement this,
/// which lets [`Hash::of_source`](super::Hash::of_source) stream either one
/// through the digest.
pub trait ContentSource {
    /// Number of bytes `open` will yield.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Opens a new reader at offset zero. Earlier readers are unaffected.
    fn open<'a>(&'a self) -> Result<Box<dyn BufRead + 'a>>;
}
