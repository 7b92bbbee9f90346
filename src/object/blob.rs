use std::io::{BufRead, Cursor};

use super::{ContentSource, Hash, RawObject};

/// A decoded git blob: the content of a file, with no interpretation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Blob {
    hash: Hash,
    size: u64,
    content: Vec<u8>,
}

impl Blob {
    /// Decode the content of a blob object. This can't fail; the content is
    /// taken as-is.
    ///
    /// The blob's size is the declared size of the raw object, or zero if
    /// none was declared.
    pub fn decode(raw: &RawObject) -> Blob {
        Blob {
            hash: raw.hash(),
            size: raw.declared_size().unwrap_or(0),
            content: raw.content().to_vec(),
        }
    }

    /// Returns the ID of this blob.
    pub fn hash(&self) -> Hash {
        self.hash
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Returns a reader positioned at the start of the content.
    pub fn reader(&self) -> Cursor<&[u8]> {
        Cursor::new(self.content.as_slice())
    }

    pub fn into_content(self) -> Vec<u8> {
        self.content
    }
}

impl ContentSource for Blob {
    fn len(&self) -> usize {
        self.content.len()
    }

    fn open<'a>(&'a self) -> std::io::Result<Box<dyn BufRead + 'a>> {
        Ok(Box::new(self.reader()))
    }
}
