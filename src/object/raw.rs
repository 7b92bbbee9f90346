use std::io::{BufRead, Cursor, Read, Write};

use super::{compute_hash, ContentSource, Error, Hash, Kind, Result};

/// The undecoded form of a git object: its kind, its declared size, and its
/// (already decompressed) content.
///
/// A `RawObject` is what the storage layer hands to the decoders in this
/// module. Content is appended through [`writer`] and can be read back any
/// number of times through [`reader`]; each reader starts at the beginning.
///
/// [`writer`]: RawObject::writer
/// [`reader`]: RawObject::reader
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawObject {
    kind: Kind,
    size: Option<u64>,
    content: Vec<u8>,
}

impl RawObject {
    /// Create an empty raw object of the given kind with no declared size.
    pub fn new(kind: Kind) -> RawObject {
        RawObject {
            kind,
            size: None,
            content: Vec::new(),
        }
    }

    /// Create a raw object whose declared size matches the given content.
    pub fn with_content<T: Into<Vec<u8>>>(kind: Kind, content: T) -> RawObject {
        let content = content.into();
        RawObject {
            kind,
            size: Some(content.len() as u64),
            content,
        }
    }

    /// Create a raw object by reading all of `reader` (typically a
    /// decompressing stream owned by the storage layer).
    pub fn read_from<R: Read>(kind: Kind, mut reader: R) -> Result<RawObject> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;
        Ok(RawObject::with_content(kind, content))
    }

    /// Return the kind of the object.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: Kind) {
        self.kind = kind;
    }

    /// Return the size of the object.
    ///
    /// This is the declared size if one has been set, or the number of bytes
    /// written so far otherwise.
    pub fn size(&self) -> u64 {
        self.size.unwrap_or(self.content.len() as u64)
    }

    /// Return the declared size, if any.
    pub fn declared_size(&self) -> Option<u64> {
        self.size
    }

    /// Declare the size of the object. No check is made against the content;
    /// see [`check_size`](RawObject::check_size).
    pub fn set_size(&mut self, size: u64) {
        self.size = Some(size);
    }

    /// Returns an error if a declared size disagrees with the content length.
    pub fn check_size(&self) -> Result<()> {
        let actual = self.content.len() as u64;
        match self.size {
            Some(declared) if declared != actual => {
                Err(Error::SizeMismatch { declared, actual })
            }
            _ => Ok(()),
        }
    }

    /// Returns a sink that appends to the object's content.
    pub fn writer(&mut self) -> impl Write + '_ {
        &mut self.content
    }

    /// Returns a reader positioned at the start of the content.
    pub fn reader(&self) -> Cursor<&[u8]> {
        Cursor::new(self.content.as_slice())
    }

    /// Returns the entire content.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Computes the object's ID from its kind, size, and content.
    ///
    /// This is functionally equivalent to the
    /// [`git hash-object`](https://git-scm.com/docs/git-hash-object) command
    /// without the `-w` option that would write the object to the repo.
    pub fn hash(&self) -> Hash {
        compute_hash(self.kind, self.size(), &self.content)
    }
}

impl ContentSource for RawObject {
    fn len(&self) -> usize {
        self.content.len()
    }

    fn open<'a>(&'a self) -> std::io::Result<Box<dyn BufRead + 'a>> {
        Ok(Box::new(self.reader()))
    }
}
