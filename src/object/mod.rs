//! Represents the git concept of an "object" which is a tuple of
//! object type and binary data identified by the hash of the binary data.
//!
//! The storage layer hands over each object as a [`RawObject`]: a [`Kind`],
//! a size, and the decompressed content. [`Object::decode`] (or the
//! per-kind `decode` functions on [`Commit`], [`Tree`], and [`Blob`]) turns
//! that into a typed value, and every decoded value carries the [`Hash`]
//! computed from the raw content.
//!
//! Decoding never mutates or retains the `RawObject`, and no decoder holds
//! any state between calls, so independent objects may be decoded in
//! parallel.

mod blob;
pub use blob::Blob;

mod commit;
pub use commit::Commit;

mod content_source;
pub use content_source::ContentSource;

mod error;
pub use error::{Error, Result};

mod hash;
pub use hash::{compute_hash, Hash, ParseHashError};

mod kind;
pub use kind::{Kind, ParseKindError};

mod mode;
pub use mode::Mode;

pub(crate) mod parse_utils;

mod raw;
pub use raw::RawObject;

mod signature;
pub use signature::Signature;

mod tree;
pub use tree::{Tree, TreeEntry};

/// A decoded object of any supported kind.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Object {
    Commit(Commit),
    Tree(Tree),
    Blob(Blob),
}

impl Object {
    /// Decode a raw object using the decoder for its kind.
    ///
    /// Tags have no decoder and fail with [`Error::UnsupportedKind`].
    pub fn decode(raw: &RawObject) -> Result<Object> {
        match raw.kind() {
            Kind::Commit => Ok(Object::Commit(Commit::decode(raw)?)),
            Kind::Tree => Ok(Object::Tree(Tree::decode(raw)?)),
            Kind::Blob => Ok(Object::Blob(Blob::decode(raw))),
            Kind::Tag => Err(Error::UnsupportedKind(Kind::Tag)),
        }
    }

    /// Return the kind of the object.
    pub fn kind(&self) -> Kind {
        match self {
            Object::Commit(_) => Kind::Commit,
            Object::Tree(_) => Kind::Tree,
            Object::Blob(_) => Kind::Blob,
        }
    }

    /// Return the ID of the object.
    pub fn hash(&self) -> Hash {
        match self {
            Object::Commit(c) => c.hash(),
            Object::Tree(t) => t.hash(),
            Object::Blob(b) => b.hash(),
        }
    }
}
