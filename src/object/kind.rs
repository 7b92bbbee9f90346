use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// Describes the fundamental git object type (blob, tree, commit, or tag).
/// We use the word `kind` here to avoid conflict with the Rust reserved word `type`.
///
/// The kind selects the decoder for an object and is part of the
/// framing that is hashed to produce the object's ID.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    Blob,
    Tree,
    Commit,
    Tag,
}

impl Kind {
    /// Returns the name git uses for this kind in object headers.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Blob => "blob",
            Kind::Tree => "tree",
            Kind::Commit => "commit",
            Kind::Tag => "tag",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error which can be returned when parsing an object kind name.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown object kind `{0}`")]
pub struct ParseKindError(pub String);

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blob" => Ok(Kind::Blob),
            "tree" => Ok(Kind::Tree),
            "commit" => Ok(Kind::Commit),
            "tag" => Ok(Kind::Tag),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_string() {
        let k = Kind::Blob;
        assert_eq!(k.to_string(), "blob");

        let k = Kind::Commit;
        assert_eq!(k.to_string(), "commit");

        let k = Kind::Tree;
        assert_eq!(k.to_string(), "tree");

        let k = Kind::Tag;
        assert_eq!(k.to_string(), "tag");
    }

    #[test]
    fn from_str() {
        assert_eq!(Kind::from_str("blob").unwrap(), Kind::Blob);
        assert_eq!(Kind::from_str("tree").unwrap(), Kind::Tree);
        assert_eq!("commit".parse::<Kind>().unwrap(), Kind::Commit);
        assert_eq!("tag".parse::<Kind>().unwrap(), Kind::Tag);

        let err = Kind::from_str("Blob").unwrap_err();
        assert_eq!(err, ParseKindError("Blob".to_string()));
        assert_eq!(err.to_string(), "unknown object kind `Blob`");
    }
}
