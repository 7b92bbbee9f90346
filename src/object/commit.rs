use std::borrow::Cow;

use tracing::{debug, trace};

use super::parse_utils::{header, split_once};
use super::{Error, Hash, RawObject, Result, Signature};

/// A decoded git commit.
///
/// A commit names the tree that is the snapshot of the project at that point,
/// the commit(s) it was derived from, who wrote the change and who committed
/// it, and a free-form message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Commit {
    hash: Hash,
    tree: Hash,
    parents: Vec<Hash>,
    author: Signature,
    committer: Signature,
    encoding: Option<String>,
    pgp_signature: Option<String>,
    message: Vec<u8>,
}

impl Commit {
    /// Decode the content of a commit object.
    ///
    /// Header lines are read up to the first empty line; everything after
    /// that is the message, kept byte for byte. Header lines may come in any
    /// order, and may end in `\r\n` as well as `\n`.
    /// `parent` lines accumulate in the order they appear, while a repeated
    /// `tree`, `author`, or `committer` line replaces the earlier one.
    /// Unrecognized headers are skipped.
    ///
    /// Fails with [`Error::MalformedCommit`] if there is no `tree` line or if
    /// a `tree` or `parent` line does not hold a valid object ID.
    pub fn decode(raw: &RawObject) -> Result<Commit> {
        let content = raw.content();

        let mut tree: Option<Hash> = None;
        let mut parents = Vec::new();
        let mut author = Signature::default();
        let mut committer = Signature::default();
        let mut encoding = None;
        let mut pgp_signature: Option<String> = None;
        let mut in_pgp_signature = false;

        let mut pos = 0;
        let mut message_start = content.len();

        while pos < content.len() {
            let (line, next) = match content[pos..].iter().position(|b| *b == b'\n') {
                Some(n) => (&content[pos..pos + n], pos + n + 1),
                None => (&content[pos..], content.len()),
            };
            pos = next;

            let line = match line.split_last() {
                Some((b'\r', rest)) => rest,
                _ => line,
            };

            if line.is_empty() {
                message_start = next;
                break;
            }

            if line[0] == b' ' {
                if in_pgp_signature {
                    if let Some(sig) = pgp_signature.as_mut() {
                        sig.push('\n');
                        sig.push_str(&String::from_utf8_lossy(&line[1..]));
                    }
                }
                continue;
            }
            in_pgp_signature = false;

            if let Some(value) = header(line, b"tree") {
                tree = Some(parse_hash(value, "tree")?);
            } else if let Some(value) = header(line, b"parent") {
                parents.push(parse_hash(value, "parent")?);
            } else if let Some(value) = header(line, b"author") {
                author = Signature::parse(value);
            } else if let Some(value) = header(line, b"committer") {
                committer = Signature::parse(value);
            } else if let Some(value) = header(line, b"encoding") {
                encoding = Some(String::from_utf8_lossy(value).into_owned());
            } else if let Some(value) = header(line, b"gpgsig") {
                pgp_signature = Some(String::from_utf8_lossy(value).into_owned());
                in_pgp_signature = true;
            } else {
                let (name, _) = split_once(line, &b' ');
                trace!(
                    header = %String::from_utf8_lossy(name),
                    "skipping unrecognized commit header"
                );
            }
        }

        let tree = match tree {
            Some(tree) => tree,
            None => return Err(malformed("missing tree header".to_string())),
        };

        Ok(Commit {
            hash: raw.hash(),
            tree,
            parents,
            author,
            committer,
            encoding,
            pgp_signature,
            message: content[message_start..].to_vec(),
        })
    }

    /// Returns the ID of this commit.
    pub fn hash(&self) -> Hash {
        self.hash
    }

    /// Returns the ID of the tree this commit records.
    pub fn tree(&self) -> Hash {
        self.tree
    }

    /// Returns the IDs of the parent commits, in the order they were recorded.
    pub fn parents(&self) -> &[Hash] {
        &self.parents
    }

    pub fn author(&self) -> &Signature {
        &self.author
    }

    pub fn committer(&self) -> &Signature {
        &self.committer
    }

    /// Returns the commit message exactly as stored (including any
    /// trailing newline). The bytes are not transcoded; see [`encoding`].
    ///
    /// [`encoding`]: Commit::encoding
    pub fn message_bytes(&self) -> &[u8] {
        &self.message
    }

    /// Returns the commit message as text, with any invalid UTF-8 sequences
    /// replaced by U+FFFD.
    pub fn message(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.message)
    }

    /// Returns the first line of the message.
    pub fn summary(&self) -> Cow<'_, str> {
        let (first, _) = split_once(&self.message, &b'\n');
        let first = match first.split_last() {
            Some((b'\r', rest)) => rest,
            _ => first,
        };
        String::from_utf8_lossy(first)
    }

    /// Returns the value of the `encoding` header, if present.
    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    /// Returns the ASCII-armored signature from the `gpgsig` header, if present.
    pub fn pgp_signature(&self) -> Option<&str> {
        self.pgp_signature.as_deref()
    }

    /// Returns true if this commit has no parents.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns true if this commit has more than one parent.
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}

// Object IDs are written in lowercase, but uppercase digits name the same
// object and are accepted here.
fn parse_hash(value: &[u8], name: &str) -> Result<Hash> {
    Hash::from_hex(value.to_ascii_lowercase())
        .map_err(|err| malformed(format!("invalid {} ID: {}", name, err)))
}

fn malformed(reason: String) -> Error {
    debug!(%reason, "failed to decode commit");
    Error::MalformedCommit(reason)
}
