use std::borrow::Cow;
use std::slice;
use std::str::{self, Utf8Error};

use tracing::debug;

use super::parse_utils::find_from;
use super::{Error, Hash, Mode, RawObject, Result};

/// A single entry in a tree: a name, its file mode, and the ID of the blob,
/// tree, or commit (for submodules) it refers to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreeEntry {
    name: Vec<u8>,
    mode: Mode,
    hash: Hash,
}

impl TreeEntry {
    /// Returns the entry name as UTF-8.
    ///
    /// Git stores names as uninterpreted bytes, so this may fail; use
    /// [`name_bytes`](TreeEntry::name_bytes) or
    /// [`name_lossy`](TreeEntry::name_lossy) when that matters.
    pub fn name(&self) -> std::result::Result<&str, Utf8Error> {
        str::from_utf8(&self.name)
    }

    /// Returns the entry name exactly as stored.
    pub fn name_bytes(&self) -> &[u8] {
        &self.name
    }

    /// Returns the entry name, replacing invalid UTF-8 sequences with `U+FFFD`.
    pub fn name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn hash(&self) -> Hash {
        self.hash
    }
}

/// A decoded git tree: one directory listing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tree {
    hash: Hash,
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Decode the content of a tree object.
    ///
    /// A tree is a sequence of records, each of which is:
    ///
    /// ```text
    /// <octal mode> SP <name> NUL <20-byte object ID>
    /// ```
    ///
    /// Entries are returned in the order they are stored; no sorting or
    /// duplicate checking takes place.
    ///
    /// Fails with [`Error::MalformedTree`] if a record is cut short or its
    /// mode isn't an octal number, and with [`Error::UnknownMode`] if the mode
    /// isn't one git recognizes. No entries are returned on failure.
    pub fn decode(raw: &RawObject) -> Result<Tree> {
        let data = raw.content();
        let mut entries = Vec::new();
        let mut pos = 0;

        while pos < data.len() {
            let space = find_from(data, pos, b' ')
                .ok_or_else(|| malformed(pos, "missing space after mode"))?;

            let code = Mode::from_octal(&data[pos..space])
                .ok_or_else(|| malformed(pos, "mode is not an octal number"))?;
            let mode = Mode::parse(code)?;
            pos = space + 1;

            let nul =
                find_from(data, pos, 0).ok_or_else(|| malformed(pos, "missing NUL after name"))?;
            let name = data[pos..nul].to_vec();
            pos = nul + 1;

            if data.len() - pos < 20 {
                return Err(malformed(pos, "truncated object ID"));
            }
            let hash =
                Hash::new(&data[pos..pos + 20]).map_err(|_| malformed(pos, "bad object ID"))?;
            pos += 20;

            entries.push(TreeEntry { name, mode, hash });
        }

        debug!(entries = entries.len(), "decoded tree");

        Ok(Tree {
            hash: raw.hash(),
            entries,
        })
    }

    /// Returns the ID of this tree.
    pub fn hash(&self) -> Hash {
        self.hash
    }

    /// Returns the entries in stored order.
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn iter(&self) -> slice::Iter<'_, TreeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the entry with the given name, if any.
    pub fn entry<N: AsRef<[u8]>>(&self, name: N) -> Option<&TreeEntry> {
        let name = name.as_ref();
        self.entries.iter().find(|e| e.name == name)
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = &'a TreeEntry;
    type IntoIter = slice::Iter<'a, TreeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn malformed(offset: usize, reason: &'static str) -> Error {
    debug!(offset, reason, "failed to decode tree");
    Error::MalformedTree { offset, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::object::Kind;

    const PLACEHOLDER_OBJECT_ID: &[u8; 20] =
        b"\0\x01\x02\x03\x04\x05\x06\x07\x08\x09\x0a\x0b\x0c\x0d\x0e\x0f\x10\x11\x12\x13";

    fn entry(mode_name_str: &str) -> Vec<u8> {
        entry_with_object_id(mode_name_str, PLACEHOLDER_OBJECT_ID)
    }

    fn entry_with_object_id(mode_name_str: &str, object_id: &[u8]) -> Vec<u8> {
        let mut r = Vec::new();
        r.extend_from_slice(mode_name_str.as_bytes());
        r.push(0);

        assert_eq!(object_id.len(), 20);
        r.extend_from_slice(object_id);
        r
    }

    fn decode(content: Vec<u8>) -> Result<Tree> {
        Tree::decode(&RawObject::with_content(Kind::Tree, content))
    }

    fn assert_malformed(content: Vec<u8>, expected_offset: usize) {
        match decode(content) {
            Err(Error::MalformedTree { offset, .. }) => assert_eq!(offset, expected_offset),
            r => panic!("unexpected result {:?}", r),
        }
    }

    #[test]
    fn empty_tree() {
        let t = decode(vec![]).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);

        // $ git hash-object -t tree /dev/null
        assert_eq!(
            t.hash().to_string(),
            "4b825dc642cb6eb9a060e54bf8d69288fbee4904"
        );
    }

    #[test]
    fn one_entry_of_each_mode() {
        for (record, mode, perms) in &[
            ("100644 regular-file", Mode::Regular, "-rw-r--r--"),
            ("100755 executable", Mode::Executable, "-rwxr-xr-x"),
            ("40000 tree", Mode::Dir, "drwxr-xr-x"),
            ("040000 tree", Mode::Dir, "drwxr-xr-x"),
            ("120000 symlink", Mode::Symlink, "lrw-r--r--"),
            ("160000 submodule", Mode::Submodule, "-rwxr-xr-x"),
        ] {
            let t = decode(entry(record)).unwrap();
            assert_eq!(t.len(), 1);

            let e = &t.entries()[0];
            assert_eq!(e.mode(), *mode);
            assert_eq!(e.mode().to_string(), *perms);
            assert_eq!(e.hash().as_bytes(), PLACEHOLDER_OBJECT_ID);
        }
    }

    #[test]
    fn keeps_encounter_order() {
        let mut cs = entry("100644 b");
        cs.extend(entry("100644 a"));
        cs.extend(entry("40000 c"));

        let t = decode(cs).unwrap();
        let names: Vec<&str> = t.iter().map(|e| e.name().unwrap()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);

        assert_eq!(t.entry("a").unwrap().mode(), Mode::Regular);
        assert_eq!(t.entry(b"c").unwrap().mode(), Mode::Dir);
        assert!(t.entry("d").is_none());
        assert_eq!((&t).into_iter().count(), 3);
    }

    #[test]
    fn name_with_spaces_and_raw_id_bytes() {
        let id = [b' '; 20];
        let t = decode(entry_with_object_id("100644 a name with spaces", &id)).unwrap();
        assert_eq!(t.entries()[0].name().unwrap(), "a name with spaces");
        assert_eq!(t.entries()[0].hash().as_bytes(), &id);
    }

    #[test]
    fn non_utf8_name() {
        let mut cs = b"100644 caf\xe9".to_vec();
        cs.push(0);
        cs.extend_from_slice(PLACEHOLDER_OBJECT_ID);

        let t = decode(cs).unwrap();
        let e = &t.entries()[0];
        assert!(e.name().is_err());
        assert_eq!(e.name_bytes(), b"caf\xe9");
        assert_eq!(e.name_lossy(), "caf\u{fffd}");
    }

    #[test]
    fn truncated_object_id() {
        let mut cs = entry("100644 a");
        cs.truncate(cs.len() - 1);
        assert_malformed(cs, 9);

        let mut cs = entry("100644 a");
        cs.extend(entry("100644 b"));
        cs.truncate(cs.len() - 19);
        assert_malformed(cs, 38);

        assert_malformed(b"100644 a\0".to_vec(), 9);
    }

    #[test]
    fn missing_name_terminator() {
        assert_malformed(b"100644 regular-file".to_vec(), 7);
    }

    #[test]
    fn missing_mode_terminator() {
        assert_malformed(b"100644".to_vec(), 0);

        let mut cs = entry("100644 a");
        cs.extend_from_slice(b"40000");
        assert_malformed(cs, 29);
    }

    #[test]
    fn bad_mode() {
        assert_malformed(entry(" a"), 0);
        assert_malformed(entry("10064x a"), 0);
        assert_malformed(entry("-100644 a"), 0);

        match decode(entry("100664 a")) {
            Err(Error::UnknownMode(code)) => assert_eq!(code, 0o100664),
            r => panic!("unexpected result {:?}", r),
        }
    }
}
