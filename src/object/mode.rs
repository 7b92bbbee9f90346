use std::fmt;

use super::{Error, Result};

/// Describes the file type of a tree entry.
///
/// Git uses a variation on the Unix file permissions flags to denote a file's
/// intended type on disk. The following values are recognized:
///
/// * `0o100644` - normal file
/// * `0o100755` - executable file
/// * `0o120000` - symbolic link
/// * `0o040000` - tree (subdirectory)
/// * `0o160000` - submodule (aka gitlink)
///
/// `Display` renders the mode as a Unix-style permission string,
/// e.g. `-rw-r--r--` for a normal file or `drwxr-xr-x` for a tree.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Mode {
    Regular,
    Executable,
    Symlink,
    Dir,
    Submodule,
}

impl Mode {
    /// Convert from git file-mode integer to `Mode` enum.
    ///
    /// Returns [`Error::UnknownMode`] if the value is not one of the recognized constants.
    pub fn parse(code: u32) -> Result<Mode> {
        match code {
            0o100644 => Ok(Mode::Regular),
            0o100755 => Ok(Mode::Executable),
            0o120000 => Ok(Mode::Symlink),
            0o040000 => Ok(Mode::Dir),
            0o160000 => Ok(Mode::Submodule),
            _ => Err(Error::UnknownMode(code)),
        }
    }

    /// Convert from `Mode` enum to git file-mode integer.
    pub fn code(self) -> u32 {
        match self {
            Mode::Regular => 0o100644,
            Mode::Executable => 0o100755,
            Mode::Symlink => 0o120000,
            Mode::Dir => 0o040000,
            Mode::Submodule => 0o160000,
        }
    }

    /// Parse the ASCII octal digits used for modes in tree records.
    ///
    /// Returns `None` if the slice is empty, contains anything other than
    /// octal digits, or overflows. Whether the number is a known mode is
    /// not checked here.
    pub fn from_octal(digits: &[u8]) -> Option<u32> {
        if digits.is_empty() {
            return None;
        }

        digits.iter().try_fold(0u32, |acc, &d| match d {
            b'0'..=b'7' => acc.checked_mul(8)?.checked_add((d - b'0') as u32),
            _ => None,
        })
    }

    /// Returns true if the entry refers to another tree.
    pub fn is_tree(self) -> bool {
        self == Mode::Dir
    }

    fn permissions(self) -> &'static str {
        match self {
            Mode::Regular => "-rw-r--r--",
            Mode::Executable => "-rwxr-xr-x",
            Mode::Symlink => "lrw-r--r--",
            Mode::Dir => "drwxr-xr-x",
            Mode::Submodule => "-rwxr-xr-x",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.permissions())
    }
}
