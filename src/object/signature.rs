use std::fmt;
use std::str::{self, FromStr};

/// A `Signature` combines a person's identity (name and e-mail address)
/// with the timestamp for a particular action.
///
/// Signatures are typically associated with commits or tags in git.
///
/// The `timestamp` value is in seconds relative to the Unix epoch; zero means
/// the timestamp was absent or could not be read.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Signature {
    name: String,
    email: String,
    timestamp: i64,
    tz_offset: i16,
}

impl Signature {
    /// Creates a new signature. `tz_offset` is in minutes east of GMT.
    pub fn new(name: &str, email: &str, timestamp: i64, tz_offset: i16) -> Signature {
        Signature {
            name: name.to_string(),
            email: email.to_string(),
            timestamp,
            tz_offset,
        }
    }

    /// Parse a name line (e.g. the value of an author, committer, or tagger
    /// header) into a `Signature`.
    ///
    /// This never fails. Historical git objects contain all sorts of
    /// irregular name lines, so any part that can't be understood is left
    /// empty (or zero) and parsing carries on with the rest:
    ///
    /// * The name is everything before the first `<`, minus trailing whitespace.
    /// * The email is everything between that `<` and the next `>`.
    /// * After the `>` come the timestamp and an optional `+HHMM`/`-HHMM`
    ///   time zone offset.
    ///
    /// A line without any `<` is taken as a bare name, although a trailing
    /// timestamp (and offset) is still recognized.
    pub fn parse(line: &[u8]) -> Signature {
        let line = drop_last_newline(line);

        let open = match line.iter().position(|b| *b == b'<') {
            Some(n) => n,
            None => return parse_bare_name(line),
        };

        let name = lossy(trim_end(&line[..open]));
        let line = &line[open + 1..];

        let close = match line.iter().position(|b| *b == b'>') {
            Some(n) => n,
            None => {
                return Signature {
                    name,
                    ..Signature::default()
                }
            }
        };

        let email = lossy(&line[..close]);

        let (rest, last) = rsplit_word(trim_end(&line[close + 1..]));
        let (timestamp, tz_offset) = if is_blank(rest) {
            (parse_timestamp(last).unwrap_or(0), 0)
        } else {
            let (_, timestamp) = rsplit_word(rest);
            match parse_timestamp(timestamp) {
                Some(t) => (t, parse_tz(last).unwrap_or(0)),
                None => (0, 0),
            }
        };

        Signature {
            name,
            email,
            timestamp,
            tz_offset,
        }
    }

    /// Returns the person's human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the person's email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Returns the timezone offset (minutes relative to GMT).
    pub fn tz_offset(&self) -> i16 {
        self.tz_offset
    }

    /// Returns the timezone formatted in human readable offset from GMT.
    pub fn format_tz(&self) -> String {
        let sign = if self.tz_offset < 0 { "-" } else { "+" };

        let offset = i32::from(self.tz_offset).abs();
        let hours = offset / 60;
        let min = offset % 60;

        format!("{}{:02}{:02}", sign, hours, min)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp,
            self.format_tz()
        )
    }
}

fn parse_bare_name(line: &[u8]) -> Signature {
    let line = trim_end(line);
    let (rest, last) = rsplit_word(line);

    if let Some(tz_offset) = parse_tz(last) {
        let (name, timestamp) = rsplit_word(rest);
        if let Some(timestamp) = parse_timestamp(timestamp) {
            return Signature {
                name: lossy(name),
                email: String::new(),
                timestamp,
                tz_offset,
            };
        }
    } else if let Some(timestamp) = parse_timestamp(last) {
        return Signature {
            name: lossy(rest),
            email: String::new(),
            timestamp,
            tz_offset: 0,
        };
    }

    Signature {
        name: lossy(line),
        ..Signature::default()
    }
}

fn lossy(s: &[u8]) -> String {
    String::from_utf8_lossy(s).into_owned()
}

fn drop_last_newline(s: &[u8]) -> &[u8] {
    if s.last() == Some(&b'\n') {
        &s[0..s.len() - 1]
    } else {
        s
    }
}

fn trim_end(s: &[u8]) -> &[u8] {
    match s.iter().rposition(|b| !b.is_ascii_whitespace()) {
        Some(n) => &s[..n + 1],
        None => &[],
    }
}

fn is_blank(s: &[u8]) -> bool {
    s.iter().all(|b| b.is_ascii_whitespace())
}

// Splits off the last whitespace-separated word. Expects `s` to have no
// trailing whitespace.
fn rsplit_word(s: &[u8]) -> (&[u8], &[u8]) {
    match s.iter().rposition(|b| b.is_ascii_whitespace()) {
        Some(n) => (trim_end(&s[..n]), &s[n + 1..]),
        None => (&[], s),
    }
}

fn parse_timestamp(s: &[u8]) -> Option<i64> {
    str::from_utf8(s).ok().and_then(|s| i64::from_str(s).ok())
}

fn parse_tz(s: &[u8]) -> Option<i16> {
    if s.len() != 5 {
        return None;
    }

    let sign: i16 = match s[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };

    let digits = &s[1..];
    if !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }

    let d = |i: usize| (digits[i] - b'0') as i16;
    let hh = d(0) * 10 + d(1);
    let mm = d(2) * 10 + d(3);

    Some(sign * (hh * 60 + mm))
}
