//! Pattern mini-language: `prefix<letters[/digits[/specials]]>suffix`.
//!
//! Brackets are located with toggle semantics rather than a nesting stack:
//! a second unescaped `<` clears the pending start, a third sets it again, and
//! `>` behaves the same way for the end. A character preceded by a backslash
//! never takes part in boundary tracking.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{PatternError, Result};

/// Upper bound for `letters + digits + specials`.
pub const PATTERN_MAX_LEN: usize = 64;

const PATTERN_SEPARATOR: char = '/';
const MAX_SEGMENTS: usize = 3;
const ESCAPE: u8 = b'\\';

/// Compiled shape of a random string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternDescriptor {
    prefix: String,
    suffix: String,
    letters: usize,
    digits: usize,
    specials: usize,
}

impl PatternDescriptor {
    /// Build a descriptor from explicit parts, enforcing the length cap.
    pub fn new(
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        letters: usize,
        digits: usize,
        specials: usize,
    ) -> Result<Self> {
        let actual = letters.saturating_add(digits).saturating_add(specials);
        if actual > PATTERN_MAX_LEN {
            return Err(PatternError::PatternTooLong {
                max: PATTERN_MAX_LEN,
                actual,
            });
        }

        Ok(Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
            letters,
            digits,
            specials,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn letters(&self) -> usize {
        self.letters
    }

    pub fn digits(&self) -> usize {
        self.digits
    }

    pub fn specials(&self) -> usize {
        self.specials
    }

    /// Number of generated characters, excluding prefix and suffix.
    pub fn length(&self) -> usize {
        self.letters + self.digits + self.specials
    }
}

/// Renders the descriptor in pattern syntax, escaped so that [`compile`]
/// reads it back unchanged. A prefix ending in a backslash has no such
/// rendering; `compile` never produces one.
impl fmt::Display for PatternDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}<{}/{}/{}>{}",
            escape(&self.prefix),
            self.letters,
            self.digits,
            self.specials,
            escape(&self.suffix)
        )
    }
}

impl FromStr for PatternDescriptor {
    type Err = PatternError;

    fn from_str(raw: &str) -> Result<Self> {
        compile(raw)
    }
}

/// Compile a raw pattern string into a descriptor.
pub fn compile(raw: &str) -> Result<PatternDescriptor> {
    let (start, end) = match locate_boundaries(raw) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => return Err(PatternError::PatternNotFound),
    };

    let (letters, digits, specials) = parse_body(&raw[start + 1..end])?;
    PatternDescriptor::new(
        unescape(&raw[..start]),
        unescape(&raw[end + 1..]),
        letters,
        digits,
        specials,
    )
}

/// Byte offsets of the opening and closing brackets, if any survive the scan.
pub(crate) fn locate_boundaries(raw: &str) -> (Option<usize>, Option<usize>) {
    let bytes = raw.as_bytes();
    let mut start = None;
    let mut end = None;

    for (index, ch) in raw.char_indices() {
        if index > 0 && bytes[index - 1] == ESCAPE {
            continue;
        }
        match ch {
            '<' => start = if start.is_some() { None } else { Some(index) },
            '>' => end = if end.is_some() { None } else { Some(index) },
            _ => {}
        }
    }

    (start, end)
}

fn parse_body(body: &str) -> Result<(usize, usize, usize)> {
    let segments: Vec<&str> = body.split(PATTERN_SEPARATOR).collect();
    if segments.len() > MAX_SEGMENTS {
        return Err(PatternError::InvalidPatternBody(format!(
            "expected at most {MAX_SEGMENTS} segments, found {}",
            segments.len()
        )));
    }

    let mut counts = [0_usize; MAX_SEGMENTS];
    for (slot, segment) in counts.iter_mut().zip(&segments) {
        *slot = segment.parse::<usize>().map_err(|err| {
            PatternError::InvalidPatternBody(format!("segment '{segment}': {err}"))
        })?;
    }

    let actual = counts.iter().fold(0_usize, |acc, count| acc.saturating_add(*count));
    if actual > PATTERN_MAX_LEN {
        return Err(PatternError::PatternTooLong {
            max: PATTERN_MAX_LEN,
            actual,
        });
    }

    Ok((counts[0], counts[1], counts[2]))
}

/// Drop a backslash when the next character exists and is not a backslash.
///
/// `\\` keeps the first backslash; the second is judged against whatever
/// follows it. A trailing backslash is kept.
pub(crate) fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' && chars.peek().is_some_and(|next| *next != '\\') {
            continue;
        }
        out.push(ch);
    }
    out
}

/// Inverse of [`unescape`]: a run of backslashes before another character
/// gains one backslash, and bare brackets gain one.
fn escape(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    let mut run = 0_usize;
    for ch in literal.chars() {
        if ch == '\\' {
            run += 1;
            continue;
        }
        if run > 0 {
            out.extend(std::iter::repeat_n('\\', run + 1));
            run = 0;
        } else if ch == '<' || ch == '>' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.extend(std::iter::repeat_n('\\', run));
    out
}
