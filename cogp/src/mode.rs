//! Permission mode parsing and rendering.
//!
//! This module decodes the permissions argument into a numeric mode. Three
//! forms are accepted:
//!
//! - three octal digits for owner, group and other (`"755"`)
//! - four octal digits, the first holding the special bits (`"4755"`)
//! - a nine character symbolic string (`"rwsr-xr-x"`)
//!
//! The single character `"/"` means the permissions are left unchanged.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Set-user-ID bit.
const SETUID: u32 = 0o4;
/// Set-group-ID bit.
const SETGID: u32 = 0o2;
/// Sticky bit.
const STICKY: u32 = 0o1;

/// Execute-position letters per triplet: (with execute, without execute, special bit).
const EXEC_SPECIALS: [(u8, u8, u32); 3] = [
    (b's', b'S', SETUID),
    (b's', b'S', SETGID),
    (b't', b'T', STICKY),
];

/// A numeric permission mode, including the special bits.
///
/// # Examples
///
/// ```
/// use cogp::Mode;
///
/// let mode = Mode::from_bits(0o4755).unwrap();
/// assert_eq!(mode.bits(), 0o4755);
/// assert_eq!(mode.to_string(), "4755");
/// assert_eq!(mode.symbolic(), "rwsr-xr-x");
///
/// assert!(Mode::from_bits(0o10000).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mode(u32);

impl Mode {
    /// The largest representable mode (all permission and special bits set).
    pub const MAX: u32 = 0o7777;

    /// Creates a mode from raw bits, rejecting anything above [`Mode::MAX`].
    #[must_use]
    pub const fn from_bits(bits: u32) -> Option<Self> {
        if bits > Self::MAX {
            None
        } else {
            Some(Self(bits))
        }
    }

    /// Returns the raw mode bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns the special-bit field (setuid=4, setgid=2, sticky=1).
    #[must_use]
    pub const fn special(self) -> u32 {
        self.0 >> 9
    }

    /// Renders the mode as a nine character symbolic string.
    ///
    /// The result is accepted by [`ModeChange::parse`] and parses back to
    /// the same mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use cogp::Mode;
    ///
    /// assert_eq!(Mode::from_bits(0o644).unwrap().symbolic(), "rw-r--r--");
    /// assert_eq!(Mode::from_bits(0o1777).unwrap().symbolic(), "rwxrwxrwt");
    /// assert_eq!(Mode::from_bits(0o2640).unwrap().symbolic(), "rw-r-S---");
    /// ```
    #[must_use]
    pub fn symbolic(self) -> String {
        let special = self.special();
        let mut out = String::with_capacity(9);
        for (index, &(with_exec, without_exec, special_bit)) in EXEC_SPECIALS.iter().enumerate()
        {
            let bits = (self.0 >> (6 - 3 * index)) & 0o7;
            out.push(if bits & 4 != 0 { 'r' } else { '-' });
            out.push(if bits & 2 != 0 { 'w' } else { '-' });
            let exec = bits & 1 != 0;
            let exec_char = match (special & special_bit != 0, exec) {
                (true, true) => with_exec,
                (true, false) => without_exec,
                (false, true) => b'x',
                (false, false) => b'-',
            };
            out.push(char::from(exec_char));
        }
        out
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

/// The requested change to a path's permission bits.
///
/// # Examples
///
/// ```
/// use cogp::ModeChange;
///
/// assert_eq!(ModeChange::parse("/").unwrap(), ModeChange::Unchanged);
/// assert_eq!(
///     ModeChange::parse("rwsr-xr-x").unwrap(),
///     ModeChange::parse("4755").unwrap(),
/// );
/// assert!(ModeChange::parse("75").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    /// Leave the permission bits as they are.
    Unchanged,
    /// Set the permission bits to this mode.
    Set(Mode),
}

impl ModeChange {
    /// Parses a permissions argument.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPermissions`] if the string has a length other
    /// than 3, 4 or 9, or contains a character not allowed at its position.
    pub fn parse(spec: &str) -> Result<Self> {
        if spec == "/" {
            return Ok(Self::Unchanged);
        }

        let bytes = spec.as_bytes();
        let bits = match bytes.len() {
            3 | 4 => parse_octal(bytes),
            9 => parse_symbolic(bytes),
            _ => None,
        };

        bits.and_then(Mode::from_bits)
            .map(Self::Set)
            .ok_or_else(|| Error::invalid_permissions(spec))
    }

    /// Returns the mode to apply, if any.
    #[must_use]
    pub const fn mode(self) -> Option<Mode> {
        match self {
            Self::Unchanged => None,
            Self::Set(mode) => Some(mode),
        }
    }

    /// Returns `true` if the permission bits are left unchanged.
    #[must_use]
    pub const fn is_unchanged(self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

impl FromStr for ModeChange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Folds octal digits into a mode; the leading digit of a four digit form
/// lands in the special-bit field.
fn parse_octal(bytes: &[u8]) -> Option<u32> {
    bytes.iter().try_fold(0u32, |acc, &c| match c {
        b'0'..=b'7' => Some((acc << 3) | u32::from(c - b'0')),
        _ => None,
    })
}

fn parse_symbolic(bytes: &[u8]) -> Option<u32> {
    let mut special = 0;
    let mut triplets = 0;

    for (chunk, &(with_exec, without_exec, special_bit)) in
        bytes.chunks_exact(3).zip(EXEC_SPECIALS.iter())
    {
        let mut bits = flag(chunk[0], b'r', 4)? | flag(chunk[1], b'w', 2)?;
        match chunk[2] {
            b'x' => bits |= 1,
            b'-' => {}
            c if c == with_exec => {
                bits |= 1;
                special |= special_bit;
            }
            c if c == without_exec => special |= special_bit,
            _ => return None,
        }
        triplets = (triplets << 3) | bits;
    }

    Some((special << 9) | triplets)
}

fn flag(c: u8, letter: u8, bit: u32) -> Option<u32> {
    match c {
        b'-' => Some(0),
        c if c == letter => Some(bit),
        _ => None,
    }
}

#[cfg(all(test, feature = "property-tests"))]
mod proptests;
