//! Character set presets
//!
//! A charset is the alphabet of the keyspace codec. Presets are fixed and
//! selected by name; an unknown name resolves to lowercase letters.

use serde::Serialize;
use std::fmt;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const LOWERCASE_DIGITS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Named charset preset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Charset {
    #[default]
    Lowercase,
    Digits,
    LowercaseDigits,
    Uppercase,
    Alphanumeric,
}

impl Charset {
    /// All presets, in display order
    pub const ALL: [Charset; 5] = [
        Charset::Lowercase,
        Charset::Digits,
        Charset::LowercaseDigits,
        Charset::Uppercase,
        Charset::Alphanumeric,
    ];

    /// Look up a preset by name, without fallback
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Resolve a preset by name
    ///
    /// Unknown names fall back to [`Charset::Lowercase`].
    pub fn from_name(name: &str) -> Self {
        Self::lookup(name).unwrap_or_else(|| {
            tracing::warn!(charset = name, "unknown charset, falling back to lowercase");
            Charset::Lowercase
        })
    }

    /// Preset name as accepted by [`Charset::from_name`]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lowercase => "lowercase",
            Self::Digits => "digits",
            Self::LowercaseDigits => "lowercase_digits",
            Self::Uppercase => "uppercase",
            Self::Alphanumeric => "alphanumeric",
        }
    }

    /// Ordered alphabet of the preset
    pub fn chars(&self) -> &'static [u8] {
        match self {
            Self::Lowercase => LOWERCASE,
            Self::Digits => DIGITS,
            Self::LowercaseDigits => LOWERCASE_DIGITS,
            Self::Uppercase => UPPERCASE,
            Self::Alphanumeric => ALPHANUMERIC,
        }
    }

    /// Alphabet size (the codec base)
    pub fn base(&self) -> usize {
        self.chars().len()
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
