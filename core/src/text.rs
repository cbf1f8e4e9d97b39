//! Specific character sets and the text conversions behind them.
//!
//! A data set declares its character set through (0008,0005).
//! Only the single-byte repertoires of ISO 8859, UTF-8 and GB18030
//! are supported. Code extensions are recognized but not switched to.

use encoding::all::{GB18030, ISO_8859_1, ISO_8859_2, ISO_8859_3, ISO_8859_4, ISO_8859_5, UTF_8};
use encoding::{DecoderTrap, EncoderTrap, Encoding, EncodingRef};
use snafu::{Backtrace, Snafu};
use std::borrow::Cow;
use std::fmt;

/// Bytes which do not form valid text in the character set.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum DecodeTextError {
    /// A byte sequence with no meaning in the character set.
    #[snafu(display("Malformed {} text: {}", term, reason))]
    Malformed {
        /// The defined term of the character set.
        term: &'static str,
        /// The reason given by the decoder.
        reason: Cow<'static, str>,
        backtrace: Backtrace,
    },
}

/// Text holding characters outside of the character set.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum EncodeTextError {
    /// A character with no code in the character set.
    #[snafu(display("Text not representable in {}: {}", term, reason))]
    Unrepresentable {
        /// The defined term of the character set.
        term: &'static str,
        /// The reason given by the encoder.
        reason: Cow<'static, str>,
        backtrace: Backtrace,
    },
}

/// The character set in effect for a data set which does not declare one,
/// and whose ancestors do not declare one either.
pub const DEFAULT_CHARACTER_SET: SpecificCharacterSet = SpecificCharacterSet::Default;

/// The character sets which text values may be decoded with.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[non_exhaustive]
pub enum SpecificCharacterSet {
    /// **ISO-IR 6**: the default repertoire.
    Default,
    /// **ISO-IR 100** (ISO-8859-1): Latin alphabet no. 1, Western Europe.
    IsoIr100,
    /// **ISO-IR 101** (ISO-8859-2): Latin alphabet no. 2, Central Europe.
    IsoIr101,
    /// **ISO-IR 109** (ISO-8859-3): Latin alphabet no. 3, South Europe.
    IsoIr109,
    /// **ISO-IR 110** (ISO-8859-4): Latin alphabet no. 4, North Europe.
    IsoIr110,
    /// **ISO-IR 144** (ISO-8859-5): Latin/Cyrillic.
    IsoIr144,
    /// **ISO-IR 192**: Unicode in UTF-8.
    IsoIr192,
    /// **GB18030**: Simplified Chinese.
    Gb18030,
}

impl Default for SpecificCharacterSet {
    fn default() -> Self {
        DEFAULT_CHARACTER_SET
    }
}

impl fmt::Display for SpecificCharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.defined_term())
    }
}

impl SpecificCharacterSet {
    /// Look up a single defined term of (0008,0005).
    ///
    /// Surrounding spaces are ignored,
    /// and the ISO 2022 spelling of each term is accepted.
    ///
    /// ```
    /// # use dicom_attrs_core::text::SpecificCharacterSet;
    /// let character_set = SpecificCharacterSet::from_code("ISO_IR 100");
    /// assert_eq!(character_set, Some(SpecificCharacterSet::IsoIr100));
    /// ```
    pub fn from_code(code: &str) -> Option<Self> {
        use SpecificCharacterSet::*;
        let code = code.trim();
        let number = code
            .strip_prefix("ISO 2022 IR ")
            .or_else(|| code.strip_prefix("ISO_IR "))
            .or_else(|| code.strip_prefix("ISO_IR_"));
        match (code, number) {
            ("", _) | ("Default", _) | (_, Some("6")) => Some(Default),
            (_, Some("100")) => Some(IsoIr100),
            (_, Some("101")) => Some(IsoIr101),
            (_, Some("109")) => Some(IsoIr109),
            (_, Some("110")) => Some(IsoIr110),
            (_, Some("144")) => Some(IsoIr144),
            // no ISO 2022 form
            ("ISO_IR 192", _) | ("ISO_IR_192", _) => Some(IsoIr192),
            ("GB18030", _) => Some(Gb18030),
            _ => None,
        }
    }

    /// Resolve all values of a Specific Character Set (0008,0005) element.
    ///
    /// The first value selects the base repertoire,
    /// and an empty first value stands for the default repertoire.
    /// The remaining values are code extensions,
    /// which are not switched to but must still be known terms.
    /// An element with no values at all declares the default repertoire.
    ///
    /// Returns `None` if any of the codes is not recognized.
    ///
    /// ```
    /// # use dicom_attrs_core::text::SpecificCharacterSet;
    /// let codes = ["", "ISO 2022 IR 100"];
    /// assert_eq!(
    ///     SpecificCharacterSet::from_codes(&codes),
    ///     Some(SpecificCharacterSet::Default),
    /// );
    /// ```
    pub fn from_codes<S>(codes: &[S]) -> Option<Self>
    where
        S: AsRef<str>,
    {
        let (first, extensions) = match codes.split_first() {
            Some(split) => split,
            None => return Some(DEFAULT_CHARACTER_SET),
        };
        let base = Self::from_code(first.as_ref())?;
        if extensions
            .iter()
            .all(|code| Self::from_code(code.as_ref()).is_some())
        {
            Some(base)
        } else {
            None
        }
    }

    /// The defined term naming this character set in (0008,0005).
    pub fn defined_term(self) -> &'static str {
        use SpecificCharacterSet::*;
        match self {
            Default => "ISO_IR 6",
            IsoIr100 => "ISO_IR 100",
            IsoIr101 => "ISO_IR 101",
            IsoIr109 => "ISO_IR 109",
            IsoIr110 => "ISO_IR 110",
            IsoIr144 => "ISO_IR 144",
            IsoIr192 => "ISO_IR 192",
            Gb18030 => "GB18030",
        }
    }

    fn encoding(self) -> EncodingRef {
        use SpecificCharacterSet::*;
        match self {
            // the default repertoire is a subset of Latin-1
            Default | IsoIr100 => ISO_8859_1,
            IsoIr101 => ISO_8859_2,
            IsoIr109 => ISO_8859_3,
            IsoIr110 => ISO_8859_4,
            IsoIr144 => ISO_8859_5,
            IsoIr192 => UTF_8,
            Gb18030 => GB18030,
        }
    }

    /// Decode bytes into a string.
    ///
    /// The result may still hold backslashes separating individual values.
    pub fn decode(self, bytes: &[u8]) -> Result<String, DecodeTextError> {
        self.encoding()
            .decode(bytes, DecoderTrap::Strict)
            .map_err(|reason| {
                MalformedSnafu {
                    term: self.defined_term(),
                    reason,
                }
                .build()
            })
    }

    /// Encode a string, which may hold backslash separated values.
    pub fn encode(self, text: &str) -> Result<Vec<u8>, EncodeTextError> {
        self.encoding()
            .encode(text, EncoderTrap::Strict)
            .map_err(|reason| {
                UnrepresentableSnafu {
                    term: self.defined_term(),
                    reason,
                }
                .build()
            })
    }
}
