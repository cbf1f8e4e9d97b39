#![allow(clippy::derive_partial_eq_without_eq)]
//! This crate contains the in-memory attribute storage of a DICOM data set.
//!
//! A data set ([`Attributes`]) is a sparse collection of elements
//! addressed by tag,
//! kept as a two-level sorted index:
//! an ascending table of [`Group`]s,
//! each holding an ascending table of [`Element`]s.
//! Iterating over a data set therefore always yields elements
//! in the order required for serialization.
//!
//! Elements may hold nested data sets ([`Sequence`])
//! or segmented binary payloads ([`Fragments`]),
//! so that a data set is the root of a tree of items.
//! The specific character set and the byte order of each group
//! are context which flows down this tree.
//!
//! # Examples
//!
//! ```
//! use dicom_attrs::{Attributes, Tag, VR};
//! # fn main() -> Result<(), dicom_attrs::Error> {
//! let mut obj = Attributes::new();
//! obj.put_string(Tag(0x0010, 0x0010), None, VR::PN, "Doe^John")?;
//! obj.put_int(Tag(0x0028, 0x0010), None, VR::US, 512)?;
//!
//! assert_eq!(obj.get_string(Tag(0x0010, 0x0010), None, "")?, "Doe^John");
//! assert_eq!(obj.get_int(Tag(0x0028, 0x0010), None, 0)?, 512);
//! // absent values resolve to the given default
//! assert_eq!(obj.get_int(Tag(0x0028, 0x0011), None, 0)?, 0);
//! # Ok(())
//! # }
//! ```
//!
//! Nested data sets are created through the sequence
//! returned by [`Attributes::put_sequence`]:
//!
//! ```
//! use dicom_attrs::{Attributes, Tag, VR};
//! # fn main() -> Result<(), dicom_attrs::Error> {
//! let mut obj = Attributes::new();
//! let sequence = obj.put_sequence(Tag(0x0040, 0x0275), None, 1)?;
//! let item = sequence.push_new()?;
//! item.put_string(Tag(0x0040, 0x0009), None, VR::SH, "SPS-1")?;
//!
//! let sequence = obj.get_sequence(Tag(0x0040, 0x0275), None)?.unwrap();
//! assert_eq!(sequence.len(), 1);
//! assert_eq!(sequence[0].parent(), Some(obj.id()));
//! # Ok(())
//! # }
//! ```
//!
//! Private attributes are addressed by their tag
//! together with the identifier of their private creator:
//!
//! ```
//! use dicom_attrs::{Attributes, Tag, VR};
//! # fn main() -> Result<(), dicom_attrs::Error> {
//! let mut obj = Attributes::new();
//! obj.put_string(Tag(0x0009, 0x1001), Some("ACME 1.0"), VR::LO, "gadget")?;
//!
//! assert!(obj.contains(Tag(0x0009, 0x1001), Some("ACME 1.0")));
//! assert!(!obj.contains(Tag(0x0009, 0x1001), Some("OTHER")));
//! assert_eq!(obj.get_private_creator(Tag(0x0009, 0x1001)).as_deref(), Some("ACME 1.0"));
//! # Ok(())
//! # }
//! ```
//!
//! This crate performs no I/O and has no internal synchronization:
//! a data set is built by one writer,
//! after which it may be shared for reading.

pub mod attributes;
pub mod element;
pub mod fragments;
pub mod group;
pub mod sequence;
pub mod value;

mod util;

pub use crate::attributes::{Attributes, AttributesOptions, DataSetId};
pub use crate::element::Element;
pub use crate::fragments::Fragments;
pub use crate::group::Group;
pub use crate::sequence::Sequence;
pub use crate::value::Value;

pub use byteordered::Endianness;
pub use dicom_attrs_core::header::{ElementNumber, GroupNumber};
pub use dicom_attrs_core::text::{SpecificCharacterSet, DEFAULT_CHARACTER_SET};
pub use dicom_attrs_core::{tags, Tag, VR};

use dicom_attrs_core::text::{DecodeTextError, EncodeTextError};
use snafu::{Backtrace, Snafu};
use std::collections::TryReserveError;
use std::num::{ParseFloatError, ParseIntError};

/// An error which may occur when reading or writing attributes.
///
/// Absent attributes are never an error:
/// getters resolve them to the given default or to `None`.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The data set is already an item of another data set.
    #[snafu(display("Data set is already contained by data set {}", parent))]
    AlreadyParented {
        parent: DataSetId,
        backtrace: Backtrace,
    },
    /// The stored value cannot take the requested shape.
    #[snafu(display("Value of {} ({}) cannot be read as {}", tag, vr, requested))]
    IncompatibleValue {
        tag: Tag,
        vr: VR,
        requested: &'static str,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not parse integer value of {}", tag))]
    ParseInteger {
        tag: Tag,
        source: ParseIntError,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not parse decimal value of {}", tag))]
    ParseFloat {
        tag: Tag,
        source: ParseFloatError,
        backtrace: Backtrace,
    },
    #[snafu(display("Value of {} does not fit in {}", tag, target))]
    NumericOutOfRange {
        tag: Tag,
        target: &'static str,
        backtrace: Backtrace,
    },
    #[snafu(display(
        "Binary value of {} has {} bytes, which is not a multiple of {}",
        tag,
        len,
        width
    ))]
    InvalidValueLength {
        tag: Tag,
        len: usize,
        width: usize,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not decode text of {}", tag))]
    DecodeText {
        tag: Tag,
        #[snafu(backtrace)]
        source: DecodeTextError,
    },
    #[snafu(display("Could not encode text of {}", tag))]
    EncodeText {
        tag: Tag,
        #[snafu(backtrace)]
        source: EncodeTextError,
    },
    /// All private blocks of the group are taken by other creators.
    #[snafu(display(
        "No free private block for creator `{}` in group {:04X}",
        creator,
        group
    ))]
    NoFreePrivateBlock {
        group: GroupNumber,
        creator: String,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not reserve capacity for {} entries", requested))]
    Allocation {
        requested: usize,
        source: TryReserveError,
        backtrace: Backtrace,
    },
}

/// Type alias for a result from this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
