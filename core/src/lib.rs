#![crate_type = "lib"]
#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    unused_import_braces
)]

//! This is the core library of the DICOM attribute storage engine,
//! containing the concepts which every data set layer relies on.
//!
//! The current structure of this crate is as follows:
//!
//! - [`header`] comprises the DICOM attribute tag
//!   and the value representation catalogue,
//!   including the classification that storage needs
//!   in order to coerce values between shapes.
//! - [`tags`] holds constants for the attributes
//!   which the storage engine interprets on its own.
//! - [`text`] contains the specific character set
//!   which decodes and encodes text values.

pub mod header;
pub mod tags;
pub mod text;

pub use header::{ElementNumber, GroupNumber, Tag, VR};
pub use text::{SpecificCharacterSet, DEFAULT_CHARACTER_SET};
