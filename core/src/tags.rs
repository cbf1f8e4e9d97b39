//! Constants for the attributes which the storage engine interprets itself.
//!
//! Every other attribute is opaque to the engine
//! and is addressed by whatever tag the caller provides.

use crate::header::Tag;

/// SpecificCharacterSet (0008,0005) CS 1-n
///
/// Defines the character set used by the text values of the data set
/// and of every nested item which does not override it.
pub const SPECIFIC_CHARACTER_SET: Tag = Tag(0x0008, 0x0005);
/// PixelData (7FE0,0010) OB or OW 1
pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);
