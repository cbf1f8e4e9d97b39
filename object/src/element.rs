//! A single stored attribute value.

use crate::value::{Context, Value, C};
use crate::Result;
use byteordered::Endianness;
use dicom_attrs_core::header::{ElementNumber, GroupNumber};
use dicom_attrs_core::text::SpecificCharacterSet;
use dicom_attrs_core::{Tag, VR};
use std::borrow::Cow;

/// A data element held by a [`Group`](crate::Group):
/// its element number, value representation,
/// the private creator it belongs to (if any)
/// and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    number: ElementNumber,
    vr: VR,
    private_creator: Option<String>,
    value: Value,
}

impl Element {
    pub(crate) fn new(
        number: ElementNumber,
        vr: VR,
        private_creator: Option<String>,
        value: Value,
    ) -> Self {
        Element {
            number,
            vr,
            private_creator,
            value,
        }
    }

    /// The element number, which is unique within its group.
    ///
    /// For private data elements,
    /// this is the number in the block assigned to the private creator.
    #[inline]
    pub fn number(&self) -> ElementNumber {
        self.number
    }

    /// The value representation of this element.
    #[inline]
    pub fn vr(&self) -> VR {
        self.vr
    }

    /// The private creator which owns this element,
    /// if it is a private data element.
    #[inline]
    pub fn private_creator(&self) -> Option<&str> {
        self.private_creator.as_deref()
    }

    /// The stored value.
    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Check whether no actual value is stored.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    pub(crate) fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    /// Replace both the representation and the value of the element.
    pub(crate) fn set(&mut self, vr: VR, private_creator: Option<String>, value: Value) {
        self.vr = vr;
        self.private_creator = private_creator;
        self.value = value;
    }

    /// Interpret this element as a private creator element,
    /// obtaining the creator identifier it declares.
    pub(crate) fn creator_id(&self) -> Option<Cow<'_, str>> {
        match &self.value {
            Value::Strs(values) => values.first().map(|s| Cow::Borrowed(trim_padding(s))),
            Value::Bytes(bytes) => match String::from_utf8_lossy(bytes) {
                Cow::Borrowed(s) => Some(Cow::Borrowed(trim_padding(s))),
                Cow::Owned(s) => Some(Cow::Owned(trim_padding(&s).to_owned())),
            },
            _ => None,
        }
    }

    fn context(
        &self,
        group: GroupNumber,
        endianness: Endianness,
        character_set: SpecificCharacterSet,
    ) -> Context {
        Context {
            tag: Tag(group, self.number),
            vr: self.vr,
            endianness,
            character_set,
        }
    }

    pub(crate) fn strings(
        &self,
        group: GroupNumber,
        endianness: Endianness,
        character_set: SpecificCharacterSet,
    ) -> Result<Option<C<String>>> {
        self.value
            .to_strings(&self.context(group, endianness, character_set))
    }

    pub(crate) fn ints(
        &self,
        group: GroupNumber,
        endianness: Endianness,
        character_set: SpecificCharacterSet,
    ) -> Result<Option<C<i32>>> {
        self.value
            .to_ints(&self.context(group, endianness, character_set))
    }

    pub(crate) fn floats(
        &self,
        group: GroupNumber,
        endianness: Endianness,
        character_set: SpecificCharacterSet,
    ) -> Result<Option<C<f64>>> {
        self.value
            .to_floats(&self.context(group, endianness, character_set))
    }

    pub(crate) fn bytes(
        &self,
        group: GroupNumber,
        endianness: Endianness,
        character_set: SpecificCharacterSet,
    ) -> Result<Option<Cow<'_, [u8]>>> {
        self.value
            .to_bytes(&self.context(group, endianness, character_set))
    }
}

/// Strip the trailing padding of a text value.
pub(crate) fn trim_padding(s: &str) -> &str {
    s.trim_end_matches(|c: char| c == ' ' || c == '\0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn creator_id_from_text_or_bytes() {
        let e = Element::new(0x10, VR::LO, None, Value::Strs(smallvec!["ACME ".to_owned()]));
        assert_eq!(e.creator_id().as_deref(), Some("ACME"));
        let e = Element::new(0x11, VR::LO, None, Value::Bytes(b"ACME\0".to_vec()));
        assert_eq!(e.creator_id().as_deref(), Some("ACME"));
        let e = Element::new(0x12, VR::LO, None, Value::Null);
        assert_eq!(e.creator_id(), None);
    }

    #[test]
    fn conversions_carry_the_full_tag() {
        let e = Element::new(0x0010, VR::US, None, Value::Ints(smallvec![-5]));
        let err = e
            .bytes(0x0028, Endianness::Little, SpecificCharacterSet::Default)
            .unwrap_err();
        assert!(matches!(
            err,
            crate::Error::NumericOutOfRange { tag: Tag(0x0028, 0x0010), .. }
        ));
    }
}
