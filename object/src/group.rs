//! Element storage for a single group number.
//!
//! A group keeps its elements in a table sorted by element number,
//! looked up by binary search.
//! Private data elements are addressed through their private creator,
//! which is resolved to the block of element numbers it was assigned.

use crate::attributes::ParentLink;
use crate::element::{trim_padding, Element};
use crate::fragments::Fragments;
use crate::sequence::Sequence;
use crate::util;
use crate::value::{swap_byte_order, Value, C};
use crate::{NoFreePrivateBlockSnafu, Result};
use byteordered::Endianness;
use dicom_attrs_core::header::{ElementNumber, GroupNumber};
use dicom_attrs_core::text::SpecificCharacterSet;
use dicom_attrs_core::{Tag, VR};
use itertools::Itertools;
use smallvec::smallvec;
use std::borrow::Cow;
use tracing::debug;

/// Element numbers which may hold a private creator,
/// each one reserving the block of element numbers `0xXX00..=0xXXFF`.
const PRIVATE_BLOCKS: std::ops::RangeInclusive<ElementNumber> = 0x0010..=0x00FF;

/// All elements of a data set sharing one group number.
///
/// The byte order of a group is established by the write which created it,
/// and all raw values in the group are kept in that byte order.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    number: GroupNumber,
    endianness: Endianness,
    elements: Vec<Element>,
}

impl Group {
    pub(crate) fn with_capacity(
        number: GroupNumber,
        endianness: Endianness,
        capacity: usize,
    ) -> Result<Self> {
        Ok(Group {
            number,
            endianness,
            elements: util::with_capacity(capacity)?,
        })
    }

    /// The group number.
    #[inline]
    pub fn number(&self) -> GroupNumber {
        self.number
    }

    /// The byte order of raw values in this group.
    #[inline]
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// The number of elements in this group,
    /// private creator elements included.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check whether this group has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over the elements in ascending element number.
    pub fn elements(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    /// Fetch an element by its element number,
    /// without any private creator resolution.
    pub fn get(&self, number: ElementNumber) -> Option<&Element> {
        self.index_of(number).ok().map(|i| &self.elements[i])
    }

    pub(crate) fn elements_mut(&mut self) -> std::slice::IterMut<'_, Element> {
        self.elements.iter_mut()
    }

    fn index_of(&self, number: ElementNumber) -> std::result::Result<usize, usize> {
        // elements are mostly written in ascending order
        match self.elements.last() {
            None => return Err(0),
            Some(last) if last.number() < number => return Err(self.elements.len()),
            Some(last) if last.number() == number => return Ok(self.elements.len() - 1),
            _ => {}
        }
        self.elements.binary_search_by_key(&number, Element::number)
    }

    /// The private creator elements of this group.
    fn creators(&self) -> impl Iterator<Item = &Element> {
        let start = match self.index_of(*PRIVATE_BLOCKS.start()) {
            Ok(i) | Err(i) => i,
        };
        let private = Tag(self.number, *PRIVATE_BLOCKS.start()).is_private_creator();
        self.elements[start..]
            .iter()
            .take_while(move |e| private && PRIVATE_BLOCKS.contains(&e.number()))
    }

    /// Find the block assigned to the given private creator.
    ///
    /// Trailing padding of the identifier is not significant.
    fn creator_block(&self, creator: &str) -> Option<ElementNumber> {
        let creator = trim_padding(creator);
        self.creators()
            .find(|e| e.creator_id().as_deref() == Some(creator))
            .map(Element::number)
    }

    fn free_blocks(&self) -> usize {
        PRIVATE_BLOCKS
            .clone()
            .filter(|&block| self.index_of(block).is_err())
            .count()
    }

    /// Map a tag and private creator to the element number it is stored at.
    ///
    /// Returns `None` if the private creator has no block in this group.
    fn resolve(&self, tag: Tag, private_creator: Option<&str>) -> Option<ElementNumber> {
        match private_creator {
            Some(creator) if tag.is_private_data() => self
                .creator_block(creator)
                .map(|block| (block << 8) | (tag.element() & 0x00FF)),
            _ => Some(tag.element()),
        }
    }

    /// Map a tag and private creator to the element number to write at,
    /// assigning a new block to the private creator if needed.
    fn resolve_or_create(
        &mut self,
        tag: Tag,
        private_creator: Option<&str>,
    ) -> Result<(ElementNumber, Option<String>)> {
        let creator = match private_creator {
            Some(creator) if tag.is_private_data() => trim_padding(creator),
            _ => {
                let creator = tag
                    .private_block()
                    .and_then(|block| self.get(block))
                    .and_then(|e| e.creator_id().map(Cow::into_owned));
                return Ok((tag.element(), creator));
            }
        };
        let block = match self.creator_block(creator) {
            Some(block) => block,
            None => self.create_block(creator)?,
        };
        Ok((
            (block << 8) | (tag.element() & 0x00FF),
            Some(creator.to_owned()),
        ))
    }

    fn create_block(&mut self, creator: &str) -> Result<ElementNumber> {
        let block = PRIVATE_BLOCKS
            .clone()
            .find(|&block| self.index_of(block).is_err())
            .ok_or_else(|| {
                NoFreePrivateBlockSnafu {
                    group: self.number,
                    creator,
                }
                .build()
            })?;
        debug!(
            "Assigning block {:02X} of group {:04X} to private creator `{}`",
            block, self.number, creator
        );
        self.insert(Element::new(
            block,
            VR::LO,
            None,
            Value::Strs(smallvec![creator.to_owned()]),
        ))?;
        Ok(block)
    }

    fn find(&self, tag: Tag, private_creator: Option<&str>) -> Option<&Element> {
        let number = self.resolve(tag, private_creator)?;
        self.get(number)
    }

    fn find_mut(&mut self, tag: Tag, private_creator: Option<&str>) -> Option<&mut Element> {
        let number = self.resolve(tag, private_creator)?;
        let index = self.index_of(number).ok()?;
        Some(&mut self.elements[index])
    }

    /// Insert an element or replace the one with the same element number.
    fn insert(&mut self, element: Element) -> Result<&mut Element> {
        let index = match self.index_of(element.number()) {
            Ok(index) => {
                self.elements[index] = element;
                index
            }
            Err(index) => {
                util::reserve_one(&mut self.elements)?;
                self.elements.insert(index, element);
                index
            }
        };
        Ok(&mut self.elements[index])
    }

    pub(crate) fn contains(&self, tag: Tag, private_creator: Option<&str>) -> bool {
        self.find(tag, private_creator).is_some()
    }

    pub(crate) fn contains_value(&self, tag: Tag, private_creator: Option<&str>) -> bool {
        self.find(tag, private_creator)
            .map(|e| !e.is_null())
            .unwrap_or(false)
    }

    /// The private creator of the block which the given tag falls into.
    pub(crate) fn private_creator(&self, tag: Tag) -> Option<String> {
        let block = tag.private_block()?;
        self.get(block)?.creator_id().map(Cow::into_owned)
    }

    pub(crate) fn strings(
        &self,
        tag: Tag,
        private_creator: Option<&str>,
        character_set: SpecificCharacterSet,
    ) -> Result<Option<C<String>>> {
        match self.find(tag, private_creator) {
            Some(e) => e.strings(self.number, self.endianness, character_set),
            None => Ok(None),
        }
    }

    pub(crate) fn string(
        &self,
        tag: Tag,
        private_creator: Option<&str>,
        character_set: SpecificCharacterSet,
        default: &str,
    ) -> Result<String> {
        Ok(self
            .strings(tag, private_creator, character_set)?
            .and_then(|values| values.into_iter().next())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| default.to_owned()))
    }

    pub(crate) fn ints(
        &self,
        tag: Tag,
        private_creator: Option<&str>,
        character_set: SpecificCharacterSet,
    ) -> Result<Option<C<i32>>> {
        match self.find(tag, private_creator) {
            Some(e) => e.ints(self.number, self.endianness, character_set),
            None => Ok(None),
        }
    }

    pub(crate) fn int(
        &self,
        tag: Tag,
        private_creator: Option<&str>,
        character_set: SpecificCharacterSet,
        default: i32,
    ) -> Result<i32> {
        Ok(self
            .ints(tag, private_creator, character_set)?
            .and_then(|values| values.first().copied())
            .unwrap_or(default))
    }

    pub(crate) fn floats(
        &self,
        tag: Tag,
        private_creator: Option<&str>,
        character_set: SpecificCharacterSet,
    ) -> Result<Option<C<f64>>> {
        match self.find(tag, private_creator) {
            Some(e) => e.floats(self.number, self.endianness, character_set),
            None => Ok(None),
        }
    }

    pub(crate) fn float(
        &self,
        tag: Tag,
        private_creator: Option<&str>,
        character_set: SpecificCharacterSet,
        default: f64,
    ) -> Result<f64> {
        Ok(self
            .floats(tag, private_creator, character_set)?
            .and_then(|values| values.first().copied())
            .unwrap_or(default))
    }

    pub(crate) fn bytes(
        &self,
        tag: Tag,
        private_creator: Option<&str>,
        character_set: SpecificCharacterSet,
    ) -> Result<Option<Cow<'_, [u8]>>> {
        match self.find(tag, private_creator) {
            Some(e) => e.bytes(self.number, self.endianness, character_set),
            None => Ok(None),
        }
    }

    pub(crate) fn sequence(
        &self,
        tag: Tag,
        private_creator: Option<&str>,
    ) -> Result<Option<&Sequence>> {
        match self.find(tag, private_creator) {
            None => Ok(None),
            Some(e) => match e.value() {
                Value::Sequence(sequence) => Ok(Some(sequence)),
                Value::Null => Ok(None),
                _ => incompatible(tag, e.vr(), "sequence"),
            },
        }
    }

    pub(crate) fn sequence_mut(
        &mut self,
        tag: Tag,
        private_creator: Option<&str>,
    ) -> Result<Option<&mut Sequence>> {
        match self.find_mut(tag, private_creator) {
            None => Ok(None),
            Some(e) => {
                let vr = e.vr();
                match e.value_mut() {
                    Value::Sequence(sequence) => Ok(Some(sequence)),
                    Value::Null => Ok(None),
                    _ => incompatible(tag, vr, "sequence"),
                }
            }
        }
    }

    pub(crate) fn fragments(
        &self,
        tag: Tag,
        private_creator: Option<&str>,
    ) -> Result<Option<&Fragments>> {
        match self.find(tag, private_creator) {
            None => Ok(None),
            Some(e) => match e.value() {
                Value::Fragments(fragments) => Ok(Some(fragments)),
                Value::Null => Ok(None),
                _ => incompatible(tag, e.vr(), "fragments"),
            },
        }
    }

    pub(crate) fn fragments_mut(
        &mut self,
        tag: Tag,
        private_creator: Option<&str>,
    ) -> Result<Option<&mut Fragments>> {
        match self.find_mut(tag, private_creator) {
            None => Ok(None),
            Some(e) => {
                let vr = e.vr();
                match e.value_mut() {
                    Value::Fragments(fragments) => Ok(Some(fragments)),
                    Value::Null => Ok(None),
                    _ => incompatible(tag, vr, "fragments"),
                }
            }
        }
    }

    /// Write a value, replacing any value at the same tag.
    pub(crate) fn put(
        &mut self,
        tag: Tag,
        private_creator: Option<&str>,
        vr: VR,
        value: Value,
    ) -> Result<&mut Element> {
        let (number, creator) = self.resolve_or_create(tag, private_creator)?;
        match self.index_of(number) {
            Ok(index) => {
                let element = &mut self.elements[index];
                element.set(vr, creator, value);
                Ok(element)
            }
            Err(_) => self.insert(Element::new(number, vr, creator, value)),
        }
    }

    /// Write raw bytes, which are converted to the byte order of this group
    /// if they were given in the other one.
    pub(crate) fn put_bytes(
        &mut self,
        tag: Tag,
        private_creator: Option<&str>,
        vr: VR,
        mut value: Vec<u8>,
        endianness: Endianness,
    ) -> Result<()> {
        if endianness != self.endianness {
            swap_byte_order(&mut value, vr);
        }
        self.put(tag, private_creator, vr, Value::Bytes(value))?;
        Ok(())
    }

    pub(crate) fn put_sequence(
        &mut self,
        tag: Tag,
        private_creator: Option<&str>,
        owner: ParentLink,
        capacity: usize,
    ) -> Result<&mut Sequence> {
        let sequence = Sequence::with_capacity(owner, capacity)?;
        let element = self.put(tag, private_creator, VR::SQ, Value::Sequence(sequence))?;
        match element.value_mut() {
            Value::Sequence(sequence) => Ok(sequence),
            _ => unreachable!(),
        }
    }

    /// Write an empty fragment sequence,
    /// which takes on the byte order of this group.
    pub(crate) fn put_fragments(
        &mut self,
        tag: Tag,
        private_creator: Option<&str>,
        vr: VR,
        capacity: usize,
    ) -> Result<&mut Fragments> {
        let fragments = Fragments::with_capacity(vr, self.endianness, capacity)?;
        let element = self.put(tag, private_creator, vr, Value::Fragments(fragments))?;
        match element.value_mut() {
            Value::Fragments(fragments) => Ok(fragments),
            _ => unreachable!(),
        }
    }

    /// Remove the element at the given tag.
    ///
    /// Returns whether an element was removed.
    /// The group is kept even if it becomes empty.
    pub(crate) fn remove(&mut self, tag: Tag, private_creator: Option<&str>) -> bool {
        let index = self
            .resolve(tag, private_creator)
            .and_then(|number| self.index_of(number).ok());
        match index {
            Some(index) => {
                self.elements.remove(index);
                true
            }
            None => false,
        }
    }

    /// Check that every private creator of `other`
    /// either has a block here or can still be given one.
    pub(crate) fn ensure_room_for(&self, other: &Group) -> Result<()> {
        let overflow = other
            .creators()
            .filter_map(Element::creator_id)
            .filter(|creator| self.creator_block(creator).is_none())
            .unique()
            .nth(self.free_blocks());
        match overflow {
            Some(creator) => NoFreePrivateBlockSnafu {
                group: self.number,
                creator,
            }
            .fail(),
            None => Ok(()),
        }
    }

    /// Copy all elements of another group with the same number into this one.
    ///
    /// Private creators are resolved anew,
    /// so a creator may end up in a different block than in `other`.
    /// Raw bytes and fragments are converted to the byte order of this group.
    pub(crate) fn put_all(&mut self, other: &Group) -> Result<()> {
        for element in other.elements() {
            let tag = Tag(other.number, element.number());
            if tag.is_private_creator() {
                if let Some(creator) = element.creator_id() {
                    if self.creator_block(&creator).is_none() {
                        self.create_block(&creator)?;
                    }
                    continue;
                }
            }
            let private_creator = element.private_creator().filter(|_| tag.is_private_data());
            let mut value = element.value().clone();
            if other.endianness != self.endianness {
                match &mut value {
                    Value::Bytes(bytes) => swap_byte_order(bytes, element.vr()),
                    Value::Fragments(fragments) => fragments.set_byte_order(self.endianness),
                    _ => {}
                }
            }
            self.put(tag, private_creator, element.vr(), value)?;
        }
        Ok(())
    }

    pub(crate) fn trim_to_size(&mut self, recursive: bool) {
        self.elements.shrink_to_fit();
        if recursive {
            for element in &mut self.elements {
                match element.value_mut() {
                    Value::Sequence(sequence) => sequence.trim_to_size(true),
                    Value::Fragments(fragments) => fragments.trim_to_size(),
                    _ => {}
                }
            }
        }
    }
}

fn incompatible<T>(tag: Tag, vr: VR, requested: &'static str) -> Result<T> {
    crate::IncompatibleValueSnafu { tag, vr, requested }.fail()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(number: GroupNumber) -> Group {
        Group::with_capacity(number, Endianness::Little, 4).unwrap()
    }

    fn numbers(group: &Group) -> Vec<ElementNumber> {
        group.elements().map(Element::number).collect()
    }

    #[test]
    fn elements_stay_sorted() {
        let mut g = group(0x0010);
        for element in [0x0040, 0x0010, 0x0030, 0x0020, 0x0010, 0x1000] {
            g.put(Tag(0x0010, element), None, VR::LO, Value::Null).unwrap();
        }
        assert_eq!(numbers(&g), vec![0x0010, 0x0020, 0x0030, 0x0040, 0x1000]);
    }

    #[test]
    fn private_creator_gets_first_free_block() {
        let mut g = group(0x0029);
        g.put(Tag(0x0029, 0x1001), Some("ACME"), VR::LO, Value::Null)
            .unwrap();
        g.put(Tag(0x0029, 0x1001), Some("OTHER"), VR::LO, Value::Null)
            .unwrap();
        // creators at 0x0010 and 0x0011, their elements at 0x1001 and 0x1101
        assert_eq!(numbers(&g), vec![0x0010, 0x0011, 0x1001, 0x1101]);
        assert_eq!(g.private_creator(Tag(0x0029, 0x1101)).as_deref(), Some("OTHER"));
        assert_eq!(
            g.find(Tag(0x0029, 0x1001), Some("OTHER")).map(Element::number),
            Some(0x1101)
        );
        assert_eq!(
            g.find(Tag(0x0029, 0x1001), Some("OTHER"))
                .and_then(Element::private_creator),
            Some("OTHER")
        );
    }

    #[test]
    fn unknown_private_creator_is_absent() {
        let mut g = group(0x0029);
        g.put(Tag(0x0029, 0x1001), Some("ACME"), VR::LO, Value::Null)
            .unwrap();
        assert!(g.contains(Tag(0x0029, 0x1001), Some("ACME")));
        assert!(!g.contains(Tag(0x0029, 0x1001), Some("NOBODY")));
        assert!(!g.remove(Tag(0x0029, 0x1001), Some("NOBODY")));
        assert!(g.remove(Tag(0x0029, 0x1001), Some("ACME")));
        // the creator stays
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn private_blocks_run_out() {
        let mut g = group(0x0011);
        for block in PRIVATE_BLOCKS {
            let creator = format!("CREATOR {}", block);
            g.put(Tag(0x0011, 0x1000), Some(creator.as_str()), VR::LO, Value::Null)
                .unwrap();
        }
        let err = g
            .put(Tag(0x0011, 0x1000), Some("ONE TOO MANY"), VR::LO, Value::Null)
            .unwrap_err();
        assert!(matches!(err, crate::Error::NoFreePrivateBlock { group: 0x0011, .. }));
    }

    #[test]
    fn raw_private_write_picks_up_existing_creator() {
        let mut g = group(0x0029);
        g.put(Tag(0x0029, 0x1001), Some("ACME"), VR::LO, Value::Null)
            .unwrap();
        let element = g.put(Tag(0x0029, 0x1002), None, VR::LO, Value::Null).unwrap();
        assert_eq!(element.private_creator(), Some("ACME"));
    }

    #[test]
    fn bytes_are_kept_in_group_byte_order() {
        let mut g = Group::with_capacity(0x0028, Endianness::Big, 1).unwrap();
        g.put_bytes(Tag(0x0028, 0x0010), None, VR::US, vec![0x00, 0x02], Endianness::Little)
            .unwrap();
        let stored = g.get(0x0010).unwrap().value();
        assert_eq!(stored, &Value::Bytes(vec![0x02, 0x00]));
        assert_eq!(
            g.int(Tag(0x0028, 0x0010), None, SpecificCharacterSet::Default, 0)
                .unwrap(),
            512
        );
    }

    #[test]
    fn first_value_or_default() {
        let mut g = group(0x0020);
        g.put(Tag(0x0020, 0x0013), None, VR::IS, Value::Strs(smallvec!["7".to_owned(), "8".to_owned()]))
            .unwrap();
        g.put(Tag(0x0020, 0x0020), None, VR::CS, Value::Null).unwrap();
        let cs = SpecificCharacterSet::Default;
        assert_eq!(g.int(Tag(0x0020, 0x0013), None, cs, 0).unwrap(), 7);
        assert_eq!(g.string(Tag(0x0020, 0x0013), None, cs, "").unwrap(), "7");
        assert_eq!(g.string(Tag(0x0020, 0x0020), None, cs, "none").unwrap(), "none");
        assert_eq!(g.int(Tag(0x0020, 0x0099), None, cs, -1).unwrap(), -1);
        assert!(g.contains(Tag(0x0020, 0x0020), None));
        assert!(!g.contains_value(Tag(0x0020, 0x0020), None));
    }

    #[test]
    fn put_all_resolves_private_creators_again() {
        let mut dst = group(0x0029);
        dst.put(Tag(0x0029, 0x1001), Some("FIRST"), VR::LO, Value::Null)
            .unwrap();
        let mut src = group(0x0029);
        src.put(
            Tag(0x0029, 0x1001),
            Some("SECOND"),
            VR::LO,
            Value::Strs(smallvec!["x".to_owned()]),
        )
        .unwrap();
        dst.put_all(&src).unwrap();
        // SECOND had block 0x10 in the source, but gets 0x11 here
        assert_eq!(numbers(&dst), vec![0x0010, 0x0011, 0x1001, 0x1101]);
        assert_eq!(
            dst.string(Tag(0x0029, 0x1001), Some("SECOND"), SpecificCharacterSet::Default, "")
                .unwrap(),
            "x"
        );
    }

    #[test]
    fn padded_private_creator_names_the_same_block() {
        let mut g = group(0x0009);
        g.put(Tag(0x0009, 0x1001), Some("ACME "), VR::LO, Value::Null)
            .unwrap();
        g.put(Tag(0x0009, 0x1002), Some("ACME"), VR::LO, Value::Null)
            .unwrap();
        g.put(Tag(0x0009, 0x1003), Some("ACME\0"), VR::LO, Value::Null)
            .unwrap();
        assert_eq!(numbers(&g), vec![0x0010, 0x1001, 0x1002, 0x1003]);
        assert!(g.contains(Tag(0x0009, 0x1001), Some("ACME ")));
        assert!(g.contains(Tag(0x0009, 0x1003), Some("ACME")));
        assert_eq!(
            g.get(0x1001).and_then(Element::private_creator),
            Some("ACME")
        );
        assert_eq!(g.get(0x0010).unwrap().value(), &Value::Strs(smallvec!["ACME".to_owned()]));
    }

    #[test]
    fn room_for_private_creators_is_checked_up_front() {
        let mut dst = group(0x0011);
        for block in PRIVATE_BLOCKS.clone().skip(1) {
            let creator = format!("CREATOR {}", block);
            dst.put(Tag(0x0011, 0x1000), Some(creator.as_str()), VR::LO, Value::Null)
                .unwrap();
        }
        let mut src = group(0x0011);
        src.put(Tag(0x0011, 0x1000), Some("CREATOR 17"), VR::LO, Value::Null)
            .unwrap();
        src.put(Tag(0x0011, 0x1000), Some("NEW"), VR::LO, Value::Null)
            .unwrap();
        // one block left, and only one creator is new
        dst.ensure_room_for(&src).unwrap();

        src.put(Tag(0x0011, 0x1000), Some("NEWER"), VR::LO, Value::Null)
            .unwrap();
        let err = dst.ensure_room_for(&src).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::NoFreePrivateBlock { group: 0x0011, ref creator, .. } if creator == "NEWER"
        ));

        // even groups hold no private creators
        let mut even = group(0x0010);
        even.put(Tag(0x0010, 0x0010), None, VR::PN, Value::Strs(smallvec!["Doe".to_owned()]))
            .unwrap();
        assert_eq!(even.creators().count(), 0);
        group(0x0010).ensure_room_for(&even).unwrap();
    }

    #[test]
    fn put_all_converts_fragments_to_group_byte_order() {
        let mut src = Group::with_capacity(0x7FE0, Endianness::Big, 1).unwrap();
        src.put_fragments(Tag(0x7FE0, 0x0010), None, VR::OW, 1)
            .unwrap()
            .push(vec![0x01, 0x02])
            .unwrap();
        let mut dst = group(0x7FE0);
        dst.put_all(&src).unwrap();

        let fragments = dst.fragments(Tag(0x7FE0, 0x0010), None).unwrap().unwrap();
        assert_eq!(fragments.endianness(), Endianness::Little);
        assert_eq!(fragments.get(0), Some(&[0x02, 0x01][..]));
        // the source is left as it was
        let fragments = src.fragments(Tag(0x7FE0, 0x0010), None).unwrap().unwrap();
        assert_eq!(fragments.endianness(), Endianness::Big);
        assert_eq!(fragments.get(0), Some(&[0x01, 0x02][..]));
    }
}
