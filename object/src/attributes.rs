//! The top-level index of a data set.

use crate::element::Element;
use crate::fragments::Fragments;
use crate::group::Group;
use crate::sequence::Sequence;
use crate::util;
use crate::value::{Value, C};
use crate::{AlreadyParentedSnafu, Result};
use byteordered::Endianness;
use dicom_attrs_core::header::GroupNumber;
use dicom_attrs_core::tags;
use dicom_attrs_core::text::{SpecificCharacterSet, DEFAULT_CHARACTER_SET};
use dicom_attrs_core::{Tag, VR};
use smallvec::smallvec;
use snafu::ensure;
use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{trace, warn};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A process-wide unique identifier of a data set.
///
/// Nested items refer to their parent by this identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DataSetId(u64);

impl DataSetId {
    fn next() -> Self {
        DataSetId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for DataSetId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Options for creating a data set.
///
/// Items created through [`Sequence::push_new`]
/// take on the options of the data set holding the sequence.
///
/// # Example
///
/// ```
/// use dicom_attrs::{Attributes, AttributesOptions, Endianness};
///
/// let obj = Attributes::with_options(
///     AttributesOptions::new()
///         .initial_capacity(4)
///         .endianness(Endianness::Big),
/// );
/// assert!(obj.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributesOptions {
    initial_capacity: usize,
    initial_group_capacity: usize,
    endianness: Endianness,
}

impl Default for AttributesOptions {
    fn default() -> Self {
        AttributesOptions {
            initial_capacity: 10,
            initial_group_capacity: 10,
            endianness: Endianness::Little,
        }
    }
}

impl AttributesOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of groups to reserve room for.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set the number of elements to reserve room for in each new group.
    pub fn initial_group_capacity(mut self, capacity: usize) -> Self {
        self.initial_group_capacity = capacity;
        self
    }

    /// Set the byte order of groups created by writes
    /// which do not state a byte order of their own.
    pub fn endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }
}

/// The context which a data set passes down to its items.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ParentLink {
    pub id: DataSetId,
    pub level: usize,
    pub character_set: SpecificCharacterSet,
    pub options: AttributesOptions,
}

/// A DICOM data set: a sparse, tag-addressed collection of elements.
///
/// Elements are kept in ascending tag order at all times.
/// A data set is either a root
/// or an item in a [`Sequence`] of another data set, its parent.
#[derive(Debug)]
pub struct Attributes {
    id: DataSetId,
    parent: Option<DataSetId>,
    level: usize,
    groups: Vec<Group>,
    options: AttributesOptions,
    /// declared by (0008,0005) in this data set
    character_set: Option<SpecificCharacterSet>,
    /// in effect in the parent
    inherited_character_set: SpecificCharacterSet,
    position: Option<u64>,
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new()
    }
}

impl Attributes {
    /// Create an empty root data set.
    pub fn new() -> Self {
        Self::with_options(AttributesOptions::default())
    }

    /// Create an empty root data set with the given options.
    pub fn with_options(options: AttributesOptions) -> Self {
        Attributes {
            id: DataSetId::next(),
            parent: None,
            level: 0,
            groups: Vec::with_capacity(options.initial_capacity),
            options,
            character_set: None,
            inherited_character_set: DEFAULT_CHARACTER_SET,
            position: None,
        }
    }

    #[inline]
    pub fn id(&self) -> DataSetId {
        self.id
    }

    /// The data set which this one is an item of.
    #[inline]
    pub fn parent(&self) -> Option<DataSetId> {
        self.parent
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// The depth of this data set in its tree, 0 for a root.
    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }

    /// The stream offset recorded for this data set, if any.
    #[inline]
    pub fn position(&self) -> Option<u64> {
        self.position
    }

    pub fn set_position(&mut self, position: Option<u64>) {
        self.position = position;
    }

    /// Check whether no group holds any element.
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(Group::is_empty)
    }

    /// The number of elements in this data set,
    /// excluding the contents of nested items.
    pub fn len(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// The number of groups, including any emptied groups
    /// not yet removed by [`trim_to_size`](Self::trim_to_size).
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Iterate over the groups in ascending group number.
    pub fn groups(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    pub fn group(&self, number: GroupNumber) -> Option<&Group> {
        self.group_index(number).ok().map(|i| &self.groups[i])
    }

    /// Iterate over all elements in ascending tag order.
    pub fn iter(&self) -> impl Iterator<Item = (Tag, &Element)> + '_ {
        self.groups.iter().flat_map(|group| {
            let number = group.number();
            group.elements().map(move |e| (Tag(number, e.number()), e))
        })
    }

    fn group_index(&self, number: GroupNumber) -> std::result::Result<usize, usize> {
        match self.groups.last() {
            None => return Err(0),
            Some(last) if last.number() == number => return Ok(self.groups.len() - 1),
            Some(last) if last.number() < number => return Err(self.groups.len()),
            _ => {}
        }
        self.groups.binary_search_by_key(&number, Group::number)
    }

    fn group_mut(&mut self, number: GroupNumber) -> Option<&mut Group> {
        let index = self.group_index(number).ok()?;
        Some(&mut self.groups[index])
    }

    /// Fetch the group with the given number,
    /// creating it with the given byte order if absent.
    fn group_or_insert(
        &mut self,
        number: GroupNumber,
        endianness: Endianness,
        capacity: usize,
    ) -> Result<&mut Group> {
        let index = match self.group_index(number) {
            Ok(index) => index,
            Err(index) => {
                let group = Group::with_capacity(number, endianness, capacity)?;
                util::reserve_one(&mut self.groups)?;
                self.groups.insert(index, group);
                index
            }
        };
        Ok(&mut self.groups[index])
    }

    fn put_value(
        &mut self,
        tag: Tag,
        private_creator: Option<&str>,
        vr: VR,
        value: Value,
    ) -> Result<()> {
        let capacity = self.options.initial_group_capacity;
        self.group_or_insert(tag.group(), self.options.endianness, capacity)?
            .put(tag, private_creator, vr, value)?;
        self.on_write(tag);
        Ok(())
    }

    fn on_write(&mut self, tag: Tag) {
        if tag == tags::SPECIFIC_CHARACTER_SET {
            self.init_specific_character_set();
        }
    }

    /// Check whether an element exists at the given tag,
    /// even if its value is null.
    pub fn contains(&self, tag: Tag, private_creator: Option<&str>) -> bool {
        self.group(tag.group())
            .map(|g| g.contains(tag, private_creator))
            .unwrap_or(false)
    }

    /// Check whether a non-null value exists at the given tag.
    pub fn contains_value(&self, tag: Tag, private_creator: Option<&str>) -> bool {
        self.group(tag.group())
            .map(|g| g.contains_value(tag, private_creator))
            .unwrap_or(false)
    }

    /// Retrieve the private creator of the block the given tag falls into.
    ///
    /// Returns `None` for tags which are not private data tags.
    pub fn get_private_creator(&self, tag: Tag) -> Option<String> {
        self.group(tag.group())?.private_creator(tag)
    }

    /// Retrieve the first string value at the given tag,
    /// or `default` if there is none.
    pub fn get_string(
        &self,
        tag: Tag,
        private_creator: Option<&str>,
        default: &str,
    ) -> Result<String> {
        match self.group(tag.group()) {
            Some(g) => g.string(tag, private_creator, self.specific_character_set(), default),
            None => Ok(default.to_owned()),
        }
    }

    /// Retrieve all string values at the given tag.
    pub fn get_strings(
        &self,
        tag: Tag,
        private_creator: Option<&str>,
    ) -> Result<Option<Vec<String>>> {
        match self.group(tag.group()) {
            Some(g) => Ok(g
                .strings(tag, private_creator, self.specific_character_set())?
                .map(|v| v.into_vec())),
            None => Ok(None),
        }
    }

    /// Retrieve the first integer value at the given tag,
    /// or `default` if there is none.
    ///
    /// Text values of a numeric string representation are parsed.
    pub fn get_int(&self, tag: Tag, private_creator: Option<&str>, default: i32) -> Result<i32> {
        match self.group(tag.group()) {
            Some(g) => g.int(tag, private_creator, self.specific_character_set(), default),
            None => Ok(default),
        }
    }

    pub fn get_ints(&self, tag: Tag, private_creator: Option<&str>) -> Result<Option<Vec<i32>>> {
        match self.group(tag.group()) {
            Some(g) => Ok(g
                .ints(tag, private_creator, self.specific_character_set())?
                .map(|v| v.into_vec())),
            None => Ok(None),
        }
    }

    pub fn get_float(&self, tag: Tag, private_creator: Option<&str>, default: f64) -> Result<f64> {
        match self.group(tag.group()) {
            Some(g) => g.float(tag, private_creator, self.specific_character_set(), default),
            None => Ok(default),
        }
    }

    pub fn get_floats(&self, tag: Tag, private_creator: Option<&str>) -> Result<Option<Vec<f64>>> {
        match self.group(tag.group()) {
            Some(g) => Ok(g
                .floats(tag, private_creator, self.specific_character_set())?
                .map(|v| v.into_vec())),
            None => Ok(None),
        }
    }

    /// Retrieve the value at the given tag in its encoded form.
    ///
    /// Binary numbers are in the byte order of the group,
    /// see [`Group::endianness`].
    pub fn get_bytes(&self, tag: Tag, private_creator: Option<&str>) -> Result<Option<Cow<'_, [u8]>>> {
        match self.group(tag.group()) {
            Some(g) => g.bytes(tag, private_creator, self.specific_character_set()),
            None => Ok(None),
        }
    }

    pub fn get_sequence(&self, tag: Tag, private_creator: Option<&str>) -> Result<Option<&Sequence>> {
        match self.group(tag.group()) {
            Some(g) => g.sequence(tag, private_creator),
            None => Ok(None),
        }
    }

    pub fn get_sequence_mut(
        &mut self,
        tag: Tag,
        private_creator: Option<&str>,
    ) -> Result<Option<&mut Sequence>> {
        match self.group_mut(tag.group()) {
            Some(g) => g.sequence_mut(tag, private_creator),
            None => Ok(None),
        }
    }

    pub fn get_fragments(
        &self,
        tag: Tag,
        private_creator: Option<&str>,
    ) -> Result<Option<&Fragments>> {
        match self.group(tag.group()) {
            Some(g) => g.fragments(tag, private_creator),
            None => Ok(None),
        }
    }

    pub fn get_fragments_mut(
        &mut self,
        tag: Tag,
        private_creator: Option<&str>,
    ) -> Result<Option<&mut Fragments>> {
        match self.group_mut(tag.group()) {
            Some(g) => g.fragments_mut(tag, private_creator),
            None => Ok(None),
        }
    }

    /// Write an element without a value.
    pub fn put_null(&mut self, tag: Tag, private_creator: Option<&str>, vr: VR) -> Result<()> {
        self.put_value(tag, private_creator, vr, Value::Null)
    }

    /// Write an encoded value.
    ///
    /// If the group does not exist yet, it is created with the given byte order.
    /// Otherwise the value is converted to the byte order of the group.
    pub fn put_bytes(
        &mut self,
        tag: Tag,
        private_creator: Option<&str>,
        vr: VR,
        value: impl Into<Vec<u8>>,
        endianness: Endianness,
    ) -> Result<()> {
        let capacity = self.options.initial_group_capacity;
        self.group_or_insert(tag.group(), endianness, capacity)?
            .put_bytes(tag, private_creator, vr, value.into(), endianness)?;
        self.on_write(tag);
        Ok(())
    }

    pub fn put_string(
        &mut self,
        tag: Tag,
        private_creator: Option<&str>,
        vr: VR,
        value: &str,
    ) -> Result<()> {
        self.put_value(tag, private_creator, vr, Value::Strs(smallvec![value.to_owned()]))
    }

    pub fn put_strings<I, S>(
        &mut self,
        tag: Tag,
        private_creator: Option<&str>,
        vr: VR,
        values: I,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: C<String> = values.into_iter().map(Into::into).collect();
        self.put_value(tag, private_creator, vr, Value::Strs(values))
    }

    pub fn put_int(
        &mut self,
        tag: Tag,
        private_creator: Option<&str>,
        vr: VR,
        value: i32,
    ) -> Result<()> {
        self.put_value(tag, private_creator, vr, Value::Ints(smallvec![value]))
    }

    pub fn put_ints(
        &mut self,
        tag: Tag,
        private_creator: Option<&str>,
        vr: VR,
        values: &[i32],
    ) -> Result<()> {
        self.put_value(tag, private_creator, vr, Value::Ints(values.into()))
    }

    pub fn put_float(
        &mut self,
        tag: Tag,
        private_creator: Option<&str>,
        vr: VR,
        value: f64,
    ) -> Result<()> {
        self.put_value(tag, private_creator, vr, Value::Floats(smallvec![value]))
    }

    pub fn put_floats(
        &mut self,
        tag: Tag,
        private_creator: Option<&str>,
        vr: VR,
        values: &[f64],
    ) -> Result<()> {
        self.put_value(tag, private_creator, vr, Value::Floats(values.into()))
    }

    /// Write an empty sequence, returning it so that items can be added.
    pub fn put_sequence(
        &mut self,
        tag: Tag,
        private_creator: Option<&str>,
        capacity: usize,
    ) -> Result<&mut Sequence> {
        let link = self.link();
        let group_capacity = self.options.initial_group_capacity;
        self.group_or_insert(tag.group(), self.options.endianness, group_capacity)?
            .put_sequence(tag, private_creator, link, capacity)
    }

    /// Write an empty fragment sequence,
    /// returning it so that fragments can be added.
    ///
    /// The fragments take on the byte order of the group,
    /// which is created with the given byte order if absent.
    pub fn put_fragments(
        &mut self,
        tag: Tag,
        private_creator: Option<&str>,
        vr: VR,
        endianness: Endianness,
        capacity: usize,
    ) -> Result<&mut Fragments> {
        let group_capacity = self.options.initial_group_capacity;
        self.group_or_insert(tag.group(), endianness, group_capacity)?
            .put_fragments(tag, private_creator, vr, capacity)
    }

    /// Copy all elements of another data set into this one,
    /// replacing elements at the same tags.
    ///
    /// Groups new to this data set keep the byte order they have in `other`.
    /// Nested items are copied and become items of this data set.
    ///
    /// Fails with [`Error::NoFreePrivateBlock`](crate::Error::NoFreePrivateBlock)
    /// before anything is copied
    /// if a private creator of `other` cannot be given a block here.
    pub fn put_all(&mut self, other: &Attributes) -> Result<()> {
        let sources = || other.groups.iter().filter(|g| !g.is_empty());
        for source in sources() {
            if let Some(group) = self.group(source.number()) {
                group.ensure_room_for(source)?;
            }
        }
        let merged = sources().try_for_each(|source| {
            let capacity = std::cmp::max(source.len(), self.options.initial_group_capacity);
            self.group_or_insert(source.number(), source.endianness(), capacity)?
                .put_all(source)
        });
        // whatever was copied before a failure still has to be linked
        self.propagate_context();
        if other.contains(tags::SPECIFIC_CHARACTER_SET, None) {
            self.init_specific_character_set();
        }
        merged
    }

    /// Remove the element at the given tag.
    ///
    /// Returns whether an element was removed.
    /// Emptied groups are kept until [`trim_to_size`](Self::trim_to_size).
    pub fn remove(&mut self, tag: Tag, private_creator: Option<&str>) -> bool {
        let removed = self
            .group_mut(tag.group())
            .map(|g| g.remove(tag, private_creator))
            .unwrap_or(false);
        if removed {
            self.on_write(tag);
        }
        removed
    }

    /// The specific character set in effect for this data set:
    /// its own (0008,0005) if present and recognized,
    /// otherwise the one in effect for its parent,
    /// or [`DEFAULT_CHARACTER_SET`] for a root.
    pub fn specific_character_set(&self) -> SpecificCharacterSet {
        self.character_set.unwrap_or(self.inherited_character_set)
    }

    fn init_specific_character_set(&mut self) {
        let before = self.specific_character_set();
        let codes = self
            .group(tags::SPECIFIC_CHARACTER_SET.group())
            .map(|g| {
                g.strings(
                    tags::SPECIFIC_CHARACTER_SET,
                    None,
                    SpecificCharacterSet::Default,
                )
            })
            .unwrap_or(Ok(None));
        self.character_set = match codes {
            Ok(Some(codes)) => {
                let character_set = SpecificCharacterSet::from_codes(&codes[..]);
                if character_set.is_none() {
                    warn!(
                        "Unsupported specific character set {:?}, using the inherited one",
                        &codes[..]
                    );
                }
                character_set
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Could not read specific character set: {}", e);
                None
            }
        };
        if self.specific_character_set() != before {
            self.propagate_context();
        }
    }

    /// Make this data set an item of `parent`.
    ///
    /// This only records the relationship:
    /// the character set of `parent` becomes the inherited one.
    /// Items added to a [`Sequence`] are attached automatically.
    ///
    /// Fails if this data set already has a parent,
    /// including when it is `parent` itself.
    pub fn set_parent(&mut self, parent: &Attributes) -> Result<()> {
        self.attach(&parent.link())
    }

    pub(crate) fn attach(&mut self, parent: &ParentLink) -> Result<()> {
        if let Some(current) = self.parent {
            return AlreadyParentedSnafu { parent: current }.fail();
        }
        ensure!(
            parent.id != self.id,
            AlreadyParentedSnafu { parent: parent.id }
        );
        self.adopt(parent);
        Ok(())
    }

    /// Take on the context of a parent,
    /// replacing any parent this data set may have.
    pub(crate) fn adopt(&mut self, parent: &ParentLink) {
        self.parent = Some(parent.id);
        self.level = parent.level + 1;
        self.inherited_character_set = parent.character_set;
        self.propagate_context();
    }

    /// Turn this data set back into a root.
    pub(crate) fn detach(&mut self) {
        self.parent = None;
        self.level = 0;
        self.inherited_character_set = DEFAULT_CHARACTER_SET;
        self.propagate_context();
    }

    fn link(&self) -> ParentLink {
        ParentLink {
            id: self.id,
            level: self.level,
            character_set: self.specific_character_set(),
            options: self.options,
        }
    }

    /// Pass the context of this data set down to all nested items.
    fn propagate_context(&mut self) {
        let link = self.link();
        for group in &mut self.groups {
            for element in group.elements_mut() {
                if let Value::Sequence(sequence) = element.value_mut() {
                    sequence.relink(link);
                }
            }
        }
    }

    /// Release unused capacity and remove empty groups.
    ///
    /// If `recursive` is true,
    /// the element tables of every group and all nested items
    /// are compacted as well.
    pub fn trim_to_size(&mut self, recursive: bool) {
        let before = self.groups.len();
        self.groups.retain(|g| !g.is_empty());
        self.groups.shrink_to_fit();
        trace!(
            "Data set {} trimmed, {} empty groups removed",
            self.id,
            before - self.groups.len()
        );
        if recursive {
            for group in &mut self.groups {
                group.trim_to_size(true);
            }
        }
    }
}

impl Clone for Attributes {
    /// Copy the data set deeply.
    ///
    /// The copy is a new root,
    /// and its nested items are items of the copy.
    fn clone(&self) -> Self {
        let mut copy = Attributes {
            id: DataSetId::next(),
            parent: None,
            level: 0,
            groups: self.groups.clone(),
            options: self.options,
            character_set: self.character_set,
            inherited_character_set: DEFAULT_CHARACTER_SET,
            position: self.position,
        };
        copy.propagate_context();
        copy
    }
}

impl PartialEq for Attributes {
    /// Data sets are equal if they hold equal elements,
    /// regardless of their place in a tree.
    fn eq(&self, other: &Self) -> bool {
        self.groups == other.groups
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (Tag, &'a Element);
    type IntoIter = Box<dyn Iterator<Item = (Tag, &'a Element)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATIENT_NAME: Tag = Tag(0x0010, 0x0010);
    const ROWS: Tag = Tag(0x0028, 0x0010);
    const SEQ: Tag = Tag(0x0040, 0x0275);

    fn group_numbers(obj: &Attributes) -> Vec<GroupNumber> {
        obj.groups().map(Group::number).collect()
    }

    #[test]
    fn attributes_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Attributes>();
    }

    #[test]
    fn groups_stay_sorted() {
        let mut obj = Attributes::new();
        for group in [0x0028, 0x0008, 0x7FE0, 0x0010, 0x0008, 0x0020] {
            obj.put_null(Tag(group, 0x0001), None, VR::UN).unwrap();
        }
        assert_eq!(
            group_numbers(&obj),
            vec![0x0008, 0x0010, 0x0020, 0x0028, 0x7FE0]
        );
    }

    #[test]
    fn ids_are_unique() {
        let a = Attributes::new();
        let b = Attributes::new();
        assert_ne!(a.id(), b.id());
        assert_ne!(a.clone().id(), a.id());
    }

    #[test]
    fn set_parent_only_once() {
        let parent = Attributes::new();
        let other = Attributes::new();
        let mut obj = Attributes::new();
        obj.set_parent(&parent).unwrap();
        assert_eq!(obj.parent(), Some(parent.id()));
        assert_eq!(obj.level(), 1);

        let err = obj.set_parent(&other).unwrap_err();
        assert!(matches!(err, crate::Error::AlreadyParented { .. }));
        // attaching to the same parent again fails too
        assert!(obj.set_parent(&parent).is_err());
        assert_eq!(obj.parent(), Some(parent.id()));
    }

    #[test]
    fn group_byte_order_comes_from_first_write() {
        let mut obj = Attributes::with_options(AttributesOptions::new().endianness(Endianness::Big));
        obj.put_int(PATIENT_NAME, None, VR::UL, 1).unwrap();
        obj.put_bytes(ROWS, None, VR::US, vec![0x00, 0x01], Endianness::Little)
            .unwrap();
        obj.put_bytes(Tag(0x0028, 0x0011), None, VR::US, vec![0x01, 0x00], Endianness::Big)
            .unwrap();
        assert_eq!(obj.group(0x0010).unwrap().endianness(), Endianness::Big);
        assert_eq!(obj.group(0x0028).unwrap().endianness(), Endianness::Little);
        assert_eq!(obj.get_int(ROWS, None, 0).unwrap(), 256);
        assert_eq!(obj.get_int(Tag(0x0028, 0x0011), None, 0).unwrap(), 256);
        assert_eq!(
            obj.get_bytes(Tag(0x0028, 0x0011), None).unwrap().as_deref(),
            Some(&[0x00, 0x01][..])
        );
    }

    #[test]
    fn clone_is_a_new_root_owning_copied_items() {
        let mut root = Attributes::new();
        let item = root.put_sequence(SEQ, None, 1).unwrap().push_new().unwrap();
        let mut item_copy = item.clone();
        item_copy.put_string(PATIENT_NAME, None, VR::PN, "Copy").unwrap();
        assert!(item_copy.is_root());

        let copy = root.clone();
        assert_eq!(copy, root);
        let copied_item = &copy.get_sequence(SEQ, None).unwrap().unwrap()[0];
        assert_eq!(copied_item.parent(), Some(copy.id()));
    }

    #[test]
    fn position_is_unset_by_default() {
        let mut obj = Attributes::new();
        assert_eq!(obj.position(), None);
        obj.set_position(Some(132));
        assert_eq!(obj.position(), Some(132));
    }

    #[test]
    fn iteration_in_tag_order() {
        let mut obj = Attributes::new();
        obj.put_int(ROWS, None, VR::US, 1).unwrap();
        obj.put_string(PATIENT_NAME, None, VR::PN, "Doe").unwrap();
        obj.put_null(Tag(0x0010, 0x0001), None, VR::UN).unwrap();
        let tags: Vec<Tag> = obj.iter().map(|(tag, _)| tag).collect();
        assert_eq!(tags, vec![Tag(0x0010, 0x0001), PATIENT_NAME, ROWS]);
        assert_eq!(obj.len(), 3);
    }

    #[test]
    fn trim_drops_empty_groups_only() {
        let mut obj = Attributes::new();
        obj.put_int(ROWS, None, VR::US, 1).unwrap();
        obj.put_string(PATIENT_NAME, None, VR::PN, "Doe").unwrap();
        assert!(obj.remove(PATIENT_NAME, None));
        assert_eq!(obj.group_count(), 2);
        obj.trim_to_size(false);
        assert_eq!(group_numbers(&obj), vec![0x0028]);
    }
}
