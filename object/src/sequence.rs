//! Sequences of nested data sets.

use crate::attributes::{Attributes, DataSetId, ParentLink};
use crate::util;
use crate::Result;
use std::ops::Index;

/// An ordered list of items, each one a nested data set.
///
/// The parent of every item is the data set holding the sequence element.
/// Items are owned by the sequence,
/// so a data set can only be an item of one sequence at a time.
#[derive(Debug)]
pub struct Sequence {
    owner: ParentLink,
    items: Vec<Attributes>,
}

impl Sequence {
    pub(crate) fn with_capacity(owner: ParentLink, capacity: usize) -> Result<Self> {
        Ok(Sequence {
            owner,
            items: util::with_capacity(capacity)?,
        })
    }

    /// The identifier of the data set holding this sequence.
    #[inline]
    pub fn owner(&self) -> DataSetId {
        self.owner.id
    }

    /// The number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Attributes> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Attributes> {
        self.items.get_mut(index)
    }

    /// Append an item.
    ///
    /// # Panics
    ///
    /// Panics if the item already has a parent.
    pub fn push(&mut self, mut item: Attributes) -> Result<&mut Attributes> {
        if let Err(e) = item.attach(&self.owner) {
            panic!("Cannot add item to sequence: {}", e);
        }
        util::reserve_one(&mut self.items)?;
        self.items.push(item);
        let last = self.items.len() - 1;
        Ok(&mut self.items[last])
    }

    /// Append a new empty item, created with the options of the owner.
    pub fn push_new(&mut self) -> Result<&mut Attributes> {
        let item = Attributes::with_options(self.owner.options);
        self.push(item)
    }

    /// Insert an item at the given position,
    /// shifting all items after it.
    ///
    /// # Panics
    ///
    /// Panics if the item already has a parent,
    /// or if `index > len`.
    pub fn insert(&mut self, index: usize, mut item: Attributes) -> Result<&mut Attributes> {
        assert!(index <= self.items.len(), "Item index {} out of bounds", index);
        if let Err(e) = item.attach(&self.owner) {
            panic!("Cannot add item to sequence: {}", e);
        }
        util::reserve_one(&mut self.items)?;
        self.items.insert(index, item);
        Ok(&mut self.items[index])
    }

    /// Remove the item at the given position.
    ///
    /// The item is returned as a root data set,
    /// so that it may be added elsewhere.
    pub fn remove(&mut self, index: usize) -> Option<Attributes> {
        if index >= self.items.len() {
            return None;
        }
        let mut item = self.items.remove(index);
        item.detach();
        Some(item)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attributes> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Attributes> {
        self.items.iter_mut()
    }

    pub(crate) fn trim_to_size(&mut self, recursive: bool) {
        self.items.shrink_to_fit();
        if recursive {
            for item in &mut self.items {
                item.trim_to_size(true);
            }
        }
    }

    /// Bind this sequence and all of its items to a new owner context.
    pub(crate) fn relink(&mut self, owner: ParentLink) {
        for item in &mut self.items {
            item.adopt(&owner);
        }
        self.owner = owner;
    }
}

impl Clone for Sequence {
    fn clone(&self) -> Self {
        // cloned items are new roots, claim them for the same owner
        let mut sequence = Sequence {
            owner: self.owner,
            items: self.items.clone(),
        };
        sequence.relink(self.owner);
        sequence
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Index<usize> for Sequence {
    type Output = Attributes;

    fn index(&self, index: usize) -> &Attributes {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Attributes;
    type IntoIter = std::slice::Iter<'a, Attributes>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a mut Sequence {
    type Item = &'a mut Attributes;
    type IntoIter = std::slice::IterMut<'a, Attributes>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Attributes, Tag, VR};

    const SEQ: Tag = Tag(0x0040, 0x0275);
    const NAME: Tag = Tag(0x0040, 0x0009);

    #[test]
    fn items_are_parented_to_the_owner() {
        let mut root = Attributes::new();
        let id = root.id();
        let sequence = root.put_sequence(SEQ, None, 2).unwrap();
        assert_eq!(sequence.owner(), id);
        sequence.push_new().unwrap();
        sequence.insert(0, Attributes::new()).unwrap();
        for item in &*sequence {
            assert_eq!(item.parent(), Some(id));
            assert_eq!(item.level(), 1);
        }
    }

    #[test]
    fn removed_item_becomes_root() {
        let mut root = Attributes::new();
        let sequence = root.put_sequence(SEQ, None, 1).unwrap();
        sequence
            .push_new()
            .unwrap()
            .put_string(NAME, None, VR::SH, "A")
            .unwrap();
        let item = sequence.remove(0).unwrap();
        assert!(item.is_root());
        assert_eq!(item.level(), 0);
        assert!(sequence.is_empty());
        assert!(sequence.remove(0).is_none());

        // may now join another sequence
        let other = root.put_sequence(Tag(0x0040, 0x0100), None, 1).unwrap();
        assert_eq!(
            other.push(item).unwrap().get_string(NAME, None, "").unwrap(),
            "A"
        );
    }

    #[test]
    #[should_panic]
    fn pushing_a_parented_item_panics() {
        let parent = Attributes::new();
        let mut item = Attributes::new();
        item.set_parent(&parent).unwrap();
        let mut root = Attributes::new();
        let _ = root.put_sequence(SEQ, None, 1).unwrap().push(item);
    }

    #[test]
    fn nested_items_know_their_depth() {
        let mut root = Attributes::new();
        let item = root.put_sequence(SEQ, None, 1).unwrap().push_new().unwrap();
        let nested = item.put_sequence(SEQ, None, 1).unwrap().push_new().unwrap();
        assert_eq!(nested.level(), 2);
    }

    #[test]
    fn capacity_grows_as_items_arrive() {
        let mut root = Attributes::new();
        let sequence = root.put_sequence(SEQ, None, 0).unwrap();
        for i in 0..5 {
            sequence
                .push_new()
                .unwrap()
                .put_int(Tag(0x0020, 0x0013), None, VR::IS, i)
                .unwrap();
        }
        assert_eq!(sequence.len(), 5);
        assert!(sequence.items.capacity() >= 5);
        assert_eq!(sequence[4].get_int(Tag(0x0020, 0x0013), None, -1).unwrap(), 4);
    }
}
