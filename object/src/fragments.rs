//! Segmented binary payloads, such as encapsulated pixel data.

use crate::util;
use crate::value::swap_byte_order;
use crate::{AllocationSnafu, Result};
use byteordered::Endianness;
use dicom_attrs_core::VR;
use snafu::ResultExt;

/// An ordered list of binary fragments under one tag.
///
/// All fragments share the byte order of the group
/// in which the fragment sequence was created.
/// How fragments relate to one another is up to the caller.
///
/// # Example
///
/// ```
/// use dicom_attrs::{tags, Attributes, Endianness, VR};
/// # fn main() -> Result<(), dicom_attrs::Error> {
/// let mut obj = Attributes::new();
/// let fragments = obj.put_fragments(tags::PIXEL_DATA, None, VR::OB, Endianness::Little, 2)?;
/// // single 4x4 frame, in fragments of 6 bytes
/// fragments.push_frame(vec![0x7F; 16], 6)?;
///
/// let fragments = obj.get_fragments(tags::PIXEL_DATA, None)?.unwrap();
/// assert_eq!(fragments.len(), 3);
/// assert_eq!(fragments.get(2), Some(&[0x7F, 0x7F, 0x7F, 0x7F, 0, 0][..]));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Fragments {
    vr: VR,
    endianness: Endianness,
    fragments: Vec<Vec<u8>>,
}

impl Fragments {
    pub(crate) fn with_capacity(vr: VR, endianness: Endianness, capacity: usize) -> Result<Self> {
        Ok(Fragments {
            vr,
            endianness,
            fragments: util::with_capacity(capacity)?,
        })
    }

    /// The value representation of the fragments.
    #[inline]
    pub fn vr(&self) -> VR {
        self.vr
    }

    /// The byte order inherited from the owning group.
    #[inline]
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// The number of fragments.
    #[inline]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Fetch a fragment by its index.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.fragments.get(index).map(Vec::as_slice)
    }

    /// Append a fragment.
    pub fn push(&mut self, fragment: impl Into<Vec<u8>>) -> Result<()> {
        util::reserve_one(&mut self.fragments)?;
        self.fragments.push(fragment.into());
        Ok(())
    }

    /// Append the data of a whole frame,
    /// split into fragments of `fragment_size` bytes.
    ///
    /// The fragment size is rounded up to an even number,
    /// and the last fragment is padded with zeros to the same size.
    /// A fragment size of 0, or one larger than the frame,
    /// places the whole frame in one fragment.
    /// Returns the number of fragments appended.
    pub fn push_frame(&mut self, mut data: Vec<u8>, fragment_size: usize) -> Result<usize> {
        if data.is_empty() {
            return Ok(0);
        }
        let fragment_size = match fragment_size {
            0 => data.len(),
            size => size.min(data.len()),
        };
        // cannot overflow, a Vec never holds more than isize::MAX bytes
        let fragment_size = fragment_size + fragment_size % 2;

        let count = data.len() / fragment_size + usize::from(data.len() % fragment_size != 0);
        self.fragments
            .try_reserve(count)
            .context(AllocationSnafu {
                requested: self.fragments.len() + count,
            })?;
        data.resize(count * fragment_size, 0);
        self.fragments
            .extend(data.chunks_exact(fragment_size).map(<[u8]>::to_vec));
        Ok(count)
    }

    /// Iterate over the fragments in order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.fragments.iter().map(Vec::as_slice)
    }

    /// Rewrite all fragments in the given byte order.
    pub(crate) fn set_byte_order(&mut self, endianness: Endianness) {
        if endianness != self.endianness {
            for fragment in &mut self.fragments {
                swap_byte_order(fragment, self.vr);
            }
            self.endianness = endianness;
        }
    }

    pub(crate) fn trim_to_size(&mut self) {
        self.fragments.shrink_to_fit();
    }
}

impl<'a> IntoIterator for &'a Fragments {
    type Item = &'a [u8];
    type IntoIter = std::iter::Map<std::slice::Iter<'a, Vec<u8>>, fn(&'a Vec<u8>) -> &'a [u8]>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments
            .iter()
            .map(Vec::as_slice as fn(&'a Vec<u8>) -> &'a [u8])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragments() -> Fragments {
        Fragments::with_capacity(VR::OB, Endianness::Little, 0).unwrap()
    }

    #[test]
    fn push_and_get() {
        let mut f = fragments();
        assert!(f.is_empty());
        f.push(vec![1, 2]).unwrap();
        f.push(&[3, 4, 5, 6][..]).unwrap();
        assert_eq!(f.len(), 2);
        assert_eq!(f.get(1), Some(&[3, 4, 5, 6][..]));
        assert_eq!(f.get(2), None);
        assert_eq!(f.iter().map(<[u8]>::len).sum::<usize>(), 6);
    }

    #[test]
    fn frame_in_a_single_fragment() {
        let mut f = fragments();
        assert_eq!(f.push_frame(vec![9; 5], 0).unwrap(), 1);
        // padded to even length
        assert_eq!(f.get(0), Some(&[9, 9, 9, 9, 9, 0][..]));
    }

    #[test]
    fn frame_split_with_odd_fragment_size() {
        let mut f = fragments();
        // 3 rounds up to 4
        assert_eq!(f.push_frame((1..=10).collect(), 3).unwrap(), 3);
        let all: Vec<&[u8]> = (&f).into_iter().collect();
        assert_eq!(
            all,
            vec![&[1, 2, 3, 4][..], &[5, 6, 7, 8][..], &[9, 10, 0, 0][..]]
        );
    }

    #[test]
    fn empty_frame_adds_nothing() {
        let mut f = fragments();
        assert_eq!(f.push_frame(Vec::new(), 4).unwrap(), 0);
        assert!(f.is_empty());
    }

    #[test]
    fn oversized_fragment_size_means_one_fragment() {
        let mut f = fragments();
        assert_eq!(f.push_frame(vec![3; 7], usize::MAX).unwrap(), 1);
        assert_eq!(f.push_frame(vec![4; 4], usize::MAX - 1).unwrap(), 1);
        assert_eq!(f.push_frame(vec![5; 3], 4).unwrap(), 1);
        assert_eq!(f.get(0), Some(&[3, 3, 3, 3, 3, 3, 3, 0][..]));
        assert_eq!(f.get(1), Some(&[4, 4, 4, 4][..]));
        assert_eq!(f.get(2), Some(&[5, 5, 5, 0][..]));
    }

    #[test]
    fn byte_order_applies_to_every_fragment() {
        let mut f = Fragments::with_capacity(VR::OW, Endianness::Big, 2).unwrap();
        f.push(vec![0x01, 0x02, 0x03, 0x04]).unwrap();
        f.push(vec![0x05, 0x06]).unwrap();
        f.set_byte_order(Endianness::Big);
        assert_eq!(f.get(0), Some(&[0x01, 0x02, 0x03, 0x04][..]));
        f.set_byte_order(Endianness::Little);
        assert_eq!(f.endianness(), Endianness::Little);
        assert_eq!(f.get(0), Some(&[0x02, 0x01, 0x04, 0x03][..]));
        assert_eq!(f.get(1), Some(&[0x06, 0x05][..]));
    }
}
