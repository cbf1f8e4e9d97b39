//! Element values and the codec which converts between their shapes.
//!
//! A value is stored in whichever shape it was written in.
//! Reading it in another shape goes through the value representation
//! of its element, the byte order of its group,
//! and the specific character set of its data set.

use crate::fragments::Fragments;
use crate::sequence::Sequence;
use crate::{
    DecodeTextSnafu, EncodeTextSnafu, IncompatibleValueSnafu, InvalidValueLengthSnafu,
    NumericOutOfRangeSnafu, ParseFloatSnafu, ParseIntegerSnafu, Result,
};
use byteordered::byteorder::{BigEndian, ByteOrder, LittleEndian};
use byteordered::Endianness;
use dicom_attrs_core::text::SpecificCharacterSet;
use dicom_attrs_core::{Tag, VR};
use itertools::Itertools;
use num_traits::ToPrimitive;
use smallvec::SmallVec;
use snafu::{ensure, OptionExt, ResultExt};
use std::borrow::Cow;
use std::fmt;

/// An aggregation of one or more values.
pub type C<T> = SmallVec<[T; 2]>;

/// The value of a data element.
///
/// Exactly one shape is held at a time.
/// The value representation of the element tells
/// which shapes it may be read as.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A placeholder with no value.
    Null,
    /// Raw bytes, in the byte order of the owning group.
    Bytes(Vec<u8>),
    /// Decoded text values.
    Strs(C<String>),
    /// Integer values.
    Ints(C<i32>),
    /// Floating point values.
    Floats(C<f64>),
    /// A sequence of nested data sets.
    Sequence(Sequence),
    /// A sequence of binary fragments.
    Fragments(Fragments),
}

impl Value {
    /// Check whether this value is absent or empty.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bytes(v) => v.is_empty(),
            Value::Strs(v) => v.iter().all(|s| s.is_empty()),
            Value::Ints(v) => v.is_empty(),
            Value::Floats(v) => v.is_empty(),
            Value::Sequence(v) => v.is_empty(),
            Value::Fragments(v) => v.is_empty(),
        }
    }

    /// Convert the value into text values.
    ///
    /// Returns `None` for a null value.
    pub(crate) fn to_strings(&self, cx: &Context) -> Result<Option<C<String>>> {
        match self {
            Value::Null => Ok(None),
            Value::Strs(v) => Ok(Some(v.clone())),
            Value::Bytes(bytes) if cx.vr.is_text() => decode_text(bytes, cx).map(Some),
            Value::Bytes(bytes) => Ok(Some(
                read_numbers(bytes, cx)?
                    .into_iter()
                    .map(|n| n.to_string())
                    .collect(),
            )),
            Value::Ints(v) => Ok(Some(v.iter().map(|n| n.to_string()).collect())),
            Value::Floats(v) => Ok(Some(v.iter().map(|n| n.to_string()).collect())),
            Value::Sequence(_) | Value::Fragments(_) => cx.incompatible("text"),
        }
    }

    /// Convert the value into 32-bit integers,
    /// parsing text and narrowing binary numbers where needed.
    ///
    /// Returns `None` for a null value.
    pub(crate) fn to_ints(&self, cx: &Context) -> Result<Option<C<i32>>> {
        match self {
            Value::Null => Ok(None),
            Value::Ints(v) => Ok(Some(v.clone())),
            Value::Strs(v) => parse_ints(v, cx).map(Some),
            Value::Bytes(bytes) if cx.vr.is_text() => {
                parse_ints(&decode_text(bytes, cx)?, cx).map(Some)
            }
            Value::Bytes(bytes) => read_numbers(bytes, cx)?
                .into_iter()
                .map(|n| n.cast::<i32>().context(NumericOutOfRangeSnafu { tag: cx.tag, target: "i32" }))
                .collect::<Result<C<i32>>>()
                .map(Some),
            Value::Floats(v) => v
                .iter()
                .map(|&n| {
                    <i32 as num_traits::NumCast>::from(n)
                        .context(NumericOutOfRangeSnafu { tag: cx.tag, target: "i32" })
                })
                .collect::<Result<C<i32>>>()
                .map(Some),
            Value::Sequence(_) | Value::Fragments(_) => cx.incompatible("integer"),
        }
    }

    /// Convert the value into 64-bit floating point numbers.
    ///
    /// Returns `None` for a null value.
    pub(crate) fn to_floats(&self, cx: &Context) -> Result<Option<C<f64>>> {
        match self {
            Value::Null => Ok(None),
            Value::Floats(v) => Ok(Some(v.clone())),
            Value::Ints(v) => Ok(Some(v.iter().map(|&n| f64::from(n)).collect())),
            Value::Strs(v) => parse_floats(v, cx).map(Some),
            Value::Bytes(bytes) if cx.vr.is_text() => {
                parse_floats(&decode_text(bytes, cx)?, cx).map(Some)
            }
            Value::Bytes(bytes) => read_numbers(bytes, cx)?
                .into_iter()
                .map(|n| n.cast::<f64>().context(NumericOutOfRangeSnafu { tag: cx.tag, target: "f64" }))
                .collect::<Result<C<f64>>>()
                .map(Some),
            Value::Sequence(_) | Value::Fragments(_) => cx.incompatible("floating point"),
        }
    }

    /// Convert the value into its encoded bytes.
    ///
    /// Text is encoded with the character set in the context,
    /// numbers of a binary value representation
    /// are encoded in the byte order of the context.
    /// Returns `None` for a null value.
    pub(crate) fn to_bytes(&self, cx: &Context) -> Result<Option<Cow<'_, [u8]>>> {
        match self {
            Value::Null => Ok(None),
            Value::Bytes(bytes) => Ok(Some(Cow::Borrowed(bytes.as_slice()))),
            Value::Strs(v) => encode_text(&v[..], cx).map(|b| Some(Cow::Owned(b))),
            Value::Ints(v) if cx.vr.value_width().is_some() => {
                write_numbers(&v[..], cx).map(|b| Some(Cow::Owned(b)))
            }
            Value::Floats(v) if cx.vr.value_width().is_some() => {
                write_numbers(&v[..], cx).map(|b| Some(Cow::Owned(b)))
            }
            Value::Ints(v) if cx.vr.is_text() => {
                let text: Vec<String> = v.iter().map(|n| n.to_string()).collect();
                encode_text(&text[..], cx).map(|b| Some(Cow::Owned(b)))
            }
            Value::Floats(v) if cx.vr.is_text() => {
                let text: Vec<String> = v.iter().map(|n| n.to_string()).collect();
                encode_text(&text[..], cx).map(|b| Some(Cow::Owned(b)))
            }
            Value::Ints(_) | Value::Floats(_) | Value::Sequence(_) | Value::Fragments(_) => {
                cx.incompatible("bytes")
            }
        }
    }
}

/// Everything around a value that its conversions depend on.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Context {
    pub tag: Tag,
    pub vr: VR,
    pub endianness: Endianness,
    pub character_set: SpecificCharacterSet,
}

impl Context {
    fn incompatible<T>(&self, requested: &'static str) -> Result<T> {
        IncompatibleValueSnafu {
            tag: self.tag,
            vr: self.vr,
            requested,
        }
        .fail()
    }

    /// The character set which applies to text of this value representation.
    fn text_character_set(&self) -> SpecificCharacterSet {
        if self.vr.uses_character_set() {
            self.character_set
        } else {
            SpecificCharacterSet::Default
        }
    }
}

/// A number read from a binary value.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl Number {
    fn cast<T: num_traits::NumCast>(self) -> Option<T> {
        match self {
            Number::Signed(n) => <T as num_traits::NumCast>::from(n),
            Number::Unsigned(n) => <T as num_traits::NumCast>::from(n),
            Number::Float(n) => <T as num_traits::NumCast>::from(n),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Number::Signed(n) => write!(f, "{}", n),
            Number::Unsigned(n) => write!(f, "{}", n),
            Number::Float(n) => write!(f, "{}", n),
        }
    }
}

macro_rules! read_with_order {
    ($endianness: expr, $method: ident, $chunk: expr) => {
        match $endianness {
            Endianness::Little => LittleEndian::$method($chunk),
            Endianness::Big => BigEndian::$method($chunk),
        }
    };
}

macro_rules! write_with_order {
    ($endianness: expr, $method: ident, $out: expr, $value: expr, $width: expr) => {{
        let mut buf = [0u8; 8];
        match $endianness {
            Endianness::Little => LittleEndian::$method(&mut buf[..$width], $value),
            Endianness::Big => BigEndian::$method(&mut buf[..$width], $value),
        }
        $out.extend_from_slice(&buf[..$width]);
    }};
}

fn value_width(cx: &Context) -> Result<usize> {
    match cx.vr.value_width() {
        Some(width) => Ok(width),
        None => cx.incompatible("binary number"),
    }
}

fn read_numbers(bytes: &[u8], cx: &Context) -> Result<Vec<Number>> {
    let width = value_width(cx)?;
    ensure!(
        bytes.len() % width == 0,
        InvalidValueLengthSnafu {
            tag: cx.tag,
            len: bytes.len(),
            width,
        }
    );
    let order = cx.endianness;
    Ok(bytes
        .chunks_exact(width)
        .map(|chunk| match cx.vr {
            VR::US | VR::OW | VR::AT => {
                Number::Unsigned(u64::from(read_with_order!(order, read_u16, chunk)))
            }
            VR::SS => Number::Signed(i64::from(read_with_order!(order, read_i16, chunk))),
            VR::UL | VR::OL => Number::Unsigned(u64::from(read_with_order!(order, read_u32, chunk))),
            VR::SL => Number::Signed(i64::from(read_with_order!(order, read_i32, chunk))),
            VR::UV | VR::OV => Number::Unsigned(read_with_order!(order, read_u64, chunk)),
            VR::SV => Number::Signed(read_with_order!(order, read_i64, chunk)),
            VR::FL | VR::OF => Number::Float(f64::from(read_with_order!(order, read_f32, chunk))),
            VR::FD | VR::OD => Number::Float(read_with_order!(order, read_f64, chunk)),
            // OB and UN, one byte per value
            _ => Number::Unsigned(u64::from(chunk[0])),
        })
        .collect())
}

fn write_numbers<T>(values: &[T], cx: &Context) -> Result<Vec<u8>>
where
    T: ToPrimitive + Copy,
{
    let width = value_width(cx)?;
    let order = cx.endianness;
    let mut out = Vec::with_capacity(values.len() * width);
    for &value in values {
        macro_rules! narrow {
            ($method: ident, $target: literal) => {
                value
                    .$method()
                    .context(NumericOutOfRangeSnafu { tag: cx.tag, target: $target })?
            };
        }
        match cx.vr {
            VR::US | VR::OW | VR::AT => {
                write_with_order!(order, write_u16, out, narrow!(to_u16, "u16"), 2)
            }
            VR::SS => write_with_order!(order, write_i16, out, narrow!(to_i16, "i16"), 2),
            VR::UL | VR::OL => write_with_order!(order, write_u32, out, narrow!(to_u32, "u32"), 4),
            VR::SL => write_with_order!(order, write_i32, out, narrow!(to_i32, "i32"), 4),
            VR::UV | VR::OV => write_with_order!(order, write_u64, out, narrow!(to_u64, "u64"), 8),
            VR::SV => write_with_order!(order, write_i64, out, narrow!(to_i64, "i64"), 8),
            VR::FL | VR::OF => write_with_order!(order, write_f32, out, narrow!(to_f32, "f32"), 4),
            VR::FD | VR::OD => write_with_order!(order, write_f64, out, narrow!(to_f64, "f64"), 8),
            _ => out.push(narrow!(to_u8, "u8")),
        }
    }
    Ok(out)
}

/// Reverse the byte order of every value in a raw buffer,
/// according to the value width of the given value representation.
///
/// Trailing bytes which do not make up a whole value are left as they are.
pub(crate) fn swap_byte_order(bytes: &mut [u8], vr: VR) {
    if let Some(width) = vr.value_width().filter(|&w| w > 1) {
        bytes.chunks_exact_mut(width).for_each(|chunk| chunk.reverse());
    }
}

fn decode_text(bytes: &[u8], cx: &Context) -> Result<C<String>> {
    let text = cx
        .text_character_set()
        .decode(bytes)
        .context(DecodeTextSnafu { tag: cx.tag })?;
    let trim = |s: &str| s.trim_end_matches(|c: char| c == ' ' || c == '\0').to_owned();
    if text.is_empty() {
        Ok(C::new())
    } else if cx.vr.is_single_valued_text() {
        Ok(C::from_elem(trim(&text), 1))
    } else {
        Ok(text.split('\\').map(trim).collect())
    }
}

fn encode_text<S: AsRef<str>>(values: &[S], cx: &Context) -> Result<Vec<u8>> {
    let text = values.iter().map(|s| s.as_ref()).join("\\");
    cx.text_character_set()
        .encode(&text)
        .context(EncodeTextSnafu { tag: cx.tag })
}

fn parse_ints(values: &[String], cx: &Context) -> Result<C<i32>> {
    values
        .iter()
        .map(|s| s.trim().parse::<i32>().context(ParseIntegerSnafu { tag: cx.tag }))
        .collect()
}

fn parse_floats(values: &[String], cx: &Context) -> Result<C<f64>> {
    values
        .iter()
        .map(|s| s.trim().parse::<f64>().context(ParseFloatSnafu { tag: cx.tag }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use smallvec::smallvec;

    fn cx(vr: VR, endianness: Endianness) -> Context {
        Context {
            tag: Tag(0x0028, 0x0010),
            vr,
            endianness,
            character_set: SpecificCharacterSet::Default,
        }
    }

    #[test]
    fn read_binary_numbers_in_either_byte_order() {
        let little = Value::Bytes(vec![0x00, 0x02, 0x01, 0x00]);
        assert_eq!(
            little.to_ints(&cx(VR::US, Endianness::Little)).unwrap(),
            Some(smallvec![512, 1])
        );
        assert_eq!(
            little.to_ints(&cx(VR::US, Endianness::Big)).unwrap(),
            Some(smallvec![2, 256])
        );
        let signed = Value::Bytes(vec![0xFF, 0xFF]);
        assert_eq!(
            signed.to_ints(&cx(VR::SS, Endianness::Little)).unwrap(),
            Some(smallvec![-1])
        );
    }

    #[test]
    fn narrow_binary_numbers_widen_on_read() {
        let value = Value::Bytes(vec![0x00, 0x00, 0x01, 0x00, 0xFF]);
        assert_eq!(
            value.to_ints(&cx(VR::OB, Endianness::Little)).unwrap(),
            Some(smallvec![0, 0, 1, 0, 255])
        );
        let value = Value::Bytes(vec![0x00, 0x01, 0x00, 0x00]);
        assert_eq!(
            value.to_ints(&cx(VR::UL, Endianness::Little)).unwrap(),
            Some(smallvec![256])
        );
        let value = Value::Bytes(2.5f32.to_be_bytes().to_vec());
        assert_eq!(
            value.to_floats(&cx(VR::FL, Endianness::Big)).unwrap(),
            Some(smallvec![2.5])
        );
        let value = Value::Ints(smallvec![-7]);
        assert_eq!(
            value.to_floats(&cx(VR::SL, Endianness::Little)).unwrap(),
            Some(smallvec![-7.0])
        );
        let value = Value::Bytes(vec![0xFF, 0xFF, 0xFF, 0xFF]);
        assert!(matches!(
            value.to_ints(&cx(VR::UL, Endianness::Little)),
            Err(Error::NumericOutOfRange { target: "i32", .. })
        ));
    }

    #[test]
    fn write_numbers_in_either_byte_order() {
        let value = Value::Ints(smallvec![512]);
        assert_eq!(
            value.to_bytes(&cx(VR::US, Endianness::Little)).unwrap().unwrap().as_ref(),
            &[0x00, 0x02]
        );
        assert_eq!(
            value.to_bytes(&cx(VR::UL, Endianness::Big)).unwrap().unwrap().as_ref(),
            &[0x00, 0x00, 0x02, 0x00]
        );
        let value = Value::Floats(smallvec![1.5]);
        assert_eq!(
            value.to_bytes(&cx(VR::FL, Endianness::Little)).unwrap().unwrap().as_ref(),
            &1.5f32.to_le_bytes()
        );
    }

    #[test]
    fn negative_into_unsigned_is_out_of_range() {
        let value = Value::Ints(smallvec![-1]);
        let err = value.to_bytes(&cx(VR::US, Endianness::Little)).unwrap_err();
        assert!(matches!(err, Error::NumericOutOfRange { target: "u16", .. }));
    }

    #[test]
    fn odd_length_binary_value_is_rejected() {
        let value = Value::Bytes(vec![1, 2, 3]);
        let err = value.to_ints(&cx(VR::US, Endianness::Little)).unwrap_err();
        assert!(matches!(err, Error::InvalidValueLength { len: 3, width: 2, .. }));
    }

    #[test]
    fn integers_from_integer_strings() {
        let value = Value::Strs(smallvec![" 12".to_owned(), "-3 ".to_owned()]);
        assert_eq!(
            value.to_ints(&cx(VR::IS, Endianness::Little)).unwrap(),
            Some(smallvec![12, -3])
        );
        let value = Value::Strs(smallvec!["twelve".to_owned()]);
        assert!(matches!(
            value.to_ints(&cx(VR::IS, Endianness::Little)),
            Err(Error::ParseInteger { .. })
        ));
    }

    #[test]
    fn text_from_raw_bytes_is_split_and_trimmed() {
        let value = Value::Bytes(b"ORIGINAL\\PRIMARY ".to_vec());
        assert_eq!(
            value.to_strings(&cx(VR::CS, Endianness::Little)).unwrap(),
            Some(smallvec!["ORIGINAL".to_owned(), "PRIMARY".to_owned()])
        );
        let value = Value::Bytes(b"a\\b ".to_vec());
        assert_eq!(
            value.to_strings(&cx(VR::LT, Endianness::Little)).unwrap(),
            Some(smallvec!["a\\b".to_owned()])
        );
        let value = Value::Bytes(b"1.5\\2".to_vec());
        assert_eq!(
            value.to_floats(&cx(VR::DS, Endianness::Little)).unwrap(),
            Some(smallvec![1.5, 2.0])
        );
    }

    #[test]
    fn text_uses_character_set_only_where_applicable() {
        let mut context = cx(VR::PN, Endianness::Little);
        context.character_set = SpecificCharacterSet::IsoIr192;
        let value = Value::Bytes("Simões^João".as_bytes().to_vec());
        assert_eq!(
            value.to_strings(&context).unwrap(),
            Some(smallvec!["Simões^João".to_owned()])
        );
        let value = Value::Strs(smallvec!["Günther".to_owned()]);
        context.vr = VR::CS;
        // code strings stay in the default repertoire
        assert_eq!(
            value.to_bytes(&context).unwrap().unwrap().as_ref(),
            b"G\xfcnther"
        );
    }

    #[test]
    fn null_converts_to_nothing() {
        let context = cx(VR::US, Endianness::Little);
        assert_eq!(Value::Null.to_ints(&context).unwrap(), None);
        assert_eq!(Value::Null.to_strings(&context).unwrap(), None);
        assert!(Value::Null.to_bytes(&context).unwrap().is_none());
        assert!(Value::Null.is_null());
        assert!(Value::Strs(smallvec![String::new()]).is_null());
        assert!(!Value::Ints(smallvec![0]).is_null());
    }

    #[test]
    fn swap_in_place() {
        let mut bytes = vec![1, 2, 3, 4, 5];
        swap_byte_order(&mut bytes, VR::US);
        assert_eq!(bytes, vec![2, 1, 4, 3, 5]);
        let mut bytes = vec![1, 2, 3, 4];
        swap_byte_order(&mut bytes, VR::OB);
        assert_eq!(bytes, vec![1, 2, 3, 4]);
    }
}
