//! Leaf codecs, one per universal type.
//!
//! Each decodes the content octets of one element into a [`Value`] and
//! encodes a [`Value`] back into canonical content octets.

use crate::{integer, Any, BitString, ContentLength, Decoder, ErrorKind, Header, ObjectIdentifier, Result, Rules, Tag, Time};
use alloc::{string::String, vec::Vec};
use num_bigint::BigInt;

/// Universal types the interpreter knows how to decode at the leaves.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Primitive {
    Boolean,
    Integer,
    Enumerated,
    BitString,
    OctetString,
    Null,
    ObjectIdentifier,
    UtcTime,
    GeneralizedTime,
    Utf8String,
    PrintableString,
    Ia5String,
    VisibleString,
    BmpString,
    /// Any single element, kept with its observed tag.
    Any,
}

/// A decoded leaf.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    Boolean(bool),
    Integer(BigInt),
    Enumerated(BigInt),
    BitString(BitString),
    OctetString(Vec<u8>),
    Null,
    ObjectIdentifier(ObjectIdentifier),
    /// UTCTime or GeneralizedTime, as the descriptor says.
    Time(Time),
    /// Any of the character string types, as the descriptor says.
    String(String),
    Any(Any),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// INTEGER or ENUMERATED.
    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Value::Integer(i) | Value::Enumerated(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_oid(&self) -> Option<&ObjectIdentifier> {
        match self {
            Value::ObjectIdentifier(oid) => Some(oid),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::OctetString(bytes) => Some(bytes),
            Value::BitString(bits) => Some(bits.as_bytes()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<&Time> {
        match self {
            Value::Time(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_any(&self) -> Option<&Any> {
        match self {
            Value::Any(any) => Some(any),
            _ => None,
        }
    }
}

fn is_printable(c: char) -> bool {
    c.is_ascii_alphanumeric() || " '()+,-./:=?".contains(c)
}

fn is_visible(c: char) -> bool {
    (' '..='~').contains(&c)
}

/// Character sets are enforced under both rule sets, so every decoded
/// string can be encoded again.
fn checked_ascii(content: &[u8], class: fn(char) -> bool) -> Result<String> {
    let text = core::str::from_utf8(content).map_err(|_| ErrorKind::Malformed)?;
    if !text.chars().all(|c| c.is_ascii() && class(c)) {
        return Err(ErrorKind::Malformed.into());
    }
    Ok(String::from(text))
}

fn copied(content: &[u8]) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    bytes.try_reserve(content.len())?;
    bytes.extend_from_slice(content);
    Ok(bytes)
}

impl Primitive {
    /// Universal tag, `None` for [`Primitive::Any`].
    pub const fn tag(self) -> Option<Tag> {
        Some(match self {
            Primitive::Boolean => Tag::BOOLEAN,
            Primitive::Integer => Tag::INTEGER,
            Primitive::Enumerated => Tag::ENUMERATED,
            Primitive::BitString => Tag::BIT_STRING,
            Primitive::OctetString => Tag::OCTET_STRING,
            Primitive::Null => Tag::NULL,
            Primitive::ObjectIdentifier => Tag::OBJECT_IDENTIFIER,
            Primitive::UtcTime => Tag::UTC_TIME,
            Primitive::GeneralizedTime => Tag::GENERALIZED_TIME,
            Primitive::Utf8String => Tag::UTF8_STRING,
            Primitive::PrintableString => Tag::PRINTABLE_STRING,
            Primitive::Ia5String => Tag::IA5_STRING,
            Primitive::VisibleString => Tag::VISIBLE_STRING,
            Primitive::BmpString => Tag::BMP_STRING,
            Primitive::Any => return None,
        })
    }

    /// The codec for a primitive universal tag.
    pub fn from_universal(tag: Tag) -> Option<Primitive> {
        [
            Primitive::Boolean,
            Primitive::Integer,
            Primitive::Enumerated,
            Primitive::BitString,
            Primitive::OctetString,
            Primitive::Null,
            Primitive::ObjectIdentifier,
            Primitive::UtcTime,
            Primitive::GeneralizedTime,
            Primitive::Utf8String,
            Primitive::PrintableString,
            Primitive::Ia5String,
            Primitive::VisibleString,
            Primitive::BmpString,
        ]
        .into_iter()
        .find(|primitive| primitive.tag() == Some(tag))
    }

    /// Types BER may also send in constructed form, as a series of segments.
    pub fn is_string(self) -> bool {
        matches!(
            self,
            Primitive::BitString
                | Primitive::OctetString
                | Primitive::Utf8String
                | Primitive::PrintableString
                | Primitive::Ia5String
                | Primitive::VisibleString
                | Primitive::BmpString
        )
    }

    /// Canonical content octets for content read under `rules`.
    pub(crate) fn canonical(self, content: &[u8], rules: Rules) -> Result<Vec<u8>> {
        self.encode(&self.decode(content, rules)?)
    }

    /// Decode content octets.
    ///
    /// [`Primitive::Any`] elements carry their header, so they are decoded by
    /// the interpreter rather than here.
    pub fn decode(self, content: &[u8], rules: Rules) -> Result<Value> {
        Ok(match self {
            Primitive::Boolean => match (content, rules) {
                ([0x00], _) => Value::Boolean(false),
                ([0xFF], _) => Value::Boolean(true),
                ([_], Rules::Ber) => Value::Boolean(true),
                _ => return Err(ErrorKind::Malformed.into()),
            },
            Primitive::Integer => Value::Integer(integer::decode(content, rules)?),
            Primitive::Enumerated => Value::Enumerated(integer::decode(content, rules)?),
            Primitive::BitString => Value::BitString(BitString::decode(content, rules)?),
            Primitive::OctetString => Value::OctetString(copied(content)?),
            Primitive::Null if content.is_empty() => Value::Null,
            Primitive::Null => return Err(ErrorKind::Malformed.into()),
            Primitive::ObjectIdentifier => {
                Value::ObjectIdentifier(ObjectIdentifier::from_der_content(content)?)
            }
            Primitive::UtcTime => Value::Time(Time::decode_utc(content)?),
            Primitive::GeneralizedTime => Value::Time(Time::decode_generalized(content)?),
            Primitive::Utf8String => Value::String(String::from(
                core::str::from_utf8(content).map_err(|_| ErrorKind::Malformed)?,
            )),
            Primitive::PrintableString => Value::String(checked_ascii(content, is_printable)?),
            Primitive::Ia5String => Value::String(checked_ascii(content, |_| true)?),
            Primitive::VisibleString => Value::String(checked_ascii(content, is_visible)?),
            Primitive::BmpString => {
                if content.len() % 2 != 0 {
                    return Err(ErrorKind::Malformed.into());
                }
                let units = content.chunks(2).map(|pair| u32::from(pair[0]) << 8 | u32::from(pair[1]));
                let mut text = String::new();
                for unit in units {
                    text.push(char::from_u32(unit).ok_or(ErrorKind::Malformed)?);
                }
                Value::String(text)
            }
            Primitive::Any => return Err(ErrorKind::Malformed.into()),
        })
    }

    /// Encode a value into canonical content octets.
    ///
    /// The value must be of the variant this primitive decodes to.
    pub fn encode(self, value: &Value) -> Result<Vec<u8>> {
        Ok(match (self, value) {
            (Primitive::Boolean, Value::Boolean(b)) => alloc::vec![if *b { 0xFF } else { 0x00 }],
            (Primitive::Integer, Value::Integer(i)) => integer::encode(i),
            (Primitive::Enumerated, Value::Enumerated(i)) => integer::encode(i),
            (Primitive::BitString, Value::BitString(bits)) => bits.encode()?,
            (Primitive::OctetString, Value::OctetString(bytes)) => copied(bytes)?,
            (Primitive::Null, Value::Null) => Vec::new(),
            (Primitive::ObjectIdentifier, Value::ObjectIdentifier(oid)) => copied(oid.as_bytes())?,
            (Primitive::UtcTime, Value::Time(time)) => time.encode_utc()?,
            (Primitive::GeneralizedTime, Value::Time(time)) => time.encode_generalized(),
            (Primitive::Utf8String, Value::String(s)) => copied(s.as_bytes())?,
            (Primitive::PrintableString, Value::String(s)) if s.chars().all(is_printable) => {
                copied(s.as_bytes())?
            }
            (Primitive::Ia5String, Value::String(s)) if s.is_ascii() => copied(s.as_bytes())?,
            (Primitive::VisibleString, Value::String(s)) if s.chars().all(is_visible) => {
                copied(s.as_bytes())?
            }
            (Primitive::BmpString, Value::String(s)) => {
                let mut out = Vec::new();
                out.try_reserve(s.len() * 2)?;
                for c in s.chars() {
                    let unit = u16::try_from(u32::from(c)).map_err(|_| ErrorKind::Malformed)?;
                    out.extend_from_slice(&unit.to_be_bytes());
                }
                out
            }
            (Primitive::Any, Value::Any(any)) => copied(any.content())?,
            _ => return Err(ErrorKind::Malformed.into()),
        })
    }

    /// The value a freshly allocated object of this type holds.
    pub fn initial_value(self) -> Value {
        match self {
            Primitive::Boolean => Value::Boolean(false),
            Primitive::Integer => Value::Integer(BigInt::from(0)),
            Primitive::Enumerated => Value::Enumerated(BigInt::from(0)),
            Primitive::BitString => Value::BitString(BitString::default()),
            Primitive::OctetString => Value::OctetString(Vec::new()),
            Primitive::Null => Value::Null,
            Primitive::ObjectIdentifier => Value::ObjectIdentifier(ObjectIdentifier::null_arc()),
            Primitive::UtcTime | Primitive::GeneralizedTime => Value::Time(Time::EPOCH),
            Primitive::Utf8String
            | Primitive::PrintableString
            | Primitive::Ia5String
            | Primitive::VisibleString
            | Primitive::BmpString => Value::String(String::new()),
            Primitive::Any => Value::Any(Any::null()),
        }
    }
}

/// Content of a constructed-form string whose header was just read: the
/// content of its primitive segments, joined.
///
/// Segments carry the universal tag of `primitive` and may themselves be
/// constructed, each level counting against `limit`. For BIT STRING only
/// the last segment may have unused bits.
pub(crate) fn join_segments(
    decoder: &mut Decoder<'_>,
    header: &Header,
    primitive: Primitive,
    depth: usize,
    limit: usize,
) -> Result<Vec<u8>> {
    let universal = primitive.tag().ok_or(ErrorKind::Malformed)?;
    let mut segments = Vec::new();
    collect_segments(decoder, header, universal, depth, limit, &mut segments)?;

    let mut joined = Vec::new();
    if primitive == Primitive::BitString {
        let mut unused = 0;
        joined.try_reserve(1)?;
        joined.push(0);
        for segment in segments {
            let (&bits, bytes) = segment.split_first().ok_or(ErrorKind::Malformed)?;
            if unused != 0 {
                return Err(ErrorKind::Malformed.into());
            }
            unused = bits;
            joined.try_reserve(bytes.len())?;
            joined.extend_from_slice(bytes);
        }
        joined[0] = unused;
    } else {
        for segment in segments {
            joined.try_reserve(segment.len())?;
            joined.extend_from_slice(segment);
        }
    }
    Ok(joined)
}

fn collect_segments<'a>(
    decoder: &mut Decoder<'a>,
    header: &Header,
    universal: Tag,
    depth: usize,
    limit: usize,
    segments: &mut Vec<&'a [u8]>,
) -> Result<()> {
    if depth >= limit {
        return decoder.error(ErrorKind::DepthExceeded { limit });
    }
    decoder.constructed(header, |nested| {
        while !nested.is_finished() {
            let segment: Header = nested.decode()?;
            if !segment.tag.same_identity(universal) {
                return nested.error(ErrorKind::UnexpectedTag { expected: Some(universal), actual: segment.tag });
            }
            match segment.length {
                _ if segment.tag.constructed => {
                    collect_segments(nested, &segment, universal, depth + 1, limit, segments)?
                }
                ContentLength::Definite(length) => {
                    let bytes = nested.bytes(length)?;
                    segments.try_reserve(1)?;
                    segments.push(bytes);
                }
                ContentLength::Indefinite => return nested.error(ErrorKind::Malformed),
            }
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::{join_segments, Primitive, Value};
    use crate::{Decoder, ErrorKind, Header, Rules, Tag};
    use alloc::{string::String, vec::Vec};
    use hex_literal::hex;
    use num_bigint::BigInt;

    fn joined(bytes: &[u8], primitive: Primitive, limit: usize) -> crate::Result<Vec<u8>> {
        let mut decoder = Decoder::with_rules(bytes, Rules::Ber);
        let header: Header = decoder.decode()?;
        let content = join_segments(&mut decoder, &header, primitive, 0, limit)?;
        decoder.finish(content)
    }

    #[test]
    fn boolean_strictness() {
        assert_eq!(Primitive::Boolean.decode(&[0xFF], Rules::Der).unwrap(), Value::Boolean(true));
        assert_eq!(
            Primitive::Boolean.decode(&[0x01], Rules::Der).unwrap_err().kind(),
            ErrorKind::Malformed
        );
        assert_eq!(Primitive::Boolean.decode(&[0x01], Rules::Ber).unwrap(), Value::Boolean(true));
        assert!(Primitive::Boolean.decode(&[0x00, 0x00], Rules::Ber).is_err());
        assert_eq!(Primitive::Boolean.encode(&Value::Boolean(true)).unwrap(), [0xFF]);
    }

    #[test]
    fn strings() {
        let value = Primitive::PrintableString.decode(b"Example CA", Rules::Der).unwrap();
        assert_eq!(value.as_str(), Some("Example CA"));
        assert!(Primitive::PrintableString.decode(b"a@b", Rules::Der).is_err());
        assert!(Primitive::PrintableString.decode(b"a@b", Rules::Ber).is_err());
        assert!(Primitive::PrintableString.encode(&Value::String(String::from("a@b"))).is_err());

        let value = Primitive::BmpString.decode(&[0x00, 0x41, 0x00, 0xE9], Rules::Der).unwrap();
        assert_eq!(value.as_str(), Some("A\u{e9}"));
        assert_eq!(Primitive::BmpString.encode(&value).unwrap(), [0x00, 0x41, 0x00, 0xE9]);
        assert!(Primitive::BmpString.decode(&[0xD8, 0x00], Rules::Ber).is_err());
        assert!(Primitive::Utf8String.decode(&[0xC3], Rules::Ber).is_err());
    }

    #[test]
    fn value_must_match_codec() {
        let value = Value::Integer(BigInt::from(5));
        assert_eq!(Primitive::Integer.encode(&value).unwrap(), [0x05]);
        assert_eq!(Primitive::Enumerated.encode(&value).unwrap_err().kind(), ErrorKind::Malformed);
        assert_eq!(Primitive::Null.decode(&[0x00], Rules::Ber).unwrap_err().kind(), ErrorKind::Malformed);
    }

    #[test]
    fn universal_lookup() {
        assert_eq!(Primitive::from_universal(Tag::UTC_TIME), Some(Primitive::UtcTime));
        assert_eq!(Primitive::from_universal(Tag::SEQUENCE), None);
        assert_eq!(Primitive::Any.tag(), None);
    }

    #[test]
    fn constructed_strings() {
        let octets = joined(&hex!("24 80 04 02 AA BB 24 03 04 01 CC 00 00"), Primitive::OctetString, 4).unwrap();
        assert_eq!(octets, hex!("AA BB CC"));

        let bits = joined(&hex!("23 80 03 02 00 AA 03 02 04 B0 00 00"), Primitive::BitString, 4).unwrap();
        assert_eq!(bits, hex!("04 AA B0"));
        assert_eq!(joined(&hex!("23 00"), Primitive::BitString, 4).unwrap(), hex!("00"));

        // unused bits before the last segment
        let err = joined(&hex!("23 08 03 02 04 A0 03 02 00 BB"), Primitive::BitString, 4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
        // segments of another type
        let err = joined(&hex!("24 03 02 01 05"), Primitive::OctetString, 4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedTag { expected: Some(Tag::OCTET_STRING), actual: Tag::INTEGER });
        let err = joined(&hex!("24 80 24 80 24 80 00 00 00 00 00 00"), Primitive::OctetString, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DepthExceeded { limit: 2 });
    }

    #[test]
    fn canonical_content() {
        assert_eq!(Primitive::Integer.canonical(&[0x00, 0x7F], Rules::Ber).unwrap(), [0x7F]);
        assert_eq!(Primitive::Boolean.canonical(&[0x01], Rules::Ber).unwrap(), [0xFF]);
        assert!(Primitive::Integer.canonical(&[0x00, 0x7F], Rules::Der).is_err());
        assert_eq!(Primitive::Utf8String.canonical(b"ok", Rules::Der).unwrap(), b"ok");
    }
}
