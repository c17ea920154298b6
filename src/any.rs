use crate::{
    options::DEFAULT_MAX_DEPTH, primitive::join_segments, Class, ContentLength, Decoder, Encodable, Encoder,
    ErrorKind, Header, Length, Object, Primitive, Result, Rules, Tag, Value,
};
use alloc::{boxed::Box, vec::Vec};
use core::cell::OnceCell;

/// A single element of any type: its observed tag plus an owned copy of its
/// content octets.
///
/// The interpretation of the content is computed on first use and cached.
#[derive(Clone, Debug)]
pub struct Any {
    tag: Tag,
    content: Vec<u8>,
    interpretation: OnceCell<Box<Object>>,
}

impl PartialEq for Any {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.content == other.content
    }
}

impl Eq for Any {}

impl Any {
    /// Wrap already encoded content under `tag`.
    ///
    /// The end-of-contents tag is rejected.
    pub fn new(tag: Tag, content: impl Into<Vec<u8>>) -> Result<Self> {
        if tag.same_identity(Tag::END_OF_CONTENTS) {
            return Err(ErrorKind::Malformed.into());
        }
        Ok(Self { tag, content: content.into(), interpretation: OnceCell::new() })
    }

    /// `NULL`
    pub fn null() -> Self {
        Self { tag: Tag::NULL, content: Vec::new(), interpretation: OnceCell::new() }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Decode the content as the universal type its tag names.
    ///
    /// Constructed content becomes [`Object::Repeated`] holding one `Any` per
    /// element. Primitive content of a type without a codec (or of a
    /// non-universal class) is kept as an octet string. The content is held
    /// to DER.
    pub fn interpret(&self) -> Result<&Object> {
        if let Some(cached) = self.interpretation.get() {
            return Ok(cached);
        }
        let object = self.interpret_content()?;
        let cached: &Object = self.interpretation.get_or_init(|| Box::new(object));
        Ok(cached)
    }

    fn interpret_content(&self) -> Result<Object> {
        if self.tag.constructed {
            let mut decoder = Decoder::new(&self.content);
            let mut elements = Vec::new();
            while !decoder.is_finished() {
                let element = Any::decode_element(&mut decoder, 0, DEFAULT_MAX_DEPTH)?;
                elements.try_reserve(1)?;
                elements.push(Object::Primitive(Value::Any(element)));
            }
            return decoder.finish(Object::Repeated(elements));
        }
        let value = match universal_primitive(self.tag) {
            Some(primitive) => primitive.decode(&self.content, Rules::Der)?,
            None => Value::OctetString(self.content.clone()),
        };
        Ok(Object::Primitive(value))
    }

    /// Read one whole element, leaving its content in canonical form.
    ///
    /// Constructed content is walked element by element, each nesting level
    /// counting against `limit`. Content of a known universal type goes
    /// through its codec. Under DER anything non-canonical fails. Under BER
    /// it is rewritten: definite minimal headers, canonical leaves, and
    /// constructed strings joined into their primitive form.
    pub(crate) fn decode_element(decoder: &mut Decoder<'_>, depth: usize, limit: usize) -> Result<Self> {
        let header: Header = decoder.decode()?;
        let tag = header.tag;
        if tag.class == Class::Universal {
            let structured = tag.same_identity(Tag::SEQUENCE) || tag.same_identity(Tag::SET);
            if tag.number == 0 || (structured && !tag.constructed) {
                return decoder.error(ErrorKind::Malformed);
            }
        }
        let primitive = universal_primitive(tag.with_constructed(false));

        if tag.constructed {
            if depth >= limit {
                return decoder.error(ErrorKind::DepthExceeded { limit });
            }
            if let Some(primitive) = primitive {
                if decoder.rules() == Rules::Der || !primitive.is_string() {
                    return decoder.error(ErrorKind::UnexpectedTag {
                        expected: Some(tag.with_constructed(false)),
                        actual: tag,
                    });
                }
                info_now!("joining constructed {}", tag);
                let at = decoder.offset();
                let joined = join_segments(decoder, &header, primitive, depth, limit)?;
                let content = primitive.canonical(&joined, Rules::Ber).map_err(|error| error.or_at(at))?;
                return Ok(Self { tag: tag.with_constructed(false), content, interpretation: OnceCell::new() });
            }
            if matches!(header.length, ContentLength::Indefinite) {
                debug_now!("canonicalizing indefinite-length {}", tag);
            }
            let content = decoder.constructed(&header, |nested| {
                let mut content = Vec::new();
                while !nested.is_finished() {
                    Any::decode_element(nested, depth + 1, limit)?.encode_to_vec(&mut content)?;
                }
                Ok(content)
            })?;
            return Ok(Self { tag, content, interpretation: OnceCell::new() });
        }

        let length = match header.length {
            ContentLength::Definite(length) => length,
            ContentLength::Indefinite => return decoder.error(ErrorKind::Malformed),
        };
        let at = decoder.offset();
        let bytes = decoder.bytes(length)?;
        let content = match primitive {
            Some(primitive) => primitive.canonical(bytes, decoder.rules()).map_err(|error| error.or_at(at))?,
            None => {
                let mut content = Vec::new();
                content.try_reserve(bytes.len())?;
                content.extend_from_slice(bytes);
                content
            }
        };
        Ok(Self { tag, content, interpretation: OnceCell::new() })
    }
}

/// The codec for content under a universal tag, if there is one.
fn universal_primitive(tag: Tag) -> Option<Primitive> {
    match tag.class {
        Class::Universal => Primitive::from_universal(tag),
        _ => None,
    }
}

impl Encodable for Any {
    fn encoded_length(&self) -> Result<Length> {
        Header::new(self.tag, self.content.len())?.encoded_length()? + self.content.len()
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.tlv(self.tag, &self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::Any;
    use crate::{Decoder, Encodable, ErrorKind, Object, Rules, Tag, Value};
    use hex_literal::hex;
    use num_bigint::BigInt;

    fn decode(bytes: &[u8], rules: Rules) -> crate::Result<Any> {
        let mut decoder = Decoder::with_rules(bytes, rules);
        let any = Any::decode_element(&mut decoder, 0, 30)?;
        decoder.finish(any)
    }

    #[test]
    fn keeps_observed_tag() {
        let any = decode(&hex!("A0 03 02 01 05"), Rules::Der).unwrap();
        assert_eq!(any.tag(), Tag::context(0).constructed());
        assert_eq!(any.content(), &hex!("02 01 05"));
        assert_eq!(any.to_vec().unwrap(), hex!("A0 03 02 01 05"));
    }

    #[test]
    fn rejects_end_of_contents() {
        assert_eq!(decode(&hex!("00 00"), Rules::Ber).unwrap_err().kind(), ErrorKind::Malformed);
        assert!(Any::new(Tag::END_OF_CONTENTS, &[][..]).is_err());
    }

    #[test]
    fn ber_content_is_canonicalized() {
        let any = decode(&hex!("30 80 02 81 01 05 30 80 00 00 00 00"), Rules::Ber).unwrap();
        assert_eq!(any.to_vec().unwrap(), hex!("30 05 02 01 05 30 00"));
        assert!(decode(&hex!("30 80 02 01 05 00 00"), Rules::Der).is_err());
    }

    #[test]
    fn ber_nesting_is_bounded() {
        let nested = hex!("30 80 30 80 30 80 00 00 00 00 00 00");
        let mut decoder = Decoder::with_rules(&nested, Rules::Ber);
        let error = Any::decode_element(&mut decoder, 0, 2).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::DepthExceeded { limit: 2 });
    }

    #[test]
    fn interpretation_is_cached() {
        let any = decode(&hex!("30 06 02 01 05 01 01 FF"), Rules::Der).unwrap();
        let elements = match any.interpret().unwrap() {
            Object::Repeated(elements) => elements,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(elements.len(), 2);
        let first = elements[0].value().and_then(Value::as_any).unwrap();
        assert_eq!(first.interpret().unwrap().value().and_then(Value::as_integer).unwrap(), &BigInt::from(5));

        assert!(core::ptr::eq(any.interpret().unwrap(), any.interpret().unwrap()));

        let loose = Any::new(Tag::BOOLEAN, &[0x01][..]).unwrap();
        assert_eq!(loose.interpret().unwrap_err().kind(), ErrorKind::Malformed);
    }

    #[test]
    fn der_content_is_checked() {
        // indefinite length inside, non-minimal INTEGER, BOOLEAN 01
        for bad in [&hex!("30 05 30 80 00 00 00")[..], &hex!("02 02 00 7F"), &hex!("30 03 01 01 01")] {
            assert_eq!(decode(bad, Rules::Der).unwrap_err().kind(), ErrorKind::Malformed);
        }
        assert!(decode(&hex!("24 03 04 01 AA"), Rules::Der).is_err());
        assert_eq!(decode(&hex!("10 00"), Rules::Ber).unwrap_err().kind(), ErrorKind::Malformed);

        let opaque = decode(&hex!("9F 20 02 00 7F"), Rules::Der).unwrap();
        assert_eq!(opaque.content(), &hex!("00 7F"));
    }

    #[test]
    fn ber_leaves_are_canonicalized() {
        let ber = hex!("30 80 02 02 00 7F 01 01 01 24 80 04 01 AA 04 01 BB 00 00 00 00");
        let any = decode(&ber, Rules::Ber).unwrap();
        assert_eq!(any.to_vec().unwrap(), hex!("30 0A 02 01 7F 01 01 FF 04 02 AA BB"));
        assert!(decode(&any.to_vec().unwrap(), Rules::Der).is_ok());

        let integer = decode(&hex!("22 03 02 01 05"), Rules::Ber).unwrap_err();
        assert_eq!(
            integer.kind(),
            ErrorKind::UnexpectedTag { expected: Some(Tag::INTEGER), actual: Tag::INTEGER.constructed() }
        );
    }
}
