//! TLV headers.

use crate::{ContentLength, Decodable, Decoder, Encodable, Encoder, ErrorKind, Length, Result, Rules, Tag};
use core::convert::TryInto;

/// Tag + length component of a TLV-encoded value, plus where its value starts.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Header {
    /// Tag representing the type of the encoded value
    pub tag: Tag,

    /// Length of the encoded value
    pub length: ContentLength,

    /// Absolute offset of the first value byte
    pub value_offset: usize,
}

impl Header {
    /// Create a new definite-length [`Header`] from a [`Tag`] and a specified length.
    ///
    /// Returns [`Error`] if the length exceeds the limits of [`Length`]
    pub fn new(tag: Tag, length: impl TryInto<Length>) -> Result<Self> {
        let length = length.try_into().map_err(|_| ErrorKind::LengthOverflow)?;
        Ok(Self { tag, length: length.into(), value_offset: 0 })
    }
}

/// Scan one TLV header at `offset`, treating `limit` as the end of the input.
///
/// A definite length must fit between the value offset and `limit`.
pub fn decode_header(bytes: &[u8], offset: usize, limit: usize, rules: Rules) -> Result<Header> {
    let window = bytes.get(..limit).ok_or(ErrorKind::Truncated)?;
    if offset > window.len() {
        return Err(ErrorKind::Truncated.into());
    }
    let mut decoder = Decoder::with_rules(window, rules);
    decoder.skip(offset)?;
    decoder.decode()
}

impl Decodable<'_> for Header {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Header> {
        let start = decoder.offset();
        let tag = Tag::decode(decoder)?;
        let length = ContentLength::decode(decoder)?;

        match length {
            ContentLength::Definite(length) => {
                if length.to_usize() > decoder.remaining_len() {
                    return Err(ErrorKind::Truncated.at(start));
                }
            }
            ContentLength::Indefinite if !tag.constructed => {
                return Err(ErrorKind::Malformed.at(start));
            }
            ContentLength::Indefinite => {}
        }

        trace_now!("header {} at {}", tag, start);
        Ok(Self { tag, length, value_offset: decoder.offset().to_usize() })
    }
}

impl Encodable for Header {
    fn encoded_length(&self) -> Result<Length> {
        let length = self.length.definite().ok_or(ErrorKind::Malformed)?;
        self.tag.encoded_length()? + length.encoded_length()?
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        // indefinite lengths are never emitted
        let length = self.length.definite().ok_or(ErrorKind::Malformed)?;
        self.tag.encode(encoder)?;
        length.encode(encoder)
    }
}
