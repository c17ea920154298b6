//! Trait definitions

use crate::{Decoder, Encoder, ErrorKind, Length, Result};
use alloc::vec::Vec;
use core::{convert::TryInto, iter};

#[cfg(feature = "heapless")]
use crate::Error;

/// Decoding trait.
pub trait Decodable<'a>: Sized {
    /// Attempt to decode this message using the provided decoder.
    fn decode(decoder: &mut Decoder<'a>) -> Result<Self>;

    /// Parse `Self` from the provided byte slice under DER rules.
    fn from_bytes(bytes: &'a [u8]) -> Result<Self> {
        let mut decoder = Decoder::new(bytes);
        let result = decoder.decode()?;
        decoder.finish(result)
    }
}

/// Encoding trait.
pub trait Encodable {
    /// Compute the length of this value in bytes when encoded as DER
    fn encoded_length(&self) -> Result<Length>;

    /// Encode this value as DER using the provided [`Encoder`].
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()>;

    /// Encode this value to the provided byte slice, returning a sub-slice
    /// containing the encoded message.
    fn encode_to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a [u8]> {
        let mut encoder = Encoder::new(buf);
        self.encode(&mut encoder)?;
        encoder.finish()
    }

    /// Encode this message as DER, appending it to the provided
    /// byte vector.
    fn encode_to_vec(&self, buf: &mut Vec<u8>) -> Result<Length> {
        let expected_len = self.encoded_length()?.to_usize();
        let current_len = buf.len();
        buf.try_reserve(expected_len)?;
        buf.extend(iter::repeat(0).take(expected_len));

        let mut encoder = Encoder::new(&mut buf[current_len..]);
        self.encode(&mut encoder)?;
        let actual_len = encoder.finish()?.len();

        if expected_len != actual_len {
            return Err(ErrorKind::Underlength {
                expected: expected_len.try_into()?,
                actual: actual_len.try_into()?,
            }
            .into());
        }

        actual_len.try_into()
    }

    /// Serialize this message as a byte vector.
    fn to_vec(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode_to_vec(&mut buf)?;
        Ok(buf)
    }

    /// Encode this message as DER, appending it to the provided
    /// heapless byte vector.
    #[cfg(feature = "heapless")]
    #[cfg_attr(docsrs, doc(cfg(feature = "heapless")))]
    fn encode_to_heapless_vec<const N: usize>(&self, buf: &mut heapless::Vec<u8, N>) -> Result<Length> {
        let expected_len = self.encoded_length()?.to_usize();
        let current_len = buf.len();
        buf.resize_default(current_len + expected_len).map_err(|_| Error::from(ErrorKind::Overlength))?;

        let mut encoder = Encoder::new(&mut buf[current_len..]);
        self.encode(&mut encoder)?;
        let actual_len = encoder.finish()?.len();

        if expected_len != actual_len {
            return Err(ErrorKind::Underlength {
                expected: expected_len.try_into()?,
                actual: actual_len.try_into()?,
            }
            .into());
        }

        actual_len.try_into()
    }

    /// Serialize this message as a heapless byte vector.
    #[cfg(feature = "heapless")]
    #[cfg_attr(docsrs, doc(cfg(feature = "heapless")))]
    fn to_heapless_vec<const N: usize>(&self) -> Result<heapless::Vec<u8, N>> {
        let mut buf = heapless::Vec::new();
        self.encode_to_heapless_vec(&mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Encodable, Header, Length, Tag};

    #[test]
    fn to_vec_appends() {
        let header = Header::new(Tag::SEQUENCE, 0x100usize).unwrap();
        let mut buf = alloc::vec![0xAA];
        assert_eq!(header.encode_to_vec(&mut buf).unwrap(), Length::from(4u8));
        assert_eq!(buf, [0xAA, 0x30, 0x82, 0x01, 0x00]);
    }

    #[cfg(feature = "heapless")]
    #[test]
    fn heapless_capacity_is_enforced() {
        let header = Header::new(Tag::SEQUENCE, 0x100usize).unwrap();
        assert!(header.to_heapless_vec::<3>().is_err());
        assert_eq!(header.to_heapless_vec::<4>().unwrap().as_slice(), &[0x30, 0x82, 0x01, 0x00]);
    }
}
