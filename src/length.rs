//! Length calculations for encoded ASN.1 values

use crate::{Decodable, Decoder, Encodable, Encoder, Error, ErrorKind, Result, Rules};
use core::{convert::TryFrom, fmt, ops::Add};

/// Indicator bit for the long form of the length field.
const LONG_FORM_FLAG: u8 = 1u8 << 7;

/// The long-form first byte with no subsequent bytes marks an indefinite length.
const INDEFINITE: u8 = LONG_FORM_FLAG;

/// Reserved by X.690 8.1.3.5 (c).
const RESERVED: u8 = 0xFF;

/// Definite length of an encoded value.
///
/// By definition, in the range `0..=u32::MAX`; longer inputs are rejected with
/// [`ErrorKind::LengthOverflow`].
///
/// - Short form (`0..=127`): a single byte.
/// - Long form: `0x80 | n` followed by `n` big-endian bytes, `n` minimal.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct Length(u32);

impl Length {
    /// Return a length of `0`.
    pub const fn zero() -> Self {
        Length(0)
    }

    /// Get the maximum length supported by this crate
    pub const fn max() -> usize {
        u32::MAX as usize
    }

    /// Convert length to `usize`
    pub fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl Add for Length {
    type Output = Result<Self>;

    fn add(self, other: Self) -> Result<Self> {
        self.0
            .checked_add(other.0)
            .map(Length)
            .ok_or_else(|| ErrorKind::LengthOverflow.into())
    }
}

impl Add<u8> for Length {
    type Output = Result<Self>;

    fn add(self, other: u8) -> Result<Self> {
        self + Length::from(other)
    }
}

impl Add<u16> for Length {
    type Output = Result<Self>;

    fn add(self, other: u16) -> Result<Self> {
        self + Length::from(other)
    }
}

impl Add<usize> for Length {
    type Output = Result<Self>;

    fn add(self, other: usize) -> Result<Self> {
        self + Length::try_from(other)?
    }
}

impl Add<Length> for Result<Length> {
    type Output = Self;

    fn add(self, other: Length) -> Self {
        self? + other
    }
}

impl From<u8> for Length {
    fn from(len: u8) -> Length {
        Length(len as u32)
    }
}

impl From<u16> for Length {
    fn from(len: u16) -> Length {
        Length(len as u32)
    }
}

impl From<u32> for Length {
    fn from(len: u32) -> Length {
        Length(len)
    }
}

impl From<Length> for u32 {
    fn from(len: Length) -> u32 {
        len.0
    }
}

impl From<Length> for usize {
    fn from(len: Length) -> usize {
        len.0 as usize
    }
}

impl TryFrom<usize> for Length {
    type Error = Error;

    fn try_from(len: usize) -> Result<Length> {
        u32::try_from(len)
            .map(Length)
            .map_err(|_| ErrorKind::LengthOverflow.into())
    }
}

impl Encodable for Length {
    fn encoded_length(&self) -> Result<Length> {
        match self.0 {
            0..=0x7F => Ok(Length(1)),
            0x80..=0xFF => Ok(Length(2)),
            0x100..=0xFFFF => Ok(Length(3)),
            0x1_0000..=0xFF_FFFF => Ok(Length(4)),
            _ => Ok(Length(5)),
        }
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        if self.0 < 0x80 {
            return encoder.byte(self.0 as u8);
        }
        let bytes = self.0.to_be_bytes();
        let skip = (self.0.leading_zeros() / 8) as usize;
        encoder.byte(LONG_FORM_FLAG | (bytes.len() - skip) as u8)?;
        encoder.bytes(&bytes[skip..])
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The length field of a header: either a definite [`Length`], or the
/// indefinite marker (BER only) whose content ends with an end-of-contents
/// element `00 00`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ContentLength {
    Definite(Length),
    Indefinite,
}

impl ContentLength {
    /// The definite length, if any.
    pub fn definite(self) -> Option<Length> {
        match self {
            ContentLength::Definite(length) => Some(length),
            ContentLength::Indefinite => None,
        }
    }
}

impl From<Length> for ContentLength {
    fn from(length: Length) -> Self {
        ContentLength::Definite(length)
    }
}

impl Decodable<'_> for ContentLength {
    fn decode(decoder: &mut Decoder<'_>) -> Result<ContentLength> {
        let first = decoder.byte()?;
        if first & LONG_FORM_FLAG == 0 {
            return Ok(Length::from(first).into());
        }
        match first {
            INDEFINITE => match decoder.rules() {
                Rules::Ber => Ok(ContentLength::Indefinite),
                Rules::Der => decoder.error(ErrorKind::Malformed),
            },
            RESERVED => decoder.error(ErrorKind::Malformed),
            _ => {
                let count = (first & !LONG_FORM_FLAG) as usize;
                let bytes = decoder.bytes(count)?;
                let significant = match bytes.iter().position(|b| *b != 0) {
                    Some(start) => &bytes[start..],
                    None => &[][..],
                };
                if significant.len() > 4 {
                    return decoder.error(ErrorKind::LengthOverflow);
                }
                let value = significant
                    .iter()
                    .fold(0u32, |acc, b| (acc << 8) | u32::from(*b));

                let minimal = significant.len() == bytes.len() && value >= 0x80;
                if !minimal {
                    match decoder.rules() {
                        Rules::Der => return decoder.error(ErrorKind::Malformed),
                        Rules::Ber => {
                            info_now!("accepting non-minimal length encoding");
                        }
                    }
                }
                Ok(Length(value).into())
            }
        }
    }
}
