use core::{convert::TryFrom, fmt};
use crate::{Decodable, Decoder, Encodable, Encoder, Error, ErrorKind, Length, Result, Rules};

const CLASS_OFFSET: usize = 6;
const CONSTRUCTED_OFFSET: usize = 5;

/// Indicator bit for constructed form encoding (i.e. vs primitive form)
const CONSTRUCTED_FLAG: u8 = 1u8 << CONSTRUCTED_OFFSET;

/// Low five bits of the first identifier octet
const NUMBER_MASK: u8 = (1 << CONSTRUCTED_OFFSET) - 1;

/// Marks the high-tag-number form in the first identifier octet
const HIGH_TAG_NUMBER: u8 = NUMBER_MASK;

/// Continuation bit of the base-128 tag number octets
const NOT_LAST_TAG_OCTET_FLAG: u8 = 1u8 << 7;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
/// Class of BER tag.
pub enum Class {
    Universal = 0b00,
    Application = 0b01,
    Context = 0b10,
    Private = 0b11,
}

impl Class {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Class::Universal,
            0b01 => Class::Application,
            0b10 => Class::Context,
            _ => Class::Private,
        }
    }
}

/// Identifier of an encoded value: class, primitive/constructed flag and number.
///
/// Numbers up to 30 pack into the first octet, larger ones follow as base-128
/// octets, most significant first.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Tag {
    pub class: Class,
    pub constructed: bool,
    pub number: u32,
}

impl Tag {
    pub const END_OF_CONTENTS: Self = Self::universal(0x0);
    pub const BOOLEAN: Self = Self::universal(0x1);
    pub const INTEGER: Self = Self::universal(0x2);
    pub const BIT_STRING: Self = Self::universal(0x3);
    pub const OCTET_STRING: Self = Self::universal(0x4);
    pub const NULL: Self = Self::universal(0x5);
    pub const OBJECT_IDENTIFIER: Self = Self::universal(0x6);
    pub const ENUMERATED: Self = Self::universal(0xA);
    pub const UTF8_STRING: Self = Self::universal(0xC);
    pub const PRINTABLE_STRING: Self = Self::universal(0x13);
    pub const IA5_STRING: Self = Self::universal(0x16);
    pub const UTC_TIME: Self = Self::universal(0x17);
    pub const GENERALIZED_TIME: Self = Self::universal(0x18);
    pub const VISIBLE_STRING: Self = Self::universal(0x1A);
    pub const BMP_STRING: Self = Self::universal(0x1E);
    pub const SEQUENCE: Self = Self::universal(0x10).constructed();
    pub const SET: Self = Self::universal(0x11).constructed();

    pub const fn new(class: Class, constructed: bool, number: u32) -> Self {
        Self { class, constructed, number }
    }

    pub const fn universal(number: u32) -> Self {
        Self { class: Class::Universal, constructed: false, number }
    }

    pub const fn application(number: u32) -> Self {
        Self { class: Class::Application, constructed: false, number }
    }

    pub const fn context(number: u32) -> Self {
        Self { class: Class::Context, constructed: false, number }
    }

    pub const fn private(number: u32) -> Self {
        Self { class: Class::Private, constructed: false, number }
    }

    pub const fn constructed(self) -> Self {
        let Self { class, constructed: _, number } = self;
        Self { class, constructed: true, number }
    }

    /// Same class and number, with the given primitive/constructed flag.
    pub const fn with_constructed(self, constructed: bool) -> Self {
        let Self { class, constructed: _, number } = self;
        Self { class, constructed, number }
    }

    /// Class and number agree, ignoring the primitive/constructed flag.
    pub fn same_identity(self, other: Tag) -> bool {
        self.class == other.class && self.number == other.number
    }

    /// Assert that this [`Tag`] matches the provided expected tag.
    ///
    /// On mismatch, returns an [`Error`] with [`ErrorKind::UnexpectedTag`].
    pub fn assert_eq(self, expected: Tag) -> Result<Tag> {
        if self == expected {
            Ok(self)
        } else {
            Err(ErrorKind::UnexpectedTag {
                expected: Some(expected),
                actual: self,
            }
            .into())
        }
    }
}

impl TryFrom<&'_ [u8]> for Tag {
    type Error = Error;
    fn try_from(encoding: &[u8]) -> Result<Self> {
        Tag::from_bytes(encoding)
    }
}

impl TryFrom<u8> for Tag {
    type Error = Error;
    fn try_from(encoded_value: u8) -> Result<Self> {
        Tag::from_bytes(&[encoded_value])
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class = match self.class {
            Class::Universal => "UNIVERSAL",
            Class::Application => "APPLICATION",
            Class::Context => "CONTEXT",
            Class::Private => "PRIVATE",
        };
        let form = if self.constructed { "constructed" } else { "primitive" };
        write!(f, "[{} {}] ({})", class, self.number, form)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(class = {:?}, constructed = {}, number = {})", self.class, self.constructed, self.number)
    }
}

impl Encodable for Tag {
    fn encoded_length(&self) -> Result<Length> {
        match self.number {
            0..=0x1E => Ok(Length::from(1u8)),
            number => {
                let significant_bits = 32 - number.leading_zeros();
                Length::from(1u8) + Length::from(((significant_bits + 6) / 7) as u8)
            }
        }
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        let first_byte = ((self.class as u8) << CLASS_OFFSET) | ((self.constructed as u8) << CONSTRUCTED_OFFSET);

        if self.number <= 0x1E {
            return encoder.byte(first_byte | self.number as u8);
        }

        encoder.byte(first_byte | HIGH_TAG_NUMBER)?;
        let octets = (32 - self.number.leading_zeros() + 6) / 7;
        for i in (0..octets).rev() {
            let limb = ((self.number >> (7 * i)) & 0x7F) as u8;
            let flag = if i == 0 { 0 } else { NOT_LAST_TAG_OCTET_FLAG };
            encoder.byte(limb | flag)?;
        }
        Ok(())
    }
}

impl Decodable<'_> for Tag {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
        let first_byte = decoder.byte()?;
        let class = Class::from_bits(first_byte >> CLASS_OFFSET);
        let constructed = first_byte & CONSTRUCTED_FLAG != 0;

        let number = match first_byte & NUMBER_MASK {
            HIGH_TAG_NUMBER => {
                let mut number = 0u32;
                let mut octets = 0usize;
                loop {
                    let byte = decoder.byte()?;
                    if octets == 0 && byte == NOT_LAST_TAG_OCTET_FLAG {
                        // leading zero limb
                        match decoder.rules() {
                            Rules::Der => return decoder.error(ErrorKind::Malformed),
                            Rules::Ber => {
                                info_now!("accepting non-minimal tag number");
                            }
                        }
                    }
                    if number.leading_zeros() < 7 {
                        return decoder.error(ErrorKind::LengthOverflow);
                    }
                    number = (number << 7) | u32::from(byte & !NOT_LAST_TAG_OCTET_FLAG);
                    octets += 1;
                    if byte & NOT_LAST_TAG_OCTET_FLAG == 0 {
                        break;
                    }
                }
                if number <= 0x1E && decoder.rules() == Rules::Der {
                    return decoder.error(ErrorKind::Malformed);
                }
                number
            }
            low => u32::from(low),
        };
        Ok(Self { class, constructed, number })
    }
}
