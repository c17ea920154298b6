use crate::{ErrorKind, Result, Rules};
use alloc::vec::Vec;

/// BIT STRING value: whole bytes plus the count of unused trailing bits in
/// the last one.
///
/// Unused bits are always zero.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct BitString {
    unused_bits: u8,
    bytes: Vec<u8>,
}

impl BitString {
    /// Build a bit string, clearing the unused bits.
    pub fn new(unused_bits: u8, bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let mut bytes = bytes.into();
        if unused_bits > 7 || (bytes.is_empty() && unused_bits != 0) {
            return Err(ErrorKind::Malformed.into());
        }
        if let Some(last) = bytes.last_mut() {
            *last &= 0xFF << unused_bits;
        }
        Ok(Self { unused_bits, bytes })
    }

    /// Whole bytes, a bit string with no unused bits.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self { unused_bits: 0, bytes: bytes.into() }
    }

    pub fn unused_bits(&self) -> u8 {
        self.unused_bits
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Total number of bits
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 - self.unused_bits as usize
    }

    /// Bit `index`, counting from the most significant bit of the first byte.
    pub fn bit(&self, index: usize) -> bool {
        index < self.bit_len() && self.bytes[index / 8] & (0x80 >> (index % 8)) != 0
    }

    pub(crate) fn decode(content: &[u8], rules: Rules) -> Result<Self> {
        let (&unused_bits, bytes) = content.split_first().ok_or(ErrorKind::Malformed)?;
        if unused_bits > 7 || (bytes.is_empty() && unused_bits != 0) {
            return Err(ErrorKind::Malformed.into());
        }
        let padding = bytes.last().map(|last| last & !(0xFF << unused_bits)).unwrap_or(0);
        if padding != 0 {
            match rules {
                Rules::Der => return Err(ErrorKind::Malformed.into()),
                Rules::Ber => {
                    info_now!("clearing non-zero BIT STRING padding");
                }
            }
        }
        Self::new(unused_bits, bytes)
    }

    pub(crate) fn encode(&self) -> Result<Vec<u8>> {
        let mut content = Vec::new();
        content.try_reserve(self.bytes.len() + 1)?;
        content.push(self.unused_bits);
        content.extend_from_slice(&self.bytes);
        Ok(content)
    }
}
