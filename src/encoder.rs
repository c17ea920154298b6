use crate::{Encodable, ErrorKind, Header, Length, Result, Tag};
use core::convert::TryInto;

/// DER encoder writing into a caller-provided buffer.
#[derive(Debug)]
pub struct Encoder<'a> {
    /// Buffer into which the DER-encoded message is written
    bytes: Option<&'a mut [u8]>,

    /// Total number of bytes written to buffer so far
    position: Length,
}

impl<'a> Encoder<'a> {
    /// Create a new encoder with the given byte slice as a backing buffer.
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self {
            bytes: Some(bytes),
            position: Length::zero(),
        }
    }

    /// Encode a value which impls the [`Encodable`] trait.
    pub fn encode<T: Encodable + ?Sized>(&mut self, encodable: &T) -> Result<()> {
        if self.is_failed() {
            self.error(ErrorKind::Failed)?;
        }

        encodable.encode(self).map_err(|e| {
            self.bytes.take();
            e.or_at(self.position)
        })
    }

    /// Encode a complete TLV: a definite-length header for `tag` followed by
    /// the already encoded `content`.
    pub fn tlv(&mut self, tag: Tag, content: &[u8]) -> Result<()> {
        Header::new(tag, content.len()).and_then(|header| header.encode(self))?;
        self.bytes(content)
    }

    /// Return an error with the given [`ErrorKind`], annotating it with
    /// context about where the error occurred.
    pub fn error<T>(&mut self, kind: ErrorKind) -> Result<T> {
        self.bytes.take();
        Err(kind.at(self.position))
    }

    /// Did the encoding operation fail due to an error?
    pub fn is_failed(&self) -> bool {
        self.bytes.is_none()
    }

    /// Finish encoding to the buffer, returning a slice containing the data
    /// written to the buffer.
    pub fn finish(self) -> Result<&'a [u8]> {
        let position = self.position;

        match self.bytes {
            Some(bytes) => bytes
                .get(..self.position.to_usize())
                .ok_or_else(|| ErrorKind::Truncated.at(position)),
            None => Err(ErrorKind::Failed.at(position)),
        }
    }

    /// Encode a single byte into the backing buffer.
    pub(crate) fn byte(&mut self, byte: u8) -> Result<()> {
        match self.reserve(1u8)?.first_mut() {
            Some(b) => {
                *b = byte;
                Ok(())
            }
            None => self.error(ErrorKind::Truncated),
        }
    }

    /// Encode the provided byte slice into the backing buffer.
    pub(crate) fn bytes(&mut self, slice: &[u8]) -> Result<()> {
        self.reserve(slice.len())?.copy_from_slice(slice);
        Ok(())
    }

    /// Reserve a portion of the internal buffer, updating the internal cursor
    /// position and returning a mutable slice.
    fn reserve(&mut self, len: impl TryInto<Length>) -> Result<&mut [u8]> {
        let len = len
            .try_into()
            .or_else(|_| self.error(ErrorKind::LengthOverflow))?;

        if len.to_usize() > self.remaining_len()? {
            self.error(ErrorKind::Overlength)?;
        }

        let end = (self.position + len).or_else(|e| self.error(e.kind()))?;
        let range = self.position.to_usize()..end.to_usize();
        let position = self.position;
        self.position = end;

        match self.bytes.as_mut().and_then(|bytes| bytes.get_mut(range)) {
            Some(slice) => Ok(slice),
            None => Err(ErrorKind::Failed.at(position)),
        }
    }

    /// Get the size of the buffer in bytes.
    fn buffer_len(&self) -> Result<usize> {
        self.bytes
            .as_ref()
            .map(|bytes| bytes.len())
            .ok_or_else(|| ErrorKind::Failed.at(self.position))
    }

    /// Get the number of bytes still remaining in the buffer.
    fn remaining_len(&self) -> Result<usize> {
        self.buffer_len()?
            .checked_sub(self.position.to_usize())
            .ok_or_else(|| ErrorKind::Truncated.at(self.position))
    }
}
