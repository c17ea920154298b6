use core::convert::TryInto;
use crate::{ContentLength, Decodable, ErrorKind, Header, Length, Result, Rules, Tag};

/// BER/DER decoder: a cursor over a byte slice.
#[derive(Clone, Debug)]
pub struct Decoder<'a> {
    /// Byte slice being decoded.
    ///
    /// In the event an error was previously encountered this will be set to
    /// `None` to prevent further decoding while in a bad state.
    bytes: Option<&'a [u8]>,

    /// Position within the decoded slice.
    position: Length,

    /// Absolute offset of `bytes` within the outermost input.
    base: Length,

    /// Encoding rules the input is held to.
    rules: Rules,

    /// Content of an indefinite-length value: ends at an end-of-contents
    /// marker rather than at the end of `bytes`.
    indefinite: bool,
}

impl<'a> Decoder<'a> {
    /// Create a new strict (DER) decoder for the given byte slice.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_rules(bytes, Rules::Der)
    }

    /// Create a new decoder holding the input to the given rules.
    pub fn with_rules(bytes: &'a [u8], rules: Rules) -> Self {
        Self {
            bytes: Some(bytes),
            position: Length::zero(),
            base: Length::zero(),
            rules,
            indefinite: false,
        }
    }

    /// Encoding rules of this decoder.
    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Absolute offset of the cursor within the outermost input.
    pub fn offset(&self) -> Length {
        (self.base + self.position).unwrap_or(self.position)
    }

    /// Decode a value which impls the [`Decodable`] trait.
    pub fn decode<T: Decodable<'a>>(&mut self) -> Result<T> {
        if self.is_failed() {
            self.error(ErrorKind::Failed)?;
        }

        T::decode(self).map_err(|e| {
            let offset = self.offset();
            self.bytes.take();
            e.or_at(offset)
        })
    }

    /// Tag of the next element, without consuming it.
    ///
    /// `None` at the end of this decoder's content.
    pub fn peek_tag(&self) -> Result<Option<Tag>> {
        if self.is_finished() {
            return Ok(None);
        }
        let mut lookahead = self.clone();
        lookahead.decode().map(Some)
    }

    /// Decode the content of a constructed value whose header was just read,
    /// creating a nested [`Decoder`] and passing it to the provided [`FnOnce`].
    ///
    /// Definite content must be consumed completely. Indefinite content must
    /// be followed by an end-of-contents marker, which is consumed here.
    pub fn constructed<F, R>(&mut self, header: &Header, f: F) -> Result<R>
    where
        F: FnOnce(&mut Decoder<'a>) -> Result<R>,
    {
        let base = self.offset();
        match header.length {
            ContentLength::Definite(length) => {
                let bytes = self.bytes(length)?;
                let mut nested = Decoder {
                    bytes: Some(bytes),
                    position: Length::zero(),
                    base,
                    rules: self.rules,
                    indefinite: false,
                };
                let result = f(&mut nested).map_err(|e| self.taint(e))?;
                nested.finish(result).map_err(|e| self.taint(e))
            }
            ContentLength::Indefinite => {
                let bytes = self.remaining()?;
                let mut nested = Decoder {
                    bytes: Some(bytes),
                    position: Length::zero(),
                    base,
                    rules: self.rules,
                    indefinite: true,
                };
                let result = f(&mut nested).map_err(|e| self.taint(e))?;
                nested.end_of_contents().map_err(|e| self.taint(e))?;
                self.bytes(nested.position)?;
                Ok(result)
            }
        }
    }

    /// Return an error with the given [`ErrorKind`], annotating it with
    /// context about where the error occurred.
    pub fn error<T>(&mut self, kind: ErrorKind) -> Result<T> {
        let offset = self.offset();
        self.bytes.take();
        Err(kind.at(offset))
    }

    fn taint(&mut self, error: crate::Error) -> crate::Error {
        let offset = self.offset();
        self.bytes.take();
        error.or_at(offset)
    }

    /// Did the decoding operation fail due to an error?
    pub fn is_failed(&self) -> bool {
        self.bytes.is_none()
    }

    /// Finish decoding, returning the given value if there is no
    /// remaining data, or an error otherwise
    pub fn finish<T>(self, value: T) -> Result<T> {
        if self.is_failed() {
            Err(ErrorKind::Failed.at(self.offset()))
        } else if self.indefinite || !self.is_finished() {
            debug_now!("{} undecoded bytes at {}", self.remaining_len(), self.offset());
            Err(ErrorKind::Malformed.at(self.offset()))
        } else {
            Ok(value)
        }
    }

    /// Have we decoded all of the content in this [`Decoder`]?
    ///
    /// For indefinite-length content this means the end-of-contents marker is
    /// next. Returns `false` if a fatal error has occurred.
    pub fn is_finished(&self) -> bool {
        match self.remaining() {
            Ok(rem) if self.indefinite => rem.starts_with(&[0, 0]),
            Ok(rem) => rem.is_empty(),
            Err(_) => false,
        }
    }

    /// Consume the end-of-contents marker closing indefinite-length content.
    fn end_of_contents(&mut self) -> Result<()> {
        match self.bytes(2u8)? {
            [0, 0] => Ok(()),
            _ => self.error(ErrorKind::Malformed),
        }
    }

    /// Skip `len` bytes.
    pub(crate) fn skip(&mut self, len: usize) -> Result<()> {
        self.bytes(len).map(|_| ())
    }

    /// Decode a single byte, updating the internal cursor.
    pub(crate) fn byte(&mut self) -> Result<u8> {
        match self.bytes(1u8)? {
            [byte] => Ok(*byte),
            _ => self.error(ErrorKind::Truncated),
        }
    }

    /// Obtain a slice of bytes of the given length from the current cursor
    /// position, or return an error if we have insufficient data.
    pub(crate) fn bytes(&mut self, len: impl TryInto<Length>) -> Result<&'a [u8]> {
        if self.is_failed() {
            self.error(ErrorKind::Failed)?;
        }

        let len = len
            .try_into()
            .or_else(|_| self.error(ErrorKind::LengthOverflow))?;

        let result = match self.remaining()?.get(..len.to_usize()) {
            Some(result) => result,
            None => return self.error(ErrorKind::Truncated),
        };

        self.position = (self.position + len)?;
        Ok(result)
    }

    /// Obtain the remaining bytes in this decoder from the current cursor
    /// position.
    fn remaining(&self) -> Result<&'a [u8]> {
        self.bytes
            .and_then(|b| b.get(self.position.to_usize()..))
            .ok_or_else(|| ErrorKind::Truncated.at(self.offset()))
    }

    /// Get the number of bytes still remaining in the buffer.
    pub(crate) fn remaining_len(&self) -> usize {
        self.remaining().map(|rem| rem.len()).unwrap_or(0)
    }
}

impl<'a> From<&'a [u8]> for Decoder<'a> {
    fn from(bytes: &'a [u8]) -> Decoder<'a> {
        Decoder::new(bytes)
    }
}
