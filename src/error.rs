//! Error types.

use crate::{Length, Tag};
use core::{convert::Infallible, fmt};

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Error {
    /// Kind of error
    kind: ErrorKind,

    /// Absolute position inside of the input where the error occurred
    position: Option<Length>,
}

impl Error {
    /// Create a new [`Error`]
    pub fn new(kind: ErrorKind, position: Length) -> Error {
        Error {
            kind,
            position: Some(position),
        }
    }

    /// Get the [`ErrorKind`] which occurred.
    pub fn kind(self) -> ErrorKind {
        self.kind
    }

    /// Get the position inside of the input where the error occurred.
    pub fn position(self) -> Option<Length> {
        self.position
    }

    /// Attach a position to an error which does not carry one yet.
    ///
    /// Errors raised deep inside a codec only know their kind; the cursor
    /// that called the codec knows where it was.
    pub fn or_at(self, position: Length) -> Self {
        Self {
            kind: self.kind,
            position: self.position.or(Some(position)),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if let Some(pos) = self.position {
            write!(f, " at byte {}", pos)?;
        }

        Ok(())
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind,
            position: None,
        }
    }
}

impl From<Infallible> for Error {
    fn from(_: Infallible) -> Error {
        unreachable!()
    }
}

impl From<alloc::collections::TryReserveError> for Error {
    fn from(_: alloc::collections::TryReserveError) -> Error {
        ErrorKind::AllocationFailure.into()
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ErrorKind {}

/// Error type.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Operation failed due to previous error
    Failed,

    /// Declared length runs past the end of the available input
    Truncated,

    /// Input violates the encoding grammar (or the structure it must follow)
    Malformed,

    /// Unexpected tag
    UnexpectedTag {
        /// Tag the decoder was expecting (if there is a single such tag).
        ///
        /// `None` if multiple tags are expected/allowed, but the `actual` tag
        /// does not match any of them.
        expected: Option<Tag>,

        /// Actual tag encountered in the message
        actual: Tag,
    },

    /// Leading tag of a CHOICE matches none of its alternatives
    UnknownChoiceTag {
        /// Actual tag encountered in the message
        actual: Tag,
    },

    /// A length or tag number does not fit the supported range
    LengthOverflow,

    /// Nesting went deeper than the configured bound
    DepthExceeded {
        /// The configured bound
        limit: usize,
    },

    /// Memory for the result could not be reserved
    AllocationFailure,

    /// Encoded message does not fit into the output buffer
    Overlength,

    /// Encoded message is shorter than the expected length
    /// (i.e. an `Encodable` impl on a particular type has a buggy `encoded_length`)
    Underlength {
        /// Expected length
        expected: Length,

        /// Actual length
        actual: Length,
    },
}

impl ErrorKind {
    /// Annotate an [`ErrorKind`] with context about where it occurred,
    /// returning an error.
    pub fn at(self, position: Length) -> Error {
        Error::new(self, position)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Failed => write!(f, "operation failed"),
            ErrorKind::Truncated => write!(f, "ASN.1 message is truncated"),
            ErrorKind::Malformed => write!(f, "malformed ASN.1 encoding"),
            ErrorKind::UnexpectedTag { expected, actual } => {
                write!(f, "unexpected ASN.1 tag: ")?;

                if let Some(tag) = expected {
                    write!(f, "expected {}, ", tag)?;
                }

                write!(f, "got {}", actual)
            }
            ErrorKind::UnknownChoiceTag { actual } => {
                write!(f, "no CHOICE alternative for {}", actual)
            }
            ErrorKind::LengthOverflow => write!(f, "length greater than supported maximum"),
            ErrorKind::DepthExceeded { limit } => {
                write!(f, "nesting deeper than {} levels", limit)
            }
            ErrorKind::AllocationFailure => write!(f, "allocation failed"),
            ErrorKind::Overlength => write!(f, "output buffer too small"),
            ErrorKind::Underlength { expected, actual } => write!(
                f,
                "encoding too short: expected {}, got {}",
                expected, actual
            ),
        }
    }
}
