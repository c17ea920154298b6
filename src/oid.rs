//! OBJECT IDENTIFIER values.

use crate::{Error, ErrorKind, Result};
use alloc::vec::Vec;
use core::{fmt, str::FromStr};

const CONTINUATION: u8 = 0x80;

/// A validated OBJECT IDENTIFIER, kept as its DER content octets.
///
/// Every sub-identifier is minimally encoded base-128 and fits a `u128`.
#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ObjectIdentifier {
    bytes: Vec<u8>,
}

/// Decode the sub-identifier starting at the front of `bytes`, returning it
/// with the number of octets it used.
fn sub_identifier(bytes: &[u8]) -> Result<(u128, usize)> {
    if bytes.first() == Some(&CONTINUATION) {
        return Err(ErrorKind::Malformed.into());
    }
    let mut value = 0u128;
    for (i, byte) in bytes.iter().enumerate() {
        if value.leading_zeros() < 7 {
            return Err(ErrorKind::Malformed.into());
        }
        value = (value << 7) | u128::from(byte & !CONTINUATION);
        if byte & CONTINUATION == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(ErrorKind::Malformed.into())
}

fn push_sub_identifier(out: &mut Vec<u8>, value: u128) {
    let octets = ((128 - value.leading_zeros()).max(1) + 6) / 7;
    for i in (0..octets).rev() {
        let limb = ((value >> (7 * i)) & 0x7F) as u8;
        out.push(if i == 0 { limb } else { limb | CONTINUATION });
    }
}

impl ObjectIdentifier {
    /// Validate DER content octets.
    pub fn from_der_content(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(ErrorKind::Malformed.into());
        }
        let mut rest = bytes;
        while !rest.is_empty() {
            let (_, used) = sub_identifier(rest)?;
            rest = &rest[used..];
        }
        let mut owned = Vec::new();
        owned.try_reserve(bytes.len())?;
        owned.extend_from_slice(bytes);
        Ok(Self { bytes: owned })
    }

    /// Build from arcs, e.g. `&[1, 2, 840, 113549]`.
    pub fn from_arcs(arcs: &[u128]) -> Result<Self> {
        let (first, second, rest) = match arcs {
            [first, second, rest @ ..] => (*first, *second, rest),
            _ => return Err(ErrorKind::Malformed.into()),
        };
        if first > 2 || (first < 2 && second >= 40) {
            return Err(ErrorKind::Malformed.into());
        }
        let leading = second
            .checked_add(first * 40)
            .ok_or(ErrorKind::Malformed)?;
        let mut bytes = Vec::new();
        push_sub_identifier(&mut bytes, leading);
        for arc in rest {
            push_sub_identifier(&mut bytes, *arc);
        }
        Ok(Self { bytes })
    }

    /// `0.0`, the placeholder a freshly allocated object carries.
    pub fn null_arc() -> Self {
        Self { bytes: alloc::vec![0x00] }
    }

    /// DER content octets.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The arcs, with the leading sub-identifier split into the first two.
    pub fn arcs(&self) -> Arcs<'_> {
        Arcs { rest: &self.bytes, started: false, pending: None }
    }

    /// Is this the identifier with the given DER content octets?
    pub fn is(&self, der_content: &[u8]) -> bool {
        self.bytes == der_content
    }
}

/// Iterator over the arcs of an [`ObjectIdentifier`].
#[derive(Clone, Debug)]
pub struct Arcs<'a> {
    rest: &'a [u8],
    started: bool,
    pending: Option<u128>,
}

impl Iterator for Arcs<'_> {
    type Item = u128;

    fn next(&mut self) -> Option<u128> {
        if let Some(second) = self.pending.take() {
            return Some(second);
        }
        if self.rest.is_empty() {
            return None;
        }
        let (value, used) = sub_identifier(self.rest).ok()?;
        self.rest = &self.rest[used..];
        if self.started {
            return Some(value);
        }
        self.started = true;
        let (first, second) = match value {
            0..=39 => (0, value),
            40..=79 => (1, value - 40),
            _ => (2, value - 80),
        };
        self.pending = Some(second);
        Some(first)
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arc) in self.arcs().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", arc)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectIdentifier({})", self)
    }
}

impl FromStr for ObjectIdentifier {
    type Err = Error;

    fn from_str(dotted: &str) -> Result<Self> {
        let mut arcs = Vec::new();
        for part in dotted.split('.') {
            arcs.push(part.parse::<u128>().map_err(|_| ErrorKind::Malformed)?);
        }
        Self::from_arcs(&arcs)
    }
}

#[cfg(test)]
mod tests {
    use super::ObjectIdentifier;
    use crate::ErrorKind;
    use alloc::{string::ToString, vec::Vec};
    use hex_literal::hex;

    #[test]
    fn dotted_round_trip() {
        let oid: ObjectIdentifier = "1.2.840.113549.1.1.11".parse().unwrap();
        assert_eq!(oid.as_bytes(), &hex!("2A 86 48 86 F7 0D 01 01 0B"));
        assert_eq!(oid.to_string(), "1.2.840.113549.1.1.11");

        let oid = ObjectIdentifier::from_der_content(&hex!("88 37 03")).unwrap();
        assert_eq!(oid.arcs().collect::<Vec<_>>(), [2, 999, 3]);
        assert_eq!(oid, ObjectIdentifier::from_arcs(&[2, 999, 3]).unwrap());
    }

    #[test]
    fn rejects_bad_encodings() {
        for bad in [&[][..], &hex!("2A 80 01"), &hex!("2A 86")] {
            assert_eq!(
                ObjectIdentifier::from_der_content(bad).unwrap_err().kind(),
                ErrorKind::Malformed
            );
        }
        assert!(ObjectIdentifier::from_arcs(&[3, 1]).is_err());
        assert!(ObjectIdentifier::from_arcs(&[1, 40]).is_err());
        assert!("1".parse::<ObjectIdentifier>().is_err());
        assert!("1.2.x".parse::<ObjectIdentifier>().is_err());
    }

    #[test]
    fn uuid_sized_arcs() {
        let arc = u128::MAX;
        let oid = ObjectIdentifier::from_arcs(&[2, 25, arc]).unwrap();
        assert_eq!(oid.arcs().last(), Some(arc));
        assert_eq!(ObjectIdentifier::from_der_content(oid.as_bytes()).unwrap(), oid);
    }
}
