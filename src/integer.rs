//! INTEGER and ENUMERATED contents: two's complement, big endian, minimal.

use crate::{ErrorKind, Result, Rules};
use alloc::vec::Vec;
use num_bigint::BigInt;

/// Is the leading byte redundant sign extension of the next one?
fn is_padded(bytes: &[u8]) -> bool {
    match bytes {
        [0x00, next, ..] => next & 0x80 == 0,
        [0xFF, next, ..] => next & 0x80 != 0,
        _ => false,
    }
}

pub(crate) fn decode(bytes: &[u8], rules: Rules) -> Result<BigInt> {
    if bytes.is_empty() {
        return Err(ErrorKind::Malformed.into());
    }
    if is_padded(bytes) {
        match rules {
            Rules::Der => return Err(ErrorKind::Malformed.into()),
            Rules::Ber => {
                info_now!("accepting non-minimal INTEGER");
            }
        }
    }
    Ok(BigInt::from_signed_bytes_be(bytes))
}

pub(crate) fn encode(value: &BigInt) -> Vec<u8> {
    let mut bytes = value.to_signed_bytes_be();
    let redundant = bytes
        .windows(2)
        .take_while(|pair| is_padded(pair))
        .count();
    bytes.drain(..redundant);
    bytes
}
