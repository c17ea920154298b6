//! The descriptor-driven interpreter.
//!
//! One generic recursive walk per direction turns bytes into an [`Object`]
//! shaped after an [`Item`], and back into canonical DER.

mod decode;
mod encode;

use crate::{items, Encoder, ErrorKind, Item, Object, Options, Result};
use alloc::vec::Vec;

/// Decode one complete element described by `item`.
///
/// The input must hold exactly that element.
pub fn decode(item: &'static Item, bytes: &[u8], options: Options) -> Result<Object> {
    info_now!("decoding {} from {} bytes", item.name, bytes.len());
    decode::Reader::new(options).decode(item, bytes)
}

/// Decode against the registered item called `name`.
pub fn decode_by_name(name: &str, bytes: &[u8], options: Options) -> Result<Object> {
    let item = items::lookup(name).ok_or(ErrorKind::Malformed)?;
    decode(item, bytes, options)
}

/// Encode `object` as canonical DER according to `item`.
pub fn encode(item: &'static Item, object: &Object, options: Options) -> Result<Vec<u8>> {
    encode::Writer::new(options).encode(item, object, None)
}

/// Encode into a caller-provided buffer, returning the written prefix.
pub fn encode_to_slice<'a>(
    item: &'static Item,
    object: &Object,
    options: Options,
    buf: &'a mut [u8],
) -> Result<&'a [u8]> {
    let bytes = encode(item, object, options)?;
    let mut encoder = Encoder::new(buf);
    encoder.bytes(&bytes)?;
    encoder.finish()
}
