//! # itember
//!
//! Descriptor-driven decoding and encoding of ASN.1 BER/DER.
//!
//! Every structure is described once by a static [`Item`]: a primitive
//! leaf, a SEQUENCE of [`Field`]s, a CHOICE between alternatives, or a
//! SEQUENCE OF / SET OF one element type. A single interpreter walks these
//! descriptors to turn untrusted bytes into an [`Object`] tree and to turn
//! object trees back into canonical DER.
//!
//! - Decoding holds the input to [`Rules::Der`] by default. [`Rules::Ber`]
//!   additionally accepts indefinite lengths and the usual non-canonical
//!   forms. Encoding always produces DER.
//! - Nesting is bounded by [`Options::max_depth`], so adversarial input
//!   cannot exhaust the stack.
//! - Failures report one [`ErrorKind`] with the byte offset where decoding
//!   stopped. No partially decoded object is ever returned.
//!
//! ```
//! use itember::{items::x509, template, Options, Value};
//! use hex_literal::hex;
//!
//! let der = hex!("30 06 01 01 FF 02 01 00");
//! let constraints = template::decode(&x509::BASIC_CONSTRAINTS, &der, Options::der()).unwrap();
//! let ca = constraints.field_named(&x509::BASIC_CONSTRAINTS, "cA").and_then(|ca| ca.value());
//! assert_eq!(ca.and_then(Value::as_bool), Some(true));
//!
//! let encoded = template::encode(&x509::BASIC_CONSTRAINTS, &constraints, Options::der()).unwrap();
//! assert_eq!(encoded, der);
//! ```
//!
//! ## Origin
//! The TLV layer is a remix of `flexiber`, itself derived from
//! `RustCrypto/utils/der`: a tainting [`Decoder`] cursor, a slice
//! [`Encoder`] and the [`Decodable`]/[`Encodable`] traits.

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

delog::generate_macros!();

mod any;
mod bit_string;
mod decoder;
pub mod dispatch;
mod encoder;
mod error;
mod header;
mod integer;
mod item;
pub mod items;
mod length;
pub mod lifecycle;
mod object;
mod oid;
mod options;
mod primitive;
mod tag;
pub mod template;
mod time;
mod traits;

pub use any::Any;
pub use bit_string::BitString;
pub use decoder::Decoder;
pub use dispatch::{decode_public_key, decode_public_key_into, KeyType, PublicKey};
pub use encoder::Encoder;
pub use error::{Error, ErrorKind, Result};
pub use header::{decode_header, Header};
pub use item::{DefaultValue, Field, Item, ItemKind, Mode, Tagging};
pub use length::{ContentLength, Length};
pub use lifecycle::{allocate, conforms, deep_copy, free};
pub use object::{Object, Typed};
pub use oid::{Arcs, ObjectIdentifier};
pub use options::{Options, Rules, DEFAULT_MAX_DEPTH};
pub use primitive::{Primitive, Value};
pub use tag::{Class, Tag};
pub use template::{decode, encode};
pub use time::Time;
pub use traits::{Decodable, Encodable};
