//! Decodes arbitrary input as every registered item, under both rule sets.
//!
//! Decoding must never panic. Whatever decodes must re-encode as DER to at
//! most the input length, and that encoding must be a fixed point.

#![no_main]

use itember::{decode, encode, items, Options};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for &item in items::TOP_LEVEL {
        for options in [Options::der(), Options::ber()] {
            let object = match decode(item, data, options) {
                Ok(object) => object,
                Err(_) => continue,
            };
            let der = encode(item, &object, Options::der()).expect("decoded object re-encodes");
            assert!(der.len() <= data.len());

            let again = decode(item, &der, Options::der()).expect("canonical encoding decodes");
            assert_eq!(encode(item, &again, Options::der()).expect("re-encodes"), der);
        }
    }
});
