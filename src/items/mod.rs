//! Registered descriptors.
//!
//! Universal types live here, structures in the submodules. Every item has
//! a unique name by which [`lookup`] finds it.

pub mod keys;
pub mod ocsp;
pub mod pkcs;
pub mod x509;

use crate::{Item, Primitive};

pub static BOOLEAN: Item = Item::primitive("BOOLEAN", Primitive::Boolean);
pub static INTEGER: Item = Item::primitive("INTEGER", Primitive::Integer);
pub static ENUMERATED: Item = Item::primitive("ENUMERATED", Primitive::Enumerated);
pub static BIT_STRING: Item = Item::primitive("BIT STRING", Primitive::BitString);
pub static OCTET_STRING: Item = Item::primitive("OCTET STRING", Primitive::OctetString);
pub static NULL: Item = Item::primitive("NULL", Primitive::Null);
pub static OBJECT_IDENTIFIER: Item = Item::primitive("OBJECT IDENTIFIER", Primitive::ObjectIdentifier);
pub static UTC_TIME: Item = Item::primitive("UTCTime", Primitive::UtcTime);
pub static GENERALIZED_TIME: Item = Item::primitive("GeneralizedTime", Primitive::GeneralizedTime);
pub static UTF8_STRING: Item = Item::primitive("UTF8String", Primitive::Utf8String);
pub static PRINTABLE_STRING: Item = Item::primitive("PrintableString", Primitive::PrintableString);
pub static IA5_STRING: Item = Item::primitive("IA5String", Primitive::Ia5String);
pub static VISIBLE_STRING: Item = Item::primitive("VisibleString", Primitive::VisibleString);
pub static BMP_STRING: Item = Item::primitive("BMPString", Primitive::BmpString);
pub static ANY: Item = Item::primitive("ANY", Primitive::Any);

pub static SEQUENCE_OF_ANY: Item = Item::sequence_of("SEQUENCE OF ANY", &ANY);
pub static SET_OF_ANY: Item = Item::set_of("SET OF ANY", &ANY);

/// Items worth decoding on their own, e.g. by a fuzzer.
pub static TOP_LEVEL: &[&Item] = &[
    &SEQUENCE_OF_ANY,
    &INTEGER,
    &x509::AUTHORITY_INFO_ACCESS,
    &x509::BASIC_CONSTRAINTS,
    &x509::CERTIFICATE,
    &x509::CERTIFICATE_LIST,
    &x509::GENERAL_NAME,
    &x509::GENERAL_SUBTREE,
    &x509::NAME_CONSTRAINTS,
    &x509::POLICY_CONSTRAINTS,
    &x509::POLICY_MAPPINGS,
    &x509::SUBJECT_PUBLIC_KEY_INFO,
    &keys::RSA_PUBLIC_KEY,
    &keys::EC_PARAMETERS,
    &keys::ECPK_PARAMETERS,
    &pkcs::CONTENT_INFO,
    &pkcs::DIGEST_INFO,
    &pkcs::SIGNED_DATA,
    &pkcs::SIGNER_INFO,
    &pkcs::PFX,
    &pkcs::AUTHENTICATED_SAFE,
    &pkcs::SAFE_CONTENTS,
    &pkcs::MESSAGE_IMPRINT,
    &ocsp::BASIC_OCSP_RESPONSE,
    &ocsp::OCSP_RESPONSE,
];

static REGISTRY: &[&Item] = &[
    &BOOLEAN,
    &INTEGER,
    &ENUMERATED,
    &BIT_STRING,
    &OCTET_STRING,
    &NULL,
    &OBJECT_IDENTIFIER,
    &UTC_TIME,
    &GENERALIZED_TIME,
    &UTF8_STRING,
    &PRINTABLE_STRING,
    &IA5_STRING,
    &VISIBLE_STRING,
    &BMP_STRING,
    &ANY,
    &SEQUENCE_OF_ANY,
    &SET_OF_ANY,
    &x509::ALGORITHM_IDENTIFIER,
    &x509::ATTRIBUTE_TYPE_AND_VALUE,
    &x509::RELATIVE_DISTINGUISHED_NAME,
    &x509::NAME,
    &x509::TIME,
    &x509::VALIDITY,
    &x509::SUBJECT_PUBLIC_KEY_INFO,
    &x509::EXTENSION,
    &x509::EXTENSIONS,
    &x509::TBS_CERTIFICATE,
    &x509::CERTIFICATE,
    &x509::REVOKED_CERTIFICATE,
    &x509::TBS_CERT_LIST,
    &x509::CERTIFICATE_LIST,
    &x509::DIRECTORY_STRING,
    &x509::OTHER_NAME,
    &x509::EDI_PARTY_NAME,
    &x509::GENERAL_NAME,
    &x509::GENERAL_NAMES,
    &x509::GENERAL_SUBTREE,
    &x509::GENERAL_SUBTREES,
    &x509::NAME_CONSTRAINTS,
    &x509::ACCESS_DESCRIPTION,
    &x509::AUTHORITY_INFO_ACCESS,
    &x509::BASIC_CONSTRAINTS,
    &x509::POLICY_CONSTRAINTS,
    &x509::POLICY_MAPPING,
    &x509::POLICY_MAPPINGS,
    &keys::RSA_PUBLIC_KEY,
    &keys::DSA_PUBLIC_KEY,
    &keys::FIELD_ID,
    &keys::CURVE,
    &keys::EC_PARAMETERS,
    &keys::ECPK_PARAMETERS,
    &pkcs::CONTENT_INFO,
    &pkcs::DIGEST_INFO,
    &pkcs::ATTRIBUTE,
    &pkcs::ISSUER_AND_SERIAL_NUMBER,
    &pkcs::SIGNER_INFO,
    &pkcs::SIGNED_DATA,
    &pkcs::MAC_DATA,
    &pkcs::PFX,
    &pkcs::SAFE_BAG,
    &pkcs::SAFE_CONTENTS,
    &pkcs::AUTHENTICATED_SAFE,
    &pkcs::MESSAGE_IMPRINT,
    &ocsp::CERT_ID,
    &ocsp::REVOKED_INFO,
    &ocsp::CERT_STATUS,
    &ocsp::SINGLE_RESPONSE,
    &ocsp::RESPONDER_ID,
    &ocsp::RESPONSE_DATA,
    &ocsp::BASIC_OCSP_RESPONSE,
    &ocsp::RESPONSE_BYTES,
    &ocsp::OCSP_RESPONSE,
];

/// The registered item called `name`.
pub fn lookup(name: &str) -> Option<&'static Item> {
    REGISTRY.iter().copied().find(|item| item.name == name)
}
