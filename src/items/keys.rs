//! Public keys and elliptic curve domain parameters.

use super::{ANY, BIT_STRING, INTEGER, NULL, OBJECT_IDENTIFIER, OCTET_STRING};
use crate::{Field, Item, Primitive};

static RSA_PUBLIC_KEY_FIELDS: [Field; 2] = [
    Field::new("modulus", &INTEGER),
    Field::new("publicExponent", &INTEGER),
];
pub static RSA_PUBLIC_KEY: Item = Item::sequence("RSAPublicKey", &RSA_PUBLIC_KEY_FIELDS);

/// The public value `y`.
pub static DSA_PUBLIC_KEY: Item = Item::primitive("DSAPublicKey", Primitive::Integer);

static FIELD_ID_FIELDS: [Field; 2] = [
    Field::new("fieldType", &OBJECT_IDENTIFIER),
    Field::new("parameters", &ANY),
];
pub static FIELD_ID: Item = Item::sequence("FieldID", &FIELD_ID_FIELDS);

static CURVE_FIELDS: [Field; 3] = [
    Field::new("a", &OCTET_STRING),
    Field::new("b", &OCTET_STRING),
    Field::new("seed", &BIT_STRING).optional(),
];
pub static CURVE: Item = Item::sequence("Curve", &CURVE_FIELDS);

static EC_PARAMETERS_FIELDS: [Field; 6] = [
    Field::new("version", &INTEGER),
    Field::new("fieldID", &FIELD_ID),
    Field::new("curve", &CURVE),
    Field::new("base", &OCTET_STRING),
    Field::new("order", &INTEGER),
    Field::new("cofactor", &INTEGER).optional(),
];
pub static EC_PARAMETERS: Item = Item::sequence("ECParameters", &EC_PARAMETERS_FIELDS);

static ECPK_PARAMETERS_ALTERNATIVES: [Field; 3] = [
    Field::new("namedCurve", &OBJECT_IDENTIFIER),
    Field::new("implicitlyCA", &NULL),
    Field::new("specifiedCurve", &EC_PARAMETERS),
];
pub static ECPK_PARAMETERS: Item = Item::choice("ECPKParameters", &ECPK_PARAMETERS_ALTERNATIVES);
