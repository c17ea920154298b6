//! OCSP responses.

use super::{
    x509::{ALGORITHM_IDENTIFIER, CERTIFICATE, EXTENSIONS, NAME},
    BIT_STRING, ENUMERATED, GENERALIZED_TIME, INTEGER, NULL, OBJECT_IDENTIFIER, OCTET_STRING,
};
use crate::{Field, Item};

static CERT_ID_FIELDS: [Field; 4] = [
    Field::new("hashAlgorithm", &ALGORITHM_IDENTIFIER),
    Field::new("issuerNameHash", &OCTET_STRING),
    Field::new("issuerKeyHash", &OCTET_STRING),
    Field::new("serialNumber", &INTEGER),
];
pub static CERT_ID: Item = Item::sequence("CertID", &CERT_ID_FIELDS);

static REVOKED_INFO_FIELDS: [Field; 2] = [
    Field::new("revocationTime", &GENERALIZED_TIME),
    Field::new("revocationReason", &ENUMERATED).explicit(0).optional(),
];
pub static REVOKED_INFO: Item = Item::sequence("RevokedInfo", &REVOKED_INFO_FIELDS);

static CERT_STATUS_ALTERNATIVES: [Field; 3] = [
    Field::new("good", &NULL).implicit(0),
    Field::new("revoked", &REVOKED_INFO).implicit(1),
    Field::new("unknown", &NULL).implicit(2),
];
pub static CERT_STATUS: Item = Item::choice("CertStatus", &CERT_STATUS_ALTERNATIVES);

static SINGLE_RESPONSE_FIELDS: [Field; 5] = [
    Field::new("certID", &CERT_ID),
    Field::new("certStatus", &CERT_STATUS),
    Field::new("thisUpdate", &GENERALIZED_TIME),
    Field::new("nextUpdate", &GENERALIZED_TIME).explicit(0).optional(),
    Field::new("singleExtensions", &EXTENSIONS).explicit(1).optional(),
];
pub static SINGLE_RESPONSE: Item = Item::sequence("SingleResponse", &SINGLE_RESPONSE_FIELDS);
static SINGLE_RESPONSES: Item = Item::sequence_of("SingleResponses", &SINGLE_RESPONSE);

static RESPONDER_ID_ALTERNATIVES: [Field; 2] = [
    Field::new("byName", &NAME).explicit(1),
    Field::new("byKey", &OCTET_STRING).explicit(2),
];
pub static RESPONDER_ID: Item = Item::choice("ResponderID", &RESPONDER_ID_ALTERNATIVES);

static RESPONSE_DATA_FIELDS: [Field; 5] = [
    Field::new("version", &INTEGER).explicit(0).default_integer(0),
    Field::new("responderID", &RESPONDER_ID),
    Field::new("producedAt", &GENERALIZED_TIME),
    Field::new("responses", &SINGLE_RESPONSES),
    Field::new("responseExtensions", &EXTENSIONS).explicit(1).optional(),
];
pub static RESPONSE_DATA: Item = Item::sequence("ResponseData", &RESPONSE_DATA_FIELDS);

static CERTS: Item = Item::sequence_of("Certificates", &CERTIFICATE);

static BASIC_OCSP_RESPONSE_FIELDS: [Field; 4] = [
    Field::new("tbsResponseData", &RESPONSE_DATA),
    Field::new("signatureAlgorithm", &ALGORITHM_IDENTIFIER),
    Field::new("signature", &BIT_STRING),
    Field::new("certs", &CERTS).explicit(0).optional(),
];
pub static BASIC_OCSP_RESPONSE: Item = Item::sequence("BasicOCSPResponse", &BASIC_OCSP_RESPONSE_FIELDS);

static RESPONSE_BYTES_FIELDS: [Field; 2] = [
    Field::new("responseType", &OBJECT_IDENTIFIER),
    Field::new("response", &OCTET_STRING),
];
pub static RESPONSE_BYTES: Item = Item::sequence("ResponseBytes", &RESPONSE_BYTES_FIELDS);

static OCSP_RESPONSE_FIELDS: [Field; 2] = [
    Field::new("responseStatus", &ENUMERATED),
    Field::new("responseBytes", &RESPONSE_BYTES).explicit(0).optional(),
];
pub static OCSP_RESPONSE: Item = Item::sequence("OCSPResponse", &OCSP_RESPONSE_FIELDS);
