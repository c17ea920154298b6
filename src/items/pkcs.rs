//! PKCS #7 signed data, PKCS #12 containers and the time-stamp message imprint.

use super::{
    x509::{ALGORITHM_IDENTIFIER, CERTIFICATE, CERTIFICATE_LIST, NAME},
    ANY, INTEGER, OBJECT_IDENTIFIER, OCTET_STRING, SET_OF_ANY,
};
use crate::{Field, Item};

static CONTENT_INFO_FIELDS: [Field; 2] = [
    Field::new("contentType", &OBJECT_IDENTIFIER),
    Field::new("content", &ANY).explicit(0).optional(),
];
pub static CONTENT_INFO: Item = Item::sequence("ContentInfo", &CONTENT_INFO_FIELDS);

static DIGEST_INFO_FIELDS: [Field; 2] = [
    Field::new("digestAlgorithm", &ALGORITHM_IDENTIFIER),
    Field::new("digest", &OCTET_STRING),
];
pub static DIGEST_INFO: Item = Item::sequence("DigestInfo", &DIGEST_INFO_FIELDS);

static ATTRIBUTE_FIELDS: [Field; 2] = [
    Field::new("type", &OBJECT_IDENTIFIER),
    Field::new("values", &SET_OF_ANY),
];
pub static ATTRIBUTE: Item = Item::sequence("Attribute", &ATTRIBUTE_FIELDS);
static ATTRIBUTES: Item = Item::set_of("Attributes", &ATTRIBUTE);

static ISSUER_AND_SERIAL_NUMBER_FIELDS: [Field; 2] = [
    Field::new("issuer", &NAME),
    Field::new("serialNumber", &INTEGER),
];
pub static ISSUER_AND_SERIAL_NUMBER: Item =
    Item::sequence("IssuerAndSerialNumber", &ISSUER_AND_SERIAL_NUMBER_FIELDS);

static SIGNER_INFO_FIELDS: [Field; 7] = [
    Field::new("version", &INTEGER),
    Field::new("issuerAndSerialNumber", &ISSUER_AND_SERIAL_NUMBER),
    Field::new("digestAlgorithm", &ALGORITHM_IDENTIFIER),
    Field::new("authenticatedAttributes", &ATTRIBUTES).implicit(0).optional(),
    Field::new("digestEncryptionAlgorithm", &ALGORITHM_IDENTIFIER),
    Field::new("encryptedDigest", &OCTET_STRING),
    Field::new("unauthenticatedAttributes", &ATTRIBUTES).implicit(1).optional(),
];
pub static SIGNER_INFO: Item = Item::sequence("SignerInfo", &SIGNER_INFO_FIELDS);

static DIGEST_ALGORITHMS: Item = Item::set_of("DigestAlgorithmIdentifiers", &ALGORITHM_IDENTIFIER);
static CERTIFICATES: Item = Item::set_of("ExtendedCertificatesAndCertificates", &CERTIFICATE);
static CRLS: Item = Item::set_of("CertificateRevocationLists", &CERTIFICATE_LIST);
static SIGNER_INFOS: Item = Item::set_of("SignerInfos", &SIGNER_INFO);

static SIGNED_DATA_FIELDS: [Field; 6] = [
    Field::new("version", &INTEGER),
    Field::new("digestAlgorithms", &DIGEST_ALGORITHMS),
    Field::new("contentInfo", &CONTENT_INFO),
    Field::new("certificates", &CERTIFICATES).implicit(0).optional(),
    Field::new("crls", &CRLS).implicit(1).optional(),
    Field::new("signerInfos", &SIGNER_INFOS),
];
pub static SIGNED_DATA: Item = Item::sequence("SignedData", &SIGNED_DATA_FIELDS);

static MAC_DATA_FIELDS: [Field; 3] = [
    Field::new("mac", &DIGEST_INFO),
    Field::new("macSalt", &OCTET_STRING),
    Field::new("iterations", &INTEGER).default_integer(1),
];
pub static MAC_DATA: Item = Item::sequence("MacData", &MAC_DATA_FIELDS);

static PFX_FIELDS: [Field; 3] = [
    Field::new("version", &INTEGER),
    Field::new("authSafe", &CONTENT_INFO),
    Field::new("macData", &MAC_DATA).optional(),
];
pub static PFX: Item = Item::sequence("PFX", &PFX_FIELDS);

pub static AUTHENTICATED_SAFE: Item = Item::sequence_of("AuthenticatedSafe", &CONTENT_INFO);

static SAFE_BAG_FIELDS: [Field; 3] = [
    Field::new("bagId", &OBJECT_IDENTIFIER),
    Field::new("bagValue", &ANY).explicit(0),
    Field::new("bagAttributes", &ATTRIBUTES).optional(),
];
pub static SAFE_BAG: Item = Item::sequence("SafeBag", &SAFE_BAG_FIELDS);
pub static SAFE_CONTENTS: Item = Item::sequence_of("SafeContents", &SAFE_BAG);

static MESSAGE_IMPRINT_FIELDS: [Field; 2] = [
    Field::new("hashAlgorithm", &ALGORITHM_IDENTIFIER),
    Field::new("hashedMessage", &OCTET_STRING),
];
pub static MESSAGE_IMPRINT: Item = Item::sequence("MessageImprint", &MESSAGE_IMPRINT_FIELDS);
