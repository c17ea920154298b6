//! Certificates, CRLs and the extensions they commonly carry.

use super::{
    ANY, BIT_STRING, BMP_STRING, BOOLEAN, GENERALIZED_TIME, IA5_STRING, INTEGER, OBJECT_IDENTIFIER,
    OCTET_STRING, PRINTABLE_STRING, SEQUENCE_OF_ANY, UTC_TIME, UTF8_STRING,
};
use crate::{Field, Item};

static ALGORITHM_IDENTIFIER_FIELDS: [Field; 2] = [
    Field::new("algorithm", &OBJECT_IDENTIFIER),
    Field::new("parameters", &ANY).optional(),
];
pub static ALGORITHM_IDENTIFIER: Item = Item::sequence("AlgorithmIdentifier", &ALGORITHM_IDENTIFIER_FIELDS);

static ATTRIBUTE_TYPE_AND_VALUE_FIELDS: [Field; 2] =
    [Field::new("type", &OBJECT_IDENTIFIER), Field::new("value", &ANY)];
pub static ATTRIBUTE_TYPE_AND_VALUE: Item =
    Item::sequence("AttributeTypeAndValue", &ATTRIBUTE_TYPE_AND_VALUE_FIELDS);
pub static RELATIVE_DISTINGUISHED_NAME: Item =
    Item::set_of("RelativeDistinguishedName", &ATTRIBUTE_TYPE_AND_VALUE);
/// The `rdnSequence` form, the only one there is.
pub static NAME: Item = Item::sequence_of("Name", &RELATIVE_DISTINGUISHED_NAME);

static TIME_ALTERNATIVES: [Field; 2] =
    [Field::new("utcTime", &UTC_TIME), Field::new("generalTime", &GENERALIZED_TIME)];
pub static TIME: Item = Item::choice("Time", &TIME_ALTERNATIVES);

static VALIDITY_FIELDS: [Field; 2] = [Field::new("notBefore", &TIME), Field::new("notAfter", &TIME)];
pub static VALIDITY: Item = Item::sequence("Validity", &VALIDITY_FIELDS);

static SUBJECT_PUBLIC_KEY_INFO_FIELDS: [Field; 2] = [
    Field::new("algorithm", &ALGORITHM_IDENTIFIER),
    Field::new("subjectPublicKey", &BIT_STRING),
];
pub static SUBJECT_PUBLIC_KEY_INFO: Item =
    Item::sequence("SubjectPublicKeyInfo", &SUBJECT_PUBLIC_KEY_INFO_FIELDS);

static EXTENSION_FIELDS: [Field; 3] = [
    Field::new("extnID", &OBJECT_IDENTIFIER),
    Field::new("critical", &BOOLEAN).default_boolean(false),
    Field::new("extnValue", &OCTET_STRING),
];
pub static EXTENSION: Item = Item::sequence("Extension", &EXTENSION_FIELDS);
pub static EXTENSIONS: Item = Item::sequence_of("Extensions", &EXTENSION);

static TBS_CERTIFICATE_FIELDS: [Field; 10] = [
    Field::new("version", &INTEGER).explicit(0).default_integer(0),
    Field::new("serialNumber", &INTEGER),
    Field::new("signature", &ALGORITHM_IDENTIFIER),
    Field::new("issuer", &NAME),
    Field::new("validity", &VALIDITY),
    Field::new("subject", &NAME),
    Field::new("subjectPublicKeyInfo", &SUBJECT_PUBLIC_KEY_INFO),
    Field::new("issuerUniqueID", &BIT_STRING).implicit(1).optional(),
    Field::new("subjectUniqueID", &BIT_STRING).implicit(2).optional(),
    Field::new("extensions", &EXTENSIONS).explicit(3).optional(),
];
pub static TBS_CERTIFICATE: Item = Item::sequence("TBSCertificate", &TBS_CERTIFICATE_FIELDS);

static CERTIFICATE_FIELDS: [Field; 3] = [
    Field::new("tbsCertificate", &TBS_CERTIFICATE),
    Field::new("signatureAlgorithm", &ALGORITHM_IDENTIFIER),
    Field::new("signatureValue", &BIT_STRING),
];
pub static CERTIFICATE: Item = Item::sequence("Certificate", &CERTIFICATE_FIELDS);

static REVOKED_CERTIFICATE_FIELDS: [Field; 3] = [
    Field::new("userCertificate", &INTEGER),
    Field::new("revocationDate", &TIME),
    Field::new("crlEntryExtensions", &EXTENSIONS).optional(),
];
pub static REVOKED_CERTIFICATE: Item = Item::sequence("RevokedCertificate", &REVOKED_CERTIFICATE_FIELDS);
static REVOKED_CERTIFICATES: Item = Item::sequence_of("RevokedCertificates", &REVOKED_CERTIFICATE);

static TBS_CERT_LIST_FIELDS: [Field; 7] = [
    Field::new("version", &INTEGER).optional(),
    Field::new("signature", &ALGORITHM_IDENTIFIER),
    Field::new("issuer", &NAME),
    Field::new("thisUpdate", &TIME),
    Field::new("nextUpdate", &TIME).optional(),
    Field::new("revokedCertificates", &REVOKED_CERTIFICATES).optional(),
    Field::new("crlExtensions", &EXTENSIONS).explicit(0).optional(),
];
pub static TBS_CERT_LIST: Item = Item::sequence("TBSCertList", &TBS_CERT_LIST_FIELDS);

static CERTIFICATE_LIST_FIELDS: [Field; 3] = [
    Field::new("tbsCertList", &TBS_CERT_LIST),
    Field::new("signatureAlgorithm", &ALGORITHM_IDENTIFIER),
    Field::new("signatureValue", &BIT_STRING),
];
pub static CERTIFICATE_LIST: Item = Item::sequence("CertificateList", &CERTIFICATE_LIST_FIELDS);

static DIRECTORY_STRING_ALTERNATIVES: [Field; 3] = [
    Field::new("printableString", &PRINTABLE_STRING),
    Field::new("utf8String", &UTF8_STRING),
    Field::new("bmpString", &BMP_STRING),
];
pub static DIRECTORY_STRING: Item = Item::choice("DirectoryString", &DIRECTORY_STRING_ALTERNATIVES);

static OTHER_NAME_FIELDS: [Field; 2] = [
    Field::new("type-id", &OBJECT_IDENTIFIER),
    Field::new("value", &ANY).explicit(0),
];
pub static OTHER_NAME: Item = Item::sequence("OtherName", &OTHER_NAME_FIELDS);

static EDI_PARTY_NAME_FIELDS: [Field; 2] = [
    Field::new("nameAssigner", &DIRECTORY_STRING).implicit(0).optional(),
    Field::new("partyName", &DIRECTORY_STRING).implicit(1),
];
pub static EDI_PARTY_NAME: Item = Item::sequence("EDIPartyName", &EDI_PARTY_NAME_FIELDS);

static GENERAL_NAME_ALTERNATIVES: [Field; 9] = [
    Field::new("otherName", &OTHER_NAME).implicit(0),
    Field::new("rfc822Name", &IA5_STRING).implicit(1),
    Field::new("dNSName", &IA5_STRING).implicit(2),
    Field::new("x400Address", &SEQUENCE_OF_ANY).implicit(3),
    Field::new("directoryName", &NAME).explicit(4),
    Field::new("ediPartyName", &EDI_PARTY_NAME).implicit(5),
    Field::new("uniformResourceIdentifier", &IA5_STRING).implicit(6),
    Field::new("iPAddress", &OCTET_STRING).implicit(7),
    Field::new("registeredID", &OBJECT_IDENTIFIER).implicit(8),
];
pub static GENERAL_NAME: Item = Item::choice("GeneralName", &GENERAL_NAME_ALTERNATIVES);
pub static GENERAL_NAMES: Item = Item::sequence_of("GeneralNames", &GENERAL_NAME);

static GENERAL_SUBTREE_FIELDS: [Field; 3] = [
    Field::new("base", &GENERAL_NAME),
    Field::new("minimum", &INTEGER).implicit(0).default_integer(0),
    Field::new("maximum", &INTEGER).implicit(1).optional(),
];
pub static GENERAL_SUBTREE: Item = Item::sequence("GeneralSubtree", &GENERAL_SUBTREE_FIELDS);
pub static GENERAL_SUBTREES: Item = Item::sequence_of("GeneralSubtrees", &GENERAL_SUBTREE);

static NAME_CONSTRAINTS_FIELDS: [Field; 2] = [
    Field::new("permittedSubtrees", &GENERAL_SUBTREES).implicit(0).optional(),
    Field::new("excludedSubtrees", &GENERAL_SUBTREES).implicit(1).optional(),
];
pub static NAME_CONSTRAINTS: Item = Item::sequence("NameConstraints", &NAME_CONSTRAINTS_FIELDS);

static ACCESS_DESCRIPTION_FIELDS: [Field; 2] = [
    Field::new("accessMethod", &OBJECT_IDENTIFIER),
    Field::new("accessLocation", &GENERAL_NAME),
];
pub static ACCESS_DESCRIPTION: Item = Item::sequence("AccessDescription", &ACCESS_DESCRIPTION_FIELDS);
pub static AUTHORITY_INFO_ACCESS: Item = Item::sequence_of("AuthorityInfoAccessSyntax", &ACCESS_DESCRIPTION);

static BASIC_CONSTRAINTS_FIELDS: [Field; 2] = [
    Field::new("cA", &BOOLEAN).default_boolean(false),
    Field::new("pathLenConstraint", &INTEGER).optional(),
];
pub static BASIC_CONSTRAINTS: Item = Item::sequence("BasicConstraints", &BASIC_CONSTRAINTS_FIELDS);

static POLICY_CONSTRAINTS_FIELDS: [Field; 2] = [
    Field::new("requireExplicitPolicy", &INTEGER).implicit(0).optional(),
    Field::new("inhibitPolicyMapping", &INTEGER).implicit(1).optional(),
];
pub static POLICY_CONSTRAINTS: Item = Item::sequence("PolicyConstraints", &POLICY_CONSTRAINTS_FIELDS);

static POLICY_MAPPING_FIELDS: [Field; 2] = [
    Field::new("issuerDomainPolicy", &OBJECT_IDENTIFIER),
    Field::new("subjectDomainPolicy", &OBJECT_IDENTIFIER),
];
pub static POLICY_MAPPING: Item = Item::sequence("PolicyMapping", &POLICY_MAPPING_FIELDS);
pub static POLICY_MAPPINGS: Item = Item::sequence_of("PolicyMappings", &POLICY_MAPPING);
