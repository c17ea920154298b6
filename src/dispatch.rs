//! Public key decoding keyed by algorithm.

use crate::{
    items::{keys, x509},
    template, Any, BitString, ErrorKind, Object, ObjectIdentifier, Options, Result, Value,
};
use alloc::vec::Vec;
use num_bigint::BigInt;

/// rsaEncryption, 1.2.840.113549.1.1.1
const RSA_ENCRYPTION: &[u8] = &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x01];
/// id-dsa, 1.2.840.10040.4.1
const ID_DSA: &[u8] = &[0x2A, 0x86, 0x48, 0xCE, 0x38, 0x04, 0x01];
/// id-ecPublicKey, 1.2.840.10045.2.1
const ID_EC_PUBLIC_KEY: &[u8] = &[0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x02, 0x01];

/// The closed set of public key algorithms.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum KeyType {
    Rsa,
    Dsa,
    Ec,
}

impl KeyType {
    pub fn from_algorithm(algorithm: &ObjectIdentifier) -> Option<Self> {
        [
            (RSA_ENCRYPTION, KeyType::Rsa),
            (ID_DSA, KeyType::Dsa),
            (ID_EC_PUBLIC_KEY, KeyType::Ec),
        ]
        .into_iter()
        .find(|(oid, _)| algorithm.is(oid))
        .map(|(_, key_type)| key_type)
    }

    pub fn algorithm(self) -> ObjectIdentifier {
        let der = match self {
            KeyType::Rsa => RSA_ENCRYPTION,
            KeyType::Dsa => ID_DSA,
            KeyType::Ec => ID_EC_PUBLIC_KEY,
        };
        ObjectIdentifier::from_der_content(der).unwrap_or_else(|_| ObjectIdentifier::null_arc())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PublicKey {
    Rsa { modulus: BigInt, public_exponent: BigInt },
    Dsa { y: BigInt },
    /// SEC1 point octets.
    Ec { point: Vec<u8> },
}

fn integer(object: Option<&Object>) -> Result<BigInt> {
    match object.and_then(Object::value) {
        Some(Value::Integer(i)) => Ok(i.clone()),
        _ => Err(ErrorKind::Malformed.into()),
    }
}

/// Format byte and length of a SEC1 encoded point: uncompressed points
/// carry two coordinates of equal width, compressed ones one, and the point
/// at infinity nothing.
fn check_point(point: &[u8]) -> Result<()> {
    let well_formed = match point {
        [0x04, coordinates @ ..] => !coordinates.is_empty() && coordinates.len() % 2 == 0,
        [0x02 | 0x03, coordinate @ ..] => !coordinate.is_empty(),
        [0x00] => true,
        _ => false,
    };
    if well_formed {
        Ok(())
    } else {
        Err(ErrorKind::Malformed.into())
    }
}

impl PublicKey {
    pub fn key_type(&self) -> KeyType {
        match self {
            PublicKey::Rsa { .. } => KeyType::Rsa,
            PublicKey::Dsa { .. } => KeyType::Dsa,
            PublicKey::Ec { .. } => KeyType::Ec,
        }
    }

    /// Decode the key material of the given type.
    ///
    /// RSA keys are an `RSAPublicKey`, DSA keys an INTEGER and EC keys the
    /// raw point octets.
    pub fn decode(key_type: KeyType, bytes: &[u8], options: Options) -> Result<Self> {
        debug_now!("decoding {:?} public key", key_type);
        match key_type {
            KeyType::Rsa => {
                let key = template::decode(&keys::RSA_PUBLIC_KEY, bytes, options)?;
                Ok(PublicKey::Rsa { modulus: integer(key.field(0))?, public_exponent: integer(key.field(1))? })
            }
            KeyType::Dsa => {
                let y = template::decode(&keys::DSA_PUBLIC_KEY, bytes, options)?;
                Ok(PublicKey::Dsa { y: integer(Some(&y))? })
            }
            KeyType::Ec => {
                check_point(bytes)?;
                Ok(PublicKey::Ec { point: bytes.into() })
            }
        }
    }

    /// Decode the key carried by a decoded `SubjectPublicKeyInfo`.
    pub fn from_subject_public_key_info(spki: &Object, options: Options) -> Result<Self> {
        let algorithm = spki
            .field_named(&x509::SUBJECT_PUBLIC_KEY_INFO, "algorithm")
            .and_then(|algorithm| algorithm.field_named(&x509::ALGORITHM_IDENTIFIER, "algorithm"))
            .and_then(Object::value)
            .and_then(Value::as_oid)
            .ok_or(ErrorKind::Malformed)?;
        let bits = match spki
            .field_named(&x509::SUBJECT_PUBLIC_KEY_INFO, "subjectPublicKey")
            .and_then(Object::value)
        {
            Some(Value::BitString(bits)) if bits.unused_bits() == 0 => bits,
            _ => return Err(ErrorKind::Malformed.into()),
        };
        decode_public_key(algorithm, bits.as_bytes(), options)
    }

    /// Canonical encoding of the key material, as [`PublicKey::decode`] reads it.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let options = Options::default();
        match self {
            PublicKey::Rsa { modulus, public_exponent } => {
                let key = Object::Sequence(alloc::vec![
                    Some(Object::Primitive(Value::Integer(modulus.clone()))),
                    Some(Object::Primitive(Value::Integer(public_exponent.clone()))),
                ]);
                template::encode(&keys::RSA_PUBLIC_KEY, &key, options)
            }
            PublicKey::Dsa { y } => {
                template::encode(&keys::DSA_PUBLIC_KEY, &Object::Primitive(Value::Integer(y.clone())), options)
            }
            PublicKey::Ec { point } => Ok(point.clone()),
        }
    }

    /// A `SubjectPublicKeyInfo` object carrying this key. RSA parameters are
    /// NULL (RFC 3279), the others absent.
    pub fn to_subject_public_key_info(&self) -> Result<Object> {
        let parameters = match self {
            PublicKey::Rsa { .. } => Some(Object::Primitive(Value::Any(Any::null()))),
            PublicKey::Dsa { .. } | PublicKey::Ec { .. } => None,
        };
        let algorithm = Object::Sequence(alloc::vec![
            Some(Object::Primitive(Value::ObjectIdentifier(self.key_type().algorithm()))),
            parameters,
        ]);
        let bits = BitString::from_bytes(self.to_bytes()?);
        Ok(Object::Sequence(alloc::vec![Some(algorithm), Some(Object::Primitive(Value::BitString(bits)))]))
    }
}

/// Decode into a caller-held slot.
///
/// On success the slot holds the new key. On failure the slot is left as it
/// was and the partially decoded key is dropped.
pub fn decode_public_key_into<'a>(
    slot: &'a mut Option<PublicKey>,
    key_type: KeyType,
    bytes: &[u8],
    options: Options,
) -> Result<&'a mut PublicKey> {
    let key = PublicKey::decode(key_type, bytes, options)?;
    Ok(slot.insert(key))
}

/// [`PublicKey::decode`] for bytes of an unknown algorithm, named by OID.
pub fn decode_public_key(algorithm: &ObjectIdentifier, bytes: &[u8], options: Options) -> Result<PublicKey> {
    let key_type = KeyType::from_algorithm(algorithm).ok_or(ErrorKind::Malformed)?;
    PublicKey::decode(key_type, bytes, options)
}
