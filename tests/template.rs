use hex_literal::hex;
use itember::{
    decode, encode, items, items::x509, template, ErrorKind, Field, Item, Object, Options, Primitive, Tag,
    Value,
};
use num_bigint::BigInt;

static INTEGER: Item = Item::primitive("INTEGER", Primitive::Integer);

static POINT_FIELDS: [Field; 1] = [Field::new("x", &INTEGER)];
static POINT: Item = Item::sequence("Point", &POINT_FIELDS);

static NOTE_FIELDS: [Field; 1] = [Field::new("note", &INTEGER).optional()];
static NOTE: Item = Item::sequence("Note", &NOTE_FIELDS);

static NEST_ALTERNATIVES: [Field; 2] = [Field::new("leaf", &INTEGER), Field::new("nest", &NEST).explicit(0)];
static NEST: Item = Item::choice("Nest", &NEST_ALTERNATIVES);

static SET_OF_INTEGER: Item = Item::set_of("SET OF INTEGER", &INTEGER);

static VERSIONED_FIELDS: [Field; 2] = [
    Field::new("version", &INTEGER).explicit(0).default_integer(0),
    Field::new("serial", &INTEGER),
];
static VERSIONED: Item = Item::sequence("Versioned", &VERSIONED_FIELDS);

fn int(i: i64) -> Object {
    Object::Primitive(Value::Integer(BigInt::from(i)))
}

fn nested(levels: usize) -> Vec<u8> {
    let mut bytes = hex!("02 01 00").to_vec();
    for _ in 0..levels {
        let mut wrapped = vec![0xA0, bytes.len() as u8];
        wrapped.extend_from_slice(&bytes);
        bytes = wrapped;
    }
    bytes
}

#[test]
fn single_field_sequence() {
    let bytes = hex!("30 03 02 01 05");
    let point = decode(&POINT, &bytes, Options::der()).unwrap();
    assert_eq!(point, Object::Sequence(vec![Some(int(5))]));
    assert_eq!(encode(&POINT, &point, Options::der()).unwrap(), bytes);
}

#[test]
fn integers_must_be_minimal() {
    assert_eq!(decode(&items::INTEGER, &hex!("02 02 00 FF"), Options::der()).unwrap(), int(255));

    let error = decode(&items::INTEGER, &hex!("02 02 00 7F"), Options::der()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Malformed);

    let lenient = decode(&items::INTEGER, &hex!("02 02 00 7F"), Options::ber()).unwrap();
    assert_eq!(lenient, int(127));
    assert_eq!(encode(&items::INTEGER, &lenient, Options::der()).unwrap(), hex!("02 01 7F"));
}

#[test]
fn trailing_optional_field_may_be_absent() {
    let note = decode(&NOTE, &hex!("30 00"), Options::der()).unwrap();
    assert_eq!(note, Object::Sequence(vec![None]));
    assert_eq!(encode(&NOTE, &note, Options::der()).unwrap(), hex!("30 00"));
}

#[test]
fn nested_choices_are_depth_bounded() {
    let shallow = nested(5);
    let object = decode(&NEST, &shallow, Options::der()).unwrap();
    assert_eq!(encode(&NEST, &object, Options::der()).unwrap(), shallow);

    let error = decode(&NEST, &nested(40), Options::der()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::DepthExceeded { limit: 30 });

    let error = decode(&NEST, &shallow, Options::der().with_max_depth(3)).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::DepthExceeded { limit: 3 });
}

#[test]
fn set_of_is_sorted_on_encode() {
    let sorted = hex!("31 09 02 01 01 02 01 02 02 01 03");
    let a = Object::Repeated(vec![int(3), int(1), int(2)]);
    let b = Object::Repeated(vec![int(2), int(3), int(1)]);
    assert_eq!(encode(&SET_OF_INTEGER, &a, Options::der()).unwrap(), sorted);
    assert_eq!(encode(&SET_OF_INTEGER, &b, Options::der()).unwrap(), sorted);

    let decoded = decode(&SET_OF_INTEGER, &hex!("31 09 02 01 03 02 01 01 02 01 02"), Options::der()).unwrap();
    assert_eq!(decoded, a);
}

#[test]
fn defaults_are_elided_and_restored() {
    let bytes = hex!("30 06 01 01 FF 02 01 00");
    let constraints = decode(&x509::BASIC_CONSTRAINTS, &bytes, Options::der()).unwrap();
    assert_eq!(
        constraints,
        Object::Sequence(vec![Some(Object::Primitive(Value::Boolean(true))), Some(int(0))])
    );
    assert_eq!(encode(&x509::BASIC_CONSTRAINTS, &constraints, Options::der()).unwrap(), bytes);

    let empty = decode(&x509::BASIC_CONSTRAINTS, &hex!("30 00"), Options::der()).unwrap();
    assert_eq!(empty, Object::Sequence(vec![Some(Object::Primitive(Value::Boolean(false))), None]));
    assert_eq!(encode(&x509::BASIC_CONSTRAINTS, &empty, Options::der()).unwrap(), hex!("30 00"));

    let explicit_default = hex!("30 03 01 01 00");
    let error = decode(&x509::BASIC_CONSTRAINTS, &explicit_default, Options::der()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Malformed);
    let lenient = decode(&x509::BASIC_CONSTRAINTS, &explicit_default, Options::ber()).unwrap();
    assert_eq!(lenient, empty);
    assert_eq!(encode(&x509::BASIC_CONSTRAINTS, &lenient, Options::der()).unwrap(), hex!("30 00"));
}

#[test]
fn explicitly_tagged_default() {
    let implied = decode(&VERSIONED, &hex!("30 03 02 01 07"), Options::der()).unwrap();
    assert_eq!(implied, Object::Sequence(vec![Some(int(0)), Some(int(7))]));

    let v3 = hex!("30 08 A0 03 02 01 02 02 01 07");
    let object = decode(&VERSIONED, &v3, Options::der()).unwrap();
    assert_eq!(object, Object::Sequence(vec![Some(int(2)), Some(int(7))]));
    assert_eq!(encode(&VERSIONED, &object, Options::der()).unwrap(), v3);

    let error = decode(&VERSIONED, &hex!("30 08 A0 03 02 01 00 02 01 07"), Options::der()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Malformed);
}

#[test]
fn choice_selects_one_alternative() {
    let mut dns = hex!("82 0B").to_vec();
    dns.extend_from_slice(b"example.com");
    let name = decode(&x509::GENERAL_NAME, &dns, Options::der()).unwrap();
    let (index, value) = name.choice().unwrap();
    assert_eq!(index, 2);
    assert_eq!(value.value().and_then(Value::as_str), Some("example.com"));
    assert_eq!(encode(&x509::GENERAL_NAME, &name, Options::der()).unwrap(), dns);

    let ip = hex!("87 04 C0 A8 00 01");
    let name = decode(&x509::GENERAL_NAME, &ip, Options::der()).unwrap();
    let (index, value) = name.choice().unwrap();
    assert_eq!(index, 7);
    assert_eq!(value.value().and_then(Value::as_bytes), Some(&hex!("C0 A8 00 01")[..]));

    let error = decode(&x509::GENERAL_NAME, &hex!("89 01 00"), Options::der()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnknownChoiceTag { actual: Tag::context(9) });
    assert_eq!(error.position().map(usize::from), Some(0));
}

#[test]
fn primitive_tag_mismatch() {
    let error = decode(&items::INTEGER, &hex!("01 01 FF"), Options::der()).unwrap_err();
    assert_eq!(
        error.kind(),
        ErrorKind::UnexpectedTag { expected: Some(Tag::INTEGER), actual: Tag::BOOLEAN }
    );
}

#[test]
fn required_field_mismatch_is_malformed() {
    let error = decode(&POINT, &hex!("30 03 01 01 FF"), Options::der()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Malformed);
}

#[test]
fn any_parameters() {
    let bytes = hex!("30 0D 06 09 2A 86 48 86 F7 0D 01 01 0B 05 00");
    let algorithm = decode(&x509::ALGORITHM_IDENTIFIER, &bytes, Options::der()).unwrap();
    let oid = algorithm.field(0).and_then(Object::value).and_then(Value::as_oid).unwrap();
    assert_eq!(oid.to_string(), "1.2.840.113549.1.1.11");
    let parameters = algorithm.field(1).and_then(Object::value).and_then(Value::as_any).unwrap();
    assert_eq!(parameters.tag(), Tag::NULL);
    assert_eq!(parameters.interpret().unwrap(), &Object::Primitive(Value::Null));
    assert_eq!(encode(&x509::ALGORITHM_IDENTIFIER, &algorithm, Options::der()).unwrap(), bytes);

    let cut = decode(&x509::ALGORITHM_IDENTIFIER, &bytes[..13], Options::der()).unwrap_err();
    assert_eq!(cut.kind(), ErrorKind::Truncated);
}

#[test]
fn framing_errors() {
    let error = decode(&POINT, &hex!("30 05 02 01 05"), Options::der()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Truncated);
    assert_eq!(error.position().map(usize::from), Some(0));

    let error = decode(&POINT, &hex!("30 03 02 01 05 00"), Options::der()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Malformed);

    let error = decode(&POINT, &hex!("30 04 02 01 05 00"), Options::der()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Malformed);

    assert_eq!(decode(&POINT, &[], Options::der()).unwrap_err().kind(), ErrorKind::Truncated);
}

#[test]
fn indefinite_lengths_need_ber() {
    let bytes = hex!("30 80 02 01 05 00 00");
    let point = decode(&POINT, &bytes, Options::ber()).unwrap();
    assert_eq!(point, Object::Sequence(vec![Some(int(5))]));
    assert_eq!(encode(&POINT, &point, Options::der()).unwrap(), hex!("30 03 02 01 05"));

    assert_eq!(decode(&POINT, &bytes, Options::der()).unwrap_err().kind(), ErrorKind::Malformed);
    assert!(decode(&POINT, &hex!("30 80 02 01 05"), Options::ber()).is_err());
}

#[test]
fn implicit_tags_replace_the_natural_tag() {
    let bytes = hex!("30 03 81 01 02");
    let constraints = decode(&x509::POLICY_CONSTRAINTS, &bytes, Options::der()).unwrap();
    assert_eq!(constraints, Object::Sequence(vec![None, Some(int(2))]));
    assert_eq!(encode(&x509::POLICY_CONSTRAINTS, &constraints, Options::der()).unwrap(), bytes);

    // constructed encoding of an implicitly tagged INTEGER
    let error = decode(&x509::POLICY_CONSTRAINTS, &hex!("30 05 A1 03 02 01 02"), Options::der()).unwrap_err();
    assert_eq!(
        error.kind(),
        ErrorKind::UnexpectedTag { expected: Some(Tag::context(1)), actual: Tag::context(1).constructed() }
    );
}

#[test]
fn lookup_by_name() {
    let constraints =
        template::decode_by_name("BasicConstraints", &hex!("30 03 01 01 FF"), Options::der()).unwrap();
    assert_eq!(constraints.field(0).and_then(Object::value), Some(&Value::Boolean(true)));
    let error = template::decode_by_name("Nonexistent", &hex!("30 00"), Options::der()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Malformed);
}

#[test]
fn encode_checks_the_shape() {
    let wrong = Object::Sequence(vec![Some(Object::Primitive(Value::Null))]);
    assert_eq!(encode(&POINT, &wrong, Options::der()).unwrap_err().kind(), ErrorKind::Malformed);
    let missing = Object::Sequence(vec![None]);
    assert_eq!(encode(&POINT, &missing, Options::der()).unwrap_err().kind(), ErrorKind::Malformed);

    let mut buf = [0u8; 5];
    let point = Object::Sequence(vec![Some(int(5))]);
    let written = template::encode_to_slice(&POINT, &point, Options::der(), &mut buf).unwrap();
    assert_eq!(written, hex!("30 03 02 01 05"));
    let mut short = [0u8; 4];
    assert_eq!(
        template::encode_to_slice(&POINT, &point, Options::der(), &mut short).unwrap_err().kind(),
        ErrorKind::Overlength
    );
}

#[test]
fn any_parameters_follow_the_rules() {
    let loose = hex!("30 0F 06 09 2A 86 48 86 F7 0D 01 01 0B 02 02 00 7F");
    let error = decode(&x509::ALGORITHM_IDENTIFIER, &loose, Options::der()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Malformed);

    let algorithm = decode(&x509::ALGORITHM_IDENTIFIER, &loose, Options::ber()).unwrap();
    assert_eq!(
        encode(&x509::ALGORITHM_IDENTIFIER, &algorithm, Options::der()).unwrap(),
        hex!("30 0E 06 09 2A 86 48 86 F7 0D 01 01 0B 02 01 7F")
    );

    let indefinite = hex!("30 12 06 09 2A 86 48 86 F7 0D 01 01 0B 30 05 30 80 00 00 00");
    let error = decode(&x509::ALGORITHM_IDENTIFIER, &indefinite, Options::der()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Malformed);
}

#[test]
fn constructed_strings_need_ber() {
    let segmented = hex!(
        "30 1A 30 0D 06 09 60 86 48 01 65 03 04 02 01 05 00"
        "24 80 04 02 AA BB 04 01 CC 00 00"
    );
    let digest_info = decode(&items::pkcs::DIGEST_INFO, &segmented, Options::ber()).unwrap();
    let digest = digest_info.field(1).and_then(Object::value).and_then(Value::as_bytes);
    assert_eq!(digest, Some(&hex!("AA BB CC")[..]));
    assert_eq!(
        encode(&items::pkcs::DIGEST_INFO, &digest_info, Options::der()).unwrap(),
        hex!("30 14 30 0D 06 09 60 86 48 01 65 03 04 02 01 05 00 04 03 AA BB CC")
    );

    let error = decode(&items::pkcs::DIGEST_INFO, &segmented, Options::der()).unwrap_err();
    assert_eq!(
        error.kind(),
        ErrorKind::UnexpectedTag { expected: Some(Tag::OCTET_STRING), actual: Tag::OCTET_STRING.constructed() }
    );

    // only strings may be segmented
    assert!(decode(&items::INTEGER, &hex!("22 03 02 01 05"), Options::ber()).is_err());
}

#[test]
fn strings_keep_their_character_set() {
    let bad = hex!("13 03 61 40 62");
    for options in [Options::der(), Options::ber()] {
        assert_eq!(decode(&x509::DIRECTORY_STRING, &bad, options).unwrap_err().kind(), ErrorKind::Malformed);
    }
    let good = decode(&x509::DIRECTORY_STRING, &hex!("13 03 61 2D 62"), Options::ber()).unwrap();
    assert_eq!(good.choice().and_then(|(_, value)| value.value()).and_then(Value::as_str), Some("a-b"));
}
