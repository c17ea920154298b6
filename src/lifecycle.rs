//! Allocation, copying and release of objects, derived from descriptor shape.

use crate::{
    item::ItemKind, options::DEFAULT_MAX_DEPTH, ErrorKind, Item, Object, Options, Primitive, Result, Value,
};
use alloc::{boxed::Box, vec::Vec};

/// A fresh object for `item`.
///
/// Required components are allocated, OPTIONAL components are absent,
/// DEFAULT components hold their default, a CHOICE holds its first
/// alternative and repeated items are empty.
pub fn allocate(item: &'static Item) -> Result<Object> {
    allocate_at(item, 0, DEFAULT_MAX_DEPTH)
}

fn allocate_at(item: &'static Item, depth: usize, limit: usize) -> Result<Object> {
    if depth >= limit {
        return Err(ErrorKind::DepthExceeded { limit }.into());
    }
    Ok(match item.kind {
        ItemKind::Primitive(primitive) => Object::Primitive(primitive.initial_value()),
        ItemKind::Sequence(fields) => {
            let mut slots = Vec::new();
            slots.try_reserve(fields.len())?;
            for field in fields {
                let slot = match field.default_value()? {
                    Some(default) => Some(Object::Primitive(default)),
                    None if field.optional => None,
                    None => Some(allocate_at(field.item, depth + 1, limit)?),
                };
                slots.push(slot);
            }
            Object::Sequence(slots)
        }
        ItemKind::Choice(alternatives) => {
            let first = alternatives.first().ok_or(ErrorKind::Malformed)?;
            Object::Choice { index: 0, value: Box::new(allocate_at(first.item, depth + 1, limit)?) }
        }
        ItemKind::SequenceOf(_) | ItemKind::SetOf(_) => Object::Repeated(Vec::new()),
    })
}

fn value_fits(primitive: Primitive, value: &Value) -> bool {
    matches!(
        (primitive, value),
        (Primitive::Boolean, Value::Boolean(_))
            | (Primitive::Integer, Value::Integer(_))
            | (Primitive::Enumerated, Value::Enumerated(_))
            | (Primitive::BitString, Value::BitString(_))
            | (Primitive::OctetString, Value::OctetString(_))
            | (Primitive::Null, Value::Null)
            | (Primitive::ObjectIdentifier, Value::ObjectIdentifier(_))
            | (Primitive::UtcTime | Primitive::GeneralizedTime, Value::Time(_))
            | (
                Primitive::Utf8String
                    | Primitive::PrintableString
                    | Primitive::Ia5String
                    | Primitive::VisibleString
                    | Primitive::BmpString,
                Value::String(_)
            )
            | (Primitive::Any, Value::Any(_))
    )
}

fn check(item: &'static Item, object: &Object, depth: usize, limit: usize) -> Result<()> {
    if depth >= limit {
        return Err(ErrorKind::DepthExceeded { limit }.into());
    }
    match (item.kind, object) {
        (ItemKind::Primitive(primitive), Object::Primitive(value)) if value_fits(primitive, value) => Ok(()),
        (ItemKind::Sequence(fields), Object::Sequence(slots)) if fields.len() == slots.len() => {
            for (field, slot) in fields.iter().zip(slots) {
                match slot {
                    Some(object) => check(field.item, object, depth + 1, limit)?,
                    None if field.optional || field.default.is_some() => {}
                    None => return Err(ErrorKind::Malformed.into()),
                }
            }
            Ok(())
        }
        (ItemKind::Choice(alternatives), Object::Choice { index, value }) => match alternatives.get(*index) {
            Some(alternative) => check(alternative.item, value, depth + 1, limit),
            None => Err(ErrorKind::Malformed.into()),
        },
        (ItemKind::SequenceOf(element) | ItemKind::SetOf(element), Object::Repeated(elements)) => elements
            .iter()
            .try_for_each(|object| check(element, object, depth + 1, limit)),
        _ => Err(ErrorKind::Malformed.into()),
    }
}

/// Does `object` have the shape `item` describes?
pub fn conforms(item: &'static Item, object: &Object) -> bool {
    check(item, object, 0, DEFAULT_MAX_DEPTH).is_ok()
}

/// An independent copy of `object`, which must have the shape of `item`.
pub fn deep_copy(item: &'static Item, object: &Object, options: Options) -> Result<Object> {
    check(item, object, 0, options.max_depth)?;
    Ok(object.clone())
}

/// Release `object` in declared order: SEQUENCE components first to last,
/// only the selected CHOICE alternative, repeated elements in order.
///
/// The ordered walk stops at [`DEFAULT_MAX_DEPTH`]. Whatever lies below is
/// still dropped, but unordered, and the walk reports
/// [`ErrorKind::DepthExceeded`].
pub fn free(item: &'static Item, object: Object) -> Result<()> {
    release(item, object, 0)
}

fn release(item: &'static Item, object: Object, depth: usize) -> Result<()> {
    if depth >= DEFAULT_MAX_DEPTH {
        debug_now!("dropping the rest of {} unordered", item.name);
        return Err(ErrorKind::DepthExceeded { limit: DEFAULT_MAX_DEPTH }.into());
    }
    trace_now!("releasing {}", item.name);
    let mut outcome = Ok(());
    match (item.kind, object) {
        (ItemKind::Sequence(fields), Object::Sequence(slots)) => {
            for (field, slot) in fields.iter().zip(slots) {
                if let Some(object) = slot {
                    outcome = outcome.and(release(field.item, object, depth + 1));
                }
            }
        }
        (ItemKind::Choice(alternatives), Object::Choice { index, value }) => {
            if let Some(alternative) = alternatives.get(index) {
                outcome = release(alternative.item, *value, depth + 1);
            }
        }
        (ItemKind::SequenceOf(element) | ItemKind::SetOf(element), Object::Repeated(elements)) => {
            for object in elements {
                outcome = outcome.and(release(element, object, depth + 1));
            }
        }
        _ => {}
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::{allocate, conforms, deep_copy, free};
    use crate::{items, ErrorKind, Field, Item, Object, Options, Primitive, Value, DEFAULT_MAX_DEPTH};
    use alloc::boxed::Box;
    use num_bigint::BigInt;

    static INTEGER: Item = Item::primitive("INTEGER", Primitive::Integer);
    static BOOLEAN: Item = Item::primitive("BOOLEAN", Primitive::Boolean);
    static NODE_FIELDS: [Field; 2] = [Field::new("leaf", &INTEGER), Field::new("node", &NODE).explicit(0)];
    static NODE: Item = Item::choice("Node", &NODE_FIELDS);
    static RECORD_FIELDS: [Field; 3] = [
        Field::new("id", &INTEGER),
        Field::new("flag", &BOOLEAN).default_boolean(false),
        Field::new("note", &INTEGER).implicit(0).optional(),
    ];
    static RECORD: Item = Item::sequence("Record", &RECORD_FIELDS);

    #[test]
    fn allocation_follows_the_shape() {
        let record = allocate(&RECORD).unwrap();
        assert_eq!(
            record,
            Object::Sequence(
                [
                    Some(Object::Primitive(Value::Integer(BigInt::from(0)))),
                    Some(Object::Primitive(Value::Boolean(false))),
                    None,
                ]
                .into()
            )
        );
        assert!(conforms(&RECORD, &record));

        let node = allocate(&NODE).unwrap();
        assert_eq!(node.choice().map(|(index, _)| index), Some(0));

        for &item in items::TOP_LEVEL {
            let object = allocate(item).unwrap();
            assert!(conforms(item, &object), "{}", item.name);
        }
    }

    #[test]
    fn shape_violations() {
        let wrong_leaf = Object::Sequence([Some(Object::Primitive(Value::Null)), None, None].into());
        assert!(!conforms(&RECORD, &wrong_leaf));
        let missing = Object::Sequence([None, None, None].into());
        assert!(!conforms(&RECORD, &missing));
        let short = Object::Sequence([None].into());
        assert!(deep_copy(&RECORD, &short, Options::default()).is_err());
        let bad_choice = Object::Choice { index: 2, value: Box::new(Object::Primitive(Value::Null)) };
        assert!(!conforms(&NODE, &bad_choice));
    }

    #[test]
    fn copies_are_independent() {
        let leaf = Object::Primitive(Value::Integer(BigInt::from(7)));
        let mut nested = Object::Choice { index: 0, value: Box::new(leaf) };
        for _ in 0..5 {
            nested = Object::Choice { index: 1, value: Box::new(nested) };
        }
        let copy = deep_copy(&NODE, &nested, Options::default()).unwrap();
        assert_eq!(copy, nested);
        free(&NODE, nested).unwrap();
        assert!(conforms(&NODE, &copy));

        assert!(deep_copy(&NODE, &copy, Options::default().with_max_depth(3)).is_err());
    }

    #[test]
    fn freeing_past_the_depth_limit_is_reported() {
        let leaf = Object::Primitive(Value::Integer(BigInt::from(1)));
        let mut nested = Object::Choice { index: 0, value: Box::new(leaf) };
        for _ in 0..40 {
            nested = Object::Choice { index: 1, value: Box::new(nested) };
        }
        let error = free(&NODE, nested).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::DepthExceeded { limit: DEFAULT_MAX_DEPTH });
    }
}
