use crate::{template, Encodable, Encoder, Item, Length, Options, Result, Value};
use alloc::{boxed::Box, vec::Vec};

/// A decoded value tree, shaped after the [`Item`] it was decoded with.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Object {
    Primitive(Value),
    /// One slot per component, `None` for an absent OPTIONAL component.
    Sequence(Vec<Option<Object>>),
    /// The selected alternative and its value.
    Choice { index: usize, value: Box<Object> },
    /// SEQUENCE OF and SET OF elements, in encounter order.
    Repeated(Vec<Object>),
}

impl Object {
    /// Component `index` of a SEQUENCE, if present.
    pub fn field(&self, index: usize) -> Option<&Object> {
        match self {
            Object::Sequence(slots) => slots.get(index).and_then(Option::as_ref),
            _ => None,
        }
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut Option<Object>> {
        match self {
            Object::Sequence(slots) => slots.get_mut(index),
            _ => None,
        }
    }

    /// Component called `name` of a SEQUENCE described by `item`.
    pub fn field_named(&self, item: &Item, name: &str) -> Option<&Object> {
        item.field_index(name).and_then(|index| self.field(index))
    }

    pub fn choice(&self) -> Option<(usize, &Object)> {
        match self {
            Object::Choice { index, value } => Some((*index, value)),
            _ => None,
        }
    }

    pub fn elements(&self) -> Option<&[Object]> {
        match self {
            Object::Repeated(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Object::Primitive(value) => Some(value),
            _ => None,
        }
    }
}

/// An object together with its descriptor, encodable on its own.
#[derive(Copy, Clone, Debug)]
pub struct Typed<'a> {
    pub item: &'static Item,
    pub object: &'a Object,
}

impl<'a> Typed<'a> {
    pub fn new(item: &'static Item, object: &'a Object) -> Self {
        Self { item, object }
    }
}

impl Encodable for Typed<'_> {
    fn encoded_length(&self) -> Result<Length> {
        template::encode(self.item, self.object, Options::default())?.len().try_into()
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        let bytes = template::encode(self.item, self.object, Options::default())?;
        encoder.bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::{Object, Typed};
    use crate::{Encodable, Field, Item, Primitive, Value};
    use alloc::boxed::Box;
    use num_bigint::BigInt;

    static INTEGER: Item = Item::primitive("INTEGER", Primitive::Integer);
    static POINT_FIELDS: [Field; 2] = [Field::new("x", &INTEGER), Field::new("y", &INTEGER).optional()];
    static POINT: Item = Item::sequence("Point", &POINT_FIELDS);

    #[test]
    fn accessors() {
        let five = Object::Primitive(Value::Integer(BigInt::from(5)));
        let point = Object::Sequence([Some(five.clone()), None].into());
        assert_eq!(point.field_named(&POINT, "x"), Some(&five));
        assert_eq!(point.field_named(&POINT, "y"), None);
        assert_eq!(point.field(7), None);
        assert_eq!(point.choice(), None);

        let choice = Object::Choice { index: 1, value: Box::new(five.clone()) };
        assert_eq!(choice.choice(), Some((1, &five)));
        assert_eq!(five.value().and_then(Value::as_integer), Some(&BigInt::from(5)));
    }

    #[test]
    fn typed_encodes_to_slice() {
        let point = Object::Sequence([Some(Object::Primitive(Value::Integer(BigInt::from(5)))), None].into());
        let mut buf = [0u8; 8];
        let encoded = Typed::new(&POINT, &point).encode_to_slice(&mut buf).unwrap();
        assert_eq!(encoded, &[0x30, 0x03, 0x02, 0x01, 0x05]);

        let mut short = [0u8; 4];
        assert!(Typed::new(&POINT, &point).encode_to_slice(&mut short).is_err());
    }
}
