//! Static structure descriptors.
//!
//! An [`Item`] describes the shape of one ASN.1 type. Descriptors are plain
//! `static` data built with `const fn` constructors and never change, so any
//! number of threads may walk them at once.
//!
//! ```
//! use itember::{Field, Item, Primitive};
//!
//! static VERSION: Item = Item::primitive("Version", Primitive::Integer);
//! static BOOLEAN: Item = Item::primitive("BOOLEAN", Primitive::Boolean);
//! static EXAMPLE_FIELDS: [Field; 2] = [
//!     Field::new("version", &VERSION).explicit(0).default_integer(0),
//!     Field::new("critical", &BOOLEAN).default_boolean(false),
//! ];
//! static EXAMPLE: Item = Item::sequence("Example", &EXAMPLE_FIELDS);
//!
//! assert_eq!(EXAMPLE.field_index("critical"), Some(1));
//! ```

use crate::{Class, ErrorKind, Primitive, Result, Tag, Value};
use num_bigint::BigInt;

/// Descriptor of one ASN.1 type.
#[derive(Debug)]
pub struct Item {
    pub name: &'static str,
    pub kind: ItemKind,
}

#[derive(Copy, Clone, Debug)]
pub enum ItemKind {
    Primitive(Primitive),
    Sequence(&'static [Field]),
    Choice(&'static [Field]),
    SequenceOf(&'static Item),
    SetOf(&'static Item),
}

/// Explicit tags wrap the natural encoding, implicit tags replace its tag.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mode {
    Explicit,
    Implicit,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Tagging {
    pub class: Class,
    pub number: u32,
    pub mode: Mode,
}

/// DEFAULT values that occur in practice.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DefaultValue {
    Boolean(bool),
    /// INTEGER or ENUMERATED
    Integer(i64),
}

impl DefaultValue {
    /// The value as the given leaf type decodes it.
    pub fn to_value(self, primitive: Primitive) -> Result<Value> {
        match (self, primitive) {
            (DefaultValue::Boolean(b), Primitive::Boolean) => Ok(Value::Boolean(b)),
            (DefaultValue::Integer(i), Primitive::Integer) => Ok(Value::Integer(BigInt::from(i))),
            (DefaultValue::Integer(i), Primitive::Enumerated) => Ok(Value::Enumerated(BigInt::from(i))),
            _ => Err(ErrorKind::Malformed.into()),
        }
    }
}

/// One component of a SEQUENCE or alternative of a CHOICE.
#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub item: &'static Item,
    pub tagging: Option<Tagging>,
    pub optional: bool,
    pub default: Option<DefaultValue>,
}

impl Item {
    pub const fn primitive(name: &'static str, primitive: Primitive) -> Self {
        Self { name, kind: ItemKind::Primitive(primitive) }
    }

    pub const fn sequence(name: &'static str, fields: &'static [Field]) -> Self {
        Self { name, kind: ItemKind::Sequence(fields) }
    }

    pub const fn choice(name: &'static str, alternatives: &'static [Field]) -> Self {
        Self { name, kind: ItemKind::Choice(alternatives) }
    }

    pub const fn sequence_of(name: &'static str, element: &'static Item) -> Self {
        Self { name, kind: ItemKind::SequenceOf(element) }
    }

    pub const fn set_of(name: &'static str, element: &'static Item) -> Self {
        Self { name, kind: ItemKind::SetOf(element) }
    }

    /// Components of a SEQUENCE or alternatives of a CHOICE, empty otherwise.
    pub fn fields(&self) -> &'static [Field] {
        match self.kind {
            ItemKind::Sequence(fields) | ItemKind::Choice(fields) => fields,
            _ => &[],
        }
    }

    /// Position of the component or alternative called `name`.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields().iter().position(|field| field.name == name)
    }

    /// Tag of the untagged encoding, `None` for CHOICE and ANY.
    pub fn natural_tag(&self) -> Option<Tag> {
        match self.kind {
            ItemKind::Primitive(primitive) => primitive.tag(),
            ItemKind::Sequence(_) | ItemKind::SequenceOf(_) => Some(Tag::SEQUENCE),
            ItemKind::SetOf(_) => Some(Tag::SET),
            ItemKind::Choice(_) => None,
        }
    }

    /// CHOICE and ANY have no tag of their own to replace.
    pub(crate) fn is_untaggable(&self) -> bool {
        self.natural_tag().is_none()
    }
}

impl Field {
    /// A required, untagged component.
    pub const fn new(name: &'static str, item: &'static Item) -> Self {
        Self { name, item, tagging: None, optional: false, default: None }
    }

    pub const fn tagged(mut self, class: Class, number: u32, mode: Mode) -> Self {
        self.tagging = Some(Tagging { class, number, mode });
        self
    }

    /// `[number] EXPLICIT`, context-specific.
    pub const fn explicit(self, number: u32) -> Self {
        self.tagged(Class::Context, number, Mode::Explicit)
    }

    /// `[number] IMPLICIT`, context-specific.
    pub const fn implicit(self, number: u32) -> Self {
        self.tagged(Class::Context, number, Mode::Implicit)
    }

    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub const fn default_boolean(mut self, value: bool) -> Self {
        self.default = Some(DefaultValue::Boolean(value));
        self
    }

    pub const fn default_integer(mut self, value: i64) -> Self {
        self.default = Some(DefaultValue::Integer(value));
        self
    }

    /// Tagging mode in effect. Implicit tags on CHOICE and ANY act as explicit.
    pub fn mode(&self) -> Option<Mode> {
        self.tagging.map(|tagging| match tagging.mode {
            Mode::Implicit if self.item.is_untaggable() => Mode::Explicit,
            mode => mode,
        })
    }

    /// Outermost tag this component is encoded with, `None` when untagged
    /// and the item has no tag of its own.
    pub fn outer_tag(&self) -> Option<Tag> {
        let tagging = match self.tagging {
            Some(tagging) => tagging,
            None => return self.item.natural_tag(),
        };
        let constructed = match self.mode() {
            Some(Mode::Implicit) => self.item.natural_tag().map_or(true, |tag| tag.constructed),
            _ => true,
        };
        Some(Tag::new(tagging.class, constructed, tagging.number))
    }

    /// Could an element with this tag start this component?
    ///
    /// Untagged CHOICE components are searched through at most `budget`
    /// levels.
    pub fn accepts(&self, tag: Tag, budget: usize) -> bool {
        if let Some(outer) = self.outer_tag() {
            return outer.same_identity(tag);
        }
        match self.item.kind {
            ItemKind::Choice(alternatives) if budget > 0 => {
                alternatives.iter().any(|alternative| alternative.accepts(tag, budget - 1))
            }
            ItemKind::Choice(_) => false,
            _ => true,
        }
    }

    /// The DEFAULT value as a leaf value of this component's type.
    pub fn default_value(&self) -> Result<Option<Value>> {
        match (self.default, &self.item.kind) {
            (None, _) => Ok(None),
            (Some(default), ItemKind::Primitive(primitive)) => default.to_value(*primitive).map(Some),
            (Some(_), _) => Err(ErrorKind::Malformed.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Field, Item, Mode};
    use crate::{Class, Primitive, Tag, Value};
    use num_bigint::BigInt;

    static INTEGER: Item = Item::primitive("INTEGER", Primitive::Integer);
    static ANY: Item = Item::primitive("ANY", Primitive::Any);
    static PAIR_FIELDS: [Field; 2] = [Field::new("a", &INTEGER), Field::new("b", &INTEGER)];
    static PAIR: Item = Item::sequence("Pair", &PAIR_FIELDS);
    static EITHER_FIELDS: [Field; 2] = [Field::new("int", &INTEGER), Field::new("pair", &PAIR).implicit(1)];
    static EITHER: Item = Item::choice("Either", &EITHER_FIELDS);

    #[test]
    fn outer_tags() {
        assert_eq!(Field::new("x", &INTEGER).outer_tag(), Some(Tag::INTEGER));
        assert_eq!(Field::new("x", &INTEGER).implicit(2).outer_tag(), Some(Tag::context(2)));
        assert_eq!(Field::new("x", &INTEGER).explicit(2).outer_tag(), Some(Tag::context(2).constructed()));
        assert_eq!(Field::new("x", &PAIR).implicit(3).outer_tag(), Some(Tag::context(3).constructed()));
        assert_eq!(
            Field::new("x", &INTEGER).tagged(Class::Application, 7, Mode::Implicit).outer_tag(),
            Some(Tag::application(7))
        );
        assert_eq!(Field::new("x", &EITHER).outer_tag(), None);
    }

    #[test]
    fn implicit_choice_and_any_are_explicit() {
        assert_eq!(Field::new("x", &EITHER).implicit(0).mode(), Some(Mode::Explicit));
        assert_eq!(Field::new("x", &ANY).implicit(0).mode(), Some(Mode::Explicit));
        assert_eq!(Field::new("x", &ANY).implicit(0).outer_tag(), Some(Tag::context(0).constructed()));
    }

    #[test]
    fn acceptance_looks_through_untagged_choices() {
        let field = Field::new("x", &EITHER);
        assert!(field.accepts(Tag::INTEGER, 4));
        assert!(field.accepts(Tag::context(1).constructed(), 4));
        assert!(!field.accepts(Tag::BOOLEAN, 4));
        assert!(!field.accepts(Tag::INTEGER, 0));
        assert!(Field::new("x", &ANY).accepts(Tag::private(9), 0));
    }

    #[test]
    fn defaults_follow_the_leaf_type() {
        let version = Field::new("version", &INTEGER).explicit(0).default_integer(0);
        assert_eq!(version.default_value().unwrap(), Some(Value::Integer(BigInt::from(0))));
        assert!(Field::new("x", &PAIR).default_integer(0).default_value().is_err());
        assert_eq!(PAIR.field_index("b"), Some(1));
        assert_eq!(PAIR.field_index("c"), None);
    }
}
