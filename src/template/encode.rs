use crate::{
    item::{Field, ItemKind, Mode},
    Encodable, ErrorKind, Header, Item, Object, Options, Primitive, Result, Tag, Value,
};
use alloc::vec::Vec;

/// Append a definite-length TLV.
fn push_tlv(out: &mut Vec<u8>, tag: Tag, content: &[u8]) -> Result<()> {
    Header::new(tag, content.len())?.encode_to_vec(out)?;
    out.try_reserve(content.len())?;
    out.extend_from_slice(content);
    Ok(())
}

/// Encoding walk, children first so every parent knows its content length.
pub(crate) struct Writer {
    options: Options,
    depth: usize,
}

impl Writer {
    pub(crate) fn new(options: Options) -> Self {
        Self { options, depth: 0 }
    }

    /// Complete TLV encoding of `object` as `item`, its outer tag replaced
    /// by `implicit` if given.
    pub(crate) fn encode(&mut self, item: &'static Item, object: &Object, implicit: Option<Tag>) -> Result<Vec<u8>> {
        if self.depth >= self.options.max_depth {
            return Err(ErrorKind::DepthExceeded { limit: self.options.max_depth }.into());
        }
        self.depth += 1;
        trace_now!("encoding {}", item.name);

        let mut out = Vec::new();
        match (item.kind, object) {
            (ItemKind::Primitive(Primitive::Any), Object::Primitive(Value::Any(any))) => {
                any.encode_to_vec(&mut out)?;
            }
            (ItemKind::Primitive(primitive), Object::Primitive(value)) => {
                let tag = implicit.or_else(|| primitive.tag()).ok_or(ErrorKind::Malformed)?;
                push_tlv(&mut out, tag, &primitive.encode(value)?)?;
            }
            (ItemKind::Sequence(fields), Object::Sequence(slots)) if fields.len() == slots.len() => {
                let mut content = Vec::new();
                for (field, slot) in fields.iter().zip(slots) {
                    self.component(&mut content, field, slot.as_ref())?;
                }
                push_tlv(&mut out, implicit.unwrap_or(Tag::SEQUENCE), &content)?;
            }
            (ItemKind::Choice(alternatives), Object::Choice { index, value }) => {
                let alternative = alternatives.get(*index).ok_or(ErrorKind::Malformed)?;
                self.tagged(&mut out, alternative, value)?;
            }
            (ItemKind::SequenceOf(element), Object::Repeated(elements)) => {
                let mut content = Vec::new();
                for object in elements {
                    content.extend_from_slice(&self.encode(element, object, None)?);
                }
                push_tlv(&mut out, implicit.unwrap_or(Tag::SEQUENCE), &content)?;
            }
            (ItemKind::SetOf(element), Object::Repeated(elements)) => {
                let mut encodings = Vec::new();
                encodings.try_reserve(elements.len())?;
                for object in elements {
                    encodings.push(self.encode(element, object, None)?);
                }
                encodings.sort_unstable();
                push_tlv(&mut out, implicit.unwrap_or(Tag::SET), &encodings.concat())?;
            }
            _ => {
                debug_now!("object does not have the shape of {}", item.name);
                return Err(ErrorKind::Malformed.into());
            }
        }

        self.depth -= 1;
        Ok(out)
    }

    /// One SEQUENCE component: absent and DEFAULT-valued components vanish.
    fn component(&mut self, out: &mut Vec<u8>, field: &'static Field, slot: Option<&Object>) -> Result<()> {
        let object = match slot {
            Some(object) => object,
            None if field.optional || field.default.is_some() => return Ok(()),
            None => {
                debug_now!("required {} is absent", field.name);
                return Err(ErrorKind::Malformed.into());
            }
        };
        if let Some(default) = field.default_value()? {
            if object.value() == Some(&default) {
                return Ok(());
            }
        }
        self.tagged(out, field, object)
    }

    fn tagged(&mut self, out: &mut Vec<u8>, field: &'static Field, object: &Object) -> Result<()> {
        match (field.tagging, field.mode()) {
            (Some(_), Some(Mode::Implicit)) => {
                let encoded = self.encode(field.item, object, field.outer_tag())?;
                out.extend_from_slice(&encoded);
            }
            (Some(tagging), _) => {
                let inner = self.encode(field.item, object, None)?;
                push_tlv(out, Tag::new(tagging.class, true, tagging.number), &inner)?;
            }
            (None, _) => {
                let encoded = self.encode(field.item, object, None)?;
                out.extend_from_slice(&encoded);
            }
        }
        Ok(())
    }
}
