use crate::{
    item::{Field, ItemKind, Mode},
    primitive::join_segments,
    Any, ContentLength, Decoder, ErrorKind, Header, Item, Length, Object, Options, Primitive, Result, Rules,
    Tag, Value,
};
use alloc::{boxed::Box, vec::Vec};

/// Decoding walk over one input, tracking descriptor depth.
pub(crate) struct Reader {
    options: Options,
    depth: usize,
}

impl Reader {
    pub(crate) fn new(options: Options) -> Self {
        Self { options, depth: 0 }
    }

    pub(crate) fn decode(&mut self, item: &'static Item, bytes: &[u8]) -> Result<Object> {
        let mut decoder = Decoder::with_rules(bytes, self.options.rules);
        let object = self.item(&mut decoder, item, None)?;
        decoder.finish(object)
    }

    fn enter(&mut self, decoder: &mut Decoder<'_>) -> Result<()> {
        if self.depth >= self.options.max_depth {
            debug_now!("nesting deeper than {}", self.options.max_depth);
            return decoder.error(ErrorKind::DepthExceeded { limit: self.options.max_depth });
        }
        self.depth += 1;
        Ok(())
    }

    /// Read a header and check it carries `expected`.
    fn header(&self, decoder: &mut Decoder<'_>, expected: Tag) -> Result<Header> {
        let header: Header = decoder.decode()?;
        if header.tag != expected {
            return decoder.error(ErrorKind::UnexpectedTag { expected: Some(expected), actual: header.tag });
        }
        Ok(header)
    }

    /// Decode `item`, whose outer tag is replaced by `implicit` if given.
    fn item(&mut self, decoder: &mut Decoder<'_>, item: &'static Item, implicit: Option<Tag>) -> Result<Object> {
        self.enter(decoder)?;
        trace_now!("entering {} at depth {}", item.name, self.depth);
        let object = match item.kind {
            ItemKind::Primitive(Primitive::Any) => {
                let any = Any::decode_element(decoder, self.depth, self.options.max_depth)?;
                Object::Primitive(Value::Any(any))
            }
            ItemKind::Primitive(primitive) => self.primitive(decoder, item, primitive, implicit)?,
            ItemKind::Sequence(fields) => {
                let header = self.header(decoder, implicit.unwrap_or(Tag::SEQUENCE))?;
                decoder.constructed(&header, |nested| self.fields(nested, fields))?
            }
            ItemKind::Choice(alternatives) => self.choice(decoder, alternatives)?,
            ItemKind::SequenceOf(element) => {
                let header = self.header(decoder, implicit.unwrap_or(Tag::SEQUENCE))?;
                decoder.constructed(&header, |nested| self.elements(nested, element))?
            }
            ItemKind::SetOf(element) => {
                let header = self.header(decoder, implicit.unwrap_or(Tag::SET))?;
                decoder.constructed(&header, |nested| self.elements(nested, element))?
            }
        };
        self.depth -= 1;
        Ok(object)
    }

    fn primitive(
        &mut self,
        decoder: &mut Decoder<'_>,
        item: &Item,
        primitive: Primitive,
        implicit: Option<Tag>,
    ) -> Result<Object> {
        let expected = match implicit.or_else(|| item.natural_tag()) {
            Some(tag) => tag,
            None => return decoder.error(ErrorKind::Malformed),
        };
        let header: Header = decoder.decode()?;
        let at = decoder.offset();
        let value = if header.tag == expected {
            let length = match header.length {
                ContentLength::Definite(length) => length,
                ContentLength::Indefinite => return decoder.error(ErrorKind::Malformed),
            };
            let content = decoder.bytes(length)?;
            primitive.decode(content, decoder.rules())
        } else if decoder.rules() == Rules::Ber && primitive.is_string() && header.tag == expected.constructed() {
            info_now!("joining constructed {}", item.name);
            let content = join_segments(decoder, &header, primitive, self.depth, self.options.max_depth)?;
            primitive.decode(&content, decoder.rules())
        } else {
            return decoder.error(ErrorKind::UnexpectedTag { expected: Some(expected), actual: header.tag });
        };
        match value {
            Ok(value) => Ok(Object::Primitive(value)),
            Err(error) => {
                debug_now!("bad {} content at {}", item.name, at);
                Err(error.or_at(at))
            }
        }
    }

    fn fields(&mut self, decoder: &mut Decoder<'_>, fields: &'static [Field]) -> Result<Object> {
        let mut slots = Vec::new();
        slots.try_reserve(fields.len())?;
        for field in fields {
            let next = decoder.peek_tag()?;
            let present = next.map_or(false, |tag| field.accepts(tag, self.options.max_depth));
            if present {
                let at = decoder.offset();
                let object = self.field(decoder, field)?;
                self.check_not_default(decoder.rules(), field, &object, at)?;
                slots.push(Some(object));
            } else if let Some(default) = field.default_value()? {
                debug_now!("{} takes its default", field.name);
                slots.push(Some(Object::Primitive(default)));
            } else if field.optional {
                slots.push(None);
            } else {
                debug_now!("required {} is missing", field.name);
                return decoder.error(ErrorKind::Malformed);
            }
        }
        Ok(Object::Sequence(slots))
    }

    /// DER never encodes a component equal to its DEFAULT.
    fn check_not_default(&self, rules: Rules, field: &Field, object: &Object, at: Length) -> Result<()> {
        let default = match field.default_value()? {
            Some(default) => default,
            None => return Ok(()),
        };
        if object.value() != Some(&default) {
            return Ok(());
        }
        match rules {
            Rules::Der => {
                debug_now!("{} is encoded although equal to its default", field.name);
                Err(ErrorKind::Malformed.at(at))
            }
            Rules::Ber => {
                info_now!("accepting {} encoded with its default value", field.name);
                Ok(())
            }
        }
    }

    /// Decode one component or alternative, unwrapping its tagging.
    fn field(&mut self, decoder: &mut Decoder<'_>, field: &'static Field) -> Result<Object> {
        let tagging = match field.tagging {
            Some(tagging) => tagging,
            None => return self.item(decoder, field.item, None),
        };
        match field.mode() {
            Some(Mode::Implicit) => self.item(decoder, field.item, field.outer_tag()),
            _ => {
                let outer = Tag::new(tagging.class, true, tagging.number);
                let header = self.header(decoder, outer)?;
                decoder.constructed(&header, |nested| self.item(nested, field.item, None))
            }
        }
    }

    fn choice(&mut self, decoder: &mut Decoder<'_>, alternatives: &'static [Field]) -> Result<Object> {
        let actual = match decoder.peek_tag()? {
            Some(tag) => tag,
            None => return decoder.error(ErrorKind::Truncated),
        };
        let budget = self.options.max_depth.saturating_sub(self.depth);
        let index = match alternatives.iter().position(|alternative| alternative.accepts(actual, budget)) {
            Some(index) => index,
            None => return decoder.error(ErrorKind::UnknownChoiceTag { actual }),
        };
        debug_now!("selecting {}", alternatives[index].name);
        let value = self.field(decoder, &alternatives[index])?;
        Ok(Object::Choice { index, value: Box::new(value) })
    }

    fn elements(&mut self, decoder: &mut Decoder<'_>, element: &'static Item) -> Result<Object> {
        let mut elements = Vec::new();
        while !decoder.is_finished() {
            let object = self.item(decoder, element, None)?;
            elements.try_reserve(1)?;
            elements.push(object);
        }
        Ok(Object::Repeated(elements))
    }
}
