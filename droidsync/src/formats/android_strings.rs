//! Support for Android `strings.xml` resource files.
//!
//! Values are stored unescaped in memory and escaped on write following
//! <https://developer.android.com/guide/topics/resources/string-resource#escaping_quotes>.
//! `<string>` and `<plurals>` elements are supported; string arrays are not.

use quick_xml::{
    Reader, Writer,
    escape::partial_escape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::{
    collections::BTreeMap,
    io::{BufRead, Write},
};

use crate::{
    error::Error,
    traits::Parser,
    types::{PluralCategory, Term, TranslationContent},
};

const INDENT: &str = "\n    ";
const ITEM_INDENT: &str = "\n        ";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    pub strings: Vec<StringResource>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringResource {
    pub name: String,
    pub value: StringValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringValue {
    Singular(String),
    Plural(BTreeMap<PluralCategory, String>),
}

impl Format {
    /// Builds a document from `(key, text)` pairs, preserving their order.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Format {
            strings: pairs
                .into_iter()
                .map(|(name, value)| StringResource {
                    name: name.into(),
                    value: StringValue::Singular(value.into()),
                })
                .collect(),
        }
    }

    /// Builds a document from translated terms; untranslated terms are omitted.
    pub fn from_terms(terms: &[Term]) -> Self {
        Format {
            strings: terms
                .iter()
                .filter_map(|term| {
                    let value = match &term.translation.as_ref()?.content {
                        TranslationContent::Singular(text) => StringValue::Singular(text.clone()),
                        TranslationContent::Plural(forms) => StringValue::Plural(forms.clone()),
                    };
                    Some(StringResource {
                        name: term.key.clone(),
                        value,
                    })
                })
                .collect(),
        }
    }

    /// All singular strings as `(name, value)` pairs, in document order.
    pub fn singular_pairs(&self) -> Vec<(&str, &str)> {
        self.strings
            .iter()
            .filter_map(|sr| match &sr.value {
                StringValue::Singular(value) => Some((sr.name.as_str(), value.as_str())),
                StringValue::Plural(_) => None,
            })
            .collect()
    }

    pub fn find(&self, name: &str) -> Option<&StringValue> {
        self.strings
            .iter()
            .find(|sr| sr.name == name)
            .map(|sr| &sr.value)
    }
}

impl Parser for Format {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);

        let mut buf = Vec::new();
        let mut resources = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(ref e) if e.name().as_ref() == b"string" => {
                    let name = name_attribute(e, "string")?;
                    let value = read_text_until_end(&mut xml_reader, b"string")?;
                    resources.push(StringResource {
                        name,
                        value: StringValue::Singular(unescape_value(&value)),
                    });
                }
                Event::Empty(ref e) if e.name().as_ref() == b"string" => {
                    resources.push(StringResource {
                        name: name_attribute(e, "string")?,
                        value: StringValue::Singular(String::new()),
                    });
                }
                Event::Start(ref e) if e.name().as_ref() == b"plurals" => {
                    let name = name_attribute(e, "plurals")?;
                    let forms = parse_plural_items(&mut xml_reader)?;
                    resources.push(StringResource {
                        name,
                        value: StringValue::Plural(forms),
                    });
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        Ok(Format { strings: resources })
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new(&mut writer);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        xml_writer.write_event(Event::Start(BytesStart::new("resources")))?;

        for sr in &self.strings {
            xml_writer.write_event(Event::Text(BytesText::new(INDENT)))?;
            match &sr.value {
                StringValue::Singular(value) => {
                    let mut elem = BytesStart::new("string");
                    elem.push_attribute(("name", sr.name.as_str()));
                    write_text_element(&mut xml_writer, elem, "string", value)?;
                }
                StringValue::Plural(forms) => {
                    let mut elem = BytesStart::new("plurals");
                    elem.push_attribute(("name", sr.name.as_str()));
                    xml_writer.write_event(Event::Start(elem))?;
                    for (category, value) in forms {
                        xml_writer.write_event(Event::Text(BytesText::new(ITEM_INDENT)))?;
                        let mut item = BytesStart::new("item");
                        item.push_attribute(("quantity", category.as_str()));
                        write_text_element(&mut xml_writer, item, "item", value)?;
                    }
                    xml_writer.write_event(Event::Text(BytesText::new(INDENT)))?;
                    xml_writer.write_event(Event::End(BytesEnd::new("plurals")))?;
                }
            }
        }

        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        xml_writer.write_event(Event::End(BytesEnd::new("resources")))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        Ok(())
    }
}

fn write_text_element<W: Write>(
    xml_writer: &mut Writer<W>,
    start: BytesStart,
    end: &str,
    value: &str,
) -> Result<(), Error> {
    xml_writer.write_event(Event::Start(start))?;
    let escaped = escape_value(value);
    xml_writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(
        &escaped,
    ))))?;
    xml_writer.write_event(Event::End(BytesEnd::new(end)))?;
    Ok(())
}

/// Escapes a value for Android's resource compiler.
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '@' => out.push_str("\\@"),
            '?' => out.push_str("\\?"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}

/// Reverses [`escape_value`]. Also understands `\t` and `\uXXXX`.
pub fn unescape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn name_attribute(e: &BytesStart, element: &str) -> Result<String, Error> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"name" {
            return Ok(attr.unescape_value()?.to_string());
        }
    }
    Err(Error::InvalidResource(format!(
        "{} tag missing 'name'",
        element
    )))
}

/// Concatenates text and CDATA up to the matching end tag.
fn read_text_until_end<R: BufRead>(
    xml_reader: &mut Reader<R>,
    end: &[u8],
) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut value = String::new();
    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Text(e) => value.push_str(&e.unescape()?),
            Event::CData(e) => value.push_str(&String::from_utf8_lossy(&e)),
            Event::End(e) if e.name().as_ref() == end => break,
            Event::Eof => return Err(Error::InvalidResource("Unexpected EOF".to_string())),
            _ => {}
        }
        buf.clear();
    }
    Ok(value)
}

fn parse_plural_items<R: BufRead>(
    xml_reader: &mut Reader<R>,
) -> Result<BTreeMap<PluralCategory, String>, Error> {
    let mut buf = Vec::new();
    let mut forms = BTreeMap::new();
    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.name().as_ref() == b"item" => {
                let mut quantity = None;
                for attr in e.attributes() {
                    let attr = attr?;
                    if attr.key.as_ref() == b"quantity" {
                        quantity = Some(attr.unescape_value()?.to_string());
                    }
                }
                let quantity = quantity.ok_or_else(|| {
                    Error::InvalidResource("item tag missing 'quantity'".to_string())
                })?;
                let category = quantity
                    .parse::<PluralCategory>()
                    .map_err(Error::InvalidResource)?;
                let value = read_text_until_end(xml_reader, b"item")?;
                forms.insert(category, unescape_value(&value));
            }
            Event::End(ref e) if e.name().as_ref() == b"plurals" => break,
            Event::Eof => return Err(Error::InvalidResource("Unexpected EOF".to_string())),
            _ => {}
        }
        buf.clear();
    }
    Ok(forms)
}
