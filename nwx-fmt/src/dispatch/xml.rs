//! XML wire syntax
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <Publish>
//!   <PublishID>17</PublishID>
//!   ...
//!   <ContentItem>
//!     <ContentType>Text</ContentType>
//!     ...
//!   </ContentItem>
//! </Publish>
//! ```

use crate::document::{FieldSet, FieldValue, OutputDocument};
use nwx_common::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fmt::Display;
use std::io::Write;

pub const ROOT_ELEMENT: &str = "Publish";
pub const CONTENT_ELEMENT: &str = "ContentItem";

/// Serialize `document` as an indented XML wire document
pub fn to_xml(document: &OutputDocument) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(serialization)?;

    writer
        .write_event(Event::Start(BytesStart::new(ROOT_ELEMENT)))
        .map_err(serialization)?;
    write_fields(&mut writer, &document.root)?;
    write_block(&mut writer, CONTENT_ELEMENT, &document.content)?;
    writer
        .write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))
        .map_err(serialization)?;

    String::from_utf8(writer.into_inner()).map_err(serialization)
}

fn write_fields<W: Write>(writer: &mut Writer<W>, fields: &FieldSet) -> Result<()> {
    for field in fields.iter() {
        match &field.value {
            FieldValue::Text(text) => write_text(writer, &field.name, text)?,
            FieldValue::Block(block) => write_block(writer, &field.name, block)?,
        }
    }
    Ok(())
}

fn write_block<W: Write>(writer: &mut Writer<W>, name: &str, block: &FieldSet) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(serialization)?;
    write_fields(writer, block)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(serialization)?;
    Ok(())
}

fn write_text<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    if text.is_empty() {
        return writer
            .write_event(Event::Empty(BytesStart::new(name)))
            .map_err(serialization);
    }
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(serialization)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(serialization)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(serialization)?;
    Ok(())
}

fn serialization<E: Display>(err: E) -> Error {
    Error::Serialization(err.to_string())
}
