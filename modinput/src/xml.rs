//! FILENAME: modinput/src/xml.rs
//! Element helpers shared by schemes and arguments.

use crate::error::SchemeError;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

/// Writes `<name>text</name>` with the text escaped.
pub(crate) fn write_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), SchemeError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Writes a boolean element as `true`/`false`.
pub(crate) fn write_flag<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: bool,
) -> Result<(), SchemeError> {
    write_element(writer, name, if value { "true" } else { "false" })
}
