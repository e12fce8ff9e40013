//! FILENAME: modinput/src/argument.rs
//! PURPOSE: One configurable argument of a modular input.

use crate::error::SchemeError;
use crate::xml::{write_element, write_flag};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Write;

/// Type the server validates an argument's value against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataType {
    Boolean,
    Number,
    #[default]
    String,
}

impl DataType {
    pub fn token(self) -> &'static str {
        match self {
            DataType::Boolean => "boolean",
            DataType::Number => "number",
            DataType::String => "string",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Server-side validation expression, e.g. `is_pos_int('port')`.
    pub validation: Option<String>,
    pub data_type: DataType,
    pub required_on_edit: bool,
    pub required_on_create: bool,
}

impl Argument {
    pub fn new(name: impl Into<String>) -> Self {
        Argument {
            name: name.into(),
            title: None,
            description: None,
            validation: None,
            data_type: DataType::default(),
            required_on_edit: false,
            required_on_create: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_validation(mut self, validation: impl Into<String>) -> Self {
        self.validation = Some(validation.into());
        self
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn with_required_on_edit(mut self, required: bool) -> Self {
        self.required_on_edit = required;
        self
    }

    pub fn with_required_on_create(mut self, required: bool) -> Self {
        self.required_on_create = required;
        self
    }

    /// Writes the `<arg>` element.
    pub(crate) fn write<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), SchemeError> {
        let mut start = BytesStart::new("arg");
        start.push_attribute(("name", self.name.as_str()));
        writer.write_event(Event::Start(start))?;

        if let Some(title) = &self.title {
            write_element(writer, "title", title)?;
        }
        if let Some(description) = &self.description {
            write_element(writer, "description", description)?;
        }
        if let Some(validation) = &self.validation {
            write_element(writer, "validation", validation)?;
        }
        write_element(writer, "data_type", self.data_type.token())?;
        write_flag(writer, "required_on_edit", self.required_on_edit)?;
        write_flag(writer, "required_on_create", self.required_on_create)?;

        writer.write_event(Event::End(BytesEnd::new("arg")))?;
        Ok(())
    }

    /// The `<arg>` element alone, as a string.
    pub fn to_xml(&self) -> Result<String, SchemeError> {
        let mut writer = Writer::new(Vec::new());
        self.write(&mut writer)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_with_defaults() {
        let xml = Argument::new("some_name").to_xml().unwrap();
        assert_eq!(
            xml,
            "<arg name=\"some_name\">\
             <data_type>string</data_type>\
             <required_on_edit>false</required_on_edit>\
             <required_on_create>false</required_on_create>\
             </arg>"
        );
    }

    #[test]
    fn test_argument_without_defaults() {
        let xml = Argument::new("some_name")
            .with_description("\u{C3BC} and \u{C3B6} and <&> f\u{00FC}r")
            .with_data_type(DataType::Boolean)
            .with_validation("is_pos_int('some_name')")
            .with_required_on_edit(true)
            .with_required_on_create(true)
            .to_xml()
            .unwrap();

        assert_eq!(
            xml,
            "<arg name=\"some_name\">\
             <description>\u{C3BC} and \u{C3B6} and &lt;&amp;&gt; f\u{00FC}r</description>\
             <validation>is_pos_int(&apos;some_name&apos;)</validation>\
             <data_type>boolean</data_type>\
             <required_on_edit>true</required_on_edit>\
             <required_on_create>true</required_on_create>\
             </arg>"
        );
    }

    #[test]
    fn test_title_precedes_description() {
        let xml = Argument::new("port")
            .with_title("Port")
            .with_description("TCP port")
            .with_data_type(DataType::Number)
            .to_xml()
            .unwrap();
        let title = xml.find("<title>Port</title>").unwrap();
        let description = xml.find("<description>").unwrap();
        assert!(title < description);
        assert!(xml.contains("<data_type>number</data_type>"));
    }

    #[test]
    fn test_name_attribute_is_escaped() {
        let xml = Argument::new("a\"b").to_xml().unwrap();
        assert!(xml.starts_with("<arg name=\"a&quot;b\">"));
    }
}
