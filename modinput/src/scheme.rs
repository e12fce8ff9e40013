//! FILENAME: modinput/src/scheme.rs
//! PURPOSE: The scheme a modular input reports when asked for `--scheme`.
//! CONTEXT: The server reads this document to learn the input's title, how
//! it streams events, and which arguments its configuration stanza accepts.

use crate::argument::Argument;
use crate::error::SchemeError;
use crate::xml::{write_element, write_flag};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Write;

/// How the input hands events to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamingMode {
    /// Plain text on stdout.
    Simple,
    /// `<stream><event>` documents on stdout.
    #[default]
    Xml,
}

impl StreamingMode {
    pub fn token(self) -> &'static str {
        match self {
            StreamingMode::Simple => "simple",
            StreamingMode::Xml => "xml",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheme {
    pub title: String,
    pub description: Option<String>,
    /// Whether the server calls the input with `--validate-arguments`.
    pub use_external_validation: bool,
    /// Whether one process serves every configured stanza.
    pub use_single_instance: bool,
    pub streaming_mode: StreamingMode,
    arguments: Vec<Argument>,
}

impl Scheme {
    pub fn new(title: impl Into<String>) -> Self {
        Scheme {
            title: title.into(),
            description: None,
            use_external_validation: true,
            use_single_instance: false,
            streaming_mode: StreamingMode::default(),
            arguments: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_external_validation(mut self, enabled: bool) -> Self {
        self.use_external_validation = enabled;
        self
    }

    pub fn with_single_instance(mut self, enabled: bool) -> Self {
        self.use_single_instance = enabled;
        self
    }

    pub fn with_streaming_mode(mut self, mode: StreamingMode) -> Self {
        self.streaming_mode = mode;
        self
    }

    /// Appends an argument. Arguments are written in the order added.
    pub fn add_argument(&mut self, argument: Argument) -> &mut Self {
        self.arguments.push(argument);
        self
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Writes the `<scheme>` document to `out`.
    pub fn write_xml<W: Write>(&self, out: W) -> Result<(), SchemeError> {
        let mut writer = Writer::new(out);

        writer.write_event(Event::Start(BytesStart::new("scheme")))?;
        write_element(&mut writer, "title", &self.title)?;
        if let Some(description) = &self.description {
            write_element(&mut writer, "description", description)?;
        }
        write_flag(&mut writer, "use_external_validation", self.use_external_validation)?;
        write_flag(&mut writer, "use_single_instance", self.use_single_instance)?;
        write_element(&mut writer, "streaming_mode", self.streaming_mode.token())?;

        writer.write_event(Event::Start(BytesStart::new("endpoint")))?;
        writer.write_event(Event::Start(BytesStart::new("args")))?;
        for argument in &self.arguments {
            argument.write(&mut writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new("args")))?;
        writer.write_event(Event::End(BytesEnd::new("endpoint")))?;

        writer.write_event(Event::End(BytesEnd::new("scheme")))?;
        writer.into_inner().flush()?;
        Ok(())
    }

    pub fn to_xml(&self) -> Result<String, SchemeError> {
        let mut buffer = Vec::new();
        self.write_xml(&mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
