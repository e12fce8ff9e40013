//! FILENAME: modinput/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemeError {
    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generated XML is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
