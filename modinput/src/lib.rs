//! FILENAME: modinput/src/lib.rs
//! Modular input schemes.
//!
//! A modular input is a script the server runs to collect events. When
//! invoked with `--scheme` it prints an XML document describing itself; this
//! crate builds that document.

pub mod argument;
pub mod error;
pub mod scheme;
mod xml;

pub use argument::{Argument, DataType};
pub use error::SchemeError;
pub use scheme::{Scheme, StreamingMode};
