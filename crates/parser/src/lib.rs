//! econfeed parser - element trees to records and wire buffers
//!
//! The feed delivers each event as a nested, dynamically-typed element tree.
//! This crate reads such trees through the [`Element`] capability and
//! produces either typed records or encoded buffers:
//!
//! - `parse_*` - one typed record per element, every optional field defaulted
//! - `encode_*` - the same rules written straight into a wire buffer
//! - [`parse_message`] / [`encode_element`] - dispatch on the element name
//! - [`Parser`] - dispatch plus bus reporting and telemetry spans
//!
//! # Field rules
//!
//! - Required identifiers (`ID_BB_GLOBAL`, `PARSEKYABLE_DES`) missing is an error
//! - Optional fields absent take the type's default (NaN, 0, empty, epoch)
//! - Text that does not parse as a number becomes NaN or 0
//! - An unrecognized choice variant defaults that value and is noted as an
//!   [`Anomaly`]; the rest of the record is still parsed
//!
//! Both paths share these rules, so for any element
//! `encode_element(e)` equals `parse_message(e).encode()` byte for byte.

mod direct;
mod dispatch;
mod element;
mod error;
mod fields;
pub mod names;
mod node;
mod parser;
mod records;

pub use direct::{
    encode_calendar_event, encode_economic_event, encode_macro_calendar_event,
    encode_macro_headline_event, encode_reference_data,
};
pub use dispatch::{RecordKind, encode_element, parse_message, resolve};
pub use element::{Datetime, Element};
pub use error::ParseError;
pub use fields::{Anomaly, ParseNotes};
pub use node::{ElementNode, Scalar};
pub use parser::Parser;
pub use records::{
    parse_calendar_event, parse_economic_event, parse_macro_calendar_event,
    parse_macro_headline_event, parse_reference_data,
};

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod fixtures;

#[cfg(test)]
mod direct_test;
#[cfg(test)]
mod fields_test;
#[cfg(test)]
mod parser_test;
