//! econfeed protocol - domain records and their wire format
//!
//! This crate provides the typed records that flow through econfeed and the
//! binary codec that carries them between processes and onto disk:
//! - `EconomicEvent`, `CalendarEvent` - headline events sharing `HeadlineBase`
//! - `ReferenceData`, `MacroHeadlineEvent`, `MacroCalendarEvent` - correlation-keyed series records
//! - `LogRecord` - module/status diagnostic lines
//! - `Encode` / `decode_message` - FlatBuffer codec with a `Main` envelope
//! - `verify` - structural check every reader runs before touching fields
//! - `replay` - `fb_NNNNNN.bin` capture files
//!
//! # Design Principles
//!
//! - **Self-contained buffers**: every buffer carries its own discriminant and
//!   schema version; no external string table
//! - **Verify before read**: a buffer failing verification is rejected whole
//! - **Append-only schema**: new fields go at the end of a table layout
//!
//! # FlatBuffers Integration
//!
//! Buffers follow the FlatBuffers binary layout directly, without code
//! generation. The table layouts live in [`schema`].

mod decode;
mod encode;
mod error;
mod flatbuf;
mod model;
pub mod replay;
pub mod schema;
mod verify;

pub use decode::{FlatTable, decode_message};
pub use encode::{
    Encode, FieldValue, TableBuilder, encode_message, finish_message, measurement_table,
    timestamp_table,
};
pub use error::ProtocolError;
pub use flatbuf::FlatMessage;
pub use model::{
    CalendarEvent, EconomicEvent, EventKind, EventSubkind, HeadlineBase, LogRecord,
    MacroCalendarEvent, MacroHeadlineEvent, Measurement, Message, Module, ReferenceData,
    ReleaseStatus, ServiceStatus, SessionStatus, SubscriptionStatus, SystemStatus, TimeInterval,
    Timestamp, status_name,
};
pub use schema::MessageType;
pub use verify::verify;

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Schema version written into every envelope
pub const SCHEMA_VERSION: u8 = 1;

/// Smallest buffer that can hold a root offset, a vtable and a table
pub const MIN_MESSAGE_SIZE: usize = 16;

/// Largest buffer accepted by the decoder (16MB)
pub const MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

#[cfg(test)]
mod model_test;
#[cfg(test)]
mod replay_test;
