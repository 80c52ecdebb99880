//! FlatBuffer envelope parsing
//!
//! Zero-copy access to the `Main` envelope every econfeed buffer starts with.
//!
//! # Wire Format
//!
//! FlatBuffers uses a vtable-based format:
//! ```text
//! [4 bytes: root offset] -> [table]
//!                              |
//!                              v
//!                           [vtable offset (i32)]
//!                           [field data...]
//!                              |
//!                              v
//!                           [vtable]
//!                           [vtable size (u16)]
//!                           [table size (u16)]
//!                           [field offsets (u16 each)]
//! ```
//!
//! # Safety
//!
//! This module performs bounds checking on all accesses. Invalid messages
//! will return errors rather than panicking or reading out of bounds.

use crate::decode::table::{FlatTable, read_u32};
use crate::schema::slots;
use crate::{MAX_MESSAGE_SIZE, MIN_MESSAGE_SIZE, MessageType, ProtocolError, Result};

/// Zero-copy view into a `Main` envelope
///
/// # Example
///
/// ```ignore
/// let msg = FlatMessage::parse(buf)?;
/// match msg.message_type() {
///     Some(MessageType::Log) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FlatMessage<'a> {
    buf: &'a [u8],
    root: FlatTable<'a>,
}

impl<'a> FlatMessage<'a> {
    /// Parse the envelope of a buffer
    ///
    /// # Validation Stages
    ///
    /// 1. Size bounds check
    /// 2. Root offset sanity check
    /// 3. VTable sanity check
    ///
    /// Field contents are not checked here; see [`crate::verify`].
    pub fn parse(buf: &'a [u8]) -> Result<Self> {
        if buf.len() < MIN_MESSAGE_SIZE {
            return Err(ProtocolError::too_short(MIN_MESSAGE_SIZE, buf.len()));
        }

        if buf.len() > MAX_MESSAGE_SIZE {
            return Err(ProtocolError::message_too_large(buf.len(), MAX_MESSAGE_SIZE));
        }

        let root_offset = read_u32(buf, 0)? as usize;

        if root_offset < 4 || root_offset + 4 > buf.len() {
            return Err(ProtocolError::invalid_flatbuffer(format!(
                "root offset {} exceeds buffer length {}",
                root_offset,
                buf.len()
            )));
        }

        let root = FlatTable::parse(buf, root_offset)?;
        Ok(Self { buf, root })
    }

    /// Get the raw buffer
    #[inline]
    pub fn raw_bytes(&self) -> &'a [u8] {
        self.buf
    }

    /// The root table itself
    #[inline]
    pub fn root(&self) -> &FlatTable<'a> {
        &self.root
    }

    /// Discriminant byte exactly as written
    #[inline]
    pub fn raw_message_type(&self) -> u8 {
        self.root.read_u8(slots::main::MESSAGE_TYPE, 0)
    }

    /// Discriminant, or None when it names no known record
    #[inline]
    pub fn message_type(&self) -> Option<MessageType> {
        MessageType::from_u8(self.raw_message_type())
    }

    /// Schema version the writer used (0 when absent)
    #[inline]
    pub fn version(&self) -> u8 {
        self.root.read_u8(slots::main::VERSION, 0)
    }

    /// The record table (required)
    pub fn message(&self) -> Result<FlatTable<'a>> {
        self.root
            .read_table(slots::main::MESSAGE)?
            .ok_or(ProtocolError::MissingField("message"))
    }
}
