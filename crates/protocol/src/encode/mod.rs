//! FlatBuffer encoding for building wire-format messages
//!
//! Records are described as [`TableBuilder`]s (slot index to value) and laid
//! out by one generic writer. Every record type implements [`Encode`]; the
//! element parser's direct path builds the same tables without materializing
//! a record first.
//!
//! # Wire Format Layout
//!
//! FlatBuffers use a forward layout where:
//! 1. Root offset points to the `Main` table
//! 2. VTables come before their tables
//! 3. Tables contain inline scalars and offsets to strings and sub-tables
//! 4. Strings and sub-tables come after the table they belong to
//!
//! # Usage
//!
//! ```ignore
//! use econfeed_protocol::{Encode, EconomicEvent};
//!
//! let event = EconomicEvent::new("BBG002SBQ0F2", "CPI YOY Index");
//! let bytes = event.encode();
//! ```

mod records;
mod table;

pub use records::{Encode, encode_message, measurement_table, timestamp_table};
pub use table::{FieldValue, TableBuilder, finish_message};

/// Write an i16 in little-endian format
#[inline]
fn write_i16(buf: &mut Vec<u8>, value: i16) {
    buf.extend_from_slice(&value.to_le_bytes());
}

/// Write a u32 in little-endian format
#[inline]
fn write_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

/// Write a u64 in little-endian format
#[inline]
fn write_u64(buf: &mut Vec<u8>, value: u64) {
    buf.extend_from_slice(&value.to_le_bytes());
}

/// Write an f64 in little-endian format
#[inline]
fn write_f64(buf: &mut Vec<u8>, value: f64) {
    buf.extend_from_slice(&value.to_le_bytes());
}

/// Write an i32 in little-endian format
#[inline]
fn write_i32(buf: &mut Vec<u8>, value: i32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

/// Overwrite a u16 at a known position
#[inline]
fn patch_u16(buf: &mut [u8], pos: usize, value: u16) {
    buf[pos..pos + 2].copy_from_slice(&value.to_le_bytes());
}

/// Overwrite a u32 at a known position
#[inline]
fn patch_u32(buf: &mut [u8], pos: usize, value: u32) {
    buf[pos..pos + 4].copy_from_slice(&value.to_le_bytes());
}

/// Pad with zeros until the length is a multiple of `align`
#[inline]
fn align_to(buf: &mut Vec<u8>, align: usize) {
    while !buf.len().is_multiple_of(align) {
        buf.push(0);
    }
}
