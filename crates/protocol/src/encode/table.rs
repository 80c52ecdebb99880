//! Generic table writer
//!
//! Layout produced for one table:
//!
//! ```text
//! [vtable: size u16][table size u16][slot offsets u16...]   (aligned to 4)
//! [table:  soffset i32][inline scalars / u32 placeholders]
//! [strings and sub-tables, each patched into its placeholder]
//! ```
//!
//! Scalars are aligned to their natural size relative to the buffer start.
//! Placeholders hold forward offsets relative to their own position.

use std::borrow::Cow;

use super::{align_to, patch_u16, patch_u32, write_f64, write_i16, write_i32, write_u32, write_u64};
use crate::MessageType;
use crate::schema::slots;

/// Value stored in one table slot
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    U8(u8),
    I16(i16),
    U32(u32),
    U64(u64),
    F64(f64),
    Str(Cow<'a, str>),
    Table(TableBuilder<'a>),
}

impl FieldValue<'_> {
    /// Bytes the value occupies inside its table
    #[inline]
    fn inline_size(&self) -> usize {
        match self {
            Self::U8(_) => 1,
            Self::I16(_) => 2,
            Self::U32(_) | Self::Str(_) | Self::Table(_) => 4,
            Self::U64(_) | Self::F64(_) => 8,
        }
    }
}

/// Slot-indexed description of one table, laid out by [`TableBuilder::write`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableBuilder<'a> {
    slots: Vec<Option<FieldValue<'a>>>,
}

impl<'a> TableBuilder<'a> {
    /// Create a builder with room for `count` slots
    pub fn with_slots(count: usize) -> Self {
        Self {
            slots: vec![None; count],
        }
    }

    /// Set a slot, growing the vtable if needed
    pub fn set(&mut self, slot: usize, value: FieldValue<'a>) {
        if slot >= self.slots.len() {
            self.slots.resize(slot + 1, None);
        }
        self.slots[slot] = Some(value);
    }

    pub fn u8(mut self, slot: usize, value: u8) -> Self {
        self.set(slot, FieldValue::U8(value));
        self
    }

    pub fn i16(mut self, slot: usize, value: i16) -> Self {
        self.set(slot, FieldValue::I16(value));
        self
    }

    pub fn u32(mut self, slot: usize, value: u32) -> Self {
        self.set(slot, FieldValue::U32(value));
        self
    }

    pub fn u64(mut self, slot: usize, value: u64) -> Self {
        self.set(slot, FieldValue::U64(value));
        self
    }

    pub fn f64(mut self, slot: usize, value: f64) -> Self {
        self.set(slot, FieldValue::F64(value));
        self
    }

    pub fn str(mut self, slot: usize, value: impl Into<Cow<'a, str>>) -> Self {
        self.set(slot, FieldValue::Str(value.into()));
        self
    }

    pub fn table(mut self, slot: usize, value: TableBuilder<'a>) -> Self {
        self.set(slot, FieldValue::Table(value));
        self
    }

    /// Get the value stored in a slot
    pub fn get(&self, slot: usize) -> Option<&FieldValue<'a>> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Number of vtable slots
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Append this table (and everything it references) to `buf`
    ///
    /// Returns the offset of the table start, which is what parents and
    /// the root offset point at.
    pub fn write(&self, buf: &mut Vec<u8>) -> usize {
        let vtable_size = 4 + self.slots.len() * 2;

        // === VTable (patched once the table layout is known) ===
        let vtable_start = buf.len();
        buf.resize(vtable_start + vtable_size, 0);
        align_to(buf, 4);

        // === Table ===
        let table_start = buf.len();
        write_i32(buf, (table_start - vtable_start) as i32);

        let mut field_offsets = vec![0u16; self.slots.len()];
        let mut deferred: Vec<(usize, &FieldValue<'a>)> = Vec::new();

        for (slot, value) in self.slots.iter().enumerate() {
            let Some(value) = value else {
                continue;
            };

            align_to(buf, value.inline_size());
            field_offsets[slot] = (buf.len() - table_start) as u16;

            match value {
                FieldValue::U8(v) => buf.push(*v),
                FieldValue::I16(v) => write_i16(buf, *v),
                FieldValue::U32(v) => write_u32(buf, *v),
                FieldValue::U64(v) => write_u64(buf, *v),
                FieldValue::F64(v) => write_f64(buf, *v),
                FieldValue::Str(_) | FieldValue::Table(_) => {
                    deferred.push((buf.len(), value));
                    buf.extend_from_slice(&[0u8; 4]);
                }
            }
        }

        let table_size = buf.len() - table_start;
        align_to(buf, 4);

        // === Fill in vtable ===
        patch_u16(buf, vtable_start, vtable_size as u16);
        patch_u16(buf, vtable_start + 2, table_size as u16);
        for (slot, offset) in field_offsets.iter().enumerate() {
            patch_u16(buf, vtable_start + 4 + slot * 2, *offset);
        }

        // === Out-of-line children ===
        for (placeholder, value) in deferred {
            let target = match value {
                FieldValue::Str(s) => write_string(buf, s),
                FieldValue::Table(t) => t.write(buf),
                _ => continue,
            };
            patch_u32(buf, placeholder, (target - placeholder) as u32);
        }

        table_start
    }
}

/// Write a length-prefixed, NUL-terminated string; returns its start
fn write_string(buf: &mut Vec<u8>, s: &str) -> usize {
    align_to(buf, 4);
    let start = buf.len();
    write_u32(buf, s.len() as u32);
    buf.extend_from_slice(s.as_bytes());
    buf.push(0);
    align_to(buf, 4);
    start
}

/// Wrap a record table in a `Main` envelope and produce a finished buffer
pub fn finish_message(message_type: MessageType, message: TableBuilder<'_>) -> Vec<u8> {
    let root = TableBuilder::with_slots(3)
        .u8(slots::main::MESSAGE_TYPE, message_type.as_u8())
        .table(slots::main::MESSAGE, message)
        .u8(slots::main::VERSION, crate::SCHEMA_VERSION);

    let mut buf = Vec::with_capacity(256);

    // Reserve root offset
    buf.extend_from_slice(&[0u8; 4]);
    let root_table = root.write(&mut buf);
    patch_u32(&mut buf, 0, root_table as u32);

    buf
}
