//! FlatBuffer table parsing helpers
//!
//! Generic utilities for parsing FlatBuffer tables without code generation.
//! Every access is bounds-checked; a damaged buffer yields an error, never a
//! panic or an out-of-bounds read.

use crate::{ProtocolError, Result};

/// Helper for parsing FlatBuffer tables
#[derive(Debug, Clone, Copy)]
pub struct FlatTable<'a> {
    buf: &'a [u8],
    table_offset: usize,
    vtable_offset: usize,
    vtable_fields: usize,
    table_size: usize,
}

impl<'a> FlatTable<'a> {
    /// Parse a table at the given offset
    pub fn parse(buf: &'a [u8], table_offset: usize) -> Result<Self> {
        if table_offset + 4 > buf.len() {
            return Err(ProtocolError::invalid_flatbuffer(
                "table offset out of bounds",
            ));
        }

        // Read vtable soffset (standard FlatBuffers: vtable = table - soffset)
        let vtable_soffset = read_i32(buf, table_offset)?;
        let vtable_offset = if vtable_soffset >= 0 {
            table_offset
                .checked_sub(vtable_soffset as usize)
                .ok_or_else(|| ProtocolError::invalid_flatbuffer("vtable offset underflow"))?
        } else {
            // Negative soffset means vtable is after table (rare but valid)
            table_offset + vtable_soffset.unsigned_abs() as usize
        };

        if vtable_offset + 4 > buf.len() {
            return Err(ProtocolError::invalid_flatbuffer("vtable out of bounds"));
        }

        let vtable_size = read_u16(buf, vtable_offset)? as usize;
        if vtable_size < 4 || !vtable_size.is_multiple_of(2) || vtable_offset + vtable_size > buf.len() {
            return Err(ProtocolError::invalid_flatbuffer("invalid vtable size"));
        }

        let table_size = read_u16(buf, vtable_offset + 2)? as usize;
        if table_size < 4 || table_offset + table_size > buf.len() {
            return Err(ProtocolError::invalid_flatbuffer("invalid table size"));
        }

        let vtable_fields = (vtable_size - 4) / 2;

        Ok(Self {
            buf,
            table_offset,
            vtable_offset,
            vtable_fields,
            table_size,
        })
    }

    /// Number of slots described by the vtable
    #[inline]
    pub fn field_count(&self) -> usize {
        self.vtable_fields
    }

    /// Inline size of the table in bytes, soffset included
    #[inline]
    pub fn table_size(&self) -> usize {
        self.table_size
    }

    /// Offset relative to the table start, or None if the field is absent
    pub fn field_position(&self, field_index: usize) -> Option<usize> {
        if field_index >= self.vtable_fields {
            return None;
        }

        let slot_offset = self.vtable_offset + 4 + (field_index * 2);
        let field_offset = read_u16(self.buf, slot_offset).ok()? as usize;
        (field_offset != 0).then_some(field_offset)
    }

    /// Get absolute field offset from vtable
    fn field_offset(&self, field_index: usize) -> Option<usize> {
        self.field_position(field_index)
            .map(|pos| self.table_offset + pos)
    }

    /// Read u8 field with default
    pub fn read_u8(&self, field_index: usize, default: u8) -> u8 {
        self.field_offset(field_index)
            .and_then(|off| self.buf.get(off).copied())
            .unwrap_or(default)
    }

    /// Read i16 field with default
    pub fn read_i16(&self, field_index: usize, default: i16) -> i16 {
        self.field_offset(field_index)
            .and_then(|off| read_i16(self.buf, off).ok())
            .unwrap_or(default)
    }

    /// Read u32 field with default
    pub fn read_u32(&self, field_index: usize, default: u32) -> u32 {
        self.field_offset(field_index)
            .and_then(|off| read_u32(self.buf, off).ok())
            .unwrap_or(default)
    }

    /// Read u64 field with default
    pub fn read_u64(&self, field_index: usize, default: u64) -> u64 {
        self.field_offset(field_index)
            .and_then(|off| read_u64(self.buf, off).ok())
            .unwrap_or(default)
    }

    /// Read f64 (double) field with default
    pub fn read_f64(&self, field_index: usize, default: f64) -> f64 {
        self.field_offset(field_index)
            .and_then(|off| read_f64(self.buf, off).ok())
            .unwrap_or(default)
    }

    /// Read nested table field
    pub fn read_table(&self, field_index: usize) -> Result<Option<FlatTable<'a>>> {
        let Some(field_offset) = self.field_offset(field_index) else {
            return Ok(None);
        };

        if field_offset + 4 > self.buf.len() {
            return Err(ProtocolError::invalid_flatbuffer("table offset out of bounds"));
        }

        // Read relative offset to nested table
        let table_rel = read_u32(self.buf, field_offset)? as usize;
        if table_rel == 0 {
            return Err(ProtocolError::invalid_flatbuffer("self-referencing table offset"));
        }
        let table_offset = field_offset + table_rel;

        let table = FlatTable::parse(self.buf, table_offset)?;
        Ok(Some(table))
    }

    /// Read string field
    pub fn read_string(&self, field_index: usize) -> Result<Option<&'a str>> {
        let Some(field_offset) = self.field_offset(field_index) else {
            return Ok(None);
        };

        let bytes = read_vector(self.buf, field_offset)?;
        std::str::from_utf8(bytes)
            .map(Some)
            .map_err(|_| ProtocolError::invalid_flatbuffer("invalid UTF-8 string"))
    }
}

// =============================================================================
// Read Helpers
// =============================================================================

/// Read a length-prefixed byte vector referenced from `field_offset`
fn read_vector(buf: &[u8], field_offset: usize) -> Result<&[u8]> {
    if field_offset + 4 > buf.len() {
        return Err(ProtocolError::invalid_flatbuffer(
            "vector offset out of bounds",
        ));
    }

    let vector_rel = read_u32(buf, field_offset)? as usize;
    let vector_offset = field_offset + vector_rel;

    if vector_offset + 4 > buf.len() {
        return Err(ProtocolError::invalid_flatbuffer(
            "vector data out of bounds",
        ));
    }

    let length = read_u32(buf, vector_offset)? as usize;
    let data_start = vector_offset + 4;

    if data_start + length > buf.len() {
        return Err(ProtocolError::invalid_flatbuffer(
            "vector data extends past buffer",
        ));
    }

    Ok(&buf[data_start..data_start + length])
}

#[inline]
pub(crate) fn read_u16(buf: &[u8], offset: usize) -> Result<u16> {
    let bytes = read_array::<2>(buf, offset)?;
    Ok(u16::from_le_bytes(bytes))
}

#[inline]
fn read_i16(buf: &[u8], offset: usize) -> Result<i16> {
    let bytes = read_array::<2>(buf, offset)?;
    Ok(i16::from_le_bytes(bytes))
}

#[inline]
pub(crate) fn read_u32(buf: &[u8], offset: usize) -> Result<u32> {
    let bytes = read_array::<4>(buf, offset)?;
    Ok(u32::from_le_bytes(bytes))
}

#[inline]
fn read_i32(buf: &[u8], offset: usize) -> Result<i32> {
    let bytes = read_array::<4>(buf, offset)?;
    Ok(i32::from_le_bytes(bytes))
}

#[inline]
fn read_u64(buf: &[u8], offset: usize) -> Result<u64> {
    let bytes = read_array::<8>(buf, offset)?;
    Ok(u64::from_le_bytes(bytes))
}

#[inline]
fn read_f64(buf: &[u8], offset: usize) -> Result<f64> {
    let bytes = read_array::<8>(buf, offset)?;
    Ok(f64::from_le_bytes(bytes))
}

#[inline]
fn read_array<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N]> {
    buf.get(offset..offset + N)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| ProtocolError::too_short(offset + N, buf.len()))
}
